//! Feature positions and ranges

use super::cv_term::CvTerm;
use psimi_common::{vocabulary, PsiError, Result, Term};
use serde::Serialize;
use std::fmt;

/// One end of a range. `start..=end` is the interval the position may fall in;
/// undetermined positions carry `0..=0`.
#[derive(Debug, Clone, Serialize)]
pub struct Position {
    status: CvTerm,
    start: i64,
    end: i64,
    undetermined: bool,
}

impl Position {
    pub fn new(status: CvTerm, start: i64, end: i64) -> Result<Self> {
        if start > end {
            return Err(PsiError::InvalidRange(format!(
                "position start {} is after its end {}",
                start, end
            )));
        }
        Ok(Self {
            status,
            start,
            end,
            undetermined: false,
        })
    }

    /// A single certain residue.
    pub fn certain(at: i64) -> Self {
        Self {
            status: vocabulary::CERTAIN.into(),
            start: at,
            end: at,
            undetermined: false,
        }
    }

    fn without_location(status: Term) -> Self {
        Self {
            status: status.into(),
            start: 0,
            end: 0,
            undetermined: true,
        }
    }

    pub fn undetermined() -> Self {
        Self::without_location(vocabulary::UNDETERMINED)
    }

    pub fn n_terminal() -> Self {
        Self::without_location(vocabulary::N_TERMINAL)
    }

    pub fn c_terminal() -> Self {
        Self::without_location(vocabulary::C_TERMINAL)
    }

    pub fn status(&self) -> &CvTerm {
        &self.status
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn is_undetermined(&self) -> bool {
        self.undetermined
    }

    /// Move a determined position by `offset`. Undetermined positions do not move.
    pub fn shifted(&self, offset: i64) -> Self {
        let mut shifted = self.clone();
        if !self.undetermined {
            shifted.start += offset;
            shifted.end += offset;
        }
        shifted
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.undetermined {
            let symbol = if self.status.is(vocabulary::N_TERMINAL) {
                "n"
            } else if self.status.is(vocabulary::C_TERMINAL) {
                "c"
            } else {
                "?"
            };
            f.write_str(symbol)
        } else if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

/// A stretch of an interactor sequence covered by a feature.
#[derive(Debug, Clone, Serialize)]
pub struct Range {
    start: Position,
    end: Position,
    link: bool,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Result<Self> {
        check_order(&start, &end)?;
        Ok(Self {
            start,
            end,
            link: false,
        })
    }

    /// A range of certain positions `start..=end`.
    pub fn certain(start: i64, end: i64) -> Result<Self> {
        Self::new(Position::certain(start), Position::certain(end))
    }

    pub fn linked(mut self) -> Self {
        self.link = true;
        self
    }

    pub fn start(&self) -> &Position {
        &self.start
    }

    pub fn end(&self) -> &Position {
        &self.end
    }

    pub fn is_link(&self) -> bool {
        self.link
    }

    pub fn set_link(&mut self, link: bool) {
        self.link = link;
    }

    /// Replace both ends at once; inverted pairs are rejected and leave the range unchanged.
    pub fn set_positions(&mut self, start: Position, end: Position) -> Result<()> {
        check_order(&start, &end)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Whether both ends are determined.
    pub fn is_determined(&self) -> bool {
        !self.start.is_undetermined() && !self.end.is_undetermined()
    }

    /// Whether the range fits in a sequence of `length` residues.
    pub fn fits(&self, length: usize) -> bool {
        let length = i64::try_from(length).unwrap_or(i64::MAX);
        [&self.start, &self.end]
            .iter()
            .filter(|p| !p.is_undetermined())
            .all(|p| p.start() >= 1 && p.end() <= length)
    }

    pub fn shifted(&self, offset: i64) -> Self {
        Self {
            start: self.start.shifted(offset),
            end: self.end.shifted(offset),
            link: self.link,
        }
    }
}

fn check_order(start: &Position, end: &Position) -> Result<()> {
    if !start.is_undetermined() && !end.is_undetermined() && start.start() > end.end() {
        return Err(PsiError::InvalidRange(format!(
            "start {} is after end {}",
            start, end
        )));
    }
    Ok(())
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
