//! Position and range comparators

use super::terms::CvTermComparator;
use super::{Comparator, Family};
use crate::model::{Position, Range};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Status, then start, then end.
#[derive(Debug, Clone, Copy)]
pub struct PositionComparator {
    status: CvTermComparator,
}

pub const DEFAULT_POSITION: PositionComparator = PositionComparator::new(Family::Default);
pub const UNAMBIGUOUS_POSITION: PositionComparator = PositionComparator::new(Family::Unambiguous);

impl PositionComparator {
    pub const fn new(family: Family) -> Self {
        Self {
            status: CvTermComparator::new(family),
        }
    }
}

impl Comparator<Position> for PositionComparator {
    fn compare(&self, a: &Position, b: &Position) -> Ordering {
        self.status
            .compare(a.status(), b.status())
            .then_with(|| a.start().cmp(&b.start()))
            .then_with(|| a.end().cmp(&b.end()))
    }
}

/// Start position, then end position; the unambiguous family also compares links.
#[derive(Debug, Clone, Copy)]
pub struct RangeComparator {
    family: Family,
    position: PositionComparator,
}

pub const DEFAULT_RANGE: RangeComparator = RangeComparator::new(Family::Default);
pub const UNAMBIGUOUS_RANGE: RangeComparator = RangeComparator::new(Family::Unambiguous);

impl RangeComparator {
    pub const fn new(family: Family) -> Self {
        Self {
            family,
            position: PositionComparator::new(family),
        }
    }
}

impl Comparator<Range> for RangeComparator {
    fn compare(&self, a: &Range, b: &Range) -> Ordering {
        let by_positions = self
            .position
            .compare(a.start(), b.start())
            .then_with(|| self.position.compare(a.end(), b.end()));
        match self.family {
            Family::Default => by_positions,
            Family::Unambiguous => by_positions.then_with(|| a.is_link().cmp(&b.is_link())),
        }
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_POSITION.are_equal(self, other)
    }
}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.status().hash(state);
        self.start().hash(state);
        self.end().hash(state);
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        UNAMBIGUOUS_RANGE.are_equal(self, other)
    }
}

impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start().hash(state);
        self.end().hash(state);
        self.is_link().hash(state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_order_by_start_then_end() {
        let a = Range::certain(1, 10).unwrap();
        let b = Range::certain(1, 12).unwrap();
        let c = Range::certain(2, 3).unwrap();

        assert_eq!(DEFAULT_RANGE.compare(&a, &b), Ordering::Less);
        assert_eq!(DEFAULT_RANGE.compare(&b, &c), Ordering::Less);
        assert_eq!(DEFAULT_RANGE.compare(&a, &Range::certain(1, 10).unwrap()), Ordering::Equal);
    }

    #[test]
    fn test_link_only_matters_when_unambiguous() {
        let plain = Range::certain(5, 9).unwrap();
        let linked = Range::certain(5, 9).unwrap().linked();

        assert!(DEFAULT_RANGE.are_equal(&plain, &linked));
        assert_ne!(plain, linked);
    }

    #[test]
    fn test_status_separates_positions() {
        assert_ne!(Position::n_terminal(), Position::c_terminal());
        assert_eq!(Position::undetermined(), Position::undetermined());
    }
}
