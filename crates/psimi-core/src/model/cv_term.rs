//! Controlled-vocabulary terms

use super::xref::Xref;
use once_cell::sync::Lazy;
use psimi_common::{PsiError, Result, Term};
use regex::Regex;
use serde::Serialize;
use std::fmt;

#[allow(clippy::expect_used)]
static MI_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^MI:\d{4}$").expect("MI identifier pattern is valid"));

/// A controlled-vocabulary term: a short name plus an optional PSI-MI identifier.
#[derive(Debug, Clone, Serialize)]
pub struct CvTerm {
    short_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mi_identifier: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    identifiers: Vec<Xref>,
}

impl CvTerm {
    pub fn new(short_name: impl Into<String>) -> Result<Self> {
        let short_name = short_name.into();
        if short_name.trim().is_empty() {
            return Err(PsiError::missing("CvTerm", "short_name"));
        }
        Ok(Self {
            short_name,
            full_name: None,
            mi_identifier: None,
            identifiers: Vec::new(),
        })
    }

    /// A term carrying a PSI-MI identifier of the form `MI:0000`.
    pub fn with_mi(short_name: impl Into<String>, mi: impl Into<String>) -> Result<Self> {
        let mut term = Self::new(short_name)?;
        term.set_mi_identifier(Some(mi.into()))?;
        Ok(term)
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn set_short_name(&mut self, short_name: impl Into<String>) -> Result<()> {
        let short_name = short_name.into();
        if short_name.trim().is_empty() {
            return Err(PsiError::missing("CvTerm", "short_name"));
        }
        self.short_name = short_name;
        Ok(())
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn set_full_name(&mut self, full_name: Option<String>) {
        self.full_name = full_name;
    }

    pub fn mi_identifier(&self) -> Option<&str> {
        self.mi_identifier.as_deref()
    }

    pub fn set_mi_identifier(&mut self, mi: Option<String>) -> Result<()> {
        if let Some(mi) = &mi {
            if !MI_IDENTIFIER.is_match(mi) {
                return Err(PsiError::InvalidMiIdentifier(mi.clone()));
            }
        }
        self.mi_identifier = mi;
        Ok(())
    }

    /// Ontology cross-references other than the MI identifier.
    pub fn identifiers(&self) -> &[Xref] {
        &self.identifiers
    }

    pub fn add_identifier(&mut self, identifier: Xref) {
        self.identifiers.push(identifier);
    }

    /// Remove the first identifier equal to `identifier`.
    pub fn remove_identifier(&mut self, identifier: &Xref) -> Option<Xref> {
        let index = self.identifiers.iter().position(|x| x == identifier)?;
        Some(self.identifiers.remove(index))
    }

    /// Whether this term is the given vocabulary term.
    pub fn is(&self, term: Term) -> bool {
        term.matches(self.mi_identifier(), &self.short_name)
    }
}

impl From<Term> for CvTerm {
    fn from(term: Term) -> Self {
        Self {
            short_name: term.name.to_string(),
            full_name: None,
            mi_identifier: Some(term.mi.to_string()),
            identifiers: Vec::new(),
        }
    }
}

impl fmt::Display for CvTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mi_identifier {
            Some(mi) => write!(f, "{} ({})", self.short_name, mi),
            None => f.write_str(&self.short_name),
        }
    }
}
