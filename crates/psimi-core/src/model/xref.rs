//! Cross-references to external records

use super::cv_term::CvTerm;
use super::observed::{Rank, Ranked};
use psimi_common::{vocabulary, PsiError, Result, Term};
use serde::Serialize;
use std::fmt;

/// A `(database, id, qualifier)` triple pointing at an external record.
#[derive(Debug, Clone, Serialize)]
pub struct Xref {
    database: CvTerm,
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    qualifier: Option<CvTerm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl Xref {
    pub fn new(database: CvTerm, id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PsiError::missing("Xref", "id"));
        }
        Ok(Self {
            database,
            id,
            qualifier: None,
            version: None,
        })
    }

    pub fn with_qualifier(database: CvTerm, id: impl Into<String>, qualifier: CvTerm) -> Result<Self> {
        let mut xref = Self::new(database, id)?;
        xref.qualifier = Some(qualifier);
        Ok(xref)
    }

    /// The canonical reference of `database` for the owning entity.
    pub fn identity(database: Term, id: impl Into<String>) -> Result<Self> {
        Self::with_qualifier(database.into(), id, vocabulary::IDENTITY.into())
    }

    pub fn secondary(database: Term, id: impl Into<String>) -> Result<Self> {
        Self::with_qualifier(database.into(), id, vocabulary::SECONDARY.into())
    }

    pub fn database(&self) -> &CvTerm {
        &self.database
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn qualifier(&self) -> Option<&CvTerm> {
        self.qualifier.as_ref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: Option<String>) {
        self.version = version;
    }

    pub fn is_identity(&self) -> bool {
        self.has_qualifier(vocabulary::IDENTITY)
    }

    pub fn is_secondary(&self) -> bool {
        self.has_qualifier(vocabulary::SECONDARY)
    }

    pub fn has_qualifier(&self, qualifier: Term) -> bool {
        self.qualifier.as_ref().is_some_and(|q| q.is(qualifier))
    }

    pub fn is_from(&self, database: Term) -> bool {
        self.database.is(database)
    }
}

impl Ranked for Xref {
    fn rank(&self) -> Rank {
        if self.is_identity() {
            Rank::Identity
        } else if self.is_secondary() {
            Rank::Secondary
        } else {
            Rank::Plain
        }
    }
}

impl fmt::Display for Xref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.database.short_name(), self.id)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, "({})", qualifier.short_name())?;
        }
        Ok(())
    }
}
