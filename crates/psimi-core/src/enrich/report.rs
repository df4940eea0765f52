//! Field-level enrichment reports

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to one scalar field during an enrichment pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldReport {
    /// The target had no value and adopted the source's
    Addition { field: String, value: String },
    /// The target's value was replaced
    Overwrite {
        field: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<String>,
    },
    /// Target and source disagree; nothing was changed
    Mismatch {
        field: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },
}

impl FieldReport {
    pub fn addition(field: &str, value: impl Into<String>) -> Self {
        FieldReport::Addition {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn overwrite(field: &str, old: Option<&str>, new: Option<&str>) -> Self {
        FieldReport::Overwrite {
            field: field.to_string(),
            old: old.map(str::to_string),
            new: new.map(str::to_string),
        }
    }

    pub fn mismatch(field: &str, target: Option<&str>, source: Option<&str>) -> Self {
        FieldReport::Mismatch {
            field: field.to_string(),
            target: target.map(str::to_string),
            source: source.map(str::to_string),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            FieldReport::Addition { field, .. }
            | FieldReport::Overwrite { field, .. }
            | FieldReport::Mismatch { field, .. } => field,
        }
    }

    pub fn is_addition(&self) -> bool {
        matches!(self, FieldReport::Addition { .. })
    }
}

impl fmt::Display for FieldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        match self {
            FieldReport::Addition { field, value } => write!(f, "added {field}: {value}"),
            FieldReport::Overwrite { field, old, new } => {
                write!(f, "overwrote {field}: {} -> {}", show(old), show(new))
            }
            FieldReport::Mismatch { field, target, source } => {
                write!(f, "mismatch on {field}: {} vs {}", show(target), show(source))
            }
        }
    }
}

/// Outcome of enriching one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentStatus {
    Success,
    Failed,
}
