//! Small value types attached to entities: aliases, checksums, annotations,
//! confidences and parameters.

use super::cv_term::CvTerm;
use super::observed::Ranked;
use psimi_common::{PsiError, Result, Term};
use serde::Serialize;
use std::fmt;

/// An alternative name, optionally typed (gene name, synonym...).
#[derive(Debug, Clone, Serialize)]
pub struct Alias {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    alias_type: Option<CvTerm>,
    name: String,
}

impl Alias {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PsiError::missing("Alias", "name"));
        }
        Ok(Self {
            alias_type: None,
            name,
        })
    }

    pub fn typed(alias_type: CvTerm, name: impl Into<String>) -> Result<Self> {
        let mut alias = Self::new(name)?;
        alias.alias_type = Some(alias_type);
        Ok(alias)
    }

    pub fn alias_type(&self) -> Option<&CvTerm> {
        self.alias_type.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_of(&self, alias_type: Term) -> bool {
        self.alias_type.as_ref().is_some_and(|t| t.is(alias_type))
    }
}

impl Ranked for Alias {}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias_type {
            Some(t) => write!(f, "{} ({})", self.name, t.short_name()),
            None => f.write_str(&self.name),
        }
    }
}

/// A content-derived value computed with a named method (ROGID, CRC64...).
#[derive(Debug, Clone, Serialize)]
pub struct Checksum {
    method: CvTerm,
    value: String,
}

impl Checksum {
    pub fn new(method: CvTerm, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PsiError::missing("Checksum", "value"));
        }
        Ok(Self { method, value })
    }

    pub fn method(&self) -> &CvTerm {
        &self.method
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_method(&self, method: Term) -> bool {
        self.method.is(method)
    }
}

impl Ranked for Checksum {}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.method.short_name(), self.value)
    }
}

/// Free-text note filed under a topic.
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    topic: CvTerm,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl Annotation {
    pub fn new(topic: CvTerm, value: Option<String>) -> Self {
        Self { topic, value }
    }

    pub fn topic(&self) -> &CvTerm {
        &self.topic
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}: {}", self.topic.short_name(), v),
            None => f.write_str(self.topic.short_name()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Confidence {
    #[serde(rename = "type")]
    confidence_type: CvTerm,
    value: String,
}

impl Confidence {
    pub fn new(confidence_type: CvTerm, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PsiError::missing("Confidence", "value"));
        }
        Ok(Self {
            confidence_type,
            value,
        })
    }

    pub fn confidence_type(&self) -> &CvTerm {
        &self.confidence_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.confidence_type.short_name(), self.value)
    }
}

/// `factor x base^exponent`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParameterValue {
    pub factor: f64,
    pub base: i16,
    pub exponent: i16,
}

impl ParameterValue {
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            base: 10,
            exponent: 0,
        }
    }

    pub fn scientific(factor: f64, base: i16, exponent: i16) -> Self {
        Self {
            factor,
            base,
            exponent,
        }
    }

    pub fn value(&self) -> f64 {
        self.factor * f64::from(self.base).powi(i32::from(self.exponent))
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent == 0 {
            write!(f, "{}", self.factor)
        } else {
            write!(f, "{}x{}^{}", self.factor, self.base, self.exponent)
        }
    }
}

/// A measured quantity (kd, ic50...).
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    parameter_type: CvTerm,
    value: ParameterValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    uncertainty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<CvTerm>,
}

impl Parameter {
    pub fn new(parameter_type: CvTerm, value: ParameterValue) -> Self {
        Self {
            parameter_type,
            value,
            uncertainty: None,
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: CvTerm) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_uncertainty(mut self, uncertainty: f64) -> Self {
        self.uncertainty = Some(uncertainty);
        self
    }

    pub fn parameter_type(&self) -> &CvTerm {
        &self.parameter_type
    }

    pub fn value(&self) -> &ParameterValue {
        &self.value
    }

    pub fn uncertainty(&self) -> Option<f64> {
        self.uncertainty
    }

    pub fn unit(&self) -> Option<&CvTerm> {
        self.unit.as_ref()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.parameter_type.short_name(), self.value)?;
        if let Some(unit) = &self.unit {
            write!(f, " {}", unit.short_name())?;
        }
        Ok(())
    }
}
