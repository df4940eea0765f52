//! Experiments and the publications describing them

use super::attributes::{Annotation, Confidence};
use super::cv_term::CvTerm;
use super::organism::Organism;
use super::xref::Xref;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Publication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pubmed_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    journal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publication_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    identifiers: Vec<Xref>,
}

impl Publication {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pubmed(pubmed_id: impl Into<String>) -> Self {
        Self {
            pubmed_id: Some(pubmed_id.into()),
            ..Self::default()
        }
    }

    pub fn pubmed_id(&self) -> Option<&str> {
        self.pubmed_id.as_deref()
    }

    pub fn set_pubmed_id(&mut self, pubmed_id: Option<String>) {
        self.pubmed_id = pubmed_id;
    }

    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref()
    }

    pub fn set_doi(&mut self, doi: Option<String>) {
        self.doi = doi;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn journal(&self) -> Option<&str> {
        self.journal.as_deref()
    }

    pub fn set_journal(&mut self, journal: Option<String>) {
        self.journal = journal;
    }

    pub fn publication_date(&self) -> Option<NaiveDate> {
        self.publication_date
    }

    pub fn set_publication_date(&mut self, date: Option<NaiveDate>) {
        self.publication_date = date;
    }

    pub fn identifiers(&self) -> &[Xref] {
        &self.identifiers
    }

    pub fn identifiers_mut(&mut self) -> &mut Vec<Xref> {
        &mut self.identifiers
    }
}

impl fmt::Display for Publication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.pubmed_id, &self.doi, &self.title) {
            (Some(pubmed), _, _) => write!(f, "pubmed:{}", pubmed),
            (None, Some(doi), _) => write!(f, "doi:{}", doi),
            (None, None, Some(title)) => f.write_str(title),
            (None, None, None) => f.write_str("unpublished"),
        }
    }
}

/// The experimental setup an interaction was observed or predicted with.
#[derive(Debug, Clone)]
pub struct Experiment {
    publication: Option<Publication>,
    interaction_detection_method: CvTerm,
    host_organism: Option<Organism>,
    xrefs: Vec<Xref>,
    annotations: Vec<Annotation>,
    confidences: Vec<Confidence>,
}

impl Experiment {
    pub fn new(interaction_detection_method: CvTerm) -> Self {
        Self {
            publication: None,
            interaction_detection_method,
            host_organism: None,
            xrefs: Vec::new(),
            annotations: Vec::new(),
            confidences: Vec::new(),
        }
    }

    pub fn publication(&self) -> Option<&Publication> {
        self.publication.as_ref()
    }

    pub fn set_publication(&mut self, publication: Option<Publication>) {
        self.publication = publication;
    }

    pub fn interaction_detection_method(&self) -> &CvTerm {
        &self.interaction_detection_method
    }

    pub fn set_interaction_detection_method(&mut self, method: CvTerm) {
        self.interaction_detection_method = method;
    }

    pub fn host_organism(&self) -> Option<&Organism> {
        self.host_organism.as_ref()
    }

    pub fn set_host_organism(&mut self, organism: Option<Organism>) {
        self.host_organism = organism;
    }

    pub fn xrefs(&self) -> &[Xref] {
        &self.xrefs
    }

    pub fn xrefs_mut(&mut self) -> &mut Vec<Xref> {
        &mut self.xrefs
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        &mut self.annotations
    }

    pub fn confidences(&self) -> &[Confidence] {
        &self.confidences
    }

    pub fn confidences_mut(&mut self) -> &mut Vec<Confidence> {
        &mut self.confidences
    }
}
