//! Source organisms

use super::cv_term::CvTerm;
use serde::Serialize;
use std::fmt;

/// In vitro experiments.
pub const TAXID_IN_VITRO: i32 = -1;
/// Chemical synthesis.
pub const TAXID_CHEMICAL_SYNTHESIS: i32 = -2;
/// Organism not known yet; enrichment may fill it in.
pub const TAXID_UNKNOWN: i32 = -3;
/// In silico predictions.
pub const TAXID_IN_SILICO: i32 = -4;

#[derive(Debug, Clone, Serialize)]
pub struct Organism {
    tax_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scientific_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cell_type: Option<CvTerm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tissue: Option<CvTerm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    compartment: Option<CvTerm>,
}

impl Organism {
    pub fn new(tax_id: i32) -> Self {
        Self {
            tax_id,
            common_name: None,
            scientific_name: None,
            cell_type: None,
            tissue: None,
            compartment: None,
        }
    }

    pub fn unknown() -> Self {
        Self::new(TAXID_UNKNOWN)
    }

    pub fn named(tax_id: i32, common_name: impl Into<String>, scientific_name: impl Into<String>) -> Self {
        let mut organism = Self::new(tax_id);
        organism.common_name = Some(common_name.into());
        organism.scientific_name = Some(scientific_name.into());
        organism
    }

    pub fn tax_id(&self) -> i32 {
        self.tax_id
    }

    pub fn set_tax_id(&mut self, tax_id: i32) {
        self.tax_id = tax_id;
    }

    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref()
    }

    pub fn set_common_name(&mut self, name: Option<String>) {
        self.common_name = name;
    }

    pub fn scientific_name(&self) -> Option<&str> {
        self.scientific_name.as_deref()
    }

    pub fn set_scientific_name(&mut self, name: Option<String>) {
        self.scientific_name = name;
    }

    pub fn cell_type(&self) -> Option<&CvTerm> {
        self.cell_type.as_ref()
    }

    pub fn set_cell_type(&mut self, cell_type: Option<CvTerm>) {
        self.cell_type = cell_type;
    }

    pub fn tissue(&self) -> Option<&CvTerm> {
        self.tissue.as_ref()
    }

    pub fn set_tissue(&mut self, tissue: Option<CvTerm>) {
        self.tissue = tissue;
    }

    pub fn compartment(&self) -> Option<&CvTerm> {
        self.compartment.as_ref()
    }

    pub fn set_compartment(&mut self, compartment: Option<CvTerm>) {
        self.compartment = compartment;
    }

    /// Real organisms have positive NCBI taxids.
    pub fn is_taxonomic(&self) -> bool {
        self.tax_id > 0
    }
}

impl fmt::Display for Organism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.common_name.as_deref().or(self.scientific_name.as_deref()) {
            Some(name) => write!(f, "{} ({})", name, self.tax_id),
            None => write!(f, "taxid:{}", self.tax_id),
        }
    }
}
