//! Interaction type assembled from typed cross-references.
//!
//! Tabular sources list an interaction type as one or more `db:id(text)`
//! references. [`InteractionTypeRefs`] keeps those references and folds them
//! into a single [`CvTerm`]: the first reference creates the term, later ones
//! are attached to it, and the display name follows whichever reference
//! supplied it.

use super::cv_term::CvTerm;
use super::xref::Xref;
use psimi_common::{vocabulary, PsiError, Result};
use serde::Serialize;

const UNKNOWN: &str = "unknown";

/// A `database:id(text)` reference naming an interaction type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeReference {
    database: String,
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl TypeReference {
    pub fn new(database: impl Into<String>, id: impl Into<String>, text: Option<String>) -> Result<Self> {
        let database = database.into();
        let id = id.into();
        if database.trim().is_empty() {
            return Err(PsiError::missing("TypeReference", "database"));
        }
        if id.trim().is_empty() {
            return Err(PsiError::missing("TypeReference", "id"));
        }
        Ok(Self { database, id, text })
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn is_psi_mi(&self) -> bool {
        vocabulary::PSI_MI.matches(None, &self.database)
    }

    fn to_xref(&self) -> Result<Xref> {
        Xref::new(CvTerm::new(self.database.clone())?, self.id.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionTypeRefs {
    refs: Vec<TypeReference>,
    term: Option<CvTerm>,
}

impl InteractionTypeRefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// The folded interaction type; `None` while no reference is held.
    pub fn term(&self) -> Option<&CvTerm> {
        self.term.as_ref()
    }

    pub fn references(&self) -> &[TypeReference] {
        &self.refs
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn add(&mut self, reference: TypeReference) -> Result<()> {
        match &mut self.term {
            None => {
                let name = reference.text().unwrap_or(UNKNOWN).to_string();
                let mut term = CvTerm::new(name.clone())?;
                term.set_full_name(Some(name));
                if reference.is_psi_mi() {
                    term.set_mi_identifier(Some(reference.id.clone()))?;
                } else {
                    term.add_identifier(reference.to_xref()?);
                }
                self.term = Some(term);
                self.refs.push(reference);
            }
            Some(term) => {
                term.add_identifier(reference.to_xref()?);
                let names_term = term.mi_identifier() == Some(reference.id());
                let text = reference.text.clone();
                self.refs.push(reference);
                if names_term {
                    match text {
                        Some(name) => self.rename(&name)?,
                        None => self.rename_after_change()?,
                    }
                }
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Option<TypeReference>> {
        if index >= self.refs.len() {
            return Ok(None);
        }
        let removed = self.refs.remove(index);

        if self.refs.is_empty() {
            self.term = None;
            return Ok(Some(removed));
        }

        let supplied_name = match (&self.term, removed.text()) {
            (Some(term), Some(text)) => term.short_name() == text,
            _ => false,
        };
        let supplied_mi = self.detach(&removed)?;
        if supplied_name || supplied_mi {
            self.rename_after_change()?;
        }
        Ok(Some(removed))
    }

    /// Drop the term's identifier for a removed reference. Returns whether
    /// the reference carried the term's MI identifier instead.
    fn detach(&mut self, removed: &TypeReference) -> Result<bool> {
        let Some(term) = &mut self.term else {
            return Ok(false);
        };
        if term.remove_identifier(&removed.to_xref()?).is_some() {
            return Ok(false);
        }
        if !removed.is_psi_mi() || term.mi_identifier() != Some(removed.id()) {
            return Ok(false);
        }

        // Another PSI-MI reference takes over the MI identifier.
        match self.refs.iter().find(|r| r.is_psi_mi()) {
            Some(next) => {
                term.remove_identifier(&next.to_xref()?);
                term.set_mi_identifier(Some(next.id.clone()))?;
            }
            None => term.set_mi_identifier(None)?,
        }
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.refs.clear();
        self.term = None;
    }

    /// Replace the interaction type, regenerating the references from it.
    pub fn set_type(&mut self, term: Option<CvTerm>) -> Result<()> {
        self.refs.clear();
        let Some(term) = term else {
            self.term = None;
            return Ok(());
        };

        let text = Some(term.full_name().unwrap_or(term.short_name()).to_string());
        let reference = match (term.mi_identifier(), term.identifiers().first()) {
            (Some(mi), _) => TypeReference::new(vocabulary::PSI_MI.name, mi, text)?,
            (None, Some(xref)) => {
                TypeReference::new(xref.database().short_name(), xref.id(), text)?
            }
            (None, None) => TypeReference::new(UNKNOWN, "-", text)?,
        };
        self.refs.push(reference);
        self.term = Some(term);
        Ok(())
    }

    /// Name from the first PSI-MI reference, then the first reference with text.
    fn rename_after_change(&mut self) -> Result<()> {
        let has_mi = self
            .term
            .as_ref()
            .is_some_and(|t| t.mi_identifier().is_some());

        let from_mi = if has_mi {
            self.refs
                .iter()
                .find(|r| r.is_psi_mi())
                .and_then(|r| r.text.clone())
        } else {
            None
        };
        let name = from_mi
            .or_else(|| self.refs.iter().find_map(|r| r.text.clone()))
            .unwrap_or_else(|| UNKNOWN.to_string());
        self.rename(&name)
    }

    fn rename(&mut self, name: &str) -> Result<()> {
        if let Some(term) = &mut self.term {
            term.set_short_name(name)?;
            term.set_full_name(Some(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mi(id: &str, text: Option<&str>) -> TypeReference {
        TypeReference::new("psi-mi", id, text.map(String::from)).unwrap()
    }

    #[test]
    fn test_first_reference_creates_term() {
        let mut types = InteractionTypeRefs::new();
        assert!(types.term().is_none());

        types.add(mi("MI:0915", Some("physical association"))).unwrap();
        let term = types.term().unwrap();
        assert_eq!(term.short_name(), "physical association");
        assert_eq!(term.mi_identifier(), Some("MI:0915"));
    }

    #[test]
    fn test_reference_without_text_is_unknown() {
        let mut types = InteractionTypeRefs::new();
        types
            .add(TypeReference::new("intact", "EBI-1", None).unwrap())
            .unwrap();
        assert_eq!(types.term().unwrap().short_name(), "unknown");
        assert_eq!(types.term().unwrap().identifiers().len(), 1);
    }

    #[test]
    fn test_removing_name_source_renames_from_remaining() {
        let mut types = InteractionTypeRefs::new();
        types.add(mi("MI:0915", Some("physical association"))).unwrap();
        types
            .add(TypeReference::new("intact", "EBI-2", Some("association".into())).unwrap())
            .unwrap();

        types.remove(0).unwrap();
        assert_eq!(types.term().unwrap().short_name(), "association");

        types.remove(0).unwrap();
        assert!(types.term().is_none());
    }

    #[test]
    fn test_removing_psi_mi_reference_clears_mi_identifier() {
        let mut types = InteractionTypeRefs::new();
        types.add(mi("MI:0915", Some("physical association"))).unwrap();
        types
            .add(TypeReference::new("intact", "EBI-2", Some("association".into())).unwrap())
            .unwrap();

        types.remove(0).unwrap();
        let term = types.term().unwrap();
        assert_eq!(term.short_name(), "association");
        assert_eq!(term.mi_identifier(), None);
        assert_eq!(term.identifiers().len(), 1);
        assert_eq!(term.identifiers()[0].id(), "EBI-2");
    }

    #[test]
    fn test_removed_reference_leaves_term_identifiers() {
        let mut types = InteractionTypeRefs::new();
        types.add(mi("MI:0915", Some("physical association"))).unwrap();
        types
            .add(TypeReference::new("intact", "EBI-2", Some("association".into())).unwrap())
            .unwrap();

        types.remove(1).unwrap();
        let term = types.term().unwrap();
        assert_eq!(term.short_name(), "physical association");
        assert_eq!(term.mi_identifier(), Some("MI:0915"));
        assert!(term.identifiers().is_empty());
    }

    #[test]
    fn test_remaining_psi_mi_reference_takes_over_mi_identifier() {
        let mut types = InteractionTypeRefs::new();
        types.add(mi("MI:0915", Some("physical association"))).unwrap();
        types.add(mi("MI:0407", Some("direct interaction"))).unwrap();
        assert_eq!(types.term().unwrap().identifiers().len(), 1);

        types.remove(0).unwrap();
        let term = types.term().unwrap();
        assert_eq!(term.mi_identifier(), Some("MI:0407"));
        assert_eq!(term.short_name(), "direct interaction");
        assert!(term.identifiers().is_empty());
    }

    #[test]
    fn test_psi_mi_reference_naming_the_term_renames_it() {
        let mut types = InteractionTypeRefs::new();
        types.add(mi("MI:0915", None)).unwrap();
        assert_eq!(types.term().unwrap().short_name(), "unknown");

        types.add(mi("MI:0915", Some("physical association"))).unwrap();
        assert_eq!(types.term().unwrap().short_name(), "physical association");
    }

    #[test]
    fn test_set_type_regenerates_references() {
        let mut types = InteractionTypeRefs::new();
        types.add(mi("MI:0915", Some("physical association"))).unwrap();

        types
            .set_type(Some(CvTerm::with_mi("direct interaction", "MI:0407").unwrap()))
            .unwrap();
        assert_eq!(types.references().len(), 1);
        assert_eq!(types.references()[0].id(), "MI:0407");
        assert_eq!(types.references()[0].text(), Some("direct interaction"));

        types.set_type(None).unwrap();
        assert!(types.is_empty());
        assert!(types.term().is_none());
    }
}
