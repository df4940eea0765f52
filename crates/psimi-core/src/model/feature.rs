//! Participant features: binding sites, mutations, tags...

use super::attributes::Annotation;
use super::cv_term::CvTerm;
use super::handle::{FeatureHandle, ParticipantHandle};
use super::observed::ObservedList;
use super::range::Range;
use super::xref::Xref;
use psimi_common::{vocabulary, Result};

fn is_interpro(xref: &Xref) -> bool {
    xref.is_from(vocabulary::INTERPRO)
}

/// A feature of a participant, located by its ranges.
#[derive(Debug, Clone)]
pub struct Feature {
    handle: FeatureHandle,
    short_name: Option<String>,
    full_name: Option<String>,
    feature_type: Option<CvTerm>,
    interaction_effect: Option<CvTerm>,
    interaction_dependency: Option<CvTerm>,
    identifiers: ObservedList<Xref>,
    xrefs: Vec<Xref>,
    annotations: Vec<Annotation>,
    ranges: Vec<Range>,
    participant: Option<ParticipantHandle>,
}

/// Features of modelled participants carry no evidence of their own.
pub type ModelledFeature = Feature;

impl Feature {
    const INTERPRO: usize = 0;

    pub fn new() -> Self {
        Self {
            handle: FeatureHandle::new(),
            short_name: None,
            full_name: None,
            feature_type: None,
            interaction_effect: None,
            interaction_dependency: None,
            identifiers: ObservedList::with_views(&[is_interpro]),
            xrefs: Vec::new(),
            annotations: Vec::new(),
            ranges: Vec::new(),
            participant: None,
        }
    }

    pub fn with_type(feature_type: CvTerm) -> Self {
        let mut feature = Self::new();
        feature.feature_type = Some(feature_type);
        feature
    }

    pub fn handle(&self) -> FeatureHandle {
        self.handle
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn set_short_name(&mut self, short_name: Option<String>) {
        self.short_name = short_name;
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn set_full_name(&mut self, full_name: Option<String>) {
        self.full_name = full_name;
    }

    pub fn feature_type(&self) -> Option<&CvTerm> {
        self.feature_type.as_ref()
    }

    pub fn set_feature_type(&mut self, feature_type: Option<CvTerm>) {
        self.feature_type = feature_type;
    }

    pub fn interaction_effect(&self) -> Option<&CvTerm> {
        self.interaction_effect.as_ref()
    }

    pub fn set_interaction_effect(&mut self, effect: Option<CvTerm>) {
        self.interaction_effect = effect;
    }

    pub fn interaction_dependency(&self) -> Option<&CvTerm> {
        self.interaction_dependency.as_ref()
    }

    pub fn set_interaction_dependency(&mut self, dependency: Option<CvTerm>) {
        self.interaction_dependency = dependency;
    }

    pub fn identifiers(&self) -> &ObservedList<Xref> {
        &self.identifiers
    }

    pub fn identifiers_mut(&mut self) -> &mut ObservedList<Xref> {
        &mut self.identifiers
    }

    /// The InterPro accession, cached from the identifiers.
    pub fn interpro(&self) -> Option<&str> {
        self.identifiers.cached(Self::INTERPRO).map(Xref::id)
    }

    pub fn set_interpro(&mut self, interpro: Option<&str>) -> Result<()> {
        match interpro {
            Some(id) => {
                let xref = Xref::identity(vocabulary::INTERPRO, id)?;
                self.identifiers.replace_cached(Self::INTERPRO, xref);
            }
            None => {
                self.identifiers.remove_candidates(Self::INTERPRO);
            }
        }
        Ok(())
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

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn ranges_mut(&mut self) -> &mut Vec<Range> {
        &mut self.ranges
    }

    pub fn add_range(&mut self, range: Range) {
        self.ranges.push(range);
    }

    /// The participant owning this feature, if attached.
    pub fn participant(&self) -> Option<ParticipantHandle> {
        self.participant
    }

    pub(crate) fn set_participant(&mut self, participant: Option<ParticipantHandle>) {
        self.participant = participant;
    }
}

impl Default for Feature {
    fn default() -> Self {
        Self::new()
    }
}

/// An experimentally observed feature.
#[derive(Debug, Clone, Default)]
pub struct FeatureEvidence {
    feature: Feature,
    detection_methods: Vec<CvTerm>,
    binding_sites: Vec<FeatureHandle>,
}

impl FeatureEvidence {
    pub fn new(feature: Feature) -> Self {
        Self {
            feature,
            detection_methods: Vec::new(),
            binding_sites: Vec::new(),
        }
    }

    pub fn detection_methods(&self) -> &[CvTerm] {
        &self.detection_methods
    }

    pub fn detection_methods_mut(&mut self) -> &mut Vec<CvTerm> {
        &mut self.detection_methods
    }

    /// Features this one was seen binding to.
    pub fn binding_sites(&self) -> &[FeatureHandle] {
        &self.binding_sites
    }

    pub fn add_binding_site_evidence(&mut self, site: FeatureHandle) -> bool {
        if self.binding_sites.contains(&site) {
            return false;
        }
        self.binding_sites.push(site);
        true
    }

    pub fn remove_binding_site_evidence(&mut self, site: FeatureHandle) -> bool {
        let before = self.binding_sites.len();
        self.binding_sites.retain(|h| *h != site);
        self.binding_sites.len() != before
    }
}

/// Access to the plain feature inside any feature kind.
pub trait FeatureLike {
    fn feature(&self) -> &Feature;
    fn feature_mut(&mut self) -> &mut Feature;
}

impl FeatureLike for Feature {
    fn feature(&self) -> &Feature {
        self
    }

    fn feature_mut(&mut self) -> &mut Feature {
        self
    }
}

impl FeatureLike for FeatureEvidence {
    fn feature(&self) -> &Feature {
        &self.feature
    }

    fn feature_mut(&mut self) -> &mut Feature {
        &mut self.feature
    }
}
