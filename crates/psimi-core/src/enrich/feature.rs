//! Feature enrichment and range remapping

use super::merge::{merge_annotations, merge_terms, merge_xrefs};
use super::{Enricher, FieldReport, Outcome};
use crate::config::{EnrichmentConfig, UpdateStrategy};
use crate::error::Result;
use crate::model::{Annotation, CvTerm, Feature, FeatureEvidence, FeatureLike, Range};
use psimi_common::vocabulary;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEnricher {
    config: EnrichmentConfig,
}

impl FeatureEnricher {
    pub fn new(config: EnrichmentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    fn merge_type(&self, target: &mut Feature, source: &Feature, outcome: &mut Outcome) {
        let Some(fetched) = source.feature_type() else {
            return;
        };
        let current = target.feature_type().map(|t| t.short_name().to_string());

        match current {
            None if self.config.strategy == UpdateStrategy::Mismatch => {
                outcome.report(FieldReport::mismatch("Feature type", None, Some(fetched.short_name())));
            }
            None => {
                target.set_feature_type(Some(fetched.clone()));
                outcome.report(FieldReport::addition("Feature type", fetched.short_name()));
            }
            Some(current) if !current.eq_ignore_ascii_case(fetched.short_name()) => {
                if self.config.strategy == UpdateStrategy::Mismatch {
                    outcome.report(FieldReport::mismatch(
                        "Feature type",
                        Some(&current),
                        Some(fetched.short_name()),
                    ));
                } else {
                    target.set_feature_type(Some(fetched.clone()));
                    outcome.report(FieldReport::overwrite(
                        "Feature type",
                        Some(&current),
                        Some(fetched.short_name()),
                    ));
                }
            }
            Some(_) => {}
        }
    }

    /// Check the ranges of `feature` against the sequence they were written
    /// for, then move them onto `new_sequence`.
    ///
    /// Ranges that do not fit `old_sequence` gain a caution annotation and
    /// stay where they are. When the sequence changed, determined ranges
    /// after the edited region shift by the length difference; ranges
    /// overlapping it are left in place.
    pub fn remap_ranges(
        &self,
        feature: &mut Feature,
        old_sequence: Option<&str>,
        new_sequence: Option<&str>,
        outcome: &mut Outcome,
    ) {
        let Some(old_sequence) = old_sequence else {
            return;
        };
        let edit = new_sequence
            .filter(|new| *new != old_sequence)
            .map(|new| SequenceEdit::between(old_sequence, new));

        let mut cautions = Vec::new();
        for range in feature.ranges_mut().iter_mut() {
            if !range.is_determined() {
                continue;
            }
            if !range.fits(old_sequence.len()) {
                cautions.push(format!("Invalid range: {range}"));
                continue;
            }
            let Some(edit) = &edit else {
                continue;
            };

            match edit.remap(range) {
                Remap::Unchanged => {}
                Remap::Shifted(shifted) => {
                    debug!(old = %range, new = %shifted, "Shifting range onto new sequence");
                    outcome.report(FieldReport::overwrite(
                        "Range",
                        Some(&range.to_string()),
                        Some(&shifted.to_string()),
                    ));
                    *range = shifted;
                }
                Remap::Overlapping => {
                    warn!(range = %range, "Range covers a changed part of the sequence");
                    if !range.fits(edit.new_len) {
                        cautions.push(format!("Invalid range: {range}"));
                    }
                }
            }
        }

        for text in cautions {
            let present = feature
                .annotations()
                .iter()
                .any(|a| a.topic().is(vocabulary::CAUTION) && a.value() == Some(text.as_str()));
            if present {
                continue;
            }
            let annotation = Annotation::new(CvTerm::from(vocabulary::CAUTION), Some(text.clone()));
            feature.annotations_mut().push(annotation.clone());
            outcome.annotations.added.push(annotation);
            outcome.report(FieldReport::addition("Caution", text));
        }
    }

    fn merge_feature(&self, target: &mut Feature, source: &Feature, outcome: &mut Outcome) {
        self.merge_type(target, source, outcome);
        if self.config.strategy == UpdateStrategy::Mismatch {
            return;
        }

        let remove = self.config.remove_unmatched;
        outcome.identifiers = merge_xrefs(target.identifiers_mut(), source.identifiers().as_slice(), remove);
        outcome.xrefs = merge_xrefs(target.xrefs_mut(), source.xrefs(), remove);
        outcome.annotations = merge_annotations(target.annotations_mut(), source.annotations(), remove);
    }
}

impl Enricher<Feature> for FeatureEnricher {
    fn merge(&self, target: &mut Feature, source: &Feature, outcome: &mut Outcome) -> Result<()> {
        self.merge_feature(target, source, outcome);
        Ok(())
    }
}

impl Enricher<FeatureEvidence> for FeatureEnricher {
    fn merge(&self, target: &mut FeatureEvidence, source: &FeatureEvidence, outcome: &mut Outcome) -> Result<()> {
        self.merge_feature(target.feature_mut(), source.feature(), outcome);
        if self.config.strategy == UpdateStrategy::Mismatch {
            return Ok(());
        }

        let methods = merge_terms(
            target.detection_methods_mut(),
            source.detection_methods(),
            self.config.remove_unmatched,
        );
        for method in &methods.removed {
            outcome.report(FieldReport::overwrite(
                "Feature detection method",
                Some(method.short_name()),
                None,
            ));
        }
        for method in &methods.added {
            outcome.report(FieldReport::addition("Feature detection method", method.short_name()));
        }
        Ok(())
    }
}

/// Where two sequences differ, from their shared prefix and suffix.
#[derive(Debug, Clone, Copy)]
struct SequenceEdit {
    prefix: usize,
    suffix: usize,
    old_len: usize,
    new_len: usize,
}

enum Remap {
    Unchanged,
    Shifted(Range),
    Overlapping,
}

impl SequenceEdit {
    fn between(old: &str, new: &str) -> Self {
        let (old_bytes, new_bytes) = (old.as_bytes(), new.as_bytes());
        let prefix = old_bytes
            .iter()
            .zip(new_bytes)
            .take_while(|(a, b)| a.eq_ignore_ascii_case(b))
            .count();
        let room = old_bytes.len().min(new_bytes.len()) - prefix;
        let suffix = old_bytes
            .iter()
            .rev()
            .zip(new_bytes.iter().rev())
            .take(room)
            .take_while(|(a, b)| a.eq_ignore_ascii_case(b))
            .count();

        Self {
            prefix,
            suffix,
            old_len: old_bytes.len(),
            new_len: new_bytes.len(),
        }
    }

    fn offset(&self) -> i64 {
        let new_len = i64::try_from(self.new_len).unwrap_or(i64::MAX);
        let old_len = i64::try_from(self.old_len).unwrap_or(i64::MAX);
        new_len - old_len
    }

    fn remap(&self, range: &Range) -> Remap {
        let first = range.start().start();
        let last = range.end().end();
        let prefix = i64::try_from(self.prefix).unwrap_or(i64::MAX);
        let tail_start = i64::try_from(self.old_len - self.suffix).unwrap_or(i64::MAX);

        if last <= prefix {
            Remap::Unchanged
        } else if first > tail_start {
            match self.offset() {
                0 => Remap::Unchanged,
                offset => Remap::Shifted(range.shifted(offset)),
            }
        } else {
            Remap::Overlapping
        }
    }
}
