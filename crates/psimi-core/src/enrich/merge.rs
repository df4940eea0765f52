//! Collection merges
//!
//! A merge folds a freshly fetched source collection into the curator-owned
//! target collection:
//!
//! 1. in remove mode, target elements matching nothing in the source are
//!    dropped;
//! 2. source elements matching nothing in the target are appended.
//!
//! Collections behave as sets under the matching comparator, so merging the
//! same source twice changes nothing the second time.

use crate::compare::terms::{
    DEFAULT_ALIAS, DEFAULT_ANNOTATION, DEFAULT_CHECKSUM, DEFAULT_CONFIDENCE, DEFAULT_CV_TERM,
    DEFAULT_IDENTIFIER, DEFAULT_PARAMETER, DEFAULT_XREF,
};
use crate::compare::Comparator;
use crate::model::{
    Alias, Annotation, Checksum, Confidence, CvTerm, ObservedList, Parameter, Ranked, Xref,
};

/// Elements a merge added to and removed from the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Changes<T> {
    pub added: Vec<T>,
    pub removed: Vec<T>,
}

impl<T> Changes<T> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl<T> Default for Changes<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

/// A collection a merge can write into.
pub trait MergeTarget<T> {
    fn items(&self) -> &[T];
    fn add(&mut self, item: T);
    /// Remove the elements `drop` accepts, returning them in collection order.
    fn remove_where(&mut self, drop: &dyn Fn(&T) -> bool) -> Vec<T>;
}

impl<T> MergeTarget<T> for Vec<T> {
    fn items(&self) -> &[T] {
        self
    }

    fn add(&mut self, item: T) {
        self.push(item);
    }

    fn remove_where(&mut self, drop: &dyn Fn(&T) -> bool) -> Vec<T> {
        let (removed, kept): (Vec<T>, Vec<T>) = std::mem::take(self).into_iter().partition(|item| drop(item));
        *self = kept;
        removed
    }
}

impl<T: Ranked> MergeTarget<T> for ObservedList<T> {
    fn items(&self) -> &[T] {
        self.as_slice()
    }

    fn add(&mut self, item: T) {
        self.push(item);
    }

    fn remove_where(&mut self, drop: &dyn Fn(&T) -> bool) -> Vec<T> {
        self.retain(|item| !drop(item))
    }
}

/// Merge `source` into `target`.
///
/// `remove_eq` decides which target elements survive remove mode, `add_eq`
/// decides which source elements are already present.
pub fn merge_collection<T, C>(
    target: &mut C,
    source: &[T],
    remove_unmatched: bool,
    remove_eq: impl Fn(&T, &T) -> bool,
    add_eq: impl Fn(&T, &T) -> bool,
) -> Changes<T>
where
    T: Clone,
    C: MergeTarget<T> + ?Sized,
{
    let mut changes = Changes::default();

    if remove_unmatched {
        changes.removed = target.remove_where(&|item: &T| !source.iter().any(|s| remove_eq(item, s)));
    }

    for item in source {
        if !target.items().iter().any(|t| add_eq(t, item)) {
            target.add(item.clone());
            changes.added.push(item.clone());
        }
    }

    changes
}

/// Merge with the same comparator for both passes.
pub fn merge_with<T, C, K>(target: &mut C, source: &[T], remove_unmatched: bool, comparator: &K) -> Changes<T>
where
    T: Clone,
    C: MergeTarget<T> + ?Sized,
    K: Comparator<T>,
{
    merge_collection(
        target,
        source,
        remove_unmatched,
        |a, b| comparator.are_equal(a, b),
        |a, b| comparator.are_equal(a, b),
    )
}

/// Cross-references: remove mode matches full xrefs, qualifier included.
/// Add-only mode matches database and id alone so that the same accession
/// with another qualifier is not duplicated.
pub fn merge_xrefs<C>(target: &mut C, source: &[Xref], remove_unmatched: bool) -> Changes<Xref>
where
    C: MergeTarget<Xref> + ?Sized,
{
    merge_collection(
        target,
        source,
        remove_unmatched,
        |a, b| DEFAULT_XREF.are_equal(a, b),
        |a, b| {
            if remove_unmatched {
                DEFAULT_XREF.are_equal(a, b)
            } else {
                DEFAULT_IDENTIFIER.are_equal(a, b)
            }
        },
    )
}

pub fn merge_aliases<C>(target: &mut C, source: &[Alias], remove_unmatched: bool) -> Changes<Alias>
where
    C: MergeTarget<Alias> + ?Sized,
{
    merge_with(target, source, remove_unmatched, &DEFAULT_ALIAS)
}

pub fn merge_checksums<C>(target: &mut C, source: &[Checksum], remove_unmatched: bool) -> Changes<Checksum>
where
    C: MergeTarget<Checksum> + ?Sized,
{
    merge_with(target, source, remove_unmatched, &DEFAULT_CHECKSUM)
}

pub fn merge_annotations<C>(target: &mut C, source: &[Annotation], remove_unmatched: bool) -> Changes<Annotation>
where
    C: MergeTarget<Annotation> + ?Sized,
{
    merge_with(target, source, remove_unmatched, &DEFAULT_ANNOTATION)
}

pub fn merge_confidences<C>(target: &mut C, source: &[Confidence], remove_unmatched: bool) -> Changes<Confidence>
where
    C: MergeTarget<Confidence> + ?Sized,
{
    merge_with(target, source, remove_unmatched, &DEFAULT_CONFIDENCE)
}

pub fn merge_parameters<C>(target: &mut C, source: &[Parameter], remove_unmatched: bool) -> Changes<Parameter>
where
    C: MergeTarget<Parameter> + ?Sized,
{
    merge_with(target, source, remove_unmatched, &DEFAULT_PARAMETER)
}

pub fn merge_terms<C>(target: &mut C, source: &[CvTerm], remove_unmatched: bool) -> Changes<CvTerm>
where
    C: MergeTarget<CvTerm> + ?Sized,
{
    merge_with(target, source, remove_unmatched, &DEFAULT_CV_TERM)
}
