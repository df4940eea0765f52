//! Ordered collections that keep cached single-valued views in sync.
//!
//! An [`ObservedList`] owns its elements together with any number of cached
//! views, each answering "which element currently represents X" (the primary
//! UniProtKB accession of a protein, its ROGID, its gene name...). Every
//! mutation goes through the list, which updates the views inline, so a view
//! never points at an element that is no longer present.
//!
//! Selection rules for a view:
//! - only elements accepted by the view's selector are candidates
//! - an `identity` candidate beats a plain one, and a plain one beats a
//!   `secondary` one
//! - among equally ranked candidates the first one in collection order wins
//! - clearing the list empties every view

use std::fmt;

/// How strongly an element claims to represent its database or method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Secondary,
    Plain,
    Identity,
}

/// Elements that can back a cached view.
pub trait Ranked {
    fn rank(&self) -> Rank {
        Rank::Plain
    }
}

/// Predicate deciding whether an element is a candidate for a view.
pub type Selector<T> = fn(&T) -> bool;

struct CachedView<T> {
    selector: Selector<T>,
    current: Option<usize>,
}

impl<T> Clone for CachedView<T> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector,
            current: self.current,
        }
    }
}

impl<T> fmt::Debug for CachedView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedView").field("current", &self.current).finish()
    }
}

/// A list plus cached views over it.
pub struct ObservedList<T> {
    items: Vec<T>,
    views: Vec<CachedView<T>>,
}

impl<T: Clone> Clone for ObservedList<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            views: self.views.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservedList")
            .field("items", &self.items)
            .field("views", &self.views)
            .finish()
    }
}

impl<T: Ranked> ObservedList<T> {
    /// A list with one view per selector; view `i` is addressed by index `i`.
    pub fn with_views(selectors: &[Selector<T>]) -> Self {
        Self {
            items: Vec::new(),
            views: selectors
                .iter()
                .map(|&selector| CachedView {
                    selector,
                    current: None,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// The element currently backing `view`.
    pub fn cached(&self, view: usize) -> Option<&T> {
        self.views
            .get(view)
            .and_then(|v| v.current)
            .and_then(|index| self.items.get(index))
    }

    /// Append an element and let every view consider it.
    pub fn push(&mut self, item: T) {
        let index = self.items.len();
        for view in &mut self.views {
            if !(view.selector)(&item) {
                continue;
            }
            let replace = match view.current {
                None => true,
                Some(current) => item.rank() > self.items[current].rank(),
            };
            if replace {
                view.current = Some(index);
            }
        }
        self.items.push(item);
    }

    /// Remove the element at `index`, rescanning every view that pointed at it.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);

        for i in 0..self.views.len() {
            match self.views[i].current {
                Some(current) if current == index => {
                    let selector = self.views[i].selector;
                    self.views[i].current = best_candidate(&self.items, selector);
                }
                Some(current) if current > index => {
                    self.views[i].current = Some(current - 1);
                }
                _ => {}
            }
        }

        Some(removed)
    }

    /// Remove the first element equal to `item`.
    pub fn remove(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.items.iter().position(|candidate| candidate == item)?;
        self.remove_at(index)
    }

    /// Keep only the elements for which `keep` returns true; returns the rest.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> Vec<T> {
        let mut removed = Vec::new();
        let mut index = self.items.len();
        while index > 0 {
            index -= 1;
            if !keep(&self.items[index]) {
                if let Some(item) = self.remove_at(index) {
                    removed.push(item);
                }
            }
        }
        removed.reverse();
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        for view in &mut self.views {
            view.current = None;
        }
    }

    /// Make `item` the element backing `view`, dropping the previous one.
    ///
    /// This is the explicit setter path: the new element wins regardless of
    /// rank. An unknown view index only appends the item.
    pub fn replace_cached(&mut self, view: usize, item: T) {
        if let Some(current) = self.views.get(view).and_then(|v| v.current) {
            self.remove_at(current);
        }
        self.push(item);
        let index = self.items.len() - 1;
        if let Some(v) = self.views.get_mut(view) {
            v.current = Some(index);
        }
    }

    /// Remove every element `view` would accept.
    pub fn remove_candidates(&mut self, view: usize) -> Vec<T> {
        match self.views.get(view) {
            Some(v) => {
                let selector = v.selector;
                self.retain(|item| !selector(item))
            }
            None => Vec::new(),
        }
    }
}

fn best_candidate<T: Ranked>(items: &[T], selector: Selector<T>) -> Option<usize> {
    let mut best: Option<(usize, Rank)> = None;
    for (index, item) in items.iter().enumerate() {
        if !selector(item) {
            continue;
        }
        let rank = item.rank();
        match best {
            Some((_, best_rank)) if best_rank >= rank => {}
            _ => best = Some((index, rank)),
        }
    }
    best.map(|(index, _)| index)
}

impl<T: Ranked> Extend<T> for ObservedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a ObservedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tagged {
        db: &'static str,
        id: &'static str,
        rank: Rank,
    }

    impl Ranked for Tagged {
        fn rank(&self) -> Rank {
            self.rank
        }
    }

    fn tag(db: &'static str, id: &'static str, rank: Rank) -> Tagged {
        Tagged { db, id, rank }
    }

    fn is_up(t: &Tagged) -> bool {
        t.db == "up"
    }

    fn is_rs(t: &Tagged) -> bool {
        t.db == "rs"
    }

    fn cached_id(list: &ObservedList<Tagged>, view: usize) -> Option<&'static str> {
        list.cached(view).map(|t| t.id)
    }

    #[test]
    fn test_first_plain_candidate_is_adopted() {
        let mut list: ObservedList<Tagged> = ObservedList::with_views(&[is_up]);
        list.push(tag("rs", "NP_1", Rank::Plain));
        list.push(tag("up", "P1", Rank::Plain));
        list.push(tag("up", "P2", Rank::Plain));

        assert_eq!(cached_id(&list, 0), Some("P1"));
    }

    #[test]
    fn test_identity_replaces_plain_but_not_the_reverse() {
        let mut list: ObservedList<Tagged> = ObservedList::with_views(&[is_up]);
        list.push(tag("up", "P1", Rank::Plain));
        list.push(tag("up", "P2", Rank::Identity));
        list.push(tag("up", "P3", Rank::Plain));
        list.push(tag("up", "P4", Rank::Identity));

        assert_eq!(cached_id(&list, 0), Some("P2"));
    }

    #[test]
    fn test_plain_promoted_over_secondary() {
        let mut list: ObservedList<Tagged> = ObservedList::with_views(&[is_up]);
        list.push(tag("up", "S1", Rank::Secondary));
        list.push(tag("up", "S2", Rank::Secondary));
        assert_eq!(cached_id(&list, 0), Some("S1"));

        list.push(tag("up", "P1", Rank::Plain));
        assert_eq!(cached_id(&list, 0), Some("P1"));
    }

    #[test]
    fn test_removing_cached_element_rescans() {
        let mut list: ObservedList<Tagged> = ObservedList::with_views(&[is_up, is_rs]);
        list.push(tag("rs", "NP_1", Rank::Plain));
        list.push(tag("up", "P1", Rank::Identity));
        list.push(tag("up", "P2", Rank::Secondary));

        list.remove(&tag("up", "P1", Rank::Identity));

        assert_eq!(cached_id(&list, 0), Some("P2"));
        assert_eq!(cached_id(&list, 1), Some("NP_1"));
    }

    #[test]
    fn test_removing_earlier_element_keeps_view_pointing_at_same_item() {
        let mut list: ObservedList<Tagged> = ObservedList::with_views(&[is_up]);
        list.push(tag("rs", "NP_1", Rank::Plain));
        list.push(tag("up", "P1", Rank::Plain));

        list.remove_at(0);

        assert_eq!(cached_id(&list, 0), Some("P1"));
    }

    #[test]
    fn test_last_candidate_removed_empties_view() {
        let mut list: ObservedList<Tagged> = ObservedList::with_views(&[is_up]);
        list.push(tag("up", "P1", Rank::Plain));
        list.remove_at(0);

        assert_eq!(cached_id(&list, 0), None);
        assert!(list.remove_at(0).is_none());
    }

    #[test]
    fn test_clear_empties_views() {
        let mut list: ObservedList<Tagged> = ObservedList::with_views(&[is_up, is_rs]);
        list.push(tag("up", "P1", Rank::Plain));
        list.push(tag("rs", "NP_1", Rank::Plain));
        list.clear();

        assert!(list.is_empty());
        assert_eq!(cached_id(&list, 0), None);
        assert_eq!(cached_id(&list, 1), None);

        list.push(tag("up", "P2", Rank::Plain));
        assert_eq!(cached_id(&list, 0), Some("P2"));
    }

    #[test]
    fn test_replace_cached_forces_new_element() {
        let mut list: ObservedList<Tagged> = ObservedList::with_views(&[is_up]);
        list.push(tag("up", "P1", Rank::Identity));
        list.push(tag("up", "P2", Rank::Identity));

        list.replace_cached(0, tag("up", "P3", Rank::Identity));

        assert_eq!(cached_id(&list, 0), Some("P3"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_candidates_drops_all_matches() {
        let mut list: ObservedList<Tagged> = ObservedList::with_views(&[is_up]);
        list.push(tag("up", "P1", Rank::Identity));
        list.push(tag("rs", "NP_1", Rank::Plain));
        list.push(tag("up", "P2", Rank::Plain));

        let removed = list.remove_candidates(0);

        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].id, "P1");
        assert_eq!(list.len(), 1);
        assert_eq!(cached_id(&list, 0), None);
    }
}
