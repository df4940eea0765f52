//! Comparator framework
//!
//! Every entity kind has a comparator in two families:
//!
//! - [`Family::Default`]: forgiving. Names compare case-insensitively, MI
//!   identifiers are preferred when present, and primary identifiers decide
//!   as soon as both sides have one.
//! - [`Family::Unambiguous`]: strict. Identifiers and qualifiers must match
//!   exactly. Entity `PartialEq` and `Hash` implementations delegate to it.
//!
//! Comparators are small `Copy` values composed from the comparators of
//! their parts. Each module exposes `DEFAULT_*` and `UNAMBIGUOUS_*` constants
//! for the canonical instances.
//!
//! Absent values sort after present ones everywhere: see
//! [`Comparator::compare_opt`].

pub mod feature;
pub mod interaction;
pub mod interactor;
pub mod participant;
pub mod range;
pub mod terms;

use std::cmp::Ordering;

/// Which flavour of equality a comparator implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Default,
    Unambiguous,
}

impl Family {
    /// String equality for this family: case-insensitive for `Default`.
    pub fn compare_str(self, a: &str, b: &str) -> Ordering {
        match self {
            Family::Default => compare_ignore_case(a, b),
            Family::Unambiguous => a.cmp(b),
        }
    }
}

/// A total order over `T` used for sorting and equality decisions.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Like [`Comparator::compare`], with `None` sorting after any value.
    fn compare_opt(&self, a: Option<&T>, b: Option<&T>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => self.compare(a, b),
        }
    }

    fn are_equal(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// ASCII case-insensitive string order.
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// Order two optional values with `cmp`, `None` last.
pub fn compare_options<T: ?Sized>(
    a: Option<&T>,
    b: Option<&T>,
    cmp: impl FnOnce(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => cmp(a, b),
    }
}

/// `Some(ordering)` when both sides are present, else `None`.
///
/// Used for "decide on X if both have X" ladders.
pub fn compare_if_both<T: ?Sized>(
    a: Option<&T>,
    b: Option<&T>,
    cmp: impl FnOnce(&T, &T) -> Ordering,
) -> Option<Ordering> {
    match (a, b) {
        (Some(a), Some(b)) => Some(cmp(a, b)),
        _ => None,
    }
}

/// Stable insertion sort of references.
///
/// Tolerates comparators that are not transitive across kinds, where
/// `slice::sort_by` may panic.
pub fn sorted<'a, T, C>(items: impl IntoIterator<Item = &'a T>, cmp: &C) -> Vec<&'a T>
where
    T: 'a + ?Sized,
    C: Comparator<T> + ?Sized,
{
    let mut out: Vec<&'a T> = Vec::new();
    for item in items {
        let mut at = out.len();
        while at > 0 && cmp.compare(out[at - 1], item) == Ordering::Greater {
            at -= 1;
        }
        out.insert(at, item);
    }
    out
}

/// Compare two collections regardless of their element order.
///
/// Both sides are sorted, compared element by element, and then by length.
pub fn compare_collections<'a, 'b, T, C>(
    a: impl IntoIterator<Item = &'a T>,
    b: impl IntoIterator<Item = &'b T>,
    cmp: &C,
) -> Ordering
where
    T: 'a + 'b + ?Sized,
    C: Comparator<T> + ?Sized,
{
    let a = sorted(a, cmp);
    let b = sorted(b, cmp);
    for (x, y) in a.iter().zip(b.iter()) {
        let c = cmp.compare(x, y);
        if c != Ordering::Equal {
            return c;
        }
    }
    a.len().cmp(&b.len())
}

/// Look for one element shared by both collections.
///
/// Both sides are sorted and walked in lock step, advancing whichever side
/// is behind. Returns `Equal` as soon as a shared element is found. If a side
/// runs out first, the last comparison made decides. Empty input on either
/// side gives `Equal`.
pub fn compare_shared<'a, 'b, T, C>(
    a: impl IntoIterator<Item = &'a T>,
    b: impl IntoIterator<Item = &'b T>,
    cmp: &C,
) -> Ordering
where
    T: 'a + 'b + ?Sized,
    C: Comparator<T> + ?Sized,
{
    let a = sorted(a, cmp);
    let b = sorted(b, cmp);
    let (Some(first_a), Some(first_b)) = (a.first(), b.first()) else {
        return Ordering::Equal;
    };

    let (mut i, mut j) = (0, 0);
    let mut comp = cmp.compare(first_a, first_b);
    while comp != Ordering::Equal {
        if comp == Ordering::Less {
            if i + 1 >= a.len() {
                break;
            }
            i += 1;
        } else {
            if j + 1 >= b.len() {
                break;
            }
            j += 1;
        }
        comp = cmp.compare(a[i], b[j]);
    }
    comp
}

/// Adapts a plain `Ord` type to [`Comparator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}
