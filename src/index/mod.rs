// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Label indices: the mapping from row or column keys to array positions.
//!
//! An [`Index`] is immutable. It is produced by an [`IndexBuilder`], and a
//! modified index is made by starting a [copy
//! builder](Index::copy_builder) from an existing one.
//!
//! An index is stored in one of three representations and moves between them
//! as the keys require:
//!
//! - *dense*: the keys are the integers `0..n`, each at its own position.
//!   Nothing is stored but `n`.
//! - *hashed*: arbitrary keys in position order, with hashed lookup.
//! - *sorted*: arbitrary keys, iterated in the order of a comparator. Each key
//!   keeps its position; only iteration order and range queries follow the
//!   comparator.
//!
//! ```
//! use ndframe::{Index, Key};
//!
//! let mut builder = Index::range(3).copy_builder();
//! builder.set("x", 1).unwrap();
//! let index = builder.build();
//! assert_eq!(index.location("x").unwrap(), 1);
//! assert_eq!(index.location(2).unwrap(), 2);
//! assert_eq!(index.keys().collect::<Vec<_>>(), vec![Key::from(0), Key::from("x"), Key::from(2)]);
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Bound, Range, RangeBounds};
use std::rc::Rc;

use indexmap::IndexSet;

use crate::error::{out_of_range, Error, Result};

mod builder;
mod key;

pub use self::builder::IndexBuilder;
pub use self::key::Key;

/// Key ordering used by a sorted index.
pub(crate) type Comparator = Rc<dyn Fn(&Key, &Key) -> Ordering>;

#[derive(Clone)]
pub(crate) enum Repr {
    Dense(usize),
    Hashed(IndexSet<Key>),
    Sorted(Sorted),
}

#[derive(Clone)]
pub(crate) struct Sorted {
    /// Keys by position.
    pub(crate) keys: Vec<Key>,
    pub(crate) lookup: HashMap<Key, usize>,
    /// Positions in comparator order.
    pub(crate) order: Vec<usize>,
    pub(crate) cmp: Comparator,
}

impl Sorted {
    pub(crate) fn new(keys: Vec<Key>, cmp: Comparator) -> Self {
        let lookup = keys.iter().cloned().zip(0..).collect();
        let mut sorted = Sorted {
            keys,
            lookup,
            order: Vec::new(),
            cmp,
        };
        sorted.reorder();
        sorted
    }

    /// Recompute the iteration order; ties keep position order.
    pub(crate) fn reorder(&mut self) {
        let (keys, cmp) = (&self.keys, &self.cmp);
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| cmp(&keys[a], &keys[b]));
        self.order = order;
    }
}

impl Repr {
    pub(crate) fn len(&self) -> usize {
        match self {
            Repr::Dense(n) => *n,
            Repr::Hashed(set) => set.len(),
            Repr::Sorted(s) => s.keys.len(),
        }
    }

    pub(crate) fn location(&self, key: &Key) -> Option<usize> {
        match self {
            Repr::Dense(n) => key.as_position().filter(|p| p < n),
            Repr::Hashed(set) => set.get_index_of(key),
            Repr::Sorted(s) => s.lookup.get(key).copied(),
        }
    }

    pub(crate) fn key(&self, position: usize) -> Option<Key> {
        match self {
            Repr::Dense(n) => (position < *n).then(|| Key::from(position)),
            Repr::Hashed(set) => set.get_index(position).cloned(),
            Repr::Sorted(s) => s.keys.get(position).cloned(),
        }
    }

    /// Position of the `i`th key in iteration order.
    #[inline]
    pub(crate) fn ordered(&self, i: usize) -> usize {
        match self {
            Repr::Sorted(s) => s.order[i],
            _ => i,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Repr::Dense(_) => "dense",
            Repr::Hashed(_) => "hashed",
            Repr::Sorted(_) => "sorted",
        }
    }
}

/// An immutable mapping between keys and positions `0..len`.
///
/// See the [module documentation](self) for the representations. Lookups
/// report absent keys with [`Error::KeyNotFound`] and positions outside
/// `0..len` with [`Error::IndexOutOfRange`].
#[derive(Clone)]
pub struct Index {
    pub(crate) repr: Repr,
}

impl Index {
    /// Return the dense index with keys `0..n`.
    pub fn range(n: usize) -> Index {
        Index { repr: Repr::Dense(n) }
    }

    /// Return an index with `keys` at consecutive positions, iterated in the
    /// given order.
    ///
    /// **Errors** with `DuplicateKey` if a key repeats.
    pub fn from_keys<I, K>(keys: I) -> Result<Index>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let mut builder = IndexBuilder::new();
        for key in keys {
            builder.add(key)?;
        }
        Ok(builder.build())
    }

    /// Return an index with `keys` at consecutive positions, iterated in
    /// natural key order.
    ///
    /// ```
    /// use ndframe::Index;
    ///
    /// let index = Index::sorted(["c", "a", "b"]).unwrap();
    /// assert_eq!(index.location("a").unwrap(), 1);
    /// assert_eq!(index.keys().map(|k| k.to_string()).collect::<Vec<_>>(), ["a", "b", "c"]);
    /// ```
    pub fn sorted<I, K>(keys: I) -> Result<Index>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let mut builder = Index::from_keys(keys)?.copy_builder();
        builder.sort();
        Ok(builder.build())
    }

    /// Return the number of keys.
    pub fn len(&self) -> usize {
        self.repr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return `true` if iteration follows a comparator.
    pub fn is_sorted(&self) -> bool {
        matches!(self.repr, Repr::Sorted(_))
    }

    /// Return the position of `key`.
    ///
    /// **Errors** with `KeyNotFound` if the key is absent.
    pub fn location<K: Into<Key>>(&self, key: K) -> Result<usize> {
        let key = key.into();
        self.repr.location(&key).ok_or(Error::KeyNotFound(key))
    }

    /// Return the positions of `keys`, in the same order.
    ///
    /// **Errors** with `KeyNotFound` for the first absent key.
    pub fn locations<K>(&self, keys: &[K]) -> Result<Vec<usize>>
    where
        K: Clone + Into<Key>,
    {
        keys.iter().map(|k| self.location(k.clone())).collect()
    }

    /// Return the key at `position`.
    ///
    /// **Errors** with `IndexOutOfRange` if `position >= len`.
    pub fn key(&self, position: usize) -> Result<Key> {
        self.repr
            .key(position)
            .ok_or_else(|| out_of_range(position, self.len()))
    }

    pub fn contains<K: Into<Key>>(&self, key: K) -> bool {
        self.repr.location(&key.into()).is_some()
    }

    /// Return an iterator over the keys in iteration order.
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            repr: &self.repr,
            range: 0..self.len(),
        }
    }

    /// Return an iterator over `(key, position)` pairs in iteration order.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            repr: &self.repr,
            range: 0..self.len(),
        }
    }

    /// Return the keys within `range`, in iteration order.
    ///
    /// Each end of the range is independently inclusive, exclusive or
    /// unbounded. Only keys of the same variant as the bounds are considered;
    /// a sorted index compares with its comparator, any other index with the
    /// natural key order. A range whose start lies above its end is empty.
    ///
    /// **Errors** with `IncomparableKeys` if both ends are bounded by keys of
    /// different variants.
    ///
    /// ```
    /// use std::ops::Bound;
    /// use ndframe::{Index, Key};
    ///
    /// let index = Index::sorted(["d", "b", "a", "c"]).unwrap();
    /// let keys = index
    ///     .select_range((Bound::Excluded(Key::from("a")), Bound::Included(Key::from("c"))))
    ///     .unwrap();
    /// assert_eq!(keys, vec![Key::from("b"), Key::from("c")]);
    /// assert!(index.select_range(Key::from("a")..Key::from(3)).is_err());
    /// ```
    pub fn select_range<R: RangeBounds<Key>>(&self, range: R) -> Result<Vec<Key>> {
        let (from, to) = (range.start_bound(), range.end_bound());
        let (lower, upper) = (bound_key(from), bound_key(to));
        if let (Some(a), Some(b)) = (lower, upper) {
            if !a.comparable(b) {
                return Err(Error::IncomparableKeys(a.clone(), b.clone()));
            }
        }
        let probe = lower.or(upper);
        let admit = |k: &Key| probe.map_or(true, |p| p.comparable(k));
        let selected = match &self.repr {
            Repr::Sorted(s) => {
                let cmp = &*s.cmp;
                let start = s.order.partition_point(|&p| below(cmp, &s.keys[p], from));
                let end = s.order.partition_point(|&p| !above(cmp, &s.keys[p], to));
                if start >= end {
                    Vec::new()
                } else {
                    s.order[start..end]
                        .iter()
                        .map(|&p| &s.keys[p])
                        .filter(|k| admit(k))
                        .cloned()
                        .collect()
                }
            }
            _ => {
                let natural: &dyn Fn(&Key, &Key) -> Ordering = &Key::cmp;
                self.keys()
                    .filter(|k| admit(k) && !below(natural, k, from) && !above(natural, k, to))
                    .collect()
            }
        };
        Ok(selected)
    }

    /// Return an empty builder.
    pub fn new_builder(&self) -> IndexBuilder {
        IndexBuilder::new()
    }

    /// Return a builder holding this index's keys, positions and ordering.
    pub fn copy_builder(&self) -> IndexBuilder {
        IndexBuilder::from_repr(self.repr.clone())
    }
}

fn bound_key(bound: Bound<&Key>) -> Option<&Key> {
    match bound {
        Bound::Included(k) | Bound::Excluded(k) => Some(k),
        Bound::Unbounded => None,
    }
}

/// `key` lies before the start bound.
fn below(cmp: &dyn Fn(&Key, &Key) -> Ordering, key: &Key, from: Bound<&Key>) -> bool {
    match from {
        Bound::Included(f) => cmp(key, f) == Ordering::Less,
        Bound::Excluded(f) => cmp(key, f) != Ordering::Greater,
        Bound::Unbounded => false,
    }
}

/// `key` lies after the end bound.
fn above(cmp: &dyn Fn(&Key, &Key) -> Ordering, key: &Key, to: Bound<&Key>) -> bool {
    match to {
        Bound::Included(t) => cmp(key, t) == Ordering::Greater,
        Bound::Excluded(t) => cmp(key, t) != Ordering::Less,
        Bound::Unbounded => false,
    }
}

impl PartialEq for Index {
    /// Indices are equal if they iterate the same `(key, position)` pairs.
    fn eq(&self, other: &Index) -> bool {
        self.len() == other.len() && self.entries().eq(other.entries())
    }
}

impl Eq for Index {}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Index({}) ", self.repr.kind())?;
        f.debug_map().entries(self.entries()).finish()
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, position)) in self.entries().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, position)?;
        }
        f.write_str("}")
    }
}

impl Default for Index {
    fn default() -> Index {
        Index::range(0)
    }
}

macro_rules! index_iterator {
    ($(#[$meta:meta])* $name:ident, $item:ty, |$repr:ident, $pos:ident| $make:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name<'a> {
            repr: &'a Repr,
            range: Range<usize>,
        }

        impl<'a> Iterator for $name<'a> {
            type Item = $item;

            fn next(&mut self) -> Option<$item> {
                let $repr = self.repr;
                let i = self.range.next()?;
                let $pos = $repr.ordered(i);
                $make
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.range.size_hint()
            }
        }

        impl<'a> DoubleEndedIterator for $name<'a> {
            fn next_back(&mut self) -> Option<$item> {
                let $repr = self.repr;
                let i = self.range.next_back()?;
                let $pos = $repr.ordered(i);
                $make
            }
        }

        impl<'a> ExactSizeIterator for $name<'a> {}
    };
}

index_iterator! {
    /// Keys of an [`Index`] in iteration order.
    Keys, Key, |repr, pos| repr.key(pos)
}

index_iterator! {
    /// `(key, position)` pairs of an [`Index`] in iteration order.
    Entries, (Key, usize), |repr, pos| repr.key(pos).map(|k| (k, pos))
}
