// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::rc::Rc;

use indexmap::IndexSet;
use tracing::debug;

use super::{Index, Key, Repr, Sorted};
use crate::error::{out_of_range, Error, Result};

/// A mutable label index under construction.
///
/// A new builder is dense and stays dense while integer keys are added at
/// their own positions. Any other key, a replacement, a removal before the
/// end or a swap moves it to the hashed representation; [`sort`](Self::sort)
/// moves it to the sorted representation, where later mutations keep the
/// comparator order.
///
/// ```
/// use ndframe::IndexBuilder;
///
/// let mut builder = IndexBuilder::new();
/// builder.add("c").unwrap();
/// builder.add("a").unwrap();
/// builder.add("b").unwrap();
/// assert!(builder.add("a").is_err());
/// builder.remove(0).unwrap();
/// let index = builder.build();
/// assert_eq!(index.location("b").unwrap(), 1);
/// ```
pub struct IndexBuilder {
    repr: Repr,
}

impl IndexBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        IndexBuilder { repr: Repr::Dense(0) }
    }

    pub(crate) fn from_repr(repr: Repr) -> Self {
        IndexBuilder { repr }
    }

    pub fn len(&self) -> usize {
        self.repr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains<K: Into<Key>>(&self, key: K) -> bool {
        self.repr.location(&key.into()).is_some()
    }

    /// Return the position of `key`.
    ///
    /// **Errors** with `KeyNotFound` if the key is absent.
    pub fn location<K: Into<Key>>(&self, key: K) -> Result<usize> {
        let key = key.into();
        self.repr.location(&key).ok_or(Error::KeyNotFound(key))
    }

    /// Return the key at `position`.
    pub fn key(&self, position: usize) -> Result<Key> {
        self.repr
            .key(position)
            .ok_or_else(|| out_of_range(position, self.len()))
    }

    /// Append `key` at the next position.
    ///
    /// **Errors** with `DuplicateKey` if the key is present.
    pub fn add<K: Into<Key>>(&mut self, key: K) -> Result<()> {
        let n = self.len();
        self.set(key, n)
    }

    /// Put `key` at `position`, replacing the key there, or append it if
    /// `position` is the current length.
    ///
    /// **Errors** with `DuplicateKey` if the key is present at another
    /// position, and with `IndexOutOfRange` if `position > len`.
    pub fn set<K: Into<Key>>(&mut self, key: K, position: usize) -> Result<()> {
        let key = key.into();
        let len = self.len();
        if position > len {
            return Err(out_of_range(position, len + 1));
        }
        match self.repr.location(&key) {
            Some(p) if p == position => return Ok(()),
            Some(_) => return Err(Error::DuplicateKey(key)),
            None => {}
        }
        match &mut self.repr {
            Repr::Dense(n) => {
                if position == *n && key.as_position() == Some(position) {
                    *n += 1;
                    return Ok(());
                }
                self.unpack();
                self.set(key, position)
            }
            Repr::Hashed(set) => {
                if position == set.len() {
                    set.insert(key);
                } else {
                    let (last, _) = set.insert_full(key);
                    set.swap_indices(position, last);
                    set.pop();
                }
                Ok(())
            }
            Repr::Sorted(s) => {
                if position == s.keys.len() {
                    let cmp = &s.cmp;
                    let keys = &s.keys;
                    let at = s.order.partition_point(|&p| cmp(&keys[p], &key) != Ordering::Greater);
                    s.order.insert(at, position);
                    s.lookup.insert(key.clone(), position);
                    s.keys.push(key);
                } else {
                    let old = mem::replace(&mut s.keys[position], key.clone());
                    s.lookup.remove(&old);
                    s.lookup.insert(key, position);
                    s.reorder();
                }
                Ok(())
            }
        }
    }

    /// Remove the key at `position` and return it. Keys after it move one
    /// position down.
    ///
    /// **Errors** with `IndexOutOfRange` if `position >= len`.
    pub fn remove(&mut self, position: usize) -> Result<Key> {
        let len = self.len();
        if position >= len {
            return Err(out_of_range(position, len));
        }
        match &mut self.repr {
            Repr::Dense(n) => {
                if position + 1 == *n {
                    *n -= 1;
                    return Ok(Key::from(position));
                }
                self.unpack();
                self.remove(position)
            }
            Repr::Hashed(set) => set
                .shift_remove_index(position)
                .ok_or_else(|| out_of_range(position, len)),
            Repr::Sorted(s) => {
                let key = s.keys.remove(position);
                s.lookup.remove(&key);
                for k in &s.keys[position..] {
                    if let Some(p) = s.lookup.get_mut(k) {
                        *p -= 1;
                    }
                }
                s.order.retain(|&p| p != position);
                for p in &mut s.order {
                    if *p > position {
                        *p -= 1;
                    }
                }
                Ok(key)
            }
        }
    }

    /// Exchange the keys at positions `a` and `b`.
    ///
    /// **Errors** with `IndexOutOfRange` if either position is `>= len`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        let len = self.len();
        if let Some(&bad) = [a, b].iter().find(|&&p| p >= len) {
            return Err(out_of_range(bad, len));
        }
        if a == b {
            return Ok(());
        }
        match &mut self.repr {
            Repr::Dense(_) => {
                self.unpack();
                self.swap(a, b)
            }
            Repr::Hashed(set) => {
                set.swap_indices(a, b);
                Ok(())
            }
            Repr::Sorted(s) => {
                s.keys.swap(a, b);
                s.lookup.insert(s.keys[a].clone(), a);
                s.lookup.insert(s.keys[b].clone(), b);
                for p in &mut s.order {
                    if *p == a {
                        *p = b;
                    } else if *p == b {
                        *p = a;
                    }
                }
                Ok(())
            }
        }
    }

    /// Append the integer keys `len..n`; a no-op if `n <= len`.
    pub fn extend(&mut self, n: usize) -> Result<()> {
        for i in self.len()..n {
            self.add(i)?;
        }
        Ok(())
    }

    /// Shrink to `n` keys by removing from the end, or grow like
    /// [`extend`](Self::extend).
    pub fn resize(&mut self, n: usize) -> Result<()> {
        while self.len() > n {
            self.remove(self.len() - 1)?;
        }
        self.extend(n)
    }

    /// Iterate keys in their natural order from now on.
    pub fn sort(&mut self) {
        self.sort_by(Key::cmp)
    }

    /// Iterate keys in the order of `cmp` from now on. Positions are kept.
    pub fn sort_by<F>(&mut self, cmp: F)
    where
        F: Fn(&Key, &Key) -> Ordering + 'static,
    {
        let len = self.len();
        debug!(from = self.repr.kind(), to = "sorted", len, "label index representation changed");
        let keys = (0..len).filter_map(|p| self.repr.key(p)).collect();
        self.repr = Repr::Sorted(Sorted::new(keys, Rc::new(cmp)));
    }

    /// Finish the index.
    pub fn build(self) -> Index {
        Index { repr: self.repr }
    }

    /// Move a dense builder to the hashed representation.
    fn unpack(&mut self) {
        if let Repr::Dense(n) = self.repr {
            debug!(from = "dense", to = "hashed", len = n, "label index representation changed");
            self.repr = Repr::Hashed((0..n).map(Key::from).collect::<IndexSet<_>>());
        }
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        IndexBuilder::new()
    }
}

impl fmt::Debug for IndexBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexBuilder")
            .field("repr", &self.repr.kind())
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(b: &IndexBuilder) -> Vec<Key> {
        (0..b.len()).map(|p| b.key(p).unwrap()).collect()
    }

    fn is_dense(b: &IndexBuilder) -> bool {
        matches!(b.repr, Repr::Dense(_))
    }

    #[test]
    fn stays_dense_for_positional_ints() {
        let mut b = IndexBuilder::new();
        b.extend(4).unwrap();
        b.add(4).unwrap();
        assert!(is_dense(&b));
        b.remove(4).unwrap();
        assert!(is_dense(&b));
        assert_eq!(b.len(), 4);
        b.resize(2).unwrap();
        assert!(is_dense(&b));
        assert_eq!(keys(&b), vec![Key::from(0), Key::from(1)]);
    }

    #[test]
    fn non_positional_key_unpacks() {
        let mut b = Index::range(3).copy_builder();
        b.set("x", 1).unwrap();
        assert!(!is_dense(&b));
        assert_eq!(b.location("x"), Ok(1));
        assert_eq!(b.location(2), Ok(2));
        assert_eq!(b.location(1), Err(Error::KeyNotFound(Key::from(1))));
    }

    #[test]
    fn out_of_order_int_unpacks() {
        let mut b = IndexBuilder::new();
        b.add(1).unwrap();
        b.add(0).unwrap();
        assert!(!is_dense(&b));
        assert_eq!(b.location(1), Ok(0));
    }

    #[test]
    fn remove_compacts_positions() {
        let mut b = IndexBuilder::new();
        for k in ["a", "b", "c", "d"] {
            b.add(k).unwrap();
        }
        assert_eq!(b.remove(1), Ok(Key::from("b")));
        assert_eq!(b.location("c"), Ok(1));
        assert_eq!(b.location("d"), Ok(2));
        assert_eq!(b.remove(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));

        let mut dense = Index::range(3).copy_builder();
        dense.remove(0).unwrap();
        assert_eq!(keys(&dense), vec![Key::from(1), Key::from(2)]);
    }

    #[test]
    fn set_checks_position_and_duplicates() {
        let mut b = Index::from_keys(["a", "b"]).unwrap().copy_builder();
        assert_eq!(b.set("c", 3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(b.set("a", 1), Err(Error::DuplicateKey(Key::from("a"))));
        b.set("a", 0).unwrap();
        b.set("c", 2).unwrap();
        assert_eq!(keys(&b), vec![Key::from("a"), Key::from("b"), Key::from("c")]);
    }

    #[test]
    fn swap_exchanges_keys() {
        let mut b = Index::range(3).copy_builder();
        b.swap(0, 2).unwrap();
        assert_eq!(b.location(0), Ok(2));
        assert_eq!(b.location(2), Ok(0));
        assert!(b.swap(0, 3).is_err());
    }

    #[test]
    fn sorted_builder_keeps_order_through_mutation() {
        let mut b = Index::from_keys(["m", "c", "x"]).unwrap().copy_builder();
        b.sort();
        b.add("a").unwrap();
        b.add("n").unwrap();
        let index = b.build();
        let names: Vec<_> = index.keys().map(|k| k.to_string()).collect();
        assert_eq!(names, ["a", "c", "m", "n", "x"]);
        assert_eq!(index.location("a"), Ok(3));

        let mut b = index.copy_builder();
        b.remove(0).unwrap();
        b.swap(0, 1).unwrap();
        let index = b.build();
        let names: Vec<_> = index.keys().map(|k| k.to_string()).collect();
        assert_eq!(names, ["a", "c", "n", "x"]);
        assert_eq!(index.location("x"), Ok(0));
        assert_eq!(index.location("c"), Ok(1));
        assert!(index.is_sorted());
    }

    #[test]
    fn sort_by_comparator() {
        let mut b = Index::from_keys(["bb", "a", "ccc"]).unwrap().copy_builder();
        b.sort_by(|x, y| y.cmp(x));
        let names: Vec<_> = b.build().keys().map(|k| k.to_string()).collect();
        assert_eq!(names, ["ccc", "bb", "a"]);
    }
}
