// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::iter::FusedIterator;

use crate::geometry::Positions;
use crate::storage::Storage;
use crate::ArrayBase;

/// An iterator over the elements of an array, in logical order.
///
/// Elements are yielded by value. The storage is borrowed for each element
/// only, so the array may be written through another handle between calls to
/// `next`; later elements then reflect the write.
///
/// Iterator element type is `S::Elem`.
pub struct Iter<'a, S> {
    array: &'a ArrayBase<S>,
    positions: Positions,
}

impl<'a, S: Storage> Iter<'a, S> {
    pub(crate) fn new(array: &'a ArrayBase<S>) -> Self {
        Iter {
            array,
            positions: array.positions(),
        }
    }
}

impl<S: Storage> Iterator for Iter<'_, S> {
    type Item = S::Elem;

    #[inline]
    fn next(&mut self) -> Option<S::Elem> {
        let pos = self.positions.next()?;
        Some(self.array.data.borrow().get(pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<S: Storage> ExactSizeIterator for Iter<'_, S> {}

impl<S: Storage> FusedIterator for Iter<'_, S> {}

impl<S> fmt::Debug for Iter<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("positions", &self.positions).finish()
    }
}

impl<'a, S: Storage> IntoIterator for &'a ArrayBase<S> {
    type Item = S::Elem;
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}
