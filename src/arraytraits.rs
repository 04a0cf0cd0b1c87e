// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::hash;
use std::iter::FromIterator;

use crate::element::Element;
use crate::storage::{Buffer, Storage};
use crate::{Array, ArrayBase};

/// Return `true` if the array shapes and all elements of `self` and
/// `rhs` are equal. Return `false` otherwise.
///
/// Layout does not take part: a view equals a copy of itself.
impl<A, B, S, S2> PartialEq<ArrayBase<S2>> for ArrayBase<S>
where
    A: Element + PartialEq<B>,
    B: Element,
    S: Storage<Elem = A>,
    S2: Storage<Elem = B>,
{
    fn eq(&self, rhs: &ArrayBase<S2>) -> bool {
        self.shape() == rhs.shape() && self.iter().zip(rhs.iter()).all(|(a, b)| a == b)
    }
}

impl<S> Eq for ArrayBase<S>
where
    S: Storage,
    S::Elem: Eq,
{
}

impl<S> hash::Hash for ArrayBase<S>
where
    S: Storage,
    S::Elem: hash::Hash,
{
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.shape().hash(state);
        for elt in self.iter() {
            elt.hash(state)
        }
    }
}

/// Create a one-dimensional array from a vector (no copying needed).
impl<A: Element> From<Vec<A>> for Array<A> {
    fn from(v: Vec<A>) -> Self {
        Self::from_vec(v)
    }
}

impl<A: Element> FromIterator<A> for Array<A> {
    /// Create a one-dimensional array from an iterable.
    fn from_iter<I>(iterable: I) -> Array<A>
    where
        I: IntoIterator<Item = A>,
    {
        Self::from_vec(iterable.into_iter().collect())
    }
}

impl<A: Element> Array<A> {
    /// Consume the array and return its elements in logical order, without
    /// copying when the array owns an unshared contiguous buffer.
    pub fn into_raw_vec(self) -> Vec<A> {
        let contiguous_whole = self.is_contiguous() && self.offset == 0;
        match std::rc::Rc::try_unwrap(self.data) {
            Ok(cell) if contiguous_whole => {
                let mut v = Buffer::into_vec(cell.into_inner());
                v.truncate(crate::geometry::linear_size(&self.shape));
                v
            }
            Ok(cell) => {
                let data = cell.into_inner();
                crate::geometry::Positions::new(&self.shape, &self.strides, self.offset)
                    .map(|pos| data.get(pos))
                    .collect()
            }
            Err(rc) => {
                let data = rc.borrow();
                crate::geometry::Positions::new(&self.shape, &self.strides, self.offset)
                    .map(|pos| data.get(pos))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use crate::{Array, IntArray};

    fn hash_of(a: &IntArray) -> u64 {
        let mut h = DefaultHasher::new();
        a.hash(&mut h);
        h.finish()
    }

    #[test]
    fn equality_ignores_layout() {
        let a = IntArray::from_shape_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
        let t = a.t();
        let c = t.copy();
        assert_eq!(t, c);
        assert_ne!(a, c);
        assert_eq!(hash_of(&t), hash_of(&c));
        assert_ne!(a, a.reshape(&[4]).unwrap());
    }

    #[test]
    fn collect_and_unwrap() {
        let a: Array<i64> = (0..4).collect();
        assert_eq!(a.shape(), &[4]);
        assert_eq!(a.into_raw_vec(), vec![0, 1, 2, 3]);

        let m = IntArray::from_shape_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
        let row = m.get_row(0).unwrap();
        assert_eq!(row.into_raw_vec(), vec![1, 3]);
        assert_eq!(m.t().into_raw_vec(), vec![1, 3, 2, 4]);
    }
}
