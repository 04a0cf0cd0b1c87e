// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::element::Element;

/// A flat, fixed-length, homogeneously typed element buffer.
///
/// Storage knows nothing of shape, strides or offsets; arrays translate
/// logical indices into storage positions and call `get`/`set` with those.
/// Positions passed to `get` and `set` must be less than `len()`.
///
/// The slice accessors give the routine dispatcher direct access to the
/// buffer for native calls.
pub trait Storage {
    /// The element type.
    type Elem: Element;

    /// Allocate `len` slots, each holding the element's default value.
    fn allocate(len: usize) -> Self
    where
        Self: Sized;

    /// Take ownership of `v` as the buffer contents.
    fn from_vec(v: Vec<Self::Elem>) -> Self
    where
        Self: Sized;

    /// Number of slots.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the slot at `index`.
    fn get(&self, index: usize) -> Self::Elem {
        self.as_slice()[index].clone()
    }

    /// Write the slot at `index`.
    fn set(&mut self, index: usize, value: Self::Elem) {
        self.as_mut_slice()[index] = value;
    }

    fn as_slice(&self) -> &[Self::Elem];

    fn as_mut_slice(&mut self) -> &mut [Self::Elem];
}

/// The standard storage backend: a heap allocated `Vec`.
///
/// *Don’t use this type directly—use the type alias
/// [`Array`](crate::Array) for the array type!*
pub struct Buffer<A> {
    elems: Vec<A>,
}

impl<A> Buffer<A> {
    /// Return the contents as a vector.
    pub fn into_vec(self) -> Vec<A> {
        self.elems
    }
}

impl<A: Element> Storage for Buffer<A> {
    type Elem = A;

    fn allocate(len: usize) -> Self {
        Buffer {
            elems: vec![A::default_value(); len],
        }
    }

    fn from_vec(v: Vec<A>) -> Self {
        Buffer { elems: v }
    }

    #[inline]
    fn len(&self) -> usize {
        self.elems.len()
    }

    #[inline]
    fn as_slice(&self) -> &[A] {
        &self.elems
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [A] {
        &mut self.elems
    }
}

impl<A: fmt::Debug> fmt::Debug for Buffer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elems.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn unset_slots_read_as_default() {
        let b = Buffer::<Complex64>::allocate(3);
        assert_eq!(b.get(2), Complex64::new(0., 0.));

        let r = Buffer::<Option<String>>::allocate(2);
        assert_eq!(r.get(0), None);

        let z = Buffer::<bool>::allocate(1);
        assert!(!z.get(0));
    }

    #[test]
    fn set_then_get() {
        let mut b = Buffer::from_vec(vec![1, 2, 3]);
        b.set(1, 20);
        assert_eq!(b.as_slice(), &[1, 20, 3]);
        assert_eq!(b.len(), 3);
    }
}
