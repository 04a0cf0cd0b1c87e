// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shape and stride arithmetic.
//!
//! Pure functions mapping between logical linear indices, per-axis
//! coordinates and storage positions. The logical traversal order is
//! column-major: axis 0 varies fastest.

use crate::error::{dimensionality, out_of_range, Result};

/// Array index type
pub type Ix = usize;
/// Array index type (signed)
pub type Ixs = isize;

/// Return the number of elements of an array of shape `shape`.
///
/// The empty product is 1; any zero-length axis makes the size 0.
#[inline]
pub fn linear_size(shape: &[Ix]) -> Ix {
    shape.iter().product()
}

/// Return the strides of a freshly allocated, contiguous column-major array:
/// `strides[0] = 1`, `strides[k] = strides[k - 1] * shape[k - 1]`.
pub fn default_strides(shape: &[Ix]) -> Box<[Ixs]> {
    let mut strides = Vec::with_capacity(shape.len());
    let mut cum_prod: Ixs = 1;
    for &d in shape {
        strides.push(cum_prod);
        cum_prod *= d as Ixs;
    }
    strides.into_boxed_slice()
}

/// Return `true` if the shape describes a vector: one axis, or exactly one
/// axis longer than 1.
pub fn is_vector(shape: &[Ix]) -> bool {
    shape.len() == 1 || shape.iter().filter(|&&d| d > 1).count() == 1
}

/// Return `true` if traversing the logical indices in order visits storage
/// positions in unbroken increasing order.
///
/// Axes of length 1 do not take part in the traversal and their strides are
/// ignored. Empty arrays are contiguous.
pub fn is_contiguous(shape: &[Ix], strides: &[Ixs]) -> bool {
    debug_assert_eq!(shape.len(), strides.len());
    if linear_size(shape) == 0 {
        return true;
    }
    let mut expected: Ixs = 1;
    for (&d, &s) in shape.iter().zip(strides) {
        if d != 1 && s != expected {
            return false;
        }
        expected *= d as Ixs;
    }
    true
}

/// Return the storage position of the element at `coords`:
/// `offset + Σ coords[k] * strides[k]`.
///
/// **Errors** if the number of coordinates differs from the number of axes
/// or a coordinate lies outside `[0, shape[k])`.
pub fn to_linear(coords: &[Ix], shape: &[Ix], strides: &[Ixs], offset: usize) -> Result<usize> {
    if coords.len() != shape.len() {
        return Err(dimensionality(shape.len(), coords.len()));
    }
    let mut pos = offset as Ixs;
    for ((&c, &d), &s) in coords.iter().zip(shape).zip(strides) {
        if c >= d {
            return Err(out_of_range(c, d));
        }
        pos += c as Ixs * s;
    }
    Ok(pos as usize)
}

/// Return the coordinates of logical linear index `index` under column-major
/// traversal of `shape`.
///
/// **Errors** if `index` is not less than the size of the shape.
pub fn from_linear(index: Ix, shape: &[Ix]) -> Result<Vec<Ix>> {
    let size = linear_size(shape);
    if index >= size {
        return Err(out_of_range(index, size));
    }
    let mut rest = index;
    let coords = shape
        .iter()
        .map(|&d| {
            let c = rest % d;
            rest /= d;
            c
        })
        .collect();
    Ok(coords)
}

/// Storage position of logical index `index`; the index must be in bounds.
#[inline]
pub(crate) fn storage_position(index: Ix, shape: &[Ix], strides: &[Ixs], offset: usize) -> usize {
    debug_assert!(index < linear_size(shape));
    match shape.len() {
        1 => (offset as Ixs + index as Ixs * strides[0]) as usize,
        2 => {
            let (i, j) = (index % shape[0], index / shape[0]);
            (offset as Ixs + i as Ixs * strides[0] + j as Ixs * strides[1]) as usize
        }
        _ => {
            let mut rest = index;
            let mut pos = offset as Ixs;
            for (&d, &s) in shape.iter().zip(strides) {
                pos += (rest % d) as Ixs * s;
                rest /= d;
            }
            pos as usize
        }
    }
}

/// Return the lowest and highest storage positions reachable from `offset`
/// through `shape` and `strides`, or `None` for an empty shape.
pub(crate) fn storage_span(shape: &[Ix], strides: &[Ixs], offset: usize) -> Option<(Ixs, Ixs)> {
    if linear_size(shape) == 0 {
        return None;
    }
    let mut low = offset as Ixs;
    let mut high = offset as Ixs;
    for (&d, &s) in shape.iter().zip(strides) {
        let reach = (d as Ixs - 1) * s;
        if reach < 0 {
            low += reach;
        } else {
            high += reach;
        }
    }
    Some((low, high))
}

/// Storage positions of an array's elements, in logical order.
///
/// Walks the coordinates like an odometer, axis 0 fastest, so each step is
/// an addition instead of a division per axis.
#[derive(Clone, Debug)]
pub(crate) struct Positions {
    shape: Box<[Ix]>,
    strides: Box<[Ixs]>,
    coords: Vec<Ix>,
    pos: Ixs,
    remaining: usize,
}

impl Positions {
    pub(crate) fn new(shape: &[Ix], strides: &[Ixs], offset: usize) -> Self {
        Positions {
            shape: shape.into(),
            strides: strides.into(),
            coords: vec![0; shape.len()],
            pos: offset as Ixs,
            remaining: linear_size(shape),
        }
    }

    fn step(&mut self) {
        for k in 0..self.shape.len() {
            self.coords[k] += 1;
            self.pos += self.strides[k];
            if self.coords[k] < self.shape[k] {
                return;
            }
            self.pos -= self.strides[k] * self.shape[k] as Ixs;
            self.coords[k] = 0;
        }
    }
}

impl Iterator for Positions {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.pos as usize;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.step();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Positions {}
