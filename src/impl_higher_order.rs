// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::element::Element;
use crate::error::{dimensionality, non_conformant, Result};
use crate::storage::{Buffer, Storage};
use crate::{Array, ArrayBase, BooleanArray, Ix};

/// Return `true` if two arrays may be combined element by element: equal
/// shapes, or two vectors of the same length.
pub(crate) fn conformant(lhs: &[Ix], rhs: &[Ix]) -> bool {
    lhs == rhs
        || (crate::geometry::is_vector(lhs)
            && crate::geometry::is_vector(rhs)
            && crate::geometry::linear_size(lhs) == crate::geometry::linear_size(rhs))
}

/// # Element-wise operations
///
/// All of these traverse logical indices `0..len()` and translate each one
/// through the strides, so they behave the same on views and on arrays that
/// own their buffer. Closures never run while the storage is borrowed; they
/// may read other arrays that share it.
impl<A, S> ArrayBase<S>
where
    S: Storage<Elem = A>,
    A: Element,
{
    /// Set every element to `value`.
    pub fn assign(&mut self, value: A) {
        for pos in self.positions() {
            self.write(pos, value.clone());
        }
    }

    /// Copy the elements of `rhs` into `self`, in logical order.
    ///
    /// `rhs` may share storage with `self`, even overlapping it; it is read
    /// completely before the first write.
    ///
    /// **Errors** with `NonConformantShape` unless the shapes are equal or
    /// both arrays are vectors of equal length.
    pub fn assign_from<S2>(&mut self, rhs: &ArrayBase<S2>) -> Result<()>
    where
        S2: Storage<Elem = A>,
    {
        if !conformant(&self.shape, &rhs.shape) {
            return Err(non_conformant(&self.shape, &rhs.shape));
        }
        let src = rhs.to_vec();
        for (pos, elt) in self.positions().zip(src) {
            self.write(pos, elt);
        }
        Ok(())
    }

    /// Set every element to `f(i)`, where `i` is its logical linear index.
    pub fn assign_with<F>(&mut self, mut f: F)
    where
        F: FnMut(Ix) -> A,
    {
        for (i, pos) in self.positions().enumerate() {
            let value = f(i);
            self.write(pos, value);
        }
    }

    /// Replace every element `x` with `f(x)`.
    pub fn map_inplace<F>(&mut self, mut f: F)
    where
        F: FnMut(A) -> A,
    {
        for pos in self.positions() {
            let value = f(self.read(pos));
            self.write(pos, value);
        }
    }

    /// Alias for `map_inplace`.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnMut(A) -> A,
    {
        self.map_inplace(f)
    }

    /// Return a new array of the same shape with `f` applied to each element.
    ///
    /// The element kind may change:
    ///
    /// ```
    /// use ndframe::DoubleArray;
    ///
    /// let a = DoubleArray::from_vec(vec![0.5, 1.5, 2.5]);
    /// let b = a.map(|x| x > 1.);
    /// assert_eq!(b.to_vec(), vec![false, true, true]);
    /// ```
    pub fn map<B, F>(&self, f: F) -> Array<B>
    where
        B: Element,
        F: FnMut(A) -> B,
    {
        let elems: Vec<B> = self.iter().map(f).collect();
        ArrayBase::from_storage(Buffer::from_vec(elems), &self.shape)
    }

    /// Return a one-dimensional copy of the elements for which `pred`
    /// returns `true`, in logical order.
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&A) -> bool,
    {
        Self::from_vec(self.iter().filter(|x| pred(x)).collect())
    }

    /// Return a boolean array of the same shape holding `pred` of each
    /// element.
    pub fn satisfies<F>(&self, mut pred: F) -> BooleanArray
    where
        F: FnMut(&A) -> bool,
    {
        self.map(|x| pred(&x))
    }

    /// Fold the elements in logical order.
    pub fn reduce<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, A) -> B,
    {
        self.iter().fold(init, f)
    }

    /// Call `f` on each element in logical order.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(A),
    {
        self.iter().for_each(f)
    }

    /// Reduce each row of a matrix to one element; returns a vector with one
    /// element per row.
    pub fn reduce_rows<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&Self) -> A,
    {
        if !self.is_matrix() {
            return Err(dimensionality(2, self.ndim()));
        }
        let elems = (0..self.rows())
            .map(|i| self.get_row(i).map(|row| f(&row)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_vec(elems))
    }

    /// Reduce each column of a matrix to one element; returns a vector with
    /// one element per column.
    pub fn reduce_columns<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&Self) -> A,
    {
        if !self.is_matrix() {
            return Err(dimensionality(2, self.ndim()));
        }
        let elems = (0..self.columns())
            .map(|j| self.get_column(j).map(|col| f(&col)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_vec(elems))
    }

    /// Return a new array with `f` applied to pairs of elements of `self`
    /// and `rhs` at the same logical index.
    ///
    /// **Errors** with `NonConformantShape` unless the shapes are equal or
    /// both arrays are vectors of equal length. The result has the shape of
    /// `self`.
    pub fn zip_with<S2, B, F>(&self, rhs: &ArrayBase<S2>, mut f: F) -> Result<Self>
    where
        S2: Storage<Elem = B>,
        B: Element,
        F: FnMut(A, B) -> A,
    {
        if !conformant(&self.shape, &rhs.shape) {
            return Err(non_conformant(&self.shape, &rhs.shape));
        }
        let elems = self.iter().zip(rhs.iter()).map(|(a, b)| f(a, b)).collect();
        Ok(Self::from_storage(S::from_vec(elems), &self.shape))
    }
}
