// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Derived arrays.
//!
//! Everything in the first impl block returns a view over the same storage;
//! the selection methods in the second copy, because the positions they pick
//! cannot be described by one stride per axis.

use crate::element::Element;
use crate::error::{dimensionality, incompatible_shape, non_conformant, out_of_range, Result};
use crate::geometry;
use crate::storage::Storage;
use crate::{ArrayBase, BooleanArray, Ix, Ixs, Slice};

/// # Views
impl<A, S> ArrayBase<S>
where
    S: Storage<Elem = A>,
    A: Element,
{
    /// Return a transposed view of the array: shape and strides reversed, no
    /// data moved.
    ///
    /// ```
    /// use ndframe::IntArray;
    ///
    /// let a = IntArray::from_shape_vec(&[2, 3], vec![1, 4, 2, 5, 3, 6]).unwrap();
    /// let t = a.transpose();
    /// assert_eq!(t.shape(), &[3, 2]);
    /// assert_eq!(t.get_ij(2, 1).unwrap(), 6);
    /// ```
    pub fn transpose(&self) -> Self {
        let shape: Box<[Ix]> = self.shape.iter().rev().copied().collect();
        let strides: Box<[Ixs]> = self.strides.iter().rev().copied().collect();
        self.with_layout(self.offset, shape, strides)
    }

    /// Alias for `transpose`.
    pub fn t(&self) -> Self {
        self.transpose()
    }

    /// Return a view of the same elements with a different shape.
    ///
    /// Logical linear order is preserved: `a.reshape(s)?.get(i) == a.get(i)`.
    ///
    /// **Errors** with `IncompatibleShape` if the sizes differ, or if the
    /// array is not contiguous (a reshape never copies; use
    /// [`.copy()`](Self::copy) first).
    pub fn reshape(&self, shape: &[Ix]) -> Result<Self> {
        if geometry::linear_size(shape) != self.len() || !self.is_contiguous() {
            return Err(incompatible_shape(&self.shape, shape));
        }
        Ok(self.with_layout(self.offset, shape.into(), geometry::default_strides(shape)))
    }

    /// Return a one-dimensional view of row `i` of a matrix.
    ///
    /// ```
    /// use ndframe::ArrayFactory;
    ///
    /// let bj = ArrayFactory::new();
    /// let a = bj.from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
    /// let mut row = a.get_row(1).unwrap();
    /// assert_eq!(row.to_vec(), vec![4, 5, 6]);
    /// row.set(0, 99).unwrap();
    /// assert_eq!(a.get_ij(1, 0).unwrap(), 99);
    /// ```
    pub fn get_row(&self, i: Ix) -> Result<Self> {
        self.expect_matrix()?;
        if i >= self.shape[0] {
            return Err(out_of_range(i, self.shape[0]));
        }
        let offset = self.offset as Ixs + i as Ixs * self.strides[0];
        Ok(self.with_layout(offset as usize, [self.shape[1]].into(), [self.strides[1]].into()))
    }

    /// Return a one-dimensional view of column `j` of a matrix.
    pub fn get_column(&self, j: Ix) -> Result<Self> {
        self.expect_matrix()?;
        if j >= self.shape[1] {
            return Err(out_of_range(j, self.shape[1]));
        }
        let offset = self.offset as Ixs + j as Ixs * self.strides[1];
        Ok(self.with_layout(offset as usize, [self.shape[0]].into(), [self.strides[0]].into()))
    }

    /// Return the diagonal.
    ///
    /// For a matrix, a view of the main diagonal. For a vector, a new square
    /// matrix with the vector on its diagonal and the default value elsewhere;
    /// this is the one diagonal operation that allocates.
    pub fn get_diagonal(&self) -> Result<Self> {
        match self.ndim() {
            2 => {
                let n = self.shape[0].min(self.shape[1]);
                let stride = self.strides[0] + self.strides[1];
                Ok(self.with_layout(self.offset, [n].into(), [stride].into()))
            }
            1 => {
                let n = self.shape[0];
                let mut diag = Self::default(&[n, n]);
                for (i, elt) in self.iter().enumerate() {
                    diag.set_ij(i, i, elt)?;
                }
                Ok(diag)
            }
            found => Err(dimensionality(2, found)),
        }
    }

    /// Return a view of the `rows × cols` block of a matrix whose upper left
    /// corner is at (`row`, `col`).
    pub fn block(&self, row: Ix, col: Ix, rows: Ix, cols: Ix) -> Result<Self> {
        self.expect_matrix()?;
        if row + rows > self.shape[0] {
            return Err(out_of_range(row + rows, self.shape[0]));
        }
        if col + cols > self.shape[1] {
            return Err(out_of_range(col + cols, self.shape[1]));
        }
        let offset = self.offset as Ixs + row as Ixs * self.strides[0] + col as Ixs * self.strides[1];
        Ok(self.with_layout(offset as usize, [rows, cols].into(), self.strides.clone()))
    }

    /// Return a view sliced along each axis.
    ///
    /// `slices` holds one [`Slice`] per axis, starting at axis 0; axes beyond
    /// the end of `slices` are taken whole. Negative steps reverse an axis.
    ///
    /// **Errors** if there are more slices than axes, or if a slice bound is
    /// out of range.
    ///
    /// ```
    /// use ndframe::{IntArray, Slice};
    ///
    /// let a = IntArray::from_vec((0..10).collect());
    /// let s = a.slice(&[Slice::from(1..8).step_by(3)]).unwrap();
    /// assert_eq!(s.to_vec(), vec![1, 4, 7]);
    /// let r = a.slice(&[Slice::from(..).step_by(-4)]).unwrap();
    /// assert_eq!(r.to_vec(), vec![9, 5, 1]);
    /// ```
    pub fn slice(&self, slices: &[Slice]) -> Result<Self> {
        if slices.len() > self.ndim() {
            return Err(dimensionality(self.ndim(), slices.len()));
        }
        let mut offset = self.offset as Ixs;
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        for (axis, slice) in slices.iter().enumerate() {
            let (delta, len, stride) = slice.resolve(shape[axis], strides[axis])?;
            offset += delta;
            shape[axis] = len;
            strides[axis] = stride;
        }
        if geometry::linear_size(&shape) == 0 {
            offset = self.offset as Ixs;
        }
        Ok(self.with_layout(offset as usize, shape, strides))
    }

    /// Return a view sliced along `axis` only.
    pub fn slice_axis(&self, axis: usize, slice: Slice) -> Result<Self> {
        if axis >= self.ndim() {
            return Err(out_of_range(axis, self.ndim()));
        }
        let mut slices = vec![Slice::from(..); axis + 1];
        slices[axis] = slice;
        self.slice(&slices)
    }

    /// Return the elements as a one-dimensional array in logical order: a
    /// view when the array is contiguous, a copy otherwise.
    pub fn flatten(&self) -> Self {
        let len = self.len();
        if self.is_contiguous() {
            self.with_layout(self.offset, [len].into(), [1].into())
        } else {
            Self::from_vec(self.to_vec())
        }
    }

    fn expect_matrix(&self) -> Result<()> {
        if self.ndim() == 2 {
            Ok(())
        } else {
            Err(dimensionality(2, self.ndim()))
        }
    }
}

/// # Selection
impl<A, S> ArrayBase<S>
where
    S: Storage<Elem = A>,
    A: Element,
{
    /// Return a copy of the subarrays at `indices` along `axis`, in the
    /// order given. Indices may repeat.
    ///
    /// ```
    /// use ndframe::ArrayFactory;
    ///
    /// let bj = ArrayFactory::new();
    /// let a = bj.from_rows(&[[1, 2], [3, 4], [5, 6]]).unwrap();
    /// let s = a.select(0, &[2, 0]).unwrap();
    /// assert_eq!(s, bj.from_rows(&[[5, 6], [1, 2]]).unwrap());
    /// ```
    pub fn select(&self, axis: usize, indices: &[Ix]) -> Result<Self> {
        let extent = self.size_of(axis)?;
        if let Some(&bad) = indices.iter().find(|&&i| i >= extent) {
            return Err(out_of_range(bad, extent));
        }
        let mut shape = self.shape.clone();
        shape[axis] = indices.len();
        let len = geometry::linear_size(&shape);
        let mut elems = Vec::with_capacity(len);
        for i in 0..len {
            let mut coords = geometry::from_linear(i, &shape)?;
            coords[axis] = indices[coords[axis]];
            let pos = geometry::to_linear(&coords, &self.shape, &self.strides, self.offset)?;
            elems.push(self.read(pos));
        }
        Ok(Self::from_storage(S::from_vec(elems), &shape))
    }

    /// Return a one-dimensional copy of the elements at the given logical
    /// linear indices.
    pub fn take(&self, indices: &[Ix]) -> Result<Self> {
        let elems = indices
            .iter()
            .map(|&i| self.get(i))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_vec(elems))
    }

    /// Return a one-dimensional copy of the elements whose mask entry is
    /// `true`, in logical order.
    ///
    /// **Errors** with `NonConformantShape` if the mask shape differs.
    pub fn mask(&self, mask: &BooleanArray) -> Result<Self> {
        if mask.shape() != self.shape() {
            return Err(non_conformant(&self.shape, mask.shape()));
        }
        let elems = self
            .iter()
            .zip(mask.iter())
            .filter_map(|(elt, keep)| if keep { Some(elt) } else { None })
            .collect();
        Ok(Self::from_vec(elems))
    }
}
