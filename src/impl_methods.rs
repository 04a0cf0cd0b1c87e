// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::element::Element;
use crate::error::{dimensionality, incompatible_shape, out_of_range, Result};
use crate::geometry::{self, Positions};
use crate::iterators::Iter;
use crate::storage::Storage;
use crate::{ArrayBase, Ix, Ixs};

/// # Construction
impl<A, S> ArrayBase<S>
where
    S: Storage<Elem = A>,
    A: Element,
{
    /// Assemble an array from its parts without validation.
    #[inline]
    pub(crate) fn from_parts(
        data: Rc<RefCell<S>>,
        offset: usize,
        shape: Box<[Ix]>,
        strides: Box<[Ixs]>,
        view: bool,
    ) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        ArrayBase {
            data,
            offset,
            shape,
            strides,
            view,
        }
    }

    /// Wrap `storage` as a fresh, contiguous column-major array of `shape`.
    pub(crate) fn from_storage(storage: S, shape: &[Ix]) -> Self {
        debug_assert_eq!(storage.len(), geometry::linear_size(shape));
        Self::from_parts(
            Rc::new(RefCell::new(storage)),
            0,
            shape.into(),
            geometry::default_strides(shape),
            false,
        )
    }

    /// Create an array of `shape` with every element set to the element
    /// kind's default value.
    #[allow(clippy::should_implement_trait)]
    pub fn default(shape: &[Ix]) -> Self {
        Self::from_storage(S::allocate(geometry::linear_size(shape)), shape)
    }

    /// Create an array of `shape` with every element set to `elem`.
    pub fn from_elem(shape: &[Ix], elem: A) -> Self {
        let v = vec![elem; geometry::linear_size(shape)];
        Self::from_storage(S::from_vec(v), shape)
    }

    /// Create a one-dimensional array from a vector (no copying needed).
    pub fn from_vec(v: Vec<A>) -> Self {
        let len = v.len();
        Self::from_storage(S::from_vec(v), &[len])
    }

    /// Create an array of `shape` from a vector of elements in column-major
    /// (logical) order.
    ///
    /// **Errors** with `IncompatibleShape` if the vector length differs from
    /// the size of the shape.
    pub fn from_shape_vec(shape: &[Ix], v: Vec<A>) -> Result<Self> {
        if v.len() != geometry::linear_size(shape) {
            return Err(incompatible_shape(&[v.len()], shape));
        }
        Ok(Self::from_storage(S::from_vec(v), shape))
    }

    /// Return a new array over the same storage with the given layout.
    ///
    /// `offset`, `shape` and `strides` are absolute: they address the shared
    /// storage directly, not this array's logical elements.
    ///
    /// **Errors** if the lengths of `shape` and `strides` differ, or if any
    /// element of the new layout falls outside the storage.
    pub fn as_view(&self, offset: usize, shape: &[Ix], strides: &[Ixs]) -> Result<Self> {
        if shape.len() != strides.len() {
            return Err(dimensionality(shape.len(), strides.len()));
        }
        let len = self.data.borrow().len();
        if let Some((low, high)) = geometry::storage_span(shape, strides, offset) {
            if low < 0 {
                return Err(out_of_range(low.unsigned_abs(), len));
            }
            if high as usize >= len {
                return Err(out_of_range(high as usize, len));
            }
        }
        Ok(self.with_layout(offset, shape.into(), strides.into()))
    }

    /// Return a view with the given layout; caller guarantees it stays within
    /// the storage.
    #[inline]
    pub(crate) fn with_layout(&self, offset: usize, shape: Box<[Ix]>, strides: Box<[Ixs]>) -> Self {
        Self::from_parts(self.data.clone(), offset, shape, strides, true)
    }

    /// Return a view of the whole array.
    pub fn view(&self) -> Self {
        self.with_layout(self.offset, self.shape.clone(), self.strides.clone())
    }

    /// Return a fresh array of `shape` with default-valued elements and
    /// storage of the same kind as `self`.
    pub fn new_empty(&self, shape: &[Ix]) -> Self {
        Self::default(shape)
    }

    /// Return a deep copy: a new, contiguous, non-view array holding the
    /// logical contents of `self`.
    ///
    /// ```
    /// use ndframe::DoubleArray;
    ///
    /// let mut a = DoubleArray::from_vec(vec![1., 1., 1., 1.]);
    /// let b = a.copy();
    /// a.set(0, 1000.).unwrap();
    /// assert_eq!(b.get(0).unwrap(), 1.);
    /// assert!(!b.is_view());
    /// ```
    pub fn copy(&self) -> Self {
        Self::from_storage(S::from_vec(self.to_vec()), &self.shape)
    }
}

/// # Layout
impl<A, S> ArrayBase<S>
where
    S: Storage<Elem = A>,
    A: Element,
{
    /// Return the shape of the array.
    #[inline]
    pub fn shape(&self) -> &[Ix] {
        &self.shape
    }

    /// Return the strides of the array, in storage slots per unit step along
    /// each axis.
    #[inline]
    pub fn strides(&self) -> &[Ixs] {
        &self.strides
    }

    /// Return the extent of `axis`.
    ///
    /// **Errors** if the axis does not exist.
    pub fn size_of(&self, axis: usize) -> Result<Ix> {
        self.shape
            .get(axis)
            .copied()
            .ok_or_else(|| out_of_range(axis, self.ndim()))
    }

    /// Return the stride of `axis`.
    ///
    /// **Errors** if the axis does not exist.
    pub fn stride_of(&self, axis: usize) -> Result<Ixs> {
        self.strides
            .get(axis)
            .copied()
            .ok_or_else(|| out_of_range(axis, self.ndim()))
    }

    /// Return the storage position of logical index 0.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Return the number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Return the total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        geometry::linear_size(&self.shape)
    }

    /// Alias for `len`.
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the number of rows: the extent of axis 0 (1 for a 0-d array).
    pub fn rows(&self) -> Ix {
        self.shape.first().copied().unwrap_or(1)
    }

    /// Return the number of columns: the extent of axis 1 (1 for arrays with
    /// fewer than two axes).
    pub fn columns(&self) -> Ix {
        self.shape.get(1).copied().unwrap_or(1)
    }

    /// Return the stride governing the outermost traversal unit: the stride
    /// of the last axis. For a column-major matrix this is the distance
    /// between the starts of successive columns.
    pub fn major_stride(&self) -> Ixs {
        self.strides.last().copied().unwrap_or(1)
    }

    /// Return `true` if the array has one axis, or exactly one axis longer
    /// than 1.
    pub fn is_vector(&self) -> bool {
        geometry::is_vector(&self.shape)
    }

    /// Return `true` if the array has two axes.
    pub fn is_matrix(&self) -> bool {
        self.ndim() == 2
    }

    /// Return `true` if the array has two axes of equal extent.
    pub fn is_square(&self) -> bool {
        self.is_matrix() && self.shape[0] == self.shape[1]
    }

    /// Return `true` if this array was derived from another array and does
    /// not own a dedicated buffer.
    #[inline]
    pub fn is_view(&self) -> bool {
        self.view
    }

    /// Return `true` if traversing logical indices visits storage positions
    /// in unbroken increasing order.
    ///
    /// This is the precondition for handing the array to a native routine as
    /// a flat run of `len()` slots starting at `offset()`.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        geometry::is_contiguous(&self.shape, &self.strides)
    }

    /// Return `true` if `self` and `other` address the same storage buffer.
    pub fn shares_storage_with<S2>(&self, other: &ArrayBase<S2>) -> bool {
        Rc::as_ptr(&self.data) as *const () == Rc::as_ptr(&other.data) as *const ()
    }

    /// Return a borrow of the elements as a slice, if the array is
    /// contiguous.
    ///
    /// The storage stays borrowed while the returned guard lives; writing to
    /// the array (or any array sharing its storage) meanwhile panics.
    pub fn as_slice(&self) -> Option<Ref<'_, [A]>> {
        if !self.is_contiguous() {
            return None;
        }
        let (start, end) = (self.offset, self.offset + self.len());
        Some(Ref::map(self.data.borrow(), |s| &s.as_slice()[start..end]))
    }

}

impl<S: Storage> ArrayBase<S> {
    #[inline]
    pub(crate) fn position(&self, index: Ix) -> usize {
        geometry::storage_position(index, &self.shape, &self.strides, self.offset)
    }

    /// Storage positions of the elements, in logical order.
    pub(crate) fn positions(&self) -> Positions {
        Positions::new(&self.shape, &self.strides, self.offset)
    }
}

/// # Element access
impl<A, S> ArrayBase<S>
where
    S: Storage<Elem = A>,
    A: Element,
{
    /// Return the element at logical linear index `index`.
    ///
    /// **Errors** if `index >= len()`.
    pub fn get(&self, index: Ix) -> Result<A> {
        self.check_linear(index)?;
        Ok(self.read(self.position(index)))
    }

    /// Set the element at logical linear index `index`.
    ///
    /// **Errors** if `index >= len()`.
    pub fn set(&mut self, index: Ix, value: A) -> Result<()> {
        self.check_linear(index)?;
        let pos = self.position(index);
        self.write(pos, value);
        Ok(())
    }

    /// Return the element at row `i`, column `j` of a two-dimensional array.
    pub fn get_ij(&self, i: Ix, j: Ix) -> Result<A> {
        let pos = self.position_ij(i, j)?;
        Ok(self.read(pos))
    }

    /// Set the element at row `i`, column `j` of a two-dimensional array.
    pub fn set_ij(&mut self, i: Ix, j: Ix, value: A) -> Result<()> {
        let pos = self.position_ij(i, j)?;
        self.write(pos, value);
        Ok(())
    }

    /// Return the element at the given coordinates, one per axis.
    pub fn get_index(&self, coords: &[Ix]) -> Result<A> {
        let pos = geometry::to_linear(coords, &self.shape, &self.strides, self.offset)?;
        Ok(self.read(pos))
    }

    /// Set the element at the given coordinates, one per axis.
    pub fn set_index(&mut self, coords: &[Ix], value: A) -> Result<()> {
        let pos = geometry::to_linear(coords, &self.shape, &self.strides, self.offset)?;
        self.write(pos, value);
        Ok(())
    }

    /// Swap the elements at logical linear indices `a` and `b`.
    pub fn swap(&mut self, a: Ix, b: Ix) -> Result<()> {
        self.check_linear(a)?;
        self.check_linear(b)?;
        let (pa, pb) = (self.position(a), self.position(b));
        self.data.borrow_mut().as_mut_slice().swap(pa, pb);
        Ok(())
    }

    /// Return an iterator over the elements in logical order.
    pub fn iter(&self) -> Iter<'_, S> {
        Iter::new(self)
    }

    /// Return the elements in logical order.
    pub fn to_vec(&self) -> Vec<A> {
        let data = self.data.borrow();
        self.positions().map(|pos| data.get(pos)).collect()
    }

    #[inline]
    fn check_linear(&self, index: Ix) -> Result<()> {
        let len = self.len();
        if index >= len {
            Err(out_of_range(index, len))
        } else {
            Ok(())
        }
    }

    fn position_ij(&self, i: Ix, j: Ix) -> Result<usize> {
        if self.ndim() != 2 {
            return Err(dimensionality(2, self.ndim()));
        }
        geometry::to_linear(&[i, j], &self.shape, &self.strides, self.offset)
    }

    #[inline]
    pub(crate) fn read(&self, pos: usize) -> A {
        self.data.borrow().get(pos)
    }

    #[inline]
    pub(crate) fn write(&self, pos: usize, value: A) {
        self.data.borrow_mut().set(pos, value)
    }
}
