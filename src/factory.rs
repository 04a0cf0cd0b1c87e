// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Array construction.

use num_traits::Float;

use crate::element::Element;
use crate::error::{dimensionality, incompatible_shape, Result};
use crate::linalg::{Op, Portable, Routines};
use crate::storage::Storage;
use crate::{
    Array, ArrayBase, BooleanArray, ComplexArray, DoubleArray, IntArray, Ix, LinalgScalar, LongArray, ReferenceArray,
};

/// Allocates arrays and carries the routine set used for linear algebra.
///
/// The factory is the single place where the routine implementation is
/// chosen: [`ArrayFactory::new()`] uses the portable loops, and with the
/// `blas` crate feature [`ArrayFactory::blas()`] uses the C BLAS where operand
/// layout permits. Arrays themselves do not know which was chosen.
///
/// Every allocation is a fresh, contiguous column-major array that owns its
/// buffer.
///
/// ```
/// use ndframe::ArrayFactory;
///
/// let bj = ArrayFactory::new();
/// let a = bj.from_rows(&[[1., 2.], [3., 4.]]).unwrap();
/// let b = bj.eye::<f64>(2);
/// assert_eq!(bj.matmul(&a, &b).unwrap(), a);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct ArrayFactory<R = Portable> {
    routines: R,
}

impl ArrayFactory<Portable> {
    /// Create a factory using the portable routines.
    pub fn new() -> Self {
        ArrayFactory { routines: Portable }
    }
}

#[cfg(feature = "blas")]
impl ArrayFactory<crate::linalg::Cblas> {
    /// Create a factory using the C BLAS routines.
    pub fn blas() -> Self {
        ArrayFactory {
            routines: crate::linalg::Cblas,
        }
    }
}

impl<R: Routines> ArrayFactory<R> {
    /// Create a factory using `routines`.
    pub fn with_routines(routines: R) -> Self {
        ArrayFactory { routines }
    }

    /// Return the routine set bound to this factory.
    pub fn routines(&self) -> &R {
        &self.routines
    }

    /// Create an array of `shape` filled with zeros.
    pub fn zeros<A: LinalgScalar>(&self, shape: &[Ix]) -> Array<A> {
        ArrayBase::from_elem(shape, A::zero())
    }

    /// Create an array of `shape` filled with ones.
    pub fn ones<A: LinalgScalar>(&self, shape: &[Ix]) -> Array<A> {
        ArrayBase::from_elem(shape, A::one())
    }

    /// Create an array of `shape` filled with `value`.
    pub fn filled<A: Element>(&self, shape: &[Ix], value: A) -> Array<A> {
        ArrayBase::from_elem(shape, value)
    }

    /// Alias for `filled`.
    pub fn from_elem<A: Element>(&self, shape: &[Ix], value: A) -> Array<A> {
        self.filled(shape, value)
    }

    pub fn double_array(&self, shape: &[Ix]) -> DoubleArray {
        ArrayBase::default(shape)
    }

    pub fn int_array(&self, shape: &[Ix]) -> IntArray {
        ArrayBase::default(shape)
    }

    pub fn long_array(&self, shape: &[Ix]) -> LongArray {
        ArrayBase::default(shape)
    }

    /// Create a boolean array of `shape` filled with `false`.
    pub fn boolean_array(&self, shape: &[Ix]) -> BooleanArray {
        ArrayBase::default(shape)
    }

    pub fn complex_array(&self, shape: &[Ix]) -> ComplexArray {
        ArrayBase::default(shape)
    }

    /// Create a reference array of `shape` whose slots all read as `None`.
    pub fn reference_array<T>(&self, shape: &[Ix]) -> ReferenceArray<T>
    where
        Option<T>: Element,
    {
        ArrayBase::default(shape)
    }

    /// Create a one-dimensional array from a vector.
    pub fn from_vec<A: Element>(&self, v: Vec<A>) -> Array<A> {
        ArrayBase::from_vec(v)
    }

    /// Create an array of `shape` from elements in column-major order.
    pub fn from_shape_vec<A: Element>(&self, shape: &[Ix], v: Vec<A>) -> Result<Array<A>> {
        ArrayBase::from_shape_vec(shape, v)
    }

    /// Create a matrix from rows given in reading order; the result is
    /// stored column-major.
    ///
    /// **Errors** with `IncompatibleShape` if the rows differ in length.
    ///
    /// ```
    /// use ndframe::ArrayFactory;
    ///
    /// let a = ArrayFactory::new().from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
    /// assert_eq!(a.shape(), &[2, 3]);
    /// assert_eq!(a.get(1).unwrap(), 4);
    /// ```
    pub fn from_rows<A, V>(&self, rows: &[V]) -> Result<Array<A>>
    where
        A: Element,
        V: AsRef<[A]>,
    {
        let n = rows.len();
        let m = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some(bad) = rows.iter().find(|r| r.as_ref().len() != m) {
            return Err(incompatible_shape(&[bad.as_ref().len()], &[n, m]));
        }
        let mut elems = Vec::with_capacity(n * m);
        for j in 0..m {
            for row in rows {
                elems.push(row.as_ref()[j].clone());
            }
        }
        ArrayBase::from_shape_vec(&[n, m], elems)
    }

    /// Return the integers from `start` towards `end` (exclusive) in steps of
    /// `step`.
    ///
    /// **Panics** if `step` is zero.
    ///
    /// ```
    /// use ndframe::ArrayFactory;
    ///
    /// let bj = ArrayFactory::new();
    /// assert_eq!(bj.range(0, 10, 3).to_vec(), vec![0, 3, 6, 9]);
    /// assert_eq!(bj.range(5, 0, -2).to_vec(), vec![5, 3, 1]);
    /// assert!(bj.range(3, 0, 1).is_empty());
    /// ```
    pub fn range(&self, start: i32, end: i32, step: i32) -> IntArray {
        assert_ne!(step, 0, "range: step must be nonzero");
        let span = i64::from(end) - i64::from(start);
        let step64 = i64::from(step);
        let len = if span == 0 || (span > 0) != (step > 0) {
            0
        } else {
            ((span.abs() + step64.abs() - 1) / step64.abs()) as usize
        };
        // every element lies between start and end, so narrowing is exact
        let elems = (0..len as i64)
            .map(|i| (i64::from(start) + i * step64) as i32)
            .collect();
        ArrayBase::from_vec(elems)
    }

    /// Return `n` evenly spaced values from `start` to `end`, both included.
    ///
    /// ```
    /// use ndframe::ArrayFactory;
    ///
    /// let a = ArrayFactory::new().linspace(0., 1., 5);
    /// assert_eq!(a.to_vec(), vec![0., 0.25, 0.5, 0.75, 1.]);
    /// ```
    pub fn linspace(&self, start: f64, end: f64, n: usize) -> DoubleArray {
        let step = if n > 1 { (end - start) / (n - 1) as f64 } else { 0. };
        let elems = (0..n)
            .map(|i| if i + 1 == n && n > 1 { end } else { start + step * i as f64 })
            .collect();
        ArrayBase::from_vec(elems)
    }

    /// Return the `n × n` identity matrix.
    pub fn eye<A: LinalgScalar>(&self, n: Ix) -> Array<A> {
        let eye = self.zeros(&[n, n]);
        if let Ok(mut d) = eye.get_diagonal() {
            d.assign(A::one());
        }
        eye
    }

    /// Return a square matrix with `v` on its diagonal, or the diagonal view
    /// of `v` if it is a matrix.
    pub fn diag<A, S>(&self, v: &ArrayBase<S>) -> Result<ArrayBase<S>>
    where
        A: Element,
        S: Storage<Elem = A>,
    {
        match v.ndim() {
            1 | 2 => v.get_diagonal(),
            found => Err(dimensionality(1, found)),
        }
    }

    /// Return the matrix product `a · b` computed with the factory's routines.
    pub fn matmul<A: LinalgScalar>(&self, a: &Array<A>, b: &Array<A>) -> Result<Array<A>> {
        let mut c = self.zeros(&[a.rows(), b.columns()]);
        self.routines
            .gemm(Op::Keep, Op::Keep, A::one(), a, b, A::zero(), &mut c)?;
        Ok(c)
    }

    /// Return the dot product of two vectors computed with the factory's
    /// routines.
    pub fn dot<A: LinalgScalar>(&self, x: &Array<A>, y: &Array<A>) -> Result<A> {
        self.routines.dot(x, y)
    }

    /// Return the Euclidean norm of a vector computed with the factory's
    /// routines.
    pub fn norm2<A: LinalgScalar + Float>(&self, x: &Array<A>) -> A {
        self.routines.nrm2(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn typed_allocations_hold_defaults() {
        let bj = ArrayFactory::new();
        assert_eq!(bj.double_array(&[2, 2]).to_vec(), vec![0.; 4]);
        assert_eq!(bj.boolean_array(&[3]).to_vec(), vec![false; 3]);
        assert_eq!(bj.complex_array(&[1]).get(0).unwrap(), Complex64::new(0., 0.));
        assert_eq!(bj.reference_array::<String>(&[2]).get(1).unwrap(), None);
        assert_eq!(bj.long_array(&[2]).sum(), 0);
        assert_eq!(bj.ones::<i32>(&[2, 2]).sum(), 4);
    }

    #[test]
    fn rows_are_materialized_column_major() {
        let bj = ArrayFactory::new();
        let a = bj.from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(a.to_vec(), vec![1, 4, 2, 5, 3, 6]);
        assert!(bj.from_rows(&[vec![1, 2], vec![3]]).is_err());
        let empty = bj.from_rows::<i32, Vec<i32>>(&[]).unwrap();
        assert_eq!(empty.shape(), &[0, 0]);
    }

    #[test]
    fn identity_and_diag() {
        let bj = ArrayFactory::new();
        let eye = bj.eye::<f64>(3);
        assert_eq!(eye.sum(), 3.);
        assert_eq!(eye.get_ij(1, 1).unwrap(), 1.);
        let d = bj.diag(&bj.from_vec(vec![2, 3])).unwrap();
        assert_eq!(d, bj.from_rows(&[[2, 0], [0, 3]]).unwrap());
        assert!(bj.diag(&bj.int_array(&[1, 1, 1])).is_err());
    }

    #[test]
    fn sequences() {
        let bj = ArrayFactory::new();
        assert_eq!(bj.range(0, 4, 1).to_vec(), vec![0, 1, 2, 3]);
        assert_eq!(bj.range(0, 5, 2).to_vec(), vec![0, 2, 4]);
        assert_eq!(bj.linspace(1., 1., 1).to_vec(), vec![1.]);
        assert!(bj.linspace(0., 1., 0).is_empty());
    }

    #[test]
    fn range_near_integer_limits() {
        let bj = ArrayFactory::new();
        assert_eq!(bj.range(i32::MIN, i32::MAX, i32::MAX).to_vec(), vec![i32::MIN, -1, i32::MAX - 1]);
        assert_eq!(bj.range(i32::MAX, i32::MIN, i32::MIN).to_vec(), vec![i32::MAX, -1]);
        assert_eq!(bj.range(i32::MAX - 2, i32::MAX, 1).to_vec(), vec![i32::MAX - 2, i32::MAX - 1]);
    }

    #[test]
    #[should_panic]
    fn range_zero_step() {
        ArrayFactory::new().range(0, 3, 0);
    }
}
