// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Linear algebra routines.
//!
//! [`Routines`] is the dispatcher seam: every routine first checks shape
//! conformance, then either calls a native BLAS or walks the operands through
//! their strides. [`Portable`] always does the latter; with the `blas` crate
//! feature, [`Cblas`] calls the C BLAS for `f64` (and `Complex<f64>` for
//! `gemm`) when the operand layouts can be described to it, and otherwise
//! defers to [`Portable`]. The choice never changes a result beyond floating
//! point rounding and is never reported as an error.
//!
//! Shape errors are reported before any element is written.

use std::any::TypeId;
use std::fmt;

use num_traits::Float;

use crate::error::{dimensionality, non_conformant, Result};
use crate::{Array, Ix, LinalgScalar};

#[cfg(feature = "blas")]
mod cblas;
#[cfg(feature = "blas")]
mod layout;
mod portable;

#[cfg(feature = "blas")]
pub use self::cblas::Cblas;
pub use self::portable::Portable;

/// Transpose flag for a matrix operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Op {
    /// Use the matrix as is.
    #[default]
    Keep,
    /// Use the transpose of the matrix.
    Transpose,
}

impl Op {
    /// Return the BLAS character form of the flag, `'N'` or `'T'`.
    pub fn as_char(self) -> char {
        match self {
            Op::Keep => 'N',
            Op::Transpose => 'T',
        }
    }

    /// Return the opposite flag.
    pub fn flip(self) -> Op {
        match self {
            Op::Keep => Op::Transpose,
            Op::Transpose => Op::Keep,
        }
    }

    /// Apply the flag to a (rows, columns) pair.
    #[inline]
    pub fn apply(self, (rows, cols): (Ix, Ix)) -> (Ix, Ix) {
        match self {
            Op::Keep => (rows, cols),
            Op::Transpose => (cols, rows),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Dense linear algebra routines over arrays.
///
/// The provided methods are the portable implementations; a native routine
/// set overrides the ones it can accelerate and calls back into these for
/// everything else.
///
/// Vector operands may be one-dimensional arrays or any vector-shaped array
/// (`n × 1`, `1 × n`). Matrix operands must have two axes.
pub trait Routines {
    /// Return the dot product `Σ x[i] · y[i]`.
    ///
    /// **Errors** with `NonConformantShape` unless `x` and `y` are vectors of
    /// equal length.
    fn dot<A: LinalgScalar>(&self, x: &Array<A>, y: &Array<A>) -> Result<A> {
        portable::dot(x, y)
    }

    /// Return the sum of absolute values `Σ |x[i]|` over all elements.
    fn asum<A: LinalgScalar + Float>(&self, x: &Array<A>) -> A {
        portable::asum(x)
    }

    /// Return the Euclidean norm `sqrt(Σ x[i]²)` over all elements, without
    /// intermediate overflow. The norm of an empty array is zero.
    fn nrm2<A: LinalgScalar + Float>(&self, x: &Array<A>) -> A {
        portable::nrm2(x)
    }

    /// Return the logical index of the first element of largest absolute
    /// value, or `None` if the array is empty.
    ///
    /// NaN elements never win a comparison, as in the reference BLAS, so a
    /// NaN in position 0 yields `Some(0)`.
    fn iamax<A: LinalgScalar + Float>(&self, x: &Array<A>) -> Option<usize> {
        portable::iamax(x)
    }

    /// Compute `x ← α x`. A no-op when `α` is one.
    fn scal<A: LinalgScalar>(&self, alpha: A, x: &mut Array<A>) {
        portable::scal(alpha, x)
    }

    /// Compute `y ← α x + y`.
    ///
    /// **Errors** with `NonConformantShape` unless `x` and `y` have equal
    /// shapes or are vectors of equal length. When `α` is zero, nothing is
    /// written.
    fn axpy<A: LinalgScalar>(&self, alpha: A, x: &Array<A>, y: &mut Array<A>) -> Result<()> {
        portable::axpy(alpha, x, y)
    }

    /// Compute the rank-1 update `A ← α x yᵗ + A`.
    ///
    /// **Errors** unless `A` is a matrix with `x.len()` rows and `y.len()`
    /// columns.
    fn ger<A: LinalgScalar>(&self, alpha: A, x: &Array<A>, y: &Array<A>, a: &mut Array<A>) -> Result<()> {
        portable::ger(alpha, x, y, a)
    }

    /// Compute `y ← α op(A) x + β y`.
    ///
    /// **Errors** unless `A` is a matrix, and `x` and `y` are vectors whose
    /// lengths match the columns and rows of `op(A)`.
    #[allow(clippy::too_many_arguments)]
    fn gemv<A: LinalgScalar>(&self, trans: Op, alpha: A, a: &Array<A>, x: &Array<A>, beta: A, y: &mut Array<A>) -> Result<()> {
        portable::gemv(trans, alpha, a, x, beta, y)
    }

    /// Compute `C ← α op(A) op(B) + β C`.
    ///
    /// **Errors** unless all three operands are matrices, the inner
    /// dimensions of `op(A)` and `op(B)` agree, and `C` has the rows of
    /// `op(A)` and the columns of `op(B)`.
    ///
    /// ```
    /// use ndframe::ArrayFactory;
    /// use ndframe::linalg::{Op, Routines};
    ///
    /// let bj = ArrayFactory::new();
    /// let a = bj.from_rows(&[[1., 2.], [3., 4.]]).unwrap();
    /// let mut c = bj.ones::<f64>(&[2, 2]);
    /// bj.routines().gemm(Op::Transpose, Op::Keep, 1., &a, &a, 1., &mut c).unwrap();
    /// assert_eq!(c, bj.from_rows(&[[11., 15.], [15., 21.]]).unwrap());
    /// ```
    #[allow(clippy::too_many_arguments)]
    fn gemm<A: LinalgScalar>(
        &self,
        transa: Op,
        transb: Op,
        alpha: A,
        a: &Array<A>,
        b: &Array<A>,
        beta: A,
        c: &mut Array<A>,
    ) -> Result<()> {
        portable::gemm(transa, transb, alpha, a, b, beta, c)
    }
}

/// Check the operands of `dot`; return the common length.
pub(crate) fn check_dot<A: LinalgScalar>(x: &Array<A>, y: &Array<A>) -> Result<Ix> {
    if !vector_like(x) || !vector_like(y) || x.len() != y.len() {
        return Err(non_conformant(x.shape(), y.shape()));
    }
    Ok(x.len())
}

/// Check the operands of `axpy`.
pub(crate) fn check_axpy<A: LinalgScalar>(x: &Array<A>, y: &Array<A>) -> Result<()> {
    if crate::impl_higher_order::conformant(x.shape(), y.shape()) {
        Ok(())
    } else {
        Err(non_conformant(x.shape(), y.shape()))
    }
}

/// Check the operands of `ger`; return (rows, columns) of `a`.
pub(crate) fn check_ger<A: LinalgScalar>(x: &Array<A>, y: &Array<A>, a: &Array<A>) -> Result<(Ix, Ix)> {
    let (m, n) = matrix_dim(a)?;
    if !vector_like(x) || x.len() != m {
        return Err(non_conformant(x.shape(), a.shape()));
    }
    if !vector_like(y) || y.len() != n {
        return Err(non_conformant(y.shape(), a.shape()));
    }
    Ok((m, n))
}

/// Check the operands of `gemv`; return (rows, columns) of `op(a)`.
pub(crate) fn check_gemv<A: LinalgScalar>(trans: Op, a: &Array<A>, x: &Array<A>, y: &Array<A>) -> Result<(Ix, Ix)> {
    let (m, n) = trans.apply(matrix_dim(a)?);
    if !vector_like(x) || x.len() != n {
        return Err(non_conformant(&[m, n], x.shape()));
    }
    if !vector_like(y) || y.len() != m {
        return Err(non_conformant(&[m, n], y.shape()));
    }
    Ok((m, n))
}

/// Check the operands of `gemm`; return (m, k, n) where `op(a)` is `m × k`
/// and `op(b)` is `k × n`.
pub(crate) fn check_gemm<A: LinalgScalar>(
    transa: Op,
    transb: Op,
    a: &Array<A>,
    b: &Array<A>,
    c: &Array<A>,
) -> Result<(Ix, Ix, Ix)> {
    let (m, k) = transa.apply(matrix_dim(a)?);
    let (k2, n) = transb.apply(matrix_dim(b)?);
    let (m2, n2) = matrix_dim(c)?;
    if k != k2 {
        return Err(non_conformant(&[m, k], &[k2, n]));
    }
    if m != m2 || n != n2 {
        return Err(non_conformant(&[m, n], c.shape()));
    }
    Ok((m, k, n))
}

/// One axis, or two axes of which at least one has length at most 1.
pub(crate) fn vector_like<A: LinalgScalar>(x: &Array<A>) -> bool {
    match *x.shape() {
        [_] => true,
        [rows, cols] => rows <= 1 || cols <= 1,
        _ => false,
    }
}

fn matrix_dim<A: LinalgScalar>(a: &Array<A>) -> Result<(Ix, Ix)> {
    match *a.shape() {
        [rows, cols] => Ok((rows, cols)),
        _ => Err(dimensionality(2, a.ndim())),
    }
}

/// Return `src` ready to be read while `dst` is written: a copy if the two
/// share storage, a view otherwise.
pub(crate) fn unaliased<A: LinalgScalar>(src: &Array<A>, dst: &Array<A>) -> Array<A> {
    if src.shares_storage_with(dst) {
        src.copy()
    } else {
        src.view()
    }
}

#[inline(always)]
/// Return `true` if `A` and `B` are the same type
pub(crate) fn same_type<A: 'static, B: 'static>() -> bool {
    TypeId::of::<A>() == TypeId::of::<B>()
}

// Read pointer to type `A` as type `B`.
//
// **Panics** if `A` and `B` are not the same type
pub(crate) fn cast_as<A: 'static + Copy, B: 'static + Copy>(a: &A) -> B {
    assert!(
        same_type::<A, B>(),
        "expect type {} and {} to match",
        std::any::type_name::<A>(),
        std::any::type_name::<B>()
    );
    unsafe { ::std::ptr::read(a as *const _ as *const B) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayFactory, Error};

    #[test]
    fn op_flags() {
        assert_eq!(Op::Keep.as_char(), 'N');
        assert_eq!(Op::Transpose.to_string(), "T");
        assert_eq!(Op::Transpose.apply((2, 3)), (3, 2));
        assert_eq!(Op::Keep.flip(), Op::Transpose);
    }

    #[test]
    fn gemm_inner_dimension_mismatch() {
        let bj = ArrayFactory::new();
        let a = bj.zeros::<f64>(&[2, 4]);
        let b = bj.zeros::<f64>(&[3, 2]);
        let c = bj.zeros::<f64>(&[2, 2]);
        assert_eq!(
            check_gemm(Op::Keep, Op::Keep, &a, &b, &c),
            Err(Error::NonConformantShape {
                lhs: vec![2, 4].into(),
                rhs: vec![3, 2].into(),
            })
        );
        assert_eq!(check_gemm(Op::Transpose, Op::Transpose, &a, &b, &bj.zeros(&[4, 3])), Ok((4, 2, 3)));
    }

    #[test]
    fn gemv_shapes_follow_transpose() {
        let bj = ArrayFactory::new();
        let a = bj.zeros::<f64>(&[2, 3]);
        let x3 = bj.zeros::<f64>(&[3]);
        let x2 = bj.zeros::<f64>(&[2]);
        assert_eq!(check_gemv(Op::Keep, &a, &x3, &x2), Ok((2, 3)));
        assert_eq!(check_gemv(Op::Transpose, &a, &x2, &x3), Ok((3, 2)));
        assert!(check_gemv(Op::Keep, &a, &x2, &x3).is_err());
        assert_eq!(
            check_gemv(Op::Keep, &x3, &x3, &x2),
            Err(Error::Dimensionality { expected: 2, found: 1 })
        );
    }

    #[test]
    fn unaliased_copies_shared_operands() {
        let bj = ArrayFactory::new();
        let a = bj.zeros::<f64>(&[2, 2]);
        let row = a.get_row(0).unwrap();
        assert!(!unaliased(&row, &a).shares_storage_with(&a));
        let other = bj.zeros::<f64>(&[2]);
        assert!(unaliased(&other, &a).shares_storage_with(&other));
    }
}
