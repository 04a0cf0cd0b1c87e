// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_complex::{Complex32 as c32, Complex64 as c64};
use num_traits::Float;
use tracing::trace;

use super::{cast_as, check_axpy, check_dot, check_gemm, check_gemv, check_ger, same_type, unaliased, Op, Routines};
use crate::error::Result;
use crate::numeric_util;
use crate::storage::Storage;
use crate::{Array, Ix, LinalgScalar};

/// The portable routine set: loops over logical indices translated through
/// strides, plus `matrixmultiply` for floating point `gemm`.
///
/// Works for every operand layout, including negative strides and views of
/// the destination's own storage.
#[derive(Copy, Clone, Debug, Default)]
pub struct Portable;

impl Routines for Portable {}

pub(crate) fn dot<A: LinalgScalar>(x: &Array<A>, y: &Array<A>) -> Result<A> {
    check_dot(x, y)?;
    if let (Some(xs), Some(ys)) = (x.as_slice(), y.as_slice()) {
        trace!(routine = "dot", path = "unrolled", len = x.len());
        return Ok(numeric_util::unrolled_dot(&xs, &ys));
    }
    trace!(routine = "dot", path = "strided", len = x.len());
    Ok(x.iter().zip(y.iter()).fold(A::zero(), |acc, (a, b)| acc + a * b))
}

pub(crate) fn asum<A: LinalgScalar + Float>(x: &Array<A>) -> A {
    x.reduce(A::zero(), |acc, elt| acc + elt.abs())
}

/// Scaled sum of squares: the running `scale` is the largest magnitude seen
/// so far, so no intermediate square overflows.
pub(crate) fn nrm2<A: LinalgScalar + Float>(x: &Array<A>) -> A {
    let mut scale = A::zero();
    let mut ssq = A::one();
    for elt in x.iter() {
        if elt.is_zero() {
            continue;
        }
        let absxi = elt.abs();
        if scale < absxi {
            let r = scale / absxi;
            ssq = A::one() + ssq * r * r;
            scale = absxi;
        } else {
            let r = absxi / scale;
            ssq = ssq + r * r;
        }
    }
    scale * ssq.sqrt()
}

/// Reference BLAS `i?amax` rule: an element replaces the running maximum
/// only when its magnitude compares greater, so NaN never does, and a
/// leading NaN keeps position 0.
pub(crate) fn iamax<A: LinalgScalar + Float>(x: &Array<A>) -> Option<usize> {
    let mut elts = x.iter().enumerate();
    let (mut best, mut max) = match elts.next() {
        Some((i, elt)) => (i, elt.abs()),
        None => return None,
    };
    for (i, elt) in elts {
        let a = elt.abs();
        if a > max {
            best = i;
            max = a;
        }
    }
    Some(best)
}

pub(crate) fn scal<A: LinalgScalar>(alpha: A, x: &mut Array<A>) {
    if alpha.is_one() {
        return;
    }
    x.map_inplace(|elt| alpha * elt);
}

pub(crate) fn axpy<A: LinalgScalar>(alpha: A, x: &Array<A>, y: &mut Array<A>) -> Result<()> {
    check_axpy(x, y)?;
    if alpha.is_zero() {
        return Ok(());
    }
    let x = unaliased(x, y);
    for (pos, xi) in y.positions().zip(x.iter()) {
        let yi = y.read(pos);
        y.write(pos, alpha * xi + yi);
    }
    Ok(())
}

pub(crate) fn ger<A: LinalgScalar>(alpha: A, x: &Array<A>, y: &Array<A>, a: &mut Array<A>) -> Result<()> {
    let (m, n) = check_ger(x, y, a)?;
    if alpha.is_zero() {
        return Ok(());
    }
    let x = unaliased(x, a).to_vec();
    let y = unaliased(y, a).to_vec();
    for j in 0..n {
        let ay = alpha * y[j];
        for (i, &xi) in x.iter().enumerate().take(m) {
            let aij = a.get_ij(i, j)?;
            a.set_ij(i, j, aij + xi * ay)?;
        }
    }
    Ok(())
}

pub(crate) fn gemv<A: LinalgScalar>(
    trans: Op,
    alpha: A,
    a: &Array<A>,
    x: &Array<A>,
    beta: A,
    y: &mut Array<A>,
) -> Result<()> {
    let (m, _) = check_gemv(trans, a, x, y)?;
    let a = unaliased(a, y);
    let a = match trans {
        Op::Keep => a,
        Op::Transpose => a.t(),
    };
    let x = unaliased(x, y).to_vec();
    for i in 0..m {
        let sum = if alpha.is_zero() {
            A::zero()
        } else {
            let row = a.get_row(i)?;
            alpha * row.iter().zip(&x).fold(A::zero(), |acc, (aik, &xk)| acc + aik * xk)
        };
        // β = 0 overwrites y
        let value = if beta.is_zero() { sum } else { sum + beta * y.get(i)? };
        y.set(i, value)?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn gemm<A: LinalgScalar>(
    transa: Op,
    transb: Op,
    alpha: A,
    a: &Array<A>,
    b: &Array<A>,
    beta: A,
    c: &mut Array<A>,
) -> Result<()> {
    let (m, k, n) = check_gemm(transa, transb, a, b, c)?;
    if c.is_empty() {
        return Ok(());
    }
    if alpha.is_zero() || k == 0 {
        scale_by_beta(beta, c);
        return Ok(());
    }
    let a = op_view(transa, unaliased(a, c));
    let b = op_view(transb, unaliased(b, c));
    if same_type::<A, f32>() || same_type::<A, f64>() || same_type::<A, c32>() || same_type::<A, c64>() {
        trace!(routine = "gemm", path = "matrixmultiply", m, k, n);
        mat_mul_float(m, k, n, alpha, &a, &b, beta, c);
    } else {
        trace!(routine = "gemm", path = "loop", m, k, n);
        mat_mul_loop(m, k, n, alpha, &a, &b, beta, c)?;
    }
    Ok(())
}

fn op_view<A: LinalgScalar>(op: Op, a: Array<A>) -> Array<A> {
    match op {
        Op::Keep => a,
        Op::Transpose => a.t(),
    }
}

/// C ← β C, with β = 0 overwriting.
pub(crate) fn scale_by_beta<A: LinalgScalar>(beta: A, c: &mut Array<A>) {
    if beta.is_zero() {
        c.assign(A::zero());
    } else if !beta.is_one() {
        c.map_inplace(|elt| beta * elt);
    }
}

/// C ← α A B + β C through `matrixmultiply`, for any strides.
///
/// `a` and `b` must not share storage with `c`, and no operand may be empty.
#[allow(clippy::too_many_arguments)]
fn mat_mul_float<A: LinalgScalar>(
    m: Ix,
    k: Ix,
    n: Ix,
    alpha: A,
    a: &Array<A>,
    b: &Array<A>,
    beta: A,
    c: &mut Array<A>,
) {
    let a_data = a.data.borrow();
    let b_data = b.data.borrow();
    let mut c_data = c.data.borrow_mut();
    let (rsa, csa) = (a.strides()[0], a.strides()[1]);
    let (rsb, csb) = (b.strides()[0], b.strides()[1]);
    let (rsc, csc) = (c.strides()[0], c.strides()[1]);
    // pointers to the logical first elements; in bounds since no operand is
    // empty
    let (ap, bp, cp) = unsafe {
        (
            a_data.as_slice().as_ptr().add(a.offset()),
            b_data.as_slice().as_ptr().add(b.offset()),
            c_data.as_mut_slice().as_mut_ptr().add(c.offset()),
        )
    };
    if same_type::<A, f32>() {
        unsafe {
            matrixmultiply::sgemm(
                m,
                k,
                n,
                cast_as(&alpha),
                ap as *const _,
                rsa,
                csa,
                bp as *const _,
                rsb,
                csb,
                cast_as(&beta),
                cp as *mut _,
                rsc,
                csc,
            );
        }
    } else if same_type::<A, f64>() {
        unsafe {
            matrixmultiply::dgemm(
                m,
                k,
                n,
                cast_as(&alpha),
                ap as *const _,
                rsa,
                csa,
                bp as *const _,
                rsb,
                csb,
                cast_as(&beta),
                cp as *mut _,
                rsc,
                csc,
            );
        }
    } else if same_type::<A, c32>() {
        unsafe {
            matrixmultiply::cgemm(
                matrixmultiply::CGemmOption::Standard,
                matrixmultiply::CGemmOption::Standard,
                m,
                k,
                n,
                complex_array(cast_as::<A, c32>(&alpha)),
                ap as *const _,
                rsa,
                csa,
                bp as *const _,
                rsb,
                csb,
                complex_array(cast_as::<A, c32>(&beta)),
                cp as *mut _,
                rsc,
                csc,
            );
        }
    } else if same_type::<A, c64>() {
        unsafe {
            matrixmultiply::zgemm(
                matrixmultiply::CGemmOption::Standard,
                matrixmultiply::CGemmOption::Standard,
                m,
                k,
                n,
                complex_array(cast_as::<A, c64>(&alpha)),
                ap as *const _,
                rsa,
                csa,
                bp as *const _,
                rsb,
                csb,
                complex_array(cast_as::<A, c64>(&beta)),
                cp as *mut _,
                rsc,
                csc,
            );
        }
    }
}

/// Return the complex in the form of an array [re, im]
#[inline]
fn complex_array<A: 'static + Copy>(z: num_complex::Complex<A>) -> [A; 2] {
    [z.re, z.im]
}

#[allow(clippy::too_many_arguments)]
fn mat_mul_loop<A: LinalgScalar>(
    m: Ix,
    k: Ix,
    n: Ix,
    alpha: A,
    a: &Array<A>,
    b: &Array<A>,
    beta: A,
    c: &mut Array<A>,
) -> Result<()> {
    for j in 0..n {
        for i in 0..m {
            let mut sum = A::zero();
            for l in 0..k {
                sum = sum + a.get_ij(i, l)? * b.get_ij(l, j)?;
            }
            let value = if beta.is_zero() {
                alpha * sum
            } else {
                alpha * sum + beta * c.get_ij(i, j)?
            };
            c.set_ij(i, j, value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayFactory, Error, Slice};
    use approx::assert_abs_diff_eq;

    #[test]
    fn dot_over_strided_views() {
        let bj = ArrayFactory::new();
        let a = bj.from_rows(&[[1., 2., 3.], [4., 5., 6.]]).unwrap();
        let r0 = a.get_row(0).unwrap();
        let r1 = a.get_row(1).unwrap();
        assert_eq!(Portable.dot(&r0, &r1).unwrap(), 4. + 10. + 18.);
        assert!(matches!(
            Portable.dot(&r0, &a.get_column(0).unwrap()),
            Err(Error::NonConformantShape { .. })
        ));
    }

    #[test]
    fn norms() {
        let bj = ArrayFactory::new();
        let x = bj.from_vec(vec![3., -4.]);
        assert_eq!(Portable.asum(&x), 7.);
        assert_abs_diff_eq!(Portable.nrm2(&x), 5., epsilon = 1e-12);
        assert_eq!(Portable.nrm2(&bj.zeros::<f64>(&[0])), 0.);
        let big = bj.from_vec(vec![1e300, 1e300]);
        assert_abs_diff_eq!(Portable.nrm2(&big) / 1e300, 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn iamax_first_of_largest() {
        let bj = ArrayFactory::new();
        assert_eq!(Portable.iamax(&bj.from_vec(vec![1., -5., 5., 2.])), Some(1));
        assert_eq!(Portable.iamax(&bj.zeros::<f64>(&[0])), None);
    }

    #[test]
    fn iamax_nan_follows_reference_blas() {
        let bj = ArrayFactory::new();
        assert_eq!(Portable.iamax(&bj.from_vec(vec![f64::NAN, 1., 2.])), Some(0));
        assert_eq!(Portable.iamax(&bj.from_vec(vec![1., f64::NAN, 2.])), Some(2));
        assert_eq!(Portable.iamax(&bj.from_vec(vec![f64::NAN, f64::NAN])), Some(0));
    }

    #[test]
    fn axpy_zero_alpha_still_checks_shapes() {
        let bj = ArrayFactory::new();
        let x = bj.ones::<f64>(&[3]);
        let mut y = bj.ones::<f64>(&[2]);
        assert!(Portable.axpy(0., &x, &mut y).is_err());
        let mut y = bj.ones::<f64>(&[3]);
        Portable.axpy(2., &x, &mut y).unwrap();
        assert_eq!(y.to_vec(), vec![3.; 3]);
    }

    #[test]
    fn axpy_with_self_overlap() {
        let bj = ArrayFactory::new();
        let mut y = bj.from_vec(vec![1., 2., 3., 4.]);
        let x = y.slice(&[Slice::from(..).step_by(-1)]).unwrap();
        Portable.axpy(1., &x, &mut y).unwrap();
        assert_eq!(y.to_vec(), vec![5.; 4]);
    }

    #[test]
    fn rank_one_update() {
        let bj = ArrayFactory::new();
        let mut a = bj.zeros::<i32>(&[2, 3]);
        let x = bj.from_vec(vec![1, 2]);
        let y = bj.from_vec(vec![1, 10, 100]);
        Portable.ger(1, &x, &y, &mut a).unwrap();
        assert_eq!(a, bj.from_rows(&[[1, 10, 100], [2, 20, 200]]).unwrap());
        assert!(Portable.ger(1, &y, &x, &mut a).is_err());
    }

    #[test]
    fn gemv_into_row_view() {
        let bj = ArrayFactory::new();
        let a = bj.from_rows(&[[1., 2.], [3., 4.]]).unwrap();
        let x = bj.from_vec(vec![1., 1.]);
        let out = bj.zeros::<f64>(&[3, 2]);
        let mut y = out.get_row(1).unwrap();
        Portable.gemv(Op::Transpose, 2., &a, &x, 0., &mut y).unwrap();
        assert_eq!(out.get_row(1).unwrap().to_vec(), vec![8., 12.]);
    }

    #[test]
    fn gemm_integers_use_loop() {
        let bj = ArrayFactory::new();
        let a = bj.from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        let mut c = bj.ones::<i32>(&[2, 2]);
        Portable.gemm(Op::Keep, Op::Transpose, 1, &a, &a, 2, &mut c).unwrap();
        assert_eq!(c, bj.from_rows(&[[16, 34], [34, 79]]).unwrap());
    }

    #[test]
    fn gemm_alpha_zero_scales_c() {
        let bj = ArrayFactory::new();
        let a = bj.ones::<f64>(&[2, 2]);
        let mut c = bj.from_rows(&[[1., 2.], [3., 4.]]).unwrap();
        Portable.gemm(Op::Keep, Op::Keep, 0., &a, &a, 3., &mut c).unwrap();
        assert_eq!(c.to_vec(), vec![3., 9., 6., 12.]);
    }

    #[test]
    fn gemm_with_destination_as_operand() {
        let bj = ArrayFactory::new();
        let mut c = bj.from_rows(&[[1., 2.], [3., 4.]]).unwrap();
        let a = c.view();
        Portable.gemm(Op::Keep, Op::Keep, 1., &a, &a, 0., &mut c).unwrap();
        assert_eq!(c, bj.from_rows(&[[7., 10.], [15., 22.]]).unwrap());
    }

    #[test]
    fn gemm_negative_strides() {
        let bj = ArrayFactory::new();
        let a = bj.from_rows(&[[1., 2.], [3., 4.]]).unwrap();
        let flipped = a.slice(&[Slice::from(..).step_by(-1)]).unwrap();
        let mut c = bj.zeros::<f64>(&[2, 2]);
        Portable.gemm(Op::Keep, Op::Keep, 1., &flipped, &bj.eye(2), 0., &mut c).unwrap();
        assert_eq!(c, bj.from_rows(&[[3., 4.], [1., 2.]]).unwrap());
    }
}
