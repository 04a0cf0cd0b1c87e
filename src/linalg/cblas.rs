// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use cblas_sys as blas_sys;
use cblas_sys::{CblasColMajor, CblasNoTrans, CblasTrans, CBLAS_TRANSPOSE};
use libc::c_int;
use num_complex::Complex64 as c64;
use num_traits::Float;
use tracing::trace;

use super::layout::{blas_flat, blas_matrix, blas_vector, BlasMatrix};
use super::portable::{self, Portable};
use super::{cast_as, check_axpy, check_dot, check_gemm, check_gemv, check_ger, same_type, unaliased, Op, Routines};
use crate::error::Result;
use crate::storage::Storage;
use crate::{Array, Ix, LinalgScalar};

#[allow(non_camel_case_types)]
type blas_index = c_int; // blas index type

/// The C BLAS routine set.
///
/// Calls `cblas_d*` for `f64` operands (and `cblas_zgemm` for
/// `Complex<f64>`) when their layouts can be described to a column-major
/// BLAS, see below, and [`Portable`] otherwise. Shape conformance is checked
/// before either path runs, so errors are identical.
///
/// - Vector operands must be non-empty and have adjacent elements
///   (increment 1).
/// - Matrix operands must have one unit stride and a leading dimension of at
///   least the extent of that axis. Matrices stored row-major (for example
///   a transposed view) are passed with the opposite transpose flag.
/// - A `gemv` or `gemm` destination that cannot be addressed is computed in
///   a temporary contiguous buffer and copied back.
/// - Operands sharing storage with the destination are copied first.
///
/// The BLAS implementation itself is linked by the final binary, for example
/// through the `blas-src` crate.
#[derive(Copy, Clone, Debug, Default)]
pub struct Cblas;

#[inline]
fn blas_trans(op: Op) -> CBLAS_TRANSPOSE {
    match op {
        Op::Keep => CblasNoTrans,
        Op::Transpose => CblasTrans,
    }
}

/// Compose two transpose flags.
#[inline]
fn compose(a: Op, b: Op) -> Op {
    if a == b {
        Op::Keep
    } else {
        Op::Transpose
    }
}

/// Pointer to the logical first element of a non-empty array.
///
/// ## Safety
///
/// `data` must be the storage of an array whose offset is `offset`.
#[inline]
unsafe fn first<A>(data: &[A], offset: usize) -> *const A {
    data.as_ptr().add(offset)
}

#[inline]
unsafe fn first_mut<A>(data: &mut [A], offset: usize) -> *mut A {
    data.as_mut_ptr().add(offset)
}

impl Routines for Cblas {
    fn dot<A: LinalgScalar>(&self, x: &Array<A>, y: &Array<A>) -> Result<A> {
        let n = check_dot(x, y)?;
        if same_type::<A, f64>() && blas_vector(x) && blas_vector(y) {
            trace!(routine = "dot", path = "native", n);
            let (xd, yd) = (x.data.borrow(), y.data.borrow());
            let ret = unsafe {
                blas_sys::cblas_ddot(
                    n as blas_index,
                    first(xd.as_slice(), x.offset()) as *const _,
                    1,
                    first(yd.as_slice(), y.offset()) as *const _,
                    1,
                )
            };
            return Ok(cast_as::<f64, A>(&ret));
        }
        trace!(routine = "dot", path = "portable", n);
        Portable.dot(x, y)
    }

    fn asum<A: LinalgScalar + Float>(&self, x: &Array<A>) -> A {
        if same_type::<A, f64>() && blas_flat(x) {
            trace!(routine = "asum", path = "native", n = x.len());
            let xd = x.data.borrow();
            let ret = unsafe {
                blas_sys::cblas_dasum(x.len() as blas_index, first(xd.as_slice(), x.offset()) as *const _, 1)
            };
            return cast_as::<f64, A>(&ret);
        }
        trace!(routine = "asum", path = "portable", n = x.len());
        portable::asum(x)
    }

    fn nrm2<A: LinalgScalar + Float>(&self, x: &Array<A>) -> A {
        if same_type::<A, f64>() && blas_flat(x) {
            trace!(routine = "nrm2", path = "native", n = x.len());
            let xd = x.data.borrow();
            let ret = unsafe {
                blas_sys::cblas_dnrm2(x.len() as blas_index, first(xd.as_slice(), x.offset()) as *const _, 1)
            };
            return cast_as::<f64, A>(&ret);
        }
        trace!(routine = "nrm2", path = "portable", n = x.len());
        portable::nrm2(x)
    }

    fn iamax<A: LinalgScalar + Float>(&self, x: &Array<A>) -> Option<usize> {
        if same_type::<A, f64>() && blas_flat(x) {
            trace!(routine = "iamax", path = "native", n = x.len());
            let xd = x.data.borrow();
            let ret = unsafe {
                blas_sys::cblas_idamax(x.len() as blas_index, first(xd.as_slice(), x.offset()) as *const _, 1)
            };
            return Some(ret as usize);
        }
        trace!(routine = "iamax", path = "portable", n = x.len());
        portable::iamax(x)
    }

    fn scal<A: LinalgScalar>(&self, alpha: A, x: &mut Array<A>) {
        if alpha.is_one() {
            return;
        }
        if same_type::<A, f64>() && blas_flat(x) {
            trace!(routine = "scal", path = "native", n = x.len());
            let offset = x.offset();
            let mut xd = x.data.borrow_mut();
            unsafe {
                blas_sys::cblas_dscal(
                    x.len() as blas_index,
                    cast_as(&alpha),
                    first_mut(xd.as_mut_slice(), offset) as *mut _,
                    1,
                );
            }
            return;
        }
        trace!(routine = "scal", path = "portable", n = x.len());
        portable::scal(alpha, x)
    }

    fn axpy<A: LinalgScalar>(&self, alpha: A, x: &Array<A>, y: &mut Array<A>) -> Result<()> {
        check_axpy(x, y)?;
        if alpha.is_zero() {
            return Ok(());
        }
        let x = unaliased(x, y);
        if same_type::<A, f64>() && blas_flat(&x) && blas_flat(y) {
            trace!(routine = "axpy", path = "native", n = y.len());
            let xd = x.data.borrow();
            let offset = y.offset();
            let mut yd = y.data.borrow_mut();
            unsafe {
                blas_sys::cblas_daxpy(
                    x.len() as blas_index,
                    cast_as(&alpha),
                    first(xd.as_slice(), x.offset()) as *const _,
                    1,
                    first_mut(yd.as_mut_slice(), offset) as *mut _,
                    1,
                );
            }
            return Ok(());
        }
        trace!(routine = "axpy", path = "portable", n = y.len());
        portable::axpy(alpha, &x, y)
    }

    fn ger<A: LinalgScalar>(&self, alpha: A, x: &Array<A>, y: &Array<A>, a: &mut Array<A>) -> Result<()> {
        let (m, n) = check_ger(x, y, a)?;
        if alpha.is_zero() {
            return Ok(());
        }
        let x = unaliased(x, a);
        let y = unaliased(y, a);
        if same_type::<A, f64>() && blas_vector(&x) && blas_vector(&y) {
            if let Some(BlasMatrix { storage, ld }) = blas_matrix(a) {
                trace!(routine = "ger", path = "native", m, n, storage = %storage);
                // Aᵗ ← α y xᵗ + Aᵗ for row-major storage
                let (rows, cols, u, v) = match storage {
                    Op::Keep => (m, n, &x, &y),
                    Op::Transpose => (n, m, &y, &x),
                };
                let (ud, vd) = (u.data.borrow(), v.data.borrow());
                let offset = a.offset();
                let mut ad = a.data.borrow_mut();
                unsafe {
                    blas_sys::cblas_dger(
                        CblasColMajor,
                        rows as blas_index,
                        cols as blas_index,
                        cast_as(&alpha),
                        first(ud.as_slice(), u.offset()) as *const _,
                        1,
                        first(vd.as_slice(), v.offset()) as *const _,
                        1,
                        first_mut(ad.as_mut_slice(), offset) as *mut _,
                        ld as blas_index,
                    );
                }
                return Ok(());
            }
        }
        trace!(routine = "ger", path = "portable", m, n);
        portable::ger(alpha, &x, &y, a)
    }

    fn gemv<A: LinalgScalar>(&self, trans: Op, alpha: A, a: &Array<A>, x: &Array<A>, beta: A, y: &mut Array<A>) -> Result<()> {
        let (m, n) = check_gemv(trans, a, x, y)?;
        let a = unaliased(a, y);
        let x = unaliased(x, y);
        let desc = blas_matrix(&a);
        match desc {
            Some(desc) if same_type::<A, f64>() && blas_vector(&x) => {
                if blas_vector(y) {
                    trace!(routine = "gemv", path = "native", m, n);
                    let offset = y.offset();
                    let mut yd = y.data.borrow_mut();
                    unsafe {
                        native_gemv(trans, alpha, &a, desc, &x, beta, first_mut(yd.as_mut_slice(), offset));
                    }
                } else {
                    trace!(routine = "gemv", path = "native", m, n, destination = "temporary");
                    let mut tmp = destination_copy(y, beta);
                    unsafe {
                        native_gemv(trans, alpha, &a, desc, &x, beta, tmp.as_mut_ptr());
                    }
                    y.assign_from(&Array::from_vec(tmp))?;
                }
                Ok(())
            }
            _ => {
                trace!(routine = "gemv", path = "portable", m, n);
                portable::gemv(trans, alpha, &a, &x, beta, y)
            }
        }
    }

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
        let (m, k, n) = check_gemm(transa, transb, a, b, c)?;
        if c.is_empty() || k == 0 || alpha.is_zero() || !(same_type::<A, f64>() || same_type::<A, c64>()) {
            trace!(routine = "gemm", path = "portable", m, k, n);
            return portable::gemm(transa, transb, alpha, a, b, beta, c);
        }
        let a = unaliased(a, c);
        let b = unaliased(b, c);
        let (da, db) = match (blas_matrix(&a), blas_matrix(&b)) {
            (Some(da), Some(db)) => (da, db),
            _ => {
                trace!(routine = "gemm", path = "portable", m, k, n, reason = "operand layout");
                return portable::gemm(transa, transb, alpha, &a, &b, beta, c);
            }
        };
        let lhs = Operand {
            array: &a,
            trans: compose(transa, da.storage),
            ld: da.ld,
        };
        let rhs = Operand {
            array: &b,
            trans: compose(transb, db.storage),
            ld: db.ld,
        };
        match blas_matrix(c) {
            Some(BlasMatrix { storage: Op::Keep, ld }) => {
                trace!(routine = "gemm", path = "native", m, k, n);
                let offset = c.offset();
                let mut cd = c.data.borrow_mut();
                unsafe {
                    native_gemm(m, n, k, alpha, &lhs, &rhs, beta, first_mut(cd.as_mut_slice(), offset), ld);
                }
            }
            Some(BlasMatrix { storage: Op::Transpose, ld }) => {
                // Cᵗ = op(B)ᵗ op(A)ᵗ
                trace!(routine = "gemm", path = "native", m, k, n, destination = "transposed");
                let lhs_t = Operand {
                    trans: lhs.trans.flip(),
                    ..lhs
                };
                let rhs_t = Operand {
                    trans: rhs.trans.flip(),
                    ..rhs
                };
                let offset = c.offset();
                let mut cd = c.data.borrow_mut();
                unsafe {
                    native_gemm(n, m, k, alpha, &rhs_t, &lhs_t, beta, first_mut(cd.as_mut_slice(), offset), ld);
                }
            }
            None => {
                trace!(routine = "gemm", path = "native", m, k, n, destination = "temporary");
                let mut tmp = destination_copy(c, beta);
                unsafe {
                    native_gemm(m, n, k, alpha, &lhs, &rhs, beta, tmp.as_mut_ptr(), m);
                }
                c.assign_from(&Array::from_shape_vec(&[m, n], tmp)?)?;
            }
        }
        Ok(())
    }
}

/// A matrix operand as the BLAS sees it: its storage read column-major with
/// leading dimension `ld`, and the flag turning that into the wanted matrix.
#[derive(Copy, Clone)]
struct Operand<'a, A> {
    array: &'a Array<A>,
    trans: Op,
    ld: Ix,
}

/// The logical contents of a destination in column-major order, or zeros
/// when `beta` is zero.
fn destination_copy<A: LinalgScalar>(dst: &Array<A>, beta: A) -> Vec<A> {
    if beta.is_zero() {
        vec![A::zero(); dst.len()]
    } else {
        dst.to_vec()
    }
}

/// y ← α op(A) x + β y for `f64`.
///
/// ## Safety
///
/// `y` must point to `rows(op(A))` writable, adjacent elements not
/// overlapping `a` or `x`.
unsafe fn native_gemv<A: LinalgScalar>(
    trans: Op,
    alpha: A,
    a: &Array<A>,
    desc: BlasMatrix,
    x: &Array<A>,
    beta: A,
    y: *mut A,
) {
    let (rows, cols) = desc.storage.apply((a.rows(), a.columns()));
    let (ad, xd) = (a.data.borrow(), x.data.borrow());
    blas_sys::cblas_dgemv(
        CblasColMajor,
        blas_trans(compose(trans, desc.storage)),
        rows as blas_index,                        // m, rows of stored A
        cols as blas_index,                        // n, cols of stored A
        cast_as(&alpha),                           // alpha
        first(ad.as_slice(), a.offset()) as *const _, // a
        desc.ld as blas_index,                     // lda
        first(xd.as_slice(), x.offset()) as *const _, // x
        1,
        cast_as(&beta),                            // beta
        y as *mut _,                               // y
        1,
    );
}

/// C ← α op(A) op(B) + β C for `f64` and `Complex<f64>`, where `C` is the
/// `m × n` column-major matrix at `c` with leading dimension `ldc`.
///
/// ## Safety
///
/// `c` must address a writable `m × n` matrix with leading dimension `ldc`
/// that does not overlap either operand.
#[allow(clippy::too_many_arguments)]
unsafe fn native_gemm<A: LinalgScalar>(
    m: Ix,
    n: Ix,
    k: Ix,
    alpha: A,
    lhs: &Operand<'_, A>,
    rhs: &Operand<'_, A>,
    beta: A,
    c: *mut A,
    ldc: Ix,
) {
    let (ad, bd) = (lhs.array.data.borrow(), rhs.array.data.borrow());
    let ap = first(ad.as_slice(), lhs.array.offset());
    let bp = first(bd.as_slice(), rhs.array.offset());

    macro_rules! gemm_scalar_cast {
        (f64, $var:ident) => {
            cast_as(&$var)
        };
        (c64, $var:ident) => {
            &$var as *const A as *const _
        };
    }

    macro_rules! gemm {
        ($ty:tt, $gemm:ident) => {
            if same_type::<A, $ty>() {
                // gemm is C ← αA^Op B^Op + βC
                // Where Op is notrans/trans/conjtrans
                blas_sys::$gemm(
                    CblasColMajor,
                    blas_trans(lhs.trans),
                    blas_trans(rhs.trans),
                    m as blas_index,               // m, rows of Op(a)
                    n as blas_index,               // n, cols of Op(b)
                    k as blas_index,               // k, cols of Op(a)
                    gemm_scalar_cast!($ty, alpha), // alpha
                    ap as *const _,                // a
                    lhs.ld as blas_index,          // lda
                    bp as *const _,                // b
                    rhs.ld as blas_index,          // ldb
                    gemm_scalar_cast!($ty, beta),  // beta
                    c as *mut _,                   // c
                    ldc.max(1) as blas_index,      // ldc
                );
                return;
            }
        };
    }
    gemm!(f64, cblas_dgemm);
    gemm!(c64, cblas_zgemm);
}
