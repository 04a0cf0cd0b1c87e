//! Mock interfaces to BLAS
//!
//! Reference implementations of the column-major `cblas_*` routines used by
//! `ndframe`, recording each call in a per-thread log.

use core::cell::RefCell;
use core::ffi::{c_double, c_int};
use core::ops::{Add, Mul};
use std::thread_local;

use cblas_sys::{c_double_complex, CblasColMajor, CblasNoTrans, CBLAS_INDEX, CBLAS_LAYOUT, CBLAS_TRANSPOSE};
use num_complex::Complex64;
use num_traits::Zero;

thread_local! {
    /// Names of the BLAS routines called on this thread, in call order
    pub static CALL_LOG: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

/// Take the call log of this thread, leaving it empty.
pub fn take_calls() -> Vec<&'static str>
{
    CALL_LOG.with(|log| std::mem::take(&mut *log.borrow_mut()))
}

fn record(name: &'static str)
{
    CALL_LOG.with(|log| log.borrow_mut().push(name));
}

fn col_major(layout: CBLAS_LAYOUT)
{
    assert!(matches!(layout, CblasColMajor), "ndframe only uses column-major calls");
}

fn is_trans(trans: CBLAS_TRANSPOSE) -> bool
{
    !matches!(trans, CblasNoTrans)
}

unsafe fn at<T: Copy>(p: *const T, i: c_int, inc: c_int) -> T
{
    *p.offset((i * inc) as isize)
}

#[no_mangle]
pub unsafe extern "C" fn cblas_ddot(n: c_int, x: *const c_double, incx: c_int, y: *const c_double, incy: c_int) -> c_double
{
    record("ddot");
    (0..n).map(|i| at(x, i, incx) * at(y, i, incy)).sum()
}

#[no_mangle]
pub unsafe extern "C" fn cblas_dasum(n: c_int, x: *const c_double, incx: c_int) -> c_double
{
    record("dasum");
    (0..n).map(|i| at(x, i, incx).abs()).sum()
}

#[no_mangle]
pub unsafe extern "C" fn cblas_dnrm2(n: c_int, x: *const c_double, incx: c_int) -> c_double
{
    record("dnrm2");
    (0..n).map(|i| at(x, i, incx).powi(2)).sum::<f64>().sqrt()
}

#[no_mangle]
pub unsafe extern "C" fn cblas_idamax(n: c_int, x: *const c_double, incx: c_int) -> CBLAS_INDEX
{
    record("idamax");
    let mut best = 0;
    for i in 1..n {
        if at(x, i, incx).abs() > at(x, best, incx).abs() {
            best = i;
        }
    }
    best as CBLAS_INDEX
}

#[no_mangle]
pub unsafe extern "C" fn cblas_dscal(n: c_int, alpha: c_double, x: *mut c_double, incx: c_int)
{
    record("dscal");
    for i in 0..n {
        *x.offset((i * incx) as isize) *= alpha;
    }
}

#[no_mangle]
pub unsafe extern "C" fn cblas_daxpy(
    n: c_int, alpha: c_double, x: *const c_double, incx: c_int, y: *mut c_double, incy: c_int,
)
{
    record("daxpy");
    for i in 0..n {
        *y.offset((i * incy) as isize) += alpha * at(x, i, incx);
    }
}

#[rustfmt::skip]
#[no_mangle]
pub unsafe extern "C" fn cblas_dger(
    layout: CBLAS_LAYOUT,
    m: c_int,
    n: c_int,
    alpha: c_double,
    x: *const c_double,
    incx: c_int,
    y: *const c_double,
    incy: c_int,
    a: *mut c_double,
    lda: c_int
) {
    record("dger");
    col_major(layout);
    for j in 0..n {
        for i in 0..m {
            *a.offset((i + j * lda) as isize) += alpha * at(x, i, incx) * at(y, j, incy);
        }
    }
}

#[rustfmt::skip]
#[no_mangle]
pub unsafe extern "C" fn cblas_dgemv(
    layout: CBLAS_LAYOUT,
    trans: CBLAS_TRANSPOSE,
    m: c_int,
    n: c_int,
    alpha: c_double,
    a: *const c_double,
    lda: c_int,
    x: *const c_double,
    incx: c_int,
    beta: c_double,
    y: *mut c_double,
    incy: c_int
) {
    record("dgemv");
    col_major(layout);
    let t = is_trans(trans);
    let (rows, cols) = if t { (n, m) } else { (m, n) };
    for i in 0..rows {
        let mut sum = 0.;
        for p in 0..cols {
            let aip = if t { at(a, p + i * lda, 1) } else { at(a, i + p * lda, 1) };
            sum += aip * at(x, p, incx);
        }
        let yi = y.offset((i * incy) as isize);
        *yi = if beta == 0. { alpha * sum } else { alpha * sum + beta * *yi };
    }
}

#[allow(clippy::too_many_arguments)]
unsafe fn gemm_ref<T>(
    transa: CBLAS_TRANSPOSE, transb: CBLAS_TRANSPOSE, m: c_int, n: c_int, k: c_int, alpha: T, a: *const T,
    lda: c_int, b: *const T, ldb: c_int, beta: T, c: *mut T, ldc: c_int,
) where
    T: Copy + Zero + PartialEq + Add<Output = T> + Mul<Output = T>,
{
    let (ta, tb) = (is_trans(transa), is_trans(transb));
    for j in 0..n {
        for i in 0..m {
            let mut sum = T::zero();
            for p in 0..k {
                let aip = if ta { at(a, p + i * lda, 1) } else { at(a, i + p * lda, 1) };
                let bpj = if tb { at(b, j + p * ldb, 1) } else { at(b, p + j * ldb, 1) };
                sum = sum + aip * bpj;
            }
            let cij = c.offset((i + j * ldc) as isize);
            *cij = if beta.is_zero() { alpha * sum } else { alpha * sum + beta * *cij };
        }
    }
}

#[rustfmt::skip]
#[no_mangle]
pub unsafe extern "C" fn cblas_dgemm(
    layout: CBLAS_LAYOUT,
    transa: CBLAS_TRANSPOSE,
    transb: CBLAS_TRANSPOSE,
    m: c_int,
    n: c_int,
    k: c_int,
    alpha: c_double,
    a: *const c_double,
    lda: c_int,
    b: *const c_double,
    ldb: c_int,
    beta: c_double,
    c: *mut c_double,
    ldc: c_int
) {
    record("dgemm");
    col_major(layout);
    gemm_ref(transa, transb, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc);
}

#[rustfmt::skip]
#[no_mangle]
pub unsafe extern "C" fn cblas_zgemm(
    layout: CBLAS_LAYOUT,
    transa: CBLAS_TRANSPOSE,
    transb: CBLAS_TRANSPOSE,
    m: c_int,
    n: c_int,
    k: c_int,
    alpha: *const c_double_complex,
    a: *const c_double_complex,
    lda: c_int,
    b: *const c_double_complex,
    ldb: c_int,
    beta: *const c_double_complex,
    c: *mut c_double_complex,
    ldc: c_int
) {
    record("zgemm");
    col_major(layout);
    let alpha = *(alpha as *const Complex64);
    let beta = *(beta as *const Complex64);
    gemm_ref(transa, transb, m, n, k, alpha, a as *const Complex64, lda, b as *const Complex64, ldb, beta,
             c as *mut Complex64, ldc);
}
