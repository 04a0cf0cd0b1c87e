extern crate approx;
extern crate blas_src;
extern crate defmac;
extern crate ndframe;
extern crate num_complex;
extern crate num_traits;

use ndframe::linalg::{Op, Routines};
use ndframe::{Array, ArrayFactory, Ix, LinalgScalar, Slice};
use ndframe_gen::array_builder::{ArrayBuilder, Order};

use approx::assert_relative_eq;
use defmac::defmac;
use itertools::iproduct;
use num_complex::Complex64;

fn range_mat<A: LinalgScalar>(m: Ix, n: Ix) -> Array<A>
{
    ArrayBuilder::new(&[m, n]).build()
}

fn range_mat_complex64(m: Ix, n: Ix) -> Array<Complex64>
{
    ArrayBuilder::new(&[m, n]).build()
}

fn range1_mat64(m: Ix) -> Array<f64>
{
    ArrayBuilder::new(&[m]).build()
}

// simple, slow, correct (hopefully) mat mul
fn reference_mat_mul<A: LinalgScalar>(lhs: &Array<A>, rhs: &Array<A>) -> Array<A>
{
    let (m, k, n) = (lhs.rows(), lhs.columns(), rhs.columns());
    assert_eq!(k, rhs.rows());
    let mut elems = Vec::with_capacity(m * n);
    for j in 0..n {
        for i in 0..m {
            let v = (0..k).fold(A::zero(), |s, x| s + lhs.get_ij(i, x).unwrap() * rhs.get_ij(x, j).unwrap());
            elems.push(v);
        }
    }
    Array::from_shape_vec(&[m, n], elems).unwrap()
}

// simple, slow, correct (hopefully) mat vec mul
fn reference_mat_vec_mul(lhs: &Array<f64>, rhs: &Array<f64>) -> Array<f64>
{
    let k = rhs.len();
    let col = rhs.copy().reshape(&[k, 1]).unwrap();
    reference_mat_mul(lhs, &col).flatten()
}

fn stepped<A: LinalgScalar>(a: &Array<A>, steps: &[isize]) -> Array<A>
{
    let slices: Vec<Slice> = steps.iter().map(|&s| Slice::from(..).step_by(s)).collect();
    a.slice(&slices).unwrap()
}

// Check that matrix multiplication supports reversed axes
#[test]
fn mat_mul_rev()
{
    let bj = ArrayFactory::blas();
    let (m, n, k) = (16, 16, 16);
    let a = range_mat::<f64>(m, n);
    let b = range_mat::<f64>(n, k);
    let rev_storage = bj.zeros::<f64>(&[n, k]);
    let mut rev = stepped(&rev_storage, &[-1, 1]);
    rev.assign_from(&b).unwrap();

    let c1 = bj.matmul(&a, &b).unwrap();
    let c2 = bj.matmul(&a, &rev).unwrap();
    assert_eq!(c1, c2);
}

// Check that matrix multiplication supports arrays with zero rows or columns
#[test]
fn mat_mut_zero_len()
{
    let bj = ArrayFactory::blas();
    defmac!(mat_mul_zero_len range_mat_fn => {
        for n in 0..4 {
            for m in 0..4 {
                let a = range_mat_fn(m, n);
                let b = range_mat_fn(n, 0);
                assert_eq!(bj.matmul(&a, &b).unwrap().shape(), &[m, 0]);
            }
            for k in 0..4 {
                let a = range_mat_fn(0, n);
                let b = range_mat_fn(n, k);
                assert_eq!(bj.matmul(&a, &b).unwrap().shape(), &[0, k]);
            }
        }
    });
    mat_mul_zero_len!(range_mat::<f32>);
    mat_mul_zero_len!(range_mat::<f64>);
    mat_mul_zero_len!(range_mat::<i32>);
}

#[test]
fn gen_mat_mul()
{
    let bj = ArrayFactory::blas();
    let alpha = -2.3;
    let beta = 3.14;
    let sizes = vec![
        (4, 4, 4),
        (8, 8, 8),
        (8, 8, 1),
        (1, 10, 10),
        (10, 1, 10),
        (10, 10, 1),
        (1, 10, 1),
        (10, 1, 1),
        (1, 1, 10),
        (4, 17, 3),
        (17, 3, 22),
        (19, 18, 2),
        (15, 16, 17),
        (67, 50, 62),
    ];
    let strides = &[1, 2, -1, -2];
    let orders = [Order::ColumnMajor, Order::RowMajor];

    // test different strides and memory orders
    for (&s1, &s2) in iproduct!(strides, strides) {
        for &(m, k, n) in &sizes {
            for (ord1, ord2, ord3) in iproduct!(orders, orders, orders) {
                println!("Case s1={}, s2={}, orders={:?}, {:?}, {:?}", s1, s2, ord1, ord2, ord3);
                let a = ArrayBuilder::new(&[m, k]).memory_order(ord1).build::<f64>().mul_scalar(0.5);
                let b = ArrayBuilder::new(&[k, n]).memory_order(ord2).build::<f64>();
                let c = ArrayBuilder::new(&[m, n]).memory_order(ord3).build::<f64>();
                let answer = c.copy();

                let av = stepped(&a, &[s1, s2]);
                let bv = stepped(&b, &[s2, s2]);
                let mut cv = stepped(&c, &[s1, s2]);

                let answer_part = reference_mat_mul(&av, &bv)
                    .mul_scalar(alpha)
                    .add(&cv.mul_scalar(beta))
                    .unwrap();
                stepped(&answer, &[s1, s2]).assign_from(&answer_part).unwrap();

                bj.routines()
                    .gemm(Op::Keep, Op::Keep, alpha, &av, &bv, beta, &mut cv)
                    .unwrap();
                assert_relative_eq!(c, answer, epsilon = 1e-12, max_relative = 1e-7);
            }
        }
    }
}

// Test y = A x where A is stored row-major
#[test]
fn gemm_64_1_f()
{
    let bj = ArrayFactory::blas();
    let a = range_mat::<f64>(64, 64).t();
    let (m, n) = (a.rows(), a.columns());
    // m x n  times n x 1  == m x 1
    let x = range_mat::<f64>(n, 1);
    let mut y = range_mat::<f64>(m, 1);
    let answer = reference_mat_mul(&a, &x).add(&y).unwrap();
    bj.routines().gemm(Op::Keep, Op::Keep, 1.0, &a, &x, 1.0, &mut y).unwrap();
    assert_relative_eq!(y, answer, epsilon = 1e-12, max_relative = 1e-7);
}

#[test]
fn gemm_c64_actually_complex()
{
    let bj = ArrayFactory::blas();
    let a = range_mat_complex64(4, 4).map(|i| if i.re > 8. { i.conj() } else { i });
    let b = range_mat_complex64(4, 6).map(|i| if i.re > 4. { i.conj() } else { i });
    let mut y = range_mat_complex64(4, 6);
    let alpha = Complex64::new(0., 1.0);
    let beta = Complex64::new(1.0, 1.0);
    let answer = reference_mat_mul(&a, &b)
        .mul_scalar(alpha)
        .add(&y.mul_scalar(beta))
        .unwrap();
    bj.routines().gemm(Op::Keep, Op::Keep, alpha, &a, &b, beta, &mut y).unwrap();
    assert_relative_eq!(
        y.map(|i| i.norm_sqr()),
        answer.map(|i| i.norm_sqr()),
        epsilon = 1e-12,
        max_relative = 1e-7
    );
}

#[test]
fn gen_mat_vec_mul()
{
    let bj = ArrayFactory::blas();
    let alpha = -2.3;
    let beta = 3.14;
    let sizes = vec![
        (4, 4),
        (8, 8),
        (17, 15),
        (4, 17),
        (17, 3),
        (19, 18),
        (16, 17),
        (15, 16),
        (67, 63),
    ];
    // test different strides
    for (&s1, &s2) in iproduct!(&[1, 2, -1, -2], &[1, 2, -1, -2]) {
        for &(m, k) in &sizes {
            for order in [Order::ColumnMajor, Order::RowMajor] {
                let a = ArrayBuilder::new(&[m, k]).memory_order(order).build::<f64>();
                let b = range1_mat64(k);
                let c = range1_mat64(m);
                let answer = c.copy();

                let a = stepped(&a, &[s1, s2]);
                let b = stepped(&b, &[s2]);
                let mut cv = stepped(&c, &[s1]);

                let answer_part = reference_mat_vec_mul(&a, &b)
                    .mul_scalar(alpha)
                    .add(&cv.mul_scalar(beta))
                    .unwrap();
                stepped(&answer, &[s1]).assign_from(&answer_part).unwrap();

                bj.routines()
                    .gemv(Op::Keep, alpha, &a, &b, beta, &mut cv)
                    .unwrap();
                assert_relative_eq!(c, answer, epsilon = 1e-12, max_relative = 1e-7);
            }
        }
    }
}

#[test]
fn vector_routines_agree_with_portable()
{
    let native = ArrayFactory::blas();
    let portable = ArrayFactory::new();
    for (&s, &n) in iproduct!(&[1, 2, -1], &[1, 7, 64]) {
        let x = stepped(&range1_mat64(n * 2), &[s]);
        let y = x.map(|v| 1. - v);
        assert_relative_eq!(
            native.routines().dot(&x, &y).unwrap(),
            portable.routines().dot(&x, &y).unwrap(),
            max_relative = 1e-12
        );
        assert_relative_eq!(native.routines().nrm2(&x), portable.routines().nrm2(&x), max_relative = 1e-12);
        assert_relative_eq!(native.routines().asum(&x), portable.routines().asum(&x), max_relative = 1e-12);
        assert_eq!(native.routines().iamax(&y), portable.routines().iamax(&y));
    }
}
