// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::Complex;

use crate::element::Element;
use crate::error::Result;
use crate::storage::Storage;
use crate::ArrayBase;

/// Elements that can be used as direct operands in arithmetic with arrays.
///
/// For example, `f64` is a `ScalarOperand` which means that for an array `a`,
/// arithmetic like `&a + 1.0` and `&a * 2.` is allowed.
///
/// Array-array arithmetic can fail on non-conformant shapes and is therefore
/// offered as methods returning `Result` ([`.add()`](ArrayBase::add) and
/// friends) rather than as operators.
pub trait ScalarOperand: Element {}
impl ScalarOperand for i32 {}
impl ScalarOperand for i64 {}
impl ScalarOperand for f32 {}
impl ScalarOperand for f64 {}
impl ScalarOperand for Complex<f32> {}
impl ScalarOperand for Complex<f64> {}

macro_rules! impl_binary_method(
    ($trt:ident, $operator:tt, $mth:ident, $doc:expr) => (
    /// Perform elementwise
    #[doc=$doc]
    /// between `self` and `rhs`, and return the result as a new array of
    /// the shape of `self`.
    ///
    /// **Errors** with `NonConformantShape` unless the shapes are equal or
    /// both arrays are vectors of equal length.
    pub fn $mth<S2>(&self, rhs: &ArrayBase<S2>) -> Result<Self>
    where
        A: $trt<Output = A>,
        S2: Storage<Elem = A>,
    {
        self.zip_with(rhs, |x, y| x $operator y)
    }
    );
);

/// # Arithmetic
impl<A, S> ArrayBase<S>
where
    S: Storage<Elem = A>,
    A: Element,
{
    impl_binary_method!(Add, +, add, "addition");
    impl_binary_method!(Sub, -, sub, "subtraction");
    impl_binary_method!(Mul, *, mul, "multiplication");
    impl_binary_method!(Div, /, div, "division");

    /// Return a new array with every element multiplied by `x`.
    pub fn mul_scalar(&self, x: A) -> Self
    where
        A: Mul<Output = A>,
    {
        let elems = self.iter().map(|elt| elt * x.clone()).collect();
        Self::from_storage(S::from_vec(elems), &self.shape)
    }

    /// Return a new array with `x` added to every element.
    pub fn add_scalar(&self, x: A) -> Self
    where
        A: Add<Output = A>,
    {
        let elems = self.iter().map(|elt| elt + x.clone()).collect();
        Self::from_storage(S::from_vec(elems), &self.shape)
    }
}

macro_rules! impl_scalar_op(
    ($trt:ident, $operator:tt, $mth:ident, $doc:expr) => (
/// Perform elementwise
#[doc=$doc]
/// between the reference `self` and the scalar `x`,
/// and return the result as a new array.
impl<A, S> $trt<A> for &ArrayBase<S>
where
    A: ScalarOperand + $trt<Output = A>,
    S: Storage<Elem = A>,
{
    type Output = ArrayBase<S>;
    fn $mth(self, x: A) -> Self::Output {
        let elems = self.iter().map(|elt| elt $operator x.clone()).collect();
        ArrayBase::from_storage(S::from_vec(elems), &self.shape)
    }
}
    );
);

impl_scalar_op!(Add, +, add, "addition");
impl_scalar_op!(Sub, -, sub, "subtraction");
impl_scalar_op!(Mul, *, mul, "multiplication");
impl_scalar_op!(Div, /, div, "division");

impl<A, S> Neg for &ArrayBase<S>
where
    A: Element + Neg<Output = A>,
    S: Storage<Elem = A>,
{
    type Output = ArrayBase<S>;
    /// Perform an elementwise negation of reference `self` and return the
    /// result as a new array.
    fn neg(self) -> Self::Output {
        self.map_to_same(|x| -x)
    }
}

impl<A, S> ArrayBase<S>
where
    S: Storage<Elem = A>,
    A: Element,
{
    fn map_to_same<F>(&self, f: F) -> Self
    where
        F: FnMut(A) -> A,
    {
        let elems = self.iter().map(f).collect();
        Self::from_storage(S::from_vec(elems), &self.shape)
    }
}

#[cfg(test)]
mod tests {
    use crate::{DoubleArray, Error, IntArray};

    #[test]
    fn elementwise_arrays() {
        let a = IntArray::from_vec(vec![1, 2, 3]);
        let b = IntArray::from_vec(vec![4, 5, 6]);
        assert_eq!(a.add(&b).unwrap().to_vec(), vec![5, 7, 9]);
        assert_eq!(b.sub(&a).unwrap().to_vec(), vec![3, 3, 3]);
        assert_eq!(a.mul(&b).unwrap().to_vec(), vec![4, 10, 18]);
        assert_eq!(b.div(&a).unwrap().to_vec(), vec![4, 2, 2]);
    }

    #[test]
    fn mismatch_names_shapes() {
        let a = DoubleArray::default(&[2, 4]);
        let b = DoubleArray::default(&[3, 2]);
        assert_eq!(
            a.add(&b).err(),
            Some(Error::NonConformantShape {
                lhs: vec![2, 4].into(),
                rhs: vec![3, 2].into(),
            })
        );
    }

    #[test]
    fn scalar_operators() {
        let a = DoubleArray::from_vec(vec![1., 2.]);
        assert_eq!((&a * 2.).to_vec(), vec![2., 4.]);
        assert_eq!((&a + 1.).to_vec(), vec![2., 3.]);
        assert_eq!((&a - 1.).to_vec(), vec![0., 1.]);
        assert_eq!((&a / 2.).to_vec(), vec![0.5, 1.]);
        assert_eq!((-&a).to_vec(), vec![-1., -2.]);
        assert_eq!(a.mul_scalar(3.).to_vec(), vec![3., 6.]);
        assert_eq!(a.add_scalar(3.).to_vec(), vec![4., 5.]);
    }

    #[test]
    fn operands_may_be_views() {
        let m = IntArray::from_shape_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
        let row = m.get_row(1).unwrap();
        let col = m.get_column(0).unwrap();
        assert_eq!(row.add(&col).unwrap().to_vec(), vec![3, 6]);
    }
}
