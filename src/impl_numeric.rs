// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{Float, FromPrimitive};

use crate::element::Element;
use crate::error::{non_conformant, Result};
use crate::numeric_util;
use crate::storage::Storage;
use crate::{ArrayBase, LinalgScalar};

/// # Numerical methods for arrays
impl<A, S> ArrayBase<S>
where
    S: Storage<Elem = A>,
    A: Element,
{
    /// Return the sum of all elements in the array.
    ///
    /// ```
    /// use ndframe::ArrayFactory;
    ///
    /// let a = ArrayFactory::new().from_rows(&[[1., 2.], [3., 4.]]).unwrap();
    /// assert_eq!(a.sum(), 10.);
    /// ```
    pub fn sum(&self) -> A
    where
        A: LinalgScalar,
    {
        if let Some(slc) = self.as_slice() {
            return numeric_util::unrolled_fold(&slc, A::zero, |a, b| a + b);
        }
        self.iter().fold(A::zero(), |acc, elt| acc + elt)
    }

    /// Return the product of all elements in the array.
    ///
    /// The product of an empty array is one.
    pub fn product(&self) -> A
    where
        A: LinalgScalar,
    {
        if let Some(slc) = self.as_slice() {
            return numeric_util::unrolled_fold(&slc, A::one, |a, b| a * b);
        }
        self.iter().fold(A::one(), |acc, elt| acc * elt)
    }

    /// Return the arithmetic mean of all elements, or `None` if the array is
    /// empty.
    pub fn mean(&self) -> Option<A>
    where
        A: LinalgScalar + FromPrimitive,
    {
        if self.is_empty() {
            return None;
        }
        let n = A::from_usize(self.len())?;
        Some(self.sum() / n)
    }

    /// Return the smallest element, or `None` if the array is empty.
    ///
    /// Elements that are unordered with respect to the running minimum (NaN)
    /// are skipped.
    pub fn min(&self) -> Option<A>
    where
        A: PartialOrd,
    {
        self.iter().fold(None, |acc, elt| match acc {
            Some(m) if !(elt < m) => Some(m),
            _ if elt != elt => acc,
            _ => Some(elt),
        })
    }

    /// Return the largest element, or `None` if the array is empty.
    ///
    /// Elements that are unordered with respect to the running maximum (NaN)
    /// are skipped.
    pub fn max(&self) -> Option<A>
    where
        A: PartialOrd,
    {
        self.iter().fold(None, |acc, elt| match acc {
            Some(m) if !(elt > m) => Some(m),
            _ if elt != elt => acc,
            _ => Some(elt),
        })
    }

    /// Return `true` if the arrays' elementwise differences are all within
    /// the given absolute tolerance, `false` otherwise.
    ///
    /// **Errors** with `NonConformantShape` if the shapes disagree.
    pub fn all_close<S2>(&self, rhs: &ArrayBase<S2>, tol: A) -> Result<bool>
    where
        A: Float,
        S2: Storage<Elem = A>,
    {
        if self.shape() != rhs.shape() {
            return Err(non_conformant(self.shape(), rhs.shape()));
        }
        Ok(self.iter().zip(rhs.iter()).all(|(x, y)| (x - y).abs() <= tol))
    }
}
