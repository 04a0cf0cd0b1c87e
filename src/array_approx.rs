// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::element::Element;
use crate::storage::Storage;
use crate::ArrayBase;

impl<A, S> ArrayBase<S>
where
    A: Element,
    S: Storage<Elem = A>,
{
    /// A test for equality that uses the elementwise absolute difference to
    /// compute the approximate equality of two arrays.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn abs_diff_eq<S2>(&self, other: &ArrayBase<S2>, epsilon: A::Epsilon) -> bool
    where
        A: AbsDiffEq<S2::Elem>,
        A::Epsilon: Clone,
        S2: Storage,
    {
        <Self as AbsDiffEq<_>>::abs_diff_eq(self, other, epsilon)
    }

    /// A test for equality that uses an elementwise relative comparison if
    /// the values are far apart; and the absolute difference otherwise.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn relative_eq<S2>(&self, other: &ArrayBase<S2>, epsilon: A::Epsilon, max_relative: A::Epsilon) -> bool
    where
        A: RelativeEq<S2::Elem>,
        A::Epsilon: Clone,
        S2: Storage,
    {
        <Self as RelativeEq<_>>::relative_eq(self, other, epsilon, max_relative)
    }
}

/// **Requires crate feature `"approx"`**
impl<A, B, S, S2> AbsDiffEq<ArrayBase<S2>> for ArrayBase<S>
where
    A: Element + AbsDiffEq<B>,
    A::Epsilon: Clone,
    B: Element,
    S: Storage<Elem = A>,
    S2: Storage<Elem = B>,
{
    type Epsilon = A::Epsilon;

    fn default_epsilon() -> A::Epsilon {
        A::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &ArrayBase<S2>, epsilon: A::Epsilon) -> bool {
        self.shape() == other.shape()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| A::abs_diff_eq(&a, &b, epsilon.clone()))
    }
}

/// **Requires crate feature `"approx"`**
impl<A, B, S, S2> RelativeEq<ArrayBase<S2>> for ArrayBase<S>
where
    A: Element + RelativeEq<B>,
    A::Epsilon: Clone,
    B: Element,
    S: Storage<Elem = A>,
    S2: Storage<Elem = B>,
{
    fn default_max_relative() -> A::Epsilon {
        A::default_max_relative()
    }

    fn relative_eq(&self, other: &ArrayBase<S2>, epsilon: A::Epsilon, max_relative: A::Epsilon) -> bool {
        self.shape() == other.shape()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| A::relative_eq(&a, &b, epsilon.clone(), max_relative.clone()))
    }
}

/// **Requires crate feature `"approx"`**
impl<A, B, S, S2> UlpsEq<ArrayBase<S2>> for ArrayBase<S>
where
    A: Element + UlpsEq<B>,
    A::Epsilon: Clone,
    B: Element,
    S: Storage<Elem = A>,
    S2: Storage<Elem = B>,
{
    fn default_max_ulps() -> u32 {
        A::default_max_ulps()
    }

    fn ulps_eq(&self, other: &ArrayBase<S2>, epsilon: A::Epsilon, max_ulps: u32) -> bool {
        self.shape() == other.shape()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| A::ulps_eq(&a, &b, epsilon.clone(), max_ulps))
    }
}
