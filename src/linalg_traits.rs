// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{One, Zero};
use std::ops::{Add, Div, Mul, Sub};

use crate::element::Element;

/// Elements that support linear algebra operations.
///
/// `Element` brings `'static` for type-based specialization, `Copy` so that
/// they don't need move semantics or destructors, `PartialEq` for the unit
/// and zero scale factor checks, and the rest are numerical traits.
pub trait LinalgScalar:
    Element
    + Copy
    + PartialEq
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
}

impl<T> LinalgScalar for T where
    T: Element
        + Copy
        + PartialEq
        + Zero
        + One
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
{
}
