// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use num_complex::Complex;

/// Element kinds that can be stored in an array.
///
/// `'static` for type-based specialization in the routine dispatcher. Every
/// element kind names the value that freshly allocated, not yet written
/// slots read as: zero for numbers, `false` for booleans and `None` for
/// reference slots.
pub trait Element: Clone + fmt::Debug + 'static {
    /// The value of an unset storage slot.
    fn default_value() -> Self;
}

macro_rules! impl_element_zero {
    ($($t:ty),*) => {
        $(
        impl Element for $t {
            #[inline]
            fn default_value() -> Self {
                <$t as num_traits::Zero>::zero()
            }
        }
        )*
    };
}

impl_element_zero!(f32, f64, i32, i64, Complex<f32>, Complex<f64>);

impl Element for bool {
    #[inline]
    fn default_value() -> Self {
        false
    }
}

impl<T> Element for Option<T>
where
    T: Clone + fmt::Debug + 'static,
{
    #[inline]
    fn default_value() -> Self {
        None
    }
}
