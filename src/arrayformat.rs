// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::element::Element;
use crate::storage::Storage;
use crate::{ArrayBase, Ixs};

/// Format the array as nested brackets, axis 0 outermost, so a matrix reads
/// row by row.
fn format_array<A, S, F>(array: &ArrayBase<S>, f: &mut fmt::Formatter<'_>, mut format: F) -> fmt::Result
where
    F: FnMut(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    S: Storage<Elem = A>,
{
    format_axis(array, f, &mut format, 0, array.offset as Ixs)
}

fn format_axis<A, S, F>(
    array: &ArrayBase<S>,
    f: &mut fmt::Formatter<'_>,
    format: &mut F,
    axis: usize,
    pos: Ixs,
) -> fmt::Result
where
    F: FnMut(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    S: Storage<Elem = A>,
{
    let ndim = array.shape.len();
    if axis == ndim {
        let elt = array.data.borrow().get(pos as usize);
        return format(&elt, f);
    }
    write!(f, "[")?;
    for i in 0..array.shape[axis] {
        if i > 0 {
            if axis + 1 == ndim {
                write!(f, ", ")?;
            } else {
                // New row.
                write!(f, ",")?;
                writeln!(f)?;
                for _ in 0..=axis {
                    write!(f, " ")?;
                }
            }
        }
        format_axis(array, f, format, axis + 1, pos + i as Ixs * array.strides[axis])?;
    }
    write!(f, "]")
}

// NOTE: We can impl other fmt traits here
/// Format the array using `Display` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style.
impl<A: fmt::Display, S> fmt::Display for ArrayBase<S>
where
    S: Storage<Elem = A>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, <_>::fmt)
    }
}

/// Format the array using `Debug` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style.
impl<A: Element, S> fmt::Debug for ArrayBase<S>
where
    S: Storage<Elem = A>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Add extra information for Debug
        format_array(self, f, <_>::fmt)?;
        write!(
            f,
            " shape={:?}, strides={:?}, offset={}, view={}",
            self.shape(),
            self.strides(),
            self.offset,
            self.view
        )
    }
}

/// Format the array using `LowerExp` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style.
impl<A: fmt::LowerExp, S> fmt::LowerExp for ArrayBase<S>
where
    S: Storage<Elem = A>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, <_>::fmt)
    }
}
