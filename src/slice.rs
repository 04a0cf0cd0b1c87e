// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};

use crate::error::{out_of_range, Result};
use crate::{Ix, Ixs};

/// A slice (range with step size) of one axis.
///
/// Negative `start` or `end` indexes are counted from the back of the axis. If
/// `end` is `None`, the slice extends to the end of the axis.
///
/// ## Examples
///
/// `Slice::new(0, None, 1)` is the full range of an axis. It can also be
/// created with `Slice::from(..)`.
///
/// `Slice::new(a, Some(b), 2)` is every second element from `a` until `b`.
/// It can also be created with `Slice::from(a..b).step_by(2)`.
///
/// `Slice::new(a, None, -1)` is every element, from `a` until the end, in
/// reverse order. It can also be created with `Slice::from(a..).step_by(-1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slice {
    pub start: isize,
    pub end: Option<isize>,
    pub step: isize,
}

impl Slice {
    /// Create a new `Slice` with the given extents.
    ///
    /// `step` must be nonzero.
    /// (This method checks with a debug assertion that `step` is not zero.)
    pub fn new(start: isize, end: Option<isize>, step: isize) -> Slice {
        debug_assert_ne!(step, 0, "Slice::new: step must be nonzero");
        Slice { start, end, step }
    }

    /// Create a new `Slice` with the given step size (multiplied with the
    /// previous step size).
    ///
    /// `step` must be nonzero.
    /// (This method checks with a debug assertion that `step` is not zero.)
    #[inline]
    pub fn step_by(self, step: isize) -> Self {
        debug_assert_ne!(step, 0, "Slice::step_by: step must be nonzero");
        Slice {
            step: self.step * step,
            ..self
        }
    }

    /// Resolve the slice against an axis of length `len` with stride
    /// `stride`.
    ///
    /// Returns the storage offset of the first selected element relative to
    /// the axis start, the new length and the new stride.
    pub(crate) fn resolve(self, len: Ix, stride: Ixs) -> Result<(Ixs, Ix, Ixs)> {
        let start = abs_index(len, self.start)?;
        let end = abs_index(len, self.end.unwrap_or(len as isize))?;
        let end = end.max(start);
        let m = end - start;
        let step = if self.step == 0 { 1 } else { self.step };
        let abs_step = step.unsigned_abs();

        let mut offset = start as Ixs * stride;
        if step < 0 && m > 0 {
            // start from the far end of the range
            offset += (m - 1) as Ixs * stride;
        }
        let new_len = m / abs_step + if m % abs_step > 0 { 1 } else { 0 };
        Ok((offset, new_len, stride * step))
    }
}

fn abs_index(len: Ix, index: isize) -> Result<Ix> {
    let abs = if index < 0 {
        len as isize + index
    } else {
        index
    };
    if abs < 0 || abs as Ix > len {
        Err(out_of_range(index.unsigned_abs(), len))
    } else {
        Ok(abs as Ix)
    }
}

macro_rules! impl_slice_from_index_type {
    ($index:ty) => {
        impl From<Range<$index>> for Slice {
            #[inline]
            fn from(r: Range<$index>) -> Slice {
                Slice {
                    start: r.start as isize,
                    end: Some(r.end as isize),
                    step: 1,
                }
            }
        }

        impl From<RangeInclusive<$index>> for Slice {
            #[inline]
            fn from(r: RangeInclusive<$index>) -> Slice {
                let end = *r.end() as isize;
                Slice {
                    start: *r.start() as isize,
                    end: if end == -1 { None } else { Some(end + 1) },
                    step: 1,
                }
            }
        }

        impl From<RangeFrom<$index>> for Slice {
            #[inline]
            fn from(r: RangeFrom<$index>) -> Slice {
                Slice {
                    start: r.start as isize,
                    end: None,
                    step: 1,
                }
            }
        }

        impl From<RangeTo<$index>> for Slice {
            #[inline]
            fn from(r: RangeTo<$index>) -> Slice {
                Slice {
                    start: 0,
                    end: Some(r.end as isize),
                    step: 1,
                }
            }
        }
    };
}

impl_slice_from_index_type!(isize);
impl_slice_from_index_type!(usize);
impl_slice_from_index_type!(i32);

impl From<RangeFull> for Slice {
    #[inline]
    fn from(_: RangeFull) -> Slice {
        Slice {
            start: 0,
            end: None,
            step: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_forward() {
        assert_eq!(Slice::from(..).resolve(5, 2).unwrap(), (0, 5, 2));
        assert_eq!(Slice::from(1..4).resolve(5, 1).unwrap(), (1, 3, 1));
        assert_eq!(Slice::from(0..5).step_by(2).resolve(5, 1).unwrap(), (0, 3, 2));
        assert_eq!(Slice::from(-2..).resolve(5, 1).unwrap(), (3, 2, 1));
        assert_eq!(Slice::from(1..=3).resolve(5, 1).unwrap(), (1, 3, 1));
    }

    #[test]
    fn resolve_reverse() {
        // elements 4, 3, 2, 1, 0
        assert_eq!(Slice::from(..).step_by(-1).resolve(5, 1).unwrap(), (4, 5, -1));
        // elements 4, 2, 0 with stride 3
        assert_eq!(Slice::from(..).step_by(-2).resolve(5, 3).unwrap(), (12, 3, -6));
    }

    #[test]
    fn resolve_empty_and_out_of_range() {
        assert_eq!(Slice::from(3..1).resolve(5, 1).unwrap(), (3, 0, 1));
        assert!(Slice::from(0..6).resolve(5, 1).is_err());
        assert!(Slice::from(-6..).resolve(5, 1).is_err());
    }
}
