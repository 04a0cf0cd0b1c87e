// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use thiserror::Error;

use crate::index::Key;
use crate::Ix;

/// An error from an array, routine or label index operation.
///
/// All variants are contract violations detected at the call site; none of
/// them is transient and no operation retries internally.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// An element, position or axis index outside `[0, len)`.
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// The operand shapes of a binary or matrix operation are incompatible.
    #[error("non-conformant shapes {} and {}", Shape(.lhs), Shape(.rhs))]
    NonConformantShape { lhs: Box<[Ix]>, rhs: Box<[Ix]> },
    /// A reshape to a different size, or of a layout that cannot be
    /// reinterpreted without copying.
    #[error("cannot reshape array of shape {} into shape {}", Shape(.from), Shape(.to))]
    IncompatibleShape { from: Box<[Ix]>, to: Box<[Ix]> },
    /// The operation requires an array with a specific number of dimensions.
    #[error("expected an array with {expected} dimension(s), found {found}")]
    Dimensionality { expected: usize, found: usize },
    /// The key already exists in the label index.
    #[error("duplicate key: {0}")]
    DuplicateKey(Key),
    /// The key is not present in the label index.
    #[error("key not found: {0}")]
    KeyNotFound(Key),
    /// The range bounds cannot be ordered against each other.
    #[error("keys are not comparable: {0} and {1}")]
    IncomparableKeys(Key, Key),
}

/// `Result` with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

struct Shape<'a>(&'a [Ix]);

impl fmt::Display for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " × ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

#[cold]
#[inline(never)]
pub(crate) fn out_of_range(index: usize, len: usize) -> Error {
    Error::IndexOutOfRange { index, len }
}

#[cold]
#[inline(never)]
pub(crate) fn non_conformant(lhs: &[Ix], rhs: &[Ix]) -> Error {
    Error::NonConformantShape {
        lhs: lhs.into(),
        rhs: rhs.into(),
    }
}

#[cold]
#[inline(never)]
pub(crate) fn incompatible_shape(from: &[Ix], to: &[Ix]) -> Error {
    Error::IncompatibleShape {
        from: from.into(),
        to: to.into(),
    }
}

#[cold]
#[inline(never)]
pub(crate) fn dimensionality(expected: usize, found: usize) -> Error {
    Error::Dimensionality { expected, found }
}
