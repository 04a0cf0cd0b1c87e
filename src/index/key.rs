// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::mem;

/// A row or column label.
///
/// Keys have a total natural order, first by variant (`Int < Str < Bool`)
/// and then by value; [`IndexBuilder::sort`](super::IndexBuilder::sort) uses
/// it. Range queries only compare keys of the same variant, see
/// [`.comparable()`](Key::comparable).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl Key {
    /// Return `true` if `self` and `other` are of the same variant, so that
    /// ordering them is meaningful.
    ///
    /// ```
    /// use ndframe::Key;
    ///
    /// assert!(Key::from(1).comparable(&Key::from(7)));
    /// assert!(!Key::from(1).comparable(&Key::from("a")));
    /// ```
    pub fn comparable(&self, other: &Key) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    /// Return the integer value if this is an integer key.
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Key::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Return the position this key denotes in a dense integer index.
    pub(crate) fn as_position(&self) -> Option<usize> {
        self.as_int().and_then(|i| usize::try_from(i).ok())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => f.write_str(s),
            Key::Bool(b) => write!(f, "{}", b),
        }
    }
}

macro_rules! impl_key_from_int {
    ($($t:ty),*) => {
        $(
        impl From<$t> for Key {
            #[inline]
            fn from(i: $t) -> Key {
                Key::Int(i as i64)
            }
        }
        )*
    };
}

impl_key_from_int!(i64, i32, u32, usize);

impl From<&str> for Key {
    fn from(s: &str) -> Key {
        Key::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Key {
        Key::Str(s)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Key {
        Key::Bool(b)
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Key {
        k.clone()
    }
}
