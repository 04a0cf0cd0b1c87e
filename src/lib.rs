// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![crate_name = "ndframe"]
#![doc(html_root_url = "https://docs.rs/ndframe/0.3/")]
#![allow(
    clippy::many_single_char_names,
    clippy::deref_addrof,
    clippy::unreadable_literal,
    clippy::len_without_is_empty
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! The `ndframe` crate provides strided n-dimensional arrays whose views
//! share one storage buffer, a routine set for dense linear algebra that
//! dispatches to a native BLAS when operand layout permits, and label indices
//! that translate tabular row and column keys into array positions.
//!
//! - [`ArrayBase`]: the n-dimensional array. Its layout is described by an
//!   offset, a shape and per-axis strides into a shared [`Storage`] buffer.
//!   Logical linear indices traverse axis 0 fastest (column-major order).
//! - Views: [`.transpose()`](ArrayBase::transpose),
//!   [`.get_row()`](ArrayBase::get_row), [`.slice()`](ArrayBase::slice),
//!   [`.reshape()`](ArrayBase::reshape) and friends never copy. Writes through
//!   a view are visible through the parent and every sibling view.
//!   [`.copy()`](ArrayBase::copy) is the operation that severs sharing.
//! - [`ArrayFactory`]: allocates arrays of every element kind and carries the
//!   [`Routines`](linalg::Routines) implementation used for linear algebra.
//! - [`linalg`]: `dot`, `asum`, `nrm2`, `iamax`, `scal`, `axpy`, `ger`, `gemv`
//!   and `gemm`. With the `blas` feature, [`linalg::Cblas`] calls the C BLAS
//!   for contiguous operands and falls back to the portable loops otherwise.
//! - [`index`]: the label [`Index`](index::Index) and its
//!   [`IndexBuilder`](index::IndexBuilder).
//!
//! Arrays are single threaded: storage is reference counted and not
//! synchronized, so arrays and views are neither `Send` nor `Sync`.
//!
//! ## Crate Feature Flags
//!
//! - `blas`: use a C BLAS through `cblas-sys` for the native routine set. The
//!   BLAS implementation is linked by the final binary, for example with
//!   `blas-src`.
//! - `approx`: implementations of the `approx` comparison traits for arrays.
//! - `serde`: serialization of arrays and label indices.
//!
//! ## Example
//!
//! ```
//! use ndframe::ArrayFactory;
//! use ndframe::linalg::Routines;
//!
//! let bj = ArrayFactory::new();
//! let a = bj.from_rows(&[[1., 2., 3.], [4., 5., 6.]]).unwrap();
//! a.get_row(1).unwrap().set(0, 99.).unwrap();
//! assert_eq!(a.get_ij(1, 0).unwrap(), 99.);
//!
//! let x = bj.from_vec(vec![1., 1., 1.]);
//! let mut y = bj.zeros::<f64>(&[2]);
//! bj.routines().gemv(ndframe::linalg::Op::Keep, 1., &a, &x, 0., &mut y).unwrap();
//! assert_eq!(y.to_vec(), vec![6., 110.]);
//! ```

#[cfg(feature = "blas")]
extern crate cblas_sys;

pub use crate::element::Element;
pub use crate::error::{Error, Result};
pub use crate::factory::ArrayFactory;
pub use crate::geometry::{Ix, Ixs};
pub use crate::index::{Index, IndexBuilder, Key};
pub use crate::linalg_traits::LinalgScalar;
pub use crate::slice::Slice;
pub use crate::storage::{Buffer, Storage};

use num_complex::Complex;
use std::cell::RefCell;
use std::rc::Rc;

mod element;
mod error;
mod factory;
pub mod geometry;
pub mod index;
pub mod linalg;
mod linalg_traits;
mod numeric_util;
mod slice;
mod storage;

mod arrayformat;
mod arraytraits;
mod impl_higher_order;
mod impl_methods;
mod impl_numeric;
mod impl_ops;
mod impl_views;
mod iterators;

#[cfg(feature = "approx")]
mod array_approx;
#[cfg(feature = "serde")]
mod array_serde;

pub use crate::iterators::Iter;

/// An *n*-dimensional array over a shared storage buffer.
///
/// The array is the tuple (storage, offset, shape, strides). The element at
/// logical linear index `i` lives at storage position
/// `offset + Σ coords[k] * strides[k]`, where `coords` is `i` decomposed in
/// column-major order (axis 0 varies fastest).
///
/// Type parameter `S` is the [`Storage`] backend; most code uses the alias
/// [`Array<A>`] which is backed by a [`Buffer`].
///
/// ## Ownership and views
///
/// Arrays created by the [`ArrayFactory`], by [`.copy()`](Self::copy) or by
/// [`.new_empty()`](Self::new_empty) own a dedicated buffer and report
/// [`.is_view()`](Self::is_view) as `false`. Every derived array (row, column,
/// diagonal, transpose, reshape, basic slice, block) holds another reference
/// to the same buffer; the buffer lives as long as the longest-lived array
/// referencing it.
///
/// ## Indexing and errors
///
/// Element access is bounds checked and reports
/// [`Error::IndexOutOfRange`]. Binary operations check shape conformance and
/// report [`Error::NonConformantShape`].
pub struct ArrayBase<S> {
    /// Storage shared with every view derived from this array.
    pub(crate) data: Rc<RefCell<S>>,
    /// Storage position of logical index 0.
    pub(crate) offset: usize,
    pub(crate) shape: Box<[Ix]>,
    pub(crate) strides: Box<[Ixs]>,
    pub(crate) view: bool,
}

/// An array backed by a [`Buffer`].
pub type Array<A> = ArrayBase<Buffer<A>>;

/// Array of `f64`.
pub type DoubleArray = Array<f64>;
/// Array of `i32`.
pub type IntArray = Array<i32>;
/// Array of `i64`.
pub type LongArray = Array<i64>;
/// Array of `bool`.
pub type BooleanArray = Array<bool>;
/// Array of `Complex<f64>`.
pub type ComplexArray = Array<Complex<f64>>;
/// Array of optional references; unset slots read as `None`.
pub type ReferenceArray<T> = Array<Option<T>>;
