// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Operand layouts a column-major BLAS can address.
//!
//! A BLAS matrix argument is a pointer, a transpose flag and a leading
//! dimension `ld`: element (i, j) lives at `ptr + i + j * ld`, and the
//! routine requires `ld >= max(1, rows)`. A strided matrix qualifies when its
//! row stride is 1 and its column stride is a valid `ld`, or, read as its
//! transpose, when its column stride is 1 and its row stride is a valid `ld`.
//! Strides of axes of length 1 are never used and do not disqualify.

use super::{vector_like, Op};
use crate::{Array, Ix, Ixs, LinalgScalar};

/// Largest extent or stride expressible as a BLAS `int`.
const BLAS_INDEX_MAX: Ixs = i32::MAX as Ixs;

/// How a matrix operand is described to a column-major BLAS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct BlasMatrix {
    /// `Keep` if the storage holds the matrix column-major, `Transpose` if it
    /// holds the matrix row-major (the storage is then the column-major
    /// layout of the transpose).
    pub(crate) storage: Op,
    /// Leading dimension of the stored (column-major) matrix.
    pub(crate) ld: Ix,
}

/// Return the BLAS description of a matrix operand, or `None` if its layout
/// cannot be expressed (negative or zero strides, overlapping columns,
/// neither axis unit-strided) or it is empty.
pub(crate) fn blas_matrix<A: LinalgScalar>(a: &Array<A>) -> Option<BlasMatrix> {
    let (rows, cols) = match *a.shape() {
        [rows, cols] if rows > 0 && cols > 0 => (rows, cols),
        _ => return None,
    };
    let (s0, s1) = (a.strides()[0], a.strides()[1]);
    if let Some(ld) = column_major_ld(rows, cols, s0, s1) {
        Some(BlasMatrix { storage: Op::Keep, ld })
    } else {
        column_major_ld(cols, rows, s1, s0).map(|ld| BlasMatrix {
            storage: Op::Transpose,
            ld,
        })
    }
}

/// Leading dimension of a `rows × cols` matrix with strides (`s0`, `s1`)
/// read column-major.
fn column_major_ld(rows: Ix, cols: Ix, s0: Ixs, s1: Ixs) -> Option<Ix> {
    if rows > 1 && s0 != 1 {
        return None;
    }
    if rows as Ixs > BLAS_INDEX_MAX || cols as Ixs > BLAS_INDEX_MAX {
        return None;
    }
    let min_ld = rows.max(1) as Ixs;
    let ld = if cols > 1 { s1 } else { min_ld };
    if ld < min_ld || ld > BLAS_INDEX_MAX {
        return None;
    }
    Some(ld as Ix)
}

/// Return `true` if `x` is a non-empty vector whose elements are adjacent in
/// storage, so it can be passed with increment 1.
pub(crate) fn blas_vector<A: LinalgScalar>(x: &Array<A>) -> bool {
    vector_like(x) && !x.is_empty() && x.is_contiguous() && x.len() as Ixs <= BLAS_INDEX_MAX
}

/// Return `true` if the whole array is one run of adjacent storage slots.
pub(crate) fn blas_flat<A: LinalgScalar>(x: &Array<A>) -> bool {
    !x.is_empty() && x.is_contiguous() && x.len() as Ixs <= BLAS_INDEX_MAX
}
