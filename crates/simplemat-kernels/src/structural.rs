//! Structural kernels: transpose, sub-block extraction and Kronecker product.
//!
//! Shapes are validated by the caller; these routines only `debug_assert!`.

use simplemat_core::{DenseMatrix, Element};
use std::ops::Range;

/// Block edge used by the cache-friendly transpose.
const TRANSPOSE_BLOCK: usize = 32;

/// Writes `a^T` into `out`, which must be `(a.cols, a.rows)`.
pub fn transpose<T: Element>(a: &DenseMatrix<T>, out: &mut DenseMatrix<T>) {
    let (rows, cols) = a.shape();
    debug_assert_eq!(out.shape(), (cols, rows));

    let src = a.as_slice();
    let dst = out.as_mut_slice();
    for i0 in (0..rows).step_by(TRANSPOSE_BLOCK) {
        let i1 = (i0 + TRANSPOSE_BLOCK).min(rows);
        for j0 in (0..cols).step_by(TRANSPOSE_BLOCK) {
            let j1 = (j0 + TRANSPOSE_BLOCK).min(cols);
            for i in i0..i1 {
                for j in j0..j1 {
                    dst[j * rows + i] = src[i * cols + j];
                }
            }
        }
    }
}

/// Transposes a square matrix in place.
pub fn transpose_square_in_place<T: Element>(a: &mut DenseMatrix<T>) {
    let n = a.rows();
    debug_assert!(a.is_square());

    let data = a.as_mut_slice();
    for i in 0..n {
        for j in (i + 1)..n {
            data.swap(i * n + j, j * n + i);
        }
    }
}

/// Copies `src[rows, cols]` into `dst` with its top-left corner at
/// `(dst_row, dst_col)`.
pub fn extract<T: Element>(
    src: &DenseMatrix<T>,
    rows: Range<usize>,
    cols: Range<usize>,
    dst: &mut DenseMatrix<T>,
    dst_row: usize,
    dst_col: usize,
) {
    debug_assert!(rows.end <= src.rows() && cols.end <= src.cols());
    let width = cols.len();
    for (offset, r) in rows.enumerate() {
        let from = &src.row(r)[cols.clone()];
        dst.row_mut(dst_row + offset)[dst_col..dst_col + width].copy_from_slice(from);
    }
}

/// Writes the Kronecker product `a ⊗ b` into `out`.
pub fn kron<T: Element>(a: &DenseMatrix<T>, b: &DenseMatrix<T>, out: &mut DenseMatrix<T>) {
    let (ar, ac) = a.shape();
    let (br, bc) = b.shape();
    debug_assert_eq!(
        Some(out.shape()),
        ar.checked_mul(br).zip(ac.checked_mul(bc))
    );

    let out_cols = out.cols();
    let dst = out.as_mut_slice();
    for i in 0..ar {
        for j in 0..ac {
            let aij = a.as_slice()[i * ac + j];
            for k in 0..br {
                let base = (i * br + k) * out_cols + j * bc;
                for (l, &bkl) in b.row(k).iter().enumerate() {
                    dst[base + l] = aij * bkl;
                }
            }
        }
    }
}
