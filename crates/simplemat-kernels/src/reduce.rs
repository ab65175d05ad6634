//! Reductions and predicates over all elements.
//!
//! Accumulation happens in the native element type; callers widen the
//! result afterwards.

use num_traits::Float;
use simplemat_core::{DenseMatrix, Element};

/// Sum of all elements.
pub fn element_sum<T: Element>(a: &DenseMatrix<T>) -> T {
    a.as_slice().iter().fold(T::zero(), |acc, &v| acc + v)
}

/// Largest absolute value; zero for an empty matrix. NaN elements are skipped.
pub fn element_max_abs<T: Element>(a: &DenseMatrix<T>) -> T {
    a.as_slice().iter().fold(T::zero(), |max, &v| {
        let abs = Float::abs(v);
        if abs > max {
            abs
        } else {
            max
        }
    })
}

/// True if any element is NaN or infinite.
pub fn has_uncountable<T: Element>(a: &DenseMatrix<T>) -> bool {
    a.as_slice().iter().any(|&v| !Float::is_finite(v))
}

/// Sum of the main diagonal, over `min(rows, cols)` entries.
pub fn trace<T: Element>(a: &DenseMatrix<T>) -> T {
    let n = a.rows().min(a.cols());
    let cols = a.cols();
    let data = a.as_slice();
    (0..n).fold(T::zero(), |acc, i| acc + data[i * cols + i])
}

/// Inner product of two equally long vectors, regardless of orientation.
pub fn inner_product<T: Element>(u: &DenseMatrix<T>, v: &DenseMatrix<T>) -> T {
    debug_assert_eq!(u.len(), v.len());
    u.as_slice()
        .iter()
        .zip(v.as_slice())
        .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

/// Frobenius norm.
///
/// Elements are divided by the largest magnitude before squaring so that
/// the intermediate sum cannot overflow for large but finite entries.
pub fn norm_f<T: Element>(a: &DenseMatrix<T>) -> T {
    let scale = element_max_abs(a);
    if scale == T::zero() {
        return T::zero();
    }
    let total = a.as_slice().iter().fold(T::zero(), |acc, &v| {
        let s = v / scale;
        acc + s * s
    });
    scale * Float::sqrt(total)
}
