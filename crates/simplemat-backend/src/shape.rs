//! Precondition checks shared by backends.
//!
//! Each helper returns a shape error naming the rejecting operation; none
//! of them touch matrix contents.

use simplemat_core::{DenseMatrix, Element, MatrixError, Result};
use std::ops::Range;

/// `m` must be exactly `expected`.
pub fn require_shape<T: Element>(
    operation: &'static str,
    m: &DenseMatrix<T>,
    expected: (usize, usize),
) -> Result<()> {
    if m.shape() != expected {
        return Err(MatrixError::shape_mismatch(operation, expected, m.shape()));
    }
    Ok(())
}

/// Every matrix in `operands` must share the shape of the first one.
pub fn require_same_shape<T: Element>(
    operation: &'static str,
    operands: &[&DenseMatrix<T>],
) -> Result<()> {
    if let Some((first, rest)) = operands.split_first() {
        for m in rest {
            require_shape(operation, m, first.shape())?;
        }
    }
    Ok(())
}

/// `m` must be square.
pub fn require_square<T: Element>(operation: &'static str, m: &DenseMatrix<T>) -> Result<()> {
    if !m.is_square() {
        return Err(MatrixError::not_square(operation, m.rows(), m.cols()));
    }
    Ok(())
}

/// `m` must be a row or column vector.
pub fn require_vector<T: Element>(operation: &'static str, m: &DenseMatrix<T>) -> Result<()> {
    if !m.is_vector() {
        return Err(MatrixError::dimension_mismatch(
            operation,
            "row or column vector",
            format!("{}x{}", m.rows(), m.cols()),
        ));
    }
    Ok(())
}

/// `range` must be ordered and lie within `0..bound`.
pub fn require_range(
    operation: &'static str,
    axis: &str,
    range: &Range<usize>,
    bound: usize,
) -> Result<()> {
    if range.start > range.end {
        return Err(MatrixError::out_of_bounds(
            operation,
            format!("{axis} range {}..{} is reversed", range.start, range.end),
        ));
    }
    if range.end > bound {
        return Err(MatrixError::out_of_bounds(
            operation,
            format!("{axis} range {}..{} exceeds {bound}", range.start, range.end),
        ));
    }
    Ok(())
}

/// `len` items written from `start` must fit within `bound`.
pub fn require_span(
    operation: &'static str,
    axis: &str,
    start: usize,
    len: usize,
    bound: usize,
) -> Result<()> {
    match start.checked_add(len) {
        Some(end) if end <= bound => Ok(()),
        _ => Err(MatrixError::out_of_bounds(
            operation,
            format!("{axis} {start}+{len} exceeds {bound}"),
        )),
    }
}

/// `index` must be below `bound`.
pub fn require_index(operation: &'static str, axis: &str, index: usize, bound: usize) -> Result<()> {
    if index >= bound {
        return Err(MatrixError::out_of_bounds(
            operation,
            format!("{axis} {index} outside 0..{bound}"),
        ));
    }
    Ok(())
}

/// Element count of a `rows x cols` matrix. Fails when it overflows `usize`.
pub fn require_len(operation: &'static str, rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        MatrixError::dimension_mismatch(
            operation,
            "element count within usize",
            format!("{rows}x{cols}"),
        )
    })
}

/// Shape of the Kronecker product `a ⊗ b`. Fails when a dimension overflows `usize`.
pub fn kron_shape<T: Element>(a: &DenseMatrix<T>, b: &DenseMatrix<T>) -> Result<(usize, usize)> {
    match (
        a.rows().checked_mul(b.rows()),
        a.cols().checked_mul(b.cols()),
    ) {
        (Some(rows), Some(cols)) => Ok((rows, cols)),
        _ => Err(MatrixError::dimension_mismatch(
            "kron",
            "product dimensions within usize",
            format!("{}x{} by {}x{}", a.rows(), a.cols(), b.rows(), b.cols()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_shape() {
        let a = DenseMatrix::<f32>::zeros(2, 3);
        let b = DenseMatrix::<f32>::zeros(2, 3);
        let c = DenseMatrix::<f32>::zeros(3, 2);
        assert!(require_same_shape("plus", &[&a, &b]).is_ok());
        let err = require_same_shape("plus", &[&a, &b, &c]).unwrap_err();
        assert_eq!(err.to_string(), "Dimension mismatch in plus: expected 2x3, got 3x2");
    }

    #[test]
    fn test_ranges_and_spans() {
        assert!(require_range("extract", "row", &(1..3), 3).is_ok());
        assert!(require_range("extract", "row", &(2..2), 2).is_ok());
        assert!(require_range("extract", "row", &(1..4), 3).is_err());
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = 3..1;
        assert!(require_range("extract", "row", &reversed, 5).is_err());

        assert!(require_span("set_row", "column", 1, 2, 3).is_ok());
        assert!(require_span("set_row", "column", 2, 2, 3).is_err());
        assert!(require_span("set_row", "column", usize::MAX, 2, 3).is_err());
        assert!(require_index("set_row", "row", 3, 3).is_err());
    }

    #[test]
    fn test_checked_products() {
        assert_eq!(require_len("alloc", 3, 4).unwrap(), 12);
        assert!(require_len("alloc", usize::MAX, 2).unwrap_err().is_shape_error());

        let a = DenseMatrix::<f64>::zeros(2, 3);
        let b = DenseMatrix::<f64>::zeros(4, 1);
        assert_eq!(kron_shape(&a, &b).unwrap(), (8, 3));

        let tall = DenseMatrix::<f64>::zeros(1usize << 33, 0);
        assert!(kron_shape(&tall, &tall).unwrap_err().is_shape_error());
    }

    #[test]
    fn test_square_and_vector() {
        assert!(require_square("det", &DenseMatrix::<f64>::zeros(0, 0)).is_ok());
        assert!(require_square("det", &DenseMatrix::<f64>::zeros(2, 3)).unwrap_err().is_shape_error());
        assert!(require_vector("dot", &DenseMatrix::<f64>::zeros(1, 5)).is_ok());
        assert!(require_vector("dot", &DenseMatrix::<f64>::zeros(5, 1)).is_ok());
        assert!(require_vector("dot", &DenseMatrix::<f64>::zeros(2, 2)).is_err());
    }
}
