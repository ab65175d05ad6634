//! Error types for matrix operations.
//!
//! This module defines the single error type shared by every layer of the
//! library. Precondition violations (incompatible shapes, out-of-range
//! indices, non-square input to a square-only operation) are reported here.
//! Numerical non-invertibility is *not* an error: operations that can hit a
//! singular system report it through a dedicated result value instead.

use crate::types::MatrixType;
use thiserror::Error;

/// Errors that can occur during matrix operations.
#[derive(Debug, Clone, Error)]
pub enum MatrixError {
    /// Operand or output shapes are incompatible.
    ///
    /// This error occurs when an operation receives matrices whose
    /// dimensions do not satisfy its shape obligations.
    #[error("Dimension mismatch in {operation}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Operation that rejected its operands
        operation: &'static str,
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// An index or range falls outside a matrix.
    #[error("Index out of bounds in {operation}: {reason}")]
    OutOfBounds {
        /// Operation that rejected the index
        operation: &'static str,
        /// Description of the offending index or range
        reason: String,
    },

    /// A square-only operation received a rectangular matrix.
    #[error("{operation} requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        /// Operation that requires a square matrix
        operation: &'static str,
        /// Number of rows of the rejected matrix
        rows: usize,
        /// Number of columns of the rejected matrix
        cols: usize,
    },

    /// A raw buffer does not hold `rows * cols` elements.
    #[error("Invalid buffer for {rows}x{cols} matrix: expected {expected} elements, got {actual}")]
    InvalidBuffer {
        /// Requested number of rows
        rows: usize,
        /// Requested number of columns
        cols: usize,
        /// Expected element count
        expected: usize,
        /// Actual element count
        actual: usize,
    },

    /// A wide scalar does not fit the backend's native element type.
    ///
    /// Only produced under the strict narrowing policy.
    #[error("Scalar {value} overflows native {target} element type")]
    NarrowingOverflow {
        /// Value that was being narrowed
        value: f64,
        /// Name of the native element type
        target: &'static str,
    },

    /// A numeric kernel reported an internal failure.
    #[error("Kernel {kernel} failed: {reason}")]
    KernelFailure {
        /// Name of the failing kernel
        kernel: &'static str,
        /// Description reported by the kernel
        reason: String,
    },

    /// No backend for the requested element type is registered under a key.
    #[error("No {element} backend registered for type key {key}")]
    NoBackend {
        /// Requested type key
        key: MatrixType,
        /// Element type the caller asked for
        element: &'static str,
    },

    /// Writing to a diagnostic sink failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl MatrixError {
    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(operation: &'static str, expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            operation,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a DimensionMismatch error from two `(rows, cols)` pairs.
    pub fn shape_mismatch(
        operation: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        Self::dimension_mismatch(
            operation,
            format!("{}x{}", expected.0, expected.1),
            format!("{}x{}", actual.0, actual.1),
        )
    }

    /// Create an OutOfBounds error.
    pub fn out_of_bounds<S: Into<String>>(operation: &'static str, reason: S) -> Self {
        Self::OutOfBounds {
            operation,
            reason: reason.into(),
        }
    }

    /// Create a NotSquare error.
    pub fn not_square(operation: &'static str, rows: usize, cols: usize) -> Self {
        Self::NotSquare {
            operation,
            rows,
            cols,
        }
    }

    /// Create a KernelFailure error.
    pub fn kernel_failure<S: Into<String>>(kernel: &'static str, reason: S) -> Self {
        Self::KernelFailure {
            kernel,
            reason: reason.into(),
        }
    }

    /// Returns true for precondition violations caused by the caller.
    ///
    /// These indicate a programming error and are never produced for
    /// numerically difficult but well-formed input.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. }
                | Self::OutOfBounds { .. }
                | Self::NotSquare { .. }
                | Self::InvalidBuffer { .. }
        )
    }
}

impl From<std::io::Error> for MatrixError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<std::fmt::Error> for MatrixError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = MatrixError::shape_mismatch("plus", (2, 3), (3, 2));
        assert!(matches!(err, MatrixError::DimensionMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in plus: expected 2x3, got 3x2"
        );

        let err = MatrixError::not_square("determinant", 2, 3);
        assert_eq!(
            err.to_string(),
            "determinant requires a square matrix, got 2x3"
        );
    }

    #[test]
    fn test_shape_error_classification() {
        let shape_errors = vec![
            MatrixError::shape_mismatch("mult", (2, 2), (3, 3)),
            MatrixError::out_of_bounds("extract", "rows 0..5 exceed 3"),
            MatrixError::not_square("invert", 1, 2),
            MatrixError::InvalidBuffer {
                rows: 2,
                cols: 2,
                expected: 4,
                actual: 3,
            },
        ];
        for err in shape_errors {
            assert!(err.is_shape_error(), "{err} should be a shape error");
        }

        let other = vec![
            MatrixError::NarrowingOverflow {
                value: 1e300,
                target: "f32",
            },
            MatrixError::kernel_failure("svd", "did not converge"),
            MatrixError::NoBackend {
                key: MatrixType::F64RowMajor,
                element: "f32",
            },
            MatrixError::Io("broken pipe".to_string()),
        ];
        for err in other {
            assert!(!err.is_shape_error());
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: MatrixError = io.into();
        assert!(matches!(err, MatrixError::Io(_)));
        assert!(err.to_string().contains("closed"));
    }
}
