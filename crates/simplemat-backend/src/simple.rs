//! Value-returning matrix wrapper.
//!
//! [`SimpleMatrix`] pairs a [`DenseMatrix`] with the backend resolved for
//! its type key and allocates correctly shaped outputs, so callers never
//! handle output buffers themselves.

use crate::contract::Operations;
use crate::selector::{BackendSelector, HasBackend};
use crate::shape::{kron_shape, require_len, require_range};
use simplemat_core::{DenseMatrix, MatrixError, Result};
use std::fmt;
use std::io::Write;
use std::ops::Range;

/// A dense matrix bound to its backend.
#[derive(Debug, Clone)]
pub struct SimpleMatrix<T: HasBackend> {
    mat: DenseMatrix<T>,
    ops: &'static dyn Operations<T>,
}

impl<T: HasBackend> SimpleMatrix<T> {
    /// Wraps `mat`, resolving its backend from the type key.
    pub fn new(mat: DenseMatrix<T>) -> Self {
        let ops = BackendSelector::resolve(&mat);
        Self { mat, ops }
    }

    /// Wraps `mat` with an explicit backend, such as one built with a
    /// non-default [`OpsConfig`](simplemat_core::OpsConfig).
    ///
    /// The element type fixes the type key on both sides, so any
    /// `Operations<T>` serves `mat`.
    pub fn with_backend(mat: DenseMatrix<T>, ops: &'static dyn Operations<T>) -> Self {
        Self { mat, ops }
    }

    /// A `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(DenseMatrix::zeros(rows, cols))
    }

    /// The `n x n` identity.
    pub fn identity(n: usize) -> Self {
        Self::new(DenseMatrix::identity(n))
    }

    /// Builds a matrix from native rows. Rows must all have the same length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        DenseMatrix::from_rows(rows).map(Self::new)
    }

    /// Builds a `rows x cols` matrix from wide values in row-major order.
    ///
    /// Values are narrowed through the backend, so the configured narrowing
    /// policy applies.
    pub fn from_wide(rows: usize, cols: usize, values: &[f64]) -> Result<Self> {
        match rows.checked_mul(cols) {
            Some(expected) if expected == values.len() => {}
            expected => {
                return Err(MatrixError::InvalidBuffer {
                    rows,
                    cols,
                    expected: expected.unwrap_or(usize::MAX),
                    actual: values.len(),
                })
            }
        }
        let mut m = Self::zeros(rows, cols);
        if cols > 0 {
            for (i, row) in values.chunks(cols).enumerate() {
                m.set_row(i, 0, row)?;
            }
        }
        Ok(m)
    }

    fn wrap(&self, mat: DenseMatrix<T>) -> Self {
        Self { mat, ops: self.ops }
    }

    /// Zeroed output for `operation`, refusing shapes whose element count overflows.
    fn output(operation: &'static str, rows: usize, cols: usize) -> Result<DenseMatrix<T>> {
        require_len(operation, rows, cols)?;
        Ok(DenseMatrix::zeros(rows, cols))
    }

    /// The underlying storage.
    pub fn matrix(&self) -> &DenseMatrix<T> {
        &self.mat
    }

    /// Unwraps the underlying storage.
    pub fn into_inner(self) -> DenseMatrix<T> {
        self.mat
    }

    /// The backend this matrix routes through.
    pub fn backend(&self) -> &'static dyn Operations<T> {
        self.ops
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.mat.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.mat.cols()
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.mat.shape()
    }

    /// Element at `(row, col)` widened to `f64`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.mat.get(row, col).map(|v| v.to_wide())
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Result<Self> {
        let mut out = DenseMatrix::zeros(self.cols(), self.rows());
        self.ops.transpose(&self.mat, &mut out)?;
        Ok(self.wrap(out))
    }

    /// Copy of the block `self[rows, cols]`.
    pub fn extract(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        require_range("extract", "row", &rows, self.rows())?;
        require_range("extract", "column", &cols, self.cols())?;
        let mut out = DenseMatrix::zeros(rows.len(), cols.len());
        self.ops.extract(&self.mat, rows, cols, &mut out, 0, 0)?;
        Ok(self.wrap(out))
    }

    /// Kronecker product `self ⊗ other`.
    pub fn kron(&self, other: &Self) -> Result<Self> {
        let (rows, cols) = kron_shape(&self.mat, &other.mat)?;
        let mut out = Self::output("kron", rows, cols)?;
        self.ops.kron(&self.mat, &other.mat, &mut out)?;
        Ok(self.wrap(out))
    }

    /// Matrix product `self * other`.
    pub fn mult(&self, other: &Self) -> Result<Self> {
        let mut out = Self::output("mult", self.rows(), other.cols())?;
        self.ops.mult(&self.mat, &other.mat, &mut out)?;
        Ok(self.wrap(out))
    }

    fn same_shape_output(&self) -> DenseMatrix<T> {
        DenseMatrix::zeros(self.rows(), self.cols())
    }

    /// `self + other`
    pub fn plus(&self, other: &Self) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.plus(&self.mat, &other.mat, &mut out)?;
        Ok(self.wrap(out))
    }

    /// `self - other`
    pub fn minus(&self, other: &Self) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.minus(&self.mat, &other.mat, &mut out)?;
        Ok(self.wrap(out))
    }

    /// `self + value` element-wise.
    pub fn plus_scalar(&self, value: f64) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.plus_scalar(&self.mat, value, &mut out)?;
        Ok(self.wrap(out))
    }

    /// `self - value` element-wise.
    pub fn minus_scalar(&self, value: f64) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.minus_scalar(&self.mat, value, &mut out)?;
        Ok(self.wrap(out))
    }

    /// `self + beta * other`
    pub fn plus_scaled(&self, beta: f64, other: &Self) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.plus_scaled(&self.mat, beta, &other.mat, &mut out)?;
        Ok(self.wrap(out))
    }

    /// `value * self`
    pub fn scale(&self, value: f64) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.scale(&self.mat, value, &mut out)?;
        Ok(self.wrap(out))
    }

    /// `self / value`
    pub fn divide(&self, value: f64) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.divide(&self.mat, value, &mut out)?;
        Ok(self.wrap(out))
    }

    /// Element-wise product.
    pub fn element_mult(&self, other: &Self) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.element_mult(&self.mat, &other.mat, &mut out)?;
        Ok(self.wrap(out))
    }

    /// Element-wise quotient.
    pub fn element_div(&self, other: &Self) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.element_div(&self.mat, &other.mat, &mut out)?;
        Ok(self.wrap(out))
    }

    /// Element-wise power with matrix exponents.
    pub fn element_power(&self, other: &Self) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.element_power(&self.mat, &other.mat, &mut out)?;
        Ok(self.wrap(out))
    }

    /// Element-wise power with a scalar exponent.
    pub fn element_power_scalar(&self, exponent: f64) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.element_power_scalar(&self.mat, exponent, &mut out)?;
        Ok(self.wrap(out))
    }

    /// Element-wise exponential.
    pub fn element_exp(&self) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.element_exp(&self.mat, &mut out)?;
        Ok(self.wrap(out))
    }

    /// Element-wise natural logarithm.
    pub fn element_log(&self) -> Result<Self> {
        let mut out = self.same_shape_output();
        self.ops.element_log(&self.mat, &mut out)?;
        Ok(self.wrap(out))
    }

    /// `-self`
    pub fn negative(&self) -> Result<Self> {
        let mut out = self.mat.clone();
        self.ops.change_sign(&mut out)?;
        Ok(self.wrap(out))
    }

    /// Inverse, or `None` when the matrix is singular.
    pub fn invert(&self) -> Result<Option<Self>> {
        let mut out = self.same_shape_output();
        let solution = self.ops.invert(&self.mat, &mut out)?;
        Ok(solution.is_solved().then(|| self.wrap(out)))
    }

    /// Moore-Penrose pseudo-inverse.
    pub fn pseudo_inverse(&self) -> Result<Self> {
        let mut out = DenseMatrix::zeros(self.cols(), self.rows());
        self.ops.pseudo_inverse(&self.mat, &mut out)?;
        Ok(self.wrap(out))
    }

    /// Solves `self * x = b`, or `None` when there is no unique solution.
    pub fn solve(&self, b: &Self) -> Result<Option<Self>> {
        let mut x = Self::output("solve", self.cols(), b.cols())?;
        let solution = self.ops.solve(&self.mat, &mut x, &b.mat)?;
        Ok(solution.is_solved().then(|| self.wrap(x)))
    }

    /// Determinant.
    pub fn determinant(&self) -> Result<f64> {
        self.ops.determinant(&self.mat)
    }

    /// Sum of the main diagonal.
    pub fn trace(&self) -> Result<f64> {
        self.ops.trace(&self.mat)
    }

    /// Frobenius norm.
    pub fn norm_f(&self) -> Result<f64> {
        self.ops.norm_f(&self.mat)
    }

    /// Two-norm condition number.
    pub fn condition_p2(&self) -> Result<f64> {
        self.ops.condition_p2(&self.mat)
    }

    /// Inner product with another vector.
    pub fn dot(&self, other: &Self) -> Result<f64> {
        self.ops.dot(&self.mat, &other.mat)
    }

    /// True if any element is NaN or infinite.
    pub fn has_uncountable(&self) -> bool {
        self.ops.has_uncountable(&self.mat)
    }

    /// Largest absolute element value.
    pub fn element_max_abs(&self) -> f64 {
        self.ops.element_max_abs(&self.mat)
    }

    /// Sum of all elements.
    pub fn element_sum(&self) -> f64 {
        self.ops.element_sum(&self.mat)
    }

    /// Sets every element to `value`.
    pub fn set(&mut self, value: f64) -> Result<()> {
        self.ops.set(&mut self.mat, value)
    }

    /// Sets every element to zero.
    pub fn zero(&mut self) -> Result<()> {
        self.ops.zero(&mut self.mat)
    }

    /// Writes `values` into `row` starting at `start_col`.
    pub fn set_row(&mut self, row: usize, start_col: usize, values: &[f64]) -> Result<()> {
        self.ops.set_row(&mut self.mat, row, start_col, values)
    }

    /// Writes `values` into `col` starting at `start_row`.
    pub fn set_column(&mut self, col: usize, start_row: usize, values: &[f64]) -> Result<()> {
        self.ops.set_column(&mut self.mat, col, start_row, values)
    }

    /// Writes a human-readable dump to `out`.
    pub fn print(&self, out: &mut dyn Write) -> Result<()> {
        self.ops.print(out, &self.mat)
    }
}

impl<T: HasBackend> PartialEq for SimpleMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.mat == other.mat
    }
}

impl<T: HasBackend> From<DenseMatrix<T>> for SimpleMatrix<T> {
    fn from(mat: DenseMatrix<T>) -> Self {
        Self::new(mat)
    }
}

impl<T: HasBackend> fmt::Display for SimpleMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        self.print(&mut buf).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}
