//! Dense row-major matrix storage.
//!
//! [`DenseMatrix`] is the container every backend operates on. Its only
//! invariant is `data.len() == rows * cols`; a matrix with zero rows or
//! columns is valid and owns an empty buffer. Element `(i, j)` lives at
//! `data[i * cols + j]`.

use crate::{
    error::{MatrixError, Result},
    types::{Element, MatrixType},
};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::DMatrix;
use std::ops::{Index, IndexMut};

/// Dense, rectangular, row-major matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DenseMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Element> DenseMatrix<T> {
    /// Creates a `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::zero())
    }

    /// Creates a `rows x cols` matrix with every element equal to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Creates the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        m
    }

    /// Creates a matrix from a row-major buffer.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[T]) -> Result<Self> {
        Self::from_vec(rows, cols, data.to_vec())
    }

    /// Creates a matrix taking ownership of a row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        match rows.checked_mul(cols) {
            Some(expected) if expected == data.len() => Ok(Self { rows, cols, data }),
            expected => Err(MatrixError::InvalidBuffer {
                rows,
                cols,
                expected: expected.unwrap_or(usize::MAX),
                actual: data.len(),
            }),
        }
    }

    /// Creates a matrix from a list of rows. All rows must have equal length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::dimension_mismatch(
                    "from_rows",
                    format!("{cols} columns"),
                    format!("{} columns in row {i}", row.len()),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Creates a matrix by evaluating `f(row, col)` for every element.
    pub fn from_fn<F: FnMut(usize, usize) -> T>(rows: usize, cols: usize, mut f: F) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Type key used for backend selection.
    pub fn matrix_type(&self) -> MatrixType {
        T::MATRIX_TYPE
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the matrix has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when `rows == cols`.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// True for row or column vectors (and empty matrices).
    pub fn is_vector(&self) -> bool {
        self.rows <= 1 || self.cols <= 1
    }

    /// Element `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    /// Element `(row, col)`, failing with an out-of-bounds error.
    pub fn try_get(&self, row: usize, col: usize) -> Result<T> {
        self.get(row, col).ok_or_else(|| {
            MatrixError::out_of_bounds(
                "get",
                format!("({row}, {col}) outside {}x{}", self.rows, self.cols),
            )
        })
    }

    /// Sets element `(row, col)`, failing with an out-of-bounds error.
    pub fn try_set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::out_of_bounds(
                "set",
                format!("({row}, {col}) outside {}x{}", self.rows, self.cols),
            ));
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Row `i` as a mutable slice.
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        let cols = self.cols;
        &mut self.data[i * cols..(i + 1) * cols]
    }

    /// Row-major element buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major element buffer. The length cannot change.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the matrix and returns its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Copies into a column-major nalgebra matrix.
    pub fn to_nalgebra(&self) -> DMatrix<T> {
        DMatrix::from_row_slice(self.rows, self.cols, &self.data)
    }

    /// Overwrites the contents from a nalgebra matrix of the same shape.
    pub fn copy_from_nalgebra(&mut self, src: &DMatrix<T>) -> Result<()> {
        if src.shape() != self.shape() {
            return Err(MatrixError::shape_mismatch(
                "copy_from_nalgebra",
                self.shape(),
                src.shape(),
            ));
        }
        // The column-major buffer of the transpose is our row-major buffer.
        self.data.copy_from_slice(src.transpose().as_slice());
        Ok(())
    }
}

impl<T: Element> From<&DMatrix<T>> for DenseMatrix<T> {
    fn from(m: &DMatrix<T>) -> Self {
        Self {
            rows: m.nrows(),
            cols: m.ncols(),
            data: m.transpose().as_slice().to_vec(),
        }
    }
}

impl<T: Element> From<DMatrix<T>> for DenseMatrix<T> {
    fn from(m: DMatrix<T>) -> Self {
        Self::from(&m)
    }
}

impl<T: Element> From<&DenseMatrix<T>> for DMatrix<T> {
    fn from(m: &DenseMatrix<T>) -> Self {
        m.to_nalgebra()
    }
}

// Deserialization goes through `from_vec` so a buffer that disagrees with
// the declared shape is rejected.
#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for DenseMatrix<T>
where
    T: Element + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(rename = "DenseMatrix")]
        struct Raw<T> {
            rows: usize,
            cols: usize,
            data: Vec<T>,
        }

        let raw = Raw::<T>::deserialize(deserializer)?;
        Self::from_vec(raw.rows, raw.cols, raw.data).map_err(serde::de::Error::custom)
    }
}

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

impl<T: Element + AbsDiffEq<Epsilon = T>> AbsDiffEq for DenseMatrix<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: Element + RelativeEq<Epsilon = T>> RelativeEq for DenseMatrix<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
