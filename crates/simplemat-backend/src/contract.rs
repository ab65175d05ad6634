//! The operations contract every backend implements.
//!
//! [`Operations`] is the stable seam the high-level API programs against.
//! It fixes, for every operation, the shape obligations on inputs and
//! outputs, the scalar conversion at the boundary and how failures are
//! reported. Backends differ only in the native element type they compute
//! in; callers never branch on which backend they hold.
//!
//! # Conventions
//!
//! - Outputs are caller-allocated and passed as `&mut`. A backend mutates
//!   their contents but never reshapes them, and writes nothing until every
//!   precondition has been checked.
//! - Scalars cross the boundary as `f64`. Arguments are narrowed to the
//!   native width on entry (lossy for `f32`) and results are widened on exit.
//! - Precondition violations return `Err(MatrixError)`.
//! - A singular or inconsistent system is not an error: [`Operations::invert`]
//!   and [`Operations::solve`] return [`Solution::Singular`].
//! - NaN and infinity propagate through arithmetic untouched. Use
//!   [`Operations::has_uncountable`] to check for them explicitly.

use simplemat_core::{DenseMatrix, Element, MatrixType, Result};
use std::fmt::Debug;
use std::io::Write;
use std::ops::Range;

/// Outcome of an operation that can fail for numerical reasons.
#[must_use = "a singular outcome leaves the output unspecified"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solution {
    /// The output holds a valid result.
    Solved,
    /// The system has no unique solution; the output contents are unspecified.
    Singular,
}

impl Solution {
    /// Maps a kernel success flag.
    pub fn from_success(success: bool) -> Self {
        if success {
            Self::Solved
        } else {
            Self::Singular
        }
    }

    /// True if the output can be trusted.
    pub fn is_solved(self) -> bool {
        self == Self::Solved
    }

    /// True if the system had no unique solution.
    pub fn is_singular(self) -> bool {
        self == Self::Singular
    }
}

impl From<Solution> for bool {
    fn from(solution: Solution) -> bool {
        solution.is_solved()
    }
}

/// Operations contract for one (element type, storage) pair.
///
/// Implementations hold no mutable state and are safe to share between
/// threads, provided no two concurrent calls write the same output matrix.
pub trait Operations<T: Element>: Debug + Send + Sync {
    /// Backend name for identification.
    fn name(&self) -> &str;

    /// Type key of the matrices this backend operates on.
    fn matrix_type(&self) -> MatrixType {
        T::MATRIX_TYPE
    }

    // ---- structural -------------------------------------------------------

    /// `output = input^T`. `output` must be `(input.cols, input.rows)`.
    fn transpose(&self, input: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()>;

    /// Transposes `a` in place. Only square matrices can be transposed in place.
    fn transpose_in_place(&self, a: &mut DenseMatrix<T>) -> Result<()>;

    /// Copies the block `src[rows, cols]` into `dst` at `(dst_row, dst_col)`.
    fn extract(
        &self,
        src: &DenseMatrix<T>,
        rows: Range<usize>,
        cols: Range<usize>,
        dst: &mut DenseMatrix<T>,
        dst_row: usize,
        dst_col: usize,
    ) -> Result<()>;

    /// Kronecker product. `output` must be `(a.rows*b.rows, a.cols*b.cols)`.
    fn kron(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()>;

    // ---- arithmetic -------------------------------------------------------

    /// `output = a + b`
    fn plus(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()>;

    /// `output = a - b`
    fn minus(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()>;

    /// `output = a + value` element-wise.
    fn plus_scalar(&self, a: &DenseMatrix<T>, value: f64, output: &mut DenseMatrix<T>) -> Result<()>;

    /// `output = a - value` element-wise.
    fn minus_scalar(&self, a: &DenseMatrix<T>, value: f64, output: &mut DenseMatrix<T>) -> Result<()>;

    /// `output = a + beta * b`
    fn plus_scaled(
        &self,
        a: &DenseMatrix<T>,
        beta: f64,
        b: &DenseMatrix<T>,
        output: &mut DenseMatrix<T>,
    ) -> Result<()>;

    /// `output = value * a`
    fn scale(&self, a: &DenseMatrix<T>, value: f64, output: &mut DenseMatrix<T>) -> Result<()>;

    /// `output = a / value`. Division by zero follows IEEE semantics.
    fn divide(&self, a: &DenseMatrix<T>, value: f64, output: &mut DenseMatrix<T>) -> Result<()>;

    /// `output[i] = a[i] * b[i]`
    fn element_mult(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()>;

    /// `output[i] = a[i] / b[i]`. Division by zero follows IEEE semantics.
    fn element_div(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()>;

    /// `output[i] = a[i] ^ b[i]`
    fn element_power(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()>;

    /// `output[i] = a[i] ^ exponent`
    fn element_power_scalar(&self, a: &DenseMatrix<T>, exponent: f64, output: &mut DenseMatrix<T>) -> Result<()>;

    /// `output[i] = e ^ a[i]`
    fn element_exp(&self, a: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()>;

    /// `output[i] = ln(a[i])`
    fn element_log(&self, a: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()>;

    /// Negates every element of `a` in place.
    fn change_sign(&self, a: &mut DenseMatrix<T>) -> Result<()>;

    // ---- linear algebra ---------------------------------------------------

    /// `output = a * b`. Requires `a.cols == b.rows`; `output` is `(a.rows, b.cols)`.
    fn mult(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()>;

    /// Inner product of two equally long row or column vectors.
    fn dot(&self, u: &DenseMatrix<T>, v: &DenseMatrix<T>) -> Result<f64>;

    /// `output = a^-1` for square `a`.
    ///
    /// Returns [`Solution::Singular`] when `a` is not invertible.
    fn invert(&self, a: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<Solution>;

    /// Moore-Penrose pseudo-inverse. `output` must be `(a.cols, a.rows)`.
    fn pseudo_inverse(&self, a: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()>;

    /// Solves `a * x = b` for `x`.
    ///
    /// `a` is `(m, n)`, `b` is `(m, k)` and `x` is `(n, k)`. Overdetermined
    /// systems are solved in the least-squares sense. Returns
    /// [`Solution::Singular`] when no unique solution exists.
    fn solve(&self, a: &DenseMatrix<T>, x: &mut DenseMatrix<T>, b: &DenseMatrix<T>) -> Result<Solution>;

    /// Determinant of a square matrix.
    fn determinant(&self, a: &DenseMatrix<T>) -> Result<f64>;

    /// Sum of the main diagonal.
    fn trace(&self, a: &DenseMatrix<T>) -> Result<f64>;

    /// Frobenius norm.
    fn norm_f(&self, a: &DenseMatrix<T>) -> Result<f64>;

    /// Two-norm condition number of a square matrix.
    fn condition_p2(&self, a: &DenseMatrix<T>) -> Result<f64>;

    // ---- mutation & diagnostics -------------------------------------------

    /// Sets every element to `value`.
    fn set(&self, a: &mut DenseMatrix<T>, value: f64) -> Result<()>;

    /// Sets every element to zero.
    fn zero(&self, a: &mut DenseMatrix<T>) -> Result<()>;

    /// Writes `values` into row `row` starting at column `start_col`.
    fn set_row(&self, a: &mut DenseMatrix<T>, row: usize, start_col: usize, values: &[f64]) -> Result<()>;

    /// Writes `values` into column `col` starting at row `start_row`.
    fn set_column(&self, a: &mut DenseMatrix<T>, col: usize, start_row: usize, values: &[f64]) -> Result<()>;

    /// True if any element is NaN or infinite.
    fn has_uncountable(&self, a: &DenseMatrix<T>) -> bool;

    /// Largest absolute element value.
    fn element_max_abs(&self, a: &DenseMatrix<T>) -> f64;

    /// Sum of all elements.
    fn element_sum(&self, a: &DenseMatrix<T>) -> f64;

    // ---- presentation -----------------------------------------------------

    /// Writes a human-readable dump of `a` to `out`.
    fn print(&self, out: &mut dyn Write, a: &DenseMatrix<T>) -> Result<()>;
}
