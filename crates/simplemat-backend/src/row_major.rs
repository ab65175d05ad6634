//! Row-major dense backend, generic over the native element type.
//!
//! [`RowMajorOps<T>`] is the single implementation of [`Operations`];
//! [`OpsF32`] and [`OpsF64`] are its two instantiations. Every method follows
//! the same order: narrow scalar arguments, validate shapes, then hand the
//! buffers to a kernel. No output is touched before the last check passes.

use crate::contract::{Operations, Solution};
use crate::shape::{
    kron_shape, require_index, require_range, require_same_shape, require_shape, require_span,
    require_square, require_vector,
};
use simplemat_core::{
    narrowing::{to_native, to_native_all, to_wide},
    ops_config, DenseMatrix, Element, MatrixError, OpsConfig, Result,
};
use simplemat_kernels::{elementwise, io, linalg, reduce, structural};
use std::io::Write;
use std::marker::PhantomData;
use std::ops::Range;

/// Dense row-major backend computing natively in `T`.
#[derive(Debug, Clone)]
pub struct RowMajorOps<T: Element> {
    config: OpsConfig,
    _phantom: PhantomData<T>,
}

/// Single-precision backend (type key `FDRM`).
pub type OpsF32 = RowMajorOps<f32>;

/// Double-precision backend (type key `DDRM`).
pub type OpsF64 = RowMajorOps<f64>;

impl<T: Element> RowMajorOps<T> {
    /// Creates a backend using the process-wide default configuration.
    pub fn new() -> Self {
        Self::with_config(*ops_config())
    }

    /// Creates a backend with an explicit configuration.
    pub fn with_config(config: OpsConfig) -> Self {
        Self {
            config,
            _phantom: PhantomData,
        }
    }

    /// Configuration this backend was created with.
    pub fn config(&self) -> &OpsConfig {
        &self.config
    }

    #[inline]
    fn to_native(&self, value: f64) -> Result<T> {
        to_native(value, self.config.narrowing)
    }

    fn report(&self, operation: &str, a: &DenseMatrix<T>, solution: Solution) -> Solution {
        if solution.is_singular() {
            log::debug!(
                "{}: {}x{} {} system has no unique solution",
                operation,
                a.rows(),
                a.cols(),
                T::MATRIX_TYPE
            );
        }
        solution
    }
}

impl<T: Element> Default for RowMajorOps<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Operations<T> for RowMajorOps<T> {
    fn name(&self) -> &str {
        T::MATRIX_TYPE.name()
    }

    fn transpose(&self, input: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()> {
        require_shape("transpose", output, (input.cols(), input.rows()))?;
        structural::transpose(input, output);
        Ok(())
    }

    fn transpose_in_place(&self, a: &mut DenseMatrix<T>) -> Result<()> {
        require_square("transpose_in_place", a)?;
        structural::transpose_square_in_place(a);
        Ok(())
    }

    fn extract(
        &self,
        src: &DenseMatrix<T>,
        rows: Range<usize>,
        cols: Range<usize>,
        dst: &mut DenseMatrix<T>,
        dst_row: usize,
        dst_col: usize,
    ) -> Result<()> {
        require_range("extract", "row", &rows, src.rows())?;
        require_range("extract", "column", &cols, src.cols())?;
        require_span("extract", "destination row", dst_row, rows.len(), dst.rows())?;
        require_span("extract", "destination column", dst_col, cols.len(), dst.cols())?;
        structural::extract(src, rows, cols, dst, dst_row, dst_col);
        Ok(())
    }

    fn kron(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()> {
        require_shape("kron", output, kron_shape(a, b)?)?;
        structural::kron(a, b, output);
        Ok(())
    }

    fn plus(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()> {
        require_same_shape("plus", &[a, b, &*output])?;
        elementwise::add(a, b, output, &self.config);
        Ok(())
    }

    fn minus(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()> {
        require_same_shape("minus", &[a, b, &*output])?;
        elementwise::subtract(a, b, output, &self.config);
        Ok(())
    }

    fn plus_scalar(&self, a: &DenseMatrix<T>, value: f64, output: &mut DenseMatrix<T>) -> Result<()> {
        let value = self.to_native(value)?;
        require_same_shape("plus_scalar", &[a, &*output])?;
        elementwise::add_scalar(a, value, output, &self.config);
        Ok(())
    }

    fn minus_scalar(&self, a: &DenseMatrix<T>, value: f64, output: &mut DenseMatrix<T>) -> Result<()> {
        let value = self.to_native(value)?;
        require_same_shape("minus_scalar", &[a, &*output])?;
        elementwise::subtract_scalar(a, value, output, &self.config);
        Ok(())
    }

    fn plus_scaled(
        &self,
        a: &DenseMatrix<T>,
        beta: f64,
        b: &DenseMatrix<T>,
        output: &mut DenseMatrix<T>,
    ) -> Result<()> {
        let beta = self.to_native(beta)?;
        require_same_shape("plus_scaled", &[a, b, &*output])?;
        elementwise::add_scaled(a, beta, b, output, &self.config);
        Ok(())
    }

    fn scale(&self, a: &DenseMatrix<T>, value: f64, output: &mut DenseMatrix<T>) -> Result<()> {
        let value = self.to_native(value)?;
        require_same_shape("scale", &[a, &*output])?;
        elementwise::scale(value, a, output, &self.config);
        Ok(())
    }

    fn divide(&self, a: &DenseMatrix<T>, value: f64, output: &mut DenseMatrix<T>) -> Result<()> {
        let value = self.to_native(value)?;
        require_same_shape("divide", &[a, &*output])?;
        elementwise::divide(a, value, output, &self.config);
        Ok(())
    }

    fn element_mult(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()> {
        require_same_shape("element_mult", &[a, b, &*output])?;
        elementwise::element_mult(a, b, output, &self.config);
        Ok(())
    }

    fn element_div(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()> {
        require_same_shape("element_div", &[a, b, &*output])?;
        elementwise::element_div(a, b, output, &self.config);
        Ok(())
    }

    fn element_power(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()> {
        require_same_shape("element_power", &[a, b, &*output])?;
        elementwise::element_power(a, b, output, &self.config);
        Ok(())
    }

    fn element_power_scalar(&self, a: &DenseMatrix<T>, exponent: f64, output: &mut DenseMatrix<T>) -> Result<()> {
        let exponent = self.to_native(exponent)?;
        require_same_shape("element_power_scalar", &[a, &*output])?;
        elementwise::element_power_scalar(a, exponent, output, &self.config);
        Ok(())
    }

    fn element_exp(&self, a: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()> {
        require_same_shape("element_exp", &[a, &*output])?;
        elementwise::element_exp(a, output, &self.config);
        Ok(())
    }

    fn element_log(&self, a: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()> {
        require_same_shape("element_log", &[a, &*output])?;
        elementwise::element_log(a, output, &self.config);
        Ok(())
    }

    fn change_sign(&self, a: &mut DenseMatrix<T>) -> Result<()> {
        elementwise::change_sign(a, &self.config);
        Ok(())
    }

    fn mult(&self, a: &DenseMatrix<T>, b: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()> {
        if a.cols() != b.rows() {
            return Err(MatrixError::dimension_mismatch(
                "mult",
                format!("{} rows in right operand", a.cols()),
                format!("{}x{}", b.rows(), b.cols()),
            ));
        }
        require_shape("mult", output, (a.rows(), b.cols()))?;
        linalg::mult(a, b, output)
    }

    fn dot(&self, u: &DenseMatrix<T>, v: &DenseMatrix<T>) -> Result<f64> {
        require_vector("dot", u)?;
        require_vector("dot", v)?;
        if u.len() != v.len() {
            return Err(MatrixError::dimension_mismatch(
                "dot",
                format!("{} elements", u.len()),
                format!("{} elements", v.len()),
            ));
        }
        Ok(to_wide(reduce::inner_product(u, v)))
    }

    fn invert(&self, a: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<Solution> {
        require_square("invert", a)?;
        require_shape("invert", output, a.shape())?;
        let solved = linalg::invert(a, output)?;
        Ok(self.report("invert", a, Solution::from_success(solved)))
    }

    fn pseudo_inverse(&self, a: &DenseMatrix<T>, output: &mut DenseMatrix<T>) -> Result<()> {
        require_shape("pseudo_inverse", output, (a.cols(), a.rows()))?;
        linalg::pseudo_inverse(a, output)
    }

    fn solve(&self, a: &DenseMatrix<T>, x: &mut DenseMatrix<T>, b: &DenseMatrix<T>) -> Result<Solution> {
        if b.rows() != a.rows() {
            return Err(MatrixError::dimension_mismatch(
                "solve",
                format!("{} rows in right-hand side", a.rows()),
                format!("{}x{}", b.rows(), b.cols()),
            ));
        }
        require_shape("solve", x, (a.cols(), b.cols()))?;
        let solved = linalg::solve(a, x, b)?;
        Ok(self.report("solve", a, Solution::from_success(solved)))
    }

    fn determinant(&self, a: &DenseMatrix<T>) -> Result<f64> {
        require_square("determinant", a)?;
        Ok(to_wide(linalg::determinant(a)))
    }

    fn trace(&self, a: &DenseMatrix<T>) -> Result<f64> {
        Ok(to_wide(reduce::trace(a)))
    }

    fn norm_f(&self, a: &DenseMatrix<T>) -> Result<f64> {
        Ok(to_wide(reduce::norm_f(a)))
    }

    fn condition_p2(&self, a: &DenseMatrix<T>) -> Result<f64> {
        require_square("condition_p2", a)?;
        linalg::condition_p2(a).map(to_wide)
    }

    fn set(&self, a: &mut DenseMatrix<T>, value: f64) -> Result<()> {
        let value = self.to_native(value)?;
        elementwise::fill(a, value);
        Ok(())
    }

    fn zero(&self, a: &mut DenseMatrix<T>) -> Result<()> {
        elementwise::fill(a, T::zero());
        Ok(())
    }

    fn set_row(&self, a: &mut DenseMatrix<T>, row: usize, start_col: usize, values: &[f64]) -> Result<()> {
        let values: Vec<T> = to_native_all(values, self.config.narrowing)?;
        require_index("set_row", "row", row, a.rows())?;
        require_span("set_row", "column", start_col, values.len(), a.cols())?;
        a.row_mut(row)[start_col..start_col + values.len()].copy_from_slice(&values);
        Ok(())
    }

    fn set_column(&self, a: &mut DenseMatrix<T>, col: usize, start_row: usize, values: &[f64]) -> Result<()> {
        let values: Vec<T> = to_native_all(values, self.config.narrowing)?;
        require_index("set_column", "column", col, a.cols())?;
        require_span("set_column", "row", start_row, values.len(), a.rows())?;
        for (offset, &v) in values.iter().enumerate() {
            a[(start_row + offset, col)] = v;
        }
        Ok(())
    }

    fn has_uncountable(&self, a: &DenseMatrix<T>) -> bool {
        reduce::has_uncountable(a)
    }

    fn element_max_abs(&self, a: &DenseMatrix<T>) -> f64 {
        to_wide(reduce::element_max_abs(a))
    }

    fn element_sum(&self, a: &DenseMatrix<T>) -> f64 {
        to_wide(reduce::element_sum(a))
    }

    fn print(&self, out: &mut dyn Write, a: &DenseMatrix<T>) -> Result<()> {
        io::print(out, a, self.config.print_precision)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use simplemat_core::{NarrowingPolicy, OpsConfigBuilder};

    fn sample() -> DenseMatrix<f64> {
        DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap()
    }

    #[test]
    fn test_backend_identity() {
        assert_eq!(OpsF32::new().name(), "FDRM");
        assert_eq!(OpsF64::new().name(), "DDRM");
        assert_eq!(OpsF64::default().config(), ops_config());
    }

    #[test]
    fn test_arithmetic_on_sample() {
        let ops = OpsF64::new();
        let a = sample();
        let b = DenseMatrix::from_rows(&[[2.0, 0.0], [1.0, 2.0]]).unwrap();
        let mut out = DenseMatrix::zeros(2, 2);

        ops.plus(&a, &b, &mut out).unwrap();
        assert_eq!(out, DenseMatrix::from_rows(&[[3.0, 2.0], [4.0, 6.0]]).unwrap());

        ops.mult(&a, &b, &mut out).unwrap();
        assert_eq!(out, DenseMatrix::from_rows(&[[4.0, 4.0], [10.0, 8.0]]).unwrap());

        ops.plus_scaled(&a, -1.0, &b, &mut out).unwrap();
        assert_eq!(out, DenseMatrix::from_rows(&[[-1.0, 2.0], [2.0, 2.0]]).unwrap());

        assert_relative_eq!(ops.determinant(&a).unwrap(), -2.0, epsilon = 1e-12);
        assert_eq!(ops.trace(&a).unwrap(), 5.0);
        assert_eq!(ops.element_sum(&a), 10.0);
        assert_eq!(ops.element_max_abs(&a), 4.0);
    }

    #[test]
    fn test_shape_error_leaves_output_untouched() {
        let ops = OpsF64::new();
        let a = sample();
        let b = DenseMatrix::zeros(3, 2);
        let mut out = DenseMatrix::filled(2, 2, 7.0);

        let err = ops.plus(&a, &b, &mut out).unwrap_err();
        assert!(err.is_shape_error());
        assert_eq!(out, DenseMatrix::filled(2, 2, 7.0));

        let mut wrong = DenseMatrix::filled(3, 3, 7.0);
        assert!(ops.mult(&a, &a, &mut wrong).unwrap_err().is_shape_error());
        assert_eq!(wrong, DenseMatrix::filled(3, 3, 7.0));
    }

    #[test]
    fn test_invert_reports_singular() {
        let ops = OpsF32::new();
        let mut out = DenseMatrix::zeros(2, 2);
        let zero = DenseMatrix::<f32>::zeros(2, 2);
        assert_eq!(ops.invert(&zero, &mut out).unwrap(), Solution::Singular);
        assert!(!ops.has_uncountable(&zero));

        let rect = DenseMatrix::<f32>::zeros(2, 3);
        assert!(matches!(
            ops.invert(&rect, &mut out),
            Err(MatrixError::NotSquare { .. })
        ));
    }

    #[test]
    fn test_strict_narrowing_rejects_before_writing() {
        let strict = OpsF32::with_config(OpsConfigBuilder::new().narrowing(NarrowingPolicy::Strict).build());
        let a = DenseMatrix::<f32>::filled(2, 2, 1.0);
        let mut out = DenseMatrix::filled(2, 2, 9.0);

        let err = strict.scale(&a, 1e300, &mut out).unwrap_err();
        assert!(matches!(err, MatrixError::NarrowingOverflow { target: "f32", .. }));
        assert_eq!(out, DenseMatrix::filled(2, 2, 9.0));

        let mut target = DenseMatrix::<f32>::zeros(2, 2);
        assert!(strict.set_row(&mut target, 0, 0, &[1.0, 1e300]).is_err());
        assert_eq!(target, DenseMatrix::zeros(2, 2));
    }

    #[test]
    fn test_saturating_narrowing() {
        let ops = OpsF32::with_config(OpsConfigBuilder::new().narrowing(NarrowingPolicy::Saturate).build());
        let mut a = DenseMatrix::<f32>::zeros(1, 2);
        ops.set(&mut a, -1e300).unwrap();
        assert_eq!(a.as_slice(), &[-f32::MAX, -f32::MAX]);
    }

    #[test]
    fn test_set_row_and_column() {
        let ops = OpsF64::new();
        let mut a = DenseMatrix::zeros(3, 3);
        ops.set_row(&mut a, 1, 1, &[5.0, 6.0]).unwrap();
        ops.set_column(&mut a, 0, 0, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            a,
            DenseMatrix::from_rows(&[[1.0, 0.0, 0.0], [2.0, 5.0, 6.0], [3.0, 0.0, 0.0]]).unwrap()
        );

        let before = a.clone();
        assert!(ops.set_row(&mut a, 0, 2, &[1.0, 1.0]).unwrap_err().is_shape_error());
        assert!(ops.set_column(&mut a, 3, 0, &[1.0]).unwrap_err().is_shape_error());
        assert_eq!(a, before);
    }

    #[test]
    fn test_extract_bounds() {
        let ops = OpsF64::new();
        let src = DenseMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
        let mut dst = DenseMatrix::zeros(2, 2);
        ops.extract(&src, 1..3, 0..2, &mut dst, 0, 0).unwrap();
        assert_eq!(dst, DenseMatrix::from_rows(&[[3.0, 4.0], [6.0, 7.0]]).unwrap());

        assert!(ops.extract(&src, 0..4, 0..1, &mut dst, 0, 0).is_err());
        assert!(ops.extract(&src, 0..2, 0..2, &mut dst, 1, 0).is_err());
    }

    #[test]
    fn test_dot_mixed_orientation() {
        let ops = OpsF64::new();
        let row = DenseMatrix::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        let col = DenseMatrix::from_rows(&[[4.0], [5.0], [6.0]]).unwrap();
        assert_eq!(ops.dot(&row, &col).unwrap(), 32.0);
        assert!(ops.dot(&row, &sample()).unwrap_err().is_shape_error());
    }

    #[test]
    fn test_kron_rejects_overflowing_dimensions() {
        let ops = OpsF64::new();
        let tall = DenseMatrix::<f64>::zeros(1usize << 33, 0);
        let mut out = DenseMatrix::zeros(0, 0);
        let err = ops.kron(&tall, &tall, &mut out).unwrap_err();
        assert!(matches!(err, MatrixError::DimensionMismatch { operation: "kron", .. }));
    }

    #[test]
    fn test_transpose_in_place_requires_square() {
        let ops = OpsF64::new();
        let mut a = sample();
        ops.transpose_in_place(&mut a).unwrap();
        assert_eq!(a, DenseMatrix::from_rows(&[[1.0, 3.0], [2.0, 4.0]]).unwrap());

        let mut rect = DenseMatrix::<f64>::zeros(2, 3);
        assert!(ops.transpose_in_place(&mut rect).is_err());
    }

    #[test]
    fn test_print_uses_configured_precision() {
        let ops = OpsF64::with_config(OpsConfigBuilder::new().print_precision(2).build());
        let mut buf = Vec::new();
        ops.print(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Type = DDRM , rows = 2 , cols = 2\n"));
        assert!(text.contains("1.00e0"));
    }
}
