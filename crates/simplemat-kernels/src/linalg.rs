//! Linear-algebra kernels backed by nalgebra's decompositions.
//!
//! The row-major operands are copied into column-major nalgebra matrices for
//! the duration of a call; those scratch copies never escape the kernel.
//! Kernels that can meet a singular system return `false` instead of an
//! error, leaving the output unspecified.

use nalgebra::{DMatrix, DVector, Dyn, SVD};
use num_traits::Float;
use simplemat_core::{DenseMatrix, Element, MatrixError, Result};

use crate::reduce::element_max_abs;

/// True when some pivot is negligible relative to the largest input entry.
fn has_negligible_pivot<T: Element>(pivots: &DVector<T>, scale: T) -> bool {
    if scale == T::zero() {
        return true;
    }
    let tol = T::EPSILON * scale;
    pivots.iter().any(|&p| !(Float::abs(p) > tol))
}

fn decompose_svd<T: Element>(a: DMatrix<T>, compute_uv: bool) -> Result<SVD<T, Dyn, Dyn>> {
    SVD::try_new(a, compute_uv, compute_uv, T::EPSILON, 0)
        .ok_or_else(|| MatrixError::kernel_failure("svd", "did not converge"))
}

/// `out = a * b`
pub fn mult<T: Element>(a: &DenseMatrix<T>, b: &DenseMatrix<T>, out: &mut DenseMatrix<T>) -> Result<()> {
    let product = a.to_nalgebra() * b.to_nalgebra();
    out.copy_from_nalgebra(&product)
}

/// Inverts the square matrix `a` into `out` through an LU decomposition.
///
/// Returns `false` if `a` is singular.
pub fn invert<T: Element>(a: &DenseMatrix<T>, out: &mut DenseMatrix<T>) -> Result<bool> {
    debug_assert!(a.is_square());
    if a.is_empty() {
        return Ok(true);
    }

    let lu = a.to_nalgebra().lu();
    if has_negligible_pivot(&lu.u().diagonal(), element_max_abs(a)) {
        return Ok(false);
    }
    match lu.try_inverse() {
        Some(inverse) if inverse.iter().all(|&v| Float::is_finite(v)) => {
            out.copy_from_nalgebra(&inverse)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Solves `a * x = b`.
///
/// Square systems use LU; overdetermined systems (`rows > cols`) are solved
/// in the least-squares sense through QR. Underdetermined systems have no
/// unique solution and return `false`, as do rank-deficient ones. With no
/// unknowns the system is solved exactly when `b` is all zeros.
pub fn solve<T: Element>(a: &DenseMatrix<T>, x: &mut DenseMatrix<T>, b: &DenseMatrix<T>) -> Result<bool> {
    let (m, n) = a.shape();
    if n == 0 {
        return Ok(b.as_slice().iter().all(|&v| v == T::zero()));
    }
    if m < n {
        log::debug!("solve: {m}x{n} system is underdetermined");
        return Ok(false);
    }

    let scale = element_max_abs(a);
    let rhs = b.to_nalgebra();
    let solution = if m == n {
        let lu = a.to_nalgebra().lu();
        if has_negligible_pivot(&lu.u().diagonal(), scale) {
            return Ok(false);
        }
        lu.solve(&rhs)
    } else {
        log::debug!("solve: {m}x{n} system solved in the least-squares sense");
        let qr = a.to_nalgebra().qr();
        let r = qr.r();
        if has_negligible_pivot(&r.diagonal(), scale) {
            return Ok(false);
        }
        let qtb = qr.q().transpose() * rhs;
        r.solve_upper_triangular(&qtb)
    };

    match solution {
        Some(sol) if sol.iter().all(|&v| Float::is_finite(v)) => {
            x.copy_from_nalgebra(&sol)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Moore-Penrose pseudo-inverse via SVD.
///
/// Singular values below `eps * max(rows, cols) * sigma_max` are treated as zero.
pub fn pseudo_inverse<T: Element>(a: &DenseMatrix<T>, out: &mut DenseMatrix<T>) -> Result<()> {
    if a.is_empty() {
        return Ok(());
    }

    let (m, n) = a.shape();
    let svd = decompose_svd(a.to_nalgebra(), true)?;
    let sigma_max = svd.singular_values.iter().fold(T::zero(), |acc, &s| Float::max(acc, s));
    let tol = T::EPSILON * T::from_count(m.max(n)) * sigma_max;
    let pinv = svd
        .pseudo_inverse(tol)
        .map_err(|reason| MatrixError::kernel_failure("pseudo_inverse", reason))?;
    out.copy_from_nalgebra(&pinv)
}

/// Determinant of a square matrix; one for the empty matrix.
pub fn determinant<T: Element>(a: &DenseMatrix<T>) -> T {
    debug_assert!(a.is_square());
    if a.is_empty() {
        return T::one();
    }
    a.to_nalgebra().determinant()
}

/// Two-norm condition number `sigma_max / sigma_min` of a square matrix.
///
/// Infinite when `sigma_min <= eps * n * sigma_max` (numerically singular),
/// zero for the empty matrix.
pub fn condition_p2<T: Element>(a: &DenseMatrix<T>) -> Result<T> {
    debug_assert!(a.is_square());
    if a.is_empty() {
        return Ok(T::zero());
    }

    let svd = decompose_svd(a.to_nalgebra(), false)?;
    let (min, max) = svd
        .singular_values
        .iter()
        .fold((<T as Float>::infinity(), T::zero()), |(lo, hi), &s| {
            (Float::min(lo, s), Float::max(hi, s))
        });
    if min <= T::EPSILON * T::from_count(a.rows()) * max {
        return Ok(<T as Float>::infinity());
    }
    Ok(max / min)
}
