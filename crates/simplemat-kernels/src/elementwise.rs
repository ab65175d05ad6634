//! Element-wise kernels.
//!
//! Every output element depends only on the inputs at the same position, so
//! large operands are split across the rayon pool without changing results.
//! Division and powers follow IEEE semantics: a zero divisor yields ±inf or
//! NaN and is never reported as an error.

use num_traits::Float;
use rayon::prelude::*;
use simplemat_core::{DenseMatrix, Element, OpsConfig};

fn map_unary<T, F>(src: &[T], dst: &mut [T], parallel: bool, f: F)
where
    T: Element,
    F: Fn(T) -> T + Send + Sync,
{
    debug_assert_eq!(src.len(), dst.len());
    if parallel {
        dst.par_iter_mut()
            .zip(src.par_iter())
            .for_each(|(d, &s)| *d = f(s));
    } else {
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = f(s);
        }
    }
}

fn map_binary<T, F>(a: &[T], b: &[T], dst: &mut [T], parallel: bool, f: F)
where
    T: Element,
    F: Fn(T, T) -> T + Send + Sync,
{
    debug_assert!(a.len() == b.len() && a.len() == dst.len());
    if parallel {
        dst.par_iter_mut()
            .zip(a.par_iter().zip(b.par_iter()))
            .for_each(|(d, (&x, &y))| *d = f(x, y));
    } else {
        for (d, (&x, &y)) in dst.iter_mut().zip(a.iter().zip(b)) {
            *d = f(x, y);
        }
    }
}

fn map_in_place<T, F>(data: &mut [T], parallel: bool, f: F)
where
    T: Element,
    F: Fn(T) -> T + Send + Sync,
{
    if parallel {
        data.par_iter_mut().for_each(|v| *v = f(*v));
    } else {
        for v in data.iter_mut() {
            *v = f(*v);
        }
    }
}

macro_rules! binary_kernel {
    ($(#[$doc:meta])* $name:ident, |$x:ident, $y:ident| $body:expr) => {
        $(#[$doc])*
        pub fn $name<T: Element>(
            a: &DenseMatrix<T>,
            b: &DenseMatrix<T>,
            out: &mut DenseMatrix<T>,
            config: &OpsConfig,
        ) {
            let parallel = config.should_parallelize(out.len());
            map_binary(a.as_slice(), b.as_slice(), out.as_mut_slice(), parallel, |$x, $y| $body);
        }
    };
}

binary_kernel!(
    /// `out = a + b`
    add, |x, y| x + y
);
binary_kernel!(
    /// `out = a - b`
    subtract, |x, y| x - y
);
binary_kernel!(
    /// `out[i] = a[i] * b[i]`
    element_mult, |x, y| x * y
);
binary_kernel!(
    /// `out[i] = a[i] / b[i]`
    element_div, |x, y| x / y
);
binary_kernel!(
    /// `out[i] = a[i] ^ b[i]`
    element_power, |x, y| Float::powf(x, y)
);

/// `out = a + beta * b`
pub fn add_scaled<T: Element>(
    a: &DenseMatrix<T>,
    beta: T,
    b: &DenseMatrix<T>,
    out: &mut DenseMatrix<T>,
    config: &OpsConfig,
) {
    let parallel = config.should_parallelize(out.len());
    map_binary(a.as_slice(), b.as_slice(), out.as_mut_slice(), parallel, |x, y| {
        x + beta * y
    });
}

/// `out = a + value`
pub fn add_scalar<T: Element>(
    a: &DenseMatrix<T>,
    value: T,
    out: &mut DenseMatrix<T>,
    config: &OpsConfig,
) {
    let parallel = config.should_parallelize(out.len());
    map_unary(a.as_slice(), out.as_mut_slice(), parallel, |x| x + value);
}

/// `out = a - value`
pub fn subtract_scalar<T: Element>(
    a: &DenseMatrix<T>,
    value: T,
    out: &mut DenseMatrix<T>,
    config: &OpsConfig,
) {
    let parallel = config.should_parallelize(out.len());
    map_unary(a.as_slice(), out.as_mut_slice(), parallel, |x| x - value);
}

/// `out = alpha * a`
pub fn scale<T: Element>(alpha: T, a: &DenseMatrix<T>, out: &mut DenseMatrix<T>, config: &OpsConfig) {
    let parallel = config.should_parallelize(out.len());
    map_unary(a.as_slice(), out.as_mut_slice(), parallel, |x| alpha * x);
}

/// `out = a / alpha`
pub fn divide<T: Element>(a: &DenseMatrix<T>, alpha: T, out: &mut DenseMatrix<T>, config: &OpsConfig) {
    let parallel = config.should_parallelize(out.len());
    map_unary(a.as_slice(), out.as_mut_slice(), parallel, |x| x / alpha);
}

/// `out[i] = a[i] ^ exponent`
pub fn element_power_scalar<T: Element>(
    a: &DenseMatrix<T>,
    exponent: T,
    out: &mut DenseMatrix<T>,
    config: &OpsConfig,
) {
    let parallel = config.should_parallelize(out.len());
    map_unary(a.as_slice(), out.as_mut_slice(), parallel, |x| {
        Float::powf(x, exponent)
    });
}

/// `out[i] = e ^ a[i]`
pub fn element_exp<T: Element>(a: &DenseMatrix<T>, out: &mut DenseMatrix<T>, config: &OpsConfig) {
    let parallel = config.should_parallelize(out.len());
    map_unary(a.as_slice(), out.as_mut_slice(), parallel, <T as Float>::exp);
}

/// `out[i] = ln(a[i])`
pub fn element_log<T: Element>(a: &DenseMatrix<T>, out: &mut DenseMatrix<T>, config: &OpsConfig) {
    let parallel = config.should_parallelize(out.len());
    map_unary(a.as_slice(), out.as_mut_slice(), parallel, <T as Float>::ln);
}

/// Negates every element in place.
pub fn change_sign<T: Element>(a: &mut DenseMatrix<T>, config: &OpsConfig) {
    let parallel = config.should_parallelize(a.len());
    map_in_place(a.as_mut_slice(), parallel, |x| -x);
}

/// Sets every element to `value`.
pub fn fill<T: Element>(a: &mut DenseMatrix<T>, value: T) {
    a.as_mut_slice().fill(value);
}
