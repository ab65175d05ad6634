//! Numeric kernels for dense row-major matrices.
//!
//! Each kernel performs one operation category and assumes its operands
//! were already shape-checked by the calling backend; violations are only
//! caught by `debug_assert!`. Kernels compute in the native element type
//! and never retain state between calls.
//!
//! # Modules
//!
//! - [`elementwise`]: Element-wise arithmetic, optionally parallel
//! - [`io`]: Human-readable printing
//! - [`linalg`]: Products, inverses, solves and decomposition-based quantities
//! - [`reduce`]: Reductions and predicates over all elements
//! - [`structural`]: Transpose, extraction and Kronecker product

pub mod elementwise;
pub mod io;
pub mod linalg;
pub mod reduce;
pub mod structural;
