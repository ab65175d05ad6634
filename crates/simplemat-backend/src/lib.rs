//! Operations contract and precision-specific backends for simplemat.
//!
//! The [`Operations`] trait is the contract every backend honors. One
//! generic implementation, [`RowMajorOps`], is instantiated for `f32`
//! ([`OpsF32`]) and `f64` ([`OpsF64`]); [`BackendSelector`] maps a matrix's
//! type key to the process-wide instance, and [`SimpleMatrix`] wraps the
//! whole thing in a value-returning API.
//!
//! # Example
//!
//! ```
//! use simplemat_backend::prelude::*;
//!
//! let a = DenseMatrix::<f64>::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let ops = BackendSelector::resolve(&a);
//!
//! let mut out = DenseMatrix::zeros(2, 2);
//! ops.scale(&a, 2.0, &mut out).unwrap();
//! assert_eq!(out[(1, 1)], 8.0);
//! assert_eq!(ops.trace(&a).unwrap(), 5.0);
//! ```

pub mod contract;
pub mod row_major;
pub mod selector;
pub mod shape;
pub mod simple;

pub use contract::{Operations, Solution};
pub use row_major::{OpsF32, OpsF64, RowMajorOps};
pub use selector::{BackendSelector, HasBackend, DDRM, FDRM};
pub use simple::SimpleMatrix;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::contract::{Operations, Solution};
    pub use crate::row_major::{OpsF32, OpsF64, RowMajorOps};
    pub use crate::selector::{BackendSelector, HasBackend};
    pub use crate::simple::SimpleMatrix;
    pub use simplemat_core::prelude::*;
}
