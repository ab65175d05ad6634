//! simplemat - dense real matrices routed through precision-specific backends.
//!
//! This crate re-exports the public surface of the workspace:
//!
//! - [`simplemat_core`]: element types, type keys, dense storage,
//!   configuration and errors
//! - [`simplemat_kernels`]: the raw numeric kernels the backends delegate to
//! - [`simplemat_backend`]: the [`Operations`] contract, the `f32`/`f64`
//!   backends and backend selection
//!
//! # Examples
//!
//! ```rust
//! use simplemat::prelude::*;
//!
//! let a = SimpleMatrix::<f64>::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
//! let b = SimpleMatrix::<f64>::from_rows(&[[2.0, 0.0], [1.0, 2.0]])?;
//!
//! assert_eq!(a.mult(&b)?.get(1, 0), Some(10.0));
//! assert_eq!(a.trace()?, 5.0);
//!
//! // Singular systems are reported as `None`, not as errors.
//! assert!(SimpleMatrix::<f64>::zeros(2, 2).invert()?.is_none());
//! # Ok::<(), simplemat::MatrixError>(())
//! ```
//!
//! Lower-level callers can drive a backend directly with caller-allocated
//! outputs:
//!
//! ```rust
//! use simplemat::prelude::*;
//!
//! let a = DenseMatrix::<f32>::filled(2, 3, 1.5);
//! let mut out = DenseMatrix::zeros(3, 2);
//! BackendSelector::resolve(&a).transpose(&a, &mut out)?;
//! assert_eq!(out.shape(), (3, 2));
//! # Ok::<(), simplemat::MatrixError>(())
//! ```

pub use simplemat_backend;
pub use simplemat_core;
pub use simplemat_kernels;

// Re-export nalgebra for interop with `DenseMatrix::to_nalgebra`
pub use nalgebra;

pub use simplemat_backend::{
    BackendSelector, HasBackend, Operations, OpsF32, OpsF64, RowMajorOps, SimpleMatrix, Solution,
};
pub use simplemat_core::{
    ops_config, DenseMatrix, Element, MatrixError, MatrixType, NarrowingPolicy, OpsConfig,
    OpsConfigBuilder, Result,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use simplemat_backend::prelude::*;
}
