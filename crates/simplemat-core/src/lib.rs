//! Core types for simplemat.
//!
//! This crate provides the foundation shared by the kernels and the
//! backends: element types and their type keys, the dense row-major
//! container, scalar narrowing, configuration and the error type.
//!
//! # Key Concepts
//!
//! - **Element**: the native scalar width a backend computes in
//! - **Type key**: [`MatrixType`], carried by every matrix and used for backend selection
//! - **Narrowing**: converting the `f64` scalars of the public API to the native width
//!
//! # Modules
//!
//! - [`config`]: Runtime configuration and the narrowing policy
//! - [`error`]: Error types for matrix operations
//! - [`matrix`]: Dense row-major storage
//! - [`narrowing`]: Boundary scalar conversion
//! - [`types`]: Element trait and type keys

pub mod config;
pub mod error;
pub mod matrix;
pub mod narrowing;
pub mod types;

// Re-export commonly used items at the crate root
pub use config::{ops_config, NarrowingPolicy, OpsConfig, OpsConfigBuilder};
pub use error::{MatrixError, Result};
pub use matrix::DenseMatrix;
pub use narrowing::{to_native, to_native_all, to_wide};
pub use types::{Element, MatrixType};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use simplemat_core::prelude::*;
///
/// let m = DenseMatrix::<f32>::identity(2);
/// assert_eq!(m.matrix_type(), MatrixType::F32RowMajor);
/// ```
pub mod prelude {
    pub use crate::config::{NarrowingPolicy, OpsConfig, OpsConfigBuilder};
    pub use crate::error::{MatrixError, Result};
    pub use crate::matrix::DenseMatrix;
    pub use crate::types::{Element, MatrixType};
}
