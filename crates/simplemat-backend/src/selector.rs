//! Backend registry and selection by matrix type key.

use crate::contract::Operations;
use crate::row_major::{OpsF32, OpsF64};
use once_cell::sync::Lazy;
use simplemat_core::{DenseMatrix, Element, MatrixError, MatrixType, Result};

/// Process-wide single-precision backend.
pub static FDRM: Lazy<OpsF32> = Lazy::new(OpsF32::new);

/// Process-wide double-precision backend.
pub static DDRM: Lazy<OpsF64> = Lazy::new(OpsF64::new);

/// Element types with a registered process-wide backend.
pub trait HasBackend: Element {
    /// The backend shared by every matrix of this element type.
    fn backend() -> &'static dyn Operations<Self>;
}

impl HasBackend for f32 {
    fn backend() -> &'static dyn Operations<f32> {
        &*FDRM
    }
}

impl HasBackend for f64 {
    fn backend() -> &'static dyn Operations<f64> {
        &*DDRM
    }
}

/// Resolves the backend responsible for a matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackendSelector;

impl BackendSelector {
    /// Returns the backend for the type key carried by `matrix`.
    pub fn resolve<T: HasBackend>(matrix: &DenseMatrix<T>) -> &'static dyn Operations<T> {
        let backend = T::backend();
        log::debug!(
            "resolved {}x{} {} matrix to backend {}",
            matrix.rows(),
            matrix.cols(),
            matrix.matrix_type(),
            backend.name()
        );
        backend
    }

    /// Looks up the `T` backend registered under `key`.
    ///
    /// Fails when `key` names a backend for a different element type.
    pub fn lookup<T: HasBackend>(key: MatrixType) -> Result<&'static dyn Operations<T>> {
        if key != T::MATRIX_TYPE {
            return Err(MatrixError::NoBackend {
                key,
                element: T::NAME,
            });
        }
        Ok(T::backend())
    }

    /// Lists the type keys that have a registered backend.
    pub fn available() -> Vec<MatrixType> {
        MatrixType::ALL.to_vec()
    }
}
