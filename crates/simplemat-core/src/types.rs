//! Element types and backend type keys.
//!
//! Every matrix carries a [`MatrixType`] key derived from its element type.
//! The key is what backend selection dispatches on; the element trait
//! [`Element`] bundles the numeric capabilities the kernels need together
//! with the raw conversions between the native element width and the wide
//! `f64` scalar used at the public API boundary.

use nalgebra::{RealField, Scalar as NalgebraScalar};
use num_traits::Float;
use std::fmt::{self, Debug, Display, LowerExp};

/// Type key identifying an (element type, storage layout) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatrixType {
    /// Single-precision real, dense, row-major.
    F32RowMajor,
    /// Double-precision real, dense, row-major.
    F64RowMajor,
}

impl MatrixType {
    /// All keys known to the library, in registration order.
    pub const ALL: [MatrixType; 2] = [MatrixType::F32RowMajor, MatrixType::F64RowMajor];

    /// Short identifier used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::F32RowMajor => "FDRM",
            Self::F64RowMajor => "DDRM",
        }
    }

    /// Width in bits of the native element type.
    pub fn element_bits(self) -> u32 {
        match self {
            Self::F32RowMajor => 32,
            Self::F64RowMajor => 64,
        }
    }

    /// Whether scalars crossing the API boundary lose precision.
    pub fn narrows_scalars(self) -> bool {
        self.element_bits() < 64
    }
}

impl Display for MatrixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for native element types (f32 or f64).
///
/// This trait combines the numeric traits required by the kernels with the
/// boundary conversions. The conversions here are the *raw* IEEE casts;
/// policy-aware narrowing lives in [`crate::narrowing`].
pub trait Element:
    NalgebraScalar
    + RealField
    + Float
    + Display
    + LowerExp
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Type key of dense row-major matrices holding this element.
    const MATRIX_TYPE: MatrixType;

    /// Rust name of the element type.
    const NAME: &'static str;

    /// Machine epsilon.
    const EPSILON: Self;

    /// Largest finite value.
    const MAX: Self;

    /// Narrow an `f64` with round-to-nearest. Finite values beyond the
    /// native range become infinite.
    fn from_wide(value: f64) -> Self;

    /// Widen to `f64`. Always exact.
    fn to_wide(self) -> f64;

    /// Narrow a `usize` count (used for scaling tolerances).
    fn from_count(n: usize) -> Self {
        Self::from_wide(n as f64)
    }
}

impl Element for f32 {
    const MATRIX_TYPE: MatrixType = MatrixType::F32RowMajor;
    const NAME: &'static str = "f32";
    const EPSILON: Self = f32::EPSILON;
    const MAX: Self = f32::MAX;

    #[inline]
    fn from_wide(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_wide(self) -> f64 {
        f64::from(self)
    }
}

impl Element for f64 {
    const MATRIX_TYPE: MatrixType = MatrixType::F64RowMajor;
    const NAME: &'static str = "f64";
    const EPSILON: Self = f64::EPSILON;
    const MAX: Self = f64::MAX;

    #[inline]
    fn from_wide(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_wide(self) -> f64 {
        self
    }
}
