//! Runtime configuration for backends and kernels.
//!
//! A process-wide default is built lazily on first use; backends copy the
//! configuration they are created with and never observe later changes.

use once_cell::sync::Lazy;
use std::sync::Arc;

/// How a wide `f64` scalar is converted to a narrower native element type
/// when its magnitude does not fit.
///
/// Under every policy NaN and infinite inputs pass through unchanged and
/// values too small to represent round to (signed) zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NarrowingPolicy {
    /// Plain IEEE rounding: finite overflow becomes ±infinity silently.
    Ieee,
    /// IEEE rounding, but finite overflow is reported through `log::warn!`.
    #[default]
    Warn,
    /// Finite overflow clamps to the largest finite native value.
    Saturate,
    /// Finite overflow is rejected with `MatrixError::NarrowingOverflow`.
    Strict,
}

/// Configuration shared by backends and kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpsConfig {
    /// Policy applied when narrowing boundary scalars.
    pub narrowing: NarrowingPolicy,
    /// Element count at which element-wise kernels go parallel.
    pub parallel_threshold: usize,
    /// Fractional digits used when printing matrices.
    pub print_precision: usize,
}

impl OpsConfig {
    /// Default element count for parallel element-wise kernels.
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 16;

    /// Default number of fractional digits for `print`.
    pub const DEFAULT_PRINT_PRECISION: usize = 4;

    /// Check if an element-wise kernel over `len` elements should run in parallel.
    pub fn should_parallelize(&self, len: usize) -> bool {
        len >= self.parallel_threshold
    }
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            narrowing: NarrowingPolicy::default(),
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
            print_precision: Self::DEFAULT_PRINT_PRECISION,
        }
    }
}

/// Global default configuration.
pub static OPS_CONFIG: Lazy<Arc<OpsConfig>> = Lazy::new(|| Arc::new(OpsConfig::default()));

/// Get the process-wide default configuration.
pub fn ops_config() -> &'static OpsConfig {
    &OPS_CONFIG
}

/// Builder for creating a custom configuration.
pub struct OpsConfigBuilder {
    config: OpsConfig,
}

impl OpsConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: OpsConfig::default(),
        }
    }

    /// Set the narrowing policy.
    pub fn narrowing(mut self, policy: NarrowingPolicy) -> Self {
        self.config.narrowing = policy;
        self
    }

    /// Set the element count at which element-wise kernels go parallel.
    ///
    /// `usize::MAX` keeps every kernel sequential.
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// Set the number of fractional digits used by `print`.
    pub fn print_precision(mut self, digits: usize) -> Self {
        self.config.print_precision = digits;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpsConfig {
        self.config
    }
}

impl Default for OpsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
