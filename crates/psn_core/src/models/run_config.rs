//! Immutable run configuration and its validating builder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::enums::{PropertyType, RunMode};

/// Default noise threshold.
pub const DEFAULT_THRESHOLD: u32 = 1;

/// Default sampling stride.
pub const DEFAULT_STRIDE: u64 = 1;

/// Default number of sampled cycles per window.
pub const DEFAULT_BLOCK_SIZE: u64 = 50;

/// Errors raised while building a [`RunConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunConfigError {
    /// A field that must be at least 1 was zero.
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },

    /// `block_size * stride` does not fit in a clock-cycle counter.
    #[error("block size {block_size} with stride {stride} overflows the clock-cycle range")]
    BlockSizeOverflow { block_size: u64, stride: u64 },
}

/// Configuration of one driver run.
///
/// Built once through [`RunConfig::builder`] and never mutated afterwards.
/// All fields are validated, so `effective_block_size()` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    size: u32,
    property: PropertyType,
    horizon: Option<u64>,
    threshold: u32,
    stride: u64,
    block_size: u64,
    flit_generation: Option<String>,
}

impl RunConfig {
    /// Start building a configuration for a `size x size` interconnect.
    pub fn builder(size: u32, property: PropertyType) -> RunConfigBuilder {
        RunConfigBuilder::new(size, property)
    }

    /// Interconnect dimension (the mesh is `size x size`).
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Noise property being estimated.
    pub fn property(&self) -> PropertyType {
        self.property
    }

    /// Last clock cycle of interest, or `None` for an unbounded run.
    pub fn horizon(&self) -> Option<u64> {
        self.horizon
    }

    /// Noise threshold passed to the model renderer.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Sampling stride in clock cycles.
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Requested block size, in sampled cycles.
    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Window width in clock cycles (`block_size * stride`).
    pub fn effective_block_size(&self) -> u64 {
        // Overflow is rejected in `build()`.
        self.block_size * self.stride
    }

    /// Optional flit generation pattern forwarded to the renderer.
    pub fn flit_generation(&self) -> Option<&str> {
        self.flit_generation.as_deref()
    }

    /// Configuration header written at the top of the run log.
    pub fn header(&self, mode: RunMode) -> String {
        let horizon = match self.horizon {
            Some(h) => h.to_string(),
            None => "None".to_string(),
        };

        let mut out = String::new();
        out.push_str(mode.header_title());
        out.push('\n');
        out.push_str(&format!("  Size: {}x{}\n", self.size, self.size));
        out.push_str(&format!("  Noise Type: {}\n", self.property.name()));
        out.push_str(&format!("  Clock Upper Bound: {}\n", horizon));
        out.push_str(&format!("  Threshold: {}\n", self.threshold));
        out.push_str(&format!("  Stride: {}\n", self.stride));
        out.push_str(&format!("  Block Size: {}\n", self.block_size));
        out
    }
}

/// Builder for [`RunConfig`] holding the default parameters in one place.
#[derive(Debug, Clone)]
pub struct RunConfigBuilder {
    size: u32,
    property: PropertyType,
    horizon: Option<u64>,
    threshold: u32,
    stride: u64,
    block_size: u64,
    flit_generation: Option<String>,
}

impl RunConfigBuilder {
    /// Create a builder with default threshold, stride and block size.
    pub fn new(size: u32, property: PropertyType) -> Self {
        Self {
            size,
            property,
            horizon: None,
            threshold: DEFAULT_THRESHOLD,
            stride: DEFAULT_STRIDE,
            block_size: DEFAULT_BLOCK_SIZE,
            flit_generation: None,
        }
    }

    /// Set the horizon (`None` = unbounded).
    pub fn horizon(mut self, horizon: Option<u64>) -> Self {
        self.horizon = horizon;
        self
    }

    /// Set the noise threshold.
    pub fn threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the sampling stride.
    pub fn stride(mut self, stride: u64) -> Self {
        self.stride = stride;
        self
    }

    /// Set the requested block size (before stride scaling).
    pub fn block_size(mut self, block_size: u64) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the flit generation pattern.
    pub fn flit_generation(mut self, pattern: Option<String>) -> Self {
        self.flit_generation = pattern;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<RunConfig, RunConfigError> {
        if self.size == 0 {
            return Err(RunConfigError::Zero { field: "size" });
        }
        if self.threshold == 0 {
            return Err(RunConfigError::Zero { field: "threshold" });
        }
        if self.stride == 0 {
            return Err(RunConfigError::Zero { field: "stride" });
        }
        if self.block_size == 0 {
            return Err(RunConfigError::Zero { field: "block size" });
        }
        if self.block_size.checked_mul(self.stride).is_none() {
            return Err(RunConfigError::BlockSizeOverflow {
                block_size: self.block_size,
                stride: self.stride,
            });
        }

        Ok(RunConfig {
            size: self.size,
            property: self.property,
            horizon: self.horizon,
            threshold: self.threshold,
            stride: self.stride,
            block_size: self.block_size,
            flit_generation: self.flit_generation,
        })
    }
}
