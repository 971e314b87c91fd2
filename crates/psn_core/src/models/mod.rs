//! Data models for the verification driver.
//!
//! This module contains the core data structures shared by every stage:
//! - Enums for noise property types and run modes
//! - The validated, immutable run configuration
//! - Windows, samples and the accumulated probability timeline

mod enums;
mod run_config;
mod timeline;

pub use enums::{PropertyType, RunMode};
pub use run_config::{
    RunConfig, RunConfigBuilder, RunConfigError, DEFAULT_BLOCK_SIZE, DEFAULT_STRIDE,
    DEFAULT_THRESHOLD,
};
pub use timeline::{Sample, Timeline, Window};
