//! PSN Core - windowed verification driver for interconnect noise models.
//!
//! This crate partitions a clock-cycle horizon into checker-sized windows,
//! hands each window to an external probabilistic model checker, stitches
//! the per-window estimates into one probability timeline and persists it.
//! It has no CLI dependencies and can be embedded by other front ends.

pub mod checker;
pub mod config;
pub mod driver;
pub mod logging;
pub mod models;
pub mod plot;
pub mod render;
pub mod results;
pub mod trace;
