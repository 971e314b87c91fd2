//! Core enums used throughout the driver.

use serde::{Deserialize, Serialize};

/// Noise property a model is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Resistive (IR drop) noise.
    Resistive,
    /// Inductive (di/dt) noise.
    Inductive,
}

impl PropertyType {
    /// All property types, in plotting order.
    pub const ALL: [PropertyType; 2] = [PropertyType::Resistive, PropertyType::Inductive];

    /// Upper-case name used in run log headers.
    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::Resistive => "RESISTIVE",
            PropertyType::Inductive => "INDUCTIVE",
        }
    }

    /// Lower-case token used in artifact filenames.
    pub fn file_token(&self) -> &'static str {
        match self {
            PropertyType::Resistive => "resistive",
            PropertyType::Inductive => "inductive",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_token())
    }
}

/// How each window is handed to the external checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Open-loop statistical simulation with a saturation early-exit.
    Simulate,
    /// Exhaustive per-window checking over a finite horizon.
    Check,
}

impl RunMode {
    /// Title line of the run log header.
    pub fn header_title(&self) -> &'static str {
        match self {
            RunMode::Simulate => "Simulation parameters:",
            RunMode::Check => "Modest check parameters:",
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Simulate => write!(f, "simulation"),
            RunMode::Check => write!(f, "check"),
        }
    }
}
