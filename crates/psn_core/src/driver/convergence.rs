//! Saturation check for simulation runs.

use crate::models::Timeline;

/// Distance from 1 below which further simulation is uninformative.
pub const SATURATION_TOLERANCE: f64 = 1e-5;

/// Decision after a window's samples were appended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Convergence {
    /// Keep simulating.
    Continue,
    /// The running maximum reached `1 - SATURATION_TOLERANCE`.
    Saturated {
        /// Running maximum probability.
        p_max: f64,
        /// First clock cycle at which the maximum was reached.
        clock_cycle: u64,
    },
}

impl Convergence {
    pub fn is_saturated(&self) -> bool {
        matches!(self, Convergence::Saturated { .. })
    }
}

/// Stop/continue decision over the whole timeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvergenceMonitor;

impl ConvergenceMonitor {
    pub fn new() -> Self {
        Self
    }

    /// Probability at or above which a run is saturated.
    pub fn threshold(&self) -> f64 {
        1.0 - SATURATION_TOLERANCE
    }

    /// Evaluate the timeline accumulated so far.
    pub fn evaluate(&self, timeline: &Timeline) -> Convergence {
        let Some(p_max) = timeline.max_probability() else {
            return Convergence::Continue;
        };

        if p_max < self.threshold() {
            return Convergence::Continue;
        }

        let clock_cycle = timeline
            .samples()
            .iter()
            .find(|s| s.probability >= p_max)
            .map(|s| s.clock_cycle)
            .unwrap_or_default();

        Convergence::Saturated { p_max, clock_cycle }
    }
}
