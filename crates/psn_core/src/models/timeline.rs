//! Windows, samples and the probability timeline.

use serde::{Deserialize, Serialize};

/// Inclusive clock-cycle range handed to one checker invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    /// First clock cycle in the window.
    pub lower: u64,
    /// Last clock cycle in the window (inclusive).
    pub upper: u64,
}

impl Window {
    /// Create a window. `upper` must not be below `lower`.
    pub fn new(lower: u64, upper: u64) -> Self {
        debug_assert!(upper >= lower, "window upper bound below lower bound");
        Self { lower, upper }
    }

    /// Number of clock cycles covered.
    pub fn width(&self) -> u64 {
        self.upper - self.lower + 1
    }

    /// Whether `cycle` lies inside the window.
    pub fn contains(&self, cycle: u64) -> bool {
        cycle >= self.lower && cycle <= self.upper
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.lower, self.upper)
    }
}

/// Estimated noise-occurrence probability at one clock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Clock cycle the estimate refers to.
    pub clock_cycle: u64,
    /// Probability in `[0.0, 1.0]`.
    pub probability: f64,
}

impl Sample {
    /// Create a sample.
    pub fn new(clock_cycle: u64, probability: f64) -> Self {
        Self {
            clock_cycle,
            probability,
        }
    }
}

/// Ordered sequence of samples accumulated over one run.
///
/// Insertion order is window-processing order. The driver is a pass-through
/// accumulator: monotonicity of the probabilities is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    samples: Vec<Sample>,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from existing samples.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Append the samples of one window.
    pub fn extend(&mut self, samples: impl IntoIterator<Item = Sample>) {
        self.samples.extend(samples);
    }

    /// All samples in insertion order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the timeline is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Last sample appended.
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Maximum probability seen so far.
    pub fn max_probability(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.probability)
            .fold(None, |acc, p| match acc {
                Some(m) if m >= p => Some(m),
                _ => Some(p),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_width_and_display() {
        let window = Window::new(50, 99);
        assert_eq!(window.width(), 50);
        assert!(window.contains(50));
        assert!(window.contains(99));
        assert!(!window.contains(100));
        assert_eq!(window.to_string(), "(50,99)");
    }

    #[test]
    fn max_probability_tracks_peak() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.max_probability(), None);

        timeline.extend(vec![Sample::new(0, 0.2), Sample::new(1, 0.7)]);
        timeline.extend(vec![Sample::new(2, 0.5)]);

        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.max_probability(), Some(0.7));
        assert_eq!(timeline.last().map(|s| s.clock_cycle), Some(2));
    }

    #[test]
    fn timeline_serializes_as_sequence() {
        let timeline = Timeline::from_samples(vec![Sample::new(4, 0.25)]);
        let json = serde_json::to_string(&timeline).unwrap();
        assert_eq!(json, "[{\"clock_cycle\":4,\"probability\":0.25}]");
    }
}
