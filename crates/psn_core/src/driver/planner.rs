//! Partitioning of the clock-cycle horizon into windows.

use crate::models::{RunConfig, Window};

/// Lazy sequence of contiguous windows starting at cycle 0.
///
/// Every window is `block_size` cycles wide except the last one of a
/// bounded run, which is clipped to the horizon. Unbounded planners never
/// end on their own. A planner is restarted by building a new one.
#[derive(Debug, Clone)]
pub struct WindowPlanner {
    block_size: u64,
    horizon: Option<u64>,
    /// Lower bound of the next window. `None` once exhausted.
    cursor: Option<u64>,
}

impl WindowPlanner {
    /// Planner over `[0, horizon]` with windows `block_size` cycles wide.
    ///
    /// `block_size` is the effective width, already scaled by the stride.
    /// A zero width is treated as 1.
    pub fn new(block_size: u64, horizon: Option<u64>) -> Self {
        Self {
            block_size: block_size.max(1),
            horizon,
            cursor: Some(0),
        }
    }

    /// Planner for a run configuration.
    pub fn for_config(config: &RunConfig) -> Self {
        Self::new(config.effective_block_size(), config.horizon())
    }

    /// Lower bound of the next window, if any.
    pub fn cursor(&self) -> Option<u64> {
        self.cursor
    }
}

impl Iterator for WindowPlanner {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        let lower = self.cursor?;

        if let Some(horizon) = self.horizon {
            if lower > horizon {
                self.cursor = None;
                return None;
            }
        }

        let mut upper = lower.saturating_add(self.block_size - 1);
        if let Some(horizon) = self.horizon {
            upper = upper.min(horizon);
        }

        self.cursor = upper.checked_add(1);
        Some(Window::new(lower, upper))
    }
}
