//! Fixed-window moving average for derived smoothing columns.

use std::collections::VecDeque;

/// Suffix appended to a base column name for its smoothed companion.
pub const AVERAGE_SUFFIX: &str = "__avg";

/// Name of the smoothed companion column of `base`.
pub fn average_column_name(base: &str) -> String {
    format!("{base}{AVERAGE_SUFFIX}")
}

/// Mean over the last `window` numeric values.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window_size: usize,
    window: VecDeque<f64>,
}

impl MovingAverage {
    /// Create a new moving average. A zero window is treated as one.
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            window_size,
            window: VecDeque::with_capacity(window_size),
        }
    }

    /// Feeds the next observation and returns the current mean.
    ///
    /// A missing observation leaves the window untouched and yields `None`.
    pub fn push(&mut self, value: Option<f64>) -> Option<f64> {
        let value = value?;
        self.window.push_back(value);
        if self.window.len() > self.window_size {
            self.window.pop_front();
        }
        Some(self.window.iter().sum::<f64>() / self.window.len() as f64)
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }
}
