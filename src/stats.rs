//! Bounded sample windows and rolling statistics.
//!
//! Each sensor field keeps its recent samples in a fixed-capacity FIFO
//! window. Aggregates are recomputed over the current window contents on
//! demand; nothing is summarized or compacted away.

use statrs::statistics::Statistics;
use std::collections::VecDeque;
use std::fmt;

/// Why an aggregate could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    /// The window holds no samples.
    Empty,
    /// Sample standard deviation needs at least two samples.
    TooFewSamples,
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::Empty => write!(f, "no samples in window"),
            StatsError::TooFewSamples => {
                write!(f, "standard deviation requires at least 2 samples")
            }
        }
    }
}

impl std::error::Error for StatsError {}

/// A fixed-capacity FIFO window over one field's samples, oldest first.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    values: VecDeque<f64>,
    capacity: usize,
}

impl SampleWindow {
    /// Create a window holding up to `capacity` samples (must be >= 1).
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "window capacity must be at least 1");
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one when at capacity.
    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Current contents, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    /// Arithmetic mean over the current window contents.
    pub fn mean(&self) -> Result<f64, StatsError> {
        if self.values.is_empty() {
            return Err(StatsError::Empty);
        }
        Ok(self.values.iter().mean())
    }

    /// Sample standard deviation (denominator n-1) over the current window.
    ///
    /// The single-sample case is rejected explicitly rather than letting the
    /// n-1 denominator produce a NaN.
    pub fn std_dev(&self) -> Result<f64, StatsError> {
        if self.values.len() < 2 {
            return Err(StatsError::TooFewSamples);
        }
        Ok(self.values.iter().std_dev())
    }
}
