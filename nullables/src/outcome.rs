//! Nullable outcome — scripted verification draws.

use divs_outcome::OutcomeSource;
use std::sync::Mutex;

/// A deterministic outcome source for testing.
///
/// Returns pre-configured draws in order, wrapping around when exhausted.
pub struct NullOutcome {
    draws: Mutex<Vec<u32>>,
    index: Mutex<usize>,
}

impl NullOutcome {
    /// Create with a sequence of deterministic draws (basis points).
    pub fn new(draws: Vec<u32>) -> Self {
        Self {
            draws: Mutex::new(draws),
            index: Mutex::new(0),
        }
    }

    /// Create with a single draw repeated for every call.
    pub fn constant(draw: u32) -> Self {
        Self::new(vec![draw])
    }

    /// A source whose draws always clear any nonzero threshold.
    pub fn always_pass() -> Self {
        Self::constant(0)
    }

    /// A source whose draws never clear any threshold.
    pub fn always_fail() -> Self {
        Self::constant(9999)
    }
}

impl OutcomeSource for NullOutcome {
    fn draw_bps(&self) -> u32 {
        let draws = self.draws.lock().unwrap();
        let mut idx = self.index.lock().unwrap();
        let current = *idx % draws.len();
        *idx += 1;
        draws[current]
    }

    fn name(&self) -> &str {
        "null-outcome"
    }
}
