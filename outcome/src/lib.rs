//! Outcome source — the random draws behind every simulated verification.
//!
//! Nothing in the demo actually verifies anything; each "blockchain check"
//! or "biometric match" ends in a uniform draw compared against a success
//! threshold. Putting the draw behind a trait keeps production code on the
//! thread RNG while tests inject a seeded or scripted source, so no test
//! depends on luck.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Basis points in a whole (10000 = 100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Source of uniform draws in `[0, 10000)` basis points.
pub trait OutcomeSource: Send + Sync {
    /// Draw a uniform value in `[0, 10000)`.
    fn draw_bps(&self) -> u32;

    /// Whether a fresh draw clears the given success threshold.
    fn passes(&self, success_bps: u16) -> bool {
        self.draw_bps() < u32::from(success_bps)
    }

    /// Human-readable name of this source.
    fn name(&self) -> &str;
}

/// The production source: one draw per call from the thread RNG.
pub struct ThreadRngOutcome;

impl OutcomeSource for ThreadRngOutcome {
    fn draw_bps(&self) -> u32 {
        rand::thread_rng().gen_range(0..BPS_DENOMINATOR)
    }

    fn name(&self) -> &str {
        "thread-rng"
    }
}

/// A seeded source. Two instances with the same seed produce the same
/// draw sequence.
pub struct SeededOutcome {
    rng: Mutex<StdRng>,
}

impl SeededOutcome {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl OutcomeSource for SeededOutcome {
    fn draw_bps(&self) -> u32 {
        self.rng.lock().unwrap().gen_range(0..BPS_DENOMINATOR)
    }

    fn name(&self) -> &str {
        "seeded"
    }
}

/// Generate a 6-digit access code in `[100000, 999999]`.
pub fn generate_access_code(source: &dyn OutcomeSource) -> String {
    // Two draws give ~27 bits, enough to cover the 900k code range evenly.
    let hi = source.draw_bps() as u64;
    let lo = source.draw_bps() as u64;
    let n = 100_000 + (hi * BPS_DENOMINATOR as u64 + lo) % 900_000;
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_agree() {
        let a = SeededOutcome::new(7);
        let b = SeededOutcome::new(7);
        for _ in 0..16 {
            assert_eq!(a.draw_bps(), b.draw_bps());
        }
    }

    #[test]
    fn draws_stay_in_range() {
        let source = ThreadRngOutcome;
        for _ in 0..64 {
            assert!(source.draw_bps() < BPS_DENOMINATOR);
        }
    }

    #[test]
    fn threshold_zero_never_passes_threshold_full_always_passes() {
        let source = SeededOutcome::new(42);
        for _ in 0..32 {
            assert!(!source.passes(0));
            assert!(source.passes(10_000));
        }
    }

    #[test]
    fn access_codes_are_six_digits() {
        let source = SeededOutcome::new(1);
        for _ in 0..128 {
            let code = generate_access_code(&source);
            assert_eq!(code.len(), 6);
            let n: u64 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&n));
        }
    }
}
