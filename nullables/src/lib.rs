//! Nullable infrastructure for deterministic testing.
//!
//! All external effects in the demo (clock, random outcomes, storage) are
//! abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod outcome;
pub mod store;

pub use clock::NullClock;
pub use outcome::NullOutcome;
pub use store::NullStore;
