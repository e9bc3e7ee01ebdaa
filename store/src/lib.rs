//! Abstract storage traits for the DIVS demo.
//!
//! Every backend (JSON file, in-memory for testing) implements these traits.
//! The rest of the workspace depends only on the traits, so the session and
//! identity layers never know where the blob actually lives.

pub mod error;
pub mod share;
pub mod user;

pub use error::StoreError;
pub use share::ShareStore;
pub use user::{Theme, UserStore};
