//! The mock service layer.
//!
//! Each service method accepts plain data, waits a fixed simulated latency,
//! and resolves with either a record or a rejection. No real I/O happens;
//! outcomes come from the injected [`divs_outcome::OutcomeSource`] and time
//! from the injected [`divs_types::Clock`]. There are no retries and no
//! partial-failure semantics — callers surface the error and let the user
//! try again.

pub mod error;
pub mod identity;
pub mod storage;
pub mod verification;

pub use error::ServiceError;
pub use identity::{AccessGrant, IdentityService};
pub use storage::{StorageService, StoredFile};
pub use verification::VerificationService;
