//! Fundamental types for the DIVS demo.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: users, verification records, identity shares, timestamps,
//! simulation parameters, and input validators.

pub mod error;
pub mod file;
pub mod identity;
pub mod params;
pub mod time;
pub mod user;
pub mod validate;
pub mod verification;

pub use error::DivsError;
pub use file::{FileLimits, FileUpload};
pub use identity::{
    AccessCode, ExpiryWindow, IdentityShare, Permissions, ShareRequest, VerificationMethod,
};
pub use params::SimulationParams;
pub use time::{Clock, SystemClock, Timestamp};
pub use user::User;
pub use validate::Validators;
pub use verification::{
    BiometricData, BiometricType, BusinessVerification, DocumentType, SecurityScore,
    VerificationDocument, VerificationStatus,
};
