//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for the DIVS demo.
#[derive(Debug, Error)]
pub enum DivsError {
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("invalid OTP: {0}")]
    InvalidOtp(String),

    #[error("invalid access code: {0}")]
    InvalidAccessCode(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid registration number: {0}")]
    InvalidRegistration(String),

    #[error("file rejected: {0}")]
    FileRejected(String),

    #[error("at least one permission must be selected")]
    NoPermissions,

    #[error("{0}")]
    Other(String),
}
