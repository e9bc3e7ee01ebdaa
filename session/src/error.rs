use divs_store::StoreError;
use divs_types::DivsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Invalid(#[from] DivsError),

    #[error("invalid OTP")]
    WrongOtp,

    #[error("user not found, please sign up first")]
    UserNotFound,

    #[error("no user is signed in")]
    NotSignedIn,

    #[error(transparent)]
    Store(#[from] StoreError),
}
