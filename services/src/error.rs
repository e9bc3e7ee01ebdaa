use divs_store::StoreError;
use divs_types::DivsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed a format check; the user corrects and resubmits.
    #[error(transparent)]
    Invalid(#[from] DivsError),

    /// The simulated backend rejected the attempt. Terminal for this
    /// attempt; recovery is re-invoking the same method.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
