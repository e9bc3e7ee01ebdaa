use divs_types::DivsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    /// The step's required data is missing (file not selected, no date
    /// picked, no permission checked).
    #[error("precondition not met: {0}")]
    PreconditionNotMet(String),

    /// The requested transition is not legal from the current step.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Invalid(#[from] DivsError),

    #[error("invalid progress schedule: {0}")]
    BadSchedule(String),
}
