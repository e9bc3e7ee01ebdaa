//! Wizard state machines for the verification flows.
//!
//! Each flow is a small linear machine: `entry → capture/input →
//! processing → result`, with `reset` back to entry from anywhere.
//! Forward transitions are gated on preconditions and return errors
//! instead of silently ignoring the call. Processing advances through
//! fixed sub-stages on a [`progress::ProgressSchedule`], checking a
//! [`cancel::CancelToken`] between stages so an abandoned run never
//! touches state after its consumer has gone away.
//!
//! Wizards buffer [`WizardEvent`]s for the caller to drain, the same way
//! the front end would subscribe to progress updates.

pub mod biometric;
pub mod business;
pub mod cancel;
pub mod document;
pub mod error;
pub mod progress;
pub mod share;

pub use biometric::{BiometricStep, BiometricWizard};
pub use business::{Appointment, Availability, BusinessStep, BusinessWizard, Location};
pub use cancel::CancelToken;
pub use document::{DocumentStep, DocumentWizard};
pub use error::WizardError;
pub use progress::{ProgressSchedule, Stage};
pub use share::{ShareTab, ShareWizard};

/// Events emitted by a wizard while it runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardEvent {
    /// A processing sub-stage finished; `percent` is cumulative progress.
    StageReached { percent: u8 },
    /// The mock camera capture finished.
    CaptureComplete,
    /// Processing ended with a drawn outcome.
    Completed { success: bool },
    /// The run was cancelled between stages; no terminal state was set.
    Cancelled,
}
