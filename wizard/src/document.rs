//! Document verification wizard: `Upload → Verify → Result`.

use crate::cancel::CancelToken;
use crate::progress::ProgressSchedule;
use crate::{WizardError, WizardEvent};
use divs_outcome::OutcomeSource;
use divs_types::{FileLimits, FileUpload, SimulationParams};
use std::time::Duration;

/// The wizard's tabs. Processing happens inside `Verify`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DocumentStep {
    #[default]
    Upload,
    Verify,
    Result,
}

/// State machine for the document upload flow.
#[derive(Default)]
pub struct DocumentWizard {
    step: DocumentStep,
    file: Option<FileUpload>,
    progress: u8,
    processing: bool,
    outcome: Option<bool>,
    events: Vec<WizardEvent>,
}

impl DocumentWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a selected file and advance to the verify step.
    pub fn select_file(&mut self, file: FileUpload) -> Result<(), WizardError> {
        if self.step != DocumentStep::Upload {
            return Err(WizardError::InvalidState(
                "a document is already selected; reset first".into(),
            ));
        }
        FileLimits::documents().check(&file)?;
        tracing::debug!(file = %file.name, "document selected");
        self.file = Some(file);
        self.step = DocumentStep::Verify;
        Ok(())
    }

    /// Run the staged verification. Resolves to `Some(success)` when the
    /// run completes, `None` when cancelled between stages (no terminal
    /// state is set and the wizard stays on the verify step).
    pub async fn run_verification(
        &mut self,
        params: &SimulationParams,
        outcome: &dyn OutcomeSource,
        cancel: &CancelToken,
    ) -> Result<Option<bool>, WizardError> {
        if self.file.is_none() {
            return Err(WizardError::PreconditionNotMet("no document selected".into()));
        }
        if self.step != DocumentStep::Verify || self.processing {
            return Err(WizardError::InvalidState(
                "verification is not ready to start".into(),
            ));
        }

        self.processing = true;
        self.progress = 0;

        for stage in ProgressSchedule::document(params).stages() {
            if cancel.is_cancelled() {
                self.processing = false;
                self.events.push(WizardEvent::Cancelled);
                return Ok(None);
            }
            tokio::time::sleep(Duration::from_millis(stage.delay_ms)).await;
            if cancel.is_cancelled() {
                self.processing = false;
                self.events.push(WizardEvent::Cancelled);
                return Ok(None);
            }
            self.progress = stage.percent;
            self.events.push(WizardEvent::StageReached {
                percent: stage.percent,
            });
        }

        let success = outcome.passes(params.document_success_bps);
        self.processing = false;
        self.outcome = Some(success);
        self.step = DocumentStep::Result;
        self.events.push(WizardEvent::Completed { success });
        tracing::info!(success, "document verification finished");
        Ok(Some(success))
    }

    /// Back to the upload step with all captured data cleared.
    pub fn reset(&mut self) {
        *self = Self {
            events: std::mem::take(&mut self.events),
            ..Self::default()
        };
    }

    pub fn step(&self) -> DocumentStep {
        self.step
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn file(&self) -> Option<&FileUpload> {
        self.file.as_ref()
    }

    /// `Some(true)`/`Some(false)` once a run has finished, `None` before.
    pub fn outcome(&self) -> Option<bool> {
        self.outcome
    }

    /// Drain buffered events for the caller to render.
    pub fn drain_events(&mut self) -> Vec<WizardEvent> {
        std::mem::take(&mut self.events)
    }
}
