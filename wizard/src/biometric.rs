//! Biometric verification wizard: `Capture → Verify → Result`.
//!
//! The capture step stands in for the camera: a fixed delay, then the
//! "face" is considered captured and verification may start.

use crate::cancel::CancelToken;
use crate::progress::ProgressSchedule;
use crate::{WizardError, WizardEvent};
use divs_outcome::OutcomeSource;
use divs_types::{BiometricType, SimulationParams};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BiometricStep {
    #[default]
    Capture,
    Verify,
    Result,
}

/// State machine for the biometric enrollment flow.
pub struct BiometricWizard {
    bio_type: BiometricType,
    step: BiometricStep,
    captured: bool,
    progress: u8,
    processing: bool,
    outcome: Option<bool>,
    events: Vec<WizardEvent>,
}

impl BiometricWizard {
    pub fn new(bio_type: BiometricType) -> Self {
        Self {
            bio_type,
            step: BiometricStep::Capture,
            captured: false,
            progress: 0,
            processing: false,
            outcome: None,
            events: Vec::new(),
        }
    }

    /// Run the mock capture. Resolves to `false` when cancelled before the
    /// capture window elapses; the wizard stays on the capture step.
    pub async fn capture(
        &mut self,
        params: &SimulationParams,
        cancel: &CancelToken,
    ) -> Result<bool, WizardError> {
        if self.step != BiometricStep::Capture {
            return Err(WizardError::InvalidState("capture already done".into()));
        }

        tokio::time::sleep(Duration::from_millis(params.capture_delay_ms)).await;
        if cancel.is_cancelled() {
            self.events.push(WizardEvent::Cancelled);
            return Ok(false);
        }

        self.captured = true;
        self.step = BiometricStep::Verify;
        self.events.push(WizardEvent::CaptureComplete);
        tracing::debug!(bio_type = ?self.bio_type, "capture complete");
        Ok(true)
    }

    /// Run the staged matching. Same contract as the document wizard:
    /// `Some(success)` on completion, `None` on cancellation.
    pub async fn run_verification(
        &mut self,
        params: &SimulationParams,
        outcome: &dyn OutcomeSource,
        cancel: &CancelToken,
    ) -> Result<Option<bool>, WizardError> {
        if !self.captured {
            return Err(WizardError::PreconditionNotMet("nothing captured yet".into()));
        }
        if self.step != BiometricStep::Verify || self.processing {
            return Err(WizardError::InvalidState(
                "verification is not ready to start".into(),
            ));
        }

        self.processing = true;
        self.progress = 0;

        for stage in ProgressSchedule::biometric(params).stages() {
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

        let success = outcome.passes(params.biometric_success_bps);
        self.processing = false;
        self.outcome = Some(success);
        self.step = BiometricStep::Result;
        self.events.push(WizardEvent::Completed { success });
        tracing::info!(success, bio_type = ?self.bio_type, "biometric verification finished");
        Ok(Some(success))
    }

    /// Back to the capture step with all captured data cleared.
    pub fn reset(&mut self) {
        self.step = BiometricStep::Capture;
        self.captured = false;
        self.progress = 0;
        self.processing = false;
        self.outcome = None;
    }

    pub fn bio_type(&self) -> BiometricType {
        self.bio_type
    }

    pub fn step(&self) -> BiometricStep {
        self.step
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn outcome(&self) -> Option<bool> {
        self.outcome
    }

    pub fn drain_events(&mut self) -> Vec<WizardEvent> {
        std::mem::take(&mut self.events)
    }
}
