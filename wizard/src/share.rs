//! Identity-share wizard: a generate tab and a scan/verify tab.
//!
//! Generation mints the code locally from the selected permissions,
//! expiry, and method. The scan side walks a 10%-tick progress bar and
//! ends in a 90% access draw — deliberately independent of whatever code
//! was generated or entered.

use crate::cancel::CancelToken;
use crate::progress::ProgressSchedule;
use crate::{WizardError, WizardEvent};
use divs_outcome::{generate_access_code, OutcomeSource};
use divs_types::{
    AccessCode, Clock, DivsError, ExpiryWindow, Permissions, SimulationParams, Validators,
    VerificationMethod,
};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShareTab {
    #[default]
    Generate,
    Verify,
}

/// State machine for the QR / access-code sharing flow.
pub struct ShareWizard {
    tab: ShareTab,
    permissions: Permissions,
    expiry: ExpiryWindow,
    method: VerificationMethod,
    generated: Option<AccessCode>,
    scan_progress: u8,
    scan_complete: bool,
    scanning: bool,
    access_granted: Option<bool>,
    events: Vec<WizardEvent>,
}

impl Default for ShareWizard {
    fn default() -> Self {
        Self {
            tab: ShareTab::Generate,
            // The form starts with "ID only" checked.
            permissions: Permissions::id_only(),
            expiry: ExpiryWindow::default(),
            method: VerificationMethod::default(),
            generated: None,
            scan_progress: 0,
            scan_complete: false,
            scanning: false,
            access_granted: None,
            events: Vec::new(),
        }
    }
}

impl ShareWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tab(&mut self, tab: ShareTab) {
        self.tab = tab;
    }

    pub fn set_permissions(&mut self, permissions: Permissions) {
        self.permissions = permissions;
        // A changed grant invalidates the previous code.
        self.generated = None;
    }

    pub fn set_expiry(&mut self, expiry: ExpiryWindow) {
        self.expiry = expiry;
        self.generated = None;
    }

    pub fn set_method(&mut self, method: VerificationMethod) {
        self.method = method;
        self.generated = None;
    }

    /// Mint a code for the current selections. At least one permission
    /// must be checked.
    pub fn generate(
        &mut self,
        outcome: &dyn OutcomeSource,
        clock: &dyn Clock,
    ) -> Result<AccessCode, WizardError> {
        if self.permissions.is_empty() {
            return Err(WizardError::Invalid(DivsError::NoPermissions));
        }

        let code = generate_access_code(outcome);
        let access = AccessCode {
            code,
            expires_at: self.expiry.expires_at(clock.now()),
            permissions: self.permissions,
            method: self.method,
        };
        tracing::debug!(code = %access.code, "access code generated");
        self.generated = Some(access.clone());
        Ok(access)
    }

    /// Run the scan for a submitted code. `Some(granted)` on completion,
    /// `None` on cancellation (no grant decision is recorded).
    pub async fn run_scan(
        &mut self,
        code: &str,
        params: &SimulationParams,
        outcome: &dyn OutcomeSource,
        cancel: &CancelToken,
    ) -> Result<Option<bool>, WizardError> {
        Validators::access_code(code)?;
        if self.scanning {
            return Err(WizardError::InvalidState("a scan is already running".into()));
        }

        self.scanning = true;
        self.scan_progress = 0;
        self.scan_complete = false;
        self.access_granted = None;

        for stage in ProgressSchedule::scan(params).stages() {
            if cancel.is_cancelled() {
                self.scanning = false;
                self.events.push(WizardEvent::Cancelled);
                return Ok(None);
            }
            tokio::time::sleep(Duration::from_millis(stage.delay_ms)).await;
            if cancel.is_cancelled() {
                self.scanning = false;
                self.events.push(WizardEvent::Cancelled);
                return Ok(None);
            }
            self.scan_progress = stage.percent;
            self.events.push(WizardEvent::StageReached {
                percent: stage.percent,
            });
        }

        // The draw alone decides; the code itself is never looked up.
        let granted = outcome.passes(params.access_success_bps);
        self.scanning = false;
        self.scan_complete = true;
        self.access_granted = Some(granted);
        self.events.push(WizardEvent::Completed { success: granted });
        tracing::info!(granted, "access scan finished");
        Ok(Some(granted))
    }

    /// Clear the scan side only; the generated code stays.
    pub fn reset_scan(&mut self) {
        self.scan_progress = 0;
        self.scan_complete = false;
        self.scanning = false;
        self.access_granted = None;
    }

    /// Back to a fresh generate tab with everything cleared.
    pub fn reset(&mut self) {
        *self = Self {
            events: std::mem::take(&mut self.events),
            ..Self::default()
        };
    }

    pub fn tab(&self) -> ShareTab {
        self.tab
    }

    pub fn generated(&self) -> Option<&AccessCode> {
        self.generated.as_ref()
    }

    pub fn scan_progress(&self) -> u8 {
        self.scan_progress
    }

    pub fn scan_complete(&self) -> bool {
        self.scan_complete
    }

    pub fn access_granted(&self) -> Option<bool> {
        self.access_granted
    }

    pub fn drain_events(&mut self) -> Vec<WizardEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use divs_nullables::{NullClock, NullOutcome};

    #[test]
    fn generate_yields_six_digit_code_with_expiry() {
        let mut wizard = ShareWizard::new();
        wizard.set_expiry(ExpiryWindow::SixHours);

        let clock = NullClock::new(1_000_000);
        let outcome = NullOutcome::new(vec![42, 4242]);
        let access = wizard.generate(&outcome, &clock).unwrap();

        assert_eq!(access.code.len(), 6);
        let n: u64 = access.code.parse().unwrap();
        assert!((100_000..=999_999).contains(&n));
        assert_eq!(access.expires_at.as_millis(), 1_000_000 + 6 * 3_600_000);
    }

    #[test]
    fn generate_requires_a_permission() {
        let mut wizard = ShareWizard::new();
        wizard.set_permissions(Permissions::default());

        let err = wizard
            .generate(&NullOutcome::constant(0), &NullClock::new(0))
            .unwrap_err();
        assert!(matches!(err, WizardError::Invalid(DivsError::NoPermissions)));
        assert!(wizard.generated().is_none());
    }

    #[test]
    fn changing_selections_invalidates_the_code() {
        let mut wizard = ShareWizard::new();
        wizard
            .generate(&NullOutcome::constant(0), &NullClock::new(0))
            .unwrap();
        assert!(wizard.generated().is_some());

        wizard.set_method(VerificationMethod::Code);
        assert!(wizard.generated().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn scan_walks_ten_percent_ticks_then_draws() {
        let mut wizard = ShareWizard::new();
        let granted = wizard
            .run_scan(
                "123456",
                &SimulationParams::defaults(),
                &NullOutcome::always_pass(),
                &CancelToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(granted, Some(true));
        assert!(wizard.scan_complete());
        assert_eq!(wizard.scan_progress(), 100);

        let percents: Vec<u8> = wizard
            .drain_events()
            .iter()
            .filter_map(|e| match e {
                WizardEvent::StageReached { percent } => Some(*percent),
                _ => None,
            })
            .collect();
        assert_eq!(percents, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    }

    #[tokio::test(start_paused = true)]
    async fn scan_rejects_malformed_codes_before_starting() {
        let mut wizard = ShareWizard::new();
        let err = wizard
            .run_scan(
                "12ab56",
                &SimulationParams::instant(),
                &NullOutcome::always_pass(),
                &CancelToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::Invalid(_)));
        assert_eq!(wizard.scan_progress(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn scan_grants_follow_the_draw_not_the_code() {
        // A never-minted code is denied only because the draw fails.
        let mut wizard = ShareWizard::new();
        let granted = wizard
            .run_scan(
                "999999",
                &SimulationParams::instant(),
                &NullOutcome::always_fail(),
                &CancelToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(granted, Some(false));
        assert_eq!(wizard.access_granted(), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_scan_records_no_decision() {
        let mut wizard = ShareWizard::new();
        let cancel = CancelToken::new();
        cancel.cancel();

        let granted = wizard
            .run_scan(
                "123456",
                &SimulationParams::defaults(),
                &NullOutcome::always_pass(),
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(granted, None);
        assert!(!wizard.scan_complete());
        assert_eq!(wizard.access_granted(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_scan_keeps_the_generated_code() {
        let mut wizard = ShareWizard::new();
        wizard
            .generate(&NullOutcome::constant(7), &NullClock::new(0))
            .unwrap();
        wizard
            .run_scan(
                "123456",
                &SimulationParams::instant(),
                &NullOutcome::always_pass(),
                &CancelToken::new(),
            )
            .await
            .unwrap();

        wizard.reset_scan();
        assert_eq!(wizard.scan_progress(), 0);
        assert_eq!(wizard.access_granted(), None);
        assert!(wizard.generated().is_some());

        wizard.reset();
        assert!(wizard.generated().is_none());
        assert_eq!(wizard.tab(), ShareTab::Generate);
    }
}
