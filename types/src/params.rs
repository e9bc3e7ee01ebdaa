//! Simulation parameters — success thresholds and delay tables.
//!
//! Everything the mock backend "decides" is driven by these values: how long
//! each processing stage takes and how often a draw succeeds. The defaults
//! reproduce the demo's original timings; `instant()` zeroes the delays for
//! tests and non-interactive runs.

use serde::{Deserialize, Serialize};

/// All tunable values for the simulated backend.
///
/// Delays are milliseconds; success rates are basis points (8000 = 80%).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationParams {
    // ── Success thresholds ───────────────────────────────────────────────
    /// Chance a document verification run ends in success.
    pub document_success_bps: u16,

    /// Chance a biometric verification run ends in success.
    pub biometric_success_bps: u16,

    /// Chance an access-code or QR scan grants access.
    pub access_success_bps: u16,

    // ── Stage delay tables (cumulative progress per stage) ───────────────
    /// Per-stage delays for document processing (33 → 66 → 100).
    pub document_stage_delays_ms: Vec<u64>,

    /// Per-stage delays for biometric processing (25 → 50 → 75 → 100).
    pub biometric_stage_delays_ms: Vec<u64>,

    /// How long the mock camera capture runs.
    pub capture_delay_ms: u64,

    /// Delay between each 10% increment of a QR/code scan.
    pub scan_tick_ms: u64,

    // ── Service call latencies ───────────────────────────────────────────
    pub send_otp_delay_ms: u64,
    pub upload_document_delay_ms: u64,
    pub enroll_biometric_delay_ms: u64,
    pub submit_business_delay_ms: u64,
    pub verify_access_delay_ms: u64,
    pub upload_file_delay_ms: u64,
}

impl SimulationParams {
    /// The original demo timings.
    pub fn defaults() -> Self {
        Self {
            document_success_bps: 8000,
            biometric_success_bps: 8000,
            access_success_bps: 9000,
            // Stage timers fired at 1500/3000/5000 ms from the start.
            document_stage_delays_ms: vec![1500, 1500, 2000],
            // Stage timers fired at 1200/2500/3800/5000 ms from the start.
            biometric_stage_delays_ms: vec![1200, 1300, 1300, 1200],
            capture_delay_ms: 3000,
            scan_tick_ms: 300,
            send_otp_delay_ms: 1000,
            upload_document_delay_ms: 2000,
            enroll_biometric_delay_ms: 3000,
            submit_business_delay_ms: 2000,
            verify_access_delay_ms: 2000,
            upload_file_delay_ms: 1000,
        }
    }

    /// Same thresholds, zero delays. Used by tests and `--no-delay` runs.
    pub fn instant() -> Self {
        Self {
            document_stage_delays_ms: vec![0, 0, 0],
            biometric_stage_delays_ms: vec![0, 0, 0, 0],
            capture_delay_ms: 0,
            scan_tick_ms: 0,
            send_otp_delay_ms: 0,
            upload_document_delay_ms: 0,
            enroll_biometric_delay_ms: 0,
            submit_business_delay_ms: 0,
            verify_access_delay_ms: 0,
            upload_file_delay_ms: 0,
            ..Self::defaults()
        }
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::defaults()
    }
}
