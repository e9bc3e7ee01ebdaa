//! Staged-progress schedules.
//!
//! A schedule is the fixed list of (percent, delay) pairs a processing run
//! walks through. Percentages are cumulative and must be non-decreasing,
//! ending at 100 — the progress bar never moves backwards.

use crate::WizardError;
use divs_types::SimulationParams;

/// One processing sub-stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stage {
    /// Cumulative progress after this stage completes.
    pub percent: u8,
    /// How long the stage takes.
    pub delay_ms: u64,
}

/// An ordered, monotonic schedule of sub-stages.
#[derive(Clone, Debug)]
pub struct ProgressSchedule {
    stages: Vec<Stage>,
}

impl ProgressSchedule {
    /// Build a schedule from explicit stages. Rejects empty schedules,
    /// regressing percentages, and schedules that stop short of 100.
    pub fn new(stages: Vec<Stage>) -> Result<Self, WizardError> {
        if stages.is_empty() {
            return Err(WizardError::BadSchedule("schedule has no stages".into()));
        }
        let mut previous = 0u8;
        for stage in &stages {
            if stage.percent < previous {
                return Err(WizardError::BadSchedule(format!(
                    "progress regresses from {previous} to {}",
                    stage.percent
                )));
            }
            previous = stage.percent;
        }
        if previous != 100 {
            return Err(WizardError::BadSchedule(format!(
                "schedule ends at {previous}, not 100"
            )));
        }
        Ok(Self { stages })
    }

    /// Document processing: 33 → 66 → 100.
    pub fn document(params: &SimulationParams) -> Self {
        Self {
            stages: zip_delays(&[33, 66, 100], &params.document_stage_delays_ms),
        }
    }

    /// Biometric processing: 25 → 50 → 75 → 100.
    pub fn biometric(params: &SimulationParams) -> Self {
        Self {
            stages: zip_delays(&[25, 50, 75, 100], &params.biometric_stage_delays_ms),
        }
    }

    /// QR/code scan: 10% ticks to 100.
    pub fn scan(params: &SimulationParams) -> Self {
        Self {
            stages: (1..=10)
                .map(|i| Stage {
                    percent: i * 10,
                    delay_ms: params.scan_tick_ms,
                })
                .collect(),
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }
}

/// Pair fixed percentages with configured delays; a short delay table
/// falls back to zero for the remaining stages.
fn zip_delays(percents: &[u8], delays_ms: &[u64]) -> Vec<Stage> {
    percents
        .iter()
        .enumerate()
        .map(|(i, &percent)| Stage {
            percent,
            delay_ms: delays_ms.get(i).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn document_schedule_matches_original_timers() {
        let schedule = ProgressSchedule::document(&SimulationParams::defaults());
        let percents: Vec<u8> = schedule.stages().iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![33, 66, 100]);
        let total: u64 = schedule.stages().iter().map(|s| s.delay_ms).sum();
        assert_eq!(total, 5000);
    }

    #[test]
    fn biometric_schedule_has_four_stages() {
        let schedule = ProgressSchedule::biometric(&SimulationParams::defaults());
        let percents: Vec<u8> = schedule.stages().iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![25, 50, 75, 100]);
    }

    #[test]
    fn scan_schedule_ticks_by_ten() {
        let schedule = ProgressSchedule::scan(&SimulationParams::defaults());
        assert_eq!(schedule.stages().len(), 10);
        assert_eq!(schedule.stages()[0].percent, 10);
        assert_eq!(schedule.stages()[9].percent, 100);
        assert!(schedule.stages().iter().all(|s| s.delay_ms == 300));
    }

    #[test]
    fn new_rejects_regressions_and_short_schedules() {
        let regressing = vec![
            Stage { percent: 50, delay_ms: 0 },
            Stage { percent: 40, delay_ms: 0 },
            Stage { percent: 100, delay_ms: 0 },
        ];
        assert!(ProgressSchedule::new(regressing).is_err());

        let short = vec![Stage { percent: 90, delay_ms: 0 }];
        assert!(ProgressSchedule::new(short).is_err());

        assert!(ProgressSchedule::new(vec![]).is_err());
    }

    proptest! {
        /// Any accepted schedule yields a monotonically non-decreasing
        /// percentage sequence.
        #[test]
        fn accepted_schedules_are_monotonic(
            percents in proptest::collection::vec(0u8..=100, 1..12)
        ) {
            let stages: Vec<Stage> = percents
                .iter()
                .map(|&percent| Stage { percent, delay_ms: 0 })
                .collect();
            if let Ok(schedule) = ProgressSchedule::new(stages) {
                let seq: Vec<u8> =
                    schedule.stages().iter().map(|s| s.percent).collect();
                prop_assert!(seq.windows(2).all(|w| w[0] <= w[1]));
                prop_assert_eq!(*seq.last().unwrap(), 100);
            }
        }

        /// Sorted sequences ending at 100 are always accepted.
        #[test]
        fn sorted_sequences_ending_at_100_accepted(
            mut percents in proptest::collection::vec(0u8..=100, 0..10)
        ) {
            percents.sort_unstable();
            percents.push(100);
            let stages: Vec<Stage> = percents
                .iter()
                .map(|&percent| Stage { percent, delay_ms: 0 })
                .collect();
            prop_assert!(ProgressSchedule::new(stages).is_ok());
        }
    }
}
