//! Business-appointment wizard:
//! `Overview → Location → Date → Time → Confirmation → Complete`.
//!
//! The only flow with no timers and no randomness — each selection gates
//! the next step, and booking requires all three selections.

use crate::WizardError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BusinessStep {
    #[default]
    Overview,
    Location,
    Date,
    Time,
    Confirmation,
    Complete,
}

/// How busy a verification center currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    High,
    Medium,
    Low,
}

/// A partner verification center.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub distance: &'static str,
    pub availability: Availability,
}

/// A confirmed booking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub location_id: String,
    pub date: String,
    pub time: String,
}

const LOCATIONS: &[Location] = &[
    Location {
        id: "loc1",
        name: "Downtown Identity Center",
        address: "123 Market Street, San Francisco, CA",
        distance: "1.2 miles away",
        availability: Availability::High,
    },
    Location {
        id: "loc2",
        name: "Blockchain Verification Hub",
        address: "456 Montgomery St, San Francisco, CA",
        distance: "2.4 miles away",
        availability: Availability::Medium,
    },
    Location {
        id: "loc3",
        name: "Secure ID Partners",
        address: "789 Mission St, San Francisco, CA",
        distance: "3.1 miles away",
        availability: Availability::Low,
    },
];

const DATES: &[&str] = &["May 20, 2025", "May 21, 2025", "May 22, 2025", "May 23, 2025"];

const TIMES: &[&str] = &["9:00 AM", "10:30 AM", "1:00 PM", "3:30 PM", "4:45 PM"];

/// State machine for the in-person appointment flow.
#[derive(Default)]
pub struct BusinessWizard {
    step: BusinessStep,
    location: Option<String>,
    date: Option<String>,
    time: Option<String>,
    booked: bool,
}

impl BusinessWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locations() -> &'static [Location] {
        LOCATIONS
    }

    pub fn available_dates() -> &'static [&'static str] {
        DATES
    }

    pub fn available_times() -> &'static [&'static str] {
        TIMES
    }

    /// Leave the overview and start picking a location.
    pub fn begin(&mut self) -> Result<(), WizardError> {
        if self.step != BusinessStep::Overview {
            return Err(WizardError::InvalidState("booking already started".into()));
        }
        self.step = BusinessStep::Location;
        Ok(())
    }

    pub fn select_location(&mut self, location_id: &str) -> Result<(), WizardError> {
        if self.step != BusinessStep::Location {
            return Err(WizardError::InvalidState("not picking a location".into()));
        }
        if !LOCATIONS.iter().any(|l| l.id == location_id) {
            return Err(WizardError::PreconditionNotMet(format!(
                "unknown location {location_id}"
            )));
        }
        self.location = Some(location_id.to_string());
        self.step = BusinessStep::Date;
        Ok(())
    }

    pub fn select_date(&mut self, date: &str) -> Result<(), WizardError> {
        if self.location.is_none() {
            return Err(WizardError::PreconditionNotMet("no location selected".into()));
        }
        if self.step != BusinessStep::Date {
            return Err(WizardError::InvalidState("not picking a date".into()));
        }
        if !DATES.contains(&date) {
            return Err(WizardError::PreconditionNotMet(format!("unknown date {date}")));
        }
        self.date = Some(date.to_string());
        self.step = BusinessStep::Time;
        Ok(())
    }

    pub fn select_time(&mut self, time: &str) -> Result<(), WizardError> {
        if self.date.is_none() {
            return Err(WizardError::PreconditionNotMet("no date selected".into()));
        }
        if self.step != BusinessStep::Time {
            return Err(WizardError::InvalidState("not picking a time".into()));
        }
        if !TIMES.contains(&time) {
            return Err(WizardError::PreconditionNotMet(format!("unknown time {time}")));
        }
        self.time = Some(time.to_string());
        self.step = BusinessStep::Confirmation;
        Ok(())
    }

    /// Confirm the booking. Requires location, date, and time.
    pub fn book(&mut self) -> Result<Appointment, WizardError> {
        let (location, date, time) = match (&self.location, &self.date, &self.time) {
            (Some(l), Some(d), Some(t)) => (l.clone(), d.clone(), t.clone()),
            _ => {
                return Err(WizardError::PreconditionNotMet(
                    "location, date, and time are all required".into(),
                ))
            }
        };
        if self.step != BusinessStep::Confirmation {
            return Err(WizardError::InvalidState("nothing to confirm".into()));
        }

        self.booked = true;
        self.step = BusinessStep::Complete;
        tracing::info!(location = %location, %date, %time, "appointment booked");
        Ok(Appointment {
            location_id: location,
            date,
            time,
        })
    }

    /// Back to the overview with all selections cleared.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn step(&self) -> BusinessStep {
        self.step
    }

    pub fn is_booked(&self) -> bool {
        self.booked
    }

    pub fn selection(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        (
            self.location.as_deref(),
            self.date.as_deref(),
            self.time.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_booking_flow() {
        let mut wizard = BusinessWizard::new();
        wizard.begin().unwrap();
        wizard.select_location("loc2").unwrap();
        wizard.select_date("May 21, 2025").unwrap();
        wizard.select_time("1:00 PM").unwrap();

        let appointment = wizard.book().unwrap();
        assert_eq!(appointment.location_id, "loc2");
        assert_eq!(wizard.step(), BusinessStep::Complete);
        assert!(wizard.is_booked());
    }

    #[test]
    fn each_step_gates_the_next() {
        let mut wizard = BusinessWizard::new();

        // Can't pick anything from the overview.
        assert!(wizard.select_location("loc1").is_err());

        wizard.begin().unwrap();
        // Date requires a location, time requires a date.
        assert!(wizard.select_date("May 20, 2025").is_err());
        assert!(wizard.select_time("9:00 AM").is_err());
        assert!(wizard.book().is_err());

        wizard.select_location("loc1").unwrap();
        assert!(wizard.select_time("9:00 AM").is_err());
    }

    #[test]
    fn unknown_catalog_entries_rejected() {
        let mut wizard = BusinessWizard::new();
        wizard.begin().unwrap();
        assert!(wizard.select_location("loc9").is_err());

        wizard.select_location("loc1").unwrap();
        assert!(wizard.select_date("June 1, 2025").is_err());

        wizard.select_date("May 20, 2025").unwrap();
        assert!(wizard.select_time("2:00 AM").is_err());
    }

    #[test]
    fn reset_clears_all_selections() {
        let mut wizard = BusinessWizard::new();
        wizard.begin().unwrap();
        wizard.select_location("loc3").unwrap();
        wizard.select_date("May 23, 2025").unwrap();

        wizard.reset();
        assert_eq!(wizard.step(), BusinessStep::Overview);
        assert_eq!(wizard.selection(), (None, None, None));
        assert!(!wizard.is_booked());
    }

    #[test]
    fn catalog_matches_the_demo() {
        assert_eq!(BusinessWizard::locations().len(), 3);
        assert_eq!(BusinessWizard::available_dates().len(), 4);
        assert_eq!(BusinessWizard::available_times().len(), 5);
        assert_eq!(
            BusinessWizard::locations()[0].name,
            "Downtown Identity Center"
        );
    }
}
