use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub slot_date: String,
    pub slot_time: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment: bool,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn is_owned_by(&self, doctor_id: &str) -> bool {
        self.doctor_id == doctor_id
    }

    /// Completed or paid appointments count toward earnings.
    pub fn counts_toward_earnings(&self) -> bool {
        self.status == AppointmentStatus::Completed || self.payment
    }
}

/// Number of entries a dashboard shows under "latest appointments".
pub const LATEST_APPOINTMENTS_LIMIT: usize = 5;

/// Distinct `patient_id`s among `appointments`.
pub fn distinct_patient_count(appointments: &[Appointment]) -> usize {
    appointments
        .iter()
        .map(|a| a.patient_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// The last `limit` appointments in store order, most recent first.
pub fn latest_first(appointments: &[Appointment], limit: usize) -> Vec<Appointment> {
    appointments.iter().rev().take(limit).cloned().collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }

    pub fn valid_transitions(&self) -> &'static [AppointmentStatus] {
        match self {
            AppointmentStatus::Scheduled => {
                &[AppointmentStatus::Completed, AppointmentStatus::Cancelled]
            }
            // Terminal states - no transitions allowed
            AppointmentStatus::Completed | AppointmentStatus::Cancelled => &[],
        }
    }

    pub fn transition_to(&self, next: AppointmentStatus) -> Result<AppointmentStatus, TransitionError> {
        if self.valid_transitions().contains(&next) {
            return Ok(next);
        }

        if self.is_terminal() {
            Err(TransitionError::AlreadyFinal(*self))
        } else {
            Err(TransitionError::Invalid { from: *self, to: next })
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Appointment is already {0}")]
    AlreadyFinal(AppointmentStatus),

    #[error("Invalid status transition from {from} to {to}")]
    Invalid {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_scheduled_can_complete_or_cancel() {
        let status = AppointmentStatus::Scheduled;
        assert_eq!(status.transition_to(AppointmentStatus::Completed), Ok(AppointmentStatus::Completed));
        assert_eq!(status.transition_to(AppointmentStatus::Cancelled), Ok(AppointmentStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for terminal in [AppointmentStatus::Completed, AppointmentStatus::Cancelled] {
            assert!(terminal.valid_transitions().is_empty());
            assert_matches!(
                terminal.transition_to(AppointmentStatus::Completed),
                Err(TransitionError::AlreadyFinal(s)) if s == terminal
            );
        }
    }

    #[test]
    fn test_completed_then_cancelled_is_rejected_with_message() {
        let err = AppointmentStatus::Completed
            .transition_to(AppointmentStatus::Cancelled)
            .unwrap_err();
        assert_eq!(err.to_string(), "Appointment is already completed");
    }

    #[test]
    fn test_scheduled_to_scheduled_is_invalid() {
        assert_matches!(
            AppointmentStatus::Scheduled.transition_to(AppointmentStatus::Scheduled),
            Err(TransitionError::Invalid { .. })
        );
    }

    #[test]
    fn test_status_defaults_to_scheduled_when_missing() {
        let raw = serde_json::json!({
            "_id": "a1",
            "doctor_id": "d1",
            "patient_id": "p1",
            "slot_date": "12_3_2025",
            "slot_time": "10:00 AM",
            "created_at": 1_700_000_000_000i64
        });
        let appointment: Appointment = serde_json::from_value(raw).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(appointment.amount, 0.0);
        assert!(!appointment.counts_toward_earnings());
    }

    fn sample(id: &str, patient_id: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            doctor_id: "d1".to_string(),
            patient_id: patient_id.to_string(),
            slot_date: "1_1_2026".to_string(),
            slot_time: "09:00 AM".to_string(),
            amount: 10.0,
            payment: false,
            status: AppointmentStatus::Scheduled,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_distinct_patient_count_collapses_repeats() {
        let appointments = vec![sample("a", "p1"), sample("b", "p1"), sample("c", "p2")];
        assert_eq!(distinct_patient_count(&appointments), 2);
        assert_eq!(distinct_patient_count(&[]), 0);
    }

    #[test]
    fn test_latest_first_takes_tail_reversed() {
        let appointments: Vec<Appointment> = (0..7)
            .map(|i| sample(&format!("a{}", i), "p1"))
            .collect();
        let ids: Vec<String> = latest_first(&appointments, LATEST_APPOINTMENTS_LIMIT)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["a6", "a5", "a4", "a3", "a2"]);
        assert_eq!(latest_first(&appointments[..2], 5).len(), 2);
    }

    #[test]
    fn test_paid_but_not_completed_counts_toward_earnings() {
        let raw = serde_json::json!({
            "_id": "a2",
            "doctor_id": "d1",
            "patient_id": "p1",
            "slot_date": "12_3_2025",
            "slot_time": "11:00 AM",
            "amount": 50.0,
            "payment": true,
            "status": "scheduled",
            "created_at": 1_700_000_000_000i64
        });
        let appointment: Appointment = serde_json::from_value(raw).unwrap();
        assert!(appointment.counts_toward_earnings());
        assert!(appointment.is_owned_by("d1"));
        assert!(!appointment.is_owned_by("d2"));
    }
}
