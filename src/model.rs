use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineKind {
    Washer,
    Dryer,
}

impl MachineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MachineKind::Washer => "washer",
            MachineKind::Dryer => "dryer",
        }
    }

    pub fn parse(s: &str) -> Option<MachineKind> {
        match s {
            "washer" => Some(MachineKind::Washer),
            "dryer" => Some(MachineKind::Dryer),
            _ => None,
        }
    }

    /// Human label used in reminder payloads.
    pub fn label(self) -> &'static str {
        match self {
            MachineKind::Washer => "washing machine",
            MachineKind::Dryer => "dryer",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub room: String,
    pub machine_type: MachineKind,
    pub machine_number: u8,
    /// Wall-clock "HH:MM", no date attached.
    pub start_time: String,
    /// Wall-clock "HH:MM"; not checked against `start_time`.
    pub end_time: String,
    /// Unix seconds, used only for ordering.
    pub created_at: i64,
    /// Set false at creation and never written back, so a reservation
    /// inside the reminder window re-fires on every tick.
    pub notified: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    pub name: String,
    pub phone: String,
    pub room: String,
    pub machine_type: MachineKind,
    pub machine_number: u8,
    pub start_time: String,
    pub end_time: String,
}

impl ReservationDraft {
    /// Required-field check done before any store write; the store itself
    /// accepts whatever it is handed.
    pub fn validate(&self) -> AppResult<()> {
        let any_empty = [
            &self.name,
            &self.phone,
            &self.room,
            &self.start_time,
            &self.end_time,
        ]
        .iter()
        .any(|field| field.trim().is_empty());

        if any_empty {
            return Err(AppError::Validation("please fill in every field".to_owned()));
        }

        if !(1..=30).contains(&self.machine_number) {
            return Err(AppError::Validation(
                "machine number must be between 1 and 30".to_owned(),
            ));
        }

        Ok(())
    }
}

/// Groups an 11-digit number as 4-3-2-2 for display; anything else is
/// returned verbatim. Storage always keeps the raw input.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 11 {
        return phone.to_owned();
    }
    format!(
        "{} {} {} {}",
        &digits[..4],
        &digits[4..7],
        &digits[7..9],
        &digits[9..11]
    )
}
