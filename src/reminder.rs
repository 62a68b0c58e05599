//! Reminder engine rules. The 30-second tick itself lives in
//! [`crate::session`]; everything here is a pure function of the
//! projection and the clock so the window can be tested directly.

use serde::Serialize;
use time::PrimitiveDateTime;

use crate::classify::end_of_slot;
use crate::config::REMINDER_LEAD;
use crate::model::Reservation;
use crate::notify::Notification;

/// Session-scoped permission state. Starts unrequested and moves only via
/// an explicit user request; the platform will not prompt again within the
/// session once it has answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Unrequested,
    Denied,
    Granted,
}

/// A reminder is due when the slot ends strictly within the lead window.
/// `notified` is consulted but never set anywhere after creation, so an
/// entry that stays inside the window is due again on every scan.
pub fn due_for_reminder(reservation: &Reservation, now: PrimitiveDateTime) -> bool {
    if reservation.notified {
        return false;
    }
    let Some(end) = end_of_slot(&reservation.end_time, now.date()) else {
        return false;
    };
    let remaining = end - now;
    remaining > time::Duration::ZERO && remaining < REMINDER_LEAD
}

/// One scan over the whole projection, unfiltered by category.
pub fn due_reminders<'a>(
    entries: &'a [Reservation],
    now: PrimitiveDateTime,
) -> impl Iterator<Item = &'a Reservation> {
    entries.iter().filter(move |e| due_for_reminder(e, now))
}

pub fn reminder_for(reservation: &Reservation) -> Notification {
    Notification {
        title: "Your laundry is almost done!".to_owned(),
        body: format!(
            "{}, you can pick up your laundry from {} {} in the next few minutes.",
            reservation.name,
            reservation.machine_type.label(),
            reservation.machine_number,
        ),
        tag: format!("laundry-{}", reservation.id),
    }
}
