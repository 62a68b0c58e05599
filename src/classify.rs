//! Pure reservation lifecycle rules: a reservation is active until its end
//! time has passed today, and nothing else about it matters.

use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

use crate::config::COMPLETED_DISPLAY_CAP;
use crate::model::{MachineKind, Reservation};

/// Current wall-clock time, local if the offset is known.
pub fn now_local() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Combines an "HH:MM" slot time with today's date, seconds zeroed. End
/// times carry no date of their own, so a slot crossing midnight resolves
/// to earlier today and reads as already over; that matches the data the
/// store has always held and is left as is.
pub fn end_of_slot(end_time: &str, today: Date) -> Option<PrimitiveDateTime> {
    let (hour, minute) = end_time.split_once(':')?;
    let hour: u8 = hour.trim().parse().ok()?;
    let minute: u8 = minute.trim().parse().ok()?;
    let time = Time::from_hms(hour, minute, 0).ok()?;
    Some(PrimitiveDateTime::new(today, time))
}

/// Active iff the same-day end time is strictly in the future. A malformed
/// end time never compares as future, so it counts as completed.
pub fn is_active(reservation: &Reservation, now: PrimitiveDateTime) -> bool {
    match end_of_slot(&reservation.end_time, now.date()) {
        Some(end) => end > now,
        None => false,
    }
}

/// Active reservations for one machine category, computed from the full
/// list each time it is asked for.
pub fn active_count(entries: &[Reservation], kind: MachineKind, now: PrimitiveDateTime) -> usize {
    entries
        .iter()
        .filter(|e| e.machine_type == kind && is_active(e, now))
        .count()
}

#[derive(Debug, Default)]
pub struct Partition {
    pub active: Vec<Reservation>,
    pub completed: Vec<Reservation>,
}

/// Splits one category's reservations into active and completed, keeping
/// the incoming (newest-first) order. Completed entries are capped to the
/// most recent [`COMPLETED_DISPLAY_CAP`].
pub fn partition(entries: &[Reservation], kind: MachineKind, now: PrimitiveDateTime) -> Partition {
    let mut split = Partition::default();
    for entry in entries.iter().filter(|e| e.machine_type == kind) {
        if is_active(entry, now) {
            split.active.push(entry.clone());
        } else if split.completed.len() < COMPLETED_DISPLAY_CAP {
            split.completed.push(entry.clone());
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn reservation(kind: MachineKind, end_time: &str, created_at: i64) -> Reservation {
        Reservation {
            id: Uuid::now_v7(),
            name: "Ahmet Yilmaz".to_owned(),
            phone: "05551234567".to_owned(),
            room: "203".to_owned(),
            machine_type: kind,
            machine_number: 5,
            start_time: "14:00".to_owned(),
            end_time: end_time.to_owned(),
            created_at,
            notified: false,
        }
    }

    #[test]
    fn active_until_end_time_passes() {
        let r = reservation(MachineKind::Washer, "14:05", 0);
        assert!(is_active(&r, datetime!(2026-03-10 14:00:00)));
        assert!(is_active(&r, datetime!(2026-03-10 14:04:59)));
        assert!(!is_active(&r, datetime!(2026-03-10 14:05:00)));
        assert!(!is_active(&r, datetime!(2026-03-10 14:06:00)));
    }

    #[test]
    fn activeness_ignores_start_time_and_created_at() {
        let mut r = reservation(MachineKind::Washer, "18:00", 0);
        r.start_time = "23:59".to_owned();
        assert!(is_active(&r, datetime!(2026-03-10 12:00:00)));

        r.created_at = i64::MAX;
        assert!(is_active(&r, datetime!(2026-03-10 12:00:00)));
    }

    #[test]
    fn end_time_earlier_today_is_completed_even_if_just_created() {
        let r = reservation(MachineKind::Washer, "08:00", 0);
        assert!(!is_active(&r, datetime!(2026-03-10 20:00:00)));
    }

    #[test]
    fn midnight_crossing_slot_reads_as_completed() {
        // 23:50 -> 00:10 resolves to 00:10 earlier today
        let r = reservation(MachineKind::Washer, "00:10", 0);
        assert!(!is_active(&r, datetime!(2026-03-10 23:50:00)));
    }

    #[test]
    fn malformed_end_time_is_completed() {
        for bad in ["", "noon", "14", "25:00", "14:60"] {
            let r = reservation(MachineKind::Washer, bad, 0);
            assert!(!is_active(&r, datetime!(2026-03-10 00:00:00)), "{bad:?}");
        }
    }

    #[test]
    fn partition_filters_by_category() {
        let now = datetime!(2026-03-10 12:00:00);
        let entries = vec![
            reservation(MachineKind::Washer, "13:00", 3),
            reservation(MachineKind::Dryer, "13:00", 2),
            reservation(MachineKind::Washer, "09:00", 1),
        ];

        let split = partition(&entries, MachineKind::Washer, now);
        assert_eq!(split.active.len(), 1);
        assert_eq!(split.completed.len(), 1);

        assert_eq!(active_count(&entries, MachineKind::Washer, now), 1);
        assert_eq!(active_count(&entries, MachineKind::Dryer, now), 1);
    }

    #[test]
    fn completed_entries_cap_at_ten_most_recent() {
        let now = datetime!(2026-03-10 23:00:00);
        // newest first, mirroring store ordering
        let entries: Vec<Reservation> = (0..15)
            .map(|i| reservation(MachineKind::Washer, "06:00", 15 - i))
            .collect();

        let split = partition(&entries, MachineKind::Washer, now);
        assert_eq!(split.completed.len(), 10);
        let kept: Vec<i64> = split.completed.iter().map(|e| e.created_at).collect();
        assert_eq!(kept, (6..=15).rev().collect::<Vec<i64>>());
    }
}
