use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::warn;
use crate::domain::models::blocked_slot::BlockedSlot;
use crate::domain::models::booking::Booking;
use crate::domain::models::pitch::Pitch;
use crate::domain::models::time_of_day::{TimeOfDay, TimeRange};
use crate::domain::models::working_hours::WorkingHoursOverride;
use crate::error::AppError;

pub const SLOT_MINUTES: u32 = 60;
pub const FALLBACK_OPEN: TimeOfDay = match TimeOfDay::from_minutes(8 * 60) {
    Some(t) => t,
    None => TimeOfDay::MIDNIGHT,
};
pub const FALLBACK_CLOSE: TimeOfDay = match TimeOfDay::from_minutes(22 * 60) {
    Some(t) => t,
    None => TimeOfDay::END_OF_DAY,
};

/// Sunday = 0 .. Saturday = 6.
pub fn day_of_week(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

/// Effective opening hours for `date`.
///
/// Resolution order: weekday override, then the pitch default, then the
/// 08:00-22:00 fallback. Each tier is skipped if its stored times do not
/// parse. An override for a different weekday is ignored.
pub fn resolve_hours(pitch: &Pitch, date: NaiveDate, override_rule: Option<&WorkingHoursOverride>) -> TimeRange {
    let dow = day_of_week(date);

    if let Some(rule) = override_rule.filter(|r| r.day_of_week == dow) {
        match (TimeOfDay::parse(&rule.open_time), TimeOfDay::parse_end(&rule.close_time)) {
            (Some(open), Some(close)) => return TimeRange::new(open, close),
            _ => warn!("Ignoring unparsable working-hours override {} for pitch {}", rule.id, pitch.id),
        }
    }

    let open = pitch.open_time.as_deref().and_then(TimeOfDay::parse).unwrap_or(FALLBACK_OPEN);
    let close = pitch.close_time.as_deref().and_then(TimeOfDay::parse_end).unwrap_or(FALLBACK_CLOSE);
    TimeRange::new(open, close)
}

/// Lazy, restartable sequence of slot start times. Every yielded slot fits
/// entirely before the closing time.
#[derive(Debug, Clone)]
pub struct SlotIter {
    cursor: u32,
    close: u32,
    step: u32,
}

impl Iterator for SlotIter {
    type Item = TimeOfDay;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step == 0 || self.cursor + self.step > self.close {
            return None;
        }
        let start = TimeOfDay::from_minutes(self.cursor)?;
        self.cursor += self.step;
        Some(start)
    }
}

pub fn generate_slots(open: TimeOfDay, close: TimeOfDay, slot_minutes: u32) -> SlotIter {
    SlotIter {
        cursor: open.minutes(),
        close: close.minutes(),
        step: slot_minutes,
    }
}

fn slot_range(start: TimeOfDay, slot_minutes: u32) -> Option<TimeRange> {
    Some(TimeRange::new(start, start.plus_minutes(slot_minutes)?))
}

fn blocked_ranges(blocks: &[BlockedSlot], date: NaiveDate) -> Vec<TimeRange> {
    blocks.iter()
        .filter(|b| b.date == date)
        .filter_map(|b| {
            let range = b.range();
            if range.is_none() {
                warn!("Skipping blocked slot {} with unparsable times", b.id);
            }
            range
        })
        .collect()
}

fn reserved_ranges(bookings: &[Booking], date: NaiveDate) -> Vec<TimeRange> {
    bookings.iter()
        .filter(|b| b.date == date && b.is_active())
        .filter_map(|b| {
            let range = b.range();
            if range.is_none() {
                warn!("Skipping booking {} with unparsable times", b.id);
            }
            range
        })
        .collect()
}

fn exclude_overlapping<I>(slots: I, busy: &[TimeRange], slot_minutes: u32) -> Vec<TimeOfDay>
where
    I: IntoIterator<Item = TimeOfDay>,
{
    slots.into_iter()
        .filter(|&start| match slot_range(start, slot_minutes) {
            Some(slot) => !busy.iter().any(|r| r.overlaps(&slot)),
            None => false,
        })
        .collect()
}

/// Drops slots intersecting any block dated `date`. Overlapping blocks act as their union.
pub fn filter_blocked<I>(slots: I, blocks: &[BlockedSlot], date: NaiveDate, slot_minutes: u32) -> Vec<TimeOfDay>
where
    I: IntoIterator<Item = TimeOfDay>,
{
    exclude_overlapping(slots, &blocked_ranges(blocks, date), slot_minutes)
}

/// Drops slots intersecting any PENDING/CONFIRMED booking dated `date`.
pub fn filter_reserved<I>(slots: I, bookings: &[Booking], date: NaiveDate, slot_minutes: u32) -> Vec<TimeOfDay>
where
    I: IntoIterator<Item = TimeOfDay>,
{
    exclude_overlapping(slots, &reserved_ranges(bookings, date), slot_minutes)
}

/// Maximal windows of `hours` not covered by any of `busy`.
pub fn free_intervals(hours: TimeRange, busy: &[TimeRange]) -> Vec<TimeRange> {
    if hours.is_empty() {
        return Vec::new();
    }

    let mut clipped: Vec<TimeRange> = busy.iter()
        .filter(|r| r.overlaps(&hours))
        .map(|r| TimeRange::new(r.start.max(hours.start), r.end.min(hours.end)))
        .collect();
    clipped.sort_by_key(|r| r.start);

    let mut free = Vec::new();
    let mut cursor = hours.start;
    for r in clipped {
        if r.start > cursor {
            free.push(TimeRange::new(cursor, r.start));
        }
        cursor = cursor.max(r.end);
    }
    if cursor < hours.end {
        free.push(TimeRange::new(cursor, hours.end));
    }
    free
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FreeInterval {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub date: String,
    pub available_slots: Vec<String>,
    pub free_intervals: Vec<FreeInterval>,
}

/// Read path: resolve hours, enumerate the hourly grid, drop blocked and
/// reserved slots.
pub fn calculate_availability(
    pitch: &Pitch,
    date: NaiveDate,
    override_rule: Option<&WorkingHoursOverride>,
    blocks: &[BlockedSlot],
    bookings: &[Booking],
) -> Availability {
    let hours = resolve_hours(pitch, date, override_rule);

    let candidates = generate_slots(hours.start, hours.end, SLOT_MINUTES);
    let unblocked = filter_blocked(candidates, blocks, date, SLOT_MINUTES);
    let free_slots = filter_reserved(unblocked, bookings, date, SLOT_MINUTES);

    let mut busy = blocked_ranges(blocks, date);
    busy.extend(reserved_ranges(bookings, date));

    Availability {
        date: date.format("%Y-%m-%d").to_string(),
        available_slots: free_slots.iter().map(ToString::to_string).collect(),
        free_intervals: free_intervals(hours, &busy)
            .into_iter()
            .map(|r| FreeInterval { start: r.start.to_string(), end: r.end.to_string() })
            .collect(),
    }
}

/// Write-path counterpart of [`calculate_availability`]: rejects a requested
/// interval for exactly the reasons the read path would hide it.
pub fn check_bookable(
    hours: TimeRange,
    requested: TimeRange,
    date: NaiveDate,
    blocks: &[BlockedSlot],
    bookings: &[Booking],
) -> Result<(), AppError> {
    if !hours.contains(&requested) {
        return Err(AppError::Validation(format!(
            "Requested time {}-{} is outside working hours {}-{}",
            requested.start, requested.end, hours.start, hours.end
        )));
    }
    if blocked_ranges(blocks, date).iter().any(|r| r.overlaps(&requested)) {
        return Err(AppError::SlotBlocked("Requested time overlaps a blocked interval".into()));
    }
    if reserved_ranges(bookings, date).iter().any(|r| r.overlaps(&requested)) {
        return Err(AppError::Conflict("Slot already booked".into()));
    }
    Ok(())
}
