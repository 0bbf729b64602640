use std::fmt;
use chrono::NaiveDate;
use crate::error::AppError;

pub const MINUTES_PER_DAY: u32 = 1440;

/// Wall-clock time on a pitch, stored as minutes since midnight.
///
/// `24:00` is representable so that a closing time or a booking end can sit
/// exactly at midnight. Start times are always strictly before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    pub const fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes <= MINUTES_PER_DAY { Some(Self(minutes)) } else { None }
    }

    /// Parses a strict `HH:MM` start time (`00:00`..=`23:59`).
    pub fn parse(s: &str) -> Option<Self> {
        Self::parse_any(s).filter(|t| t.0 < MINUTES_PER_DAY)
    }

    /// Parses a strict `HH:MM` end time, which additionally accepts `24:00`.
    pub fn parse_end(s: &str) -> Option<Self> {
        Self::parse_any(s)
    }

    fn parse_any(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return None;
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let hour = ((bytes[0] - b'0') * 10 + (bytes[1] - b'0')) as u32;
        let minute = ((bytes[3] - b'0') * 10 + (bytes[4] - b'0')) as u32;
        if minute > 59 || hour > 24 {
            return None;
        }
        Self::from_minutes(hour * 60 + minute)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Adds a duration, returning `None` when the result passes midnight.
    pub fn plus_minutes(self, minutes: u32) -> Option<Self> {
        Self::from_minutes(self.0 + minutes)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Half-open `[start, end)` window on a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    // chrono accepts unpadded fields, the API does not
    if s.len() != 10 {
        return Err(AppError::Validation("Invalid date format (YYYY-MM-DD)".into()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))
}

pub fn parse_start_time(s: &str) -> Result<TimeOfDay, AppError> {
    TimeOfDay::parse(s).ok_or(AppError::Validation("Invalid time format (HH:MM)".into()))
}

pub fn parse_end_time(s: &str) -> Result<TimeOfDay, AppError> {
    TimeOfDay::parse_end(s).ok_or(AppError::Validation("Invalid time format (HH:MM)".into()))
}

/// Validates an `HH:MM` pair and requires the window to be non-empty.
pub fn parse_time_range(start: &str, end: &str) -> Result<TimeRange, AppError> {
    let range = TimeRange::new(parse_start_time(start)?, parse_end_time(end)?);
    if range.is_empty() {
        return Err(AppError::Validation("Start time must be before end time".into()));
    }
    Ok(range)
}
