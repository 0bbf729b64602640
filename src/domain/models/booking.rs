use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use crate::domain::models::pitch::Pitch;
use crate::domain::models::time_of_day::{TimeOfDay, TimeRange};
use crate::error::AppError;

pub const MIN_DURATION_MINUTES: i32 = 30;
pub const MAX_DURATION_MINUTES: i32 = 240;
pub const DEFAULT_DURATION_MINUTES: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Statuses that occupy a slot.
    pub const ACTIVE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) | (Confirmed, Completed)
        )
    }

    /// Every status from which `next` is reachable in one step.
    pub fn sources_of(next: BookingStatus) -> Vec<BookingStatus> {
        [BookingStatus::Pending, BookingStatus::Confirmed, BookingStatus::Cancelled, BookingStatus::Completed]
            .into_iter()
            .filter(|s| s.can_transition_to(next))
            .collect()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(BookingStatus::Pending),
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            "COMPLETED" => Ok(BookingStatus::Completed),
            other => Err(AppError::Validation(format!("Unknown booking status: {}", other))),
        }
    }
}

/// Checks a lifecycle step without touching storage.
pub fn check_transition(current: BookingStatus, next: BookingStatus) -> Result<(), AppError> {
    if current.can_transition_to(next) {
        return Ok(());
    }
    let reason = if current.is_terminal() {
        format!("Booking is already {}", current)
    } else {
        format!("Cannot move booking from {} to {}", current, next)
    };
    Err(AppError::InvalidStatus(reason))
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub pitch_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i32,
    pub status: String,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub user_id: String,
    pub pitch_id: String,
    pub date: NaiveDate,
    pub range: TimeRange,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            pitch_id: params.pitch_id,
            date: params.date,
            start_time: params.range.start.to_string(),
            end_time: params.range.end.to_string(),
            duration_minutes: (params.range.end.minutes() - params.range.start.minutes()) as i32,
            // No approval step exists, bookings go straight to CONFIRMED.
            status: BookingStatus::Confirmed.as_str().to_string(),
            cancelled_at: None,
            cancelled_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status(&self) -> Result<BookingStatus, AppError> {
        self.status.parse()
            .map_err(|_| AppError::InternalWithMsg(format!("Booking {} has corrupt status {}", self.id, self.status)))
    }

    pub fn is_active(&self) -> bool {
        self.status().is_ok_and(BookingStatus::is_active)
    }

    pub fn range(&self) -> Option<TimeRange> {
        let start = TimeOfDay::parse(&self.start_time)?;
        let end = start.plus_minutes(u32::try_from(self.duration_minutes).ok()?)?;
        Some(TimeRange::new(start, end))
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithPitch {
    #[serde(flatten)]
    pub booking: Booking,
    pub pitch: Option<Pitch>,
}

#[derive(Debug, Default, Clone)]
pub struct BookingFilter {
    pub pitch_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
}
