use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use crate::domain::models::time_of_day::{TimeOfDay, TimeRange};

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BlockedSlot {
    pub id: String,
    pub pitch_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub reason: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBlockedSlotParams {
    pub pitch_id: String,
    pub date: NaiveDate,
    pub range: TimeRange,
    pub reason: Option<String>,
    pub created_by: Option<String>,
}

impl BlockedSlot {
    pub fn new(params: NewBlockedSlotParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            pitch_id: params.pitch_id,
            date: params.date,
            start_time: params.range.start.to_string(),
            end_time: params.range.end.to_string(),
            reason: params.reason,
            created_by: params.created_by,
            created_at: Utc::now(),
        }
    }

    /// `None` for rows whose stored times no longer parse.
    pub fn range(&self) -> Option<TimeRange> {
        let start = TimeOfDay::parse(&self.start_time)?;
        let end = TimeOfDay::parse_end(&self.end_time)?;
        Some(TimeRange::new(start, end))
    }
}
