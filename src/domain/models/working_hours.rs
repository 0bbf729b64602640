use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-weekday exception to a pitch's default opening hours.
/// `day_of_week` counts from Sunday = 0; one row per (pitch, day).
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursOverride {
    pub id: String,
    pub pitch_id: String,
    pub day_of_week: i32,
    pub open_time: String,
    pub close_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkingHoursOverride {
    pub fn new(pitch_id: String, day_of_week: i32, open_time: String, close_time: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            pitch_id,
            day_of_week,
            open_time,
            close_time,
            created_at: now,
            updated_at: now,
        }
    }
}
