use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Pitch {
    pub id: String,
    pub name: String,
    pub city: String,
    pub address: String,
    pub is_indoor: bool,
    pub price_per_hour: f64,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewPitchParams {
    pub name: String,
    pub city: String,
    pub address: String,
    pub is_indoor: bool,
    pub price_per_hour: f64,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

impl Pitch {
    pub fn new(params: NewPitchParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            city: params.city,
            address: params.address,
            is_indoor: params.is_indoor,
            price_per_hour: params.price_per_hour,
            open_time: params.open_time,
            close_time: params.close_time,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct PitchFilter {
    pub city: Option<String>,
    pub is_indoor: Option<bool>,
}
