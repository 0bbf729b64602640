use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePitchRequest {
    pub name: String,
    pub city: String,
    pub address: String,
    pub is_indoor: Option<bool>,
    pub price_per_hour: f64,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePitchRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub is_indoor: Option<bool>,
    pub price_per_hour: Option<f64>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursRequest {
    pub day_of_week: i32,
    pub open_time: String,
    pub close_time: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSlotRequest {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub pitch_id: String,
    pub date: String,
    pub start_time: String,
    pub duration_minutes: Option<i32>,
}
