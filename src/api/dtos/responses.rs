use serde::Serialize;
use crate::domain::models::booking::Booking;
use crate::domain::models::pitch::Pitch;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Serialize)]
pub struct BookingCreatedResponse {
    pub booking: Booking,
    pub pitch: Pitch,
}

#[derive(Serialize)]
pub struct BookingDetailResponse {
    pub booking: Booking,
    pub pitch: Option<Pitch>,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub id: String,
    pub deleted: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
