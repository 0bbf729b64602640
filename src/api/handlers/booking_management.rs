use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::RequireAdmin;
use crate::api::dtos::responses::DataResponse;
use crate::domain::models::booking::BookingFilter;
use crate::domain::models::time_of_day::parse_date;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = BookingFilter {
        pitch_id: params.get("pitchId").cloned(),
        date: params.get("date").map(|d| parse_date(d)).transpose()?,
        status: params.get("status").map(|s| s.parse()).transpose()?,
    };

    let bookings = state.booking_repo.list(&filter).await?;
    let joined = state.booking_service.attach_pitches(bookings).await?;
    Ok(Json(DataResponse::new(joined)))
}

pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    RequireAdmin(admin): RequireAdmin,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.confirm_booking(&booking_id).await?;
    info!("Booking confirmed by admin: {} ({})", booking.id, admin.id);
    Ok(Json(DataResponse::new(booking)))
}

pub async fn complete_booking(
    State(state): State<Arc<AppState>>,
    RequireAdmin(admin): RequireAdmin,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.complete_booking(&booking_id).await?;
    info!("Booking completed by admin: {} ({})", booking.id, admin.id);
    Ok(Json(DataResponse::new(booking)))
}
