use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::api::dtos::requests::CreateBookingRequest;
use crate::api::dtos::responses::{BookingCreatedResponse, BookingDetailResponse, DataResponse};
use crate::domain::services::booking_service::BookingRequest;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ApiJson(payload): ApiJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_booking: pitch {} on {} at {}", payload.pitch_id, payload.date, payload.start_time);

    let (booking, pitch) = state.booking_service.create_booking(&user, BookingRequest {
        pitch_id: payload.pitch_id,
        date: payload.date,
        start_time: payload.start_time,
        duration_minutes: payload.duration_minutes,
    }).await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(BookingCreatedResponse { booking, pitch }))))
}

pub async fn list_my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.list_for_user(&user.id).await?;
    Ok(Json(DataResponse::new(bookings)))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let joined = state.booking_service.get_booking(&user, &booking_id).await?;
    Ok(Json(DataResponse::new(BookingDetailResponse { booking: joined.booking, pitch: joined.pitch })))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state.booking_service.cancel_booking(&user, &booking_id).await?;
    Ok(Json(DataResponse::new(cancelled)))
}
