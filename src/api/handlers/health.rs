use axum::{response::IntoResponse, Json};
use crate::api::dtos::responses::{DataResponse, HealthResponse};

pub async fn health_check() -> impl IntoResponse {
    Json(DataResponse::new(HealthResponse { status: "ok" }))
}
