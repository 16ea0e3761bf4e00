use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use booking_core::validation::{parse_booking_id, validate_create_booking, validate_status_update};
use booking_core::Booking;
use chrono::Utc;
use serde_json::Value;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}/status", patch(update_booking_status))
}

/// POST /bookings
async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let Json(payload) = payload?;
    let input = validate_create_booking(&payload, Utc::now().date_naive())?;

    let booking = state.bookings.create_booking(input);
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /bookings
async fn list_bookings(State(state): State<AppState>) -> Json<Vec<Booking>> {
    Json(state.bookings.list_bookings())
}

/// GET /bookings/{id}
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let id = parse_booking_id(&id)?;
    Ok(Json(state.bookings.get_booking(id)?))
}

/// PATCH /bookings/{id}/status
async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Booking>, AppError> {
    let id = parse_booking_id(&id)?;
    let Json(payload) = payload?;
    let status = validate_status_update(&payload)?;

    Ok(Json(state.bookings.update_booking_status(id, status)?))
}
