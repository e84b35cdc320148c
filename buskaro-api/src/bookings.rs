use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use buskaro_core::booking::Booking;

use crate::error::ApiError;
use crate::middleware::auth::{require_auth, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub seats: String,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings))
        // The id is a route id on create and a booking id on cancel; the
        // router requires one param name per segment position.
        .route("/bookings/{id}", post(create_booking))
        .route("/bookings/{id}/cancel", post(cancel_booking))
        .route_layer(axum::middleware::from_fn_with_state(state, require_auth))
}

/// GET /bookings
async fn list_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.bookings.list_for_user(user.id).await?))
}

/// POST /bookings/{routeId}
async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(route_id): Path<Uuid>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<Booking>, ApiError> {
    if req.seats.is_empty() {
        return Err(ApiError::Validation("Seats are required".to_string()));
    }
    let booking = state.bookings.create(user.id, route_id, req.seats).await?;
    Ok(Json(booking))
}

/// POST /bookings/{bookingId}/cancel
///
/// Any authenticated caller may cancel any booking id; see the ownership
/// note on `BookingService::cancel`.
async fn cancel_booking(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
    Path(booking_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.bookings.cancel(booking_id).await?;
    Ok(StatusCode::OK)
}
