use axum::{extract::State, routing::post, Extension, Json, Router};

use buskaro_core::booking::Booking;

use crate::error::ApiError;
use crate::middleware::auth::{require_auth, AuthUser};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout))
        .route_layer(axum::middleware::from_fn_with_state(state, require_auth))
}

/// POST /checkout
///
/// Converts the caller's entire cart into bookings and clears it.
async fn checkout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.bookings.checkout(user.id).await?))
}
