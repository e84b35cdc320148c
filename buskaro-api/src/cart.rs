use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use buskaro_core::cart::CartItem;

use crate::error::ApiError;
use crate::middleware::auth::{require_auth, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub seats: String,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        // POST carries a route id, DELETE a cart item id.
        .route("/cart/{id}", post(add_to_cart).delete(remove_from_cart))
        .route_layer(axum::middleware::from_fn_with_state(state, require_auth))
}

/// GET /cart
async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<CartItem>>, ApiError> {
    Ok(Json(state.cart.items(user.id).await?))
}

/// POST /cart/{routeId}
async fn add_to_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(route_id): Path<Uuid>,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<CartItem>, ApiError> {
    if req.seats.is_empty() {
        return Err(ApiError::Validation("Seats are required".to_string()));
    }
    let item = state.cart.add_item(user.id, route_id, req.seats).await?;
    Ok(Json(item))
}

/// DELETE /cart/{id}
async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.cart.remove_item(user.id, id).await?;
    Ok(StatusCode::OK)
}

/// DELETE /cart
async fn clear_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<StatusCode, ApiError> {
    state.cart.clear(user.id).await?;
    Ok(StatusCode::OK)
}
