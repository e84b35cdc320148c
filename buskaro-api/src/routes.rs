use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use buskaro_core::route::BusRoute;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub from: String,
    pub to: String,
    pub date: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/routes", get(list_routes))
        .route("/routes/search", get(search_routes))
        .route("/routes/cities", get(list_cities))
        .route("/routes/operators", get(list_operators))
        .route("/routes/popular", get(popular_routes))
}

/// GET /routes
async fn list_routes(State(state): State<AppState>) -> Result<Json<Vec<BusRoute>>, ApiError> {
    Ok(Json(state.routes.list_all().await?))
}

/// GET /routes/search?from=..&to=..&date=..
async fn search_routes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<BusRoute>>, ApiError> {
    let found = state
        .routes
        .search(&params.from, &params.to, &params.date)
        .await?;
    Ok(Json(found))
}

/// GET /routes/cities
async fn list_cities(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.routes.cities().await?))
}

/// GET /routes/operators
async fn list_operators(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.routes.operators().await?))
}

/// GET /routes/popular
async fn popular_routes(State(state): State<AppState>) -> Result<Json<Vec<BusRoute>>, ApiError> {
    Ok(Json(state.routes.popular().await?))
}
