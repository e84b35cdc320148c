use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

use buskaro_api::state::{AppState, AuthConfig};
use buskaro_api::app;
use buskaro_core::booking::BookingService;
use buskaro_core::cart::CartService;
use buskaro_core::memory::{
    MemoryBookingRepository, MemoryCartRepository, MemoryRouteRepository, MemoryUserRepository,
};
use buskaro_core::repository::CartRepository;
use buskaro_core::route::{BusRoute, RouteService};

fn route(origin: &str, destination: &str, operator: &str, price: &str) -> BusRoute {
    BusRoute {
        id: Uuid::new_v4(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        departure_time: "08:00".to_string(),
        arrival_time: "20:00".to_string(),
        operator: operator.to_string(),
        bus_type: "AC Sleeper".to_string(),
        total_seats: "40".to_string(),
        seats_available: "40".to_string(),
        price_per_seat: price.to_string(),
        amenities: "WiFi, Water".to_string(),
    }
}

/// Router over in-memory stores, seeded with two routes. Returns the app and
/// the Delhi–Mumbai route id.
fn test_app() -> (Router, Uuid) {
    let delhi_mumbai = route("Delhi", "Mumbai", "Delhi Express", "1500");
    let delhi_mumbai_id = delhi_mumbai.id;
    let routes = vec![delhi_mumbai, route("Mumbai", "Delhi", "Delhi Express", "1500")];

    let carts: Arc<dyn CartRepository> = Arc::new(MemoryCartRepository::new());
    let state = AppState {
        users: Arc::new(MemoryUserRepository::new()),
        routes: RouteService::new(Arc::new(MemoryRouteRepository::with_routes(routes))),
        cart: CartService::new(carts.clone()),
        bookings: BookingService::new(Arc::new(MemoryBookingRepository::new()), carts),
        auth: AuthConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        },
    };

    (app(state), delhi_mumbai_id)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn signup(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "name": "Rider",
            "email": email,
            "password": "secret1",
            "phone": "9999999999",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn signup_returns_token_and_profile() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "name": "Rider",
            "email": "rider@example.com",
            "password": "secret1",
            "phone": "9999999999",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["email"], "rider@example.com");
    assert_eq!(body["name"], "Rider");
}

#[tokio::test]
async fn duplicate_signup_fails_with_error_envelope() {
    let (app, _) = test_app();
    signup(&app, "rider@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "name": "Other",
            "email": "rider@example.com",
            "password": "secret2",
            "phone": "8888888888",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email already exists");
    assert!(body["data"].is_null());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn login_verifies_the_stored_credential() {
    let (app, _) = test_app();
    signup(&app, "rider@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "rider@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["token"].as_str().unwrap().is_empty());

    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "rider@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (app, _) = test_app();

    let (status, body) = send(&app, "GET", "/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "GET", "/cart", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn route_search_matches_case_insensitively_and_ignores_date() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        "GET",
        "/routes/search?from=delhi&to=MUMBAI&date=2025-01-01",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["origin"], "Delhi");
}

#[tokio::test]
async fn cities_are_listed_once() {
    let (app, _) = test_app();

    let (status, body) = send(&app, "GET", "/routes/cities", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Delhi", "Mumbai"]));
}

#[tokio::test]
async fn cart_checkout_converts_items_into_confirmed_bookings() {
    let (app, route_id) = test_app();
    let token = signup(&app, "rider@example.com").await;

    let (status, item) = send(
        &app,
        "POST",
        &format!("/cart/{}", route_id),
        Some(&token),
        Some(json!({"seats": "2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["route_id"], route_id.to_string());
    assert_eq!(item["seats"], "2");

    let (_, cart) = send(&app, "GET", "/cart", Some(&token), None).await;
    assert_eq!(cart.as_array().unwrap().len(), 1);

    let (status, bookings) = send(&app, "POST", "/checkout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let bookings = bookings.as_array().unwrap().clone();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["route_id"], route_id.to_string());
    assert_eq!(bookings[0]["seats"], "2");
    assert_eq!(bookings[0]["status"], "CONFIRMED");

    let (_, cart) = send(&app, "GET", "/cart", Some(&token), None).await;
    assert!(cart.as_array().unwrap().is_empty());

    let (_, listed) = send(&app, "GET", "/bookings", Some(&token), None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn checkout_with_empty_cart_is_a_validation_error() {
    let (app, _) = test_app();
    let token = signup(&app, "rider@example.com").await;

    let (status, body) = send(&app, "POST", "/checkout", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cart is empty");

    let (_, listed) = send(&app, "GET", "/bookings", Some(&token), None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn removing_another_users_cart_item_is_unauthorized() {
    let (app, route_id) = test_app();
    let alice = signup(&app, "alice@example.com").await;
    let bob = signup(&app, "bob@example.com").await;

    let (_, item) = send(
        &app,
        "POST",
        &format!("/cart/{}", route_id),
        Some(&alice),
        Some(json!({"seats": "2"})),
    )
    .await;
    let item_id = item["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/cart/{}", item_id),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, cart) = send(&app, "GET", "/cart", Some(&alice), None).await;
    assert_eq!(cart.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn bookings_can_be_created_and_cancelled() {
    let (app, route_id) = test_app();
    let token = signup(&app, "rider@example.com").await;

    let (status, booking) = send(
        &app,
        "POST",
        &format!("/bookings/{}", route_id),
        Some(&token),
        Some(json!({"seats": "3"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["status"], "CONFIRMED");
    assert_eq!(booking["total_amount"], 1000);
    let booking_id = booking["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/bookings/{}/cancel", booking_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = send(&app, "GET", "/bookings", Some(&token), None).await;
    assert_eq!(listed[0]["status"], "CANCELLED");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/bookings/{}/cancel", Uuid::new_v4()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
