use std::net::SocketAddr;
use std::sync::Arc;

use buskaro_api::{
    app,
    state::{AppState, AuthConfig},
};
use buskaro_core::booking::BookingService;
use buskaro_core::cart::CartService;
use buskaro_core::repository::{BookingRepository, CartRepository, RouteRepository, UserRepository};
use buskaro_core::route::RouteService;
use buskaro_store::{
    DbClient, PostgresBookingRepository, PostgresCartRepository, PostgresRouteRepository,
    PostgresUserRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buskaro_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = buskaro_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Buskaro API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");
    buskaro_store::seed::seed_routes(&db.pool)
        .await
        .expect("Failed to seed routes");

    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(db.pool.clone()));
    let routes: Arc<dyn RouteRepository> = Arc::new(PostgresRouteRepository::new(db.pool.clone()));
    let carts: Arc<dyn CartRepository> = Arc::new(PostgresCartRepository::new(db.pool.clone()));
    let bookings: Arc<dyn BookingRepository> =
        Arc::new(PostgresBookingRepository::new(db.pool.clone()));

    let state = AppState {
        users,
        routes: RouteService::new(routes),
        cart: CartService::new(carts.clone()),
        bookings: BookingService::new(bookings, carts),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
