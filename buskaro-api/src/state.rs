use std::sync::Arc;

use buskaro_core::booking::BookingService;
use buskaro_core::cart::CartService;
use buskaro_core::repository::UserRepository;
use buskaro_core::route::RouteService;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub routes: RouteService,
    pub cart: CartService,
    pub bookings: BookingService,
    pub auth: AuthConfig,
}
