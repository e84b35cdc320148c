pub mod app_config;
pub mod booking_repo;
pub mod cart_repo;
pub mod database;
pub mod route_repo;
pub mod seed;
pub mod user_repo;

pub use booking_repo::PostgresBookingRepository;
pub use cart_repo::PostgresCartRepository;
pub use database::DbClient;
pub use route_repo::PostgresRouteRepository;
pub use user_repo::PostgresUserRepository;
