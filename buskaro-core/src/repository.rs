use async_trait::async_trait;
use uuid::Uuid;

use crate::booking::{Booking, BookingStatus};
use crate::cart::CartItem;
use crate::route::BusRoute;
use crate::user::User;

type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Repository trait for account storage
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn insert(&self, user: &User) -> Result<(), RepoError>;
}

/// Repository trait for the route catalog. Search and the derived summaries
/// are predicate-scoped here so the store can answer them with indexed
/// queries instead of full scans.
#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<BusRoute>, RepoError>;

    /// Case-insensitive equality on origin and destination.
    async fn search(&self, origin: &str, destination: &str) -> Result<Vec<BusRoute>, RepoError>;

    /// Every origin and destination, deduplicated.
    async fn list_cities(&self) -> Result<Vec<String>, RepoError>;

    /// Operator names, deduplicated.
    async fn list_operators(&self) -> Result<Vec<String>, RepoError>;

    /// First `limit` routes in storage order.
    async fn first(&self, limit: i64) -> Result<Vec<BusRoute>, RepoError>;
}

/// Repository trait for pending seat selections
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CartItem>, RepoError>;

    async fn insert(&self, item: &CartItem) -> Result<(), RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    async fn clear_for_user(&self, user_id: Uuid) -> Result<(), RepoError>;
}

/// Repository trait for confirmed and cancelled reservations
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, RepoError>;

    async fn insert(&self, booking: &Booking) -> Result<(), RepoError>;

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<(), RepoError>;
}
