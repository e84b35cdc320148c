//! In-memory repository implementations. They back the unit and integration
//! tests and mirror the scoping semantics of the SQL store: owner filters,
//! case-insensitive search, first-seen dedup for the derived summaries.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::booking::{Booking, BookingStatus};
use crate::cart::CartItem;
use crate::repository::{BookingRepository, CartRepository, RouteRepository, UserRepository};
use crate::route::BusRoute;
use crate::user::User;

type RepoError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), RepoError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRouteRepository {
    routes: Mutex<Vec<BusRoute>>,
}

impl MemoryRouteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_routes(routes: Vec<BusRoute>) -> Self {
        Self {
            routes: Mutex::new(routes),
        }
    }
}

#[async_trait]
impl RouteRepository for MemoryRouteRepository {
    async fn list_all(&self) -> Result<Vec<BusRoute>, RepoError> {
        Ok(self.routes.lock().unwrap().clone())
    }

    async fn search(&self, origin: &str, destination: &str) -> Result<Vec<BusRoute>, RepoError> {
        let routes = self.routes.lock().unwrap();
        Ok(routes
            .iter()
            .filter(|r| {
                r.origin.eq_ignore_ascii_case(origin)
                    && r.destination.eq_ignore_ascii_case(destination)
            })
            .cloned()
            .collect())
    }

    async fn list_cities(&self) -> Result<Vec<String>, RepoError> {
        let routes = self.routes.lock().unwrap();
        let mut cities: Vec<String> = Vec::new();
        for route in routes.iter() {
            for city in [&route.origin, &route.destination] {
                if !cities.contains(city) {
                    cities.push(city.clone());
                }
            }
        }
        Ok(cities)
    }

    async fn list_operators(&self) -> Result<Vec<String>, RepoError> {
        let routes = self.routes.lock().unwrap();
        let mut operators: Vec<String> = Vec::new();
        for route in routes.iter() {
            if !operators.contains(&route.operator) {
                operators.push(route.operator.clone());
            }
        }
        Ok(operators)
    }

    async fn first(&self, limit: i64) -> Result<Vec<BusRoute>, RepoError> {
        let routes = self.routes.lock().unwrap();
        Ok(routes.iter().take(limit as usize).cloned().collect())
    }
}

#[derive(Default)]
pub struct MemoryCartRepository {
    items: Mutex<Vec<CartItem>>,
}

impl MemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for MemoryCartRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, RepoError> {
        let items = self.items.lock().unwrap();
        Ok(items.iter().filter(|i| i.user_id == user_id).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CartItem>, RepoError> {
        let items = self.items.lock().unwrap();
        Ok(items.iter().find(|i| i.id == id).cloned())
    }

    async fn insert(&self, item: &CartItem) -> Result<(), RepoError> {
        self.items.lock().unwrap().push(item.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.items.lock().unwrap().retain(|i| i.id != id);
        Ok(())
    }

    async fn clear_for_user(&self, user_id: Uuid) -> Result<(), RepoError> {
        self.items.lock().unwrap().retain(|i| i.user_id != user_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBookingRepository {
    bookings: Mutex<Vec<Booking>>,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, RepoError> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings.iter().filter(|b| b.user_id == user_id).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, RepoError> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, booking: &Booking) -> Result<(), RepoError> {
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<(), RepoError> {
        let mut bookings = self.bookings.lock().unwrap();
        if let Some(booking) = bookings.iter_mut().find(|b| b.id == id) {
            booking.status = status;
        }
        Ok(())
    }
}
