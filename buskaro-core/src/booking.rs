use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::repository::{BookingRepository, CartRepository};

// TODO: derive from the route's price_per_seat and the seat count instead of
// charging a flat placeholder.
const PLACEHOLDER_TOTAL_AMOUNT: i32 = 1000;

/// A confirmed (or cancelled) reservation. Bookings are never deleted;
/// cancellation is a status flip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub route_id: Uuid,
    pub seats: String,
    pub total_amount: i32,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            other => Err(DomainError::Internal(format!(
                "Unknown booking status: {other}"
            ))),
        }
    }
}

#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    carts: Arc<dyn CartRepository>,
}

impl BookingService {
    pub fn new(bookings: Arc<dyn BookingRepository>, carts: Arc<dyn CartRepository>) -> Self {
        Self { bookings, carts }
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Booking>> {
        Ok(self.bookings.list_for_user(user_id).await?)
    }

    /// Books a route directly, bypassing the cart. Seat availability on the
    /// route is not decremented.
    pub async fn create(
        &self,
        user_id: Uuid,
        route_id: Uuid,
        seats: String,
    ) -> DomainResult<Booking> {
        let booking = new_confirmed(user_id, route_id, seats);
        self.bookings.insert(&booking).await?;
        tracing::info!(user_id = %user_id, booking_id = %booking.id, "booking created");
        Ok(booking)
    }

    /// Flips the booking to CANCELLED. Repeating the call leaves it
    /// cancelled; there is no way back to CONFIRMED.
    // TODO: require the caller to own the booking, the way cart removal does.
    pub async fn cancel(&self, booking_id: Uuid) -> DomainResult<()> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Booking not found".to_string()))?;

        self.bookings
            .update_status(booking_id, BookingStatus::Cancelled)
            .await?;
        tracing::info!(booking_id = %booking_id, "booking cancelled");
        Ok(())
    }

    /// Converts every cart item into a CONFIRMED booking in cart listing
    /// order, then clears the cart. An insert failure partway through leaves
    /// the earlier bookings in place; nothing rolls back.
    pub async fn checkout(&self, user_id: Uuid) -> DomainResult<Vec<Booking>> {
        let items = self.carts.list_for_user(user_id).await?;
        if items.is_empty() {
            return Err(DomainError::Validation("Cart is empty".to_string()));
        }

        let mut bookings = Vec::with_capacity(items.len());
        for item in &items {
            let booking = new_confirmed(user_id, item.route_id, item.seats.clone());
            self.bookings.insert(&booking).await?;
            bookings.push(booking);
        }

        self.carts.clear_for_user(user_id).await?;
        tracing::info!(user_id = %user_id, count = bookings.len(), "checkout completed");
        Ok(bookings)
    }
}

fn new_confirmed(user_id: Uuid, route_id: Uuid, seats: String) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        user_id,
        route_id,
        seats,
        total_amount: PLACEHOLDER_TOTAL_AMOUNT,
        booking_date: Utc::now(),
        status: BookingStatus::Confirmed,
    }
}
