use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use buskaro_core::booking::{Booking, BookingStatus};
use buskaro_core::repository::BookingRepository;

type RepoError = Box<dyn std::error::Error + Send + Sync>;

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: Uuid,
    route_id: Uuid,
    seats: String,
    total_amount: i32,
    booking_date: chrono::DateTime<chrono::Utc>,
    status: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = RepoError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            user_id: row.user_id,
            route_id: row.route_id,
            seats: row.seats,
            total_amount: row.total_amount,
            booking_date: row.booking_date,
            status: row.status.parse()?,
        })
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, RepoError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT id, user_id, route_id, seats, total_amount, booking_date, status \
             FROM bookings WHERE user_id = $1 ORDER BY booking_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, RepoError> {
        let row = sqlx::query_as::<_, BookingRow>(
            "SELECT id, user_id, route_id, seats, total_amount, booking_date, status \
             FROM bookings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Booking::try_from).transpose()
    }

    async fn insert(&self, booking: &Booking) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, route_id, seats, total_amount, booking_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.route_id)
        .bind(&booking.seats)
        .bind(booking.total_amount)
        .bind(booking.booking_date)
        .bind(booking.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<(), RepoError> {
        sqlx::query("UPDATE bookings SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
