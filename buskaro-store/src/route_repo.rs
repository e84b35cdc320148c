use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use buskaro_core::repository::RouteRepository;
use buskaro_core::route::BusRoute;

type RepoError = Box<dyn std::error::Error + Send + Sync>;

pub struct PostgresRouteRepository {
    pool: PgPool,
}

impl PostgresRouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RouteRow {
    id: Uuid,
    origin: String,
    destination: String,
    departure_time: String,
    arrival_time: String,
    operator: String,
    bus_type: String,
    total_seats: String,
    seats_available: String,
    price_per_seat: String,
    amenities: String,
}

impl From<RouteRow> for BusRoute {
    fn from(row: RouteRow) -> Self {
        BusRoute {
            id: row.id,
            origin: row.origin,
            destination: row.destination,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            operator: row.operator,
            bus_type: row.bus_type,
            total_seats: row.total_seats,
            seats_available: row.seats_available,
            price_per_seat: row.price_per_seat,
            amenities: row.amenities,
        }
    }
}

const ROUTE_COLUMNS: &str = "id, origin, destination, departure_time, arrival_time, operator, \
     bus_type, total_seats, seats_available, price_per_seat, amenities";

#[async_trait]
impl RouteRepository for PostgresRouteRepository {
    async fn list_all(&self) -> Result<Vec<BusRoute>, RepoError> {
        let rows = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM bus_routes"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BusRoute::from).collect())
    }

    async fn search(&self, origin: &str, destination: &str) -> Result<Vec<BusRoute>, RepoError> {
        let rows = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM bus_routes \
             WHERE LOWER(origin) = LOWER($1) AND LOWER(destination) = LOWER($2)"
        ))
        .bind(origin)
        .bind(destination)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BusRoute::from).collect())
    }

    async fn list_cities(&self) -> Result<Vec<String>, RepoError> {
        // UNION deduplicates across both columns.
        let cities: Vec<String> = sqlx::query_scalar(
            "SELECT origin FROM bus_routes UNION SELECT destination FROM bus_routes",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cities)
    }

    async fn list_operators(&self) -> Result<Vec<String>, RepoError> {
        let operators: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT operator FROM bus_routes")
                .fetch_all(&self.pool)
                .await?;

        Ok(operators)
    }

    async fn first(&self, limit: i64) -> Result<Vec<BusRoute>, RepoError> {
        let rows = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM bus_routes LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BusRoute::from).collect())
    }
}
