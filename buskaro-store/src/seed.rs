use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

type Route = (
    &'static str, // origin
    &'static str, // destination
    &'static str, // departure
    &'static str, // arrival
    &'static str, // operator
    &'static str, // bus type
    &'static str, // total seats
    &'static str, // seats available
    &'static str, // price per seat
    &'static str, // amenities
);

const ROUTES: &[Route] = &[
    ("Delhi", "Mumbai", "08:00", "20:00", "Delhi Express", "AC Sleeper", "40", "40", "1500", "WiFi, Water, Snacks, Blanket"),
    ("Mumbai", "Bangalore", "09:00", "22:00", "Mumbai Travels", "AC Seater", "35", "35", "1200", "WiFi, Water, Blanket"),
    ("Delhi", "Kolkata", "07:30", "19:30", "Royal Express", "AC Sleeper", "45", "45", "1800", "WiFi, Water, Snacks, Blanket, Pillow"),
    ("Chennai", "Bangalore", "06:00", "14:00", "South Express", "AC Seater", "30", "30", "800", "WiFi, Water, Snacks"),
    ("Lucknow", "Delhi", "10:00", "18:00", "UP Express", "AC Sleeper", "38", "38", "1000", "WiFi, Water, Snacks, Blanket"),
    ("Amritsar", "Delhi", "11:00", "19:00", "Punjab Express", "AC Seater", "42", "42", "900", "WiFi, Water, Snacks"),
    ("Kolkata", "Chennai", "08:30", "22:30", "East Coast Express", "AC Sleeper", "40", "40", "2000", "WiFi, Water, Snacks, Blanket, Pillow, Dinner"),
    ("Bangalore", "Lucknow", "07:00", "23:00", "Central Express", "AC Sleeper", "36", "36", "2200", "WiFi, Water, Snacks, Blanket, Pillow, Breakfast, Dinner"),
];

/// Populates the catalog on first boot. A non-empty table is left alone.
pub async fn seed_routes(pool: &PgPool) -> Result<(), sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bus_routes")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        return Ok(());
    }

    for &(origin, destination, departure, arrival, operator, bus_type, total, available, price, amenities) in ROUTES {
        sqlx::query(
            r#"
            INSERT INTO bus_routes (id, origin, destination, departure_time, arrival_time,
                                    operator, bus_type, total_seats, seats_available,
                                    price_per_seat, amenities)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(origin)
        .bind(destination)
        .bind(departure)
        .bind(arrival)
        .bind(operator)
        .bind(bus_type)
        .bind(total)
        .bind(available)
        .bind(price)
        .bind(amenities)
        .execute(pool)
        .await?;
    }

    info!("Seeded {} bus routes", ROUTES.len());
    Ok(())
}
