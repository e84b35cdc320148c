use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use buskaro_core::cart::CartItem;
use buskaro_core::repository::CartRepository;

type RepoError = Box<dyn std::error::Error + Send + Sync>;

pub struct PostgresCartRepository {
    pool: PgPool,
}

impl PostgresCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CartItemRow {
    id: Uuid,
    user_id: Uuid,
    route_id: Uuid,
    seats: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        CartItem {
            id: row.id,
            user_id: row.user_id,
            route_id: row.route_id,
            seats: row.seats,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CartRepository for PostgresCartRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, RepoError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            "SELECT id, user_id, route_id, seats, created_at FROM cart_items \
             WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CartItem::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CartItem>, RepoError> {
        let row = sqlx::query_as::<_, CartItemRow>(
            "SELECT id, user_id, route_id, seats, created_at FROM cart_items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CartItem::from))
    }

    async fn insert(&self, item: &CartItem) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO cart_items (id, user_id, route_id, seats, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.id)
        .bind(item.user_id)
        .bind(item.route_id)
        .bind(&item.seats)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn clear_for_user(&self, user_id: Uuid) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
