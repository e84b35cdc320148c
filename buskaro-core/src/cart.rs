use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::repository::CartRepository;

/// A pending, unconfirmed seat selection. Lives until it is removed, the
/// cart is cleared, or checkout converts it into a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub route_id: Uuid,
    pub seats: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct CartService {
    carts: Arc<dyn CartRepository>,
}

impl CartService {
    pub fn new(carts: Arc<dyn CartRepository>) -> Self {
        Self { carts }
    }

    pub async fn items(&self, user_id: Uuid) -> DomainResult<Vec<CartItem>> {
        Ok(self.carts.list_for_user(user_id).await?)
    }

    /// The route id is not checked against the catalog and the seat
    /// descriptor is not checked against capacity; both mirror the upstream
    /// contract.
    pub async fn add_item(
        &self,
        user_id: Uuid,
        route_id: Uuid,
        seats: String,
    ) -> DomainResult<CartItem> {
        let item = CartItem {
            id: Uuid::new_v4(),
            user_id,
            route_id,
            seats,
            created_at: Utc::now(),
        };
        self.carts.insert(&item).await?;
        tracing::info!(user_id = %user_id, item_id = %item.id, "cart item added");
        Ok(item)
    }

    pub async fn remove_item(&self, user_id: Uuid, item_id: Uuid) -> DomainResult<()> {
        let item = self
            .carts
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Cart item not found".to_string()))?;

        if item.user_id != user_id {
            return Err(DomainError::Unauthorized(
                "Cart item belongs to another user".to_string(),
            ));
        }

        self.carts.delete(item_id).await?;
        Ok(())
    }

    /// No-op when the cart is already empty.
    pub async fn clear(&self, user_id: Uuid) -> DomainResult<()> {
        self.carts.clear_for_user(user_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCartRepository;

    fn service() -> CartService {
        CartService::new(Arc::new(MemoryCartRepository::new()))
    }

    #[tokio::test]
    async fn items_are_isolated_per_owner() {
        let svc = service();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let route = Uuid::new_v4();

        svc.add_item(alice, route, "2".to_string()).await.unwrap();
        svc.add_item(bob, route, "1".to_string()).await.unwrap();
        svc.add_item(bob, route, "3".to_string()).await.unwrap();

        assert_eq!(svc.items(alice).await.unwrap().len(), 1);
        assert_eq!(svc.items(bob).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn remove_rejects_foreign_items_and_leaves_them_intact() {
        let svc = service();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let item = svc.add_item(alice, Uuid::new_v4(), "2".to_string()).await.unwrap();

        let err = svc.remove_item(bob, item.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
        assert_eq!(svc.items(alice).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remove_missing_item_is_not_found() {
        let svc = service();
        let err = svc.remove_item(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn remove_deletes_owned_item() {
        let svc = service();
        let alice = Uuid::new_v4();
        let item = svc.add_item(alice, Uuid::new_v4(), "2".to_string()).await.unwrap();

        svc.remove_item(alice, item.id).await.unwrap();
        assert!(svc.items(alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_only_touches_the_owner() {
        let svc = service();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        svc.add_item(alice, Uuid::new_v4(), "2".to_string()).await.unwrap();
        svc.add_item(bob, Uuid::new_v4(), "1".to_string()).await.unwrap();

        svc.clear(alice).await.unwrap();
        assert!(svc.items(alice).await.unwrap().is_empty());
        assert_eq!(svc.items(bob).await.unwrap().len(), 1);

        // Clearing an already-empty cart succeeds.
        svc.clear(alice).await.unwrap();
    }
}
