use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainResult;
use crate::repository::RouteRepository;

/// A scheduled bus service between two cities. Times, seat counts and price
/// are stored as text exactly as the upstream data provides them; nothing
/// validates their ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusRoute {
    pub id: Uuid,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub operator: String,
    pub bus_type: String,
    pub total_seats: String,
    pub seats_available: String,
    pub price_per_seat: String,
    pub amenities: String,
}

/// Read-only catalog over the route repository.
#[derive(Clone)]
pub struct RouteService {
    routes: Arc<dyn RouteRepository>,
}

impl RouteService {
    pub fn new(routes: Arc<dyn RouteRepository>) -> Self {
        Self { routes }
    }

    pub async fn list_all(&self) -> DomainResult<Vec<BusRoute>> {
        Ok(self.routes.list_all().await?)
    }

    /// The `date` parameter is accepted for interface compatibility but does
    /// not take part in filtering; only origin and destination match.
    pub async fn search(
        &self,
        origin: &str,
        destination: &str,
        _date: &str,
    ) -> DomainResult<Vec<BusRoute>> {
        Ok(self.routes.search(origin, destination).await?)
    }

    pub async fn cities(&self) -> DomainResult<Vec<String>> {
        Ok(self.routes.list_cities().await?)
    }

    pub async fn operators(&self) -> DomainResult<Vec<String>> {
        Ok(self.routes.list_operators().await?)
    }

    /// First 5 routes in storage order. No popularity metric backs this.
    pub async fn popular(&self) -> DomainResult<Vec<BusRoute>> {
        Ok(self.routes.first(5).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRouteRepository;

    fn route(origin: &str, destination: &str, operator: &str) -> BusRoute {
        BusRoute {
            id: Uuid::new_v4(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_time: "08:00".to_string(),
            arrival_time: "20:00".to_string(),
            operator: operator.to_string(),
            bus_type: "AC Sleeper".to_string(),
            total_seats: "40".to_string(),
            seats_available: "40".to_string(),
            price_per_seat: "1500".to_string(),
            amenities: "WiFi, Water".to_string(),
        }
    }

    fn service(routes: Vec<BusRoute>) -> RouteService {
        RouteService::new(Arc::new(MemoryRouteRepository::with_routes(routes)))
    }

    #[tokio::test]
    async fn search_matches_case_insensitively() {
        let svc = service(vec![
            route("Delhi", "Mumbai", "Delhi Express"),
            route("Mumbai", "Bangalore", "Mumbai Travels"),
        ]);

        let found = svc.search("delhi", "MUMBAI", "2025-01-01").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].origin, "Delhi");
    }

    #[tokio::test]
    async fn search_ignores_date() {
        let svc = service(vec![route("Delhi", "Mumbai", "Delhi Express")]);

        let a = svc.search("Delhi", "Mumbai", "2025-01-01").await.unwrap();
        let b = svc.search("Delhi", "Mumbai", "1999-12-31").await.unwrap();
        assert_eq!(a.len(), b.len());
    }

    #[tokio::test]
    async fn cities_are_deduplicated_in_first_seen_order() {
        let svc = service(vec![
            route("Delhi", "Mumbai", "Delhi Express"),
            route("Mumbai", "Bangalore", "Mumbai Travels"),
            route("Lucknow", "Delhi", "UP Express"),
        ]);

        let cities = svc.cities().await.unwrap();
        assert_eq!(cities, vec!["Delhi", "Mumbai", "Bangalore", "Lucknow"]);
    }

    #[tokio::test]
    async fn operators_are_deduplicated() {
        let svc = service(vec![
            route("Delhi", "Mumbai", "Delhi Express"),
            route("Mumbai", "Delhi", "Delhi Express"),
            route("Chennai", "Bangalore", "South Express"),
        ]);

        let operators = svc.operators().await.unwrap();
        assert_eq!(operators, vec!["Delhi Express", "South Express"]);
    }

    #[tokio::test]
    async fn popular_returns_first_five_in_storage_order() {
        let routes: Vec<BusRoute> = (0..8)
            .map(|i| route(&format!("City{i}"), "Delhi", "Op"))
            .collect();
        let first = routes[0].id;
        let svc = service(routes);

        let popular = svc.popular().await.unwrap();
        assert_eq!(popular.len(), 5);
        assert_eq!(popular[0].id, first);
    }
}
