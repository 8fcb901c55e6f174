//! Storage seam between the HTTP handlers and the catalog tables.
//!
//! Every handler performs at most one call on a [`CatalogRepository`]. The
//! PostgreSQL implementation lives in [`crate::db::Database`]; the
//! [`memory::InMemoryRepository`] is used when no database is configured.

pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::models::{Character, Favorite, FavoriteTarget, Planet, User, Vehicle};
use crate::seed::SeedCatalog;

pub use memory::InMemoryRepository;

/// Shared handle stored as router state.
pub type SharedRepository = Arc<dyn CatalogRepository>;

#[async_trait]
pub trait CatalogRepository: Send + Sync + 'static {
    /// Cheap round trip proving the store is reachable.
    async fn health_check(&self) -> ApiResult<()>;

    /// Fills each empty table from `catalog`; tables with rows are left alone.
    async fn seed(&self, catalog: &SeedCatalog) -> ApiResult<()>;

    async fn list_users(&self) -> ApiResult<Vec<User>>;
    async fn get_user(&self, id: i32) -> ApiResult<Option<User>>;

    async fn list_characters(&self) -> ApiResult<Vec<Character>>;
    async fn get_character(&self, id: i32) -> ApiResult<Option<Character>>;

    async fn list_planets(&self) -> ApiResult<Vec<Planet>>;
    async fn get_planet(&self, id: i32) -> ApiResult<Option<Planet>>;

    async fn list_vehicles(&self) -> ApiResult<Vec<Vehicle>>;
    async fn get_vehicle(&self, id: i32) -> ApiResult<Option<Vehicle>>;

    /// Whether the catalog entity a favorite would point at exists.
    async fn target_exists(&self, target: FavoriteTarget) -> ApiResult<bool> {
        let exists = match target {
            FavoriteTarget::Character(id) => self.get_character(id).await?.is_some(),
            FavoriteTarget::Planet(id) => self.get_planet(id).await?.is_some(),
            FavoriteTarget::Vehicle(id) => self.get_vehicle(id).await?.is_some(),
        };
        Ok(exists)
    }

    async fn favorites_for_user(&self, user_id: i32) -> ApiResult<Vec<Favorite>>;
    async fn favorites_for_target(&self, target: FavoriteTarget) -> ApiResult<Vec<Favorite>>;

    /// Inserts a new favorite. Duplicates are allowed.
    async fn add_favorite(&self, user_id: i32, target: FavoriteTarget) -> ApiResult<Favorite>;

    /// Deletes the lowest-id favorite of `user_id` pointing at `target`.
    /// Returns `false` when nothing matched.
    async fn delete_first_favorite(&self, user_id: i32, target: FavoriteTarget) -> ApiResult<bool>;
}
