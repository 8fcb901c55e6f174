use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::info;

use super::CatalogRepository;
use crate::error::{ApiError, ApiResult};
use crate::models::{Character, Favorite, FavoriteTarget, Planet, User, Vehicle};
use crate::seed::SeedCatalog;

#[derive(Debug)]
struct Tables {
    users: BTreeMap<i32, User>,
    characters: BTreeMap<i32, Character>,
    planets: BTreeMap<i32, Planet>,
    vehicles: BTreeMap<i32, Vehicle>,
    // Kept in insertion order, which is also ascending id order
    favorites: Vec<Favorite>,
    next_favorite_id: i32,
}

impl Default for Tables {
    fn default() -> Self {
        Tables {
            users: BTreeMap::new(),
            characters: BTreeMap::new(),
            planets: BTreeMap::new(),
            vehicles: BTreeMap::new(),
            favorites: Vec::new(),
            next_favorite_id: 1,
        }
    }
}

/// Process-local catalog store. Contents are lost on shutdown.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn fill<T: Clone>(table: &mut BTreeMap<i32, T>, rows: &[T], id: impl Fn(&T) -> i32) -> bool {
    if !table.is_empty() {
        return false;
    }
    table.extend(rows.iter().map(|row| (id(row), row.clone())));
    true
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn health_check(&self) -> ApiResult<()> {
        Ok(())
    }

    async fn seed(&self, catalog: &SeedCatalog) -> ApiResult<()> {
        let mut tables = self.tables.write().await;

        let seeded = [
            ("users", fill(&mut tables.users, &catalog.users, |u| u.id)),
            ("characters", fill(&mut tables.characters, &catalog.characters, |c| c.id)),
            ("planets", fill(&mut tables.planets, &catalog.planets, |p| p.id)),
            ("vehicles", fill(&mut tables.vehicles, &catalog.vehicles, |v| v.id)),
        ];

        for (table, done) in seeded {
            if done {
                info!("Seeded in-memory {} table", table);
            } else {
                info!("In-memory {} table already populated, skipping seed", table);
            }
        }
        Ok(())
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn get_user(&self, id: i32) -> ApiResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn list_characters(&self) -> ApiResult<Vec<Character>> {
        Ok(self.tables.read().await.characters.values().cloned().collect())
    }

    async fn get_character(&self, id: i32) -> ApiResult<Option<Character>> {
        Ok(self.tables.read().await.characters.get(&id).cloned())
    }

    async fn list_planets(&self) -> ApiResult<Vec<Planet>> {
        Ok(self.tables.read().await.planets.values().cloned().collect())
    }

    async fn get_planet(&self, id: i32) -> ApiResult<Option<Planet>> {
        Ok(self.tables.read().await.planets.get(&id).cloned())
    }

    async fn list_vehicles(&self) -> ApiResult<Vec<Vehicle>> {
        Ok(self.tables.read().await.vehicles.values().cloned().collect())
    }

    async fn get_vehicle(&self, id: i32) -> ApiResult<Option<Vehicle>> {
        Ok(self.tables.read().await.vehicles.get(&id).cloned())
    }

    async fn favorites_for_user(&self, user_id: i32) -> ApiResult<Vec<Favorite>> {
        let tables = self.tables.read().await;
        Ok(tables
            .favorites
            .iter()
            .filter(|favorite| favorite.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn favorites_for_target(&self, target: FavoriteTarget) -> ApiResult<Vec<Favorite>> {
        let tables = self.tables.read().await;
        Ok(tables
            .favorites
            .iter()
            .filter(|favorite| favorite.target == target)
            .cloned()
            .collect())
    }

    async fn add_favorite(&self, user_id: i32, target: FavoriteTarget) -> ApiResult<Favorite> {
        let mut tables = self.tables.write().await;

        // Same outcome as the foreign keys on the favorites table
        let target_present = match target {
            FavoriteTarget::Character(id) => tables.characters.contains_key(&id),
            FavoriteTarget::Planet(id) => tables.planets.contains_key(&id),
            FavoriteTarget::Vehicle(id) => tables.vehicles.contains_key(&id),
        };
        if !tables.users.contains_key(&user_id) || !target_present {
            return Err(ApiError::not_found("Referenced resource"));
        }

        let favorite = Favorite::new(tables.next_favorite_id, user_id, target);
        tables.next_favorite_id += 1;
        tables.favorites.push(favorite.clone());

        Ok(favorite)
    }

    async fn delete_first_favorite(&self, user_id: i32, target: FavoriteTarget) -> ApiResult<bool> {
        let mut tables = self.tables.write().await;

        match tables.favorites.iter().position(|favorite| favorite.matches(user_id, target)) {
            Some(index) => {
                tables.favorites.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn seeded() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        block_on(repo.seed(&SeedCatalog::starter())).expect("seed failed");
        repo
    }

    #[test]
    fn test_seed_fills_empty_tables_once() {
        let repo = seeded();
        block_on(async {
            let planets = repo.list_planets().await.unwrap();
            assert_eq!(planets.len(), 3);

            // A second seed must not duplicate or replace rows
            let mut catalog = SeedCatalog::starter();
            catalog.planets.truncate(1);
            catalog.planets[0].name = "Dagobah".to_string();
            repo.seed(&catalog).await.unwrap();

            let planets = repo.list_planets().await.unwrap();
            assert_eq!(planets.len(), 3);
            assert_eq!(planets[0].name, "Tatooine");
        });
    }

    #[test]
    fn test_lists_are_ordered_by_id() {
        let repo = seeded();
        let ids: Vec<i32> = block_on(repo.list_characters())
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_target_exists() {
        let repo = seeded();
        block_on(async {
            assert!(repo.target_exists(FavoriteTarget::Planet(1)).await.unwrap());
            assert!(repo.target_exists(FavoriteTarget::Vehicle(2)).await.unwrap());
            assert!(!repo.target_exists(FavoriteTarget::Character(99)).await.unwrap());
        });
    }

    /// Seeded catalog plus a second user, for per-user filtering checks.
    fn seeded_with_two_users() -> InMemoryRepository {
        let mut catalog = SeedCatalog::starter();
        catalog.users.push(User::new(2, "leia@rebellion.test"));

        let repo = InMemoryRepository::new();
        block_on(repo.seed(&catalog)).expect("seed failed");
        repo
    }

    #[test]
    fn test_favorite_ids_increase() {
        let repo = seeded();
        block_on(async {
            let first = repo.add_favorite(1, FavoriteTarget::Planet(1)).await.unwrap();
            let second = repo.add_favorite(1, FavoriteTarget::Planet(1)).await.unwrap();

            assert_eq!(first.id, 1);
            assert_eq!(second.id, 2);
            assert_eq!(repo.favorites_for_user(1).await.unwrap().len(), 2);
        });
    }

    #[test]
    fn test_add_favorite_requires_existing_user() {
        let mut catalog = SeedCatalog::starter();
        catalog.users.clear();

        let repo = InMemoryRepository::new();
        block_on(async {
            repo.seed(&catalog).await.unwrap();

            let err = repo.add_favorite(1, FavoriteTarget::Planet(1)).await.unwrap_err();
            assert!(matches!(err, ApiError::NotFound(_)));
            assert!(repo.favorites_for_target(FavoriteTarget::Planet(1)).await.unwrap().is_empty());
        });
    }

    #[test]
    fn test_add_favorite_requires_existing_target() {
        let repo = seeded();
        block_on(async {
            let err = repo.add_favorite(1, FavoriteTarget::Vehicle(50)).await.unwrap_err();
            assert!(matches!(err, ApiError::NotFound(_)));
            assert!(repo.favorites_for_user(1).await.unwrap().is_empty());
        });
    }

    #[test]
    fn test_delete_removes_only_first_match() {
        let repo = seeded_with_two_users();
        block_on(async {
            let first = repo.add_favorite(1, FavoriteTarget::Character(2)).await.unwrap();
            let second = repo.add_favorite(1, FavoriteTarget::Character(2)).await.unwrap();
            repo.add_favorite(2, FavoriteTarget::Character(2)).await.unwrap();

            assert!(repo.delete_first_favorite(1, FavoriteTarget::Character(2)).await.unwrap());

            let remaining = repo.favorites_for_target(FavoriteTarget::Character(2)).await.unwrap();
            assert_eq!(remaining.len(), 2);
            assert!(remaining.iter().all(|f| f.id != first.id));
            assert!(remaining.iter().any(|f| f.id == second.id));
        });
    }

    #[test]
    fn test_delete_without_match() {
        let repo = seeded_with_two_users();
        block_on(async {
            repo.add_favorite(1, FavoriteTarget::Planet(3)).await.unwrap();

            // Same id, different kind
            assert!(!repo.delete_first_favorite(1, FavoriteTarget::Character(3)).await.unwrap());
            // Same target, different user
            assert!(!repo.delete_first_favorite(2, FavoriteTarget::Planet(3)).await.unwrap());
            assert_eq!(repo.favorites_for_user(1).await.unwrap().len(), 1);
        });
    }
}
