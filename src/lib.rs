// Library root for the catalog REST API

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seed;

// Re-export commonly used types
pub use db::Database;
pub use error::{ApiError, ApiResult};
pub use models::{Character, Favorite, FavoriteKind, FavoriteTarget, Planet, User, Vehicle};
pub use repository::{CatalogRepository, InMemoryRepository, SharedRepository};
pub use routes::{create_app, create_router};
