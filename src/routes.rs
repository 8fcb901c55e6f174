use axum::{
    routing::{get, post},
    Router,
};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::{
    handlers::{
        characters::{get_all_characters, get_character_by_id},
        favorites::{
            add_character_favorite, add_planet_favorite, add_vehicle_favorite,
            delete_character_favorite, delete_planet_favorite, delete_vehicle_favorite,
        },
        health_check,
        planets::{get_all_planets, get_planet_by_id},
        sitemap,
        users::{get_all_users, get_user_favorites},
        vehicles::{get_all_vehicles, get_vehicle_by_id},
    },
    middleware::apply_middleware,
    repository::SharedRepository,
};

/// One row of the public endpoint table rendered by the sitemap.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
}

impl Endpoint {
    const fn new(method: &'static str, path: &'static str) -> Self {
        Endpoint { method, path }
    }

    /// A plain GET without path parameters can be opened from a browser.
    pub fn is_browsable(&self) -> bool {
        self.method == "GET" && !self.path.contains(':')
    }
}

pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint::new("GET", "/"),
    Endpoint::new("GET", "/health"),
    Endpoint::new("GET", "/characters"),
    Endpoint::new("GET", "/characters/:id"),
    Endpoint::new("GET", "/planets"),
    Endpoint::new("GET", "/planets/:id"),
    Endpoint::new("GET", "/vehicles"),
    Endpoint::new("GET", "/vehicles/:id"),
    Endpoint::new("GET", "/users"),
    Endpoint::new("GET", "/users/favorites"),
    Endpoint::new("POST", "/favorite/planet/:id"),
    Endpoint::new("DELETE", "/favorite/planet/:id"),
    Endpoint::new("POST", "/favorite/character/:id"),
    Endpoint::new("DELETE", "/favorite/character/:id"),
    Endpoint::new("POST", "/favorite/vehicle/:id"),
    Endpoint::new("DELETE", "/favorite/vehicle/:id"),
];

/// Create the Axum router with all endpoints and middleware
pub fn create_router(repo: SharedRepository) -> Router {
    let router = Router::new()
        .route("/", get(sitemap))
        .route("/health", get(health_check))
        // Catalog endpoints
        .route("/characters", get(get_all_characters))
        .route("/characters/:id", get(get_character_by_id))
        .route("/planets", get(get_all_planets))
        .route("/planets/:id", get(get_planet_by_id))
        .route("/vehicles", get(get_all_vehicles))
        .route("/vehicles/:id", get(get_vehicle_by_id))
        // User endpoints
        .route("/users", get(get_all_users))
        .route("/users/favorites", get(get_user_favorites))
        // Favorite endpoints for the current user
        .route(
            "/favorite/planet/:id",
            post(add_planet_favorite).delete(delete_planet_favorite),
        )
        .route(
            "/favorite/character/:id",
            post(add_character_favorite).delete(delete_character_favorite),
        )
        .route(
            "/favorite/vehicle/:id",
            post(add_vehicle_favorite).delete(delete_vehicle_favorite),
        )
        .with_state(repo);

    apply_middleware(router)
}

/// Router wrapped so `/characters/` and `/characters` hit the same handler.
/// The path is rewritten before routing, so this layer sits outside the `Router`.
pub fn create_app(repo: SharedRepository) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(repo))
}
