//! Shared helpers for driving the router over the in-memory backend.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use catalog_rest_api::{create_app, seed::SeedCatalog, CatalogRepository, InMemoryRepository};
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

pub type App = NormalizePath<Router>;

/// App backed by an in-memory store seeded with `catalog`.
pub async fn app_with_catalog(catalog: SeedCatalog) -> App {
    let repo = InMemoryRepository::new();
    repo.seed(&catalog)
        .await
        .expect("seeding the in-memory catalog failed");
    create_app(Arc::new(repo))
}

/// App backed by a freshly seeded in-memory catalog.
pub async fn seeded_app() -> App {
    app_with_catalog(SeedCatalog::starter()).await
}

/// App over an empty in-memory catalog (no users, no catalog rows).
pub fn empty_app() -> App {
    create_app(Arc::new(InMemoryRepository::new()))
}

pub async fn send(app: &App, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
