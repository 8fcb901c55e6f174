//! Favorite creation, listing and deletion for the current user.

mod common;

use axum::http::{Method, StatusCode};
use catalog_rest_api::seed::SeedCatalog;
use common::{app_with_catalog, body_json, empty_app, seeded_app, send};

#[tokio::test]
async fn added_planet_favorite_is_listed_for_current_user() {
    let app = seeded_app().await;

    let response = send(&app, Method::POST, "/favorite/planet/1").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["user_id"], 1);
    assert_eq!(created["planet_id"], 1);
    assert!(created["character_id"].is_null());
    assert!(created["vehicle_id"].is_null());

    let response = send(&app, Method::GET, "/users/favorites").await;
    assert_eq!(response.status(), StatusCode::OK);
    let favorites = body_json(response).await;
    let favorites = favorites.as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["id"], created["id"]);
}

#[tokio::test]
async fn favorite_for_missing_planet_returns_404_and_creates_nothing() {
    let app = seeded_app().await;

    let response = send(&app, Method::POST, "/favorite/planet/404").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Planet not found");

    let response = send(&app, Method::GET, "/users/favorites").await;
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn favorite_for_missing_character_returns_404() {
    let app = seeded_app().await;

    let response = send(&app, Method::POST, "/favorite/character/77").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Character not found");
}

#[tokio::test]
async fn duplicate_favorites_are_allowed() {
    let app = seeded_app().await;

    let first = body_json(send(&app, Method::POST, "/favorite/character/2").await).await;
    let second = body_json(send(&app, Method::POST, "/favorite/character/2").await).await;
    assert_ne!(first["id"], second["id"]);

    let favorites = body_json(send(&app, Method::GET, "/users/favorites").await).await;
    assert_eq!(favorites.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_character_favorite_removes_one_row_then_404s() {
    let app = seeded_app().await;

    send(&app, Method::POST, "/favorite/character/1").await;

    let response = send(&app, Method::DELETE, "/favorite/character/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Favorite deleted");

    let favorites = body_json(send(&app, Method::GET, "/users/favorites").await).await;
    assert_eq!(favorites, serde_json::json!([]));

    let response = send(&app, Method::DELETE, "/favorite/character/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Favorite not found");
}

#[tokio::test]
async fn delete_removes_only_the_first_duplicate() {
    let app = seeded_app().await;

    let first = body_json(send(&app, Method::POST, "/favorite/planet/3").await).await;
    let second = body_json(send(&app, Method::POST, "/favorite/planet/3").await).await;

    let response = send(&app, Method::DELETE, "/favorite/planet/3").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Favorite planet deleted");

    let favorites = body_json(send(&app, Method::GET, "/users/favorites").await).await;
    let favorites = favorites.as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["id"], second["id"]);
    assert_ne!(favorites[0]["id"], first["id"]);
}

#[tokio::test]
async fn delete_planet_favorite_without_match_returns_404() {
    let app = seeded_app().await;

    // A character favorite with the same id must not satisfy a planet delete
    send(&app, Method::POST, "/favorite/character/1").await;

    let response = send(&app, Method::DELETE, "/favorite/planet/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Favorite planet not found");
}

#[tokio::test]
async fn vehicle_favorites_round_trip() {
    let app = seeded_app().await;

    let response = send(&app, Method::POST, "/favorite/vehicle/2").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["vehicle_id"], 2);

    let response = send(&app, Method::DELETE, "/favorite/vehicle/2").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Favorite vehicle deleted");

    let response = send(&app, Method::DELETE, "/favorite/vehicle/2").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Favorite vehicle not found");
}

#[tokio::test]
async fn character_detail_embeds_only_its_favorites() {
    let app = seeded_app().await;

    send(&app, Method::POST, "/favorite/character/1").await;
    send(&app, Method::POST, "/favorite/character/2").await;
    send(&app, Method::POST, "/favorite/planet/1").await;

    let response = send(&app, Method::GET, "/characters/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["character"]["id"], 1);
    let favorites = json["favorites"].as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert!(favorites.iter().all(|f| f["character_id"] == 1));
}

#[tokio::test]
async fn user_favorites_404_when_current_user_missing() {
    let app = empty_app();

    let response = send(&app, Method::GET, "/users/favorites").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "User not found");
}

#[tokio::test]
async fn favorite_with_trailing_slash_is_created() {
    let app = seeded_app().await;

    let response = send(&app, Method::POST, "/favorite/planet/1/").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["planet_id"], 1);

    let response = send(&app, Method::DELETE, "/favorite/planet/1/").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn favorite_for_missing_current_user_returns_404_and_creates_nothing() {
    let mut catalog = SeedCatalog::starter();
    catalog.users.clear();
    let app = app_with_catalog(catalog).await;

    let response = send(&app, Method::POST, "/favorite/planet/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Referenced resource not found");

    let detail = body_json(send(&app, Method::GET, "/characters/1").await).await;
    assert_eq!(detail["favorites"], serde_json::json!([]));
    // Nothing was stored for the missing user, so a delete has nothing to remove
    let response = send(&app, Method::DELETE, "/favorite/planet/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_favorite_ids_return_json_404() {
    let app = seeded_app().await;

    let response = send(&app, Method::POST, "/favorite/planet/tatooine").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Planet not found");

    let response = send(&app, Method::DELETE, "/favorite/character/x").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Favorite not found");
}
