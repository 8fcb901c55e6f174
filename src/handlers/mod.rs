// Handlers module
// HTTP handlers for the REST API

pub mod characters;
pub mod favorites;
pub mod planets;
pub mod users;
pub mod vehicles;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use tracing::warn;

use crate::{error::ApiError, repository::SharedRepository, routes::ENDPOINTS};

/// Parses a path id. A segment that is not an `i32` cannot name any row,
/// so it reports `resource` as not found like a missing id does.
pub(crate) fn parse_id(raw: &str, resource: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::not_found(resource))
}

/// Health check handler
/// Returns "OK" while the backing store answers, 503 otherwise
pub async fn health_check(State(repo): State<SharedRepository>) -> impl IntoResponse {
    match repo.health_check().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
    }
}

/// GET /
/// HTML index of every endpoint; parameterless GET routes are clickable.
pub async fn sitemap() -> Html<String> {
    Html(render_sitemap())
}

fn render_sitemap() -> String {
    let items: String = ENDPOINTS
        .iter()
        .map(|endpoint| {
            let label = format!("{} {}", endpoint.method, endpoint.path);
            if endpoint.is_browsable() {
                format!("<li><a href='{}'>{}</a></li>", endpoint.path, label)
            } else {
                format!("<li>{}</li>", label)
            }
        })
        .collect();

    format!(
        "<div style=\"text-align: center;\"><h1>Catalog API</h1>\
         <p>Remember to specify a real endpoint path like:</p>\
         <ul style=\"text-align: left;\">{}</ul></div>",
        items
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sitemap_links_only_parameterless_gets() {
        let html = render_sitemap();

        assert!(html.contains("<a href='/characters'>GET /characters</a>"));
        assert!(html.contains("<a href='/users/favorites'>GET /users/favorites</a>"));
        assert!(html.contains("<li>GET /planets/:id</li>"));
        assert!(html.contains("<li>POST /favorite/planet/:id</li>"));
        assert!(!html.contains("href='/favorite"));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", "Planet").unwrap(), 42);
        assert_eq!(parse_id("abc", "Planet").unwrap_err().to_string(), "Planet not found");
        assert!(parse_id("99999999999", "Planet").is_err());
        assert!(parse_id("", "Planet").is_err());
    }
}
