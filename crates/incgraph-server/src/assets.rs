//! Static file serving using rust-embed

use axum::{
    body::Body,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// The visualization page, embedded at compile time
#[derive(RustEmbed)]
#[folder = "../../client"]
struct ClientAssets;

/// Serve an embedded asset, `index.html` for the root path
pub async fn static_handler(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match ClientAssets::get(path) {
        Some(content) => {
            let mime_type = mime_guess::from_path(path).first_or_text_plain();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime_type.as_ref().to_string())],
                Body::from(content.data),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_exist() {
        assert!(ClientAssets::get("index.html").is_some());
        assert!(ClientAssets::get("graph.js").is_some());
    }

    #[test]
    fn test_nonexistent_asset() {
        assert!(ClientAssets::get("nonexistent.file").is_none());
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let response = static_handler(Uri::from_static("/")).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
    }

    #[tokio::test]
    async fn test_missing_asset_is_404() {
        let response = static_handler(Uri::from_static("/missing.css"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
