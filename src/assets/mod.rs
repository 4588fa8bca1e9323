//! Static asset serving with single-page fallback.
//!
//! # Responsibilities
//! - Serve the prebuilt UI tree for every non-API path
//! - Fall back to the index document for extensionless misses, so
//!   client-side-routed paths like `/dashboard/settings` load the app
//! - Return 404 for missing asset files and for directory paths; no listing
//!   is ever produced

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

/// Serves the bundled, read-only asset tree.
pub struct StaticAssets {
    root: PathBuf,
    index: PathBuf,
}

impl StaticAssets {
    pub fn new(root: PathBuf, index: &str) -> Self {
        let index = root.join(index);
        Self { root, index }
    }

    /// Path of the index document, for startup verification.
    pub fn index_path(&self) -> &Path {
        &self.index
    }

    /// Serve a file from the asset tree, applying single-page fallback.
    pub async fn serve(&self, request: Request<Body>) -> Response {
        let path = request.uri().path().to_string();

        // Directory browse attempts get 404, never a listing. The root
        // itself is exempt; it falls through to the index document.
        if path != "/" && self.is_directory(&path).await {
            return StatusCode::NOT_FOUND.into_response();
        }

        let serve_dir = ServeDir::new(&self.root).append_index_html_on_directories(false);
        let response = match serve_dir.oneshot(request).await {
            Ok(response) => response,
            Err(infallible) => match infallible {},
        };
        if response.status() != StatusCode::NOT_FOUND {
            return response.map(Body::new);
        }

        // A miss that looks like an asset request is a genuine 404; anything
        // else is a client-side route and gets the index document.
        if has_file_extension(&path) {
            return StatusCode::NOT_FOUND.into_response();
        }
        self.serve_index().await
    }

    async fn serve_index(&self) -> Response {
        let request = Request::get("/")
            .body(Body::empty())
            .expect("static GET request is valid");
        match ServeFile::new(&self.index).oneshot(request).await {
            Ok(response) => response.map(Body::new),
            Err(infallible) => match infallible {},
        }
    }

    async fn is_directory(&self, path: &str) -> bool {
        let trimmed = path.trim_start_matches('/');
        if trimmed.is_empty() || trimmed.split('/').any(|segment| segment == "..") {
            return false;
        }
        match tokio::fs::metadata(self.root.join(trimmed)).await {
            Ok(metadata) => metadata.is_dir(),
            Err(_) => false,
        }
    }
}

/// True when the final path segment carries a file extension.
fn has_file_extension(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> (StaticAssets, PathBuf) {
        let dir = std::env::temp_dir().join(format!("rizgate-assets-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("assets")).unwrap();
        std::fs::write(dir.join("index.html"), "<html>riz dashboard</html>").unwrap();
        std::fs::write(dir.join("assets").join("app.js"), "console.log('riz')").unwrap();
        (StaticAssets::new(dir.clone(), "index.html"), dir)
    }

    async fn get(assets: &StaticAssets, path: &str) -> (StatusCode, String) {
        let request = Request::get(path).body(Body::empty()).unwrap();
        let response = assets.serve(request).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn exact_files_are_served() {
        let (assets, dir) = site();
        let (status, body) = get(&assets, "/assets/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log('riz')");
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn root_and_extensionless_paths_get_the_index_document() {
        let (assets, dir) = site();

        let (status, body) = get(&assets, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>riz dashboard</html>");

        let (status, body) = get(&assets, "/dashboard/settings").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>riz dashboard</html>");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn missing_asset_files_are_not_found() {
        let (assets, dir) = site();
        let (status, _) = get(&assets, "/assets/missing.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn directory_paths_are_not_listed() {
        let (assets, dir) = site();
        let (status, body) = get(&assets, "/assets").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!body.contains("app.js"));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
