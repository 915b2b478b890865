//! Frontend host
//!
//! Non-API paths are served from the configured static directory. Paths that
//! are not files fall back to `index.html`, with the status decided by the
//! view route so unknown pages come back as 404.

use std::path::{Component, Path, PathBuf};

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;
use s3b_core::ViewRoute;

use crate::state::AppState;

const INDEX_FILE: &str = "index.html";

/// Fallback handler for everything outside `/api`
pub async fn serve_frontend(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let route = ViewRoute::resolve(uri.path());
    let status = if route.is_found() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    let Some(root) = state.config.server.static_dir.as_deref() else {
        tracing::debug!(route = %route, "No static directory configured");
        return (status, format!("s3-browser: {}", route.name())).into_response();
    };

    if let Some(file) = asset_path(root, uri.path())
        && let Some(response) = read_file(&file, StatusCode::OK).await
    {
        return response;
    }

    match read_file(&root.join(INDEX_FILE), status).await {
        Some(response) => response,
        None => {
            tracing::warn!(dir = %root.display(), "index.html missing from static directory");
            (status, format!("s3-browser: {}", route.name())).into_response()
        }
    }
}

/// Map a request path to a file below `root`, refusing anything that could
/// leave it
fn asset_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    let relative = Path::new(decoded.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }

    let mut path = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => path.push(part),
            _ => return None,
        }
    }
    Some(path)
}

async fn read_file(path: &Path, status: StatusCode) -> Option<Response> {
    let metadata = tokio::fs::metadata(path).await.ok()?;
    if !metadata.is_file() {
        return None;
    }

    let data = tokio::fs::read(path)
        .await
        .inspect_err(|e| tracing::error!(path = %path.display(), error = %e, "Failed to read asset"))
        .ok()?;

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let mut response = (status, Body::from(data)).into_response();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_path_stays_below_root() {
        let root = Path::new("/srv/www");
        assert_eq!(
            asset_path(root, "/assets/app.js"),
            Some(PathBuf::from("/srv/www/assets/app.js"))
        );
        assert_eq!(asset_path(root, "/"), None);
        assert_eq!(asset_path(root, "/../etc/passwd"), None);
        assert_eq!(asset_path(root, "/assets/../../secret"), None);
        assert_eq!(asset_path(root, "/%2e%2e/etc/passwd"), None);
    }

    #[test]
    fn test_asset_path_decodes_escapes() {
        assert_eq!(
            asset_path(Path::new("/srv/www"), "/assets/my%20logo.svg"),
            Some(PathBuf::from("/srv/www/assets/my logo.svg"))
        );
    }
}
