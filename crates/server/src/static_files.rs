use std::path::{Component, Path, PathBuf};

use axum::extract::{self, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::response::{error_response, Endpoint};
use crate::routes::AppState;

const FALLBACK_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head><title>FaceGate</title></head>
<body>
<h1>FaceGate</h1>
<p>Server is running. No index.html was found in the static directory.</p>
<ul>
<li>POST /register - {"name": ..., "image": "data:image/jpeg;base64,..."}</li>
<li>POST /recognize - {"image": "data:image/jpeg;base64,..."}</li>
<li>GET /static/sketches/... - generated sketches</li>
</ul>
</body>
</html>"#;

pub async fn index(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(state.static_dir.join("index.html")).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => Html(FALLBACK_INDEX).into_response(),
    }
}

pub async fn asset(State(state): State<AppState>, extract::Path(path): extract::Path<String>) -> Response {
    let Some(file) = resolve(&state.static_dir, &path) else {
        log::warn!("Rejected static path {path:?}");
        return not_found();
    };
    match tokio::fs::read(&file).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&file))], bytes).into_response(),
        Err(_) => not_found(),
    }
}

/// Joins a request path onto `root`, refusing anything but plain segments.
pub fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path);
    let mut resolved = root.to_path_buf();
    let mut segments = 0;
    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                resolved.push(segment);
                segments += 1;
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    (segments > 0).then_some(resolved)
}

pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "js" => "application/javascript",
        "css" => "text/css",
        "json" => "application/json",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found", Endpoint::Static)
}
