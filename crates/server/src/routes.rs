use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use facegate_core::pipeline::face_service::{FaceService, ServiceError};

use crate::response::{
    error_response, service_error_response, Endpoint, MessageResponse, RecognizeResponse,
};
use crate::static_files;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<Mutex<FaceService>>,
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(service: FaceService, static_dir: PathBuf) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
            static_dir: Arc::new(static_dir),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecognizeRequest {
    #[serde(default)]
    pub image: Option<String>,
}

pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(static_files::index))
        .route("/static/{*path}", get(static_files::asset))
        .route("/register", post(register))
        .route("/recognize", post(recognize))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, Endpoint::Register),
    };
    let name = request.name.unwrap_or_default();
    let image = request.image.unwrap_or_default();

    match with_service(&state, move |service| service.register(&name, &image)).await {
        Ok(message) => {
            log::info!("POST /register -> 200");
            Json(MessageResponse { message }).into_response()
        }
        Err(e) => {
            log::info!("POST /register -> {}: {e}", crate::response::status_for(&e));
            service_error_response(&e, Endpoint::Register)
        }
    }
}

pub async fn recognize(
    State(state): State<AppState>,
    payload: Result<Json<RecognizeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, Endpoint::Recognize),
    };
    let image = request.image.unwrap_or_default();

    match with_service(&state, move |service| service.recognize(&image)).await {
        Ok(recognition) => {
            log::info!("POST /recognize -> 200 ({} faces)", recognition.faces.len());
            Json(RecognizeResponse::from(recognition)).into_response()
        }
        Err(e) => {
            log::info!("POST /recognize -> {}: {e}", crate::response::status_for(&e));
            service_error_response(&e, Endpoint::Recognize)
        }
    }
}

/// Runs `f` against the locked service on the blocking pool.
async fn with_service<T, F>(state: &AppState, f: F) -> Result<T, ServiceError>
where
    T: Send + 'static,
    F: FnOnce(&mut FaceService) -> Result<T, ServiceError> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || {
        let mut guard = service
            .lock()
            .map_err(|_| ServiceError::Internal("face service lock poisoned".to_string()))?;
        f(&mut guard)
    })
    .await
    .unwrap_or_else(|e| {
        log::error!("Worker task failed: {e}");
        Err(ServiceError::Internal(format!("worker task failed: {e}")))
    })
}

fn rejection_response(rejection: JsonRejection, endpoint: Endpoint) -> Response {
    let status = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    log::info!("Rejected request body ({status}): {}", rejection.body_text());
    error_response(status, rejection.body_text(), endpoint)
}
