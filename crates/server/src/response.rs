//! JSON bodies returned by the HTTP endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use facegate_core::pipeline::face_service::{Recognition, ServiceError};
use facegate_core::shared::region::FaceLocation;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Present (always `false`) on `/recognize` errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

#[derive(Debug, Serialize)]
pub struct FaceResponse {
    pub name: String,
    pub location: LocationResponse,
}

#[derive(Debug, Serialize)]
pub struct RecognizeResponse {
    pub success: bool,
    pub faces: Vec<FaceResponse>,
    pub sketch_url: String,
}

impl From<FaceLocation> for LocationResponse {
    fn from(l: FaceLocation) -> Self {
        Self {
            top: l.top,
            right: l.right,
            bottom: l.bottom,
            left: l.left,
        }
    }
}

impl From<Recognition> for RecognizeResponse {
    fn from(r: Recognition) -> Self {
        Self {
            success: true,
            faces: r
                .faces
                .into_iter()
                .map(|f| FaceResponse {
                    name: f.name,
                    location: f.location.into(),
                })
                .collect(),
            sketch_url: r.sketch_url,
        }
    }
}

/// Which endpoint an error body is for; `/recognize` adds `success: false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Recognize,
    Static,
}

pub fn status_for(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::NameRequired | ServiceError::InvalidName(_) | ServiceError::InvalidImage(_) => {
            StatusCode::BAD_REQUEST
        }
        ServiceError::AlreadyRegistered => StatusCode::CONFLICT,
        ServiceError::NoFaceInUpload | ServiceError::NotLive | ServiceError::NoFaceDetected => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(status: StatusCode, message: impl Into<String>, endpoint: Endpoint) -> Response {
    let body = ErrorResponse {
        success: (endpoint == Endpoint::Recognize).then_some(false),
        error: message.into(),
    };
    (status, Json(body)).into_response()
}

pub fn service_error_response(error: &ServiceError, endpoint: Endpoint) -> Response {
    error_response(status_for(error), error.to_string(), endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facegate_core::pipeline::face_service::RecognizedFace;
    use rstest::rstest;

    #[rstest]
    #[case(ServiceError::NameRequired, StatusCode::BAD_REQUEST)]
    #[case(ServiceError::InvalidName("a/b".into()), StatusCode::BAD_REQUEST)]
    #[case(ServiceError::InvalidImage("bad".into()), StatusCode::BAD_REQUEST)]
    #[case(ServiceError::AlreadyRegistered, StatusCode::CONFLICT)]
    #[case(ServiceError::NoFaceInUpload, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(ServiceError::NotLive, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(ServiceError::NoFaceDetected, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(ServiceError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_for(#[case] error: ServiceError, #[case] expected: StatusCode) {
        assert_eq!(status_for(&error), expected);
    }

    #[test]
    fn test_error_body_shape_per_endpoint() {
        let register = ErrorResponse {
            success: None,
            error: "Name is required".into(),
        };
        assert_eq!(
            serde_json::to_value(&register).unwrap(),
            serde_json::json!({"error": "Name is required"})
        );
        let recognize = ErrorResponse {
            success: Some(false),
            error: "No face detected".into(),
        };
        assert_eq!(
            serde_json::to_value(&recognize).unwrap(),
            serde_json::json!({"success": false, "error": "No face detected"})
        );
    }

    #[test]
    fn test_recognize_response_wire_shape() {
        let response = RecognizeResponse::from(Recognition {
            faces: vec![RecognizedFace {
                name: "Alice".into(),
                location: FaceLocation {
                    top: 1,
                    right: 40,
                    bottom: 50,
                    left: 10,
                },
            }],
            sketch_url: "/static/sketches/sketch_20240101000000.jpg".into(),
        });
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "success": true,
                "faces": [{"name": "Alice", "location": {"top": 1, "right": 40, "bottom": 50, "left": 10}}],
                "sketch_url": "/static/sketches/sketch_20240101000000.jpg"
            })
        );
    }
}
