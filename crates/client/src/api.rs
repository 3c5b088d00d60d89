//! JSON bodies exchanged with the server.

use serde::{Deserialize, Serialize};

pub const REGISTER_PATH: &str = "/register";
pub const RECOGNIZE_PATH: &str = "/recognize";

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub image: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RecognizeRequest<'a> {
    pub image: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FaceReply {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecognizeReply {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub faces: Option<Vec<FaceReply>>,
    #[serde(default)]
    pub sketch_url: Option<String>,
}

/// An `error` field counts only when it is a non-empty string.
pub fn reported_error(error: &Option<String>) -> Option<&str> {
    error.as_deref().filter(|e| !e.is_empty())
}
