use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::{
    reported_error, RecognizeReply, RecognizeRequest, RegisterReply, RegisterRequest,
    RECOGNIZE_PATH, REGISTER_PATH,
};
use crate::capture::CaptureSession;
use crate::presenter::Presenter;
use crate::transport::Transport;

pub const INVALID_NAME_PROMPT: &str = "Please enter a valid name";
pub const GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again.";
pub const NO_FACES: &str = "No faces detected";

/// How a user action ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the request.
    Completed,
    /// The server answered with an `error`.
    Rejected,
    /// Input was refused locally; nothing was sent.
    NotSent,
    /// The exchange itself failed.
    Failed,
}

/// Drives the register and recognize actions: capture, submit, present.
pub struct FaceClient {
    transport: Box<dyn Transport>,
    presenter: Box<dyn Presenter>,
}

impl FaceClient {
    pub fn new(transport: Box<dyn Transport>, presenter: Box<dyn Presenter>) -> Self {
        Self {
            transport,
            presenter,
        }
    }

    pub fn register(&mut self, name: &str, capture: &mut CaptureSession) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            self.presenter.alert(INVALID_NAME_PROMPT);
            return Outcome::NotSent;
        }
        let image = capture.capture_data_uri();

        let reply: RegisterReply =
            match self.exchange(REGISTER_PATH, &RegisterRequest { name, image: &image }) {
                Some(reply) => reply,
                None => return Outcome::Failed,
            };
        match reported_error(&reply.error) {
            Some(error) => {
                self.presenter.alert(&format!("Error: {error}"));
                Outcome::Rejected
            }
            None => {
                self.presenter
                    .alert(reply.message.as_deref().unwrap_or_default());
                Outcome::Completed
            }
        }
    }

    pub fn recognize(&mut self, capture: &mut CaptureSession) -> Outcome {
        let image = capture.capture_data_uri();

        let reply: RecognizeReply =
            match self.exchange(RECOGNIZE_PATH, &RecognizeRequest { image: &image }) {
                Some(reply) => reply,
                None => return Outcome::Failed,
            };
        if let Some(error) = reported_error(&reply.error) {
            self.presenter.render_result(&[error.to_string()]);
            return Outcome::Rejected;
        }

        let faces = reply.faces.unwrap_or_default();
        if faces.is_empty() {
            self.presenter.render_result(&[NO_FACES.to_string()]);
            return Outcome::Completed;
        }
        let lines: Vec<String> = faces
            .iter()
            .map(|face| format!("Detected: {}", face.name))
            .collect();
        self.presenter.render_result(&lines);
        if let Some(url) = reply.sketch_url.as_deref().filter(|u| !u.is_empty()) {
            self.presenter.show_sketch(url);
        }
        Outcome::Completed
    }

    /// Posts `body` and decodes the reply. Any failure is logged and shown
    /// as a single generic alert.
    fn exchange<B: Serialize, R: DeserializeOwned>(&mut self, path: &str, body: &B) -> Option<R> {
        let result = serde_json::to_value(body)
            .map_err(|e| e.to_string())
            .and_then(|body| {
                self.transport
                    .post_json(path, &body)
                    .map_err(|e| e.to_string())
            })
            .and_then(|reply: Value| {
                serde_json::from_value(reply).map_err(|e| format!("unexpected reply from {path}: {e}"))
            });
        match result {
            Ok(reply) => Some(reply),
            Err(e) => {
                log::error!("Error: {e}");
                self.presenter.alert(GENERIC_FAILURE);
                None
            }
        }
    }
}
