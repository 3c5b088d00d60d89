use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("response from {url} is not JSON: {message}")]
    Decode { url: String, message: String },
    #[error("cannot build HTTP client: {0}")]
    Client(String),
}

/// Sends a JSON body to a server path and returns the parsed JSON reply.
pub trait Transport {
    fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError>;
}

/// Blocking HTTP transport. The reply body is parsed whatever the status
/// code, since the server reports application errors as JSON.
///
/// Requests never time out: the server queues inference, so a reply may
/// take arbitrarily long.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| TransportError::Request {
                url: url.clone(),
                message: e.to_string(),
            })?;
        log::debug!("POST {url} -> {}", response.status());
        response.json::<Value>().map_err(|e| TransportError::Decode {
            url,
            message: e.to_string(),
        })
    }
}
