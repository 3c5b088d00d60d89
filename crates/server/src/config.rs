use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use facegate_core::detection::infrastructure::onnx_yolo_detector::DEFAULT_CONFIDENCE;
use facegate_core::shared::constants::{
    DEFAULT_KNOWN_FACES_DIR, DEFAULT_MATCH_THRESHOLD, DEFAULT_STATIC_DIR, SKETCH_SUBDIR,
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8002;
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Face enrollment and recognition server.
///
/// Flags given on the command line override values from `--config`.
#[derive(Parser, Debug, Default)]
#[command(name = "facegate-server")]
pub struct ServerArgs {
    /// JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to bind [default: 0.0.0.0].
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on [default: 8002].
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory of `<name>.jpg` enrollment images [default: known_faces].
    #[arg(long)]
    pub known_faces_dir: Option<PathBuf>,

    /// Directory served under /static; sketches go to its `sketches/` [default: static].
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Face detection confidence threshold (0.0-1.0) [default: 0.5].
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Minimum cosine similarity for a match (0.0-1.0) [default: 0.4].
    #[arg(long)]
    pub match_threshold: Option<f64>,

    /// Largest accepted request body in bytes [default: 10 MiB].
    #[arg(long)]
    pub max_body_bytes: Option<usize>,

    /// Directory holding pre-provisioned ONNX models.
    #[arg(long)]
    pub model_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub known_faces_dir: PathBuf,
    pub static_dir: PathBuf,
    pub confidence: f64,
    pub match_threshold: f64,
    pub max_body_bytes: usize,
    pub model_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            known_faces_dir: PathBuf::from(DEFAULT_KNOWN_FACES_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            confidence: DEFAULT_CONFIDENCE,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            model_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config {}: {e}", path.display()))?;
        let config = serde_json::from_str(&json)
            .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.port == 0 {
            return Err("Port must be non-zero".into());
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!(
                "Confidence must be between 0.0 and 1.0, got {}",
                self.confidence
            )
            .into());
        }
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(format!(
                "Match threshold must be between 0.0 and 1.0, got {}",
                self.match_threshold
            )
            .into());
        }
        if self.max_body_bytes == 0 {
            return Err("Max body bytes must be positive".into());
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn sketch_dir(&self) -> PathBuf {
        self.static_dir.join(SKETCH_SUBDIR)
    }
}

impl ServerArgs {
    /// Loads `--config` (or defaults) and applies the explicit flags on top.
    pub fn into_config(self) -> Result<ServerConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = self.known_faces_dir {
            config.known_faces_dir = dir;
        }
        if let Some(dir) = self.static_dir {
            config.static_dir = dir;
        }
        if let Some(confidence) = self.confidence {
            config.confidence = confidence;
        }
        if let Some(threshold) = self.match_threshold {
            config.match_threshold = threshold;
        }
        if let Some(bytes) = self.max_body_bytes {
            config.max_body_bytes = bytes;
        }
        if self.model_dir.is_some() {
            config.model_dir = self.model_dir;
        }
        Ok(config)
    }
}
