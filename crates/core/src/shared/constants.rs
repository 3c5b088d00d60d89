pub const YOLO_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const YOLO_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

pub const EMBEDDING_MODEL_NAME: &str = "w600k_r50.onnx";
pub const EMBEDDING_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/w600k_r50.onnx";

pub const DEFAULT_KNOWN_FACES_DIR: &str = "known_faces";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const SKETCH_SUBDIR: &str = "sketches";
pub const SKETCH_URL_PREFIX: &str = "/static/sketches";

/// Minimum cosine similarity for two ArcFace encodings to name the same person.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.4;

pub const MAX_SKETCH_BYTES: usize = 10 * 1024;

pub const UNKNOWN_NAME: &str = "Unknown";
