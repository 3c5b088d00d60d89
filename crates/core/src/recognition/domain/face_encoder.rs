use crate::recognition::domain::face_encoding::FaceEncoding;
use crate::shared::frame::Frame;

/// Domain interface for turning a face crop into an identity embedding.
pub trait FaceEncoder: Send {
    fn encode(&self, face: &Frame) -> Result<FaceEncoding, Box<dyn std::error::Error>>;
}
