use crate::shared::frame::Frame;

/// Renders a line-drawing sketch of a frame, returned as encoded JPEG bytes.
pub trait SketchRenderer: Send {
    fn render(&self, frame: &Frame) -> Result<Vec<u8>, Box<dyn std::error::Error>>;
}
