use crate::shared::constants::MAX_SKETCH_BYTES;
use crate::shared::frame::Frame;
use crate::sketch::domain::sketch_renderer::SketchRenderer;
use crate::sketch::infrastructure::canny::canny;
use crate::sketch::infrastructure::gaussian::{gaussian_kernel_1d, separable_gaussian_blur};
use crate::sketch::infrastructure::jpeg_budget::encode_within_budget;

pub const DEFAULT_BLUR_KERNEL: usize = 5;
pub const DEFAULT_LOW_THRESHOLD: f64 = 30.0;
pub const DEFAULT_HIGH_THRESHOLD: f64 = 70.0;

/// Line-drawing sketch: grayscale, Gaussian blur, Canny edges, then JPEG
/// under a byte budget.
pub struct EdgeSketchRenderer {
    kernel: Vec<f32>,
    low_threshold: f64,
    high_threshold: f64,
    max_bytes: usize,
}

impl EdgeSketchRenderer {
    pub fn new(blur_kernel: usize, low_threshold: f64, high_threshold: f64, max_bytes: usize) -> Self {
        Self {
            kernel: gaussian_kernel_1d(blur_kernel, 0.0),
            low_threshold,
            high_threshold,
            max_bytes,
        }
    }

    /// The binary edge map, before compression.
    pub fn edges(&self, frame: &Frame) -> Frame {
        let gray = frame.to_gray();
        let (width, height) = (gray.width(), gray.height());
        let mut data = gray.into_data();
        separable_gaussian_blur(&mut data, width as usize, height as usize, 1, &self.kernel);
        let edges = canny(
            &data,
            width as usize,
            height as usize,
            self.low_threshold,
            self.high_threshold,
        );
        Frame::new(edges, width, height, 1)
    }
}

impl Default for EdgeSketchRenderer {
    fn default() -> Self {
        Self::new(
            DEFAULT_BLUR_KERNEL,
            DEFAULT_LOW_THRESHOLD,
            DEFAULT_HIGH_THRESHOLD,
            MAX_SKETCH_BYTES,
        )
    }
}

impl SketchRenderer for EdgeSketchRenderer {
    fn render(&self, frame: &Frame) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        if frame.is_empty() {
            return Err("cannot sketch an empty frame".into());
        }
        let edges = self.edges(frame);
        Ok(encode_within_budget(&edges, self.max_bytes)?)
    }
}
