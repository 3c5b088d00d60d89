use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, RgbImage};
use thiserror::Error;

pub const CAPTURE_JPEG_QUALITY: u8 = 92;

/// What a zero-sized capture encodes to; the server rejects it as an image.
pub const EMPTY_DATA_URI: &str = "data:,";

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("capture source is not open")]
    NotOpen,
    #[error("cannot encode frame: {0}")]
    Encode(#[from] image::ImageError),
}

/// A camera-like device that yields still frames once opened.
pub trait FrameSource {
    fn open(&mut self) -> Result<(), CaptureError>;
    fn grab(&mut self) -> Result<RgbImage, CaptureError>;
}

/// Stands in for a webcam by yielding the still image stored in a file.
pub struct ImageFileSource {
    path: PathBuf,
    image: Option<RgbImage>,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            image: None,
        }
    }
}

impl FrameSource for ImageFileSource {
    fn open(&mut self) -> Result<(), CaptureError> {
        let image = image::open(&self.path).map_err(|source| CaptureError::Open {
            path: self.path.clone(),
            source,
        })?;
        self.image = Some(image.to_rgb8());
        Ok(())
    }

    fn grab(&mut self) -> Result<RgbImage, CaptureError> {
        self.image.clone().ok_or(CaptureError::NotOpen)
    }
}

/// An opened (or failed) capture device.
///
/// A source that fails to open is logged and kept closed; every capture from
/// it is then zero-sized.
pub struct CaptureSession {
    source: Box<dyn FrameSource>,
    live: bool,
}

impl CaptureSession {
    pub fn start(mut source: Box<dyn FrameSource>) -> Self {
        let live = match source.open() {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error accessing camera: {e}");
                false
            }
        };
        Self { source, live }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Current frame as a `data:image/jpeg;base64,...` URI.
    pub fn capture_data_uri(&mut self) -> String {
        if !self.live {
            return EMPTY_DATA_URI.to_string();
        }
        match self.source.grab().and_then(|frame| encode_data_uri(&frame)) {
            Ok(uri) => uri,
            Err(e) => {
                log::error!("Capture failed: {e}");
                EMPTY_DATA_URI.to_string()
            }
        }
    }
}

pub fn encode_data_uri(frame: &RgbImage) -> Result<String, CaptureError> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return Ok(EMPTY_DATA_URI.to_string());
    }
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, CAPTURE_JPEG_QUALITY).encode(
        frame.as_raw(),
        width,
        height,
        ExtendedColorType::Rgb8,
    )?;
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg)))
}
