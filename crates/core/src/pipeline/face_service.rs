use std::time::Instant;

use thiserror::Error;

use crate::detection::domain::eye_detector::EyeDetector;
use crate::pipeline::face_analyzer::FaceAnalyzer;
use crate::recognition::domain::face_gallery::FaceGallery;
use crate::recognition::domain::known_face::{validate_name, NameError};
use crate::shared::constants::{DEFAULT_MATCH_THRESHOLD, SKETCH_URL_PREFIX, UNKNOWN_NAME};
use crate::shared::data_uri::{self, DataUriError};
use crate::shared::frame::Frame;
use crate::shared::image_codec::{decode_frame, ImageCodecError};
use crate::shared::region::{FaceLocation, Region};
use crate::sketch::domain::sketch_renderer::SketchRenderer;
use crate::sketch::domain::sketch_store::SketchStore;

pub const REGISTRATION_OK: &str = "Registration successful";

#[derive(Error, Debug, PartialEq)]
pub enum ServiceError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name contains characters that are not allowed: {0:?}")]
    InvalidName(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("No face detected in the uploaded image")]
    NoFaceInUpload,
    #[error("Face already registered")]
    AlreadyRegistered,
    #[error("Live face not detected. Please use a live camera.")]
    NotLive,
    #[error("No face detected")]
    NoFaceDetected,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<NameError> for ServiceError {
    fn from(e: NameError) -> Self {
        match e {
            NameError::Missing => ServiceError::NameRequired,
            NameError::Invalid(name) => ServiceError::InvalidName(name),
        }
    }
}

impl From<DataUriError> for ServiceError {
    fn from(e: DataUriError) -> Self {
        ServiceError::InvalidImage(e.to_string())
    }
}

impl From<ImageCodecError> for ServiceError {
    fn from(e: ImageCodecError) -> Self {
        ServiceError::InvalidImage(e.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecognizedFace {
    pub name: String,
    pub location: FaceLocation,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Recognition {
    pub faces: Vec<RecognizedFace>,
    pub sketch_url: String,
}

/// Enrollment and recognition over a gallery of known faces.
///
/// Every request is handled start to finish on the calling thread; callers
/// that share a service serialize access themselves.
pub struct FaceService {
    analyzer: FaceAnalyzer,
    gallery: Box<dyn FaceGallery>,
    eye_detector: Box<dyn EyeDetector>,
    renderer: Box<dyn SketchRenderer>,
    sketch_store: Box<dyn SketchStore>,
    match_threshold: f64,
}

impl FaceService {
    pub fn new(
        analyzer: FaceAnalyzer,
        gallery: Box<dyn FaceGallery>,
        eye_detector: Box<dyn EyeDetector>,
        renderer: Box<dyn SketchRenderer>,
        sketch_store: Box<dyn SketchStore>,
    ) -> Self {
        Self {
            analyzer,
            gallery,
            eye_detector,
            renderer,
            sketch_store,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }

    pub fn with_match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    pub fn known_face_count(&self) -> usize {
        self.gallery.known_faces().len()
    }

    /// Enrolls the first face in `image` under `name`.
    pub fn register(&mut self, name: &str, image: &str) -> Result<String, ServiceError> {
        let start = Instant::now();
        let name = validate_name(name)?;
        let frame = decode_image(image)?;

        let regions = self.analyzer.detect(&frame).map_err(internal)?;
        let Some(first) = regions.first() else {
            return Err(ServiceError::NoFaceInUpload);
        };
        let encoding = self.analyzer.encode(&frame, first).map_err(internal)?;

        if let Some(existing) = self.gallery.find_match(&encoding, self.match_threshold) {
            log::info!("Registration of {name:?} refused: matches {:?}", existing.name);
            return Err(ServiceError::AlreadyRegistered);
        }
        self.gallery
            .enroll(&name, &frame, encoding)
            .map_err(internal)?;

        log::info!(
            "Registered {name:?} in {:.1}ms",
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(REGISTRATION_OK.to_string())
    }

    /// Names every face in `image` and stores a sketch of the frame.
    pub fn recognize(&mut self, image: &str) -> Result<Recognition, ServiceError> {
        let start = Instant::now();
        let frame = decode_image(image)?;

        let t = Instant::now();
        let analyzed = self.analyzer.analyze(&frame).map_err(internal)?;
        log::debug!("analyze: {:.1}ms", t.elapsed().as_secs_f64() * 1000.0);

        let regions: Vec<Region> = analyzed.iter().map(|f| f.region.clone()).collect();
        if !self.eye_detector.eyes_visible(&frame, &regions) {
            log::info!("Recognition refused: no live eyes among {} faces", regions.len());
            return Err(ServiceError::NotLive);
        }
        if analyzed.is_empty() {
            return Err(ServiceError::NoFaceDetected);
        }

        let faces: Vec<RecognizedFace> = analyzed
            .iter()
            .map(|face| RecognizedFace {
                name: self
                    .gallery
                    .find_match(&face.encoding, self.match_threshold)
                    .map(|known| known.name.clone())
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                location: face.region.location(),
            })
            .collect();

        let t = Instant::now();
        let sketch = self.renderer.render(&frame).map_err(internal)?;
        let file_name = self.sketch_store.save(&sketch).map_err(internal)?;
        log::debug!(
            "sketch: {:.1}ms, {} bytes",
            t.elapsed().as_secs_f64() * 1000.0,
            sketch.len()
        );

        let names: Vec<&str> = faces.iter().map(|f| f.name.as_str()).collect();
        log::info!(
            "Recognized {names:?} in {:.1}ms",
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(Recognition {
            faces,
            sketch_url: format!("{SKETCH_URL_PREFIX}/{file_name}"),
        })
    }
}

fn decode_image(image: &str) -> Result<Frame, ServiceError> {
    let bytes = data_uri::decode(image)?;
    Ok(decode_frame(&bytes)?)
}

fn internal(e: Box<dyn std::error::Error>) -> ServiceError {
    log::error!("Internal failure: {e}");
    ServiceError::Internal(e.to_string())
}
