use crate::detection::domain::face_detector::FaceDetector;
use crate::recognition::domain::face_encoder::FaceEncoder;
use crate::recognition::domain::face_encoding::FaceEncoding;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// A detected face together with its embedding.
#[derive(Clone, Debug)]
pub struct AnalyzedFace {
    pub region: Region,
    pub encoding: FaceEncoding,
}

/// Detector + encoder pair: finds faces and embeds square crops of them.
pub struct FaceAnalyzer {
    detector: Box<dyn FaceDetector>,
    encoder: Box<dyn FaceEncoder>,
}

impl FaceAnalyzer {
    pub fn new(detector: Box<dyn FaceDetector>, encoder: Box<dyn FaceEncoder>) -> Self {
        Self { detector, encoder }
    }

    pub fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        self.detector.detect(frame)
    }

    /// Encodes a square crop centred on `region`, clamped to the frame.
    pub fn encode(
        &self,
        frame: &Frame,
        region: &Region,
    ) -> Result<FaceEncoding, Box<dyn std::error::Error>> {
        let crop = frame.square_crop(region);
        if crop.is_empty() {
            return Err(format!(
                "face region {}x{} at ({}, {}) lies outside the frame",
                region.width, region.height, region.x, region.y
            )
            .into());
        }
        self.encoder.encode(&crop)
    }

    /// Detects every face and encodes each one.
    pub fn analyze(&mut self, frame: &Frame) -> Result<Vec<AnalyzedFace>, Box<dyn std::error::Error>> {
        let regions = self.detect(frame)?;
        regions
            .into_iter()
            .map(|region| {
                let encoding = self.encode(frame, &region)?;
                Ok(AnalyzedFace { region, encoding })
            })
            .collect()
    }

    /// Encodes only the most confident face, or `None` when there is none.
    pub fn encode_first(
        &mut self,
        frame: &Frame,
    ) -> Result<Option<FaceEncoding>, Box<dyn std::error::Error>> {
        let regions = self.detect(frame)?;
        regions.first().map(|r| self.encode(frame, r)).transpose()
    }
}
