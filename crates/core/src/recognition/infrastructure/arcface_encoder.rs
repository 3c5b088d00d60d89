//! ArcFace identity encoder using ONNX Runtime.
//!
//! Produces 512-d embeddings whose cosine similarity separates identities
//! far better than pixel statistics.
use std::path::Path;
use std::sync::Mutex;

use crate::detection::infrastructure::onnx_session::load_session;
use crate::recognition::domain::face_encoder::FaceEncoder;
use crate::recognition::domain::face_encoding::FaceEncoding;
use crate::shared::frame::Frame;

const INPUT_SIZE: usize = 112;
const NORM_MEAN: f32 = 127.5;
const NORM_STD: f32 = 127.5;

pub struct ArcFaceEncoder {
    session: Mutex<ort::session::Session>,
}

impl ArcFaceEncoder {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            session: Mutex::new(load_session(model_path)?),
        })
    }
}

impl FaceEncoder for ArcFaceEncoder {
    fn encode(&self, face: &Frame) -> Result<FaceEncoding, Box<dyn std::error::Error>> {
        if face.is_empty() || face.channels() != 3 {
            return Err(format!(
                "ArcFace needs a non-empty RGB crop, got {}x{}x{}",
                face.width(),
                face.height(),
                face.channels()
            )
            .into());
        }
        let tensor = preprocess(face.data(), face.width(), face.height());
        let input_value = ort::value::Tensor::from_array(tensor)?;
        let mut session = self
            .session
            .lock()
            .map_err(|e| format!("Lock poisoned: {e}"))?;
        let outputs = session.run(ort::inputs![input_value])?;
        let embedding_array = outputs[0].try_extract_array::<f32>()?;
        let embedding_slice = embedding_array
            .as_slice()
            .ok_or("Cannot get embedding slice")?;

        Ok(FaceEncoding::new(embedding_slice.to_vec()))
    }
}

/// Resize crop to 112x112, normalize, NCHW layout.
fn preprocess(rgb_data: &[u8], width: u32, height: u32) -> ndarray::Array4<f32> {
    let src_w = width as usize;
    let src_h = height as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, INPUT_SIZE, INPUT_SIZE));

    for y in 0..INPUT_SIZE {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / INPUT_SIZE as f64) as usize).min(src_h - 1);
        for x in 0..INPUT_SIZE {
            let src_x =
                (((x as f64 + 0.5) * src_w as f64 / INPUT_SIZE as f64) as usize).min(src_w - 1);
            let offset = (src_y * src_w + src_x) * 3;
            for c in 0..3 {
                tensor[[0, c, y, x]] = (rgb_data[offset + c] as f32 - NORM_MEAN) / NORM_STD;
            }
        }
    }

    tensor
}
