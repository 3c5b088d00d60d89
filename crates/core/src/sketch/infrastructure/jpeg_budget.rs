use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};

use crate::shared::frame::Frame;
use crate::shared::image_codec::{encode_jpeg, ImageCodecError};

const START_QUALITY: u8 = 90;
const QUALITY_STEP: u8 = 10;
const MIN_QUALITY: u8 = 10;
const SHRINK_FACTOR: f64 = 0.9;

/// Encodes `frame` as JPEG no larger than `max_bytes` where possible.
///
/// Quality drops from 90 in steps of 10 down to 10, then the scale applied to
/// the full-size frame shrinks by 10% per step. A 1x1 image is returned even
/// if it is still too big.
pub fn encode_within_budget(frame: &Frame, max_bytes: usize) -> Result<Vec<u8>, ImageCodecError> {
    let mut quality = START_QUALITY;
    let mut scale = 1.0;
    let mut current = frame.clone();
    loop {
        let jpeg = encode_jpeg(&current, quality)?;
        if jpeg.len() <= max_bytes || (current.width() <= 1 && current.height() <= 1) {
            log::debug!(
                "Sketch encoded at {}x{} q{}: {} bytes",
                current.width(),
                current.height(),
                quality,
                jpeg.len()
            );
            return Ok(jpeg);
        }
        if quality > MIN_QUALITY {
            quality -= QUALITY_STEP;
        } else {
            scale *= SHRINK_FACTOR;
            current = resize(frame, scaled(frame.width(), scale), scaled(frame.height(), scale))?;
        }
    }
}

fn scaled(side: u32, scale: f64) -> u32 {
    ((side as f64 * scale).round() as u32).max(1)
}

fn resize(frame: &Frame, width: u32, height: u32) -> Result<Frame, ImageCodecError> {
    let (w, h) = (frame.width(), frame.height());
    match frame.channels() {
        1 => {
            let img = GrayImage::from_raw(w, h, frame.data().to_vec()).ok_or(ImageCodecError::Empty)?;
            let out = imageops::resize(&img, width, height, FilterType::Triangle);
            Ok(Frame::new(out.into_raw(), width, height, 1))
        }
        3 => {
            let img = RgbImage::from_raw(w, h, frame.data().to_vec()).ok_or(ImageCodecError::Empty)?;
            let out = imageops::resize(&img, width, height, FilterType::Triangle);
            Ok(Frame::new(out.into_raw(), width, height, 3))
        }
        n => Err(ImageCodecError::Channels(n)),
    }
}
