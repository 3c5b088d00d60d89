use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum ImageCodecError {
    #[error("image data is empty")]
    Empty,
    #[error("unsupported channel count: {0}")]
    Channels(u8),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Decodes any format the `image` crate recognizes into an RGB frame.
pub fn decode_frame(bytes: &[u8]) -> Result<Frame, ImageCodecError> {
    if bytes.is_empty() {
        return Err(ImageCodecError::Empty);
    }
    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Frame::new(rgb.into_raw(), width, height, 3))
}

/// Encodes a gray or RGB frame as baseline JPEG at the given quality (1-100).
pub fn encode_jpeg(frame: &Frame, quality: u8) -> Result<Vec<u8>, ImageCodecError> {
    let color = match frame.channels() {
        1 => ExtendedColorType::L8,
        3 => ExtendedColorType::Rgb8,
        n => return Err(ImageCodecError::Channels(n)),
    };
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100)).encode(
        frame.data(),
        frame.width(),
        frame.height(),
        color,
    )?;
    Ok(buf)
}
