//! `data:` URI handling for images carried inside JSON payloads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataUriError {
    #[error("data URI has no payload separator")]
    Malformed,
    #[error("data URI payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Decodes the base64 payload following the first comma.
///
/// The media type is not checked; whatever was encoded is returned and the
/// image decoder decides whether it is usable.
pub fn decode(uri: &str) -> Result<Vec<u8>, DataUriError> {
    let (_, payload) = uri.split_once(',').ok_or(DataUriError::Malformed)?;
    Ok(STANDARD.decode(payload.trim())?)
}

pub fn encode(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_jpeg_uri() {
        let bytes = decode("data:image/jpeg;base64,/9j/4A==").unwrap();
        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[test]
    fn test_decode_ignores_media_type() {
        let bytes = decode("anything,aGk=").unwrap();
        assert_eq!(bytes, b"hi");
    }

    #[test]
    fn test_decode_without_comma_is_malformed() {
        assert!(matches!(
            decode("data:image/jpeg;base64"),
            Err(DataUriError::Malformed)
        ));
    }

    #[test]
    fn test_decode_empty_canvas_uri_yields_no_bytes() {
        // A zero-sized canvas encodes as "data:,".
        assert!(decode("data:,").unwrap().is_empty());
    }

    #[test]
    fn test_decode_invalid_base64() {
        assert!(matches!(
            decode("data:image/jpeg;base64,@@@"),
            Err(DataUriError::Base64(_))
        ));
    }

    #[test]
    fn test_encode_prefixes_mime() {
        assert_eq!(encode(b"hi", "image/jpeg"), "data:image/jpeg;base64,aGk=");
    }
}
