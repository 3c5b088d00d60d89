pub mod face_encoder;
pub mod face_encoding;
pub mod face_gallery;
pub mod known_face;
