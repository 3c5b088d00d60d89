pub mod arcface_encoder;
pub mod directory_gallery;
