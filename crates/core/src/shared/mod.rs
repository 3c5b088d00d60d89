pub mod constants;
pub mod data_uri;
pub mod frame;
pub mod image_codec;
pub mod model_resolver;
pub mod region;
