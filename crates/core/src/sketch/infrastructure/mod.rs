pub mod canny;
pub mod directory_sketch_store;
pub mod edge_sketch_renderer;
pub mod gaussian;
pub mod jpeg_budget;
