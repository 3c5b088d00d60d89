pub mod sketch_renderer;
pub mod sketch_store;
