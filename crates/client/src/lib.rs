pub mod api;
pub mod capture;
pub mod client;
pub mod presenter;
pub mod transport;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8002";
