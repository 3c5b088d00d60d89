pub mod face_analyzer;
pub mod face_service;
