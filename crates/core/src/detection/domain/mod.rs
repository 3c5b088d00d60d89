pub mod eye_detector;
pub mod face_detector;
pub mod face_landmarks;
