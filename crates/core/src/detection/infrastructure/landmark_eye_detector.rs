use crate::detection::domain::eye_detector::EyeDetector;
use crate::detection::infrastructure::math::mean_std;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Smallest eye patch side, in pixels, that is inspected at all.
pub const DEFAULT_MIN_EYE_SIZE: u32 = 30;

/// Minimum gray-level standard deviation for a patch to count as an eye.
pub const DEFAULT_MIN_CONTRAST: f64 = 18.0;

/// Eye patch side relative to face box width.
const EYE_TO_FACE_RATIO: f64 = 0.25;

/// Liveness check driven by detector landmarks.
///
/// Inspects a square patch around every visible eye landmark. An eye is
/// present when the patch is large enough and shows enough local contrast
/// (iris, lid and sclera edges); flat patches are rejected.
pub struct LandmarkEyeDetector {
    min_eye_size: u32,
    min_contrast: f64,
}

impl LandmarkEyeDetector {
    pub fn new(min_eye_size: u32, min_contrast: f64) -> Self {
        Self {
            min_eye_size,
            min_contrast,
        }
    }

    fn eye_present(&self, gray: &Frame, face: &Region, eye: (f64, f64)) -> bool {
        let side = (face.width as f64 * EYE_TO_FACE_RATIO).round() as i64;
        if side < self.min_eye_size as i64 {
            return false;
        }
        let half = side / 2;
        let x1 = (eye.0.round() as i64 - half).clamp(0, gray.width() as i64);
        let y1 = (eye.1.round() as i64 - half).clamp(0, gray.height() as i64);
        let x2 = (x1 + side).min(gray.width() as i64);
        let y2 = (y1 + side).min(gray.height() as i64);
        if x2 - x1 < self.min_eye_size as i64 || y2 - y1 < self.min_eye_size as i64 {
            return false;
        }

        let patch = gray.crop(x1 as u32, y1 as u32, (x2 - x1) as u32, (y2 - y1) as u32);
        let (_, std) = mean_std(patch.data());
        std >= self.min_contrast
    }
}

impl Default for LandmarkEyeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_EYE_SIZE, DEFAULT_MIN_CONTRAST)
    }
}

impl EyeDetector for LandmarkEyeDetector {
    fn eyes_visible(&self, frame: &Frame, faces: &[Region]) -> bool {
        if frame.is_empty() {
            return false;
        }
        let gray = frame.to_gray();
        faces.iter().any(|face| {
            face.landmarks
                .as_ref()
                .is_some_and(|lm| lm.visible_eyes().any(|eye| self.eye_present(&gray, face, eye)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_landmarks::FaceLandmarks;

    const SIZE: u32 = 200;

    fn flat_frame() -> Frame {
        Frame::new(vec![128; (SIZE * SIZE * 3) as usize], SIZE, SIZE, 3)
    }

    /// Paints a dark disc (pupil) on a bright square (sclera) around `center`.
    fn with_eye(frame: Frame, center: (u32, u32)) -> Frame {
        let mut data = frame.into_data();
        for y in center.1 - 15..center.1 + 15 {
            for x in center.0 - 15..center.0 + 15 {
                let dx = x as i32 - center.0 as i32;
                let dy = y as i32 - center.1 as i32;
                let value = if dx * dx + dy * dy < 49 { 20 } else { 230 };
                let offset = ((y * SIZE + x) * 3) as usize;
                data[offset..offset + 3].fill(value);
            }
        }
        Frame::new(data, SIZE, SIZE, 3)
    }

    fn face(width: i32, landmarks: Option<FaceLandmarks>) -> Region {
        Region {
            x: 40,
            y: 40,
            width,
            height: width,
            confidence: 0.9,
            landmarks,
        }
    }

    fn landmarks(left_eye: (f64, f64)) -> FaceLandmarks {
        FaceLandmarks::new([
            left_eye,
            (0.0, 0.0),
            (100.0, 110.0),
            (80.0, 130.0),
            (120.0, 130.0),
        ])
    }

    #[test]
    fn test_textured_eye_is_visible() {
        let frame = with_eye(flat_frame(), (80, 80));
        let faces = [face(120, Some(landmarks((80.0, 80.0))))];
        assert!(LandmarkEyeDetector::default().eyes_visible(&frame, &faces));
    }

    #[test]
    fn test_flat_eye_patch_is_rejected() {
        let faces = [face(120, Some(landmarks((80.0, 80.0))))];
        assert!(!LandmarkEyeDetector::default().eyes_visible(&flat_frame(), &faces));
    }

    #[test]
    fn test_small_face_is_rejected() {
        let frame = with_eye(flat_frame(), (80, 80));
        // 80 * 0.25 = 20 px < 30 px minimum
        let faces = [face(80, Some(landmarks((80.0, 80.0))))];
        assert!(!LandmarkEyeDetector::default().eyes_visible(&frame, &faces));
    }

    #[test]
    fn test_face_without_landmarks_is_rejected() {
        let frame = with_eye(flat_frame(), (80, 80));
        assert!(!LandmarkEyeDetector::default().eyes_visible(&frame, &[face(120, None)]));
    }

    #[test]
    fn test_no_faces_means_no_eyes() {
        let frame = with_eye(flat_frame(), (80, 80));
        assert!(!LandmarkEyeDetector::default().eyes_visible(&frame, &[]));
    }

    #[test]
    fn test_patch_near_frame_corner_shifts_inside() {
        let frame = with_eye(flat_frame(), (15, 15));
        let faces = [face(120, Some(landmarks((1.0, 1.0))))];
        assert!(LandmarkEyeDetector::default().eyes_visible(&frame, &faces));
    }
}
