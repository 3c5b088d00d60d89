use crate::detection::domain::face_landmarks::FaceLandmarks;

/// A detected face: pixel-space bounding box clamped to the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f64,
    pub landmarks: Option<FaceLandmarks>,
}

/// Face box in the `top, right, bottom, left` convention used on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceLocation {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Region {
    pub fn location(&self) -> FaceLocation {
        FaceLocation {
            top: self.y,
            right: self.x + self.width,
            bottom: self.y + self.height,
            left: self.x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: i32, y: i32, w: i32, h: i32) -> Region {
        Region {
            x,
            y,
            width: w,
            height: h,
            confidence: 0.9,
            landmarks: None,
        }
    }

    #[test]
    fn test_location_converts_to_edges() {
        let loc = region(10, 20, 30, 40).location();
        assert_eq!(
            loc,
            FaceLocation {
                top: 20,
                right: 40,
                bottom: 60,
                left: 10,
            }
        );
    }
}
