//! 5-point face landmarks as produced by the pose head of the face detector.

const LEFT_EYE: usize = 0;
const RIGHT_EYE: usize = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct FaceLandmarks {
    /// `[left_eye, right_eye, nose, left_mouth, right_mouth]`.
    /// Points with x <= 0 are treated as invisible.
    points: [(f64, f64); 5],
}

impl FaceLandmarks {
    pub fn new(points: [(f64, f64); 5]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64); 5] {
        &self.points
    }

    pub fn left_eye(&self) -> Option<(f64, f64)> {
        self.visible(LEFT_EYE)
    }

    pub fn right_eye(&self) -> Option<(f64, f64)> {
        self.visible(RIGHT_EYE)
    }

    pub fn visible_eyes(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.left_eye().into_iter().chain(self.right_eye())
    }

    fn visible(&self, index: usize) -> Option<(f64, f64)> {
        let p = self.points[index];
        (p.0 > 0.0).then_some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontal_landmarks() -> FaceLandmarks {
        FaceLandmarks::new([
            (440.0, 350.0), // left_eye
            (560.0, 350.0), // right_eye
            (500.0, 420.0), // nose
            (460.0, 470.0), // left_mouth
            (540.0, 470.0), // right_mouth
        ])
    }

    #[test]
    fn test_no_visible_eyes() {
        let lm = FaceLandmarks::new([(0.0, 0.0); 5]);
        assert_eq!(lm.visible_eyes().count(), 0);
    }

    #[test]
    fn test_eye_accessors() {
        let lm = frontal_landmarks();
        assert_eq!(lm.left_eye(), Some((440.0, 350.0)));
        assert_eq!(lm.right_eye(), Some((560.0, 350.0)));
        assert_eq!(lm.visible_eyes().count(), 2);
    }

    #[test]
    fn test_hidden_eye_is_skipped() {
        let mut pts = *frontal_landmarks().points();
        pts[LEFT_EYE] = (0.0, 0.0);
        let lm = FaceLandmarks::new(pts);
        assert_eq!(lm.left_eye(), None);
        assert_eq!(lm.visible_eyes().collect::<Vec<_>>(), vec![(560.0, 350.0)]);
    }
}
