use crate::detection::infrastructure::math::{dot, l2_normalize};

/// An L2-normalized identity embedding.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceEncoding(Vec<f32>);

impl FaceEncoding {
    pub fn new(mut values: Vec<f32>) -> Self {
        l2_normalize(&mut values);
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Cosine similarity in [-1, 1]; 0.0 when dimensions differ.
    pub fn similarity(&self, other: &FaceEncoding) -> f64 {
        if self.0.len() != other.0.len() {
            return 0.0;
        }
        dot(&self.0, &other.0)
    }

    pub fn matches(&self, other: &FaceEncoding, threshold: f64) -> bool {
        self.similarity(other) >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_normalizes() {
        let e = FaceEncoding::new(vec![3.0, 4.0]);
        assert_relative_eq!(e.as_slice()[0], 0.6, epsilon = 1e-6);
        assert_relative_eq!(e.as_slice()[1], 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_similarity_is_scale_invariant() {
        let a = FaceEncoding::new(vec![1.0, 2.0, 3.0]);
        let b = FaceEncoding::new(vec![10.0, 20.0, 30.0]);
        assert_relative_eq!(a.similarity(&b), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_matches_threshold_is_inclusive() {
        let a = FaceEncoding::new(vec![1.0, 0.0]);
        let b = FaceEncoding::new(vec![0.6, 0.8]);
        assert!(a.matches(&b, 0.6 - 1e-6));
        assert!(!a.matches(&b, 0.61));
    }

    #[test]
    fn test_dimension_mismatch_never_matches() {
        let a = FaceEncoding::new(vec![1.0, 0.0]);
        let b = FaceEncoding::new(vec![1.0, 0.0, 0.0]);
        assert_eq!(a.similarity(&b), 0.0);
    }
}
