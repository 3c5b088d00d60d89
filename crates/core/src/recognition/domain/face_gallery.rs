use crate::recognition::domain::face_encoding::FaceEncoding;
use crate::recognition::domain::known_face::KnownFace;
use crate::shared::frame::Frame;

/// The set of enrolled identities.
pub trait FaceGallery: Send {
    /// Known faces in a stable order; matching walks them front to back.
    fn known_faces(&self) -> &[KnownFace];

    /// Stores a new identity. An existing entry with the same name is replaced.
    fn enroll(
        &mut self,
        name: &str,
        image: &Frame,
        encoding: FaceEncoding,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// First known face whose similarity reaches `threshold`.
    fn find_match(&self, encoding: &FaceEncoding, threshold: f64) -> Option<&KnownFace> {
        self.known_faces()
            .iter()
            .find(|known| known.encoding.matches(encoding, threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct VecGallery(Vec<KnownFace>);

    impl FaceGallery for VecGallery {
        fn known_faces(&self) -> &[KnownFace] {
            &self.0
        }

        fn enroll(
            &mut self,
            name: &str,
            _image: &Frame,
            encoding: FaceEncoding,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.0.push(KnownFace {
                name: name.to_string(),
                encoding,
            });
            Ok(())
        }
    }

    fn known(name: &str, v: Vec<f32>) -> KnownFace {
        KnownFace {
            name: name.to_string(),
            encoding: FaceEncoding::new(v),
        }
    }

    #[test]
    fn test_find_match_returns_first_in_order() {
        let gallery = VecGallery(vec![
            known("a", vec![1.0, 0.0]),
            known("b", vec![0.9, 0.1]),
            known("c", vec![0.0, 1.0]),
        ]);
        let probe = FaceEncoding::new(vec![0.95, 0.05]);
        assert_eq!(gallery.find_match(&probe, 0.4).unwrap().name, "a");
    }

    #[test]
    fn test_find_match_none_below_threshold() {
        let gallery = VecGallery(vec![known("a", vec![1.0, 0.0])]);
        let probe = FaceEncoding::new(vec![0.0, 1.0]);
        assert!(gallery.find_match(&probe, 0.4).is_none());
    }

    #[test]
    fn test_empty_gallery_matches_nothing() {
        let gallery = VecGallery(Vec::new());
        assert!(gallery
            .find_match(&FaceEncoding::new(vec![1.0]), 0.0)
            .is_none());
    }
}
