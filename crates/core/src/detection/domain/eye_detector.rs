use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Liveness gate: decides whether open, visible eyes are present.
///
/// A printed photo held up to the camera tends to lose the fine contrast
/// around the eyes, which is what implementations look for.
pub trait EyeDetector: Send {
    fn eyes_visible(&self, frame: &Frame, faces: &[Region]) -> bool;
}
