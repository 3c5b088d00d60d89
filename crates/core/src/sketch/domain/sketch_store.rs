/// Persists rendered sketches where the HTTP layer can serve them.
pub trait SketchStore: Send {
    /// Stores the JPEG and returns the file name it was saved under.
    fn save(&self, jpeg: &[u8]) -> Result<String, Box<dyn std::error::Error>>;
}
