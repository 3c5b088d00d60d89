use std::fs;
use std::path::{Path, PathBuf};

use crate::sketch::domain::sketch_store::SketchStore;

/// Saves sketches as `sketch_<YYYYMMDDHHMMSS>.jpg` in a single directory.
pub struct DirectorySketchStore {
    dir: PathBuf,
}

impl DirectorySketchStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, std::io::Error> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn save_stamped(&self, jpeg: &[u8], stamp: &str) -> Result<String, std::io::Error> {
        let file_name = self.free_name(stamp);
        let path = self.dir.join(&file_name);
        let temp_path = path.with_extension("part");

        if let Err(e) = fs::write(&temp_path, jpeg).and_then(|_| fs::rename(&temp_path, &path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        log::debug!("Saved sketch {} ({} bytes)", path.display(), jpeg.len());
        Ok(file_name)
    }

    fn free_name(&self, stamp: &str) -> String {
        let base = format!("sketch_{stamp}.jpg");
        if !self.dir.join(&base).exists() {
            return base;
        }
        (1..)
            .map(|n| format!("sketch_{stamp}_{n}.jpg"))
            .find(|name| !self.dir.join(name).exists())
            .unwrap_or(base)
    }
}

impl SketchStore for DirectorySketchStore {
    fn save(&self, jpeg: &[u8]) -> Result<String, Box<dyn std::error::Error>> {
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
        Ok(self.save_stamped(jpeg, &stamp)?)
    }
}
