use std::fs;
use std::path::{Path, PathBuf};

use crate::recognition::domain::face_encoding::FaceEncoding;
use crate::recognition::domain::face_gallery::FaceGallery;
use crate::recognition::domain::known_face::KnownFace;
use crate::shared::frame::Frame;
use crate::shared::image_codec::{decode_frame, encode_jpeg};

const IMAGE_EXTENSION: &str = "jpg";
const ENROLL_JPEG_QUALITY: u8 = 95;

/// Encodes the first face in an image, or `None` when there is no face.
pub type EncodeFirstFace<'a> =
    dyn FnMut(&Frame) -> Result<Option<FaceEncoding>, Box<dyn std::error::Error>> + 'a;

/// Gallery persisted as `<name>.jpg` files in a single directory.
///
/// Encodings are computed once when the directory is opened and kept in
/// memory; enrollment writes the image and updates the in-memory list.
pub struct DirectoryGallery {
    dir: PathBuf,
    faces: Vec<KnownFace>,
}

impl DirectoryGallery {
    /// Opens (creating if needed) the directory and encodes every stored image.
    ///
    /// Files are visited in file-name order. Images that fail to decode or
    /// contain no face are skipped with a warning.
    pub fn open(
        dir: &Path,
        encode: &mut EncodeFirstFace<'_>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        fs::create_dir_all(dir)?;

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_image_extension(p))
            .collect();
        paths.sort();

        let mut faces = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                log::warn!("Skipping {}: file name is not UTF-8", path.display());
                continue;
            };
            let frame = match fs::read(&path)
                .map_err(|e| e.to_string())
                .and_then(|bytes| decode_frame(&bytes).map_err(|e| e.to_string()))
            {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Skipping {}: {e}", path.display());
                    continue;
                }
            };
            match encode(&frame) {
                Ok(Some(encoding)) => faces.push(KnownFace {
                    name: name.to_string(),
                    encoding,
                }),
                Ok(None) => log::warn!("Skipping {}: no face found", path.display()),
                Err(e) => log::warn!("Skipping {}: {e}", path.display()),
            }
        }

        log::info!("Loaded {} known faces from {}", faces.len(), dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
            faces,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn image_path(&self, name: &str) -> PathBuf {
        self.dir.join(file_name_for(name))
    }
}

impl FaceGallery for DirectoryGallery {
    fn known_faces(&self) -> &[KnownFace] {
        &self.faces
    }

    fn enroll(
        &mut self,
        name: &str,
        image: &Frame,
        encoding: FaceEncoding,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.image_path(name);
        let temp_path = path.with_extension("part");
        let jpeg = encode_jpeg(image, ENROLL_JPEG_QUALITY)?;
        fs::write(&temp_path, jpeg)?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        match self.faces.iter_mut().find(|f| f.name == name) {
            Some(existing) => {
                log::info!("Replaced known face {name:?}");
                existing.encoding = encoding;
            }
            None => {
                log::info!("Enrolled known face {name:?}");
                // Same order as `open`.
                let file_name = file_name_for(name);
                let at = self
                    .faces
                    .partition_point(|f| file_name_for(&f.name) < file_name);
                self.faces.insert(
                    at,
                    KnownFace {
                        name: name.to_string(),
                        encoding,
                    },
                );
            }
        }
        Ok(())
    }
}

fn file_name_for(name: &str) -> String {
    format!("{name}.{IMAGE_EXTENSION}")
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(IMAGE_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn solid(rgb: [u8; 3]) -> Frame {
        let data = rgb.iter().copied().cycle().take(16 * 16 * 3).collect();
        Frame::new(data, 16, 16, 3)
    }

    fn write_jpg(dir: &Path, file: &str, rgb: [u8; 3]) {
        fs::write(dir.join(file), encode_jpeg(&solid(rgb), 95).unwrap()).unwrap();
    }

    /// Encodes mean color; near-black images count as "no face".
    fn color_encoder(frame: &Frame) -> Result<Option<FaceEncoding>, Box<dyn std::error::Error>> {
        let mut sums = [0f32; 3];
        for px in frame.data().chunks_exact(3) {
            for c in 0..3 {
                sums[c] += px[c] as f32;
            }
        }
        if sums.iter().sum::<f32>() / (frame.data().len() as f32) < 10.0 {
            return Ok(None);
        }
        Ok(Some(FaceEncoding::new(sums.to_vec())))
    }

    fn names(gallery: &DirectoryGallery) -> Vec<&str> {
        gallery.known_faces().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_open_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("known_faces");
        let gallery = DirectoryGallery::open(&dir, &mut color_encoder).unwrap();
        assert!(dir.is_dir());
        assert!(gallery.known_faces().is_empty());
    }

    #[test]
    fn test_open_loads_jpgs_in_name_order() {
        let tmp = TempDir::new().unwrap();
        write_jpg(tmp.path(), "Zed.jpg", [0, 200, 0]);
        write_jpg(tmp.path(), "Alice.jpg", [200, 0, 0]);
        fs::write(tmp.path().join("notes.txt"), b"ignored").unwrap();

        let gallery = DirectoryGallery::open(tmp.path(), &mut color_encoder).unwrap();
        assert_eq!(names(&gallery), vec!["Alice", "Zed"]);
    }

    #[test]
    fn test_open_skips_undecodable_and_faceless_images() {
        let tmp = TempDir::new().unwrap();
        write_jpg(tmp.path(), "Alice.jpg", [200, 0, 0]);
        write_jpg(tmp.path(), "Dark.jpg", [0, 0, 0]);
        fs::write(tmp.path().join("Broken.jpg"), b"not a jpeg").unwrap();

        let gallery = DirectoryGallery::open(tmp.path(), &mut color_encoder).unwrap();
        assert_eq!(names(&gallery), vec!["Alice"]);
    }

    #[test]
    fn test_open_skips_images_when_encoder_fails() {
        let tmp = TempDir::new().unwrap();
        write_jpg(tmp.path(), "Alice.jpg", [200, 0, 0]);
        let mut failing = |_: &Frame| -> Result<Option<FaceEncoding>, Box<dyn std::error::Error>> {
            Err("inference failed".into())
        };
        let gallery = DirectoryGallery::open(tmp.path(), &mut failing).unwrap();
        assert!(gallery.known_faces().is_empty());
    }

    #[test]
    fn test_enroll_writes_image_and_is_visible_after_reopen() {
        let tmp = TempDir::new().unwrap();
        let mut gallery = DirectoryGallery::open(tmp.path(), &mut color_encoder).unwrap();
        let image = solid([0, 0, 200]);
        let encoding = color_encoder(&image).unwrap().unwrap();

        gallery.enroll("Bob", &image, encoding.clone()).unwrap();
        assert_eq!(names(&gallery), vec!["Bob"]);
        assert!(gallery.image_path("Bob").is_file());
        assert!(!gallery.image_path("Bob").with_extension("part").exists());

        let reopened = DirectoryGallery::open(tmp.path(), &mut color_encoder).unwrap();
        assert_eq!(names(&reopened), vec!["Bob"]);
        assert!(reopened.known_faces()[0].encoding.matches(&encoding, 0.99));
    }

    #[test]
    fn test_enroll_same_name_replaces_entry() {
        let tmp = TempDir::new().unwrap();
        let mut gallery = DirectoryGallery::open(tmp.path(), &mut color_encoder).unwrap();
        let red = solid([200, 0, 0]);
        let green = solid([0, 200, 0]);
        gallery
            .enroll("Bob", &red, color_encoder(&red).unwrap().unwrap())
            .unwrap();
        gallery
            .enroll("Bob", &green, color_encoder(&green).unwrap().unwrap())
            .unwrap();

        assert_eq!(names(&gallery), vec!["Bob"]);
        let green_enc = color_encoder(&green).unwrap().unwrap();
        assert!(gallery.known_faces()[0].encoding.matches(&green_enc, 0.99));
    }

    #[test]
    fn test_enroll_keeps_directory_order() {
        let tmp = TempDir::new().unwrap();
        write_jpg(tmp.path(), "Bob.jpg", [200, 0, 0]);
        let mut gallery = DirectoryGallery::open(tmp.path(), &mut color_encoder).unwrap();

        // All three share one face, so the first match depends on order.
        let red = solid([200, 0, 0]);
        let encoding = color_encoder(&red).unwrap().unwrap();
        gallery.enroll("Alice", &red, encoding.clone()).unwrap();
        gallery.enroll("Carol", &red, encoding.clone()).unwrap();
        assert_eq!(names(&gallery), vec!["Alice", "Bob", "Carol"]);
        assert_eq!(gallery.find_match(&encoding, 0.99).unwrap().name, "Alice");

        let reopened = DirectoryGallery::open(tmp.path(), &mut color_encoder).unwrap();
        assert_eq!(names(&reopened), names(&gallery));
        assert_eq!(reopened.find_match(&encoding, 0.99).unwrap().name, "Alice");
    }
}
