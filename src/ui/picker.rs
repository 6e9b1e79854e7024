//! Media picker collaborators.
//!
//! A picker turns a user's selection into a [`ContentHandle`], or returns `None` when
//! the user cancels or nothing acceptable was chosen. The screen keeps its previous
//! handle in that case.

use image::ImageFormat;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Opaque reference to a selected media item, resolved to bytes later
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentHandle {
    path: PathBuf,
    mime_type: String,
}

impl ContentHandle {
    pub fn new(path: impl Into<PathBuf>, mime_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn uri(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Constraint passed to a picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaFilter {
    /// One item whose MIME type matches the pattern, e.g. `image/*`
    SingleMimeType(String),
}

impl MediaFilter {
    pub fn images() -> Self {
        MediaFilter::SingleMimeType("image/*".to_string())
    }

    pub fn matches(&self, mime_type: &str) -> bool {
        match self {
            MediaFilter::SingleMimeType(pattern) => match pattern.split_once('/') {
                Some(("*", "*")) => true,
                Some((kind, "*")) => mime_type
                    .split_once('/')
                    .is_some_and(|(candidate, _)| candidate.eq_ignore_ascii_case(kind)),
                _ => pattern.eq_ignore_ascii_case(mime_type),
            },
        }
    }
}

/// Source of a single media selection
pub trait MediaPicker: Send + Sync {
    /// Resolve `selection` under `filter`; `None` means nothing was picked
    fn pick(&self, selection: &str, filter: &MediaFilter) -> Option<ContentHandle>;
}

/// Picker that treats the selection as a filesystem path
///
/// Relative paths are resolved against the base directory.
#[derive(Debug, Clone)]
pub struct PathPicker {
    base_dir: PathBuf,
}

impl PathPicker {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn detect_mime_type(path: &Path) -> Option<&'static str> {
        if let Ok(format) = ImageFormat::from_path(path) {
            return Some(format.to_mime_type());
        }

        // No usable extension; sniff the header instead
        let reader = image::ImageReader::open(path).ok()?.with_guessed_format().ok()?;
        reader.format().map(|format| format.to_mime_type())
    }
}

impl Default for PathPicker {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

impl MediaPicker for PathPicker {
    fn pick(&self, selection: &str, filter: &MediaFilter) -> Option<ContentHandle> {
        let selection = selection.trim();
        if selection.is_empty() {
            info!("No media selected");
            return None;
        }

        let path = self.base_dir.join(selection);
        if !path.is_file() {
            info!(path = %path.display(), "No media selected: file not found");
            return None;
        }

        let Some(mime_type) = Self::detect_mime_type(&path) else {
            info!(path = %path.display(), "No media selected: unrecognized format");
            return None;
        };

        if !filter.matches(mime_type) {
            debug!(mime_type, ?filter, "Selection rejected by filter");
            info!(path = %path.display(), "No media selected: type not allowed");
            return None;
        }

        let handle = ContentHandle::new(path, mime_type);
        info!(uri = %handle.uri(), "Selected image");
        Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        image::RgbImage::new(2, 2).save_with_format(&path, ImageFormat::Png).unwrap();
        path
    }

    #[test]
    fn test_image_filter_matches_image_types() {
        let filter = MediaFilter::images();
        assert!(filter.matches("image/png"));
        assert!(filter.matches("image/jpeg"));
        assert!(filter.matches("IMAGE/gif"));
        assert!(!filter.matches("video/mp4"));
        assert!(!filter.matches("text/plain"));
    }

    #[test]
    fn test_exact_and_wildcard_filters() {
        assert!(MediaFilter::SingleMimeType("image/gif".to_string()).matches("image/gif"));
        assert!(!MediaFilter::SingleMimeType("image/gif".to_string()).matches("image/png"));
        assert!(MediaFilter::SingleMimeType("*/*".to_string()).matches("video/mp4"));
    }

    #[test]
    fn test_pick_existing_png() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "apple.png");
        let picker = PathPicker::new(dir.path());

        let handle = picker.pick("apple.png", &MediaFilter::images()).unwrap();

        assert_eq!(handle.path(), dir.path().join("apple.png"));
        assert_eq!(handle.mime_type(), "image/png");
        assert!(handle.uri().starts_with("file://"));
    }

    #[test]
    fn test_pick_without_extension_sniffs_format() {
        let dir = tempfile::tempdir().unwrap();
        let png = write_png(dir.path(), "apple.png");
        let bare = dir.path().join("apple");
        std::fs::rename(&png, &bare).unwrap();
        let picker = PathPicker::new(dir.path());

        let handle = picker.pick("apple", &MediaFilter::images()).unwrap();
        assert_eq!(handle.mime_type(), "image/png");
    }

    #[test]
    fn test_empty_selection_is_cancel() {
        let picker = PathPicker::new(".");
        assert!(picker.pick("   ", &MediaFilter::images()).is_none());
    }

    #[test]
    fn test_missing_file_is_no_selection() {
        let dir = tempfile::tempdir().unwrap();
        let picker = PathPicker::new(dir.path());
        assert!(picker.pick("missing.jpg", &MediaFilter::images()).is_none());
    }

    #[test]
    fn test_non_image_is_no_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("notes")).unwrap();
        file.write_all(b"just some text").unwrap();
        let picker = PathPicker::new(dir.path());

        assert!(picker.pick("notes", &MediaFilter::images()).is_none());
    }

    #[test]
    fn test_filter_rejects_other_image_types() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "apple.png");
        let picker = PathPicker::new(dir.path());
        let gifs_only = MediaFilter::SingleMimeType("image/gif".to_string());

        assert!(picker.pick("apple.png", &gifs_only).is_none());
    }
}
