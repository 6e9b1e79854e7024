//! Image decode collaborators.

use super::picker::ContentHandle;
use crate::error::Result;
use crate::llm::models::Bitmap;
use tracing::debug;

/// Turns a content handle into a bitmap that can be attached to a request
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, handle: &ContentHandle) -> Result<Bitmap>;
}

/// Decoder for handles that point at local files
///
/// The encoded bytes are kept as-is for upload; decoding only validates the image and
/// reads its dimensions. The MIME type comes from the file contents, not the handle.
#[derive(Debug, Clone, Default)]
pub struct FileImageDecoder;

impl FileImageDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl ImageDecoder for FileImageDecoder {
    fn decode(&self, handle: &ContentHandle) -> Result<Bitmap> {
        let data = std::fs::read(handle.path())?;
        let format = image::guess_format(&data)?;
        let decoded = image::load_from_memory_with_format(&data, format)?;

        debug!(
            uri = %handle.uri(),
            mime_type = format.to_mime_type(),
            width = decoded.width(),
            height = decoded.height(),
            "Decoded image"
        );

        Ok(Bitmap::new(data, format.to_mime_type(), decoded.width(), decoded.height()))
    }
}
