use image::ImageReader;
use serde::Serialize;
use std::io::Cursor;

/// Pixel size of an uploaded image, reported as `imageMetadata`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    /// True when either side is zero; such sizes are not reported.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Read the image header to get its size without decoding the pixels.
///
/// Returns `None` for formats we cannot sniff or corrupt data.
pub fn dimensions(bytes: &[u8]) -> Option<ImageDimensions> {
    let reader = match ImageReader::new(Cursor::new(bytes)).with_guessed_format() {
        Ok(reader) => reader,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read image header");
            return None;
        }
    };

    match reader.into_dimensions() {
        Ok((width, height)) => {
            tracing::debug!(width, height, "Read image dimensions");
            Some(ImageDimensions { width, height })
        }
        Err(e) => {
            tracing::warn!(error = %e, "Error reading image dimensions");
            None
        }
    }
}
