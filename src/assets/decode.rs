use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::ReelResult;

/// Decoded still frame in straight (non-premultiplied) RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major RGBA8.
    pub rgba8: Arc<Vec<u8>>,
}

impl FrameImage {
    /// Size of the pixel buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.rgba8.len()
    }
}

/// Decode encoded image bytes (WebP, PNG, JPEG, ...) into RGBA8.
pub fn decode_frame(bytes: &[u8]) -> ReelResult<FrameImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode frame from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(FrameImage {
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
