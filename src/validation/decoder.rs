use crate::error::ValidationError;

/// Decoded RGBA pixels, row-major, four bytes per pixel.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl PixelBuffer {
    pub fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.rgba.chunks_exact(4).map(|px| [px[0], px[1], px[2]])
    }
}

/// Turns encoded image bytes into a pixel buffer.
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, ValidationError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, ValidationError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| ValidationError::Unreadable(e.to_string()))?;
        let rgba = image.to_rgba8();

        Ok(PixelBuffer {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }
}
