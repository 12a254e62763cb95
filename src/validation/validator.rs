use super::decoder::{ImageDecoder, PixelBuffer};
use crate::error::ValidationError;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

/// Client-side checks run before an image is staged for upload.
///
/// Checks run in a fixed order (decode, dimensions, uniform color) and the
/// first failure wins. The decoded buffer lives only for the duration of
/// `validate`.
#[derive(Clone)]
pub struct ImageValidator<D: ImageDecoder> {
    decoder: D,
    min_dimension: u32,
}

impl<D: ImageDecoder> ImageValidator<D> {
    pub fn new(decoder: D, min_dimension: u32) -> Self {
        Self {
            decoder,
            min_dimension,
        }
    }

    pub fn validate(&self, bytes: &[u8]) -> Result<ImageInfo, ValidationError> {
        let buffer = self.decoder.decode(bytes)?;
        debug!(
            "Decoded {}x{} image ({} bytes)",
            buffer.width,
            buffer.height,
            bytes.len()
        );

        self.check_dimensions(&buffer)?;
        Self::check_not_uniform(&buffer)?;

        Ok(ImageInfo {
            width: buffer.width,
            height: buffer.height,
        })
    }

    fn check_dimensions(&self, buffer: &PixelBuffer) -> Result<(), ValidationError> {
        if buffer.width < self.min_dimension || buffer.height < self.min_dimension {
            return Err(ValidationError::TooSmall {
                width: buffer.width,
                height: buffer.height,
                min: self.min_dimension,
            });
        }
        Ok(())
    }

    fn check_not_uniform(buffer: &PixelBuffer) -> Result<(), ValidationError> {
        let mut pixels = buffer.rgb_pixels();
        let Some(first) = pixels.next() else {
            return Err(ValidationError::Uniform);
        };

        if pixels.any(|px| px != first) {
            Ok(())
        } else {
            Err(ValidationError::Uniform)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Hands back a prepared buffer and ignores the input bytes.
    struct FakeDecoder {
        result: Result<PixelBuffer, ValidationError>,
        calls: Cell<usize>,
    }

    impl FakeDecoder {
        fn returning(buffer: PixelBuffer) -> Self {
            Self {
                result: Ok(buffer),
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                result: Err(ValidationError::Unreadable("bad header".to_string())),
                calls: Cell::new(0),
            }
        }
    }

    impl ImageDecoder for FakeDecoder {
        fn decode(&self, _bytes: &[u8]) -> Result<PixelBuffer, ValidationError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    fn buffer(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> PixelBuffer {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&pixel(x, y));
            }
        }
        PixelBuffer {
            width,
            height,
            rgba,
        }
    }

    fn gradient(x: u32, y: u32) -> [u8; 4] {
        [(x % 256) as u8, (y % 256) as u8, 90, 255]
    }

    #[test]
    fn accepts_varied_image_of_sufficient_size() {
        let validator = ImageValidator::new(FakeDecoder::returning(buffer(64, 50, gradient)), 50);
        let info = validator.validate(b"png").unwrap();
        assert_eq!(
            info,
            ImageInfo {
                width: 64,
                height: 50
            }
        );
    }

    #[test]
    fn rejects_small_images_regardless_of_content() {
        for (w, h) in [(49, 200), (200, 49), (1, 1), (0, 0)] {
            let varied = ImageValidator::new(FakeDecoder::returning(buffer(w, h, gradient)), 50);
            assert!(
                matches!(
                    varied.validate(b"x"),
                    Err(ValidationError::TooSmall { min: 50, .. })
                ),
                "{}x{} should be too small",
                w,
                h
            );

            let flat = ImageValidator::new(
                FakeDecoder::returning(buffer(w, h, |_, _| [9, 9, 9, 255])),
                50,
            );
            assert!(matches!(
                flat.validate(b"x"),
                Err(ValidationError::TooSmall { .. })
            ));
        }
    }

    #[test]
    fn rejects_uniform_rgb_even_when_alpha_varies() {
        let validator = ImageValidator::new(
            FakeDecoder::returning(buffer(60, 60, |x, _| [30, 120, 40, (x % 256) as u8])),
            50,
        );
        assert_eq!(validator.validate(b"x"), Err(ValidationError::Uniform));
    }

    #[test]
    fn single_differing_pixel_is_enough() {
        let validator = ImageValidator::new(
            FakeDecoder::returning(buffer(50, 50, |x, y| {
                if x == 49 && y == 49 {
                    [0, 0, 1, 255]
                } else {
                    [0, 0, 0, 255]
                }
            })),
            50,
        );
        assert!(validator.validate(b"x").is_ok());
    }

    #[test]
    fn decode_failure_is_reported_first() {
        let validator = ImageValidator::new(FakeDecoder::failing(), 50);
        assert!(matches!(
            validator.validate(b"x"),
            Err(ValidationError::Unreadable(_))
        ));
        assert_eq!(validator.decoder.calls.get(), 1);
    }

    #[test]
    fn threshold_is_configurable() {
        let validator = ImageValidator::new(FakeDecoder::returning(buffer(20, 20, gradient)), 16);
        assert!(validator.validate(b"x").is_ok());
    }
}
