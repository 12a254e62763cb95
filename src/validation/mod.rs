mod decoder;
mod validator;

pub use decoder::{ImageCrateDecoder, ImageDecoder, PixelBuffer};
pub use validator::{ImageInfo, ImageValidator};
