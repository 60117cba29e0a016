//! Sources for rendering thumbnails

use imgmeta_common::image::Dimensions;

pub type CanvasError = Box<dyn std::error::Error + Send + Sync>;

/// Pixel data that can be rendered as JPEG
pub trait Canvas: Dimensions {
    /// Encodes the content as JPEG with a quality in `0.0..=1.0`
    fn encode_jpeg(&self, quality: f32) -> Result<Vec<u8>, CanvasError>;
}

#[cfg(feature = "encoder")]
pub use rgb::RgbCanvas;

#[cfg(feature = "encoder")]
mod rgb {
    use imgmeta_common::image::Dimensions;
    use imgmeta_common::math::*;

    use super::{Canvas, CanvasError};
    use crate::error::{Error, Result};

    /// 8-bit RGB pixels encoded with `jpeg-encoder`
    #[derive(Debug, Clone)]
    pub struct RgbCanvas {
        width: u16,
        height: u16,
        pixels: Vec<u8>,
    }

    impl RgbCanvas {
        pub fn new(width: u16, height: u16, pixels: Vec<u8>) -> Result<Self> {
            let expected = Self::data_len(width, height)?;
            if pixels.len() != expected {
                return Err(Error::InvalidCanvas {
                    expected,
                    actual: pixels.len(),
                });
            }

            Ok(Self {
                width,
                height,
                pixels,
            })
        }

        /// Canvas with all pixels set to `rgb`
        pub fn filled(width: u16, height: u16, rgb: [u8; 3]) -> Result<Self> {
            let n_pixels = usize::from(width).safe_mul(usize::from(height))?;
            let pixels = rgb.repeat(n_pixels);
            Self::new(width, height, pixels)
        }

        pub fn pixels(&self) -> &[u8] {
            &self.pixels
        }

        fn data_len(width: u16, height: u16) -> Result<usize> {
            Ok(usize::from(width)
                .safe_mul(usize::from(height))?
                .safe_mul(3)?)
        }
    }

    impl Dimensions for RgbCanvas {
        fn width(&self) -> u32 {
            self.width.into()
        }

        fn height(&self) -> u32 {
            self.height.into()
        }
    }

    impl Canvas for RgbCanvas {
        fn encode_jpeg(&self, quality: f32) -> std::result::Result<Vec<u8>, CanvasError> {
            let data =
                imgmeta_jpeg::encoder::encode_rgb(&self.pixels, self.width, self.height, quality)?;
            Ok(data)
        }
    }
}
