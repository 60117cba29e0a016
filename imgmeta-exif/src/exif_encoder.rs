//! Encoder for the Exif APP1 segment of JPEG images

mod encode;
mod image_data;
mod thumbnail;

use std::ops::Range;

use imgmeta_common::image::Dimensions;
use imgmeta_jpeg::Jpeg;

pub use thumbnail::{max_thumbnail_url_len, MIN_THUMBNAIL_QUALITY, THUMBNAIL_QUALITY_FACTOR};

use crate::canvas::Canvas;
use crate::error::Result;
use crate::metadata::ExifMetadata;
use crate::metadata_encoder::MetadataEncoder;

pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// Marker of the APP1 segment
pub const EXIF_MARKER: u16 = 0xFFE1;
/// Marker, segment size, and Exif identifier
pub const HEADER_LEN: usize = 10;
/// Scratch space for the TIFF structure
///
/// The segment size field can't describe larger segments.
pub const MAX_SEGMENT_LEN: usize = 0x10000;
pub const TIFF_MAGIC: u16 = 0x2A;

/// Writes [`ExifMetadata`] as APP1 segment
#[derive(Debug, Clone, Default)]
pub struct ExifEncoder {
    metadata: ExifMetadata,
}

impl ExifEncoder {
    pub fn new(metadata: ExifMetadata) -> Self {
        Self { metadata }
    }

    pub fn metadata(&self) -> &ExifMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut ExifMetadata {
        &mut self.metadata
    }

    pub fn into_metadata(self) -> ExifMetadata {
        self.metadata
    }

    /// Bytes of `jpeg` that the Exif segment replaces
    ///
    /// An existing Exif segment is replaced. Otherwise the range is empty and
    /// lies after the JFIF segment or the start of image marker.
    pub fn insertion_range(jpeg: &[u8]) -> Result<Range<usize>> {
        Ok(Jpeg::new(jpeg)?.exif_insertion_range()?)
    }
}

impl MetadataEncoder for ExifEncoder {
    fn mime_type(&self) -> &'static str {
        JPEG_MIME_TYPE
    }

    fn set_image_data(&mut self, image: &dyn Dimensions) -> Result<()> {
        ExifEncoder::set_image_data(self, image)
    }

    fn set_thumbnail_data(&mut self, canvas: &dyn Canvas, quality: f32) -> Result<()> {
        ExifEncoder::set_thumbnail_data(self, canvas, quality)
    }

    fn find_insertion_range(&self, encoded_image: &[u8]) -> Result<Range<usize>> {
        Self::insertion_range(encoded_image)
    }

    fn encode(&self) -> Result<Vec<u8>> {
        ExifEncoder::encode(self)
    }
}
