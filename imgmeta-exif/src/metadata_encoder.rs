use std::ops::Range;

use imgmeta_common::image::Dimensions;

use crate::canvas::Canvas;
use crate::error::Result;

/// Encoder for the metadata block of one image format
pub trait MetadataEncoder {
    /// Image format the metadata is written into
    fn mime_type(&self) -> &'static str;

    /// Updates the metadata for the saved pixel data
    fn set_image_data(&mut self, image: &dyn Dimensions) -> Result<()>;

    /// Renders and stores the thumbnail
    fn set_thumbnail_data(&mut self, canvas: &dyn Canvas, quality: f32) -> Result<()>;

    /// Bytes of the encoded image that are replaced by the metadata block
    fn find_insertion_range(&self, encoded_image: &[u8]) -> Result<Range<usize>>;

    fn encode(&self) -> Result<Vec<u8>>;
}

/// Thumbnail source and start quality for [`encode_image`]
pub struct Thumbnail<'a> {
    pub canvas: &'a dyn Canvas,
    pub quality: f32,
}

/// Writes the metadata into an encoded image
///
/// Updates the metadata for `image` and the optional thumbnail before
/// replacing the insertion range of `encoded_image` with the encoded block.
pub fn encode_image(
    encoder: &mut dyn MetadataEncoder,
    encoded_image: &[u8],
    image: &dyn Dimensions,
    thumbnail: Option<Thumbnail<'_>>,
) -> Result<Vec<u8>> {
    encoder.set_image_data(image)?;

    if let Some(thumbnail) = thumbnail {
        encoder.set_thumbnail_data(thumbnail.canvas, thumbnail.quality)?;
    }

    let range = encoder.find_insertion_range(encoded_image)?;
    let block = encoder.encode()?;

    tracing::debug!(
        "Writing {} metadata with {} bytes into range {range:?}",
        encoder.mime_type(),
        block.len()
    );

    let prefix = encoded_image.get(..range.start).unwrap_or_default();
    let suffix = encoded_image.get(range.end..).unwrap_or_default();

    Ok([prefix, block.as_slice(), suffix].concat())
}
