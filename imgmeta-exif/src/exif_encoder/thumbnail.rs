use imgmeta_common::exif::{Field, Ifd};
use imgmeta_common::field;
use imgmeta_common::image::Dimensions;
use imgmeta_common::math::*;
use imgmeta_common::orientation::Orientation;

use super::JPEG_MIME_TYPE;
use crate::canvas::Canvas;
use crate::data_url;
use crate::error::{Error, Result};
use crate::internal::Type;

/// Thumbnails are not rendered again below this quality
pub const MIN_THUMBNAIL_QUALITY: f32 = 0.2;
/// Quality reduction for each attempt
pub const THUMBNAIL_QUALITY_FACTOR: f32 = 0.8;

/// Thumbnail budget in 1/200 bytes for images without pixels
const BASE_BUDGET_200: u64 = 1_000_000;
/// Upper limit of the thumbnail budget in 1/200 bytes
const MAX_BUDGET_200: u64 = 10_000_000;

/// Longest thumbnail data URL that is embedded for an image with `pixel_count`
/// pixels
///
/// The thumbnail may have 5000 bytes plus 5000 bytes per megapixel, up to
/// 50000 bytes. The limit is given for the base64 encoded data URL.
///
/// ```
/// # use imgmeta_exif::max_thumbnail_url_len;
/// assert_eq!(max_thumbnail_url_len(0).unwrap(), 23 + 6667);
/// assert_eq!(max_thumbnail_url_len(1_000_000).unwrap(), 23 + 13334);
/// assert_eq!(max_thumbnail_url_len(50_000_000).unwrap(), 23 + 66667);
/// ```
pub fn max_thumbnail_url_len(pixel_count: u64) -> Result<usize> {
    // 5000 * min(10, 1 + pixel_count / 1e6) in units of 1/200 bytes
    let budget_200 = pixel_count
        .saturating_add(BASE_BUDGET_200)
        .min(MAX_BUDGET_200);
    // Base64 needs 4/3 characters per byte: ceil(budget_200 / 200 * 4 / 3)
    let base64_len = budget_200.div_ceil(150);

    Ok(data_url::prefix(JPEG_MIME_TYPE)
        .len()
        .safe_add(base64_len.usize()?)?)
}

impl super::ExifEncoder {
    /// Renders the thumbnail and adds the thumbnail IFD
    ///
    /// The quality is reduced until the thumbnail fits the budget for the
    /// image size. If it still doesn't fit, the thumbnail IFD is removed.
    pub fn set_thumbnail_data(&mut self, canvas: &dyn Canvas, quality: f32) -> Result<()> {
        if !quality.is_finite() {
            return Err(Error::InvalidQuality(quality));
        }

        let max_len = max_thumbnail_url_len(self.metadata.pixel_count())?;

        let mut quality = quality;
        let url = loop {
            let data = canvas.encode_jpeg(quality).map_err(Error::Canvas)?;
            let url = data_url::encode(JPEG_MIME_TYPE, &data);

            tracing::debug!(
                "Thumbnail with quality {quality} has {} of {max_len} characters",
                url.len()
            );

            if url.len() <= max_len || quality < MIN_THUMBNAIL_QUALITY {
                break url;
            }

            quality *= THUMBNAIL_QUALITY_FACTOR;
        };

        let fits = url.len() <= max_len;
        self.metadata.thumbnail_url = Some(url);
        self.metadata.thumbnail_transform = None;

        // The rendered thumbnail is still kept for display
        if !fits {
            tracing::warn!("Thumbnail exceeds {max_len} characters, not embedding it");
            self.metadata.ifd.remove(&Ifd::Thumbnail);
            return Ok(());
        }

        let thumbnail = self.metadata.directory_or_default(Ifd::Thumbnail);
        thumbnail
            .find_or_create(field::ThumbnailImageWidth::TAG)
            .set_u32(canvas.width())?;
        thumbnail
            .find_or_create(field::ThumbnailImageHeight::TAG)
            .set_u32(canvas.height())?;
        thumbnail
            .find_or_create(field::ThumbnailOrientation::TAG)
            .set_u32(Orientation::Id.exif_value().into())?;
        thumbnail.find_or_create_with(field::JpegInterchangeFormat::TAG, Type::Long, 1)?;
        thumbnail.find_or_create_with(field::JpegInterchangeFormatLength::TAG, Type::Long, 1)?;

        Ok(())
    }
}
