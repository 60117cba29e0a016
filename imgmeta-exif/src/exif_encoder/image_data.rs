use imgmeta_common::exif::{Field, Ifd, Tag};
use imgmeta_common::field;
use imgmeta_common::image::Dimensions;
use imgmeta_common::orientation::Orientation;

use crate::error::Result;
use crate::internal::Type;

impl super::ExifEncoder {
    /// Updates the metadata for the pixel data that is saved
    ///
    /// The saved pixels are expected to be upright, so the orientation is
    /// reset.
    pub fn set_image_data(&mut self, image: &dyn Dimensions) -> Result<()> {
        let width = image.width();
        let height = image.height();

        tracing::debug!("Setting image data for {width}x{height} pixels");

        let primary = self.metadata.directory_or_default(Ifd::Primary);

        // Only kept in sync if the source had them
        if primary.contains(field::ImageWidth::TAG) && primary.contains(field::ImageHeight::TAG) {
            primary.find_or_create(field::ImageWidth::TAG).set_u32(width)?;
            primary
                .find_or_create(field::ImageHeight::TAG)
                .set_u32(height)?;
        }

        primary.find_or_create_with(Tag::EXIF_IFD_POINTER, Type::Long, 1)?;
        primary
            .find_or_create(field::Orientation::TAG)
            .set_u32(Orientation::Id.exif_value().into())?;

        let exif = self.metadata.directory_or_default(Ifd::Exif);
        exif.find_or_create(field::PixelXDimension::TAG)
            .set_u32(width)?;
        exif.find_or_create(field::PixelYDimension::TAG)
            .set_u32(height)?;

        self.metadata.width = width;
        self.metadata.height = height;
        self.metadata.image_transform = None;

        Ok(())
    }
}
