use std::collections::BTreeMap;

use imgmeta_common::exif::Ifd;
use imgmeta_common::image::Dimensions;
use imgmeta_common::orientation::Orientation;
use imgmeta_common::write::ByteOrder;

use crate::internal::Directory;

/// Exif metadata of an image that is about to be saved
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExifMetadata {
    pub ifd: BTreeMap<Ifd, Directory>,
    /// Pixel width of the image
    pub width: u32,
    /// Pixel height of the image
    pub height: u32,
    pub little_endian: bool,
    /// Thumbnail as base64 `data:` URL
    pub thumbnail_url: Option<String>,
    /// Orientation that still has to be applied to the image
    ///
    /// Cleared once the pixel data has been normalized.
    pub image_transform: Option<Orientation>,
    /// Orientation that still has to be applied to the thumbnail
    pub thumbnail_transform: Option<Orientation>,
}

impl ExifMetadata {
    pub fn directory(&self, ifd: Ifd) -> Option<&Directory> {
        self.ifd.get(&ifd)
    }

    pub fn directory_mut(&mut self, ifd: Ifd) -> Option<&mut Directory> {
        self.ifd.get_mut(&ifd)
    }

    /// Returns the IFD, adding an empty one if missing
    pub fn directory_or_default(&mut self, ifd: Ifd) -> &mut Directory {
        self.ifd.entry(ifd).or_default()
    }

    pub fn byte_order(&self) -> ByteOrder {
        ByteOrder::from_little_endian(self.little_endian)
    }

    pub fn debug_dump(&self) -> String {
        let mut out = String::new();

        for (ifd, directory) in &self.ifd {
            out.push_str(&format!("\n{ifd:?}\n"));
            out.push_str("------------------------------\n");
            out.push_str(&directory.debug_dump(*ifd));
        }

        if let Some(url) = &self.thumbnail_url {
            out.push_str(&format!("\nThumbnail URL with {} characters\n", url.len()));
        }

        out
    }
}

impl Dimensions for ExifMetadata {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
