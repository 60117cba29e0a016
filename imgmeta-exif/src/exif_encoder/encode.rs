use std::borrow::Cow;

use imgmeta_common::exif::{Ifd, Tag, TagIfd};
use imgmeta_common::field;
use imgmeta_common::math::*;
use imgmeta_jpeg::EXIF_IDENTIFIER_STRING;

use super::{EXIF_MARKER, HEADER_LEN, MAX_SEGMENT_LEN, TIFF_MAGIC};
use crate::data_url;
use crate::error::{Error, Result};
use crate::internal::{encode_directory, Directory, ExifWriter, ForwardKey};

impl super::ExifEncoder {
    /// Complete APP1 segment, starting with the marker
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut bytes = vec![0; MAX_SEGMENT_LEN];

        let len = {
            let (header, payload) = bytes.split_at_mut(HEADER_LEN);

            let mut header_writer = ExifWriter::new(header);
            header_writer.write_u16(EXIF_MARKER)?;
            header_writer.forward(ForwardKey::SegmentSize, 2)?;
            header_writer.write_bytes(EXIF_IDENTIFIER_STRING)?;

            let mut writer = ExifWriter::new(payload);
            self.encode_tiff(&mut writer)?;
            writer.check_resolved()?;

            let len = HEADER_LEN.safe_add(writer.tell())?;
            // Counts the size field but not the marker
            header_writer.resolve(ForwardKey::SegmentSize, len.safe_sub(2)?.u64()?)?;
            header_writer.check_resolved()?;

            len
        };

        tracing::debug!("Encoded Exif segment with {len} bytes");

        bytes.truncate(len);
        bytes.shrink_to_fit();

        Ok(bytes)
    }

    /// TIFF header followed by all IFDs
    fn encode_tiff(&self, writer: &mut ExifWriter<'_>) -> Result<()> {
        let byte_order = self.metadata.byte_order();
        writer.set_byte_order(byte_order);
        writer.write_bytes(byte_order.tiff_mark())?;
        writer.write_u16(TIFF_MAGIC)?;
        writer.forward(ForwardKey::FirstIfd, 4)?;
        writer.resolve_offset(ForwardKey::FirstIfd)?;

        let empty = Directory::default();
        let primary = self.metadata.directory(Ifd::Primary).unwrap_or_else(|| {
            tracing::debug!("No primary IFD, writing an empty one");
            &empty
        });

        encode_directory(
            writer,
            Ifd::Primary,
            primary,
            &[Tag::EXIF_IFD_POINTER, Tag::GPS_INFO_IFD_POINTER],
            Some(ForwardKey::ThumbnailDirectory),
        )?;

        for ifd in [Ifd::Exif, Ifd::Gps] {
            self.encode_sub_directory(writer, primary, ifd)?;
        }

        self.encode_thumbnail(writer)
    }

    /// Exif or GPS IFD, linked from a pointer in the primary IFD
    fn encode_sub_directory(
        &self,
        writer: &mut ExifWriter<'_>,
        primary: &Directory,
        ifd: Ifd,
    ) -> Result<()> {
        let Some(pointer) = ifd.pointer_tag() else {
            return Ok(());
        };
        let pointer = TagIfd::new(pointer, Ifd::Primary);

        match (self.metadata.directory(ifd), primary.contains(pointer.tag)) {
            (Some(directory), true) => {
                writer.resolve_offset(ForwardKey::Entry(pointer))?;
                let directory = without_ifd_pointers(directory, ifd);
                encode_directory(writer, ifd, &directory, &[], None)?;
            }
            (Some(_), false) => {
                tracing::debug!("IFD {ifd:?} has no pointer in the primary IFD, not writing it");
            }
            (None, true) => return Err(Error::DanglingPointer(pointer, ifd)),
            (None, false) => {}
        }

        Ok(())
    }

    /// Thumbnail IFD and JPEG data, linked as next IFD of the primary IFD
    fn encode_thumbnail(&self, writer: &mut ExifWriter<'_>) -> Result<()> {
        let Some(thumbnail) = self.metadata.directory(Ifd::Thumbnail) else {
            writer.resolve(ForwardKey::ThumbnailDirectory, 0)?;
            return Ok(());
        };

        let offset = TagIfd::from(field::JpegInterchangeFormat);
        let length = TagIfd::from(field::JpegInterchangeFormatLength);

        for tagifd in [offset, length] {
            if !thumbnail.contains(tagifd.tag) {
                return Err(Error::TagNotFound(tagifd));
            }
        }

        let url = self
            .metadata
            .thumbnail_url
            .as_deref()
            .ok_or(Error::ThumbnailMissing)?;
        let data = data_url::decode(url)?;

        writer.resolve_offset(ForwardKey::ThumbnailDirectory)?;
        encode_directory(
            writer,
            Ifd::Thumbnail,
            thumbnail,
            &[offset.tag, length.tag],
            None,
        )?;

        writer.resolve_offset(ForwardKey::Entry(offset))?;
        writer.resolve(ForwardKey::Entry(length), data.len().u64()?)?;
        writer.write_bytes(&data)?;

        Ok(())
    }
}

/// Sub-IFDs can't link further IFDs
fn without_ifd_pointers(directory: &Directory, ifd: Ifd) -> Cow<'_, Directory> {
    if !directory.iter().any(|(tag, _)| tag.is_ifd_pointer()) {
        return Cow::Borrowed(directory);
    }

    let mut directory = directory.clone();
    directory.retain(|tag, _| {
        let keep = !tag.is_ifd_pointer();
        if !keep {
            tracing::warn!("Dropping pointer {} from IFD {ifd:?}", TagIfd::new(tag, ifd));
        }
        keep
    });

    Cow::Owned(directory)
}

#[cfg(test)]
mod tests {
    use imgmeta_common::exif::Field;

    use super::*;
    use crate::internal::Entry;

    #[test]
    fn interoperability_pointer_dropped() {
        let directory = Directory::from_iter([
            (field::ColorSpace::TAG, Entry::new(1_u16).unwrap()),
            (Tag::INTEROPERABILITY_IFD_POINTER, Entry::new(0_u32).unwrap()),
        ]);

        let cleaned = without_ifd_pointers(&directory, Ifd::Exif);
        assert!(matches!(cleaned, Cow::Owned(_)));
        assert_eq!(cleaned.len(), 1);
        assert!(cleaned.contains(field::ColorSpace::TAG));
    }
}
