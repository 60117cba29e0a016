use imgmeta_common::exif::{Ifd, Tag, TagIfd};
use imgmeta_common::math::*;
use imgmeta_common::write::ByteWriter;

use super::{Directory, Entry, Value};
use crate::error::{Error, Result, ResultExt};

/// Size of a single IFD entry
pub const ENTRY_LEN: usize = 12;
/// Size of the value or offset field in an entry
pub const VALUE_OFFSET_LEN: usize = 4;

/// Values that are only known after later parts of the segment are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ForwardKey {
    /// Size field of the APP1 segment
    SegmentSize,
    /// Offset of the primary IFD in the TIFF header
    FirstIfd,
    /// Next IFD offset of the primary IFD
    ThumbnailDirectory,
    /// Value field of an entry
    Entry(TagIfd),
}

pub type ExifWriter<'a> = ByteWriter<'a, ForwardKey>;

/// Writes an IFD
///
/// Writes the entry count, the entries in ascending tag order, and the next
/// IFD offset, followed by all values that don't fit into their entry. The
/// values of tags in `resolve_later` are left as forward references under
/// [`ForwardKey::Entry`], sized to the entry's data type. The next IFD offset is a forward reference under
/// `next_directory`, or zero.
pub fn encode_directory(
    writer: &mut ExifWriter<'_>,
    ifd: Ifd,
    directory: &Directory,
    resolve_later: &[Tag],
    next_directory: Option<ForwardKey>,
) -> Result<()> {
    let n_entries = u16::try_from(directory.len()).e(Error::TooManyEntries(ifd))?;
    writer.write_u16(n_entries)?;

    let mut out_of_line = Vec::new();

    for (tag, entry) in directory.iter() {
        let tagifd = TagIfd::new(tag, ifd);
        entry.validate(tagifd)?;

        writer.write_u16(tag.0)?;
        writer.write_u16(entry.data_type.u16())?;
        writer.write_u32(entry.count)?;

        let data_len = entry.data_len()?.usize()?;

        if resolve_later.contains(&tag) {
            if entry.count != 1 || data_len > VALUE_OFFSET_LEN {
                return Err(Error::ForwardTooLarge {
                    tagifd,
                    data_type: entry.data_type,
                    count: entry.count,
                });
            }
            writer.forward(ForwardKey::Entry(tagifd), data_len)?;
            writer.skip(VALUE_OFFSET_LEN.safe_sub(data_len)?)?;
        } else if data_len <= VALUE_OFFSET_LEN {
            write_value(writer, tagifd, entry)?;
            writer.skip(VALUE_OFFSET_LEN.safe_sub(data_len)?)?;
        } else {
            writer.forward(ForwardKey::Entry(tagifd), VALUE_OFFSET_LEN)?;
            out_of_line.push((tagifd, entry));
        }
    }

    match next_directory {
        Some(key) => writer.forward(key, 4)?,
        None => writer.write_u32(0)?,
    }

    for (tagifd, entry) in out_of_line {
        writer.resolve_offset(ForwardKey::Entry(tagifd))?;
        write_value(writer, tagifd, entry)?;
    }

    Ok(())
}

/// Writes the components of an entry in the writer's byte order
pub fn write_value(writer: &mut ExifWriter<'_>, tagifd: TagIfd, entry: &Entry) -> Result<()> {
    entry.validate(tagifd)?;

    match &entry.value {
        Value::Byte(bytes) | Value::Ascii(bytes) | Value::Undefined(bytes) => {
            writer.write_bytes(bytes)?;
        }
        Value::Short(values) => {
            for value in values {
                writer.write_u16(*value)?;
            }
        }
        Value::Long(values) => {
            for value in values {
                writer.write_u32(*value)?;
            }
        }
        Value::SLong(values) => {
            for value in values {
                writer.write_i32(*value)?;
            }
        }
        Value::Rational(values) => {
            for (numerator, denominator) in values {
                writer.write_u32(*numerator)?;
                writer.write_u32(*denominator)?;
            }
        }
        Value::SRational(values) => {
            for (numerator, denominator) in values {
                writer.write_i32(*numerator)?;
                writer.write_i32(*denominator)?;
            }
        }
    }

    Ok(())
}
