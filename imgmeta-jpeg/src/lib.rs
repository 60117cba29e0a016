mod error;
pub mod segments;

#[cfg(feature = "encoder")]
pub mod encoder;

use std::ops::Range;

use imgmeta_common::math::*;

pub use error::{Error, Result};
use segments::Sof;

pub const EXIF_IDENTIFIER_STRING: &[u8] = b"Exif\0\0";

pub const MARKER_START: u8 = 0xFF;

/// Length of the start of image marker
pub const SOI_LEN: usize = 2;

#[derive(Clone, Debug)]
pub struct Segment<'a> {
    marker: Marker,
    pos: usize,
    data: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Position of the marker
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Position of the payload, after marker and length
    pub fn data_pos(&self) -> Result<usize> {
        Ok(self.pos.safe_add(4)?)
    }

    /// Segment payload
    ///
    /// Empty for markers without payload and for the start of scan, whose
    /// header is not read.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Position after the segment
    pub fn end(&self) -> Result<usize> {
        if self.data.is_empty() && !self.marker.has_length() {
            return Ok(self.pos.safe_add(2)?);
        }

        Ok(self.data_pos()?.safe_add(self.data.len())?)
    }

    /// Bytes occupied by the segment, including marker and length
    pub fn range(&self) -> Result<Range<usize>> {
        Ok(self.pos..self.end()?)
    }

    pub fn is_exif(&self) -> bool {
        self.marker == Marker::APP1 && self.data.starts_with(EXIF_IDENTIFIER_STRING)
    }
}

#[derive(Debug)]
pub struct Jpeg<'a> {
    data: &'a [u8],
    segments: Vec<Segment<'a>>,
}

impl<'a> Jpeg<'a> {
    /// Reads the segments up to the start of scan
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let segments = Self::find_segments(data)?;
        Ok(Self { data, segments })
    }

    pub fn is_filetype(data: &[u8]) -> bool {
        data.starts_with(&[MARKER_START, Marker::SOI.into()])
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// List all segments in their order of appearance
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// List all segments with the given marker
    pub fn segments_marker(&self, marker: Marker) -> impl Iterator<Item = &Segment<'a>> {
        self.segments.iter().filter(move |x| x.marker == marker)
    }

    pub fn exif(&self) -> impl Iterator<Item = &Segment<'a>> {
        self.segments.iter().filter(|x| x.is_exif())
    }

    /// Exif data without the identifier string, starting with the TIFF header
    pub fn exif_data(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.exif()
            .filter_map(|x| x.data().get(EXIF_IDENTIFIER_STRING.len()..))
    }

    /// Frame header of the first baseline or progressive frame
    pub fn sof(&self) -> Result<Sof> {
        let segment = self
            .segments
            .iter()
            .find(|x| x.marker.is_sof())
            .ok_or(Error::NoSof)?;

        Sof::from_data(segment.data())
    }

    /// Range that Exif data has to be written to
    ///
    /// An existing Exif segment is replaced. Without one, the returned range
    /// is empty and lies directly after the JFIF segment, or after the start
    /// of image marker if there is no JFIF segment.
    pub fn exif_insertion_range(&self) -> Result<Range<usize>> {
        let mut range = SOI_LEN..SOI_LEN;
        let mut exif_found = false;

        for segment in &self.segments {
            if segment.marker == Marker::APP0 {
                if exif_found {
                    return Err(Error::ExifBeforeJfif);
                }
                let end = segment.end()?;
                range = end..end;
            } else if segment.is_exif() {
                if exif_found {
                    tracing::info!(
                        "Ignoring additional Exif segment at byte {}",
                        segment.pos()
                    );
                } else {
                    exif_found = true;
                    range = segment.range()?;
                }
            }
        }

        tracing::debug!("Exif insertion range: {range:?}");

        Ok(range)
    }

    fn find_segments(data: &'a [u8]) -> Result<Vec<Segment<'a>>> {
        if !Self::is_filetype(data) {
            return Err(Error::MissingSoi);
        }

        let mut segments = Vec::new();
        let mut pos = SOI_LEN;
        loop {
            let marker_bytes = data
                .get(pos..pos.safe_add(2)?)
                .ok_or(Error::UnexpectedEof)?;

            if marker_bytes[0] != MARKER_START {
                return Err(Error::MarkerExpected(pos));
            }

            // Fill bytes before a marker
            if marker_bytes[1] == MARKER_START {
                pos = pos.safe_add(1)?;
                continue;
            }

            let marker = Marker::from(marker_bytes[1]);

            if !marker.has_length() {
                segments.push(Segment {
                    marker,
                    pos,
                    data: &[],
                });

                if matches!(marker, Marker::SOS | Marker::EOI) {
                    break;
                }

                pos = pos.safe_add(2)?;
                continue;
            }

            let len_bytes = data
                .get(pos.safe_add(2)?..pos.safe_add(4)?)
                .ok_or(Error::UnexpectedEof)?;
            let len = u16::from_be_bytes([len_bytes[0], len_bytes[1]]);

            if len < 2 {
                return Err(Error::InvalidSegmentLength { pos, len });
            }

            let data_start = pos.safe_add(4)?;
            let end = pos.safe_add(2)?.safe_add(usize::from(len))?;

            let segment_data = data
                .get(data_start..end)
                .ok_or(Error::SegmentExceedsData {
                    pos,
                    len,
                    data_len: data.len(),
                })?;

            tracing::debug!("Found segment {marker:?} at byte {pos} with length {len}");

            segments.push(Segment {
                marker,
                pos,
                data: segment_data,
            });

            pos = end;
        }

        Ok(segments)
    }
}

imgmeta_common::utils::convertible_enum!(
    #[repr(u8)]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub enum Marker {
        SOF0 = 0xC0,
        SOF1 = 0xC1,
        SOF2 = 0xC2,
        /// Define Huffman table
        DHT = 0xC4,
        /// Start of image
        SOI = 0xD8,
        /// End of image
        EOI = 0xD9,
        /// Start of scan
        SOS = 0xDA,
        DQT = 0xDB,
        /// Define restart interval
        DRI = 0xDD,
        /// JFIF
        APP0 = 0xE0,
        /// Exif, XMP
        APP1 = 0xE1,
        /// ICC color profile
        APP2 = 0xE2,
        APP13 = 0xED,
        APP14 = 0xEE,
        /// Comment
        COM = 0xFE,
    }
);

impl Marker {
    /// Markers that are not followed by a length
    ///
    /// The start of scan has a length, but scanning stops at it.
    pub fn has_length(self) -> bool {
        let value: u8 = self.into();
        !matches!(value, 0x01 | 0xD0..=0xD9 | 0xDA)
    }

    pub fn is_sof(self) -> bool {
        matches!(self, Self::SOF0 | Self::SOF1 | Self::SOF2)
    }
}
