#![allow(dead_code)]

use std::cell::RefCell;

pub use imgmeta_common::exif::Field;
pub use imgmeta_common::field;
pub use imgmeta_common::image::Dimensions;
pub use imgmeta_exif::canvas::CanvasError;
pub use imgmeta_exif::internal::*;
pub use imgmeta_exif::*;

/// TIFF structure of an encoded segment
pub fn tiff(segment: &[u8]) -> &[u8] {
    &segment[HEADER_LEN..]
}

/// Reads the segment with an independent Exif implementation
pub fn read_back(segment: &[u8]) -> exif::Exif {
    exif::Reader::new().read_raw(tiff(segment).to_vec()).unwrap()
}

pub fn kamadak_field(exif: &exif::Exif, tag: u16, ifd: exif::In) -> &exif::Field {
    exif.fields()
        .find(|x| x.tag.number() == tag && x.ifd_num == ifd)
        .unwrap_or_else(|| panic!("Tag 0x{tag:04X} not found in {ifd:?}"))
}

pub fn encode(metadata: ExifMetadata) -> Vec<u8> {
    ExifEncoder::new(metadata).encode().unwrap()
}

pub fn metadata_with(ifd: Ifd, entries: impl IntoIterator<Item = (u16, Value)>) -> ExifMetadata {
    let mut metadata = ExifMetadata::default();
    let directory = metadata.directory_or_default(ifd);
    for (tag, value) in entries {
        directory.insert(Tag(tag), Entry::new(value).unwrap());
    }
    metadata
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawEntry {
    pub tag: u16,
    pub data_type: u16,
    pub count: u32,
    pub value_offset: [u8; 4],
}

/// Minimal reader for checking the written layout
pub struct RawTiff<'a> {
    pub data: &'a [u8],
    pub little_endian: bool,
}

impl<'a> RawTiff<'a> {
    pub fn new(segment: &'a [u8]) -> Self {
        let data = tiff(segment);
        let little_endian = match &data[..2] {
            b"II" => true,
            b"MM" => false,
            mark => panic!("Invalid byte order mark {mark:?}"),
        };
        Self {
            data,
            little_endian,
        }
    }

    pub fn u16(&self, pos: usize) -> u16 {
        let bytes = [self.data[pos], self.data[pos + 1]];
        if self.little_endian {
            u16::from_le_bytes(bytes)
        } else {
            u16::from_be_bytes(bytes)
        }
    }

    pub fn u32(&self, pos: usize) -> u32 {
        self.u32_from(self.data[pos..pos + 4].try_into().unwrap())
    }

    pub fn u32_from(&self, bytes: [u8; 4]) -> u32 {
        if self.little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        }
    }

    pub fn first_ifd(&self) -> usize {
        self.u32(4) as usize
    }

    /// Entries and next IFD offset of the IFD at `offset`
    pub fn ifd(&self, offset: usize) -> (Vec<RawEntry>, u32) {
        let n = self.u16(offset) as usize;
        let entries = (0..n)
            .map(|i| {
                let pos = offset + 2 + i * 12;
                RawEntry {
                    tag: self.u16(pos),
                    data_type: self.u16(pos + 2),
                    count: self.u32(pos + 4),
                    value_offset: self.data[pos + 8..pos + 12].try_into().unwrap(),
                }
            })
            .collect();
        let next = self.u32(offset + 2 + n * 12);
        (entries, next)
    }

    pub fn entry(&self, offset: usize, tag: u16) -> RawEntry {
        self.ifd(offset)
            .0
            .into_iter()
            .find(|x| x.tag == tag)
            .unwrap_or_else(|| panic!("Tag 0x{tag:04X} not found"))
    }
}

/// Canvas that produces `len_at_full_quality * quality` bytes
pub struct FakeCanvas {
    pub width: u32,
    pub height: u32,
    pub len_at_full_quality: f32,
    pub qualities: RefCell<Vec<f32>>,
}

impl FakeCanvas {
    pub fn new(width: u32, height: u32, len_at_full_quality: f32) -> Self {
        Self {
            width,
            height,
            len_at_full_quality,
            qualities: RefCell::default(),
        }
    }
}

impl Dimensions for FakeCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl Canvas for FakeCanvas {
    fn encode_jpeg(&self, quality: f32) -> std::result::Result<Vec<u8>, CanvasError> {
        self.qualities.borrow_mut().push(quality);
        let len = (self.len_at_full_quality * quality) as usize;
        Ok(vec![0xAB; len])
    }
}

/// Canvas that fails to render
pub struct BrokenCanvas;

impl Dimensions for BrokenCanvas {
    fn width(&self) -> u32 {
        1
    }

    fn height(&self) -> u32 {
        1
    }
}

impl Canvas for BrokenCanvas {
    fn encode_jpeg(&self, _quality: f32) -> std::result::Result<Vec<u8>, CanvasError> {
        Err("no pixels".into())
    }
}

pub fn segment(marker: u8, data: &[u8]) -> Vec<u8> {
    let len = u16::try_from(data.len() + 2).unwrap();
    [&[0xFF, marker][..], &len.to_be_bytes(), data].concat()
}

/// JPEG structure up to a fake scan, with the given segments after SOI
pub fn jpeg(segments: &[Vec<u8>]) -> Vec<u8> {
    let sof = segment(0xC0, &[8, 0, 2, 0, 4, 1, 1, 0x11, 0]);
    let sos = segment(0xDA, &[1, 1, 0, 0, 0x3F, 0]);
    [
        vec![0xFF, 0xD8],
        segments.concat(),
        sof,
        sos,
        vec![0x12, 0x34, 0xFF, 0xD9],
    ]
    .concat()
}

pub fn jfif() -> Vec<u8> {
    segment(0xE0, b"JFIF\0\x01\x02\0\0\x01\0\x01\0\0")
}
