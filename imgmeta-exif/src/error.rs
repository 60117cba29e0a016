use imgmeta_common::exif::{Ifd, TagIfd};
use imgmeta_common::math::MathError;
use imgmeta_common::write::WriteError;

use crate::canvas::CanvasError;
use crate::internal::Type;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Tag {0} not found")]
    TagNotFound(TagIfd),
    #[error("Pointer {0} refers to IFD {1:?} which does not exist")]
    DanglingPointer(TagIfd, Ifd),
    #[error("Entry {tagifd} has to be filled in later but {count} x {data_type:?} does not fit into the entry")]
    ForwardTooLarge {
        tagifd: TagIfd,
        data_type: Type,
        count: u32,
    },
    #[error("String of {tagifd} has {actual} bytes but the entry count is {expected}")]
    StringLengthMismatch {
        tagifd: TagIfd,
        expected: u32,
        actual: usize,
    },
    #[error("Value of {tagifd} has {actual} components but the entry count is {expected}")]
    CountMismatch {
        tagifd: TagIfd,
        expected: u32,
        actual: usize,
    },
    #[error("Value of {0} does not match the entry's data type")]
    IncompatibleValue(TagIfd),
    #[error("Value {value} can't be stored as {data_type:?}")]
    ValueOutOfRange { value: u32, data_type: Type },
    #[error("Too many entries in IFD {0:?}")]
    TooManyEntries(Ifd),
    #[error("Thumbnail IFD exists but there is no thumbnail data")]
    ThumbnailMissing,
    #[error("Thumbnail quality {0} is not a finite number")]
    InvalidQuality(f32),
    #[error("Canvas has {actual} bytes instead of {expected}")]
    InvalidCanvas { expected: usize, actual: usize },
    #[error("Not a base64 data URL")]
    InvalidDataUrl,
    #[error("Base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Canvas: {0}")]
    Canvas(CanvasError),
    #[error("JPEG: {0}")]
    Jpeg(#[from] imgmeta_jpeg::Error),
    #[error("Writing: {0}")]
    Write(#[from] WriteError),
    #[error("Math: {0}")]
    Math(#[from] MathError),
}

pub(crate) trait ResultExt<T> {
    fn e(self, err: Error) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E> {
    fn e(self, err: Error) -> Result<T> {
        self.map_err(|_| err)
    }
}

impl<T> ResultExt<T> for Option<T> {
    fn e(self, err: Error) -> Result<T> {
        self.ok_or(err)
    }
}
