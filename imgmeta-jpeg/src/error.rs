use imgmeta_common::math::MathError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Data does not start with the start of image marker")]
    MissingSoi,
    #[error("Expected marker at byte {0}")]
    MarkerExpected(usize),
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("Segment at byte {pos} has invalid length {len}")]
    InvalidSegmentLength { pos: usize, len: u16 },
    #[error("Segment at byte {pos} with length {len} exceeds data of {data_len} bytes")]
    SegmentExceedsData { pos: usize, len: u16, data_len: usize },
    #[error("Exif segment found before JFIF segment")]
    ExifBeforeJfif,
    #[error("No frame header found")]
    NoSof,
    #[error("Math: {0}")]
    Math(#[from] MathError),
}
