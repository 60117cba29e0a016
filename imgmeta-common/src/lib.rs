//! Common features used in imgmeta crates

pub mod exif;
pub mod field;
pub mod image;
pub mod math;
pub mod orientation;
pub mod utils;
pub mod write;
