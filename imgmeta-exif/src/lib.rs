#![doc = include_str!("../README.md")]

pub mod canvas;
pub mod data_url;
pub mod error;
mod exif_encoder;
pub mod internal;
mod metadata;
mod metadata_encoder;

pub use canvas::Canvas;
#[cfg(feature = "encoder")]
pub use canvas::RgbCanvas;
pub use error::{Error, Result};
pub use exif_encoder::*;
pub use metadata::ExifMetadata;
pub use metadata_encoder::{encode_image, MetadataEncoder, Thumbnail};
