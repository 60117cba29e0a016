//! Entry model and IFD serialization

mod directory;
mod serialize;
mod type_;
mod value;

pub use directory::{Directory, Entry};
pub use imgmeta_common::exif::{Ifd, Tag, TagIfd};
pub use serialize::{encode_directory, write_value, ExifWriter, ForwardKey};
pub use type_::Type;
pub use value::Value;
