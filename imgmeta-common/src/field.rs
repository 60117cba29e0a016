//! Metadata fields
//!
//! Definition of Exif fields that are written or shown by name.

mod macros;

use crate::exif::Ifd;

macros::make_tags![
    // GPS
    (0x0, GPSVersionID, Ifd::Gps),
    (0x1, GPSLatitudeRef, Ifd::Gps),
    (0x2, GPSLatitude, Ifd::Gps),
    (0x3, GPSLongitudeRef, Ifd::Gps),
    (0x4, GPSLongitude, Ifd::Gps),
    (0x5, GPSAltitudeRef, Ifd::Gps),
    (0x6, GPSAltitude, Ifd::Gps),
    (0x7, GPSTimeStamp, Ifd::Gps),
    (0x1D, GPSDateStamp, Ifd::Gps),

    // Primary
    (0x100, ImageWidth, Ifd::Primary),
    (0x101, ImageHeight, Ifd::Primary),
    (0x10E, ImageDescription, Ifd::Primary),
    (0x10F, Make, Ifd::Primary),
    (0x110, Model, Ifd::Primary),
    /// Image orientation and mirroring
    (0x112, Orientation, Ifd::Primary),
    (0x11A, XResolution, Ifd::Primary),
    (0x11B, YResolution, Ifd::Primary),
    (0x128, ResolutionUnit, Ifd::Primary),
    (0x131, Software, Ifd::Primary),
    (0x132, DateTime, Ifd::Primary),
    (0x8769, ExifIfdPointer, Ifd::Primary),
    (0x8825, GpsInfoIfdPointer, Ifd::Primary),

    // Thumbnail
    (0x100, ThumbnailImageWidth, Ifd::Thumbnail),
    (0x101, ThumbnailImageHeight, Ifd::Thumbnail),
    (0x103, ThumbnailCompression, Ifd::Thumbnail),
    (0x112, ThumbnailOrientation, Ifd::Thumbnail),
    /// Offset of the JPEG thumbnail data
    (0x201, JpegInterchangeFormat, Ifd::Thumbnail),
    /// Length of the JPEG thumbnail data in bytes
    (0x202, JpegInterchangeFormatLength, Ifd::Thumbnail),

    // Exif
    (0x829A, ExposureTime, Ifd::Exif),
    (0x829D, FNumber, Ifd::Exif),
    /// Also called ISOSpeedRatings
    (0x8827, PhotographicSensitivity, Ifd::Exif),
    (0x9000, ExifVersion, Ifd::Exif),
    (0x9003, DateTimeOriginal, Ifd::Exif),
    (0x9011, OffsetTimeOriginal, Ifd::Exif),
    (0x9286, UserComment, Ifd::Exif),
    (0x9291, SubSecTimeOriginal, Ifd::Exif),
    (0x920A, FocalLength, Ifd::Exif),
    (0xA001, ColorSpace, Ifd::Exif),
    /// Width of the compressed image, kept in sync with the pixel data
    (0xA002, PixelXDimension, Ifd::Exif),
    /// Height of the compressed image, kept in sync with the pixel data
    (0xA003, PixelYDimension, Ifd::Exif),
    (0xA005, InteroperabilityIfdPointer, Ifd::Exif),
    (0xA434, LensModel, Ifd::Exif),
];
