mod utils;
use utils::*;

#[test]
fn empty_metadata() {
    let segment = encode(ExifMetadata::default());

    assert_eq!(
        segment,
        [
            0xFF, 0xE1, 0, 22, b'E', b'x', b'i', b'f', 0, 0, //
            b'M', b'M', 0, 0x2A, 0, 0, 0, 8, //
            0, 0, //
            0, 0, 0, 0,
        ]
    );
}

#[test]
fn little_endian_header() {
    let metadata = ExifMetadata {
        little_endian: true,
        ..Default::default()
    };
    let segment = encode(metadata);

    assert_eq!(&tiff(&segment)[..8], b"II\x2A\0\x08\0\0\0");
}

#[test]
fn all_formats() {
    for little_endian in [false, true] {
        let mut metadata = metadata_with(
            Ifd::Primary,
            [
                (0xC001, Value::Byte(vec![1, 2, 3, 4])),
                (0xC002, Value::ascii("abc")),
                (0xC003, Value::Short(vec![1, 0xFFFF])),
                (0xC004, Value::Long(vec![70_000])),
                (0xC005, Value::Rational(vec![(72, 1), (1, 3)])),
                (0xC007, Value::Undefined(vec![9, 8, 7])),
                (0xC009, Value::SLong(vec![-5])),
                (0xC00A, Value::SRational(vec![(-1, 3)])),
            ],
        );
        metadata.little_endian = little_endian;

        let segment = encode(metadata);
        let exif = read_back(&segment);
        assert_eq!(exif.little_endian(), little_endian);

        let value = |tag| &kamadak_field(&exif, tag, exif::In::PRIMARY).value;

        assert!(matches!(value(0xC001), exif::Value::Byte(v) if v == &[1, 2, 3, 4]));
        assert!(matches!(value(0xC002), exif::Value::Ascii(v) if v == &[b"abc".to_vec()]));
        assert!(matches!(value(0xC003), exif::Value::Short(v) if v == &[1, 0xFFFF]));
        assert!(matches!(value(0xC004), exif::Value::Long(v) if v == &[70_000]));
        assert!(matches!(value(0xC007), exif::Value::Undefined(v, _) if v == &[9, 8, 7]));
        assert!(matches!(value(0xC009), exif::Value::SLong(v) if v == &[-5]));

        let exif::Value::Rational(rationals) = value(0xC005) else {
            panic!("Expected rational");
        };
        assert_eq!((rationals[0].num, rationals[0].denom), (72, 1));
        assert_eq!((rationals[1].num, rationals[1].denom), (1, 3));

        let exif::Value::SRational(rationals) = value(0xC00A) else {
            panic!("Expected signed rational");
        };
        assert_eq!((rationals[0].num, rationals[0].denom), (-1, 3));
    }
}

#[test]
fn out_of_line_value() {
    let metadata = metadata_with(
        Ifd::Primary,
        [
            (0x110, Value::ascii("A long camera model")),
            (0x112, Value::Short(vec![1])),
        ],
    );
    let segment = encode(metadata);
    let raw = RawTiff::new(&segment);

    assert_eq!(raw.first_ifd(), 8);

    let entry = raw.entry(8, 0x110);
    assert_eq!(entry.data_type, 2);
    assert_eq!(entry.count, 20);

    // Directly after the two entries and the next IFD offset
    let offset = raw.u32_from(entry.value_offset) as usize;
    assert_eq!(offset, 8 + 2 + 2 * 12 + 4);
    assert_eq!(&raw.data[offset..offset + 20], b"A long camera model\0");

    let entry = raw.entry(8, 0x112);
    assert_eq!(entry.value_offset, [0, 1, 0, 0]);
}

#[test]
fn segment_size() {
    let mut metadata = metadata_with(
        Ifd::Primary,
        [
            (0x10F, Value::ascii("Maker")),
            (0x11A, Value::Rational(vec![(300, 1)])),
        ],
    );
    metadata.little_endian = true;

    let mut encoder = ExifEncoder::new(metadata);
    encoder.set_image_data(&(6000_u32, 4000_u32)).unwrap();
    let segment = encoder.encode().unwrap();

    // Size is always big endian
    let size = u16::from_be_bytes([segment[2], segment[3]]);
    assert_eq!(segment.len(), usize::from(size) + 2);
}

#[test]
fn ascending_tags() {
    let mut metadata = metadata_with(
        Ifd::Primary,
        [
            (0x8769, Value::Long(vec![0])),
            (0x132, Value::ascii("2024:01:01 00:00:00")),
            (0x10F, Value::ascii("Maker")),
            (0x100, Value::Long(vec![10])),
        ],
    );
    let exif = metadata.directory_or_default(Ifd::Exif);
    exif.insert(Tag(0xA003), Entry::new(10_u32).unwrap());
    exif.insert(Tag(0x829A), Entry::new((1_u32, 100_u32)).unwrap());
    exif.insert(Tag(0x9000), Entry::new(Value::Undefined(b"0232".to_vec())).unwrap());

    let segment = encode(metadata);
    let raw = RawTiff::new(&segment);

    let (primary, next) = raw.ifd(raw.first_ifd());
    let tags: Vec<_> = primary.iter().map(|x| x.tag).collect();
    assert_eq!(tags, [0x100, 0x10F, 0x132, 0x8769]);
    assert_eq!(next, 0);

    let exif_offset = raw.u32_from(raw.entry(raw.first_ifd(), 0x8769).value_offset);
    let (exif, _) = raw.ifd(exif_offset as usize);
    let tags: Vec<_> = exif.iter().map(|x| x.tag).collect();
    assert_eq!(tags, [0x829A, 0x9000, 0xA003]);
}

#[test]
fn exif_and_gps() {
    let mut metadata = metadata_with(Ifd::Gps, [(0x0, Value::Byte(vec![2, 3, 0, 0]))]);
    metadata
        .directory_or_default(Ifd::Primary)
        .insert(Tag::GPS_INFO_IFD_POINTER, Entry::new(0_u32).unwrap());

    let mut encoder = ExifEncoder::new(metadata);
    encoder.set_image_data(&(640_u32, 480_u32)).unwrap();
    let exif = read_back(&encoder.encode().unwrap());

    let field = exif
        .get_field(exif::Tag::PixelXDimension, exif::In::PRIMARY)
        .unwrap();
    assert_eq!(field.value.get_uint(0), Some(640));
    let field = exif
        .get_field(exif::Tag::PixelYDimension, exif::In::PRIMARY)
        .unwrap();
    assert_eq!(field.value.get_uint(0), Some(480));

    let field = exif
        .get_field(exif::Tag::GPSVersionID, exif::In::PRIMARY)
        .unwrap();
    assert!(matches!(&field.value, exif::Value::Byte(v) if v == &[2, 3, 0, 0]));
}

#[test]
fn dangling_pointer() {
    for (pointer, ifd) in [
        (Tag::EXIF_IFD_POINTER, Ifd::Exif),
        (Tag::GPS_INFO_IFD_POINTER, Ifd::Gps),
    ] {
        let metadata = metadata_with(Ifd::Primary, [(pointer.0, Value::Long(vec![0]))]);
        let result = ExifEncoder::new(metadata).encode();

        assert!(matches!(
            result,
            Err(Error::DanglingPointer(tagifd, x)) if tagifd.tag == pointer && x == ifd
        ));
    }
}

#[test]
fn unreferenced_directory_not_written() {
    let without_exif = encode(ExifMetadata::default());

    let metadata = metadata_with(Ifd::Exif, [(0xA001, Value::Short(vec![1]))]);
    let segment = encode(metadata);

    assert_eq!(segment, without_exif);
}

#[test]
fn interoperability_pointer_dropped() {
    let mut metadata = metadata_with(
        Ifd::Exif,
        [
            (0xA001, Value::Short(vec![1])),
            (0xA005, Value::Long(vec![1234])),
        ],
    );
    metadata
        .directory_or_default(Ifd::Primary)
        .insert(Tag::EXIF_IFD_POINTER, Entry::new(0_u32).unwrap());

    let segment = encode(metadata);
    let raw = RawTiff::new(&segment);
    let exif_offset = raw.u32_from(raw.entry(raw.first_ifd(), 0x8769).value_offset);
    let (exif, next) = raw.ifd(exif_offset as usize);

    assert_eq!(exif.len(), 1);
    assert_eq!(exif[0].tag, 0xA001);
    assert_eq!(next, 0);
}

#[test]
fn unknown_type() {
    let mut metadata = ExifMetadata::default();
    metadata.directory_or_default(Ifd::Primary).insert(
        Tag(0xC100),
        Entry {
            data_type: Type::Unknown(13),
            count: 1,
            value: Value::Long(vec![7]),
        },
    );

    let segment = encode(metadata);
    let raw = RawTiff::new(&segment);
    let entry = raw.entry(raw.first_ifd(), 0xC100);

    assert_eq!(entry.data_type, 13);
    assert_eq!(entry.count, 1);
    assert_eq!(entry.value_offset, [0, 0, 0, 7]);
}

#[test]
fn inconsistent_entries() {
    let mut metadata = ExifMetadata::default();
    metadata.directory_or_default(Ifd::Primary).insert(
        Tag(0x110),
        Entry {
            data_type: Type::Ascii,
            count: 10,
            value: Value::ascii("short"),
        },
    );
    assert!(matches!(
        ExifEncoder::new(metadata).encode(),
        Err(Error::StringLengthMismatch {
            expected: 10,
            actual: 6,
            ..
        })
    ));

    let mut metadata = ExifMetadata::default();
    metadata.directory_or_default(Ifd::Primary).insert(
        Tag(0x112),
        Entry {
            data_type: Type::Short,
            count: 1,
            value: Value::Long(vec![1]),
        },
    );
    assert!(matches!(
        ExifEncoder::new(metadata).encode(),
        Err(Error::IncompatibleValue(_))
    ));
}

#[test]
fn capacity_exceeded() {
    let metadata = metadata_with(Ifd::Primary, [(0xC000, Value::Undefined(vec![0; 70_000]))]);

    assert!(matches!(
        ExifEncoder::new(metadata).encode(),
        Err(Error::Write(
            imgmeta_common::write::WriteError::CapacityExceeded { .. }
        ))
    ));
}

#[test]
fn thumbnail_without_data() {
    let mut encoder = ExifEncoder::default();
    encoder
        .set_thumbnail_data(&FakeCanvas::new(160, 120, 1000.), 0.9)
        .unwrap();
    encoder.metadata_mut().thumbnail_url = None;

    assert!(matches!(encoder.encode(), Err(Error::ThumbnailMissing)));

    encoder
        .metadata_mut()
        .directory_mut(Ifd::Thumbnail)
        .unwrap()
        .remove(field::JpegInterchangeFormatLength::TAG);

    assert!(matches!(
        encoder.encode(),
        Err(Error::TagNotFound(tagifd)) if tagifd == TagIfd::from(field::JpegInterchangeFormatLength)
    ));
}

#[test]
fn thumbnail_data() {
    let thumbnail = [0xFF, 0xD8, 1, 2, 3, 0xFF, 0xD9];

    let mut metadata = metadata_with(
        Ifd::Thumbnail,
        [
            (0x103, Value::Short(vec![6])),
            (0x201, Value::Long(vec![0])),
            (0x202, Value::Long(vec![0])),
        ],
    );
    metadata.thumbnail_url = Some(data_url::encode(JPEG_MIME_TYPE, &thumbnail));
    metadata.little_endian = true;

    let segment = encode(metadata);
    let exif = read_back(&segment);

    let offset = exif
        .get_field(exif::Tag::JPEGInterchangeFormat, exif::In::THUMBNAIL)
        .unwrap()
        .value
        .get_uint(0)
        .unwrap() as usize;
    let length = exif
        .get_field(exif::Tag::JPEGInterchangeFormatLength, exif::In::THUMBNAIL)
        .unwrap()
        .value
        .get_uint(0)
        .unwrap() as usize;

    assert_eq!(length, thumbnail.len());
    assert_eq!(&tiff(&segment)[offset..offset + length], thumbnail);
    // Thumbnail data is the last part of the segment
    assert_eq!(offset + length, tiff(&segment).len());

    let raw = RawTiff::new(&segment);
    let (_, next) = raw.ifd(raw.first_ifd());
    assert_ne!(next, 0);
}
