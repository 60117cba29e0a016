/// Encodes 8-bit RGB pixels as JPEG
///
/// `quality` is given in the range `0.0..=1.0`.
pub fn encode_rgb(
    pixels: &[u8],
    width: u16,
    height: u16,
    quality: f32,
) -> Result<Vec<u8>, EncoderError> {
    let mut data = Vec::new();

    let mut encoder = jpeg_encoder::Encoder::new(&mut data, quality_level(quality));
    encoder.set_optimized_huffman_tables(true);
    encoder.encode(pixels, width, height, jpeg_encoder::ColorType::Rgb)?;

    Ok(data)
}

/// Quality level in the range `1..=100` for a quality in `0.0..=1.0`
///
/// ```
/// # use imgmeta_jpeg::encoder::quality_level;
/// assert_eq!(quality_level(0.9), 90);
/// assert_eq!(quality_level(0.), 1);
/// assert_eq!(quality_level(2.), 100);
/// ```
pub fn quality_level(quality: f32) -> u8 {
    let percent = quality * 100.;
    (1..=100_u8)
        .find(|level| f32::from(*level) >= percent)
        .unwrap_or(100)
}

#[derive(Debug, thiserror::Error)]
pub enum EncoderError {
    #[error("JPEG encoder: {0}")]
    Encoding(#[from] jpeg_encoder::EncodingError),
}
