use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use imgmeta_common::image::Dimensions;
use imgmeta_exif::canvas::CanvasError;
use imgmeta_exif::{encode_image, Canvas, ExifEncoder, ExifMetadata, MetadataEncoder, Thumbnail};
use imgmeta_jpeg::Jpeg;
use tracing_subscriber::prelude::*;

/// Writes a normalized Exif segment into a JPEG image
#[derive(Parser, Debug)]
#[command(name = "imgmeta-exif", version)]
struct Cli {
    /// JPEG image
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the image with the new Exif segment
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// JPEG file that is embedded as thumbnail
    #[arg(long, value_name = "FILE")]
    thumbnail: Option<PathBuf>,

    /// Start quality for the thumbnail
    #[arg(long, default_value_t = 0.9)]
    quality: f32,

    /// Write the Exif data in big endian byte order
    #[arg(long)]
    big_endian: bool,

    /// Print the metadata tree
    #[arg(long)]
    dump: bool,
}

/// Thumbnail that is already encoded
///
/// The quality can't be changed, the data is always used as is.
struct EncodedThumbnail {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl EncodedThumbnail {
    fn new(data: Vec<u8>) -> anyhow::Result<Self> {
        let sof = Jpeg::new(&data)?.sof()?;
        let (width, height) = (sof.width(), sof.height());

        Ok(Self {
            data,
            width,
            height,
        })
    }
}

impl Dimensions for EncodedThumbnail {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl Canvas for EncodedThumbnail {
    fn encode_jpeg(&self, _quality: f32) -> Result<Vec<u8>, CanvasError> {
        Ok(self.data.clone())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::builder().from_env_lossy())
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();

    let image_data = std::fs::read(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let sof = Jpeg::new(&image_data)?.sof()?;
    let dimensions = (sof.width(), sof.height());

    let thumbnail = cli
        .thumbnail
        .as_ref()
        .map(|path| {
            let data = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            EncodedThumbnail::new(data)
        })
        .transpose()?;

    let mut encoder = ExifEncoder::new(ExifMetadata {
        little_endian: !cli.big_endian,
        ..Default::default()
    });

    let output = encode_image(
        &mut encoder,
        &image_data,
        &dimensions,
        thumbnail.as_ref().map(|canvas| Thumbnail {
            canvas,
            quality: cli.quality,
        }),
    )?;

    tracing::info!(
        "Wrote {} segment for {}x{} pixels",
        encoder.mime_type(),
        dimensions.0,
        dimensions.1
    );

    if cli.dump {
        println!("{}", encoder.metadata().debug_dump());
    }

    if let Some(path) = &cli.output {
        std::fs::write(path, output)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
