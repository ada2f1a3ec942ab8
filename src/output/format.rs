//! Image formats and encoding.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::buffer::ConvertBuffer;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{Frame, RgbImage, RgbaImage};

use super::OutputError;
use crate::error::ConfigError;

/// File extensions that count as "already has an image extension".
pub const IMAGE_EXTENSIONS: [&str; 5] = [".png", ".jpg", ".jpeg", ".bmp", ".gif"];

/// Supported output formats. `jpg` and `jpeg` encode identically but keep
/// the spelling the user asked for, since it ends up in generated filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Jpeg,
    Bmp,
    Gif,
}

impl ImageFormat {
    /// Lowercase name as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Gif => "gif",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" => Ok(ImageFormat::Jpg),
            "jpeg" => Ok(ImageFormat::Jpeg),
            "bmp" => Ok(ImageFormat::Bmp),
            "gif" => Ok(ImageFormat::Gif),
            _ => Err(ConfigError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive check against [`IMAGE_EXTENSIONS`].
pub fn has_image_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Encode a bitmap. `quality` only affects JPEG output.
pub fn encode_image(
    image: &RgbaImage,
    format: ImageFormat,
    quality: u8,
) -> Result<Vec<u8>, OutputError> {
    let mut buffer = Vec::new();
    let encode_err = |source| OutputError::Encode {
        format: format.name(),
        source,
    };

    match format {
        ImageFormat::Png => image
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .map_err(encode_err)?,
        ImageFormat::Bmp => image
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Bmp)
            .map_err(encode_err)?,
        ImageFormat::Jpg | ImageFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb: RgbImage = image.convert();
            JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
                .encode_image(&rgb)
                .map_err(encode_err)?;
        }
        ImageFormat::Gif => {
            let mut encoder = GifEncoder::new(&mut buffer);
            encoder
                .encode_frame(Frame::new(image.clone()))
                .map_err(encode_err)?;
        }
    }

    log::debug!(
        "Encoded {}x{} image as {} ({} bytes)",
        image.width(),
        image.height(),
        format,
        buffer.len()
    );
    Ok(buffer)
}
