use crate::error::{IconError, Result};
use image::{ImageFormat, RgbaImage};
use std::io::Read;

//===========================================================================//

// Source formats accepted from uploads and generated images.
const ACCEPTED_FORMATS: &[ImageFormat] =
    &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

//===========================================================================//

/// A decoded source image, ready to be resampled into icon layers.
#[derive(Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Decodes a PNG, JPEG or WEBP image from memory.  Returns
    /// `UnsupportedInput` if the bytes are not one of those formats, or
    /// `Decode` if they are but the data is corrupt.
    pub fn from_bytes(bytes: &[u8]) -> Result<SourceImage> {
        let format = match image::guess_format(bytes) {
            Ok(format) => format,
            Err(error) => {
                return Err(IconError::UnsupportedInput(format!(
                    "Unrecognized image data: {}",
                    error
                )));
            }
        };
        if !ACCEPTED_FORMATS.contains(&format) {
            return Err(IconError::UnsupportedInput(format!(
                "Unsupported image format: {:?}",
                format
            )));
        }
        let decoded = match image::load_from_memory_with_format(bytes, format)
        {
            Ok(decoded) => decoded,
            Err(error) => {
                invalid_data!("Failed to decode {:?} image: {}", format, error)
            }
        };
        let pixels = decoded.to_rgba8();
        if pixels.width() == 0 || pixels.height() == 0 {
            invalid_data!(
                "Decoded image is empty ({}x{})",
                pixels.width(),
                pixels.height()
            );
        }
        log::debug!(
            "Decoded {:?} source image ({}x{})",
            format,
            pixels.width(),
            pixels.height()
        );
        Ok(SourceImage { pixels })
    }

    /// Reads and decodes a PNG, JPEG or WEBP image from a reader.
    pub fn read<R: Read>(mut reader: R) -> Result<SourceImage> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        SourceImage::from_bytes(&bytes)
    }

    /// Creates a source image from raw RGBA data.  The `width` and `height`
    /// must be nonzero, and `rgba_data` must have `4 * width * height` bytes
    /// in row-major order from top to bottom.
    pub fn from_rgba(
        width: u32,
        height: u32,
        rgba_data: Vec<u8>,
    ) -> Result<SourceImage> {
        if width == 0 || height == 0 {
            return Err(IconError::UnsupportedInput(format!(
                "Invalid dimensions ({}x{}, but both must be nonzero)",
                width, height
            )));
        }
        let data_len = rgba_data.len();
        match RgbaImage::from_raw(width, height, rgba_data) {
            Some(pixels) => Ok(SourceImage { pixels }),
            None => Err(IconError::UnsupportedInput(format!(
                "Invalid data length (was {}, but must be {} for {}x{} \
                 image)",
                data_len,
                (width as u64) * (height as u64) * 4,
                width,
                height
            ))),
        }
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub(crate) fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::SourceImage;
    use crate::error::IconError;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(format: ImageFormat) -> Vec<u8> {
        let image = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .to_rgb8()
            .write_to(&mut Cursor::new(&mut bytes), format)
            .unwrap();
        bytes
    }

    #[test]
    fn decode_png_source() {
        let source = SourceImage::from_bytes(&encode(ImageFormat::Png))
            .unwrap();
        assert_eq!(source.width(), 3);
        assert_eq!(source.height(), 2);
        assert_eq!(source.pixels().get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn decode_jpeg_source() {
        let source =
            SourceImage::read(Cursor::new(encode(ImageFormat::Jpeg))).unwrap();
        assert_eq!(source.width(), 3);
        assert_eq!(source.height(), 2);
    }

    #[test]
    fn reject_unrecognized_bytes() {
        let result = SourceImage::from_bytes(b"definitely not an image");
        assert!(matches!(result, Err(IconError::UnsupportedInput(_))));
    }

    #[test]
    fn reject_truncated_png() {
        let mut bytes = encode(ImageFormat::Png);
        bytes.truncate(40);
        let result = SourceImage::from_bytes(&bytes);
        assert!(matches!(result, Err(IconError::Decode(_))));
    }

    #[test]
    fn rgba_data_must_match_dimensions() {
        assert!(SourceImage::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            SourceImage::from_rgba(2, 2, vec![0; 15]),
            Err(IconError::UnsupportedInput(_))
        ));
        assert!(matches!(
            SourceImage::from_rgba(0, 2, Vec::new()),
            Err(IconError::UnsupportedInput(_))
        ));
    }
}

//===========================================================================//
