use crate::error::{IconError, Result};
use crate::layer::IconLayer;
use crate::options::ResizeFilter;
use crate::source::SourceImage;
use image::imageops;

//===========================================================================//

// Largest edge length that any supported container can hold.
const MAX_EDGE_LENGTH: u32 = 1024;

//===========================================================================//

/// Resamples the source image to an `edge_length` x `edge_length` square and
/// encodes the result as a PNG layer.  Non-square sources are stretched to
/// fill the square.
pub fn resize(
    source: &SourceImage,
    edge_length: u32,
    filter: ResizeFilter,
) -> Result<IconLayer> {
    if edge_length == 0 || edge_length > MAX_EDGE_LENGTH {
        return Err(IconError::Resize(format!(
            "Invalid edge length (was {}, but must be 1 to {})",
            edge_length, MAX_EDGE_LENGTH
        )));
    }
    let resized = imageops::resize(
        source.pixels(),
        edge_length,
        edge_length,
        filter.filter_type(),
    );
    if resized.width() != edge_length || resized.height() != edge_length {
        return Err(IconError::Resize(format!(
            "Resampled image has wrong dimensions \
             (was {}x{}, but should be {}x{})",
            resized.width(),
            resized.height(),
            edge_length,
            edge_length
        )));
    }
    let layer = IconLayer::encode(&resized)?;
    log::debug!(
        "Resampled {}x{} source to {}x{} ({} PNG bytes)",
        source.width(),
        source.height(),
        edge_length,
        edge_length,
        layer.data().len()
    );
    Ok(layer)
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::resize;
    use crate::error::IconError;
    use crate::options::ResizeFilter;
    use crate::source::SourceImage;

    fn checkerboard(width: u32, height: u32) -> SourceImage {
        let mut rgba = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let value = if (x + y) % 2 == 0 { 0 } else { 255 };
                rgba.extend_from_slice(&[value, value, value, 255]);
            }
        }
        SourceImage::from_rgba(width, height, rgba).unwrap()
    }

    #[test]
    fn resize_to_exact_square() {
        let source = checkerboard(40, 40);
        let layer = resize(&source, 16, ResizeFilter::Lanczos3).unwrap();
        assert_eq!(layer.size(), 16);
        assert_eq!(layer.decode_size().unwrap(), (16, 16));
    }

    #[test]
    fn stretch_non_square_source() {
        let source = checkerboard(30, 10);
        let layer = resize(&source, 24, ResizeFilter::CatmullRom).unwrap();
        assert_eq!(layer.decode_size().unwrap(), (24, 24));
    }

    #[test]
    fn upscale_small_source() {
        let source = checkerboard(2, 2);
        let layer = resize(&source, 256, ResizeFilter::Triangle).unwrap();
        assert_eq!(layer.decode_size().unwrap(), (256, 256));
    }

    #[test]
    fn preserve_transparency() {
        let rgba = vec![0u8; 8 * 8 * 4];
        let source = SourceImage::from_rgba(8, 8, rgba).unwrap();
        let layer = resize(&source, 4, ResizeFilter::Lanczos3).unwrap();
        let decoded = image::load_from_memory(layer.data()).unwrap();
        let decoded = decoded.to_rgba8();
        assert!(decoded.pixels().all(|pixel| pixel.0[3] == 0));
    }

    #[test]
    fn reject_zero_edge_length() {
        let source = checkerboard(4, 4);
        assert!(matches!(
            resize(&source, 0, ResizeFilter::Lanczos3),
            Err(IconError::Resize(_))
        ));
    }
}

//===========================================================================//
