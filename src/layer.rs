use crate::error::{IconError, Result};
use crate::format::ContainerFormat;
use crate::icns::encode_icns;
use crate::icondir::encode_ico;
use crate::ostype::type_codes_for_size;
use image::RgbaImage;

//===========================================================================//

// The signature that all PNG files start with.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

//===========================================================================//

/// One resolution of an icon: a square image, stored as PNG data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconLayer {
    size: u32,
    data: Vec<u8>,
}

impl IconLayer {
    /// Creates a layer from already-encoded PNG data of the given edge
    /// length.  The data is not validated; see `decode_size`.
    pub fn from_png_data(size: u32, data: Vec<u8>) -> IconLayer {
        IconLayer { size, data }
    }

    /// Encodes a square RGBA bitmap as a PNG layer.
    pub(crate) fn encode(pixels: &RgbaImage) -> Result<IconLayer> {
        if pixels.width() != pixels.height() {
            encode_error!(
                "Layer bitmap must be square (was {}x{})",
                pixels.width(),
                pixels.height()
            );
        }
        let mut data = Vec::new();
        write_png(pixels, &mut data)?;
        Ok(IconLayer { size: pixels.width(), data })
    }

    /// Returns the edge length of the layer, in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the encoded PNG data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the layer, returning its PNG data.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns true if the data starts with the PNG signature.
    pub fn is_png(&self) -> bool {
        self.data.starts_with(PNG_SIGNATURE)
    }

    /// Returns a file name for saving this layer on its own, such as
    /// `icon_32x32.png`.
    pub fn file_name(&self) -> String {
        format!("icon_{}x{}.png", self.size, self.size)
    }

    /// Decodes just enough of the PNG data to determine its dimensions.
    pub fn decode_size(&self) -> Result<(u32, u32)> {
        let decoder = png::Decoder::new(self.data.as_slice());
        let png_reader = match decoder.read_info() {
            Ok(png_reader) => png_reader,
            Err(error) => invalid_data!("Malformed PNG data: {}", error),
        };
        let info = png_reader.info();
        Ok((info.width, info.height))
    }
}

//===========================================================================//

/// The complete set of layers for one icon file.
#[derive(Clone, Debug)]
pub struct LayerSet {
    format: ContainerFormat,
    layers: Vec<IconLayer>,
}

impl LayerSet {
    /// Groups layers for the given format.  Returns `UnmappedSize` if the
    /// format is ICNS and some layer has a size with no ICNS type code.
    pub fn new(
        format: ContainerFormat,
        layers: Vec<IconLayer>,
    ) -> Result<LayerSet> {
        if format == ContainerFormat::MacIcon {
            for layer in layers.iter() {
                if type_codes_for_size(layer.size()).is_none() {
                    return Err(IconError::UnmappedSize(layer.size()));
                }
            }
        }
        Ok(LayerSet { format, layers })
    }

    /// Returns the container format these layers were built for.
    pub fn format(&self) -> ContainerFormat {
        self.format
    }

    /// Returns the layers, in canonical order.
    pub fn layers(&self) -> &[IconLayer] {
        &self.layers
    }

    /// Returns the layer with the given edge length, if any.
    pub fn layer(&self, size: u32) -> Option<&IconLayer> {
        self.layers.iter().find(|layer| layer.size() == size)
    }

    /// Serializes the layers into this set's container format.
    pub fn encode(&self) -> Result<Vec<u8>> {
        match self.format {
            ContainerFormat::WindowsIcon => encode_ico(&self.layers),
            ContainerFormat::MacIcon => encode_icns(&self.layers),
        }
    }

    /// Consumes the set, returning its layers.
    pub fn into_layers(self) -> Vec<IconLayer> {
        self.layers
    }
}

//===========================================================================//

fn write_png(pixels: &RgbaImage, data: &mut Vec<u8>) -> Result<()> {
    let has_alpha = pixels.pixels().any(|pixel| pixel.0[3] != u8::MAX);
    let mut encoder = png::Encoder::new(data, pixels.width(), pixels.height());
    encoder.set_depth(png::BitDepth::Eight);
    if has_alpha {
        encoder.set_color(png::ColorType::Rgba);
    } else {
        encoder.set_color(png::ColorType::Rgb);
    }
    let mut writer = encoder.write_header()?;
    if has_alpha {
        writer.write_image_data(pixels.as_raw())?;
    } else {
        let rgba_data = pixels.as_raw();
        let mut rgb_data = Vec::<u8>::with_capacity((rgba_data.len() / 4) * 3);
        for pixel in rgba_data.chunks_exact(4) {
            rgb_data.extend_from_slice(&pixel[..3]);
        }
        writer.write_image_data(&rgb_data)?;
    }
    writer.finish()?;
    Ok(())
}

//===========================================================================//


//===========================================================================//
