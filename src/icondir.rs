use crate::error::{IconError, Result};
use crate::layer::IconLayer;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Seek, SeekFrom, Write};

//===========================================================================//

// Resource type number for icons (cursors would be 2).
const ICON_RESOURCE_TYPE: u16 = 1;

// Sizes of the ICONDIR header and of each ICONDIRENTRY, in bytes.
const ICONDIR_LEN: u32 = 6;
const ICONDIRENTRY_LEN: u32 = 16;

// Every layer is a 32-bit PNG with a single color plane.
const COLOR_PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 32;

//===========================================================================//

/// Serializes the layers into an ICO file, embedding each one as PNG data.
pub fn encode_ico(layers: &[IconLayer]) -> Result<Vec<u8>> {
    let payload_len: usize =
        layers.iter().map(|layer| layer.data().len()).sum();
    let mut output = Vec::with_capacity(
        ICONDIR_LEN as usize
            + ICONDIRENTRY_LEN as usize * layers.len()
            + payload_len,
    );
    write_ico(layers, &mut output)?;
    Ok(output)
}

/// Writes the layers out as an ICO file.
pub fn write_ico<W: Write>(
    layers: &[IconLayer],
    mut writer: W,
) -> Result<()> {
    if layers.len() > (u16::MAX as usize) {
        encode_error!(
            "Too many layers for an ICO file (was {}, but max is {})",
            layers.len(),
            u16::MAX
        );
    }
    writer.write_u16::<LittleEndian>(0)?; // reserved
    writer.write_u16::<LittleEndian>(ICON_RESOURCE_TYPE)?;
    writer.write_u16::<LittleEndian>(layers.len() as u16)?;
    let mut data_offset =
        ICONDIR_LEN + ICONDIRENTRY_LEN * (layers.len() as u32);
    for layer in layers.iter() {
        // A width/height byte of zero indicates a size of 256 or more.
        let dimension =
            if layer.size() > 255 { 0 } else { layer.size() as u8 };
        writer.write_u8(dimension)?; // width
        writer.write_u8(dimension)?; // height
        writer.write_u8(0)?; // number of colors
        writer.write_u8(0)?; // reserved
        writer.write_u16::<LittleEndian>(COLOR_PLANES)?;
        writer.write_u16::<LittleEndian>(BITS_PER_PIXEL)?;
        let data_size = match u32::try_from(layer.data().len()) {
            Ok(data_size) => data_size,
            Err(_) => encode_error!(
                "{}x{} layer is too large for an ICO file ({} bytes)",
                layer.size(),
                layer.size(),
                layer.data().len()
            ),
        };
        writer.write_u32::<LittleEndian>(data_size)?;
        writer.write_u32::<LittleEndian>(data_offset)?;
        data_offset = match data_offset.checked_add(data_size) {
            Some(next_offset) => next_offset,
            None => encode_error!("ICO file would exceed 4 GiB"),
        };
    }
    for layer in layers.iter() {
        writer.write_all(layer.data())?;
    }
    log::debug!(
        "Wrote ICO file with {} images ({} bytes)",
        layers.len(),
        data_offset
    );
    Ok(())
}

//===========================================================================//

/// The directory of an ICO file, with each entry's image data loaded.
#[derive(Clone, Debug)]
pub struct IcoDirectory {
    entries: Vec<IcoEntry>,
}

impl IcoDirectory {
    /// Returns the entries, in directory order.
    pub fn entries(&self) -> &[IcoEntry] {
        &self.entries
    }

    /// Reads an ICO file into memory.  Returns a `Decode` error if the file
    /// is malformed or truncated.
    pub fn read<R: Read + Seek>(reader: R) -> Result<IcoDirectory> {
        IcoDirectory::read_directory(reader).map_err(IconError::truncated)
    }

    fn read_directory<R: Read + Seek>(
        mut reader: R,
    ) -> Result<IcoDirectory> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            invalid_data!(
                "Invalid reserved field value in ICONDIR \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let restype = reader.read_u16::<LittleEndian>()?;
        if restype != ICON_RESOURCE_TYPE {
            invalid_data!(
                "Invalid resource type (was {}, but must be {})",
                restype,
                ICON_RESOURCE_TYPE
            );
        }
        let num_entries = reader.read_u16::<LittleEndian>()? as usize;
        let mut entries = Vec::<IcoEntry>::with_capacity(num_entries);
        for _ in 0..num_entries {
            let width_byte = reader.read_u8()?;
            let height_byte = reader.read_u8()?;
            let num_colors = reader.read_u8()?;
            let reserved = reader.read_u8()?;
            if reserved != 0 {
                invalid_data!(
                    "Invalid reserved field value in ICONDIRENTRY \
                     (was {}, but must be 0)",
                    reserved
                );
            }
            let color_planes = reader.read_u16::<LittleEndian>()?;
            let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
            let data_size = reader.read_u32::<LittleEndian>()?;
            let data_offset = reader.read_u32::<LittleEndian>()?;
            entries.push(IcoEntry {
                width_byte,
                height_byte,
                num_colors,
                color_planes,
                bits_per_pixel,
                data_size,
                data_offset,
                data: Vec::new(),
            });
        }
        for entry in entries.iter_mut() {
            reader.seek(SeekFrom::Start(entry.data_offset as u64))?;
            let mut data = vec![0u8; entry.data_size as usize];
            reader.read_exact(&mut data)?;
            entry.data = data;
        }
        Ok(IcoDirectory { entries })
    }

    /// Converts the entries back into layers, taking each layer's size from
    /// the directory.
    pub fn into_layers(self) -> Vec<IconLayer> {
        self.entries
            .into_iter()
            .map(|entry| IconLayer::from_png_data(entry.width(), entry.data))
            .collect()
    }
}

//===========================================================================//

/// One ICONDIRENTRY of an ICO file.
#[derive(Clone, Debug)]
pub struct IcoEntry {
    width_byte: u8,
    height_byte: u8,
    num_colors: u8,
    color_planes: u16,
    bits_per_pixel: u16,
    data_size: u32,
    data_offset: u32,
    data: Vec<u8>,
}

impl IcoEntry {
    /// Returns the width of the image, in pixels, treating a width byte of
    /// zero as 256.
    pub fn width(&self) -> u32 {
        if self.width_byte == 0 { 256 } else { self.width_byte as u32 }
    }

    /// Returns the height of the image, in pixels, treating a height byte of
    /// zero as 256.
    pub fn height(&self) -> u32 {
        if self.height_byte == 0 { 256 } else { self.height_byte as u32 }
    }

    /// Returns the raw width and height bytes as stored in the directory.
    pub fn dimension_bytes(&self) -> (u8, u8) {
        (self.width_byte, self.height_byte)
    }

    /// Returns the size of the color palette (zero for PNG images).
    pub fn num_colors(&self) -> u8 {
        self.num_colors
    }

    /// Returns the number of color planes.
    pub fn color_planes(&self) -> u16 {
        self.color_planes
    }

    /// Returns the bits-per-pixel (color depth) of the image.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns the length of the image data, in bytes.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Returns the absolute file offset of the image data.
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }

    /// Returns the raw, encoded image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

//===========================================================================//


//===========================================================================//
