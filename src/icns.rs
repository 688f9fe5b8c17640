use crate::error::{IconError, Result};
use crate::layer::IconLayer;
use crate::ostype::{type_codes_for_size, TypeCode};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

//===========================================================================//

// The first four bytes of every ICNS file.
const ICNS_MAGIC: &[u8; 4] = b"icns";

// Both the file header and each element header are an OSType followed by a
// big-endian u32 length, which includes the header itself.
const HEADER_LEN: u32 = 8;

//===========================================================================//

/// Serializes the layers into an ICNS file.  Each layer is stored under
/// every type code listed for its size, in table order; layers whose size
/// has no ICNS type code are left out.
pub fn encode_icns(layers: &[IconLayer]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    write_icns(layers, &mut output)?;
    Ok(output)
}

/// Writes the layers out as an ICNS file.  See `encode_icns`.
pub fn write_icns<W: Write>(
    layers: &[IconLayer],
    mut writer: W,
) -> Result<()> {
    let mut elements = Vec::<(TypeCode, &[u8])>::new();
    for layer in layers.iter() {
        match type_codes_for_size(layer.size()) {
            Some(codes) => {
                for &code in codes.iter() {
                    elements.push((code, layer.data()));
                }
            }
            None => {
                log::warn!(
                    "Skipping {}x{} layer, which has no ICNS type code",
                    layer.size(),
                    layer.size()
                );
            }
        }
    }
    let mut total_size = HEADER_LEN;
    for &(code, data) in elements.iter() {
        total_size = match element_size(data)
            .and_then(|size| total_size.checked_add(size))
        {
            Some(total_size) => total_size,
            None => encode_error!(
                "ICNS file would exceed 4 GiB at {} element",
                code
            ),
        };
    }
    writer.write_all(ICNS_MAGIC)?;
    writer.write_u32::<BigEndian>(total_size)?;
    for &(code, data) in elements.iter() {
        writer.write_all(code.bytes())?;
        // Already checked for overflow above.
        writer.write_u32::<BigEndian>(data.len() as u32 + HEADER_LEN)?;
        writer.write_all(data)?;
    }
    log::debug!(
        "Wrote ICNS file with {} elements ({} bytes)",
        elements.len(),
        total_size
    );
    Ok(())
}

fn element_size(data: &[u8]) -> Option<u32> {
    u32::try_from(data.len()).ok()?.checked_add(HEADER_LEN)
}

//===========================================================================//

/// One element of an ICNS file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IcnsElement {
    code: TypeCode,
    data: Vec<u8>,
}

impl IcnsElement {
    /// Returns the element's type code.
    pub fn type_code(&self) -> TypeCode {
        self.code
    }

    /// Returns the element's data, not including its header.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Reads every element of an ICNS file.  Returns a `Decode` error if the
/// magic number is wrong, if the header's length disagrees with the amount
/// of data present, or if an element runs past the end of the file.
pub fn read_icns<R: Read>(reader: R) -> Result<Vec<IcnsElement>> {
    read_elements(reader).map_err(IconError::truncated)
}

fn read_elements<R: Read>(mut reader: R) -> Result<Vec<IcnsElement>> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != ICNS_MAGIC {
        invalid_data!("Not an ICNS file (magic was {:?})", magic);
    }
    let total_size = reader.read_u32::<BigEndian>()?;
    if total_size < HEADER_LEN {
        invalid_data!(
            "Invalid ICNS file length (was {}, but must be at least {})",
            total_size,
            HEADER_LEN
        );
    }
    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;
    if body.len() as u64 != (total_size - HEADER_LEN) as u64 {
        invalid_data!(
            "ICNS header says {} bytes, but file has {}",
            total_size,
            body.len() as u64 + HEADER_LEN as u64
        );
    }
    let mut elements = Vec::new();
    let mut remaining = body.as_slice();
    while !remaining.is_empty() {
        let mut code = [0u8; 4];
        remaining.read_exact(&mut code)?;
        let element_size = remaining.read_u32::<BigEndian>()?;
        if element_size < HEADER_LEN {
            invalid_data!(
                "Invalid length for {} element (was {}, but must be at \
                 least {})",
                TypeCode(code),
                element_size,
                HEADER_LEN
            );
        }
        let data_len = (element_size - HEADER_LEN) as usize;
        if data_len > remaining.len() {
            invalid_data!(
                "{} element needs {} bytes, but only {} remain",
                TypeCode(code),
                data_len,
                remaining.len()
            );
        }
        let (data, rest) = remaining.split_at(data_len);
        elements
            .push(IcnsElement { code: TypeCode(code), data: data.to_vec() });
        remaining = rest;
    }
    Ok(elements)
}

//===========================================================================//


//===========================================================================//
