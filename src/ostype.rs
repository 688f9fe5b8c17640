use std::fmt;
use std::str::FromStr;

//===========================================================================//

/// A four-character ICNS element type, such as `ic10` or `icp4`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TypeCode(pub [u8; 4]);

impl TypeCode {
    /// Returns the raw bytes of the type code.
    pub fn bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        for &byte in self.0.iter() {
            write!(formatter, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl FromStr for TypeCode {
    type Err = String;

    fn from_str(string: &str) -> Result<TypeCode, String> {
        let bytes = string.as_bytes();
        if bytes.len() != 4 || !bytes.is_ascii() {
            return Err(format!(
                "Type code must be four ASCII characters (was {:?})",
                string
            ));
        }
        Ok(TypeCode([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

//===========================================================================//

// Several nominal sizes are also the @2x variant of a smaller size, so the
// same PNG data is stored under more than one type code.
const TYPE_CODES: &[(u32, &[TypeCode])] = &[
    (1024, &[TypeCode(*b"ic10")]),
    (512, &[TypeCode(*b"ic09"), TypeCode(*b"ic14")]),
    (256, &[TypeCode(*b"ic08"), TypeCode(*b"ic13")]),
    (128, &[TypeCode(*b"ic07")]),
    (64, &[TypeCode(*b"icp6"), TypeCode(*b"ic12")]),
    (32, &[TypeCode(*b"icp5"), TypeCode(*b"ic11")]),
    (16, &[TypeCode(*b"icp4")]),
];

/// Returns the ICNS type codes that an image of the given edge length is
/// stored under, in the order they are written, or `None` if ICNS has no
/// PNG element of that size.
pub fn type_codes_for_size(size: u32) -> Option<&'static [TypeCode]> {
    TYPE_CODES
        .iter()
        .find(|&&(table_size, _)| table_size == size)
        .map(|&(_, codes)| codes)
}

//===========================================================================//


//===========================================================================//
