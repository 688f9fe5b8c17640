#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//===========================================================================//

// Standard and high-DPI Windows shell sizes, largest first.
const ICO_SIZES: &[u32] =
    &[256, 96, 80, 72, 64, 60, 48, 40, 36, 32, 30, 24, 20, 16];

const ICNS_SIZES: &[u32] = &[1024, 512, 256, 128, 64, 32, 16];

//===========================================================================//

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
/// The icon container to produce.
pub enum ContainerFormat {
    /// Windows icon (ICO) files
    WindowsIcon,
    /// macOS icon (ICNS) files
    MacIcon,
}

impl ContainerFormat {
    /// Returns the edge lengths, in pixels, of every layer this format
    /// requires, in canonical (descending) order.
    pub fn sizes(&self) -> &'static [u32] {
        match *self {
            ContainerFormat::WindowsIcon => ICO_SIZES,
            ContainerFormat::MacIcon => ICNS_SIZES,
        }
    }

    /// Returns the file extension (without the dot) for this format.
    pub fn extension(&self) -> &'static str {
        match *self {
            ContainerFormat::WindowsIcon => "ico",
            ContainerFormat::MacIcon => "icns",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match *self {
            ContainerFormat::WindowsIcon => "image/x-icon",
            ContainerFormat::MacIcon => "image/icns",
        }
    }

    pub(crate) fn from_extension(extension: &str) -> Option<ContainerFormat> {
        if extension.eq_ignore_ascii_case("ico") {
            Some(ContainerFormat::WindowsIcon)
        } else if extension.eq_ignore_ascii_case("icns") {
            Some(ContainerFormat::MacIcon)
        } else {
            None
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.extension())
    }
}

impl FromStr for ContainerFormat {
    type Err = String;

    fn from_str(string: &str) -> Result<ContainerFormat, String> {
        let extension = string.strip_prefix('.').unwrap_or(string);
        ContainerFormat::from_extension(extension)
            .ok_or_else(|| format!("Unknown icon format: {:?}", string))
    }
}

//===========================================================================//


//===========================================================================//
