//! A library for turning a single image into multi-resolution icon files.
//!
//! # Icon containers
//!
//! An icon file holds several renditions of the same image at different
//! sizes, so that the operating system can pick the one that best fits
//! where the icon is being drawn.  This crate produces two such containers:
//!
//! * **ICO** (Windows): a little-endian header and a directory of 16-byte
//!   entries giving each image's size and file offset, followed by the image
//!   data.  Every image is embedded as a 32-bit PNG, at 14 sizes from 256x256
//!   down to 16x16.
//! * **ICNS** (macOS): a big-endian header followed by a sequence of
//!   elements, each tagged with a four-character type code.  Images are
//!   embedded as PNGs at 7 sizes from 1024x1024 down to 16x16; several sizes
//!   double as the "retina" rendition of a smaller size and so are stored
//!   under two type codes (for example, a 512x512 image is written as both
//!   `ic09` and `ic14`).
//!
//! # Pipeline
//!
//! A [`SourceImage`](struct.SourceImage.html) is decoded from PNG, JPEG or
//! WEBP data.  [`build_layers`](fn.build_layers.html) resamples it to every
//! size the chosen [`ContainerFormat`](enum.ContainerFormat.html) requires,
//! yielding a [`LayerSet`](struct.LayerSet.html) of PNG-encoded
//! [`IconLayer`](struct.IconLayer.html)s, which
//! [`encode_ico`](fn.encode_ico.html) or [`encode_icns`](fn.encode_icns.html)
//! serializes.  The [`Converter`](struct.Converter.html) wraps all of this in
//! cancellable, per-request units of work.
//!
//! # Example usage
//!
//! ```no_run
//! use iconpack::{build_layers, ContainerFormat, SourceImage};
//! use std::fs;
//!
//! let bytes = fs::read("logo.png").unwrap();
//! let source = SourceImage::from_bytes(&bytes).unwrap();
//! let layers = build_layers(&source, ContainerFormat::MacIcon).unwrap();
//! fs::write("logo.icns", layers.encode().unwrap()).unwrap();
//! for layer in layers.layers() {
//!     fs::write(layer.file_name(), layer.data()).unwrap();
//! }
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod builder;
mod convert;
mod error;
mod format;
mod icns;
mod icondir;
mod layer;
mod options;
mod ostype;
mod resample;
mod source;

pub use crate::builder::{build_layers, build_layers_with, CancelToken};
pub use crate::convert::{Converter, IconFile};
pub use crate::error::{IconError, Result};
pub use crate::format::ContainerFormat;
pub use crate::icns::{encode_icns, read_icns, write_icns, IcnsElement};
pub use crate::icondir::{encode_ico, write_ico, IcoDirectory, IcoEntry};
pub use crate::layer::{IconLayer, LayerSet};
pub use crate::options::{LayerOptions, ResizeFilter};
pub use crate::ostype::{type_codes_for_size, TypeCode};
pub use crate::resample::resize;
pub use crate::source::SourceImage;
