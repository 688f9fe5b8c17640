use image::imageops::FilterType;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
/// The interpolation filter used when resampling a source image.
pub enum ResizeFilter {
    /// Lanczos with a window of 3; the sharpest of the three.
    #[default]
    Lanczos3,
    /// Catmull-Rom bicubic interpolation.
    CatmullRom,
    /// Linear (tent) interpolation; the softest of the three.
    Triangle,
}

impl ResizeFilter {
    pub(crate) fn filter_type(&self) -> FilterType {
        match *self {
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Triangle => FilterType::Triangle,
        }
    }
}

//===========================================================================//

/// Settings for building a set of icon layers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayerOptions {
    /// Interpolation filter for every layer.
    pub filter: ResizeFilter,
    /// Resample sizes concurrently on the rayon thread pool.  The resulting
    /// layer order is the same either way.
    pub parallel: bool,
}

impl Default for LayerOptions {
    fn default() -> LayerOptions {
        LayerOptions { filter: ResizeFilter::default(), parallel: true }
    }
}

//===========================================================================//


//===========================================================================//
