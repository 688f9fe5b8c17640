use crate::error::{IconError, Result};
use crate::format::ContainerFormat;
use crate::layer::{IconLayer, LayerSet};
use crate::options::LayerOptions;
use crate::resample::resize;
use crate::source::SourceImage;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

//===========================================================================//

/// A shared flag for abandoning an in-flight build.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that has not been cancelled.
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    /// Marks the token as cancelled.  Every clone observes the change.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns true if `cancel` has been called on this token or a clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub(crate) fn same_as(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

//===========================================================================//

/// Resamples the source image at every size the format requires, using the
/// default options.
pub fn build_layers(
    source: &SourceImage,
    format: ContainerFormat,
) -> Result<LayerSet> {
    build_layers_with(
        source,
        format,
        &LayerOptions::default(),
        &CancelToken::new(),
    )
}

/// Resamples the source image at every size the format requires.  Layers
/// come back in the format's canonical order whether or not they were
/// resampled concurrently.  If any size fails, or the token is cancelled
/// before every size is done, no layers are returned.
pub fn build_layers_with(
    source: &SourceImage,
    format: ContainerFormat,
    options: &LayerOptions,
    cancel: &CancelToken,
) -> Result<LayerSet> {
    let sizes = format.sizes();
    let resize_one = |&size: &u32| -> Result<IconLayer> {
        if cancel.is_cancelled() {
            return Err(IconError::Cancelled(format!("{}x{}", size, size)));
        }
        resize(source, size, options.filter)
    };
    let layers: Vec<IconLayer> = if options.parallel {
        sizes.par_iter().map(resize_one).collect::<Result<_>>()?
    } else {
        sizes.iter().map(resize_one).collect::<Result<_>>()?
    };
    if cancel.is_cancelled() {
        return Err(IconError::Cancelled(format!("{} layers", format)));
    }
    debug_assert_eq!(layers.len(), sizes.len());
    log::debug!(
        "Built {} {} layers from {}x{} source",
        layers.len(),
        format,
        source.width(),
        source.height()
    );
    LayerSet::new(format, layers)
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{build_layers, build_layers_with, CancelToken};
    use crate::error::IconError;
    use crate::format::ContainerFormat;
    use crate::options::{LayerOptions, ResizeFilter};
    use crate::source::SourceImage;

    fn gradient(width: u32, height: u32) -> SourceImage {
        let mut rgba = Vec::new();
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&[x as u8, y as u8, 128, 255]);
            }
        }
        SourceImage::from_rgba(width, height, rgba).unwrap()
    }

    #[test]
    fn windows_layers_follow_size_table() {
        let source = gradient(64, 64);
        let set = build_layers(&source, ContainerFormat::WindowsIcon).unwrap();
        assert_eq!(set.format(), ContainerFormat::WindowsIcon);
        let sizes: Vec<u32> =
            set.layers().iter().map(|layer| layer.size()).collect();
        assert_eq!(sizes, ContainerFormat::WindowsIcon.sizes());
        for layer in set.layers() {
            let size = layer.size();
            assert_eq!(layer.decode_size().unwrap(), (size, size));
        }
    }

    #[test]
    fn sequential_and_parallel_builds_match() {
        let source = gradient(50, 30);
        let mut options = LayerOptions {
            filter: ResizeFilter::CatmullRom,
            parallel: true,
        };
        let cancel = CancelToken::new();
        let parallel = build_layers_with(
            &source,
            ContainerFormat::MacIcon,
            &options,
            &cancel,
        )
        .unwrap();
        options.parallel = false;
        let sequential = build_layers_with(
            &source,
            ContainerFormat::MacIcon,
            &options,
            &cancel,
        )
        .unwrap();
        assert_eq!(parallel.layers(), sequential.layers());
    }

    #[test]
    fn cancelled_build_returns_nothing() {
        let source = gradient(16, 16);
        let cancel = CancelToken::new();
        cancel.clone().cancel();
        assert!(cancel.is_cancelled());
        let result = build_layers_with(
            &source,
            ContainerFormat::WindowsIcon,
            &LayerOptions::default(),
            &cancel,
        );
        assert!(matches!(result, Err(IconError::Cancelled(_))));
    }
}

//===========================================================================//
