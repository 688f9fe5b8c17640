//! Request-scoped conversions with cancellation.
//!
//! Each conversion runs under a request identifier.  Starting a new request
//! with an identifier that is already in flight cancels the older one, so a
//! caller that switches formats mid-build only ever gets the newest result.

use crate::builder::{build_layers_with, CancelToken};
use crate::error::{IconError, Result};
use crate::format::ContainerFormat;
use crate::layer::LayerSet;
use crate::options::LayerOptions;
use crate::source::SourceImage;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

//===========================================================================//

/// A finished icon file, along with the layers it was built from.
#[derive(Clone, Debug)]
pub struct IconFile {
    layers: LayerSet,
    data: Vec<u8>,
}

impl IconFile {
    /// Returns the container format of the file.
    pub fn format(&self) -> ContainerFormat {
        self.layers.format()
    }

    /// Returns the encoded file contents.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the file, returning its encoded contents.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the layers, for previewing or saving sizes individually.
    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    /// Returns the file extension, `ico` or `icns`.
    pub fn extension(&self) -> &'static str {
        self.format().extension()
    }

    /// Returns the default file name, `icon.ico` or `icon.icns`.
    pub fn file_name(&self) -> String {
        format!("icon.{}", self.extension())
    }

    /// Returns the MIME type of the file.
    pub fn mime_type(&self) -> &'static str {
        self.format().mime_type()
    }
}

//===========================================================================//

/// Runs conversions and tracks the in-flight ones so that they can be
/// cancelled by request identifier.
#[derive(Debug, Default)]
pub struct Converter {
    options: LayerOptions,
    in_flight: Mutex<HashMap<String, CancelToken>>,
}

impl Converter {
    /// Creates a converter with default layer options.
    pub fn new() -> Converter {
        Converter::default()
    }

    /// Creates a converter with the given layer options.
    pub fn with_options(options: LayerOptions) -> Converter {
        Converter { options, in_flight: Mutex::new(HashMap::new()) }
    }

    /// Returns the layer options used for every conversion.
    pub fn options(&self) -> &LayerOptions {
        &self.options
    }

    /// Decodes the image bytes and converts them into an icon file.
    pub fn convert(
        &self,
        request_id: &str,
        bytes: &[u8],
        format: ContainerFormat,
    ) -> Result<IconFile> {
        let cancel = self.begin(request_id);
        let result = SourceImage::from_bytes(bytes).and_then(|source| {
            self.run(request_id, &source, format, &cancel)
        });
        self.finish(request_id, &cancel);
        result
    }

    /// Converts an already-decoded image into an icon file.
    pub fn convert_image(
        &self,
        request_id: &str,
        source: &SourceImage,
        format: ContainerFormat,
    ) -> Result<IconFile> {
        let cancel = self.begin(request_id);
        let result = self.run(request_id, source, format, &cancel);
        self.finish(request_id, &cancel);
        result
    }

    /// Cancels the in-flight request with the given identifier.  Returns
    /// false if no such request is running.
    pub fn cancel(&self, request_id: &str) -> bool {
        match self.lock().get(request_id) {
            Some(cancel) => {
                cancel.cancel();
                log::debug!("Cancelled request {:?}", request_id);
                true
            }
            None => false,
        }
    }

    /// Returns true if a request with the given identifier is running.
    pub fn is_in_flight(&self, request_id: &str) -> bool {
        self.lock().contains_key(request_id)
    }

    fn run(
        &self,
        request_id: &str,
        source: &SourceImage,
        format: ContainerFormat,
        cancel: &CancelToken,
    ) -> Result<IconFile> {
        let layers = build_layers_with(source, format, &self.options, cancel)
            .map_err(|error| match error {
                IconError::Cancelled(_) => {
                    IconError::Cancelled(request_id.to_string())
                }
                other => other,
            })?;
        if cancel.is_cancelled() {
            return Err(IconError::Cancelled(request_id.to_string()));
        }
        let data = layers.encode()?;
        log::info!(
            "Request {:?} produced {} {} bytes from {} layers",
            request_id,
            data.len(),
            format,
            layers.layers().len()
        );
        Ok(IconFile { layers, data })
    }

    fn begin(&self, request_id: &str) -> CancelToken {
        let cancel = CancelToken::new();
        let stale = self.lock().insert(request_id.to_string(), cancel.clone());
        if let Some(stale) = stale {
            log::warn!("Request {:?} superseded by a newer one", request_id);
            stale.cancel();
        }
        cancel
    }

    fn finish(&self, request_id: &str, cancel: &CancelToken) {
        let mut in_flight = self.lock();
        // A newer request may have taken over this identifier.
        let is_current = in_flight
            .get(request_id)
            .is_some_and(|current| current.same_as(cancel));
        if is_current {
            in_flight.remove(request_id);
        }
    }

    // The map holds only cancel tokens, so it stays usable after a panic in
    // another thread.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CancelToken>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//===========================================================================//


//===========================================================================//
