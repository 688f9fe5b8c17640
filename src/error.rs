use std::io;

//===========================================================================//

/// Everything that can go wrong while turning an image into an icon file.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// The input bytes are not a PNG, JPEG or WEBP image.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// The input was recognized but could not be decoded, or a container
    /// file being read is malformed.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Resampling to a target size failed.
    #[error("Resize error: {0}")]
    Resize(String),

    /// PNG re-encoding of a layer, or serialization of a container, failed.
    #[error("Encode error: {0}")]
    Encode(String),

    /// A layer's size has no ICNS type code.
    #[error("No ICNS type code for {0}x{0} layer")]
    UnmappedSize(u32),

    /// The request was cancelled or superseded before it completed.
    #[error("Request {0:?} was cancelled")]
    Cancelled(String),

    /// Writing the container to its destination failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl IconError {
    /// Reports a short read of a container file as malformed data rather
    /// than as an I/O failure.
    pub(crate) fn truncated(self) -> IconError {
        match self {
            IconError::Io(error)
                if error.kind() == io::ErrorKind::UnexpectedEof =>
            {
                IconError::Decode(format!("Truncated file: {}", error))
            }
            other => other,
        }
    }
}

/// Shorthand for results returned by this crate.
pub type Result<T> = std::result::Result<T, IconError>;

impl From<png::EncodingError> for IconError {
    fn from(error: png::EncodingError) -> IconError {
        match error {
            png::EncodingError::IoError(error) => IconError::Io(error),
            png::EncodingError::Format(error) => {
                IconError::Encode(format!("PNG format error: {}", error))
            }
            png::EncodingError::LimitsExceeded => {
                IconError::Encode("PNG limits exceeded".to_string())
            }
            png::EncodingError::Parameter(error) => {
                IconError::Encode(format!("PNG parameter error: {}", error))
            }
        }
    }
}

//===========================================================================//


//===========================================================================//
