use std::fmt;

/// Everything that can stop an image from being encoded.
///
/// Encoding is all-or-nothing: when any of these is returned no PNG bytes
/// have been handed to the caller.
#[derive(Debug)]
pub enum EncodingError {
    /// Bad dimensions, a pixel source of the wrong length, or a malformed
    /// chunk tag.
    InvalidArgument(String),
    /// The compressor could not produce the image data stream.
    EncodingFailed(anyhow::Error),
    /// The finished PNG could not be written to the caller's sink.
    Io(std::io::Error),
}

impl EncodingError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::EncodingFailed(e) => write!(f, "failed to compress image data: {e}"),
            Self::Io(e) => write!(f, "failed to write PNG: {e}"),
        }
    }
}

impl std::error::Error for EncodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::EncodingFailed(e) => Some(&**e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for EncodingError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
