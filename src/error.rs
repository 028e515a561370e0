//! Error types
//!
//! Every fallible operation returns [`Result`]. Errors are detected before
//! any pixel is written, so a failed call leaves the framebuffer untouched.

use thiserror::Error;

use crate::hal::{GpioError, TransportError};

/// Crate result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Broad error classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad coordinates, malformed rectangles, missing font or pin
    InvalidArgument,
    /// Framebuffer or scratch buffer allocation failed
    ResourceExhausted,
    /// Transport or GPIO reported a failure
    Peripheral,
    /// Configuration could not be read or parsed
    Config,
}

/// Display errors
#[derive(Debug, Error)]
pub enum Error {
    #[error("{what} ({value}) outside [{min}, {max}]")]
    OutOfBounds {
        what: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("no font attached")]
    NoFont,

    #[error("invalid font: {0}")]
    InvalidFont(String),

    #[error("a data/command pin is required")]
    MissingDcPin,

    #[error("invalid display dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("failed to allocate {bytes} bytes")]
    Alloc { bytes: usize },

    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    #[error("gpio {pin}: {source}")]
    Gpio {
        pin: u8,
        #[source]
        source: GpioError,
    },

    #[error("gpio configuration: {0}")]
    GpioConfig(#[source] GpioError),

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OutOfBounds { .. }
            | Error::NoFont
            | Error::InvalidFont(_)
            | Error::MissingDcPin
            | Error::InvalidDimensions { .. } => ErrorKind::InvalidArgument,
            Error::Alloc { .. } => ErrorKind::ResourceExhausted,
            Error::Transport(_) | Error::Gpio { .. } | Error::GpioConfig(_) => ErrorKind::Peripheral,
            Error::Config(_) | Error::Io(_) | Error::Toml(_) => ErrorKind::Config,
        }
    }
}

/// Reject `value` unless `min <= value <= max`.
///
/// Logs the violation like every other argument check in the crate.
pub(crate) fn check_bounds(what: &'static str, value: i32, min: i32, max: i32) -> Result<()> {
    if value < min || value > max {
        log::error!("{} ({}) outside [{}, {}]", what, value, min, max);
        return Err(Error::OutOfBounds { what, value, min, max });
    }
    Ok(())
}
