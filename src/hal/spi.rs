//! SPI transport seam
//!
//! Controllers such as the ILI9341 and ST7735 frame every transfer as either
//! a command byte or parameter/pixel data, selected by the level of a
//! data/command (D/C) line. The core tags each write with a [`DcTag`] and
//! the transport must apply it *before* clocking the bytes out.
//!
//! # Capacity
//!
//! A transport must accept at least `width * line_chunk * bytes_per_pixel`
//! bytes in one call; the update pipeline never splits a chunk further.

use thiserror::Error;

use super::gpio::GpioPin;

/// Per-transfer data/command framing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DcTag {
    /// D/C line to drive, `None` if the transport frames D/C itself
    pub pin: Option<GpioPin>,
    /// `false` (low) for a command byte, `true` (high) for data
    pub level: bool,
}

impl DcTag {
    /// Tag for a controller command byte (D/C low)
    pub const fn command(pin: Option<GpioPin>) -> Self {
        Self { pin, level: false }
    }

    /// Tag for parameter or pixel data (D/C high)
    pub const fn data(pin: Option<GpioPin>) -> Self {
        Self { pin, level: true }
    }

    /// Whether this transfer carries a command byte
    #[inline]
    pub const fn is_command(&self) -> bool {
        !self.level
    }

    /// Pack as `pin | level << 8` for transports that carry a single
    /// user word per transaction and set the line in a pre-transfer hook.
    pub fn packed(&self) -> u32 {
        let pin = self.pin.map_or(0xFF, |p| u32::from(p.number()));
        pin | (u32::from(self.level) << 8)
    }

    /// Inverse of [`DcTag::packed`]
    pub fn from_packed(word: u32) -> Self {
        let pin = (word & 0xFF) as u8;
        Self {
            pin: (pin != 0xFF).then(|| GpioPin::new(pin)),
            level: (word >> 8) & 0xFF != 0,
        }
    }
}

/// Byte-oriented, blocking write channel to the display controller
pub trait Transport {
    /// Send `bytes`, applying `dc` before the first byte is clocked out.
    ///
    /// Blocks until the transfer completes. Zero-length writes are never
    /// issued by the core.
    fn write(&mut self, bytes: &[u8], dc: DcTag) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, bytes: &[u8], dc: DcTag) -> Result<(), TransportError> {
        (**self).write(bytes, dc)
    }
}

/// Transport errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("transfer of {len} bytes exceeds limit of {max}")]
    TooLarge { len: usize, max: usize },

    #[error("transfer timed out")]
    Timeout,

    #[error("bus error: {0}")]
    Bus(String),
}
