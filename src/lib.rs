//! Indexed-colour TFT framebuffer for SPI displays
//!
//! Keeps an 8-bit indexed shadow framebuffer in memory, draws primitives
//! and bitmap-font text into it, and streams it to the display controller
//! as true-colour pixels through a byte transport.
//!
//! # Architecture
//!
//! ```text
//! Application
//!     │
//!     ▼
//! ┌─────────────┐    ┌─────────────┐
//! │ Primitives  │    │    Fonts    │
//! └──────┬──────┘    └──────┬──────┘
//!        └────────┬─────────┘
//!                 ▼
//!        ┌─────────────────┐
//!        │ Indexed buffer  │──── palette ────┐
//!        └─────────────────┘                 ▼
//!                                   ┌─────────────────┐
//!                                   │ Update pipeline │
//!                                   └────────┬────────┘
//!                                            ▼
//!                                 Transport (SPI) + GPIO
//! ```
//!
//! # Example
//!
//! ```no_run
//! use indexed_tft::{controller, Device, DisplayConfig, NoGpio, StdDelay};
//! # fn demo<T: indexed_tft::Transport>(spi: T) -> indexed_tft::Result<()> {
//! let mut config = DisplayConfig::new(128, 160);
//! config.pins.dc = Some(2);
//!
//! let font = indexed_tft::font::builtin::FONT_6X8;
//! let mut display: Device<'_, T, NoGpio> = Device::new(&config, spi, NoGpio, |dev| {
//!     controller::reset_st7735(dev, &mut StdDelay)
//! })?;
//!
//! display.set_palette_entry(0, 0, 0, 0);
//! display.set_palette_entry(1, 255, 255, 255);
//! display.clear(0);
//! display.set_font(&font)?;
//! display.draw_string(0, 0, 1, 0, "Hello")?;
//! display.update()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod font;
pub mod hal;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use config::{ControllerKind, DisplayConfig, PinConfig};
pub use display::{controller, Device, IndexedFramebuffer, Palette, Rgb565, Rgb666, TrueColor, TRANSPARENT};
pub use error::{Error, ErrorKind, Result};
pub use font::{FontDef, GlyphWidth, TextAnchor};
pub use hal::{Delay, DcTag, Gpio, GpioError, GpioPin, NoGpio, StdDelay, Transport, TransportError};
