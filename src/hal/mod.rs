//! Hardware seams
//!
//! The display core never touches hardware directly. It talks to:
//! - a byte [`Transport`] (SPI, half duplex, write only)
//! - a [`Gpio`] controller for the reset, backlight and D/C lines
//! - a [`Delay`] provider used by controller reset scripts

pub mod delay;
pub mod gpio;
pub mod spi;

pub use delay::{Delay, StdDelay};
pub use gpio::{Gpio, GpioError, GpioPin, NoGpio};
pub use spi::{DcTag, Transport, TransportError};
