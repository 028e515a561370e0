//! GPIO seam for display control lines
//!
//! | Line      | Idle level | Purpose                         |
//! |-----------|------------|---------------------------------|
//! | D/C       | low        | Data (high) / command (low)     |
//! | RST       | low        | Hardware reset (active low)     |
//! | Backlight | low        | Backlight enable                |
//!
//! Every line is optional in the configuration. An unused line is `None`,
//! and every operation on it is a no-op.

use thiserror::Error;

/// Highest pin number that fits an output mask
pub const MAX_PIN: u8 = 63;

/// A GPIO line number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GpioPin(u8);

impl GpioPin {
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Bit for this pin in an output-configuration mask
    pub const fn mask(self) -> u64 {
        1u64 << (self.0 & MAX_PIN)
    }
}

impl std::fmt::Display for GpioPin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// GPIO controller
pub trait Gpio {
    /// Configure every pin set in `mask` as a push-pull output
    fn configure_outputs(&mut self, mask: u64) -> Result<(), GpioError>;

    /// Drive `pin` high (`true`) or low (`false`)
    fn set_level(&mut self, pin: GpioPin, high: bool) -> Result<(), GpioError>;
}

impl<G: Gpio + ?Sized> Gpio for &mut G {
    fn configure_outputs(&mut self, mask: u64) -> Result<(), GpioError> {
        (**self).configure_outputs(mask)
    }

    fn set_level(&mut self, pin: GpioPin, high: bool) -> Result<(), GpioError> {
        (**self).set_level(pin, high)
    }
}

/// GPIO controller for setups where the transport drives every line itself
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGpio;

impl Gpio for NoGpio {
    fn configure_outputs(&mut self, _mask: u64) -> Result<(), GpioError> {
        Ok(())
    }

    fn set_level(&mut self, _pin: GpioPin, _high: bool) -> Result<(), GpioError> {
        Ok(())
    }
}

/// GPIO errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GpioError {
    #[error("pin is not available on this controller")]
    InvalidPin,

    #[error("{0}")]
    Hardware(String),
}
