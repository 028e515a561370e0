//! Display device and graphics primitives
//!
//! [`Device`] owns the indexed framebuffer and the palette, borrows the
//! attached font, and holds the transport and GPIO collaborators.
//!
//! - `primitives`: pixels, lines, rectangles, boxes
//! - `update`: indexed to true-colour conversion and streaming
//! - `controller`: ILI9341 / ST7735 reset scripts
//!
//! Drawing never touches the transport; only [`Device::update`] and the
//! command helpers do.

pub mod color;
pub mod controller;
pub mod framebuffer;
mod primitives;
mod update;

pub use color::{Palette, Rgb565, Rgb666, TrueColor, PALETTE_SIZE};
pub use framebuffer::{IndexedFramebuffer, TRANSPARENT};

use crate::config::DisplayConfig;
use crate::error::{Error, Result};
use crate::font::{FontDef, GlyphWidth};
use crate::hal::{DcTag, Delay, Gpio, GpioPin, Transport};

/// Reset pulse phase length in milliseconds
const RESET_PULSE_MS: u32 = 150;

/// An SPI TFT with an indexed shadow framebuffer.
///
/// `C` is the wire pixel format, fixed for the lifetime of the device.
/// Not synchronized: serialize drawing and updates externally if the device
/// is shared between threads.
pub struct Device<'f, T, G, C: TrueColor = Rgb565> {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) framebuffer: IndexedFramebuffer,
    pub(crate) palette: Palette<C>,
    pub(crate) font: Option<&'f FontDef<'f>>,
    pub(crate) glyph_width: GlyphWidth,
    pub(crate) line_chunk: usize,
    dc_pin: Option<GpioPin>,
    reset_pin: Option<GpioPin>,
    backlight_pin: Option<GpioPin>,
    transport: T,
    gpio: G,
}

impl<'f, T: Transport, G: Gpio, C: TrueColor> Device<'f, T, G, C> {
    /// Allocate the framebuffer, set up the control lines and bring the
    /// controller up.
    ///
    /// `reset` runs exactly once, after the pins are configured and before
    /// the backlight is switched on; it should send the controller's
    /// power-up commands (see [`controller`]).
    pub fn new<R>(config: &DisplayConfig, transport: T, gpio: G, reset: R) -> Result<Self>
    where
        R: FnOnce(&mut Self) -> Result<()>,
    {
        config.validate()?;

        let dc_pin = config.pins.dc_pin().ok_or_else(|| {
            log::error!("need a D/C pin to drive the controller");
            Error::MissingDcPin
        })?;

        let framebuffer = IndexedFramebuffer::new(config.width, config.height)?;

        let mut device = Self {
            width: config.width,
            height: config.height,
            framebuffer,
            palette: Palette::new(),
            font: None,
            glyph_width: GlyphWidth::Fixed,
            line_chunk: config.line_chunk,
            dc_pin: Some(dc_pin),
            reset_pin: config.pins.reset_pin(),
            backlight_pin: config.pins.backlight_pin(),
            transport,
            gpio,
        };

        device.configure_pins()?;
        reset(&mut device)?;
        device.set_backlight(true)?;

        log::debug!(
            "display {}x{} ready (dc {}, {} lines per transfer)",
            device.width,
            device.height,
            dc_pin,
            device.line_chunk
        );
        Ok(device)
    }

    /// Drive every configured line low, then switch them to outputs
    fn configure_pins(&mut self) -> Result<()> {
        let mut mask = 0u64;
        for pin in [self.reset_pin, self.backlight_pin, self.dc_pin]
            .into_iter()
            .flatten()
        {
            self.drive(Some(pin), false)?;
            mask |= pin.mask();
        }

        self.gpio.configure_outputs(mask).map_err(|e| {
            log::warn!("gpio configuration failed: {}", e);
            Error::GpioConfig(e)
        })
    }

    /// Set `pin` to `high`; an unused line is a no-op
    fn drive(&mut self, pin: Option<GpioPin>, high: bool) -> Result<()> {
        let Some(pin) = pin else {
            return Ok(());
        };
        self.gpio.set_level(pin, high).map_err(|e| {
            log::warn!("{} <- {} failed: {}", pin, u8::from(high), e);
            Error::Gpio {
                pin: pin.number(),
                source: e,
            }
        })
    }

    /// Free the framebuffer and hand back the collaborators
    pub fn release(self) -> (T, G) {
        (self.transport, self.gpio)
    }

    /// Switch the backlight; no effect without a backlight line
    pub fn set_backlight(&mut self, on: bool) -> Result<()> {
        self.drive(self.backlight_pin, on)
    }

    /// Pulse the reset line high, low, high with 150 ms phases.
    /// No effect without a reset line.
    pub fn hardware_reset<D: Delay>(&mut self, delay: &mut D) -> Result<()> {
        if self.reset_pin.is_none() {
            return Ok(());
        }
        for level in [true, false, true] {
            self.drive(self.reset_pin, level)?;
            delay.delay_ms(RESET_PULSE_MS);
        }
        Ok(())
    }

    /// Send a command byte followed by its parameters (if any)
    pub fn send_command(&mut self, command: u8, params: &[u8]) -> Result<()> {
        self.write(&[command], DcTag::command(self.dc_pin))?;
        self.write(params, DcTag::data(self.dc_pin))
    }

    /// Send parameter or pixel data
    pub fn send_data(&mut self, data: &[u8]) -> Result<()> {
        self.write(data, DcTag::data(self.dc_pin))
    }

    fn write(&mut self, bytes: &[u8], dc: DcTag) -> Result<()> {
        transfer(&mut self.transport, bytes, dc)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn gpio_mut(&mut self) -> &mut G {
        &mut self.gpio
    }
}

/// Send one tagged transfer; empty writes are skipped
fn transfer<T: Transport>(transport: &mut T, bytes: &[u8], dc: DcTag) -> Result<()> {
    if bytes.is_empty() {
        return Ok(());
    }
    transport.write(bytes, dc).map_err(|e| {
        log::warn!("transfer of {} bytes failed: {}", bytes.len(), e);
        Error::Transport(e)
    })
}

impl<'f, T, G, C: TrueColor> Device<'f, T, G, C> {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn framebuffer(&self) -> &IndexedFramebuffer {
        &self.framebuffer
    }

    /// Stored index at (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        self.framebuffer.get(x, y)
    }

    /// Fill the whole framebuffer, [`TRANSPARENT`] included
    pub fn clear(&mut self, index: u8) {
        self.framebuffer.clear(index);
    }

    pub fn palette(&self) -> &Palette<C> {
        &self.palette
    }

    /// Replace the start of the palette with `colors`
    pub fn set_palette(&mut self, colors: &[C]) {
        let n = self.palette.copy_from(colors);
        log::trace!("palette: {} entries replaced", n);
    }

    /// Set one palette entry from 8-bit RGB
    pub fn set_palette_entry(&mut self, index: u8, r: u8, g: u8, b: u8) {
        self.palette.set(index, C::from_rgb(r, g, b));
    }

    /// Scanlines per update transfer
    pub fn line_chunk(&self) -> usize {
        self.line_chunk
    }
}
