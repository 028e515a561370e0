//! Display configuration
//!
//! Parses display geometry, control pins and transfer settings from TOML:
//!
//! ```toml
//! width = 128
//! height = 160
//! controller = "st7735"
//! line_chunk = 4
//!
//! [pins]
//! dc = 21
//! reset = 18
//! backlight = 5
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::display::TrueColor;
use crate::error::{Error, Result};
use crate::hal::gpio::{GpioPin, MAX_PIN};

/// Default number of scanlines per update transfer
pub const DEFAULT_LINE_CHUNK: usize = 4;

/// Default SPI clock (40 MHz)
pub const DEFAULT_SPI_FREQUENCY_HZ: u32 = 40_000_000;

/// Display controller family, selects the reset script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    #[default]
    Ili9341,
    St7735,
}

impl std::fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerKind::Ili9341 => write!(f, "ILI9341"),
            ControllerKind::St7735 => write!(f, "ST7735"),
        }
    }
}

/// Control line assignments. Absent lines are unused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinConfig {
    /// Data/command select (required by `Device::new`)
    pub dc: Option<u8>,
    /// Hardware reset
    pub reset: Option<u8>,
    /// Backlight enable
    pub backlight: Option<u8>,
    /// Chip select, handed to the transport; may be tied low
    pub cs: Option<u8>,
}

impl PinConfig {
    pub fn dc_pin(&self) -> Option<GpioPin> {
        self.dc.map(GpioPin::new)
    }

    pub fn reset_pin(&self) -> Option<GpioPin> {
        self.reset.map(GpioPin::new)
    }

    pub fn backlight_pin(&self) -> Option<GpioPin> {
        self.backlight.map(GpioPin::new)
    }
}

/// Complete display configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Controller family
    #[serde(default)]
    pub controller: ControllerKind,
    /// Scanlines converted and sent per transfer during an update
    #[serde(default = "default_line_chunk")]
    pub line_chunk: usize,
    /// SPI clock for the transport
    #[serde(default = "default_spi_frequency")]
    pub spi_frequency_hz: u32,
    /// Control lines
    #[serde(default)]
    pub pins: PinConfig,
}

fn default_line_chunk() -> usize {
    DEFAULT_LINE_CHUNK
}

fn default_spi_frequency() -> u32 {
    DEFAULT_SPI_FREQUENCY_HZ
}

impl DisplayConfig {
    /// Configuration with default settings and no pins assigned
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            controller: ControllerKind::default(),
            line_chunk: DEFAULT_LINE_CHUNK,
            spi_frequency_hz: DEFAULT_SPI_FREQUENCY_HZ,
            pins: PinConfig::default(),
        }
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML content
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Check geometry, chunking and pin numbers
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > u16::MAX as usize || self.height > u16::MAX as usize {
            return Err(Error::Config(format!(
                "{}x{} exceeds the 16-bit controller address range",
                self.width, self.height
            )));
        }
        if self.line_chunk == 0 {
            return Err(Error::Config("line_chunk must be at least 1".into()));
        }

        let pins = [
            ("dc", self.pins.dc),
            ("reset", self.pins.reset),
            ("backlight", self.pins.backlight),
            ("cs", self.pins.cs),
        ];
        for (name, pin) in pins {
            if let Some(pin) = pin {
                if pin > MAX_PIN {
                    return Err(Error::Config(format!(
                        "{} pin {} exceeds {}",
                        name, pin, MAX_PIN
                    )));
                }
            }
        }
        Ok(())
    }

    /// Smallest single transfer the transport must accept. Chunks never
    /// span more than the whole frame.
    pub fn max_transfer_bytes<C: TrueColor>(&self) -> usize {
        let lines = self.line_chunk.clamp(1, self.height.max(1));
        self.width.saturating_mul(lines).saturating_mul(C::BYTES)
    }
}
