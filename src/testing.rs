//! Test doubles for the hardware seams

use crate::config::DisplayConfig;
use crate::display::Device;
use crate::hal::{DcTag, Delay, Gpio, GpioError, GpioPin, Transport, TransportError};

/// Records every transfer; can be told to fail from a given write on
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub writes: Vec<(Vec<u8>, DcTag)>,
    pub fail_from: Option<usize>,
}

impl RecordingTransport {
    /// Concatenated payload of every data (non-command) transfer
    pub fn data_bytes(&self) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(_, dc)| !dc.is_command())
            .flat_map(|(bytes, _)| bytes.iter().copied())
            .collect()
    }

    /// Command bytes in the order they were sent
    pub fn commands(&self) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(_, dc)| dc.is_command())
            .map(|(bytes, _)| bytes[0])
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn write(&mut self, bytes: &[u8], dc: DcTag) -> Result<(), TransportError> {
        if self.fail_from.is_some_and(|n| self.writes.len() >= n) {
            return Err(TransportError::Bus("injected failure".into()));
        }
        self.writes.push((bytes.to_vec(), dc));
        Ok(())
    }
}

/// Records pin levels and output configuration
#[derive(Debug, Default)]
pub struct RecordingGpio {
    pub configured: u64,
    pub history: Vec<(GpioPin, bool)>,
    pub fail: Option<GpioError>,
}

impl RecordingGpio {
    /// Last level driven on `pin`
    pub fn level(&self, pin: GpioPin) -> Option<bool> {
        self.history
            .iter()
            .rev()
            .find(|(p, _)| *p == pin)
            .map(|(_, level)| *level)
    }
}

impl Gpio for RecordingGpio {
    fn configure_outputs(&mut self, mask: u64) -> Result<(), GpioError> {
        if let Some(err) = &self.fail {
            return Err(err.clone());
        }
        self.configured |= mask;
        Ok(())
    }

    fn set_level(&mut self, pin: GpioPin, high: bool) -> Result<(), GpioError> {
        if let Some(err) = &self.fail {
            return Err(err.clone());
        }
        self.history.push((pin, high));
        Ok(())
    }
}

/// Counts requested delay instead of sleeping
#[derive(Debug, Default)]
pub struct NoDelay {
    pub total_ms: u32,
}

impl Delay for NoDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
    }
}

/// Config with only the D/C line (GPIO2) assigned
pub fn test_config(width: usize, height: usize) -> DisplayConfig {
    let mut config = DisplayConfig::new(width, height);
    config.pins.dc = Some(2);
    config
}

pub type TestDevice<'f> = Device<'f, RecordingTransport, RecordingGpio>;

/// RGB565 device with recording collaborators and a no-op reset
pub fn test_device<'f>(width: usize, height: usize) -> TestDevice<'f> {
    Device::new(
        &test_config(width, height),
        RecordingTransport::default(),
        RecordingGpio::default(),
        |_| Ok(()),
    )
    .expect("test device")
}
