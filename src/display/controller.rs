//! ILI9341 / ST7735 controller bring-up
//!
//! Both scripts pulse the hardware reset line (when one is wired), then push
//! the vendor command list through the device's transport. Pass one of them
//! as the `reset` callback of [`Device::new`].

use crate::display::{Device, TrueColor};
use crate::error::Result;
use crate::hal::{Delay, Gpio, Transport};

/// Controller commands
pub mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;    // Normal display mode (partial off)
    pub const INVOFF: u8 = 0x20;
    pub const GAMSET: u8 = 0x26;   // Gamma curve select
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;    // Column address set
    pub const PASET: u8 = 0x2B;    // Page address set
    pub const RAMWR: u8 = 0x2C;    // Memory write
    pub const MADCTL: u8 = 0x36;   // Memory access control
    pub const COLMOD: u8 = 0x3A;   // Pixel format
    pub const FRMCTR1: u8 = 0xB1;  // Frame rate control (normal mode)
    pub const DFUNCTR: u8 = 0xB6;  // Display function control
    pub const PWCTR1: u8 = 0xC0;
    pub const PWCTR2: u8 = 0xC1;
    pub const VMCTR1: u8 = 0xC5;
    pub const VMCTR2: u8 = 0xC7;
    pub const PWCTRA: u8 = 0xCB;
    pub const PWCTRB: u8 = 0xCF;
    pub const GMCTRP1: u8 = 0xE0;  // Positive gamma correction
    pub const GMCTRN1: u8 = 0xE1;  // Negative gamma correction
    pub const DTCA: u8 = 0xE8;     // Driver timing control A
    pub const DTCB: u8 = 0xEA;     // Driver timing control B
    pub const PWRSEQ: u8 = 0xED;   // Power on sequence control
    pub const EN3G: u8 = 0xF2;     // Enable 3-gamma
}

/// MADCTL bits
pub mod madctl {
    /// Row address order
    pub const MY: u8 = 0x80;
    /// Column address order
    pub const MX: u8 = 0x40;
    /// Row / column exchange
    pub const MV: u8 = 0x20;
    /// Vertical refresh order
    pub const ML: u8 = 0x10;
    /// BGR panel order
    pub const BGR: u8 = 0x08;
    /// Horizontal refresh order
    pub const MH: u8 = 0x04;
}

/// One step of a bring-up script
#[derive(Debug, Clone, Copy)]
enum Step {
    Cmd(u8, &'static [u8]),
    /// COLMOD with the device's pixel format
    PixelFormat,
    Wait(u32),
}

use Step::{Cmd, PixelFormat, Wait};

const ST7735_INIT: &[Step] = &[
    Cmd(cmd::SWRESET, &[]),
    Wait(100),
    Cmd(cmd::SLPOUT, &[]),
    Wait(100),
    Cmd(cmd::GAMSET, &[0x04]),
    PixelFormat,
    Cmd(cmd::MADCTL, &[0x00]),
    Cmd(cmd::NORON, &[]),
    Cmd(cmd::FRMCTR1, &[0x06, 0x01, 0x01]),
    Cmd(cmd::DISPON, &[]),
];

const ILI9341_INIT: &[Step] = &[
    Cmd(cmd::SWRESET, &[]),
    Wait(120),
    Cmd(cmd::DISPOFF, &[]),
    Cmd(cmd::PWCTRA, &[0x39, 0x2C, 0x00, 0x34, 0x02]),
    Cmd(cmd::PWCTRB, &[0x00, 0xC1, 0x30]),
    Cmd(cmd::DTCA, &[0x85, 0x00, 0x78]),
    Cmd(cmd::DTCB, &[0x00, 0x00]),
    Cmd(cmd::PWRSEQ, &[0x64, 0x03, 0x12, 0x81]),
    Cmd(cmd::PWCTR1, &[0x23]),
    Cmd(cmd::PWCTR2, &[0x10]),
    Cmd(cmd::VMCTR1, &[0x3E, 0x28]),
    Cmd(cmd::VMCTR2, &[0x86]),
    Cmd(cmd::MADCTL, &[0x00]),
    Cmd(cmd::INVOFF, &[]),
    PixelFormat,
    Cmd(cmd::FRMCTR1, &[0x00, 0x1B]),
    Cmd(cmd::DFUNCTR, &[0x08, 0x82, 0x27]),
    Cmd(cmd::EN3G, &[0x02]),
    Cmd(cmd::GAMSET, &[0x01]),
    Cmd(
        cmd::GMCTRP1,
        &[
            0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1,
            0x37, 0x07, 0x10, 0x03, 0x0E, 0x09, 0x00,
        ],
    ),
    Cmd(
        cmd::GMCTRN1,
        &[
            0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1,
            0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36, 0x0F,
        ],
    ),
    Cmd(cmd::SLPOUT, &[]),
    Wait(120),
    Cmd(cmd::DISPON, &[]),
];

fn run_script<T, G, C, D>(dev: &mut Device<'_, T, G, C>, delay: &mut D, script: &[Step]) -> Result<()>
where
    T: Transport,
    G: Gpio,
    C: TrueColor,
    D: Delay,
{
    dev.hardware_reset(delay)?;
    for step in script {
        match *step {
            Cmd(command, params) => dev.send_command(command, params)?,
            PixelFormat => dev.send_command(cmd::COLMOD, &[C::PIXEL_FORMAT])?,
            Wait(ms) => delay.delay_ms(ms),
        }
    }
    Ok(())
}

/// Bring up an ST7735
pub fn reset_st7735<T, G, C, D>(dev: &mut Device<'_, T, G, C>, delay: &mut D) -> Result<()>
where
    T: Transport,
    G: Gpio,
    C: TrueColor,
    D: Delay,
{
    log::debug!("st7735: reset");
    run_script(dev, delay, ST7735_INIT)
}

/// Bring up an ILI9341
pub fn reset_ili9341<T, G, C, D>(dev: &mut Device<'_, T, G, C>, delay: &mut D) -> Result<()>
where
    T: Transport,
    G: Gpio,
    C: TrueColor,
    D: Delay,
{
    log::debug!("ili9341: reset");
    run_script(dev, delay, ILI9341_INIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Rgb666;
    use crate::error::Error;
    use crate::testing::{test_config, test_device, NoDelay, RecordingGpio, RecordingTransport};

    #[test]
    fn test_st7735_sequence() {
        let mut device = test_device(128, 160);
        let mut delay = NoDelay::default();
        reset_st7735(&mut device, &mut delay).unwrap();

        assert_eq!(
            device.transport().commands(),
            vec![
                cmd::SWRESET,
                cmd::SLPOUT,
                cmd::GAMSET,
                cmd::COLMOD,
                cmd::MADCTL,
                cmd::NORON,
                cmd::FRMCTR1,
                cmd::DISPON
            ]
        );
        // No reset line: only the script's own waits
        assert_eq!(delay.total_ms, 200);
    }

    #[test]
    fn test_ili9341_sequence() {
        let mut device = test_device(320, 240);
        let mut delay = NoDelay::default();
        reset_ili9341(&mut device, &mut delay).unwrap();

        let commands = device.transport().commands();
        assert_eq!(commands.len(), 22);
        assert_eq!(commands.first(), Some(&cmd::SWRESET));
        assert_eq!(commands.last(), Some(&cmd::DISPON));
        assert_eq!(delay.total_ms, 240);

        // Gamma tables are sent as one parameter transfer each
        let writes = &device.transport().writes;
        let pos = writes.iter().position(|(b, dc)| dc.is_command() && b[0] == cmd::GMCTRP1).unwrap();
        assert_eq!(writes[pos + 1].0.len(), 15);
    }

    #[test]
    fn test_pixel_format_follows_device() {
        let mut device = test_device(16, 16);
        reset_st7735(&mut device, &mut NoDelay::default()).unwrap();
        let writes = &device.transport().writes;
        let pos = writes.iter().position(|(b, dc)| dc.is_command() && b[0] == cmd::COLMOD).unwrap();
        assert_eq!(writes[pos + 1].0, vec![0x55]);

        let mut device: Device<'_, _, _, Rgb666> = Device::new(
            &test_config(16, 16),
            RecordingTransport::default(),
            RecordingGpio::default(),
            |_| Ok(()),
        )
        .unwrap();
        reset_ili9341(&mut device, &mut NoDelay::default()).unwrap();
        let writes = &device.transport().writes;
        let pos = writes.iter().position(|(b, dc)| dc.is_command() && b[0] == cmd::COLMOD).unwrap();
        assert_eq!(writes[pos + 1].0, vec![0x66]);
    }

    #[test]
    fn test_reset_pulse_when_wired() {
        let mut config = test_config(16, 16);
        config.pins.reset = Some(4);
        let mut delay = NoDelay::default();
        let device: Device<'_, _, _> = Device::new(
            &config,
            RecordingTransport::default(),
            RecordingGpio::default(),
            |dev| reset_st7735(dev, &mut delay),
        )
        .unwrap();

        assert_eq!(delay.total_ms, 3 * 150 + 200);
        let (transport, _) = device.release();
        assert_eq!(transport.commands().len(), 8);
    }

    #[test]
    fn test_transport_failure_aborts_script() {
        let config = test_config(16, 16);
        let mut transport = RecordingTransport::default();
        transport.fail_from = Some(3);
        let result: Result<Device<'_, _, _>> = Device::new(
            &config,
            transport,
            RecordingGpio::default(),
            |dev| reset_ili9341(dev, &mut NoDelay::default()),
        );
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
