//! tft-render
//!
//! Renders a test scene through the indexed framebuffer and captures the
//! pixel stream that would go out over SPI.
//!
//! # Usage
//!
//! ```bash
//! # Print the default display configuration
//! tft-render config > display.toml
//!
//! # Render the test scene, write the raw pixel stream and its CRC-32
//! tft-render render --config display.toml --output frame.bin --text "Hello"
//!
//! # Same scene in RGB666
//! tft-render render --rgb666
//!
//! # List built-in fonts
//! tft-render fonts
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use crc::{Crc, CRC_32_ISO_HDLC};

use indexed_tft::font::builtin::{font_names, get_font};
use indexed_tft::{
    controller, ControllerKind, DcTag, Device, DisplayConfig, NoGpio, Rgb565, Rgb666, StdDelay,
    TextAnchor, Transport, TransportError, TrueColor,
};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Indexed TFT renderer
#[derive(Parser)]
#[command(name = "tft-render")]
#[command(version = "0.1.0")]
#[command(about = "Render an indexed-colour test scene and capture the SPI pixel stream")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the test scene
    Render {
        /// Display configuration (TOML); defaults to a 320x240 ILI9341
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// File receiving the raw pixel stream
        #[arg(short, long, default_value = "frame.bin")]
        output: PathBuf,

        /// Text drawn in the middle of the scene
        #[arg(short, long, default_value = "indexed-tft")]
        text: String,

        /// Built-in font name
        #[arg(short, long, default_value = "6x8")]
        font: String,

        /// Stream RGB666 instead of RGB565
        #[arg(long)]
        rgb666: bool,

        /// Skip the controller reset script
        #[arg(long)]
        no_reset: bool,
    },

    /// Print the default configuration as TOML
    Config,

    /// List built-in fonts
    Fonts,
}

/// Transport that keeps pixel data and counts command bytes
#[derive(Debug, Default)]
struct CaptureTransport {
    stream: Vec<u8>,
    commands: usize,
    transfers: usize,
}

impl Transport for CaptureTransport {
    fn write(&mut self, bytes: &[u8], dc: DcTag) -> std::result::Result<(), TransportError> {
        self.transfers += 1;
        if dc.is_command() {
            self.commands += bytes.len();
        } else {
            self.stream.extend_from_slice(bytes);
        }
        Ok(())
    }
}

struct RenderArgs {
    config: Option<PathBuf>,
    output: PathBuf,
    text: String,
    font: String,
    no_reset: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Render {
            config,
            output,
            text,
            font,
            rgb666,
            no_reset,
        } => {
            let args = RenderArgs {
                config,
                output,
                text,
                font,
                no_reset,
            };
            if rgb666 {
                handle_render::<Rgb666>(&args)
            } else {
                handle_render::<Rgb565>(&args)
            }
        }
        Commands::Config => handle_config(),
        Commands::Fonts => handle_fonts(),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<DisplayConfig> {
    let mut config = match path {
        Some(path) => DisplayConfig::load(path)
            .with_context(|| format!("failed to load config from {:?}", path))?,
        None => default_config(),
    };
    if config.pins.dc.is_none() {
        log::warn!("no D/C pin configured, using GPIO24 for the capture");
        config.pins.dc = Some(24);
    }
    Ok(config)
}

fn default_config() -> DisplayConfig {
    let mut config = DisplayConfig::new(320, 240);
    config.pins.dc = Some(24);
    config.pins.reset = Some(25);
    config.pins.backlight = Some(18);
    config.pins.cs = Some(8);
    config
}

fn handle_render<C: TrueColor>(args: &RenderArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let Some(font) = get_font(&args.font) else {
        bail!("unknown font '{}' (available: {})", args.font, font_names().join(", "));
    };

    let controller_kind = config.controller;
    let skip_reset = args.no_reset;
    let mut display: Device<'static, CaptureTransport, NoGpio, C> = Device::new(
        &config,
        CaptureTransport::default(),
        NoGpio,
        |dev| {
            if skip_reset {
                return Ok(());
            }
            match controller_kind {
                ControllerKind::Ili9341 => controller::reset_ili9341(dev, &mut StdDelay),
                ControllerKind::St7735 => controller::reset_st7735(dev, &mut StdDelay),
            }
        },
    )
    .context("display initialisation failed")?;

    // Only the frame itself goes to the output file
    display.transport_mut().stream.clear();

    display.set_font(font).context("failed to attach font")?;
    draw_scene(&mut display, &args.text).context("failed to draw scene")?;
    display.update().context("update failed")?;

    let (transport, _) = display.release();
    std::fs::write(&args.output, &transport.stream)
        .with_context(|| format!("failed to write {:?}", args.output))?;

    println!("{}", "=".repeat(60));
    println!("{}", "Frame captured".cyan().bold());
    println!("{}", "=".repeat(60));
    println!("  Controller:  {}", controller_kind);
    println!("  Geometry:    {}x{}", config.width, config.height);
    println!(
        "  Format:      {} bytes/pixel (COLMOD 0x{:02X})",
        C::BYTES,
        C::PIXEL_FORMAT
    );
    println!("  Font:        {}", font.name());
    println!("  Transfers:   {}", transport.transfers);
    println!("  Stream:      {} bytes -> {}", transport.stream.len(), args.output.display());
    println!(
        "  CRC-32:      {}",
        format!("{:08x}", CRC32.checksum(&transport.stream)).green().bold()
    );

    Ok(())
}

/// Palette ramp, frame, diagonals and anchored labels
fn draw_scene<C: TrueColor>(
    display: &mut Device<'_, CaptureTransport, NoGpio, C>,
    text: &str,
) -> indexed_tft::Result<()> {
    // Grey ramp over 16..=254, a few named colours below it
    for i in 16..=254u8 {
        let level = ((u32::from(i) - 16) * 255 / (254 - 16)) as u8;
        display.set_palette_entry(i, level, level, level);
    }
    display.set_palette_entry(0, 0, 0, 0);
    display.set_palette_entry(1, 255, 255, 255);
    display.set_palette_entry(2, 255, 0, 0);
    display.set_palette_entry(3, 0, 255, 0);
    display.set_palette_entry(4, 0, 0, 255);
    display.set_palette_entry(5, 255, 255, 0);

    let w = display.width() as i32;
    let h = display.height() as i32;

    display.clear(0);

    // Ramp along the bottom quarter
    let ramp_top = h - h / 4;
    for x in 0..w {
        let index = 16 + (x * (254 - 16) / w.max(1)) as u8;
        display.draw_vline(x, ramp_top, h - 1, index)?;
    }

    display.draw_box(0, 0, w - 1, h - 1, 2, 1)?;
    display.draw_line(2, 2, w - 3, ramp_top - 1, 2)?;
    display.draw_line(2, ramp_top - 1, w - 3, 2, 3)?;
    display.fill_rect(w / 2 - 8, h / 8, w / 2 + 7, h / 8 + 7, 4)?;

    display.draw_anchored_string(TextAnchor::Center, text, 1, 0)?;
    for (anchor, label) in [
        (TextAnchor::NorthWest, "NW"),
        (TextAnchor::NorthEast, "NE"),
        (TextAnchor::West, "W"),
        (TextAnchor::East, "E"),
    ] {
        display.draw_anchored_string(anchor, label, 5, indexed_tft::TRANSPARENT)?;
    }
    Ok(())
}

fn handle_config() -> Result<()> {
    let toml = default_config()
        .to_toml_string()
        .context("failed to serialise default config")?;
    print!("{}", toml);
    Ok(())
}

fn handle_fonts() -> Result<()> {
    println!("{}", "Built-in fonts".cyan().bold());
    for name in font_names() {
        if let Some(font) = get_font(name) {
            println!(
                "  {:<10} {}x{} {:?}..={:?}{}",
                name.white().bold(),
                font.width(),
                font.height(),
                font.first_char(),
                font.last_char(),
                if font.is_monospace() { " monospace" } else { "" }
            );
        }
    }
    Ok(())
}
