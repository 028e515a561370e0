//! True-colour pixel formats and the 256-entry palette
//!
//! The framebuffer stores palette indices; colours only exist on the wire.
//! The wire format is a type parameter of the device, fixed at build time:
//!
//! | Type     | Bytes | COLMOD | Layout                        |
//! |----------|-------|--------|-------------------------------|
//! | `Rgb565` | 2     | 0x55   | `RRRRRGGG GGGBBBBB`, big-endian |
//! | `Rgb666` | 3     | 0x66   | one byte per channel, low 2 bits ignored |

use std::fmt;
use std::ops::Index;

use byteorder::{BigEndian, ByteOrder};

/// A pixel format the controller accepts
pub trait TrueColor: Copy + Default + PartialEq + fmt::Debug {
    /// Bytes per pixel on the wire
    const BYTES: usize;

    /// Value for the controller's pixel format (COLMOD) register
    const PIXEL_FORMAT: u8;

    /// Convert from 8-bit-per-channel RGB
    fn from_rgb(r: u8, g: u8, b: u8) -> Self;

    /// Write this pixel in wire order into `out` (`out.len() == BYTES`)
    fn write_wire(&self, out: &mut [u8]);
}

/// RGB565 color (16-bit: 5 red, 6 green, 5 blue)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const BLUE: Self = Self(0x001F);

    /// Create RGB565 from RGB888 components
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r5 = (r >> 3) as u16;
        let g6 = (g >> 2) as u16;
        let b5 = (b >> 3) as u16;
        Self((r5 << 11) | (g6 << 5) | b5)
    }
}

impl TrueColor for Rgb565 {
    const BYTES: usize = 2;
    const PIXEL_FORMAT: u8 = 0x55;

    fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Rgb565::from_rgb(r, g, b)
    }

    #[inline]
    fn write_wire(&self, out: &mut [u8]) {
        BigEndian::write_u16(out, self.0);
    }
}

/// RGB666 color, one byte per channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb666 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb666 {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self { r: 0xFF, g: 0xFF, b: 0xFF };
}

impl TrueColor for Rgb666 {
    const BYTES: usize = 3;
    const PIXEL_FORMAT: u8 = 0x66;

    fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    fn write_wire(&self, out: &mut [u8]) {
        out[0] = self.r;
        out[1] = self.g;
        out[2] = self.b;
    }
}

/// Number of palette entries
pub const PALETTE_SIZE: usize = 256;

/// Index to true-colour lookup table.
///
/// Entries start out black. Changing an entry only affects future updates;
/// the framebuffer keeps indices, never colours.
#[derive(Clone)]
pub struct Palette<C: TrueColor> {
    entries: [C; PALETTE_SIZE],
}

impl<C: TrueColor> Palette<C> {
    pub fn new() -> Self {
        Self {
            entries: [C::default(); PALETTE_SIZE],
        }
    }

    #[inline]
    pub fn get(&self, index: u8) -> C {
        self.entries[usize::from(index)]
    }

    pub fn set(&mut self, index: u8, color: C) {
        self.entries[usize::from(index)] = color;
    }

    /// Copy `colors` over the start of the table, returning how many
    /// entries were written (at most 256).
    pub fn copy_from(&mut self, colors: &[C]) -> usize {
        let n = colors.len().min(PALETTE_SIZE);
        self.entries[..n].copy_from_slice(&colors[..n]);
        n
    }

    pub fn as_slice(&self) -> &[C] {
        &self.entries
    }
}

impl<C: TrueColor> Default for Palette<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TrueColor> Index<u8> for Palette<C> {
    type Output = C;

    fn index(&self, index: u8) -> &C {
        &self.entries[usize::from(index)]
    }
}

impl<C: TrueColor> fmt::Debug for Palette<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette")
            .field("entries", &PALETTE_SIZE)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_packing() {
        assert_eq!(Rgb565::from_rgb(0, 0, 0), Rgb565::BLACK);
        assert_eq!(Rgb565::from_rgb(255, 255, 255), Rgb565::WHITE);
        assert_eq!(Rgb565::from_rgb(255, 0, 0), Rgb565::RED);
        assert_eq!(Rgb565::from_rgb(0, 255, 0), Rgb565::GREEN);
        assert_eq!(Rgb565::from_rgb(0, 0, 255), Rgb565::BLUE);
        // Low bits of each channel are dropped
        assert_eq!(Rgb565::from_rgb(0x07, 0x03, 0x07), Rgb565::BLACK);
    }

    #[test]
    fn test_rgb565_wire_is_big_endian() {
        let mut out = [0u8; 2];
        Rgb565::RED.write_wire(&mut out);
        assert_eq!(out, [0xF8, 0x00]);
        Rgb565::BLUE.write_wire(&mut out);
        assert_eq!(out, [0x00, 0x1F]);
    }

    #[test]
    fn test_rgb666_wire() {
        let mut out = [0u8; 3];
        <Rgb666 as TrueColor>::from_rgb(1, 2, 3).write_wire(&mut out);
        assert_eq!(out, [1, 2, 3]);
        assert_eq!(Rgb666::PIXEL_FORMAT, 0x66);
    }

    #[test]
    fn test_palette_defaults_to_black() {
        let palette: Palette<Rgb565> = Palette::new();
        assert!(palette.as_slice().iter().all(|&c| c == Rgb565::BLACK));
        assert_eq!(palette.as_slice().len(), PALETTE_SIZE);
    }

    #[test]
    fn test_palette_copy_prefix() {
        let mut palette: Palette<Rgb565> = Palette::new();
        let written = palette.copy_from(&[Rgb565::RED, Rgb565::GREEN]);
        assert_eq!(written, 2);
        assert_eq!(palette[0], Rgb565::RED);
        assert_eq!(palette[1], Rgb565::GREEN);
        assert_eq!(palette[2], Rgb565::BLACK);

        let big = vec![Rgb565::WHITE; 300];
        assert_eq!(palette.copy_from(&big), PALETTE_SIZE);
        assert_eq!(palette.get(255), Rgb565::WHITE);
    }
}
