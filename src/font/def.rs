//! Bitmap font definitions
//!
//! A font covers a contiguous range of characters. Each glyph record is
//! `1 + width * column_bytes` bytes:
//!
//! ```text
//! [ink width] [col 0: column_bytes] [col 1: column_bytes] ... [col width-1]
//! ```
//!
//! Columns are bit-packed vertically, bit 0 of the first byte is row 0.
//! `column_bytes` is the glyph height rounded up to a whole byte.

use crate::error::{Error, Result};

/// Immutable bitmap font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontDef<'a> {
    name: &'a str,
    data: &'a [u8],
    width: u16,
    height: u16,
    first: char,
    last: char,
    monospace: bool,
}

impl<'a> FontDef<'a> {
    /// Describe a font over `data`. Checked by [`FontDef::validate`] when
    /// attached to a device.
    pub const fn new(
        name: &'a str,
        data: &'a [u8],
        width: u16,
        height: u16,
        first: char,
        last: char,
        monospace: bool,
    ) -> Self {
        Self {
            name,
            data,
            width,
            height,
            first,
            last,
            monospace,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Cell width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Glyph height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn first_char(&self) -> char {
        self.first
    }

    pub fn last_char(&self) -> char {
        self.last
    }

    pub fn is_monospace(&self) -> bool {
        self.monospace
    }

    /// Height rounded up to the next multiple of 8
    pub fn row_stride_height(&self) -> usize {
        (usize::from(self.height) + 7) / 8 * 8
    }

    /// Bytes per glyph column
    pub fn column_bytes(&self) -> usize {
        self.row_stride_height() / 8
    }

    /// Bytes per glyph record, width prefix included
    pub fn record_len(&self) -> usize {
        usize::from(self.width) * self.column_bytes() + 1
    }

    /// Number of characters covered
    pub fn glyph_count(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last as usize) - (self.first as usize) + 1
        }
    }

    /// Whether `c` has a glyph in this font
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        c >= self.first && c <= self.last
    }

    /// Full glyph record for `c`, clipped to the font data
    pub fn glyph_record(&self, c: char) -> Option<&'a [u8]> {
        if !self.contains(c) {
            return None;
        }
        let start = (c as usize - self.first as usize) * self.record_len();
        let end = (start + self.record_len()).min(self.data.len());
        self.data.get(start..end)
    }

    /// Column data for `c`, without the width prefix
    pub fn glyph_columns(&self, c: char) -> Option<&'a [u8]> {
        self.glyph_record(c).map(|record| record.get(1..).unwrap_or(&[]))
    }

    /// Ink width stored in the glyph record
    pub fn proportional_width(&self, c: char) -> u16 {
        self.glyph_record(c)
            .and_then(|record| record.first())
            .map_or(0, |&w| u16::from(w))
    }

    /// Check dimensions, range and that the data covers every glyph
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidFont(format!(
                "{}: zero-sized cell {}x{}",
                self.name, self.width, self.height
            )));
        }
        if self.last < self.first {
            return Err(Error::InvalidFont(format!(
                "{}: empty range {:?}..={:?}",
                self.name, self.first, self.last
            )));
        }
        let needed = self.glyph_count() * self.record_len();
        if self.data.len() < needed {
            return Err(Error::InvalidFont(format!(
                "{}: {} bytes of glyph data, need {}",
                self.name,
                self.data.len(),
                needed
            )));
        }
        Ok(())
    }
}

/// How glyph advance widths are looked up, fixed when a font is attached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GlyphWidth {
    /// Every glyph is the font's cell width
    #[default]
    Fixed,
    /// Each glyph uses the ink width from its record
    Proportional,
}

impl GlyphWidth {
    /// Strategy matching the font's monospace flag
    pub fn for_font(font: &FontDef<'_>) -> Self {
        if font.is_monospace() {
            GlyphWidth::Fixed
        } else {
            GlyphWidth::Proportional
        }
    }

    /// Advance width of `c` in pixels
    #[inline]
    pub fn width_of(self, font: &FontDef<'_>, c: char) -> i32 {
        match self {
            GlyphWidth::Fixed => i32::from(font.width()),
            GlyphWidth::Proportional => i32::from(font.proportional_width(c)),
        }
    }
}
