//! Glyph rasterization and string layout

use super::def::{FontDef, GlyphWidth};
use crate::display::{Device, TrueColor};
use crate::error::{Error, Result};

impl<'f, T, G, C: TrueColor> Device<'f, T, G, C> {
    /// Attach `font` and pick the width strategy from its monospace flag
    pub fn set_font(&mut self, font: &'f FontDef<'f>) -> Result<()> {
        font.validate().map_err(|e| {
            log::error!("{}", e);
            e
        })?;

        self.glyph_width = GlyphWidth::for_font(font);
        self.font = Some(font);
        log::debug!(
            "font {} ({}x{}, {:?}) attached",
            font.name(),
            font.width(),
            font.height(),
            self.glyph_width
        );
        Ok(())
    }

    /// Use the cell width for every glyph of the attached font
    pub fn set_font_fixed(&mut self) -> Result<()> {
        self.attached_font()?;
        self.glyph_width = GlyphWidth::Fixed;
        Ok(())
    }

    /// Use each glyph's ink width for the attached font
    pub fn set_font_proportional(&mut self) -> Result<()> {
        self.attached_font()?;
        self.glyph_width = GlyphWidth::Proportional;
        Ok(())
    }

    pub fn font(&self) -> Option<&'f FontDef<'f>> {
        self.font
    }

    pub fn glyph_width(&self) -> GlyphWidth {
        self.glyph_width
    }

    pub(crate) fn attached_font(&self) -> Result<&'f FontDef<'f>> {
        self.font.ok_or_else(|| {
            log::error!("no font attached");
            Error::NoFont
        })
    }

    /// Width of `text` in pixels. Characters the font lacks count as zero.
    pub fn measure_string(&self, text: &str) -> Result<i32> {
        let font = self.attached_font()?;
        Ok(text
            .chars()
            .filter(|&c| font.contains(c))
            .map(|c| self.glyph_width.width_of(font, c))
            .fold(0i32, i32::saturating_add))
    }

    /// Draw one glyph with its top-left corner at (x, y).
    ///
    /// Set bits paint `fg`, clear bits paint `bg`; pass
    /// [`TRANSPARENT`](crate::TRANSPARENT) as `bg` to leave the background
    /// alone. Glyphs are clipped against the display edges; characters the
    /// font lacks draw nothing.
    pub fn draw_char(&mut self, c: char, x: i32, y: i32, fg: u8, bg: u8) -> Result<()> {
        let font = self.attached_font()?;
        let Some(columns) = font.glyph_columns(c) else {
            return Ok(());
        };

        let column_bytes = font.column_bytes();
        let char_width = self.glyph_width.width_of(font, c);
        let char_height = i32::from(font.height());
        let width = self.width as i32;
        let height = self.height as i32;

        let mut end_x = x.saturating_add(char_width);
        let mut end_y = y.saturating_add(char_height);

        // Distance clipped off the left and top edges
        let offset_x = if x < 0 { x.saturating_neg() } else { 0 };
        let offset_y = if y < 0 { y.saturating_neg() } else { 0 };

        let start_x = x.saturating_add(offset_x);
        let start_y = y.saturating_add(offset_y);

        if end_x < 0 || start_x >= width || end_y < 0 || start_y >= height {
            return Ok(());
        }

        if end_x >= width {
            end_x = width - 1;
        }
        if end_y >= height {
            end_y = height - 1;
        }

        let mut column = offset_x as usize * column_bytes;

        for px in start_x..end_x {
            for (py, row) in (start_y..end_y).zip(0..char_height) {
                let bit = (row + offset_y) as usize;
                let byte = columns.get(column + bit / 8).copied().unwrap_or(0);

                let color = if byte & (1 << (bit & 7)) != 0 { fg } else { bg };
                self.framebuffer.set(px as usize, py as usize, color);
            }
            column += column_bytes;
        }
        Ok(())
    }

    /// Draw `text` starting at (x, y) and return the cursor x after the
    /// last glyph. The cursor saturates at the `i32` range.
    ///
    /// `'\n'` returns to `x` one font height lower. Characters the font
    /// lacks are skipped without advancing. Returns 0 when the text has no
    /// drawable characters.
    pub fn draw_string(&mut self, x: i32, y: i32, fg: u8, bg: u8, text: &str) -> Result<i32> {
        let font = self.attached_font()?;
        if self.measure_string(text)? == 0 {
            return Ok(0);
        }

        let line_height = i32::from(font.height());
        let mut cursor_x = x;
        let mut cursor_y = y;

        for c in text.chars() {
            if c == '\n' {
                cursor_y = cursor_y.saturating_add(line_height);
                cursor_x = x;
                continue;
            }

            if font.contains(c) {
                self.draw_char(c, cursor_x, cursor_y, fg, bg)?;
                cursor_x = cursor_x.saturating_add(self.glyph_width.width_of(font, c));
            }
        }
        Ok(cursor_x)
    }
}

#[cfg(test)]
mod tests {
    use crate::display::TRANSPARENT;
    use crate::error::Error;
    use crate::font::builtin::FONT_6X8;
    use crate::font::{FontDef, GlyphWidth};
    use crate::testing::{test_device, TestDevice};

    /// 8x16 monospace font for 'A' and 'B'.
    /// 'A' fills its left column, 'B' draws a top row.
    fn font_8x16_data() -> Vec<u8> {
        let mut data = Vec::new();
        // 'A': full first column, rest empty
        data.push(8);
        data.extend_from_slice(&[0xFF, 0xFF]);
        data.extend_from_slice(&[0x00; 14]);
        // 'B': row 0 set in every column
        data.push(8);
        for _ in 0..8 {
            data.extend_from_slice(&[0x01, 0x00]);
        }
        data
    }

    /// 4x5 proportional font for '0'..='1': every glyph is solid
    fn solid_data() -> Vec<u8> {
        let mut data = Vec::new();
        for ink in [2u8, 3] {
            data.push(ink);
            data.extend_from_slice(&[0x1F; 4]);
        }
        data
    }

    fn column(device: &TestDevice<'_>, x: usize) -> Vec<u8> {
        (0..device.height()).map(|y| device.pixel(x, y).unwrap()).collect()
    }

    #[test]
    fn test_requires_font() {
        let mut device = test_device(16, 16);
        assert!(matches!(device.measure_string("A"), Err(Error::NoFont)));
        assert!(matches!(device.draw_char('A', 0, 0, 1, 0), Err(Error::NoFont)));
        assert!(matches!(device.set_font_fixed(), Err(Error::NoFont)));
    }

    #[test]
    fn test_set_font_rejects_short_data() {
        let data = [8u8, 0, 0];
        let font = FontDef::new("broken", &data, 8, 16, 'A', 'B', true);
        let mut device = test_device(16, 16);
        assert!(matches!(device.set_font(&font), Err(Error::InvalidFont(_))));
        assert!(device.font().is_none());
    }

    #[test]
    fn test_measure() {
        let data = font_8x16_data();
        let font = FontDef::new("t", &data, 8, 16, 'A', 'B', true);
        let mut device = test_device(64, 32);
        device.set_font(&font).unwrap();

        assert_eq!(device.measure_string("").unwrap(), 0);
        assert_eq!(device.measure_string("xyz").unwrap(), 0);
        assert_eq!(device.measure_string("AB").unwrap(), 16);
        assert_eq!(device.measure_string("A-B\n").unwrap(), 16);
    }

    #[test]
    fn test_draw_string_scenario() {
        let data = font_8x16_data();
        let font = FontDef::new("t", &data, 8, 16, 'A', 'B', true);
        let mut device = test_device(64, 32);
        device.set_font(&font).unwrap();

        assert_eq!(device.draw_string(0, 0, 1, 0, "AB").unwrap(), 16);

        // 'A' at x = 0: solid first column
        assert!(column(&device, 0)[..16].iter().all(|&p| p == 1));
        assert!(column(&device, 1)[..16].iter().all(|&p| p == 0));
        // 'B' at x = 8: only row 0
        for x in 8..16 {
            assert_eq!(device.pixel(x, 0), Some(1));
            assert_eq!(device.pixel(x, 1), Some(0));
        }
        assert_eq!(device.pixel(16, 0), Some(0));
    }

    #[test]
    fn test_draw_string_empty_returns_zero() {
        let data = font_8x16_data();
        let font = FontDef::new("t", &data, 8, 16, 'A', 'B', true);
        let mut device = test_device(64, 32);
        device.set_font(&font).unwrap();

        assert_eq!(device.draw_string(5, 5, 1, 0, "").unwrap(), 0);
        assert_eq!(device.draw_string(5, 5, 1, 0, "zz").unwrap(), 0);
        assert!(device.framebuffer().as_slice().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_draw_string_newline_and_skips() {
        let data = font_8x16_data();
        let font = FontDef::new("t", &data, 8, 16, 'A', 'B', true);
        let mut device = test_device(64, 40);
        device.set_font(&font).unwrap();

        // '?' is skipped without advancing; '\n' returns to x = 4
        let end = device.draw_string(4, 0, 1, TRANSPARENT, "A?\nA").unwrap();
        assert_eq!(end, 12);
        assert_eq!(device.pixel(4, 0), Some(1));
        assert_eq!(device.pixel(4, 16), Some(1));
        assert_eq!(device.pixel(12, 0), Some(0));
    }

    #[test]
    fn test_transparent_background() {
        let data = font_8x16_data();
        let font = FontDef::new("t", &data, 8, 16, 'A', 'B', true);
        let mut device = test_device(32, 32);
        device.set_font(&font).unwrap();
        device.clear(7);

        device.draw_char('A', 0, 0, 1, TRANSPARENT).unwrap();
        assert_eq!(device.pixel(0, 0), Some(1));
        assert_eq!(device.pixel(1, 0), Some(7));

        device.draw_char('A', 0, 0, 1, 2).unwrap();
        assert_eq!(device.pixel(1, 0), Some(2));
    }

    #[test]
    fn test_proportional_advance() {
        let data = solid_data();
        let font = FontDef::new("p", &data, 4, 5, '0', '1', false);
        let mut device = test_device(32, 16);
        device.set_font(&font).unwrap();
        assert_eq!(device.glyph_width(), GlyphWidth::Proportional);

        assert_eq!(device.draw_string(0, 0, 1, 0, "01").unwrap(), 5);
        // '0' is 2 wide, '1' starts at x = 2 and is 3 wide
        assert_eq!(device.pixel(1, 0), Some(1));
        assert_eq!(device.pixel(4, 0), Some(1));
        assert_eq!(device.pixel(5, 0), Some(0));

        device.set_font_fixed().unwrap();
        assert_eq!(device.measure_string("01").unwrap(), 8);
        device.set_font_proportional().unwrap();
        assert_eq!(device.measure_string("01").unwrap(), 5);
    }

    #[test]
    fn test_clip_left_skips_columns() {
        // Column n of the glyph has only row n set
        let mut data = vec![4u8];
        data.extend_from_slice(&[0x01, 0x02, 0x04, 0x08]);
        let font = FontDef::new("diag", &data, 4, 4, 'x', 'x', true);
        let mut device = test_device(8, 8);
        device.set_font(&font).unwrap();

        device.draw_char('x', -2, 0, 1, 0).unwrap();
        // Glyph columns 2 and 3 land on x = 0 and x = 1
        assert_eq!(device.pixel(0, 2), Some(1));
        assert_eq!(device.pixel(1, 3), Some(1));
        assert_eq!(device.pixel(0, 0), Some(0));
    }

    #[test]
    fn test_clip_top_offsets_rows() {
        let mut data = vec![4u8];
        data.extend_from_slice(&[0x01, 0x02, 0x04, 0x08]);
        let font = FontDef::new("diag", &data, 4, 4, 'x', 'x', true);
        let mut device = test_device(8, 8);
        device.set_font(&font).unwrap();

        device.draw_char('x', 0, -1, 1, 0).unwrap();
        // Row 1 of the glyph lands on y = 0
        assert_eq!(device.pixel(1, 0), Some(1));
        assert_eq!(device.pixel(2, 1), Some(1));
        assert_eq!(device.pixel(3, 2), Some(1));
        assert_eq!(device.pixel(0, 0), Some(0));
    }

    #[test]
    fn test_fully_offscreen_is_noop() {
        let data = font_8x16_data();
        let font = FontDef::new("t", &data, 8, 16, 'A', 'B', true);
        let mut device = test_device(32, 32);
        device.set_font(&font).unwrap();

        device.draw_char('A', -20, 0, 1, 1).unwrap();
        device.draw_char('A', 0, 40, 1, 1).unwrap();
        device.draw_char('A', 32, 0, 1, 1).unwrap();
        device.draw_char('A', i32::MIN, i32::MAX, 1, 1).unwrap();
        assert!(device.framebuffer().as_slice().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_cursor_saturates_near_i32_max() {
        let mut device = test_device(32, 16);
        device.set_font(&FONT_6X8).unwrap();

        let end = device.draw_string(i32::MAX - 3, 0, 1, 0, "AB").unwrap();
        assert_eq!(end, i32::MAX);

        // Newlines past the bottom clamp instead of wrapping back on screen
        let end = device.draw_string(0, i32::MAX - 3, 1, 0, "A\nA\nA").unwrap();
        assert_eq!(end, 6);
        assert!(device.framebuffer().as_slice().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_right_edge_clip_stays_in_bounds() {
        let data = font_8x16_data();
        let font = FontDef::new("t", &data, 8, 16, 'A', 'B', true);
        let mut device = test_device(12, 12);
        device.set_font(&font).unwrap();

        device.draw_char('B', 6, 6, 1, 2).unwrap();
        // Drawing stops before the last column and row
        assert_eq!(device.pixel(6, 6), Some(1));
        assert_eq!(device.pixel(10, 6), Some(1));
        assert_eq!(device.pixel(11, 6), Some(0));
        assert_eq!(device.pixel(6, 10), Some(2));
        assert_eq!(device.pixel(6, 11), Some(0));
    }
}
