//! Anchored text placement

use crate::display::{Device, TrueColor};
use crate::error::Result;

/// Where a string is placed on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    East,
    West,
    North,
    South,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    Center,
}

impl TextAnchor {
    pub const ALL: [TextAnchor; 9] = [
        TextAnchor::East,
        TextAnchor::West,
        TextAnchor::North,
        TextAnchor::South,
        TextAnchor::NorthEast,
        TextAnchor::NorthWest,
        TextAnchor::SouthEast,
        TextAnchor::SouthWest,
        TextAnchor::Center,
    ];

    /// Origin for a `text_width` x `text_height` block on a
    /// `width` x `height` display
    pub fn origin(self, width: i32, height: i32, text_width: i32, text_height: i32) -> (i32, i32) {
        let left = 0;
        let center_x = (width - text_width) / 2;
        let right = width - text_width;
        let top = 0;
        let center_y = (height - text_height) / 2;
        let bottom = height - text_height;

        match self {
            TextAnchor::East => (right, center_y),
            TextAnchor::West => (left, center_y),
            TextAnchor::North => (center_x, top),
            TextAnchor::South => (center_x, bottom),
            TextAnchor::NorthEast => (right, top),
            TextAnchor::NorthWest => (left, top),
            TextAnchor::SouthEast => (right, bottom),
            TextAnchor::SouthWest => (left, bottom),
            TextAnchor::Center => (center_x, center_y),
        }
    }
}

impl<'f, T, G, C: TrueColor> Device<'f, T, G, C> {
    /// Top-left origin that places `text` at `anchor`
    pub fn anchored_string_coords(&self, anchor: TextAnchor, text: &str) -> Result<(i32, i32)> {
        let font = self.attached_font()?;
        let text_width = self.measure_string(text)?;
        let text_height = i32::from(font.height());

        Ok(anchor.origin(
            self.width as i32,
            self.height as i32,
            text_width,
            text_height,
        ))
    }

    /// Draw `text` at `anchor`, returning the cursor like
    /// [`Device::draw_string`]
    pub fn draw_anchored_string(
        &mut self,
        anchor: TextAnchor,
        text: &str,
        fg: u8,
        bg: u8,
    ) -> Result<i32> {
        let (x, y) = self.anchored_string_coords(anchor, text)?;
        self.draw_string(x, y, fg, bg, text)
    }
}
