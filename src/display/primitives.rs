//! Drawing primitives
//!
//! Every operation validates its coordinates before the first write and
//! returns [`Error::OutOfBounds`] without touching the framebuffer when
//! they fall outside the display.
//!
//! [`Error::OutOfBounds`]: crate::Error::OutOfBounds

use super::color::TrueColor;
use super::framebuffer::IndexedFramebuffer;
use super::Device;
use crate::error::{check_bounds, Result};

impl<'f, T, G, C: TrueColor> Device<'f, T, G, C> {
    #[inline]
    fn max_x(&self) -> i32 {
        self.width as i32 - 1
    }

    #[inline]
    fn max_y(&self) -> i32 {
        self.height as i32 - 1
    }

    /// Draw a single pixel
    pub fn put_pixel(&mut self, x: i32, y: i32, color: u8) -> Result<()> {
        check_bounds("x", x, 0, self.max_x())?;
        check_bounds("y", y, 0, self.max_y())?;

        self.framebuffer.set(x as usize, y as usize, color);
        Ok(())
    }

    /// Draw a horizontal line from (x0, y) to (x1, y) inclusive, `x0 <= x1`
    pub fn draw_hline(&mut self, x0: i32, y: i32, x1: i32, color: u8) -> Result<()> {
        check_bounds("x0", x0, 0, self.max_x())?;
        check_bounds("x1", x1, x0, self.max_x())?;
        check_bounds("y", y, 0, self.max_y())?;

        self.framebuffer
            .fill_span(x0 as usize, x1 as usize, y as usize, color);
        Ok(())
    }

    /// Draw a vertical line from (x, y0) to (x, y1) inclusive, `y0 <= y1`
    pub fn draw_vline(&mut self, x: i32, y0: i32, y1: i32, color: u8) -> Result<()> {
        check_bounds("x", x, 0, self.max_x())?;
        check_bounds("y0", y0, 0, self.max_y())?;
        check_bounds("y1", y1, y0, self.max_y())?;

        for y in y0..=y1 {
            self.framebuffer.set(x as usize, y as usize, color);
        }
        Ok(())
    }

    /// Draw a line between two points.
    ///
    /// Vertical and horizontal lines go through [`Device::draw_vline`] and
    /// [`Device::draw_hline`], so their endpoints must already be ordered.
    /// Sloped lines use Bresenham stepping along the longer axis; a line
    /// stepping along y stops one row short of its end point.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u8) -> Result<()> {
        check_bounds("x0", x0, 0, self.max_x())?;
        check_bounds("y0", y0, 0, self.max_y())?;

        if x0 == x1 {
            return self.draw_vline(x0, y0, y1, color);
        }
        if y0 == y1 {
            return self.draw_hline(x0, y0, x1, color);
        }

        check_bounds("x1", x1, 0, self.max_x())?;
        check_bounds("y1", y1, 0, self.max_y())?;

        if (x1 - x0).abs() > (y1 - y0).abs() {
            if x0 > x1 {
                wide_line(&mut self.framebuffer, x1, y1, x0, y0, color);
            } else {
                wide_line(&mut self.framebuffer, x0, y0, x1, y1, color);
            }
        } else if y0 > y1 {
            tall_line(&mut self.framebuffer, x1, y1, x0, y0, color);
        } else {
            tall_line(&mut self.framebuffer, x0, y0, x1, y1, color);
        }
        Ok(())
    }

    /// Fill the closed rectangle (x0, y0)..=(x1, y1)
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u8) -> Result<()> {
        self.check_rect(x0, y0, x1, y1)?;

        for y in y0..=y1 {
            self.framebuffer
                .fill_span(x0 as usize, x1 as usize, y as usize, color);
        }
        Ok(())
    }

    /// Draw `thickness` nested outlines of the rectangle, growing inwards.
    ///
    /// Thickness beyond the rectangle's shorter side fills it.
    pub fn draw_box(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        thickness: u32,
        color: u8,
    ) -> Result<()> {
        self.check_rect(x0, y0, x1, y1)?;

        let limit = (x1 - x0).min(y1 - y0) + 1;
        let thickness = (thickness.min(i32::MAX as u32) as i32).min(limit);

        for i in 0..thickness {
            // Top, bottom
            self.draw_hline(x0, y0 + i, x1, color)?;
            self.draw_hline(x0, y1 - i, x1, color)?;

            // Left, right
            self.draw_vline(x0 + i, y0, y1, color)?;
            self.draw_vline(x1 - i, y0, y1, color)?;
        }
        Ok(())
    }

    fn check_rect(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<()> {
        check_bounds("x0", x0, 0, self.max_x())?;
        check_bounds("y0", y0, 0, self.max_y())?;
        check_bounds("x1", x1, x0, self.max_x())?;
        check_bounds("y1", y1, y0, self.max_y())
    }
}

/// Bresenham with x as the driving axis; requires `x0 <= x1`.
/// Both end columns are drawn.
fn wide_line(fb: &mut IndexedFramebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u8) {
    let dx = x1 - x0;
    let mut dy = y1 - y0;
    let mut step = 1;

    if dy < 0 {
        step = -1;
        dy = -dy;
    }

    let mut error = 2 * dy - dx;
    let mut y = y0;

    for x in x0..=x1 {
        fb.set(x as usize, y as usize, color);

        if error > 0 {
            error -= 2 * dx;
            y += step;
        }
        error += 2 * dy;
    }
}

/// Bresenham with y as the driving axis; requires `y0 <= y1`.
/// The final row `y1` is not drawn.
fn tall_line(fb: &mut IndexedFramebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u8) {
    let mut dx = x1 - x0;
    let dy = y1 - y0;
    let mut step = 1;

    if dx < 0 {
        step = -1;
        dx = -dx;
    }

    let mut error = 2 * dx - dy;
    let mut x = x0;

    for y in y0..y1 {
        fb.set(x as usize, y as usize, color);

        if error > 0 {
            error -= 2 * dy;
            x += step;
        }
        error += 2 * dx;
    }
}
