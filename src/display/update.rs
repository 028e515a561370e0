//! Indexed to true-colour conversion and streaming
//!
//! `update` converts `line_chunk` scanlines at a time (at most the whole
//! frame) through the palette into a scratch buffer and sends each group as
//! one data transfer. Chunks always hold whole scanlines; the last one may
//! be shorter.

use byteorder::{BigEndian, ByteOrder};

use super::controller::cmd;
use super::{transfer, Device, TrueColor};
use crate::error::{check_bounds, Error, Result};
use crate::hal::{DcTag, Gpio, Transport};

/// Start / end pair as the controller expects it, big-endian
fn address_pair(start: i32, end: i32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    BigEndian::write_u16(&mut buf[0..2], start as u16);
    BigEndian::write_u16(&mut buf[2..4], end as u16);
    buf
}

impl<'f, T: Transport, G: Gpio, C: TrueColor> Device<'f, T, G, C> {
    /// Select the controller RAM window (inclusive) and start a RAM write
    pub fn set_address_window(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<()> {
        check_bounds("x0", x0, 0, x1)?;
        check_bounds("x1", x1, x0, self.width as i32 - 1)?;
        check_bounds("y0", y0, 0, y1)?;
        check_bounds("y1", y1, y0, self.height as i32 - 1)?;

        self.send_command(cmd::CASET, &address_pair(x0, x1))?;
        self.send_command(cmd::PASET, &address_pair(y0, y1))?;
        self.send_command(cmd::RAMWR, &[])
    }

    /// Push the whole framebuffer to the display.
    ///
    /// On failure the cycle is abandoned; the framebuffer is untouched and
    /// the next call starts over.
    pub fn update(&mut self) -> Result<()> {
        let lines = self.line_chunk.clamp(1, self.height);
        let scratch_len = self
            .width
            .checked_mul(lines)
            .and_then(|pixels| pixels.checked_mul(C::BYTES))
            .ok_or(Error::Alloc { bytes: usize::MAX })?;

        let mut scratch = Vec::new();
        scratch.try_reserve_exact(scratch_len).map_err(|_| {
            log::error!("update: scratch allocation of {} bytes failed", scratch_len);
            Error::Alloc { bytes: scratch_len }
        })?;

        self.set_address_window(0, 0, self.width as i32 - 1, self.height as i32 - 1)?;

        let dc = DcTag::data(self.dc_pin);
        let mut chunks = 0usize;
        for indices in self.framebuffer.scanline_chunks(lines) {
            scratch.clear();
            scratch.resize(indices.len() * C::BYTES, 0);
            for (&index, out) in indices.iter().zip(scratch.chunks_exact_mut(C::BYTES)) {
                self.palette[index].write_wire(out);
            }

            transfer(&mut self.transport, &scratch, dc)?;
            chunks += 1;
        }

        log::trace!(
            "update: {} bytes in {} transfers",
            self.framebuffer.as_slice().len() * C::BYTES,
            chunks
        );
        Ok(())
    }
}
