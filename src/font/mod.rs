//! Bitmap fonts and text rendering
//!
//! Fonts are borrowed by the device, never copied. Text is drawn glyph by
//! glyph into the indexed framebuffer with clipping at every edge; the
//! advance width comes from the [`GlyphWidth`] strategy chosen when the
//! font is attached.

mod anchor;
pub mod builtin;
mod def;
mod render;

pub use anchor::TextAnchor;
pub use def::{FontDef, GlyphWidth};
