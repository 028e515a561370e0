//! Built-in fonts
//!
//! `FONT_6X8` is a classic 5x7 ASCII face in a 6x8 cell (one blank spacing
//! column). Its width prefixes hold the ink width plus one column of
//! spacing, so it also renders proportionally.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::FontDef;

const FIRST: char = ' ';
const LAST: char = '~';
const GLYPHS: usize = LAST as usize - FIRST as usize + 1;
const CELL_WIDTH: usize = 6;
const RECORD_LEN: usize = CELL_WIDTH + 1;

/// Width prefix for a glyph with no ink
const SPACE_WIDTH: u8 = 3;

#[rustfmt::skip]
const COLUMNS_5X7: [[u8; 5]; GLYPHS] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x01, 0x01], // F
    [0x3E, 0x41, 0x41, 0x51, 0x32], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x04, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x08, 0x14, 0x54, 0x54, 0x3C], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x00, 0x7F, 0x10, 0x28, 0x44], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];

/// Lay out glyph records: width prefix, five ink columns, one blank column
const fn build_records(columns: &[[u8; 5]; GLYPHS]) -> [u8; GLYPHS * RECORD_LEN] {
    let mut out = [0u8; GLYPHS * RECORD_LEN];
    let mut i = 0;
    while i < GLYPHS {
        let base = i * RECORD_LEN;
        let mut width = SPACE_WIDTH;
        let mut c = 0;
        while c < 5 {
            let bits = columns[i][c];
            if bits != 0 {
                width = c as u8 + 2;
            }
            out[base + 1 + c] = bits;
            c += 1;
        }
        out[base] = width;
        i += 1;
    }
    out
}

static RECORDS_6X8: [u8; GLYPHS * RECORD_LEN] = build_records(&COLUMNS_5X7);

/// 6x8 ASCII font, `' '..='~'`
pub static FONT_6X8: FontDef<'static> = FontDef::new(
    "6x8",
    &RECORDS_6X8,
    CELL_WIDTH as u16,
    8,
    FIRST,
    LAST,
    true,
);

/// Registry of built-in fonts
pub static BUILTIN_FONTS: Lazy<HashMap<&'static str, &'static FontDef<'static>>> =
    Lazy::new(|| {
        let mut m = HashMap::new();
        m.insert("6x8", &FONT_6X8);
        m.insert("default", &FONT_6X8);
        m
    });

/// Get a built-in font by name
pub fn get_font(name: &str) -> Option<&'static FontDef<'static>> {
    BUILTIN_FONTS.get(name.to_lowercase().as_str()).copied()
}

/// Built-in font names, sorted
pub fn font_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = BUILTIN_FONTS.keys().copied().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_is_valid() {
        assert!(FONT_6X8.validate().is_ok());
        assert_eq!(FONT_6X8.record_len(), RECORD_LEN);
        assert_eq!(FONT_6X8.glyph_count(), 95);
    }

    #[test]
    fn test_width_prefixes() {
        assert_eq!(FONT_6X8.proportional_width(' '), 3);
        assert_eq!(FONT_6X8.proportional_width('!'), 4);
        assert_eq!(FONT_6X8.proportional_width('i'), 5);
        assert_eq!(FONT_6X8.proportional_width('A'), 6);
    }

    #[test]
    fn test_spacing_column_is_blank() {
        for c in FIRST..=LAST {
            let columns = FONT_6X8.glyph_columns(c).unwrap();
            assert_eq!(columns.len(), CELL_WIDTH);
            assert_eq!(columns[5], 0, "{:?}", c);
            // Row 7 is the inter-line gap
            assert!(columns.iter().all(|b| b & 0x80 == 0), "{:?}", c);
        }
    }

    #[test]
    fn test_registry() {
        assert_eq!(get_font("6x8"), Some(&FONT_6X8));
        assert_eq!(get_font("DEFAULT").map(|f| f.name()), Some("6x8"));
        assert!(get_font("missing").is_none());
        assert_eq!(font_names(), vec!["6x8", "default"]);
    }
}
