//! 3x5 pixel glyph table for the panel, stored in program memory.

use progmem::PWords;

/// Symbols the panel can draw. The discriminants index the glyph table.
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum Glyph {
    D0 = 0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
    C,
    P,
    M,
    S,
    I,
    F,
    V,
    Micro,
    N,
    K,
    H,
    Slash,
    Colon,
    Space,
}

impl Glyph {
    /// Glyph for a decimal digit, 0 to 9.
    pub fn digit(d: u8) -> Self {
        const DIGITS: [Glyph; 10] = [
            Glyph::D0,
            Glyph::D1,
            Glyph::D2,
            Glyph::D3,
            Glyph::D4,
            Glyph::D5,
            Glyph::D6,
            Glyph::D7,
            Glyph::D8,
            Glyph::D9,
        ];
        DIGITS[d as usize]
    }
}

/// Pack five 3-pixel rows (top to bottom) into three 5-bit columns, right
/// column in the low bits, rows from bit 4 down to bit 0 of each column.
///
/// The panel is driven right column first and the foreground emits digits
/// least significant first; together with this packing that matches the
/// 180 degree mounting of the display.
const fn pack(rows: [u8; 5]) -> u16 {
    let mut word: u16 = 0;
    let mut r = 0;
    while r < 5 {
        let row = rows[r] as u16;
        word |= ((row >> 2) & 1) << (14 - r);
        word |= ((row >> 1) & 1) << (9 - r);
        word |= (row & 1) << (4 - r);
        r += 1;
    }
    word
}

const GLYPH_COUNT: usize = 24;

#[cfg_attr(target_arch = "avr", unsafe(link_section = ".progmem.data"))]
static GLYPHS: [u16; GLYPH_COUNT] = [
    pack([0b110, 0b101, 0b101, 0b101, 0b111]), // 0
    pack([0b110, 0b010, 0b010, 0b010, 0b010]), // 1
    pack([0b110, 0b001, 0b111, 0b100, 0b111]), // 2
    pack([0b110, 0b001, 0b111, 0b001, 0b111]), // 3
    pack([0b100, 0b101, 0b111, 0b001, 0b001]), // 4
    pack([0b111, 0b100, 0b111, 0b001, 0b110]), // 5
    pack([0b111, 0b100, 0b111, 0b101, 0b011]), // 6
    pack([0b111, 0b001, 0b010, 0b100, 0b100]), // 7
    pack([0b110, 0b101, 0b111, 0b101, 0b111]), // 8
    pack([0b110, 0b101, 0b111, 0b001, 0b111]), // 9
    pack([0b011, 0b100, 0b100, 0b100, 0b111]), // c
    pack([0b110, 0b101, 0b111, 0b100, 0b100]), // p
    pack([0b111, 0b111, 0b111, 0b101, 0b101]), // m
    pack([0b011, 0b100, 0b111, 0b001, 0b111]), // s
    pack([0b010, 0b000, 0b010, 0b010, 0b010]), // i
    pack([0b011, 0b100, 0b111, 0b100, 0b100]), // f
    pack([0b101, 0b101, 0b101, 0b101, 0b010]), // v
    pack([0b101, 0b101, 0b111, 0b100, 0b100]), // u (micro)
    pack([0b110, 0b101, 0b101, 0b101, 0b101]), // n
    pack([0b101, 0b101, 0b110, 0b101, 0b101]), // k
    pack([0b101, 0b101, 0b111, 0b101, 0b101]), // h
    pack([0b001, 0b001, 0b010, 0b100, 0b100]), // /
    pack([0b000, 0b010, 0b000, 0b010, 0b000]), // :
    pack([0b000, 0b000, 0b000, 0b000, 0b000]), // space
];

/// Packed column data for `glyph`.
pub fn columns(glyph: Glyph) -> u16 {
    // SAFETY: GLYPHS is a static of GLYPH_COUNT words placed in program
    // memory on AVR.
    let table = unsafe { PWords::<GLYPH_COUNT>::new(GLYPHS.as_ptr()) };
    table.get(glyph as usize)
}
