use dosimeter_core::{Mode, Report};

use crate::font::{self, Glyph};
use crate::hal::port::{mode::Output, Pin, PB0, PB1, PB5, PB6, PB7};

/// Horizontal pixel resolution of the panel.
const WIDTH: u8 = 84;
/// Bytes per frame: 84 x 48 pixels, 8 pixel rows per byte.
const FRAME_BYTES: u16 = 84 * 48 / 8;

/// PCD8544 (Nokia 5110 style) panel, bit-banged over five port B lines.
///
/// The panel is mounted rotated by 180 degrees; glyph columns and digits are
/// therefore emitted in reverse order, see [`crate::font`].
pub struct Lcd {
    sce: Pin<Output, PB7>,
    reset: Pin<Output, PB6>,
    dc: Pin<Output, PB5>,
    sdin: Pin<Output, PB0>,
    sclk: Pin<Output, PB1>,
    /// Pixel column the next data byte lands in.
    col: u8,
}

impl Lcd {
    /// Take ownership of the five interface pins, reset and initialize the
    /// controller and blank the frame.
    pub fn new(
        sce: Pin<Output, PB7>,
        reset: Pin<Output, PB6>,
        dc: Pin<Output, PB5>,
        sdin: Pin<Output, PB0>,
        sclk: Pin<Output, PB1>,
    ) -> Self {
        let mut lcd = Self {
            sce,
            reset,
            dc,
            sdin,
            sclk,
            col: 0,
        };

        lcd.reset.set_low();
        lcd.reset.set_high();

        lcd.command(0x21); // extended instruction set
        lcd.command(0xBF); // Vop (contrast)
        lcd.command(0x04); // temperature coefficient
        lcd.command(0x14); // bias 1:48
        lcd.command(0x0C); // back to the basic set, normal video
        lcd.command(0x20);
        lcd.command(0x0C);

        lcd.clear();
        lcd
    }

    fn shift_out(&mut self, byte: u8) {
        for i in 0..8 {
            if byte & (0x80 >> i) != 0 {
                self.sdin.set_high();
            } else {
                self.sdin.set_low();
            }
            self.sclk.set_high();
            self.sclk.set_low();
        }
    }

    fn command(&mut self, byte: u8) {
        self.dc.set_low();
        self.sce.set_low();
        self.shift_out(byte);
        self.sce.set_high();
    }

    fn data(&mut self, byte: u8) {
        self.dc.set_high();
        self.sce.set_low();
        self.shift_out(byte);
        self.sce.set_high();
        self.col = self.col.wrapping_add(1);
    }

    /// Blank the whole frame.
    pub fn clear(&mut self) {
        for _ in 0..FRAME_BYTES {
            self.data(0x00);
        }
    }

    /// Move the cursor to pixel column `x` in byte row `y`.
    pub fn goto_xy(&mut self, x: u8, y: u8) {
        self.command(0x80 | x);
        self.command(0x40 | y);
        self.col = x;
    }

    /// Draw one glyph: a blank spacer column, then the three data columns
    /// plus two blanks shifted off the top of the packed word.
    pub fn draw(&mut self, glyph: Glyph) {
        let mut word = font::columns(glyph);
        self.data(0x00);
        for _ in 0..5 {
            self.data((word & 0x1F) as u8);
            word >>= 5;
        }
    }

    /// Render `value` in decimal, least significant digit first (the panel
    /// is mirrored).
    pub fn render_number(&mut self, mut value: u32) {
        if value == 0 {
            self.draw(Glyph::D0);
            return;
        }
        while value > 0 {
            self.draw(Glyph::digit((value % 10) as u8));
            value /= 10;
        }
    }

    /// Blank the rest of the current byte row.
    pub fn fill_line(&mut self) {
        while self.col < WIDTH {
            self.data(0x00);
        }
    }

    /// Draw the once-per-second report screen: reported CPM with the mode
    /// letter at the bottom, raw CPS above it, dose rate on top.
    pub fn render_report(&mut self, report: &Report) {
        self.goto_xy(14, 3);
        self.draw(mode_glyph(report.mode));
        self.draw(Glyph::M);
        self.draw(Glyph::P);
        self.draw(Glyph::C);
        self.draw(Glyph::Space);
        self.render_number(u32::from(report.cpm));
        self.fill_line();

        self.goto_xy(20, 2);
        self.draw(Glyph::S);
        self.draw(Glyph::P);
        self.draw(Glyph::C);
        self.draw(Glyph::Space);
        self.render_number(u32::from(report.cps));
        self.fill_line();

        self.goto_xy(8, 1);
        self.draw(Glyph::H);
        self.draw(Glyph::Slash);
        self.draw(Glyph::V);
        self.draw(Glyph::S);
        self.draw(Glyph::Micro);
        self.draw(Glyph::Space);
        // Two fixed decimals behind a colon separator; the set has no dot.
        let dose = report.dose.bits();
        self.draw(Glyph::digit((dose % 10) as u8));
        self.draw(Glyph::digit((dose / 10 % 10) as u8));
        self.draw(Glyph::Colon);
        self.render_number(u32::from(dose / 100));
        self.fill_line();
    }
}

fn mode_glyph(mode: Mode) -> Glyph {
    match mode {
        Mode::Slow => Glyph::S,
        Mode::Fast => Glyph::F,
        Mode::Instantaneous => Glyph::I,
    }
}
