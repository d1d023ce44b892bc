/*
    TextVideo
    https://github.com/textvideo/textvideo

    Copyright 2025 The TextVideo Authors

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    pixel_generator.rs

    Glyph shift register and attribute latch. On the load phase of the
    character clock the next glyph slice, attribute byte and cursor flag are
    latched; on every other clock the shift register moves one pixel left.
    The colour index is selected from the register's top bit.

    Attribute byte:
        bits 3:0 foreground colour
        bits 6:4 background colour (classic mode)
        bit 7    blink (classic mode) or background intensity (extended mode)

*/

pub const SHIFT_REGISTER_MASK: u16 = 0x01FF;
const SHIFT_REGISTER_MSB: u16 = 0x0100;

// Character codes 0xC0-0xDF repeat their last glyph column into the ninth dot,
// so box-drawing characters join up across cells.
pub const STRETCH_COL_MASK: u8 = 0b1110_0000;
pub const STRETCH_COL_VAL: u8 = 0b1100_0000;

const ATTR_BLINK: u8 = 0b1000_0000;

/// Data presented to the pixel generator on a load clock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelLoad {
    pub glyph_row: u8,
    pub char_code: u8,
    pub attribute: u8,
    pub cursor_active: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelGenerator {
    shift_register: u16,
    attribute: u8,
    cursor_active: bool,
}

#[inline]
pub fn is_stretch_char(char_code: u8) -> bool {
    char_code & STRETCH_COL_MASK == STRETCH_COL_VAL
}

/// Nine-dot shift register value for an eight-dot glyph row.
#[inline]
pub fn stretch_glyph_row(glyph_row: u8, char_code: u8) -> u16 {
    let ninth = if is_stretch_char(char_code) {
        (glyph_row & 0x01) as u16
    }
    else {
        0
    };
    ((glyph_row as u16) << 1) | ninth
}

/// Colour mux. `pixel` is the current glyph dot.
#[inline]
pub fn select_color(pixel: bool, attribute: u8, cursor_active: bool, extended_background: bool, blink_high: bool) -> u8 {
    let blink_attr = attribute & ATTR_BLINK != 0;

    let foreground = cursor_active
        || (!blink_attr && pixel)
        || (!extended_background && blink_attr && blink_high && pixel)
        || (extended_background && pixel);

    if foreground {
        attribute & 0x0F
    }
    else if extended_background {
        attribute >> 4
    }
    else {
        (attribute >> 4) & 0x07
    }
}

impl PixelGenerator {
    pub const fn new() -> Self {
        Self {
            shift_register: 0,
            attribute: 0,
            cursor_active: false,
        }
    }

    #[inline]
    pub const fn shift_register(&self) -> u16 {
        self.shift_register
    }

    #[inline]
    pub const fn attribute(&self) -> u8 {
        self.attribute
    }

    #[inline]
    pub const fn cursor_active(&self) -> bool {
        self.cursor_active
    }

    /// Glyph dot currently being displayed.
    #[inline]
    pub const fn pixel_bit(&self) -> bool {
        self.shift_register & SHIFT_REGISTER_MSB != 0
    }

    #[inline]
    pub fn color(&self, extended_background: bool, blink_high: bool) -> u8 {
        select_color(
            self.pixel_bit(),
            self.attribute,
            self.cursor_active,
            extended_background,
            blink_high,
        )
    }

    /// State after the next pixel clock. Reset clears only the shift register;
    /// the latches are always overwritten by the next load.
    #[inline]
    pub fn next(&self, reset: bool, load: Option<PixelLoad>) -> Self {
        let mut next = *self;
        if reset {
            next.shift_register = 0;
        }
        else if let Some(load) = load {
            next.shift_register = stretch_glyph_row(load.glyph_row, load.char_code);
            next.attribute = load.attribute;
            next.cursor_active = load.cursor_active;
        }
        else {
            next.shift_register = (self.shift_register << 1) & SHIFT_REGISTER_MASK;
        }
        next
    }
}
