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

    cursor.rs

    Hardware cursor comparator. Purely combinational: evaluated every clock from
    the live VRAM address, the current glyph scanline and the register file.

*/

use crate::register_file::ConfigRegisters;

/// True if the cursor covers the cell at `vram_address` on glyph row `scanline`.
///
/// A start scanline past the end scanline selects no rows, and an address
/// outside the visible area never matches, so both act as "cursor off".
#[inline]
pub fn cursor_active(vram_address: u16, scanline: u8, config: &ConfigRegisters, blink_high: bool) -> bool {
    vram_address == config.cursor_address
        && scanline >= config.cursor_start_scanline
        && scanline <= config.cursor_end_scanline
        && blink_high
        && !config.cursor_disable
}
