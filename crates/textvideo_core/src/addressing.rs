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

    addressing.rs

    Scanline, text row and text column counters. Together they produce the
    VRAM address (row * 80 + column) of the character currently being fetched
    and the glyph scanline presented to the font.

*/

use crate::{
    counter::{FreeRunningCounter, LoadableCounter},
    CHAR_HEIGHT,
    TEXT_COLUMNS,
    VRAM_ADDRESS_MASK,
};

/// Derived pulses that clock the addressing chain on a given pixel tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressingPulses {
    /// Hold the whole chain at zero (global reset or vertical blanking).
    pub reset: bool,
    /// The displayed part of a line just finished.
    pub line_done: bool,
    /// The horizontal counter is about to wrap; reload the column from the row base.
    pub line_reset: bool,
    /// Step the column to the next character cell.
    pub advance: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AddressingChain {
    scanline: FreeRunningCounter,
    text_row: FreeRunningCounter,
    text_column: LoadableCounter,
}

impl Default for AddressingChain {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressingChain {
    pub const fn new() -> Self {
        Self {
            scanline: FreeRunningCounter::new(4, 1, CHAR_HEIGHT - 1, 0),
            text_row: FreeRunningCounter::new(11, TEXT_COLUMNS, VRAM_ADDRESS_MASK, 0),
            text_column: LoadableCounter::new(11, 1),
        }
    }

    /// Glyph row within the current character row.
    #[inline]
    pub const fn scanline(&self) -> u8 {
        self.scanline.value() as u8
    }

    /// VRAM address of the first cell of the current text row.
    #[inline]
    pub const fn text_row(&self) -> u16 {
        self.text_row.value()
    }

    /// Live VRAM address presented to memory and the cursor comparator.
    #[inline]
    pub const fn vram_address(&self) -> u16 {
        self.text_column.value()
    }

    #[inline]
    pub fn next(&self, pulses: AddressingPulses) -> Self {
        let row_advance = pulses.line_done && self.scanline.at_wrap();
        Self {
            scanline: self.scanline.next(pulses.reset, pulses.line_done),
            text_row: self.text_row.next(pulses.reset, row_advance),
            text_column: self.text_column.next(
                pulses.reset,
                pulses.line_reset.then_some(self.text_row.value()),
                pulses.advance,
            ),
        }
    }
}
