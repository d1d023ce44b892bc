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

    char_cycle.rs

    The 9-dot character clock. Held on its load phase while the horizontal
    machine is outside the active region, then runs 0..=8 once per character
    cell.

*/

use crate::counter::FreeRunningCounter;

/// Phase on which the pixel generator loads the next character's glyph slice.
pub const CHAR_PHASE_LOAD: u16 = 8;
/// Phase on which the text column counter steps to the next cell. Placed well
/// before the load so memory and font lookups settle in between.
pub const CHAR_PHASE_ADVANCE: u16 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CharPixelCycle {
    counter: FreeRunningCounter,
}

impl Default for CharPixelCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl CharPixelCycle {
    pub const fn new() -> Self {
        Self {
            counter: FreeRunningCounter::new(4, 1, CHAR_PHASE_LOAD, CHAR_PHASE_LOAD),
        }
    }

    #[inline]
    pub const fn phase(&self) -> u16 {
        self.counter.value()
    }

    #[inline]
    pub fn load_pulse(&self, h_active: bool) -> bool {
        h_active && self.phase() == CHAR_PHASE_LOAD
    }

    #[inline]
    pub fn advance_pulse(&self, h_active: bool) -> bool {
        h_active && self.phase() == CHAR_PHASE_ADVANCE
    }

    /// State after the next pixel clock. The cycle is held in reset whenever the
    /// horizontal machine is outside its active phase.
    #[inline]
    pub fn next(&self, reset: bool, h_active: bool) -> Self {
        Self {
            counter: self.counter.next(reset || !h_active, true),
        }
    }
}
