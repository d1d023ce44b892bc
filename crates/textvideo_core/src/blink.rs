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

    blink.rs

    Slow free-running counter clocked once per vertical sync. Its top bit is the
    blink phase shared by the cursor and by blinking text.

*/

use crate::counter::FreeRunningCounter;

pub const BLINK_COUNTER_BITS: u8 = 5;
const BLINK_PHASE_BIT: u16 = 1 << (BLINK_COUNTER_BITS - 1);

/// Frames for one full blink period (on and off).
pub const BLINK_PERIOD_FRAMES: u32 = 1 << BLINK_COUNTER_BITS;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlinkCounter {
    counter: FreeRunningCounter,
}

impl Default for BlinkCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl BlinkCounter {
    pub const fn new() -> Self {
        Self {
            counter: FreeRunningCounter::new(BLINK_COUNTER_BITS, 1, (1 << BLINK_COUNTER_BITS) - 1, 0),
        }
    }

    #[inline]
    pub const fn value(&self) -> u8 {
        self.counter.value() as u8
    }

    #[inline]
    pub const fn phase_high(&self) -> bool {
        self.counter.value() & BLINK_PHASE_BIT != 0
    }

    #[inline]
    pub fn next(&self, reset: bool, vsync_pulse: bool) -> Self {
        Self {
            counter: self.counter.next(reset, vsync_pulse),
        }
    }
}
