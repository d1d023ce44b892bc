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

    counter.rs

    Counter primitives shared by every counting component of the controller.

    All counters are value types. `next()` computes the value the counter will
    hold after the coming clock edge without mutating the current one, so a
    whole-network step can read every counter from the previous snapshot before
    any of them change.

*/

#[inline]
const fn width_mask(width: u8) -> u16 {
    if width >= 16 {
        0xFFFF
    }
    else {
        (1u16 << width) - 1
    }
}

/// A counter that adds `step` on every enabled tick and returns to zero once it
/// has reached its wrap limit (or would pass it on the next step).
///
/// Reset loads `reset_value`. Most counters reset to zero; the character pixel
/// phase resets to its own wrap limit so that it sits on the "load" phase while
/// held, then runs 0..=limit once released.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FreeRunningCounter {
    value: u16,
    step: u16,
    wrap_limit: u16,
    reset_value: u16,
    mask: u16,
}

impl FreeRunningCounter {
    pub const fn new(width: u8, step: u16, wrap_limit: u16, reset_value: u16) -> Self {
        let mask = width_mask(width);
        Self {
            value: reset_value & mask,
            step,
            wrap_limit,
            reset_value: reset_value & mask,
            mask,
        }
    }

    #[inline]
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// True if the next enabled tick returns the counter to zero.
    #[inline]
    pub const fn at_wrap(&self) -> bool {
        self.value >= self.wrap_limit || self.value as u32 + self.step as u32 > self.wrap_limit as u32
    }

    /// Compute the counter state after the next clock edge. Reset has priority over enable.
    #[inline]
    pub fn next(&self, reset: bool, enable: bool) -> Self {
        let mut next = *self;
        if reset {
            next.value = self.reset_value;
        }
        else if enable {
            next.value = if self.at_wrap() {
                0
            }
            else {
                (self.value + self.step) & self.mask
            };
        }
        next
    }
}

/// A counter that can be forced to an external value on a load pulse and otherwise
/// counts up by `step` when enabled. Resets to zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoadableCounter {
    value: u16,
    step: u16,
    mask: u16,
}

impl LoadableCounter {
    pub const fn new(width: u8, step: u16) -> Self {
        Self {
            value: 0,
            step,
            mask: width_mask(width),
        }
    }

    #[inline]
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Compute the counter state after the next clock edge.
    /// Priority is reset, then load, then increment.
    #[inline]
    pub fn next(&self, reset: bool, load: Option<u16>, enable: bool) -> Self {
        let mut next = *self;
        if reset {
            next.value = 0;
        }
        else if let Some(load_value) = load {
            next.value = load_value & self.mask;
        }
        else if enable {
            next.value = self.value.wrapping_add(self.step) & self.mask;
        }
        next
    }
}
