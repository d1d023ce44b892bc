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

    sync_gen.rs

    Timing state machine used for both the horizontal and vertical axes.

    A counter runs from 0 to `reset_at` and the phase register steps through
    Backporch -> Active -> Frontporch -> Sync each time the counter passes one
    of the four thresholds. The phase change is registered: it becomes visible
    on the tick after the counter reads the threshold, the same as the counter
    itself.

*/

use crate::counter::FreeRunningCounter;
use strum_macros::{Display, EnumIter};

/// Timing thresholds for one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimingParams {
    pub width: u8,
    pub active_at: u16,
    pub front_at: u16,
    pub sync_at: u16,
    pub reset_at: u16,
}

impl TimingParams {
    /// Ticks in one full cycle of the axis.
    pub const fn period(&self) -> u32 {
        self.reset_at as u32 + 1
    }

    /// Ticks spent in `phase` during one full cycle.
    pub const fn phase_length(&self, phase: SyncPhase) -> u32 {
        match phase {
            SyncPhase::Backporch => self.active_at as u32 + 1,
            SyncPhase::Active => (self.front_at - self.active_at) as u32,
            SyncPhase::Frontporch => (self.sync_at - self.front_at) as u32,
            SyncPhase::Sync => (self.reset_at - self.sync_at) as u32,
        }
    }
}

/// Horizontal timing in pixel clocks: 895 ticks per line, 720 of them displayed.
pub const HORIZONTAL_TIMING: TimingParams = TimingParams {
    width: 10,
    active_at: 50,
    front_at: 770,
    sync_at: 785,
    reset_at: 894,
};

/// Vertical timing in lines: 445 lines per frame, 400 of them displayed.
pub const VERTICAL_TIMING: TimingParams = TimingParams {
    width: 9,
    active_at: 30,
    front_at: 430,
    sync_at: 441,
    reset_at: 444,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SyncPhase {
    #[default]
    Backporch,
    Active,
    Frontporch,
    Sync,
}

impl SyncPhase {
    #[inline]
    pub const fn next(self) -> SyncPhase {
        match self {
            SyncPhase::Backporch => SyncPhase::Active,
            SyncPhase::Active => SyncPhase::Frontporch,
            SyncPhase::Frontporch => SyncPhase::Sync,
            SyncPhase::Sync => SyncPhase::Backporch,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimingGenerator {
    params: TimingParams,
    counter: FreeRunningCounter,
    phase: SyncPhase,
}

impl TimingGenerator {
    pub const fn new(params: TimingParams) -> Self {
        Self {
            params,
            counter: FreeRunningCounter::new(params.width, 1, params.reset_at, 0),
            phase: SyncPhase::Backporch,
        }
    }

    #[inline]
    pub const fn count(&self) -> u16 {
        self.counter.value()
    }

    #[inline]
    pub const fn phase(&self) -> SyncPhase {
        self.phase
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == SyncPhase::Active
    }

    #[inline]
    pub fn in_sync(&self) -> bool {
        self.phase == SyncPhase::Sync
    }

    /// True when the counter sits on one of the phase thresholds; the phase advances
    /// on the next enabled tick.
    #[inline]
    pub fn trigger(&self) -> bool {
        let count = self.count();
        count == self.params.active_at
            || count == self.params.front_at
            || count == self.params.sync_at
            || count == self.params.reset_at
    }

    /// True when the next enabled tick returns the counter to zero (end of line or frame).
    #[inline]
    pub fn at_reset(&self) -> bool {
        self.count() == self.params.reset_at
    }

    /// True when the next enabled tick moves the machine into `phase`.
    #[inline]
    pub fn entering(&self, phase: SyncPhase) -> bool {
        self.trigger() && self.phase.next() == phase
    }

    /// Compute the machine state after the next edge of its driving clock.
    #[inline]
    pub fn next(&self, reset: bool, enable: bool) -> Self {
        if reset {
            return Self::new(self.params);
        }
        let mut next = *self;
        if enable {
            next.counter = self.counter.next(false, true);
            if self.trigger() {
                next.phase = self.phase.next();
            }
        }
        next
    }
}
