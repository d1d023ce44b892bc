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

    lib.rs

    Core library for TextVideo. Models a character-mode display controller
    as a cycle-accurate synchronous network clocked by a single pixel clock.

*/

#![allow(clippy::upper_case_acronyms)]

pub mod addressing;
pub mod blink;
pub mod char_cycle;
pub mod controller;
pub mod counter;
pub mod cursor;
pub mod error;
pub mod frame;
pub mod memory;
pub mod pixel_generator;
pub mod register_file;
pub mod sync_gen;
pub mod tracelogger;

pub use controller::{ControlInputs, ControllerState, TextModeController, VideoOutputs};
pub use memory::{CharCell, DisplayMemory, FontRom, TextBuffer, VideoMemory};
pub use register_file::{ConfigRegisters, HostBus, RegisterAddress, RegisterFile};

/// Reference pixel clock in MHz. The model is clocked in abstract ticks; this is
/// only used to report refresh rates.
pub const PIXEL_CLOCK_MHZ: f64 = 28.322;

pub const TEXT_COLUMNS: u16 = 80;
pub const TEXT_ROWS: u16 = 25;
pub const CHAR_WIDTH: u16 = 9;
pub const CHAR_HEIGHT: u16 = 16;

/// Number of character cells visible on screen. Cursor addresses at or beyond this
/// value never match a displayed cell.
pub const VISIBLE_CELLS: u16 = TEXT_COLUMNS * TEXT_ROWS;

/// Width of the memory-side address bus.
pub const VRAM_ADDRESS_MASK: u16 = 0x07FF;
