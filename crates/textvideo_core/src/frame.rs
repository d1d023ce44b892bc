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

    frame.rs

    Frame capture. Watches the controller's outputs tick by tick and builds a
    720x400 image of colour indices from the display-enable window, so frames
    can be inspected or written out as PNG.

    Two buffers are kept. The back buffer is drawn into; on the rising edge of
    vertical sync the buffers swap and the completed frame becomes the front
    buffer.

*/

use std::path::Path;

use crate::{controller::VideoOutputs, error::CaptureError, CHAR_HEIGHT, CHAR_WIDTH, TEXT_COLUMNS, TEXT_ROWS};

pub const FRAME_WIDTH: usize = (TEXT_COLUMNS * CHAR_WIDTH) as usize;
pub const FRAME_HEIGHT: usize = (TEXT_ROWS * CHAR_HEIGHT) as usize;
pub const FRAME_SIZE: usize = FRAME_WIDTH * FRAME_HEIGHT;

/// RGB values for the 16 colour indices.
pub const PALETTE: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0xAA],
    [0x00, 0xAA, 0x00],
    [0x00, 0xAA, 0xAA],
    [0xAA, 0x00, 0x00],
    [0xAA, 0x00, 0xAA],
    [0xAA, 0x55, 0x00],
    [0xAA, 0xAA, 0xAA],
    [0x55, 0x55, 0x55],
    [0x55, 0x55, 0xFF],
    [0x55, 0xFF, 0x55],
    [0x55, 0xFF, 0xFF],
    [0xFF, 0x55, 0x55],
    [0xFF, 0x55, 0xFF],
    [0xFF, 0xFF, 0x55],
    [0xFF, 0xFF, 0xFF],
];

pub struct FrameCapture {
    buf: [Vec<u8>; 2],
    back_buf: usize,
    front_buf: usize,
    x: usize,
    y: usize,
    last_display_enable: bool,
    last_vsync: bool,
    frames: u64,
}

impl Default for FrameCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCapture {
    pub fn new() -> Self {
        Self {
            buf: [vec![0; FRAME_SIZE], vec![0; FRAME_SIZE]],
            back_buf: 1,
            front_buf: 0,
            x: 0,
            y: 0,
            last_display_enable: false,
            last_vsync: false,
            frames: 0,
        }
    }

    /// Feed one clock's worth of controller outputs.
    pub fn push(&mut self, out: &VideoOutputs) {
        if out.display_enable {
            if self.x < FRAME_WIDTH && self.y < FRAME_HEIGHT {
                let color = if out.blank { 0 } else { out.color & 0x0F };
                self.buf[self.back_buf][self.y * FRAME_WIDTH + self.x] = color;
            }
            self.x += 1;
        }
        else if self.last_display_enable {
            self.x = 0;
            self.y += 1;
        }

        if out.vsync && !self.last_vsync {
            self.swap();
        }

        self.last_display_enable = out.display_enable;
        self.last_vsync = out.vsync;
    }

    fn swap(&mut self) {
        std::mem::swap(&mut self.back_buf, &mut self.front_buf);
        self.buf[self.back_buf].fill(0);
        self.frames += 1;
        self.x = 0;
        self.y = 0;
    }

    /// Number of frames completed.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Last completed frame as colour indices, row-major.
    pub fn front(&self) -> &[u8] {
        &self.buf[self.front_buf]
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.buf[self.front_buf][y * FRAME_WIDTH + x]
    }

    /// Colour indices of frame line `y`.
    pub fn line(&self, y: usize) -> &[u8] {
        &self.buf[self.front_buf][y * FRAME_WIDTH..(y + 1) * FRAME_WIDTH]
    }

    pub fn to_rgb(&self) -> Vec<u8> {
        self.front().iter().flat_map(|&c| PALETTE[(c & 0x0F) as usize]).collect()
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), CaptureError> {
        if self.frames == 0 {
            return Err(CaptureError::NoFrame);
        }
        let img = image::RgbImage::from_raw(FRAME_WIDTH as u32, FRAME_HEIGHT as u32, self.to_rgb())
            .ok_or(CaptureError::NoFrame)?;
        img.save(path.as_ref())?;
        log::debug!("Saved frame {} to {}", self.frames, path.as_ref().display());
        Ok(())
    }
}
