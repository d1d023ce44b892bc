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

    memory.rs

    The character/attribute memory and font storage that sit outside the
    controller. The controller only sees them through the `VideoMemory` trait:
    an 11-bit address yields a character code and attribute byte, and a
    character code plus scanline yields an 8-dot glyph slice. Both lookups are
    treated as settled within the clock they are requested on.

*/

use std::path::Path;

use crate::{error::MemoryError, CHAR_HEIGHT, TEXT_COLUMNS, TEXT_ROWS, VRAM_ADDRESS_MASK};

pub const TEXT_BUFFER_CELLS: usize = VRAM_ADDRESS_MASK as usize + 1;
/// Character and attribute bytes are interleaved, two bytes per cell.
pub const TEXT_BUFFER_SIZE: usize = TEXT_BUFFER_CELLS * 2;

pub const FONT_GLYPHS: usize = 256;
pub const FONT_GLYPH_HEIGHT: usize = CHAR_HEIGHT as usize;
pub const FONT_SIZE: usize = FONT_GLYPHS * FONT_GLYPH_HEIGHT;

/// Light grey on black.
pub const DEFAULT_ATTRIBUTE: u8 = 0x07;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CharCell {
    pub code: u8,
    pub attribute: u8,
}

pub trait VideoMemory {
    /// Character code and attribute stored at `address` (row * 80 + column).
    fn fetch_cell(&self, address: u16) -> CharCell;
    /// Eight dots of glyph `char_code` on glyph row `scanline`, MSB leftmost.
    fn glyph_row(&self, char_code: u8, scanline: u8) -> u8;
}

fn read_file(path: &Path) -> Result<Vec<u8>, MemoryError> {
    std::fs::read(path).map_err(|source| MemoryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// 2048 character cells of interleaved code/attribute bytes.
#[derive(Clone)]
pub struct TextBuffer {
    mem: Box<[u8; TEXT_BUFFER_SIZE]>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            mem: Box::new([0; TEXT_BUFFER_SIZE]),
        }
    }

    /// Build a buffer from a raw image. Short images are zero-filled.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MemoryError> {
        if bytes.len() > TEXT_BUFFER_SIZE {
            return Err(MemoryError::TextTooLarge {
                max: TEXT_BUFFER_SIZE,
                actual: bytes.len(),
            });
        }
        let mut buffer = Self::new();
        buffer.mem[..bytes.len()].copy_from_slice(bytes);
        Ok(buffer)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let bytes = read_file(path.as_ref())?;
        log::debug!("Loaded {} byte text image from {}", bytes.len(), path.as_ref().display());
        Self::from_bytes(&bytes)
    }

    #[inline]
    pub fn cell(&self, address: u16) -> CharCell {
        let offset = (address & VRAM_ADDRESS_MASK) as usize * 2;
        CharCell {
            code: self.mem[offset],
            attribute: self.mem[offset + 1],
        }
    }

    pub fn set_cell(&mut self, address: u16, cell: CharCell) {
        let offset = (address & VRAM_ADDRESS_MASK) as usize * 2;
        self.mem[offset] = cell.code;
        self.mem[offset + 1] = cell.attribute;
    }

    fn check_cell(col: u16, row: u16) -> Result<u16, MemoryError> {
        if col >= TEXT_COLUMNS || row >= TEXT_ROWS {
            return Err(MemoryError::CellOutOfRange {
                col,
                row,
                cols: TEXT_COLUMNS,
                rows: TEXT_ROWS,
            });
        }
        Ok(row * TEXT_COLUMNS + col)
    }

    pub fn put_char(&mut self, col: u16, row: u16, code: u8, attribute: u8) -> Result<(), MemoryError> {
        let address = Self::check_cell(col, row)?;
        self.set_cell(address, CharCell { code, attribute });
        Ok(())
    }

    /// Write a string starting at (col, row). Text running past the end of the row
    /// is clipped. Non-ASCII characters are stored as '?'.
    pub fn put_str(&mut self, col: u16, row: u16, text: &str, attribute: u8) -> Result<(), MemoryError> {
        let start = Self::check_cell(col, row)?;
        let room = (TEXT_COLUMNS - col) as usize;
        for (i, ch) in text.chars().take(room).enumerate() {
            let code = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.set_cell(start + i as u16, CharCell { code, attribute });
        }
        Ok(())
    }

    pub fn fill(&mut self, code: u8, attribute: u8) {
        for pair in self.mem.chunks_exact_mut(2) {
            pair[0] = code;
            pair[1] = attribute;
        }
    }
}

/// 256 glyphs of 16 rows, one byte per row, glyph-major.
#[derive(Clone)]
pub struct FontRom {
    data: Box<[u8; FONT_SIZE]>,
}

impl Default for FontRom {
    fn default() -> Self {
        Self::debug_pattern()
    }
}

impl FontRom {
    pub fn blank() -> Self {
        Self {
            data: Box::new([0; FONT_SIZE]),
        }
    }

    /// A stand-in font for running without a font image: each glyph shows its own
    /// code as a column of dots on rows 1-14, and box-drawing codes are drawn as
    /// solid horizontal bars so the ninth-dot stretch is visible.
    pub fn debug_pattern() -> Self {
        let mut font = Self::blank();
        for code in 0..FONT_GLYPHS {
            let glyph = &mut font.data[code * FONT_GLYPH_HEIGHT..(code + 1) * FONT_GLYPH_HEIGHT];
            for (row, slice) in glyph.iter_mut().enumerate() {
                *slice = match row {
                    0 | 15 => 0,
                    _ if (0xC0..=0xDF).contains(&code) => {
                        if row == 7 || row == 8 {
                            0xFF
                        }
                        else {
                            0
                        }
                    }
                    _ => code as u8,
                };
            }
        }
        font
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MemoryError> {
        if bytes.len() != FONT_SIZE {
            return Err(MemoryError::BadFontSize {
                expected: FONT_SIZE,
                actual: bytes.len(),
            });
        }
        let mut font = Self::blank();
        font.data.copy_from_slice(bytes);
        Ok(font)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let bytes = read_file(path.as_ref())?;
        log::debug!("Loaded font image from {}", path.as_ref().display());
        Self::from_bytes(&bytes)
    }

    pub fn set_glyph(&mut self, code: u8, rows: &[u8; FONT_GLYPH_HEIGHT]) {
        let base = code as usize * FONT_GLYPH_HEIGHT;
        self.data[base..base + FONT_GLYPH_HEIGHT].copy_from_slice(rows);
    }

    #[inline]
    pub fn row(&self, code: u8, scanline: u8) -> u8 {
        self.data[code as usize * FONT_GLYPH_HEIGHT + (scanline as usize & (FONT_GLYPH_HEIGHT - 1))]
    }
}

/// Text buffer and font together, as seen from the controller's memory bus.
#[derive(Clone, Default)]
pub struct DisplayMemory {
    pub text: TextBuffer,
    pub font: FontRom,
}

impl DisplayMemory {
    pub fn new(text: TextBuffer, font: FontRom) -> Self {
        Self { text, font }
    }
}

impl VideoMemory for DisplayMemory {
    #[inline]
    fn fetch_cell(&self, address: u16) -> CharCell {
        self.text.cell(address)
    }

    #[inline]
    fn glyph_row(&self, char_code: u8, scanline: u8) -> u8 {
        self.font.row(char_code, scanline)
    }
}
