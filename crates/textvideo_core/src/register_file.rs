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

    register_file.rs

    Host-writable configuration registers.

    Four write-only byte registers are decoded from a 2-bit address. The
    address decoder gates the active-low write strobe into a separate strobe
    per register, and a register is written on the falling edge of its own
    strobe as sampled on a pixel clock. Several host buses may drive the file
    in the same clock; writes to different registers are all taken. A strobe
    pulse that is never sampled low is lost. Each register has its own reset
    value.

    Register map:
        0: bit 7 = cursor disable, bits 2:0 = cursor address bits 10:8
        1: cursor address bits 7:0
        2: bits 7:4 = cursor end scanline, bits 3:0 = cursor start scanline
        3: bit 4 = screen blank, bit 0 = extended background

*/

use modular_bitfield::{bitfield, prelude::*};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::VISIBLE_CELLS;

pub const CURSOR_CONTROL_RESET: u8 = 0x00;
pub const CURSOR_ADDRESS_LOW_RESET: u8 = 0x00;
pub const CURSOR_SHAPE_RESET: u8 = 0xED; // end = 14, start = 13
pub const MODE_CONTROL_RESET: u8 = 0x00;

pub const REGISTER_COUNT: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum RegisterAddress {
    CursorControl = 0,
    CursorAddressLow = 1,
    CursorShape = 2,
    ModeControl = 3,
}

impl RegisterAddress {
    /// Decode the two address lines. Every pattern selects a register.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => RegisterAddress::CursorControl,
            1 => RegisterAddress::CursorAddressLow,
            2 => RegisterAddress::CursorShape,
            _ => RegisterAddress::ModeControl,
        }
    }

    pub const fn reset_value(&self) -> u8 {
        match self {
            RegisterAddress::CursorControl => CURSOR_CONTROL_RESET,
            RegisterAddress::CursorAddressLow => CURSOR_ADDRESS_LOW_RESET,
            RegisterAddress::CursorShape => CURSOR_SHAPE_RESET,
            RegisterAddress::ModeControl => MODE_CONTROL_RESET,
        }
    }
}

#[bitfield]
#[derive(Copy, Clone, Debug)]
pub struct CursorControlRegister {
    pub address_high: B3,
    #[skip]
    unused: B4,
    pub disable: bool,
}

#[bitfield]
#[derive(Copy, Clone, Debug)]
pub struct CursorShapeRegister {
    pub start: B4,
    pub end: B4,
}

#[bitfield]
#[derive(Copy, Clone, Debug)]
pub struct ModeControlRegister {
    pub extended_background: bool,
    #[skip]
    unused_lo: B3,
    pub screen_blank: bool,
    #[skip]
    unused_hi: B3,
}

/// Decoded view of the register file, as consumed by the cursor comparator and
/// pixel generator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigRegisters {
    pub cursor_disable: bool,
    pub cursor_address: u16,
    pub cursor_start_scanline: u8,
    pub cursor_end_scanline: u8,
    pub screen_blank: bool,
    pub extended_background: bool,
}

/// Levels on the host configuration bus for one pixel clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HostBus {
    /// Active-low write strobe.
    pub write_n: bool,
    pub address: u8,
    pub data: u8,
}

impl Default for HostBus {
    fn default() -> Self {
        Self::idle()
    }
}

impl HostBus {
    pub const fn idle() -> Self {
        Self {
            write_n: true,
            address: 0,
            data: 0,
        }
    }

    /// Bus levels with the strobe asserted for a write of `data` to `address`.
    pub const fn write(address: u8, data: u8) -> Self {
        Self {
            write_n: false,
            address,
            data,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct RegisterFile {
    cursor_control: CursorControlRegister,
    cursor_address_low: u8,
    cursor_shape: CursorShapeRegister,
    mode_control: ModeControlRegister,
    // Per-register strobe level seen on the previous clock, for edge detection.
    last_strobe_n: [bool; REGISTER_COUNT],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    pub fn new() -> Self {
        Self {
            cursor_control: CursorControlRegister::from_bytes([CURSOR_CONTROL_RESET]),
            cursor_address_low: CURSOR_ADDRESS_LOW_RESET,
            cursor_shape: CursorShapeRegister::from_bytes([CURSOR_SHAPE_RESET]),
            mode_control: ModeControlRegister::from_bytes([MODE_CONTROL_RESET]),
            last_strobe_n: [true; REGISTER_COUNT],
        }
    }

    /// Return every register to its reset value. The edge detector keeps the
    /// strobe levels it last sampled, so a strobe held low across the reset is
    /// not taken as a new write.
    pub fn reset(&mut self) {
        let last_strobe_n = self.last_strobe_n;
        *self = Self::new();
        self.last_strobe_n = last_strobe_n;
    }

    /// Return a single register to its reset value, leaving the others untouched.
    pub fn reset_register(&mut self, address: RegisterAddress) {
        self.store(address, address.reset_value());
    }

    fn store(&mut self, address: RegisterAddress, data: u8) {
        match address {
            RegisterAddress::CursorControl => {
                self.cursor_control = CursorControlRegister::from_bytes([data]);
            }
            RegisterAddress::CursorAddressLow => {
                self.cursor_address_low = data;
            }
            RegisterAddress::CursorShape => {
                self.cursor_shape = CursorShapeRegister::from_bytes([data]);
            }
            RegisterAddress::ModeControl => {
                self.mode_control = ModeControlRegister::from_bytes([data]);
            }
        }
    }

    /// Debug accessor for logging and tests. The controller has no read path;
    /// this returns the byte last stored, unused bits included.
    pub fn read(&self, address: RegisterAddress) -> u8 {
        match address {
            RegisterAddress::CursorControl => self.cursor_control.into_bytes()[0],
            RegisterAddress::CursorAddressLow => self.cursor_address_low,
            RegisterAddress::CursorShape => self.cursor_shape.into_bytes()[0],
            RegisterAddress::ModeControl => self.mode_control.into_bytes()[0],
        }
    }

    /// Write a register directly. This is the host-domain entry point; the whole
    /// register is replaced in one operation.
    pub fn write(&mut self, address: RegisterAddress, data: u8) {
        log::debug!("Write to register {} ({}): {:02X}", address as u8, address, data);
        self.store(address, data);

        match address {
            RegisterAddress::CursorShape => {
                if self.cursor_shape.start() > self.cursor_shape.end() {
                    log::warn!(
                        "Cursor start scanline {} is past end scanline {}: cursor will not be drawn",
                        self.cursor_shape.start(),
                        self.cursor_shape.end()
                    );
                }
            }
            RegisterAddress::CursorControl | RegisterAddress::CursorAddressLow => {
                if self.cursor_address() >= VISIBLE_CELLS {
                    log::debug!("Cursor address {:03X} is off screen", self.cursor_address());
                }
            }
            _ => {}
        }
    }

    /// Data driven to each register whose decoded strobe is low on this clock.
    /// If two buses address the same register the first one wins.
    fn strobe_data(buses: &[HostBus]) -> [Option<u8>; REGISTER_COUNT] {
        let mut data = [None; REGISTER_COUNT];
        for bus in buses.iter().filter(|bus| !bus.write_n) {
            let slot = &mut data[RegisterAddress::from_bits(bus.address) as usize];
            if slot.is_none() {
                *slot = Some(bus.data);
            }
        }
        data
    }

    /// Writes due on this clock: one entry per register whose strobe has just
    /// gone active.
    pub fn decode_strobes(&self, buses: &[HostBus]) -> [Option<u8>; REGISTER_COUNT] {
        let mut writes = Self::strobe_data(buses);
        for (write, last_n) in writes.iter_mut().zip(self.last_strobe_n) {
            if !last_n {
                *write = None;
            }
        }
        writes
    }

    /// Register file state after the next pixel clock, given this clock's bus levels.
    pub fn next(&self, reset: bool, buses: &[HostBus]) -> Self {
        let levels = Self::strobe_data(buses);
        let mut next = if reset { Self::new() } else { *self };

        if !reset {
            let writes = self.decode_strobes(buses);
            for address in RegisterAddress::iter() {
                if let Some(data) = writes[address as usize] {
                    next.write(address, data);
                }
            }
        }
        for (last_n, level) in next.last_strobe_n.iter_mut().zip(levels) {
            *last_n = level.is_none();
        }
        next
    }

    #[inline]
    pub fn cursor_address(&self) -> u16 {
        ((self.cursor_control.address_high() as u16) << 8) | self.cursor_address_low as u16
    }

    #[inline]
    pub fn cursor_disable(&self) -> bool {
        self.cursor_control.disable()
    }

    /// Cursor start and end scanlines.
    #[inline]
    pub fn cursor_extents(&self) -> (u8, u8) {
        (self.cursor_shape.start(), self.cursor_shape.end())
    }

    #[inline]
    pub fn screen_blank(&self) -> bool {
        self.mode_control.screen_blank()
    }

    #[inline]
    pub fn extended_background(&self) -> bool {
        self.mode_control.extended_background()
    }

    pub fn config(&self) -> ConfigRegisters {
        let (start, end) = self.cursor_extents();
        ConfigRegisters {
            cursor_disable: self.cursor_disable(),
            cursor_address: self.cursor_address(),
            cursor_start_scanline: start,
            cursor_end_scanline: end,
            screen_blank: self.screen_blank(),
            extended_background: self.extended_background(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reset_config() -> ConfigRegisters {
        ConfigRegisters {
            cursor_disable: false,
            cursor_address: 0,
            cursor_start_scanline: 13,
            cursor_end_scanline: 14,
            screen_blank: false,
            extended_background: false,
        }
    }

    #[test]
    fn reset_values() {
        assert_eq!(RegisterFile::new().config(), reset_config());

        let mut regs = RegisterFile::new();
        for address in RegisterAddress::iter() {
            regs.write(address, 0xFF);
        }
        regs.reset();
        assert_eq!(regs.config(), reset_config());
        for address in RegisterAddress::iter() {
            assert_eq!(regs.read(address), address.reset_value());
        }
    }

    #[test]
    fn debug_read_keeps_unused_bits() {
        let mut regs = RegisterFile::new();
        regs.write(RegisterAddress::ModeControl, 0xFF);
        assert_eq!(regs.read(RegisterAddress::ModeControl), 0xFF);
        regs.write(RegisterAddress::CursorShape, 0x3C);
        assert_eq!(regs.read(RegisterAddress::CursorShape), 0x3C);
    }

    #[test]
    fn field_decode() {
        let mut regs = RegisterFile::new();
        regs.write(RegisterAddress::CursorControl, 0x85);
        assert!(regs.cursor_disable());
        assert_eq!(regs.cursor_address(), 0x500);

        regs.write(RegisterAddress::CursorShape, 0x3A);
        assert_eq!(regs.cursor_extents(), (0x0A, 0x03));

        regs.write(RegisterAddress::ModeControl, 0x10);
        assert!(regs.screen_blank());
        assert!(!regs.extended_background());
        regs.write(RegisterAddress::ModeControl, 0x01);
        assert!(!regs.screen_blank());
        assert!(regs.extended_background());
    }

    #[test]
    fn cursor_address_round_trip() {
        let mut regs = RegisterFile::new();
        regs.write(RegisterAddress::CursorControl, 0x07);
        regs.write(RegisterAddress::CursorAddressLow, 0xCF);
        assert_eq!(regs.cursor_address(), 0x7CF);
    }

    #[test]
    fn reset_single_register() {
        let mut regs = RegisterFile::new();
        regs.write(RegisterAddress::CursorShape, 0x00);
        regs.write(RegisterAddress::ModeControl, 0x11);
        regs.reset_register(RegisterAddress::CursorShape);
        assert_eq!(regs.cursor_extents(), (13, 14));
        assert!(regs.screen_blank());
        assert!(regs.extended_background());
    }

    #[test]
    fn strobe_writes_once_per_falling_edge() {
        let mut regs = RegisterFile::new();
        let bus = HostBus::write(1, 0x42);
        regs = regs.next(false, &[bus]);
        assert_eq!(regs.cursor_address(), 0x42);

        // Holding the strobe low with new data does not write again.
        regs = regs.next(false, &[HostBus::write(1, 0x99)]);
        assert_eq!(regs.cursor_address(), 0x42);

        regs = regs.next(false, &[HostBus::idle()]);
        regs = regs.next(false, &[HostBus::write(1, 0x99)]);
        assert_eq!(regs.cursor_address(), 0x99);
    }

    #[test]
    fn unsampled_strobe_is_lost() {
        let mut regs = RegisterFile::new();
        // Data and address change, but the strobe is never seen low on a clock.
        for data in 0..16 {
            regs = regs.next(
                false,
                &[HostBus {
                    write_n: true,
                    address: 3,
                    data,
                }],
            );
        }
        assert_eq!(regs.config(), reset_config());
    }

    #[test]
    fn reset_wins_over_strobe() {
        let mut regs = RegisterFile::new();
        regs.write(RegisterAddress::CursorAddressLow, 0x10);
        let regs = regs.next(true, &[HostBus::write(3, 0x11)]);
        assert_eq!(regs.config(), reset_config());
        // The strobe was already low when reset released; no write on the next clock.
        let regs = regs.next(false, &[HostBus::write(3, 0x11)]);
        assert_eq!(regs.config(), reset_config());
    }

    #[test]
    fn direct_reset_keeps_strobe_level() {
        let held = [HostBus::write(3, 0x10)];
        let mut regs = RegisterFile::new().next(false, &held);
        assert!(regs.screen_blank());
        regs.reset();
        assert!(!regs.screen_blank());
        let regs = regs.next(false, &held);
        assert!(!regs.screen_blank());
    }

    #[test]
    fn writes_to_different_registers_in_one_step() {
        let regs = RegisterFile::new().next(false, &[HostBus::write(0, 0x01), HostBus::write(3, 0x01)]);
        assert_eq!(regs.cursor_address(), 0x100);
        assert!(regs.extended_background());
    }

    #[test]
    fn strobes_are_edge_detected_per_register() {
        // Register 1 is held from the previous clock while register 2 falls.
        let regs = RegisterFile::new().next(false, &[HostBus::write(1, 0x20)]);
        let regs = regs.next(false, &[HostBus::write(1, 0x30), HostBus::write(2, 0x0F)]);
        assert_eq!(regs.cursor_address(), 0x20);
        assert_eq!(regs.cursor_extents(), (0x0F, 0x00));
    }

    #[test]
    fn same_register_first_bus_wins() {
        let regs = RegisterFile::new().next(false, &[HostBus::write(1, 0x11), HostBus::write(1, 0x22)]);
        assert_eq!(regs.cursor_address(), 0x11);
    }

    proptest! {
        #[test]
        fn write_only_touches_addressed_register(start in any::<[u8; 4]>(), address in 0u8..4, data in any::<u8>()) {
            let mut regs = RegisterFile::new();
            for (i, byte) in start.iter().enumerate() {
                regs.write(RegisterAddress::from_bits(i as u8), *byte);
            }
            let before = regs.config();
            regs = regs.next(false, &[HostBus::write(address, data)]);
            let after = regs.config();

            let expected = match RegisterAddress::from_bits(address) {
                RegisterAddress::CursorControl => ConfigRegisters {
                    cursor_disable: data & 0x80 != 0,
                    cursor_address: ((data as u16 & 0x07) << 8) | (before.cursor_address & 0xFF),
                    ..before
                },
                RegisterAddress::CursorAddressLow => ConfigRegisters {
                    cursor_address: (before.cursor_address & 0x700) | data as u16,
                    ..before
                },
                RegisterAddress::CursorShape => ConfigRegisters {
                    cursor_start_scanline: data & 0x0F,
                    cursor_end_scanline: data >> 4,
                    ..before
                },
                RegisterAddress::ModeControl => ConfigRegisters {
                    screen_blank: data & 0x10 != 0,
                    extended_background: data & 0x01 != 0,
                    ..before
                },
            };
            prop_assert_eq!(after, expected);
        }

        #[test]
        fn cursor_address_from_high_and_low(hi in 0u8..8, lo in any::<u8>()) {
            let mut regs = RegisterFile::new();
            regs = regs.next(false, &[HostBus::write(0, hi)]);
            regs = regs.next(false, &[HostBus::idle()]);
            regs = regs.next(false, &[HostBus::write(1, lo)]);
            prop_assert_eq!(regs.cursor_address(), ((hi as u16) << 8) | lo as u16);
        }
    }
}
