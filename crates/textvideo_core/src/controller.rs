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

    controller.rs

    Top-level text mode controller. Wires the timing generators, character
    clock, addressing chain, blink counter, register file, cursor comparator
    and pixel generator into one synchronous network.

    Each call to `step()` is one pixel clock. Every combinational signal is
    evaluated from the previous `ControllerState` snapshot and the next
    snapshot is built from those signals in one go, so no component ever sees
    another component's value from the same edge.

    Derived clocks are modelled as enables:
      - the horizontal line-reset tick clocks the vertical generator and
        reloads the text column;
      - the horizontal frontporch entry clocks the scanline and row counters;
      - vertical sync entry clocks the blink counter.

*/

use crate::{
    addressing::{AddressingChain, AddressingPulses},
    blink::BlinkCounter,
    char_cycle::CharPixelCycle,
    cursor::cursor_active,
    memory::VideoMemory,
    pixel_generator::{PixelGenerator, PixelLoad},
    register_file::{ConfigRegisters, HostBus, RegisterAddress, RegisterFile},
    sync_gen::{SyncPhase, TimingGenerator, HORIZONTAL_TIMING, VERTICAL_TIMING},
    tracelogger::{TraceLevel, TraceLogger},
    PIXEL_CLOCK_MHZ,
};

/// Pixel clocks in one line.
pub const LINE_TICKS: u32 = HORIZONTAL_TIMING.period();
/// Pixel clocks in one frame.
pub const FRAME_TICKS: u32 = LINE_TICKS * VERTICAL_TIMING.period();

macro_rules! trace {
    ($self:ident, $($t:tt)*) => {{
        if $self.trace_logger.is_some() {
            $self.trace_logger.println(&format!($($t)*));
        }
    }};
}

/// Control inputs sampled on one pixel clock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlInputs {
    /// Synchronous reset. Wins over every other update on the same clock.
    pub reset: bool,
    /// External blanking request, ORed into the blank output.
    pub external_blank: bool,
    pub bus: HostBus,
}

/// Signals presented to the colour lookup stage and memory bus on one pixel clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VideoOutputs {
    /// 4-bit colour index.
    pub color: u8,
    /// Horizontal sync, active low.
    pub hsync_n: bool,
    /// Vertical sync, active high.
    pub vsync: bool,
    pub blank: bool,
    /// Both axes in their active phase, regardless of blanking requests.
    pub display_enable: bool,
    pub vram_address: u16,
    pub scanline: u8,
}

impl VideoOutputs {
    /// Horizontal sync as an active-high level.
    #[inline]
    pub fn hsync(&self) -> bool {
        !self.hsync_n
    }
}

/// Output register. Sync and blank pass through it so they stay aligned with the
/// one clock of latency between a glyph load and its first dot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutputStage {
    pub hsync: bool,
    pub vsync: bool,
    pub display_enable: bool,
    pub blank: bool,
}

impl Default for OutputStage {
    fn default() -> Self {
        Self {
            hsync: false,
            vsync: false,
            display_enable: false,
            blank: true,
        }
    }
}

/// Combinational signals for one clock, derived from the previous snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Signals {
    h_active: bool,
    v_active: bool,
    line_reset: bool,
    line_done: bool,
    vsync_pulse: bool,
    blink_high: bool,
    config: ConfigRegisters,
    load: Option<PixelLoad>,
    advance: bool,
}

/// Complete register state of the controller.
#[derive(Copy, Clone, Debug)]
pub struct ControllerState {
    pub horizontal: TimingGenerator,
    pub vertical: TimingGenerator,
    pub char_cycle: CharPixelCycle,
    pub addressing: AddressingChain,
    pub blink: BlinkCounter,
    pub registers: RegisterFile,
    pub pixels: PixelGenerator,
    pub output: OutputStage,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerState {
    pub fn new() -> Self {
        Self {
            horizontal: TimingGenerator::new(HORIZONTAL_TIMING),
            vertical: TimingGenerator::new(VERTICAL_TIMING),
            char_cycle: CharPixelCycle::new(),
            addressing: AddressingChain::new(),
            blink: BlinkCounter::new(),
            registers: RegisterFile::new(),
            pixels: PixelGenerator::new(),
            output: OutputStage::default(),
        }
    }

    fn signals<M: VideoMemory + ?Sized>(&self, mem: &M) -> Signals {
        let h_active = self.horizontal.is_active();
        let v_active = self.vertical.is_active();
        let line_reset = self.horizontal.at_reset();
        let config = self.registers.config();
        let blink_high = self.blink.phase_high();

        let load = if self.char_cycle.load_pulse(h_active) {
            let address = self.addressing.vram_address();
            let scanline = self.addressing.scanline();
            let cell = mem.fetch_cell(address);
            Some(PixelLoad {
                glyph_row: mem.glyph_row(cell.code, scanline),
                char_code: cell.code,
                attribute: cell.attribute,
                cursor_active: cursor_active(address, scanline, &config, blink_high),
            })
        }
        else {
            None
        };

        Signals {
            h_active,
            v_active,
            line_reset,
            line_done: v_active && self.horizontal.entering(SyncPhase::Frontporch),
            vsync_pulse: line_reset && self.vertical.entering(SyncPhase::Sync),
            blink_high,
            config,
            load,
            advance: self.char_cycle.advance_pulse(h_active),
        }
    }

    fn outputs(&self, signals: &Signals) -> VideoOutputs {
        VideoOutputs {
            color: self
                .pixels
                .color(signals.config.extended_background, signals.blink_high),
            hsync_n: !self.output.hsync,
            vsync: self.output.vsync,
            blank: self.output.blank,
            display_enable: self.output.display_enable,
            vram_address: self.addressing.vram_address(),
            scanline: self.addressing.scanline(),
        }
    }

    fn advance(&self, signals: &Signals, inputs: &ControlInputs) -> Self {
        let reset = inputs.reset;

        let output = if reset {
            OutputStage::default()
        }
        else {
            let display_enable = signals.h_active && signals.v_active;
            OutputStage {
                hsync: self.horizontal.in_sync(),
                vsync: self.vertical.in_sync(),
                display_enable,
                blank: !display_enable || inputs.external_blank || signals.config.screen_blank,
            }
        };

        Self {
            horizontal: self.horizontal.next(reset, true),
            vertical: self.vertical.next(reset, signals.line_reset),
            char_cycle: self.char_cycle.next(reset, signals.h_active),
            addressing: self.addressing.next(AddressingPulses {
                reset: reset || !signals.v_active,
                line_done: signals.line_done,
                line_reset: signals.line_reset,
                advance: signals.advance,
            }),
            blink: self.blink.next(reset, signals.vsync_pulse),
            registers: self.registers.next(reset, std::slice::from_ref(&inputs.bus)),
            pixels: self.pixels.next(reset, signals.load),
            output,
        }
    }

    /// Evaluate one pixel clock: the outputs for the current snapshot and the
    /// snapshot that follows it. While reset is asserted the outputs are those of
    /// the reset state; each component applies its own reset to the next state.
    pub fn step<M: VideoMemory + ?Sized>(&self, inputs: &ControlInputs, mem: &M) -> (Self, VideoOutputs) {
        let signals = self.signals(mem);
        let next = self.advance(&signals, inputs);
        if inputs.reset {
            let fresh = Self::new();
            return (next, fresh.outputs(&fresh.signals(mem)));
        }
        (next, self.outputs(&signals))
    }
}

pub struct TextModeController {
    state: ControllerState,
    ticks: u64,
    lines: u64,
    frames: u64,
    trace_logger: TraceLogger,
    trace_level: TraceLevel,
}

impl Default for TextModeController {
    fn default() -> Self {
        Self::new(TraceLogger::None)
    }
}

impl TextModeController {
    pub fn new(trace_logger: TraceLogger) -> Self {
        Self {
            state: ControllerState::new(),
            ticks: 0,
            lines: 0,
            frames: 0,
            trace_logger,
            trace_level: TraceLevel::default(),
        }
    }

    pub fn set_trace_level(&mut self, level: TraceLevel) {
        self.trace_level = level;
    }

    /// Asynchronous reset: all state returns to its reset value immediately.
    /// Statistics are kept, and so are the strobe levels last seen on the host bus.
    pub fn reset(&mut self) {
        log::debug!("Controller reset");
        let mut registers = self.state.registers;
        registers.reset();
        self.state = ControllerState {
            registers,
            ..ControllerState::new()
        };
    }

    #[inline]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.state.registers
    }

    pub fn config(&self) -> ConfigRegisters {
        self.state.registers.config()
    }

    /// Pixel clocks since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Completed horizontal lines since construction.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Vertical syncs since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Nominal refresh rate in Hz for the fixed timing.
    pub fn refresh_rate() -> f64 {
        PIXEL_CLOCK_MHZ * 1_000_000.0 / FRAME_TICKS as f64
    }

    /// Advance one pixel clock.
    pub fn step<M: VideoMemory + ?Sized>(&mut self, inputs: &ControlInputs, mem: &M) -> VideoOutputs {
        let prev = self.state;
        let (next, outputs) = prev.step(inputs, mem);
        self.state = next;
        self.ticks += 1;

        if self.trace_level == TraceLevel::Ticks {
            self.trace_tick(&prev, &outputs);
        }

        if inputs.reset {
            return outputs;
        }

        if prev.horizontal.at_reset() {
            self.lines += 1;
            if self.trace_level == TraceLevel::Lines {
                self.trace_tick(&prev, &outputs);
            }
            if prev.vertical.entering(SyncPhase::Sync) {
                self.frames += 1;
                log::trace!("Frame {} complete at tick {}", self.frames, self.ticks);
                if self.trace_level == TraceLevel::Frames {
                    self.trace_tick(&prev, &outputs);
                }
            }
        }

        outputs
    }

    /// Advance one pixel clock with idle inputs.
    #[inline]
    pub fn tick<M: VideoMemory + ?Sized>(&mut self, mem: &M) -> VideoOutputs {
        self.step(&ControlInputs::default(), mem)
    }

    /// Drive a complete write cycle on the host bus: one clock with the strobe
    /// asserted, then one clock with it released.
    pub fn host_write<M: VideoMemory + ?Sized>(
        &mut self,
        address: RegisterAddress,
        data: u8,
        mem: &M,
    ) -> [VideoOutputs; 2] {
        let write = ControlInputs {
            bus: HostBus::write(address as u8, data),
            ..Default::default()
        };
        [self.step(&write, mem), self.tick(mem)]
    }

    /// Run one frame's worth of pixel clocks, handing each clock's outputs to `sink`.
    pub fn run_frame<M, F>(&mut self, mem: &M, mut sink: F)
    where
        M: VideoMemory + ?Sized,
        F: FnMut(&VideoOutputs),
    {
        for _ in 0..FRAME_TICKS {
            let outputs = self.tick(mem);
            sink(&outputs);
        }
    }

    fn trace_tick(&mut self, state: &ControllerState, outputs: &VideoOutputs) {
        trace!(
            self,
            "[T:{:010} F:{:05} HC:{:03} HP:{:10} VC:{:03} VP:{:10} SL:{:02} VMA:{:04} CP:{}] col:{:X} hs:{} vs:{} bl:{}",
            self.ticks,
            self.frames,
            state.horizontal.count(),
            state.horizontal.phase(),
            state.vertical.count(),
            state.vertical.phase(),
            state.addressing.scanline(),
            state.addressing.vram_address(),
            state.char_cycle.phase(),
            outputs.color,
            outputs.hsync() as u8,
            outputs.vsync as u8,
            outputs.blank as u8
        );
    }

    pub fn flush_trace(&mut self) {
        self.trace_logger.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        frame::{FrameCapture, FRAME_HEIGHT, FRAME_WIDTH},
        memory::{DisplayMemory, TextBuffer, DEFAULT_ATTRIBUTE},
        FontRom,
    };

    fn demo_memory() -> DisplayMemory {
        let mut text = TextBuffer::new();
        text.put_char(0, 0, b'A', DEFAULT_ATTRIBUTE).unwrap();
        text.put_char(1, 0, 0xC4, DEFAULT_ATTRIBUTE).unwrap();
        DisplayMemory::new(text, FontRom::debug_pattern())
    }

    fn capture_frame(state: ControllerState, mem: &DisplayMemory) -> (ControllerState, FrameCapture) {
        let mut state = state;
        let mut capture = FrameCapture::new();
        let inputs = ControlInputs::default();
        for _ in 0..FRAME_TICKS {
            let (next, out) = state.step(&inputs, mem);
            capture.push(&out);
            state = next;
        }
        (state, capture)
    }

    fn rising_edges(levels: &[bool]) -> Vec<usize> {
        levels
            .windows(2)
            .enumerate()
            .filter(|(_, w)| !w[0] && w[1])
            .map(|(i, _)| i + 1)
            .collect()
    }

    #[test]
    fn frame_geometry() {
        assert_eq!(LINE_TICKS, 895);
        assert_eq!(FRAME_TICKS, 398_275);
    }

    #[test]
    fn sync_timing_over_two_frames() {
        let mem = DisplayMemory::default();
        let mut controller = TextModeController::default();
        let mut hsync = Vec::new();
        let mut vsync = Vec::new();
        for _ in 0..2 {
            controller.run_frame(&mem, |out| {
                hsync.push(out.hsync());
                vsync.push(out.vsync);
            });
        }

        let v_edges = rising_edges(&vsync);
        assert_eq!(v_edges.len(), 2);
        assert!(v_edges[0] < FRAME_TICKS as usize);
        assert_eq!(v_edges[1] - v_edges[0], FRAME_TICKS as usize);
        let v_high = vsync[1..=FRAME_TICKS as usize].iter().filter(|v| **v).count();
        assert_eq!(v_high, 3 * LINE_TICKS as usize);

        let h_edges = rising_edges(&hsync);
        let first_frame = h_edges.iter().filter(|e| **e < FRAME_TICKS as usize).count();
        assert_eq!(first_frame, 445);
        assert!(h_edges.windows(2).all(|w| w[1] - w[0] == LINE_TICKS as usize));
        let h_high = hsync[1..=LINE_TICKS as usize * 2].iter().filter(|h| **h).count();
        assert_eq!(h_high, 2 * 109);

        assert_eq!(controller.frames(), 2);
        assert_eq!(controller.lines(), 2 * 445);
        assert_eq!(controller.ticks(), 2 * FRAME_TICKS as u64);
    }

    #[test]
    fn display_window_is_720_by_400() {
        let mem = DisplayMemory::default();
        let mut controller = TextModeController::default();
        let mut enabled = 0usize;
        let mut lines = 0usize;
        let mut run = 0usize;
        controller.run_frame(&mem, |out| {
            if out.display_enable {
                enabled += 1;
                run += 1;
            }
            else if run > 0 {
                assert_eq!(run, FRAME_WIDTH);
                lines += 1;
                run = 0;
            }
            // Blank is never deasserted outside the window.
            assert!(out.display_enable || out.blank);
        });
        assert_eq!(enabled, FRAME_WIDTH * FRAME_HEIGHT);
        assert_eq!(lines, FRAME_HEIGHT);
    }

    #[test]
    fn glyph_dots_reach_the_frame() {
        let mem = demo_memory();
        let (_, capture) = capture_frame(ControllerState::new(), &mem);
        assert_eq!(capture.frames(), 1);

        // 'A' = 0100_0001 on debug font rows 1-14; the ninth dot stays background.
        assert_eq!(&capture.line(1)[0..9], &[0, 7, 0, 0, 0, 0, 0, 7, 0]);
        // Rows 0 and 15 are empty.
        assert!(capture.line(0)[0..9].iter().all(|c| *c == 0));
        assert!(capture.line(15)[0..9].iter().all(|c| *c == 0));
        // Box-drawing bar on rows 7 and 8 fills all nine dots.
        assert!(capture.line(7)[9..18].iter().all(|c| *c == 7));
        assert!(capture.line(6)[9..18].iter().all(|c| *c == 0));
        // Second text row starts at frame line 16 and is empty.
        assert!(capture.line(17).iter().all(|c| *c == 0));
        // Blink is low during the first frame, so the cursor at cell 0 is hidden.
        assert_eq!(&capture.line(13)[0..9], &[0, 7, 0, 0, 0, 0, 0, 7, 0]);
    }

    #[test]
    fn ninth_dot_without_stretch_is_background() {
        let mut mem = demo_memory();
        mem.text.fill(0xDB, 0x70);
        let mut font = FontRom::blank();
        font.set_glyph(0xDB, &[0xFF; 16]);
        font.set_glyph(0xB2, &[0xFF; 16]);
        mem.font = font;
        mem.text.put_char(1, 0, 0xB2, 0x70).unwrap();

        let (_, capture) = capture_frame(ControllerState::new(), &mem);
        let line = capture.line(4);
        // 0xDB is in the stretch range.
        assert!(line[0..9].iter().all(|c| *c == 0));
        // 0xB2 is not: eight foreground dots then one background dot.
        assert!(line[9..17].iter().all(|c| *c == 0));
        assert_eq!(line[17], 7);
    }

    #[test]
    fn cursor_shows_in_high_blink_phase() {
        let mem = demo_memory();
        let mut state = ControllerState::new();
        for _ in 0..16 {
            state.blink = state.blink.next(false, true);
        }
        assert!(state.blink.phase_high());

        let (_, capture) = capture_frame(state, &mem);
        // Default cursor shape covers scanlines 13 and 14 of cell 0.
        assert!(capture.line(13)[0..9].iter().all(|c| *c == 7));
        assert!(capture.line(14)[0..9].iter().all(|c| *c == 7));
        assert_eq!(&capture.line(12)[0..9], &[0, 7, 0, 0, 0, 0, 0, 7, 0]);
        assert_eq!(capture.line(13)[9], 0);
    }

    #[test]
    fn blink_attribute_follows_phase() {
        let mut text = TextBuffer::new();
        text.put_char(0, 0, 0xFF, 0x87).unwrap();
        let mem = DisplayMemory::new(text, FontRom::debug_pattern());

        let (_, low) = capture_frame(ControllerState::new(), &mem);
        assert!(low.line(3)[0..8].iter().all(|c| *c == 0));

        let mut state = ControllerState::new();
        for _ in 0..16 {
            state.blink = state.blink.next(false, true);
        }
        // Move the cursor off screen so it does not cover the cell.
        state.registers.write(RegisterAddress::CursorControl, 0x80);
        let (_, high) = capture_frame(state, &mem);
        assert!(high.line(3)[0..8].iter().all(|c| *c == 7));
    }

    #[test]
    fn extended_background_uses_intensity_bit() {
        let mut text = TextBuffer::new();
        text.put_char(0, 0, 0x00, 0x9F).unwrap();
        let mem = DisplayMemory::new(text, FontRom::debug_pattern());
        let mut state = ControllerState::new();
        state.registers.write(RegisterAddress::ModeControl, 0x01);

        let (_, capture) = capture_frame(state, &mem);
        assert!(capture.line(2)[0..9].iter().all(|c| *c == 9));
    }

    #[test]
    fn host_write_takes_effect() {
        let mem = DisplayMemory::default();
        let mut controller = TextModeController::default();
        controller.host_write(RegisterAddress::CursorAddressLow, 0xA5, &mem);
        controller.host_write(RegisterAddress::CursorControl, 0x03, &mem);
        assert_eq!(controller.config().cursor_address, 0x3A5);
        assert_eq!(controller.registers().cursor_address(), 0x3A5);
        assert_eq!(controller.ticks(), 4);
    }

    #[test]
    fn held_strobe_writes_once() {
        let mem = DisplayMemory::default();
        let mut controller = TextModeController::default();
        let held = ControlInputs {
            bus: HostBus::write(RegisterAddress::CursorShape as u8, 0x21),
            ..Default::default()
        };
        controller.step(&held, &mem);
        // Data changes while the strobe stays low: not a new write.
        let changed = ControlInputs {
            bus: HostBus::write(RegisterAddress::CursorShape as u8, 0x43),
            ..Default::default()
        };
        controller.step(&changed, &mem);
        assert_eq!(controller.registers().cursor_extents(), (1, 2));
    }

    #[test]
    fn screen_blank_forces_blank() {
        let mem = demo_memory();
        let mut controller = TextModeController::default();
        controller.host_write(RegisterAddress::ModeControl, 0x10, &mem);
        assert!(controller.config().screen_blank);

        let mut enabled = 0;
        controller.run_frame(&mem, |out| {
            assert!(out.blank);
            if out.display_enable {
                enabled += 1;
            }
        });
        // Timing keeps running.
        assert_eq!(enabled, FRAME_WIDTH * FRAME_HEIGHT);
    }

    #[test]
    fn external_blank_forces_blank() {
        let mem = demo_memory();
        let mut state = ControllerState::new();
        let inputs = ControlInputs {
            external_blank: true,
            ..Default::default()
        };
        for _ in 0..LINE_TICKS * 40 {
            let (next, out) = state.step(&inputs, &mem);
            assert!(out.blank);
            state = next;
        }
    }

    #[test]
    fn reset_wins() {
        let mem = demo_memory();
        let mut state = ControllerState::new();
        state.registers.write(RegisterAddress::CursorShape, 0x00);
        for _ in 0..LINE_TICKS * 37 + 123 {
            state = state.step(&ControlInputs::default(), &mem).0;
        }
        let reset = ControlInputs {
            reset: true,
            bus: HostBus::write(RegisterAddress::ModeControl as u8, 0x10),
            ..Default::default()
        };
        let (after, out) = state.step(&reset, &mem);
        let fresh = ControllerState::new();

        assert!(out.blank);
        assert!(!out.display_enable);
        assert!(!out.vsync && !out.hsync());
        assert_eq!(out.vram_address, 0);

        assert_eq!(after.horizontal, fresh.horizontal);
        assert_eq!(after.vertical, fresh.vertical);
        assert_eq!(after.char_cycle.phase(), fresh.char_cycle.phase());
        assert_eq!(after.addressing.vram_address(), 0);
        assert_eq!(after.addressing.scanline(), 0);
        assert_eq!(after.blink.value(), 0);
        assert_eq!(after.registers.config(), fresh.registers.config());
        assert_eq!(after.pixels.shift_register(), 0);
        assert_eq!(after.output, OutputStage::default());
    }

    #[test]
    fn held_strobe_survives_both_resets() {
        let mem = DisplayMemory::default();
        let held = ControlInputs {
            bus: HostBus::write(RegisterAddress::ModeControl as u8, 0x10),
            ..Default::default()
        };
        let held_in_reset = ControlInputs { reset: true, ..held };

        // Synchronous reset.
        let mut controller = TextModeController::default();
        controller.step(&held, &mem);
        assert!(controller.config().screen_blank);
        controller.step(&held_in_reset, &mem);
        assert!(!controller.config().screen_blank);
        controller.step(&held, &mem);
        assert!(!controller.config().screen_blank);

        // Immediate reset.
        let mut controller = TextModeController::default();
        controller.step(&held, &mem);
        assert!(controller.config().screen_blank);
        controller.reset();
        assert!(!controller.config().screen_blank);
        controller.step(&held, &mem);
        assert!(!controller.config().screen_blank);
    }

    #[test]
    fn reset_keeps_pixel_latches() {
        let mem = DisplayMemory::default();
        let mut state = ControllerState::new();
        state.pixels = state.pixels.next(
            false,
            Some(PixelLoad {
                glyph_row: 0xFF,
                char_code: 0x41,
                attribute: 0x1E,
                cursor_active: true,
            }),
        );
        let reset = ControlInputs {
            reset: true,
            ..Default::default()
        };
        let (after, out) = state.step(&reset, &mem);
        assert_eq!(after.pixels.shift_register(), 0);
        assert_eq!(after.pixels.attribute(), 0x1E);
        assert!(after.pixels.cursor_active());
        // Outputs still show the reset state.
        assert_eq!(out.color, 0);
        assert!(out.blank);
    }

    #[test]
    fn controller_reset_is_immediate() {
        let mem = DisplayMemory::default();
        let mut controller = TextModeController::default();
        controller.host_write(RegisterAddress::ModeControl, 0x11, &mem);
        for _ in 0..1000 {
            controller.tick(&mem);
        }
        controller.reset();
        assert_eq!(controller.state().horizontal.count(), 0);
        assert!(!controller.config().screen_blank);
        assert_eq!(controller.ticks(), 1002);
    }

    #[test]
    fn refresh_rate_is_about_71hz() {
        let rate = TextModeController::refresh_rate();
        assert!((rate - 71.11).abs() < 0.1, "rate = {rate}");
    }
}
