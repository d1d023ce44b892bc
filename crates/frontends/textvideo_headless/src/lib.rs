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
*/

//! TextVideo headless front-end main library component.

#![forbid(unsafe_code)]

use std::{
    str::FromStr,
    time::{Duration, Instant},
};

use anyhow::Context;
use strum::IntoEnumIterator;

use textvideo_config::ConfigFileParams;
use textvideo_core::{
    frame::FrameCapture,
    memory::DEFAULT_ATTRIBUTE,
    register_file::ModeControlRegister,
    tracelogger::{TraceLevel, TraceLogger},
    ControlInputs,
    DisplayMemory,
    FontRom,
    RegisterAddress,
    TextBuffer,
    TextModeController,
    TEXT_COLUMNS,
    TEXT_ROWS,
};

pub const DEFAULT_CONFIG_PATH: &str = "./textvideo.toml";

// Run statistics
#[derive(Debug, Default)]
pub struct RunStats {
    pub frames: u64,
    pub lines: u64,
    pub ticks: u64,
    pub captured_frames: u64,
    pub emulation_time: Duration,
}

impl RunStats {
    /// Simulated pixel clocks per wall-clock second.
    pub fn ticks_per_second(&self) -> f64 {
        let secs = self.emulation_time.as_secs_f64();
        if secs > 0.0 {
            self.ticks as f64 / secs
        }
        else {
            0.0
        }
    }
}

pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Resolve the configuration by parsing the configuration toml and merging it with command
    // line arguments.
    let config = match textvideo_config::read_config_file(DEFAULT_CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to read configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    match run_headless(&config) {
        Ok(stats) => {
            log::info!(
                "Ran {} frames ({} lines, {} ticks) in {:.3}s: {:.2} Mticks/s, {:.1}% of real time",
                stats.frames,
                stats.lines,
                stats.ticks,
                stats.emulation_time.as_secs_f64(),
                stats.ticks_per_second() / 1_000_000.0,
                stats.ticks_per_second() / (textvideo_core::PIXEL_CLOCK_MHZ * 1_000_000.0) * 100.0
            );
        }
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

/// Build the display memory from the configured font and text images, falling back
/// to the debug font and the demo screen.
pub fn load_memory(config: &ConfigFileParams) -> anyhow::Result<DisplayMemory> {
    let font = match &config.video.font {
        Some(path) => {
            let path = config.resolve_path(path);
            FontRom::from_file(&path).with_context(|| format!("Loading font ROM {}", path.display()))?
        }
        None => {
            log::info!("No font image configured, using debug font");
            FontRom::debug_pattern()
        }
    };

    let text = match &config.video.text {
        Some(path) => {
            let path = config.resolve_path(path);
            TextBuffer::from_file(&path).with_context(|| format!("Loading text image {}", path.display()))?
        }
        None => demo_screen()?,
    };

    Ok(DisplayMemory::new(text, font))
}

/// A built-in screen exercising every colour pair, blink, and box drawing.
pub fn demo_screen() -> anyhow::Result<TextBuffer> {
    let mut text = TextBuffer::new();
    text.fill(b' ', DEFAULT_ATTRIBUTE);

    // Frame around the whole screen.
    let right = TEXT_COLUMNS - 1;
    let bottom = TEXT_ROWS - 1;
    for col in 1..right {
        text.put_char(col, 0, 0xC4, DEFAULT_ATTRIBUTE)?;
        text.put_char(col, bottom, 0xC4, DEFAULT_ATTRIBUTE)?;
    }
    for row in 1..bottom {
        text.put_char(0, row, 0xB3, DEFAULT_ATTRIBUTE)?;
        text.put_char(right, row, 0xB3, DEFAULT_ATTRIBUTE)?;
    }
    text.put_char(0, 0, 0xDA, DEFAULT_ATTRIBUTE)?;
    text.put_char(right, 0, 0xBF, DEFAULT_ATTRIBUTE)?;
    text.put_char(0, bottom, 0xC0, DEFAULT_ATTRIBUTE)?;
    text.put_char(right, bottom, 0xD9, DEFAULT_ATTRIBUTE)?;

    text.put_str(2, 1, "TextVideo 80x25 text mode", 0x0F)?;

    // One row per background colour, one cell per foreground colour.
    for bg in 0..8u8 {
        let row = 3 + bg as u16;
        for fg in 0..16u8 {
            text.put_char(2 + fg as u16 * 2, row, b'A' + fg, (bg << 4) | fg)?;
        }
    }

    text.put_str(2, 12, "Blinking text", 0x8E)?;
    text.put_str(2, 13, "Bright background in extended mode", 0xF1)?;

    for (i, code) in (0..=255u8).enumerate() {
        let col = 2 + (i % 64) as u16;
        let row = 15 + (i / 64) as u16;
        text.put_char(col, row, code, DEFAULT_ATTRIBUTE)?;
    }

    Ok(text)
}

/// Mode control value for the configured mode switches.
pub fn mode_control_value(config: &ConfigFileParams) -> u8 {
    ModeControlRegister::new()
        .with_extended_background(config.video.extended_background)
        .with_screen_blank(config.video.screen_blank)
        .into_bytes()[0]
}

/// Program the register file through the host bus: mode control first, then every
/// configured write in order.
pub fn apply_register_writes(controller: &mut TextModeController, config: &ConfigFileParams, mem: &DisplayMemory) {
    controller.host_write(RegisterAddress::ModeControl, mode_control_value(config), mem);

    for write in &config.video.register_write {
        let address = RegisterAddress::from_bits(write.address);
        if address as u8 != write.address {
            log::warn!(
                "Register address {} out of range, writing to {} instead",
                write.address,
                address
            );
        }
        controller.host_write(address, write.value, mem);
    }

    for address in RegisterAddress::iter() {
        log::debug!("{}: {:02X}", address, controller.registers().read(address));
    }
}

fn trace_logger(config: &ConfigFileParams) -> anyhow::Result<(TraceLogger, TraceLevel)> {
    let level = match &config.emulator.trace_level {
        Some(level) => TraceLevel::from_str(level).map_err(anyhow::Error::msg)?,
        None => TraceLevel::default(),
    };
    let logger = match &config.emulator.trace_file {
        Some(path) => {
            let path = config.resolve_path(path);
            TraceLogger::from_path(&path).with_context(|| format!("Creating trace file {}", path.display()))?
        }
        None => TraceLogger::None,
    };
    Ok((logger, level))
}

/// Run the configured number of frames and save the last one if an output path is set.
pub fn run_headless(config: &ConfigFileParams) -> anyhow::Result<RunStats> {
    let mem = load_memory(config)?;
    let (logger, level) = trace_logger(config)?;

    let mut controller = TextModeController::new(logger);
    controller.set_trace_level(level);
    apply_register_writes(&mut controller, config, &mem);

    let inputs = ControlInputs {
        external_blank: config.video.external_blank,
        ..Default::default()
    };

    let mut capture = FrameCapture::new();
    let frames = config.emulator.frames.max(1) as u64;
    let start = Instant::now();

    // Run until the requested number of frames have been captured.
    while capture.frames() < frames {
        let out = controller.step(&inputs, &mem);
        capture.push(&out);
    }

    let stats = RunStats {
        frames: controller.frames(),
        lines: controller.lines(),
        ticks: controller.ticks(),
        captured_frames: capture.frames(),
        emulation_time: start.elapsed(),
    };
    controller.flush_trace();

    if let Some(output) = &config.emulator.output {
        let path = config.resolve_path(output);
        capture
            .save_png(&path)
            .with_context(|| format!("Saving frame to {}", path.display()))?;
        log::info!("Saved frame to {}", path.display());
    }

    Ok(stats)
}
