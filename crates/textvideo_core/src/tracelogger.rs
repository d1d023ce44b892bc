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

    tracelogger.rs

    Cycle trace sink for the controller. Tracing is opt-in: when the sink is
    `None` the controller skips formatting entirely.

*/

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

/// How often the controller writes a trace line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TraceLevel {
    /// One line per vertical sync.
    #[default]
    Frames,
    /// One line per horizontal line.
    Lines,
    /// One line per pixel clock. Very large.
    Ticks,
}

impl FromStr for TraceLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "frames" => Ok(TraceLevel::Frames),
            "lines" => Ok(TraceLevel::Lines),
            "ticks" => Ok(TraceLevel::Ticks),
            _ => Err(format!("Bad value for trace level: {}", s)),
        }
    }
}

#[derive(Debug, Default)]
pub enum TraceLogger {
    FileWriter(BufWriter<File>),
    Console,
    #[default]
    None,
}

impl TraceLogger {
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::create(path.as_ref())?;
        log::debug!("Writing video trace to {}", path.as_ref().display());
        Ok(TraceLogger::FileWriter(BufWriter::new(file)))
    }

    #[inline(always)]
    pub fn println<S: AsRef<str>>(&mut self, msg: S) {
        match self {
            TraceLogger::FileWriter(buf) => {
                _ = buf.write_all(msg.as_ref().as_bytes());
                _ = buf.write_all(b"\n");
            }
            TraceLogger::Console => println!("{}", msg.as_ref()),
            TraceLogger::None => (),
        }
    }

    pub fn flush(&mut self) {
        if let TraceLogger::FileWriter(file) = self {
            if let Err(e) = file.flush() {
                log::error!("Failed to flush trace log: {}", e);
            }
        }
    }

    #[inline(always)]
    pub fn is_some(&self) -> bool {
        !matches!(*self, TraceLogger::None)
    }
}

impl Drop for TraceLogger {
    fn drop(&mut self) {
        self.flush();
    }
}
