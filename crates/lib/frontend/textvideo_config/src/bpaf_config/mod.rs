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

use std::path::PathBuf;

#[cfg(feature = "use_bpaf")]
use bpaf::Bpaf;

/// Command line arguments. Every field overrides the matching config file value
/// when present.
#[cfg_attr(feature = "use_bpaf", derive(Bpaf))]
#[cfg_attr(feature = "use_bpaf", bpaf(options, version, generate(cli_args)))]
#[derive(Debug, Default)]
pub struct CmdLineArgs {
    #[cfg_attr(feature = "use_bpaf", bpaf(long("config_file"), long("configfile")))]
    pub config_file: Option<PathBuf>,

    #[cfg_attr(feature = "use_bpaf", bpaf(long("base_dir"), long("basedir")))]
    pub base_dir: Option<PathBuf>,

    /// Font ROM image, 4096 bytes
    #[cfg_attr(feature = "use_bpaf", bpaf(long))]
    pub font: Option<PathBuf>,

    /// Text buffer image of interleaved character/attribute bytes
    #[cfg_attr(feature = "use_bpaf", bpaf(long))]
    pub text: Option<PathBuf>,

    /// Number of frames to run
    #[cfg_attr(feature = "use_bpaf", bpaf(long))]
    pub frames: Option<u32>,

    /// PNG file to write the last frame to
    #[cfg_attr(feature = "use_bpaf", bpaf(long))]
    pub output: Option<PathBuf>,

    #[cfg_attr(feature = "use_bpaf", bpaf(long("trace_file"), long("tracefile")))]
    pub trace_file: Option<PathBuf>,

    /// frames, lines or ticks
    #[cfg_attr(feature = "use_bpaf", bpaf(long("trace_level"), long("tracelevel")))]
    pub trace_level: Option<String>,

    #[cfg_attr(feature = "use_bpaf", bpaf(long("extended_background"), switch))]
    pub extended_background: bool,

    #[cfg_attr(feature = "use_bpaf", bpaf(long("screen_blank"), switch))]
    pub screen_blank: bool,

    #[cfg_attr(feature = "use_bpaf", bpaf(long("external_blank"), switch))]
    pub external_blank: bool,
}
