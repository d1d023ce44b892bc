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

//! The `textvideo_config` crate reads TextVideo's TOML configuration file and
//! overlays command line arguments on top of it. Command line arguments always
//! take priority over the configuration file.
//!
//! Features:
//! - `use_bpaf`: Enable BPAF support for command line argument parsing.

mod bpaf_config;

use std::path::{Path, PathBuf};

use anyhow::Context;
use cfg_if::cfg_if;
use serde_derive::Deserialize;

#[cfg(feature = "use_bpaf")]
use bpaf_config::cli_args;
pub use bpaf_config::CmdLineArgs;

pub const DEFAULT_FRAMES: u32 = 2;

fn _default_basedir() -> PathBuf {
    PathBuf::from(".")
}
const fn _default_frames() -> u32 {
    DEFAULT_FRAMES
}

#[derive(Debug, Deserialize)]
pub struct Emulator {
    #[serde(default = "_default_basedir")]
    pub basedir: PathBuf,
    #[serde(default = "_default_frames")]
    pub frames: u32,
    pub output: Option<PathBuf>,
    pub trace_file: Option<PathBuf>,
    pub trace_level: Option<String>,
}

impl Default for Emulator {
    fn default() -> Self {
        Self {
            basedir: _default_basedir(),
            frames: DEFAULT_FRAMES,
            output: None,
            trace_file: None,
            trace_level: None,
        }
    }
}

/// A register write applied through the host bus before the first frame.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RegisterWrite {
    pub address: u8,
    pub value: u8,
}

#[derive(Debug, Default, Deserialize)]
pub struct Video {
    pub font: Option<PathBuf>,
    pub text: Option<PathBuf>,
    #[serde(default)]
    pub extended_background: bool,
    #[serde(default)]
    pub screen_blank: bool,
    #[serde(default)]
    pub external_blank: bool,
    #[serde(default)]
    pub register_write: Vec<RegisterWrite>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFileParams {
    #[serde(default)]
    pub emulator: Emulator,
    #[serde(default)]
    pub video: Video,
}

impl ConfigFileParams {
    pub fn overlay(&mut self, shell_args: CmdLineArgs) {
        if let Some(basedir) = shell_args.base_dir {
            self.emulator.basedir = basedir;
        }
        if let Some(frames) = shell_args.frames {
            self.emulator.frames = frames;
        }
        if let Some(output) = shell_args.output {
            self.emulator.output = Some(output);
        }
        if let Some(trace_file) = shell_args.trace_file {
            self.emulator.trace_file = Some(trace_file);
        }
        if let Some(trace_level) = shell_args.trace_level {
            self.emulator.trace_level = Some(trace_level);
        }

        if let Some(font) = shell_args.font {
            self.video.font = Some(font);
        }
        if let Some(text) = shell_args.text {
            self.video.text = Some(text);
        }
        self.video.extended_background |= shell_args.extended_background;
        self.video.screen_blank |= shell_args.screen_blank;
        self.video.external_blank |= shell_args.external_blank;
    }

    /// Resolve a configured path against the base directory. Absolute paths are
    /// returned unchanged.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        }
        else {
            self.emulator.basedir.join(path)
        }
    }
}

pub fn read_config(toml_string: impl AsRef<str>, shell_args: CmdLineArgs) -> Result<ConfigFileParams, anyhow::Error> {
    let mut toml_args: ConfigFileParams = toml::from_str(toml_string.as_ref())?;

    // Command line arguments override config file arguments
    toml_args.overlay(shell_args);

    Ok(toml_args)
}

fn shell_args() -> CmdLineArgs {
    let shell_args: CmdLineArgs;

    cfg_if! {
        if #[cfg(feature = "use_bpaf")] {
            log::debug!("Reading command line arguments...");
            shell_args = cli_args().run();
        } else {
            log::debug!("Argument reading disabled...");
            shell_args = CmdLineArgs::default();
        }
    }

    shell_args
}

/// Read the TOML configuration from a file path, parse and overlay command line
/// arguments. A missing file at `default_path` is not an error: every setting
/// then takes its default value. A file named with `--config_file` must exist.
pub fn read_config_file<P>(default_path: P) -> Result<ConfigFileParams, anyhow::Error>
where
    P: AsRef<Path>,
{
    let shell_args = shell_args();

    // Allow configuration file path to be overridden by command line argument 'config_file'
    let toml_string = if let Some(configfile_path) = shell_args.config_file.as_ref() {
        std::fs::read_to_string(configfile_path)
            .with_context(|| format!("Couldn't read config file {}", configfile_path.display()))?
    }
    else if default_path.as_ref().exists() {
        std::fs::read_to_string(default_path.as_ref())
            .with_context(|| format!("Couldn't read config file {}", default_path.as_ref().display()))?
    }
    else {
        log::info!(
            "No config file at {}, using defaults",
            default_path.as_ref().display()
        );
        String::new()
    };

    read_config(toml_string, shell_args)
}


#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [emulator]
        basedir = "media"
        frames = 5
        output = "out.png"

        [video]
        font = "font.bin"
        extended_background = true

        [[video.register_write]]
        address = 2
        value = 0x0F

        [[video.register_write]]
        address = 1
        value = 165
    "#;

    #[test]
    fn parses_sample() {
        let config = read_config(SAMPLE, CmdLineArgs::default()).unwrap();
        assert_eq!(config.emulator.frames, 5);
        assert_eq!(config.emulator.basedir, PathBuf::from("media"));
        assert_eq!(config.video.font, Some(PathBuf::from("font.bin")));
        assert!(config.video.extended_background);
        assert!(!config.video.screen_blank);
        assert_eq!(
            config.video.register_write,
            vec![
                RegisterWrite { address: 2, value: 0x0F },
                RegisterWrite { address: 1, value: 165 },
            ]
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = read_config("", CmdLineArgs::default()).unwrap();
        assert_eq!(config.emulator.frames, DEFAULT_FRAMES);
        assert_eq!(config.emulator.basedir, PathBuf::from("."));
        assert!(config.video.font.is_none());
        assert!(config.video.register_write.is_empty());
    }

    #[test]
    fn command_line_overrides_file() {
        let args = CmdLineArgs {
            frames: Some(9),
            font: Some(PathBuf::from("other.bin")),
            screen_blank: true,
            ..Default::default()
        };
        let config = read_config(SAMPLE, args).unwrap();
        assert_eq!(config.emulator.frames, 9);
        assert_eq!(config.video.font, Some(PathBuf::from("other.bin")));
        assert!(config.video.screen_blank);
        // Switches can only turn settings on.
        assert!(config.video.extended_background);
        assert_eq!(config.emulator.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(read_config("[video]\nfont = 3", CmdLineArgs::default()).is_err());
    }

    #[test]
    fn relative_paths_resolve_against_basedir() {
        let config = read_config(SAMPLE, CmdLineArgs::default()).unwrap();
        assert_eq!(config.resolve_path("font.bin"), PathBuf::from("media").join("font.bin"));
    }
}
