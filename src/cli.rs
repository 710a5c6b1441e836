//! Command-line surface.
//!
//! Every option can also come from a `CIALLO_*` environment variable; an
//! explicit flag wins over the environment.

use std::path::PathBuf;

use clap::Parser;

use crate::types::{ConfigError, RuntimeConfig, DEFAULT_FPS, DEFAULT_SOUND_PATH, DEFAULT_TRIGGER_FRAME};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ciallo", version)]
#[command(about = "A small terminal ASCII animation player.")]
#[command(after_help = "Use Ctrl+C to exit.")]
pub struct Args {
    /// Frames per second
    #[arg(
        short,
        long,
        env = "CIALLO_FPS",
        value_name = "N",
        default_value_t = DEFAULT_FPS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub fps: u32,

    /// Animation JSON file (an array of frames, each an array of lines);
    /// the built-in animation is used when omitted or unreadable
    #[arg(short, long, env = "CIALLO_INPUT", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Sound file to play; defaults to the built-in sound written to /tmp/ciallo.wav
    #[arg(short, long, env = "CIALLO_SOUND", value_name = "FILE")]
    pub sound: Option<PathBuf>,

    /// Frame at which the sound starts (0 = first frame)
    #[arg(
        short,
        long,
        env = "CIALLO_TRIGGER",
        value_name = "FRAME",
        default_value_t = DEFAULT_TRIGGER_FRAME
    )]
    pub trigger: u32,

    /// Enable sound (default)
    #[arg(short, long, overrides_with = "quiet")]
    pub audio: bool,

    /// Disable sound
    #[arg(short, long, overrides_with = "audio")]
    pub quiet: bool,

    /// Write diagnostics to this file (filter with RUST_LOG)
    #[arg(long, env = "CIALLO_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn sound_enabled(&self) -> bool {
        !self.quiet
    }

    /// True when no sound file was given and the built-in one is used.
    pub fn uses_embedded_sound(&self) -> bool {
        self.sound.is_none()
    }

    pub fn runtime_config(&self) -> Result<RuntimeConfig, ConfigError> {
        let sound_path = self
            .sound
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOUND_PATH));
        RuntimeConfig::new(self.fps, self.trigger, sound_path, self.sound_enabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn help_mentions_ctrl_c() {
        let help = Args::command().render_long_help().to_string();
        assert!(help.contains("Ctrl+C"));
    }
}
