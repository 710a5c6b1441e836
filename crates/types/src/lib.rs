//! Shared data types and defaults.
//!
//! Everything here is plain data: frames, the loaded animation, and the
//! resolved runtime configuration. No I/O and no timers live in this crate,
//! so the types are usable from the compiler, the encoder, and the player
//! alike.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FPS` | 20 | Frames per second |
//! | `DEFAULT_TRIGGER_FRAME` | 14 | Frame at which the sound cue fires |
//! | `DEFAULT_SOUND_PATH` | `/tmp/ciallo.wav` | Where the embedded sound is materialized |
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use ciallo_types::RuntimeConfig;
//!
//! let config = RuntimeConfig::new(20, 14, "/tmp/ciallo.wav", true).unwrap();
//! assert_eq!(config.frame_period(), Duration::from_millis(50));
//! assert_eq!(config.sound_delay(), Duration::from_millis(700));
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Default playback rate in frames per second.
pub const DEFAULT_FPS: u32 = 20;

/// Default frame index at which the sound cue fires.
pub const DEFAULT_TRIGGER_FRAME: u32 = 14;

/// Default location the embedded sound is written to.
pub const DEFAULT_SOUND_PATH: &str = "/tmp/ciallo.wav";

/// One full screen state: an ordered list of text lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line `row`, or `None` past the end of the frame.
    #[inline]
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Frame {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Immutable, non-empty sequence of frames.
///
/// Frame 0 follows the last frame when playback loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    frames: Vec<Frame>,
}

impl Animation {
    /// Wrap `frames`, or `None` when there are no frames at all.
    pub fn from_frames(frames: Vec<Frame>) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        Some(Self { frames })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Number of frames (always at least 1).
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Errors from resolving a [`RuntimeConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("frame rate must be at least 1 frame per second")]
    ZeroFrameRate,
}

/// Resolved runtime settings, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    fps: u32,
    trigger_frame: u32,
    sound_path: PathBuf,
    sound_enabled: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            trigger_frame: DEFAULT_TRIGGER_FRAME,
            sound_path: PathBuf::from(DEFAULT_SOUND_PATH),
            sound_enabled: true,
        }
    }
}

impl RuntimeConfig {
    pub fn new(
        fps: u32,
        trigger_frame: u32,
        sound_path: impl Into<PathBuf>,
        sound_enabled: bool,
    ) -> Result<Self, ConfigError> {
        if fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(Self {
            fps,
            trigger_frame,
            sound_path: sound_path.into(),
            sound_enabled,
        })
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn trigger_frame(&self) -> u32 {
        self.trigger_frame
    }

    pub fn sound_path(&self) -> &Path {
        &self.sound_path
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Nominal time between two frames: `1s / fps`.
    #[inline]
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    /// Delay from cycle start to the sound cue: `frame_period * trigger_frame`.
    #[inline]
    pub fn sound_delay(&self) -> Duration {
        self.frame_period() * self.trigger_frame
    }

    /// Pull an out-of-range trigger frame back to the last frame.
    ///
    /// Returns the original index when it had to be clamped.
    pub fn clamp_trigger_frame(&mut self, frame_count: usize) -> Option<u32> {
        let last = u32::try_from(frame_count.saturating_sub(1)).unwrap_or(u32::MAX);
        if self.trigger_frame <= last {
            return None;
        }
        let original = self.trigger_frame;
        self.trigger_frame = last;
        Some(original)
    }
}
