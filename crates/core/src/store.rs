//! Frame store: decoding animation JSON into an [`Animation`].
//!
//! The wire format is a JSON array of frames, each frame an array of
//! strings (one per line). Frame and line counts may vary between frames.

use crate::types::{Animation, Frame};

/// Errors from loading animation data. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error("animation data is not a JSON array of string arrays")]
    Parse(#[from] serde_json::Error),
    #[error("animation data contains no frames")]
    Empty,
}

/// Decode an animation from JSON text.
pub fn from_json(json: &str) -> Result<Animation, AnimationError> {
    let frames: Vec<Frame> = serde_json::from_str(json)?;
    Animation::from_frames(frames).ok_or(AnimationError::Empty)
}

/// Decode an animation from raw JSON bytes.
pub fn from_json_slice(bytes: &[u8]) -> Result<Animation, AnimationError> {
    let frames: Vec<Frame> = serde_json::from_slice(bytes)?;
    Animation::from_frames(frames).ok_or(AnimationError::Empty)
}
