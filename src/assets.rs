//! Built-in animation and sound.
//!
//! Both are compiled into the binary. The sound has to exist on disk for the
//! external player, so it is written out at startup and removed again on
//! interrupt.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::core::store;
use crate::player::TransientFile;
use crate::types::Animation;

/// Built-in animation, as JSON.
pub const ANIMATION_JSON: &[u8] = include_bytes!("../assets/ciallo.json");

/// Built-in sound cue, as a WAV file.
pub const SOUND_WAV: &[u8] = include_bytes!("../assets/ciallo.wav");

/// Raw animation JSON: the input file if it can be read, otherwise the
/// built-in animation.
pub fn animation_source(input: Option<&Path>) -> Cow<'static, [u8]> {
    let Some(path) = input else {
        return Cow::Borrowed(ANIMATION_JSON);
    };
    match fs::read(path) {
        Ok(bytes) => Cow::Owned(bytes),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read input, using built-in animation");
            Cow::Borrowed(ANIMATION_JSON)
        }
    }
}

/// Load and validate the animation. Any decoding problem is fatal.
pub fn load_animation(input: Option<&Path>) -> Result<Animation> {
    let source = animation_source(input);
    let origin = match (&source, input) {
        (Cow::Owned(_), Some(path)) => path.display().to_string(),
        _ => "built-in animation".to_string(),
    };
    store::from_json_slice(&source).with_context(|| format!("failed to load {origin}"))
}

/// Write the built-in sound to `path`.
///
/// Failures are logged and swallowed; playback simply runs without sound.
/// On success the file is returned as transient so it is deleted on exit.
pub fn materialize_sound(path: &Path) -> Option<TransientFile> {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!(path = %parent.display(), error = %e, "cannot create sound directory");
            return None;
        }
    }

    if let Err(e) = fs::write(path, SOUND_WAV) {
        warn!(path = %path.display(), error = %e, "cannot write built-in sound");
        return None;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o644));
    }

    debug!(path = %path.display(), bytes = SOUND_WAV.len(), "built-in sound written");
    Some(TransientFile::new(path))
}
