//! Audio trigger: a fire-and-forget sound cue per animation cycle.
//!
//! Each call to [`AudioTrigger::fire`] spawns an independent task that
//! sleeps for the configured delay and then runs the external player to
//! completion. Nobody waits on the task and its outcome is dropped, so a
//! slow or failing player never holds up frame emission. Cues from
//! consecutive cycles may overlap if the player outlives a cycle.

use std::ffi::OsString;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::types::RuntimeConfig;

/// Plays a sound file and resolves once playback is over.
pub trait SoundPlayer: Send + Sync + 'static {
    fn play(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;
}

/// Runs `ffplay -nodisp -autoexit <file>` with all output discarded.
///
/// The child is killed if its task is dropped, so a cue that is still
/// playing stops when the runtime shuts down.
#[derive(Debug, Clone)]
pub struct FfplayPlayer {
    program: OsString,
}

impl Default for FfplayPlayer {
    fn default() -> Self {
        Self {
            program: OsString::from("ffplay"),
        }
    }
}

impl FfplayPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different executable with ffplay-compatible arguments.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SoundPlayer for FfplayPlayer {
    fn play(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-nodisp", "-autoexit", "-loglevel", "quiet"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        async move {
            let status = cmd.status().await?;
            if status.success() {
                Ok(())
            } else {
                Err(io::Error::other(format!("sound player exited with {status}")))
            }
        }
    }
}

/// Spawns delayed sound cues.
pub struct AudioTrigger<P> {
    player: Arc<P>,
    path: PathBuf,
    delay: Duration,
}

impl<P: SoundPlayer> AudioTrigger<P> {
    /// Delay and sound path are taken from `config` once and reused for
    /// every cycle.
    pub fn new(player: P, config: &RuntimeConfig) -> Self {
        Self {
            player: Arc::new(player),
            path: config.sound_path().to_path_buf(),
            delay: config.sound_delay(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Schedule one cue. The returned handle may be dropped; the task keeps
    /// running detached.
    pub fn fire(&self) -> JoinHandle<()> {
        let player = Arc::clone(&self.player);
        let path = self.path.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(path = %path.display(), "sound cue");
            if let Err(e) = player.play(&path).await {
                debug!(error = %e, "sound player failed; ignoring");
            }
        })
    }
}
