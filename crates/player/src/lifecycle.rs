//! Lifecycle controller: interrupt handling and terminal teardown.
//!
//! One interrupt ends the session. The listener publishes the shutdown flag,
//! the playback clock stops before its next frame, and [`run_session`]
//! restores the terminal, prints the farewell and releases the transient
//! sound file.
//!
//! Further interrupts are absorbed by the listener for the rest of the
//! process lifetime, so teardown always runs to completion.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::audio::SoundPlayer;
use crate::clock::{PlaybackClock, PlaybackReport};
use crate::term::TerminalRenderer;
use crate::types::RuntimeConfig;

/// Install the interrupt listener and return the shutdown flag.
///
/// Registration happens before this returns, so an interrupt arriving at
/// any point afterwards is observed.
pub fn listen_for_interrupt() -> io::Result<watch::Receiver<bool>> {
    let (tx, rx) = watch::channel(false);

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            if sigint.recv().await.is_some() {
                info!("interrupt received, shutting down");
                let _ = tx.send(true);
            }
            while sigint.recv().await.is_some() {
                debug!("interrupt during shutdown ignored");
            }
        });
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, shutting down");
                let _ = tx.send(true);
            }
            while tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupt during shutdown ignored");
            }
        });
    }

    Ok(rx)
}

/// A file created at startup that is deleted on interrupt.
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
}

impl TransientFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort delete. Returns whether the file is gone.
    pub fn release(self) -> bool {
        match std::fs::remove_file(&self.path) {
            Ok(()) => true,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "transient file not removed");
                false
            }
        }
    }
}

/// Restore the terminal, say goodbye, then drop the transient file.
pub fn teardown<W: Write>(
    term: &mut TerminalRenderer<W>,
    config: &RuntimeConfig,
    transient: Option<TransientFile>,
) -> Result<()> {
    let restored = term.restore(config.fps());
    if let Some(file) = transient {
        file.release();
    }
    restored
}

/// Play until `shutdown` fires, then tear down.
///
/// Teardown runs even when playback fails, and the playback error takes
/// precedence over a teardown error.
pub async fn run_session<P: SoundPlayer, W: Write>(
    clock: &PlaybackClock<P>,
    term: &mut TerminalRenderer<W>,
    config: &RuntimeConfig,
    transient: Option<TransientFile>,
    shutdown: watch::Receiver<bool>,
) -> Result<PlaybackReport> {
    let played = match term.enter() {
        Ok(()) => clock.run(term, shutdown).await,
        Err(e) => Err(e),
    };

    // Always try to restore terminal state.
    let restored = teardown(term, config, transient);
    let report = played?;
    restored?;
    info!(cycles = report.cycles, frames = report.frames, "session ended");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Accepts `limit` bytes, then fails every write.
    struct BrokenPipe {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.limit {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn release_removes_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cue.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        assert!(TransientFile::new(&path).release());
        assert!(!path.exists());
        assert!(!TransientFile::new(&path).release());
    }

    #[test]
    fn teardown_restores_then_releases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cue.wav");
        std::fs::write(&path, b"RIFF").unwrap();
        let config = RuntimeConfig::new(25, 0, &path, true).unwrap();

        let mut term = TerminalRenderer::new(Vec::new());
        teardown(&mut term, &config, Some(TransientFile::new(&path))).unwrap();

        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.ends_with("\x1b[2J\x1b[1;1H\x1b[?25hCiallo～(∠・ω< )⌒★ @ 25 FPS\n"));
        assert!(!path.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn write_failure_still_attempts_restore() {
        let (_tx, rx) = watch::channel(false);
        let clock = PlaybackClock::new(vec![vec![b'x'; 64]], Duration::from_millis(50));
        let config = RuntimeConfig::default();
        // Room for the enter sequence only.
        let mut term = TerminalRenderer::new(BrokenPipe {
            written: Vec::new(),
            limit: 16,
        });

        let result = run_session(&clock, &mut term, &config, None, rx).await;
        assert!(result.is_err());
        assert_eq!(term.get_ref().written, b"\x1b[?25l\x1b[2J\x1b[1;1H");
    }
}
