//! Playback clock: emits frame scripts at a fixed period, looping forever.
//!
//! Timing is nominal. Each frame is followed by a sleep of exactly one
//! frame period with no correction for time spent writing, so a long run
//! drifts behind wall-clock time.
//!
//! The loop ends only when the shutdown flag flips to `true` (or its
//! sender goes away). The flag is checked before every frame and raced
//! against every inter-frame sleep.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::audio::{AudioTrigger, FfplayPlayer, SoundPlayer};
use crate::term::{FrameScript, TerminalRenderer};

/// Counters returned when playback stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Cycles started (frame 0 reached, cue scheduled).
    pub cycles: u64,
    /// Frame scripts written.
    pub frames: u64,
}

pub struct PlaybackClock<P = FfplayPlayer> {
    scripts: Vec<FrameScript>,
    period: Duration,
    audio: Option<AudioTrigger<P>>,
}

impl PlaybackClock {
    /// A silent clock over pre-encoded `scripts`.
    ///
    /// `scripts[0]` must be a full redraw; the rest are deltas.
    pub fn new(scripts: Vec<FrameScript>, period: Duration) -> Self {
        Self {
            scripts,
            period,
            audio: None,
        }
    }
}

impl<P: SoundPlayer> PlaybackClock<P> {
    /// Schedule `audio` at the start of every cycle.
    pub fn with_audio<Q: SoundPlayer>(self, audio: AudioTrigger<Q>) -> PlaybackClock<Q> {
        PlaybackClock {
            scripts: self.scripts,
            period: self.period,
            audio: Some(audio),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn frame_count(&self) -> usize {
        self.scripts.len()
    }

    /// Play until `shutdown` reads `true`.
    ///
    /// A write error stops playback and is returned; the terminal is left
    /// for the caller to restore.
    pub async fn run<W: Write>(
        &self,
        term: &mut TerminalRenderer<W>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<PlaybackReport> {
        let mut report = PlaybackReport::default();
        if self.scripts.is_empty() {
            return Ok(report);
        }

        'cycles: loop {
            if *shutdown.borrow() {
                break;
            }
            report.cycles += 1;
            trace!(cycle = report.cycles, "cycle start");
            if let Some(audio) = &self.audio {
                // Detached: the cue runs on its own timeline.
                drop(audio.fire());
            }

            for script in &self.scripts {
                if *shutdown.borrow() {
                    break 'cycles;
                }
                term.draw(script)?;
                report.frames += 1;

                tokio::select! {
                    _ = tokio::time::sleep(self.period) => {}
                    _ = shutdown.wait_for(|stop| *stop) => break 'cycles,
                }
            }
        }

        debug!(cycles = report.cycles, frames = report.frames, "playback stopped");
        Ok(report)
    }
}
