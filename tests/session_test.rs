//! End-to-end playback sessions against an in-memory terminal.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use ciallo::assets;
use ciallo::core::compile;
use ciallo::player::{run_session, AudioTrigger, PlaybackClock, SoundPlayer, TransientFile};
use ciallo::term::{encode_plans, farewell, TerminalRenderer};
use ciallo::types::RuntimeConfig;

#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<(Instant, PathBuf)>>>,
}

impl SoundPlayer for Recorder {
    fn play(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), path.to_path_buf()));
        std::future::ready(Ok(()))
    }
}

/// A player that always fails, like a missing `ffplay`.
struct Broken;

impl SoundPlayer for Broken {
    fn play(&self, _path: &Path) -> impl Future<Output = io::Result<()>> + Send {
        std::future::ready(Err(io::Error::from(io::ErrorKind::NotFound)))
    }
}

/// A player whose cue outlasts a whole animation cycle.
#[derive(Clone, Default)]
struct Lingering {
    started: Arc<AtomicUsize>,
    playing: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl SoundPlayer for Lingering {
    fn play(&self, _path: &Path) -> impl Future<Output = io::Result<()>> + Send {
        let this = self.clone();
        async move {
            this.started.fetch_add(1, Ordering::SeqCst);
            let now = this.playing.fetch_add(1, Ordering::SeqCst) + 1;
            this.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(500)).await;
            this.playing.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }
}

fn interrupt_after(ms: u64) -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        let _ = tx.send(true);
        std::future::pending::<()>().await;
    });
    rx
}

fn scripts_for_frames(frames: usize) -> Vec<Vec<u8>> {
    let json = serde_json::to_string(
        &(0..frames)
            .map(|i| vec![format!("frame {i}")])
            .collect::<Vec<_>>(),
    )
    .unwrap();
    let anim = ciallo::core::store::from_json(&json).unwrap();
    encode_plans(&compile(&anim)).unwrap()
}

#[tokio::test(start_paused = true)]
async fn interrupt_mid_cycle_leaves_terminal_sane() {
    let anim = assets::load_animation(None).unwrap();
    let config = RuntimeConfig::new(20, 14, "/tmp/unused.wav", false).unwrap();
    let clock = PlaybackClock::new(encode_plans(&compile(&anim)).unwrap(), config.frame_period());
    let mut term = TerminalRenderer::new(Vec::new());

    // 7 frames in, well inside the first cycle.
    let report = run_session(&clock, &mut term, &config, None, interrupt_after(333))
        .await
        .unwrap();
    assert_eq!(report.cycles, 1);
    assert_eq!(report.frames, 7);

    let out = String::from_utf8(term.into_inner()).unwrap();
    assert!(out.starts_with("\x1b[?25l\x1b[2J\x1b[1;1H"));
    let tail = format!("\x1b[2J\x1b[1;1H\x1b[?25h{}\n", farewell(20));
    assert!(out.ends_with(&tail), "unexpected tail: {:?}", &out[out.len().saturating_sub(80)..]);
}

#[tokio::test(start_paused = true)]
async fn sound_cue_fires_once_per_cycle_at_trigger_frame() {
    let config = RuntimeConfig::new(20, 2, "/tmp/cue.wav", true).unwrap();
    let recorder = Recorder::default();
    let clock = PlaybackClock::new(scripts_for_frames(4), config.frame_period())
        .with_audio(AudioTrigger::new(recorder.clone(), &config));
    let mut term = TerminalRenderer::new(Vec::new());
    let start = Instant::now();

    // Cycles start at 0, 200, 400ms; cues at 100, 300, 500ms.
    let report = run_session(&clock, &mut term, &config, None, interrupt_after(525))
        .await
        .unwrap();
    assert_eq!(report.cycles, 3);

    let calls = recorder.calls.lock().unwrap();
    assert_eq!(calls.len(), 3);
    for (k, (at, path)) in calls.iter().enumerate() {
        let expected = Duration::from_millis(100 + 200 * k as u64);
        let offset = *at - start;
        assert!(offset >= expected && offset < expected + Duration::from_millis(5), "cue {k} at {offset:?}");
        assert_eq!(path, Path::new("/tmp/cue.wav"));
    }
}

#[tokio::test(start_paused = true)]
async fn cues_from_consecutive_cycles_may_overlap() {
    let config = RuntimeConfig::new(20, 0, "/tmp/cue.wav", true).unwrap();
    let player = Lingering::default();
    let clock = PlaybackClock::new(scripts_for_frames(4), config.frame_period())
        .with_audio(AudioTrigger::new(player.clone(), &config));
    let mut term = TerminalRenderer::new(Vec::new());

    // 200ms cycles, 500ms cues: cues start at 0, 200 and 400ms and all
    // three are still playing at 425ms.
    let report = run_session(&clock, &mut term, &config, None, interrupt_after(425))
        .await
        .unwrap();
    assert_eq!(report.cycles, 3);
    assert_eq!(report.frames, 9);
    assert_eq!(player.started.load(Ordering::SeqCst), 3);
    assert!(player.peak.load(Ordering::SeqCst) >= 2);
    assert_eq!(player.playing.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn failing_player_does_not_disturb_frames() {
    let config = RuntimeConfig::new(20, 0, "/tmp/cue.wav", true).unwrap();
    let clock = PlaybackClock::new(scripts_for_frames(3), config.frame_period())
        .with_audio(AudioTrigger::new(Broken, &config));
    let mut term = TerminalRenderer::new(Vec::new());

    let report = run_session(&clock, &mut term, &config, None, interrupt_after(275))
        .await
        .unwrap();
    assert_eq!(report.frames, 6);
    assert_eq!(report.cycles, 2);
}

#[tokio::test(start_paused = true)]
async fn interrupt_releases_transient_sound() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("ciallo.wav");
    let transient = assets::materialize_sound(&path).expect("sound written");
    assert!(path.exists());

    let config = RuntimeConfig::new(20, 0, &path, false).unwrap();
    let clock = PlaybackClock::new(scripts_for_frames(2), config.frame_period());
    let mut term = TerminalRenderer::new(Vec::new());

    run_session(&clock, &mut term, &config, Some(transient), interrupt_after(60))
        .await
        .unwrap();
    assert!(!path.exists());
}

#[tokio::test(start_paused = true)]
async fn user_sound_file_is_never_removed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mine.wav");
    std::fs::write(&path, assets::SOUND_WAV).unwrap();

    let config = RuntimeConfig::new(20, 0, &path, false).unwrap();
    let clock = PlaybackClock::new(scripts_for_frames(2), config.frame_period());
    let mut term = TerminalRenderer::new(Vec::new());

    run_session(&clock, &mut term, &config, None, interrupt_after(60))
        .await
        .unwrap();
    assert!(path.exists());
    // An explicit release is still best-effort and idempotent.
    assert!(TransientFile::new(&path).release());
    assert!(!TransientFile::new(&path).release());
}
