//! Animation playback runtime.
//!
//! Three concurrent pieces share nothing but read-only data:
//!
//! - [`clock`]: the frame loop, writing pre-encoded frame scripts at a
//!   fixed period
//! - [`audio`]: a delayed, fire-and-forget sound cue spawned each cycle
//! - [`lifecycle`]: the interrupt listener and terminal teardown
//!
//! Shutdown is a `tokio::sync::watch` flag. The interrupt listener sets it,
//! the clock observes it, and [`lifecycle::run_session`] restores the
//! terminal once the clock returns. Nothing calls `process::exit`, so a
//! test can drive a bounded run and inspect the output.
//!
//! # Example
//!
//! ```no_run
//! use ciallo_player::{listen_for_interrupt, run_session, AudioTrigger, FfplayPlayer, PlaybackClock};
//! use ciallo_player::term::{encode_plans, TerminalRenderer};
//! use ciallo_player::{core, types::RuntimeConfig};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = RuntimeConfig::default();
//! let anim = core::store::from_json(r#"[["Ciallo"],["Ciallo~"]]"#)?;
//! let scripts = encode_plans(&core::compile(&anim))?;
//!
//! let clock = PlaybackClock::new(scripts, config.frame_period())
//!     .with_audio(AudioTrigger::new(FfplayPlayer::new(), &config));
//! let shutdown = listen_for_interrupt()?;
//! run_session(&clock, &mut TerminalRenderer::stdout(), &config, None, shutdown).await?;
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod clock;
pub mod lifecycle;

pub use ciallo_core as core;
pub use ciallo_term as term;
pub use ciallo_types as types;

pub use audio::{AudioTrigger, FfplayPlayer, SoundPlayer};
pub use clock::{PlaybackClock, PlaybackReport};
pub use lifecycle::{listen_for_interrupt, run_session, teardown, TransientFile};
