//! Terminal ASCII animation player (default binary).
//!
//! Loads the animation, compiles it into per-frame terminal deltas, then
//! loops it at a fixed frame rate with an optional sound cue until Ctrl+C.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use ciallo::assets;
use ciallo::cli::Args;
use ciallo::core::{compile, op_count};
use ciallo::logging;
use ciallo::player::{listen_for_interrupt, run_session, AudioTrigger, FfplayPlayer, PlaybackClock};
use ciallo::term::{encode_plans, TerminalRenderer};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let mut config = args.runtime_config()?;
    let animation = assets::load_animation(args.input.as_deref())?;

    if let Some(requested) = config.clamp_trigger_frame(animation.frame_count()) {
        warn!(
            requested,
            frames = animation.frame_count(),
            trigger = config.trigger_frame(),
            "sound trigger frame out of range, using last frame"
        );
    }

    let plans = compile(&animation);
    let scripts = encode_plans(&plans)?;
    info!(
        frames = animation.frame_count(),
        ops = op_count(&plans),
        fps = config.fps(),
        sound = config.sound_enabled(),
        "animation compiled"
    );

    let transient = if config.sound_enabled() && args.uses_embedded_sound() {
        assets::materialize_sound(config.sound_path())
    } else {
        None
    };

    let shutdown = listen_for_interrupt().context("failed to install interrupt handler")?;
    let mut term = TerminalRenderer::stdout();
    let clock = PlaybackClock::new(scripts, config.frame_period());

    if config.sound_enabled() {
        let clock = clock.with_audio(AudioTrigger::new(FfplayPlayer::new(), &config));
        run_session(&clock, &mut term, &config, transient, shutdown).await?;
    } else {
        run_session(&clock, &mut term, &config, transient, shutdown).await?;
    }

    Ok(())
}
