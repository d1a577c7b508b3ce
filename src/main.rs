//! Dino Dash entry point
//!
//! Runs the gameplay core in the headless host with the autopilot at the
//! wheel, then prints the final state as JSON.
//!
//! Usage: `dino-dash [seed] [frames] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};

#[cfg(not(target_arch = "wasm32"))]
use dino_dash::platform::{HeadlessRuntime, autopilot};
#[cfg(not(target_arch = "wasm32"))]
use dino_dash::sim::GamePhase;
#[cfg(not(target_arch = "wasm32"))]
use dino_dash::{Settings, Tuning};

/// Default run length: two minutes at 60 fps
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FRAMES: u64 = 60 * 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed '{s}'"))?,
        None => 0x5eed,
    };
    let frames = match args.next() {
        Some(s) => s
            .parse()
            .with_context(|| format!("invalid frame count '{s}'"))?,
        None => DEFAULT_FRAMES,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path)?,
        None => Tuning::default(),
    };

    log::info!("Dino Dash starting (seed {}, {} frames)", seed, frames);

    let mut runtime = HeadlessRuntime::new(tuning, Settings::default(), seed)?;
    for _ in 0..frames {
        if let Some(input) = autopilot::choose_input(runtime.scene.state(), &runtime.host) {
            runtime.queue_input(input);
        }
        runtime.frame();
        if runtime.phase() == GamePhase::GameOver {
            break;
        }
    }

    let state = runtime.scene.state();
    log::info!(
        "Finished in {:?}: score {} ({} frames, {:.1} s simulated, speed {:.2})",
        state.phase,
        runtime.scene.score_text(),
        state.frame,
        runtime.host.clock_ms() / 1000.0,
        state.run.game_speed
    );

    let json = serde_json::to_string_pretty(state).context("failed to serialize final state")?;
    println!("{json}");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The headless demo is native only; web hosts drive the library directly
}
