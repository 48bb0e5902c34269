//! Run command - drive a track headlessly
//!
//! Input comes from a script file, or from a constant hold when no script
//! is given. Prints a summary of where the car ended up.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use roadster_core::config::{self, Config};
use roadster_core::{InputScript, InputState, Session, TickOutcome, TrackRecipe, VehicleState};
use serde::Serialize;

/// Ticks driven when neither the command line nor a script says otherwise
const DEFAULT_TICKS: u64 = 600;

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
    /// Track layout (oval, classic, hilly, tunnel)
    #[arg(short, long)]
    pub recipe: Option<TrackRecipe>,

    /// Number of ticks to run
    #[arg(short, long)]
    pub ticks: Option<u64>,

    /// TOML input script to replay
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Hold the throttle for the whole run (ignored with --script)
    #[arg(long)]
    pub throttle: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary printed after a run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub recipe: TrackRecipe,
    pub ticks: u64,
    pub laps: u32,
    pub quit: bool,
    pub track_length: f64,
    pub state: VehicleState,
}

/// Load the config file and apply a recipe override.
pub fn load_config(recipe: Option<TrackRecipe>) -> Config {
    let mut config = config::load();
    if let Some(recipe) = recipe {
        config.track.recipe = recipe;
    }
    config
}

/// Start a session with the built-in sprite layouts.
pub fn start_session(config: &Config) -> Result<Session> {
    Session::with_default_sprites(config).context("Failed to start session")
}

/// Pick the input source for a run.
pub fn resolve_script(
    path: Option<&Path>,
    ticks: Option<u64>,
    throttle: bool,
) -> Result<InputScript> {
    let mut script = match path {
        Some(path) => InputScript::from_file(path)
            .with_context(|| format!("Failed to load script: {}", path.display()))?,
        None => {
            let hold = InputState {
                throttle,
                ..InputState::default()
            };
            InputScript::constant(hold, ticks.unwrap_or(DEFAULT_TICKS))
        }
    };
    if let Some(ticks) = ticks {
        script.ticks = ticks;
    }
    Ok(script)
}

/// Drive `session` through `script`, counting completed laps.
pub fn drive(session: &mut Session, script: &InputScript) -> (u32, bool) {
    let step = session.tick_duration();
    let mut laps = 0;
    for tick in 0..script.ticks {
        let before = session.state().position;
        match session.tick(script.input_at(tick), Some(step)) {
            TickOutcome::Continue(_) => {}
            TickOutcome::Quit => return (laps, true),
        }
        let state = session.state();
        if state.speed > 0.0 && state.position < before {
            laps += 1;
            tracing::info!("Lap {} complete at tick {}", laps, tick + 1);
        }
    }
    (laps, false)
}

/// Execute the run command
pub fn execute(args: RunArgs) -> Result<()> {
    let script = resolve_script(args.script.as_deref(), args.ticks, args.throttle)?;
    let config = load_config(args.recipe.or(script.recipe));
    let mut session = start_session(&config)?;

    tracing::info!(
        "Running {} ticks on {} ({} input spans)",
        script.ticks,
        config.track.recipe,
        script.span_count()
    );

    let (laps, quit) = drive(&mut session, &script);
    let report = RunReport {
        recipe: config.track.recipe,
        ticks: session.ticks(),
        laps,
        quit,
        track_length: session.track().length(),
        state: *session.state(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Track:     {} ({:.0} units)", report.recipe, report.track_length);
        println!("Ticks:     {}{}", report.ticks, if quit { " (quit)" } else { "" });
        println!("Laps:      {}", report.laps);
        println!("Position:  {:.1}", report.state.position);
        println!("Speed:     {:.2}", report.state.speed);
        println!("Lateral:   {:.3}", report.state.player_x);
    }

    Ok(())
}
