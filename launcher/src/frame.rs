//! Frame command - dump one frame's draw list

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use roadster_core::{InputState, TickOutcome, TrackRecipe};

use crate::run::{load_config, start_session};

/// Arguments for the frame command
#[derive(Args)]
pub struct FrameArgs {
    /// Track layout (oval, classic, hilly, tunnel)
    #[arg(short, long)]
    pub recipe: Option<TrackRecipe>,

    /// Ticks to drive with the throttle held before capturing
    #[arg(short, long, default_value = "0")]
    pub ticks: u64,

    /// Write the JSON here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Execute the frame command
pub fn execute(args: FrameArgs) -> Result<()> {
    let config = load_config(args.recipe);
    let mut session = start_session(&config)?;
    let step = session.tick_duration();

    let throttle = InputState {
        throttle: true,
        ..InputState::default()
    };
    for _ in 0..args.ticks {
        session.tick(throttle, Some(step));
    }

    // Capture with nothing held so the sprite shows the straight pose
    let list = match session.tick(InputState::default(), Some(step)) {
        TickOutcome::Continue(list) => list,
        TickOutcome::Quit => anyhow::bail!("Session quit before the frame was drawn"),
    };
    tracing::info!(
        "Captured tick {} with {} draw commands",
        session.ticks(),
        list.len()
    );

    let json = serde_json::to_string_pretty(&list)?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
