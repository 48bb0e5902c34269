//! Track command - build a recipe and print its layout

use anyhow::{Context, Result};
use clap::Args;
use roadster_core::{CameraRig, Track, TrackRecipe};

use crate::run::load_config;

/// Arguments for the track command
#[derive(Args)]
pub struct TrackArgs {
    /// Track layout (oval, classic, hilly, tunnel)
    #[arg(short, long)]
    pub recipe: Option<TrackRecipe>,

    /// Dump every segment as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the track command
pub fn execute(args: TrackArgs) -> Result<()> {
    let config = load_config(args.recipe);
    let rig = CameraRig::new(&config.camera, &config.track);
    let track = Track::from_recipe(
        config.track.recipe,
        config.track.segment_length,
        config.track.rumble_length,
        rig.player_z,
    )
    .with_context(|| format!("Failed to build {} track", config.track.recipe))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&track)?);
        return Ok(());
    }

    let summary = track.summary();
    println!("Recipe:          {}", config.track.recipe);
    println!("Segments:        {}", summary.segments);
    println!("Length:          {:.0}", summary.length);
    println!("Tunnel segments: {}", summary.tunnel_segments);
    println!(
        "Elevation:       {:.1} .. {:.1}",
        summary.min_elevation, summary.max_elevation
    );
    println!("Sharpest curve:  {:.1}", summary.max_curve);
    println!();
    println!("Available recipes:");
    for recipe in TrackRecipe::ALL {
        println!("  {}", recipe);
    }

    Ok(())
}
