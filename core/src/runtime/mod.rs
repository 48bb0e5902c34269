//! Driving session orchestration
//!
//! A [`Session`] owns every piece of simulation state and runs one tick per
//! frame in a fixed order: input, simulation, projection, render.

use std::time::{Duration, Instant};

use roadster_shared::SpriteAtlas;

use crate::assets::{AssetError, SpriteSet, default_background_atlas, default_player_atlas};
use crate::background::{Background, BackgroundConfig};
use crate::camera::CameraRig;
use crate::config::Config;
use crate::input::{InputState, InputTracker};
use crate::projection::{ProjectedFrame, ProjectionArena, project_frame};
use crate::render::{DebugReadout, DrawList, RenderOptions, Scene, render_frame};
use crate::track::{Track, TrackError};
use crate::vehicle::{self, VehicleParams, VehicleState};

mod config;
mod game_loop;

#[cfg(test)]
mod tests;

pub use config::RuntimeConfig;
pub use game_loop::FrameClock;

/// Fatal errors raised while setting up a session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to build track: {0}")]
    Track(#[from] TrackError),

    #[error(transparent)]
    Assets(#[from] AssetError),
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The frame to present
    Continue(DrawList),
    /// The player asked to leave; nothing was simulated
    Quit,
}

/// Everything a running game needs, owned in one place
#[derive(Debug)]
pub struct Session {
    track: Track,
    state: VehicleState,
    params: VehicleParams,
    background: Background,
    background_config: BackgroundConfig,
    rig: CameraRig,
    arena: ProjectionArena,
    sprites: SpriteSet,
    options: RenderOptions,
    tracker: InputTracker,
    clock: FrameClock,
    frame: Option<ProjectedFrame>,
    ticks: u64,
}

impl Session {
    /// Build the track and resolve sprites from the given atlases.
    pub fn new(
        config: &Config,
        background_atlas: &SpriteAtlas,
        player_atlas: &SpriteAtlas,
    ) -> Result<Self, SessionError> {
        let sprites = SpriteSet::resolve(background_atlas, player_atlas)?;
        let rig = CameraRig::new(&config.camera, &config.track);
        let track = Track::from_recipe(
            config.track.recipe,
            config.track.segment_length,
            config.track.rumble_length,
            rig.player_z,
        )?;

        tracing::info!(
            "Session started: {} track, {} segments, {}x{} viewport",
            config.track.recipe,
            track.len(),
            rig.viewport.width,
            rig.viewport.height
        );

        Ok(Self {
            arena: ProjectionArena::new(track.len()),
            track,
            state: VehicleState::default(),
            params: VehicleParams::new(&config.physics),
            background: Background::new(&config.background),
            background_config: config.background,
            rig,
            sprites,
            options: config.render,
            tracker: InputTracker::new(),
            clock: FrameClock::new(config.timing.runtime_config()),
            frame: None,
            ticks: 0,
        })
    }

    /// Start a session with the built-in sprite sheet layouts.
    pub fn with_default_sprites(config: &Config) -> Result<Self, SessionError> {
        let background = default_background_atlas().map_err(|source| AssetError {
            atlas: "background",
            source,
        })?;
        let player = default_player_atlas().map_err(|source| AssetError {
            atlas: "player",
            source,
        })?;
        Self::new(config, &background, &player)
    }

    /// Run one tick.
    ///
    /// `measured` is the interval since the previous frame; `None` reads the
    /// wall clock instead.
    pub fn tick(&mut self, input: InputState, measured: Option<Duration>) -> TickOutcome {
        if input.quit {
            tracing::info!("Quit requested after {} ticks", self.ticks);
            return TickOutcome::Quit;
        }
        let tick_start = Instant::now();

        let toggles = self.tracker.update(input);
        if toggles.any() {
            toggles.apply(&mut self.options);
            tracing::debug!("Render options now {:?}", self.options);
        }

        let dt = self.clock.delta(measured).as_secs_f64();
        let player_segment = self.track.find_segment(self.state.position + self.rig.player_z);
        let speed_percent = self.state.speed_percent(self.params.max_speed);

        self.background = self
            .background
            .advance(&self.background_config, player_segment.curve, speed_percent);
        self.state = vehicle::step(
            &self.state,
            &self.params,
            input.controls(),
            player_segment,
            self.track.length(),
            dt,
        );

        let frame = project_frame(&self.track, &self.state, &self.rig, &mut self.arena);
        let scene = Scene {
            rig: &self.rig,
            sprites: &self.sprites,
        };
        let mut list = render_frame(scene, &frame, &self.state, &self.background, &self.options);

        if self.options.debug {
            let readout = DebugReadout {
                tick_rate: if dt > 0.0 { 1.0 / dt } else { 0.0 },
                speed: self.state.speed,
                position: self.state.position,
                player_x: self.state.player_x,
                player_y: frame.player_y,
                max_y: frame.max_y,
            };
            tracing::debug!(
                "fps={:.1} speed={:.2} position={:.1} x={:.3} y={:.1} max_y={:.1}",
                readout.tick_rate,
                readout.speed,
                readout.position,
                readout.player_x,
                readout.player_y,
                readout.max_y
            );
            list.debug = Some(readout);
        }

        self.frame = Some(frame);
        self.ticks += 1;
        self.clock.check_budget(tick_start);

        TickOutcome::Continue(list)
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn params(&self) -> &VehicleParams {
        &self.params
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    pub fn sprites(&self) -> &SpriteSet {
        &self.sprites
    }

    /// Projection of the most recent tick
    pub fn last_frame(&self) -> Option<&ProjectedFrame> {
        self.frame.as_ref()
    }

    /// Number of completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Nominal tick duration used for headless runs
    pub fn tick_duration(&self) -> Duration {
        self.clock.config().tick_duration()
    }
}
