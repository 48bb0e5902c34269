//! Roadster Core - pseudo-3D road racer engine
//!
//! This crate turns a track recipe and per-tick player input into an ordered
//! draw list. It never touches a window or a pixel buffer; front ends replay
//! the draw list with whatever 2D backend they have.
//!
//! # Architecture
//!
//! - [`track`] - Procedural builder for the cyclic segment sequence
//! - [`vehicle`] - Arcade driving model, one pure step per tick
//! - [`projection`] - Per-frame projection and visibility walk
//! - [`render`] - Road, background, player and fog draw commands
//! - [`Session`] - Owns all state and sequences each tick

pub mod assets;
pub mod background;
pub mod camera;
pub mod config;
pub mod input;
#[cfg(test)]
mod integration;
pub mod projection;
pub mod render;
pub mod runtime;
pub mod script;
pub mod track;
pub mod vehicle;

pub use assets::{AssetError, SpriteSet, default_background_atlas, default_player_atlas};
pub use background::{Background, BackgroundConfig, LayerKind};
pub use camera::CameraRig;
pub use config::{Config, ConfigError};
pub use input::{InputState, InputTracker, Toggles};
pub use projection::{ProjectedFrame, ProjectionArena, VisibleSegment, project_frame};
pub use render::{DrawCommand, DrawList, Layer, RenderOptions, render_frame};
pub use runtime::{FrameClock, RuntimeConfig, Session, SessionError, TickOutcome};
pub use script::{InputScript, ScriptError};
pub use track::{Track, TrackError, TrackRecipe, TrackSummary};
pub use vehicle::{Controls, PlayerMode, VehicleParams, VehicleState};
