//! Track construction and lookup
//!
//! A track is a non-empty, cyclic sequence of fixed-length segments. Each
//! segment carries a signed curvature, the elevation of its near and far
//! edges, a stripe role and tunnel flags. Tracks are built once from a
//! [`TrackRecipe`] and never change afterwards; per-frame projection data
//! lives in [`crate::projection::ProjectionArena`].

mod builder;
mod palette;
mod recipe;


use glam::DVec3;
use serde::Serialize;

pub use builder::{CurveStrength, HillHeight, Length, Piece, RoadSpec, TrackBuilder, TunnelFlags};
pub use palette::{DARK, FINISH, FOG, LIGHT, SKY, START, SegmentColor, StripeRole};
pub use recipe::{TrackRecipe, UnknownRecipe};

/// Errors raised while building a track
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackError {
    #[error("Track has no segments")]
    Empty,

    #[error("Invalid track dimensions: segment length {segment_length}, rumble length {rumble_length}")]
    InvalidDimensions {
        segment_length: f64,
        rumble_length: usize,
    },
}

/// One fixed-length slice of road
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Position in the cyclic sequence
    pub index: usize,
    /// Near edge in world space
    pub p1: DVec3,
    /// Far edge in world space
    pub p2: DVec3,
    /// Signed curvature; positive bends right
    pub curve: f64,
    pub role: StripeRole,
    pub tunnel_start: bool,
    pub tunnel_end: bool,
    pub in_tunnel: bool,
}

impl Segment {
    pub fn color(&self) -> SegmentColor {
        self.role.color()
    }
}

/// Aggregate numbers for logging and the launcher
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    pub segments: usize,
    pub length: f64,
    pub tunnel_segments: usize,
    pub min_elevation: f64,
    pub max_elevation: f64,
    pub max_curve: f64,
}

/// Immutable, cyclic segment sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    segments: Vec<Segment>,
    segment_length: f64,
    rumble_length: usize,
}

impl Track {
    /// Build `recipe` and place the start banner relative to `player_z`.
    pub fn from_recipe(
        recipe: TrackRecipe,
        segment_length: f64,
        rumble_length: usize,
        player_z: f64,
    ) -> Result<Self, TrackError> {
        let mut builder = TrackBuilder::new(segment_length, rumble_length)?;
        builder.add_pieces(0.0, recipe.pieces());
        let track = builder.build(player_z)?;

        tracing::info!(
            "Built {:?} track: {} segments, length {}",
            recipe,
            track.len(),
            track.length()
        );
        Ok(track)
    }

    /// Wrap an already validated, non-empty segment list.
    pub(crate) fn from_parts(
        segments: Vec<Segment>,
        segment_length: f64,
        rumble_length: usize,
    ) -> Self {
        Self {
            segments,
            segment_length,
            rumble_length,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments (never zero)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment_length(&self) -> f64 {
        self.segment_length
    }

    pub fn rumble_length(&self) -> usize {
        self.rumble_length
    }

    /// Total longitudinal length
    pub fn length(&self) -> f64 {
        self.segments.len() as f64 * self.segment_length
    }

    /// Segment at `index`, wrapping around the end of the track
    pub fn segment(&self, index: usize) -> &Segment {
        &self.segments[index % self.segments.len()]
    }

    /// Segment owning the longitudinal coordinate `z`.
    ///
    /// Negative coordinates map to the first segment; coordinates beyond the
    /// track length wrap around.
    pub fn find_segment(&self, z: f64) -> &Segment {
        let z = if z.is_finite() { z.max(0.0) } else { 0.0 };
        let index = (z / self.segment_length).floor() as usize;
        self.segment(index)
    }

    pub fn summary(&self) -> TrackSummary {
        let (min_elevation, max_elevation) = self
            .segments
            .iter()
            .map(|s| s.p2.y)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });

        TrackSummary {
            segments: self.len(),
            length: self.length(),
            tunnel_segments: self.segments.iter().filter(|s| s.in_tunnel).count(),
            min_elevation,
            max_elevation,
            max_curve: self
                .segments
                .iter()
                .map(|s| s.curve.abs())
                .fold(0.0, f64::max),
        }
    }
}
