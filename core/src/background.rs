//! Parallax background layers
//!
//! Each layer scrolls horizontally in proportion to the curvature under the
//! player and the current speed, so bends visibly swing the horizon.

use roadster_shared::math::wrap_increase;
use serde::{Deserialize, Serialize};

/// Scroll bounds for the background layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    /// Offsets wrap into `[0, wrap_width)` (default: 2688, three 896 px tiles)
    #[serde(default = "default_wrap_width")]
    pub wrap_width: f64,
    /// Offset every layer starts at and snaps back to (default: 1408)
    #[serde(default = "default_start_offset")]
    pub start_offset: f64,
    /// Offsets in `[0, dead_zone)` snap back to the start (default: 1)
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f64,
    /// Offsets at or below this snap back to the start (default: 128)
    #[serde(default = "default_low_cutoff")]
    pub low_cutoff: f64,
}

fn default_wrap_width() -> f64 {
    2688.0
}
fn default_start_offset() -> f64 {
    1408.0
}
fn default_dead_zone() -> f64 {
    1.0
}
fn default_low_cutoff() -> f64 {
    128.0
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            wrap_width: default_wrap_width(),
            start_offset: default_start_offset(),
            dead_zone: default_dead_zone(),
            low_cutoff: default_low_cutoff(),
        }
    }
}

/// The three stacked background layers, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Sky,
    Hills,
    Trees,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [LayerKind::Sky, LayerKind::Hills, LayerKind::Trees];

    /// Scroll rate relative to curvature; nearer layers move faster
    pub const fn speed(self) -> f64 {
        match self {
            LayerKind::Sky => 0.1,
            LayerKind::Hills => 0.2,
            LayerKind::Trees => 0.3,
        }
    }

    pub const fn sprite_name(self) -> &'static str {
        match self {
            LayerKind::Sky => "sky",
            LayerKind::Hills => "hills",
            LayerKind::Trees => "trees",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackgroundLayer {
    pub kind: LayerKind,
    pub speed: f64,
    /// Horizontal scroll in pixels
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Background {
    layers: [BackgroundLayer; 3],
}

impl Background {
    pub fn new(config: &BackgroundConfig) -> Self {
        Self {
            layers: LayerKind::ALL.map(|kind| BackgroundLayer {
                kind,
                speed: kind.speed(),
                offset: config.start_offset,
            }),
        }
    }

    pub fn layers(&self) -> &[BackgroundLayer] {
        &self.layers
    }

    /// Scroll every layer for one tick on a segment with `curve`.
    pub fn advance(&self, config: &BackgroundConfig, curve: f64, speed_percent: f64) -> Self {
        let layers = self.layers.map(|layer| {
            let mut offset = wrap_increase(
                layer.offset,
                layer.speed * curve * speed_percent,
                config.wrap_width,
            );
            if (0.0..config.dead_zone).contains(&offset) || offset <= config.low_cutoff {
                offset = config.start_offset;
            }
            BackgroundLayer { offset, ..layer }
        });
        Self { layers }
    }
}
