//! Single-point perspective projection
//!
//! Maps a world-space road edge point into camera space and then onto the
//! screen. Scale is `camera_depth / camera.z`, so nearer points project wider
//! and lower. Callers must discard points with `camera.z <= camera_depth`.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Tunnel ceiling height as a multiple of the projected road half-width.
pub const TUNNEL_HEIGHT_RATIO: f64 = 1.0;

/// Thickness of the tunnel entrance cap in world units.
pub const BRIDGE_THICKNESS: f64 = 400.0;

/// Target surface size in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }
}

/// Projected screen-space position of one road edge point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// Road center x (pixels)
    pub x: f64,
    /// Road surface y (pixels, grows downward)
    pub y: f64,
    /// Projected road half-width (pixels)
    pub w: f64,
    /// Perspective scale at this depth
    pub scale: f64,
    /// Tunnel ceiling y (pixels)
    pub ceiling_y: f64,
    /// Top of the tunnel entrance cap (pixels)
    pub bridge_top: f64,
}

/// Camera- and screen-space result for one point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub camera: DVec3,
    pub screen: ScreenPoint,
}

/// Project `world` as seen from `camera_position`.
pub fn project(
    world: DVec3,
    camera_position: DVec3,
    camera_depth: f64,
    viewport: Viewport,
    road_width: f64,
) -> Projection {
    let camera = world - camera_position;
    let scale = camera_depth / camera.z;

    let hw = viewport.half_width();
    let hh = viewport.half_height();
    let x = (hw + scale * camera.x * hw).round();
    let y = (hh - scale * camera.y * hh).round();
    let w = (scale * road_width * hw).round();

    let ceiling_y = y - w * TUNNEL_HEIGHT_RATIO;
    let bridge_top = ceiling_y - (scale * BRIDGE_THICKNESS * hh).round();

    Projection {
        camera,
        screen: ScreenPoint {
            x,
            y,
            w,
            scale,
            ceiling_y,
            bridge_top,
        },
    }
}
