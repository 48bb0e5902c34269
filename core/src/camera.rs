//! Camera rig derived from the field of view and mounting height

use glam::DVec3;
use roadster_shared::Viewport;
use roadster_shared::math::camera_depth;
use serde::Serialize;

use crate::config::{CameraConfig, TrackConfig};

/// Source size of the player sprite the scale factors are tuned for
pub const PLAYER_SPRITE_SIZE: f64 = 128.0;

/// Fixed projection parameters for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraRig {
    pub viewport: Viewport,
    pub field_of_view: f64,
    pub camera_height: f64,
    pub camera_depth: f64,
    /// Distance from the camera to the player along the track
    pub player_z: f64,
    pub screen_scale: f64,
    pub sprite_scale: f64,
    pub road_width: f64,
    pub lanes: usize,
    pub draw_distance: usize,
}

impl CameraRig {
    pub fn new(camera: &CameraConfig, track: &TrackConfig) -> Self {
        let depth = camera_depth(camera.field_of_view);
        let player_z = camera.camera_height * depth;
        Self {
            viewport: Viewport::new(camera.screen_width, camera.screen_height),
            field_of_view: camera.field_of_view,
            camera_height: camera.camera_height,
            camera_depth: depth,
            player_z,
            screen_scale: depth / player_z,
            sprite_scale: 0.3 / PLAYER_SPRITE_SIZE,
            road_width: track.road_width,
            lanes: track.lanes.max(1),
            draw_distance: camera.draw_distance,
        }
    }

    /// World position of the camera for a player at lateral offset
    /// `player_x` (in road half-widths), riding at elevation `player_y`,
    /// with the camera at longitudinal coordinate `z`.
    pub fn position(&self, player_x: f64, player_y: f64, z: f64) -> DVec3 {
        DVec3::new(
            player_x * self.road_width,
            player_y + self.camera_height,
            z,
        )
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(&CameraConfig::default(), &TrackConfig::default())
    }
}
