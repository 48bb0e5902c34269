//! Per-frame projection and visibility
//!
//! Walks a window of segments ahead of the camera, projects both edges of
//! each into the [`ProjectionArena`], and keeps the ones that are in front of
//! the camera, facing it, and not hidden behind a nearer hill crest.

use glam::DVec3;
use roadster_shared::math::{interpolate, percent_remaining};
use roadster_shared::{Projection, ScreenPoint, project};
use serde::Serialize;

use crate::camera::CameraRig;
use crate::track::{SegmentColor, Track};
use crate::vehicle::VehicleState;

/// Both projected edges of one segment for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentProjection {
    pub p1: Projection,
    pub p2: Projection,
    /// Segment sits past the end of the track and was projected one lap ahead
    pub looped: bool,
}

/// Projection scratch space, one slot per segment index
#[derive(Debug, Clone, Default)]
pub struct ProjectionArena {
    slots: Vec<Option<SegmentProjection>>,
    touched: Vec<usize>,
}

impl ProjectionArena {
    pub fn new(segments: usize) -> Self {
        Self {
            slots: vec![None; segments],
            touched: Vec::new(),
        }
    }

    /// Forget last frame's projections and size the arena for `segments`.
    pub fn reset(&mut self, segments: usize) {
        if self.slots.len() != segments {
            self.slots = vec![None; segments];
            self.touched.clear();
            return;
        }
        for index in self.touched.drain(..) {
            self.slots[index] = None;
        }
    }

    pub fn insert(&mut self, index: usize, projection: SegmentProjection) {
        if let Some(slot) = self.slots.get_mut(index) {
            if slot.is_none() {
                self.touched.push(index);
            }
            *slot = Some(projection);
        }
    }

    pub fn get(&self, index: usize) -> Option<&SegmentProjection> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Number of segments projected this frame
    pub fn filled(&self) -> usize {
        self.touched.len()
    }
}

/// A segment that survived culling, ready to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibleSegment {
    pub index: usize,
    pub p1: ScreenPoint,
    pub p2: ScreenPoint,
    pub color: SegmentColor,
    pub tunnel_start: bool,
    pub tunnel_end: bool,
    pub in_tunnel: bool,
    /// Nearest visible segment, the one the player is driving through
    pub player: bool,
}

/// Result of projecting one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedFrame {
    /// Accepted segments, nearest first
    pub visible: Vec<VisibleSegment>,
    /// Horizon cutoff after the walk; the screen y of the farthest visible near edge
    pub max_y: f64,
    pub base_index: usize,
    pub player_index: usize,
    /// Road elevation under the player
    pub player_y: f64,
    pub player_percent: f64,
    /// Height of the road under the player relative to a camera resting on
    /// the road under `position`
    pub player_camera_y: f64,
}

/// Project the road ahead of `state` into `arena` and collect what is visible.
pub fn project_frame(
    track: &Track,
    state: &VehicleState,
    rig: &CameraRig,
    arena: &mut ProjectionArena,
) -> ProjectedFrame {
    arena.reset(track.len());

    let segment_length = track.segment_length();
    let track_length = track.length();

    let base = track.find_segment(state.position);
    let base_percent = percent_remaining(state.position, segment_length);

    let player_z = state.position + rig.player_z;
    let player = track.find_segment(player_z);
    let player_percent = percent_remaining(player_z, segment_length);
    let player_y = interpolate(player.p1.y, player.p2.y, player_percent);

    let camera = rig.position(state.player_x, player_y, state.position);
    // Measured against the road under the camera so the sprite climbs and dips
    let base_y = interpolate(base.p1.y, base.p2.y, base_percent);
    let player_camera_y = player_y - (base_y + rig.camera_height);

    let mut max_y = rig.viewport.height;
    let mut x = 0.0;
    let mut dx = -(base.curve * base_percent);
    let mut visible = Vec::new();

    let window = (rig.draw_distance + 1).min(track.len());
    for n in 0..window {
        let segment = track.segment(base.index + n);
        let looped = segment.index < base.index;
        let camera_z = if looped {
            state.position - track_length
        } else {
            state.position
        };

        let near_camera = DVec3::new(camera.x - x, camera.y, camera_z);
        let far_camera = DVec3::new(camera.x - x - dx, camera.y, camera_z);
        let p1 = project(segment.p1, near_camera, rig.camera_depth, rig.viewport, rig.road_width);
        let p2 = project(segment.p2, far_camera, rig.camera_depth, rig.viewport, rig.road_width);
        arena.insert(segment.index, SegmentProjection { p1, p2, looped });

        x += dx;
        dx += segment.curve;

        let behind = p1.camera.z <= rig.camera_depth;
        let back_facing = !segment.in_tunnel && p2.screen.y >= p1.screen.y;
        let occluded = !segment.in_tunnel && p2.screen.y >= max_y;
        if behind || back_facing || occluded {
            continue;
        }

        visible.push(VisibleSegment {
            index: segment.index,
            p1: p1.screen,
            p2: p2.screen,
            color: segment.color(),
            tunnel_start: segment.tunnel_start,
            tunnel_end: segment.tunnel_end,
            in_tunnel: segment.in_tunnel,
            player: visible.is_empty(),
        });
        max_y = p1.screen.y;
    }

    ProjectedFrame {
        visible,
        max_y,
        base_index: base.index,
        player_index: player.index,
        player_y,
        player_percent,
        player_camera_y,
    }
}
