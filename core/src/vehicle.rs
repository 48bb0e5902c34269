//! Arcade driving model
//!
//! [`step`] advances the player by one tick. It reads the segment under the
//! player for curvature and tunnel clamping and returns the next state without
//! touching anything else.

use roadster_shared::math::{clamp, integrate, wrap_increase};
use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;
use crate::track::Segment;

/// Which player sprite to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerMode {
    #[default]
    Straight,
    Left,
    Right,
}

impl PlayerMode {
    /// Sprite name in the player atlas
    pub const fn sprite_name(self) -> &'static str {
        match self {
            PlayerMode::Straight => "straight",
            PlayerMode::Left => "left",
            PlayerMode::Right => "right",
        }
    }
}

/// Held driving controls for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub throttle: bool,
    pub brake: bool,
}

/// Mutable per-tick vehicle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VehicleState {
    /// Camera longitudinal position, wrapped to the track length
    pub position: f64,
    /// Lateral offset in road half-widths
    pub player_x: f64,
    pub speed: f64,
    pub mode: PlayerMode,
}

impl VehicleState {
    pub fn speed_percent(&self, max_speed: f64) -> f64 {
        if max_speed > 0.0 {
            self.speed / max_speed
        } else {
            0.0
        }
    }
}

/// Acceleration table and bounds derived from the top speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleParams {
    pub max_speed: f64,
    pub accel: f64,
    pub braking: f64,
    pub decel: f64,
    pub off_road_decel: f64,
    /// Speed above which leaving the road slows the car
    pub off_road_limit: f64,
    /// Lowest speed reachable while reversing
    pub reverse_floor: f64,
    pub centrifugal: f64,
    pub road_limit: f64,
    pub tunnel_limit: f64,
}

impl VehicleParams {
    pub fn new(physics: &PhysicsConfig) -> Self {
        let max = physics.max_speed;
        Self {
            max_speed: max,
            accel: max / 10.0,
            braking: -max,
            decel: -max / 5.0,
            off_road_decel: -max / 2.0,
            off_road_limit: max / 4.0,
            reverse_floor: physics.reverse_floor,
            centrifugal: physics.centrifugal,
            road_limit: physics.road_limit,
            tunnel_limit: physics.tunnel_limit,
        }
    }
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}

/// Advance the vehicle by one tick of `dt` seconds.
///
/// `segment` is the segment under the player at the start of the tick.
pub fn step(
    state: &VehicleState,
    params: &VehicleParams,
    controls: Controls,
    segment: &Segment,
    track_length: f64,
    dt: f64,
) -> VehicleState {
    let speed_percent = state.speed_percent(params.max_speed);
    let mut dx = dt * 2.0 * speed_percent;
    if dx.is_nan() {
        dx = 0.0;
    }

    let position = wrap_increase(state.position, state.speed, track_length);

    let mut player_x = state.player_x;
    let mut mode = PlayerMode::Straight;
    if controls.left {
        player_x -= dx;
        mode = PlayerMode::Left;
    }
    if controls.right {
        player_x += dx;
        mode = PlayerMode::Right;
    }
    player_x -= dx * speed_percent * segment.curve * params.centrifugal;

    let mut reversing = false;
    let mut speed = if controls.throttle {
        integrate(state.speed, params.accel, dt)
    } else if controls.brake {
        let braked = integrate(state.speed, params.braking, dt);
        reversing = braked < 0.0;
        braked
    } else {
        integrate(state.speed, params.decel, dt)
    };

    if player_x.abs() > 1.0 && speed > params.off_road_limit {
        speed = integrate(speed, params.off_road_decel, dt);
    }

    let limit = if segment.in_tunnel {
        params.tunnel_limit
    } else {
        params.road_limit
    };
    let floor = if reversing { params.reverse_floor } else { 0.0 };

    VehicleState {
        position,
        player_x: clamp(player_x, -limit, limit),
        speed: clamp(speed, floor, params.max_speed),
        mode,
    }
}
