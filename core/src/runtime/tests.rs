//! Runtime tests

use std::time::Duration;

use roadster_shared::SpriteAtlas;

use crate::assets::default_background_atlas;
use crate::config::Config;
use crate::input::InputState;
use crate::render::DrawList;
use crate::vehicle::VehicleState;

use super::{FrameClock, RuntimeConfig, Session, SessionError, TickOutcome};

const STEP: Option<Duration> = Some(Duration::from_nanos(16_666_667));

fn session() -> Session {
    Session::with_default_sprites(&Config::default()).unwrap()
}

fn throttle() -> InputState {
    InputState {
        throttle: true,
        ..InputState::default()
    }
}

fn expect_frame(outcome: TickOutcome) -> DrawList {
    match outcome {
        TickOutcome::Continue(list) => list,
        TickOutcome::Quit => panic!("unexpected quit"),
    }
}

// ============================================================================
// RuntimeConfig Tests
// ============================================================================

#[test]
fn test_runtime_config_default() {
    let config = RuntimeConfig::default();
    assert_eq!(config.tick_rate, 60);
    assert_eq!(config.max_delta, Duration::from_millis(100));
    assert_eq!(config.cpu_budget, Duration::from_micros(4000));
}

#[test]
fn test_tick_duration() {
    let config = RuntimeConfig {
        tick_rate: 50,
        ..RuntimeConfig::default()
    };
    assert_eq!(config.tick_duration(), Duration::from_millis(20));

    let zero = RuntimeConfig {
        tick_rate: 0,
        ..RuntimeConfig::default()
    };
    assert_eq!(zero.tick_duration(), Duration::from_secs(1));
}

// ============================================================================
// FrameClock Tests
// ============================================================================

#[test]
fn test_clock_first_tick_uses_nominal_step() {
    let mut clock = FrameClock::new(RuntimeConfig::default());
    assert_eq!(clock.delta(None), RuntimeConfig::default().tick_duration());
}

#[test]
fn test_clock_zero_interval_falls_back() {
    let clock = FrameClock::new(RuntimeConfig::default());
    assert_eq!(
        clock.clamp(Some(Duration::ZERO)),
        RuntimeConfig::default().tick_duration()
    );
}

#[test]
fn test_clock_clamps_long_stall() {
    let mut clock = FrameClock::new(RuntimeConfig::default());
    assert_eq!(
        clock.delta(Some(Duration::from_secs(3))),
        Duration::from_millis(100)
    );
}

#[test]
fn test_clock_passes_normal_interval() {
    let mut clock = FrameClock::new(RuntimeConfig::default());
    let d = Duration::from_millis(20);
    assert_eq!(clock.delta(Some(d)), d);
}

#[test]
fn test_clock_measures_wall_time_after_first_tick() {
    let mut clock = FrameClock::new(RuntimeConfig::default());
    clock.delta(None);
    let second = clock.delta(None);
    assert!(second > Duration::ZERO);
    assert!(second <= Duration::from_millis(100));
}

// ============================================================================
// Session Creation Tests
// ============================================================================

#[test]
fn test_session_new() {
    let session = session();
    assert!(!session.track().is_empty());
    assert_eq!(session.ticks(), 0);
    assert_eq!(*session.state(), VehicleState::default());
    assert!(session.last_frame().is_none());
    assert_eq!(session.params().max_speed, 100.0);
}

#[test]
fn test_session_missing_sprite() {
    let player = SpriteAtlas::from_grid(2, 1, 128, 128, &["left", "straight"]).unwrap();
    let err = Session::new(&Config::default(), &default_background_atlas().unwrap(), &player)
        .unwrap_err();
    match err {
        SessionError::Assets(e) => assert_eq!(e.atlas, "player"),
        other => panic!("expected asset error, got {other:?}"),
    }
}

#[test]
fn test_session_bad_track_dimensions() {
    let mut config = Config::default();
    config.track.segment_length = 0.0;
    let err = Session::with_default_sprites(&config).unwrap_err();
    assert!(matches!(err, SessionError::Track(_)));
}

// ============================================================================
// Tick Tests
// ============================================================================

#[test]
fn test_quit_stops_before_simulating() {
    let mut session = session();
    session.tick(throttle(), STEP);
    let before = *session.state();

    let quit = InputState {
        quit: true,
        throttle: true,
        ..InputState::default()
    };
    assert_eq!(session.tick(quit, STEP), TickOutcome::Quit);
    assert_eq!(*session.state(), before);
    assert_eq!(session.ticks(), 1);
}

#[test]
fn test_throttle_builds_speed() {
    let mut session = session();
    for _ in 0..60 {
        expect_frame(session.tick(throttle(), STEP));
    }
    // accel is max/10 per second
    assert!((session.state().speed - 10.0).abs() < 1e-6);
    assert_eq!(session.ticks(), 60);
}

#[test]
fn test_position_uses_previous_speed() {
    let mut session = session();
    session.tick(throttle(), STEP);
    assert_eq!(session.state().position, 0.0);
    let speed = session.state().speed;
    session.tick(throttle(), STEP);
    assert!((session.state().position - speed).abs() < 1e-12);
}

#[test]
fn test_toggle_fires_once_per_press() {
    let mut session = session();
    let held = InputState {
        toggle_fog: true,
        ..InputState::default()
    };
    assert!(!session.options().fog);
    session.tick(held, STEP);
    assert!(session.options().fog);
    session.tick(held, STEP);
    session.tick(held, STEP);
    assert!(session.options().fog);

    session.tick(InputState::default(), STEP);
    session.tick(held, STEP);
    assert!(!session.options().fog);
}

#[test]
fn test_debug_readout_follows_toggle() {
    let mut session = session();
    let list = expect_frame(session.tick(throttle(), STEP));
    let readout = list.debug.unwrap();
    assert!((readout.tick_rate - 60.0).abs() < 0.01);
    assert_eq!(readout.max_y, session.last_frame().unwrap().max_y);

    let toggle = InputState {
        toggle_debug: true,
        ..InputState::default()
    };
    let list = expect_frame(session.tick(toggle, STEP));
    assert!(list.debug.is_none());
}

#[test]
fn test_frame_is_drawn_every_tick() {
    let mut session = session();
    let list = expect_frame(session.tick(InputState::default(), STEP));
    assert!(!list.is_empty());
    let frame = session.last_frame().unwrap();
    assert!(!frame.visible.is_empty());
    assert!(frame.visible[0].player);
}
