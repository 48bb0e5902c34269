//! End-to-end driving scenarios
//!
//! Each test runs a full session through input, simulation, projection and
//! rendering, the same way the launcher does.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use roadster_shared::parse_hex_color;

    use crate::config::Config;
    use crate::input::InputState;
    use crate::render::{DrawCommand, DrawList, Layer};
    use crate::runtime::{Session, TickOutcome};
    use crate::script::{InputScript, parse_input};
    use crate::track::{DARK, LIGHT, StripeRole, TrackRecipe};

    const STEP: Option<Duration> = Some(Duration::from_nanos(16_666_667));

    fn session(recipe: TrackRecipe) -> Session {
        let mut config = Config::default();
        config.track.recipe = recipe;
        Session::with_default_sprites(&config).unwrap()
    }

    fn input(s: &str) -> InputState {
        parse_input(s).unwrap()
    }

    fn drive(session: &mut Session, held: InputState, ticks: usize) -> DrawList {
        let mut last = DrawList::new();
        for _ in 0..ticks {
            match session.tick(held, STEP) {
                TickOutcome::Continue(list) => last = list,
                TickOutcome::Quit => panic!("unexpected quit"),
            }
        }
        last
    }

    /// Run a script to completion, returning the number of frames drawn
    fn run_script(session: &mut Session, script: &InputScript) -> u64 {
        let mut frames = 0;
        for tick in 0..script.ticks {
            match session.tick(script.input_at(tick), STEP) {
                TickOutcome::Continue(_) => frames += 1,
                TickOutcome::Quit => break,
            }
        }
        frames
    }

    // ============================================================================
    // Physics Scenarios
    // ============================================================================

    #[test]
    fn test_throttle_integrates_speed() {
        let mut session = session(TrackRecipe::Oval);
        drive(&mut session, input("throttle"), 300);
        // 300 ticks at max/10 per second
        assert!((session.state().speed - 50.0).abs() < 1e-6);
        assert!(session.state().player_x.abs() < 1.0);
    }

    #[test]
    fn test_off_road_caps_speed() {
        // Every bend on the oval is a left-hander, so centrifugal force
        // helps carry the car off the right edge
        let mut session = session(TrackRecipe::Oval);
        drive(&mut session, input("throttle+right"), 600);

        assert_eq!(session.state().player_x, 2.0);
        let speed = session.state().speed;
        assert!((23.5..=25.5).contains(&speed), "speed {speed}");
    }

    #[test]
    fn test_coasting_stops_the_car() {
        let mut session = session(TrackRecipe::Classic);
        drive(&mut session, input("throttle"), 120);
        assert!(session.state().speed > 0.0);
        drive(&mut session, InputState::default(), 120);
        assert_eq!(session.state().speed, 0.0);
    }

    #[test]
    fn test_position_wraps_around_the_lap() {
        let mut session = session(TrackRecipe::Oval);
        let length = session.track().length();
        let mut previous = 0.0;
        let mut wrapped = false;
        for _ in 0..6000 {
            drive(&mut session, input("throttle"), 1);
            let position = session.state().position;
            assert!((0.0..length).contains(&position));
            wrapped |= position < previous;
            previous = position;
        }
        assert!(wrapped);
    }

    // ============================================================================
    // Track Scenarios
    // ============================================================================

    #[test]
    fn test_oval_banners() {
        let session = session(TrackRecipe::Oval);
        let track = session.track();
        assert_eq!(track.len(), 1200);
        assert_eq!(track.segment(27).role, StripeRole::Start);
        assert_eq!(track.segment(28).role, StripeRole::Start);
        for i in 1197..1200 {
            assert_eq!(track.segment(i).role, StripeRole::Finish);
        }
    }

    #[test]
    fn test_tunnel_clamps_and_draws_walls() {
        let mut session = session(TrackRecipe::Tunnel);
        let player_z = session.rig().player_z;
        let tunnel_colors = [parse_hex_color(LIGHT.tunnel), parse_hex_color(DARK.tunnel)];

        let mut checked = false;
        for _ in 0..5000 {
            let entering = session
                .track()
                .find_segment(session.state().position + player_z)
                .in_tunnel;
            let list = drive(&mut session, input("throttle+right"), 1);
            if entering {
                assert!(session.state().player_x <= 0.82);
                assert!(list.on_layer(Layer::Road).any(|c| matches!(
                    c,
                    DrawCommand::Fill { color, .. } if tunnel_colors.contains(color)
                )));
                checked = true;
                break;
            }
        }
        assert!(checked, "never reached the tunnel");
    }

    #[test]
    fn test_tunnel_recipe_is_one_contiguous_run() {
        let session = session(TrackRecipe::Tunnel);
        let flags: Vec<bool> = session.track().segments().iter().map(|s| s.in_tunnel).collect();
        let first = flags.iter().position(|&t| t).unwrap();
        let last = flags.iter().rposition(|&t| t).unwrap();
        assert!(flags[first..=last].iter().all(|&t| t));
        assert!(session.track().segment(first).tunnel_start);
        assert!(session.track().segment(last).tunnel_end);
    }

    // ============================================================================
    // Script Scenarios
    // ============================================================================

    #[test]
    fn test_script_quit_ends_run() {
        let script = InputScript::from_toml(
            r#"
ticks = 100

[[spans]]
from = 0
to = 100
input = "throttle"

[[spans]]
from = 30
to = 31
input = "quit"
"#,
        )
        .unwrap();
        let mut session = session(TrackRecipe::Classic);
        assert_eq!(run_script(&mut session, &script), 30);
        assert_eq!(session.ticks(), 30);
    }

    #[test]
    fn test_script_toggles_layers() {
        let script = InputScript::from_toml(
            r#"
ticks = 3

[[spans]]
from = 1
to = 3
input = "road+background"
"#,
        )
        .unwrap();
        let mut session = session(TrackRecipe::Classic);
        run_script(&mut session, &script);
        assert!(!session.options().road);
        assert!(!session.options().background);

        let list = drive(&mut session, InputState::default(), 1);
        assert_eq!(list.on_layer(Layer::Road).count(), 0);
        assert_eq!(list.on_layer(Layer::Background).count(), 0);
        assert_eq!(list.on_layer(Layer::Player).count(), 1);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let script = InputScript::from_toml(
            r#"
ticks = 400

[[spans]]
from = 0
to = 400
input = "throttle"

[[spans]]
from = 100
to = 180
input = "left"
"#,
        )
        .unwrap();

        let mut a = session(TrackRecipe::Hilly);
        let mut b = session(TrackRecipe::Hilly);
        run_script(&mut a, &script);
        run_script(&mut b, &script);
        assert_eq!(a.state(), b.state());
        assert_eq!(a.background(), b.background());

        let mut held = script.input_at(399);
        held.toggle_debug = false;
        let la = drive(&mut a, held, 1);
        let lb = drive(&mut b, held, 1);
        assert_eq!(la.commands, lb.commands);
    }
}
