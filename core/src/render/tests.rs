//! Renderer tests

use roadster_shared::{ScreenPoint, parse_hex_color};

use super::*;
use crate::assets::{default_background_atlas, default_player_atlas};
use crate::background::BackgroundConfig;
use crate::projection::{ProjectionArena, VisibleSegment, project_frame};
use crate::track::{DARK, FOG, LIGHT, Track, TrackRecipe};

const WIDTH: f64 = 1024.0;

fn point(x: f64, y: f64, w: f64) -> ScreenPoint {
    ScreenPoint {
        x,
        y,
        w,
        scale: 0.001,
        ceiling_y: y - w,
        bridge_top: y - w - 40.0,
    }
}

fn segment(light: bool) -> VisibleSegment {
    VisibleSegment {
        index: 10,
        p1: point(512.0, 700.0, 300.0),
        p2: point(512.0, 650.0, 250.0),
        color: if light { LIGHT } else { DARK },
        tunnel_start: false,
        tunnel_end: false,
        in_tunnel: false,
        player: false,
    }
}

fn sprites() -> SpriteSet {
    SpriteSet::resolve(
        &default_background_atlas().unwrap(),
        &default_player_atlas().unwrap(),
    )
    .unwrap()
}

// ============================================================================
// Segment Quads
// ============================================================================

#[test]
fn test_widths() {
    assert_eq!(rumble_width(300.0, 3), 50.0);
    assert_eq!(rumble_width(300.0, 4), 37.5);
    assert_eq!(lane_marker_width(320.0, 3), 10.0);
    assert_eq!(lane_marker_width(400.0, 5), 10.0);
}

#[test]
fn test_open_road_quads() {
    let quads = segment_quads(&segment(false), WIDTH, 3);
    assert_eq!(quads.len(), 5);

    let grass = parse_hex_color(DARK.grass);
    let rumble = parse_hex_color(DARK.rumble);
    let road = parse_hex_color(DARK.road);
    let colors: Vec<Rgba> = quads.iter().map(|q| q.color).collect();
    assert_eq!(colors, vec![grass, rumble, road, rumble, grass]);

    // Road spans the projected width at both edges
    let road_quad = quads[2];
    assert_eq!(road_quad.points[0], DVec2::new(212.0, 700.0));
    assert_eq!(road_quad.points[1], DVec2::new(812.0, 700.0));
    assert_eq!(road_quad.points[2], DVec2::new(762.0, 650.0));
    assert_eq!(road_quad.points[3], DVec2::new(262.0, 650.0));

    // Grass reaches the screen edges
    assert_eq!(quads[0].points[0].x, 0.0);
    assert_eq!(quads[4].points[1].x, WIDTH);
}

#[test]
fn test_lane_markers_on_light_segments() {
    let quads = segment_quads(&segment(true), WIDTH, 3);
    assert_eq!(quads.len(), 5 + 2);
    let lane = parse_hex_color(LIGHT.lane.unwrap());
    assert!(quads[5..].iter().all(|q| q.color == lane));

    // First marker sits one lane width in from the left edge
    let m = lane_marker_width(300.0, 3);
    assert_eq!(quads[5].points[0].x, 212.0 + 200.0 - m / 2.0);

    assert_eq!(segment_quads(&segment(true), WIDTH, 1).len(), 5);
}

#[test]
fn test_tunnel_quads() {
    let mut seg = segment(false);
    seg.in_tunnel = true;
    let quads = segment_quads(&seg, WIDTH, 3);
    assert_eq!(quads.len(), 4);

    let tunnel = parse_hex_color(DARK.tunnel);
    assert_eq!(quads[0].color, tunnel);
    assert_eq!(quads[1].color, tunnel);
    assert_eq!(quads[2].color, tunnel);
    assert_eq!(quads[3].color, parse_hex_color(DARK.road));

    // Walls rise from the road edge to the ceiling
    assert_eq!(quads[0].points[0], DVec2::new(212.0, 700.0));
    assert_eq!(quads[0].points[1], DVec2::new(212.0, 400.0));
}

#[test]
fn test_tunnel_entrance_caps() {
    let mut seg = segment(false);
    seg.in_tunnel = true;
    seg.tunnel_start = true;
    let quads = segment_quads(&seg, WIDTH, 3);
    assert_eq!(quads.len(), 7);

    let outer = parse_hex_color(DARK.tunnel_outer);
    assert!(quads[4..].iter().all(|q| q.color == outer));
    // Full-width cap between the ceiling and the top of the bridge
    let cap = quads[6];
    assert_eq!(cap.points[0], DVec2::new(0.0, 400.0));
    assert_eq!(cap.points[2], DVec2::new(WIDTH, 360.0));
}

#[test]
fn test_tunnel_exit_has_no_caps() {
    let mut seg = segment(false);
    seg.in_tunnel = true;
    seg.tunnel_end = true;
    let outer = parse_hex_color(DARK.tunnel_outer);
    let quads = segment_quads(&seg, WIDTH, 3);
    assert_eq!(quads.len(), 4);
    assert!(quads.iter().all(|q| q.color != outer));
}

#[test]
fn test_player_tunnel_segment_reaches_screen_edges() {
    let mut seg = segment(false);
    seg.in_tunnel = true;
    seg.player = true;
    let quads = segment_quads(&seg, WIDTH, 3);
    assert_eq!(quads[0].points[0].x, 0.0);
    assert_eq!(quads[1].points[0].x, WIDTH);
    assert_eq!(quads[2].points[0].x, 0.0);
    assert_eq!(quads[2].points[1].x, WIDTH);
}

// ============================================================================
// Scenery
// ============================================================================

#[test]
fn test_fog_gradient() {
    let fog = parse_hex_color(FOG);
    let rows = fog_gradient(fog, FOG_HEIGHT);
    assert_eq!(rows.len(), 16);
    assert_eq!(rows[0], fog);
    assert_eq!(rows[15], Rgba::TRANSPARENT);
    for pair in rows.windows(2) {
        assert!(pair[1].a < pair[0].a);
        assert!(pair[1].g <= pair[0].g);
    }
    assert_eq!(fog_gradient(fog, 1), vec![fog]);
}

#[test]
fn test_background_tiles() {
    let sprites = sprites();
    let background = Background::new(&BackgroundConfig::default());
    let tiles = background_tiles(&background, &sprites, 0.0);
    assert_eq!(tiles.len(), 27);

    assert_eq!(tiles[0].source, sprites.sky);
    assert_eq!(tiles[0].translate, DVec2::new(-1408.0, 0.0));
    assert_eq!(tiles[1].translate, DVec2::new(896.0 - 1408.0, 0.0));
    assert_eq!(tiles[3].translate, DVec2::new(-1408.0, 480.0));
    // Second layer is stacked 80 px lower
    assert_eq!(tiles[9].source, sprites.hills);
    assert_eq!(tiles[9].translate, DVec2::new(-1408.0, 80.0));
}

#[test]
fn test_background_rises_with_elevation() {
    let sprites = sprites();
    let background = Background::new(&BackgroundConfig::default());
    let flat = background_tiles(&background, &sprites, 0.0);
    let high = background_tiles(&background, &sprites, 2000.0);
    assert!(high[0].translate.y < flat[0].translate.y);
    // Nearer layers move further
    let sky = flat[0].translate.y - high[0].translate.y;
    let trees = flat[18].translate.y - high[18].translate.y;
    assert!(trees > sky);
}

#[test]
fn test_player_blit_is_centered() {
    let rig = CameraRig::default();
    let (scale, translate) = player_blit(&rig, -rig.camera_height);
    let dest_w = scale.x * 128.0;
    assert!((translate.x * 2.0 + dest_w - rig.viewport.width).abs() < 1e-9);
    assert!(scale.x > 1.0);
    assert!(translate.y < rig.viewport.height);
}

// ============================================================================
// Frames
// ============================================================================

fn frame_for(options: RenderOptions) -> (DrawList, ProjectedFrame) {
    let rig = CameraRig::default();
    let sprites = sprites();
    let track = Track::from_recipe(TrackRecipe::Classic, 80.0, 3, rig.player_z).unwrap();
    let mut arena = ProjectionArena::new(track.len());
    let state = VehicleState::default();
    let frame = project_frame(&track, &state, &rig, &mut arena);
    let background = Background::new(&BackgroundConfig::default());
    let scene = Scene {
        rig: &rig,
        sprites: &sprites,
    };
    (render_frame(scene, &frame, &state, &background, &options), frame)
}

#[test]
fn test_frame_layer_order() {
    let (list, _) = frame_for(RenderOptions::default());
    assert_eq!(list.clear, parse_hex_color(crate::track::SKY));

    let layers: Vec<Layer> = list.commands.iter().map(DrawCommand::layer).collect();
    let mut sorted = layers.clone();
    sorted.sort();
    assert_eq!(layers, sorted);

    assert_eq!(list.on_layer(Layer::Background).count(), 27);
    assert!(list.on_layer(Layer::Road).count() > 0);
    assert_eq!(list.on_layer(Layer::Player).count(), 1);
    match list.commands.last() {
        Some(DrawCommand::Blit { image, source, .. }) => {
            assert_eq!(*image, ImageId::Player);
            assert_eq!(*source, sprites().straight);
        }
        other => panic!("expected player blit, got {other:?}"),
    }
}

#[test]
fn test_road_drawn_back_to_front() {
    let (list, frame) = frame_for(RenderOptions::default());
    let farthest = frame.visible.last().unwrap();
    let first_fill = list.on_layer(Layer::Road).next().unwrap();
    match first_fill {
        DrawCommand::Fill { points, .. } => assert_eq!(points[0].y, farthest.p1.y),
        other => panic!("expected fill, got {other:?}"),
    }
}

#[test]
fn test_toggles_hide_layers() {
    let options = RenderOptions {
        road: false,
        background: false,
        player: false,
        fog: true,
        debug: false,
    };
    let (list, _) = frame_for(options);
    assert!(list.is_empty());
}

#[test]
fn test_fog_sits_on_horizon() {
    let options = RenderOptions {
        fog: true,
        ..RenderOptions::default()
    };
    let (list, frame) = frame_for(options);
    let fog = list
        .commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::Blit {
                image: ImageId::Fog,
                translate,
                source,
                ..
            } => Some((*translate, *source)),
            _ => None,
        })
        .unwrap();
    assert_eq!(fog.0, DVec2::new(0.0, frame.max_y - 5.0));
    assert_eq!(fog.1.height, FOG_HEIGHT);
}
