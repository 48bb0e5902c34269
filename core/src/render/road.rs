//! Road segment quads
//!
//! One visible segment becomes a handful of filled quads: grass, rumble
//! strips, tarmac and lane markers on open road; walls, ceiling, tarmac and
//! entrance caps inside a tunnel.

use glam::DVec2;
use roadster_shared::{Rgba, ScreenPoint, parse_hex_color};
use smallvec::SmallVec;

use crate::projection::VisibleSegment;

/// A filled four-point polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub points: [DVec2; 4],
    pub color: Rgba,
}

/// Quads for a single segment, kept inline for the common case
pub type QuadBatch = SmallVec<[Quad; 12]>;

/// Rumble strip width for a projected road half-width
pub fn rumble_width(w: f64, lanes: usize) -> f64 {
    w / 6f64.max(2.0 * lanes as f64)
}

/// Lane marker width for a projected road half-width
pub fn lane_marker_width(w: f64, lanes: usize) -> f64 {
    w / 32f64.max(8.0 * lanes as f64)
}

fn quad(points: [(f64, f64); 4], color: Rgba) -> Quad {
    Quad {
        points: points.map(|(x, y)| DVec2::new(x, y)),
        color,
    }
}

/// Build the quads for `segment` on a surface `width` pixels wide.
pub fn segment_quads(segment: &VisibleSegment, width: f64, lanes: usize) -> QuadBatch {
    let mut batch = QuadBatch::new();
    if segment.in_tunnel {
        tunnel(&mut batch, segment, width);
    } else {
        open_road(&mut batch, segment, width, lanes);
    }
    lane_markers(&mut batch, segment, lanes);
    if segment.in_tunnel && segment.tunnel_start {
        entrance(&mut batch, segment, width);
    }
    batch
}

fn open_road(batch: &mut QuadBatch, segment: &VisibleSegment, width: f64, lanes: usize) {
    let (p1, p2) = (segment.p1, segment.p2);
    let r1 = rumble_width(p1.w, lanes);
    let r2 = rumble_width(p2.w, lanes);
    let grass = parse_hex_color(segment.color.grass);
    let rumble = parse_hex_color(segment.color.rumble);
    let road = parse_hex_color(segment.color.road);

    let (l1, l2) = (p1.x - p1.w, p2.x - p2.w);
    let (r_1, r_2) = (p1.x + p1.w, p2.x + p2.w);

    batch.push(quad(
        [(0.0, p1.y), (l1 - r1, p1.y), (l2 - r2, p2.y), (0.0, p2.y)],
        grass,
    ));
    batch.push(quad(
        [(l1 - r1, p1.y), (l1, p1.y), (l2, p2.y), (l2 - r2, p2.y)],
        rumble,
    ));
    batch.push(road_surface(p1, p2, road));
    batch.push(quad(
        [(r_1, p1.y), (r_1 + r1, p1.y), (r_2 + r2, p2.y), (r_2, p2.y)],
        rumble,
    ));
    batch.push(quad(
        [(r_1 + r1, p1.y), (width, p1.y), (width, p2.y), (r_2 + r2, p2.y)],
        grass,
    ));
}

fn road_surface(p1: ScreenPoint, p2: ScreenPoint, color: Rgba) -> Quad {
    quad(
        [
            (p1.x - p1.w, p1.y),
            (p1.x + p1.w, p1.y),
            (p2.x + p2.w, p2.y),
            (p2.x - p2.w, p2.y),
        ],
        color,
    )
}

fn tunnel(batch: &mut QuadBatch, segment: &VisibleSegment, width: f64) {
    let (p1, p2) = (segment.p1, segment.p2);
    let color = parse_hex_color(segment.color.tunnel);

    // The segment the player is in is drawn out to the screen edges
    let (left, right) = if segment.player {
        (0.0, width)
    } else {
        (p1.x - p1.w, p1.x + p1.w)
    };

    batch.push(quad(
        [
            (left, p1.y),
            (left, p1.ceiling_y),
            (p2.x - p2.w, p2.ceiling_y),
            (p2.x - p2.w, p2.y),
        ],
        color,
    ));
    batch.push(quad(
        [
            (right, p1.y),
            (right, p1.ceiling_y),
            (p2.x + p2.w, p2.ceiling_y),
            (p2.x + p2.w, p2.y),
        ],
        color,
    ));
    batch.push(quad(
        [
            (left, p1.ceiling_y),
            (right, p1.ceiling_y),
            (p2.x + p2.w, p2.ceiling_y),
            (p2.x - p2.w, p2.ceiling_y),
        ],
        color,
    ));
    batch.push(road_surface(p1, p2, parse_hex_color(segment.color.road)));
}

fn entrance(batch: &mut QuadBatch, segment: &VisibleSegment, width: f64) {
    let p1 = segment.p1;
    let color = parse_hex_color(segment.color.tunnel_outer);
    let (edge_l, edge_r) = (p1.x - p1.w, p1.x + p1.w);

    batch.push(quad(
        [(0.0, p1.y), (edge_l, p1.y), (edge_l, p1.bridge_top), (0.0, p1.bridge_top)],
        color,
    ));
    batch.push(quad(
        [(edge_r, p1.y), (width, p1.y), (width, p1.bridge_top), (edge_r, p1.bridge_top)],
        color,
    ));
    batch.push(quad(
        [
            (0.0, p1.ceiling_y),
            (width, p1.ceiling_y),
            (width, p1.bridge_top),
            (0.0, p1.bridge_top),
        ],
        color,
    ));
}

fn lane_markers(batch: &mut QuadBatch, segment: &VisibleSegment, lanes: usize) {
    let Some(lane) = segment.color.lane else {
        return;
    };
    let color = parse_hex_color(lane);
    let (p1, p2) = (segment.p1, segment.p2);
    let m1 = lane_marker_width(p1.w, lanes);
    let m2 = lane_marker_width(p2.w, lanes);
    let step1 = 2.0 * p1.w / lanes as f64;
    let step2 = 2.0 * p2.w / lanes as f64;

    for n in 1..lanes {
        let x1 = p1.x - p1.w + step1 * n as f64;
        let x2 = p2.x - p2.w + step2 * n as f64;
        batch.push(quad(
            [
                (x1 - m1 / 2.0, p1.y),
                (x1 + m1 / 2.0, p1.y),
                (x2 + m2 / 2.0, p2.y),
                (x2 - m2 / 2.0, p2.y),
            ],
            color,
        ));
    }
}
