//! Procedural segment builder
//!
//! Every road piece is expressed through [`TrackBuilder::add_road`], which
//! eases curvature in, holds it, and eases it back out while the elevation
//! follows a single ease-in-out across the whole piece. The running elevation
//! is passed in and returned explicitly so pieces compose without hidden
//! state.

use glam::DVec3;
use roadster_shared::math::{ease_in, ease_in_out};
use serde::{Deserialize, Serialize};

use super::{Segment, StripeRole, Track, TrackError};

/// Named piece lengths, in segments per phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Length {
    None,
    Short,
    Medium,
    Long,
}

impl Length {
    pub const fn segments(self) -> f64 {
        match self {
            Length::None => 0.0,
            Length::Short => 25.0,
            Length::Medium => 50.0,
            Length::Long => 100.0,
        }
    }
}

/// Named curvature magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveStrength {
    None,
    Easy,
    Medium,
    Hard,
}

impl CurveStrength {
    pub const fn value(self) -> f64 {
        match self {
            CurveStrength::None => 0.0,
            CurveStrength::Easy => 2.0,
            CurveStrength::Medium => 4.0,
            CurveStrength::Hard => 6.0,
        }
    }

    /// Curvature bending left (negative)
    pub const fn left(self) -> f64 {
        -self.value()
    }

    /// Curvature bending right (positive)
    pub const fn right(self) -> f64 {
        self.value()
    }
}

/// Named elevation changes, in segment lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HillHeight {
    None,
    Low,
    Medium,
    High,
    VeryHigh,
    Extreme,
}

impl HillHeight {
    pub const fn value(self) -> f64 {
        match self {
            HillHeight::None => 0.0,
            HillHeight::Low => 20.0,
            HillHeight::Medium => 40.0,
            HillHeight::High => 60.0,
            HillHeight::VeryHigh => 80.0,
            HillHeight::Extreme => 100.0,
        }
    }

    pub const fn up(self) -> f64 {
        self.value()
    }

    pub const fn down(self) -> f64 {
        -self.value()
    }
}

/// Tunnel membership requested for a run of segments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TunnelFlags {
    pub start: bool,
    pub end: bool,
    pub inside: bool,
}

impl TunnelFlags {
    pub const OPEN: Self = Self {
        start: false,
        end: false,
        inside: false,
    };
}

/// Parameters for one [`TrackBuilder::add_road`] call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadSpec {
    /// Segments easing curvature in
    pub enter: f64,
    /// Segments at full curvature
    pub hold: f64,
    /// Segments easing curvature out
    pub leave: f64,
    /// Target curvature
    pub curve: f64,
    /// Elevation change in segment lengths
    pub elevation: f64,
    pub tunnel: TunnelFlags,
}

impl RoadSpec {
    /// Equal enter/hold/leave phases of `length` segments
    pub const fn even(length: f64, curve: f64, elevation: f64) -> Self {
        Self {
            enter: length,
            hold: length,
            leave: length,
            curve,
            elevation,
            tunnel: TunnelFlags::OPEN,
        }
    }
}

/// Composite road shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Piece {
    Straight { length: f64 },
    Hill { length: f64, height: f64 },
    Curve { length: f64, curve: f64, height: f64 },
    LowRollingHills { length: f64, height: f64 },
    SCurves,
    Tunnel { length: f64 },
    /// Ease elevation back to zero so the track closes cleanly
    DownhillToEnd { length: f64 },
}

/// Number of whole segments emitted for a possibly fractional phase count
fn phase_segments(count: f64) -> usize {
    if count > 0.0 { count.ceil() as usize } else { 0 }
}

/// Appends segments one road piece at a time
#[derive(Debug)]
pub struct TrackBuilder {
    segment_length: f64,
    rumble_length: usize,
    segments: Vec<Segment>,
}

impl TrackBuilder {
    pub fn new(segment_length: f64, rumble_length: usize) -> Result<Self, TrackError> {
        if !(segment_length.is_finite() && segment_length > 0.0) || rumble_length == 0 {
            return Err(TrackError::InvalidDimensions {
                segment_length,
                rumble_length,
            });
        }
        Ok(Self {
            segment_length,
            rumble_length,
            segments: Vec::new(),
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Append one segment rising from `from_y` to `to_y`.
    pub fn add_segment(&mut self, curve: f64, from_y: f64, to_y: f64, tunnel: TunnelFlags) {
        let index = self.segments.len();
        self.segments.push(Segment {
            index,
            p1: DVec3::new(0.0, from_y, index as f64 * self.segment_length),
            p2: DVec3::new(0.0, to_y, (index + 1) as f64 * self.segment_length),
            curve,
            role: StripeRole::for_index(index, self.rumble_length),
            tunnel_start: tunnel.start,
            tunnel_end: tunnel.end,
            in_tunnel: tunnel.inside,
        });
    }

    /// Append an eased road piece starting at elevation `baseline`.
    ///
    /// Returns the far-edge elevation of the last segment added, which is the
    /// baseline for the next piece.
    pub fn add_road(&mut self, baseline: f64, road: RoadSpec) -> f64 {
        let end_y = baseline + road.elevation * self.segment_length;
        let total = road.enter + road.hold + road.leave;

        let enter = phase_segments(road.enter);
        let hold = phase_segments(road.hold);
        let leave = phase_segments(road.leave);
        let count = enter + hold + leave;

        let mut y = baseline;
        for i in 0..count {
            let (curve, progress) = if i < enter {
                let n = i as f64;
                (ease_in(0.0, road.curve, n / road.enter), n)
            } else if i < enter + hold {
                (road.curve, i as f64 - enter as f64 + road.enter)
            } else {
                let n = (i - enter - hold) as f64;
                (
                    ease_in_out(road.curve, 0.0, n / road.leave),
                    road.enter + road.hold + n,
                )
            };
            let next_y = ease_in_out(baseline, end_y, progress / total);

            let tunnel = TunnelFlags {
                start: road.tunnel.start && i == 0,
                end: road.tunnel.end && i + 1 == count,
                inside: road.tunnel.inside,
            };
            self.add_segment(curve, y, next_y, tunnel);
            y = next_y;
        }
        y
    }

    /// Append a composite piece starting at elevation `baseline`.
    pub fn add_piece(&mut self, baseline: f64, piece: Piece) -> f64 {
        match piece {
            Piece::Straight { length } => self.add_road(baseline, RoadSpec::even(length, 0.0, 0.0)),
            Piece::Hill { length, height } => {
                self.add_road(baseline, RoadSpec::even(length, 0.0, height))
            }
            Piece::Curve {
                length,
                curve,
                height,
            } => self.add_road(baseline, RoadSpec::even(length, curve, height)),
            Piece::LowRollingHills { length, height } => {
                [height / 2.0, -height, height, 0.0, height / 2.0, 0.0]
                    .into_iter()
                    .fold(baseline, |y, h| {
                        self.add_road(y, RoadSpec::even(length, 0.0, h))
                    })
            }
            Piece::SCurves => {
                let n = Length::Medium.segments();
                [
                    (CurveStrength::Easy.left(), HillHeight::None.up()),
                    (CurveStrength::Medium.right(), HillHeight::Medium.up()),
                    (CurveStrength::Easy.right(), HillHeight::Low.up()),
                    (CurveStrength::Easy.left(), HillHeight::Medium.up()),
                    (CurveStrength::Medium.left(), HillHeight::Medium.up()),
                ]
                .into_iter()
                .fold(baseline, |y, (curve, h)| {
                    self.add_road(y, RoadSpec::even(n, curve, h))
                })
            }
            Piece::Tunnel { length } => {
                const CALLS: usize = 6;
                (0..CALLS).fold(baseline, |y, call| {
                    let road = RoadSpec {
                        tunnel: TunnelFlags {
                            start: call == 0,
                            end: call + 1 == CALLS,
                            inside: true,
                        },
                        ..RoadSpec::even(length, 0.0, 0.0)
                    };
                    self.add_road(y, road)
                })
            }
            Piece::DownhillToEnd { length } => {
                let elevation = -baseline / self.segment_length;
                self.add_road(
                    baseline,
                    RoadSpec::even(length, CurveStrength::Easy.right(), elevation),
                )
            }
        }
    }

    /// Append every piece in order, threading the elevation through.
    pub fn add_pieces(&mut self, baseline: f64, pieces: &[Piece]) -> f64 {
        pieces
            .iter()
            .fold(baseline, |y, piece| self.add_piece(y, *piece))
    }

    /// Paint the start and finish banners and hand over the finished track.
    ///
    /// The two segments two and three ahead of the one containing `player_z`
    /// become the start line; the final `rumble_length` segments become the
    /// finish line.
    pub fn build(mut self, player_z: f64) -> Result<Track, TrackError> {
        if self.segments.is_empty() {
            return Err(TrackError::Empty);
        }

        let count = self.segments.len();
        let start = (player_z.max(0.0) / self.segment_length).floor() as usize % count;
        for offset in [2, 3] {
            self.segments[(start + offset) % count].role = StripeRole::Start;
        }
        for segment in self.segments.iter_mut().rev().take(self.rumble_length) {
            segment.role = StripeRole::Finish;
        }

        Ok(Track::from_parts(
            self.segments,
            self.segment_length,
            self.rumble_length,
        ))
    }
}
