//! Built-in track layouts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::builder::{CurveStrength, HillHeight, Length, Piece};

const SHORT: f64 = Length::Short.segments();
const MEDIUM: f64 = Length::Medium.segments();
const LONG: f64 = Length::Long.segments();

const fn straight(length: f64) -> Piece {
    Piece::Straight { length }
}

const fn hill(length: f64, height: f64) -> Piece {
    Piece::Hill { length, height }
}

const fn curve(length: f64, curve: f64, height: f64) -> Piece {
    Piece::Curve {
        length,
        curve,
        height,
    }
}

const ROLLING: Piece = Piece::LowRollingHills {
    length: SHORT,
    height: HillHeight::Low.value(),
};

const OVAL: &[Piece] = &[
    curve(LONG, CurveStrength::Medium.left(), HillHeight::Low.up()),
    curve(LONG, CurveStrength::Medium.left(), 0.0),
    curve(LONG, CurveStrength::Medium.left(), 0.0),
    curve(LONG, CurveStrength::Medium.left(), 0.0),
];

const CLASSIC: &[Piece] = &[
    straight(SHORT / 4.0),
    Piece::SCurves,
    straight(LONG),
    curve(MEDIUM, CurveStrength::Medium.right(), HillHeight::Low.up()),
    curve(LONG, CurveStrength::Medium.right(), HillHeight::Low.up()),
    straight(MEDIUM),
    Piece::SCurves,
    curve(LONG, CurveStrength::Medium.left(), HillHeight::Low.up()),
    curve(LONG, CurveStrength::Medium.right(), HillHeight::Low.up()),
    straight(MEDIUM),
    Piece::SCurves,
    curve(LONG, CurveStrength::Easy.left(), HillHeight::Low.up()),
];

const HILLY: &[Piece] = &[
    straight(SHORT / 2.0),
    hill(SHORT, HillHeight::Low.up()),
    ROLLING,
    curve(MEDIUM, CurveStrength::Medium.right(), HillHeight::Low.up()),
    ROLLING,
    curve(LONG, CurveStrength::Medium.right(), HillHeight::Medium.up()),
    straight(MEDIUM),
    curve(LONG, CurveStrength::Medium.left(), HillHeight::Medium.up()),
    hill(LONG, HillHeight::High.up()),
    curve(LONG, CurveStrength::Medium.left(), HillHeight::Low.down()),
    hill(LONG, HillHeight::Medium.down()),
    straight(MEDIUM),
    Piece::DownhillToEnd { length: 200.0 },
];

const TUNNEL: &[Piece] = &[
    straight(SHORT / 2.0),
    curve(MEDIUM, CurveStrength::Easy.right(), HillHeight::Low.up()),
    straight(SHORT),
    Piece::Tunnel { length: SHORT },
    straight(SHORT),
    Piece::SCurves,
    hill(MEDIUM, HillHeight::Medium.down()),
    curve(LONG, CurveStrength::Medium.left(), 0.0),
    Piece::DownhillToEnd { length: LONG },
];

/// A named, fixed list of road pieces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackRecipe {
    /// Four long left-hand bends
    Oval,
    /// S-curves and sweeping bends over gentle hills
    #[default]
    Classic,
    /// Rolling hills ending in a descent back to ground level
    Hilly,
    /// Short course through a single tunnel
    Tunnel,
}

impl TrackRecipe {
    pub const ALL: [TrackRecipe; 4] = [
        TrackRecipe::Oval,
        TrackRecipe::Classic,
        TrackRecipe::Hilly,
        TrackRecipe::Tunnel,
    ];

    pub const fn pieces(self) -> &'static [Piece] {
        match self {
            TrackRecipe::Oval => OVAL,
            TrackRecipe::Classic => CLASSIC,
            TrackRecipe::Hilly => HILLY,
            TrackRecipe::Tunnel => TUNNEL,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TrackRecipe::Oval => "oval",
            TrackRecipe::Classic => "classic",
            TrackRecipe::Hilly => "hilly",
            TrackRecipe::Tunnel => "tunnel",
        }
    }
}

impl fmt::Display for TrackRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized recipe name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown track recipe '{0}' (expected oval, classic, hilly or tunnel)")]
pub struct UnknownRecipe(pub String);

impl FromStr for TrackRecipe {
    type Err = UnknownRecipe;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackRecipe::ALL
            .into_iter()
            .find(|recipe| recipe.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRecipe(s.to_string()))
    }
}
