//! Stripe roles and their colors

use serde::Serialize;

/// Which palette entry a segment is painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StripeRole {
    Light,
    Dark,
    Start,
    Finish,
}

/// Hex colors for every surface of one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentColor {
    pub road: &'static str,
    pub grass: &'static str,
    pub rumble: &'static str,
    /// Lane markers are only painted on segments that have a lane color
    pub lane: Option<&'static str>,
    pub tunnel: &'static str,
    pub tunnel_outer: &'static str,
}

pub const LIGHT: SegmentColor = SegmentColor {
    road: "#6B6B6B",
    grass: "#10AA10",
    rumble: "#555555",
    lane: Some("#CCCCCC"),
    tunnel: "#808080",
    tunnel_outer: "#BE1B08",
};

pub const DARK: SegmentColor = SegmentColor {
    road: "#696969",
    grass: "#009A00",
    rumble: "#BE1B08",
    lane: None,
    tunnel: "#373737",
    tunnel_outer: "#BE1B08",
};

pub const START: SegmentColor = SegmentColor {
    road: "#FFFFFF",
    grass: "#FFFFFF",
    rumble: "#FFFFFF",
    lane: None,
    tunnel: "#000000",
    tunnel_outer: "#BE1B08",
};

pub const FINISH: SegmentColor = SegmentColor {
    road: "#000000",
    grass: "#000000",
    rumble: "#000000",
    lane: None,
    tunnel: "#000000",
    tunnel_outer: "#BE1B08",
};

pub const SKY: &str = "#72D7EE";
pub const FOG: &str = "#005108";

impl StripeRole {
    pub const fn color(self) -> SegmentColor {
        match self {
            StripeRole::Light => LIGHT,
            StripeRole::Dark => DARK,
            StripeRole::Start => START,
            StripeRole::Finish => FINISH,
        }
    }

    /// Alternating stripe for the segment at `index`
    pub fn for_index(index: usize, rumble_length: usize) -> Self {
        if (index / rumble_length) % 2 == 0 {
            StripeRole::Dark
        } else {
            StripeRole::Light
        }
    }
}
