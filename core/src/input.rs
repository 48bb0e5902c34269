//! Player intents
//!
//! The front end reports which keys are held each tick. Driving controls act
//! while held; display toggles fire once on the tick a key goes down.

use serde::{Deserialize, Serialize};

use crate::render::RenderOptions;
use crate::vehicle::Controls;

/// Held state of every intent for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub throttle: bool,
    pub brake: bool,
    pub quit: bool,
    pub toggle_fog: bool,
    pub toggle_road: bool,
    pub toggle_background: bool,
    pub toggle_player: bool,
    pub toggle_debug: bool,
}

impl InputState {
    pub fn controls(&self) -> Controls {
        Controls {
            left: self.left,
            right: self.right,
            throttle: self.throttle,
            brake: self.brake,
        }
    }
}

/// Display toggles that fired this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggles {
    pub fog: bool,
    pub road: bool,
    pub background: bool,
    pub player: bool,
    pub debug: bool,
}

impl Toggles {
    pub fn any(&self) -> bool {
        self.fog || self.road || self.background || self.player || self.debug
    }

    /// Flip the matching render options.
    pub fn apply(&self, options: &mut RenderOptions) {
        options.fog ^= self.fog;
        options.road ^= self.road;
        options.background ^= self.background;
        options.player ^= self.player;
        options.debug ^= self.debug;
    }
}

/// Remembers last tick's input to detect key presses
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous: InputState,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `current` and return the toggles whose key went down this tick.
    pub fn update(&mut self, current: InputState) -> Toggles {
        let prev = self.previous;
        self.previous = current;
        Toggles {
            fog: current.toggle_fog && !prev.toggle_fog,
            road: current.toggle_road && !prev.toggle_road,
            background: current.toggle_background && !prev.toggle_background,
            player: current.toggle_player && !prev.toggle_player,
            debug: current.toggle_debug && !prev.toggle_debug,
        }
    }
}
