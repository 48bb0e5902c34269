//! Abstract draw list generation
//!
//! The renderer never touches pixels. It turns a projected frame into an
//! ordered list of [`DrawCommand`]s that a front end replays with whatever
//! polygon filler and image blitter it has. Emission order is draw order.

mod road;
mod scenery;

use glam::DVec2;
use roadster_shared::{Rgba, SpriteRect, parse_hex_color};
use serde::{Deserialize, Serialize};

use crate::assets::SpriteSet;
use crate::background::Background;
use crate::camera::CameraRig;
use crate::projection::ProjectedFrame;
use crate::track::SKY;
use crate::vehicle::VehicleState;

pub use road::{Quad, QuadBatch, lane_marker_width, rumble_width, segment_quads};
pub use scenery::{FOG_HEIGHT, Tile, background_tiles, fog_gradient, player_blit};

/// Compositing layer a command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Layer {
    Background,
    Road,
    Player,
}

/// Source image for a blit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageId {
    Background,
    Player,
    /// Generated fog gradient, see [`fog_gradient`]
    Fog,
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Fill a convex quad given in screen pixels
    Fill {
        points: [DVec2; 4],
        color: Rgba,
        layer: Layer,
    },
    /// Draw `source` from `image`, scaled then translated
    Blit {
        image: ImageId,
        source: SpriteRect,
        scale: DVec2,
        translate: DVec2,
        layer: Layer,
    },
}

impl DrawCommand {
    pub fn layer(&self) -> Layer {
        match self {
            DrawCommand::Fill { layer, .. } | DrawCommand::Blit { layer, .. } => *layer,
        }
    }
}

/// Which parts of the scene to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_true")]
    pub road: bool,
    #[serde(default = "default_true")]
    pub background: bool,
    #[serde(default = "default_true")]
    pub player: bool,
    #[serde(default)]
    pub fog: bool,
    #[serde(default = "default_true")]
    pub debug: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            road: true,
            background: true,
            player: true,
            fog: false,
            debug: true,
        }
    }
}

/// Numbers the front end prints when debug output is on
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DebugReadout {
    pub tick_rate: f64,
    pub speed: f64,
    pub position: f64,
    pub player_x: f64,
    pub player_y: f64,
    pub max_y: f64,
}

/// Everything needed to present one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawList {
    /// Color to clear the surface to before replaying commands
    pub clear: Rgba,
    pub commands: Vec<DrawCommand>,
    pub debug: Option<DebugReadout>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            clear: parse_hex_color(SKY),
            commands: Vec::new(),
            debug: None,
        }
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&mut self, points: [DVec2; 4], color: Rgba, layer: Layer) {
        self.commands.push(DrawCommand::Fill {
            points,
            color,
            layer,
        });
    }

    pub fn blit(&mut self, image: ImageId, source: SpriteRect, scale: DVec2, translate: DVec2, layer: Layer) {
        self.commands.push(DrawCommand::Blit {
            image,
            source,
            scale,
            translate,
            layer,
        });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands on `layer`, in draw order
    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.layer() == layer)
    }
}

/// Inputs for [`render_frame`] that stay fixed for the whole session
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub rig: &'a CameraRig,
    pub sprites: &'a SpriteSet,
}

/// Build the draw list for one projected frame.
pub fn render_frame(
    scene: Scene<'_>,
    frame: &ProjectedFrame,
    state: &VehicleState,
    background: &Background,
    options: &RenderOptions,
) -> DrawList {
    let mut list = DrawList::new();
    let viewport = scene.rig.viewport;

    if options.background {
        for tile in background_tiles(background, scene.sprites, frame.player_y) {
            list.blit(ImageId::Background, tile.source, DVec2::ONE, tile.translate, Layer::Background);
        }
    }

    if options.road {
        for segment in frame.visible.iter().rev() {
            for quad in segment_quads(segment, viewport.width, scene.rig.lanes) {
                list.fill(quad.points, quad.color, Layer::Road);
            }
        }
        if options.fog {
            list.blit(
                ImageId::Fog,
                SpriteRect::new(0, 0, viewport.width.max(0.0) as u32, FOG_HEIGHT),
                DVec2::ONE,
                DVec2::new(0.0, frame.max_y - 5.0),
                Layer::Road,
            );
        }
    }

    if options.player {
        let (scale, translate) = player_blit(scene.rig, frame.player_camera_y);
        list.blit(
            ImageId::Player,
            scene.sprites.player(state.mode),
            scale,
            translate,
            Layer::Player,
        );
    }

    list
}

#[cfg(test)]
mod tests;
