//! Background tiles, the player sprite and the fog band

use glam::DVec2;
use roadster_shared::{Rgba, SpriteRect};

use crate::assets::SpriteSet;
use crate::background::Background;
use crate::camera::{CameraRig, PLAYER_SPRITE_SIZE};

/// Height of the fog gradient image in pixels
pub const FOG_HEIGHT: u32 = 16;

/// Tiles per axis for each background layer
const TILE_REPEAT: u32 = 3;

/// Vertical gap between stacked background layers
const LAYER_SPACING: f64 = 80.0;

/// One placed background sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub source: SpriteRect,
    pub translate: DVec2,
}

/// Lay out every background layer as a 3x3 grid of tiles, back to front.
///
/// Layers scroll left by their offset and shift vertically with the road
/// elevation under the player, nearer layers more.
pub fn background_tiles(background: &Background, sprites: &SpriteSet, player_y: f64) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(background.layers().len() * (TILE_REPEAT * TILE_REPEAT) as usize);
    for (i, layer) in background.layers().iter().enumerate() {
        let source = sprites.layer(layer.kind);
        let (w, h) = (source.width as f64, source.height as f64);
        let lift = -50.0 * layer.speed * player_y * 0.0001;

        for row in 0..TILE_REPEAT {
            for col in 0..TILE_REPEAT {
                tiles.push(Tile {
                    source,
                    translate: DVec2::new(
                        w * col as f64 - layer.offset,
                        h * row as f64 + i as f64 * LAYER_SPACING + lift,
                    ),
                });
            }
        }
    }
    tiles
}

/// Scale and translation for the player sprite.
///
/// `player_camera_y` is the height of the road under the player relative to
/// the camera; see [`crate::projection::ProjectedFrame::player_camera_y`].
pub fn player_blit(rig: &CameraRig, player_camera_y: f64) -> (DVec2, DVec2) {
    let viewport = rig.viewport;
    let size = rig.sprite_scale * rig.road_width;
    let dest_w = (PLAYER_SPRITE_SIZE * rig.screen_scale * viewport.width / 2.0) * size;
    let dest_h = (PLAYER_SPRITE_SIZE * rig.screen_scale * viewport.height / 2.0) * size;

    let dest_x = (viewport.width - dest_w) / 2.0;
    let dest_y = viewport.height - dest_h - (rig.camera_depth / rig.player_z * player_camera_y) + 10.0;

    (
        DVec2::new(dest_w / PLAYER_SPRITE_SIZE, dest_h / PLAYER_SPRITE_SIZE),
        DVec2::new(dest_x, dest_y),
    )
}

/// Per-row premultiplied colors for the fog band, opaque at the top row and
/// fully transparent at the bottom.
pub fn fog_gradient(color: Rgba, height: u32) -> Vec<Rgba> {
    (0..height)
        .map(|row| {
            let alpha = if height > 1 {
                (height - 1 - row) * 0xff / (height - 1)
            } else {
                0xff
            };
            let premultiply = |c: u8| (c as u32 * alpha / 0xff) as u8;
            Rgba::new(
                premultiply(color.r),
                premultiply(color.g),
                premultiply(color.b),
                alpha as u8,
            )
        })
        .collect()
}
