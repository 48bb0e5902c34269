//! Sprite lookups resolved once at startup

use roadster_shared::{AtlasError, SpriteAtlas, SpriteRect};
use serde::Serialize;

use crate::background::LayerKind;
use crate::vehicle::PlayerMode;

/// A required sprite could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to resolve sprite in {atlas} atlas")]
pub struct AssetError {
    pub atlas: &'static str,
    #[source]
    pub source: AtlasError,
}

/// Every sprite rectangle the renderer needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteSet {
    pub sky: SpriteRect,
    pub hills: SpriteRect,
    pub trees: SpriteRect,
    pub straight: SpriteRect,
    pub left: SpriteRect,
    pub right: SpriteRect,
}

fn lookup(atlas: &SpriteAtlas, atlas_name: &'static str, name: &str) -> Result<SpriteRect, AssetError> {
    atlas.get(name).map_err(|source| AssetError {
        atlas: atlas_name,
        source,
    })
}

impl SpriteSet {
    /// Resolve the background and player sprites by name.
    pub fn resolve(background: &SpriteAtlas, player: &SpriteAtlas) -> Result<Self, AssetError> {
        Ok(Self {
            sky: lookup(background, "background", LayerKind::Sky.sprite_name())?,
            hills: lookup(background, "background", LayerKind::Hills.sprite_name())?,
            trees: lookup(background, "background", LayerKind::Trees.sprite_name())?,
            straight: lookup(player, "player", PlayerMode::Straight.sprite_name())?,
            left: lookup(player, "player", PlayerMode::Left.sprite_name())?,
            right: lookup(player, "player", PlayerMode::Right.sprite_name())?,
        })
    }

    pub fn layer(&self, kind: LayerKind) -> SpriteRect {
        match kind {
            LayerKind::Sky => self.sky,
            LayerKind::Hills => self.hills,
            LayerKind::Trees => self.trees,
        }
    }

    pub fn player(&self, mode: PlayerMode) -> SpriteRect {
        match mode {
            PlayerMode::Straight => self.straight,
            PlayerMode::Left => self.left,
            PlayerMode::Right => self.right,
        }
    }
}

/// Background sheet laid out as one 896x480 strip per layer
pub fn default_background_atlas() -> Result<SpriteAtlas, AtlasError> {
    SpriteAtlas::from_grid(1, 3, 896, 480, &["sky", "hills", "trees"])
}

/// Player sheet with the three 128x128 steering poses side by side
pub fn default_player_atlas() -> Result<SpriteAtlas, AtlasError> {
    SpriteAtlas::from_grid(3, 1, 128, 128, &["left", "straight", "right"])
}
