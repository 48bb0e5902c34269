//! Sprite atlases
//!
//! A sprite atlas is a resolved mapping from sprite name to a pixel rectangle
//! inside an already-loaded image. Decoding images and reading descriptor
//! files happens outside this crate; [`SpriteAtlas::from_grid`] only applies
//! the grid naming rules to numbers the caller already has.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Name that marks an unused grid cell.
pub const PLACEHOLDER: &str = "_";

/// Pixel rectangle within a source image
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SpriteRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Errors raised while building or querying an atlas
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
    #[error("Atlas grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: u32, cols: u32 },

    #[error("Atlas cell size must be non-zero (got {width}x{height})")]
    EmptyCell { width: u32, height: u32 },

    #[error("Atlas has {cells} cells but {names} sprite names")]
    TooManyNames { cells: usize, names: usize },

    #[error("Duplicate sprite name: {0}")]
    DuplicateName(String),

    #[error("Sprite not found: {0}")]
    MissingSprite(String),
}

/// Name → rectangle lookup for one image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteAtlas {
    sprites: HashMap<String, SpriteRect>,
}

impl SpriteAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `names` to a `cols` x `rows` grid of `cell_width` x `cell_height`
    /// cells, left to right then top to bottom.
    ///
    /// Cells named [`PLACEHOLDER`] are skipped. Fewer names than cells is fine.
    pub fn from_grid<S: AsRef<str>>(
        cols: u32,
        rows: u32,
        cell_width: u32,
        cell_height: u32,
        names: &[S],
    ) -> Result<Self, AtlasError> {
        if rows == 0 || cols == 0 {
            return Err(AtlasError::EmptyGrid { rows, cols });
        }
        if cell_width == 0 || cell_height == 0 {
            return Err(AtlasError::EmptyCell {
                width: cell_width,
                height: cell_height,
            });
        }
        let cells = rows as usize * cols as usize;
        if names.len() > cells {
            return Err(AtlasError::TooManyNames {
                cells,
                names: names.len(),
            });
        }

        let mut atlas = Self::new();
        for (i, name) in names.iter().enumerate() {
            let name = name.as_ref();
            if name == PLACEHOLDER {
                continue;
            }
            let col = (i % cols as usize) as u32;
            let row = (i / cols as usize) as u32;
            let rect = SpriteRect::new(col * cell_width, row * cell_height, cell_width, cell_height);
            atlas.insert(name, rect)?;
        }
        Ok(atlas)
    }

    /// Add a named rectangle
    pub fn insert(&mut self, name: &str, rect: SpriteRect) -> Result<(), AtlasError> {
        if self.sprites.contains_key(name) {
            return Err(AtlasError::DuplicateName(name.to_string()));
        }
        self.sprites.insert(name.to_string(), rect);
        Ok(())
    }

    /// Look up a sprite by name
    pub fn get(&self, name: &str) -> Result<SpriteRect, AtlasError> {
        self.sprites
            .get(name)
            .copied()
            .ok_or_else(|| AtlasError::MissingSprite(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
