//! Shared types for the roadster pseudo-3D racer.
//!
//! Pure math and plain data with no game state:
//!
//! - [`math`] - easing, wraparound and integration helpers
//! - [`color`] - hex color parsing
//! - [`projection`] - the perspective transform for road edge points
//! - [`sprite`] - resolved sprite rectangles

pub mod color;
pub mod math;
pub mod projection;
pub mod sprite;

pub use color::{Rgba, parse_hex_color};
pub use projection::{Projection, ScreenPoint, Viewport, project};
pub use sprite::{AtlasError, SpriteAtlas, SpriteRect};
