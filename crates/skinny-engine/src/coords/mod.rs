//! Coordinate and geometry types shared across renderers and nodes.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Angles handed in by controls are in degrees, counter-clockwise from
//! 3 o'clock (math orientation), and get flipped to +Y down by renderers.

mod fuzzy;
mod rect;
mod vec2;
mod viewport;

pub use fuzzy::{fuzzy_eq, fuzzy_is_null};
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
