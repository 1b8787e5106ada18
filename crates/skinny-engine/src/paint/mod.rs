//! Paint model shared between renderers and nodes.
//!
//! Scope:
//! - color representation (straight alpha, several color specs)
//! - gradient stops and the stop-list operations
//! - gradients (stops + type + direction + spread)
//!
//! Premultiplication happens at the GPU boundary (vertex colors and color
//! ramps), never inside this module.

pub mod color;
mod convert;
pub mod gradient;
pub mod stop;

pub use color::{Color, ColorSpec};
pub use gradient::{
    ConicDirection, Gradient, GradientType, LinearDirection, RadialDirection, SpreadMode,
    StretchMode,
};
pub use stop::{
    build_stops, color_at, extracted_stops, from_pairs, interpolated_stops, is_gradient_valid,
    is_monochrome, is_visible, normalized_stops, replaced_stops, reverted_stops, stops_hash,
    to_pairs, GradientStop,
};
