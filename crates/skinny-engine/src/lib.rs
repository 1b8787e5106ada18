//! Skinny engine crate.
//!
//! Turns box and arc shape descriptions plus gradients into triangle-strip
//! vertex buffers and shader materials for skinnable controls.

pub mod coords;
pub mod paint;
pub mod geometry;
pub mod render;

pub mod config;
pub mod logging;

mod hash;
