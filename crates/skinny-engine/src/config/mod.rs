//! Process-level rendering configuration.

mod hints;

pub use hints::{
    install_render_hints, parse_bool, render_hints, RenderHints, PREFER_COLORED_GEOMETRY_ENV,
    RAMP_CACHE_CAPACITY_ENV,
};
