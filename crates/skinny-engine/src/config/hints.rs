use anyhow::{bail, Context, Result};
use state::InitCell;

pub const PREFER_COLORED_GEOMETRY_ENV: &str = "SKINNY_PREFER_COLORED_GEOMETRY";
pub const RAMP_CACHE_CAPACITY_ENV: &str = "SKINNY_RAMP_CACHE_CAPACITY";

/// Knobs that trade rendering cost against flexibility.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderHints {
    /// Bake gradients into vertex colors whenever a renderer can express
    /// them; otherwise every non-monochrome gradient goes to a shader.
    pub prefer_colored_geometry: bool,

    /// Upper bound of cached color ramps across all contexts.
    pub ramp_cache_capacity: usize,
}

impl Default for RenderHints {
    fn default() -> Self {
        Self { prefer_colored_geometry: true, ramp_cache_capacity: 64 }
    }
}

impl RenderHints {
    /// Resolves hints from a key lookup. Unset keys keep their default;
    /// malformed values are logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut hints = Self::default();

        if let Some(raw) = lookup(PREFER_COLORED_GEOMETRY_ENV) {
            match parse_bool(&raw) {
                Ok(v) => hints.prefer_colored_geometry = v,
                Err(e) => log::warn!("{PREFER_COLORED_GEOMETRY_ENV}: {e:#}"),
            }
        }

        if let Some(raw) = lookup(RAMP_CACHE_CAPACITY_ENV) {
            match parse_capacity(&raw) {
                Ok(v) => hints.ramp_cache_capacity = v,
                Err(e) => log::warn!("{RAMP_CACHE_CAPACITY_ENV}: {e:#}"),
            }
        }

        hints
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// Accepts `1/0`, `true/false`, `yes/no`, `on/off`, ignoring case and
/// surrounding whitespace.
pub fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}

fn parse_capacity(raw: &str) -> Result<usize> {
    let v: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("expected a positive integer, got {raw:?}"))?;
    anyhow::ensure!(v > 0, "capacity must be positive");
    Ok(v)
}

static HINTS: InitCell<RenderHints> = InitCell::new();

/// Process-wide hints, resolved from the environment on first use.
pub fn render_hints() -> RenderHints {
    *HINTS.get_or_init(|| {
        let hints = RenderHints::from_env();
        log::debug!("render hints: {hints:?}");
        hints
    })
}

/// Installs explicit hints. Returns `false` when hints were already set or
/// resolved; the installed value is then left untouched.
pub fn install_render_hints(hints: RenderHints) -> bool {
    HINTS.set(hints)
}
