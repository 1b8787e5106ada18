//! 256x1 color ramp textures for the gradient shaders.
//!
//! A ramp is the color lookup of one stop list. The shaders compute the
//! gradient position per fragment and let the sampler apply the spread
//! mode, which maps onto the texture address mode.

use std::num::NonZeroUsize;

use lru::LruCache;
use rustc_hash::FxBuildHasher;

use crate::config::RenderHints;
use crate::paint::{self, GradientStop, SpreadMode};

use super::ContextId;

pub const RAMP_WIDTH: u32 = 256;

const STOPS_SEED: u64 = 0x72_61_6d_70;

/// Texture wrap mode matching a spread mode.
pub fn address_mode(spread: SpreadMode) -> wgpu::AddressMode {
    match spread {
        SpreadMode::Pad => wgpu::AddressMode::ClampToEdge,
        SpreadMode::Repeat => wgpu::AddressMode::Repeat,
        SpreadMode::Reflect => wgpu::AddressMode::MirrorRepeat,
    }
}

/// Cache key: the owning context, the stop list and the spread mode.
///
/// Stops are keyed by their 64-bit hash.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RampKey {
    pub context: ContextId,
    pub stops: u64,
    pub spread: SpreadMode,
}

impl RampKey {
    pub fn new(context: ContextId, stops: &[GradientStop], spread: SpreadMode) -> Self {
        Self { context, stops: paint::stops_hash(stops, STOPS_SEED), spread }
    }
}

#[derive(Debug)]
struct RampTexture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

/// CPU texels of one ramp plus its lazily created GPU texture.
#[derive(Debug)]
pub struct ColorRamp {
    texels: Vec<[u8; 4]>,
    address_mode: wgpu::AddressMode,
    gpu: Option<RampTexture>,
}

impl ColorRamp {
    /// Samples `stops` at `RAMP_WIDTH` evenly spaced positions, first texel
    /// at `0`, last texel at `1`. Texels are premultiplied.
    pub fn new(stops: &[GradientStop], spread: SpreadMode) -> Self {
        let last = (RAMP_WIDTH - 1) as f32;
        let texels = (0..RAMP_WIDTH)
            .map(|i| paint::color_at(stops, i as f32 / last).premultiplied_rgba8())
            .collect();

        Self { texels, address_mode: address_mode(spread), gpu: None }
    }

    #[inline]
    pub fn texels(&self) -> &[[u8; 4]] {
        &self.texels
    }

    #[inline]
    pub fn address_mode(&self) -> wgpu::AddressMode {
        self.address_mode
    }

    #[inline]
    pub fn is_uploaded(&self) -> bool {
        self.gpu.is_some()
    }

    /// Texture view and sampler, uploading the texels on first use.
    pub(crate) fn ensure_gpu(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> (&wgpu::TextureView, &wgpu::Sampler) {
        let texels = &self.texels;
        let address_mode = self.address_mode;
        let gpu = self.gpu.get_or_insert_with(|| upload(device, queue, texels, address_mode));
        (&gpu.view, &gpu.sampler)
    }
}

fn upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texels: &[[u8; 4]],
    address_mode: wgpu::AddressMode,
) -> RampTexture {
    let size = wgpu::Extent3d { width: RAMP_WIDTH, height: 1, depth_or_array_layers: 1 };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("skinny color ramp"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        bytemuck::cast_slice(texels),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * RAMP_WIDTH),
            rows_per_image: Some(1),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("skinny color ramp sampler"),
        address_mode_u: address_mode,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });

    RampTexture { _texture: texture, view, sampler }
}

/// Bounded cache of color ramps, shared by all nodes of a renderer.
///
/// Least recently used ramps are dropped once the capacity is reached;
/// [`ColorRampCache::evict_for`] drops every ramp of a context that is
/// going away.
pub struct ColorRampCache {
    ramps: LruCache<RampKey, ColorRamp, FxBuildHasher>,
}

impl Default for ColorRampCache {
    fn default() -> Self {
        Self::with_hints(&RenderHints::default())
    }
}

impl ColorRampCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self { ramps: LruCache::with_hasher(capacity, FxBuildHasher) }
    }

    pub fn with_hints(hints: &RenderHints) -> Self {
        Self::new(hints.ramp_cache_capacity)
    }

    /// The ramp for `stops`, created on a miss.
    pub fn ramp(&mut self, context: ContextId, stops: &[GradientStop], spread: SpreadMode) -> &mut ColorRamp {
        let key = RampKey::new(context, stops, spread);
        self.ramps.get_or_insert_mut(key, || {
            log::debug!("color ramp created: {key:?} ({} stops)", stops.len());
            ColorRamp::new(stops, spread)
        })
    }

    pub fn contains(&self, key: &RampKey) -> bool {
        self.ramps.contains(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ramps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ramps.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.ramps.cap().get()
    }

    /// Drops all ramps created for `context`; returns how many.
    pub fn evict_for(&mut self, context: ContextId) -> usize {
        let keys: Vec<RampKey> = self
            .ramps
            .iter()
            .map(|(k, _)| *k)
            .filter(|k| k.context == context)
            .collect();

        for key in &keys {
            self.ramps.pop(key);
        }

        if !keys.is_empty() {
            log::debug!("evicted {} color ramp(s) of {context:?}", keys.len());
        }
        keys.len()
    }

    pub fn clear(&mut self) {
        self.ramps.clear();
    }
}
