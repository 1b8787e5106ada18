//! Headless demo: tessellates a handful of controls and renders them into an
//! offscreen texture.

mod scene;

use anyhow::{Context, Result};
use skinny_engine::config;
use skinny_engine::coords::Viewport;
use skinny_engine::logging::{init_logging, LoggingConfig};
use skinny_engine::render::{ColorRampCache, ContextId, FillRenderer, RenderCtx, RenderTarget};

const WIDTH: u32 = 480;
const HEIGHT: u32 = 320;
const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    pollster::block_on(run())
}

async fn run() -> Result<()> {
    let hints = config::render_hints();
    log::info!("render hints: {hints:?}");

    let mut scene = scene::Scene::new();
    for (name, update) in scene.build() {
        log::info!(
            "{name}: fill rebuilt {}, border rebuilt {}",
            update.fill.geometry_rebuilt,
            update.border.geometry_rebuilt
        );
    }
    for (name, part) in scene.parts() {
        if !part.is_empty() {
            log::info!(
                "{name}: {:?}, {} lines ({:?})",
                part.mode(),
                part.geometry().line_count(),
                part.geometry().layout()
            );
        }
    }

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .context("failed to find a suitable GPU adapter")?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("skinny-studio device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")?;

    let target_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("skinny-studio target"),
        size: wgpu::Extent3d { width: WIDTH, height: HEIGHT, depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = target_texture.create_view(&wgpu::TextureViewDescriptor::default());

    let context = ContextId::next();
    let ctx = RenderCtx::new(context, &device, &queue, FORMAT, Viewport::new(WIDTH as f32, HEIGHT as f32));

    let mut ramps = ColorRampCache::with_hints(&hints);
    let mut renderer = FillRenderer::new();

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("skinny-studio encoder"),
    });

    clear(&mut encoder, &view);

    let parts: Vec<_> = scene.parts().into_iter().map(|(_, p)| p).collect();
    let mut target = RenderTarget::new(&mut encoder, &view);
    renderer.render(&ctx, &mut target, &mut ramps, &parts);

    queue.submit(Some(encoder.finish()));
    log::info!("frame submitted, {} color ramp(s) cached", ramps.len());

    // Context teardown.
    let evicted = ramps.evict_for(context);
    anyhow::ensure!(ramps.is_empty(), "ramps of another context survived teardown");
    log::info!("released {evicted} color ramp(s)");

    Ok(())
}

fn clear(encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
    let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("skinny-studio clear"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color { r: 0.93, g: 0.93, b: 0.95, a: 1.0 }),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });
}
