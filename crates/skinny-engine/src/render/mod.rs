//! Scene-facing layer: nodes that own geometry plus material, and the wgpu
//! renderer that draws them.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.
//! - Colors reaching the GPU are premultiplied.

mod arc_node;
mod box_node;
mod color_ramp;
mod ctx;
mod fill_node;
mod fill_renderer;
mod material;

pub use arc_node::ArcNode;
pub use box_node::{BoxNode, NodeUpdate};
pub use color_ramp::{address_mode, ColorRamp, ColorRampCache, RampKey, RAMP_WIDTH};
pub use ctx::{ContextId, RenderCtx, RenderTarget};
pub use fill_node::{FillMode, FillNode, NodeId, UpdateReport};
pub use fill_renderer::FillRenderer;
pub use material::{GradientMaterial, GradientParams, Material, MaterialType, MaterialUniform};
