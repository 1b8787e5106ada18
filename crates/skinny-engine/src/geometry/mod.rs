//! CPU tessellation of boxes and arcs into line lists.
//!
//! Every renderer emits lines; consecutive lines form the rungs of a
//! triangle strip. A renderer first reports how many lines it is going to
//! emit so callers can size buffers up front, then fills them in one pass.

mod arc_iterator;
mod arc_renderer;
mod border_colors;
mod box_renderer;
mod gradient_cursor;
mod metrics;
mod rect_renderer;
mod rounded_renderer;
mod sweep;
mod vertex;

pub use arc_iterator::ArcIterator;
pub use arc_renderer::{ArcMode, ArcRenderer};
pub use border_colors::BoxBorderColors;
pub use box_renderer::BoxRenderer;
pub use gradient_cursor::GradientCursor;
pub use metrics::{ArcMetrics, BoxBorderMetrics, BoxGeometry, BoxShapeMetrics, CornerRadii, SizeMode};
pub use vertex::{ColoredLine, ColoredPoint2D, Geometry, Line, LineVertex, Point2D, VertexLayout};
