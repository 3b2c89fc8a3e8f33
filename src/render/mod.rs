mod frame;
mod null_renderer;
mod primitives;
mod text_renderer;

pub use frame::DashboardFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, SeriesStyle, series_style};
pub use text_renderer::TextRenderer;

use crate::error::DashboardResult;

/// Contract implemented by any presentation layer.
///
/// Renderers receive a fully materialized `DashboardFrame` so widget code stays
/// isolated from dataset access and selection handling.
pub trait Renderer {
    fn render(&mut self, frame: &DashboardFrame) -> DashboardResult<()>;
}
