use crate::error::DashboardResult;
use crate::render::{DashboardFrame, Renderer};

/// No-op renderer used by tests and headless sessions.
///
/// It still validates frame content so tests catch misaligned series before a
/// real presentation layer sees them.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_axis_len: usize,
    pub last_series_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &DashboardFrame) -> DashboardResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        if let Some(chart) = &frame.chart {
            self.last_axis_len = chart.axis_labels.len();
            self.last_series_count = chart.series.len();
        }
        Ok(())
    }
}
