use std::fmt::Write as _;

use crate::core::{AggregateResult, ChartSpec};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{DashboardFrame, Renderer, series_style};

const DEFAULT_BAR_WIDTH: usize = 40;

/// Plain-text renderer: aggregate cards followed by a horizontal bar chart.
///
/// Axis ticks follow the chart's ordering policy; stacked series are drawn as
/// consecutive glyph runs inside one bar.
#[derive(Debug)]
pub struct TextRenderer {
    bar_width: usize,
    output: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_WIDTH)
    }
}

impl TextRenderer {
    #[must_use]
    pub fn new(bar_width: usize) -> Self {
        Self {
            bar_width: bar_width.max(1),
            output: String::new(),
        }
    }

    /// Text produced by the most recent render.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    fn write_frame(&mut self, frame: &DashboardFrame) -> std::fmt::Result {
        if let Some(aggregate) = &frame.aggregate {
            self.write_cards(&frame.selection.category_filter, aggregate)?;
        }
        if let Some(chart) = &frame.chart {
            if frame.aggregate.is_some() {
                writeln!(self.output)?;
            }
            self.write_chart(chart)?;
        }
        Ok(())
    }

    fn write_cards(&mut self, category: &str, aggregate: &AggregateResult) -> std::fmt::Result {
        writeln!(self.output, "MAJOR CATEGORY: {category}")?;
        write!(
            self.output,
            "TOTAL {} | WOMEN {} | MEN {}",
            aggregate.total, aggregate.women, aggregate.men
        )?;
        if let Some(share) = aggregate.share_women() {
            write!(self.output, " | SHARE WOMEN {:.1}%", share * 100.0)?;
        }
        writeln!(self.output)?;
        for warning in &aggregate.warnings {
            writeln!(self.output, "  warning: {warning}")?;
        }
        Ok(())
    }

    fn write_chart(&mut self, chart: &ChartSpec) -> std::fmt::Result {
        writeln!(
            self.output,
            "CHART: {} by {} ({}, {})",
            chart.series_field,
            chart.axis_field,
            if chart.stacked { "stacked" } else { "single" },
            chart.sort_order
        )?;
        let legend: Vec<String> = chart
            .series
            .iter()
            .map(|series| format!("{} {}", series_style(series.name).glyph, series.name))
            .collect();
        writeln!(self.output, "LEGEND: {}", legend.join("  "))?;

        let ticks = chart.ordered_axis();
        if ticks.is_empty() {
            return writeln!(self.output, "(no data)");
        }

        let label_width = ticks
            .iter()
            .map(|tick| tick.label.chars().count())
            .max()
            .unwrap_or(0);
        let bars: Vec<_> = ticks
            .iter()
            .map(|tick| chart.segments(&tick.label))
            .collect();
        let scale_max = bars
            .iter()
            .map(|segments| {
                segments
                    .iter()
                    .fold(0i64, |sum, &(_, value)| sum.saturating_add(value.max(0)))
            })
            .max()
            .unwrap_or(0)
            .max(1);

        for (tick, segments) in ticks.iter().zip(bars) {
            let mut bar = String::new();
            let mut remaining = self.bar_width;
            for (name, value) in segments {
                let cells = scaled(value, scale_max, self.bar_width).min(remaining);
                remaining -= cells;
                bar.extend(std::iter::repeat_n(series_style(name).glyph, cells));
            }
            writeln!(
                self.output,
                "{:<label_width$} |{bar} {}",
                tick.label, tick.total
            )?;
        }
        Ok(())
    }
}

/// Cells for `value` on a bar `width` cells wide whose full length is `max`.
fn scaled(value: i64, max: i64, width: usize) -> usize {
    if value <= 0 {
        return 0;
    }
    let cells = (value as f64 / max as f64 * width as f64).round() as usize;
    cells.min(width)
}

impl Renderer for TextRenderer {
    fn render(&mut self, frame: &DashboardFrame) -> DashboardResult<()> {
        frame.validate()?;
        self.output.clear();

        self.write_frame(frame)
            .map_err(|e| DashboardError::InvalidFrame(format!("failed to format frame: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        AxisField, Dataset, Record, SelectionState, SeriesField, SortOrder, build_chart,
    };

    #[test]
    fn scaled_clamps_negative_and_rounds() {
        assert_eq!(scaled(-5, 10, 40), 0);
        assert_eq!(scaled(5, 10, 40), 20);
        assert_eq!(scaled(10, 10, 40), 40);
        assert_eq!(scaled(30, 10, 40), 40);
    }

    #[test]
    fn negative_segment_does_not_stretch_the_bar() {
        let dataset = Dataset::from_records(vec![
            Record::new("Physics", "Physical Sciences", 5, 10, -5),
            Record::new("Geology", "Physical Sciences", 4, 2, 2),
        ]);
        let chart = build_chart(
            &dataset,
            AxisField::Major,
            SeriesField::Total,
            SortOrder::CategoryAscending,
        );
        let frame =
            DashboardFrame::new(SelectionState::new("Physical Sciences"), Vec::new())
                .with_chart(chart);

        let mut renderer = TextRenderer::new(10);
        renderer.render(&frame).expect("render");

        let physics = renderer
            .output()
            .lines()
            .find(|line| line.starts_with("Physics"))
            .expect("physics bar");
        assert!(physics.ends_with("|========== 5"));
        for line in renderer.output().lines().filter(|l| l.contains(" |")) {
            let bar = line.split(" |").nth(1).unwrap_or_default();
            let cells = bar.chars().take_while(|c| *c == '#' || *c == '=').count();
            assert!(cells <= 10, "bar too long: {line}");
        }
    }
}
