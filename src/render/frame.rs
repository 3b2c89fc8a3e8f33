use serde::{Deserialize, Serialize};

use crate::core::{AggregateResult, ChartSpec, SelectionState};
use crate::error::{DashboardError, DashboardResult};

/// Everything the presentation layer needs for one repaint.
///
/// Either output slot may be empty when nothing has been computed for it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFrame {
    pub selection: SelectionState,
    pub category_options: Vec<String>,
    pub aggregate: Option<AggregateResult>,
    pub chart: Option<ChartSpec>,
}

impl DashboardFrame {
    #[must_use]
    pub fn new(selection: SelectionState, category_options: Vec<String>) -> Self {
        Self {
            selection,
            category_options,
            aggregate: None,
            chart: None,
        }
    }

    #[must_use]
    pub fn with_aggregate(mut self, aggregate: AggregateResult) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    #[must_use]
    pub fn with_chart(mut self, chart: ChartSpec) -> Self {
        self.chart = Some(chart);
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        let Some(chart) = &self.chart else {
            return Ok(());
        };
        for series in &chart.series {
            if series.values.len() != chart.axis_labels.len() {
                return Err(DashboardError::InvalidFrame(format!(
                    "series `{}` has {} values for {} axis positions",
                    series.name,
                    series.values.len(),
                    chart.axis_labels.len()
                )));
            }
        }
        if chart.stacked != (chart.series.len() > 1) {
            return Err(DashboardError::InvalidFrame(
                "stacking flag does not match series count".to_owned(),
            ));
        }
        Ok(())
    }
}
