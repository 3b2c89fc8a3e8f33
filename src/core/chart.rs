use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::aggregate::accumulate;
use crate::core::dataset::{CategoricalColumn, Dataset, collect_warnings};
use crate::core::record::{CountColumn, DataQualityWarning, Record};
use crate::core::selection::{AxisField, SeriesField, SortOrder};
use crate::error::DashboardResult;

/// Stable display identity of a bar series.
///
/// The same gender always carries the same name whether it is drawn alone or
/// stacked, so toggling the series selection never relabels an unchanged series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesName {
    Men,
    Women,
}

impl SeriesName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
        }
    }

    #[must_use]
    pub const fn column(self) -> CountColumn {
        match self {
            Self::Men => CountColumn::Men,
            Self::Women => CountColumn::Women,
        }
    }
}

impl fmt::Display for SeriesName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named numeric sequence aligned index-by-index to [`ChartSpec::axis_labels`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub name: SeriesName,
    pub values: Vec<i64>,
}

impl Series {
    /// `(axis label, value)` pairs for this series.
    pub fn points<'a>(
        &'a self,
        axis_labels: &'a [String],
    ) -> impl Iterator<Item = (&'a str, i64)> + 'a {
        axis_labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Summed series value for one distinct axis label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisTotal {
    pub label: String,
    pub total: i64,
}

/// Renderable bar chart description.
///
/// `axis_labels` keeps one position per dataset row in row order. The ordering
/// policy is carried as a hint; [`ChartSpec::ordered_axis`] resolves it the way a
/// category-axis renderer does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub axis_field: AxisField,
    pub series_field: SeriesField,
    pub axis_labels: Vec<String>,
    pub series: SmallVec<[Series; 2]>,
    pub stacked: bool,
    pub sort_order: SortOrder,
    /// Distinct axis labels in first-appearance order with their summed series values.
    pub axis_totals: Vec<AxisTotal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DataQualityWarning>,
}

impl ChartSpec {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axis_labels.is_empty()
    }

    #[must_use]
    pub fn series_named(&self, name: SeriesName) -> Option<&Series> {
        self.series.iter().find(|series| series.name == name)
    }

    /// Per-series sums for every axis position carrying `label`.
    #[must_use]
    pub fn segments(&self, label: &str) -> SmallVec<[(SeriesName, i64); 2]> {
        self.series
            .iter()
            .map(|series| {
                let sum = series
                    .points(&self.axis_labels)
                    .filter(|(axis_label, _)| *axis_label == label)
                    .fold(0i64, |sum, (_, value)| sum.saturating_add(value));
                (series.name, sum)
            })
            .collect()
    }

    /// Distinct axis ticks in the order the policy asks for.
    ///
    /// Ties on the total fall back to lexicographic label order.
    #[must_use]
    pub fn ordered_axis(&self) -> Vec<&AxisTotal> {
        let mut ticks: Vec<&AxisTotal> = self.axis_totals.iter().collect();
        match self.sort_order {
            SortOrder::CategoryAscending => ticks.sort_by(|a, b| a.label.cmp(&b.label)),
            SortOrder::TotalAscending => ticks.sort_by(|a, b| by_total(a, b, false)),
            SortOrder::TotalDescending => ticks.sort_by(|a, b| by_total(a, b, true)),
        }
        ticks
    }
}

fn by_total(a: &AxisTotal, b: &AxisTotal, descending: bool) -> Ordering {
    let ord = if descending {
        b.total.cmp(&a.total)
    } else {
        a.total.cmp(&b.total)
    };
    ord.then_with(|| a.label.cmp(&b.label))
}

const STACKED_SERIES: [SeriesName; 2] = [SeriesName::Men, SeriesName::Women];

/// Builds the bar chart over the whole dataset.
///
/// The aggregate card's category filter is deliberately not applied here.
#[must_use]
pub fn build_chart(
    dataset: &Dataset,
    axis_field: AxisField,
    series_field: SeriesField,
    sort_order: SortOrder,
) -> ChartSpec {
    let records = dataset.records();
    let axis_column = CategoricalColumn::from(axis_field);
    let axis_labels: Vec<String> = records
        .iter()
        .map(|record| axis_column.value_of(record).to_owned())
        .collect();

    let names: &[SeriesName] = match series_field {
        SeriesField::Total => &STACKED_SERIES,
        SeriesField::Women => &[SeriesName::Women],
        SeriesField::Men => &[SeriesName::Men],
    };
    let series: SmallVec<[Series; 2]> = names
        .iter()
        .map(|&name| Series {
            name,
            values: column_values(records, name.column()),
        })
        .collect();

    let mut totals: IndexMap<&str, i64> = IndexMap::new();
    let mut saturated = false;
    for (index, label) in axis_labels.iter().enumerate() {
        let total = totals.entry(label.as_str()).or_insert(0);
        for s in &series {
            saturated |= !accumulate(total, s.values[index]);
        }
    }
    if saturated {
        warn!(%axis_field, %series_field, "axis totals saturated at the i64 range");
    }
    let axis_totals = totals
        .into_iter()
        .map(|(label, total)| AxisTotal {
            label: label.to_owned(),
            total,
        })
        .collect();

    let stacked = series.len() > 1;
    debug!(
        %axis_field,
        %series_field,
        %sort_order,
        positions = axis_labels.len(),
        series = series.len(),
        stacked,
        "chart built"
    );

    ChartSpec {
        axis_field,
        series_field,
        axis_labels,
        series,
        stacked,
        sort_order,
        axis_totals,
        warnings: collect_warnings(records.iter().enumerate()),
    }
}

/// [`build_chart`] driven by raw selection values from the presentation layer.
///
/// Unknown values fail with [`crate::DashboardError::InvalidSelection`].
pub fn build_chart_from_names(
    dataset: &Dataset,
    axis_field: &str,
    series_field: &str,
    sort_order: &str,
) -> DashboardResult<ChartSpec> {
    Ok(build_chart(
        dataset,
        axis_field.parse()?,
        series_field.parse()?,
        sort_order.parse()?,
    ))
}

fn column_values(records: &[Record], column: CountColumn) -> Vec<i64> {
    records
        .iter()
        .map(|record| record.count(column).value())
        .collect()
}
