pub mod aggregate;
pub mod chart;
pub mod dataset;
pub mod record;
pub mod selection;

pub use aggregate::{AggregateCache, AggregateResult, aggregate};
pub use chart::{AxisTotal, ChartSpec, Series, SeriesName, build_chart, build_chart_from_names};
pub use dataset::{CapitalizationMode, CategoricalColumn, Dataset};
pub use record::{Count, CountColumn, DataQualityIssue, DataQualityWarning, Record};
pub use selection::{AxisField, SelectionState, SeriesField, SortOrder};
