use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AxisField, CapitalizationMode, SelectionState, SeriesField, SortOrder};
use crate::error::{DashboardError, DashboardResult};

/// Public dashboard bootstrap configuration.
///
/// Serializable so hosts can persist and load their setup without inventing an
/// ad-hoc format. Missing fields fall back to the stock dashboard defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default)]
    pub axis_field: AxisField,
    #[serde(default)]
    pub series_field: SeriesField,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default)]
    pub capitalization: CapitalizationMode,
    #[serde(default)]
    pub memoize_aggregates: bool,
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            default_category: default_category(),
            axis_field: AxisField::default(),
            series_field: SeriesField::default(),
            sort_order: SortOrder::default(),
            capitalization: CapitalizationMode::default(),
            memoize_aggregates: false,
            bar_width: default_bar_width(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    #[must_use]
    pub fn with_axis_field(mut self, axis_field: AxisField) -> Self {
        self.axis_field = axis_field;
        self
    }

    #[must_use]
    pub fn with_series_field(mut self, series_field: SeriesField) -> Self {
        self.series_field = series_field;
        self
    }

    #[must_use]
    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    #[must_use]
    pub fn with_capitalization(mut self, capitalization: CapitalizationMode) -> Self {
        self.capitalization = capitalization;
        self
    }

    #[must_use]
    pub fn with_memoized_aggregates(mut self, enabled: bool) -> Self {
        self.memoize_aggregates = enabled;
        self
    }

    #[must_use]
    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width;
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.dataset_path.as_os_str().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "dataset_path must not be empty".to_owned(),
            ));
        }
        if self.default_category.trim().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "default_category must not be empty".to_owned(),
            ));
        }
        if self.bar_width == 0 {
            return Err(DashboardError::InvalidConfig(
                "bar_width must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Selection the dashboard starts from before any user interaction.
    #[must_use]
    pub fn initial_selection(&self) -> SelectionState {
        SelectionState::new(self.default_category.clone())
            .with_axis_field(self.axis_field)
            .with_series_field(self.series_field)
            .with_sort_order(self.sort_order)
    }

    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DashboardError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading dashboard config");
        let input = fs::read_to_string(path).map_err(|e| {
            DashboardError::InvalidConfig(format!("failed to read `{}`: {e}", path.display()))
        })?;
        Self::from_json_str(&input)
    }

    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashboardError::Serialization(format!("failed to serialize config: {e}")))
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("women-stem.csv")
}

fn default_category() -> String {
    "Engineering".to_owned()
}

fn default_bar_width() -> usize {
    40
}
