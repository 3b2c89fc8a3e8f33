use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// Categorical column used as the chart's category axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AxisField {
    #[default]
    Major,
    MajorCategory,
}

impl AxisField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::MajorCategory => "majorCategory",
        }
    }
}

impl FromStr for AxisField {
    type Err = DashboardError;

    fn from_str(value: &str) -> DashboardResult<Self> {
        match value {
            "major" | "Major" => Ok(Self::Major),
            "majorCategory" | "major_category" | "Major_category" => Ok(Self::MajorCategory),
            _ => Err(invalid("axisField", value)),
        }
    }
}

/// Which count(s) become bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SeriesField {
    /// Men and women stacked per axis position.
    #[default]
    Total,
    Women,
    Men,
}

impl SeriesField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Women => "women",
            Self::Men => "men",
        }
    }
}

impl FromStr for SeriesField {
    type Err = DashboardError;

    fn from_str(value: &str) -> DashboardResult<Self> {
        match value {
            "total" | "Total" => Ok(Self::Total),
            "women" | "Women" => Ok(Self::Women),
            "men" | "Men" => Ok(Self::Men),
            _ => Err(invalid("seriesField", value)),
        }
    }
}

/// Axis ordering policy handed to the renderer as a display hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    CategoryAscending,
    TotalAscending,
    TotalDescending,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CategoryAscending => "categoryAscending",
            Self::TotalAscending => "totalAscending",
            Self::TotalDescending => "totalDescending",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DashboardError;

    fn from_str(value: &str) -> DashboardResult<Self> {
        match value {
            "categoryAscending" | "category ascending" => Ok(Self::CategoryAscending),
            "totalAscending" | "total ascending" => Ok(Self::TotalAscending),
            "totalDescending" | "total descending" => Ok(Self::TotalDescending),
            _ => Err(invalid("sortOrder", value)),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(AxisField, SeriesField, SortOrder);

/// Selection state owned by the presentation layer and passed in on every interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub category_filter: String,
    pub axis_field: AxisField,
    pub series_field: SeriesField,
    pub sort_order: SortOrder,
}

impl SelectionState {
    #[must_use]
    pub fn new(category_filter: impl Into<String>) -> Self {
        Self {
            category_filter: category_filter.into(),
            axis_field: AxisField::default(),
            series_field: SeriesField::default(),
            sort_order: SortOrder::default(),
        }
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
}

fn invalid(field: &'static str, value: &str) -> DashboardError {
    DashboardError::InvalidSelection {
        field,
        value: value.to_owned(),
    }
}
