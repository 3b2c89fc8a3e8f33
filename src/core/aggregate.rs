use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::dataset::{CategoricalColumn, Dataset, collect_warnings};
use crate::core::record::{CountColumn, DataQualityIssue, DataQualityWarning};

/// Total/women/men sums for one category filter.
///
/// `warnings` lists every data-quality finding among the contributing rows, so
/// any break of `women + men == total` can be traced back to the row that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total: i64,
    pub women: i64,
    pub men: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DataQualityWarning>,
}

impl AggregateResult {
    #[must_use]
    pub fn new(total: i64, women: i64, men: i64) -> Self {
        Self {
            total,
            women,
            men,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0 && self.women == 0 && self.men == 0
    }

    /// Fraction of women among the category's students; `None` when the total is not positive.
    #[must_use]
    pub fn share_women(&self) -> Option<f64> {
        (self.total > 0).then(|| self.women as f64 / self.total as f64)
    }
}

/// Sums `Total`, `Women` and `Men` over the rows whose `Major_category` equals `category_filter`.
///
/// An unknown category is a valid state and yields an all-zero result.
#[must_use]
pub fn aggregate(dataset: &Dataset, category_filter: &str) -> AggregateResult {
    let mut result = AggregateResult::default();
    let mut matched = 0usize;

    let rows: Vec<_> = dataset
        .rows_matching(CategoricalColumn::MajorCategory, category_filter)
        .collect();
    let mut overflows = Vec::new();
    for &(index, record) in &rows {
        for column in [CountColumn::Total, CountColumn::Women, CountColumn::Men] {
            let sum = match column {
                CountColumn::Total => &mut result.total,
                CountColumn::Women => &mut result.women,
                CountColumn::Men => &mut result.men,
            };
            if !accumulate(sum, record.count(column).value()) {
                overflows.push(DataQualityWarning {
                    row: index,
                    major: record.major.clone(),
                    issue: DataQualityIssue::SumOverflow { column },
                });
            }
        }
        matched += 1;
    }
    result.warnings = collect_warnings(rows);
    for warning in overflows {
        warn!(row = warning.row, major = %warning.major, "{warning}");
        result.warnings.push(warning);
    }

    if matched == 0 {
        trace!(category = category_filter, "category filter matched no rows");
    }
    debug!(
        category = category_filter,
        matched,
        total = result.total,
        women = result.women,
        men = result.men,
        "aggregate computed"
    );
    result
}

/// Adds `value` into `sum`, saturating at the `i64` bounds.
///
/// Returns `false` when the addition saturated.
pub(crate) fn accumulate(sum: &mut i64, value: i64) -> bool {
    match sum.checked_add(value) {
        Some(next) => {
            *sum = next;
            true
        }
        None => {
            *sum = sum.saturating_add(value);
            false
        }
    }
}

/// Memoizes [`aggregate`] per category filter.
///
/// Valid for exactly one dataset; the dataset never changes after load, so
/// entries never go stale.
#[derive(Debug, Clone, Default)]
pub struct AggregateCache {
    entries: IndexMap<String, AggregateResult>,
}

impl AggregateCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, category_filter: &str) -> Option<&AggregateResult> {
        self.entries.get(category_filter)
    }

    pub fn insert(&mut self, category_filter: impl Into<String>, result: AggregateResult) {
        self.entries.insert(category_filter.into(), result);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
