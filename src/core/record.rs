use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::dataset::CategoricalColumn;

/// One numeric cell of the dataset.
///
/// Cells that fail to parse are kept as `Malformed` so loading never blocks on
/// them; they contribute zero to sums and are reported when a query touches them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Count {
    Parsed(i64),
    Malformed(String),
}

impl Count {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(value) => Self::Parsed(value),
            Err(_) => Self::Malformed(trimmed.to_owned()),
        }
    }

    /// Value used in sums and chart series.
    #[must_use]
    pub fn value(&self) -> i64 {
        match self {
            Self::Parsed(value) => *value,
            Self::Malformed(_) => 0,
        }
    }

    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

impl From<i64> for Count {
    fn from(value: i64) -> Self {
        Self::Parsed(value)
    }
}

/// Numeric column of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CountColumn {
    Total,
    Women,
    Men,
}

impl CountColumn {
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Total => "Total",
            Self::Women => "Women",
            Self::Men => "Men",
        }
    }
}

/// One row of the dataset: a major, its owning category and three head counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub major: String,
    pub major_category: String,
    pub total: Count,
    pub women: Count,
    pub men: Count,
}

impl Record {
    #[must_use]
    pub fn new(
        major: impl Into<String>,
        major_category: impl Into<String>,
        total: i64,
        women: i64,
        men: i64,
    ) -> Self {
        Self {
            major: major.into(),
            major_category: major_category.into(),
            total: Count::Parsed(total),
            women: Count::Parsed(women),
            men: Count::Parsed(men),
        }
    }

    #[must_use]
    pub fn count(&self, column: CountColumn) -> &Count {
        match column {
            CountColumn::Total => &self.total,
            CountColumn::Women => &self.women,
            CountColumn::Men => &self.men,
        }
    }

    /// Checks the row against the count invariants.
    ///
    /// `row` is the zero-based position in the dataset and is carried into each
    /// warning so operators can trace it back to the source file.
    #[must_use]
    pub fn quality_warnings(&self, row: usize) -> Vec<DataQualityWarning> {
        let mut warnings = Vec::new();
        for column in [CategoricalColumn::Major, CategoricalColumn::MajorCategory] {
            if column.value_of(self).trim().is_empty() {
                warnings.push(self.warning(row, DataQualityIssue::EmptyLabel { column }));
            }
        }

        let columns = [CountColumn::Total, CountColumn::Women, CountColumn::Men];

        for column in columns {
            match self.count(column) {
                Count::Malformed(raw) => warnings.push(self.warning(
                    row,
                    DataQualityIssue::NonNumeric {
                        column,
                        raw: raw.clone(),
                    },
                )),
                Count::Parsed(value) if *value < 0 => warnings.push(self.warning(
                    row,
                    DataQualityIssue::NegativeCount {
                        column,
                        value: *value,
                    },
                )),
                Count::Parsed(_) => {}
            }
        }

        let all_parsed = columns.iter().all(|c| !self.count(*c).is_malformed());
        let parts = self.women.value().checked_add(self.men.value());
        if all_parsed && parts != Some(self.total.value()) {
            warnings.push(self.warning(
                row,
                DataQualityIssue::PartitionMismatch {
                    total: self.total.value(),
                    women: self.women.value(),
                    men: self.men.value(),
                },
            ));
        }

        warnings
    }

    fn warning(&self, row: usize, issue: DataQualityIssue) -> DataQualityWarning {
        DataQualityWarning {
            row,
            major: self.major.clone(),
            issue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityIssue {
    /// `women + men != total`.
    PartitionMismatch { total: i64, women: i64, men: i64 },
    NegativeCount { column: CountColumn, value: i64 },
    NonNumeric { column: CountColumn, raw: String },
    EmptyLabel { column: CategoricalColumn },
    /// Adding this row pushed a running sum past the `i64` range; the sum saturates.
    SumOverflow { column: CountColumn },
}

/// Non-fatal finding about one row. The row still takes part in sums and charts as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityWarning {
    pub row: usize,
    pub major: String,
    pub issue: DataQualityIssue,
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.issue {
            DataQualityIssue::PartitionMismatch { total, women, men } => write!(
                f,
                "row {} ({}): women {women} + men {men} != total {total}",
                self.row, self.major
            ),
            DataQualityIssue::NegativeCount { column, value } => write!(
                f,
                "row {} ({}): negative {} count {value}",
                self.row,
                self.major,
                column.header()
            ),
            DataQualityIssue::NonNumeric { column, raw } => write!(
                f,
                "row {} ({}): non-numeric {} value `{raw}`",
                self.row,
                self.major,
                column.header()
            ),
            DataQualityIssue::EmptyLabel { column } => write!(
                f,
                "row {} ({}): empty {} value",
                self.row,
                self.major,
                column.header()
            ),
            DataQualityIssue::SumOverflow { column } => write!(
                f,
                "row {} ({}): {} sum exceeds the representable range",
                self.row,
                self.major,
                column.header()
            ),
        }
    }
}
