use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::record::{Count, DataQualityWarning, Record};
use crate::core::selection::AxisField;
use crate::error::{DashboardError, DashboardResult};

pub const MAJOR_COLUMN: &str = "Major";
pub const MAJOR_CATEGORY_COLUMN: &str = "Major_category";
pub const TOTAL_COLUMN: &str = "Total";
pub const WOMEN_COLUMN: &str = "Women";
pub const MEN_COLUMN: &str = "Men";

const REQUIRED_COLUMNS: [&str; 5] = [
    MAJOR_COLUMN,
    MAJOR_CATEGORY_COLUMN,
    TOTAL_COLUMN,
    WOMEN_COLUMN,
    MEN_COLUMN,
];

/// Display normalization applied to the `Major` column at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CapitalizationMode {
    /// Keep the source text untouched.
    Preserve,
    /// Upper-case the first letter, leave the rest unchanged.
    #[default]
    FirstLetter,
    /// Upper-case the first letter and lower-case the rest.
    Sentence,
}

impl CapitalizationMode {
    #[must_use]
    pub fn apply(self, value: &str) -> String {
        let mut chars = value.chars();
        let Some(first) = chars.next() else {
            return String::new();
        };
        match self {
            Self::Preserve => value.to_owned(),
            Self::FirstLetter => first.to_uppercase().chain(chars).collect(),
            Self::Sentence => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
        }
    }
}

/// Columns that can feed filter option lists and row filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoricalColumn {
    Major,
    MajorCategory,
}

impl CategoricalColumn {
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Major => MAJOR_COLUMN,
            Self::MajorCategory => MAJOR_CATEGORY_COLUMN,
        }
    }

    #[must_use]
    pub fn value_of(self, record: &Record) -> &str {
        match self {
            Self::Major => &record.major,
            Self::MajorCategory => &record.major_category,
        }
    }
}

impl FromStr for CategoricalColumn {
    type Err = DashboardError;

    fn from_str(value: &str) -> DashboardResult<Self> {
        match value {
            "major" | "Major" => Ok(Self::Major),
            "majorCategory" | "major_category" | "Major_category" => Ok(Self::MajorCategory),
            _ => Err(DashboardError::InvalidColumn {
                column: value.to_owned(),
            }),
        }
    }
}

impl From<AxisField> for CategoricalColumn {
    fn from(field: AxisField) -> Self {
        match field {
            AxisField::Major => Self::Major,
            AxisField::MajorCategory => Self::MajorCategory,
        }
    }
}

/// Immutable, load-once table of majors.
///
/// The sorted distinct indices are built once at construction and never
/// recomputed per query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    records: Vec<Record>,
    majors: BTreeSet<String>,
    categories: BTreeSet<String>,
}

impl Dataset {
    /// Loads the dataset from a delimited text file.
    pub fn load(path: impl AsRef<Path>, capitalization: CapitalizationMode) -> DashboardResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), ?capitalization, "loading dataset");
        let file = File::open(path).map_err(|source| DashboardError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, capitalization)
    }

    /// Loads the dataset from any reader yielding comma-delimited UTF-8 text with a header row.
    ///
    /// Non-numeric or missing count cells do not fail the load; they are kept
    /// as [`Count::Malformed`] and surface as warnings when a query touches them.
    pub fn from_reader<R: Read>(
        reader: R,
        capitalization: CapitalizationMode,
    ) -> DashboardResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|header| header == column)
                .ok_or_else(|| DashboardError::MissingColumn {
                    column: column.to_owned(),
                })?;
        }
        let [major_at, category_at, total_at, women_at, men_at] = positions;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let field = |index: usize| row.get(index).unwrap_or_default();
            let record = Record {
                major: capitalization.apply(field(major_at).trim()),
                major_category: field(category_at).trim().to_owned(),
                total: Count::parse(field(total_at)),
                women: Count::parse(field(women_at)),
                men: Count::parse(field(men_at)),
            };
            trace!(major = %record.major, category = %record.major_category, "parsed row");
            records.push(record);
        }

        let dataset = Self::from_records(records);
        debug!(
            rows = dataset.len(),
            categories = dataset.categories.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Builds a dataset from already-normalized records.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        let majors = records.iter().map(|r| r.major.clone()).collect();
        let categories = records.iter().map(|r| r.major_category.clone()).collect();
        Self {
            records,
            majors,
            categories,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct values of a categorical column.
    #[must_use]
    pub fn distinct(&self, column: CategoricalColumn) -> &BTreeSet<String> {
        match column {
            CategoricalColumn::Major => &self.majors,
            CategoricalColumn::MajorCategory => &self.categories,
        }
    }

    /// Sorted distinct values of the column named `column_name`.
    ///
    /// Fails with [`DashboardError::InvalidColumn`] for non-categorical columns.
    pub fn distinct_values(&self, column_name: &str) -> DashboardResult<&BTreeSet<String>> {
        let column = column_name.parse::<CategoricalColumn>()?;
        Ok(self.distinct(column))
    }

    /// Rows whose `column` equals `value`, in original order, paired with their row index.
    pub fn rows_matching<'a, 'v>(
        &'a self,
        column: CategoricalColumn,
        value: &'v str,
    ) -> impl Iterator<Item = (usize, &'a Record)> + use<'a, 'v> {
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, record)| column.value_of(record) == value)
    }

    /// Rows whose column named `column_name` equals `value`, in original order.
    pub fn rows_where(&self, column_name: &str, value: &str) -> DashboardResult<Vec<&Record>> {
        let column = column_name.parse::<CategoricalColumn>()?;
        Ok(self
            .rows_matching(column, value)
            .map(|(_, record)| record)
            .collect())
    }

    /// Checks every row and returns all data-quality findings.
    #[must_use]
    pub fn quality_report(&self) -> Vec<DataQualityWarning> {
        let warnings = collect_warnings(self.records.iter().enumerate());
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "dataset has data-quality findings");
        }
        warnings
    }
}

/// Inspects the touched rows and logs each finding.
pub(crate) fn collect_warnings<'a>(
    rows: impl IntoIterator<Item = (usize, &'a Record)>,
) -> Vec<DataQualityWarning> {
    let mut warnings = Vec::new();
    for (index, record) in rows {
        for warning in record.quality_warnings(index) {
            warn!(row = warning.row, major = %warning.major, "{warning}");
            warnings.push(warning);
        }
    }
    warnings
}
