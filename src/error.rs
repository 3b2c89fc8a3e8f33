use std::path::PathBuf;

use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dataset source `{path}` is unreadable: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset source is not valid delimited text: {0}")]
    MalformedSource(#[from] csv::Error),

    #[error("dataset source is missing required column `{column}`")]
    MissingColumn { column: String },

    #[error("column `{column}` is not a categorical column")]
    InvalidColumn { column: String },

    #[error("invalid value `{value}` for selection `{field}`")]
    InvalidSelection { field: &'static str, value: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl DashboardError {
    /// Returns `true` for failures that prevent the dataset from loading at all.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::SourceUnreadable { .. } | Self::MalformedSource(_) | Self::MissingColumn { .. }
        )
    }
}
