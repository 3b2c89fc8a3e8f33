//! majors-dashboard: filter-to-chart pipeline over a table of academic majors.
//!
//! The dataset is loaded once and shared read-only. Two pure computations run
//! against it: category aggregates for the summary cards, and a bar chart
//! description sliced by axis column, gender series and ordering policy.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{DashboardConfig, DashboardSession};
pub use error::{DashboardError, DashboardResult};
