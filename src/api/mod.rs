mod config;
mod json_contract;
mod session;

pub use config::DashboardConfig;
pub use json_contract::{
    CHART_SPEC_JSON_SCHEMA_V1, ChartSpecJsonContractV1, DASHBOARD_FRAME_JSON_SCHEMA_V1,
    DashboardFrameJsonContractV1,
};
pub use session::{DashboardSession, OutputSlot, PendingComputation, SelectionChange, SlotOutput};
