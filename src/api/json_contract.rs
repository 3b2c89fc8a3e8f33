use serde::{Deserialize, Serialize};

use crate::core::ChartSpec;
use crate::error::{DashboardError, DashboardResult};
use crate::render::{DashboardFrame, Renderer};

use super::DashboardSession;

pub const DASHBOARD_FRAME_JSON_SCHEMA_V1: u32 = 1;
pub const CHART_SPEC_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFrameJsonContractV1 {
    pub schema_version: u32,
    pub frame: DashboardFrame,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpecJsonContractV1 {
    pub schema_version: u32,
    pub chart: ChartSpec,
}

impl DashboardFrame {
    pub fn to_json_contract_v1_pretty(&self) -> DashboardResult<String> {
        let payload = DashboardFrameJsonContractV1 {
            schema_version: DASHBOARD_FRAME_JSON_SCHEMA_V1,
            frame: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DashboardError::Serialization(format!("failed to serialize frame contract v1: {e}"))
        })
    }

    /// Accepts either a bare frame or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> DashboardResult<Self> {
        if let Ok(frame) = serde_json::from_str::<DashboardFrame>(input) {
            return Ok(frame);
        }
        let payload: DashboardFrameJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            DashboardError::Serialization(format!("failed to parse frame json payload: {e}"))
        })?;
        if payload.schema_version != DASHBOARD_FRAME_JSON_SCHEMA_V1 {
            return Err(DashboardError::Serialization(format!(
                "unsupported frame schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.frame)
    }
}

impl ChartSpec {
    pub fn to_json_contract_v1_pretty(&self) -> DashboardResult<String> {
        let payload = ChartSpecJsonContractV1 {
            schema_version: CHART_SPEC_JSON_SCHEMA_V1,
            chart: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DashboardError::Serialization(format!("failed to serialize chart contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> DashboardResult<Self> {
        if let Ok(chart) = serde_json::from_str::<ChartSpec>(input) {
            return Ok(chart);
        }
        let payload: ChartSpecJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            DashboardError::Serialization(format!("failed to parse chart json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SPEC_JSON_SCHEMA_V1 {
            return Err(DashboardError::Serialization(format!(
                "unsupported chart schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.chart)
    }
}

impl<R: Renderer> DashboardSession<R> {
    pub fn frame_json_contract_v1_pretty(&self) -> DashboardResult<String> {
        self.frame().to_json_contract_v1_pretty()
    }
}
