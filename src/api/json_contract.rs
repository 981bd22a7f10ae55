use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

use super::chart::ChartConfig;
use super::data::DataTable;

pub const CHART_EXPORT_JSON_SCHEMA_V1: u32 = 1;

/// Self-contained chart export: the request payload plus its data as CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartExportJsonContractV1 {
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_id: Option<String>,
    pub chart: Value,
    #[serde(default)]
    pub data: String,
}

impl ChartConfig {
    /// The request payload as pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.serialize_model())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart json: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartExportJsonContractV1 {
            schema_version: CHART_EXPORT_JSON_SCHEMA_V1,
            chart_id: self.chart_id.clone(),
            chart: self.serialize_model(),
            data: if self.data.columns().is_empty() {
                String::new()
            } else {
                self.data.to_csv()?
            },
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart export contract v1: {e}"))
        })
    }

    /// Accepts either a bare chart payload or a v1 export envelope.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart json: {e}")))?;
        if value.get("schema_version").is_none() {
            return Self::deserialize_model(&value);
        }
        let payload: ChartExportJsonContractV1 = serde_json::from_value(value).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart export payload: {e}"))
        })?;
        if payload.schema_version != CHART_EXPORT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart export schema version: {}",
                payload.schema_version
            )));
        }
        let mut chart = Self::deserialize_model(&payload.chart)?;
        chart.chart_id = payload.chart_id;
        if !payload.data.is_empty() {
            chart.data = DataTable::from_csv(&payload.data)?;
        }
        Ok(chart)
    }
}
