use std::fmt;

use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// Chart families this client can serialize, keyed by their API `type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    Line,
    Bar,
    Column,
    Area,
    Arrow,
    MultipleColumn,
    Scatter,
    StackedBar,
    Choropleth,
}

impl ChartType {
    pub const ALL: [ChartType; 9] = [
        ChartType::Line,
        ChartType::Bar,
        ChartType::Column,
        ChartType::Area,
        ChartType::Arrow,
        ChartType::MultipleColumn,
        ChartType::Scatter,
        ChartType::StackedBar,
        ChartType::Choropleth,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "d3-lines",
            Self::Bar => "d3-bars",
            Self::Column => "column-chart",
            Self::Area => "d3-area",
            Self::Arrow => "d3-arrow-plot",
            Self::MultipleColumn => "multiple-columns",
            Self::Scatter => "d3-scatter-plot",
            Self::StackedBar => "d3-bars-stacked",
            Self::Choropleth => "d3-maps-choropleth",
        }
    }

    /// Looks up a raw `type` string.
    pub fn resolve(raw: &str) -> ChartResult<Self> {
        if raw.is_empty() {
            return Err(ChartError::MissingChartType);
        }
        Self::ALL
            .into_iter()
            .find(|chart_type| chart_type.as_str() == raw)
            .ok_or_else(|| ChartError::UnsupportedChartType {
                chart_type: raw.to_owned(),
                supported: supported_chart_types().join(", "),
            })
    }

    /// Reads and resolves the `type` member of an API response.
    pub fn of_response(response: &Value) -> ChartResult<Self> {
        match response.get("type") {
            None | Some(Value::Null) => Err(ChartError::MissingChartType),
            Some(Value::String(raw)) => Self::resolve(raw),
            Some(other) => Err(ChartError::Validation(format!(
                "chart `type` must be a string, got `{other}`"
            ))),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChartType {
    type Err = ChartError;

    fn from_str(raw: &str) -> ChartResult<Self> {
        Self::resolve(raw)
    }
}

#[must_use]
pub fn supported_chart_types() -> Vec<&'static str> {
    ChartType::ALL.iter().map(|chart_type| chart_type.as_str()).collect()
}

/// Resolves the family for a server-reported `type` string.
pub fn resolve_chart_type(raw: &str) -> ChartResult<ChartType> {
    ChartType::resolve(raw)
}
