use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("chart type mismatch: expected `{expected}`, got `{actual}`")]
    TypeMismatch { expected: String, actual: String },

    #[error("unsupported chart type: {chart_type}. Supported types: {supported}")]
    UnsupportedChartType {
        chart_type: String,
        supported: String,
    },

    #[error("chart response is missing the `type` discriminant")]
    MissingChartType,

    #[error("request failed with status code {status}. Response content: {body}")]
    Transport { status: u16, body: String },

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    /// Returns `true` for a `429 Too Many Requests` transport failure.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Transport { status: 429, .. })
    }

    /// HTTP status carried by a transport failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}
