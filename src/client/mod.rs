//! Chart lifecycle against the remote API.
//!
//! Every operation is a short sequence of blocking requests issued through a
//! [`Transport`]. Nothing is retried or cached.

mod config;
mod transport;

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::api::{ChartConfig, ChartType, DataTable};
use crate::core::WireObject;
use crate::error::{ChartError, ChartResult};

pub use config::{ACCESS_TOKEN_ENV, CHARTS_PATH, ClientConfig, DEFAULT_BASE_URL};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, RequestBody, Transport};

/// Partial update of an existing chart; unset fields are left alone by the server.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartPatch {
    pub title: Option<String>,
    pub chart_type: Option<ChartType>,
    pub language: Option<String>,
    pub theme: Option<String>,
    /// Full `metadata` object, as produced by [`ChartConfig::serialize_model`].
    pub metadata: Option<Value>,
    pub data: Option<DataTable>,
}

impl ChartPatch {
    /// Everything `chart` would send on update.
    #[must_use]
    pub fn from_chart(chart: &ChartConfig) -> Self {
        let payload = chart.serialize_model();
        Self {
            title: Some(chart.title.clone()),
            chart_type: Some(chart.chart_type()),
            language: Some(chart.language.clone()),
            theme: (!chart.theme.is_empty()).then(|| chart.theme.clone()),
            metadata: payload.get("metadata").cloned(),
            data: (!chart.data.is_empty()).then(|| chart.data.clone()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body().is_empty() && self.data.is_none()
    }

    fn body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        if let Some(title) = &self.title {
            body.insert("title".to_owned(), Value::String(title.clone()));
        }
        if let Some(chart_type) = self.chart_type {
            body.insert("type".to_owned(), Value::from(chart_type.as_str()));
        }
        if let Some(language) = &self.language {
            body.insert("language".to_owned(), Value::String(language.clone()));
        }
        if let Some(metadata) = &self.metadata {
            body.insert("metadata".to_owned(), metadata.clone());
        }
        if let Some(theme) = self.theme.as_ref().filter(|theme| !theme.is_empty()) {
            body.insert("theme".to_owned(), Value::String(theme.clone()));
        }
        body
    }
}

/// Result of publishing a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedChart {
    pub chart_id: String,
    pub public_url: Option<String>,
    pub public_version: i64,
}

pub struct DatawrapperClient<T: Transport = HttpTransport> {
    transport: T,
}

impl DatawrapperClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> ChartResult<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    /// Client configured from `DATAWRAPPER_ACCESS_TOKEN`.
    pub fn from_env() -> ChartResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> DatawrapperClient<T> {
    #[must_use]
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates `chart` on the server, stores the new id on it and uploads its data.
    pub fn create(&self, chart: &mut ChartConfig) -> ChartResult<String> {
        chart.validate()?;
        let response = self.execute(
            ApiRequest::new(Method::Post, CHARTS_PATH).with_json(chart.serialize_model()),
        )?;
        let chart_id = response_id(&response.json()?)?;
        chart.chart_id = Some(chart_id.clone());
        debug!(
            chart_id = chart_id.as_str(),
            chart_type = chart.chart_type().as_str(),
            "created chart"
        );
        self.upload_data(&chart_id, &chart.data)?;
        Ok(chart_id)
    }

    /// Sends the full configuration of an existing chart, then its data.
    pub fn update(&self, chart: &ChartConfig) -> ChartResult<String> {
        let chart_id = require_id(chart, "update")?.to_owned();
        chart.validate()?;
        self.update_chart(&chart_id, ChartPatch::from_chart(chart))?;
        Ok(chart_id)
    }

    pub fn update_chart(&self, chart_id: &str, patch: ChartPatch) -> ChartResult<()> {
        check_id(chart_id, "update")?;
        if patch.is_empty() {
            return Err(ChartError::InvalidRequest("No updates submitted.".to_owned()));
        }
        let body = patch.body();
        if !body.is_empty() {
            self.execute(
                ApiRequest::new(Method::Patch, chart_path(chart_id))
                    .with_json(Value::Object(body)),
            )?;
        }
        if let Some(data) = &patch.data {
            self.upload_data(chart_id, data)?;
        }
        debug!(chart_id, "updated chart");
        Ok(())
    }

    /// Fetches a chart of any supported family together with its data.
    pub fn get(&self, chart_id: &str) -> ChartResult<ChartConfig> {
        let response = self.fetch(chart_id)?;
        let chart = ChartConfig::deserialize_model(&response)?;
        self.finish_get(chart_id, chart)
    }

    /// Fetches a chart that must be of `expected` family.
    pub fn get_as(&self, chart_id: &str, expected: ChartType) -> ChartResult<ChartConfig> {
        let response = self.fetch(chart_id)?;
        let chart = ChartConfig::deserialize_as(expected, &response)?;
        self.finish_get(chart_id, chart)
    }

    pub fn delete(&self, chart: &mut ChartConfig) -> ChartResult<()> {
        let chart_id = require_id(chart, "delete")?.to_owned();
        self.execute(ApiRequest::new(Method::Delete, chart_path(&chart_id)))?;
        chart.chart_id = None;
        debug!(chart_id = chart_id.as_str(), "deleted chart");
        Ok(())
    }

    /// Server-side copy; returns the copy as fetched back.
    pub fn duplicate(&self, chart: &ChartConfig) -> ChartResult<ChartConfig> {
        self.clone_via(chart, "copy")
    }

    /// Forks a chart from the river; returns the fork as fetched back.
    pub fn fork(&self, chart: &ChartConfig) -> ChartResult<ChartConfig> {
        self.clone_via(chart, "fork")
    }

    pub fn publish(&self, chart: &ChartConfig) -> ChartResult<PublishedChart> {
        let chart_id = require_id(chart, "publish")?.to_owned();
        let response = self
            .execute(ApiRequest::new(
                Method::Post,
                format!("{}/publish", chart_path(&chart_id)),
            ))?
            .json()?;
        let root = WireObject::new(Some(&response));
        let data = root.object("data");
        let public_url = match data.read::<Option<String>>("publicUrl")?.flatten() {
            Some(url) => Some(url),
            None => root.read::<Option<String>>("url")?.flatten(),
        };
        let public_version = match root.read::<i64>("version")? {
            Some(version) => version,
            None => data.read_or("publicVersion", 0)?,
        };
        debug!(chart_id = chart_id.as_str(), public_version, "published chart");
        Ok(PublishedChart {
            chart_id,
            public_url,
            public_version,
        })
    }

    fn clone_via(&self, chart: &ChartConfig, action: &str) -> ChartResult<ChartConfig> {
        let source_id = require_id(chart, action)?;
        let response = self
            .execute(ApiRequest::new(
                Method::Post,
                format!("{}/{action}", chart_path(source_id)),
            ))?
            .json()?;
        let new_id = response_id(&response)?;
        debug!(source_id, chart_id = new_id.as_str(), action, "cloned chart");
        self.get(&new_id)
    }

    fn fetch(&self, chart_id: &str) -> ChartResult<Value> {
        check_id(chart_id, "fetch")?;
        let response = self
            .execute(ApiRequest::new(Method::Get, chart_path(chart_id)))?
            .json()?;
        if !response.is_object() {
            return Err(ChartError::InvalidResponse(format!(
                "expected a chart object for `{chart_id}`"
            )));
        }
        Ok(response)
    }

    fn finish_get(&self, chart_id: &str, mut chart: ChartConfig) -> ChartResult<ChartConfig> {
        let csv = self
            .execute(ApiRequest::new(
                Method::Get,
                format!("{}/data", chart_path(chart_id)),
            ))?
            .body;
        if !csv.trim().is_empty() {
            chart.data = DataTable::from_csv(&csv)?;
        }
        if chart.chart_id.is_none() {
            chart.chart_id = Some(chart_id.to_owned());
        }
        debug!(
            chart_id,
            chart_type = chart.chart_type().as_str(),
            rows = chart.data.rows().len(),
            "fetched chart"
        );
        Ok(chart)
    }

    fn upload_data(&self, chart_id: &str, data: &DataTable) -> ChartResult<()> {
        if data.is_empty() {
            return Ok(());
        }
        let request = ApiRequest::new(Method::Put, format!("{}/data", chart_path(chart_id)))
            .with_csv(data.to_csv()?);
        self.execute(request).map_err(|err| match err {
            ChartError::Transport { status, body } => ChartError::Transport {
                status,
                body: format!("chart `{chart_id}` saved but data upload failed: {body}"),
            },
            other => other,
        })?;
        Ok(())
    }

    fn execute(&self, request: ApiRequest) -> ChartResult<ApiResponse> {
        let method = request.method.as_str();
        let path = request.path.clone();
        trace!(method, path = path.as_str(), "sending request");
        let response = self.transport.send(request)?;
        if !response.is_success() {
            warn!(
                method,
                path = path.as_str(),
                status = response.status,
                "request failed"
            );
            return Err(ChartError::Transport {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }
}

fn chart_path(chart_id: &str) -> String {
    format!("{CHARTS_PATH}/{chart_id}")
}

fn require_id<'a>(chart: &'a ChartConfig, action: &str) -> ChartResult<&'a str> {
    let chart_id = chart.chart_id.as_deref().unwrap_or_default();
    check_id(chart_id, action)?;
    Ok(chart_id)
}

fn check_id(chart_id: &str, action: &str) -> ChartResult<()> {
    if chart_id.is_empty() {
        return Err(ChartError::InvalidRequest(format!(
            "cannot {action} a chart without an id; create it first or set `chart_id`"
        )));
    }
    Ok(())
}

fn response_id(response: &Value) -> ChartResult<String> {
    match response.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        other => Err(ChartError::InvalidResponse(format!(
            "invalid chart id received from the api: `{}`",
            other.unwrap_or(&Value::Null)
        ))),
    }
}
