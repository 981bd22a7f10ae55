use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

use super::config::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// UTF-8 CSV sent as `text/csv`.
    Csv(String),
}

/// One call against the API; `path` is absolute (`/v3/charts/...`).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn with_csv(mut self, body: String) -> Self {
        self.body = RequestBody::Csv(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON; an empty body reads as `null`.
    pub fn json(&self) -> ChartResult<Value> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body).map_err(|e| {
            ChartError::InvalidResponse(format!("response body is not valid json: {e}"))
        })
    }
}

/// Contract implemented by anything that can execute API requests.
///
/// The client only ever hands over fully built requests, so tests can swap in
/// an in-memory fake without touching the network.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> ChartResult<ApiResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: ApiRequest) -> ChartResult<ApiResponse> {
        (**self).send(request)
    }
}

/// Blocking HTTPS transport with bearer-token auth.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> ChartResult<Self> {
        config.validate()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChartError::Connection(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> ChartResult<ApiResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };
        let builder = self
            .client
            .request(method, self.config.url(&request.path))
            .bearer_auth(&self.config.access_token)
            .header(ACCEPT, "*/*");
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Csv(body) => builder.header(CONTENT_TYPE, "text/csv").body(body),
        };
        let response = builder.send().map_err(|e| {
            ChartError::Connection(format!(
                "{} {} failed: {e}",
                request.method.as_str(),
                request.path
            ))
        })?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| {
            ChartError::InvalidResponse(format!("failed to read response body: {e}"))
        })?;
        Ok(ApiResponse { status, body })
    }
}
