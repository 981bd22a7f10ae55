use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use datawrapper::api::{ChartConfig, ChartType, DataTable, LineChart};
use datawrapper::client::{
    ApiRequest, ApiResponse, ChartPatch, ClientConfig, DatawrapperClient, Method, RequestBody,
    Transport,
};
use datawrapper::error::{ChartError, ChartResult};
use serde_json::json;

/// Replays queued responses and records every request it was handed.
#[derive(Default)]
struct RecordingTransport {
    requests: RefCell<Vec<ApiRequest>>,
    responses: RefCell<VecDeque<ApiResponse>>,
}

impl RecordingTransport {
    fn with_responses(responses: impl IntoIterator<Item = ApiResponse>) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            responses: RefCell::new(responses.into_iter().collect()),
        }
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: ApiRequest) -> ChartResult<ApiResponse> {
        self.requests.borrow_mut().push(request);
        Ok(self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::new(500, "unexpected request")))
    }
}

fn sample_table() -> DataTable {
    DataTable::new(
        vec!["Country".to_owned(), "Value".to_owned()],
        vec![
            vec!["Germany".to_owned(), "12".to_owned()],
            vec!["France".to_owned(), "8".to_owned()],
        ],
    )
    .expect("table")
}

fn chart_response(id: &str) -> ApiResponse {
    ApiResponse::new(
        200,
        json!({
            "id": id,
            "type": "d3-lines",
            "title": "Fetched",
            "language": "de-DE",
            "publicVersion": 2,
            "metadata": {"visualize": {"lines": {"Value": {"width": "style2"}}}},
        })
        .to_string(),
    )
}

#[test]
fn create_posts_payload_then_uploads_csv() {
    let transport = RecordingTransport::with_responses([
        ApiResponse::new(201, r#"{"id": "Ab3dE"}"#),
        ApiResponse::new(204, ""),
    ]);
    let client = DatawrapperClient::with_transport(&transport);
    let mut chart = ChartConfig::new(LineChart::default())
        .with_title("Exports")
        .with_data(sample_table());

    let id = client.create(&mut chart).expect("create");

    assert_eq!(id, "Ab3dE");
    assert_eq!(chart.chart_id.as_deref(), Some("Ab3dE"));
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, "/v3/charts");
    let RequestBody::Json(body) = &requests[0].body else {
        panic!("create must send json");
    };
    assert_eq!(body["type"], json!("d3-lines"));
    assert_eq!(body["title"], json!("Exports"));
    assert_eq!(requests[1].method, Method::Put);
    assert_eq!(requests[1].path, "/v3/charts/Ab3dE/data");
    assert_eq!(
        requests[1].body,
        RequestBody::Csv(sample_table().to_csv().expect("csv"))
    );
}

#[test]
fn create_without_data_skips_upload() {
    let transport = RecordingTransport::with_responses([ApiResponse::new(201, r#"{"id": "x1"}"#)]);
    let client = DatawrapperClient::with_transport(&transport);
    let mut chart = ChartConfig::of_type(ChartType::Column);

    client.create(&mut chart).expect("create");
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn create_rejects_missing_id_in_response() {
    let transport = RecordingTransport::with_responses([ApiResponse::new(201, r#"{"id": ""}"#)]);
    let client = DatawrapperClient::with_transport(&transport);
    let mut chart = ChartConfig::of_type(ChartType::Bar);

    let err = client.create(&mut chart).expect_err("empty id");
    assert!(matches!(err, ChartError::InvalidResponse(_)));
    assert_eq!(chart.chart_id, None);
}

#[test]
fn failed_data_upload_names_the_saved_chart() {
    let transport = RecordingTransport::with_responses([
        ApiResponse::new(201, r#"{"id": "keep1"}"#),
        ApiResponse::new(413, "payload too large"),
    ]);
    let client = DatawrapperClient::with_transport(&transport);
    let mut chart = ChartConfig::of_type(ChartType::Line).with_data(sample_table());

    let err = client.create(&mut chart).expect_err("upload fails");
    assert_eq!(err.status(), Some(413));
    assert!(err.to_string().contains("chart `keep1` saved"));
    assert_eq!(chart.chart_id.as_deref(), Some("keep1"));
}

#[test]
fn update_requires_an_id() {
    let transport = RecordingTransport::default();
    let client = DatawrapperClient::with_transport(&transport);
    let chart = ChartConfig::of_type(ChartType::Area);

    let err = client.update(&chart).expect_err("no id");
    assert!(matches!(err, ChartError::InvalidRequest(_)));
    assert!(transport.requests().is_empty());
}

#[test]
fn update_patches_metadata_and_uploads_data() {
    let transport =
        RecordingTransport::with_responses([ApiResponse::new(200, "{}"), ApiResponse::new(204, "")]);
    let client = DatawrapperClient::with_transport(&transport);
    let mut chart = ChartConfig::of_type(ChartType::Line).with_data(sample_table());
    chart.chart_id = Some("u1".to_owned());

    assert_eq!(client.update(&chart).expect("update"), "u1");
    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::Patch);
    assert_eq!(requests[0].path, "/v3/charts/u1");
    let RequestBody::Json(body) = &requests[0].body else {
        panic!("update must send json");
    };
    assert!(body.get("metadata").is_some());
    assert!(body.get("theme").is_none());
    assert_eq!(requests[1].path, "/v3/charts/u1/data");
}

#[test]
fn empty_patch_is_rejected_before_sending() {
    let transport = RecordingTransport::default();
    let client = DatawrapperClient::with_transport(&transport);

    let err = client
        .update_chart("u1", ChartPatch::default())
        .expect_err("empty patch");
    assert!(matches!(err, ChartError::InvalidRequest(message) if message == "No updates submitted."));
    assert!(transport.requests().is_empty());
}

#[test]
fn blank_chart_id_is_rejected_before_sending() {
    let transport = RecordingTransport::with_responses([ApiResponse::new(200, "{}")]);
    let client = DatawrapperClient::with_transport(&transport);
    let patch = ChartPatch {
        title: Some("Renamed".to_owned()),
        ..ChartPatch::default()
    };

    let err = client.update_chart("", patch).expect_err("blank id");
    assert!(matches!(err, ChartError::InvalidRequest(message) if message.contains("without an id")));
    assert!(client.get("").is_err());
    assert!(transport.requests().is_empty());
}

#[test]
fn title_only_patch_sends_just_the_title() {
    let transport = RecordingTransport::with_responses([ApiResponse::new(200, "{}")]);
    let client = DatawrapperClient::with_transport(&transport);
    let patch = ChartPatch {
        title: Some("Renamed".to_owned()),
        ..ChartPatch::default()
    };

    client.update_chart("u2", patch).expect("patch");
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, RequestBody::Json(json!({"title": "Renamed"})));
}

#[test]
fn get_reads_chart_and_data() {
    let transport = RecordingTransport::with_responses([
        chart_response("g1"),
        ApiResponse::new(200, "Year,Value\n2020,1\n2021,3\n"),
    ]);
    let client = DatawrapperClient::with_transport(&transport);

    let chart = client.get("g1").expect("get");

    assert_eq!(chart.chart_id.as_deref(), Some("g1"));
    assert_eq!(chart.title, "Fetched");
    assert_eq!(chart.language, "de-DE");
    assert_eq!(chart.chart_type(), ChartType::Line);
    assert_eq!(chart.data.column("Value"), Some(vec!["1", "3"]));
    assert!(chart.server.as_ref().is_some_and(|server| server.is_published()));
    let line = chart.family_as::<LineChart>().expect("line chart");
    assert_eq!(line.lines[0].column, "Value");

    let requests = transport.requests();
    assert_eq!(requests[0].path, "/v3/charts/g1");
    assert_eq!(requests[1].path, "/v3/charts/g1/data");
    assert!(requests.iter().all(|request| request.method == Method::Get));
}

#[test]
fn get_as_rejects_other_families() {
    let transport = RecordingTransport::with_responses([chart_response("g2")]);
    let client = DatawrapperClient::with_transport(&transport);

    let err = client.get_as("g2", ChartType::Bar).expect_err("mismatch");
    assert!(matches!(
        err,
        ChartError::TypeMismatch { expected, actual }
            if expected == "d3-bars" && actual == "d3-lines"
    ));
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn get_surfaces_non_json_bodies() {
    let transport = RecordingTransport::with_responses([ApiResponse::new(200, "<html>")]);
    let client = DatawrapperClient::with_transport(&transport);

    let err = client.get("g3").expect_err("not json");
    assert!(matches!(err, ChartError::InvalidResponse(_)));
}

#[test]
fn delete_clears_the_local_id() {
    let transport = RecordingTransport::with_responses([ApiResponse::new(204, "")]);
    let client = DatawrapperClient::with_transport(&transport);
    let mut chart = ChartConfig::of_type(ChartType::Scatter);
    chart.chart_id = Some("d1".to_owned());

    client.delete(&mut chart).expect("delete");
    assert_eq!(chart.chart_id, None);
    assert_eq!(transport.requests()[0].method, Method::Delete);
    assert_eq!(transport.requests()[0].path, "/v3/charts/d1");
}

#[test]
fn duplicate_and_fork_fetch_the_new_chart() {
    for (action, new_id) in [("copy", "c2"), ("fork", "f2")] {
        let transport = RecordingTransport::with_responses([
            ApiResponse::new(201, json!({"id": new_id}).to_string()),
            chart_response(new_id),
            ApiResponse::new(200, ""),
        ]);
        let client = DatawrapperClient::with_transport(&transport);
        let mut chart = ChartConfig::of_type(ChartType::Line);
        chart.chart_id = Some("src".to_owned());

        let copy = if action == "copy" {
            client.duplicate(&chart)
        } else {
            client.fork(&chart)
        }
        .expect("clone");

        assert_eq!(copy.chart_id.as_deref(), Some(new_id));
        assert!(copy.data.is_empty());
        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, format!("/v3/charts/src/{action}"));
        assert_eq!(requests[1].path, format!("/v3/charts/{new_id}"));
    }
}

#[test]
fn publish_reads_url_and_version() {
    let transport = RecordingTransport::with_responses([ApiResponse::new(
        200,
        json!({
            "data": {"publicUrl": "https://datawrapper.dwcdn.net/p1/3/", "publicVersion": 3},
            "version": 3,
        })
        .to_string(),
    )]);
    let client = DatawrapperClient::with_transport(&transport);
    let mut chart = ChartConfig::of_type(ChartType::Bar);
    chart.chart_id = Some("p1".to_owned());

    let published = client.publish(&chart).expect("publish");
    assert_eq!(published.chart_id, "p1");
    assert_eq!(
        published.public_url.as_deref(),
        Some("https://datawrapper.dwcdn.net/p1/3/")
    );
    assert_eq!(published.public_version, 3);
    assert_eq!(transport.requests()[0].path, "/v3/charts/p1/publish");
}

#[test]
fn publish_falls_back_to_nested_version() {
    let transport = RecordingTransport::with_responses([ApiResponse::new(
        200,
        json!({"url": "https://example.org/p2", "data": {"publicVersion": 5}}).to_string(),
    )]);
    let client = DatawrapperClient::with_transport(&transport);
    let mut chart = ChartConfig::of_type(ChartType::Bar);
    chart.chart_id = Some("p2".to_owned());

    let published = client.publish(&chart).expect("publish");
    assert_eq!(published.public_url.as_deref(), Some("https://example.org/p2"));
    assert_eq!(published.public_version, 5);
}

#[test]
fn rate_limited_responses_are_flagged() {
    let transport = RecordingTransport::with_responses([ApiResponse::new(429, "slow down")]);
    let client = DatawrapperClient::with_transport(&transport);

    let err = client.get("r1").expect_err("rate limited");
    assert!(err.is_rate_limited());
    assert!(err.to_string().contains("slow down"));
}

#[test]
fn client_config_validates_and_joins_urls() {
    let config = ClientConfig::new("token").with_base_url("https://api.example.org/");
    assert!(config.validate().is_ok());
    assert_eq!(
        config.url("/v3/charts/abc"),
        "https://api.example.org/v3/charts/abc"
    );

    assert!(ClientConfig::new("  ").validate().is_err());
    assert!(ClientConfig::new("token").with_base_url("").validate().is_err());
    assert!(
        ClientConfig::new("token")
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err()
    );
}

#[test]
fn client_config_debug_hides_the_token() {
    let rendered = format!("{:?}", ClientConfig::new("secret-token"));
    assert!(!rendered.contains("secret-token"));
    assert!(rendered.contains("redacted"));
}

#[test]
fn http_client_rejects_invalid_config() {
    assert!(DatawrapperClient::new(ClientConfig::new("")).is_err());
}
