use datawrapper::api::{
    CHART_EXPORT_JSON_SCHEMA_V1, ChartConfig, ChartExportJsonContractV1, ChartType, DataTable,
};
use serde_json::{Value, json};

fn sample_chart() -> ChartConfig {
    let data = DataTable::new(
        vec!["Year".to_owned(), "Value".to_owned()],
        vec![vec!["2024".to_owned(), "3".to_owned()]],
    )
    .expect("table");
    let mut chart = ChartConfig::of_type(ChartType::Column)
        .with_title("Exported")
        .with_data(data);
    chart.chart_id = Some("exp01".to_owned());
    chart
}

#[test]
fn contract_v1_wraps_payload_and_csv() {
    let chart = sample_chart();
    let raw = chart.to_json_contract_v1_pretty().expect("export");

    let envelope: ChartExportJsonContractV1 = serde_json::from_str(&raw).expect("envelope");
    assert_eq!(envelope.schema_version, CHART_EXPORT_JSON_SCHEMA_V1);
    assert_eq!(envelope.chart_id.as_deref(), Some("exp01"));
    assert_eq!(envelope.chart, chart.serialize_model());
    assert_eq!(envelope.data, chart.data.to_csv().expect("csv"));

    let restored = ChartConfig::from_json_compat_str(&raw).expect("import");
    assert_eq!(restored, chart);
}

#[test]
fn contract_v1_omits_missing_id_and_data() {
    let chart = ChartConfig::of_type(ChartType::Area);
    let raw = chart.to_json_contract_v1_pretty().expect("export");
    let value: Value = serde_json::from_str(&raw).expect("json");

    assert!(value.get("chart_id").is_none());
    assert_eq!(value["data"], json!(""));
    assert_eq!(ChartConfig::from_json_compat_str(&raw).expect("import"), chart);
}

#[test]
fn bare_payload_is_accepted() {
    let chart = ChartConfig::of_type(ChartType::Scatter).with_title("Bare");
    let raw = chart.to_json_pretty().expect("json");

    let restored = ChartConfig::from_json_compat_str(&raw).expect("import");
    assert_eq!(restored, chart);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let raw = json!({
        "schema_version": 2,
        "chart": {"type": "d3-bars"},
        "data": "",
    })
    .to_string();

    let err = ChartConfig::from_json_compat_str(&raw).expect_err("version");
    assert!(err.to_string().contains("unsupported chart export schema version: 2"));
}

#[test]
fn malformed_json_is_rejected() {
    assert!(ChartConfig::from_json_compat_str("{not json").is_err());
}
