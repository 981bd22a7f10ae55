use datawrapper::api::{
    BarChart, BarOverlay, ChartConfig, ChartType, ColumnFormat, Describe, LineChart, Transform,
    resolve_chart_type, supported_chart_types,
};
use datawrapper::core::{ColumnType, NumberDivisor, RangeAnnotation, Scalar, TextAnnotation};
use datawrapper::ChartError;
use serde_json::json;

fn sample_bar_chart() -> ChartConfig {
    let mut bar = BarChart::new("Country", "Population")
        .sorted()
        .with_custom_range(0, 100)
        .with_overlay(
            BarOverlay::value("Target")
                .expect("overlay")
                .with_title("Goal"),
        );
    bar.custom_grid_lines = vec![Scalar::Int(0), Scalar::Int(50), Scalar::Int(100)];
    bar.annotations
        .text
        .push(TextAnnotation::new("Largest", "China", 1400).expect("text"));
    bar.annotations
        .range
        .push(RangeAnnotation::x_line(50).expect("range"));

    ChartConfig::new(bar)
        .with_title("Population by country")
        .with_describe(Describe {
            source_name: "UN".to_owned(),
            ..Describe::default()
        })
        .with_notes("Estimates for 2023")
}

#[test]
fn bar_chart_payload_shape() {
    let payload = sample_bar_chart().serialize_model();

    assert_eq!(payload["type"], json!("d3-bars"));
    assert_eq!(payload["title"], json!("Population by country"));
    assert_eq!(payload["language"], json!("en-US"));
    assert!(payload.get("theme").is_none());

    let metadata = &payload["metadata"];
    assert_eq!(
        metadata["axes"],
        json!({"colors": "Country", "bars": "Population", "labels": "Country"})
    );
    assert_eq!(metadata["describe"]["source-name"], json!("UN"));
    assert_eq!(metadata["describe"]["number-format"], json!("-"));
    assert_eq!(metadata["annotate"]["notes"], json!("Estimates for 2023"));
    assert_eq!(metadata["data"]["upload-method"], json!("copy"));

    let visualize = &metadata["visualize"];
    assert_eq!(visualize["dark-mode-invert"], json!(true));
    assert_eq!(visualize["custom-range"], json!([0, 100]));
    assert_eq!(visualize["custom-grid-lines"], json!("0,50,100"));
    assert_eq!(visualize["sort-bars"], json!(true));
    assert_eq!(visualize["show-value-labels"], json!(true));
    assert_eq!(visualize["replace-flags"], json!({"enabled": false, "style": ""}));
    assert_eq!(visualize["overlays"][0]["from"], json!("--zero-baseline--"));
    assert_eq!(visualize["overlays"][0]["title"], json!("Goal"));
    assert_eq!(visualize["text-annotations"][0]["text"], json!("Largest"));
    assert_eq!(visualize["range-annotations"][0]["display"], json!("line"));
    assert!(payload.get("publicUrl").is_none());
}

#[test]
fn bar_chart_round_trips_through_its_payload() {
    let chart = sample_bar_chart();
    let parsed = ChartConfig::deserialize_model(&chart.serialize_model()).expect("parse");
    assert_eq!(parsed, chart);
}

#[test]
fn bar_color_column_equal_to_labels_reads_as_unset() {
    let mut bar = BarChart::new("Country", "Value");
    bar.color_column = "Region".to_owned();
    let payload = ChartConfig::new(bar).serialize_model();
    assert_eq!(payload["metadata"]["axes"]["colors"], json!("Region"));

    let parsed = ChartConfig::deserialize_model(&payload).expect("parse");
    let bar = parsed.family_as::<BarChart>().expect("bar family");
    assert_eq!(bar.color_column, "Region");

    let unset = ChartConfig::new(BarChart::new("Country", "Value")).serialize_model();
    let parsed = ChartConfig::deserialize_model(&unset).expect("parse");
    assert_eq!(parsed.family_as::<BarChart>().expect("bar").color_column, "");
}

#[test]
fn omitted_fields_keep_defaults_and_nulls_count_as_absent() {
    let response = json!({
        "id": "abc12",
        "type": "d3-bars",
        "title": null,
        "metadata": {
            "describe": {"intro": "Hello", "byline": null},
            "visualize": {"show-value-labels": false},
            "axes": {"labels": "Name", "bars": "Score"},
        },
    });
    let chart = ChartConfig::deserialize_model(&response).expect("parse");
    assert_eq!(chart.chart_id.as_deref(), Some("abc12"));
    assert_eq!(chart.title, "");
    assert_eq!(chart.language, "en-US");
    assert_eq!(chart.describe.intro, "Hello");
    assert_eq!(chart.describe.byline, "");
    assert_eq!(chart.describe.number_format, "-");
    assert!(chart.transform.vertical_header);

    let bar = chart.family_as::<BarChart>().expect("bar");
    assert_eq!(bar.label_column, "Name");
    assert_eq!(bar.bar_column, "Score");
    assert!(!bar.value_labels.show);
}

#[test]
fn sorted_bar_chart_with_color_map_round_trips() {
    let mut bar = BarChart::new("Party", "Seats").sorted();
    bar.color_category.map.insert("Red".to_owned(), "#ff0000".to_owned());
    bar.color_category.map.insert("Blue".to_owned(), "#0000ff".to_owned());
    let chart = ChartConfig::new(bar).with_title("T");

    let payload = chart.serialize_model();
    assert_eq!(payload["title"], json!("T"));
    let visualize = &payload["metadata"]["visualize"];
    assert_eq!(visualize["sort-bars"], json!(true));
    assert_eq!(
        visualize["color-category"]["map"],
        json!({"Red": "#ff0000", "Blue": "#0000ff"})
    );

    let parsed = ChartConfig::deserialize_model(&payload).expect("parse");
    assert_eq!(parsed.title, "T");
    let parsed_bar = parsed.family_as::<BarChart>().expect("bar");
    assert!(parsed_bar.sort_bars);
    assert_eq!(
        parsed_bar.color_category.map.get("Red").map(String::as_str),
        Some("#ff0000")
    );
    assert_eq!(parsed_bar.color_category.map.len(), 2);
    assert_eq!(parsed, chart);
}

#[test]
fn server_owned_fields_are_read_but_never_written() {
    let response = json!({
        "id": "xyz89",
        "type": "d3-lines",
        "publicUrl": "https://datawrapper.dwcdn.net/xyz89/3/",
        "publicVersion": 3,
        "authorId": 17,
        "createdAt": "2024-01-05T10:00:00.000Z",
        "metadata": {},
    });
    let chart = ChartConfig::deserialize_model(&response).expect("parse");
    let server = chart.server.clone().expect("server info");
    assert!(server.is_published());
    assert_eq!(server.author_id, Some(17));
    assert!(server.created_at.is_some());

    let payload = chart.serialize_model();
    assert!(payload.get("publicUrl").is_none());
    assert!(payload.get("authorId").is_none());
    assert!(payload.get("id").is_none());
}

#[test]
fn legacy_root_axes_are_accepted() {
    let response = json!({
        "type": "d3-bars",
        "axes": {"labels": "Team", "bars": "Wins"},
        "metadata": {"visualize": {}},
    });
    let chart = ChartConfig::deserialize_model(&response).expect("parse");
    assert_eq!(chart.family_as::<BarChart>().expect("bar").bar_column, "Wins");
}

#[test]
fn custom_metadata_passes_through() {
    let mut chart = ChartConfig::new(LineChart::default());
    chart
        .custom
        .insert("origin".to_owned(), json!({"pipeline": "nightly", "run": 42}));
    let payload = chart.serialize_model();
    assert_eq!(payload["metadata"]["custom"]["origin"]["run"], json!(42));

    let parsed = ChartConfig::deserialize_model(&payload).expect("parse");
    assert_eq!(parsed.custom, chart.custom);
}

#[test]
fn column_formats_are_keyed_and_sparse() {
    let transform = Transform {
        column_format: vec![
            ColumnFormat::new("Value")
                .expect("format")
                .with_type(ColumnType::Number)
                .with_divisor(NumberDivisor::Million)
                .with_affixes("$", ""),
            ColumnFormat::new("Untouched").expect("format"),
        ]
        .into(),
        ..Transform::default()
    };
    let chart = ChartConfig::new(LineChart::default()).with_transform(transform);
    let payload = chart.serialize_model();
    assert_eq!(
        payload["metadata"]["data"]["column-format"],
        json!({"Value": {"type": "number", "number-prepend": "$", "number-divisor": 6}})
    );

    let parsed = ChartConfig::deserialize_model(&payload).expect("parse");
    let format = parsed
        .transform
        .column_format
        .get("Value")
        .expect("value format");
    assert_eq!(format.number_divisor, NumberDivisor::Million);
    assert!(parsed.transform.column_format.get("Untouched").is_none());
}

#[test]
fn column_format_requires_a_column_name() {
    assert!(matches!(
        ColumnFormat::new(""),
        Err(ChartError::Validation(_))
    ));
}

#[test]
fn invalid_closed_enum_in_section_fails_validation() {
    let response = json!({
        "type": "d3-lines",
        "metadata": {"data": {"upload-method": "carrier-pigeon"}},
    });
    assert!(matches!(
        ChartConfig::deserialize_model(&response),
        Err(ChartError::Validation(_))
    ));
}

#[test]
fn type_discriminant_errors() {
    assert!(matches!(
        ChartConfig::deserialize_model(&json!({"metadata": {}})),
        Err(ChartError::MissingChartType)
    ));

    let err = ChartConfig::deserialize_model(&json!({"type": "d3-pies"})).expect_err("unsupported");
    match err {
        ChartError::UnsupportedChartType {
            chart_type,
            supported,
        } => {
            assert_eq!(chart_type, "d3-pies");
            assert!(supported.contains("d3-bars"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let line = ChartConfig::new(LineChart::default()).serialize_model();
    assert!(matches!(
        ChartConfig::deserialize_as(ChartType::Bar, &line),
        Err(ChartError::TypeMismatch { .. })
    ));
    assert!(ChartConfig::deserialize_as(ChartType::Line, &line).is_ok());
}

#[test]
fn registry_resolves_every_supported_type() {
    let supported = supported_chart_types();
    assert_eq!(supported.len(), ChartType::ALL.len());
    for raw in supported {
        let chart_type = resolve_chart_type(raw).expect("supported");
        assert_eq!(chart_type.as_str(), raw);
        let chart = ChartConfig::of_type(chart_type);
        assert_eq!(chart.chart_type(), chart_type);
    }
    assert!(matches!(
        resolve_chart_type(""),
        Err(ChartError::MissingChartType)
    ));
    assert!("multiple-columns".parse::<ChartType>().is_ok());
}

#[test]
fn validation_reports_every_violation() {
    let mut line = LineChart::default();
    line.plot_height.fixed = -1.0;
    let mut chart = ChartConfig::new(line).with_language(" ");
    chart.transform.column_format = vec![
        ColumnFormat::new("A").expect("format"),
        ColumnFormat::new("A").expect("format"),
    ]
    .into();

    let err = chart.validate().expect_err("invalid");
    let message = err.to_string();
    assert!(message.contains("language"));
    assert!(message.contains("formatted twice"));
    assert!(message.contains("plot height"));
}
