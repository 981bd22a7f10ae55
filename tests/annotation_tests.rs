use datawrapper::core::annotations::{
    deserialize_panel_range_annotations, deserialize_panel_text_annotations,
    deserialize_range_annotations, deserialize_text_annotations,
    serialize_panel_text_annotations, serialize_range_annotations, serialize_text_annotations,
};
use datawrapper::core::{
    ArrowHead, ConnectorLine, ConnectorLineType, PanelAnnotation, RangeAnnotation, RangeKind,
    Scalar, StrokeType, StrokeWidth, TextAlign, TextAnnotation,
};
use serde_json::json;

#[test]
fn text_annotation_wire_shape() {
    let annotation = TextAnnotation::new("Peak", "2020-03-01", 120)
        .expect("annotation")
        .with_offset(10, -5)
        .with_align(TextAlign::from("mc"))
        .with_bold(true);
    let wire = serialize_text_annotations(std::slice::from_ref(&annotation));
    let record = &wire[0];

    assert_eq!(record["text"], json!("Peak"));
    assert_eq!(record["position"], json!({"x": "2020-03-01", "y": 120}));
    assert_eq!(record["dx"], json!(10));
    assert_eq!(record["dy"], json!(-5));
    assert_eq!(record["bold"], json!(true));
    assert_eq!(record["color"], json!(false));
    assert_eq!(record["connectorLine"], json!({"enabled": false}));
    assert!(record.get("id").is_none());

    let parsed = deserialize_text_annotations(Some(&wire)).expect("parse");
    assert_eq!(parsed, vec![annotation]);
}

#[test]
fn text_annotation_requires_text() {
    assert!(TextAnnotation::new("", 1, 2).is_err());
}

#[test]
fn server_keyed_annotations_keep_their_ids() {
    let response = json!({
        "a1b2": {"text": "First", "position": {"x": 1, "y": 2}},
        "c3d4": {"text": "Second", "x": 3, "y": 4},
    });
    let parsed = deserialize_text_annotations(Some(&response)).expect("parse");

    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].id.as_deref(), Some("a1b2"));
    assert_eq!(parsed[1].id.as_deref(), Some("c3d4"));
    assert_eq!(parsed[1].x, Scalar::Int(3));
    assert_eq!(parsed[1].y, Scalar::Int(4));
}

#[test]
fn text_annotation_without_position_fails() {
    let response = json!([{ "text": "Lost" }]);
    assert!(deserialize_text_annotations(Some(&response)).is_err());
}

#[test]
fn connector_line_round_trips_through_text_annotation() {
    let line = ConnectorLine::default()
        .with_type(ConnectorLineType::CurveRight)
        .with_circle(true)
        .with_arrow_head(ArrowHead::None)
        .with_stroke(StrokeWidth::Thick);
    let annotation = TextAnnotation::new("Note", 0, 0)
        .expect("annotation")
        .with_connector_line(line.clone());

    let wire = serialize_text_annotations(&[annotation]);
    assert_eq!(wire[0]["connectorLine"]["arrowHead"], json!(false));
    assert_eq!(wire[0]["connectorLine"]["stroke"], json!(3));

    let parsed = deserialize_text_annotations(Some(&wire)).expect("parse");
    assert_eq!(parsed[0].connector_line, Some(line));
}

#[test]
fn disabled_connector_line_reads_as_none_but_cannot_be_built() {
    let response = json!([{
        "text": "Note",
        "position": {"x": 0, "y": 0},
        "connectorLine": {"enabled": false, "type": "curveLeft"},
    }]);
    let parsed = deserialize_text_annotations(Some(&response)).expect("parse");
    assert_eq!(parsed[0].connector_line, None);

    assert!(ConnectorLine::from_wire(&json!({"enabled": false})).is_err());
}

#[test]
fn dotted_connector_circle_is_rejected() {
    let line = ConnectorLine {
        circle_style: StrokeType::Dotted,
        ..ConnectorLine::default()
    };
    assert!(line.validate().is_err());
}

#[test]
fn range_builders_enforce_required_coordinates() {
    let range = RangeAnnotation::x_range(2000, 2005).expect("x range");
    assert_eq!(range.kind(), RangeKind::XRange);

    let line = RangeAnnotation::y_line(50).expect("y line");
    assert_eq!(line.kind(), RangeKind::YLine);
    assert_eq!(line.y0, Some(Scalar::Int(50)));

    assert!(RangeAnnotation::builder(RangeKind::YRange).y0(1).build().is_err());
    assert!(
        RangeAnnotation::builder(RangeKind::XRange)
            .x0(0)
            .x1(1)
            .opacity(150)
            .build()
            .is_err()
    );
}

#[test]
fn range_annotation_wire_shape_and_round_trip() {
    let range = RangeAnnotation::builder(RangeKind::YRange)
        .y0(10)
        .y1(20.5)
        .color("#ff0000")
        .opacity(30)
        .stroke(StrokeType::Dashed, StrokeWidth::Thin)
        .build()
        .expect("range");
    let wire = serialize_range_annotations(std::slice::from_ref(&range));

    assert_eq!(wire[0]["type"], json!("y"));
    assert_eq!(wire[0]["display"], json!("range"));
    assert_eq!(wire[0]["position"], json!({"y0": 10, "y1": 20.5}));
    assert_eq!(wire[0]["strokeWidth"], json!(1));

    let parsed = deserialize_range_annotations(Some(&wire)).expect("parse");
    assert_eq!(parsed, vec![range]);
}

#[test]
fn range_annotation_reads_flat_coordinates_and_keyed_ids() {
    let response = json!({
        "r1": {"type": "x", "display": "line", "x0": "2010"},
    });
    let parsed = deserialize_range_annotations(Some(&response)).expect("parse");
    assert_eq!(parsed[0].id.as_deref(), Some("r1"));
    assert_eq!(parsed[0].kind(), RangeKind::XLine);
    assert_eq!(parsed[0].x0, Some(Scalar::from("2010")));
}

#[test]
fn range_annotation_rejects_unknown_axis() {
    let response = json!([{ "type": "z", "display": "range" }]);
    assert!(deserialize_range_annotations(Some(&response)).is_err());
}

#[test]
fn panel_annotations_carry_plot_and_visibility() {
    let text = PanelAnnotation::text(TextAnnotation::new("Only here", 1, 1).expect("text"))
        .in_plot("Germany");
    assert!(!text.show_in_all_plots);

    let wire = serialize_panel_text_annotations(std::slice::from_ref(&text));
    assert_eq!(wire[0]["position"]["plot"], json!("Germany"));
    assert_eq!(wire[0]["showInAllPlots"], json!(false));

    let parsed = deserialize_panel_text_annotations(Some(&wire)).expect("parse");
    assert_eq!(parsed, vec![text]);
}

#[test]
fn panel_range_annotations_default_to_every_plot() {
    let response = json!([{ "type": "y", "display": "line", "position": {"y0": 0} }]);
    let parsed = deserialize_panel_range_annotations(Some(&response)).expect("parse");
    assert!(parsed[0].show_in_all_plots);
    assert_eq!(parsed[0].plot, None);
}
