use datawrapper::core::{
    ColumnType, DateFormat, GridDisplay, LineInterpolation, NumberDivisor, PlotHeightMode,
    RangeAxis, ScatterShapeMode, WireValue,
};
use serde_json::json;

#[test]
fn open_enums_pass_unknown_values_through() {
    let interpolation = LineInterpolation::from("curve-basis");
    assert!(!interpolation.is_known());
    assert_eq!(interpolation.as_str(), "curve-basis");
    assert_eq!(interpolation.to_wire(), json!("curve-basis"));

    let parsed = LineInterpolation::from_wire(&json!("step-after")).expect("known");
    assert_eq!(parsed, LineInterpolation::StepAfter);
}

#[test]
fn open_enums_serialize_through_serde() {
    let format: DateFormat = serde_json::from_value(json!("YYYY-MM")).expect("format");
    assert_eq!(serde_json::to_value(&format).expect("json"), json!("YYYY-MM"));
    assert_eq!(
        serde_json::to_value(ScatterShapeMode::Variable).expect("json"),
        json!("variable")
    );
}

#[test]
fn open_enums_compare_by_wire_string() {
    use std::collections::HashSet;

    let spelled_out = DateFormat::Other("YYYY".to_owned());
    assert_eq!(spelled_out, DateFormat::YearFull);
    let parsed = DateFormat::from_wire(&spelled_out.to_wire()).expect("format");
    assert_eq!(parsed, spelled_out);
    assert_ne!(DateFormat::Other("YYYY-MM".to_owned()), DateFormat::YearFull);

    let formats: HashSet<_> = [spelled_out, DateFormat::YearFull].into_iter().collect();
    assert_eq!(formats.len(), 1);
}

#[test]
fn closed_enums_reject_unknown_values() {
    assert_eq!(ColumnType::parse("number").expect("known"), ColumnType::Number);
    assert!(ColumnType::parse("currency").is_err());
    assert!(PlotHeightMode::from_wire(&json!("auto")).is_err());
    assert!(serde_json::from_value::<RangeAxis>(json!("z")).is_err());
}

#[test]
fn grid_display_accepts_legacy_booleans() {
    assert_eq!(GridDisplay::from(true), GridDisplay::On);
    assert_eq!(GridDisplay::from(false), GridDisplay::Off);
}

#[test]
fn number_divisor_uses_exponents_on_the_wire() {
    assert_eq!(NumberDivisor::Million.to_wire(), json!(6));
    assert_eq!(NumberDivisor::Auto.to_wire(), json!("auto"));
    assert_eq!(
        NumberDivisor::from_wire(&json!(-2)).expect("divisor"),
        NumberDivisor::TimesHundred
    );
    assert_eq!(
        NumberDivisor::from_wire(&json!("3")).expect("divisor"),
        NumberDivisor::Thousand
    );
    assert!(NumberDivisor::from_wire(&json!(4)).is_err());
}
