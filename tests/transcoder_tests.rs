use datawrapper::core::transcoders::{
    flag_value, range_pair, replace_flags, tick_list, value_label_format,
};
use datawrapper::core::{
    ColorCategory, FlatValueLabels, NestedValueLabels, PlotHeight, PlotHeightMode,
    ReplaceFlagsType, Scalar, ValueLabelAlignment, ValueLabelDisplay, WireObject,
};
use serde_json::{Map, Value, json};

#[test]
fn range_pair_coerces_numeric_strings_and_keeps_auto() {
    let raw = json!(["10", ""]);
    let range = range_pair::deserialize(Some(&raw)).expect("range");
    assert_eq!(range, [Scalar::Int(10), Scalar::auto()]);

    let raw = json!([0, 2.5]);
    let range = range_pair::deserialize(Some(&raw)).expect("range");
    assert_eq!(range, [Scalar::Int(0), Scalar::Float(2.5)]);
}

#[test]
fn range_pair_pads_short_lists_and_defaults_missing() {
    let raw = json!([5]);
    let range = range_pair::deserialize(Some(&raw)).expect("range");
    assert_eq!(range, [Scalar::Int(5), Scalar::auto()]);

    assert_eq!(range_pair::deserialize(None).expect("absent"), range_pair::auto());
    assert_eq!(
        range_pair::deserialize(Some(&Value::Null)).expect("null"),
        range_pair::auto()
    );
}

#[test]
fn range_pair_serializes_wrong_arity_as_auto() {
    assert_eq!(range_pair::serialize(&[Scalar::Int(1)]), json!(["", ""]));
    assert_eq!(
        range_pair::serialize(&[Scalar::Int(1), Scalar::Float(9.5)]),
        json!([1, 9.5])
    );
}

#[test]
fn range_pair_rejects_non_arrays() {
    assert!(range_pair::deserialize(Some(&json!({"min": 1}))).is_err());
}

#[test]
fn tick_list_joins_and_splits_on_commas() {
    let ticks = vec![Scalar::Int(1), Scalar::Float(2.5), Scalar::from("x")];
    assert_eq!(tick_list::serialize(&ticks), json!("1,2.5,x"));

    let raw = json!("1, 2.5,x");
    assert_eq!(tick_list::deserialize(Some(&raw)).expect("ticks"), ticks);
}

#[test]
fn tick_list_accepts_empty_string_and_arrays() {
    assert!(tick_list::deserialize(Some(&json!(""))).expect("empty").is_empty());
    assert!(tick_list::deserialize(None).expect("absent").is_empty());
    assert_eq!(
        tick_list::deserialize(Some(&json!([0, 50, 100]))).expect("array"),
        vec![Scalar::Int(0), Scalar::Int(50), Scalar::Int(100)]
    );
}

#[test]
fn flag_value_collapses_disabled_flags() {
    assert_eq!(
        flag_value::serialize(Some("#ff0000")),
        json!({"value": "#ff0000", "enabled": true})
    );
    assert_eq!(flag_value::serialize(None), json!({"value": "", "enabled": false}));

    let stale = json!({"enabled": false, "value": "#ff0000"});
    assert_eq!(flag_value::deserialize(Some(&stale)).expect("flag"), None);
    let enabled = json!({"enabled": true, "value": "#00ff00"});
    assert_eq!(
        flag_value::deserialize(Some(&enabled)).expect("flag"),
        Some("#00ff00".to_owned())
    );
}

#[test]
fn replace_flags_uses_off_sentinel() {
    assert_eq!(
        replace_flags::serialize(&ReplaceFlagsType::Off),
        json!({"enabled": false, "style": ""})
    );
    assert_eq!(
        replace_flags::serialize(&ReplaceFlagsType::FourByThree),
        json!({"enabled": true, "style": "4x3"})
    );

    let enabled_without_style = json!({"enabled": true, "style": ""});
    assert_eq!(
        replace_flags::deserialize(Some(&enabled_without_style)).expect("flags"),
        ReplaceFlagsType::Off
    );
    let unknown = json!({"enabled": true, "style": "shield"});
    assert_eq!(
        replace_flags::deserialize(Some(&unknown)).expect("flags"),
        ReplaceFlagsType::Other("shield".to_owned())
    );
}

#[test]
fn plot_height_writes_three_sibling_keys() {
    let mut visualize = Map::new();
    PlotHeight::default().write(&mut visualize);
    assert_eq!(visualize["plotHeightMode"], json!("fixed"));
    assert_eq!(visualize["plotHeightFixed"], json!(300));
    assert_eq!(visualize["plotHeightRatio"], json!(0.5));

    let raw = json!({"plotHeightMode": "ratio", "plotHeightRatio": 0.75});
    let mut height = PlotHeight::default();
    height.read(WireObject::new(Some(&raw))).expect("read");
    assert_eq!(height.mode, PlotHeightMode::Ratio);
    assert_eq!(height.fixed, 300.0);
    approx::assert_relative_eq!(height.ratio, 0.75);
}

#[test]
fn plot_height_rejects_unknown_mode() {
    let raw = json!({"plotHeightMode": "stretch"});
    let mut height = PlotHeight::default();
    assert!(height.read(WireObject::new(Some(&raw))).is_err());
}

#[test]
fn color_category_emits_optional_collections_only_when_set() {
    let mut category = ColorCategory::default();
    category.map.insert("A".to_owned(), "#111111".to_owned());
    assert_eq!(category.serialize(), json!({"map": {"A": "#111111"}}));

    category.exclude_from_key.push("A".to_owned());
    category.order.push("A".to_owned());
    let wire = category.serialize();
    assert_eq!(wire["excludeFromKey"], json!(["A"]));
    assert_eq!(wire["categoryOrder"], json!(["A"]));
    assert!(wire.get("categoryLabels").is_none());

    assert_eq!(ColorCategory::deserialize(Some(&wire)).expect("category"), category);
    assert_eq!(
        ColorCategory::deserialize(None).expect("absent"),
        ColorCategory::default()
    );
}

#[test]
fn nested_value_labels_disabled_flag_wins() {
    let raw = json!({
        "valueLabels": {"enabled": false, "show": "always"},
        "value-labels-always": true,
    });
    let mut labels = NestedValueLabels::default();
    labels.read(WireObject::new(Some(&raw))).expect("read");
    assert_eq!(labels.show, ValueLabelDisplay::Off);
}

#[test]
fn nested_value_labels_fall_back_to_always_flag() {
    let raw = json!({"valueLabels": {"format": "0.0"}, "value-labels-always": true});
    let mut labels = NestedValueLabels::default();
    labels.read(WireObject::new(Some(&raw))).expect("read");
    assert_eq!(labels.show, ValueLabelDisplay::Always);
    assert_eq!(labels.format, "0.0");
}

#[test]
fn nested_value_labels_pass_unknown_show_values_through() {
    let raw = json!({"valueLabels": {"show": "sometimes"}});
    let mut labels = NestedValueLabels::default();
    labels.read(WireObject::new(Some(&raw))).expect("read");
    assert_eq!(labels.show, ValueLabelDisplay::Other("sometimes".to_owned()));
}

#[test]
fn nested_value_labels_write_always_flag() {
    let labels = NestedValueLabels {
        show: ValueLabelDisplay::Always,
        format: "0,0".to_owned(),
        ..NestedValueLabels::default()
    };
    let mut visualize = Map::new();
    labels.write(&mut visualize);
    assert_eq!(
        visualize["valueLabels"],
        json!({"show": "always", "format": "0,0", "enabled": true, "placement": "outside"})
    );
    assert_eq!(visualize["value-labels-always"], json!(true));
    assert_eq!(visualize["value-label-format"], json!("0,0"));
}

#[test]
fn flat_value_labels_keep_a_plain_boolean() {
    let mut visualize = Map::new();
    FlatValueLabels::default().write(&mut visualize);
    assert_eq!(visualize["show-value-labels"], json!(true));
    assert!(visualize.get("value-label-format").is_none());

    let hidden = FlatValueLabels {
        show: false,
        format: "0.0".to_owned(),
        alignment: ValueLabelAlignment::Right,
    };
    let mut visualize = Map::new();
    hidden.write(&mut visualize);
    let mut labels = FlatValueLabels::default();
    labels.read(WireObject::from_map(&visualize)).expect("read");
    assert_eq!(labels, hidden);
}

#[test]
fn value_label_format_accepts_legacy_key() {
    let raw = json!({"value-labels-format": "0%"});
    let format = value_label_format::read(WireObject::new(Some(&raw))).expect("read");
    assert_eq!(format, "0%");

    let both = json!({"value-label-format": "0.0", "value-labels-format": "0%"});
    let format = value_label_format::read(WireObject::new(Some(&both))).expect("read");
    assert_eq!(format, "0.0");
}
