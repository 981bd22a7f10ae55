use datawrapper::core::Scalar;
use datawrapper::core::transcoders::{range_pair, tick_list};
use proptest::prelude::*;

fn scalar_strategy() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        Just(Scalar::auto()),
        (-1_000_000_i64..1_000_000).prop_map(Scalar::Int),
        (-1_000.0f64..1_000.0)
            .prop_filter("fractional", |value| value.fract() != 0.0)
            .prop_map(Scalar::Float),
    ]
}

proptest! {
    #[test]
    fn integer_tick_lists_round_trip(ticks in prop::collection::vec(-1_000_000_i64..1_000_000, 0..12)) {
        let ticks: Vec<Scalar> = ticks.into_iter().map(Scalar::Int).collect();
        let wire = tick_list::serialize(&ticks);
        let parsed = tick_list::deserialize(Some(&wire)).expect("ticks");
        prop_assert_eq!(parsed, ticks);
    }

    #[test]
    fn range_pairs_round_trip(min in scalar_strategy(), max in scalar_strategy()) {
        let range = [min, max];
        let wire = range_pair::serialize(&range);
        let parsed = range_pair::deserialize(Some(&wire)).expect("range");
        prop_assert_eq!(parsed, range);
    }

    #[test]
    fn coerced_integers_compare_equal_to_floats(value in -1_000_000_i64..1_000_000) {
        let coerced = Scalar::coerce(&value.to_string());
        prop_assert_eq!(&coerced, &Scalar::Int(value));
        prop_assert_eq!(coerced, Scalar::Float(value as f64));
    }

    #[test]
    fn non_numeric_text_is_never_coerced(text in "[a-z#][a-z0-9 -]{0,12}") {
        prop_assert_eq!(Scalar::coerce(&text), Scalar::Text(text.clone()));
    }
}
