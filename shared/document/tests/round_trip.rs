/// PROPERTY-BASED TESTS: document text round trips
///
/// Key invariants:
/// 1. parse(serialize(v)) serializes to the same text as v
/// 2. typed scalars read back exactly what was stored
/// 3. pretty printing never changes what a document parses to

use canopy_document::{pretty, Map, Value};
use proptest::prelude::*;

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        (-1.0e6f32..1.0e6f32).prop_map(Value::from),
        "[a-zA-Z0-9 _\\n\\t\\\\\"{}:,\\[\\]]{0,12}".prop_map(Value::from),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[A-Za-z]{1,6}", inner, 0..6)
                .prop_map(|map: Map| Value::Object(map)),
        ]
    })
}

proptest! {
    #[test]
    fn prop_serialize_then_parse_is_stable(value in value_strategy()) {
        let text = value.serialize();
        let parsed = Value::parse(&text);
        prop_assert!(parsed.is_ok(), "failed to parse {}", text);
        let parsed = parsed.unwrap();

        prop_assert_eq!(parsed.serialize(), text);
    }

    #[test]
    fn prop_typed_scalars_survive_text(int in any::<i32>(), float in -1.0e6f32..1.0e6f32, text in "\\PC{0,16}") {
        prop_assert_eq!(Value::parse(&Value::from(int).serialize()).unwrap().as_int(), int);
        prop_assert_eq!(Value::parse(&Value::from(float).serialize()).unwrap().as_float(), float);
        let parsed = Value::parse(&Value::from(text.as_str()).serialize()).unwrap();
        prop_assert_eq!(parsed.as_str(), text.as_str());
    }

    #[test]
    fn prop_pretty_preserves_meaning(value in value_strategy()) {
        let compact = value.serialize();
        let reparsed = Value::parse(&pretty(&compact)).unwrap();
        prop_assert_eq!(reparsed.serialize(), compact);
    }

    #[test]
    fn prop_lossy_parse_never_panics(text in "\\PC{0,32}") {
        let _ = Value::parse_lossy(&text);
    }
}

#[test]
fn player_descriptor_round_trips() {
    let text = "{\"Children\":[{\"Data\":{\"Pos\":[1.5,-2.0]},\"Name\":\"Sprite\"}],\"Name\":\"2\",\"PackedScene\":{\"FilePath\":\"res://Player.tscn\"}}";
    let value = Value::parse(text).unwrap();

    assert_eq!(value["PackedScene"]["FilePath"].as_str(), "res://Player.tscn");
    assert_eq!(value["Children"][0usize]["Data"]["Pos"].as_vector2().y, -2.0);
    assert_eq!(value.serialize(), text);
}
