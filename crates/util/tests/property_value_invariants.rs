use json_draft_util::{deep_equal, each, freeze, is, shallow_copy, Map, Value};
use proptest::prelude::*;

fn tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::array),
            prop::collection::vec(("[a-z]{1,3}", inner), 0..4)
                .prop_map(|entries| Value::object(entries.into_iter().collect::<Map>())),
        ]
    })
}

fn all_frozen(value: &Value) -> bool {
    let mut ok = value.is_frozen();
    each(value, |_, child| ok &= all_frozen(child));
    ok
}

proptest! {
    #[test]
    fn serde_round_trip_is_deep_equal(value in tree()) {
        let back = Value::from(serde_json::Value::from(&value));
        prop_assert!(deep_equal(&value, &back));
        prop_assert!(is(&value, &value));
    }

    #[test]
    fn shallow_copy_shares_children(value in tree()) {
        if let Some(copy) = shallow_copy(&value) {
            let copy = Value::from(copy);
            prop_assert!(!copy.ptr_eq(&value));
            prop_assert!(deep_equal(&copy, &value));
            let mut shared = true;
            each(&value, |key, child| {
                shared &= copy.get(&key).is_some_and(|c| is(c, child));
            });
            prop_assert!(shared);
        }
    }

    #[test]
    fn deep_freeze_reaches_every_node(value in tree()) {
        freeze(&value, true);
        prop_assert!(all_frozen(&value));
    }

    #[test]
    fn writes_never_leak_into_clones(value in tree(), key in "[a-z]{1,3}") {
        let before = serde_json::Value::from(&value);
        let mut edited = value.clone();
        if edited.is_object() {
            edited.insert(key, Value::from("new")).unwrap();
        } else if edited.is_array() {
            edited.push(Value::from("new")).unwrap();
        }
        prop_assert_eq!(serde_json::Value::from(&value), before);
    }
}
