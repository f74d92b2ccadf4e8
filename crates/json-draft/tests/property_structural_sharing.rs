use json_draft::{Config, Map, Producer, Value};
use proptest::prelude::*;

fn plain() -> Producer {
    Producer::with_config(Config::global().with_auto_freeze(false))
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::array),
            prop::collection::vec(("[a-z]{1,3}", inner), 0..4)
                .prop_map(|entries| Value::object(entries.into_iter().collect::<Map>())),
        ]
    })
}

fn object_of_containers() -> impl Strategy<Value = Value> {
    prop::collection::vec(tree(), 1..6).prop_map(|children| {
        let mut map = Map::new();
        for (i, child) in children.into_iter().enumerate() {
            map.insert(format!("k{i}"), Value::array(vec![child]));
        }
        Value::object(map)
    })
}

proptest! {
    #[test]
    fn rewriting_every_scalar_is_a_no_op(base in tree()) {
        let out = plain().produce(&base, |d| {
            for key in d.keys()? {
                if let Some(item) = d.get(&key)? {
                    if let Some(v) = item.as_value() {
                        d.set(&key, v.clone())?;
                    }
                }
            }
            Ok(())
        }).unwrap();
        prop_assert!(out.ptr_eq(&base) || json_draft_util::is(&out, &base));
    }

    #[test]
    fn one_write_copies_one_branch(base in object_of_containers(), pick in any::<prop::sample::Index>()) {
        let keys: Vec<String> = base.as_object().unwrap().keys().cloned().collect();
        let target = keys[pick.index(keys.len())].clone();

        let out = plain().produce(&base, |d| d.at(target.as_str())?.push("new")).unwrap();

        for key in &keys {
            let (old, new) = (base.get(key.as_str()).unwrap(), out.get(key.as_str()).unwrap());
            if *key == target {
                prop_assert!(!old.ptr_eq(new));
                prop_assert_eq!(new.len(), Some(2));
                prop_assert!(json_draft_util::is(&old.as_array().unwrap()[0], &new.as_array().unwrap()[0]));
            } else {
                prop_assert!(old.ptr_eq(new));
            }
        }
    }
}
