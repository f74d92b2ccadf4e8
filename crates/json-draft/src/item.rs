//! Values as seen and written by a recipe.

use indexmap::IndexMap;
use json_draft_util::{Map, Value};

use crate::draft::Draft;

/// Anything a recipe can read from or write into a draft.
///
/// `Array` and `Object` are fresh structures assembled by the recipe. Unlike
/// a [`Value`] they may embed drafts; finalization replaces each embedded
/// draft with its finished value.
#[derive(Clone, Debug)]
pub enum Item {
    Value(Value),
    Draft(Draft),
    Array(Vec<Item>),
    Object(IndexMap<String, Item>),
}

impl Item {
    /// Whether this item is a draft handle.
    pub fn is_draft(&self) -> bool {
        matches!(self, Item::Draft(_))
    }

    pub fn as_draft(&self) -> Option<&Draft> {
        match self {
            Item::Draft(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_draft(self) -> Option<Draft> {
        match self {
            Item::Draft(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Item::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Value> for Item {
    fn from(v: Value) -> Self {
        Item::Value(v)
    }
}

impl From<&Value> for Item {
    fn from(v: &Value) -> Self {
        Item::Value(v.clone())
    }
}

impl From<Draft> for Item {
    fn from(d: Draft) -> Self {
        Item::Draft(d)
    }
}

impl From<&Draft> for Item {
    fn from(d: &Draft) -> Self {
        Item::Draft(d.clone())
    }
}

impl From<Map> for Item {
    fn from(entries: Map) -> Self {
        Item::Value(Value::object(entries))
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::Array(items)
    }
}

impl From<IndexMap<String, Item>> for Item {
    fn from(entries: IndexMap<String, Item>) -> Self {
        Item::Object(entries)
    }
}

impl From<serde_json::Value> for Item {
    fn from(v: serde_json::Value) -> Self {
        Item::Value(Value::from(v))
    }
}

macro_rules! from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Item {
                fn from(v: $t) -> Self {
                    Item::Value(Value::from(v))
                }
            }
        )*
    };
}

from_scalar!(bool, f64, i32, i64, u32, u64, usize, &str, String);

// ── Outcome ───────────────────────────────────────────────────────────────

/// What a recipe handed back: either nothing or an explicit replacement.
#[derive(Clone, Debug, Default)]
pub struct Outcome(Option<Item>);

impl Outcome {
    pub fn nothing() -> Self {
        Outcome(None)
    }

    pub fn into_item(self) -> Option<Item> {
        self.0
    }
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Outcome(None)
    }
}

impl From<Option<Item>> for Outcome {
    fn from(item: Option<Item>) -> Self {
        Outcome(item)
    }
}

impl From<Item> for Outcome {
    fn from(item: Item) -> Self {
        Outcome(Some(item))
    }
}

impl From<Value> for Outcome {
    fn from(v: Value) -> Self {
        Outcome(Some(Item::Value(v)))
    }
}

impl From<Draft> for Outcome {
    fn from(d: Draft) -> Self {
        Outcome(Some(Item::Draft(d)))
    }
}

impl From<serde_json::Value> for Outcome {
    fn from(v: serde_json::Value) -> Self {
        Outcome(Some(Item::from(v)))
    }
}
