//! Shared, reference-counted value tree.
//!
//! Scalars are stored inline; arrays and objects live behind an [`Arc`] so
//! that two values can be compared by identity ([`Value::ptr_eq`]) and an
//! unchanged subtree can be reused by any number of parents without copying.
//!
//! Containers carry a `frozen` flag. Frozen containers reject the mutation
//! methods on [`Value`]; unfrozen ones mutate with clone-on-write, so a value
//! never changes behind the back of another value sharing its nodes.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::key::Key;

/// Ordered map backing [`Value::Object`].
pub type Map = IndexMap<String, Value>;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("FROZEN")]
    Frozen,
    #[error("NOT_A_CONTAINER")]
    NotAContainer,
    #[error("INDEX_OUT_OF_BOUNDS")]
    IndexOutOfBounds,
}

// ── Node ──────────────────────────────────────────────────────────────────

/// Heap node of an array or object value.
#[derive(Debug)]
pub struct Node<T> {
    frozen: AtomicBool,
    items: T,
}

impl<T> Node<T> {
    pub fn new(items: T) -> Self {
        Self {
            frozen: AtomicBool::new(false),
            items,
        }
    }

    pub fn new_frozen(items: T) -> Self {
        Self {
            frozen: AtomicBool::new(true),
            items,
        }
    }

    pub fn items(&self) -> &T {
        &self.items
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Relaxed)
    }

    /// Marks the node frozen. Returns `false` if it already was.
    pub(crate) fn mark_frozen(&self) -> bool {
        !self.frozen.swap(true, Ordering::Relaxed)
    }
}

impl<T: Clone> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            frozen: AtomicBool::new(self.is_frozen()),
            items: self.items.clone(),
        }
    }
}

// ── Value ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Arc<Node<Vec<Value>>>),
    Object(Arc<Node<Map>>),
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(Node::new(items)))
    }

    pub fn object(entries: Map) -> Self {
        Value::Object(Arc::new(Node::new(entries)))
    }

    /// Builds an array that is frozen from the start.
    pub fn frozen_array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(Node::new_frozen(items)))
    }

    /// Builds an object that is frozen from the start.
    pub fn frozen_object(entries: Map) -> Self {
        Value::Object(Arc::new(Node::new_frozen(entries)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(node) => Some(node.items()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(node) => Some(node.items()),
            _ => None,
        }
    }

    /// Number of elements or entries; `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(node) => Some(node.items().len()),
            Value::Object(node) => Some(node.items().len()),
            _ => None,
        }
    }

    /// Own property lookup. Arrays answer numeric keys only.
    pub fn get<K: Into<Key>>(&self, key: K) -> Option<&Value> {
        let key = key.into();
        match self {
            Value::Object(node) => node.items().get(key.as_field().as_ref()),
            Value::Array(node) => key.as_index().and_then(|i| node.items().get(i)),
            _ => None,
        }
    }

    /// Identity comparison of two containers. Scalars are never identical
    /// under this test; use [`crate::is`] for SameValue semantics.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Scalars count as frozen.
    pub fn is_frozen(&self) -> bool {
        match self {
            Value::Array(node) => node.is_frozen(),
            Value::Object(node) => node.is_frozen(),
            _ => true,
        }
    }

    // ── Plain mutation ────────────────────────────────────────────────────

    /// Inserts or replaces an object entry, keeping the key's position.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: Value) -> Result<Option<Value>, ValueError> {
        match self {
            Value::Object(node) => {
                if node.is_frozen() {
                    return Err(ValueError::Frozen);
                }
                Ok(Arc::make_mut(node).items.insert(key.into(), value))
            }
            _ => Err(ValueError::NotAContainer),
        }
    }

    /// Removes an object entry, preserving the order of the others.
    pub fn remove(&mut self, key: &str) -> Result<Option<Value>, ValueError> {
        match self {
            Value::Object(node) => {
                if node.is_frozen() {
                    return Err(ValueError::Frozen);
                }
                if !node.items().contains_key(key) {
                    return Ok(None);
                }
                Ok(Arc::make_mut(node).items.shift_remove(key))
            }
            _ => Err(ValueError::NotAContainer),
        }
    }

    pub fn push(&mut self, value: Value) -> Result<(), ValueError> {
        match self {
            Value::Array(node) => {
                if node.is_frozen() {
                    return Err(ValueError::Frozen);
                }
                Arc::make_mut(node).items.push(value);
                Ok(())
            }
            _ => Err(ValueError::NotAContainer),
        }
    }

    /// Replaces an existing array element and returns the old one.
    pub fn set_index(&mut self, index: usize, value: Value) -> Result<Value, ValueError> {
        match self {
            Value::Array(node) => {
                if node.is_frozen() {
                    return Err(ValueError::Frozen);
                }
                if index >= node.items().len() {
                    return Err(ValueError::IndexOutOfBounds);
                }
                let items = &mut Arc::make_mut(node).items;
                Ok(std::mem::replace(&mut items[index], value))
            }
            _ => Err(ValueError::NotAContainer),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::json_equal::deep_equal(self, other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::from(self))
    }
}
