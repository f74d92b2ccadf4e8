//! Draft handles: the surface a recipe reads and writes through.
//!
//! A [`Draft`] stands in for one array or object of the base value. Reads
//! return child drafts for nested containers, so arbitrarily deep paths can be
//! edited; the first write to any node copies it and every ancestor up to the
//! root, and nothing else is ever copied.
//!
//! ```
//! use json_draft::{produce, Value};
//! use serde_json::json;
//!
//! let base = Value::from(json!({"a": {"x": 1}, "b": {"y": 2}}));
//! let next = produce(&base, |draft| {
//!     draft.at("a")?.set("x", 2)?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert_eq!(next, Value::from(json!({"a": {"x": 2}, "b": {"y": 2}})));
//! assert!(next.get("b").unwrap().ptr_eq(base.get("b").unwrap()));
//! ```

use std::fmt;
use std::rc::Rc;

use json_draft_util::{has, is, Key, Value, LENGTH};

use crate::error::Error;
use crate::item::{Item, Outcome};
use crate::scope::{expose, Entry, Prop, RecordId, ScopeRef, MAX_ARRAY_LENGTH};

/// Reflection data for one property of a draft.
#[derive(Clone, Debug)]
pub struct PropertyDescriptor {
    pub value: Item,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

/// Handle to one node of a draft tree.
///
/// Cloning a handle is cheap and yields the same draft. Handles stop working
/// when the produce call that created them returns.
#[derive(Clone)]
pub struct Draft {
    scope: ScopeRef,
    id: RecordId,
}

impl Draft {
    pub(crate) fn new(scope: ScopeRef, id: RecordId) -> Self {
        Self { scope, id }
    }

    /// Opens the root record of a fresh scope.
    pub(crate) fn root(scope: &ScopeRef, base: Value) -> Self {
        let id = scope.borrow_mut().create(None, base);
        Self::new(Rc::clone(scope), id)
    }

    pub(crate) fn id(&self) -> RecordId {
        self.id
    }

    #[cfg(test)]
    pub(crate) fn scope(&self) -> &ScopeRef {
        &self.scope
    }

    pub(crate) fn belongs_to(&self, scope: &ScopeRef) -> bool {
        Rc::ptr_eq(&self.scope, scope)
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// Reads a property. Nested arrays and objects come back as drafts;
    /// `None` means the property does not exist.
    pub fn get<K: Into<Key>>(&self, key: K) -> Result<Option<Item>, Error> {
        let key = key.into();
        let entry = {
            let mut scope = self.scope.borrow_mut();
            let prop = match scope.record(self.id)?.prop(&key) {
                Ok(prop) => prop,
                Err(_) => return Ok(None),
            };
            scope.read(self.id, prop)?
        };
        Ok(entry.map(|e| expose(&self.scope, e)))
    }

    /// Reads a nested array or object as a draft.
    pub fn at<K: Into<Key>>(&self, key: K) -> Result<Draft, Error> {
        let key = key.into();
        match self.get(&key)? {
            Some(Item::Draft(d)) => Ok(d),
            Some(_) => Err(Error::NotDraftable),
            None => Err(Error::NotFound(key.to_string())),
        }
    }

    /// Own keys in order: indices for arrays, field names for objects.
    pub fn keys(&self) -> Result<Vec<Key>, Error> {
        let scope = self.scope.borrow();
        let record = scope.record(self.id)?;
        if record.modified {
            return Ok(record.shadow()?.keys());
        }
        let mut keys = Vec::new();
        json_draft_util::each(&record.base, |k, _| keys.push(k));
        Ok(keys)
    }

    /// Existence check, the equivalent of `key in draft`.
    pub fn has<K: Into<Key>>(&self, key: K) -> Result<bool, Error> {
        let key = key.into();
        let scope = self.scope.borrow();
        let record = scope.record(self.id)?;
        let Ok(prop) = record.prop(&key) else {
            return Ok(false);
        };
        if record.modified {
            return Ok(record.shadow()?.contains(&prop));
        }
        Ok(has(&record.base, &key))
    }

    /// Number of elements of an array draft or entries of an object draft.
    pub fn len(&self) -> Result<usize, Error> {
        let scope = self.scope.borrow();
        Ok(scope.record(self.id)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }

    pub fn is_array(&self) -> Result<bool, Error> {
        let scope = self.scope.borrow();
        Ok(scope.record(self.id)?.is_array())
    }

    /// Whether this node has been copied because of a write at or below it.
    pub fn is_modified(&self) -> Result<bool, Error> {
        let scope = self.scope.borrow();
        Ok(scope.record(self.id)?.modified)
    }

    /// The base value this draft was opened over.
    pub fn original(&self) -> Result<Value, Error> {
        let scope = self.scope.borrow();
        Ok(scope.record(self.id)?.base.clone())
    }

    /// Describes a property. Every property reports configurable, except an
    /// array's `length`.
    pub fn describe<K: Into<Key>>(&self, key: K) -> Result<Option<PropertyDescriptor>, Error> {
        let key = key.into();
        let scope = self.scope.borrow();
        let record = scope.record(self.id)?;
        let Ok(prop) = record.prop(&key) else {
            return Ok(None);
        };
        if prop == Prop::Length {
            return Ok(Some(PropertyDescriptor {
                value: Item::Value(Value::from(record.len())),
                writable: true,
                enumerable: false,
                configurable: false,
            }));
        }
        let entry = if record.modified {
            record.shadow()?.get(&prop).cloned()
        } else if let Some(&child) = record.drafts.get(&prop) {
            Some(Entry::Draft(child))
        } else {
            record.base_value(&prop).cloned().map(Entry::Value)
        };
        Ok(entry.map(|e| PropertyDescriptor {
            value: expose(&self.scope, e),
            writable: true,
            enumerable: true,
            configurable: true,
        }))
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Writes a property. Writing the value already present is a no-op and
    /// leaves the node unmodified.
    pub fn set<K: Into<Key>, V: Into<Item>>(&self, key: K, value: V) -> Result<(), Error> {
        let key = key.into();
        let mut scope = self.scope.borrow_mut();
        let record = scope.record(self.id)?;
        let prop = record.prop(&key)?;
        let entry = scope.adopt(&self.scope, value.into())?;
        if prop == Prop::Length {
            check_length(&entry)?;
        }

        let record = scope.record(self.id)?;
        if !record.modified {
            let unchanged = match (&prop, &entry) {
                (Prop::Length, Entry::Value(v)) => is(&Value::from(record.len()), v),
                (_, Entry::Value(v)) => record.base_value(&prop).is_some_and(|b| is(b, v)),
                (_, Entry::Draft(child)) => record.drafts.get(&prop) == Some(child),
                _ => false,
            };
            if unchanged {
                return Ok(());
            }
            scope.mark_changed(self.id)?;
        }
        scope.record_mut(self.id)?.shadow_mut()?.put(prop, entry)
    }

    /// Removes a property. Array elements leave a `null` hole.
    pub fn delete<K: Into<Key>>(&self, key: K) -> Result<(), Error> {
        let key = key.into();
        let mut scope = self.scope.borrow_mut();
        let prop = scope.record(self.id)?.prop(&key)?;
        if prop == Prop::Length {
            return Err(Error::InvalidKey(LENGTH.into()));
        }
        scope.mark_changed(self.id)?;
        scope.record_mut(self.id)?.shadow_mut()?.remove(&prop);
        Ok(())
    }

    /// Appends to an array draft.
    pub fn push<V: Into<Item>>(&self, value: V) -> Result<(), Error> {
        let len = self.array_len()?;
        self.set(len, value)
    }

    /// Removes and returns the last element of an array draft.
    pub fn pop(&self) -> Result<Option<Item>, Error> {
        let len = self.array_len()?;
        if len == 0 {
            return Ok(None);
        }
        let last = self.get(len - 1)?;
        self.set(LENGTH, len - 1)?;
        Ok(last)
    }

    fn array_len(&self) -> Result<usize, Error> {
        let scope = self.scope.borrow();
        let record = scope.record(self.id)?;
        if !record.is_array() {
            return Err(Error::NotAnArray);
        }
        Ok(record.len())
    }

    /// Drafts never change their prototype.
    pub fn set_prototype(&self, _prototype: &Value) -> Result<(), Error> {
        Err(Error::UnsupportedOperation("setting the prototype of a draft"))
    }

    /// Drafts only accept plain writes through [`Draft::set`].
    pub fn define_property<K: Into<Key>>(
        &self,
        _key: K,
        _descriptor: PropertyDescriptor,
    ) -> Result<(), Error> {
        Err(Error::UnsupportedOperation("defining properties on a draft"))
    }

    // ── Nesting ───────────────────────────────────────────────────────────

    /// Runs `recipe` against this draft without opening a new scope.
    ///
    /// Writes made by the recipe land in this draft directly. Returns the
    /// recipe's explicit result, or this draft if it returned nothing.
    pub fn produce<F, R>(&self, recipe: F) -> Result<Item, Error>
    where
        F: FnOnce(&Draft) -> Result<R, Error>,
        R: Into<Outcome>,
    {
        self.scope.borrow().record(self.id)?;
        let outcome: Outcome = recipe(self)?.into();
        Ok(outcome.into_item().unwrap_or_else(|| Item::Draft(self.clone())))
    }
}

fn check_length(entry: &Entry) -> Result<(), Error> {
    match entry {
        Entry::Value(Value::Number(n))
            if *n >= 0.0 && n.fract() == 0.0 && *n <= MAX_ARRAY_LENGTH as f64 =>
        {
            Ok(())
        }
        _ => Err(Error::InvalidArrayLength),
    }
}

impl PartialEq for Draft {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.scope, &other.scope) && self.id == other.id
    }
}

impl fmt::Debug for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Draft(#{})", self.id)
    }
}
