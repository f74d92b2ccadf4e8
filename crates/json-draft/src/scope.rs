//! Per-call arena of mutation records.
//!
//! A [`Scope`] owns every record created during one produce call. Records
//! reference their parent by index, so there are no reference cycles between
//! records, and handing out a [`Draft`] only clones the shared scope pointer.
//!
//! Once the call finishes the scope is revoked: its records are dropped and
//! every draft still pointing at it fails with [`Error::Revoked`].

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use json_draft_util::{is_draftable, shallow_copy, Key, Shallow, Value};
use tracing::trace;

use crate::draft::Draft;
use crate::error::Error;
use crate::item::Item;

pub(crate) type RecordId = usize;
pub(crate) type ScopeRef = Rc<RefCell<Scope>>;

/// Largest array length; indices run up to one below it.
pub(crate) const MAX_ARRAY_LENGTH: usize = u32::MAX as usize;

// ── Entries ───────────────────────────────────────────────────────────────

/// A slot of a shadow copy. Drafts are held by record index.
#[derive(Clone, Debug)]
pub(crate) enum Entry {
    Value(Value),
    Draft(RecordId),
    Array(Vec<Entry>),
    Object(IndexMap<String, Entry>),
}

/// A key normalized against the shape of the record it addresses.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Prop {
    Field(String),
    Index(usize),
    Length,
}

impl Prop {
    fn base_value<'a>(&self, base: &'a Value) -> Option<&'a Value> {
        match (self, base) {
            (Prop::Field(k), Value::Object(node)) => node.items().get(k),
            (Prop::Index(i), Value::Array(node)) => node.items().get(*i),
            _ => None,
        }
    }
}

// ── Shadow copy ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub(crate) enum Shadow {
    Array(Vec<Entry>),
    Object(IndexMap<String, Entry>),
}

impl Shadow {
    fn of(base: &Value) -> Option<Shadow> {
        Some(match shallow_copy(base)? {
            Shallow::Array(items) => Shadow::Array(items.into_iter().map(Entry::Value).collect()),
            Shallow::Object(entries) => {
                Shadow::Object(entries.into_iter().map(|(k, v)| (k, Entry::Value(v))).collect())
            }
        })
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Shadow::Array(items) => items.len(),
            Shadow::Object(entries) => entries.len(),
        }
    }

    pub(crate) fn get(&self, prop: &Prop) -> Option<&Entry> {
        match (self, prop) {
            (Shadow::Array(items), Prop::Index(i)) => items.get(*i),
            (Shadow::Object(entries), Prop::Field(k)) => entries.get(k),
            _ => None,
        }
    }

    pub(crate) fn contains(&self, prop: &Prop) -> bool {
        matches!((self, prop), (Shadow::Array(_), Prop::Length)) || self.get(prop).is_some()
    }

    /// Writes a slot. Arrays grow with `null` padding when written past
    /// their end; writing `Length` truncates or pads.
    pub(crate) fn put(&mut self, prop: Prop, entry: Entry) -> Result<(), Error> {
        match (self, prop) {
            (Shadow::Object(entries), Prop::Field(k)) => {
                entries.insert(k, entry);
            }
            (Shadow::Array(items), Prop::Index(i)) => {
                if i >= items.len() {
                    let len = i.checked_add(1).ok_or(Error::InvalidArrayLength)?;
                    grow(items, len)?;
                }
                items[i] = entry;
            }
            (Shadow::Array(items), Prop::Length) => {
                if let Entry::Value(Value::Number(n)) = entry {
                    let len = n as usize;
                    if len > items.len() {
                        grow(items, len)?;
                    } else {
                        items.truncate(len);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Removes an object entry, or leaves a `null` hole in an array.
    pub(crate) fn remove(&mut self, prop: &Prop) {
        match (self, prop) {
            (Shadow::Object(entries), Prop::Field(k)) => {
                entries.shift_remove(k);
            }
            (Shadow::Array(items), Prop::Index(i)) => {
                if let Some(slot) = items.get_mut(*i) {
                    *slot = Entry::Value(Value::Null);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn keys(&self) -> Vec<Key> {
        match self {
            Shadow::Array(items) => (0..items.len()).map(Key::Index).collect(),
            Shadow::Object(entries) => entries.keys().cloned().map(Key::Field).collect(),
        }
    }
}

/// Pads `items` with `null` up to `len` without aborting on huge lengths.
fn grow(items: &mut Vec<Entry>, len: usize) -> Result<(), Error> {
    if len > MAX_ARRAY_LENGTH {
        return Err(Error::InvalidArrayLength);
    }
    items
        .try_reserve(len - items.len())
        .map_err(|_| Error::InvalidArrayLength)?;
    items.resize(len, Entry::Value(Value::Null));
    Ok(())
}

// ── Record ────────────────────────────────────────────────────────────────

/// Bookkeeping behind one draft.
#[derive(Debug)]
pub(crate) struct Record {
    pub base: Value,
    /// Set once, never cleared. Implies `copy.is_some()`.
    pub modified: bool,
    pub finalized: bool,
    pub copy: Option<Shadow>,
    /// Child drafts handed out while unmodified; merged into `copy` on the
    /// first write.
    pub drafts: IndexMap<Prop, RecordId>,
    pub parent: Option<RecordId>,
    /// Finished value, available once finalization of this record is done.
    pub result: Option<Value>,
}

impl Record {
    fn new(parent: Option<RecordId>, base: Value) -> Self {
        Self {
            base,
            modified: false,
            finalized: false,
            copy: None,
            drafts: IndexMap::new(),
            parent,
            result: None,
        }
    }

    pub(crate) fn is_array(&self) -> bool {
        self.base.is_array()
    }

    /// Normalizes `key` for this record's shape.
    pub(crate) fn prop(&self, key: &Key) -> Result<Prop, Error> {
        match &self.base {
            Value::Object(_) => Ok(Prop::Field(key.as_field().into_owned())),
            Value::Array(_) if key.is_length() => Ok(Prop::Length),
            Value::Array(_) => key
                .as_index()
                .filter(|&i| i < MAX_ARRAY_LENGTH)
                .map(Prop::Index)
                .ok_or_else(|| Error::InvalidKey(key.to_string())),
            _ => Err(Error::NotDraftable),
        }
    }

    /// Current length of an array record, through the copy if modified.
    pub(crate) fn len(&self) -> usize {
        match &self.copy {
            Some(copy) => copy.len(),
            None => self.base.len().unwrap_or(0),
        }
    }

    pub(crate) fn base_value(&self, prop: &Prop) -> Option<&Value> {
        prop.base_value(&self.base)
    }

    pub(crate) fn shadow(&self) -> Result<&Shadow, Error> {
        self.copy.as_ref().ok_or_else(missing_copy)
    }

    pub(crate) fn shadow_mut(&mut self) -> Result<&mut Shadow, Error> {
        self.copy.as_mut().ok_or_else(missing_copy)
    }
}

fn missing_copy() -> Error {
    Error::InternalInvariantViolation("modified record without a shadow copy".into())
}

// ── Scope ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub(crate) struct Scope {
    records: Vec<Record>,
    revoked: bool,
    pub auto_freeze: bool,
}

impl Scope {
    pub(crate) fn shared(auto_freeze: bool) -> ScopeRef {
        Rc::new(RefCell::new(Scope {
            records: Vec::new(),
            revoked: false,
            auto_freeze,
        }))
    }

    pub(crate) fn check_live(&self) -> Result<(), Error> {
        if self.revoked {
            return Err(Error::Revoked);
        }
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn record(&self, id: RecordId) -> Result<&Record, Error> {
        self.check_live()?;
        self.records.get(id).ok_or_else(|| unknown_record(id))
    }

    pub(crate) fn record_mut(&mut self, id: RecordId) -> Result<&mut Record, Error> {
        self.check_live()?;
        self.records.get_mut(id).ok_or_else(|| unknown_record(id))
    }

    /// Opens a record over `base`.
    pub(crate) fn create(&mut self, parent: Option<RecordId>, base: Value) -> RecordId {
        let id = self.records.len();
        self.records.push(Record::new(parent, base));
        trace!(record = id, parent = ?parent, "draft created");
        id
    }

    /// Reads `prop` of record `id`, drafting draftable children on the way.
    pub(crate) fn read(&mut self, id: RecordId, prop: Prop) -> Result<Option<Entry>, Error> {
        let record = self.record(id)?;
        if prop == Prop::Length {
            return Ok(record.is_array().then(|| Entry::Value(Value::from(record.len()))));
        }

        if record.modified {
            let current = match record.shadow()?.get(&prop) {
                Some(entry) => entry,
                None => return Ok(None),
            };
            // Still the base child: draft it so writes below it propagate.
            let pristine = match current {
                Entry::Value(v) if is_draftable(v) => record
                    .base_value(&prop)
                    .is_some_and(|b| json_draft_util::is(b, v))
                    .then(|| v.clone()),
                _ => None,
            };
            let Some(value) = pristine else {
                return Ok(Some(current.clone()));
            };
            let child = self.create(Some(id), value);
            self.record_mut(id)?.shadow_mut()?.put(prop, Entry::Draft(child))?;
            return Ok(Some(Entry::Draft(child)));
        }

        if let Some(&child) = record.drafts.get(&prop) {
            return Ok(Some(Entry::Draft(child)));
        }
        let value = match record.base_value(&prop) {
            Some(v) => v.clone(),
            None => return Ok(None),
        };
        if !is_draftable(&value) {
            return Ok(Some(Entry::Value(value)));
        }
        let child = self.create(Some(id), value);
        self.record_mut(id)?.drafts.insert(prop, child);
        Ok(Some(Entry::Draft(child)))
    }

    /// Marks record `id` and all of its ancestors modified, materializing a
    /// shadow copy for each record that did not have one yet.
    pub(crate) fn mark_changed(&mut self, id: RecordId) -> Result<(), Error> {
        let mut next = Some(id);
        while let Some(id) = next {
            let record = self.record_mut(id)?;
            if record.modified {
                break;
            }
            let mut copy = Shadow::of(&record.base).ok_or(Error::NotDraftable)?;
            for (prop, child) in record.drafts.drain(..) {
                copy.put(prop, Entry::Draft(child))?;
            }
            record.copy = Some(copy);
            record.modified = true;
            trace!(record = id, "shadow copy created");
            next = record.parent;
        }
        Ok(())
    }

    /// Converts an item written by a recipe into a slot of this scope.
    pub(crate) fn adopt(&self, this: &ScopeRef, item: Item) -> Result<Entry, Error> {
        Ok(match item {
            Item::Value(v) => Entry::Value(v),
            Item::Draft(d) => {
                if !d.belongs_to(this) {
                    return Err(Error::InternalInvariantViolation(
                        "draft from another produce call".into(),
                    ));
                }
                Entry::Draft(d.id())
            }
            Item::Array(items) => Entry::Array(
                items
                    .into_iter()
                    .map(|item| self.adopt(this, item))
                    .collect::<Result<_, _>>()?,
            ),
            Item::Object(entries) => Entry::Object(
                entries
                    .into_iter()
                    .map(|(k, item)| Ok((k, self.adopt(this, item)?)))
                    .collect::<Result<_, Error>>()?,
            ),
        })
    }

    /// Drops all records. Drafts still held by callers become unusable.
    pub(crate) fn revoke(&mut self) {
        if !self.revoked {
            trace!(records = self.records.len(), "scope revoked");
        }
        self.revoked = true;
        self.records.clear();
    }
}

/// Converts a slot back into an item a recipe can use.
pub(crate) fn expose(this: &ScopeRef, entry: Entry) -> Item {
    match entry {
        Entry::Value(v) => Item::Value(v),
        Entry::Draft(id) => Item::Draft(Draft::new(Rc::clone(this), id)),
        Entry::Array(items) => Item::Array(items.into_iter().map(|e| expose(this, e)).collect()),
        Entry::Object(entries) => {
            Item::Object(entries.into_iter().map(|(k, e)| (k, expose(this, e))).collect())
        }
    }
}

fn unknown_record(id: RecordId) -> Error {
    Error::InternalInvariantViolation(format!("unknown record #{id}"))
}
