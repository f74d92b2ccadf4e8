//! Turns a draft tree into a plain value.
//!
//! Unmodified records resolve to their base value in O(1). Modified records
//! are rebuilt from their shadow copy, and each record is finished at most
//! once: a second visit reuses the cached result, which keeps subtrees shared
//! when the same draft was written into several places.
//!
//! With auto-freeze on, only the containers built here are frozen. Base
//! nodes reused by the result keep their flags, so the base is never touched.

use indexmap::IndexMap;
use json_draft_util::{is, Map, Value};

use crate::error::Error;
use crate::scope::{Entry, RecordId, Scope, Shadow};

impl Scope {
    pub(crate) fn finalize(&mut self, entry: Entry) -> Result<Value, Error> {
        match entry {
            Entry::Value(v) => Ok(v),
            Entry::Draft(id) => self.finalize_record(id),
            Entry::Array(items) => {
                let items = items
                    .into_iter()
                    .map(|e| self.finalize(e))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.build_array(items))
            }
            Entry::Object(entries) => {
                let entries = self.finalize_entries(entries, None)?;
                Ok(self.build_object(entries))
            }
        }
    }

    fn finalize_record(&mut self, id: RecordId) -> Result<Value, Error> {
        let record = self.record_mut(id)?;
        if !record.modified {
            return Ok(record.base.clone());
        }
        if record.finalized {
            // Finished earlier, or still on the stack if the copy reaches
            // back to this record.
            return record.result.clone().ok_or(Error::Cycle);
        }
        record.finalized = true;
        let base = record.base.clone();
        let copy = record.shadow()?.clone();

        let value = match copy {
            Shadow::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, entry) in items.into_iter().enumerate() {
                    let prior = base.as_array().and_then(|b| b.get(i));
                    out.push(self.finalize_child(prior, entry)?);
                }
                self.build_array(out)
            }
            Shadow::Object(entries) => {
                let entries = self.finalize_entries(entries, Some(&base))?;
                self.build_object(entries)
            }
        };
        self.record_mut(id)?.result = Some(value.clone());
        Ok(value)
    }

    fn finalize_entries(
        &mut self,
        entries: IndexMap<String, Entry>,
        base: Option<&Value>,
    ) -> Result<Map, Error> {
        let mut out = Map::with_capacity(entries.len());
        for (key, entry) in entries {
            let prior = base.and_then(Value::as_object).and_then(|b| b.get(&key));
            let value = self.finalize_child(prior, entry)?;
            out.insert(key, value);
        }
        Ok(out)
    }

    /// Base children that were never replaced are reused without a walk.
    fn finalize_child(&mut self, prior: Option<&Value>, entry: Entry) -> Result<Value, Error> {
        if let Entry::Value(v) = &entry {
            if prior.is_some_and(|p| is(p, v)) {
                return Ok(v.clone());
            }
        }
        self.finalize(entry)
    }

    fn build_array(&self, items: Vec<Value>) -> Value {
        if self.auto_freeze {
            Value::frozen_array(items)
        } else {
            Value::array(items)
        }
    }

    fn build_object(&self, entries: Map) -> Value {
        if self.auto_freeze {
            Value::frozen_object(entries)
        } else {
            Value::object(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::draft::Draft;
    use crate::scope::{Entry, Scope};
    use json_draft_util::Value;
    use serde_json::json;

    fn finish(draft: &Draft) -> Value {
        draft
            .scope()
            .borrow_mut()
            .finalize(Entry::Draft(draft.id()))
            .unwrap()
    }

    #[test]
    fn unmodified_record_returns_base() {
        let base = Value::from(json!({"a": {"b": 1}}));
        let d = Draft::root(&Scope::shared(false), base.clone());
        d.at("a").unwrap();
        assert!(finish(&d).ptr_eq(&base));
    }

    #[test]
    fn modified_record_reuses_untouched_children() {
        let base = Value::from(json!({"a": {"x": 1}, "b": {"y": 2}, "c": [1]}));
        let d = Draft::root(&Scope::shared(false), base.clone());
        d.at("a").unwrap().set("x", 2).unwrap();
        d.at("c").unwrap();
        let out = finish(&d);
        assert_eq!(out, Value::from(json!({"a": {"x": 2}, "b": {"y": 2}, "c": [1]})));
        assert!(!out.ptr_eq(&base));
        assert!(!out.get("a").unwrap().ptr_eq(base.get("a").unwrap()));
        assert!(out.get("b").unwrap().ptr_eq(base.get("b").unwrap()));
        assert!(out.get("c").unwrap().ptr_eq(base.get("c").unwrap()));
    }

    #[test]
    fn draft_written_twice_finalizes_once() {
        let base = Value::from(json!({"a": {"x": 1}}));
        let d = Draft::root(&Scope::shared(false), base);
        let a = d.at("a").unwrap();
        a.set("x", 5).unwrap();
        d.set("b", &a).unwrap();
        let out = finish(&d);
        assert!(out.get("a").unwrap().ptr_eq(out.get("b").unwrap()));
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let d = Draft::root(&Scope::shared(false), Value::from(json!({})));
        d.set("me", &d).unwrap();
        let err = d
            .scope()
            .borrow_mut()
            .finalize(Entry::Draft(d.id()))
            .unwrap_err();
        assert_eq!(err, crate::Error::Cycle);
    }

    #[test]
    fn auto_freeze_freezes_only_rebuilt_nodes() {
        let base = Value::from(json!({"a": {"x": 1}, "b": {"y": 2}}));
        let d = Draft::root(&Scope::shared(true), base.clone());
        d.at("a").unwrap().set("x", 2).unwrap();
        let out = finish(&d);
        assert!(out.is_frozen());
        assert!(out.get("a").unwrap().is_frozen());
        assert!(out.get("b").unwrap().ptr_eq(base.get("b").unwrap()));
        assert!(!base.get("b").unwrap().is_frozen());
        assert!(!base.is_frozen());
    }

    #[test]
    fn auto_freeze_leaves_an_unmodified_base_alone() {
        let base = Value::from(json!({"a": {"x": 1}}));
        let d = Draft::root(&Scope::shared(true), base.clone());
        d.at("a").unwrap();
        let out = finish(&d);
        assert!(out.ptr_eq(&base));
        assert!(!base.is_frozen());
        assert!(!base.get("a").unwrap().is_frozen());
    }

    #[test]
    fn without_auto_freeze_results_stay_writable() {
        let d = Draft::root(&Scope::shared(false), Value::from(json!({"a": 1})));
        d.set("a", 2).unwrap();
        assert!(!finish(&d).is_frozen());
    }
}
