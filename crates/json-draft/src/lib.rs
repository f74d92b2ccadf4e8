//! json-draft - copy-on-write drafts over immutable JSON-like trees.
//!
//! A recipe edits a [`Draft`] of a base [`Value`] with ordinary
//! `get`/`set`/`delete` calls. [`produce`] then returns a new value in which
//! only the edited branches are new nodes; every untouched subtree is the
//! very same node as in the base.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`draft`] | [`Draft`] handles and property reflection |
//! | [`item`] | [`Item`] values written through drafts, recipe [`Outcome`]s |
//! | [`produce`](mod@produce) | [`produce`], currying, [`Producer`] |
//! | [`config`] | process-wide flags and [`Config`] |
//! | [`cli`] | the `json-draft` command-line shell |
//! | [`error`] | [`Error`] |
//!
//! # Example
//!
//! ```
//! use json_draft::{produce, Value};
//! use serde_json::json;
//!
//! let base = Value::from(json!({"todos": [{"done": false}, {"done": false}]}));
//! let next = produce(&base, |draft| {
//!     draft.at("todos")?.at(0usize)?.set("done", true)?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert_eq!(next, Value::from(json!({"todos": [{"done": true}, {"done": false}]})));
//! let (old, new) = (base.get("todos").unwrap(), next.get("todos").unwrap());
//! assert!(new.get(1usize).unwrap().ptr_eq(old.get(1usize).unwrap()));
//! ```

pub mod cli;
pub mod config;
pub mod draft;
pub mod error;
pub mod item;
pub mod produce;

mod finalize;
mod scope;

pub use config::{auto_freeze, set_auto_freeze, Config};
pub use draft::{Draft, PropertyDescriptor};
pub use error::Error;
pub use item::{Item, Outcome};
pub use produce::{curry, curry_with_initial, produce, Producer};

pub use json_draft_util::{Key, Map, Value, LENGTH};
