//! json-draft-util - Value tree and primitive helpers for json-draft
//!
//! This crate provides the immutable, structurally shared [`Value`] tree the
//! draft engine operates on, together with the small helpers it treats as
//! black boxes: SameValue comparison, structural equality, shallow copying,
//! enumeration, own-key checks and freezing.

pub mod convert;
pub mod draftable;
pub mod each;
pub mod freeze;
pub mod has;
pub mod is;
pub mod json_equal;
pub mod key;
pub mod shallow_copy;
pub mod value;

// Re-exports for convenience
pub use draftable::is_draftable;
pub use each::each;
pub use freeze::freeze;
pub use has::has;
pub use is::is;
pub use json_equal::deep_equal;
pub use key::{Key, LENGTH};
pub use shallow_copy::{shallow_copy, Shallow};
pub use value::{Map, Node, Value, ValueError};
