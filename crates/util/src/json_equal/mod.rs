//! Structural equality for [`Value`](crate::Value) trees.

mod deep_equal;

pub use deep_equal::deep_equal;
