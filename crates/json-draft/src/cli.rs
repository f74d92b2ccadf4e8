//! Command-line shell around [`produce`].
//!
//! Edits arrive as a JSON array and are applied inside one produce call, so
//! the printed document shares every untouched subtree with the input.
//!
//! ```json
//! [
//!   {"op": "set", "path": ["a", "x"], "value": 2},
//!   {"op": "delete", "path": ["b"]},
//!   {"op": "push", "path": ["list"], "value": 4}
//! ]
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::draft::Draft;
use crate::error::Error;
use crate::produce::produce;
use json_draft_util::{Key, Value};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Draft(#[from] Error),
    #[error("edit #{0} needs a non-empty path")]
    EmptyPath(usize),
}

/// One path step: a field name or an array index.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Index(usize),
    Field(String),
}

impl From<&Step> for Key {
    fn from(step: &Step) -> Self {
        match step {
            Step::Index(i) => Key::Index(*i),
            Step::Field(s) => Key::Field(s.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Edit {
    Set {
        path: Vec<Step>,
        value: serde_json::Value,
    },
    Delete {
        path: Vec<Step>,
    },
    Push {
        #[serde(default)]
        path: Vec<Step>,
        value: serde_json::Value,
    },
}

impl Edit {
    fn apply(&self, root: &Draft) -> Result<(), Error> {
        match self {
            Edit::Set { path, value } => {
                let (target, last) = walk_to_parent(root, path)?;
                target.set(last, Value::from(value))
            }
            Edit::Delete { path } => {
                let (target, last) = walk_to_parent(root, path)?;
                target.delete(last)
            }
            Edit::Push { path, value } => walk(root, path)?.push(Value::from(value)),
        }
    }
}

fn walk(root: &Draft, path: &[Step]) -> Result<Draft, Error> {
    let mut node = root.clone();
    for step in path {
        node = node.at(step)?;
    }
    Ok(node)
}

fn walk_to_parent<'a>(root: &Draft, path: &'a [Step]) -> Result<(Draft, &'a Step), Error> {
    let (last, parents) = path
        .split_last()
        .ok_or_else(|| Error::InvalidKey(String::new()))?;
    Ok((walk(root, parents)?, last))
}

/// Installs a stderr logger filtered by `JSON_DRAFT_LOG` (default `warn`).
///
/// - `JSON_DRAFT_LOG=debug` - one line per produce call
/// - `JSON_DRAFT_LOG=trace` - draft creation, copies and revocation
pub fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env("JSON_DRAFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Parses `doc` and `edits`, applies the edits, and returns the resulting
/// document as compact JSON.
pub fn apply_edits(doc: &str, edits: &str) -> Result<String, CliError> {
    let base = Value::from(serde_json::from_str::<serde_json::Value>(doc)?);
    let edits: Vec<Edit> = serde_json::from_str(edits)?;
    for (i, edit) in edits.iter().enumerate() {
        if let Edit::Set { path, .. } | Edit::Delete { path } = edit {
            if path.is_empty() {
                return Err(CliError::EmptyPath(i));
            }
        }
    }

    let next = produce(&base, |draft| {
        for edit in &edits {
            edit.apply(draft)?;
        }
        Ok(())
    })?;
    Ok(serde_json::Value::from(&next).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_edits_in_order() {
        let out = apply_edits(
            r#"{"a": {"x": 1}, "b": 2, "list": [1]}"#,
            r#"[
                {"op": "set", "path": ["a", "x"], "value": 2},
                {"op": "delete", "path": ["b"]},
                {"op": "push", "path": ["list"], "value": 4},
                {"op": "set", "path": ["list", 0], "value": "first"}
            ]"#,
        )
        .unwrap();
        assert_eq!(out, r#"{"a":{"x":2},"list":["first",4]}"#);
    }

    #[test]
    fn no_edits_echoes_document() {
        assert_eq!(apply_edits(r#"{"a":[1,2]}"#, "[]").unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn empty_path_is_rejected() {
        let err = apply_edits("{}", r#"[{"op": "delete", "path": []}]"#).unwrap_err();
        assert!(matches!(err, CliError::EmptyPath(0)));
    }

    #[test]
    fn missing_path_segment_is_reported() {
        let err = apply_edits("{}", r#"[{"op": "set", "path": ["a", "b"], "value": 1}]"#)
            .unwrap_err();
        assert!(matches!(err, CliError::Draft(Error::NotFound(ref k)) if k == "a"));
    }

    #[test]
    fn huge_index_is_an_error_not_a_panic() {
        let err = apply_edits(
            r#"{"list": [1]}"#,
            r#"[{"op": "set", "path": ["list", 18446744073709551615], "value": 1}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Draft(Error::InvalidKey(_))));

        let err = apply_edits(
            r#"{"list": [1]}"#,
            r#"[{"op": "set", "path": ["list", "length"], "value": 1e300}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Draft(Error::InvalidArrayLength)));
    }

    #[test]
    fn malformed_input_is_a_json_error() {
        assert!(matches!(apply_edits("{", "[]"), Err(CliError::Json(_))));
        assert!(matches!(
            apply_edits("{}", r#"[{"op": "rename"}]"#),
            Err(CliError::Json(_))
        ));
    }
}
