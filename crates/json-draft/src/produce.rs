//! Entry points: run a recipe against a draft and collect the result.

use std::rc::Rc;

use json_draft_util::Value;
use tracing::debug;

use crate::config::Config;
use crate::draft::Draft;
use crate::error::Error;
use crate::item::{Item, Outcome};
use crate::scope::{Entry, Scope, ScopeRef};

/// Runs `recipe` against a draft of `base` with the process-wide
/// configuration and returns the next value.
///
/// The recipe either edits the draft in place or returns a replacement
/// value; doing both fails with [`Error::ConflictingResult`]. If it does
/// neither, the result is `base` itself.
///
/// ```
/// use json_draft::{produce, Value};
/// use serde_json::json;
///
/// let base = Value::from(json!([1, 2, 3]));
/// let same = produce(&base, |_| Ok(())).unwrap();
/// assert!(same.ptr_eq(&base));
///
/// let next = produce(&base, |draft| draft.push(4)).unwrap();
/// assert_eq!(next, Value::from(json!([1, 2, 3, 4])));
/// ```
pub fn produce<F, R>(base: &Value, recipe: F) -> Result<Value, Error>
where
    F: FnOnce(&Draft) -> Result<R, Error>,
    R: Into<Outcome>,
{
    Producer::new().produce(base, recipe)
}

/// Curried form of [`produce`]: binds the recipe now and takes the state,
/// plus one extra argument for the recipe, later.
pub fn curry<F, A, R>(recipe: F) -> impl Fn(&Value, A) -> Result<Value, Error>
where
    F: Fn(&Draft, A) -> Result<R, Error>,
    R: Into<Outcome>,
{
    move |state, arg| Producer::new().produce(state, |draft| recipe(draft, arg))
}

/// Like [`curry`], with `initial` standing in for a missing state.
pub fn curry_with_initial<F, A, R>(
    recipe: F,
    initial: Value,
) -> impl Fn(Option<&Value>, A) -> Result<Value, Error>
where
    F: Fn(&Draft, A) -> Result<R, Error>,
    R: Into<Outcome>,
{
    move |state, arg| {
        Producer::new().produce(state.unwrap_or(&initial), |draft| recipe(draft, arg))
    }
}

/// A produce entry point with its own [`Config`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Producer {
    config: Config,
}

impl Producer {
    /// Snapshots the process-wide configuration.
    pub fn new() -> Self {
        Self::with_config(Config::global())
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn produce<F, R>(&self, base: &Value, recipe: F) -> Result<Value, Error>
    where
        F: FnOnce(&Draft) -> Result<R, Error>,
        R: Into<Outcome>,
    {
        let scope = Scope::shared(self.config.auto_freeze);
        let _revoke = RevokeOnDrop(Rc::clone(&scope));
        let root = Draft::root(&scope, base.clone());

        let outcome: Outcome = recipe(&root)?.into();
        let mut s = scope.borrow_mut();
        let modified = s.record(root.id())?.modified;
        let entry = match outcome.into_item() {
            None => Entry::Draft(root.id()),
            Some(Item::Draft(d)) if d == root => Entry::Draft(root.id()),
            Some(_) if modified => return Err(Error::ConflictingResult),
            Some(item) => s.adopt(&scope, item)?,
        };
        let result = s.finalize(entry)?;
        debug!(records = s.len(), modified, "produce finished");
        Ok(result)
    }

    pub fn curry<F, A, R>(&self, recipe: F) -> impl Fn(&Value, A) -> Result<Value, Error>
    where
        F: Fn(&Draft, A) -> Result<R, Error>,
        R: Into<Outcome>,
    {
        let producer = *self;
        move |state, arg| producer.produce(state, |draft| recipe(draft, arg))
    }

    pub fn curry_with_initial<F, A, R>(
        &self,
        recipe: F,
        initial: Value,
    ) -> impl Fn(Option<&Value>, A) -> Result<Value, Error>
    where
        F: Fn(&Draft, A) -> Result<R, Error>,
        R: Into<Outcome>,
    {
        let producer = *self;
        move |state, arg| producer.produce(state.unwrap_or(&initial), |draft| recipe(draft, arg))
    }
}

/// Revokes the scope on every exit path, unwinding included.
struct RevokeOnDrop(ScopeRef);

impl Drop for RevokeOnDrop {
    fn drop(&mut self) {
        if let Ok(mut scope) = self.0.try_borrow_mut() {
            scope.revoke();
        }
    }
}
