//! Named leaf-level checks.
//!
//! An `IsDef` pairs a diagnostic name with a checker function. The engine
//! never looks inside a checker: it resolves a path in the actual tree and
//! hands the checker the path plus `Some(value)` when the path exists or
//! `None` when it does not. Deciding what absence means is left to the
//! checker, except for optional definitions, which pass on absence without
//! consulting it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path::Path;

/// Message recorded for a passing check.
pub const VALID_MESSAGE: &str = "is valid";
/// Message recorded by the closed-schema check for an uncovered path.
pub const UNEXPECTED_KEY_MESSAGE: &str = "unexpected key";
/// Message recorded when a required path is absent.
pub const KEY_MISSING_MESSAGE: &str = "expected this key to be present";

/// The verdict a checker returns for a single value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueResult {
    pub valid: bool,
    pub message: String,
}

impl ValueResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: VALID_MESSAGE.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    pub fn key_missing() -> Self {
        Self::invalid(KEY_MISSING_MESSAGE)
    }

    pub fn unexpected_key() -> Self {
        Self::invalid(UNEXPECTED_KEY_MESSAGE)
    }
}

/// A checker receives the path being tested and the value found there, or
/// `None` when the path does not exist in the actual tree.
pub type CheckerFn = dyn Fn(&Path, Option<&Value>) -> ValueResult + Send + Sync;

/// A named, optionally-optional predicate.
///
/// Cloning is cheap: the checker is shared behind an `Arc`, so one definition
/// can sit in many compiled schemas and be evaluated from many threads.
#[derive(Clone)]
pub struct IsDef {
    name: String,
    optional: bool,
    checker: Arc<CheckerFn>,
}

impl IsDef {
    pub fn new<F>(name: impl Into<String>, checker: F) -> Self
    where
        F: Fn(&Path, Option<&Value>) -> ValueResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            optional: false,
            checker: Arc::new(checker),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Return a copy that accepts absence. The name gains an `optional `
    /// prefix so reports show which variant ran.
    pub fn optional(&self) -> Self {
        Self {
            name: format!("optional {}", self.name),
            optional: true,
            checker: Arc::clone(&self.checker),
        }
    }

    /// Run the checker for `path`.
    pub fn check(&self, path: &Path, value: Option<&Value>) -> ValueResult {
        if self.optional && value.is_none() {
            return ValueResult::valid();
        }
        (self.checker)(path, value)
    }
}

impl fmt::Debug for IsDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IsDef")
            .field("name", &self.name)
            .field("optional", &self.optional)
            .finish_non_exhaustive()
    }
}

/// Build a named predicate from a checker function.
pub fn is<F>(name: impl Into<String>, checker: F) -> IsDef
where
    F: Fn(&Path, Option<&Value>) -> ValueResult + Send + Sync + 'static,
{
    IsDef::new(name, checker)
}

/// Mark `def` as optional without modifying it.
pub fn optional(def: &IsDef) -> IsDef {
    def.optional()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn positive() -> IsDef {
        is("positive", |_, value| match value.and_then(Value::as_i64) {
            Some(n) if n > 0 => ValueResult::valid(),
            Some(n) => ValueResult::invalid(format!("{n} is not positive")),
            None => ValueResult::key_missing(),
        })
    }

    #[test]
    fn check_delegates_to_checker() {
        let def = positive();
        let path = Path::root().extend_map("n");
        assert!(def.check(&path, Some(&json!(3))).valid);
        let failed = def.check(&path, Some(&json!(-1)));
        assert!(!failed.valid);
        assert!(failed.message.contains("not positive"));
    }

    #[test]
    fn absence_is_left_to_the_checker() {
        let def = positive();
        let result = def.check(&Path::root(), None);
        assert_eq!(result, ValueResult::key_missing());

        let tolerant = is("anything", |_, _| ValueResult::valid());
        assert!(tolerant.check(&Path::root(), None).valid);
    }

    #[test]
    fn optional_passes_on_absence_and_still_checks_presence() {
        let def = positive();
        let opt = optional(&def);
        assert!(opt.is_optional());
        assert!(!def.is_optional());
        assert_eq!(opt.name(), "optional positive");
        assert_eq!(def.name(), "positive");

        assert!(opt.check(&Path::root(), None).valid);
        assert!(!opt.check(&Path::root(), Some(&json!(0))).valid);
    }

    #[test]
    fn debug_shows_name_and_flag() {
        let rendered = format!("{:?}", positive().optional());
        assert!(rendered.contains("optional positive"));
        assert!(rendered.contains("optional: true"));
    }
}
