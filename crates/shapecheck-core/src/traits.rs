//! The validator trait shared by compiled schemas and their wrappers.

use std::sync::Arc;

use serde_json::Value;

use shapecheck_contracts::results::Results;

/// Anything that can check an actual tree and report per-path outcomes.
///
/// Implementations hold no mutable state: the same validator may be run
/// against many trees, from many threads, and every call returns a fresh
/// `Results` owned by the caller.
pub trait Validator: Send + Sync {
    fn validate(&self, actual: &Value) -> Results;
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, actual: &Value) -> Results {
        (**self).validate(actual)
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, actual: &Value) -> Results {
        (**self).validate(actual)
    }
}
