//! Running several validators against one actual tree.

use serde_json::Value;
use tracing::debug;

use shapecheck_contracts::results::Results;

use crate::traits::Validator;

/// Runs every member validator against the same actual tree and merges
/// their reports. Members run independently: a failure in one never stops
/// the others, and none may rely on running before another.
#[derive(Default)]
pub struct Compose {
    validators: Vec<Box<dyn Validator>>,
}

impl Compose {
    pub fn new(validators: Vec<Box<dyn Validator>>) -> Self {
        Self { validators }
    }

    /// Add a member validator, returning `self` for chaining.
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for Compose {
    fn validate(&self, actual: &Value) -> Results {
        let mut combined = Results::new();
        for validator in &self.validators {
            combined.merge(&validator.validate(actual));
        }
        debug!(
            members = self.validators.len(),
            entries = combined.len(),
            passed = combined.succeeded(),
            "composed validation complete"
        );
        combined
    }
}

/// Combine `validators` into one.
pub fn compose(validators: Vec<Box<dyn Validator>>) -> Compose {
    Compose::new(validators)
}
