//! Schema compilation and evaluation.
//!
//! Compilation walks a `Schema` once and flattens it into an ordered list of
//! `(Path, IsDef)` pairs. Predicate leaves are used as-is; every other leaf
//! (a scalar, an empty map or an empty sequence) is wrapped in `is_equal`.
//! Non-empty containers never get a check of their own, only their leaves do.
//!
//! Evaluation resolves each compiled path in the actual tree and runs the
//! predicate on whatever was found there, so it never needs to walk the
//! actual tree itself.

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use shapecheck_contracts::{
    error::{MatchError, MatchResult},
    path::Path,
    predicate::IsDef,
    results::Results,
};

use crate::{
    predicates::is_equal,
    schema::Schema,
    strict::Strict,
    traits::Validator,
    walk::{walk, WalkInfo},
};

/// One compiled check: the predicate to run at a path.
#[derive(Debug, Clone)]
pub struct FlatValidator {
    pub path: Path,
    pub def: IsDef,
}

/// An immutable, ordered list of flat validators.
#[derive(Debug, Clone, Default)]
pub struct CompiledSchema {
    validators: Vec<FlatValidator>,
}

impl CompiledSchema {
    /// Flatten `schema`. The top level must be a map, a sequence or a
    /// predicate; a bare scalar is rejected with
    /// `MatchError::UnsupportedSchema`.
    pub fn compile(schema: &Schema) -> MatchResult<Self> {
        if let Schema::Scalar(_) = schema {
            let shape = schema.describe();
            warn!(%shape, "refusing to compile non-container schema");
            return Err(MatchError::UnsupportedSchema { shape });
        }

        let mut validators = Vec::new();
        walk(schema, &mut |info: WalkInfo<'_, Schema>| -> MatchResult<()> {
            let def = match info.node {
                Schema::Predicate(def) => def.clone(),
                Schema::Scalar(value) => is_equal(value.clone()),
                Schema::Map(_) => is_equal(Value::Object(Map::new())),
                Schema::Sequence(_) => is_equal(Value::Array(Vec::new())),
            };
            trace!(path = %info.path, kind = %info.kind, predicate = def.name(), "compiled leaf");
            validators.push(FlatValidator {
                path: info.path.clone(),
                def,
            });
            Ok(())
        })?;

        debug!(checks = validators.len(), "schema compiled");
        Ok(Self { validators })
    }

    /// Run every check against `actual`, in compiled order.
    pub fn evaluate(&self, actual: &Value) -> Results {
        let mut results = Results::new();
        for flat in &self.validators {
            let found = flat.path.get_from(actual);
            let result = flat.def.check(&flat.path, found);
            trace!(
                path = %flat.path,
                predicate = flat.def.name(),
                exists = found.is_some(),
                valid = result.valid,
                "evaluated check"
            );
            results.record(flat.path.clone(), result);
        }
        debug!(
            checks = self.validators.len(),
            passed = results.succeeded(),
            "evaluation complete"
        );
        results
    }

    pub fn validators(&self) -> &[FlatValidator] {
        &self.validators
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for CompiledSchema {
    fn validate(&self, actual: &Value) -> Results {
        self.evaluate(actual)
    }
}

/// A compiled schema together with its matching mode.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Keys the schema does not mention are ignored.
    Lax(CompiledSchema),
    /// Every leaf of the actual tree must be covered by some check.
    Closed(Strict<CompiledSchema>),
}

impl Matcher {
    /// Switch to closed-schema matching. Already-closed matchers are returned
    /// unchanged.
    pub fn strict(self) -> Self {
        match self {
            Matcher::Lax(compiled) => Matcher::Closed(Strict::new(compiled)),
            closed => closed,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Matcher::Closed(_))
    }

    pub fn compiled(&self) -> &CompiledSchema {
        match self {
            Matcher::Lax(compiled) => compiled,
            Matcher::Closed(strict) => strict.inner(),
        }
    }
}

impl Validator for Matcher {
    fn validate(&self, actual: &Value) -> Results {
        match self {
            Matcher::Lax(compiled) => compiled.validate(actual),
            Matcher::Closed(strict) => strict.validate(actual),
        }
    }
}

/// Compile `schema` into a matcher.
///
/// Sequence schemas always come back closed: matching only a prefix of a
/// sequence and ignoring the remaining elements is never what a caller means.
pub fn compile(schema: &Schema) -> MatchResult<Matcher> {
    let compiled = CompiledSchema::compile(schema)?;
    match schema {
        Schema::Sequence(_) => Ok(Matcher::Closed(Strict::new(compiled))),
        _ => Ok(Matcher::Lax(compiled)),
    }
}

/// Compile a schema the caller knows to be well formed.
///
/// # Panics
///
/// Panics if `schema` cannot be compiled.
pub fn must_compile(schema: &Schema) -> Matcher {
    match compile(schema) {
        Ok(matcher) => matcher,
        Err(e) => panic!("{e}"),
    }
}
