//! Closed-schema matching.
//!
//! `Strict` runs a lax validator, then walks the actual tree and records an
//! `unexpected key` failure for every leaf the lax run did not cover. Schemas
//! assert leaves, not the containers above them, so a path also counts as
//! covered when some recorded path lies beneath it.
//!
//! Recorded paths are kept in a sorted vector. Every descendant of `p`
//! renders as `p.` followed by more text, and all of those strings sit in one
//! contiguous run of the sorted vector, so a single binary search for `p.`
//! answers the descendant question. That makes the whole check
//! O(A log S) for A actual leaves and S recorded checks.

use std::convert::Infallible;

use serde_json::Value;
use tracing::{debug, warn};

use shapecheck_contracts::{
    path::{Path, SEPARATOR},
    predicate::ValueResult,
    results::Results,
};

use crate::{
    traits::Validator,
    walk::{walk, WalkInfo},
};

/// The rendered paths a lax run recorded, in lexicographic order.
#[derive(Debug, Clone, Default)]
pub struct CoveredPaths {
    sorted: Vec<String>,
}

impl CoveredPaths {
    pub fn from_results(results: &Results) -> Self {
        let mut sorted: Vec<String> = results.rendered_paths().map(str::to_string).collect();
        sorted.sort_unstable();
        sorted.dedup();
        Self { sorted }
    }

    /// Whether `path` was checked directly or has a checked descendant.
    pub fn covers(&self, path: &Path) -> bool {
        if self.sorted.is_empty() {
            return false;
        }
        // Every recorded path descends from the root. A top-level `""` key
        // renders like the root but is not it.
        if path.is_root() {
            return true;
        }

        let rendered = path.to_string();
        if self
            .sorted
            .binary_search_by(|candidate| candidate.as_str().cmp(rendered.as_str()))
            .is_ok()
        {
            return true;
        }

        let prefix = format!("{rendered}{SEPARATOR}");
        let idx = self
            .sorted
            .partition_point(|candidate| candidate.as_str() < prefix.as_str());
        self.sorted
            .get(idx)
            .is_some_and(|candidate| candidate.starts_with(&prefix))
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}

/// Wraps a lax validator with closed-schema semantics.
#[derive(Debug, Clone)]
pub struct Strict<V> {
    inner: V,
}

impl<V: Validator> Strict<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V: Validator> Validator for Strict<V> {
    fn validate(&self, actual: &Value) -> Results {
        let mut results = self.inner.validate(actual);
        let covered = CoveredPaths::from_results(&results);

        let mut unexpected = 0usize;
        let walked = walk(actual, &mut |info: WalkInfo<'_, Value>| -> Result<(), Infallible> {
            if !covered.covers(info.path) {
                warn!(path = %info.path, kind = %info.kind, "unexpected key");
                results.record(info.path.clone(), ValueResult::unexpected_key());
                unexpected += 1;
            }
            Ok(())
        });
        if let Err(never) = walked {
            match never {}
        }

        debug!(
            covered = covered.len(),
            unexpected,
            passed = results.succeeded(),
            "closed-schema check complete"
        );
        results
    }
}

/// Wrap `validator` with closed-schema semantics.
pub fn strict<V: Validator>(validator: V) -> Strict<V> {
    Strict::new(validator)
}
