//! Aggregated match reports.
//!
//! `Results` maps each rendered path to the outcomes recorded for it. Within
//! one evaluation every path is written once and `record` replaces any
//! earlier entry. Merging reports from independent validators keeps every
//! distinct outcome per path instead, so a failure from one validator
//! survives a pass from another at the same path.
//!
//! Entries are kept in a `BTreeMap`, so iteration is always in rendered-path
//! order and two reports built from the same checks compare equal regardless
//! of the order the checks ran in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{path::Path, predicate::ValueResult};

/// The verdict for one checked path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub path: Path,
    pub valid: bool,
    pub message: String,
}

impl Outcome {
    pub fn new(path: Path, result: ValueResult) -> Self {
        Self {
            path,
            valid: result.valid,
            message: result.message,
        }
    }
}

/// The report produced by one evaluation, or by merging several.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Results {
    fields: BTreeMap<String, Vec<Outcome>>,
}

impl Results {
    pub fn new() -> Self {
        Self::default()
    }

    /// A report holding a single entry.
    pub fn single(path: Path, result: ValueResult) -> Self {
        let mut results = Self::new();
        results.record(path, result);
        results
    }

    /// Record the verdict for `path`, replacing anything recorded earlier for
    /// the same rendered path.
    pub fn record(&mut self, path: Path, result: ValueResult) {
        self.record_outcome(Outcome::new(path, result));
    }

    pub fn record_outcome(&mut self, outcome: Outcome) {
        self.fields.insert(outcome.path.to_string(), vec![outcome]);
    }

    /// Add every outcome of `other` to `self`. Outcomes already present at a
    /// path are not duplicated, so merging a report into itself is a no-op.
    pub fn merge(&mut self, other: &Results) {
        for (rendered, outcomes) in &other.fields {
            let existing = self.fields.entry(rendered.clone()).or_default();
            for outcome in outcomes {
                if !existing.contains(outcome) {
                    existing.push(outcome.clone());
                }
            }
        }
    }

    /// Iterate over every `(path, outcome)` pair in rendered-path order. A
    /// path reached by several merged validators yields one pair per
    /// outcome. Every call starts a fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Outcome)> + '_ {
        self.into_iter().map(|outcome| (&outcome.path, outcome))
    }

    /// Only the failing outcomes, in rendered-path order.
    pub fn failures(&self) -> impl Iterator<Item = &Outcome> + '_ {
        self.into_iter().filter(|outcome| !outcome.valid)
    }

    /// Every outcome recorded for `path`.
    pub fn outcomes(&self, path: &Path) -> &[Outcome] {
        self.fields
            .get(&path.to_string())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The verdict for `path`: its first failing outcome, or its first
    /// outcome when all of them passed.
    pub fn get(&self, path: &Path) -> Option<&Outcome> {
        let outcomes = self.outcomes(path);
        outcomes
            .iter()
            .find(|outcome| !outcome.valid)
            .or_else(|| outcomes.first())
    }

    /// Rendered paths of every entry, in sorted order.
    pub fn rendered_paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    /// Number of distinct paths recorded.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True iff no recorded outcome failed. An empty report succeeds.
    pub fn succeeded(&self) -> bool {
        self.into_iter().all(|outcome| outcome.valid)
    }
}

impl<'a> IntoIterator for &'a Results {
    type Item = &'a Outcome;
    type IntoIter = std::iter::Flatten<std::collections::btree_map::Values<'a, String, Vec<Outcome>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(path: &str) -> Path {
        Path::must_parse(path)
    }

    #[test]
    fn empty_results_succeed() {
        let results = Results::new();
        assert!(results.succeeded());
        assert!(results.is_empty());
    }

    #[test]
    fn one_failure_fails_the_report() {
        let mut results = Results::new();
        results.record(at("a"), ValueResult::valid());
        results.record(at("b"), ValueResult::invalid("expected 1, got 2"));
        assert!(!results.succeeded());
        let failures: Vec<_> = results.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].path, at("b"));
    }

    #[test]
    fn last_write_wins() {
        let mut results = Results::new();
        results.record(at("a"), ValueResult::invalid("first"));
        results.record(at("a"), ValueResult::valid());
        assert_eq!(results.len(), 1);
        assert!(results.succeeded());
    }

    #[test]
    fn iteration_is_sorted_and_restartable() {
        let mut results = Results::new();
        results.record(at("b"), ValueResult::valid());
        results.record(at("a.[0]"), ValueResult::valid());
        results.record(at("a"), ValueResult::valid());

        let first: Vec<String> = results.iter().map(|(p, _)| p.to_string()).collect();
        let second: Vec<String> = results.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(first, vec!["a", "a.[0]", "b"]);
        assert_eq!(first, second);
    }

    #[test]
    fn merge_combines_entries() {
        let mut left = Results::single(at("a"), ValueResult::valid());
        let right = Results::single(at("b"), ValueResult::unexpected_key());
        left.merge(&right);
        assert_eq!(left.len(), 2);
        assert!(!left.succeeded());
        assert_eq!(left.get(&at("b")).unwrap().message, "unexpected key");
    }

    #[test]
    fn merge_keeps_a_failure_that_another_report_passes() {
        let mut left = Results::single(at("a"), ValueResult::invalid("expected 1, got 2"));
        let right = Results::single(at("a"), ValueResult::valid());
        left.merge(&right);

        assert!(!left.succeeded());
        assert_eq!(left.len(), 1);
        assert_eq!(left.outcomes(&at("a")).len(), 2);
        assert_eq!(left.get(&at("a")).unwrap().message, "expected 1, got 2");

        // Merge order does not matter.
        let mut reversed = Results::single(at("a"), ValueResult::valid());
        reversed.merge(&Results::single(at("a"), ValueResult::invalid("expected 1, got 2")));
        assert!(!reversed.succeeded());
        assert_eq!(reversed.failures().count(), 1);
    }

    #[test]
    fn iteration_yields_every_merged_outcome() {
        let mut results = Results::single(at("a"), ValueResult::invalid("first"));
        results.merge(&Results::single(at("a"), ValueResult::invalid("second")));
        results.merge(&Results::single(at("b"), ValueResult::valid()));

        let messages: Vec<&str> = (&results).into_iter().map(|o| o.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "is valid"]);
        assert_eq!(results.iter().count(), 3);
        assert!(results.outcomes(&at("missing")).is_empty());
    }

    #[test]
    fn merge_with_itself_is_idempotent() {
        let mut results = Results::new();
        results.record(at("a"), ValueResult::valid());
        results.record(at("b"), ValueResult::key_missing());
        let before = results.clone();

        let snapshot = results.clone();
        results.merge(&snapshot);

        assert_eq!(results, before);
        assert_eq!(results.succeeded(), before.succeeded());
    }

    #[test]
    fn serializes_for_reporting() {
        let results = Results::single(at("a.[0]"), ValueResult::invalid("nope"));
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["fields"]["a.[0]"][0]["path"], "a.[0]");
        assert_eq!(json["fields"]["a.[0]"][0]["valid"], false);
    }
}
