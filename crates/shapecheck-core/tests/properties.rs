//! End-to-end properties of compilation, evaluation and closed matching.

use std::sync::Arc;
use std::thread;

use serde_json::json;

use shapecheck_contracts::{is, optional, Path, Results, ValueResult};
use shapecheck_core::{
    compile, compose, must_compile, predicates::{is_any, is_equal}, CompiledSchema, Schema, Validator,
};

fn eq(expected: serde_json::Value) -> Schema {
    Schema::from(is("eq", move |_, actual| match actual {
        Some(actual) if *actual == expected => ValueResult::valid(),
        Some(actual) => ValueResult::invalid(format!("expected {expected}, got {actual}")),
        None => ValueResult::key_missing(),
    }))
}

fn failed_paths(results: &Results) -> Vec<String> {
    results.failures().map(|o| o.path.to_string()).collect()
}

#[test]
fn compiled_paths_round_trip_through_parse() {
    let schema = Schema::from(json!({
        "items": [ { "name": "a", "tags": ["x", "y"] }, {} ],
        "meta": { "count": 2 }
    }));
    let compiled = CompiledSchema::compile(&schema).unwrap();
    assert!(!compiled.is_empty());
    for flat in compiled.validators() {
        let rendered = flat.path.to_string();
        assert_eq!(Path::parse(&rendered).unwrap(), flat.path, "round trip of {rendered}");
    }
}

#[test]
fn containers_are_never_checked_directly() {
    let schema = Schema::from(json!({ "a": { "b": { "c": 1 } }, "s": [[1]] }));
    let compiled = CompiledSchema::compile(&schema).unwrap();
    let rendered: Vec<String> = compiled
        .validators()
        .iter()
        .map(|flat| flat.path.to_string())
        .collect();
    for container in ["", "a", "a.b", "s", "s.[0]"] {
        assert!(!rendered.iter().any(|p| p == container), "{container} was checked");
    }
    assert_eq!(rendered, vec!["a.b.c", "s.[0].[0]"]);
}

#[test]
fn empty_collection_leaf_checks_kind_and_emptiness() {
    let matcher = must_compile(&Schema::from(json!({ "list": [] })));
    assert_eq!(matcher.compiled().len(), 1);
    assert!(matcher.validate(&json!({ "list": [] })).succeeded());
    assert_eq!(failed_paths(&matcher.validate(&json!({ "list": [1] }))), vec!["list"]);
    assert_eq!(failed_paths(&matcher.validate(&json!({ "list": {} }))), vec!["list"]);
}

#[test]
fn optional_predicates_pass_on_absence() {
    let def = optional(&is_equal(json!("v")));
    let matcher = must_compile(&Schema::map([("deep", Schema::map([("key", def)]))]));
    assert!(matcher.validate(&json!({})).succeeded());
    assert!(matcher.validate(&json!({ "deep": "not a map" })).succeeded());
    assert!(!matcher.validate(&json!({ "deep": { "key": "w" } })).succeeded());
}

#[test]
fn strict_closure_fails_only_at_the_extra_key() {
    let matcher = compile(&Schema::map([("a", Schema::map([("b", eq(json!(1)))]))]))
        .unwrap()
        .strict();
    let results = matcher.validate(&json!({ "a": { "b": 1, "c": 2 } }));

    assert_eq!(failed_paths(&results), vec!["a.c"]);
    assert_eq!(results.get(&Path::must_parse("a.c")).unwrap().message, "unexpected key");
    assert!(results.get(&Path::must_parse("a.b")).unwrap().valid);
}

#[test]
fn sequences_are_always_closed() {
    let matcher = must_compile(&Schema::seq([eq(json!("x"))]));
    assert_eq!(failed_paths(&matcher.validate(&json!(["x", "y"]))), vec!["[1]"]);
    assert!(matcher.validate(&json!(["x"])).succeeded());
}

#[test]
fn compose_keeps_each_failure_at_its_own_path() {
    let v1 = must_compile(&Schema::map([("p1", eq(json!(1)))]));
    let v2 = must_compile(&Schema::map([("p2", eq(json!(2)))]));
    let members: Vec<Box<dyn Validator>> = vec![Box::new(v1), Box::new(v2)];
    let results = compose(members).validate(&json!({ "p1": 10, "p2": 20 }));

    assert_eq!(failed_paths(&results), vec!["p1", "p2"]);
    assert!(results.get(&Path::must_parse("p1")).unwrap().message.contains("got 10"));
    assert!(results.get(&Path::must_parse("p2")).unwrap().message.contains("got 20"));
}

#[test]
fn compose_reports_a_failure_another_member_passes() {
    let strict_id = must_compile(&Schema::map([("id", eq(json!(1)))]));
    let loose_id = must_compile(&Schema::map([("id", is_any())]));
    let members: Vec<Box<dyn Validator>> = vec![Box::new(strict_id), Box::new(loose_id)];
    let results = compose(members).validate(&json!({ "id": 2 }));

    assert!(!results.succeeded());
    assert_eq!(failed_paths(&results), vec!["id"]);
    assert_eq!(results.iter().count(), 2);
}

#[test]
fn merging_a_report_into_itself_changes_nothing() {
    let matcher = must_compile(&Schema::from(json!({ "a": 1, "b": 2 })));
    let mut results = matcher.validate(&json!({ "a": 1, "b": 3 }));
    let verdict = results.succeeded();
    let paths: Vec<String> = results.iter().map(|(p, _)| p.to_string()).collect();

    let copy = results.clone();
    results.merge(&copy);

    assert_eq!(results.succeeded(), verdict);
    let after: Vec<String> = results.iter().map(|(p, _)| p.to_string()).collect();
    assert_eq!(after, paths);
}

#[test]
fn one_matcher_serves_many_threads() {
    let matcher = Arc::new(must_compile(&Schema::from(json!({ "id": 1 }))).strict());

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || matcher.validate(&json!({ "id": n })))
        })
        .collect();

    let mut merged = Results::new();
    let mut passes = 0;
    for handle in handles {
        let results = handle.join().unwrap();
        if results.succeeded() {
            passes += 1;
        }
        merged.merge(&results);
    }
    assert_eq!(passes, 1);
    assert_eq!(merged.len(), 1);
}
