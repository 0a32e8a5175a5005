//! # shapecheck-core
//!
//! Compiles schema trees into flat, path-addressed checks and evaluates
//! them against `serde_json::Value` documents.
//!
//! - [`schema`]   — the `Schema` tree and node classification
//! - [`walk`]     — the generic leaf walker shared by schemas and documents
//! - [`compile`]  — schema compilation, evaluation and `Matcher`
//! - [`strict`]   — closed-schema matching
//! - [`compose`]  — merging several validators over one document
//!
//! ## Usage
//!
//! ```rust,ignore
//! use serde_json::json;
//! use shapecheck_core::{compile, Schema, Validator};
//!
//! let matcher = compile(&Schema::from(json!({ "name": "widget" })))?.strict();
//! let results = matcher.validate(&json!({ "name": "widget", "extra": 1 }));
//! assert!(!results.succeeded());
//! ```

pub mod compile;
pub mod compose;
pub mod config;
pub mod predicates;
pub mod schema;
pub mod strict;
pub mod traits;
pub mod walk;

pub use compile::{compile, must_compile, CompiledSchema, FlatValidator, Matcher};
pub use compose::{compose, Compose};
pub use config::CheckConfig;
pub use schema::{NodeKind, Schema, Walkable};
pub use strict::{strict, CoveredPaths, Strict};
pub use traits::Validator;
