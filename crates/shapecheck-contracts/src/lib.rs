//! # shapecheck-contracts
//!
//! Shared types for the shapecheck structural matcher.
//!
//! All crates in the workspace import from here. This crate holds the path
//! model, the predicate contract, outcome and report types, and the error
//! type. Schema compilation and evaluation live in `shapecheck-core`.

pub mod error;
pub mod path;
pub mod predicate;
pub mod results;

pub use error::{MatchError, MatchResult};
pub use path::{Path, PathComponent};
pub use predicate::{is, optional, IsDef, ValueResult};
pub use results::{Outcome, Results};
