//! Match configuration loaded from TOML.
//!
//! ```toml
//! # Reject keys the schema does not mention.
//! strict = true
//! # Treat a run that recorded no outcomes at all as a failure.
//! fail_on_empty = true
//! ```

use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use shapecheck_contracts::{
    error::{MatchError, MatchResult},
    path::Path,
    predicate::ValueResult,
    results::Results,
};

use crate::{
    compile::{compile, Matcher},
    schema::Schema,
    traits::Validator,
};

/// Message recorded at the root when `fail_on_empty` rejects a run.
pub const NOTHING_CHECKED_MESSAGE: &str = "no checks were evaluated";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Compile map schemas with closed-schema semantics. Sequence schemas are
    /// always closed regardless.
    #[serde(default)]
    pub strict: bool,

    #[serde(default)]
    pub fail_on_empty: bool,
}

impl CheckConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `MatchError::Config` if the TOML is malformed or carries
    /// unknown keys.
    pub fn from_toml_str(s: &str) -> MatchResult<Self> {
        toml::from_str(s).map_err(|e| MatchError::Config {
            reason: format!("failed to parse check config TOML: {e}"),
        })
    }

    pub fn from_file(path: &FsPath) -> MatchResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| MatchError::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Compile `schema` in the mode this configuration selects.
    pub fn compile(&self, schema: &Schema) -> MatchResult<Matcher> {
        let matcher = compile(schema)?;
        Ok(if self.strict { matcher.strict() } else { matcher })
    }

    /// Run `validator` against `actual`, applying `fail_on_empty`.
    pub fn check(&self, validator: &dyn Validator, actual: &Value) -> Results {
        let mut results = validator.validate(actual);
        if self.fail_on_empty && results.is_empty() {
            warn!("validator recorded no outcomes");
            results.record(Path::root(), ValueResult::invalid(NOTHING_CHECKED_MESSAGE));
        }
        results
    }
}
