//! Schema trees and node classification.
//!
//! A `Schema` has the same shape as an actual document (maps, sequences,
//! scalars) plus `Predicate` leaves. Both `Schema` and `serde_json::Value`
//! implement `Walkable`, which is how the single traversal in `walk` handles
//! either tree.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path as FsPath;

use serde_json::Value;

use shapecheck_contracts::{
    error::{MatchError, MatchResult},
    predicate::IsDef,
};

/// The classification the walker applies to every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    EmptyMap,
    Map,
    EmptySequence,
    Sequence,
    Scalar,
    Predicate,
}

impl NodeKind {
    /// Leaves are observed as a unit. Only non-empty containers are recursed
    /// into, since an empty container has no children to test individually.
    pub fn is_leaf(self) -> bool {
        !matches!(self, NodeKind::Map | NodeKind::Sequence)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::EmptyMap => "empty map",
            NodeKind::Map => "map",
            NodeKind::EmptySequence => "empty sequence",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
            NodeKind::Predicate => "predicate",
        };
        f.write_str(name)
    }
}

/// The children of a non-empty container.
pub enum Children<'a, T> {
    Map(Vec<(&'a str, &'a T)>),
    Sequence(&'a [T]),
}

/// A tree the walker can traverse.
pub trait Walkable: Sized {
    fn kind(&self) -> NodeKind;

    /// Children of a non-empty map or sequence; `None` for every leaf.
    fn children(&self) -> Option<Children<'_, Self>>;
}

impl Walkable for Value {
    fn kind(&self) -> NodeKind {
        match self {
            Value::Object(map) if map.is_empty() => NodeKind::EmptyMap,
            Value::Object(_) => NodeKind::Map,
            Value::Array(items) if items.is_empty() => NodeKind::EmptySequence,
            Value::Array(_) => NodeKind::Sequence,
            _ => NodeKind::Scalar,
        }
    }

    fn children(&self) -> Option<Children<'_, Self>> {
        match self {
            Value::Object(map) if !map.is_empty() => Some(Children::Map(
                map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            )),
            Value::Array(items) if !items.is_empty() => Some(Children::Sequence(items)),
            _ => None,
        }
    }
}

/// A schema tree.
///
/// Map children are held in a `BTreeMap`, so compilation visits keys in
/// sorted order and the compiled schema is deterministic.
#[derive(Debug, Clone)]
pub enum Schema {
    Map(BTreeMap<String, Schema>),
    Sequence(Vec<Schema>),
    /// A non-container leaf, matched by deep equality.
    Scalar(Value),
    Predicate(IsDef),
}

impl Schema {
    /// Build a map schema from `(key, schema)` pairs.
    pub fn map<K, S, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        Schema::Map(
            entries
                .into_iter()
                .map(|(k, s)| (k.into(), s.into()))
                .collect(),
        )
    }

    /// Build a sequence schema.
    pub fn seq<S, I>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        Schema::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Parse a JSON document into a schema whose every leaf is an equality
    /// check.
    pub fn from_json_str(s: &str) -> MatchResult<Self> {
        let value: Value = serde_json::from_str(s).map_err(|e| MatchError::Document {
            reason: format!("failed to parse JSON schema document: {e}"),
        })?;
        Ok(Schema::from(value))
    }

    /// Parse a TOML document into a schema whose every leaf is an equality
    /// check.
    pub fn from_toml_str(s: &str) -> MatchResult<Self> {
        let value: Value = toml::from_str(s).map_err(|e| MatchError::Document {
            reason: format!("failed to parse TOML schema document: {e}"),
        })?;
        Ok(Schema::from(value))
    }

    /// Read a schema document from disk. Files ending in `.toml` are parsed
    /// as TOML, everything else as JSON.
    pub fn from_file(path: &FsPath) -> MatchResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| MatchError::Document {
            reason: format!("failed to read schema file '{}': {}", path.display(), e),
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&contents),
            _ => Self::from_json_str(&contents),
        }
    }

    /// A short description used in compile errors.
    pub fn describe(&self) -> String {
        match self {
            Schema::Scalar(value) => format!("scalar {value}"),
            Schema::Predicate(def) => format!("predicate '{}'", def.name()),
            other => other.kind().to_string(),
        }
    }
}

impl Walkable for Schema {
    fn kind(&self) -> NodeKind {
        match self {
            Schema::Map(map) if map.is_empty() => NodeKind::EmptyMap,
            Schema::Map(_) => NodeKind::Map,
            Schema::Sequence(items) if items.is_empty() => NodeKind::EmptySequence,
            Schema::Sequence(_) => NodeKind::Sequence,
            Schema::Scalar(_) => NodeKind::Scalar,
            Schema::Predicate(_) => NodeKind::Predicate,
        }
    }

    fn children(&self) -> Option<Children<'_, Self>> {
        match self {
            Schema::Map(map) if !map.is_empty() => Some(Children::Map(
                map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            )),
            Schema::Sequence(items) if !items.is_empty() => Some(Children::Sequence(items)),
            _ => None,
        }
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                Schema::Map(map.into_iter().map(|(k, v)| (k, Schema::from(v))).collect())
            }
            Value::Array(items) => Schema::Sequence(items.into_iter().map(Schema::from).collect()),
            scalar => Schema::Scalar(scalar),
        }
    }
}

impl From<IsDef> for Schema {
    fn from(def: IsDef) -> Self {
        Schema::Predicate(def)
    }
}

impl From<&str> for Schema {
    fn from(s: &str) -> Self {
        Schema::Scalar(Value::from(s))
    }
}

impl From<String> for Schema {
    fn from(s: String) -> Self {
        Schema::Scalar(Value::from(s))
    }
}

impl From<i64> for Schema {
    fn from(n: i64) -> Self {
        Schema::Scalar(Value::from(n))
    }
}

impl From<bool> for Schema {
    fn from(b: bool) -> Self {
        Schema::Scalar(Value::from(b))
    }
}
