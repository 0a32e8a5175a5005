//! Paths into nested value trees.
//!
//! A `Path` is an immutable, root-to-leaf sequence of `PathComponent`s. Its
//! string form joins components with `.` and renders slice indices as `[n]`,
//! so the third element of `items` followed by key `name` is
//! `items.[2].name`. The empty path is the tree root and renders as `""`.
//!
//! The rendered form doubles as the key of a `Results` report and is what the
//! closed-schema check sorts and prefix-searches, so `Display` and `FromStr`
//! must stay exact inverses for every path the engine produces.
//!
//! Map keys that are empty, contain `.` or start with `[` do not survive the
//! string form: `""` renders like the root, `"a.b"` like the nested path
//! `a` → `b`. Compare `Path` values, not rendered strings, where that matters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{MatchError, MatchResult};

/// Separator placed between rendered components.
pub const SEPARATOR: char = '.';

/// One breadcrumb in a `Path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathComponent {
    /// A key inside a map.
    MapKey(String),
    /// A position inside a sequence.
    SliceIndex(usize),
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathComponent::MapKey(key) => f.write_str(key),
            PathComponent::SliceIndex(index) => write!(f, "[{index}]"),
        }
    }
}

/// A location within a nested set of maps and sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    components: Vec<PathComponent>,
}

impl Path {
    /// The empty path, addressing the root of a tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from already-constructed components.
    pub fn from_components(components: Vec<PathComponent>) -> Self {
        Self { components }
    }

    /// Return a new path with `component` appended. `self` is left untouched.
    pub fn extend(&self, component: PathComponent) -> Self {
        let mut components = Vec::with_capacity(self.components.len() + 1);
        components.extend_from_slice(&self.components);
        components.push(component);
        Self { components }
    }

    /// Return a new path with a trailing map-key component.
    pub fn extend_map(&self, key: impl Into<String>) -> Self {
        self.extend(PathComponent::MapKey(key.into()))
    }

    /// Return a new path with a trailing slice-index component.
    pub fn extend_slice(&self, index: usize) -> Self {
        self.extend(PathComponent::SliceIndex(index))
    }

    /// Return `self` followed by every component of `other`.
    pub fn concat(&self, other: &Path) -> Self {
        let mut components = Vec::with_capacity(self.components.len() + other.components.len());
        components.extend_from_slice(&self.components);
        components.extend_from_slice(&other.components);
        Self { components }
    }

    /// The final component, or `None` for the root path.
    pub fn last(&self) -> Option<&PathComponent> {
        self.components.last()
    }

    pub fn components(&self) -> &[PathComponent] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    /// Parse the rendered form of a path.
    ///
    /// The empty string parses to the root path. Any other empty segment, or
    /// a bracketed segment whose contents are not a non-negative integer, is
    /// rejected with `MatchError::InvalidPath`.
    pub fn parse(input: &str) -> MatchResult<Self> {
        if input.is_empty() {
            return Ok(Self::root());
        }

        let invalid = |reason: String| MatchError::InvalidPath {
            path: input.to_string(),
            reason,
        };

        let mut components = Vec::new();
        for (position, segment) in input.split(SEPARATOR).enumerate() {
            if segment.is_empty() {
                return Err(invalid(format!("empty key segment at position {position}")));
            }

            let component = match segment.strip_prefix('[') {
                Some(rest) => {
                    let digits = rest
                        .strip_suffix(']')
                        .ok_or_else(|| invalid(format!("unterminated index segment '{segment}'")))?;
                    // `usize::from_str` accepts a leading '+', which the renderer never emits.
                    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(invalid(format!("unparsable index segment '{segment}'")));
                    }
                    let index = digits
                        .parse::<usize>()
                        .map_err(|e| invalid(format!("unparsable index segment '{segment}': {e}")))?;
                    PathComponent::SliceIndex(index)
                }
                None => PathComponent::MapKey(segment.to_string()),
            };
            components.push(component);
        }

        Ok(Self { components })
    }

    /// Parse a path the caller already knows to be well formed.
    ///
    /// # Panics
    ///
    /// Panics if `input` is not a valid rendered path.
    pub fn must_parse(input: &str) -> Self {
        match Self::parse(input) {
            Ok(path) => path,
            Err(e) => panic!("{e}"),
        }
    }

    /// Resolve this path against `root`.
    ///
    /// Returns `None` as soon as a component cannot be followed: a missing
    /// key, an out-of-bounds index, or a node that is not the container kind
    /// the component expects. A missing path is never an error.
    pub fn get_from<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        let mut current = root;
        for component in &self.components {
            current = match (component, current) {
                (PathComponent::MapKey(key), Value::Object(map)) => map.get(key)?,
                (PathComponent::SliceIndex(index), Value::Array(items)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, component) in self.components.iter().enumerate() {
            if idx > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<PathComponent>> for Path {
    fn from(components: Vec<PathComponent>) -> Self {
        Self::from_components(components)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rendered = String::deserialize(deserializer)?;
        Path::parse(&rendered).map_err(serde::de::Error::custom)
    }
}
