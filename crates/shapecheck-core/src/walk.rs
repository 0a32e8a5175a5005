//! The generic tree walker.
//!
//! `walk` visits every leaf of a `Walkable` tree exactly once, depth first,
//! passing the observer the leaf's path, the node itself and its
//! `NodeKind`. Non-empty maps and sequences are never reported; their
//! children are. Map entries extend the path with a map key, sequence
//! elements with their index in order `0..n`.
//!
//! The observer may stop the traversal by returning `Err`; the error is
//! handed straight back to the caller.

use shapecheck_contracts::path::Path;

use crate::schema::{Children, NodeKind, Walkable};

/// What the observer sees for each leaf.
pub struct WalkInfo<'a, T> {
    pub path: &'a Path,
    pub node: &'a T,
    pub kind: NodeKind,
}

/// Walk `root`, invoking `observer` for every leaf.
pub fn walk<T, E, F>(root: &T, observer: &mut F) -> Result<(), E>
where
    T: Walkable,
    F: FnMut(WalkInfo<'_, T>) -> Result<(), E>,
{
    walk_node(root, &Path::root(), observer)
}

fn walk_node<T, E, F>(node: &T, path: &Path, observer: &mut F) -> Result<(), E>
where
    T: Walkable,
    F: FnMut(WalkInfo<'_, T>) -> Result<(), E>,
{
    match node.children() {
        None => observer(WalkInfo {
            path,
            node,
            kind: node.kind(),
        }),
        Some(Children::Map(entries)) => {
            for (key, child) in entries {
                walk_node(child, &path.extend_map(key), observer)?;
            }
            Ok(())
        }
        Some(Children::Sequence(items)) => {
            for (index, child) in items.iter().enumerate() {
                walk_node(child, &path.extend_slice(index), observer)?;
            }
            Ok(())
        }
    }
}
