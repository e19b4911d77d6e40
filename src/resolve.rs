//! Path Resolver: descend the rendered tree along a source path.
//!
//! Paths are authored against the semantic document structure, while the
//! rendered tree contains extra untagged wrapper nodes inserted purely for
//! layout. Classification therefore looks through single-child wrapper chains
//! so a path never has to encode wrapper depth. Matching itself is strict: a
//! kind or index mismatch means the path and the tree came from different
//! document states, and guessing would navigate to the wrong place.

use log::debug;

use crate::error::NavError;
use crate::source_path::SourcePath;
use crate::tree::{NodeId, NodeKind, RenderTree};

/// Terminal node of a successful resolution, plus the residual character
/// offset (0 unless the path ended in a `CharIndex` point).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub node: NodeId,
    pub char_offset: usize,
}

/// A direct child slot after classification: the tag found and the underlying
/// element (possibly reached through a wrapper chain).
#[derive(Debug, Clone, Copy)]
struct Classified {
    kind: NodeKind,
    node: NodeId,
}

/// Look through single-child wrapper chains below `node` for a tagged
/// element. A node with no tag and not exactly one child is a dead end.
fn classify_through(tree: &RenderTree, mut node: NodeId) -> Option<Classified> {
    loop {
        if let Some(kind) = tree.kind(node) {
            return kind.is_spatial().then_some(Classified { kind, node });
        }
        match tree.children(node) {
            [only] => node = *only,
            _ => return None,
        }
    }
}

/// Classify the direct children of `node` into the ordered candidate list
/// path indices count against. Dead-end children are excluded, so indices
/// are positions among classifiable entries in document order.
fn classify_children(tree: &RenderTree, node: NodeId) -> Vec<Classified> {
    tree.children(node)
        .iter()
        .filter_map(|&child| classify_through(tree, child))
        .collect()
}

/// Walk `path` down `tree` and return the terminal node plus residual offset.
///
/// The descent root is the first Page-kind node in document order; the path's
/// first element is the root marker and is skipped. A `CharIndex` point never
/// selects a child, it only supplies the final offset.
pub fn resolve(tree: &RenderTree, path: &SourcePath) -> Result<Resolved, NavError> {
    let mut current = tree.first_page().ok_or(NavError::NotFound)?;

    for (depth, point) in path.points().iter().enumerate().skip(1) {
        if point.kind == NodeKind::CharIndex {
            return Ok(Resolved {
                node: current,
                char_offset: point.index,
            });
        }

        let entries = classify_children(tree, current);
        let Some(entry) = entries.get(point.index) else {
            debug!(
                "path point {depth} ({:?}#{}) out of range: {} classified children",
                point.kind,
                point.index,
                entries.len()
            );
            return Err(NavError::StructuralMismatch {
                depth,
                expected: point.kind,
                found: None,
            });
        };
        if entry.kind != point.kind {
            debug!(
                "path point {depth} expects {:?}#{} but child classified as {:?}",
                point.kind, point.index, entry.kind
            );
            return Err(NavError::StructuralMismatch {
                depth,
                expected: point.kind,
                found: Some(entry.kind),
            });
        }
        current = entry.node;
    }

    Ok(Resolved {
        node: current,
        char_offset: 0,
    })
}
