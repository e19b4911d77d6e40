//! Failure taxonomy for path resolution and click location.
//!
//! Every variant is a normal negative outcome for the caller: navigation
//! simply does not happen. Nothing here is fatal and nothing panics.

use crate::tree::NodeKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// The source path and the rendered tree disagree: they were generated
    /// from different document states. Never matched best-effort.
    #[error("path/tree mismatch at depth {depth}: expected {expected:?}, found {found:?}")]
    StructuralMismatch {
        depth: usize,
        expected: NodeKind,
        found: Option<NodeKind>,
    },

    /// No page node in the tree, no page ancestor above the click target,
    /// or the click landed outside tracked content.
    #[error("no matching node")]
    NotFound,

    /// A page node lacks its index/width/height metadata. Absence is an
    /// error, not a silent default.
    #[error("page metadata missing: {detail}")]
    MissingMetadata { detail: String },
}

impl NavError {
    pub fn missing_metadata(detail: impl Into<String>) -> Self {
        Self::MissingMetadata {
            detail: detail.into(),
        }
    }
}
