//! Bidirectional source-mapping resolution for rendered document previews.
//!
//! Translates between symbolic source paths and nodes of a rendered,
//! hierarchically classified visual tree (the Path Resolver), and between
//! screen clicks and original-document coordinates (the Click Locator),
//! plus the scroll-target heuristic used by jump commands. Rendering, tree
//! lifecycle, transport and animation live with external collaborators.

pub mod error;
pub mod geometry;
pub mod locate;
pub mod navigator;
pub mod resolve;
pub mod scroll;
pub mod source_path;
pub mod tree;

pub mod test_utils;

pub use error::NavError;
pub use geometry::{Point, Rect};
pub use locate::{FrameLocation, locate_click};
pub use navigator::{
    EditorSink, HandlerId, HandlerRegistry, Navigator, PointerClick, RippleFx, SourceNavigable,
    ViewportScroller,
};
pub use resolve::{Resolved, resolve};
pub use scroll::{ScrollPosition, ScrollRequest, ScrollTuning, compute_scroll_target};
pub use source_path::{PathFormatError, SourcePath, SourcePathPoint};
pub use tree::{NodeId, NodeKind, PageMeta, RenderTree, TreeBuilder};
