//! Click Locator: translate a pointer click into original-document
//! coordinates.
//!
//! The ascent walks from the event target up to the enclosing Page-kind node,
//! measures the click against that page's background layer (pages are stacks
//! of layers sharing one page number; the background defines the measurable
//! extent), and scales the fractional position by the page's declared size.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::geometry::{Point, Rect};
use crate::tree::{NodeId, NodeKind, RenderTree};

/// A resolved click: 1-based page number plus coordinates in original-document
/// units. This is the payload handed to the editor notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameLocation {
    pub page_no: u32,
    pub x: f64,
    pub y: f64,
}

impl FrameLocation {
    /// Wire form for the notification sink.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Nearest enclosing Page-kind node of `target`, not walking past `root`.
fn enclosing_page(tree: &RenderTree, root: NodeId, target: NodeId) -> Result<NodeId, NavError> {
    let mut node = target;
    loop {
        if tree.kind(node) == Some(NodeKind::Page) {
            return Ok(node);
        }
        if node == root {
            return Err(NavError::NotFound);
        }
        node = tree.parent(node).ok_or(NavError::NotFound)?;
    }
}

/// The rectangle to measure the click against: the nearest preceding sibling
/// layer recorded as the background of the same page, else the page node.
fn background_extent(tree: &RenderTree, page: NodeId, page_index: usize) -> Rect {
    tree.preceding_siblings(page)
        .find(|&layer| tree.background_of(layer) == Some(page_index))
        .map(|layer| tree.rect(layer))
        .unwrap_or_else(|| tree.rect(page))
}

/// Translate `click` (viewport pixels) on `target` into a [`FrameLocation`].
///
/// Fails with [`NavError::NotFound`] when no page encloses the target within
/// `root`, and with [`NavError::MissingMetadata`] when the page node lacks
/// its index or declared size. Never returns a best-guess location.
pub fn locate_click(
    tree: &RenderTree,
    root: NodeId,
    target: NodeId,
    click: Point,
) -> Result<FrameLocation, NavError> {
    let page = enclosing_page(tree, root, target)?;
    let meta = tree
        .page_meta(page)
        .ok_or_else(|| NavError::missing_metadata("page node has no index/size"))?;

    let extent = background_extent(tree, page, meta.index);
    if !extent.is_measurable() {
        debug!("page {} background extent is degenerate: {extent:?}", meta.index);
        return Err(NavError::NotFound);
    }

    let x_percent = (click.x - extent.left) / extent.width;
    let y_percent = (click.y - extent.top) / extent.height;

    Ok(FrameLocation {
        page_no: meta.index as u32 + 1,
        x: x_percent * meta.width,
        y: y_percent * meta.height,
    })
}
