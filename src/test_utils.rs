//! Recording collaborator doubles and tree fixtures shared by unit and
//! integration tests.

use anyhow::{Result, bail};

use crate::geometry::{Point, Rect};
use crate::locate::FrameLocation;
use crate::navigator::{EditorSink, RippleFx, ViewportScroller};
use crate::scroll::ScrollPosition;
use crate::tree::{NodeId, NodeKind, PageMeta, RenderTree, TreeBuilder};

/// Records every location sent to the editor; optionally fails each send.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<FrameLocation>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            sent: Vec::new(),
            fail: true,
        }
    }
}

impl EditorSink for RecordingSink {
    fn send(&mut self, location: &FrameLocation) -> Result<()> {
        self.sent.push(*location);
        if self.fail {
            bail!("editor connection closed");
        }
        Ok(())
    }
}

/// Records triggered visual effects.
#[derive(Debug, Default)]
pub struct RecordingFx {
    pub triggered: Vec<(NodeId, Point, String)>,
}

impl RippleFx for RecordingFx {
    fn trigger(&mut self, root: NodeId, at: Point, effect: &str) {
        self.triggered.push((root, at, effect.to_string()));
    }
}

/// Records viewport scroll requests.
#[derive(Debug, Default)]
pub struct RecordingScroller {
    pub scrolled: Vec<(ScrollPosition, bool)>,
}

impl ViewportScroller for RecordingScroller {
    fn scroll_to(&mut self, position: ScrollPosition, smooth: bool) {
        self.scrolled.push((position, smooth));
    }
}

/// One page at index 0: background extent 200x100 at (100, 50), declared size
/// 600x800, a text leaf as click target. Returns the tree and the leaf.
pub fn sample_tree() -> (RenderTree, NodeId) {
    let mut b = TreeBuilder::new();
    let root = b.root();
    b.background(root, 0, Rect::new(100.0, 50.0, 200.0, 100.0));
    let page = b.page(
        root,
        PageMeta {
            index: 0,
            width: 600.0,
            height: 800.0,
        },
        Rect::new(100.0, 50.0, 200.0, 100.0),
    );
    let group = b.child(page, Some(NodeKind::Group), Rect::new(100.0, 50.0, 200.0, 100.0));
    let text = b.child(group, Some(NodeKind::Text), Rect::new(120.0, 60.0, 80.0, 12.0));
    (b.build(), text)
}
