//! Rendered-tree representation and read-only queries.
//!
//! The tree is produced and owned by the rendering subsystem; this crate only
//! walks it. Nodes are held in an arena and addressed by [`NodeId`], so parent
//! and preceding-sibling walks (needed by the click locator) are cheap and the
//! borrow story stays simple.

use crate::error::NavError;
use crate::geometry::Rect;

/// Structural classification of a rendered node or a source-path point.
///
/// The wire representation is the integer code (`CharIndex` = 5). A rendered
/// node carries at most one tag, decided once when the tree is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Text,
    Group,
    Image,
    Shape,
    Page,
    CharIndex,
}

impl NodeKind {
    pub const fn code(self) -> u8 {
        match self {
            NodeKind::Text => 0,
            NodeKind::Group => 1,
            NodeKind::Image => 2,
            NodeKind::Shape => 3,
            NodeKind::Page => 4,
            NodeKind::CharIndex => 5,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(NodeKind::Text),
            1 => Some(NodeKind::Group),
            2 => Some(NodeKind::Image),
            3 => Some(NodeKind::Shape),
            4 => Some(NodeKind::Page),
            5 => Some(NodeKind::CharIndex),
            _ => None,
        }
    }

    /// Tags that classify rendered nodes. `CharIndex` only ever appears in
    /// source paths, as the terminal offset marker.
    pub const fn is_spatial(self) -> bool {
        !matches!(self, NodeKind::CharIndex)
    }
}

/// Identifier of a node inside one [`RenderTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Index, declared width and declared height of a page, in original-document
/// units. Stored 0-based; page numbers go out 1-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMeta {
    pub index: usize,
    pub width: f64,
    pub height: f64,
}

impl PageMeta {
    /// Parse page metadata from string attribute values, the form tree
    /// providers carry them in. Any missing or unparseable value is a
    /// [`NavError::MissingMetadata`].
    pub fn from_attrs(
        index: Option<&str>,
        width: Option<&str>,
        height: Option<&str>,
    ) -> Result<Self, NavError> {
        let index = index
            .and_then(|v| v.parse::<usize>().ok())
            .ok_or_else(|| NavError::missing_metadata("page number attribute"))?;
        let width = width
            .and_then(|v| v.parse::<f64>().ok())
            .ok_or_else(|| NavError::missing_metadata(format!("width of page {index}")))?;
        let height = height
            .and_then(|v| v.parse::<f64>().ok())
            .ok_or_else(|| NavError::missing_metadata(format!("height of page {index}")))?;
        Ok(Self {
            index,
            width,
            height,
        })
    }
}

#[derive(Debug, Clone)]
struct RenderNode {
    kind: Option<NodeKind>,
    rect: Rect,
    /// Present on Page-kind layers.
    page: Option<PageMeta>,
    /// Page index this node is the background layer for. Pages are composed
    /// of stacked layers; the background one defines the measurable extent.
    background_of: Option<usize>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An externally built, hierarchically classified visual tree.
#[derive(Debug, Clone)]
pub struct RenderTree {
    nodes: Vec<RenderNode>,
}

impl RenderTree {
    fn node(&self, id: NodeId) -> &RenderNode {
        &self.nodes[id.0]
    }

    /// The designated root element; always exists.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).kind
    }

    pub fn rect(&self, id: NodeId) -> Rect {
        self.node(id).rect
    }

    pub fn page_meta(&self, id: NodeId) -> Option<PageMeta> {
        self.node(id).page
    }

    pub fn background_of(&self, id: NodeId) -> Option<usize> {
        self.node(id).background_of
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Preceding siblings of `id`, nearest first.
    pub fn preceding_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let siblings: &[NodeId] = match self.node(id).parent {
            Some(parent) => self.children(parent),
            None => &[],
        };
        let pos = siblings.iter().position(|&s| s == id).unwrap_or(0);
        siblings[..pos].iter().rev().copied()
    }

    /// All nodes under `from` (inclusive) in document order.
    pub fn descendants(&self, from: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![from];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children(next).iter().rev().copied());
            Some(next)
        })
    }

    /// First Page-kind node in document order; the resolver's descent root.
    pub fn first_page(&self) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|&n| self.kind(n) == Some(NodeKind::Page))
    }
}

/// Builds a [`RenderTree`] node by node. Used by tree providers and tests;
/// child order is insertion order, which is what path indices count against.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<RenderNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![RenderNode {
                kind: None,
                rect: Rect::default(),
                page: None,
                background_of: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root element new top-level children attach to.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn push(&mut self, parent: NodeId, node: RenderNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Add a tagged or untagged child. Untagged nodes are the layout-only
    /// pass-through wrappers the resolver skips through.
    pub fn child(&mut self, parent: NodeId, kind: Option<NodeKind>, rect: Rect) -> NodeId {
        debug_assert!(kind.is_none_or(NodeKind::is_spatial));
        self.push(
            parent,
            RenderNode {
                kind,
                rect,
                page: None,
                background_of: None,
                parent: Some(parent),
                children: Vec::new(),
            },
        )
    }

    /// Add a Page-kind node with its metadata.
    pub fn page(&mut self, parent: NodeId, meta: PageMeta, rect: Rect) -> NodeId {
        self.push(
            parent,
            RenderNode {
                kind: Some(NodeKind::Page),
                rect,
                page: Some(meta),
                background_of: None,
                parent: Some(parent),
                children: Vec::new(),
            },
        )
    }

    /// Add a Page-kind node that is missing its metadata. Providers should
    /// never do this; it exists so the locator's error path is testable.
    pub fn page_without_meta(&mut self, parent: NodeId, rect: Rect) -> NodeId {
        self.child(parent, Some(NodeKind::Page), rect)
    }

    /// Add the background layer for page `page_index`; its rect is the
    /// measurable extent clicks are resolved against.
    pub fn background(&mut self, parent: NodeId, page_index: usize, rect: Rect) -> NodeId {
        self.push(
            parent,
            RenderNode {
                kind: None,
                rect,
                page: None,
                background_of: Some(page_index),
                parent: Some(parent),
                children: Vec::new(),
            },
        )
    }

    pub fn build(self) -> RenderTree {
        RenderTree { nodes: self.nodes }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
