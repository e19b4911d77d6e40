//! Navigation surface: collaborator traits, handler registry and the
//! concrete [`Navigator`].
//!
//! Everything here is synchronous and single-threaded: one pointer event or
//! jump command triggers one resolution pass that runs to completion. The
//! outward side effects (editor notification, ripple, viewport scroll) go
//! through trait objects so embedders plug in their transport and UI layers.

use std::collections::HashMap;

use anyhow::Result;
use log::{debug, warn};

use crate::error::NavError;
use crate::geometry::{Point, Rect};
use crate::locate::{self, FrameLocation};
use crate::resolve::{self, Resolved};
use crate::scroll::{self, ScrollPosition, ScrollRequest, ScrollTuning};
use crate::source_path::SourcePath;
use crate::tree::{NodeId, RenderTree};

/// Accepts a resolved click location and forwards it to the external editor.
/// Fire-and-forget: the navigator never waits for or parses a response.
pub trait EditorSink {
    fn send(&mut self, location: &FrameLocation) -> Result<()>;
}

/// Triggers a transient visual effect at a point inside a root.
pub trait RippleFx {
    fn trigger(&mut self, root: NodeId, at: Point, effect: &str);
}

/// Performs the actual viewport scroll.
pub trait ViewportScroller {
    fn scroll_to(&mut self, position: ScrollPosition, smooth: bool);
}

/// A pointer click as delivered by the event source: which node was hit and
/// where, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerClick {
    pub target: NodeId,
    pub at: Point,
}

/// Handle for one installed click handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Explicit registry of installed click handlers, at most one per root.
///
/// Re-installing on a root implicitly removes the previous handler, so a
/// double install can never leave two active handlers behind. Teardown must
/// call [`HandlerRegistry::remove`] explicitly.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    next_id: u64,
    installed: HashMap<NodeId, HandlerId>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a handler on `root`, replacing any prior one.
    pub fn install(&mut self, root: NodeId) -> HandlerId {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        if let Some(old) = self.installed.insert(root, id) {
            debug!("replacing handler {old:?} on {root:?}");
        }
        id
    }

    /// Remove the handler on `root`. Returns false when none was installed;
    /// that is a no-op, not an error.
    pub fn remove(&mut self, root: NodeId) -> bool {
        self.installed.remove(&root).is_some()
    }

    pub fn handler(&self, root: NodeId) -> Option<HandlerId> {
        self.installed.get(&root).copied()
    }

    pub fn active_count(&self) -> usize {
        self.installed.len()
    }
}

/// The capability set a document context gains for source navigation.
/// One concrete implementation instance per context; no behavior mixins.
pub trait SourceNavigable {
    /// Attach click handling to `root`; idempotent per root.
    fn install_navigation(&mut self, root: NodeId);

    /// Detach click handling from `root`; required on context disposal.
    fn remove_navigation(&mut self, root: NodeId);

    /// Descend `tree` along `path` (editor -> preview direction).
    fn resolve_path(&self, tree: &RenderTree, path: &SourcePath) -> Result<Resolved, NavError>;

    /// Translate a click into document coordinates (preview -> editor).
    fn locate_click(
        &self,
        tree: &RenderTree,
        root: NodeId,
        click: PointerClick,
    ) -> Result<FrameLocation, NavError>;

    /// Compute the scroll target for a jump command and hand it to the
    /// viewport collaborator as a smooth scroll.
    fn scroll_to_target(&mut self, viewport: Rect, body: Rect, request: &ScrollRequest);
}

/// Concrete [`SourceNavigable`] wiring resolver, locator and scroll heuristic
/// to the external collaborators.
pub struct Navigator<S, F, V> {
    sink: S,
    fx: F,
    scroller: V,
    registry: HandlerRegistry,
    tuning: ScrollTuning,
}

impl<S: EditorSink, F: RippleFx, V: ViewportScroller> Navigator<S, F, V> {
    pub fn new(sink: S, fx: F, scroller: V) -> Self {
        Self::with_tuning(sink, fx, scroller, ScrollTuning::default())
    }

    pub fn with_tuning(sink: S, fx: F, scroller: V, tuning: ScrollTuning) -> Self {
        Self {
            sink,
            fx,
            scroller,
            registry: HandlerRegistry::new(),
            tuning,
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn fx(&self) -> &F {
        &self.fx
    }

    pub fn scroller(&self) -> &V {
        &self.scroller
    }

    /// Dispatch a pointer click on `root`. Runs exactly one resolution pass
    /// when a handler is installed, none otherwise. A click that does not
    /// resolve is a normal negative outcome: no navigation happens.
    pub fn dispatch_click(
        &mut self,
        tree: &RenderTree,
        root: NodeId,
        click: PointerClick,
    ) -> Option<FrameLocation> {
        self.registry.handler(root)?;

        match locate::locate_click(tree, root, click.target, click.at) {
            Ok(location) => {
                self.fx.trigger(root, click.at, "ripple");
                if let Err(err) = self.sink.send(&location) {
                    // fire-and-forget: a dead editor link must not break clicks
                    warn!("editor notification failed: {err:#}");
                }
                Some(location)
            }
            Err(err) => {
                debug!("click at {:?} did not resolve: {err}", click.at);
                None
            }
        }
    }
}

impl<S: EditorSink, F: RippleFx, V: ViewportScroller> SourceNavigable for Navigator<S, F, V> {
    fn install_navigation(&mut self, root: NodeId) {
        self.registry.install(root);
    }

    fn remove_navigation(&mut self, root: NodeId) {
        self.registry.remove(root);
    }

    fn resolve_path(&self, tree: &RenderTree, path: &SourcePath) -> Result<Resolved, NavError> {
        resolve::resolve(tree, path)
    }

    fn locate_click(
        &self,
        tree: &RenderTree,
        root: NodeId,
        click: PointerClick,
    ) -> Result<FrameLocation, NavError> {
        locate::locate_click(tree, root, click.target, click.at)
    }

    fn scroll_to_target(&mut self, viewport: Rect, body: Rect, request: &ScrollRequest) {
        let position = scroll::compute_scroll_target(&self.tuning, viewport, body, request);
        self.scroller.scroll_to(position, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingFx, RecordingScroller, RecordingSink, sample_tree};

    fn navigator() -> Navigator<RecordingSink, RecordingFx, RecordingScroller> {
        Navigator::new(
            RecordingSink::default(),
            RecordingFx::default(),
            RecordingScroller::default(),
        )
    }

    #[test]
    fn install_is_idempotent_per_root() {
        let (tree, target) = sample_tree();
        let root = tree.root();
        let mut nav = navigator();

        nav.install_navigation(root);
        nav.install_navigation(root);
        assert_eq!(nav.registry().active_count(), 1);

        let click = PointerClick {
            target,
            at: Point::new(150.0, 75.0),
        };
        assert!(nav.dispatch_click(&tree, root, click).is_some());
        // one click, one resolution attempt, one notification
        assert_eq!(nav.sink.sent.len(), 1);
        assert_eq!(nav.fx.triggered.len(), 1);
    }

    #[test]
    fn click_without_handler_does_nothing() {
        let (tree, target) = sample_tree();
        let mut nav = navigator();

        let click = PointerClick {
            target,
            at: Point::new(150.0, 75.0),
        };
        assert_eq!(nav.dispatch_click(&tree, tree.root(), click), None);
        assert!(nav.sink.sent.is_empty());
        assert!(nav.fx.triggered.is_empty());
    }

    #[test]
    fn removed_handler_stops_dispatch() {
        let (tree, target) = sample_tree();
        let root = tree.root();
        let mut nav = navigator();

        nav.install_navigation(root);
        nav.remove_navigation(root);
        assert_eq!(nav.registry().active_count(), 0);
        assert!(!nav.registry.remove(root), "second remove is a no-op");

        let click = PointerClick {
            target,
            at: Point::new(150.0, 75.0),
        };
        assert_eq!(nav.dispatch_click(&tree, root, click), None);
        assert!(nav.sink.sent.is_empty());
    }

    #[test]
    fn unresolvable_click_triggers_no_side_effects() {
        let (tree, _) = sample_tree();
        let root = tree.root();
        let mut nav = navigator();
        nav.install_navigation(root);

        // the root itself has no page ancestor
        let click = PointerClick {
            target: root,
            at: Point::new(0.0, 0.0),
        };
        assert_eq!(nav.dispatch_click(&tree, root, click), None);
        assert!(nav.sink.sent.is_empty());
        assert!(nav.fx.triggered.is_empty());
    }

    #[test]
    fn failing_sink_does_not_break_dispatch() {
        let (tree, target) = sample_tree();
        let root = tree.root();
        let mut nav = Navigator::new(
            RecordingSink::failing(),
            RecordingFx::default(),
            RecordingScroller::default(),
        );
        nav.install_navigation(root);

        let click = PointerClick {
            target,
            at: Point::new(150.0, 75.0),
        };
        assert!(nav.dispatch_click(&tree, root, click).is_some());
    }

    #[test]
    fn scroll_to_target_goes_through_the_collaborator() {
        let mut nav = navigator();
        let viewport = crate::geometry::Rect::new(0.0, 0.0, 1000.0, 500.0);
        let body = crate::geometry::Rect::new(0.0, 0.0, 1000.0, 4000.0);
        let request = ScrollRequest {
            page_rect: crate::geometry::Rect::new(25.0, 400.0, 950.0, 1300.0),
            page_no: 1,
            inner: Point::new(300.0, 700.0),
        };

        nav.scroll_to_target(viewport, body, &request);
        assert_eq!(nav.scroller.scrolled.len(), 1);
        let (pos, smooth) = nav.scroller.scrolled[0];
        assert!(smooth);
        assert_eq!(pos.left, 300.0 - 1000.0 * 0.07);
        assert_eq!(pos.top, 700.0 - 500.0 * 0.382);
    }
}
