//! Scroll-target computation for jump commands.
//!
//! Given where the target page currently sits on screen and the point inside
//! it to bring into view, compute the viewport scroll position that puts the
//! point at a fixed visual "focus" anchor instead of flush against the
//! top-left corner. The computation is pure; performing the smooth scroll is
//! the viewport collaborator's job.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Conventional page width the occupied-width percentage is scaled against.
const PAGE_WIDTH_UNITS: f64 = 100.0;

/// Empirically tuned visual constants. The values encode UX intent, not
/// algorithmic necessity; embedders may override them from their settings
/// but should not re-derive them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTuning {
    /// Horizontal focus anchor as a fraction of viewport width.
    pub anchor_x_ratio: f64,
    /// Vertical focus anchor as a fraction of viewport height.
    pub anchor_y_ratio: f64,
    /// At or above this occupied-width percentage the layout is a single
    /// column and the anchor-adjusted offset is used directly.
    pub single_column_min: f64,
    /// Below this occupied-width percentage side-by-side pages are stacked
    /// vertically and again the anchor-adjusted offset is used directly.
    pub stacked_max: f64,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            anchor_x_ratio: 0.07,
            anchor_y_ratio: 0.382,
            single_column_min: 90.0,
            stacked_max: 50.0,
        }
    }
}

/// A jump command's scroll input: where the target page sits in the viewport
/// and the absolute viewport coordinates of the point to bring into view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub page_rect: Rect,
    /// 1-based, matching [`crate::FrameLocation`].
    pub page_no: u32,
    pub inner: Point,
}

/// Where the viewport should scroll to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    pub left: f64,
    pub top: f64,
}

/// Compute the scroll position bringing `req.inner` to the focus anchor.
///
/// `viewport` is the visible area (its size is what matters), `body` the
/// bounding box of the scrolled content; `req.inner` is converted into
/// body-relative offsets before anchoring. Deterministic for equal inputs.
pub fn compute_scroll_target(
    tuning: &ScrollTuning,
    viewport: Rect,
    body: Rect,
    req: &ScrollRequest,
) -> ScrollPosition {
    let x_fix = viewport.width * tuning.anchor_x_ratio;
    let y_fix = viewport.height * tuning.anchor_y_ratio;

    let x_anchor = (req.inner.x - body.left) - x_fix;
    let y_anchor = (req.inner.y - body.top) - y_fix;

    let width_occupied = occupied_width_percent(viewport, req.page_rect);

    if width_occupied >= tuning.single_column_min || width_occupied < tuning.stacked_max {
        // single column, or columns stacked vertically: scroll straight to
        // the anchored offset
        return ScrollPosition {
            left: x_anchor,
            top: y_anchor,
        };
    }

    // A genuine two-column spread. Snap to one of two stable horizontal
    // positions so consecutive jumps don't oscillate between column edges.
    let page_left = req.page_rect.left - body.left;
    let page_right = page_left + req.page_rect.width;
    let right_edge_threshold = page_right - x_fix;
    let left = if x_anchor > right_edge_threshold {
        // target hugs the column's right edge: align that edge to the
        // viewport's right, anchor-inset
        page_right - viewport.width + x_fix
    } else {
        page_left - x_fix
    };

    ScrollPosition { left, top: y_anchor }
}

/// Percentage of the viewport width the page rectangle occupies, scaled
/// against the 100-unit page-width convention.
fn occupied_width_percent(viewport: Rect, page_rect: Rect) -> f64 {
    if viewport.width <= 0.0 {
        return 0.0;
    }
    PAGE_WIDTH_UNITS * page_rect.width / viewport.width
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1000.0, 500.0);
    const BODY: Rect = Rect::new(-20.0, -300.0, 1040.0, 4000.0);

    fn request(page_rect: Rect, inner: Point) -> ScrollRequest {
        ScrollRequest {
            page_rect,
            page_no: 1,
            inner,
        }
    }

    #[test]
    fn default_tuning_carries_the_visual_constants() {
        let t = ScrollTuning::default();
        assert_eq!(t.anchor_x_ratio, 0.07);
        assert_eq!(t.anchor_y_ratio, 0.382);
        assert_eq!(t.single_column_min, 90.0);
        assert_eq!(t.stacked_max, 50.0);
    }

    #[test]
    fn single_column_scrolls_to_the_anchored_offset() {
        // page fills 95% of the viewport width
        let req = request(
            Rect::new(25.0, 400.0, 950.0, 1300.0),
            Point::new(300.0, 700.0),
        );
        let pos = compute_scroll_target(&ScrollTuning::default(), VIEWPORT, BODY, &req);

        // inner - body origin, minus the 7% / 38.2% anchors
        assert_eq!(pos.left, (300.0 - -20.0) - 1000.0 * 0.07);
        assert_eq!(pos.top, (700.0 - -300.0) - 500.0 * 0.382);
    }

    #[test]
    fn stacked_columns_also_scroll_directly() {
        // page fills 40% of the viewport width: below the stacked threshold
        let req = request(
            Rect::new(10.0, 0.0, 400.0, 600.0),
            Point::new(100.0, 100.0),
        );
        let pos = compute_scroll_target(&ScrollTuning::default(), VIEWPORT, BODY, &req);
        assert_eq!(pos.left, 120.0 - 1000.0 * 0.07);
        assert_eq!(pos.top, 400.0 - 500.0 * 0.382);
    }

    #[test]
    fn two_column_left_alignment_below_the_right_threshold() {
        // page fills 70% of the viewport width, target near the page's left
        let page_rect = Rect::new(50.0, 0.0, 700.0, 990.0);
        let req = request(page_rect, Point::new(120.0, 40.0));
        let pos = compute_scroll_target(&ScrollTuning::default(), VIEWPORT, BODY, &req);

        // snapped to the page's left edge minus the x anchor
        let page_left = 50.0 - -20.0;
        assert_eq!(pos.left, page_left - 1000.0 * 0.07);
        assert_eq!(pos.top, (40.0 - -300.0) - 500.0 * 0.382);
    }

    #[test]
    fn two_column_right_alignment_past_the_right_threshold() {
        // same 70% page, target hugging the page's right edge
        let page_rect = Rect::new(900.0, 0.0, 700.0, 990.0);
        let req = request(page_rect, Point::new(1610.0, 40.0));
        let pos = compute_scroll_target(&ScrollTuning::default(), VIEWPORT, BODY, &req);

        // page spans 920..1620 body-relative; x_anchor 1560 > threshold 1550
        let page_right = 900.0 - -20.0 + 700.0;
        assert_eq!(pos.left, page_right - 1000.0 + 1000.0 * 0.07);
        assert_eq!(pos.top, (40.0 - -300.0) - 500.0 * 0.382);
    }

    #[test]
    fn deterministic_for_equal_inputs() {
        let req = request(
            Rect::new(50.0, 0.0, 700.0, 990.0),
            Point::new(400.0, 250.0),
        );
        let a = compute_scroll_target(&ScrollTuning::default(), VIEWPORT, BODY, &req);
        let b = compute_scroll_target(&ScrollTuning::default(), VIEWPORT, BODY, &req);
        assert_eq!(a, b);
    }
}
