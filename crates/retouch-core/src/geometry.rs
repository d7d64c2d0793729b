//! Crop rectangle geometry.
//!
//! The crop region is stored as percentages of the canvas dimensions so it
//! survives canvas resizing. This module converts that percentage rectangle
//! into pixel space under an optional aspect-ratio constraint, and computes
//! the fixed control-point (handle) layout for a pixel rectangle.
//!
//! # Coordinate System
//!
//! - Percentage coordinates are in the range 0.0 to 100.0
//! - Pixel coordinates have their origin at the canvas top-left corner
//! - Ratio correction preserves the rectangle's center point

use serde::{Deserialize, Serialize};

/// Drawn radius of a corner handle, in pixels.
pub const HANDLE_DRAW_RADIUS: f64 = 8.0;

/// Capture radius used for hit-testing a handle, in pixels.
///
/// Larger than the drawn radius so handles are easier to acquire.
pub const HANDLE_HIT_RADIUS: f64 = 12.0;

/// Minimum crop side length, as a percentage of the canvas dimension.
pub const MIN_CROP_PERCENT: f64 = 10.0;

/// Crop mode selected by the user.
///
/// Ratios are stored as an exact integer pair rather than a float so the
/// observed modes (1:1, 4:3, 16:9) can be compared and matched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropMode {
    /// Cropping disabled; pointer interaction is ignored.
    #[default]
    None,
    /// Free-form cropping without an aspect constraint.
    Free,
    /// Cropping locked to a fixed width:height ratio.
    Ratio { w: u32, h: u32 },
}

impl CropMode {
    /// 1:1 square crop.
    pub const SQUARE: CropMode = CropMode::Ratio { w: 1, h: 1 };
    /// 4:3 standard crop.
    pub const STANDARD: CropMode = CropMode::Ratio { w: 4, h: 3 };
    /// 16:9 widescreen crop.
    pub const WIDESCREEN: CropMode = CropMode::Ratio { w: 16, h: 9 };

    /// Target width/height ratio, or `None` when unconstrained.
    pub fn ratio(self) -> Option<f64> {
        match self {
            CropMode::Ratio { w, h } => Some(w as f64 / h as f64),
            CropMode::None | CropMode::Free => None,
        }
    }

    /// Whether a crop region is being edited at all.
    pub fn is_active(self) -> bool {
        !matches!(self, CropMode::None)
    }
}

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point (avoids the sqrt in hit tests).
    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// The user-manipulated crop region, in canvas percentages.
///
/// Invariants maintained by the interaction layer: `x + width <= 100`,
/// `y + height <= 100`, and both sides at least [`MIN_CROP_PERCENT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for CropRect {
    /// Centered default region covering 80% of the canvas.
    fn default() -> Self {
        Self {
            x: 10.0,
            y: 10.0,
            width: 80.0,
            height: 80.0,
        }
    }
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A resolved rectangle in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Whether a point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// One of the four corner resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se];

    /// Whether dragging this corner moves the left edge (and so the x origin).
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Corner::Nw | Corner::Sw)
    }

    /// Whether dragging this corner moves the top edge (and so the y origin).
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Corner::Nw | Corner::Ne)
    }

    /// CSS cursor name shown when hovering this handle.
    pub fn cursor(self) -> &'static str {
        match self {
            Corner::Nw => "nw-resize",
            Corner::Ne => "ne-resize",
            Corner::Sw => "sw-resize",
            Corner::Se => "se-resize",
        }
    }
}

/// Positions of the four corner handles plus the synthetic center move point.
///
/// Rendering and hit-testing both read this layout so the drawn markers and
/// the interactive regions can never diverge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLayout {
    pub nw: Point,
    pub ne: Point,
    pub sw: Point,
    pub se: Point,
    pub center: Point,
}

impl HandleLayout {
    /// Position of a single corner handle.
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::Nw => self.nw,
            Corner::Ne => self.ne,
            Corner::Sw => self.sw,
            Corner::Se => self.se,
        }
    }

    /// All four corners paired with their positions, in hit-test order.
    pub fn corners(&self) -> [(Corner, Point); 4] {
        [
            (Corner::Nw, self.nw),
            (Corner::Ne, self.ne),
            (Corner::Sw, self.sw),
            (Corner::Se, self.se),
        ]
    }
}

/// Compute the handle layout for a pixel rectangle.
pub fn handle_positions(rect: &PixelRect) -> HandleLayout {
    HandleLayout {
        nw: Point::new(rect.x, rect.y),
        ne: Point::new(rect.x + rect.width, rect.y),
        sw: Point::new(rect.x, rect.y + rect.height),
        se: Point::new(rect.x + rect.width, rect.y + rect.height),
        center: rect.center(),
    }
}

/// Resolve a percentage crop rectangle to pixel space.
///
/// The percentage rectangle is first converted to pixels, then the width and
/// height are re-derived to satisfy the crop mode's aspect ratio while
/// preserving the rectangle's center point, and finally the result is clamped
/// to lie entirely within the canvas: position is clamped first, then the
/// sides are shrunk if the rectangle still overflows.
///
/// For a 1:1 ratio the corrected side length is `max(width, height)` of the
/// pre-ratio rectangle, applied symmetrically around the existing center
/// (this falls out of the general correction: the narrower side is grown to
/// match the longer one).
pub fn resolve_crop_rect(rect: &CropRect, canvas_w: f64, canvas_h: f64, mode: CropMode) -> PixelRect {
    let mut w = rect.width / 100.0 * canvas_w;
    let mut h = rect.height / 100.0 * canvas_h;
    let mut x = rect.x / 100.0 * canvas_w;
    let mut y = rect.y / 100.0 * canvas_h;

    let center_x = x + w / 2.0;
    let center_y = y + h / 2.0;

    if let Some(ratio) = mode.ratio() {
        if w / h < ratio {
            w = h * ratio;
        } else {
            h = w / ratio;
        }
    }

    // Re-derive position from the preserved center
    x = center_x - w / 2.0;
    y = center_y - h / 2.0;

    // Clamp position first, then shrink if the rectangle still overflows
    x = x.min(canvas_w - w).max(0.0);
    y = y.min(canvas_h - h).max(0.0);
    w = w.min(canvas_w - x);
    h = h.min(canvas_h - y);

    PixelRect {
        x,
        y,
        width: w,
        height: h,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating valid percentage crop rectangles.
    fn crop_rect_strategy() -> impl Strategy<Value = CropRect> {
        (10.0f64..=90.0, 10.0f64..=90.0).prop_flat_map(|(w, h)| {
            (
                (0.0f64..=100.0 - w),
                (0.0f64..=100.0 - h),
                Just(w),
                Just(h),
            )
                .prop_map(|(x, y, w, h)| CropRect::new(x, y, w, h))
        })
    }

    /// Strategy for generating canvas dimensions.
    fn canvas_strategy() -> impl Strategy<Value = (f64, f64)> {
        (100.0f64..=4000.0, 100.0f64..=4000.0)
    }

    /// Strategy covering the three fixed ratio modes.
    fn ratio_mode_strategy() -> impl Strategy<Value = CropMode> {
        prop_oneof![
            Just(CropMode::SQUARE),
            Just(CropMode::STANDARD),
            Just(CropMode::WIDESCREEN),
        ]
    }

    proptest! {
        /// Property: the resolved rectangle always lies inside the canvas.
        #[test]
        fn prop_resolved_rect_contained(
            rect in crop_rect_strategy(),
            (cw, ch) in canvas_strategy(),
            mode in ratio_mode_strategy(),
        ) {
            let px = resolve_crop_rect(&rect, cw, ch, mode);

            prop_assert!(px.x >= 0.0);
            prop_assert!(px.y >= 0.0);
            prop_assert!(px.x + px.width <= cw + 1e-6);
            prop_assert!(px.y + px.height <= ch + 1e-6);
        }

        /// Property: when the corrected rectangle fits without shrinking, its
        /// ratio matches the target within floating-point tolerance.
        #[test]
        fn prop_ratio_holds_when_unclamped(
            rect in crop_rect_strategy(),
            (cw, ch) in canvas_strategy(),
            mode in ratio_mode_strategy(),
        ) {
            let px = resolve_crop_rect(&rect, cw, ch, mode);
            let target = mode.ratio().unwrap();

            // Shrink-clamping can break the ratio at the canvas edge; only
            // check rectangles that were not shrunk.
            let fits = px.width < cw - 1e-6 || px.height < ch - 1e-6;
            if fits && px.x > 1e-6 && px.y > 1e-6
                && px.x + px.width < cw - 1e-6 && px.y + px.height < ch - 1e-6 {
                let ratio = px.width / px.height;
                prop_assert!((ratio - target).abs() < 1e-6,
                    "ratio {} vs target {}", ratio, target);
            }
        }

        /// Property: free mode is a pure percentage-to-pixel conversion.
        #[test]
        fn prop_free_mode_is_linear(
            rect in crop_rect_strategy(),
            (cw, ch) in canvas_strategy(),
        ) {
            let px = resolve_crop_rect(&rect, cw, ch, CropMode::Free);

            prop_assert!((px.x - rect.x / 100.0 * cw).abs() < 1e-6);
            prop_assert!((px.y - rect.y / 100.0 * ch).abs() < 1e-6);
            prop_assert!((px.width - rect.width / 100.0 * cw).abs() < 1e-6);
            prop_assert!((px.height - rect.height / 100.0 * ch).abs() < 1e-6);
        }

        /// Property: resolution is deterministic.
        #[test]
        fn prop_resolve_deterministic(
            rect in crop_rect_strategy(),
            (cw, ch) in canvas_strategy(),
            mode in ratio_mode_strategy(),
        ) {
            let a = resolve_crop_rect(&rect, cw, ch, mode);
            let b = resolve_crop_rect(&rect, cw, ch, mode);
            prop_assert_eq!(a, b);
        }

        /// Property: the square correction always uses the longer side.
        #[test]
        fn prop_square_side_is_max(
            rect in crop_rect_strategy(),
        ) {
            // Use a square canvas so no clamping interferes for inner rects
            let px = resolve_crop_rect(&rect, 10000.0, 10000.0, CropMode::SQUARE);
            let pre_w = rect.width / 100.0 * 10000.0;
            let pre_h = rect.height / 100.0 * 10000.0;
            let expected = pre_w.max(pre_h);

            // Only check when the corrected square fits fully
            if px.width < 10000.0 - 1e-6 && px.x > 1e-6 && px.y > 1e-6
                && px.x + px.width < 10000.0 - 1e-6
                && px.y + px.height < 10000.0 - 1e-6 {
                prop_assert!((px.width - expected).abs() < 1e-6);
                prop_assert!((px.height - expected).abs() < 1e-6);
            }
        }
    }
}
