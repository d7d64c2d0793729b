//! Pointer-drag interaction state machine.
//!
//! Owns the drag lifecycle for the crop rectangle: idle, dragging the whole
//! region, or resizing from a corner handle. Each pointer-move while dragging
//! produces a new immutable [`CropRect`] value; the caller stores it and
//! re-renders, so the rectangle being dragged and the rectangle being drawn
//! can never alias.
//!
//! All positions are surface-relative pixels; deltas are converted to
//! percentage space with the current canvas dimensions before being applied.

use crate::geometry::{resolve_crop_rect, Corner, CropMode, CropRect, Point, MIN_CROP_PERCENT};
use crate::hit_test::{self, HitTarget};

/// Current pointer-drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No drag in progress.
    #[default]
    Idle,
    /// Dragging the whole crop region.
    DraggingMove {
        /// Pointer position at pointer-down.
        anchor: Point,
        /// Snapshot of the crop rect at pointer-down.
        start: CropRect,
    },
    /// Resizing from a corner handle.
    DraggingResize {
        corner: Corner,
        anchor: Point,
        start: CropRect,
    },
}

/// Outcome of a pointer-move event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerUpdate {
    /// Nothing to do (crop mode off, or no canvas yet).
    Ignored,
    /// Idle hover; carries the target under the pointer for the cursor
    /// affordance. No state changed.
    Hover(Option<HitTarget>),
    /// A drag produced a new crop rectangle; store it and re-render.
    Changed(CropRect),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        !self.is_idle()
    }

    /// Handle pointer-down. Returns true when a drag was captured.
    ///
    /// When `mode` is [`CropMode::None`] all pointer events are ignored and
    /// no hit test is attempted.
    pub fn pointer_down(
        &mut self,
        point: Point,
        crop: &CropRect,
        canvas_w: f64,
        canvas_h: f64,
        mode: CropMode,
    ) -> bool {
        if !mode.is_active() || canvas_w <= 0.0 || canvas_h <= 0.0 {
            return false;
        }

        let rect_px = resolve_crop_rect(crop, canvas_w, canvas_h, mode);
        match hit_test::resolve(point, &rect_px) {
            Some(HitTarget::Move) => {
                *self = InteractionState::DraggingMove {
                    anchor: point,
                    start: *crop,
                };
                true
            }
            Some(HitTarget::Resize(corner)) => {
                *self = InteractionState::DraggingResize {
                    corner,
                    anchor: point,
                    start: *crop,
                };
                true
            }
            None => false,
        }
    }

    /// Handle pointer-move.
    ///
    /// While idle this only reports the hover target; while dragging it
    /// computes the new crop rectangle from the pointer delta.
    pub fn pointer_move(
        &self,
        point: Point,
        crop: &CropRect,
        canvas_w: f64,
        canvas_h: f64,
        mode: CropMode,
    ) -> PointerUpdate {
        if !mode.is_active() || canvas_w <= 0.0 || canvas_h <= 0.0 {
            return PointerUpdate::Ignored;
        }

        match self {
            InteractionState::Idle => {
                let rect_px = resolve_crop_rect(crop, canvas_w, canvas_h, mode);
                PointerUpdate::Hover(hit_test::resolve(point, &rect_px))
            }
            InteractionState::DraggingMove { anchor, start } => {
                let dx = (point.x - anchor.x) / canvas_w * 100.0;
                let dy = (point.y - anchor.y) / canvas_h * 100.0;
                PointerUpdate::Changed(apply_move(start, dx, dy))
            }
            InteractionState::DraggingResize {
                corner,
                anchor,
                start,
            } => {
                let dx = (point.x - anchor.x) / canvas_w * 100.0;
                let dy = (point.y - anchor.y) / canvas_h * 100.0;
                PointerUpdate::Changed(apply_resize(start, *corner, dx, dy, mode))
            }
        }
    }

    /// Handle pointer-up or pointer-leave: any drag returns to idle.
    pub fn pointer_up(&mut self) {
        *self = InteractionState::Idle;
    }
}

/// Translate the crop region by a percentage delta, keeping it in bounds.
fn apply_move(start: &CropRect, dx: f64, dy: f64) -> CropRect {
    CropRect {
        x: (start.x + dx).min(100.0 - start.width).max(0.0),
        y: (start.y + dy).min(100.0 - start.height).max(0.0),
        width: start.width,
        height: start.height,
    }
}

/// Resize the crop region from a corner handle.
///
/// Applied as sequential passes: corner adjustment, ratio correction,
/// minimum-size floor (opposite edge kept fixed), final bounds clamp.
/// The ratio pass runs before the floor so a floor-clamped side wins over
/// the ratio at the extreme; the export-side geometry re-derives the exact
/// ratio from the stored percentages anyway.
fn apply_resize(start: &CropRect, corner: Corner, dx: f64, dy: f64, mode: CropMode) -> CropRect {
    let mut x = start.x;
    let mut y = start.y;
    let mut w = start.width;
    let mut h = start.height;

    match corner {
        Corner::Nw => {
            x += dx;
            y += dy;
            w -= dx;
            h -= dy;
        }
        Corner::Ne => {
            y += dy;
            w += dx;
            h -= dy;
        }
        Corner::Sw => {
            x += dx;
            w -= dx;
            h += dy;
        }
        Corner::Se => {
            w += dx;
            h += dy;
        }
    }

    if let CropMode::Ratio { w: rw, h: rh } = mode {
        if rw == rh {
            // Square: both sides follow the longer one, from any corner
            let side = w.max(h);
            w = side;
            h = side;
        } else if corner == Corner::Se {
            // Fixed ratio: derive height from width when width dominates,
            // otherwise width from height
            let ratio = rw as f64 / rh as f64;
            if w / h > ratio {
                h = w / ratio;
            } else {
                w = h * ratio;
            }
        }
    }

    // Minimum side floor; shift the origin so the opposite edge stays fixed
    if w < MIN_CROP_PERCENT {
        w = MIN_CROP_PERCENT;
        if corner.moves_left_edge() {
            x = start.x + start.width - MIN_CROP_PERCENT;
        }
    }
    if h < MIN_CROP_PERCENT {
        h = MIN_CROP_PERCENT;
        if corner.moves_top_edge() {
            y = start.y + start.height - MIN_CROP_PERCENT;
        }
    }

    // Final bounds clamp, identical to the geometry resolve. The origin is
    // capped so at least a minimum-sized rect fits; without the cap an
    // extreme delta combined with ratio correction can push the origin past
    // the far edge and invert the width.
    x = x.max(0.0).min(100.0 - MIN_CROP_PERCENT);
    y = y.max(0.0).min(100.0 - MIN_CROP_PERCENT);
    w = w.min(100.0 - x);
    h = h.min(100.0 - y);

    CropRect {
        x,
        y,
        width: w,
        height: h,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
