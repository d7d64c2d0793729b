//! Crop overlay chrome for the preview frame.
//!
//! Composites the crop affordances directly into the RGB frame: a dimmed
//! surround, a dashed border, rule-of-thirds guides, and the five drag
//! handles. Coordinates come in as frame pixels from the resolved crop
//! rectangle.

use crate::geometry::{handle_positions, PixelRect, Point, HANDLE_DRAW_RADIUS};

use super::RenderFrame;

/// Border line width in pixels.
const BORDER_WIDTH: f64 = 2.0;
/// Dash pattern: 5 px on, 5 px off.
const DASH_LENGTH: f64 = 5.0;
/// Radius of the center move handle.
const CENTER_RADIUS: f64 = 5.0;
/// Opacity of the rule-of-thirds guides.
const GRID_ALPHA: f64 = 0.3;

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];

/// Composite the crop overlay into the frame.
pub fn draw_crop_overlay(frame: &mut RenderFrame, rect: &PixelRect) {
    dim_outside(frame, rect);
    draw_dashed_border(frame, rect);
    draw_thirds_grid(frame, rect);

    let layout = handle_positions(rect);
    for (_, position) in layout.corners() {
        draw_handle(frame, position, HANDLE_DRAW_RADIUS);
    }
    draw_handle(frame, layout.center, CENTER_RADIUS);
}

/// Halve pixel values outside the crop rectangle.
fn dim_outside(frame: &mut RenderFrame, rect: &PixelRect) {
    let width = frame.width as usize;
    for y in 0..frame.height as usize {
        for x in 0..width {
            let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if !rect.contains(p) {
                let idx = (y * width + x) * 3;
                frame.pixels[idx] /= 2;
                frame.pixels[idx + 1] /= 2;
                frame.pixels[idx + 2] /= 2;
            }
        }
    }
}

fn draw_dashed_border(frame: &mut RenderFrame, rect: &PixelRect) {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.width, rect.y + rect.height);

    let mut x = x0;
    while x < x1 {
        if dash_on(x - x0) {
            fill_rect(frame, x, y0 - BORDER_WIDTH / 2.0, 1.0, BORDER_WIDTH, WHITE);
            fill_rect(frame, x, y1 - BORDER_WIDTH / 2.0, 1.0, BORDER_WIDTH, WHITE);
        }
        x += 1.0;
    }

    let mut y = y0;
    while y < y1 {
        if dash_on(y - y0) {
            fill_rect(frame, x0 - BORDER_WIDTH / 2.0, y, BORDER_WIDTH, 1.0, WHITE);
            fill_rect(frame, x1 - BORDER_WIDTH / 2.0, y, BORDER_WIDTH, 1.0, WHITE);
        }
        y += 1.0;
    }
}

fn dash_on(offset: f64) -> bool {
    (offset / DASH_LENGTH) as u64 % 2 == 0
}

/// Two vertical and two horizontal guides at the third lines, blended at
/// [`GRID_ALPHA`].
fn draw_thirds_grid(frame: &mut RenderFrame, rect: &PixelRect) {
    for i in 1..3 {
        let gx = rect.x + rect.width * i as f64 / 3.0;
        let gy = rect.y + rect.height * i as f64 / 3.0;
        blend_rect(frame, gx, rect.y, 1.0, rect.height, WHITE, GRID_ALPHA);
        blend_rect(frame, rect.x, gy, rect.width, 1.0, WHITE, GRID_ALPHA);
    }
}

/// A filled white disc with a black ring, the drawn handle marker.
fn draw_handle(frame: &mut RenderFrame, center: Point, radius: f64) {
    fill_circle(frame, center, radius, WHITE);
    stroke_circle(frame, center, radius, BORDER_WIDTH, BLACK);
}

fn fill_rect(frame: &mut RenderFrame, x: f64, y: f64, w: f64, h: f64, color: [u8; 3]) {
    blend_rect(frame, x, y, w, h, color, 1.0);
}

fn blend_rect(frame: &mut RenderFrame, x: f64, y: f64, w: f64, h: f64, color: [u8; 3], alpha: f64) {
    let x0 = x.floor().max(0.0) as usize;
    let y0 = y.floor().max(0.0) as usize;
    let x1 = ((x + w).ceil().max(0.0) as usize).min(frame.width as usize);
    let y1 = ((y + h).ceil().max(0.0) as usize).min(frame.height as usize);

    let width = frame.width as usize;
    for py in y0..y1 {
        for px in x0..x1 {
            blend_pixel(&mut frame.pixels, (py * width + px) * 3, color, alpha);
        }
    }
}

fn fill_circle(frame: &mut RenderFrame, center: Point, radius: f64, color: [u8; 3]) {
    scan_circle(frame, center, radius, |d| d <= radius, color);
}

fn stroke_circle(frame: &mut RenderFrame, center: Point, radius: f64, thickness: f64, color: [u8; 3]) {
    let outer = radius + thickness / 2.0;
    let inner = radius - thickness / 2.0;
    scan_circle(frame, center, outer, |d| d >= inner && d <= outer, color);
}

/// Scan the bounding box of a disc and paint pixels whose center distance
/// satisfies the predicate.
fn scan_circle<F: Fn(f64) -> bool>(
    frame: &mut RenderFrame,
    center: Point,
    extent: f64,
    hit: F,
    color: [u8; 3],
) {
    let x0 = (center.x - extent).floor().max(0.0) as usize;
    let y0 = (center.y - extent).floor().max(0.0) as usize;
    let x1 = ((center.x + extent).ceil().max(0.0) as usize + 1).min(frame.width as usize);
    let y1 = ((center.y + extent).ceil().max(0.0) as usize + 1).min(frame.height as usize);

    let width = frame.width as usize;
    for py in y0..y1 {
        for px in x0..x1 {
            let p = Point::new(px as f64 + 0.5, py as f64 + 0.5);
            let d = p.distance_squared(center).sqrt();
            if hit(d) {
                blend_pixel(&mut frame.pixels, (py * width + px) * 3, color, 1.0);
            }
        }
    }
}

#[inline]
fn blend_pixel(pixels: &mut [u8], idx: usize, color: [u8; 3], alpha: f64) {
    for c in 0..3 {
        let base = pixels[idx + c] as f64;
        let blended = base + (color[c] as f64 - base) * alpha;
        pixels[idx + c] = blended.round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32, value: u8) -> RenderFrame {
        RenderFrame {
            width,
            height,
            pixels: vec![value; (width * height * 3) as usize],
            crop_px: None,
        }
    }

    fn rect() -> PixelRect {
        PixelRect {
            x: 20.0,
            y: 20.0,
            width: 60.0,
            height: 60.0,
        }
    }

    #[test]
    fn test_outside_is_dimmed() {
        let mut f = frame(100, 100, 200);
        draw_crop_overlay(&mut f, &rect());

        let idx = ((5 * 100) + 5) * 3;
        assert_eq!(f.pixels[idx], 100);
        assert_eq!(f.pixels[idx + 1], 100);
        assert_eq!(f.pixels[idx + 2], 100);
    }

    #[test]
    fn test_inside_away_from_chrome_untouched() {
        let mut f = frame(100, 100, 200);
        draw_crop_overlay(&mut f, &rect());

        // (30, 30): inside the rect, clear of the border, the third lines
        // (at 40 and 60) and every handle.
        let idx = ((30 * 100) + 30) * 3;
        assert_eq!(f.pixels[idx], 200);
    }

    #[test]
    fn test_handle_centers_are_white() {
        let mut f = frame(100, 100, 0);
        draw_crop_overlay(&mut f, &rect());

        for (cx, cy) in [(20, 20), (80, 20), (20, 80), (80, 80), (50, 50)] {
            let idx = ((cy * 100) + cx) * 3;
            assert_eq!(f.pixels[idx], 255, "handle at ({cx}, {cy})");
        }
    }

    #[test]
    fn test_grid_line_is_blended() {
        let mut f = frame(100, 100, 0);
        draw_crop_overlay(&mut f, &rect());

        // Vertical third line at x = 40, away from handles and borders.
        let idx = ((30 * 100) + 40) * 3;
        let v = f.pixels[idx];
        assert!(v > 0 && v < 255, "expected partial blend, got {v}");
    }

    #[test]
    fn test_border_dash_gap() {
        let mut f = frame(200, 200, 0);
        let r = PixelRect {
            x: 50.0,
            y: 50.0,
            width: 100.0,
            height: 100.0,
        };
        draw_crop_overlay(&mut f, &r);

        // Along the top edge: x = 51 falls in the first dash, x = 57 in the
        // first gap. Sample one row above center of the 2 px border.
        let on = ((49 * 200) + 51) * 3;
        let off = ((49 * 200) + 57) * 3;
        assert_eq!(f.pixels[on], 255);
        assert_eq!(f.pixels[off], 0);
    }
}
