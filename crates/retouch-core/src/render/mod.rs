//! Deterministic render pipeline.
//!
//! One composition path serves both the interactive preview and the export:
//! scale the source into the draw box, flip, rotate by quarter turns, then
//! color-adjust. The preview additionally composites the crop overlay and
//! uses a cheaper scaling filter; the export runs at full resolution with
//! Lanczos3 and no chrome.
//!
//! Flips are applied before rotation. The front end composes its transform
//! as translate, rotate, then axis scale, which places the mirror in
//! image-local space ahead of the rotation.

mod overlay;

pub use overlay::draw_crop_overlay;

use image::imageops::{self, FilterType};

use crate::adjust::apply_color_filter;
use crate::decode::DecodedImage;
use crate::geometry::{resolve_crop_rect, PixelRect};
use crate::{EditParams, Rotation};

/// Default long-side cap for export, in pixels.
pub const DEFAULT_EXPORT_MAX: u32 = 2000;

/// A composed RGB frame ready for display or encoding.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB pixel data, 3 bytes per pixel.
    pub pixels: Vec<u8>,
    /// The crop rectangle in frame pixels, when a crop mode is active.
    pub crop_px: Option<PixelRect>,
}

/// Contain-fit source dimensions into a target box.
///
/// Fits to the target width first, falls back to the height when that
/// overflows. Results are rounded and never smaller than 1 px per side.
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 || max_w == 0 || max_h == 0 {
        return (1, 1);
    }

    let aspect = src_w as f64 / src_h as f64;
    let mut width = max_w as f64;
    let mut height = width / aspect;
    if height > max_h as f64 {
        height = max_h as f64;
        width = height * aspect;
    }

    ((width.round() as u32).max(1), (height.round() as u32).max(1))
}

/// Output dimensions for export.
///
/// Odd quarter turns swap the axes, then the long-side cap applies a
/// uniform downscale. Never upscales past the source resolution.
pub fn export_dimensions(src_w: u32, src_h: u32, rotation: Rotation, max_size: u32) -> (u32, u32) {
    let (mut width, mut height) = if rotation.swaps_dimensions() {
        (src_h, src_w)
    } else {
        (src_w, src_h)
    };

    if max_size > 0 && (width > max_size || height > max_size) {
        let scale = (max_size as f64 / width as f64).min(max_size as f64 / height as f64);
        width = ((width as f64 * scale).round() as u32).max(1);
        height = ((height as f64 * scale).round() as u32).max(1);
    }

    (width.max(1), height.max(1))
}

/// Compose the source into a frame of the given output dimensions.
fn compose(
    source: &DecodedImage,
    params: &EditParams,
    frame_w: u32,
    frame_h: u32,
    filter: FilterType,
) -> Option<RenderFrame> {
    let img = source.to_rgb_image()?;

    // The draw box is the frame before rotation: odd quarter turns swap
    // the output axes, so the source is scaled into the swapped box.
    let (draw_w, draw_h) = if params.rotation.swaps_dimensions() {
        (frame_h, frame_w)
    } else {
        (frame_w, frame_h)
    };

    let mut img = if img.dimensions() == (draw_w, draw_h) {
        img
    } else {
        imageops::resize(&img, draw_w, draw_h, filter)
    };

    if params.flip_h {
        imageops::flip_horizontal_in_place(&mut img);
    }
    if params.flip_v {
        imageops::flip_vertical_in_place(&mut img);
    }

    let img = match params.rotation {
        Rotation::Deg0 => img,
        Rotation::Deg90 => imageops::rotate90(&img),
        Rotation::Deg180 => imageops::rotate180(&img),
        Rotation::Deg270 => imageops::rotate270(&img),
    };

    let mut pixels = img.into_raw();
    apply_color_filter(&mut pixels, &params.color_filter());

    Some(RenderFrame {
        width: frame_w,
        height: frame_h,
        pixels,
        crop_px: None,
    })
}

/// Render the interactive preview into a target box.
///
/// Returns `None` for an empty source or a degenerate target. When a crop
/// mode is active the frame carries the resolved crop rectangle and the
/// overlay chrome is composited on top.
pub fn render_preview(
    source: &DecodedImage,
    params: &EditParams,
    target_w: u32,
    target_h: u32,
) -> Option<RenderFrame> {
    if source.is_empty() || target_w == 0 || target_h == 0 {
        return None;
    }

    let (frame_w, frame_h) = fit_dimensions(source.width, source.height, target_w, target_h);
    let mut frame = compose(source, params, frame_w, frame_h, FilterType::Triangle)?;

    if params.crop_mode.is_active() {
        let crop = resolve_crop_rect(
            &params.crop_rect,
            frame_w as f64,
            frame_h as f64,
            params.crop_mode,
        );
        draw_crop_overlay(&mut frame, &crop);
        frame.crop_px = Some(crop);
    }

    Some(frame)
}

/// Render the export frame at full resolution, capped at `max_size` on the
/// long side. Never draws overlay chrome.
pub fn render_export(
    source: &DecodedImage,
    params: &EditParams,
    max_size: u32,
) -> Option<RenderFrame> {
    if source.is_empty() {
        return None;
    }

    let (frame_w, frame_h) =
        export_dimensions(source.width, source.height, params.rotation, max_size);
    compose(source, params, frame_w, frame_h, FilterType::Lanczos3)
}
