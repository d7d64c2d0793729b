//! Editor session: one loaded image plus its edit and interaction state.
//!
//! The session is the single mutable owner the bindings talk to. It tracks
//! a load generation so that a slow decode finishing after a newer load is
//! dropped instead of clobbering the current image.

use crate::decode::DecodedImage;
use crate::encode::{encode_png, to_data_uri};
use crate::geometry::{CropMode, Point};
use crate::hit_test::HitTarget;
use crate::interaction::{InteractionState, PointerUpdate};
use crate::render::{render_export, render_preview, RenderFrame};
use crate::{EditParams, FilterPreset};

/// Token identifying one load request. Completing a load with a stale
/// token is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// The result of an export pass: encoded bytes plus output dimensions.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

impl ExportedImage {
    /// The same bytes as an inline `data:image/png;base64,` URI.
    pub fn to_data_uri(&self) -> String {
        to_data_uri(&self.png)
    }
}

/// Editing session for a single image.
#[derive(Debug, Default)]
pub struct EditorSession {
    source: Option<DecodedImage>,
    params: EditParams,
    interaction: InteractionState,
    canvas_w: f64,
    canvas_h: f64,
    load_gen: u64,
    dirty: bool,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load, invalidating any load still in flight.
    pub fn begin_load(&mut self) -> LoadToken {
        self.load_gen += 1;
        LoadToken(self.load_gen)
    }

    /// Complete a load started with [`begin_load`](Self::begin_load).
    ///
    /// Returns false and leaves the session untouched when the token is
    /// stale, meaning a newer load began after this one.
    pub fn complete_load(&mut self, token: LoadToken, image: DecodedImage) -> bool {
        if token.0 != self.load_gen {
            return false;
        }

        self.source = Some(image);
        self.params = EditParams::new();
        self.interaction = InteractionState::Idle;
        self.dirty = true;
        true
    }

    /// Check if an image is loaded.
    pub fn is_ready(&self) -> bool {
        self.source.is_some()
    }

    /// The current edit parameters.
    pub fn params(&self) -> &EditParams {
        &self.params
    }

    /// True while a crop drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.interaction.is_dragging()
    }

    /// Take and clear the dirty flag. The caller re-renders when true.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Handle pointer-down on the preview surface. Returns true when a
    /// crop drag was captured.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.interaction.pointer_down(
            Point::new(x, y),
            &self.params.crop_rect,
            self.canvas_w,
            self.canvas_h,
            self.params.crop_mode,
        )
    }

    /// Handle pointer-move. Returns the target under the pointer for the
    /// cursor affordance; drag updates are applied to the crop rect.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<HitTarget> {
        let update = self.interaction.pointer_move(
            Point::new(x, y),
            &self.params.crop_rect,
            self.canvas_w,
            self.canvas_h,
            self.params.crop_mode,
        );

        match update {
            PointerUpdate::Ignored => None,
            PointerUpdate::Hover(target) => target,
            PointerUpdate::Changed(rect) => {
                self.params.set_crop_rect(rect);
                self.dirty = true;
                // Dragging keeps whichever cursor captured the drag; the
                // front end does not re-resolve it mid-drag.
                None
            }
        }
    }

    /// Handle pointer-up, ending any drag.
    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up();
    }

    /// Pointer leaving the surface ends a drag the same way.
    pub fn pointer_leave(&mut self) {
        self.interaction.pointer_up();
    }

    pub fn rotate_cw(&mut self) {
        self.params.rotate_cw();
        self.dirty = true;
    }

    pub fn rotate_ccw(&mut self) {
        self.params.rotate_ccw();
        self.dirty = true;
    }

    pub fn toggle_flip_h(&mut self) {
        self.params.toggle_flip_h();
        self.dirty = true;
    }

    pub fn toggle_flip_v(&mut self) {
        self.params.toggle_flip_v();
        self.dirty = true;
    }

    pub fn set_crop_mode(&mut self, mode: CropMode) {
        self.params.set_crop_mode(mode);
        self.interaction = InteractionState::Idle;
        self.dirty = true;
    }

    pub fn select_preset(&mut self, preset: FilterPreset) {
        self.params.select_preset(preset);
        self.dirty = true;
    }

    pub fn set_brightness(&mut self, value: u8) {
        self.params.set_brightness(value);
        self.dirty = true;
    }

    pub fn set_contrast(&mut self, value: u8) {
        self.params.set_contrast(value);
        self.dirty = true;
    }

    pub fn set_saturation(&mut self, value: u8) {
        self.params.set_saturation(value);
        self.dirty = true;
    }

    /// Reset all edits to identity.
    pub fn reset(&mut self) {
        self.params.reset();
        self.interaction = InteractionState::Idle;
        self.dirty = true;
    }

    /// Check if any edit differs from identity.
    pub fn has_changes(&self) -> bool {
        !self.params.is_identity()
    }

    /// Render the preview into a target box.
    ///
    /// Records the resulting frame dimensions as the canvas size for
    /// pointer-event mapping and clears the dirty flag. Returns `None`
    /// when no image is loaded.
    pub fn render(&mut self, target_w: u32, target_h: u32) -> Option<RenderFrame> {
        let source = self.source.as_ref()?;
        let frame = render_preview(source, &self.params, target_w, target_h)?;
        self.canvas_w = frame.width as f64;
        self.canvas_h = frame.height as f64;
        self.dirty = false;
        Some(frame)
    }

    /// Export the edited image as PNG, capped at `max_size` on the long
    /// side. Best-effort: no source or a failed encode returns `None`.
    pub fn export(&self, max_size: u32) -> Option<ExportedImage> {
        let source = self.source.as_ref()?;
        let frame = render_export(source, &self.params, max_size)?;
        let png = encode_png(&frame.pixels, frame.width, frame.height).ok()?;
        Some(ExportedImage {
            width: frame.width,
            height: frame.height,
            png,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rotation;

    fn flat(width: u32, height: u32, value: u8) -> DecodedImage {
        DecodedImage::new(width, height, vec![value; (width * height * 3) as usize])
    }

    fn loaded(width: u32, height: u32) -> EditorSession {
        let mut session = EditorSession::new();
        let token = session.begin_load();
        assert!(session.complete_load(token, flat(width, height, 128)));
        session
    }

    #[test]
    fn test_empty_session_renders_nothing() {
        let mut session = EditorSession::new();
        assert!(!session.is_ready());
        assert!(session.render(800, 600).is_none());
        assert!(session.export(2000).is_none());
    }

    #[test]
    fn test_load_marks_dirty_and_ready() {
        let mut session = loaded(100, 80);
        assert!(session.is_ready());
        assert!(session.take_dirty());
        assert!(!session.take_dirty());
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut session = EditorSession::new();
        let stale = session.begin_load();
        let fresh = session.begin_load();

        assert!(!session.complete_load(stale, flat(10, 10, 1)));
        assert!(!session.is_ready());

        assert!(session.complete_load(fresh, flat(20, 20, 2)));
        assert!(session.is_ready());
    }

    #[test]
    fn test_new_load_resets_edits() {
        let mut session = loaded(100, 80);
        session.rotate_cw();
        session.select_preset(FilterPreset::Dramatic);
        assert!(session.has_changes());

        let token = session.begin_load();
        assert!(session.complete_load(token, flat(50, 50, 7)));
        assert!(!session.has_changes());
    }

    #[test]
    fn test_render_records_canvas_size() {
        let mut session = loaded(200, 100);
        let frame = session.render(100, 100).unwrap();

        assert_eq!((frame.width, frame.height), (100, 50));
        assert!(!session.take_dirty());
    }

    #[test]
    fn test_edit_ops_set_dirty() {
        let mut session = loaded(100, 100);
        session.render(100, 100).unwrap();

        session.set_brightness(150);
        assert!(session.take_dirty());

        session.toggle_flip_h();
        assert!(session.take_dirty());
    }

    #[test]
    fn test_four_rotations_identity() {
        let mut session = loaded(100, 100);
        for _ in 0..4 {
            session.rotate_cw();
        }
        assert_eq!(session.params().rotation, Rotation::Deg0);
        assert!(!session.has_changes());
    }

    #[test]
    fn test_vintage_then_brightness() {
        let mut session = loaded(100, 100);
        session.select_preset(FilterPreset::Vintage);
        session.set_brightness(150);

        let params = session.params();
        assert_eq!(params.brightness, 150);
        assert_eq!(params.contrast, 90);
        assert_eq!(params.saturation, 80);
        assert_eq!(params.preset, FilterPreset::None);
    }

    #[test]
    fn test_reset_after_everything() {
        let mut session = loaded(100, 100);
        session.rotate_ccw();
        session.toggle_flip_v();
        session.set_crop_mode(CropMode::SQUARE);
        session.set_saturation(0);

        session.reset();
        assert!(!session.has_changes());
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_pointer_drag_moves_crop() {
        let mut session = loaded(100, 100);
        session.set_crop_mode(CropMode::Free);
        session.render(100, 100).unwrap();
        session.take_dirty();

        // Center of the default rect at a 100x100 canvas is (50, 50).
        assert!(session.pointer_down(50.0, 50.0));
        assert!(session.is_dragging());

        session.pointer_move(55.0, 50.0);
        assert!(session.take_dirty());
        assert!((session.params().crop_rect.x - 15.0).abs() < 1e-9);

        session.pointer_up();
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_pointer_ignored_without_crop_mode() {
        let mut session = loaded(100, 100);
        session.render(100, 100).unwrap();

        assert!(!session.pointer_down(50.0, 50.0));
        assert!(session.pointer_move(50.0, 50.0).is_none());
    }

    #[test]
    fn test_hover_reports_cursor_target() {
        let mut session = loaded(100, 100);
        session.set_crop_mode(CropMode::Free);
        session.render(100, 100).unwrap();

        // Nw corner of the default rect.
        let target = session.pointer_move(10.0, 10.0);
        assert_eq!(target.map(|t| t.cursor()), Some("nw-resize"));
    }

    #[test]
    fn test_export_produces_png() {
        let session = loaded(40, 30);
        let exported = session.export(2000).unwrap();

        assert_eq!((exported.width, exported.height), (40, 30));
        assert_eq!(&exported.png[..4], &[0x89, b'P', b'N', b'G']);
        assert!(exported.to_data_uri().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_export_caps_long_side() {
        let session = loaded(400, 300);
        let exported = session.export(200).unwrap();
        assert_eq!((exported.width, exported.height), (200, 150));
    }
}
