//! Editor session WASM binding.
//!
//! This module exposes the retouch-core editor session to JavaScript as a
//! single stateful `Editor` object: load an image, drive pointer events,
//! apply named edit operations, render previews and export PNG.
//!
//! # Example
//!
//! ```typescript
//! import init, { Editor } from '@retouch/wasm';
//!
//! await init();
//! const editor = new Editor();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! editor.load_image(bytes);
//!
//! const frame = editor.render(container.clientWidth, container.clientHeight);
//! ctx.putImageData(toImageData(frame), 0, 0);
//!
//! editor.set_crop_mode('16:9');
//! editor.set_filter('vintage');
//! const url = editor.export_data_url(2000);
//! ```

use retouch_core::{decode_image, CropMode, EditorSession, FilterPreset};
use wasm_bindgen::prelude::*;

use crate::types::JsRenderFrame;

/// Parse the crop-mode identifiers the UI uses.
///
/// Strings exist at this boundary only; the core API is enum-typed.
fn parse_crop_mode(mode: &str) -> Option<CropMode> {
    match mode {
        "none" => Some(CropMode::None),
        "free" => Some(CropMode::Free),
        "1:1" => Some(CropMode::SQUARE),
        "4:3" => Some(CropMode::STANDARD),
        "16:9" => Some(CropMode::WIDESCREEN),
        _ => None,
    }
}

/// A stateful image editor session.
#[wasm_bindgen]
pub struct Editor {
    session: EditorSession,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Editor {
    /// Create an empty editor with no image loaded.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        Editor {
            session: EditorSession::new(),
        }
    }

    /// Load an image from JPEG or PNG bytes, replacing any current image
    /// and resetting all edits.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a decodable image. The
    /// previous image and edits stay in place on failure.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let token = self.session.begin_load();
        match decode_image(bytes) {
            Ok(image) => {
                self.session.complete_load(token, image);
                Ok(())
            }
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!("image load failed: {e}")));
                Err(JsValue::from_str(&e.to_string()))
            }
        }
    }

    /// Check if an image is loaded
    #[wasm_bindgen(getter)]
    pub fn is_ready(&self) -> bool {
        self.session.is_ready()
    }

    /// Check if any edit differs from identity
    #[wasm_bindgen(getter)]
    pub fn has_changes(&self) -> bool {
        self.session.has_changes()
    }

    /// Render the preview into a container of the given size.
    ///
    /// Returns `undefined` when no image is loaded or the container is
    /// degenerate. The frame dimensions become the canvas size pointer
    /// events are mapped against.
    pub fn render(&mut self, container_w: u32, container_h: u32) -> Option<JsRenderFrame> {
        self.session
            .render(container_w, container_h)
            .map(JsRenderFrame::from_frame)
    }

    /// Check and clear the re-render flag. Returns true when an edit or a
    /// drag changed something since the last `render` call.
    pub fn needs_render(&mut self) -> bool {
        self.session.take_dirty()
    }

    /// Pointer-down on the preview canvas, in canvas pixels. Returns true
    /// when a crop drag was captured.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.session.pointer_down(x, y)
    }

    /// Pointer-move on the preview canvas. Returns the CSS cursor for the
    /// element under the pointer (`"move"`, `"nw-resize"`, ...) or
    /// `undefined` when the pointer addresses nothing.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<String> {
        self.session
            .pointer_move(x, y)
            .map(|target| target.cursor().to_string())
    }

    /// Pointer-up, ending any drag.
    pub fn pointer_up(&mut self) {
        self.session.pointer_up();
    }

    /// Pointer leaving the canvas, ending any drag.
    pub fn pointer_leave(&mut self) {
        self.session.pointer_leave();
    }

    /// Rotate 90 degrees clockwise
    pub fn rotate_cw(&mut self) {
        self.session.rotate_cw();
    }

    /// Rotate 90 degrees counter-clockwise
    pub fn rotate_ccw(&mut self) {
        self.session.rotate_ccw();
    }

    /// Toggle the horizontal mirror
    pub fn toggle_flip_h(&mut self) {
        self.session.toggle_flip_h();
    }

    /// Toggle the vertical mirror
    pub fn toggle_flip_v(&mut self) {
        self.session.toggle_flip_v();
    }

    /// Select a crop mode: `"none"`, `"free"`, `"1:1"`, `"4:3"` or
    /// `"16:9"`. Selecting the active mode again turns crop off.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown identifier.
    pub fn set_crop_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = parse_crop_mode(mode)
            .ok_or_else(|| JsValue::from_str(&format!("unknown crop mode: {mode}")))?;
        self.session.set_crop_mode(mode);
        Ok(())
    }

    /// Apply a filter preset by name: `"none"`, `"grayscale"`,
    /// `"vintage"`, `"warm"`, `"cold"`, `"dramatic"` or `"fade"`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown identifier.
    pub fn set_filter(&mut self, name: &str) -> Result<(), JsValue> {
        let preset = FilterPreset::from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown filter: {name}")))?;
        self.session.select_preset(preset);
        Ok(())
    }

    /// Set brightness (0 to 200, 100 neutral)
    pub fn set_brightness(&mut self, value: u8) {
        self.session.set_brightness(value);
    }

    /// Set contrast (0 to 200, 100 neutral)
    pub fn set_contrast(&mut self, value: u8) {
        self.session.set_contrast(value);
    }

    /// Set saturation (0 to 200, 100 neutral)
    pub fn set_saturation(&mut self, value: u8) {
        self.session.set_saturation(value);
    }

    /// Reset all edits to identity
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Snapshot the current edit parameters as a plain JS object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn params(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.session.params())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Export the edited image as PNG bytes, capped at `max_size` pixels
    /// on the long side. Returns `undefined` when no image is loaded.
    pub fn export_png(&self, max_size: u32) -> Option<Vec<u8>> {
        self.session.export(max_size).map(|exported| exported.png)
    }

    /// Export the edited image as a `data:image/png;base64,` URI for a
    /// download anchor. Returns `undefined` when no image is loaded.
    pub fn export_data_url(&self, max_size: u32) -> Option<String> {
        self.session
            .export(max_size)
            .map(|exported| exported.to_data_uri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crop_mode() {
        assert_eq!(parse_crop_mode("none"), Some(CropMode::None));
        assert_eq!(parse_crop_mode("free"), Some(CropMode::Free));
        assert_eq!(parse_crop_mode("1:1"), Some(CropMode::SQUARE));
        assert_eq!(parse_crop_mode("4:3"), Some(CropMode::STANDARD));
        assert_eq!(parse_crop_mode("16:9"), Some(CropMode::WIDESCREEN));
        assert_eq!(parse_crop_mode("3:2"), None);
    }

    #[test]
    fn test_editor_starts_empty() {
        let editor = Editor::new();
        assert!(!editor.is_ready());
        assert!(!editor.has_changes());
        assert!(editor.export_png(2000).is_none());
    }

    #[test]
    fn test_edit_ops_without_image() {
        // Parameter edits work before a load; only rendering needs pixels.
        let mut editor = Editor::new();
        editor.rotate_cw();
        editor.set_brightness(150);
        assert!(editor.has_changes());
        assert!(editor.render(800, 600).is_none());
    }
}
