//! WASM-compatible wrapper types for frames crossing into JavaScript.
//!
//! This module provides JavaScript-friendly types that wrap the core frame
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use retouch_core::render::RenderFrame;
use wasm_bindgen::prelude::*;

/// A composed preview frame for JavaScript.
///
/// Wraps the core `RenderFrame`: RGB pixels plus the resolved crop
/// rectangle when a crop mode is active.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a
/// copy is made to JavaScript memory as a `Uint8Array`. wasm-bindgen's
/// finalizer releases the WASM side automatically.
#[wasm_bindgen]
pub struct JsRenderFrame {
    frame: RenderFrame,
}

#[wasm_bindgen]
impl JsRenderFrame {
    /// Get the frame width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.frame.width
    }

    /// Get the frame height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.frame.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.frame.pixels.len()
    }

    /// Check if the frame carries a crop rectangle
    #[wasm_bindgen(getter)]
    pub fn has_crop(&self) -> bool {
        self.frame.crop_px.is_some()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.frame.pixels.clone()
    }

    /// The resolved crop rectangle in frame pixels, as
    /// `{ x, y, width, height }`, or `undefined` when crop is off.
    pub fn crop_rect(&self) -> Result<JsValue, JsValue> {
        match &self.frame.crop_px {
            Some(rect) => {
                serde_wasm_bindgen::to_value(rect).map_err(|e| JsValue::from_str(&e.to_string()))
            }
            None => Ok(JsValue::UNDEFINED),
        }
    }
}

impl JsRenderFrame {
    /// Wrap a core frame. Internal constructor used by the editor binding.
    pub(crate) fn from_frame(frame: RenderFrame) -> Self {
        Self { frame }
    }
}
