//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editing engine to JavaScript as a
//! stateful `Editor` session for the browser canvas front end.
//!
//! # Module Structure
//!
//! - `editor` - The `Editor` session binding (load, pointer events, edits,
//!   render, export)
//! - `types` - WASM-compatible wrapper types for frame data
//!
//! # Usage
//!
//! ```typescript
//! import init, { Editor } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new Editor();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! editor.load_image(bytes);
//! const frame = editor.render(800, 600);
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod types;

// Re-export public types
pub use editor::Editor;
pub use types::JsRenderFrame;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
