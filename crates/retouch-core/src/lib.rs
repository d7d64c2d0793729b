//! Retouch Core - Non-destructive image editing engine
//!
//! This crate provides the editing engine behind the retouch front end:
//! crop geometry and hit-testing, the pointer interaction state machine,
//! the deterministic render pipeline, and PNG export. All edits are stored
//! as parameters; source pixels are never mutated.

pub mod adjust;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod interaction;
pub mod render;
pub mod session;

pub use adjust::{apply_color_filter, ColorFilter, FilterPreset, ADJUST_MAX, NEUTRAL};
pub use decode::{decode_image, DecodeError, DecodedImage};
pub use encode::{encode_png, to_data_uri, EncodeError};
pub use geometry::{resolve_crop_rect, CropMode, CropRect, PixelRect, Point};
pub use hit_test::HitTarget;
pub use interaction::{InteractionState, PointerUpdate};
pub use render::{render_export, render_preview, RenderFrame, DEFAULT_EXPORT_MAX};
pub use session::{EditorSession, ExportedImage, LoadToken};

/// Image rotation in quarter-turn increments, always normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// 90 degrees clockwise.
    Deg90,
    /// 180 degrees.
    Deg180,
    /// 270 degrees clockwise.
    Deg270,
}

impl Rotation {
    /// The rotation angle in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Rotate a further quarter turn clockwise.
    pub fn rotated_cw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Rotate a quarter turn counter-clockwise.
    pub fn rotated_ccw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg270,
            Rotation::Deg90 => Rotation::Deg0,
            Rotation::Deg180 => Rotation::Deg90,
            Rotation::Deg270 => Rotation::Deg180,
        }
    }

    /// Check if this rotation swaps width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// The full non-destructive edit state for one image.
///
/// Every mutation goes through a named operation; the fields stay public
/// for reading and serialization.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditParams {
    /// Quarter-turn rotation.
    pub rotation: Rotation,
    /// Horizontal mirror.
    pub flip_h: bool,
    /// Vertical mirror.
    pub flip_v: bool,
    /// Active crop aspect constraint, `None` when crop is off.
    pub crop_mode: CropMode,
    /// Crop rectangle in percent of the canvas.
    pub crop_rect: CropRect,
    /// Brightness (0 to 200, 100 neutral).
    pub brightness: u8,
    /// Contrast (0 to 200, 100 neutral).
    pub contrast: u8,
    /// Saturation (0 to 200, 100 neutral).
    pub saturation: u8,
    /// The preset the current triple came from, cleared by manual edits.
    pub preset: FilterPreset,
}

impl Default for EditParams {
    fn default() -> Self {
        Self {
            rotation: Rotation::Deg0,
            flip_h: false,
            flip_v: false,
            crop_mode: CropMode::None,
            crop_rect: CropRect::default(),
            brightness: NEUTRAL,
            contrast: NEUTRAL,
            saturation: NEUTRAL,
            preset: FilterPreset::None,
        }
    }
}

impl EditParams {
    /// Create identity parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate a quarter turn clockwise.
    pub fn rotate_cw(&mut self) {
        self.rotation = self.rotation.rotated_cw();
    }

    /// Rotate a quarter turn counter-clockwise.
    pub fn rotate_ccw(&mut self) {
        self.rotation = self.rotation.rotated_ccw();
    }

    /// Toggle the horizontal mirror.
    pub fn toggle_flip_h(&mut self) {
        self.flip_h = !self.flip_h;
    }

    /// Toggle the vertical mirror.
    pub fn toggle_flip_v(&mut self) {
        self.flip_v = !self.flip_v;
    }

    /// Select a crop mode.
    ///
    /// Selecting the active mode again (or `CropMode::None`) turns crop
    /// off. A new mode resets the rectangle to the centered default and
    /// seeds its aspect ratio; the canvas-aware correction happens at
    /// resolve time.
    pub fn set_crop_mode(&mut self, mode: CropMode) {
        if mode == self.crop_mode || !mode.is_active() {
            self.crop_mode = CropMode::None;
            return;
        }

        self.crop_mode = mode;
        let mut rect = CropRect::default();
        if let Some(ratio) = mode.ratio() {
            rect.height = rect.width / ratio;
        }
        self.crop_rect = rect;
    }

    /// Replace the crop rectangle, used by drag updates.
    pub fn set_crop_rect(&mut self, rect: CropRect) {
        self.crop_rect = rect;
    }

    /// Apply a filter preset, overwriting the manual adjustment triple.
    ///
    /// `FilterPreset::None` only clears the preset marker and keeps the
    /// current values.
    pub fn select_preset(&mut self, preset: FilterPreset) {
        if preset != FilterPreset::None {
            let filter = preset.filter();
            self.brightness = filter.brightness;
            self.contrast = filter.contrast;
            self.saturation = filter.saturation;
        }
        self.preset = preset;
    }

    /// Set brightness, clearing the preset marker.
    pub fn set_brightness(&mut self, value: u8) {
        self.brightness = value.min(ADJUST_MAX);
        self.preset = FilterPreset::None;
    }

    /// Set contrast, clearing the preset marker.
    pub fn set_contrast(&mut self, value: u8) {
        self.contrast = value.min(ADJUST_MAX);
        self.preset = FilterPreset::None;
    }

    /// Set saturation, clearing the preset marker.
    pub fn set_saturation(&mut self, value: u8) {
        self.saturation = value.min(ADJUST_MAX);
        self.preset = FilterPreset::None;
    }

    /// Restore identity parameters.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The effective color adjustment triple.
    pub fn color_filter(&self) -> ColorFilter {
        ColorFilter::new(self.brightness, self.contrast, self.saturation)
    }

    /// Check if no edit is applied.
    pub fn is_identity(&self) -> bool {
        *self == Self::new()
    }
}
