//! Color adjustment: brightness, contrast, saturation, and filter presets.
//!
//! Adjustments are percentages in the range 0 to 200 where 100 is neutral,
//! applied multiplicatively per pixel in this order:
//! 1. Brightness (channel scale)
//! 2. Contrast (spread around the 50% midpoint)
//! 3. Saturation (luminance-based color mix)

use serde::{Deserialize, Serialize};

/// Neutral adjustment value.
pub const NEUTRAL: u8 = 100;

/// Maximum adjustment value.
pub const ADJUST_MAX: u8 = 200;

/// A brightness/contrast/saturation triple (each 0 to 200, 100 neutral).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorFilter {
    pub brightness: u8,
    pub contrast: u8,
    pub saturation: u8,
}

impl Default for ColorFilter {
    fn default() -> Self {
        Self {
            brightness: NEUTRAL,
            contrast: NEUTRAL,
            saturation: NEUTRAL,
        }
    }
}

impl ColorFilter {
    /// Create a new filter, clamping each value into range.
    pub fn new(brightness: u8, contrast: u8, saturation: u8) -> Self {
        Self {
            brightness: brightness.min(ADJUST_MAX),
            contrast: contrast.min(ADJUST_MAX),
            saturation: saturation.min(ADJUST_MAX),
        }
    }

    /// Check if all values are neutral (applying would be a no-op).
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

/// Named filter preset overriding manual adjustment.
///
/// Selecting a preset overwrites the three manual values with its triple,
/// so later manual edits start from the preset's look instead of silently
/// reverting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPreset {
    #[default]
    None,
    Grayscale,
    Vintage,
    Warm,
    Cold,
    Dramatic,
    Fade,
}

impl FilterPreset {
    pub const ALL: [FilterPreset; 7] = [
        FilterPreset::None,
        FilterPreset::Grayscale,
        FilterPreset::Vintage,
        FilterPreset::Warm,
        FilterPreset::Cold,
        FilterPreset::Dramatic,
        FilterPreset::Fade,
    ];

    /// The fixed adjustment triple for this preset.
    pub fn filter(self) -> ColorFilter {
        match self {
            FilterPreset::None => ColorFilter::new(100, 100, 100),
            FilterPreset::Grayscale => ColorFilter::new(100, 100, 0),
            FilterPreset::Vintage => ColorFilter::new(110, 90, 80),
            FilterPreset::Warm => ColorFilter::new(100, 100, 120),
            FilterPreset::Cold => ColorFilter::new(100, 100, 80),
            FilterPreset::Dramatic => ColorFilter::new(90, 150, 120),
            FilterPreset::Fade => ColorFilter::new(120, 80, 70),
        }
    }

    /// Stable identifier used at the JS boundary.
    pub fn name(self) -> &'static str {
        match self {
            FilterPreset::None => "none",
            FilterPreset::Grayscale => "grayscale",
            FilterPreset::Vintage => "vintage",
            FilterPreset::Warm => "warm",
            FilterPreset::Cold => "cold",
            FilterPreset::Dramatic => "dramatic",
            FilterPreset::Fade => "fade",
        }
    }

    /// Human-readable display label.
    pub fn label(self) -> &'static str {
        match self {
            FilterPreset::None => "Original",
            FilterPreset::Grayscale => "Black & White",
            FilterPreset::Vintage => "Vintage",
            FilterPreset::Warm => "Warm",
            FilterPreset::Cold => "Cold",
            FilterPreset::Dramatic => "Dramatic",
            FilterPreset::Fade => "Fade",
        }
    }

    /// Look up a preset by its identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// Apply a color filter to RGB pixel data in place.
///
/// # Arguments
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `filter` - The adjustment triple to apply
pub fn apply_color_filter(pixels: &mut [u8], filter: &ColorFilter) {
    // Early exit if neutral
    if filter.is_neutral() {
        return;
    }

    let brightness = filter.brightness as f32 / 100.0;
    let contrast = filter.contrast as f32 / 100.0;
    let saturation = filter.saturation as f32 / 100.0;

    for chunk in pixels.chunks_exact_mut(3) {
        let mut r = chunk[0] as f32 / 255.0;
        let mut g = chunk[1] as f32 / 255.0;
        let mut b = chunk[2] as f32 / 255.0;

        (r, g, b) = apply_brightness(r, g, b, brightness);
        (r, g, b) = apply_contrast(r, g, b, contrast);
        (r, g, b) = apply_saturation(r, g, b, saturation);

        chunk[0] = (r.clamp(0.0, 1.0) * 255.0).round() as u8;
        chunk[1] = (g.clamp(0.0, 1.0) * 255.0).round() as u8;
        chunk[2] = (b.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}

/// Scale all channels by the brightness factor.
#[inline]
fn apply_brightness(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    if factor == 1.0 {
        return (r, g, b);
    }
    (r * factor, g * factor, b * factor)
}

/// Spread channel values around the 50% midpoint.
///
/// Formula: `output = (input - 0.5) * factor + 0.5`
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    if factor == 1.0 {
        return (r, g, b);
    }
    let midpoint = 0.5;
    (
        (r - midpoint) * factor + midpoint,
        (g - midpoint) * factor + midpoint,
        (b - midpoint) * factor + midpoint,
    )
}

/// Mix each channel toward or away from the pixel's luminance.
///
/// Factor 0 produces grayscale, 1 is identity, above 1 intensifies color.
#[inline]
fn apply_saturation(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    if factor == 1.0 {
        return (r, g, b);
    }
    let gray = calculate_luminance(r, g, b);
    (
        gray + (r - gray) * factor,
        gray + (g - gray) * factor,
        gray + (b - gray) * factor,
    )
}

/// Calculate luminance using ITU-R BT.709 coefficients.
#[inline]
fn calculate_luminance(r: f32, g: f32, b: f32) -> f32 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}
