use bon::Builder;
use std::time::Duration;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default widget side, in density-independent units.
pub const DEFAULT_SIZE: f32 = 50.0;

/// Default number of bars around the ring.
pub const DEFAULT_BAR_COUNT: i32 = 40;

/// Default gap between bars, in density-independent units.
pub const DEFAULT_SPACING: f32 = 2.0;

/// Default length of one spin cycle and of an animated progress change.
pub const DEFAULT_ANIMATION_DURATION_MS: i64 = 1000;

/// Delay between animation frames, ~60 fps.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(1000 / 60);

/// Span of the gradient pie drawn in indeterminate mode.
pub const INDETERMINATE_ARC_DEGREES: f32 = 270.0;

/// Start angle of the determinate arc (12 o'clock).
pub const START_ANGLE: f32 = -90.0;

pub const CIRCLE_DEGREES: f32 = 360.0;
pub const MAX_PROGRESS: i32 = 100;

// ============================================================================
// COLOR
// ============================================================================

/// RGBA color for ring elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const GREEN: Color = Color::new(0x00, 0xff, 0x00);
    pub const DARK_GRAY: Color = Color::new(0x44, 0x44, 0x44);
    pub const LIGHT_GRAY: Color = Color::new(0xcc, 0xcc, 0xcc);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same RGB with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Component-wise blend towards `other`, `t` in [0, 1].
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

// ============================================================================
// WIDGET CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Builder)]
pub struct BarProgressConfig {
    // Ring configuration
    #[builder(default = DEFAULT_BAR_COUNT)]
    pub bar_count: i32,
    #[builder(default = DEFAULT_SPACING)]
    pub spacing: f32,
    #[builder(default = 1.0)]
    pub density: f32,

    // Colors
    #[builder(default = Color::GREEN)]
    pub progress_color: Color,
    #[builder(default = Color::DARK_GRAY)]
    pub progress_bg_color: Color,
    pub background: Option<Color>,

    // Initial state
    #[builder(default = true)]
    pub show_progress: bool,
    #[builder(default = false)]
    pub indeterminate: bool,
    #[builder(default = 0)]
    pub progress: i32,

    // Animation configuration
    #[builder(default = DEFAULT_ANIMATION_DURATION_MS)]
    pub indeterminate_duration_ms: i64,
    #[builder(default = DEFAULT_ANIMATION_DURATION_MS)]
    pub transition_duration_ms: i64,
    #[builder(default = FRAME_INTERVAL)]
    pub frame_interval: Duration,

    // Window configuration
    #[builder(default = "Bar Progress".to_string())]
    pub title: String,
    #[builder(default = 300)]
    pub window_width: usize,
    #[builder(default = 300)]
    pub window_height: usize,

    // Font used for the center label
    pub font_data: Option<Vec<u8>>,
}

impl BarProgressConfig {
    /// Bar spacing in device pixels.
    pub fn spacing_px(&self) -> f32 {
        (self.spacing * self.density).max(0.0)
    }

    /// Side of the widget when the host imposes no size.
    pub fn default_size_px(&self) -> u32 {
        (DEFAULT_SIZE * self.density).max(1.0) as u32
    }
}

impl Default for BarProgressConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_attributes() {
        let config = BarProgressConfig::default();
        assert_eq!(config.bar_count, 40);
        assert_eq!(config.spacing, 2.0);
        assert_eq!(config.progress_color, Color::GREEN);
        assert_eq!(config.progress_bg_color, Color::DARK_GRAY);
        assert!(config.show_progress);
        assert!(!config.indeterminate);
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert!(config.font_data.is_none());
    }

    #[test]
    fn spacing_scales_with_density() {
        let config = BarProgressConfig::builder().density(2.0).spacing(3.0).build();
        assert_eq!(config.spacing_px(), 6.0);
        assert_eq!(config.default_size_px(), 100);
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Color::from_hex("#ff8000"), Some(Color::new(0xff, 0x80, 0x00)));
        assert_eq!(
            Color::from_hex("10203040"),
            Some(Color::rgba(0x10, 0x20, 0x30, 0x40))
        );
        assert_eq!(Color::from_hex("#12"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn lerp_reaches_both_ends() {
        let from = Color::GREEN;
        let to = Color::GREEN.with_alpha(0);
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
        assert_eq!(from.lerp(to, 0.5).a, 128);
    }
}
