//! Ring geometry: wedge partitioning, the carved center hole, the sweep
//! gradient used by the indeterminate spinner and the label metrics.

use std::sync::Arc;

use rusttype::{point, Font, Scale};
use tracing::{debug, warn};

use crate::config::{Color, CIRCLE_DEGREES};

/// Share of the bounding square used by the ring.
const DRAWING_RECT_FACTOR: f32 = 0.9;

/// Hole radius relative to the drawing rectangle width.
const HOLE_RADIUS_FACTOR: f32 = 0.4;

/// Gradient position where the progress color has faded out completely.
const GRADIENT_FADE_END: f32 = 0.75;

/// Digit height relative to the text size when no font is available.
const FALLBACK_GLYPH_HEIGHT_FACTOR: f32 = 0.7;

// ============================================================================
// DATA TYPES
// ============================================================================

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// One bar of the ring, in degrees. 0° points right, angles grow clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub start_deg: f32,
    pub sweep_deg: f32,
}

impl Wedge {
    pub fn end_deg(&self) -> f32 {
        self.start_deg + self.sweep_deg
    }
}

/// The ring silhouette: all wedges with the center hole removed.
///
/// A wedge has its apex at the ring center and the hole is concentric, so
/// each wedge minus the hole is an annular sector between `hole_radius` and
/// `outer_radius`. Wedges never overlap, which makes their union the plain
/// list of sectors.
#[derive(Debug, Clone, PartialEq)]
pub struct RingPath {
    center: (f32, f32),
    outer_radius: f32,
    hole_radius: f32,
    wedges: Vec<Wedge>,
    step_deg: f32,
}

impl RingPath {
    fn empty(center: (f32, f32), outer_radius: f32, hole_radius: f32) -> Self {
        Self {
            center,
            outer_radius,
            hole_radius,
            wedges: Vec::new(),
            step_deg: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.wedges.is_empty()
    }

    pub fn wedges(&self) -> &[Wedge] {
        &self.wedges
    }

    pub fn center(&self) -> (f32, f32) {
        self.center
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn hole_radius(&self) -> f32 {
        self.hole_radius
    }

    /// Sum of all wedge sweeps, in degrees.
    pub fn total_sweep(&self) -> f32 {
        self.wedges.iter().map(|w| w.sweep_deg).sum()
    }

    /// Anti-aliased coverage of the pixel sample at `(x, y)`, in [0, 1].
    pub fn coverage(&self, x: f32, y: f32) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let dx = x - self.center.0;
        let dy = y - self.center.1;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > self.outer_radius + 1.0 || dist < self.hole_radius - 1.0 {
            return 0.0;
        }

        let radial = if dist > self.outer_radius {
            1.0 - (dist - self.outer_radius).min(1.0)
        } else if dist < self.hole_radius {
            1.0 - (self.hole_radius - dist).min(1.0)
        } else {
            1.0
        };

        let gap_deg = self.angular_gap(angle_of(dx, dy));
        let angular = if gap_deg <= 0.0 {
            1.0
        } else {
            1.0 - (gap_deg.to_radians() * dist).min(1.0)
        };

        (radial * angular).clamp(0.0, 1.0)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.coverage(x, y) >= 0.5
    }

    /// Angular distance from `angle` to the nearest wedge, 0 when inside one.
    fn angular_gap(&self, angle: f32) -> f32 {
        let count = self.wedges.len();
        let index = (angle / self.step_deg).floor() as usize;
        let local = angle - index as f32 * self.step_deg;

        let mut gap = f32::MAX;
        if let Some(wedge) = self.wedges.get(index) {
            if local <= wedge.sweep_deg {
                return 0.0;
            }
            gap = gap.min(local - wedge.sweep_deg);
        }
        if index + 1 < count {
            gap = gap.min(self.wedges[index + 1].start_deg - angle);
        }
        // The first wedge seen from the far side of 360°.
        gap = gap.min(CIRCLE_DEGREES - angle);
        if let Some(last) = self.wedges.last() {
            if index >= count {
                gap = gap.min(angle - last.end_deg());
            }
        }
        gap.max(0.0)
    }

    /// Flattened outline of every bar: the outer arc followed by the inner
    /// arc walked backwards. `segments_per_bar` is the number of straight
    /// pieces approximating each arc.
    pub fn outline(&self, segments_per_bar: usize) -> Vec<Vec<(f32, f32)>> {
        let segments = segments_per_bar.max(1);
        self.wedges
            .iter()
            .map(|wedge| {
                let mut points = Vec::with_capacity((segments + 1) * 2);
                for i in 0..=segments {
                    let t = i as f32 / segments as f32;
                    points.push(self.point_at(wedge.start_deg + wedge.sweep_deg * t, self.outer_radius));
                }
                for i in (0..=segments).rev() {
                    let t = i as f32 / segments as f32;
                    points.push(self.point_at(wedge.start_deg + wedge.sweep_deg * t, self.hole_radius));
                }
                points
            })
            .collect()
    }

    fn point_at(&self, angle_deg: f32, radius: f32) -> (f32, f32) {
        let rad = angle_deg.to_radians();
        (
            self.center.0 + rad.cos() * radius,
            self.center.1 + rad.sin() * radius,
        )
    }
}

/// Angle of the vector `(dx, dy)` in degrees, in [0, 360), clockwise in
/// screen space.
pub fn angle_of(dx: f32, dy: f32) -> f32 {
    dy.atan2(dx).to_degrees().rem_euclid(CIRCLE_DEGREES)
}

/// Sweep gradient around the ring center: the progress color at 0 fading to
/// transparent at 0.75 of a turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientSpec {
    pub center: (f32, f32),
    pub stops: [(f32, Color); 2],
}

impl GradientSpec {
    pub fn new(center: (f32, f32), color: Color) -> Self {
        Self {
            center,
            stops: [(0.0, color), (GRADIENT_FADE_END, color.with_alpha(0))],
        }
    }

    /// Color at `fraction` of a full turn.
    pub fn color_at(&self, fraction: f32) -> Color {
        let [(start_pos, start), (end_pos, end)] = self.stops;
        if fraction <= start_pos {
            start
        } else if fraction >= end_pos {
            end
        } else {
            start.lerp(end, (fraction - start_pos) / (end_pos - start_pos))
        }
    }
}

/// Sizing of the center percentage label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    pub text_size: f32,
    pub glyph_height: f32,
}

/// Everything the renderer needs from one geometry build.
#[derive(Debug, Clone, PartialEq)]
pub struct RingGeometry {
    pub bounds_size: f32,
    pub rect: RectF,
    pub path: RingPath,
    pub sweep_deg: f32,
    pub gradient: GradientSpec,
    pub label: LabelMetrics,
}

impl RingGeometry {
    pub fn hole_radius(&self) -> f32 {
        self.path.hole_radius()
    }

    pub fn gradient_center(&self) -> (f32, f32) {
        self.gradient.center
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Sweep of one bar: `360 / bar_count - spacing`. Not positive means the
/// ring degenerates.
pub fn bar_sweep(bar_count: i32, spacing_px: f32) -> f32 {
    if bar_count <= 0 {
        return 0.0;
    }
    CIRCLE_DEGREES / bar_count as f32 - spacing_px
}

pub struct GeometryBuilder;

impl GeometryBuilder {
    /// Builds the ring for a `bounds_size` square. Never fails: degenerate
    /// inputs produce an empty silhouette.
    pub fn build(
        bounds_size: f32,
        bar_count: i32,
        spacing_px: f32,
        progress_color: Color,
        font: Option<&Font<'_>>,
    ) -> RingGeometry {
        let bounds_size = if bounds_size.is_finite() {
            bounds_size.max(0.0)
        } else {
            0.0
        };
        let spacing_px = spacing_px.max(0.0);

        let side = bounds_size * DRAWING_RECT_FACTOR;
        let offset = (bounds_size - side) / 2.0;
        let rect = RectF::new(offset, offset, side, side);
        let center = (rect.center_x(), rect.center_y());
        let outer_radius = side / 2.0;
        let hole_radius = side * HOLE_RADIUS_FACTOR;

        let sweep = bar_sweep(bar_count, spacing_px);
        let path = if bounds_size <= 0.0 || bar_count <= 0 || sweep <= 0.0 {
            warn!(
                bounds_size,
                bar_count, spacing_px, sweep, "degenerate ring, drawing nothing"
            );
            RingPath::empty(center, outer_radius, hole_radius)
        } else {
            let step = sweep + spacing_px;
            let wedges = (0..bar_count)
                .map(|i| Wedge {
                    start_deg: i as f32 * step,
                    sweep_deg: sweep,
                })
                .collect();
            RingPath {
                center,
                outer_radius,
                hole_radius,
                wedges,
                step_deg: step,
            }
        };

        let text_size = side / 4.0;
        let glyph_height = font
            .and_then(|font| measure_glyph_height(font, text_size))
            .unwrap_or(text_size * FALLBACK_GLYPH_HEIGHT_FACTOR);

        debug!(bounds_size, bar_count, spacing_px, sweep, "ring geometry built");

        RingGeometry {
            bounds_size,
            rect,
            path,
            sweep_deg: sweep.max(0.0),
            gradient: GradientSpec::new(center, progress_color),
            label: LabelMetrics {
                text_size,
                glyph_height,
            },
        }
    }
}

/// Pixel height of the "0" glyph at `text_size`.
fn measure_glyph_height(font: &Font<'_>, text_size: f32) -> Option<f32> {
    if text_size <= 0.0 {
        return None;
    }
    let glyph = font
        .glyph('0')
        .scaled(Scale::uniform(text_size))
        .positioned(point(0.0, 0.0));
    glyph
        .pixel_bounding_box()
        .map(|bb| (bb.max.y - bb.min.y) as f32)
}

// ============================================================================
// CACHE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct GeometryKey {
    bounds_size: f32,
    bar_count: i32,
    spacing_px: f32,
    progress_color: Color,
}

/// Keeps the last built geometry and rebuilds only when an input changes.
#[derive(Debug, Default)]
pub struct GeometryCache {
    key: Option<GeometryKey>,
    geometry: Option<Arc<RingGeometry>>,
    builds: usize,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached geometry, rebuilding it first when the inputs
    /// changed. The previous geometry is replaced only once the new one is
    /// complete.
    pub fn get(
        &mut self,
        bounds_size: f32,
        bar_count: i32,
        spacing_px: f32,
        progress_color: Color,
        font: Option<&Font<'_>>,
    ) -> Arc<RingGeometry> {
        let key = GeometryKey {
            bounds_size,
            bar_count,
            spacing_px,
            progress_color,
        };
        if let (Some(cached_key), Some(geometry)) = (self.key, &self.geometry) {
            if cached_key == key {
                return Arc::clone(geometry);
            }
        }

        let geometry = Arc::new(GeometryBuilder::build(
            bounds_size,
            bar_count,
            spacing_px,
            progress_color,
            font,
        ));
        self.key = Some(key);
        self.geometry = Some(Arc::clone(&geometry));
        self.builds += 1;
        geometry
    }

    #[cfg(test)]
    fn builds(&self) -> usize {
        self.builds
    }
}
