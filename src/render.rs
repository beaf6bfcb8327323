use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::{Color, CIRCLE_DEGREES, INDETERMINATE_ARC_DEGREES, MAX_PROGRESS, START_ANGLE};
use crate::geometry::{angle_of, RingGeometry};
use crate::ProgressValue;

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    /// Text centered on `x` with its baseline on `y`.
    Label {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        color: Color,
    },
    /// Restrict every following command to the ring silhouette.
    ClipToSilhouette,
    FillSilhouette(Color),
    /// Pie slice around the ring center, angles in degrees.
    Pie {
        start_deg: f32,
        sweep_deg: f32,
        color: Color,
    },
    /// Pie slice filled with the sweep gradient, rotated with it.
    GradientPie {
        rotation_deg: f32,
        sweep_deg: f32,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// The label text, if this frame shows one.
    pub fn label(&self) -> Option<&str> {
        self.commands.iter().find_map(|command| match command {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Rasterizes the scene with the ring's bounding square placed at
    /// `origin` on the canvas.
    pub fn render(
        &self,
        canvas: &mut Canvas,
        geometry: &RingGeometry,
        origin: (f32, f32),
        font: Option<&Font<'_>>,
    ) {
        let mut clipped = false;
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Label {
                    x,
                    y,
                    text,
                    size,
                    color,
                } => {
                    if let Some(font) = font {
                        draw_text(
                            canvas,
                            origin.0 + x,
                            origin.1 + y,
                            text,
                            font,
                            Scale::uniform(*size),
                            *color,
                        );
                    }
                }
                DrawCommand::ClipToSilhouette => clipped = true,
                DrawCommand::FillSilhouette(color) => {
                    fill_ring(canvas, geometry, origin, clipped, |_| Some(*color));
                }
                DrawCommand::Pie {
                    start_deg,
                    sweep_deg,
                    color,
                } => {
                    fill_ring(canvas, geometry, origin, clipped, |angle| {
                        in_sweep(angle, *start_deg, *sweep_deg).then_some(*color)
                    });
                }
                DrawCommand::GradientPie {
                    rotation_deg,
                    sweep_deg,
                } => {
                    fill_ring(canvas, geometry, origin, clipped, |angle| {
                        let rel = (angle - rotation_deg).rem_euclid(CIRCLE_DEGREES);
                        (rel <= *sweep_deg)
                            .then(|| geometry.gradient.color_at(rel / CIRCLE_DEGREES))
                    });
                }
            }
        }
    }
}

/// Whether `angle` lies on the clockwise sweep starting at `start`.
fn in_sweep(angle: f32, start: f32, sweep: f32) -> bool {
    if sweep <= 0.0 {
        return false;
    }
    if sweep >= CIRCLE_DEGREES {
        return true;
    }
    (angle - start).rem_euclid(CIRCLE_DEGREES) <= sweep
}

// ============================================================================
// COMPOSITION
// ============================================================================

/// Sweep of the determinate arc for `progress` in [0, 100].
pub fn progress_sweep(progress: i32) -> f32 {
    progress as f32 * CIRCLE_DEGREES / MAX_PROGRESS as f32
}

/// Builds the frame: the label (determinate only), then everything else
/// clipped to the ring silhouette.
pub fn compose(
    progress: &ProgressValue,
    angle: f32,
    geometry: &RingGeometry,
    progress_color: Color,
    progress_bg_color: Color,
    background: Option<Color>,
) -> Scene {
    let mut scene = Scene::new();
    if let Some(color) = background {
        scene.add_command(DrawCommand::Clear(color));
    }

    if progress.show_value && !progress.indeterminate {
        scene.add_command(DrawCommand::Label {
            x: geometry.rect.center_x(),
            y: geometry.rect.center_y() + geometry.label.glyph_height / 2.0,
            text: format!("{}%", progress.value),
            size: geometry.label.text_size,
            color: progress_bg_color,
        });
    }

    scene.add_command(DrawCommand::ClipToSilhouette);

    if progress.indeterminate {
        scene.add_command(DrawCommand::GradientPie {
            rotation_deg: angle,
            sweep_deg: INDETERMINATE_ARC_DEGREES,
        });
    } else {
        scene.add_command(DrawCommand::FillSilhouette(progress_bg_color));
        scene.add_command(DrawCommand::Pie {
            start_deg: START_ANGLE,
            sweep_deg: progress_sweep(progress.value),
            color: progress_color,
        });
    }

    scene
}

// ============================================================================
// PIXEL CANVAS
// ============================================================================

/// RGBA8 frame buffer, row-major, `width * height * 4` bytes.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Reads back one pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let px = self.frame.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Source-over blend of `color` scaled by `alpha`.
    fn blend(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let Some(dst) = self.frame.get_mut(idx..idx + 4) else {
            return;
        };
        let a = (alpha * color.a as f32 / 255.0).clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (d, s) in dst.iter_mut().zip(src) {
            *d = (s * a + *d as f32 * (1.0 - a)).round() as u8;
        }
        dst[3] = 0xff;
    }
}

/// Paints every pixel of the ring's square for which `shade` returns a color,
/// weighted by silhouette coverage when clipped.
fn fill_ring<F>(
    canvas: &mut Canvas,
    geometry: &RingGeometry,
    origin: (f32, f32),
    clipped: bool,
    shade: F,
) where
    F: Fn(f32) -> Option<Color>,
{
    let path = &geometry.path;
    if clipped && path.is_empty() {
        return;
    }
    let (cx, cy) = path.center();
    let radius = path.outer_radius();
    let rect = geometry.rect;

    let x0 = (origin.0 + rect.left).floor().max(0.0) as i32;
    let y0 = (origin.1 + rect.top).floor().max(0.0) as i32;
    let x1 = ((origin.0 + rect.left + rect.width).ceil() as i32).min(canvas.width() as i32);
    let y1 = ((origin.1 + rect.top + rect.height).ceil() as i32).min(canvas.height() as i32);

    for y in y0..y1 {
        for x in x0..x1 {
            // Sample at the pixel center, in ring coordinates.
            let sx = x as f32 + 0.5 - origin.0;
            let sy = y as f32 + 0.5 - origin.1;
            let coverage = if clipped {
                path.coverage(sx, sy)
            } else {
                let dist = ((sx - cx).powi(2) + (sy - cy).powi(2)).sqrt();
                1.0 - (dist - radius).clamp(0.0, 1.0)
            };
            if coverage <= 0.01 {
                continue;
            }
            if let Some(color) = shade(angle_of(sx - cx, sy - cy)) {
                canvas.blend(x, y, color, coverage);
            }
        }
    }
}

/// Pixel width of `text` laid out at `scale`.
pub fn text_width(text: &str, font: &Font, scale: Scale) -> i32 {
    let glyphs: Vec<PositionedGlyph> = font.layout(text, scale, point(0.0, 0.0)).collect();
    let (min_x, max_x) = glyphs
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .fold((i32::MAX, i32::MIN), |(min_x, max_x), bb| {
            (min_x.min(bb.min.x), max_x.max(bb.max.x))
        });
    if min_x < max_x {
        max_x - min_x
    } else {
        0
    }
}

fn draw_text(
    canvas: &mut Canvas,
    x: f32,
    baseline: f32,
    text: &str,
    font: &Font,
    scale: Scale,
    color: Color,
) {
    let left = x - text_width(text, font, scale) as f32 / 2.0;
    let glyphs: Vec<PositionedGlyph> = font.layout(text, scale, point(0.0, 0.0)).collect();
    let min_x = glyphs
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .map(|bb| bb.min.x)
        .min()
        .unwrap_or(0);
    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = (left + (gx as i32 + bb.min.x - min_x) as f32).round() as i32;
                let py = (baseline + (gy as i32 + bb.min.y) as f32).round() as i32;
                canvas.blend(px, py, color, v);
            });
        }
    }
}
