//! A round progress indicator drawn as a ring of bars.
//!
//! Determinate progress sweeps a colored arc clockwise from 12 o'clock;
//! indeterminate mode spins a fading gradient arc around the ring.

// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod animation;
mod config;
pub mod geometry;
pub mod render;

// External crate imports
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use thiserror::Error;
use tracing::{debug, error, info};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub use animation::{
    Accelerate, AccelerateDecelerate, AnimationEngine, Clock, Decelerate, EngineState,
    FrameSample, Interpolator, Linear, ManualClock, Overshoot, SystemClock,
};
pub use config::{
    BarProgressConfig, Color, CIRCLE_DEGREES, DEFAULT_ANIMATION_DURATION_MS, DEFAULT_BAR_COUNT,
    DEFAULT_SIZE, DEFAULT_SPACING, FRAME_INTERVAL, INDETERMINATE_ARC_DEGREES, MAX_PROGRESS,
    START_ANGLE,
};
pub use geometry::{GeometryBuilder, RingGeometry, RingPath};
pub use render::{Canvas, DrawCommand, Scene};

use geometry::GeometryCache;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum BarProgressError {
    #[error("font data could not be parsed")]
    InvalidFont,
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("pixel surface failed: {0}")]
    Pixels(#[from] pixels::Error),
}

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Progress shown by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressValue {
    /// 0 to 100.
    pub value: i32,
    pub indeterminate: bool,
    pub show_value: bool,
}

/// Command enum for updates sent from other threads
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressCommand {
    SetProgress(i32),
    AnimateProgress(i32),
    SetIndeterminate(bool),
    SetShowProgress(bool),
    SetBarCount(i32),
    SetSpacing(f32),
    SetColors(Color, Color), // progress, background
    SetIndeterminateDuration(i64),
}

/// The progress bar widget
pub struct BarProgressBar {
    config: BarProgressConfig,
    progress: ProgressValue,
    geometry: GeometryCache,
    engine: AnimationEngine,
    font: Option<Font<'static>>,
    reported_missing_font: bool,
}

impl BarProgressBar {
    pub fn new(config: BarProgressConfig) -> Result<Self, BarProgressError> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Same as [`BarProgressBar::new`] with an explicit time source.
    pub fn with_clock(
        config: BarProgressConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, BarProgressError> {
        let font = match &config.font_data {
            Some(data) => {
                let font = Font::try_from_vec(data.clone()).ok_or(BarProgressError::InvalidFont)?;
                Some(font)
            }
            None => None,
        };
        let engine = AnimationEngine::new(
            clock,
            config.indeterminate_duration_ms,
            config.transition_duration_ms,
            config.frame_interval,
        );
        let progress = ProgressValue {
            value: config.progress.clamp(0, MAX_PROGRESS),
            indeterminate: false,
            show_value: config.show_progress,
        };
        let indeterminate = config.indeterminate;

        let mut bar = Self {
            config,
            progress,
            geometry: GeometryCache::new(),
            engine,
            font,
            reported_missing_font: false,
        };
        if indeterminate {
            bar.set_indeterminate(true);
        }
        Ok(bar)
    }

    pub fn config(&self) -> &BarProgressConfig {
        &self.config
    }

    pub fn progress(&self) -> i32 {
        self.progress.value
    }

    pub fn progress_value(&self) -> ProgressValue {
        self.progress
    }

    pub fn is_indeterminate(&self) -> bool {
        self.progress.indeterminate
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    /// Current spinner rotation, in degrees.
    pub fn angle(&self) -> f32 {
        self.engine.angle()
    }

    pub fn set_indeterminate(&mut self, indeterminate: bool) {
        self.progress.indeterminate = indeterminate;
        self.engine.set_indeterminate(indeterminate);
    }

    pub fn set_show_progress(&mut self, show: bool) {
        self.progress.show_value = show;
    }

    pub fn set_progress(&mut self, progress: i32) {
        self.set_progress_animated(progress, false);
    }

    /// Sets the progress, clamped to [0, 100]. Leaves indeterminate mode and
    /// cancels any transition still running.
    pub fn set_progress_animated(&mut self, progress: i32, animate: bool) {
        let target = progress.clamp(0, MAX_PROGRESS);
        self.set_indeterminate(false);
        if animate {
            self.engine.animate_progress(self.progress.value, target);
        } else {
            self.engine.settle();
            self.progress.value = target;
        }
    }

    pub fn set_bar_count(&mut self, bar_count: i32) {
        self.config.bar_count = bar_count;
    }

    /// Bar spacing in density-independent units.
    pub fn set_spacing(&mut self, spacing: f32) {
        self.config.spacing = spacing;
    }

    pub fn set_colors(&mut self, progress_color: Color, progress_bg_color: Color) {
        self.config.progress_color = progress_color;
        self.config.progress_bg_color = progress_bg_color;
    }

    pub fn set_progress_color(&mut self, color: Color) {
        self.config.progress_color = color;
    }

    pub fn set_progress_bg_color(&mut self, color: Color) {
        self.config.progress_bg_color = color;
    }

    /// Spin cycle length in milliseconds; restarts the spin.
    pub fn set_indeterminate_duration(&mut self, millis: i64) {
        self.config.indeterminate_duration_ms = millis;
        self.engine.set_spin_duration(millis);
    }

    pub fn set_interpolator(&mut self, interpolator: Option<Arc<dyn Interpolator>>) {
        self.engine.set_interpolator(interpolator);
    }

    pub fn apply(&mut self, command: ProgressCommand) {
        match command {
            ProgressCommand::SetProgress(value) => self.set_progress(value),
            ProgressCommand::AnimateProgress(value) => self.set_progress_animated(value, true),
            ProgressCommand::SetIndeterminate(on) => self.set_indeterminate(on),
            ProgressCommand::SetShowProgress(show) => self.set_show_progress(show),
            ProgressCommand::SetBarCount(count) => self.set_bar_count(count),
            ProgressCommand::SetSpacing(spacing) => self.set_spacing(spacing),
            ProgressCommand::SetColors(fg, bg) => self.set_colors(fg, bg),
            ProgressCommand::SetIndeterminateDuration(millis) => {
                self.set_indeterminate_duration(millis)
            }
        }
    }

    /// Square side for the given size constraints: the larger side wins and
    /// a missing constraint falls back to the default widget size.
    pub fn measure(&self, width: Option<u32>, height: Option<u32>) -> u32 {
        let size = self.config.default_size_px();
        width.unwrap_or(size).max(height.unwrap_or(size))
    }

    /// Ring geometry for a `size` square, rebuilt only when an input changed.
    pub fn geometry(&mut self, size: u32) -> Arc<RingGeometry> {
        self.geometry.get(
            size as f32,
            self.config.bar_count,
            self.config.spacing_px(),
            self.config.progress_color,
            self.font.as_ref(),
        )
    }

    /// When the next frame should be drawn, if the widget is animating.
    pub fn next_frame_due(&self) -> Option<Duration> {
        self.engine.next_frame_due()
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_active()
    }

    /// Advances the animation to now and builds the frame for a `size`
    /// square.
    pub fn compose(&mut self, size: u32) -> Scene {
        let geometry = self.geometry(size);
        self.advance();
        self.scene_for(&geometry)
    }

    /// Advances the animation and draws into an RGBA8 frame. The ring is
    /// centered in the largest square that fits.
    pub fn render(&mut self, frame: &mut [u8], width: usize, height: usize) -> FrameSample {
        let size = width.min(height);
        let geometry = self.geometry(size as u32);
        let sample = self.advance();
        let scene = self.scene_for(&geometry);

        if self.font.is_none() && scene.label().is_some() && !self.reported_missing_font {
            debug!("no font configured, skipping the progress label");
            self.reported_missing_font = true;
        }

        let origin = (
            (width as f32 - geometry.bounds_size) / 2.0,
            (height as f32 - geometry.bounds_size) / 2.0,
        );
        let mut canvas = Canvas::new(frame, width, height);
        scene.render(&mut canvas, &geometry, origin, self.font.as_ref());
        sample
    }

    fn advance(&mut self) -> FrameSample {
        let sample = self.engine.sample();
        if let Some(value) = sample.progress {
            self.progress.value = value;
        }
        sample
    }

    fn scene_for(&self, geometry: &RingGeometry) -> Scene {
        render::compose(
            &self.progress,
            self.engine.angle(),
            geometry,
            self.config.progress_color,
            self.config.progress_bg_color,
            self.config.background,
        )
    }

    // ========================================================================
    // WINDOW
    // ========================================================================

    pub fn show(&mut self) -> Result<(), BarProgressError> {
        self.run_window(None)
    }

    pub fn show_with_commands(
        &mut self,
        receiver: Receiver<ProgressCommand>,
    ) -> Result<(), BarProgressError> {
        self.run_window(Some(receiver))
    }

    fn run_window(
        &mut self,
        receiver: Option<Receiver<ProgressCommand>>,
    ) -> Result<(), BarProgressError> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
        info!(width = fb_width, height = fb_height, "window ready");

        let poll_interval = self.engine.frame_interval();

        event_loop.run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("close requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width == 0 || new_size.height == 0 {
                        return;
                    }
                    fb_width = new_size.width as usize;
                    fb_height = new_size.height as usize;
                    if let Err(e) = pixels.resize_buffer(new_size.width, new_size.height) {
                        error!("buffer resize failed: {}", e);
                    }
                    if let Err(e) = pixels.resize_surface(new_size.width, new_size.height) {
                        error!("surface resize failed: {}", e);
                    }
                    window_clone.request_redraw();
                }
                WindowEvent::RedrawRequested => {
                    let frame = pixels.frame_mut();
                    self.render(frame, fb_width, fb_height);
                    if let Err(e) = pixels.render() {
                        error!("render failed: {}", e);
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let mut dirty = false;
                if let Some(ref receiver) = receiver {
                    while let Ok(command) = receiver.try_recv() {
                        self.apply(command);
                        dirty = true;
                    }
                }
                if dirty || self.engine.is_frame_due() {
                    window_clone.request_redraw();
                }

                let wake = match self.engine.next_frame_due() {
                    Some(due) => Some(due.saturating_sub(self.engine.now())),
                    None if receiver.is_some() => Some(poll_interval),
                    None => None,
                };
                window_target.set_control_flow(match wake {
                    Some(wait) => ControlFlow::WaitUntil(Instant::now() + wait),
                    None => ControlFlow::Wait,
                });
            }
            _ => {}
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(config: BarProgressConfig) -> (ManualClock, BarProgressBar) {
        let clock = ManualClock::new();
        let bar = BarProgressBar::with_clock(config, Arc::new(clock.clone()))
            .expect("no font to parse");
        (clock, bar)
    }

    #[test]
    fn starts_from_config() {
        let (_clock, bar) = bar(BarProgressConfig::builder().progress(130).build());
        assert_eq!(bar.progress(), 100);
        assert!(!bar.is_indeterminate());
        assert_eq!(bar.state(), EngineState::Idle);

        let (_clock, spinning) = self::bar(BarProgressConfig::builder().indeterminate(true).build());
        assert!(spinning.is_indeterminate());
        assert!(spinning.is_animating());
    }

    #[test]
    fn rejects_garbage_font() {
        let config = BarProgressConfig::builder().font_data(vec![1, 2, 3]).build();
        assert!(matches!(
            BarProgressBar::new(config),
            Err(BarProgressError::InvalidFont)
        ));
    }

    #[test]
    fn progress_is_clamped_by_the_widget() {
        let (_clock, mut bar) = bar(BarProgressConfig::default());
        bar.set_progress(-5);
        assert_eq!(bar.progress(), 0);
        bar.set_progress(250);
        assert_eq!(bar.progress(), 100);
    }

    #[test]
    fn direct_progress_leaves_indeterminate() {
        let (_clock, mut bar) = bar(BarProgressConfig::default());
        bar.set_indeterminate(true);
        bar.set_progress(30);
        assert!(!bar.is_indeterminate());
        assert_eq!(bar.state(), EngineState::Determinate);
        assert_eq!(bar.next_frame_due(), None);
    }

    #[test]
    fn commands_map_to_operations() {
        let (_clock, mut bar) = bar(BarProgressConfig::default());
        bar.apply(ProgressCommand::SetBarCount(12));
        bar.apply(ProgressCommand::SetSpacing(4.0));
        bar.apply(ProgressCommand::SetColors(Color::WHITE, Color::LIGHT_GRAY));
        bar.apply(ProgressCommand::SetShowProgress(false));
        bar.apply(ProgressCommand::SetIndeterminateDuration(1500));
        bar.apply(ProgressCommand::AnimateProgress(60));
        assert_eq!(bar.config().bar_count, 12);
        assert_eq!(bar.config().spacing, 4.0);
        assert_eq!(bar.config().progress_color, Color::WHITE);
        assert_eq!(bar.config().progress_bg_color, Color::LIGHT_GRAY);
        assert!(!bar.progress_value().show_value);
        assert_eq!(bar.config().indeterminate_duration_ms, 1500);
        assert_eq!(bar.state(), EngineState::DeterminateTransition);
        bar.apply(ProgressCommand::SetIndeterminate(true));
        assert_eq!(bar.state(), EngineState::Indeterminate);
        bar.apply(ProgressCommand::SetProgress(5));
        assert_eq!(bar.progress(), 5);
    }

    #[test]
    fn measure_uses_the_larger_side() {
        let (_clock, bar) = bar(BarProgressConfig::builder().density(2.0).build());
        assert_eq!(bar.measure(None, None), 100);
        assert_eq!(bar.measure(Some(240), Some(180)), 240);
        assert_eq!(bar.measure(Some(40), None), 100);
    }

    #[test]
    fn geometry_follows_bar_count_changes() {
        let (_clock, mut bar) = bar(BarProgressConfig::default());
        assert_eq!(bar.geometry(200).path.wedges().len(), 40);
        bar.set_bar_count(10);
        assert_eq!(bar.geometry(200).path.wedges().len(), 10);
        bar.set_spacing(40.0);
        assert!(bar.geometry(200).path.is_empty());
    }

    #[test]
    fn render_fills_a_non_square_frame() {
        let (_clock, mut bar) = bar(
            BarProgressConfig::builder()
                .progress(100)
                .background(Color::WHITE)
                .build(),
        );
        let mut frame = vec![0u8; 300 * 200 * 4];
        let sample = bar.render(&mut frame, 300, 200);
        assert_eq!(sample, FrameSample::default());
        // Ring centered at (150, 100): the hole stays white, bars are green.
        let px = |x: usize, y: usize| {
            let i = (y * 300 + x) * 4;
            [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
        };
        assert_eq!(px(150, 100), [0xff; 4]);
        assert_eq!(px(5, 100), [0xff; 4]);
        // Middle of bar 0 (0°..7°), 81 px from the center.
        let a = 3.5f32.to_radians();
        let x = (150.0 + a.cos() * 81.0) as usize;
        let y = (100.0 + a.sin() * 81.0) as usize;
        assert_eq!(px(x, y), [0x00, 0xff, 0x00, 0xff]);
    }
}
