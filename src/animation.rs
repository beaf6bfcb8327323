//! Spin clock and progress transitions.
//!
//! Frames are requested as explicit tasks on a [`FrameScheduler`]; every
//! sample consumes the pending task and re-arms a new one while the engine
//! is still animating, so stopping an animation is a plain cancel.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::{CIRCLE_DEGREES, DEFAULT_ANIMATION_DURATION_MS, FRAME_INTERVAL};

// ============================================================================
// CLOCK
// ============================================================================

/// Monotonic time source. Timestamps are offsets from an arbitrary origin.
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }

    pub fn set(&self, to: Duration) {
        self.nanos.store(to.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

// ============================================================================
// INTERPOLATORS
// ============================================================================

/// Easing curve mapping a linear time fraction in [0, 1] to an animation
/// fraction. The result may leave [0, 1] (overshoot).
pub trait Interpolator: Send + Sync {
    fn interpolate(&self, fraction: f32) -> f32;
}

impl<F> Interpolator for F
where
    F: Fn(f32) -> f32 + Send + Sync,
{
    fn interpolate(&self, fraction: f32) -> f32 {
        self(fraction)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl Interpolator for Linear {
    fn interpolate(&self, fraction: f32) -> f32 {
        fraction
    }
}

/// Starts and ends slowly, fastest in the middle.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccelerateDecelerate;

impl Interpolator for AccelerateDecelerate {
    fn interpolate(&self, fraction: f32) -> f32 {
        ((fraction + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Accelerate {
    pub factor: f32,
}

impl Default for Accelerate {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

impl Interpolator for Accelerate {
    fn interpolate(&self, fraction: f32) -> f32 {
        if self.factor == 1.0 {
            fraction * fraction
        } else {
            fraction.powf(2.0 * self.factor)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Decelerate {
    pub factor: f32,
}

impl Default for Decelerate {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

impl Interpolator for Decelerate {
    fn interpolate(&self, fraction: f32) -> f32 {
        if self.factor == 1.0 {
            1.0 - (1.0 - fraction) * (1.0 - fraction)
        } else {
            1.0 - (1.0 - fraction).powf(2.0 * self.factor)
        }
    }
}

/// Flings past the end and settles back.
#[derive(Debug, Clone, Copy)]
pub struct Overshoot {
    pub tension: f32,
}

impl Default for Overshoot {
    fn default() -> Self {
        Self { tension: 2.0 }
    }
}

impl Interpolator for Overshoot {
    fn interpolate(&self, fraction: f32) -> f32 {
        let t = fraction - 1.0;
        t * t * ((self.tension + 1.0) * t + self.tension) + 1.0
    }
}

// ============================================================================
// ANIMATION
// ============================================================================

/// Duration from milliseconds; non-positive values fall back to the default.
pub fn duration_or_default(millis: i64) -> Duration {
    if millis <= 0 {
        Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS as u64)
    } else {
        Duration::from_millis(millis as u64)
    }
}

/// A timed animation sampled against a clock.
#[derive(Clone)]
pub struct Animation {
    start: Duration,
    duration: Duration,
    interpolator: Arc<dyn Interpolator>,
    repeat: bool,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("start", &self.start)
            .field("duration", &self.duration)
            .field("repeat", &self.repeat)
            .finish_non_exhaustive()
    }
}

impl Animation {
    pub fn new(
        start: Duration,
        duration: Duration,
        interpolator: Arc<dyn Interpolator>,
        repeat: bool,
    ) -> Self {
        let duration = if duration.is_zero() {
            duration_or_default(0)
        } else {
            duration
        };
        Self {
            start,
            duration,
            interpolator,
            repeat,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn restart(&mut self, now: Duration) {
        self.start = now;
    }

    pub fn set_duration(&mut self, duration: Duration) {
        if !duration.is_zero() {
            self.duration = duration;
        }
    }

    pub fn set_interpolator(&mut self, interpolator: Arc<dyn Interpolator>) {
        self.interpolator = interpolator;
    }

    /// Time fraction before easing. Repeating animations wrap every cycle,
    /// one-shot animations stop at 1.
    pub fn linear_fraction(&self, now: Duration) -> f32 {
        let elapsed = now.saturating_sub(self.start).as_nanos();
        let duration = self.duration.as_nanos();
        if self.repeat {
            (elapsed % duration) as f32 / duration as f32
        } else {
            (elapsed as f64 / duration as f64).min(1.0) as f32
        }
    }

    pub fn fraction(&self, now: Duration) -> f32 {
        self.interpolator.interpolate(self.linear_fraction(now))
    }

    pub fn has_ended(&self, now: Duration) -> bool {
        !self.repeat && now.saturating_sub(self.start) >= self.duration
    }
}

// ============================================================================
// FRAME SCHEDULING
// ============================================================================

/// Identifies one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Pending frame requests, each cancellable through its handle.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    tasks: Vec<(TaskHandle, Duration)>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_at(&mut self, due: Duration) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push((handle, due));
        handle
    }

    /// Removes exactly `handle`. Returns false if it was not pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(h, _)| *h != handle);
        self.tasks.len() != before
    }

    #[cfg(test)]
    fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|(h, _)| *h == handle)
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|(_, due)| *due).min()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Indeterminate,
    DeterminateTransition,
    Determinate,
}

#[derive(Debug, Clone)]
struct Transition {
    from: i32,
    to: i32,
    /// Last value handed out; the next one never falls back behind it.
    last: i32,
    animation: Animation,
}

impl Transition {
    fn new(from: i32, to: i32, animation: Animation) -> Self {
        Self {
            from,
            to,
            last: from,
            animation,
        }
    }

    /// Moves monotonically from `from` to `to`, landing exactly on `to`,
    /// whatever shape the easing curve has.
    fn value_at(&mut self, now: Duration) -> i32 {
        if self.animation.has_ended(now) {
            self.last = self.to;
            return self.to;
        }
        let fraction = self.animation.fraction(now).clamp(0.0, 1.0) as f64;
        let span = self.to as i64 - self.from as i64;
        let eased = (self.from as i64 + (span as f64 * fraction).round() as i64)
            .clamp(self.from.min(self.to) as i64, self.from.max(self.to) as i64)
            as i32;
        self.last = if self.to >= self.from {
            eased.max(self.last)
        } else {
            eased.min(self.last)
        };
        self.last
    }
}

/// What the renderer needs for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameSample {
    /// Spinner rotation, only while indeterminate.
    pub angle: Option<f32>,
    /// Progress to display, only while a transition runs or just finished.
    pub progress: Option<i32>,
    /// When the next frame is due, if another one is needed.
    pub next_frame: Option<Duration>,
}

pub struct AnimationEngine {
    clock: Arc<dyn Clock>,
    interpolator: Arc<dyn Interpolator>,
    state: EngineState,
    spin: Animation,
    angle: f32,
    transition: Option<Transition>,
    transition_duration: Duration,
    frame_interval: Duration,
    scheduler: FrameScheduler,
    frame_task: Option<TaskHandle>,
}

impl AnimationEngine {
    /// The spin clock starts immediately, whether or not the engine is
    /// indeterminate yet.
    pub fn new(
        clock: Arc<dyn Clock>,
        spin_duration_ms: i64,
        transition_duration_ms: i64,
        frame_interval: Duration,
    ) -> Self {
        let interpolator: Arc<dyn Interpolator> = Arc::new(Linear);
        let spin = Animation::new(
            clock.now(),
            duration_or_default(spin_duration_ms),
            Arc::clone(&interpolator),
            true,
        );
        Self {
            clock,
            interpolator,
            state: EngineState::Idle,
            spin,
            angle: 0.0,
            transition: None,
            transition_duration: duration_or_default(transition_duration_ms),
            frame_interval: if frame_interval.is_zero() {
                FRAME_INTERVAL
            } else {
                frame_interval
            },
            scheduler: FrameScheduler::new(),
            frame_task: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Last sampled spinner rotation, in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            EngineState::Indeterminate | EngineState::DeterminateTransition
        )
    }

    /// Target of the running transition.
    pub fn target(&self) -> Option<i32> {
        self.transition.as_ref().map(|t| t.to)
    }

    pub fn spin_duration(&self) -> Duration {
        self.spin.duration()
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn next_frame_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    pub fn is_frame_due(&self) -> bool {
        self.next_frame_due()
            .is_some_and(|due| due <= self.clock.now())
    }

    pub fn set_indeterminate(&mut self, indeterminate: bool) {
        if indeterminate {
            if self.state == EngineState::Indeterminate {
                return;
            }
            self.cancel_frame();
            self.transition = None;
            self.state = EngineState::Indeterminate;
            let now = self.clock.now();
            self.arm_frame(now);
            debug!("spinner started");
        } else if self.state == EngineState::Indeterminate {
            self.cancel_frame();
            self.state = EngineState::Determinate;
            debug!("spinner stopped");
        }
    }

    /// Progress was set directly: drop any animation in flight.
    pub fn settle(&mut self) {
        self.cancel_frame();
        self.transition = None;
        self.state = EngineState::Determinate;
    }

    /// Starts an animated move from `from` to `to`, replacing any running
    /// transition.
    pub fn animate_progress(&mut self, from: i32, to: i32) {
        self.cancel_frame();
        let now = self.clock.now();
        self.transition = Some(Transition::new(
            from,
            to,
            Animation::new(
                now,
                self.transition_duration,
                Arc::clone(&self.interpolator),
                false,
            ),
        ));
        self.state = EngineState::DeterminateTransition;
        self.arm_frame(now);
        debug!(from, to, "progress transition started");
    }

    /// Changes the spin cycle length and restarts the spin clock.
    pub fn set_spin_duration(&mut self, millis: i64) {
        self.spin.set_duration(duration_or_default(millis));
        self.spin.restart(self.clock.now());
    }

    /// `None` restores linear easing. Running transitions keep their curve.
    pub fn set_interpolator(&mut self, interpolator: Option<Arc<dyn Interpolator>>) {
        self.interpolator = interpolator.unwrap_or_else(|| Arc::new(Linear));
        self.spin.set_interpolator(Arc::clone(&self.interpolator));
    }

    /// Samples the current frame. Consumes the pending frame task and
    /// schedules the next one if the engine is still animating.
    pub fn sample(&mut self) -> FrameSample {
        let now = self.clock.now();
        self.cancel_frame();

        match self.state {
            EngineState::Indeterminate => {
                self.angle = CIRCLE_DEGREES * self.spin.fraction(now);
                let due = self.arm_frame(now + self.frame_interval);
                FrameSample {
                    angle: Some(self.angle),
                    progress: None,
                    next_frame: Some(due),
                }
            }
            EngineState::DeterminateTransition => {
                let Some(transition) = self.transition.as_mut() else {
                    self.state = EngineState::Determinate;
                    return FrameSample::default();
                };
                let value = transition.value_at(now);
                if transition.animation.has_ended(now) {
                    self.transition = None;
                    self.state = EngineState::Determinate;
                    debug!(value, "progress transition finished");
                    FrameSample {
                        angle: None,
                        progress: Some(value),
                        next_frame: None,
                    }
                } else {
                    let due = self.arm_frame(now + self.frame_interval);
                    FrameSample {
                        angle: None,
                        progress: Some(value),
                        next_frame: Some(due),
                    }
                }
            }
            EngineState::Idle | EngineState::Determinate => FrameSample::default(),
        }
    }

    fn arm_frame(&mut self, due: Duration) -> Duration {
        self.frame_task = Some(self.scheduler.schedule_at(due));
        due
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame_task.take() {
            self.scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn engine() -> (ManualClock, AnimationEngine) {
        let clock = ManualClock::new();
        let engine = AnimationEngine::new(Arc::new(clock.clone()), 1000, 1000, FRAME_INTERVAL);
        (clock, engine)
    }

    #[test]
    fn linear_spin_angle_follows_elapsed_time() {
        let (clock, mut engine) = engine();
        engine.set_indeterminate(true);
        clock.advance(ms(250));
        let sample = engine.sample();
        assert_eq!(sample.angle, Some(90.0));
        assert_eq!(sample.next_frame, Some(ms(266)));
    }

    #[test]
    fn spin_is_periodic() {
        let (clock, mut engine) = engine();
        engine.set_indeterminate(true);
        for t in [0, 16, 333, 999] {
            clock.set(ms(t));
            let first = engine.sample().angle;
            clock.set(ms(t + 1000));
            let second = engine.sample().angle;
            clock.set(ms(t + 3000));
            let third = engine.sample().angle;
            assert_eq!(first, second);
            assert_eq!(first, third);
        }
    }

    #[test]
    fn overshoot_angle_is_not_clamped() {
        let (clock, mut engine) = engine();
        engine.set_interpolator(Some(Arc::new(Overshoot::default())));
        engine.set_indeterminate(true);
        clock.set(ms(800));
        let angle = engine.sample().angle.unwrap_or_default();
        assert!(angle > 360.0, "angle {angle}");
    }

    #[test]
    fn setting_indeterminate_twice_keeps_the_clock() {
        let (clock, mut engine) = engine();
        clock.advance(ms(100));
        engine.set_indeterminate(true);
        clock.advance(ms(200));
        engine.set_indeterminate(true);
        assert_eq!(engine.state(), EngineState::Indeterminate);
        let angle = engine.sample().angle.unwrap_or_default();
        assert!((angle - 108.0).abs() < 1e-3, "angle {angle}");
    }

    #[test]
    fn leaving_indeterminate_stops_frames() {
        let (clock, mut engine) = engine();
        engine.set_indeterminate(true);
        clock.advance(ms(500));
        assert!(engine.sample().angle.is_some());
        assert!(engine.next_frame_due().is_some());

        engine.set_indeterminate(false);
        assert_eq!(engine.state(), EngineState::Determinate);
        assert_eq!(engine.next_frame_due(), None);
        clock.advance(FRAME_INTERVAL);
        assert!(!engine.is_frame_due());
        assert_eq!(engine.sample(), FrameSample::default());
    }

    #[test]
    fn transition_rises_monotonically_and_lands_on_target() {
        let (clock, mut engine) = engine();
        engine.animate_progress(20, 80);
        assert_eq!(engine.state(), EngineState::DeterminateTransition);
        assert!(engine.is_frame_due());

        let mut last = 20;
        loop {
            let sample = engine.sample();
            let value = sample.progress.unwrap_or(last);
            assert!(value >= last, "{value} < {last}");
            assert!((20..=80).contains(&value));
            last = value;
            match sample.next_frame {
                Some(due) => clock.set(due),
                None => break,
            }
        }
        assert_eq!(last, 80);
        assert_eq!(clock.now(), ms(1008));
        assert_eq!(engine.state(), EngineState::Determinate);
        assert_eq!(engine.next_frame_due(), None);
    }

    #[test]
    fn transition_halfway_is_halfway() {
        let (clock, mut engine) = engine();
        engine.animate_progress(20, 80);
        clock.set(ms(500));
        assert_eq!(engine.sample().progress, Some(50));
        clock.set(ms(1000));
        let sample = engine.sample();
        assert_eq!(sample.progress, Some(80));
        assert_eq!(sample.next_frame, None);
    }

    #[test]
    fn transition_never_falls_back_with_a_bumpy_curve() {
        let (clock, mut engine) = engine();
        // Jumps ahead to 0.8 just before the middle, then drops back to 0.5.
        engine.set_interpolator(Some(Arc::new(|t: f32| if t < 0.5 { 1.6 * t } else { t })));
        engine.animate_progress(20, 80);

        let mut seen = vec![20];
        loop {
            let sample = engine.sample();
            if let Some(value) = sample.progress {
                seen.push(value);
            }
            match sample.next_frame {
                Some(due) => clock.set(due),
                None => break,
            }
        }
        assert!(seen.windows(2).all(|pair| pair[0] <= pair[1]), "{seen:?}");
        assert_eq!(seen.last(), Some(&80));
    }

    #[test]
    fn falling_transition_never_rises_with_a_bumpy_curve() {
        let (clock, mut engine) = engine();
        engine.set_interpolator(Some(Arc::new(|t: f32| if t < 0.5 { 1.6 * t } else { t })));
        engine.animate_progress(90, 10);
        let mut last = 90;
        for step in 1..=70 {
            clock.set(ms(step * 16));
            if let Some(value) = engine.sample().progress {
                assert!(value <= last, "{value} > {last}");
                last = value;
            }
        }
        assert_eq!(last, 10);
    }

    #[test]
    fn extreme_transition_bounds_do_not_overflow() {
        let (clock, mut engine) = engine();
        engine.animate_progress(i32::MIN, i32::MAX);
        clock.set(ms(500));
        let value = engine.sample().progress.unwrap_or_default();
        assert!(value.abs() < 1_000, "halfway value {value}");
        clock.set(ms(1000));
        assert_eq!(engine.sample().progress, Some(i32::MAX));

        engine.animate_progress(i32::MAX, i32::MIN);
        clock.set(ms(2000));
        assert_eq!(engine.sample().progress, Some(i32::MIN));
    }

    #[test]
    fn manual_clock_keeps_sub_millisecond_time() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_micros(16_500));
        assert_eq!(clock.now(), Duration::from_micros(16_500));
        clock.advance(Duration::from_nanos(250));
        assert_eq!(clock.now(), Duration::from_nanos(16_500_250));
        clock.set(ms(3));
        assert_eq!(clock.now(), ms(3));
    }

    #[test]
    fn transition_can_go_down() {
        let (clock, mut engine) = engine();
        engine.animate_progress(90, 10);
        let mut last = 90;
        for step in 1..=70 {
            clock.set(ms(step * 16));
            if let Some(value) = engine.sample().progress {
                assert!(value <= last);
                last = value;
            }
        }
        assert_eq!(last, 10);
    }

    #[test]
    fn indeterminate_cancels_transition() {
        let (clock, mut engine) = engine();
        engine.animate_progress(0, 100);
        clock.advance(ms(100));
        engine.sample();
        engine.set_indeterminate(true);
        assert_eq!(engine.state(), EngineState::Indeterminate);
        assert_eq!(engine.target(), None);
        assert_eq!(engine.sample().progress, None);
    }

    #[test]
    fn settle_cancels_pending_frame() {
        let (clock, mut engine) = engine();
        engine.animate_progress(0, 100);
        clock.advance(ms(100));
        engine.sample();
        engine.settle();
        assert_eq!(engine.state(), EngineState::Determinate);
        assert_eq!(engine.next_frame_due(), None);
        clock.advance(ms(2000));
        assert_eq!(engine.sample().progress, None);
    }

    #[test]
    fn invalid_durations_fall_back_to_default() {
        let clock = ManualClock::new();
        let fallback = AnimationEngine::new(Arc::new(clock), 0, -20, Duration::ZERO);
        assert_eq!(fallback.spin_duration(), ms(1000));
        assert_eq!(fallback.frame_interval(), FRAME_INTERVAL);

        let (_clock, mut engine) = engine();
        engine.set_spin_duration(-1);
        assert_eq!(engine.spin_duration(), ms(1000));
        engine.set_spin_duration(2000);
        assert_eq!(engine.spin_duration(), ms(2000));
    }

    #[test]
    fn spin_duration_change_restarts_clock() {
        let (clock, mut engine) = engine();
        clock.set(ms(700));
        engine.set_spin_duration(2000);
        engine.set_indeterminate(true);
        clock.set(ms(1200));
        assert_eq!(engine.sample().angle, Some(90.0));
    }

    #[test]
    fn missing_interpolator_means_linear() {
        let (clock, mut engine) = engine();
        engine.set_interpolator(Some(Arc::new(|t: f32| t * t)));
        engine.set_indeterminate(true);
        clock.set(ms(500));
        assert_eq!(engine.sample().angle, Some(90.0));

        engine.set_interpolator(None);
        assert_eq!(engine.sample().angle, Some(180.0));
    }

    #[test]
    fn scheduler_cancels_only_the_given_task() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.schedule_at(ms(16));
        let b = scheduler.schedule_at(ms(32));
        assert!(scheduler.cancel(a));
        assert!(!scheduler.cancel(a));
        assert!(!scheduler.is_pending(a));
        assert!(scheduler.is_pending(b));
        assert_eq!(scheduler.next_due(), Some(ms(32)));
        assert!(scheduler.cancel(b));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn interpolators_span_zero_to_one() {
        let curves: [Box<dyn Interpolator>; 6] = [
            Box::new(Linear),
            Box::new(AccelerateDecelerate),
            Box::new(Accelerate::default()),
            Box::new(Accelerate { factor: 1.5 }),
            Box::new(Decelerate { factor: 2.0 }),
            Box::new(Overshoot::default()),
        ];
        for curve in &curves {
            assert!(curve.interpolate(0.0).abs() < 1e-6);
            assert!((curve.interpolate(1.0) - 1.0).abs() < 1e-6);
        }
        assert!(AccelerateDecelerate.interpolate(0.25) < 0.25);
        assert!(Decelerate::default().interpolate(0.25) > 0.25);
    }
}
