//! The rotary clock widget.
//!
//! Five concentric rings (second outermost, month innermost) and a year
//! label. Once per timer period the widget reads its time source, turns each
//! field into a ring rotation and retargets that ring's animation.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──start()──> Running ──stop()/drop──> Stopped
//! ```
//!
//! `Stopped` is terminal. The timer only exists while `Running`.

use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use rotary_shared::{
    month_length, snapshot, RingKind, SystemClock, TimeSnapshot, TimeSource, TICK_INTERVAL_MS,
};

use crate::animation::{Animation, Easing};
use crate::layout::Rect;
use crate::render::RenderCommand;
use crate::style::{ClockStyle, LabelPalette};
use crate::timer::PeriodicTimer;
use crate::widget::core::{FrameTime, Widget, WidgetId, WidgetState};
use crate::widget::label::YearLabel;
use crate::widget::ring::{RingSpec, RingView};

const CLOCK_ID: u64 = 1;
const FIRST_RING_ID: u64 = 2;
const YEAR_LABEL_ID: u64 = FIRST_RING_ID + RingKind::ALL.len() as u64;

/// Tunables for a clock widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockOptions {
    /// Inset between neighbouring rings, as a fraction of the widget size.
    pub ring_offset_ratio: f32,
    /// Curve used when a ring moves to a new value.
    pub easing: Easing,
    /// Length of a ring move (seconds).
    pub duration_secs: f32,
    /// Period of the clock tick.
    pub tick_interval: Duration,
    /// Static look.
    pub style: ClockStyle,
    /// Seed for the label background colors.
    pub palette_seed: u64,
}

impl Default for ClockOptions {
    fn default() -> Self {
        Self {
            ring_offset_ratio: 1.0 / 6.0,
            easing: Easing::CLOCK_SPRING,
            duration_secs: Animation::DEFAULT_DURATION,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            style: ClockStyle::DEFAULT,
            palette_seed: 0,
        }
    }
}

/// Where the widget is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, no rings, no timer.
    Idle,
    /// Rings assembled, timer armed.
    Running,
    /// Timer cancelled for good.
    Stopped,
}

#[derive(Debug, Clone)]
struct Ring {
    kind: RingKind,
    view: RingView,
}

/// Rotary clock: five rings plus a year label.
pub struct ClockWidget<S: TimeSource = SystemClock> {
    state: WidgetState,
    options: ClockOptions,
    source: S,
    palette: LabelPalette,
    rings: Vec<Ring>,
    year: Option<YearLabel>,
    timer: Option<PeriodicTimer>,
    lifecycle: Lifecycle,
}

impl ClockWidget<SystemClock> {
    /// Creates an idle clock reading the local wall clock.
    #[must_use]
    pub fn new(bounding_size: f32, options: ClockOptions) -> Self {
        Self::with_source(bounding_size, options, SystemClock)
    }
}

impl<S: TimeSource> ClockWidget<S> {
    /// Creates an idle clock reading `source`.
    ///
    /// The widget is `bounding_size` square at the origin until placed.
    #[must_use]
    pub fn with_source(bounding_size: f32, options: ClockOptions, source: S) -> Self {
        let palette = LabelPalette::new(
            options.palette_seed,
            options.style.label_background_alpha,
        );
        Self {
            state: WidgetState::new(
                WidgetId::new(CLOCK_ID),
                Rect::new(0.0, 0.0, bounding_size, bounding_size),
            ),
            options,
            source,
            palette,
            rings: Vec::with_capacity(RingKind::ALL.len()),
            year: None,
            timer: None,
            lifecycle: Lifecycle::Idle,
        }
    }

    /// Side length of the widget.
    #[must_use]
    pub fn size(&self) -> f32 {
        self.state.rect.width
    }

    /// Distance between neighbouring ring edges.
    #[must_use]
    pub fn ring_offset(&self) -> f32 {
        self.size() * self.options.ring_offset_ratio
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns true while the periodic tick is armed.
    #[must_use]
    pub fn is_timer_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Returns the periodic tick, if armed.
    #[must_use]
    pub fn timer(&self) -> Option<&PeriodicTimer> {
        self.timer.as_ref()
    }

    /// Returns one ring, once assembled.
    #[must_use]
    pub fn ring(&self, kind: RingKind) -> Option<&RingView> {
        self.rings
            .iter()
            .find(|ring| ring.kind == kind)
            .map(|ring| &ring.view)
    }

    /// Returns all rings, outermost first.
    pub fn rings(&self) -> impl Iterator<Item = (RingKind, &RingView)> + '_ {
        self.rings.iter().map(|ring| (ring.kind, &ring.view))
    }

    /// Returns the year label text, once assembled.
    #[must_use]
    pub fn year_text(&self) -> Option<&str> {
        self.year.as_ref().map(YearLabel::text)
    }

    /// Positions the widget; rings and label follow its center.
    pub fn place(&mut self, rect: Rect) {
        self.state.rect = rect;
        let center = rect.center();
        for ring in &mut self.rings {
            ring.view.set_center(center);
        }
        if let Some(year) = self.year.as_mut() {
            year.set_center(center);
        }
        self.state.mark_dirty();
    }

    /// Assembles the rings and arms the timer, first firing due now.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Assembles the rings and arms the timer, first firing due at `now`.
    ///
    /// No-op unless the widget is idle.
    pub fn start_at(&mut self, now: Instant) {
        match self.lifecycle {
            Lifecycle::Idle => {}
            Lifecycle::Running => {
                tracing::debug!("clock already running");
                return;
            }
            Lifecycle::Stopped => {
                tracing::warn!("stopped clock cannot be restarted");
                return;
            }
        }

        let days = month_length(self.source.now());
        let center = self.state.rect.center();
        let size = self.size();
        let offset = self.ring_offset();

        self.rings = RingKind::ALL
            .iter()
            .map(|&kind| {
                let (start, end) = kind.domain(days);
                let radius = (size - offset * kind.inset_steps() as f32) * 0.5;
                let view = RingView::new(
                    WidgetId::new(FIRST_RING_ID + u64::from(kind.inset_steps())),
                    RingSpec::new(kind.unit(), start, end),
                    center,
                    radius,
                    self.options.style,
                    &mut self.palette,
                )
                .with_motion(self.options.easing, self.options.duration_secs);
                Ring { kind, view }
            })
            .collect();

        let background = self.palette.next_background();
        self.year = Some(YearLabel::new(
            WidgetId::new(YEAR_LABEL_ID),
            center,
            self.options.style,
            background,
        ));

        self.timer = Some(PeriodicTimer::new(self.options.tick_interval, now));
        self.lifecycle = Lifecycle::Running;
        self.state.mark_dirty();

        tracing::info!(size, days, interval = ?self.options.tick_interval, "clock started");
    }

    /// Moves every ring toward the value it should show at `now`.
    ///
    /// Returns the snapshot used, or `None` if the clock is not running.
    pub fn on_tick(&mut self, now: NaiveDateTime) -> Option<TimeSnapshot> {
        if self.lifecycle != Lifecycle::Running {
            return None;
        }

        let snap = snapshot(now);

        for ring in &mut self.rings {
            let (_, end) = ring.kind.domain(snap.month_length);
            if ring.view.spec().end != end {
                tracing::info!(
                    ring = ?ring.kind,
                    from = ring.view.spec().end,
                    to = end,
                    "ring domain changed, rebuilding labels"
                );
                ring.view.rebuild(end, &mut self.palette);
            }

            let value = ring.kind.value(&snap);
            let angle = ring.view.animate_to_value(value);
            tracing::trace!(ring = ?ring.kind, value, angle, "retarget");
        }

        if let Some(year) = self.year.as_mut() {
            year.set_year(snap.year);
        }

        tracing::debug!(%now, "tick");
        Some(snap)
    }

    /// Cancels the timer. Idempotent.
    ///
    /// Rings stay wherever their animation had reached.
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Stopped {
            return;
        }
        let fired = self.timer.take().map_or(0, |timer| timer.fired());
        self.lifecycle = Lifecycle::Stopped;
        tracing::info!(ticks = fired, "clock stopped");
    }
}

impl<S: TimeSource> Widget for ClockWidget<S> {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, frame: &FrameTime) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }

        let fired = self
            .timer
            .as_mut()
            .is_some_and(|timer| timer.poll(frame.now));
        if fired {
            let now = self.source.now();
            self.on_tick(now);
        }

        for ring in &mut self.rings {
            ring.view.update(frame);
            if ring.view.state().is_dirty() {
                self.state.mark_dirty();
            }
        }
    }

    fn render(&self, commands: &mut Vec<RenderCommand>) {
        if !self.state.is_visible() {
            return;
        }
        for ring in &self.rings {
            ring.view.render(commands);
        }
        if let Some(year) = &self.year {
            year.render(commands);
        }
    }
}

impl<S: TimeSource> Drop for ClockWidget<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use chrono::NaiveDate;
    use rotary_shared::FixedClock;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .expect("valid test date")
    }

    fn clock(now: NaiveDateTime) -> (ClockWidget<FixedClock>, FixedClock) {
        let source = FixedClock::new(now);
        let widget = ClockWidget::with_source(360.0, ClockOptions::default(), source.clone());
        (widget, source)
    }

    #[test]
    fn test_idle_until_started() {
        let (mut widget, _) = clock(at(2024, 3, 5, 0, 0, 5));
        assert_eq!(widget.lifecycle(), Lifecycle::Idle);
        assert!(widget.ring(RingKind::Second).is_none());
        assert!(widget.on_tick(at(2024, 3, 5, 0, 0, 5)).is_none());
    }

    #[test]
    fn test_start_assembles_concentric_rings() {
        let (mut widget, _) = clock(at(2024, 2, 10, 8, 0, 0));
        widget.start_at(Instant::now());

        assert_eq!(widget.lifecycle(), Lifecycle::Running);
        assert!(widget.is_timer_active());

        let radii: Vec<f32> = widget.rings().map(|(_, ring)| ring.radius()).collect();
        for (radius, expected) in radii.iter().zip([180.0, 150.0, 120.0, 90.0, 60.0]) {
            assert!((radius - expected).abs() < 1e-3, "{radii:?}");
        }

        let day = widget.ring(RingKind::Day).expect("day ring");
        assert_eq!(day.spec(), RingSpec::new("日", 1, 29));
        assert_eq!(day.ticks().len(), 29);
    }

    #[test]
    fn test_first_poll_ticks_immediately() {
        let (mut widget, _) = clock(at(2024, 3, 5, 0, 0, 5));
        let t0 = Instant::now();
        widget.start_at(t0);
        widget.update(&FrameTime { now: t0, dt: 0.0 });

        let second = widget.ring(RingKind::Second).expect("second ring");
        assert!((second.target_rotation() - TAU * 5.0 / 60.0).abs() < 1e-5);
        assert_eq!(widget.year_text(), Some("2024年"));
    }

    #[test]
    fn test_tick_targets_every_field() {
        let (mut widget, _) = clock(at(2024, 3, 5, 0, 0, 5));
        widget.start_at(Instant::now());
        widget.on_tick(at(2024, 3, 5, 0, 0, 5)).expect("running");

        let expected = [
            (RingKind::Second, TAU * 5.0 / 60.0),
            (RingKind::Minute, 0.0),
            (RingKind::Hour, 0.0),
            (RingKind::Day, TAU * 4.0 / 31.0),
            (RingKind::Month, TAU * 2.0 / 12.0),
        ];
        for (kind, angle) in expected {
            let ring = widget.ring(kind).expect("ring assembled");
            assert!((ring.target_rotation() - angle).abs() < 1e-5, "{kind:?}");
        }
        assert_eq!(widget.year_text(), Some("2024年"));
    }

    #[test]
    fn test_month_change_rebuilds_day_ring() {
        let (mut widget, source) = clock(at(2023, 1, 31, 23, 59, 59));
        widget.start_at(Instant::now());
        widget.on_tick(source.now()).expect("running");
        let day = widget.ring(RingKind::Day).expect("day ring");
        assert_eq!(day.spec(), RingSpec::new("日", 1, 31));

        source.advance_secs(1);
        let snap = widget.on_tick(source.now()).expect("running");
        assert_eq!((snap.month, snap.day, snap.month_length), (2, 1, 28));

        let day = widget.ring(RingKind::Day).expect("day ring");
        assert_eq!(day.spec(), RingSpec::new("日", 1, 28));
        assert_eq!(day.ticks().len(), 28);
        assert!(day.target_rotation().abs() < 1e-5);

        // Other rings keep their domains.
        let month = widget.ring(RingKind::Month).expect("month ring");
        assert_eq!(month.ticks().len(), 12);
    }

    #[test]
    fn test_minute_rollover_never_runs_backwards() {
        let (mut widget, source) = clock(at(2024, 3, 5, 0, 0, 59));
        let t0 = Instant::now();
        widget.start_at(t0);
        widget.update(&FrameTime { now: t0, dt: 0.0 });
        for _ in 0..30 {
            widget.update(&FrameTime { now: t0, dt: 0.05 });
        }
        let settled = widget.ring(RingKind::Second).expect("second ring").rotation();
        assert!((settled - TAU * 59.0 / 60.0).abs() < 1e-5);

        source.advance_secs(1);
        let tick = t0 + Duration::from_secs(1);
        widget.update(&FrameTime { now: tick, dt: 0.0 });
        let second = widget.ring(RingKind::Second).expect("second ring");
        assert!(second.target_rotation().abs() < 1e-5);

        for _ in 0..30 {
            widget.update(&FrameTime { now: tick, dt: 0.05 });
            let second = widget.ring(RingKind::Second).expect("second ring");
            if second.is_animating() {
                assert!(second.rotation() >= settled - 1e-4, "{}", second.rotation());
            }
        }

        let second = widget.ring(RingKind::Second).expect("second ring");
        assert!(!second.is_animating());
        assert_eq!(second.value_at_top(), Some(0));
    }

    #[test]
    fn test_stop_is_idempotent_and_final() {
        let (mut widget, _) = clock(at(2024, 3, 5, 0, 0, 5));
        widget.start_at(Instant::now());

        widget.stop();
        assert_eq!(widget.lifecycle(), Lifecycle::Stopped);
        assert!(!widget.is_timer_active());

        widget.stop();
        assert_eq!(widget.lifecycle(), Lifecycle::Stopped);
        assert!(!widget.is_timer_active());

        widget.start_at(Instant::now());
        assert_eq!(widget.lifecycle(), Lifecycle::Stopped);
        assert!(widget.on_tick(at(2024, 3, 5, 0, 0, 6)).is_none());
    }

    #[test]
    fn test_place_recenters_children() {
        let (mut widget, _) = clock(at(2024, 3, 5, 0, 0, 5));
        widget.start_at(Instant::now());
        widget.place(Rect::new(20.0, 220.0, 360.0, 360.0));

        for (_, ring) in widget.rings() {
            assert_eq!(ring.center(), rotary_shared::Vec2::new(200.0, 400.0));
        }
    }

    #[test]
    fn test_render_covers_every_label() {
        let (mut widget, _) = clock(at(2023, 4, 1, 0, 0, 0));
        widget.start_at(Instant::now());
        widget.on_tick(at(2023, 4, 1, 0, 0, 0));

        let mut commands = Vec::new();
        widget.render(&mut commands);
        // 60 + 60 + 24 + 30 + 12 ring labels and the year.
        assert_eq!(commands.len(), 187);
    }
}
