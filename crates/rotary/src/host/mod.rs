//! # Host Surface
//!
//! The top-level screen: owns the clock widget, centers it, paces frames and
//! hands each frame's batches to a [`Backend`].
//!
//! ```text
//! Frame:
//! ┌──────────────────────────────────────────────────────────────┐
//! │ 1. frame due?                  (PeriodicTimer, frame_rate)   │
//! │ 2. widget.update(now, dt)      (1 Hz tick → retarget rings)  │
//! │ 3. background + widget.render  (UIRenderer)                  │
//! │ 4. backend.present(batches)                                  │
//! │ 5. sleep until the next frame                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-threaded. The widget is stopped on every exit path of [`HostSurface::run`].

mod terminal;

pub use terminal::TerminalCanvas;

use std::time::{Duration, Instant};

use rotary_shared::{SystemClock, TimeSource};
use rotary_ui::{
    ClockWidget, Color, FrameTime, PeriodicTimer, Rect, RenderCommand, UIBatch, UIRenderer,
    Widget,
};

use crate::config::ClockConfig;
use crate::error::ClockResult;

/// Longest frame delta fed to animations, so a stalled host does not make
/// rings jump.
const MAX_FRAME_DT: f32 = 0.25;

/// Something that can show a frame.
pub trait Backend {
    /// Draws one frame's batches.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn present(&mut self, batches: &[UIBatch]) -> ClockResult<()>;
}

/// Top-level screen holding one centered clock.
pub struct HostSurface<S: TimeSource = SystemClock> {
    /// Whole surface in pixels.
    bounds: Rect,
    /// Fill behind the clock.
    background: Color,
    /// The clock.
    widget: ClockWidget<S>,
    /// Command collector.
    renderer: UIRenderer,
    /// Frame pacing.
    frame_interval: Duration,
    /// Start of the previous frame.
    last_frame: Option<Instant>,
    /// Frames presented.
    frames: u64,
}

impl HostSurface<SystemClock> {
    /// Creates a surface showing the local time.
    #[must_use]
    pub fn new(config: &ClockConfig) -> Self {
        Self::with_source(config, SystemClock)
    }
}

impl<S: TimeSource> HostSurface<S> {
    /// Creates a surface whose clock reads `source`.
    ///
    /// The clock gets the configured size, shrunk to fit the surface, and is
    /// centered.
    #[must_use]
    pub fn with_source(config: &ClockConfig, source: S) -> Self {
        let (width, height) = config.host.surface_size();
        let bounds = Rect::new(0.0, 0.0, width, height);
        let size = config.clock.size.min(width).min(height);

        let options = config.clock_options();
        let background = options.style.background;
        let mut widget = ClockWidget::with_source(size, options, source);
        widget.place(bounds.center_child(size, size));

        Self {
            bounds,
            background,
            widget,
            renderer: UIRenderer::new(),
            frame_interval: config.host.frame_interval(),
            last_frame: None,
            frames: 0,
        }
    }

    /// Returns the surface bounds.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the clock.
    #[must_use]
    pub const fn widget(&self) -> &ClockWidget<S> {
        &self.widget
    }

    /// Returns how many frames have been produced.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Starts the clock; its first tick is due at `now`.
    pub fn start(&mut self, now: Instant) {
        self.widget.start_at(now);
    }

    /// Stops the clock. Safe to call more than once.
    pub fn stop(&mut self) {
        self.widget.stop();
    }

    /// Advances the clock to `now` and renders one frame.
    pub fn frame(&mut self, now: Instant) -> &[UIBatch] {
        let dt = self
            .last_frame
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32())
            .min(MAX_FRAME_DT);
        self.last_frame = Some(now);

        self.widget.update(&FrameTime { now, dt });

        self.renderer.begin_frame();
        self.renderer.push(RenderCommand::Rect {
            bounds: self.bounds,
            color: self.background,
        });
        self.widget.render(self.renderer.commands_mut());
        self.widget.state_mut().mark_clean();
        self.frames += 1;

        self.renderer.end_frame()
    }

    /// Runs frames into `backend` until `run_for` elapses (or forever).
    ///
    /// The clock is stopped when this returns, whether it succeeded or not.
    ///
    /// # Errors
    ///
    /// Returns the first backend error.
    pub fn run<B: Backend>(
        &mut self,
        backend: &mut B,
        run_for: Option<Duration>,
    ) -> ClockResult<()> {
        let result = self.run_frames(backend, run_for);
        self.stop();
        result
    }

    fn run_frames<B: Backend>(
        &mut self,
        backend: &mut B,
        run_for: Option<Duration>,
    ) -> ClockResult<()> {
        let started = Instant::now();
        let mut pacing = PeriodicTimer::new(self.frame_interval, started);

        loop {
            let now = Instant::now();
            if run_for.is_some_and(|limit| now.duration_since(started) >= limit) {
                tracing::info!(
                    frames = self.frames,
                    skipped = pacing.skipped(),
                    "run time elapsed"
                );
                return Ok(());
            }

            if pacing.poll(now) {
                let batches = self.frame(now);
                backend.present(batches)?;
            }

            std::thread::sleep(pacing.until_next(Instant::now()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingBackend {
        frames: u64,
        commands: usize,
    }

    impl Backend for CountingBackend {
        fn present(&mut self, batches: &[UIBatch]) -> ClockResult<()> {
            self.frames += 1;
            self.commands = batches.iter().map(|batch| batch.commands.len()).sum();
            Ok(())
        }
    }

    #[test]
    fn test_widget_is_centered() {
        let host = HostSurface::new(&ClockConfig::default());
        let rect = host.widget().state().rect;
        assert_eq!(rect.center(), host.bounds().center());
        assert!((rect.width - 360.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_widget_shrinks_to_fit_surface() {
        let mut config = ClockConfig::default();
        config.clock.size = 10_000.0;
        let host = HostSurface::new(&config);
        assert!((host.widget().size() - 384.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bounded_run_stops_clock() {
        let mut config = ClockConfig::default();
        config.host.frame_rate = 200;
        let mut host = HostSurface::new(&config);
        host.start(Instant::now());

        let mut backend = CountingBackend::default();
        host.run(&mut backend, Some(Duration::from_millis(50)))
            .expect("counting backend never fails");

        assert!(backend.frames > 0);
        assert_eq!(backend.frames, host.frames());
        // Background rect, ring labels and the year label.
        assert!(backend.commands > 180);
        assert_eq!(host.widget().lifecycle(), rotary_ui::Lifecycle::Stopped);
    }
}
