//! Animation system for ring rotations.
//!
//! Each tick hands a ring an absolute target angle. The animation picks up
//! from wherever the ring currently is and eases toward the new target, so a
//! tick arriving mid-flight simply supersedes the previous one.

/// Spring envelope left at the end of the duration (fraction of the travel).
const SPRING_SETTLE: f32 = 1e-3;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Cubic ease-in-out (the plain, non-spring animation).
    EaseInOut,
    /// Damped spring.
    ///
    /// `damping` is the damping ratio in `(0, 1]`; below 1 the value
    /// overshoots and oscillates. `initial_velocity` is in units of the whole
    /// travel per animation duration.
    Spring {
        /// Damping ratio.
        damping: f32,
        /// Initial velocity, relative to the travel distance.
        initial_velocity: f32,
    },
    /// Instant (no animation).
    Instant,
}

impl Easing {
    /// The clock's default curve: damping 0.5, initial velocity 0.2.
    pub const CLOCK_SPRING: Self = Self::Spring {
        damping: 0.5,
        initial_velocity: 0.2,
    };

    /// Applies the easing function to a t value (0-1).
    ///
    /// Spring curves may return values above 1 before settling.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::Spring {
                damping,
                initial_velocity,
            } => {
                if t >= 1.0 {
                    return 1.0;
                }
                spring(t, damping, initial_velocity)
            }
            Self::Instant => 1.0,
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::CLOCK_SPRING
    }
}

/// Unit step response of a damped oscillator, x(0) = 0, x'(0) = `v0`.
///
/// The natural frequency is chosen so the envelope has decayed to
/// [`SPRING_SETTLE`] at t = 1.
fn spring(t: f32, damping: f32, v0: f32) -> f32 {
    let zeta = damping.clamp(f32::EPSILON, 1.0);
    let decay = -SPRING_SETTLE.ln();
    let omega = decay / zeta;
    let envelope = (-decay * t).exp();

    if zeta >= 1.0 {
        // Critically damped.
        return 1.0 - envelope * (1.0 + (omega - v0) * t);
    }

    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
    let (sin, cos) = (omega_d * t).sin_cos();
    1.0 - envelope * (cos + (decay - v0) / omega_d * sin)
}

/// A single animated value.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Current value.
    current: f32,
    /// Target value.
    target: f32,
    /// Animation progress (0-1).
    progress: f32,
    /// Animation duration (seconds).
    duration: f32,
    /// Easing function.
    easing: Easing,
    /// Start value (for interpolation).
    start: f32,
}

impl Animation {
    /// Default animation duration: one clock tick.
    pub const DEFAULT_DURATION: f32 = 1.0;

    /// Creates a new animation at the given value.
    #[must_use]
    pub fn new(value: f32, easing: Easing) -> Self {
        Self {
            current: value,
            target: value,
            progress: 1.0,
            duration: Self::DEFAULT_DURATION,
            easing,
            start: value,
        }
    }

    /// Creates an animation with custom duration.
    #[must_use]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Returns the value being animated toward.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Returns true if the animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Sets a new target value, starting animation from current value.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() > 0.0001 {
            self.start = self.current;
            self.target = target;
            self.progress = 0.0;
        }
    }

    /// Immediately sets the value without animation.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.start = value;
        self.progress = 1.0;
    }

    /// Updates the animation.
    ///
    /// `dt` is delta time in seconds.
    pub fn update(&mut self, dt: f32) {
        if self.progress >= 1.0 {
            return;
        }

        if self.duration > 0.0 {
            self.progress += dt / self.duration;
        } else {
            self.progress = 1.0;
        }

        self.progress = self.progress.min(1.0);

        let eased = self.easing.apply(self.progress);
        self.current = self.start + (self.target - self.start) * eased;

        // Snap to target when complete
        if self.progress >= 1.0 {
            self.current = self.target;
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(0.0, Easing::default())
    }
}
