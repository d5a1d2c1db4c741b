//! Clock configuration.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. Values are checked once, at load time.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rotary_shared::TICK_INTERVAL_MS;
use rotary_ui::{ClockOptions, ClockStyle, Easing};
use serde::Deserialize;

use crate::error::{ClockError, ClockResult};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "rotary_clock.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// Widget geometry.
    pub clock: ClockSection,
    /// Ring motion.
    pub animation: AnimationSection,
    /// Tick period.
    pub timer: TimerSection,
    /// Host surface and frame loop.
    pub host: HostSection,
    /// Static styling.
    pub style: StyleSection,
    /// Logging.
    pub log: LogSection,
}

/// `[clock]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockSection {
    /// Widget side length (px).
    pub size: f32,
    /// Inset between neighbouring rings as a fraction of `size`.
    pub ring_offset_ratio: f32,
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            size: 360.0,
            ring_offset_ratio: 1.0 / 6.0,
        }
    }
}

/// Animation curve names accepted in config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Damped spring.
    #[default]
    Spring,
    /// Plain cubic ease-in-out.
    EaseInOut,
    /// Constant speed.
    Linear,
    /// Jump straight to the target.
    Instant,
}

/// `[animation]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSection {
    /// Curve used for ring moves.
    pub curve: CurveKind,
    /// Length of one ring move (seconds).
    pub duration_secs: f32,
    /// Spring damping ratio, `(0, 1]`.
    pub damping: f32,
    /// Spring initial velocity, relative to the travel.
    pub initial_velocity: f32,
}

impl Default for AnimationSection {
    fn default() -> Self {
        Self {
            curve: CurveKind::Spring,
            duration_secs: 1.0,
            damping: 0.5,
            initial_velocity: 0.2,
        }
    }
}

impl AnimationSection {
    /// The easing these settings describe.
    #[must_use]
    pub fn easing(&self) -> Easing {
        match self.curve {
            CurveKind::Spring => Easing::Spring {
                damping: self.damping,
                initial_velocity: self.initial_velocity,
            },
            CurveKind::EaseInOut => Easing::EaseInOut,
            CurveKind::Linear => Easing::Linear,
            CurveKind::Instant => Easing::Instant,
        }
    }
}

/// `[timer]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimerSection {
    /// Tick period (milliseconds).
    pub interval_ms: u64,
}

impl Default for TimerSection {
    fn default() -> Self {
        Self {
            interval_ms: TICK_INTERVAL_MS,
        }
    }
}

/// `[host]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostSection {
    /// Frames drawn per second.
    pub frame_rate: u32,
    /// Surface width in terminal cells.
    pub columns: u16,
    /// Surface height in terminal cells.
    pub rows: u16,
    /// Pixels per terminal column.
    pub cell_width: f32,
    /// Pixels per terminal row.
    pub cell_height: f32,
    /// Stop after this many seconds; run until killed when absent.
    pub run_for_secs: Option<f64>,
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            columns: 96,
            rows: 48,
            cell_width: 4.0,
            cell_height: 8.0,
            run_for_secs: None,
        }
    }
}

impl HostSection {
    /// Surface size in pixels.
    #[must_use]
    pub fn surface_size(&self) -> (f32, f32) {
        (
            f32::from(self.columns) * self.cell_width,
            f32::from(self.rows) * self.cell_height,
        )
    }

    /// Time between frames.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }

    /// How long to run, if bounded.
    ///
    /// Values `validate` would reject are treated as unbounded.
    #[must_use]
    pub fn run_for(&self) -> Option<Duration> {
        self.run_for_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

/// `[style]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSection {
    /// Seed for label background colors.
    pub seed: u64,
    /// Label font size (px).
    pub font_size: f32,
    /// Opacity of label backgrounds, `[0, 1]`.
    pub label_background_alpha: f32,
}

impl Default for StyleSection {
    fn default() -> Self {
        Self {
            seed: 0,
            font_size: ClockStyle::DEFAULT.font_size,
            label_background_alpha: ClockStyle::DEFAULT.label_background_alpha,
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    /// Default level for workspace crates.
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Longest accepted tick period: one day.
const MAX_INTERVAL_MS: u64 = 24 * 60 * 60 * 1000;

impl ClockConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML for this schema or
    /// a value is out of range.
    pub fn from_toml_str(text: &str) -> ClockResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are
    /// invalid.
    pub fn from_file(path: &Path) -> ClockResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ClockError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a file was found but is unreadable or invalid.
    pub fn load(path: Option<&Path>) -> ClockResult<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::from_file(&fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> ClockResult<()> {
        fn invalid(message: String) -> ClockResult<()> {
            Err(ClockError::InvalidConfig(message))
        }

        if !(self.clock.size > 0.0) {
            return invalid(format!("clock.size must be positive, got {}", self.clock.size));
        }
        // Five rings, four insets: the innermost ring must keep some width.
        if !(self.clock.ring_offset_ratio > 0.0 && self.clock.ring_offset_ratio < 0.25) {
            return invalid(format!(
                "clock.ring_offset_ratio must be in (0, 0.25), got {}",
                self.clock.ring_offset_ratio
            ));
        }
        if !(self.animation.duration_secs > 0.0) {
            return invalid(format!(
                "animation.duration_secs must be positive, got {}",
                self.animation.duration_secs
            ));
        }
        if !(self.animation.damping > 0.0 && self.animation.damping <= 1.0) {
            return invalid(format!(
                "animation.damping must be in (0, 1], got {}",
                self.animation.damping
            ));
        }
        if !self.animation.initial_velocity.is_finite() {
            return invalid("animation.initial_velocity must be finite".to_string());
        }
        if !(1..=MAX_INTERVAL_MS).contains(&self.timer.interval_ms) {
            return invalid(format!(
                "timer.interval_ms must be in [1, {MAX_INTERVAL_MS}], got {}",
                self.timer.interval_ms
            ));
        }
        if self.host.frame_rate == 0 {
            return invalid("host.frame_rate must be positive".to_string());
        }
        if self.host.columns == 0 || self.host.rows == 0 {
            return invalid("host.columns and host.rows must be positive".to_string());
        }
        if !(self.host.cell_width > 0.0 && self.host.cell_height > 0.0) {
            return invalid("host.cell_width and host.cell_height must be positive".to_string());
        }
        if let Some(secs) = self.host.run_for_secs {
            if let Err(err) = Duration::try_from_secs_f64(secs) {
                return invalid(format!("host.run_for_secs is not a valid duration ({err}), got {secs}"));
            }
        }
        if !(self.style.font_size > 0.0) {
            return invalid(format!(
                "style.font_size must be positive, got {}",
                self.style.font_size
            ));
        }
        if !(0.0..=1.0).contains(&self.style.label_background_alpha) {
            return invalid(format!(
                "style.label_background_alpha must be in [0, 1], got {}",
                self.style.label_background_alpha
            ));
        }
        if !LOG_LEVELS.contains(&self.log.level.as_str()) {
            return invalid(format!(
                "log.level must be one of {LOG_LEVELS:?}, got {:?}",
                self.log.level
            ));
        }
        Ok(())
    }

    /// Widget options derived from this configuration.
    #[must_use]
    pub fn clock_options(&self) -> ClockOptions {
        ClockOptions {
            ring_offset_ratio: self.clock.ring_offset_ratio,
            easing: self.animation.easing(),
            duration_secs: self.animation.duration_secs,
            tick_interval: Duration::from_millis(self.timer.interval_ms),
            style: ClockStyle {
                font_size: self.style.font_size,
                label_background_alpha: self.style.label_background_alpha,
                ..ClockStyle::DEFAULT
            },
            palette_seed: self.style.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = ClockConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, ClockConfig::default());
        assert_eq!(config.clock_options(), ClockOptions::default());
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = ClockConfig::from_toml_str(
            r#"
            [clock]
            size = 480.0

            [animation]
            curve = "ease_in_out"
            duration_secs = 0.5

            [host]
            frame_rate = 60
            run_for_secs = 3.0

            [log]
            level = "debug"
            "#,
        )
        .expect("valid config");

        assert!((config.clock.size - 480.0).abs() < f32::EPSILON);
        assert_eq!(config.animation.easing(), Easing::EaseInOut);
        assert_eq!(config.host.run_for(), Some(Duration::from_secs(3)));
        assert_eq!(config.timer.interval_ms, 1000);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_spring_parameters_flow_into_options() {
        let config = ClockConfig::from_toml_str(
            "[animation]\ndamping = 0.8\ninitial_velocity = 1.5\n",
        )
        .expect("valid config");

        assert_eq!(
            config.clock_options().easing,
            Easing::Spring {
                damping: 0.8,
                initial_velocity: 1.5
            }
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = ClockConfig::from_toml_str("[clock]\nradius = 3\n").unwrap_err();
        assert!(matches!(err, ClockError::ConfigParse(_)), "{err}");
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        for text in [
            "[clock]\nsize = 0.0\n",
            "[clock]\nring_offset_ratio = 0.25\n",
            "[animation]\ndamping = 1.5\n",
            "[animation]\nduration_secs = -1.0\n",
            "[timer]\ninterval_ms = 0\n",
            "[timer]\ninterval_ms = 9223372036854775807\n",
            "[host]\nrun_for_secs = 1e30\n",
            "[host]\nrun_for_secs = -1.0\n",
            "[host]\nframe_rate = 0\n",
            "[style]\nlabel_background_alpha = 2.0\n",
            "[log]\nlevel = \"loud\"\n",
        ] {
            let err = ClockConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, ClockError::InvalidConfig(_)), "{text}: {err}");
        }
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = Path::new("/definitely/not/here/rotary_clock.toml");
        let err = ClockConfig::from_file(path).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here"), "{err}");
    }

    #[test]
    fn test_run_for_never_panics() {
        let mut host = HostSection {
            run_for_secs: Some(1e30),
            ..HostSection::default()
        };
        assert_eq!(host.run_for(), None);

        host.run_for_secs = Some(0.25);
        assert_eq!(host.run_for(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_surface_size() {
        let host = HostSection::default();
        assert_eq!(host.surface_size(), (384.0, 384.0));
        assert_eq!(host.frame_interval(), Duration::from_secs_f64(1.0 / 30.0));
    }
}
