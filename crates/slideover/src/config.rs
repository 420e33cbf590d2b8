#![forbid(unsafe_code)]

//! Slider configuration.
//!
//! [`SliderConfig`] groups every tunable of a [`SliderLayout`](crate::SliderLayout)
//! into one value that can be built in code or, with the `config-file`
//! feature, loaded from TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! # slider.toml
//! sensitive_area_width = 24.0
//! fly_duration_ms = 250
//! darkening = "LEFT"
//! locked = "RIGHT"
//!
//! [gesture]
//! touch_slop = 6.0
//! ```
//!
//! ```rust,ignore
//! let config = SliderConfig::from_toml_file("slider.toml")?;
//! ```
//!
//! # Defaults
//!
//! A 20-unit sensitive band, a 300 ms full-extent settle, accelerate-decelerate
//! easing, a maximum overlay alpha of 128, and no side flags set.

#[cfg(feature = "config-file")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use slideover_core::Sides;
use slideover_core::animation::{DEFAULT_FLY_DURATION, Easing};
use slideover_core::arbiter::DEFAULT_SENSITIVE_WIDTH;
use slideover_core::gesture::GestureConfig;

/// Default peak alpha of the darkening overlay.
pub const DEFAULT_MAXIMUM_DARKNESS: u8 = 128;

/// Tunables for a slider container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct SliderConfig {
    /// Width of the edge bands that start a drag when nothing is open.
    pub sensitive_area_width: f64,
    /// Settle time across a full pane extent, in milliseconds.
    pub fly_duration_ms: u64,
    /// Settle easing curve.
    pub easing: Easing,
    /// Peak overlay alpha, reached when a darkening pane is fully open.
    pub maximum_darkness: u8,
    /// Scroll and fling thresholds.
    pub gesture: GestureConfig,
    /// Panes gestures may not open.
    pub locked: Sides,
    /// Panes that darken the content while revealed.
    pub darkening: Sides,
    /// Panes that slide over the content instead of pushing it.
    pub over_content: Sides,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            sensitive_area_width: DEFAULT_SENSITIVE_WIDTH,
            fly_duration_ms: DEFAULT_FLY_DURATION.as_millis() as u64,
            easing: Easing::default(),
            maximum_darkness: DEFAULT_MAXIMUM_DARKNESS,
            gesture: GestureConfig::default(),
            locked: Sides::NONE,
            darkening: Sides::NONE,
            over_content: Sides::NONE,
        }
    }
}

impl SliderConfig {
    /// Create a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edge band width.
    #[must_use]
    pub fn sensitive_area_width(mut self, width: f64) -> Self {
        self.sensitive_area_width = width;
        self
    }

    /// Set the full-extent settle time.
    #[must_use]
    pub fn fly_duration(mut self, duration: Duration) -> Self {
        self.fly_duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the settle easing.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the peak overlay alpha.
    #[must_use]
    pub fn maximum_darkness(mut self, alpha: u8) -> Self {
        self.maximum_darkness = alpha;
        self
    }

    /// Set the gesture thresholds.
    #[must_use]
    pub fn gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Set the initially locked panes.
    #[must_use]
    pub fn locked(mut self, sides: Sides) -> Self {
        self.locked = sides;
        self
    }

    /// Set the initially darkening panes.
    #[must_use]
    pub fn darkening(mut self, sides: Sides) -> Self {
        self.darkening = sides;
        self
    }

    /// Set the panes that slide over the content.
    #[must_use]
    pub fn over_content(mut self, sides: Sides) -> Self {
        self.over_content = sides;
        self
    }

    /// Full-extent settle time as a [`Duration`].
    #[inline]
    #[must_use]
    pub fn fly_duration_value(&self) -> Duration {
        Duration::from_millis(self.fly_duration_ms)
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, SliderConfigError> {
        let config: Self = toml::from_str(s).map_err(SliderConfigError::Toml)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SliderConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SliderConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, SliderConfigError> {
        let config: Self = serde_json::from_str(s).map_err(SliderConfigError::Json)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SliderConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SliderConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.sensitive_area_width.is_finite() || self.sensitive_area_width < 0.0 {
            errors.push(format!(
                "sensitive_area_width must be finite and >= 0, got {}",
                self.sensitive_area_width
            ));
        }

        let gesture = &self.gesture;
        if !gesture.touch_slop.is_finite() || gesture.touch_slop < 0.0 {
            errors.push(format!(
                "gesture.touch_slop must be finite and >= 0, got {}",
                gesture.touch_slop
            ));
        }
        if !gesture.min_fling_velocity.is_finite() || gesture.min_fling_velocity < 0.0 {
            errors.push(format!(
                "gesture.min_fling_velocity must be finite and >= 0, got {}",
                gesture.min_fling_velocity
            ));
        }
        if gesture.max_fling_velocity.is_nan()
            || gesture.max_fling_velocity <= gesture.min_fling_velocity
        {
            errors.push(format!(
                "gesture.max_fling_velocity must exceed min_fling_velocity ({}), got {}",
                gesture.min_fling_velocity, gesture.max_fling_velocity
            ));
        }
        if gesture.velocity_window.is_zero() {
            errors.push("gesture.velocity_window must be > 0".into());
        }

        errors
    }

    /// `Ok(self)` if [`validate`](Self::validate) finds nothing.
    pub fn checked(self) -> Result<Self, SliderConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(SliderConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a slider configuration.
#[derive(Debug)]
pub enum SliderConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for SliderConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for SliderConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        let errors = SliderConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = SliderConfig::default();
        assert_eq!(config.sensitive_area_width, 20.0);
        assert_eq!(config.fly_duration_value(), Duration::from_millis(300));
        assert_eq!(config.maximum_darkness, 128);
        assert_eq!(config.easing, Easing::AccelerateDecelerate);
        assert_eq!(config.locked, Sides::NONE);
    }

    #[test]
    fn builder_sets_fields() {
        let config = SliderConfig::new()
            .sensitive_area_width(32.0)
            .fly_duration(Duration::from_millis(450))
            .maximum_darkness(200)
            .darkening(Sides::BOTH)
            .locked(Sides::RIGHT)
            .over_content(Sides::LEFT)
            .easing(Easing::Linear);
        assert_eq!(config.sensitive_area_width, 32.0);
        assert_eq!(config.fly_duration_ms, 450);
        assert_eq!(config.maximum_darkness, 200);
        assert_eq!(config.darkening, Sides::BOTH);
        assert_eq!(config.locked, Sides::RIGHT);
        assert_eq!(config.over_content, Sides::LEFT);
        assert_eq!(config.easing, Easing::Linear);
    }

    #[test]
    fn validate_catches_bad_sensitive_width() {
        let config = SliderConfig::new().sensitive_area_width(f64::NAN);
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("sensitive_area_width")));
    }

    #[test]
    fn validate_catches_inverted_fling_bounds() {
        let mut config = SliderConfig::default();
        config.gesture.max_fling_velocity = 10.0;
        config.gesture.min_fling_velocity = 20.0;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("max_fling_velocity")));
    }

    #[test]
    fn validate_catches_zero_velocity_window() {
        let mut config = SliderConfig::default();
        config.gesture.velocity_window = Duration::ZERO;
        assert!(config.validate().iter().any(|e| e.contains("velocity_window")));
    }

    #[test]
    fn checked_wraps_validation_errors() {
        let mut config = SliderConfig::default();
        config.gesture.touch_slop = -1.0;
        match config.checked() {
            Err(SliderConfigError::Validation(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn toml_partial_fills_defaults() {
        let config = SliderConfig::from_toml_str(
            r#"
            sensitive_area_width = 24.0
            darkening = "LEFT"

            [gesture]
            touch_slop = 6.0
            "#,
        )
        .unwrap();
        assert_eq!(config.sensitive_area_width, 24.0);
        assert_eq!(config.darkening, Sides::LEFT);
        assert_eq!(config.gesture.touch_slop, 6.0);
        assert_eq!(config.gesture.min_fling_velocity, 50.0);
        assert_eq!(config.fly_duration_ms, 300);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn json_round_trip() {
        let config = SliderConfig::new()
            .locked(Sides::BOTH)
            .fly_duration(Duration::from_millis(220));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SliderConfig::from_json_str(&json).unwrap(), config);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn invalid_file_content_is_rejected() {
        let err = SliderConfig::from_json_str(r#"{ "sensitive_area_width": -3.0 }"#).unwrap_err();
        assert!(matches!(err, SliderConfigError::Validation(_)));
        assert!(SliderConfig::from_toml_str("sensitive_area_width = [").is_err());
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn missing_file_is_io_error() {
        let err = SliderConfig::from_toml_file("/nonexistent/slider.toml").unwrap_err();
        assert!(matches!(err, SliderConfigError::Io(_)));
    }
}
