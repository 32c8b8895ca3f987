#![forbid(unsafe_code)]

//! Showcase configuration as data.
//!
//! [`ShowcaseConfig`] gathers every tunable the controller reads: pointer
//! policy, the top safe-area inset, tooltip margin, bubble style, and the
//! entrance animation. With the `config` feature it loads from TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! outside_tap = "advance"
//! activation = "tap"
//! top_inset = 24.0
//!
//! [entrance]
//! fade_ms = 150
//! ```
//!
//! ```rust,ignore
//! let config = ShowcaseConfig::from_toml_file("showcase.toml")?;
//! ```
//!
//! # Defaults
//!
//! `ShowcaseConfig::default()` reproduces the stock look: swallow outside
//! taps, activate on tap, no inset, an 8px margin, a white bubble with 8px
//! corners and arrow, and a medium-bouncy entrance.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use spotlight_widgets::tooltip::{DEFAULT_MARGIN, EntranceConfig};
use spotlight_widgets::{ActivationTrigger, BubbleStyle, OutsideTapPolicy};

// ---------------------------------------------------------------------------
// ShowcaseConfig
// ---------------------------------------------------------------------------

/// Tunables for a [`ShowcaseController`](crate::ShowcaseController).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ShowcaseConfig {
    /// What an activation outside the highlight does.
    pub outside_tap: OutsideTapPolicy,
    /// Which pointer event counts as an activation.
    pub activation: ActivationTrigger,
    /// Height of the undimmed status-bar strip.
    pub top_inset: f32,
    /// Gap between the highlight and the bubble.
    pub tooltip_margin: f32,
    pub bubble: BubbleStyle,
    pub entrance: EntranceConfig,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            outside_tap: OutsideTapPolicy::Swallow,
            activation: ActivationTrigger::Tap,
            top_inset: 0.0,
            tooltip_margin: DEFAULT_MARGIN,
            bubble: BubbleStyle::default(),
            entrance: EntranceConfig::default(),
        }
    }
}

impl ShowcaseConfig {
    #[must_use]
    pub fn outside_tap(mut self, policy: OutsideTapPolicy) -> Self {
        self.outside_tap = policy;
        self
    }

    #[must_use]
    pub fn activation(mut self, trigger: ActivationTrigger) -> Self {
        self.activation = trigger;
        self
    }

    #[must_use]
    pub fn top_inset(mut self, inset: f32) -> Self {
        self.top_inset = inset;
        self
    }

    #[must_use]
    pub fn tooltip_margin(mut self, margin: f32) -> Self {
        self.tooltip_margin = margin;
        self
    }

    #[must_use]
    pub fn bubble(mut self, style: BubbleStyle) -> Self {
        self.bubble = style;
        self
    }

    #[must_use]
    pub fn entrance(mut self, entrance: EntranceConfig) -> Self {
        self.entrance = entrance;
        self
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(s)
            .map_err(ConfigError::Toml)?
            .validated()
    }

    /// Load from a TOML file on disk and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(s)
            .map_err(ConfigError::Json)?
            .validated()
    }

    /// Load from a JSON file on disk and validate.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Return `self` if it validates, otherwise every violation.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Check every parameter is in range.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        non_negative(&mut errors, "top_inset", self.top_inset);
        non_negative(&mut errors, "tooltip_margin", self.tooltip_margin);

        non_negative(&mut errors, "bubble.corner_radius", self.bubble.corner_radius);
        non_negative(&mut errors, "bubble.arrow_size", self.bubble.arrow_size);
        let padding = self.bubble.padding;
        for (name, value) in [
            ("bubble.padding.top", padding.top),
            ("bubble.padding.right", padding.right),
            ("bubble.padding.bottom", padding.bottom),
            ("bubble.padding.left", padding.left),
        ] {
            non_negative(&mut errors, name, value);
        }

        let scale = self.entrance.initial_scale;
        if !(scale > 0.0 && scale <= 1.0) {
            errors.push(format!(
                "entrance.initial_scale must be in (0, 1], got {scale}"
            ));
        }
        if !(self.entrance.stiffness.is_finite() && self.entrance.stiffness > 0.0) {
            errors.push(format!(
                "entrance.stiffness must be > 0, got {}",
                self.entrance.stiffness
            ));
        }
        if !(self.entrance.damping_ratio.is_finite() && self.entrance.damping_ratio > 0.0) {
            errors.push(format!(
                "entrance.damping_ratio must be > 0, got {}",
                self.entrance.damping_ratio
            ));
        }

        errors
    }
}

fn non_negative(errors: &mut Vec<String>, name: &str, value: f32) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(format!("{name} must be finite and >= 0, got {value}"));
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a showcase configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
