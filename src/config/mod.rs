//! Configuration management module.
//!
//! This module handles loading and validating the site configuration. Every
//! key has a default matching the behaviour the site shipped with, so an
//! empty document (or no document at all) yields a working configuration.

mod error;

pub use error::ConfigError;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level site configuration.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Contact form limits, timings and fallback contact details.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub name_min_len: usize,
    pub message_min_len: usize,
    pub submit_delay_ms: u64,
    pub success_rate: f64,
    pub feedback_dismiss_ms: u64,
    pub fallback_phone: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        ContactConfig {
            name_min_len: 2,
            message_min_len: 20,
            submit_delay_ms: 2000,
            success_rate: 0.9,
            feedback_dismiss_ms: 10_000,
            fallback_phone: "(11) 9999-9999".to_string(),
        }
    }
}

impl ContactConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn feedback_dismiss(&self) -> Duration {
        Duration::from_millis(self.feedback_dismiss_ms)
    }
}

/// Responsive navigation settings.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub breakpoint_px: f64,
    pub index_page: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            breakpoint_px: 768.0,
            index_page: "index.html".to_string(),
        }
    }
}

/// Header background and blur applied for one scroll band.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderPreset {
    pub background: String,
    pub backdrop_filter: String,
}

/// Header scroll effect and resize debounce settings.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub header_threshold_px: f64,
    pub resting: HeaderPreset,
    pub condensed: HeaderPreset,
    pub resize_debounce_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            header_threshold_px: 100.0,
            resting: HeaderPreset {
                background: "rgba(255, 255, 255, 0.95)".to_string(),
                backdrop_filter: "blur(10px)".to_string(),
            },
            condensed: HeaderPreset {
                background: "rgba(255, 255, 255, 0.98)".to_string(),
                backdrop_filter: "blur(15px)".to_string(),
            },
            resize_debounce_ms: 250,
        }
    }
}

impl ScrollConfig {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

/// Entrance and hover animation settings.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub subject_selector: String,
    pub hover_selector: String,
    pub threshold: f64,
    pub bottom_margin_px: f64,
    pub offset_px: f64,
    pub duration_secs: f64,
    pub stagger_secs: f64,
    pub hover_lift_px: f64,
    pub hover_scale: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            subject_selector: ".highlight-card, .destination-card, .team-member, .mvv-card, .stat-item"
                .to_string(),
            hover_selector: ".highlight-card, .destination-card, .team-member, .info-card".to_string(),
            threshold: 0.1,
            bottom_margin_px: 50.0,
            offset_px: 30.0,
            duration_secs: 0.6,
            stagger_secs: 0.1,
            hover_lift_px: 5.0,
            hover_scale: 1.02,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            log_level: default_log_level(),
            contact: ContactConfig::default(),
            navigation: NavigationConfig::default(),
            scroll: ScrollConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parse a YAML document, falling back to defaults for missing keys, and
    /// validate the result. A blank document yields the defaults.
    ///
    pub fn from_yaml(contents: &str) -> Result<SiteConfig, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(SiteConfig::default());
        }
        let config: SiteConfig = serde_yaml::from_str(contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the configured log level filter.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| invalid("log_level", format!("unknown level '{}'", self.log_level)))
    }

    /// Reject values that parse but would break the controllers.
    ///
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level_filter()?;

        let contact = &self.contact;
        if !(0.0..=1.0).contains(&contact.success_rate) {
            return Err(invalid("contact.success_rate", "must be between 0 and 1"));
        }
        if contact.name_min_len == 0 {
            return Err(invalid("contact.name_min_len", "must be at least 1"));
        }
        if contact.message_min_len == 0 {
            return Err(invalid("contact.message_min_len", "must be at least 1"));
        }

        if self.navigation.breakpoint_px <= 0.0 {
            return Err(invalid("navigation.breakpoint_px", "must be positive"));
        }
        if self.navigation.index_page.is_empty() {
            return Err(invalid("navigation.index_page", "must not be empty"));
        }

        if self.scroll.header_threshold_px < 0.0 {
            return Err(invalid("scroll.header_threshold_px", "must not be negative"));
        }

        let animation = &self.animation;
        if !(0.0..=1.0).contains(&animation.threshold) {
            return Err(invalid("animation.threshold", "must be between 0 and 1"));
        }
        if animation.duration_secs < 0.0 || animation.stagger_secs < 0.0 {
            return Err(invalid("animation", "durations must not be negative"));
        }
        if animation.subject_selector.trim().is_empty() {
            return Err(invalid("animation.subject_selector", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.into(),
    }
}
