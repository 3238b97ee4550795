//! Entrance and hover animation styles.

use crate::config::AnimationConfig;
use std::collections::HashSet;

/// Inline style applied to an animation subject.
///
#[derive(Debug, PartialEq, Clone)]
pub struct SubjectStyle {
    pub opacity: String,
    pub transform: String,
    pub transition: Option<String>,
}

/// Hidden, offset starting style for the subject at `index`, with its
/// staggered transition delay.
///
pub fn hidden_style(config: &AnimationConfig, index: usize) -> SubjectStyle {
    let duration = config.duration_secs;
    let delay = round_ms(index as f64 * config.stagger_secs);
    SubjectStyle {
        opacity: "0".to_string(),
        transform: format!("translateY({}px)", config.offset_px),
        transition: Some(format!(
            "opacity {}s ease {}s, transform {}s ease {}s",
            duration, delay, duration, delay
        )),
    }
}

/// Settled style once a subject has entered the viewport.
///
pub fn visible_style() -> SubjectStyle {
    SubjectStyle {
        opacity: "1".to_string(),
        transform: "translateY(0)".to_string(),
        transition: None,
    }
}

pub fn hover_transform(config: &AnimationConfig, lifted: bool) -> String {
    if lifted {
        format!(
            "translateY(-{}px) scale({})",
            config.hover_lift_px, config.hover_scale
        )
    } else {
        "translateY(0) scale(1)".to_string()
    }
}

/// Observer root margin that shrinks the trigger region at the bottom.
///
pub fn root_margin(config: &AnimationConfig) -> String {
    format!("0px 0px -{}px 0px", config.bottom_margin_px)
}

fn round_ms(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}

/// Remembers which subjects have been revealed so each transitions once.
///
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: HashSet<usize>,
}

impl RevealTracker {
    /// Mark `index` revealed. Returns false if it already was.
    ///
    pub fn reveal(&mut self, index: usize) -> bool {
        self.revealed.insert(index)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    pub fn count(&self) -> usize {
        self.revealed.len()
    }
}
