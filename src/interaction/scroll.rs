//! Header scroll bands and in-page anchor targets.

use crate::config::{HeaderPreset, ScrollConfig};

/// Specifying the header appearance bands.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HeaderStyle {
    Resting,
    Condensed,
}

impl HeaderStyle {
    /// Band for a scroll offset. The threshold itself is still resting.
    ///
    pub fn for_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold {
            HeaderStyle::Condensed
        } else {
            HeaderStyle::Resting
        }
    }

    pub fn preset(self, config: &ScrollConfig) -> &HeaderPreset {
        match self {
            HeaderStyle::Resting => &config.resting,
            HeaderStyle::Condensed => &config.condensed,
        }
    }
}

/// Element id targeted by an in-page link, or `None` for other links.
///
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}

/// Scroll position that puts the target just below the fixed header.
///
pub fn anchor_scroll_top(target_offset: f64, header_height: f64) -> f64 {
    target_offset - header_height
}
