//! Page binding module.
//!
//! The controllers never touch the DOM directly. They go through these
//! traits, which the browser binding implements over `web-sys` and the
//! in-memory pages implement for tests and headless runs.

mod memory;

pub use memory::{MemoryForm, MemorySite};

use crate::config::HeaderPreset;
use crate::contact::{Feedback, Field};
use crate::interaction::SubjectStyle;
use std::time::Duration;

/// Capabilities the contact form controller needs from its page.
///
pub trait ContactPage {
    /// Current raw value of a validated field.
    fn field_value(&self, field: Field) -> String;

    /// Whether the newsletter opt-in is checked.
    fn newsletter_checked(&self) -> bool;

    /// Show `message` in the field's error slot, or clear the slot on `None`.
    fn set_field_error(&mut self, field: Field, message: Option<&str>);

    /// Restore every input to its initial value.
    fn reset_form(&mut self);

    /// Disable the submit control and swap its idle label for the loading
    /// label, or the reverse.
    fn set_submit_busy(&mut self, busy: bool);

    /// Replace the feedback slot with `feedback` and hide it once
    /// `dismiss_after` elapses. A pending dismissal from an earlier message
    /// is cancelled.
    fn show_feedback(&mut self, feedback: &Feedback, dismiss_after: Duration);

    /// Smoothly scroll the window to the top.
    fn scroll_to_top(&mut self);
}

/// Capabilities the interaction controller needs from its page.
///
pub trait SitePage {
    fn viewport_width(&self) -> f64;

    fn scroll_offset(&self) -> f64;

    /// Path of the current document, e.g. `/pacotes/index.html`.
    fn current_path(&self) -> String;

    /// `href` of each navigation link, in document order.
    fn nav_link_hrefs(&self) -> Vec<String>;

    /// Reflect the menu state on both the toggle and the menu.
    fn set_menu_open(&mut self, open: bool);

    fn set_nav_link_active(&mut self, index: usize, active: bool);

    fn apply_header_preset(&mut self, preset: &HeaderPreset);

    fn header_height(&self) -> f64;

    /// Document offset of the element with `id`, if one exists.
    fn anchor_offset(&self, id: &str) -> Option<f64>;

    fn smooth_scroll_to(&mut self, top: f64);

    /// Number of elements that receive the entrance animation.
    fn animation_subject_count(&self) -> usize;

    fn style_subject(&mut self, index: usize, style: &SubjectStyle);

    fn style_hover_card(&mut self, index: usize, transform: &str);
}
