//! In-memory page bindings.
//!
//! These hold the same state the DOM would and record what the controllers
//! asked for. Feedback dismissal runs on a virtual clock advanced by the
//! caller.

use super::{ContactPage, SitePage};
use crate::config::HeaderPreset;
use crate::contact::{Feedback, Field};
use crate::interaction::SubjectStyle;
use std::collections::HashMap;
use std::time::Duration;

/// Contact form page held in memory.
///
#[derive(Debug, Default, Clone)]
pub struct MemoryForm {
    values: HashMap<Field, String>,
    newsletter: bool,
    errors: HashMap<Field, String>,
    busy: bool,
    feedback: Option<Feedback>,
    feedback_deadline: Option<Duration>,
    clock: Duration,
    resets: usize,
    scrolls_to_top: usize,
}

impl MemoryForm {
    pub fn new() -> Self {
        MemoryForm::default()
    }

    /// Type a value into a field, as the user would.
    ///
    pub fn set_value(&mut self, field: Field, value: &str) -> &mut Self {
        self.values.insert(field, value.to_string());
        self
    }

    pub fn set_newsletter(&mut self, checked: bool) -> &mut Self {
        self.newsletter = checked;
        self
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn error_text(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The feedback message currently on screen, if it has not been
    /// dismissed yet.
    ///
    pub fn visible_feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Move the virtual clock forward, hiding feedback whose dismissal is due.
    ///
    pub fn advance(&mut self, elapsed: Duration) -> &mut Self {
        self.clock += elapsed;
        if let Some(deadline) = self.feedback_deadline {
            if self.clock >= deadline {
                self.feedback = None;
                self.feedback_deadline = None;
            }
        }
        self
    }

    pub fn resets(&self) -> usize {
        self.resets
    }

    pub fn scrolls_to_top(&self) -> usize {
        self.scrolls_to_top
    }
}

impl ContactPage for MemoryForm {
    fn field_value(&self, field: Field) -> String {
        self.value(field).to_string()
    }

    fn newsletter_checked(&self) -> bool {
        self.newsletter
    }

    fn set_field_error(&mut self, field: Field, message: Option<&str>) {
        match message {
            Some(message) => {
                self.errors.insert(field, message.to_string());
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    fn reset_form(&mut self) {
        self.values.clear();
        self.newsletter = false;
        self.resets += 1;
    }

    fn set_submit_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn show_feedback(&mut self, feedback: &Feedback, dismiss_after: Duration) {
        self.feedback = Some(feedback.clone());
        self.feedback_deadline = Some(self.clock + dismiss_after);
    }

    fn scroll_to_top(&mut self) {
        self.scrolls_to_top += 1;
    }
}

/// Site chrome (header, navigation, animated cards) held in memory.
///
#[derive(Debug, Clone)]
pub struct MemorySite {
    viewport_width: f64,
    scroll_offset: f64,
    path: String,
    links: Vec<String>,
    active_links: Vec<bool>,
    menu_open: bool,
    header: Option<HeaderPreset>,
    header_writes: usize,
    header_height: f64,
    anchors: HashMap<String, f64>,
    scrolled_to: Option<f64>,
    subjects: Vec<Option<SubjectStyle>>,
    hover_cards: HashMap<usize, String>,
}

impl MemorySite {
    pub fn new(path: &str, links: &[&str]) -> Self {
        MemorySite {
            viewport_width: 1280.0,
            scroll_offset: 0.0,
            path: path.to_string(),
            links: links.iter().map(|l| l.to_string()).collect(),
            active_links: vec![false; links.len()],
            menu_open: false,
            header: None,
            header_writes: 0,
            header_height: 80.0,
            anchors: HashMap::new(),
            scrolled_to: None,
            subjects: vec![],
            hover_cards: HashMap::new(),
        }
    }

    pub fn set_viewport_width(&mut self, width: f64) -> &mut Self {
        self.viewport_width = width;
        self
    }

    pub fn set_scroll_offset(&mut self, offset: f64) -> &mut Self {
        self.scroll_offset = offset;
        self
    }

    pub fn set_header_height(&mut self, height: f64) -> &mut Self {
        self.header_height = height;
        self
    }

    pub fn add_anchor(&mut self, id: &str, offset: f64) -> &mut Self {
        self.anchors.insert(id.to_string(), offset);
        self
    }

    pub fn set_subject_count(&mut self, count: usize) -> &mut Self {
        self.subjects = vec![None; count];
        self
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Indices of links currently carrying the active marker.
    ///
    pub fn active_links(&self) -> Vec<usize> {
        self.active_links
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn header_preset(&self) -> Option<&HeaderPreset> {
        self.header.as_ref()
    }

    pub fn header_writes(&self) -> usize {
        self.header_writes
    }

    pub fn scrolled_to(&self) -> Option<f64> {
        self.scrolled_to
    }

    pub fn subject_style(&self, index: usize) -> Option<&SubjectStyle> {
        self.subjects.get(index).and_then(Option::as_ref)
    }

    pub fn hover_transform(&self, index: usize) -> Option<&str> {
        self.hover_cards.get(&index).map(String::as_str)
    }
}

impl SitePage for MemorySite {
    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn nav_link_hrefs(&self) -> Vec<String> {
        self.links.clone()
    }

    fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }

    fn set_nav_link_active(&mut self, index: usize, active: bool) {
        if let Some(slot) = self.active_links.get_mut(index) {
            *slot = active;
        }
    }

    fn apply_header_preset(&mut self, preset: &HeaderPreset) {
        self.header = Some(preset.clone());
        self.header_writes += 1;
    }

    fn header_height(&self) -> f64 {
        self.header_height
    }

    fn anchor_offset(&self, id: &str) -> Option<f64> {
        self.anchors.get(id).copied()
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        self.scrolled_to = Some(top);
    }

    fn animation_subject_count(&self) -> usize {
        self.subjects.len()
    }

    fn style_subject(&mut self, index: usize, style: &SubjectStyle) {
        if let Some(slot) = self.subjects.get_mut(index) {
            *slot = Some(style.clone());
        }
    }

    fn style_hover_card(&mut self, index: usize, transform: &str) {
        self.hover_cards.insert(index, transform.to_string());
    }
}
