//! `web-sys` implementations of the page binding traits.

use super::timer::Timeout;
use crate::config::{AnimationConfig, HeaderPreset};
use crate::contact::{Feedback, Field};
use crate::error::{AppError, AppResult};
use crate::interaction::SubjectStyle;
use crate::page::{ContactPage, SitePage};
use log::*;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior, ScrollToOptions, Window,
};

pub const CONTACT_FORM_ID: &str = "contactForm";
const NEWSLETTER_ID: &str = "newsletter";
const FEEDBACK_ID: &str = "formMessage";

fn by_id<T: JsCast>(document: &Document, id: &str) -> AppResult<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| AppError::Page(format!("missing #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| AppError::Page(format!("#{} has an unexpected element type", id)))
}

fn query<T: JsCast>(parent: &Element, selector: &str) -> Option<T> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<T>().ok())
}

/// Every element matching `selector`, in document order.
///
pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(e) => {
            warn!("Invalid selector '{}': {:?}", selector, e);
            return vec![];
        }
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        warn!("Failed to set {} on element: {:?}", property, e);
    }
}

fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        warn!("Failed to toggle class {}: {:?}", class, e);
    }
}

fn smooth_scroll(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// The contact page form.
///
pub struct DomContactPage {
    window: Window,
    form: HtmlFormElement,
    name: HtmlInputElement,
    email: HtmlInputElement,
    subject: HtmlSelectElement,
    message: HtmlTextAreaElement,
    newsletter: Option<HtmlInputElement>,
    error_slots: Vec<(Field, HtmlElement)>,
    submit: HtmlButtonElement,
    submit_text: Option<HtmlElement>,
    submit_loading: Option<HtmlElement>,
    feedback: HtmlElement,
    dismiss: Option<Timeout>,
}

impl DomContactPage {
    /// Bind the contact form, or return `None` on pages without one.
    ///
    pub fn bind(window: &Window, document: &Document) -> AppResult<Option<Self>> {
        let form = match document.get_element_by_id(CONTACT_FORM_ID) {
            Some(form) => form
                .dyn_into::<HtmlFormElement>()
                .map_err(|_| AppError::Page(format!("#{} is not a form", CONTACT_FORM_ID)))?,
            None => return Ok(None),
        };
        let submit = query::<HtmlButtonElement>(&form, "button[type=\"submit\"]")
            .ok_or_else(|| AppError::Page("contact form has no submit button".to_string()))?;
        let error_slots = Field::ALL
            .into_iter()
            .filter_map(|field| {
                by_id::<HtmlElement>(document, field.error_slot_id())
                    .map_err(|e| warn!("No error slot for {:?}: {}", field, e))
                    .ok()
                    .map(|slot| (field, slot))
            })
            .collect();

        Ok(Some(DomContactPage {
            window: window.clone(),
            name: by_id(document, Field::Name.element_id())?,
            email: by_id(document, Field::Email.element_id())?,
            subject: by_id(document, Field::Subject.element_id())?,
            message: by_id(document, Field::Message.element_id())?,
            newsletter: by_id(document, NEWSLETTER_ID).ok(),
            error_slots,
            submit_text: query(&submit, ".btn-text"),
            submit_loading: query(&submit, ".btn-loading"),
            submit,
            feedback: by_id(document, FEEDBACK_ID)?,
            form,
            dismiss: None,
        }))
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    /// The element behind `field`, for attaching listeners.
    ///
    pub fn field_element(&self, field: Field) -> &HtmlElement {
        match field {
            Field::Name => &*self.name,
            Field::Email => &*self.email,
            Field::Subject => &*self.subject,
            Field::Message => &*self.message,
        }
    }

    fn error_slot(&self, field: Field) -> Option<&HtmlElement> {
        self.error_slots
            .iter()
            .find(|(slot_field, _)| *slot_field == field)
            .map(|(_, slot)| slot)
    }
}

impl ContactPage for DomContactPage {
    fn field_value(&self, field: Field) -> String {
        match field {
            Field::Name => self.name.value(),
            Field::Email => self.email.value(),
            Field::Subject => self.subject.value(),
            Field::Message => self.message.value(),
        }
    }

    fn newsletter_checked(&self) -> bool {
        self.newsletter.as_ref().map(|n| n.checked()).unwrap_or(false)
    }

    fn set_field_error(&mut self, field: Field, message: Option<&str>) {
        let input = self.field_element(field);
        match message {
            Some(_) => set_style(input, "border-color", "var(--error-color)"),
            None => set_style(input, "border-color", "var(--border-color)"),
        }
        if let Some(slot) = self.error_slot(field) {
            slot.set_text_content(message);
            set_style(slot, "display", if message.is_some() { "block" } else { "none" });
        }
    }

    fn reset_form(&mut self) {
        self.form.reset();
    }

    fn set_submit_busy(&mut self, busy: bool) {
        self.submit.set_disabled(busy);
        set_class(&self.submit, "loading", busy);
        if let Some(text) = &self.submit_text {
            set_style(text, "display", if busy { "none" } else { "inline-block" });
        }
        if let Some(loading) = &self.submit_loading {
            set_style(loading, "display", if busy { "inline-block" } else { "none" });
        }
    }

    fn show_feedback(&mut self, feedback: &Feedback, dismiss_after: Duration) {
        self.feedback.set_text_content(Some(&feedback.text));
        self.feedback
            .set_class_name(&format!("form-message {}", feedback.kind.css_class()));
        set_style(&self.feedback, "display", "block");

        let slot = self.feedback.clone();
        self.dismiss = Timeout::schedule(dismiss_after, move || set_style(&slot, "display", "none"))
            .map_err(|e| warn!("Failed to schedule feedback dismissal: {:?}", e))
            .ok();
    }

    fn scroll_to_top(&mut self) {
        smooth_scroll(&self.window, 0.0);
    }
}

/// Header, navigation and animated cards shared by every page.
///
pub struct DomSitePage {
    window: Window,
    document: Document,
    header: Option<HtmlElement>,
    hamburger: Option<Element>,
    nav_menu: Option<Element>,
    nav_links: Vec<HtmlElement>,
    subjects: Vec<HtmlElement>,
    hover_cards: Vec<HtmlElement>,
}

impl DomSitePage {
    pub fn bind(window: &Window, document: &Document, animation: &AnimationConfig) -> Self {
        let root = document.document_element();
        let lookup = |selector: &str| root.as_ref().and_then(|root| query::<Element>(root, selector));
        let header = lookup(".header").and_then(|h| h.dyn_into::<HtmlElement>().ok());
        if header.is_none() {
            warn!("No .header element on this page");
        }

        DomSitePage {
            window: window.clone(),
            document: document.clone(),
            header,
            hamburger: lookup(".hamburger"),
            nav_menu: lookup(".nav-menu"),
            nav_links: query_all(document, ".nav-link"),
            subjects: query_all(document, &animation.subject_selector),
            hover_cards: query_all(document, &animation.hover_selector),
        }
    }

    pub fn hamburger(&self) -> Option<&Element> {
        self.hamburger.as_ref()
    }

    pub fn nav_links(&self) -> &[HtmlElement] {
        &self.nav_links
    }

    pub fn subjects(&self) -> &[HtmlElement] {
        &self.subjects
    }

    pub fn hover_cards(&self) -> &[HtmlElement] {
        &self.hover_cards
    }

    /// In-page links (`href` starting with `#`) with their `href`.
    ///
    pub fn anchor_links(&self) -> Vec<(HtmlElement, String)> {
        query_all(&self.document, "a[href^=\"#\"]")
            .into_iter()
            .filter_map(|link| link.get_attribute("href").map(|href| (link, href)))
            .collect()
    }
}

impl SitePage for DomSitePage {
    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn current_path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn nav_link_hrefs(&self) -> Vec<String> {
        self.nav_links
            .iter()
            .map(|link| link.get_attribute("href").unwrap_or_default())
            .collect()
    }

    fn set_menu_open(&mut self, open: bool) {
        for element in [&self.nav_menu, &self.hamburger].into_iter().flatten() {
            set_class(element, "active", open);
        }
    }

    fn set_nav_link_active(&mut self, index: usize, active: bool) {
        if let Some(link) = self.nav_links.get(index) {
            set_class(link, "active", active);
        }
    }

    fn apply_header_preset(&mut self, preset: &HeaderPreset) {
        if let Some(header) = &self.header {
            set_style(header, "background", &preset.background);
            set_style(header, "backdrop-filter", &preset.backdrop_filter);
        }
    }

    fn header_height(&self) -> f64 {
        self.header
            .as_ref()
            .map(|header| header.offset_height() as f64)
            .unwrap_or(0.0)
    }

    fn anchor_offset(&self, id: &str) -> Option<f64> {
        self.document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .map(|element| element.offset_top() as f64)
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        smooth_scroll(&self.window, top);
    }

    fn animation_subject_count(&self) -> usize {
        self.subjects.len()
    }

    fn style_subject(&mut self, index: usize, style: &SubjectStyle) {
        if let Some(subject) = self.subjects.get(index) {
            set_style(subject, "opacity", &style.opacity);
            set_style(subject, "transform", &style.transform);
            if let Some(transition) = &style.transition {
                set_style(subject, "transition", transition);
            }
        }
    }

    fn style_hover_card(&mut self, index: usize, transform: &str) {
        if let Some(card) = self.hover_cards.get(index) {
            set_style(card, "transform", transform);
        }
    }
}
