//! Browser entry point.
//!
//! Binds the DOM to the controllers on module start and keeps every
//! listener alive until `teardown` is called from JavaScript.

mod dom;
mod listener;
mod timer;

use crate::app::{load_config, Site};
use crate::contact::{Field, FieldEvent};
use crate::events::network::{Handler as NetworkEventHandler, SimulatedTransport};
use crate::events::site::Event as SiteEvent;
use crate::interaction::root_margin;
use crate::logger::LogSink;
use anyhow::{anyhow, Result};
use dom::{DomContactPage, DomSitePage};
use listener::{EventListener, RevealObserver};
use log::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use timer::{Timeout, TimeoutDelay};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ErrorEvent, Event, EventTarget, PromiseRejectionEvent};

/// Optional `<script type="text/yaml">` holding configuration overrides.
const CONFIG_SCRIPT_ID: &str = "site-config";

type DomSite = Site<DomContactPage, DomSitePage>;
type SharedSite = Rc<RefCell<DomSite>>;
type FollowUpSlot = Rc<RefCell<Option<Timeout>>>;

struct Bindings {
    site: SharedSite,
    listeners: Vec<EventListener>,
    observer: Option<RevealObserver>,
    follow_up: FollowUpSlot,
}

thread_local! {
    static BINDINGS: RefCell<Option<Bindings>> = const { RefCell::new(None) };
}

fn js_error(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

fn console_sink() -> LogSink {
    Box::new(|level, line| {
        let line = JsValue::from_str(&line);
        match level {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::log_1(&line),
        }
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    bind().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

/// Tear down both controllers and remove every listener.
///
#[wasm_bindgen]
pub fn teardown() {
    let bindings = BINDINGS.with(|slot| slot.borrow_mut().take());
    if let Some(bindings) = bindings {
        match bindings.site.try_borrow_mut() {
            Ok(mut site) => site.teardown(),
            Err(_) => error!("Site busy during teardown"),
        }
        bindings.follow_up.borrow_mut().take();
        drop(bindings.observer);
        drop(bindings.listeners);
    }
}

fn bind() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window.document().ok_or_else(|| anyhow!("no document"))?;

    let overrides = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|script| script.text_content());
    let config = load_config(overrides.as_deref())?;
    let threshold = config.animation.threshold;
    let margin = root_margin(&config.animation);

    let contact_page = DomContactPage::bind(&window, &document)?;
    let site_page = DomSitePage::bind(&window, &document, &config.animation);

    // Handles needed for listeners, taken before the pages move into the site
    let form_element = contact_page.as_ref().map(|page| {
        let fields: Vec<(Field, EventTarget)> = Field::ALL
            .into_iter()
            .map(|field| (field, page.field_element(field).clone().into()))
            .collect();
        (page.form().clone(), fields)
    });
    let hamburger = site_page.hamburger().cloned();
    let nav_links = site_page.nav_links().to_vec();
    let anchors = site_page.anchor_links();
    let subjects = site_page.subjects().to_vec();
    let hover_cards = site_page.hover_cards().to_vec();

    let site: SharedSite = Rc::new(RefCell::new(Site::start(
        config,
        contact_page,
        site_page,
        Some(console_sink()),
    )?));
    let follow_up: FollowUpSlot = Rc::default();
    let mut listeners = Vec::new();

    let window_target: &EventTarget = window.as_ref();
    listeners.push(
        EventListener::new(window_target, "error", |event: Event| {
            match event.dyn_ref::<ErrorEvent>() {
                Some(event) => error!("Uncaught error: {}", event.message()),
                None => error!("Uncaught error"),
            }
        })
        .map_err(js_error)?,
    );
    listeners.push(
        EventListener::new(window_target, "unhandledrejection", |event: Event| {
            match event.dyn_ref::<PromiseRejectionEvent>() {
                Some(rejection) => error!("Unhandled promise rejection: {:?}", rejection.reason()),
                None => error!("Unhandled promise rejection"),
            }
            event.prevent_default();
        })
        .map_err(js_error)?,
    );

    if let Some((form, fields)) = form_element {
        let site_ref = Rc::clone(&site);
        listeners.push(
            EventListener::new(form.as_ref(), "submit", move |event: Event| {
                event.prevent_default();
                submit(&site_ref);
            })
            .map_err(js_error)?,
        );
        for (field, target) in fields {
            for (event_type, field_event) in field_events(field) {
                let site_ref = Rc::clone(&site);
                listeners.push(
                    EventListener::new(&target, event_type, move |_| {
                        if let Ok(site) = site_ref.try_borrow() {
                            site.field_event(field_event);
                        }
                    })
                    .map_err(js_error)?,
                );
            }
        }
    }

    let mut on = |target: &EventTarget, event_type: &'static str, event: SiteEvent| -> Result<()> {
        let site_ref = Rc::clone(&site);
        let slot = Rc::clone(&follow_up);
        listeners.push(
            EventListener::new(target, event_type, move |dom_event: Event| {
                dispatch(&site_ref, &slot, event.clone(), Some(&dom_event));
            })
            .map_err(js_error)?,
        );
        Ok(())
    };
    on(window_target, "scroll", SiteEvent::Scroll)?;
    on(window_target, "resize", SiteEvent::Resize)?;
    if let Some(hamburger) = &hamburger {
        on(hamburger.as_ref(), "click", SiteEvent::MenuToggle)?;
    }
    for (index, link) in nav_links.iter().enumerate() {
        on(link.as_ref(), "click", SiteEvent::NavLinkClick(index))?;
    }
    for (link, href) in &anchors {
        on(link.as_ref(), "click", SiteEvent::AnchorClick(href.clone()))?;
    }
    for (index, card) in hover_cards.iter().enumerate() {
        on(card.as_ref(), "mouseenter", SiteEvent::PointerEnter(index))?;
        on(card.as_ref(), "mouseleave", SiteEvent::PointerLeave(index))?;
    }

    let observer = if subjects.is_empty() {
        None
    } else {
        let site_ref = Rc::clone(&site);
        let slot = Rc::clone(&follow_up);
        let observer = RevealObserver::new(threshold, &margin, move |index, intersecting| {
            dispatch(
                &site_ref,
                &slot,
                SiteEvent::Intersection {
                    index,
                    intersecting,
                },
                None,
            );
        })
        .map_err(js_error)?;
        for (index, subject) in subjects.iter().enumerate() {
            observer.observe(subject, index).map_err(js_error)?;
        }
        Some(observer)
    };

    info!("Bound {} page listeners", listeners.len());
    BINDINGS.with(|slot| {
        *slot.borrow_mut() = Some(Bindings {
            site,
            listeners,
            observer,
            follow_up,
        });
    });
    Ok(())
}

fn field_events(field: Field) -> Vec<(&'static str, FieldEvent)> {
    match field {
        Field::Subject => vec![("change", FieldEvent::Change(field))],
        _ => vec![
            ("input", FieldEvent::Input(field)),
            ("blur", FieldEvent::Blur(field)),
        ],
    }
}

/// Hand a page event to the site and carry out the response.
///
fn dispatch(site: &SharedSite, slot: &FollowUpSlot, event: SiteEvent, dom_event: Option<&Event>) {
    let response = match site.try_borrow_mut() {
        Ok(mut site) => site.dispatch(event),
        Err(_) => {
            warn!("Site busy, dropping page event '{:?}'", event);
            return;
        }
    };
    if response.prevent_default {
        if let Some(dom_event) = dom_event {
            dom_event.prevent_default();
        }
    }
    if let Some((wait, next)) = response.follow_up {
        let site = Rc::clone(site);
        let timeout = Timeout::schedule(wait, move || {
            if let Ok(mut site) = site.try_borrow_mut() {
                site.dispatch(next);
            }
        });
        // Replacing the slot clears the superseded timeout
        *slot.borrow_mut() = timeout.map_err(|e| warn!("Failed to schedule follow-up: {:?}", e)).ok();
    }
}

/// Start a submission in the background. The site borrow is released
/// before the transport waits.
///
fn submit(site: &SharedSite) {
    let (form, contact) = match site.try_borrow() {
        Ok(site) => match site.contact_form() {
            Some(form) => (Arc::clone(form), site.config().contact.clone()),
            None => return,
        },
        Err(_) => {
            warn!("Site busy, dropping submit");
            return;
        }
    };
    wasm_bindgen_futures::spawn_local(async move {
        let mut transport = SimulatedTransport::new(TimeoutDelay, &contact);
        let outcome = NetworkEventHandler::new(&form, &mut transport).submit().await;
        debug!("Submission finished: {:?}", outcome);
    });
}
