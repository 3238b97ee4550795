use crate::interaction::InteractionController;
use crate::page::SitePage;
use crate::utils::debounce::DebounceToken;
use log::*;
use std::time::Duration;

/// Specify the page events the interaction controller reacts to.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    MenuToggle,
    NavLinkClick(usize),
    AnchorClick(String),
    Resize,
    ResizeSettled(DebounceToken),
    Scroll,
    Intersection { index: usize, intersecting: bool },
    PointerEnter(usize),
    PointerLeave(usize),
}

/// What the binding must do after an event was handled.
///
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Response {
    /// Suppress the browser's default action for the event.
    pub prevent_default: bool,
    /// Deliver this event back after the delay, replacing any earlier
    /// pending follow-up.
    pub follow_up: Option<(Duration, Event)>,
}

/// Route one page event to the controller. Events arriving after teardown
/// are dropped.
///
pub fn handle<P: SitePage>(controller: &mut InteractionController<P>, event: Event) -> Response {
    if !controller.is_active() {
        trace!("Dropping page event '{:?}' after teardown", event);
        return Response::default();
    }
    trace!("Processing page event '{:?}'...", event);
    match event {
        Event::MenuToggle => controller.toggle_menu(),
        Event::NavLinkClick(index) => controller.nav_link_clicked(index),
        Event::AnchorClick(href) => {
            return Response {
                prevent_default: controller.anchor_clicked(&href),
                follow_up: None,
            };
        }
        Event::Resize => {
            let wait = controller.resize_debounce().wait();
            return Response {
                prevent_default: false,
                follow_up: controller
                    .resized()
                    .map(|token| (wait, Event::ResizeSettled(token))),
            };
        }
        Event::ResizeSettled(token) => controller.resize_settled(token),
        Event::Scroll => controller.scrolled(),
        Event::Intersection {
            index,
            intersecting,
        } => controller.subject_intersected(index, intersecting),
        Event::PointerEnter(index) => controller.pointer_entered(index),
        Event::PointerLeave(index) => controller.pointer_left(index),
    }
    Response::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::page::MemorySite;

    const LINKS: [&str; 4] = ["index.html", "destinos.html", "sobre.html", "contato.html"];

    fn controller() -> InteractionController<MemorySite> {
        let mut site = MemorySite::new("/index.html", &LINKS);
        site.set_subject_count(4).add_anchor("contato", 2400.0);
        let mut controller = InteractionController::new(site, &SiteConfig::default());
        controller.init();
        controller
    }

    #[test]
    fn mobile_nav_click_closes_open_menu() {
        let mut controller = controller();
        controller.page_mut().set_viewport_width(500.0);
        handle(&mut controller, Event::MenuToggle);
        assert!(controller.page().is_menu_open());

        let response = handle(&mut controller, Event::NavLinkClick(2));
        assert_eq!(response, Response::default());
        assert!(!controller.page().is_menu_open());
    }

    #[test]
    fn index_page_link_is_the_only_active_link() {
        let controller = controller();
        assert_eq!(controller.page().active_links(), vec![0]);
    }

    #[test]
    fn anchor_click_requests_prevent_default() {
        let mut controller = controller();
        let response = handle(&mut controller, Event::AnchorClick("#contato".to_string()));
        assert!(response.prevent_default);
        assert_eq!(controller.page().scrolled_to(), Some(2320.0));

        let response = handle(&mut controller, Event::AnchorClick("sobre.html".to_string()));
        assert!(!response.prevent_default);
    }

    #[test]
    fn resize_schedules_settle_follow_up() {
        let mut controller = controller();
        let first = handle(&mut controller, Event::Resize);
        let second = handle(&mut controller, Event::Resize);
        let (wait, settle) = second.follow_up.unwrap();
        assert_eq!(wait, Duration::from_millis(250));
        assert!(matches!(settle, Event::ResizeSettled(_)));

        let (_, stale) = first.follow_up.unwrap();
        if let (Event::ResizeSettled(stale), Event::ResizeSettled(latest)) = (stale, settle) {
            assert!(!controller.resize_debounce().settle(stale));
            assert!(controller.resize_debounce().settle(latest));
        }
    }

    #[test]
    fn repeated_intersections_reveal_once() {
        let mut controller = controller();
        for _ in 0..3 {
            handle(
                &mut controller,
                Event::Intersection {
                    index: 3,
                    intersecting: true,
                },
            );
        }
        assert!(controller.is_revealed(3));
        assert!(!controller.is_revealed(2));
    }

    #[test]
    fn events_after_teardown_are_dropped() {
        let mut controller = controller();
        controller.teardown();
        handle(&mut controller, Event::MenuToggle);
        assert!(!controller.page().is_menu_open());
        let response = handle(&mut controller, Event::AnchorClick("#contato".to_string()));
        assert!(!response.prevent_default);
    }
}
