use super::animation::{self, RevealTracker};
use super::navigation::{self, NavigationState};
use super::scroll::{self, HeaderStyle};
use crate::config::{AnimationConfig, NavigationConfig, ScrollConfig, SiteConfig};
use crate::page::SitePage;
use crate::utils::debounce::{DebounceToken, Debouncer};
use log::*;

/// Oversees the navigation menu, header scroll effect, anchor scrolling and
/// card animations for one page.
///
pub struct InteractionController<P: SitePage> {
    page: P,
    navigation_config: NavigationConfig,
    scroll_config: ScrollConfig,
    animation_config: AnimationConfig,
    navigation: NavigationState,
    header: Option<HeaderStyle>,
    reveals: RevealTracker,
    resize: Debouncer,
    active_link: Option<usize>,
    active: bool,
}

impl<P: SitePage> InteractionController<P> {
    pub fn new(page: P, config: &SiteConfig) -> Self {
        InteractionController {
            page,
            navigation_config: config.navigation.clone(),
            scroll_config: config.scroll.clone(),
            animation_config: config.animation.clone(),
            navigation: NavigationState::default(),
            header: None,
            reveals: RevealTracker::default(),
            resize: Debouncer::new(config.scroll.resize_debounce()),
            active_link: None,
            active: false,
        }
    }

    /// Highlight the current page's link, hide animation subjects and apply
    /// the header band for the initial scroll position. Every handler below
    /// is a no-op until this runs and again after `teardown`.
    ///
    pub fn init(&mut self) -> &mut Self {
        self.active = true;
        self.highlight_active_link();
        self.prepare_animations();
        self.scrolled();
        info!("Page interactions initialized");
        self
    }

    /// Stop reacting to events and leave the menu closed.
    ///
    pub fn teardown(&mut self) {
        self.close_menu();
        self.active = false;
        info!("Page interactions torn down");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn is_menu_open(&self) -> bool {
        self.navigation.is_open()
    }

    pub fn active_link(&self) -> Option<usize> {
        self.active_link
    }

    pub fn header_style(&self) -> Option<HeaderStyle> {
        self.header
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.reveals.is_revealed(index)
    }

    pub fn resize_debounce(&self) -> &Debouncer {
        &self.resize
    }

    /// Mark exactly one navigation link active: the one targeting the
    /// current page.
    ///
    pub fn highlight_active_link(&mut self) {
        if !self.active {
            return;
        }
        let path = self.page.current_path();
        let page = navigation::current_page(&path, &self.navigation_config.index_page);
        let hrefs = self.page.nav_link_hrefs();
        let active = navigation::active_link(&hrefs, page);
        for index in 0..hrefs.len() {
            self.page.set_nav_link_active(index, Some(index) == active);
        }
        match active {
            Some(index) => debug!("Active link set to {}", hrefs[index]),
            None => debug!("No navigation link targets {}", page),
        }
        self.active_link = active;
    }

    fn prepare_animations(&mut self) {
        let count = self.page.animation_subject_count();
        for index in 0..count {
            let style = animation::hidden_style(&self.animation_config, index);
            self.page.style_subject(index, &style);
        }
        info!("{} elements configured for animation", count);
    }

    fn close_menu(&mut self) {
        self.navigation.close();
        self.page.set_menu_open(false);
    }

    pub fn toggle_menu(&mut self) {
        if !self.active {
            return;
        }
        let open = self.navigation.toggle();
        self.page.set_menu_open(open);
        debug!("User interaction: toggle on menu (open: {})", open);
    }

    pub fn nav_link_clicked(&mut self, index: usize) {
        if !self.active {
            return;
        }
        let width = self.page.viewport_width();
        if navigation::is_mobile(width, self.navigation_config.breakpoint_px) {
            self.close_menu();
            debug!("User interaction: click on nav link {}, menu closed", index);
        }
    }

    /// Close the menu when the viewport leaves the mobile layout and start a
    /// new debounce window. Returns `None` when the controller is inactive.
    ///
    pub fn resized(&mut self) -> Option<DebounceToken> {
        if !self.active {
            return None;
        }
        let width = self.page.viewport_width();
        if !navigation::is_mobile(width, self.navigation_config.breakpoint_px) {
            self.close_menu();
        }
        Some(self.resize.trigger())
    }

    pub fn resize_settled(&mut self, token: DebounceToken) {
        if self.active && self.resize.settle(token) {
            info!("Window resized to {}px", self.page.viewport_width());
        }
    }

    /// Apply the header band for the current scroll offset. The page is only
    /// written when the band changes.
    ///
    pub fn scrolled(&mut self) {
        if !self.active {
            return;
        }
        let offset = self.page.scroll_offset();
        let style = HeaderStyle::for_offset(offset, self.scroll_config.header_threshold_px);
        if self.header != Some(style) {
            self.page
                .apply_header_preset(style.preset(&self.scroll_config));
            self.header = Some(style);
        }
    }

    /// Smooth-scroll to an in-page anchor. Returns true when `href` is an
    /// in-page link, in which case the browser's jump must be suppressed.
    /// An inactive controller leaves every click to the browser.
    ///
    pub fn anchor_clicked(&mut self, href: &str) -> bool {
        if !self.active {
            return false;
        }
        let id = match scroll::anchor_id(href) {
            Some(id) => id,
            None => return false,
        };
        if id.is_empty() {
            return true;
        }
        match self.page.anchor_offset(id) {
            Some(offset) => {
                let top = scroll::anchor_scroll_top(offset, self.page.header_height());
                self.page.smooth_scroll_to(top);
                debug!("User interaction: smooth scroll to #{}", id);
            }
            None => warn!("Anchor target #{} not found", id),
        }
        true
    }

    /// Reveal a subject the first time it intersects the viewport.
    ///
    pub fn subject_intersected(&mut self, index: usize, intersecting: bool) {
        if !self.active || !intersecting || index >= self.page.animation_subject_count() {
            return;
        }
        if self.reveals.reveal(index) {
            self.page.style_subject(index, &animation::visible_style());
            debug!("Animated element {} ({} revealed)", index, self.reveals.count());
        }
    }

    pub fn pointer_entered(&mut self, index: usize) {
        if !self.active {
            return;
        }
        let transform = animation::hover_transform(&self.animation_config, true);
        self.page.style_hover_card(index, &transform);
    }

    pub fn pointer_left(&mut self, index: usize) {
        if !self.active {
            return;
        }
        let transform = animation::hover_transform(&self.animation_config, false);
        self.page.style_hover_card(index, &transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemorySite;

    const LINKS: [&str; 4] = ["index.html", "destinos.html", "sobre.html", "contato.html"];

    fn controller(site: MemorySite) -> InteractionController<MemorySite> {
        let mut controller = InteractionController::new(site, &SiteConfig::default());
        controller.init();
        controller
    }

    #[test]
    fn init_highlights_index_link() {
        let controller = controller(MemorySite::new("/index.html", &LINKS));
        assert_eq!(controller.active_link(), Some(0));
        assert_eq!(controller.page().active_links(), vec![0]);
    }

    #[test]
    fn init_maps_empty_filename_to_index() {
        let controller = controller(MemorySite::new("/", &LINKS));
        assert_eq!(controller.page().active_links(), vec![0]);
    }

    #[test]
    fn init_highlights_other_pages() {
        let controller = controller(MemorySite::new("/aventura/sobre.html", &LINKS));
        assert_eq!(controller.page().active_links(), vec![2]);
    }

    #[test]
    fn init_hides_subjects_and_sets_resting_header() {
        let mut site = MemorySite::new("/", &LINKS);
        site.set_subject_count(3);
        let controller = controller(site);
        for index in 0..3 {
            let style = controller.page().subject_style(index).unwrap();
            assert_eq!(style.opacity, "0");
        }
        assert_eq!(controller.header_style(), Some(HeaderStyle::Resting));
        assert_eq!(
            controller.page().header_preset().unwrap().background,
            "rgba(255, 255, 255, 0.95)"
        );
    }

    #[test]
    fn toggle_opens_and_closes_menu() {
        let mut controller = controller(MemorySite::new("/", &LINKS));
        controller.toggle_menu();
        assert!(controller.is_menu_open());
        assert!(controller.page().is_menu_open());
        controller.toggle_menu();
        assert!(!controller.page().is_menu_open());
    }

    #[test]
    fn nav_click_on_mobile_closes_menu() {
        let mut site = MemorySite::new("/", &LINKS);
        site.set_viewport_width(500.0);
        let mut controller = controller(site);
        controller.toggle_menu();
        controller.nav_link_clicked(1);
        assert!(!controller.is_menu_open());
        assert!(!controller.page().is_menu_open());
    }

    #[test]
    fn nav_click_on_desktop_keeps_menu() {
        let mut controller = controller(MemorySite::new("/", &LINKS));
        controller.toggle_menu();
        controller.nav_link_clicked(1);
        assert!(controller.is_menu_open());
    }

    #[test]
    fn resize_past_breakpoint_closes_menu() {
        let mut site = MemorySite::new("/", &LINKS);
        site.set_viewport_width(600.0);
        let mut controller = controller(site);
        controller.toggle_menu();

        controller.resized();
        assert!(controller.is_menu_open());

        controller.page_mut().set_viewport_width(1024.0);
        controller.resized();
        assert!(!controller.is_menu_open());
        assert!(!controller.page().is_menu_open());

        controller.resized();
        assert!(!controller.is_menu_open());
    }

    #[test]
    fn header_switches_bands_and_writes_only_on_change() {
        let mut controller = controller(MemorySite::new("/", &LINKS));
        let writes = controller.page().header_writes();

        controller.page_mut().set_scroll_offset(50.0);
        controller.scrolled();
        assert_eq!(controller.page().header_writes(), writes);

        controller.page_mut().set_scroll_offset(150.0);
        controller.scrolled();
        controller.page_mut().set_scroll_offset(400.0);
        controller.scrolled();
        assert_eq!(controller.header_style(), Some(HeaderStyle::Condensed));
        assert_eq!(controller.page().header_writes(), writes + 1);
        assert_eq!(
            controller.page().header_preset().unwrap().backdrop_filter,
            "blur(15px)"
        );

        controller.page_mut().set_scroll_offset(100.0);
        controller.scrolled();
        assert_eq!(controller.header_style(), Some(HeaderStyle::Resting));
    }

    #[test]
    fn anchor_click_scrolls_below_header() {
        let mut site = MemorySite::new("/", &LINKS);
        site.set_header_height(72.0).add_anchor("destinos", 900.0);
        let mut controller = controller(site);
        assert!(controller.anchor_clicked("#destinos"));
        assert_eq!(controller.page().scrolled_to(), Some(828.0));
    }

    #[test]
    fn anchor_click_without_target_is_still_suppressed() {
        let mut controller = controller(MemorySite::new("/", &LINKS));
        assert!(controller.anchor_clicked("#missing"));
        assert!(controller.anchor_clicked("#"));
        assert_eq!(controller.page().scrolled_to(), None);
    }

    #[test]
    fn page_links_are_not_intercepted() {
        let mut controller = controller(MemorySite::new("/", &LINKS));
        assert!(!controller.anchor_clicked("sobre.html"));
    }

    #[test]
    fn subjects_reveal_once_and_never_revert() {
        let mut site = MemorySite::new("/", &LINKS);
        site.set_subject_count(2);
        let mut controller = controller(site);

        controller.subject_intersected(1, false);
        assert!(!controller.is_revealed(1));

        controller.subject_intersected(1, true);
        assert!(controller.is_revealed(1));
        assert_eq!(controller.page().subject_style(1).unwrap().opacity, "1");

        controller.subject_intersected(1, false);
        assert_eq!(controller.page().subject_style(1).unwrap().opacity, "1");
        assert_eq!(controller.page().subject_style(0).unwrap().opacity, "0");
    }

    #[test]
    fn out_of_range_subject_is_ignored() {
        let mut controller = controller(MemorySite::new("/", &LINKS));
        controller.subject_intersected(7, true);
        assert!(!controller.is_revealed(7));
    }

    #[test]
    fn hover_lifts_and_reverts() {
        let mut controller = controller(MemorySite::new("/", &LINKS));
        controller.pointer_entered(0);
        assert_eq!(
            controller.page().hover_transform(0),
            Some("translateY(-5px) scale(1.02)")
        );
        controller.pointer_left(0);
        assert_eq!(
            controller.page().hover_transform(0),
            Some("translateY(0) scale(1)")
        );
    }

    #[test]
    fn teardown_closes_menu_and_deactivates() {
        let mut controller = controller(MemorySite::new("/", &LINKS));
        controller.toggle_menu();
        controller.teardown();
        assert!(!controller.is_active());
        assert!(!controller.page().is_menu_open());
    }

    #[test]
    fn handlers_are_inert_after_teardown() {
        let mut site = MemorySite::new("/", &LINKS);
        site.set_viewport_width(600.0).set_subject_count(2).add_anchor("ofertas", 800.0);
        let mut controller = controller(site);
        controller.teardown();
        let writes = controller.page().header_writes();

        controller.toggle_menu();
        assert!(!controller.is_menu_open());
        assert!(!controller.page().is_menu_open());

        controller.page_mut().set_scroll_offset(400.0);
        controller.scrolled();
        assert_eq!(controller.page().header_writes(), writes);

        assert!(!controller.anchor_clicked("#ofertas"));
        assert_eq!(controller.page().scrolled_to(), None);

        controller.subject_intersected(0, true);
        assert!(!controller.is_revealed(0));

        controller.pointer_entered(1);
        assert_eq!(controller.page().hover_transform(1), None);

        assert!(controller.resized().is_none());
    }

    #[test]
    fn handlers_wait_for_init() {
        let site = MemorySite::new("/", &LINKS);
        let mut controller = InteractionController::new(site, &SiteConfig::default());
        controller.toggle_menu();
        assert!(!controller.page().is_menu_open());
        assert!(controller.resized().is_none());
        assert!(!controller.anchor_clicked("#"));
    }
}
