//! Navigation menu state and active link matching.

/// Open/closed state of the collapsible navigation menu.
///
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct NavigationState {
    menu_open: bool,
}

impl NavigationState {
    pub fn is_open(&self) -> bool {
        self.menu_open
    }

    /// Flip the menu and return the new state.
    ///
    pub fn toggle(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn close(&mut self) {
        self.menu_open = false;
    }
}

/// Whether a viewport of `width` uses the mobile layout.
///
pub fn is_mobile(width: f64, breakpoint: f64) -> bool {
    width <= breakpoint
}

/// Filename of the current page: the last path segment, or `index_page`
/// when the path ends in a slash.
///
pub fn current_page<'a>(path: &'a str, index_page: &'a str) -> &'a str {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => index_page,
    }
}

/// Index of the navigation link that targets `page`.
///
pub fn active_link(hrefs: &[String], page: &str) -> Option<usize> {
    hrefs.iter().position(|href| href == page)
}
