//! Routes, anchor sections and the navbar
//!
//! The page is a single document; "navigation" is either switching between
//! the two routes or scrolling to a section anchor.

use std::fmt;
use std::str::FromStr;

use crate::motion::{ElementId, ElementLayout};
use crate::Error;

/// Height the navbar occupies at the top of the page
pub const NAVBAR_HEIGHT: f64 = 80.0;

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    ThankYou,
}

impl Route {
    /// Map a path to a route; unknown paths fall back to the home page
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.eq_ignore_ascii_case("/thankyou") {
            Route::ThankYou
        } else {
            if !trimmed.is_empty() {
                tracing::debug!(path, "Unknown route, showing home");
            }
            Route::Home
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::ThankYou => "/ThankYou",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Navbar destinations in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Home,
    About,
    Projects,
    Services,
    Products,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::About,
        Section::Projects,
        Section::Services,
        Section::Products,
        Section::Contact,
    ];

    /// Anchor id in the document; the home link scrolls to the very top
    pub fn anchor(&self) -> Option<&'static str> {
        match self {
            Section::Home => None,
            Section::About => Some("about"),
            Section::Projects => Some("projects"),
            Section::Services => Some("services"),
            Section::Products => Some("products"),
            Section::Contact => Some("contact"),
        }
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.anchor().map(ElementId::new)
    }

    /// Navbar label
    pub fn title(&self) -> &'static str {
        match self {
            Section::Home => "HOME",
            Section::About => "ABOUT",
            Section::Projects => "PROJECTS",
            Section::Services => "SERVICES",
            Section::Products => "PRODUCTS",
            Section::Contact => "CONTACT",
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().trim_start_matches('#');
        Self::ALL
            .into_iter()
            .find(|section| {
                section.title().eq_ignore_ascii_case(needle)
                    || section.anchor().is_some_and(|a| a.eq_ignore_ascii_case(needle))
            })
            .ok_or_else(|| Error::Validation(format!("Unknown section: {}", s)))
    }
}

/// Document offset to scroll to for `section`
///
/// Returns `None` (and logs) when the anchor is not in the layout.
pub fn scroll_target(section: Section, layout: &dyn ElementLayout) -> Option<f64> {
    let Some(id) = section.element_id() else {
        return Some(0.0);
    };
    match layout.rect(&id) {
        Some(rect) => Some(rect.top.max(0.0)),
        None => {
            tracing::warn!(section = %id, "Section not found");
            None
        }
    }
}

/// Navbar presentation derived from scroll direction and position
#[derive(Debug, Clone, Default)]
pub struct NavbarState {
    hidden: bool,
    glassy: bool,
    menu_open: bool,
    last_scroll_y: f64,
}

impl NavbarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one scroll tick
    ///
    /// Hidden while moving down past the navbar height, shown on any upward
    /// move. Glassy once the hero has mostly scrolled away.
    pub fn on_scroll(&mut self, scroll_y: f64, hero_height: f64) {
        self.hidden = scroll_y > self.last_scroll_y && scroll_y > NAVBAR_HEIGHT;
        self.glassy = scroll_y > hero_height - NAVBAR_HEIGHT;
        self.last_scroll_y = scroll_y;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_glassy(&self) -> bool {
        self.glassy
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Resolve an anchor jump; the menu closes only when the jump succeeds
    pub fn navigate(&mut self, section: Section, layout: &dyn ElementLayout) -> Option<f64> {
        let target = scroll_target(section, layout)?;
        self.close_menu();
        Some(target)
    }
}
