use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use folio_core::content::{Accordion, Project, SiteContent, ALL_CATEGORIES};
use folio_core::form::{ContactForm, Field, SubmitOutcome, WaitlistForm, WaitlistSubmission};
use folio_core::motion::reveal::StyleFrame;
use folio_core::motion::{reveal, CarouselEngine, ParallaxLayer, ParallaxScene, RevealSpec, ScrollProgress, Viewport};
use folio_core::navigation::{NavbarState, Route, Section};
use folio_core::{AppConfig, Error, SubmissionPayload};
use ratatui::layout::Rect;
use url::Url;

use crate::event::SubmitResult;
use crate::input::Action;
use crate::page::{Block, PageLayout, SKILLS_STRIP_HEIGHT, SKILLS_STRIP_ROW, SKILL_BADGE_WIDTH, TESTIMONIAL_CARD_HEIGHT};
use crate::reveals::RevealBoard;
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;

/// Width of a terminal cell in CSS pixels
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Height of a terminal cell in CSS pixels
pub const CELL_HEIGHT_PX: f64 = 16.0;
/// Testimonial column resting offsets, percent of the column height
const TESTIMONIAL_BASE_PCT: [f64; 3] = [2.0, -10.0, 5.0];
const LINE_STEP: i32 = 2;
const WHEEL_STEP: i32 = 3;
/// Thank-you headline, text and link delays after the card appears
const THANK_YOU_STEPS_MS: [u64; 4] = [0, 300, 500, 700];

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the page
    Normal,
    /// Navigation menu open with a highlighted entry
    Menu(Section),
    /// Typing into a contact field
    Contact(Field),
    /// Typing the waitlist email
    Waitlist,
    /// Blocking alert; any key closes it
    Alert(String),
    /// Message-sent confirmation
    Sent,
    Help,
}

/// Work the runner performs outside the UI loop
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SubmitContact(SubmissionPayload),
    SubmitWaitlist(WaitlistSubmission),
    Open(Url),
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub content: SiteContent,
    pub theme: Theme,
    pub route: Route,
    pub mode: Mode,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    clock: Instant,
    /// App-clock time the current page instance appeared
    page_since: f64,
    /// Whether the home page's observers and frame loop are registered
    mounted: bool,
    pub layout: PageLayout,
    /// Screen area the document scrolls in
    pub page_area: Rect,
    pub scroll: ScrollAnimator,
    /// Position last reported to the navbar
    reported_scroll: u16,
    pub navbar: NavbarState,
    pub reveals: RevealBoard,
    pub carousel: CarouselEngine,
    pub testimonials: ParallaxScene,
    pub gallery: ParallaxScene,
    pub band: ScrollProgress,
    pub accordion: Accordion,
    pub selected_service: usize,
    pub project_filter: String,
    pub selected_project: usize,
    pub contact: ContactForm,
    pub waitlist: WaitlistForm,
    pub waitlist_pending: bool,
}

impl App {
    pub fn new(config: Arc<AppConfig>, content: SiteContent, theme: Theme) -> Self {
        let motion = &config.motion;
        let access_key = config.relay.access_key.clone().unwrap_or_default();
        let project_filter = content
            .projects
            .categories
            .first()
            .cloned()
            .unwrap_or_else(|| ALL_CATEGORIES.to_string());

        Self {
            content,
            theme,
            route: Route::Home,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            pending_key: None,
            clock: Instant::now(),
            page_since: 0.0,
            mounted: false,
            layout: PageLayout::default(),
            page_area: Rect::default(),
            scroll: ScrollAnimator::new(config.ui.smooth_scroll, config.ui.scroll_duration_ms),
            reported_scroll: 0,
            navbar: NavbarState::new(),
            reveals: RevealBoard::new(motion),
            carousel: CarouselEngine::new(motion.autoscroll_px_per_ms / CELL_WIDTH_PX),
            testimonials: ParallaxScene::from_factors(&motion.testimonial_factors),
            gallery: ParallaxScene::from_factors(&motion.gallery_factors),
            band: ScrollProgress::band(),
            accordion: Accordion::new(),
            selected_service: 0,
            project_filter,
            selected_project: 0,
            contact: ContactForm::new(access_key),
            waitlist: WaitlistForm::new(),
            waitlist_pending: false,
            config,
        }
    }

    /// Milliseconds on the app clock
    pub fn now_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    pub fn visible_projects(&self) -> Vec<&Project> {
        self.content.projects.filter(&self.project_filter)
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.visible_projects().get(self.selected_project).copied()
    }

    /// Terminal resized; the status bar keeps the bottom row
    pub fn resize(&mut self, width: u16, height: u16) {
        self.page_area = Rect::new(0, 0, width, height.saturating_sub(1));
        self.remeasure();
    }

    #[inline]
    pub fn viewport_rows(&self) -> u16 {
        self.page_area.height
    }

    /// Rows the hero (one "screen") occupies
    pub fn hero_rows(&self) -> u16 {
        match self.config.ui.viewport_rows {
            0 => self.viewport_rows(),
            rows => rows,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.scroll.current_scroll() as f64, self.viewport_rows() as f64)
    }

    pub fn max_scroll(&self) -> u16 {
        self.layout.max_scroll(self.viewport_rows())
    }

    /// Rebuild the document and everything measured from it
    pub fn remeasure(&mut self) {
        let project_count = self.visible_projects().len();
        self.layout = PageLayout::measure(
            &self.content,
            &self.accordion,
            project_count,
            self.page_area.width,
            self.hero_rows(),
        );

        let strip_width = (self.content.skills.len() * 2) as f64 * SKILL_BADGE_WIDTH as f64;
        self.carousel.set_widths(strip_width, self.page_area.width as f64);

        let deepest = self.content.testimonials.iter().map(Vec::len).max().unwrap_or(0);
        let column_height = (deepest as u16 * TESTIMONIAL_CARD_HEIGHT) as f64;
        let layers = self
            .config
            .motion
            .testimonial_factors
            .iter()
            .enumerate()
            .map(|(i, &factor)| {
                let pct = TESTIMONIAL_BASE_PCT.get(i).copied().unwrap_or(0.0);
                ParallaxLayer::new(factor).with_base(pct / 100.0 * column_height)
            })
            .collect();
        self.testimonials = ParallaxScene::new(layers);
        self.testimonials
            .track(self.layout.get(Block::Testimonials).map(|r| r.top));
        self.gallery.track(self.layout.get(Block::Projects).map(|r| r.top));
    }

    /// Loading screen still showing
    pub fn is_loading(&self, now_ms: f64) -> bool {
        self.route == Route::Home && now_ms - self.page_since < self.config.motion.loading_delay_ms as f64
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn mount(&mut self, now_ms: f64) {
        self.reveals.attach(&self.layout);
        self.carousel.attach();
        self.mounted = true;
        self.reveals.update(&self.viewport(), &self.layout, now_ms);
        tracing::debug!("Home page mounted");
    }

    fn unmount(&mut self) {
        self.reveals.detach();
        self.carousel.detach();
        self.mounted = false;
    }

    /// Advance clocks, scrolling and frame loops to `now_ms`
    pub fn tick(&mut self, now_ms: f64) {
        if self.route != Route::Home {
            return;
        }
        if !self.mounted {
            if self.is_loading(now_ms) {
                return;
            }
            self.mount(now_ms);
        }

        let position = self.scroll.update(self.max_scroll(), now_ms);
        if position != self.reported_scroll {
            self.reported_scroll = position;
            self.navbar.on_scroll(
                position as f64 * CELL_HEIGHT_PX,
                self.hero_rows() as f64 * CELL_HEIGHT_PX,
            );
        }
        self.reveals.update(&self.viewport(), &self.layout, now_ms);
        self.carousel.frame(now_ms);
    }

    /// Whether the next poll should use the animation frame rate
    pub fn needs_animation(&self, now_ms: f64) -> bool {
        match self.route {
            Route::ThankYou => {
                let settle = self.config.motion.thank_you_delay_ms + 700 + 1000;
                now_ms - self.page_since < settle as f64
            }
            Route::Home => {
                self.is_loading(now_ms)
                    || self.scroll.needs_update()
                    || self.reveals.is_settling(now_ms)
                    || self.skills_in_view()
            }
        }
    }

    fn skills_in_view(&self) -> bool {
        self.layout
            .get(Block::Skills)
            .is_some_and(|rect| self.viewport().intersection_ratio(&rect) > 0.0)
    }

    /// Navbar section matching the top of the viewport
    pub fn current_section(&self) -> Section {
        let probe = self.scroll.target_scroll().saturating_add(1);
        match self.layout.block_at(probe) {
            None | Some(Block::Hero) => Section::Home,
            Some(Block::About) | Some(Block::Skills) => Section::About,
            Some(Block::Projects) => Section::Projects,
            Some(Block::Services) | Some(Block::Testimonials) => Section::Services,
            Some(Block::Products) | Some(Block::Band) => Section::Products,
            Some(Block::Contact) | Some(Block::Footer) => Section::Contact,
        }
    }

    /// Glide to a navbar section; returns whether the anchor was found
    pub fn scroll_to_section(&mut self, section: Section, now_ms: f64) -> bool {
        match self.navbar.navigate(section, &self.layout) {
            Some(target) => {
                let max = self.max_scroll();
                self.scroll.scroll_to(target.round() as u16, max, now_ms);
                true
            }
            None => {
                self.status_message = Some(format!("Section '{}' not found", section));
                false
            }
        }
    }

    /// Switch pages
    pub fn navigate(&mut self, route: Route, now_ms: f64) {
        if route == self.route {
            return;
        }
        tracing::info!(route = %route, "Navigating");
        match route {
            Route::ThankYou => {
                self.unmount();
            }
            Route::Home => {
                // A fresh page instance: new trackers, loading screen again
                self.reveals = RevealBoard::new(&self.config.motion);
                self.navbar = NavbarState::new();
                self.scroll.set_scroll(0);
                self.reported_scroll = 0;
            }
        }
        self.route = route;
        self.mode = Mode::Normal;
        self.page_since = now_ms;
    }

    /// Open on `route`, with the home page already scrolled to `section`
    pub fn start_at(&mut self, route: Route, section: Option<Section>, now_ms: f64) {
        if route != Route::Home {
            self.navigate(route, now_ms);
            return;
        }
        let Some(section) = section else {
            return;
        };
        match self.navbar.navigate(section, &self.layout) {
            Some(target) => self.scroll.set_scroll((target.round() as u16).min(self.max_scroll())),
            None => self.status_message = Some(format!("Section '{}' not found", section)),
        }
    }

    /// Thank-you page part `index` (card, headline, text, link) at `now_ms`
    pub fn thank_you_frame(&self, index: usize, now_ms: f64) -> StyleFrame {
        let elapsed = now_ms - self.page_since;
        let delay = self.config.motion.thank_you_delay_ms as f64;
        let step = THANK_YOU_STEPS_MS.get(index).copied().unwrap_or(0);
        let spec = if index == 0 {
            RevealSpec::thank_you_card()
        } else {
            RevealSpec { offset: 4.0, ..RevealSpec::section() }.with_base_delay(step)
        };
        let appeared = elapsed >= delay;
        let style = reveal(appeared, &spec, 0);
        if appeared {
            style.at(elapsed - delay)
        } else {
            style.target
        }
    }

    /// Loading screen progress in [0, 1]
    pub fn loading_progress(&self, now_ms: f64) -> f64 {
        let delay = self.config.motion.loading_delay_ms as f64;
        if delay <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.page_since) / delay).clamp(0.0, 1.0)
    }

    /// Apply one input action
    pub fn apply(&mut self, action: Action, now_ms: f64) -> Option<Command> {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_rows(LINE_STEP),
            Action::ScrollUp => self.scroll_rows(-LINE_STEP),
            Action::HalfPageDown => self.scroll_rows((self.viewport_rows() / 2).max(1) as i32),
            Action::HalfPageUp => self.scroll_rows(-((self.viewport_rows() / 2).max(1) as i32)),
            Action::PageDown => self.scroll_rows(self.viewport_rows() as i32),
            Action::PageUp => self.scroll_rows(-(self.viewport_rows() as i32)),
            Action::PendingG => self.pending_key = Some('g'),
            Action::JumpToTop => {
                let max = self.max_scroll();
                self.scroll.scroll_to(0, max, now_ms);
            }
            Action::JumpToBottom => {
                let max = self.max_scroll();
                self.scroll.scroll_to(max, max, now_ms);
            }
            Action::NextSection => {
                let next = self.current_section().next();
                self.scroll_to_section(next, now_ms);
            }
            Action::PrevSection => {
                let prev = self.current_section().prev();
                self.scroll_to_section(prev, now_ms);
            }
            Action::GoTo(section) => {
                self.scroll_to_section(section, now_ms);
            }
            Action::ToggleMenu => {
                self.navbar.toggle_menu();
                self.mode = if self.navbar.is_menu_open() {
                    Mode::Menu(self.current_section())
                } else {
                    Mode::Normal
                };
            }
            Action::MenuNext | Action::MenuPrev => {
                if let Mode::Menu(section) = self.mode {
                    let section = if action == Action::MenuNext { section.next() } else { section.prev() };
                    self.mode = Mode::Menu(section);
                }
            }
            Action::MenuSelect => {
                if let Mode::Menu(section) = self.mode {
                    self.scroll_to_section(section, now_ms);
                    if !self.navbar.is_menu_open() {
                        self.mode = Mode::Normal;
                    }
                }
            }
            Action::Activate => return self.activate(now_ms),
            Action::NextFilter => self.set_filter(self.content.projects.next_category(&self.project_filter)),
            Action::PrevFilter => self.set_filter(self.content.projects.prev_category(&self.project_filter)),
            Action::NextProject => {
                let count = self.visible_projects().len().max(1);
                self.selected_project = (self.selected_project + 1) % count;
            }
            Action::OpenProject => return self.open_project(),
            Action::NextService => {
                let count = self.content.services.len().max(1);
                self.selected_service = (self.selected_service + 1) % count;
            }
            Action::ToggleService => {
                self.accordion.toggle(self.selected_service);
                self.remeasure();
            }
            Action::EditContact => {
                self.scroll_to_section(Section::Contact, now_ms);
                self.mode = Mode::Contact(Field::Name);
            }
            Action::EditWaitlist => {
                self.scroll_to_section(Section::Products, now_ms);
                self.mode = Mode::Waitlist;
            }
            Action::NextField => {
                if let Mode::Contact(field) = self.mode {
                    self.mode = Mode::Contact(field.next());
                }
            }
            Action::PrevField => {
                if let Mode::Contact(field) = self.mode {
                    self.mode = Mode::Contact(field.prev());
                }
            }
            Action::InputChar(c) => match self.mode {
                Mode::Contact(field) => {
                    self.contact.push_char(field, c);
                }
                Mode::Waitlist => self.waitlist.push_char(c),
                _ => {}
            },
            Action::Backspace => match self.mode {
                Mode::Contact(field) => {
                    self.contact.pop_char(field);
                }
                Mode::Waitlist => self.waitlist.pop_char(),
                _ => {}
            },
            Action::Submit => match self.mode {
                Mode::Contact(_) => return self.submit_contact(),
                Mode::Waitlist => return self.submit_waitlist(),
                _ => {}
            },
            Action::Cancel => {
                if matches!(self.mode, Mode::Menu(_)) {
                    self.navbar.close_menu();
                }
                self.mode = Mode::Normal;
            }
            Action::Dismiss => {
                if self.mode == Mode::Sent {
                    self.contact.dismiss();
                }
                self.mode = Mode::Normal;
            }
            Action::Help => self.mode = Mode::Help,
            Action::BackToSite => self.navigate(Route::Home, now_ms),
            Action::None => {}
        }
        None
    }

    fn scroll_rows(&mut self, delta: i32) {
        let max = self.max_scroll();
        self.scroll.scroll_by(delta, max);
    }

    /// Enter: the primary control of the section in view
    fn activate(&mut self, now_ms: f64) -> Option<Command> {
        match self.current_section() {
            Section::Home => {
                self.scroll_to_section(Section::Contact, now_ms);
                None
            }
            Section::Projects => self.open_project(),
            Section::Services => {
                self.accordion.toggle(self.selected_service);
                self.remeasure();
                None
            }
            Section::Products => {
                self.mode = Mode::Waitlist;
                None
            }
            Section::Contact => {
                self.mode = Mode::Contact(Field::Name);
                None
            }
            Section::About => None,
        }
    }

    fn set_filter(&mut self, category: String) {
        tracing::debug!(category = %category, "Project filter changed");
        self.project_filter = category;
        self.selected_project = 0;
        self.remeasure();
    }

    fn open_project(&mut self) -> Option<Command> {
        let link = self
            .selected_project()
            .and_then(|project| project.links().last().map(str::to_string));
        match link.as_deref().map(Url::parse) {
            Some(Ok(url)) => Some(Command::Open(url)),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Invalid project link");
                self.status_message = Some("Project link is invalid".to_string());
                None
            }
            None => {
                self.status_message = Some("No link for this project yet".to_string());
                None
            }
        }
    }

    fn submit_contact(&mut self) -> Option<Command> {
        if self.contact.is_pending() {
            self.status_message = Some("Still sending the last message...".to_string());
            return None;
        }
        match self.contact.begin_submit() {
            Some(payload) => {
                self.status_message = Some("Sending message...".to_string());
                Some(Command::SubmitContact(payload))
            }
            None => {
                self.status_message = Some("Please fix the highlighted fields".to_string());
                None
            }
        }
    }

    fn submit_waitlist(&mut self) -> Option<Command> {
        if self.waitlist_pending {
            return None;
        }
        let submission = self.waitlist.prepare(&self.config.waitlist)?;
        self.waitlist_pending = true;
        self.status_message = Some("Joining the waitlist...".to_string());
        Some(Command::SubmitWaitlist(submission))
    }

    /// A background submission finished
    pub fn apply_submit_result(&mut self, result: SubmitResult, now_ms: f64) {
        self.status_message = None;
        match result {
            SubmitResult::Contact(result) => match self.contact.complete(result.map_err(Error::Other)) {
                SubmitOutcome::Sent => self.mode = Mode::Sent,
                SubmitOutcome::Failed(_) => {
                    if let Some(alert) = self.contact.take_alert() {
                        self.mode = Mode::Alert(alert);
                    }
                }
                SubmitOutcome::Invalid | SubmitOutcome::Busy => {}
            },
            SubmitResult::Waitlist(Ok(())) => {
                self.waitlist_pending = false;
                self.waitlist.clear();
                self.navigate(Route::ThankYou, now_ms);
            }
            SubmitResult::Waitlist(Err(e)) => {
                self.waitlist_pending = false;
                self.mode = Mode::Alert(format!("Could not join the waitlist. Please try again later. ({})", e));
            }
        }
    }

    /// Screen rows covered by the skills strip, if any part is on screen
    pub fn carousel_rows(&self) -> Option<(u16, u16)> {
        let rect = self.layout.get(Block::Skills)?;
        let doc_top = rect.top as i32 + SKILLS_STRIP_ROW as i32;
        let screen_top = self.page_area.y as i32 + doc_top - self.scroll.current_scroll() as i32;
        let screen_bottom = screen_top + SKILLS_STRIP_HEIGHT as i32;
        let area_bottom = self.page_area.bottom() as i32;
        if screen_bottom <= self.page_area.y as i32 || screen_top >= area_bottom {
            return None;
        }
        let top = screen_top.max(self.page_area.y as i32) as u16;
        let bottom = screen_bottom.min(area_bottom) as u16;
        Some((top, bottom))
    }

    fn in_carousel(&self, row: u16) -> bool {
        self.carousel_rows().is_some_and(|(top, bottom)| row >= top && row < bottom)
    }

    /// Mouse input: wheel scrolls the page, dragging the strip moves the carousel
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.route != Route::Home || self.mode != Mode::Normal {
            return;
        }
        let x = mouse.column as f64;
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_rows(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_rows(-WHEEL_STEP),
            MouseEventKind::Down(MouseButton::Left) if self.in_carousel(mouse.row) => {
                self.carousel.pointer_down(x);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.in_carousel(mouse.row) {
                    self.carousel.pointer_move(x);
                } else if self.carousel.is_dragging() {
                    self.carousel.pointer_leave();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.carousel.pointer_up(),
            MouseEventKind::Moved if self.carousel.is_dragging() && !self.in_carousel(mouse.row) => {
                self.carousel.pointer_leave();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use folio_core::form::SubmissionStatus;
    use folio_core::motion::CarouselPhase;

    use super::*;
    use crate::reveals::RevealKey;

    fn app() -> App {
        let mut config = AppConfig::default();
        config.motion.loading_delay_ms = 0;
        config.ui.smooth_scroll = false;
        config.relay.access_key = Some("site-key".to_string());
        let mut app = App::new(Arc::new(config), SiteContent::default(), Theme::default());
        app.resize(120, 41);
        app.tick(0.0);
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.apply(Action::InputChar(c), 0.0);
        }
    }

    #[test]
    fn test_mounts_after_loading_delay() {
        let mut config = AppConfig::default();
        config.motion.loading_delay_ms = 1000;
        let mut app = App::new(Arc::new(config), SiteContent::default(), Theme::default());
        app.resize(120, 41);

        app.tick(500.0);
        assert!(app.is_loading(500.0));
        assert!(!app.is_mounted());
        assert!(!app.carousel.is_attached());

        app.tick(1000.0);
        assert!(app.is_mounted());
        assert!(app.carousel.is_attached());
    }

    #[test]
    fn test_section_jump_reveals_about() {
        let mut app = app();
        assert!(!app.reveals.is_visible(RevealKey::About));

        app.apply(Action::GoTo(Section::About), 0.0);
        app.tick(10.0);
        assert_eq!(app.scroll.current_scroll() as f64, app.layout.get(Block::About).unwrap().top);
        assert!(app.reveals.is_visible(RevealKey::About));
        assert_eq!(app.current_section(), Section::About);
    }

    #[test]
    fn test_start_at_section_and_route() {
        let mut app = app();
        app.start_at(Route::parse("/"), Some("#projects".parse().unwrap()), 0.0);
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.scroll.current_scroll() as f64, app.layout.get(Block::Projects).unwrap().top);
        assert_eq!(app.current_section(), Section::Projects);

        let mut thanks = self::app();
        thanks.start_at(Route::parse("/thankyou/"), Some(Section::Contact), 0.0);
        assert_eq!(thanks.route, Route::ThankYou);
        assert!(!thanks.carousel.is_attached());
        assert_eq!(thanks.scroll.current_scroll(), 0);
    }

    #[test]
    fn test_navbar_hides_when_scrolling_down() {
        let mut app = app();
        app.apply(Action::PageDown, 0.0);
        app.tick(10.0);
        assert!(app.navbar.is_hidden());
        assert!(app.navbar.is_glassy());

        app.apply(Action::ScrollUp, 20.0);
        app.tick(30.0);
        assert!(!app.navbar.is_hidden());
    }

    #[test]
    fn test_menu_select_closes_menu() {
        let mut app = app();
        app.apply(Action::ToggleMenu, 0.0);
        assert_eq!(app.mode, Mode::Menu(Section::Home));
        app.apply(Action::MenuNext, 0.0);
        app.apply(Action::MenuNext, 0.0);
        assert_eq!(app.mode, Mode::Menu(Section::Projects));
        app.apply(Action::MenuSelect, 0.0);
        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.navbar.is_menu_open());
        assert_eq!(app.current_section(), Section::Projects);
    }

    #[test]
    fn test_blank_contact_submit_makes_no_request() {
        let mut app = app();
        app.apply(Action::EditContact, 0.0);
        assert_eq!(app.mode, Mode::Contact(Field::Name));
        assert_eq!(app.apply(Action::Submit, 0.0), None);
        assert_eq!(app.contact.errors().len(), 3);
    }

    #[test]
    fn test_contact_round_trip() {
        let mut app = app();
        app.apply(Action::EditContact, 0.0);
        type_text(&mut app, "Ada");
        app.apply(Action::NextField, 0.0);
        type_text(&mut app, "ada@example.com");
        app.apply(Action::NextField, 0.0);
        type_text(&mut app, "Hi");

        let Some(Command::SubmitContact(payload)) = app.apply(Action::Submit, 0.0) else {
            panic!("expected a contact submission");
        };
        assert_eq!(payload.access_key, "site-key");
        assert_eq!(payload.message, "Hi");
        assert!(app.contact.is_pending());

        // Edits are ignored while pending
        app.apply(Action::InputChar('!'), 0.0);
        assert_eq!(app.contact.field(Field::Message), "Hi");

        app.apply_submit_result(SubmitResult::Contact(Ok(())), 0.0);
        assert_eq!(app.mode, Mode::Sent);
        assert_eq!(app.contact.field(Field::Name), "");

        app.apply(Action::Dismiss, 0.0);
        assert_eq!(app.contact.status(), SubmissionStatus::Idle);
    }

    #[test]
    fn test_contact_failure_alerts_and_keeps_fields() {
        let mut app = app();
        app.contact.set_field(Field::Name, "Ada");
        app.contact.set_field(Field::Email, "ada@example.com");
        app.contact.set_field(Field::Message, "Hi");
        app.mode = Mode::Contact(Field::Message);

        assert!(app.apply(Action::Submit, 0.0).is_some());
        app.apply_submit_result(SubmitResult::Contact(Err("timeout".to_string())), 0.0);
        assert!(matches!(app.mode, Mode::Alert(ref text) if text.contains("timeout")));
        assert_eq!(app.contact.field(Field::Name), "Ada");
        assert!(app.contact.take_alert().is_none());
    }

    #[test]
    fn test_waitlist_success_goes_to_thank_you() {
        let mut app = app();
        app.apply(Action::EditWaitlist, 0.0);
        type_text(&mut app, "ada@example.com");

        let Some(Command::SubmitWaitlist(submission)) = app.apply(Action::Submit, 0.0) else {
            panic!("expected a waitlist submission");
        };
        assert_eq!(submission.fields[0].1, "ada@example.com");
        assert_eq!(app.apply(Action::Submit, 0.0), None);

        app.apply_submit_result(SubmitResult::Waitlist(Ok(())), 100.0);
        assert_eq!(app.route, Route::ThankYou);
        assert!(!app.carousel.is_attached());
        assert_eq!(app.waitlist.email(), "");

        // Card appears after its mount delay
        assert_eq!(app.thank_you_frame(0, 150.0).opacity, 0.0);
        assert_eq!(app.thank_you_frame(0, 5000.0), StyleFrame::SHOWN);

        app.apply(Action::BackToSite, 6000.0);
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.scroll.current_scroll(), 0);
    }

    #[test]
    fn test_invalid_waitlist_email_stays_local() {
        let mut app = app();
        app.apply(Action::EditWaitlist, 0.0);
        type_text(&mut app, "nope");
        assert_eq!(app.apply(Action::Submit, 0.0), None);
        assert!(app.waitlist.error().is_some());
        assert!(!app.waitlist_pending);
    }

    #[test]
    fn test_filter_changes_layout() {
        let mut app = app();
        let before = app.layout.get(Block::Projects).unwrap().height;
        app.apply(Action::NextFilter, 0.0);
        assert_eq!(app.project_filter, "ML/AI");
        assert_eq!(app.visible_projects().len(), 1);
        assert!(app.layout.get(Block::Projects).unwrap().height <= before);
    }

    #[test]
    fn test_open_project_skips_placeholders() {
        let mut app = app();
        assert_eq!(app.apply(Action::OpenProject, 0.0), None);
        assert!(app.status_message.is_some());

        app.apply(Action::NextProject, 0.0);
        app.apply(Action::NextProject, 0.0);
        let Some(Command::Open(url)) = app.apply(Action::OpenProject, 0.0) else {
            panic!("expected a link");
        };
        assert_eq!(url.host_str(), Some("e-learning-sage-eight.vercel.app"));
    }

    #[test]
    fn test_mouse_drag_moves_carousel() {
        let mut app = app();
        app.apply(Action::GoTo(Section::About), 0.0);
        app.tick(10.0);
        let (row, _) = app.carousel_rows().unwrap();

        let mouse = |kind, column| MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60));
        assert_eq!(app.carousel.phase(), CarouselPhase::UserDragging);

        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 40));
        assert_eq!(app.carousel.offset(), app.carousel.drag_anchor().unwrap().start_offset + 20.0);

        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 40));
        assert_eq!(app.carousel.phase(), CarouselPhase::Autoscrolling);
    }

    #[test]
    fn test_service_toggle_grows_page() {
        let mut app = app();
        let before = app.layout.total_height();
        app.apply(Action::ToggleService, 0.0);
        assert!(app.accordion.is_open(0));
        assert!(app.layout.total_height() > before);
    }
}
