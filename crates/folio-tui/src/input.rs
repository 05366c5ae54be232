use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_core::navigation::{Route, Section};

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextSection,
    PrevSection,
    GoTo(Section),
    // Navigation menu
    ToggleMenu,
    MenuNext,
    MenuPrev,
    MenuSelect,
    /// Enter: primary control of the section in view
    Activate,
    // Project gallery
    NextFilter,
    PrevFilter,
    NextProject,
    OpenProject,
    // Services accordion
    NextService,
    ToggleService,
    // Forms
    EditContact,
    EditWaitlist,
    NextField,
    PrevField,
    InputChar(char),
    Backspace,
    Submit,
    Cancel,
    /// Close an alert, confirmation or help
    Dismiss,
    Help,
    /// Thank-you page: back to the site
    BackToSite,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Action::Quit;
    }

    match &app.mode {
        // Any key closes these
        Mode::Alert(_) | Mode::Sent | Mode::Help => return Action::Dismiss,
        Mode::Contact(_) => return handle_contact_mode(key),
        Mode::Waitlist => return handle_waitlist_mode(key),
        Mode::Menu(_) => return handle_menu_mode(key),
        Mode::Normal => {}
    }

    if app.route == Route::ThankYou {
        return handle_thank_you(key);
    }

    // Input waits behind the loading screen
    if !app.is_mounted() {
        return match key.code {
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,

        // Scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::HalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::HalfPageUp,
        (KeyCode::PageDown, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => Action::PageDown,
        (KeyCode::PageUp, _) => Action::PageUp,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), _) => Action::JumpToBottom,
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::End, _) => Action::JumpToBottom,

        // Sections
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::BackTab, _) => Action::PrevSection,
        (KeyCode::Char(c @ '1'..='6'), KeyModifiers::NONE) => {
            let index = c as usize - '1' as usize;
            Section::ALL.get(index).copied().map(Action::GoTo).unwrap_or(Action::None)
        }
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::ToggleMenu,
        (KeyCode::Enter, _) => Action::Activate,

        // Gallery and services
        (KeyCode::Char('f'), KeyModifiers::NONE) => Action::NextFilter,
        (KeyCode::Char('F'), _) => Action::PrevFilter,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::NextProject,
        (KeyCode::Char('b'), KeyModifiers::NONE) => Action::OpenProject,
        (KeyCode::Char('s'), KeyModifiers::NONE) => Action::NextService,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::ToggleService,

        // Forms
        (KeyCode::Char('c'), KeyModifiers::NONE) => Action::EditContact,
        (KeyCode::Char('w'), KeyModifiers::NONE) => Action::EditWaitlist,

        (KeyCode::Char('?'), _) => Action::Help,

        _ => Action::None,
    }
}

/// Typing into the contact form
fn handle_contact_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Submit,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Tab | KeyCode::Down => Action::NextField,
        KeyCode::BackTab | KeyCode::Up => Action::PrevField,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Typing the waitlist email
fn handle_waitlist_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Submit,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

fn handle_menu_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Action::MenuNext,
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Action::MenuPrev,
        KeyCode::Enter => Action::MenuSelect,
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => Action::Cancel,
        _ => Action::None,
    }
}

fn handle_thank_you(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Enter | KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => Action::BackToSite,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use folio_core::{AppConfig, SiteContent};

    use super::*;
    use crate::theme::Theme;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mounted_app() -> App {
        let mut config = AppConfig::default();
        config.motion.loading_delay_ms = 0;
        let mut app = App::new(Arc::new(config), SiteContent::default(), Theme::default());
        app.resize(100, 30);
        app.tick(0.0);
        app
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = mounted_app();
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::PendingG);
        app.apply(Action::PendingG, 0.0);
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::JumpToTop);
    }

    #[test]
    fn test_number_keys_jump_to_sections() {
        let app = mounted_app();
        assert_eq!(handle_key_event(key(KeyCode::Char('1')), &app), Action::GoTo(Section::Home));
        assert_eq!(handle_key_event(key(KeyCode::Char('6')), &app), Action::GoTo(Section::Contact));
        assert_eq!(handle_key_event(key(KeyCode::Char('7')), &app), Action::None);
    }

    #[test]
    fn test_form_modes_capture_text() {
        let mut app = mounted_app();
        app.mode = Mode::Contact(folio_core::form::Field::Name);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::InputChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Enter), &app), Action::Submit);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &app), Action::Cancel);

        app.mode = Mode::Waitlist;
        assert_eq!(handle_key_event(key(KeyCode::Tab), &app), Action::None);
    }

    #[test]
    fn test_modals_dismiss_on_any_key() {
        let mut app = mounted_app();
        app.mode = Mode::Alert("Failed".to_string());
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &app), Action::Dismiss);
        app.mode = Mode::Sent;
        assert_eq!(handle_key_event(key(KeyCode::Enter), &app), Action::Dismiss);
    }

    #[test]
    fn test_loading_screen_blocks_input() {
        let app = App::new(Arc::new(AppConfig::default()), SiteContent::default(), Theme::default());
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::None);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::Quit);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = mounted_app();
        app.mode = Mode::Waitlist;
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &app), Action::Quit);
    }
}
