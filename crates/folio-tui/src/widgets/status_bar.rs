use folio_core::navigation::Route;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match &app.mode {
            Mode::Normal => match app.route {
                Route::Home => "BROWSE",
                Route::ThankYou => "THANKS",
            },
            Mode::Menu(_) => "MENU",
            Mode::Contact(_) => "CONTACT",
            Mode::Waitlist => "WAITLIST",
            Mode::Alert(_) => "ALERT",
            Mode::Sent => "SENT",
            Mode::Help => "HELP",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            let total = app.layout.total_height().max(1) as u32;
            let bottom = (app.scroll.current_scroll() + app.viewport_rows()) as u32;
            let percent = (bottom.min(total) * 100 / total).min(100);
            format!(" {} | {} | {}%", mode_str, app.current_section(), percent)
        };

        let help_hint = match app.mode {
            Mode::Contact(_) => " Tab:field Enter:send Esc:done ",
            Mode::Waitlist => " Enter:join Esc:done ",
            Mode::Menu(_) => " j/k:move Enter:go Esc:close ",
            _ => " q:quit j/k:scroll Tab:section m:menu ?:help ",
        };
        let padding_len = area
            .width
            .saturating_sub(status_text.chars().count() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.text).bg(theme.surface)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.surface)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.surface)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
