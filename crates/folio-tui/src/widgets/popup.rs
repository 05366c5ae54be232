use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::theme::Theme;

const HELP: &[(&str, &str)] = &[
    ("j / k", "scroll"),
    ("Ctrl-d / Ctrl-u", "half page"),
    ("Space / PgUp", "page"),
    ("gg / G", "top / bottom"),
    ("Tab / 1-6", "sections"),
    ("m", "menu"),
    ("Enter", "section action"),
    ("f / F", "project filter"),
    ("p / b", "select / open project"),
    ("s / o", "select / expand service"),
    ("c", "contact form"),
    ("w", "waitlist"),
    ("mouse", "wheel scrolls, drag the skills"),
    ("q", "quit"),
];

pub struct PopupWidget;

impl PopupWidget {
    /// Centered message box closed by any key
    fn render_message(frame: &mut Frame, theme: &Theme, title: &str, message: &str, color: Color) {
        let area = frame.area();
        let popup_width = 56u16.min(area.width.saturating_sub(4));
        let popup_height = 8u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme.surface));
        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let [message_area, _, hint_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)]).areas(inner_area);

        let message_paragraph = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(message_paragraph, message_area);

        let hint = Paragraph::new(Line::from(Span::styled("press any key", Style::default().fg(theme.muted))))
            .alignment(Alignment::Center);
        frame.render_widget(hint, hint_area);
    }

    /// Submission failure alert
    pub fn render_alert(frame: &mut Frame, theme: &Theme, message: &str) {
        Self::render_message(frame, theme, "Error", message, theme.error);
    }

    /// Contact message confirmation
    pub fn render_sent(frame: &mut Frame, theme: &Theme) {
        Self::render_message(
            frame,
            theme,
            "Message sent",
            "Thanks for reaching out! I'll get back to you soon.",
            theme.success,
        );
    }

    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let height = (HELP.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(50u16.min(area.width.saturating_sub(4)), height, area);

        let lines: Vec<Line> = HELP
            .iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(format!(" {:<16}", keys), Style::default().fg(theme.accent)),
                    Span::styled(*what, Style::default().fg(theme.text)),
                ])
            })
            .collect();

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .title(" Keys ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent))
                    .style(Style::default().bg(theme.surface)),
            ),
            popup_area,
        );
    }
}
