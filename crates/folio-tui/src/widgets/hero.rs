use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
    Frame,
};

use super::{centered_columns, centered_rect, row};
use crate::app::App;

/// First screen: name, title and the call to action
pub(super) fn render_hero(area: Rect, buf: &mut Buffer, app: &App) {
    let theme = &app.theme;
    let hero = &app.content.hero;
    let middle = area.height / 2;

    Paragraph::new(Line::from(Span::styled(
        hero.name.as_str(),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .render(row(area, middle.saturating_sub(3)), buf);

    Paragraph::new(Line::from(Span::styled(
        hero.title.as_str(),
        Style::default().fg(theme.muted),
    )))
    .alignment(Alignment::Center)
    .render(row(area, middle.saturating_sub(1)), buf);

    Paragraph::new(Line::from(vec![
        Span::styled(" Enter ", Style::default().fg(theme.background).bg(theme.accent)),
        Span::styled(format!(" {} ", hero.cta), Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .render(row(area, middle + 1), buf);

    Paragraph::new(Line::from(Span::styled("scroll ↓", Style::default().fg(theme.muted))))
        .alignment(Alignment::Center)
        .render(row(area, area.height.saturating_sub(2)), buf);
}

/// Shown until the page mounts
pub struct LoadingWidget;

impl LoadingWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now_ms: f64) {
        let theme = &app.theme;
        let box_area = centered_rect(40, 4, area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                app.content.hero.name.as_str(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center),
            row(box_area, 0),
        );

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.accent).bg(theme.surface))
            .ratio(app.loading_progress(now_ms))
            .label("");
        frame.render_widget(gauge, centered_columns(row(box_area, 2), 30));
    }
}
