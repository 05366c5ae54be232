use folio_core::content::Project;
use folio_core::motion::reveal::StyleFrame;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::{faded, is_drawn, render_offset, row, shift_rows, truncate_str};
use crate::app::App;
use crate::page::{card_columns, PROJECT_CARD_HEIGHT};
use crate::reveals::RevealKey;

/// Row of the first card inside the block
const CARDS_ROW: u16 = 7;
const MARGIN: u16 = 2;
const GAP: u16 = 2;
/// Parallax drift is kept small so cards never overlap the filter bar
const MAX_DRIFT_ROWS: f64 = 2.0;

/// Project gallery: filter bar and a grid of cards
pub(super) fn render(area: Rect, buf: &mut Buffer, app: &App, now_ms: f64) {
    let theme = &app.theme;
    let gallery = &app.content.projects;

    Paragraph::new(Line::from(gallery.heading.as_str()))
        .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .render(row(area, 1), buf);
    Paragraph::new(Line::from(gallery.tagline.as_str()))
        .style(Style::default().fg(theme.muted))
        .alignment(Alignment::Center)
        .render(row(area, 2), buf);

    let mut filters: Vec<Span> = Vec::new();
    for category in &gallery.categories {
        let style = if *category == app.project_filter {
            Style::default().fg(theme.background).bg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        filters.push(Span::styled(format!(" {} ", category), style));
        filters.push(Span::raw("  "));
    }
    filters.push(Span::styled("f:filter", Style::default().fg(theme.border)));
    Paragraph::new(Line::from(filters))
        .alignment(Alignment::Center)
        .render(row(area, 4), buf);

    let projects = app.visible_projects();
    if projects.is_empty() {
        Paragraph::new(Line::from("No projects in this category yet"))
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center)
            .render(row(area, CARDS_ROW), buf);
        return;
    }

    let columns = card_columns(area.width);
    let usable = area.width.saturating_sub(MARGIN * 2 + GAP * (columns - 1));
    let card_width = usable / columns;
    let drift = app.gallery.offsets(app.scroll.current_scroll() as f64);

    for (i, project) in projects.iter().enumerate() {
        let column = i as u16 % columns;
        let grid_row = i as u16 / columns;
        let card_area = Rect::new(
            area.x + MARGIN + column * (card_width + GAP),
            area.y + CARDS_ROW + grid_row * PROJECT_CARD_HEIGHT,
            card_width,
            PROJECT_CARD_HEIGHT - 1,
        );

        let frame = app.reveals.frame(RevealKey::Projects, i, now_ms);
        if !is_drawn(&frame) {
            continue;
        }
        let parallax = drift
            .get(column as usize)
            .map(|rows| rows.clamp(-MAX_DRIFT_ROWS, MAX_DRIFT_ROWS).round() as i32)
            .unwrap_or(0);

        let selected = i == app.selected_project;
        let card = project_card(app, project, selected, card_width, &frame);
        render_offset(card, card_area, 0, shift_rows(&frame) + parallax, buf);
    }
}

fn project_card<'a>(
    app: &App,
    project: &'a Project,
    selected: bool,
    width: u16,
    frame: &StyleFrame,
) -> Paragraph<'a> {
    let theme = &app.theme;
    let text_width = width.saturating_sub(4) as usize;

    let mut title = vec![Span::styled(
        format!(" {} ", truncate_str(&project.title, text_width.saturating_sub(12))),
        faded(theme, theme.text, frame).add_modifier(Modifier::BOLD),
    )];
    if project.featured {
        title.push(Span::styled("★ Featured ", faded(theme, theme.accent, frame)));
    }

    let technologies = project.technologies().collect::<Vec<_>>().join(" · ");
    let links = if project.links().next().is_some() {
        Span::styled("b: open ↗", faded(theme, theme.accent, frame))
    } else {
        Span::styled("coming soon", faded(theme, theme.muted, frame))
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(project.category.as_str(), faded(theme, theme.muted, frame)),
            Span::raw("  "),
            links,
        ]),
        Line::from(Span::styled(truncate_str(&technologies, text_width), faded(theme, theme.accent, frame))),
        Line::from(""),
        // Overflowing description rows are cut by the card border
        Line::from(Span::styled(project.description.as_str(), faded(theme, theme.text, frame))),
    ];

    let border_color = if selected { theme.accent } else { theme.border };
    Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(faded(theme, border_color, frame)),
    )
}
