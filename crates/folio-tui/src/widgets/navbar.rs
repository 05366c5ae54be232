use folio_core::navigation::Section;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Mode};

const MENU_WIDTH: u16 = 18;

/// Top bar: hidden while scrolling down, glassy past the hero
pub struct NavbarWidget;

impl NavbarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if let Mode::Menu(selected) = app.mode {
            Self::render_bar(frame, area, app);
            Self::render_menu(frame, area, app, selected);
            return;
        }
        if app.navbar.is_hidden() {
            return;
        }
        Self::render_bar(frame, area, app);
    }

    fn render_bar(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let bar = Rect::new(area.x, area.y, area.width, 1.min(area.height));
        let current = app.current_section();

        let mut style = Style::default().fg(theme.text);
        if app.navbar.is_glassy() {
            style = style.bg(theme.surface);
        }

        let mut links: Vec<Span> = Vec::new();
        for section in Section::ALL.iter().skip(1) {
            let link_style = if *section == current {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            links.push(Span::styled(section.title(), link_style));
            links.push(Span::raw("  "));
        }
        links.push(Span::styled("m:menu ", Style::default().fg(theme.border)));

        let brand = Paragraph::new(Line::from(Span::styled(
            format!(" {}", app.content.hero.name),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )))
        .style(style);
        frame.render_widget(brand, bar);
        frame.render_widget(Paragraph::new(Line::from(links)).alignment(Alignment::Right), bar);
    }

    fn render_menu(frame: &mut Frame, area: Rect, app: &App, selected: Section) {
        let theme = &app.theme;
        let height = (Section::ALL.len() as u16 + 2).min(area.height.saturating_sub(1));
        let menu_area = Rect::new(
            area.right().saturating_sub(MENU_WIDTH + 1),
            area.y + 1,
            MENU_WIDTH.min(area.width),
            height,
        );

        let items: Vec<ListItem> = Section::ALL
            .iter()
            .map(|section| {
                let style = if *section == selected {
                    Style::default().fg(theme.background).bg(theme.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(Line::from(Span::styled(format!(" {} ", section.title()), style)))
            })
            .collect();

        frame.render_widget(Clear, menu_area);
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme.accent))
                    .style(Style::default().bg(theme.surface)),
            ),
            menu_area,
        );
    }
}
