//! Virtual document: the page as a vertical stack of blocks measured in rows
//!
//! The layout is the terminal's stand-in for element measurement. It is
//! rebuilt whenever the terminal size or an expandable block changes.

use std::collections::HashMap;

use folio_core::content::{Accordion, SiteContent};
use folio_core::motion::{ElementId, ElementLayout, ElementRect};

/// Page blocks in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Block {
    Hero,
    About,
    Skills,
    Projects,
    Services,
    Testimonials,
    Products,
    Band,
    Contact,
    Footer,
}

impl Block {
    pub const ALL: [Block; 10] = [
        Block::Hero,
        Block::About,
        Block::Skills,
        Block::Projects,
        Block::Services,
        Block::Testimonials,
        Block::Products,
        Block::Band,
        Block::Contact,
        Block::Footer,
    ];

    /// Element id; navbar anchors use the same names
    pub fn id(&self) -> &'static str {
        match self {
            Block::Hero => "hero",
            Block::About => "about",
            Block::Skills => "skills",
            Block::Projects => "projects",
            Block::Services => "services",
            Block::Testimonials => "testimonials",
            Block::Products => "products",
            Block::Band => "band",
            Block::Contact => "contact",
            Block::Footer => "footer",
        }
    }

    pub fn element_id(&self) -> ElementId {
        ElementId::new(self.id())
    }
}

/// Rows reserved above the carousel strip inside the skills block
pub const SKILLS_STRIP_ROW: u16 = 4;
/// Height of the skill carousel strip
pub const SKILLS_STRIP_HEIGHT: u16 = 3;
/// Width of one skill badge including its gap
pub const SKILL_BADGE_WIDTH: u16 = 20;
/// Height of one project card
pub const PROJECT_CARD_HEIGHT: u16 = 9;
/// Height of one testimonial card
pub const TESTIMONIAL_CARD_HEIGHT: u16 = 7;

/// Measured document
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    blocks: Vec<(Block, ElementRect)>,
    index: HashMap<ElementId, ElementRect>,
    width: u16,
    total_height: u16,
}

impl PageLayout {
    /// Measure every block for a viewport of `width × viewport_rows`
    pub fn measure(
        content: &SiteContent,
        accordion: &Accordion,
        project_count: usize,
        width: u16,
        viewport_rows: u16,
    ) -> Self {
        let mut layout = PageLayout {
            width,
            ..Default::default()
        };
        let mut top = 0u16;
        for block in Block::ALL {
            let height = block_height(block, content, accordion, project_count, width, viewport_rows);
            let rect = ElementRect::new(top as f64, height as f64);
            layout.blocks.push((block, rect));
            layout.index.insert(block.element_id(), rect);
            top = top.saturating_add(height);
        }
        layout.total_height = top;
        layout
    }

    pub fn blocks(&self) -> &[(Block, ElementRect)] {
        &self.blocks
    }

    pub fn get(&self, block: Block) -> Option<ElementRect> {
        self.index.get(&block.element_id()).copied()
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn total_height(&self) -> u16 {
        self.total_height
    }

    /// Largest scroll position for a viewport of `viewport_rows`
    pub fn max_scroll(&self, viewport_rows: u16) -> u16 {
        self.total_height.saturating_sub(viewport_rows)
    }

    /// Block containing document row `row`
    pub fn block_at(&self, row: u16) -> Option<Block> {
        let row = row as f64;
        self.blocks
            .iter()
            .find(|(_, rect)| row >= rect.top && row < rect.bottom())
            .map(|(block, _)| *block)
    }
}

impl ElementLayout for PageLayout {
    fn rect(&self, element: &ElementId) -> Option<ElementRect> {
        self.index.get(element).copied()
    }
}

/// Rows of `text` wrapped at `width`
pub fn wrapped_rows(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let width = width as usize;
    text.lines()
        .map(|line| {
            let len = unicode_width::UnicodeWidthStr::width(line);
            len.div_ceil(width).max(1) as u16
        })
        .sum::<u16>()
        .max(1)
}

/// Number of card columns that fit `width`
pub fn card_columns(width: u16) -> u16 {
    match width {
        0..=59 => 1,
        60..=99 => 2,
        _ => 3,
    }
}

fn block_height(
    block: Block,
    content: &SiteContent,
    accordion: &Accordion,
    project_count: usize,
    width: u16,
    viewport_rows: u16,
) -> u16 {
    let inner = width.saturating_sub(8).max(10);
    match block {
        Block::Hero => viewport_rows.max(12),
        Block::About => 6 + wrapped_rows(&content.about.body, inner.min(70)),
        Block::Skills => SKILLS_STRIP_ROW + SKILLS_STRIP_HEIGHT + 2,
        Block::Projects => {
            let columns = card_columns(width) as usize;
            let rows = project_count.div_ceil(columns).max(1) as u16;
            8 + rows * PROJECT_CARD_HEIGHT
        }
        Block::Services => {
            let body: u16 = content
                .services
                .iter()
                .enumerate()
                .map(|(i, service)| {
                    if accordion.is_open(i) {
                        wrapped_rows(&service.summary, inner)
                            + service.includes.len() as u16
                            + wrapped_rows(&service.closing, inner)
                            + 4
                    } else {
                        0
                    }
                })
                .sum();
            6 + content.services.len() as u16 * 3 + body
        }
        Block::Testimonials => {
            let deepest = content.testimonials.iter().map(Vec::len).max().unwrap_or(0) as u16;
            let columns = card_columns(width);
            let stacked = if columns == 1 {
                content.testimonial_count() as u16
            } else {
                deepest
            };
            // Slack above and below for the drifting columns
            12 + stacked * TESTIMONIAL_CARD_HEIGHT
        }
        Block::Products => 10 + wrapped_rows(&content.products.blurb, inner.min(70)),
        Block::Band => 12,
        Block::Contact => 20,
        Block::Footer => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: u16, rows: u16) -> PageLayout {
        let content = SiteContent::default();
        PageLayout::measure(&content, &Accordion::new(), content.projects.items.len(), width, rows)
    }

    #[test]
    fn test_blocks_stack_without_gaps() {
        let layout = layout(120, 40);
        let mut expected_top = 0.0;
        for (_, rect) in layout.blocks() {
            assert_eq!(rect.top, expected_top);
            expected_top = rect.bottom();
        }
        assert_eq!(layout.total_height() as f64, expected_top);
    }

    #[test]
    fn test_hero_fills_viewport() {
        let layout = layout(120, 40);
        assert_eq!(layout.get(Block::Hero).unwrap().height, 40.0);
        assert_eq!(layout.get(Block::About).unwrap().top, 40.0);
    }

    #[test]
    fn test_anchor_lookup_through_element_layout() {
        let layout = layout(120, 40);
        let rect = layout.rect(&ElementId::new("contact")).unwrap();
        assert_eq!(Some(rect), layout.get(Block::Contact));
        assert!(layout.rect(&ElementId::new("blog")).is_none());
    }

    #[test]
    fn test_open_service_grows_block() {
        let content = SiteContent::default();
        let closed = PageLayout::measure(&content, &Accordion::new(), 3, 120, 40);
        let mut accordion = Accordion::new();
        accordion.toggle(1);
        let open = PageLayout::measure(&content, &accordion, 3, 120, 40);
        assert!(open.get(Block::Services).unwrap().height > closed.get(Block::Services).unwrap().height);
    }

    #[test]
    fn test_block_at_and_max_scroll() {
        let layout = layout(120, 40);
        assert_eq!(layout.block_at(0), Some(Block::Hero));
        assert_eq!(layout.block_at(40), Some(Block::About));
        assert_eq!(layout.block_at(layout.total_height()), None);
        assert_eq!(layout.max_scroll(40), layout.total_height() - 40);
    }

    #[test]
    fn test_wrapped_rows() {
        assert_eq!(wrapped_rows("", 10), 1);
        assert_eq!(wrapped_rows("abcdefghij", 10), 1);
        assert_eq!(wrapped_rows("abcdefghijk", 10), 2);
        assert_eq!(wrapped_rows("a\nb", 10), 2);
    }
}
