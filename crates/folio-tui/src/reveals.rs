//! Scroll-triggered reveals for the page blocks
//!
//! Each reveal owns its tracker and its own observer, the way every section
//! registers its own observation; a one-shot reveal unobserving itself can
//! never starve a re-arming one watching the same block.

use std::collections::BTreeMap;

use folio_core::config::MotionConfig;
use folio_core::motion::reveal::StyleFrame;
use folio_core::motion::{reveal, IntersectionObserver, RevealSpec, RevealStyle, Viewport, VisibilityTracker};

use crate::page::{Block, PageLayout};

/// Threshold for the contact card
const CONTACT_THRESHOLD: f64 = 0.3;
/// Threshold for the products title and teaser
const PRODUCTS_THRESHOLD: f64 = 0.5;
/// Items assumed when deciding whether a staggered reveal is still moving
const SETTLE_ITEMS: u64 = 16;

/// Every animated element group on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RevealKey {
    About,
    Skills,
    Projects,
    ServicesTitle,
    ProductsTitle,
    ProductsTeaser,
    Contact,
}

impl RevealKey {
    pub const ALL: [RevealKey; 7] = [
        RevealKey::About,
        RevealKey::Skills,
        RevealKey::Projects,
        RevealKey::ServicesTitle,
        RevealKey::ProductsTitle,
        RevealKey::ProductsTeaser,
        RevealKey::Contact,
    ];

    pub fn block(&self) -> Block {
        match self {
            RevealKey::About => Block::About,
            RevealKey::Skills => Block::Skills,
            RevealKey::Projects => Block::Projects,
            RevealKey::ServicesTitle => Block::Services,
            RevealKey::ProductsTitle | RevealKey::ProductsTeaser => Block::Products,
            RevealKey::Contact => Block::Contact,
        }
    }

    /// Titles replay every time they scroll back in
    pub fn is_rearming(&self) -> bool {
        matches!(self, RevealKey::ServicesTitle | RevealKey::ProductsTitle)
    }

    fn threshold(&self, motion: &MotionConfig) -> f64 {
        match self {
            RevealKey::Contact => CONTACT_THRESHOLD,
            RevealKey::ProductsTitle | RevealKey::ProductsTeaser => PRODUCTS_THRESHOLD,
            _ => motion.section_threshold,
        }
    }

    pub fn spec(&self, motion: &MotionConfig) -> RevealSpec {
        let section = |spec: RevealSpec| {
            spec.with_duration(motion.reveal_duration_ms)
                .with_easing(motion.reveal_easing)
        };
        match self {
            RevealKey::About => section(RevealSpec::about()),
            RevealKey::Skills => RevealSpec::skill_badge().with_step_delay(motion.skill_stagger_ms),
            RevealKey::Projects => section(RevealSpec::project_card()).with_step_delay(motion.card_stagger_ms),
            RevealKey::ServicesTitle | RevealKey::ProductsTitle => {
                RevealSpec::letter().with_step_delay(motion.letter_stagger_ms)
            }
            RevealKey::ProductsTeaser | RevealKey::Contact => section(RevealSpec::section()),
        }
    }
}

#[derive(Debug, Clone)]
struct RevealSlot {
    tracker: VisibilityTracker,
    observer: IntersectionObserver,
    spec: RevealSpec,
    /// App-clock time of the last visibility change
    changed_at: Option<f64>,
}

/// All reveals of one mounted home page
#[derive(Debug, Clone)]
pub struct RevealBoard {
    slots: BTreeMap<RevealKey, RevealSlot>,
}

impl RevealBoard {
    pub fn new(motion: &MotionConfig) -> Self {
        let slots = RevealKey::ALL
            .into_iter()
            .map(|key| {
                let threshold = key.threshold(motion);
                let tracker = if key.is_rearming() {
                    VisibilityTracker::rearming(threshold)
                } else {
                    VisibilityTracker::one_shot(threshold)
                };
                let slot = RevealSlot {
                    tracker,
                    observer: IntersectionObserver::new(threshold),
                    spec: key.spec(motion),
                    changed_at: None,
                };
                (key, slot)
            })
            .collect();
        Self { slots }
    }

    /// Register every reveal whose block is in the layout
    pub fn attach(&mut self, layout: &PageLayout) {
        for (key, slot) in self.slots.iter_mut() {
            let block = key.block();
            let element = layout.get(block).map(|_| block.element_id());
            slot.observer.observe_with(&mut slot.tracker, element.as_ref());
        }
    }

    /// Unregister everything
    pub fn detach(&mut self) {
        for slot in self.slots.values_mut() {
            slot.tracker.detach();
            slot.observer.disconnect();
        }
    }

    /// Deliver this scroll position's crossings; returns whether anything changed
    pub fn update(&mut self, viewport: &Viewport, layout: &PageLayout, now_ms: f64) -> bool {
        let mut changed = false;
        for (key, slot) in self.slots.iter_mut() {
            if slot.observer.is_empty() {
                continue;
            }
            let entries = slot.observer.update(viewport, layout);
            if let Some(visible) = slot.observer.dispatch(&entries, &mut slot.tracker) {
                tracing::debug!(reveal = ?key, visible, "Reveal changed");
                slot.changed_at = Some(now_ms);
                changed = true;
            }
        }
        changed
    }

    pub fn is_visible(&self, key: RevealKey) -> bool {
        self.slots.get(&key).is_some_and(|slot| slot.tracker.is_visible())
    }

    pub fn is_observing(&self, key: RevealKey) -> bool {
        self.slots.get(&key).is_some_and(|slot| !slot.observer.is_empty())
    }

    /// Style contract for item `index` of `key`
    pub fn style(&self, key: RevealKey, index: usize) -> Option<RevealStyle> {
        let slot = self.slots.get(&key)?;
        Some(reveal(slot.tracker.is_visible(), &slot.spec, index))
    }

    /// Style of item `index` at `now_ms`
    ///
    /// Before the first change the element rests in its hidden state.
    pub fn frame(&self, key: RevealKey, index: usize, now_ms: f64) -> StyleFrame {
        let Some(slot) = self.slots.get(&key) else {
            return StyleFrame::SHOWN;
        };
        let style = reveal(slot.tracker.is_visible(), &slot.spec, index);
        match slot.changed_at {
            Some(at) => style.at(now_ms - at),
            None => style.target,
        }
    }

    /// Whether any transition is still running at `now_ms`
    pub fn is_settling(&self, now_ms: f64) -> bool {
        self.slots.values().any(|slot| {
            slot.changed_at.is_some_and(|at| {
                let horizon = slot.spec.base_delay_ms + slot.spec.step_delay_ms * SETTLE_ITEMS + slot.spec.duration_ms;
                now_ms - at < horizon as f64
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use folio_core::content::{Accordion, SiteContent};

    use super::*;

    fn layout() -> PageLayout {
        let content = SiteContent::default();
        PageLayout::measure(&content, &Accordion::new(), 3, 120, 40)
    }

    fn viewport_at(layout: &PageLayout, block: Block) -> Viewport {
        Viewport::new(layout.get(block).unwrap().top, 40.0)
    }

    #[test]
    fn test_hidden_until_scrolled_into_view() {
        let layout = layout();
        let mut board = RevealBoard::new(&MotionConfig::default());
        board.attach(&layout);

        assert!(!board.update(&Viewport::new(0.0, 40.0), &layout, 0.0));
        assert!(!board.is_visible(RevealKey::About));
        assert_eq!(board.frame(RevealKey::About, 0, 0.0).opacity, 0.0);

        assert!(board.update(&viewport_at(&layout, Block::About), &layout, 100.0));
        assert!(board.is_visible(RevealKey::About));
        assert_eq!(board.frame(RevealKey::About, 0, 100.0).opacity, 0.0);
        assert_eq!(board.frame(RevealKey::About, 0, 1100.0), StyleFrame::SHOWN);
    }

    #[test]
    fn test_one_shot_stays_revealed_and_unobserves() {
        let layout = layout();
        let mut board = RevealBoard::new(&MotionConfig::default());
        board.attach(&layout);

        board.update(&viewport_at(&layout, Block::Projects), &layout, 0.0);
        assert!(board.is_visible(RevealKey::Projects));
        assert!(!board.is_observing(RevealKey::Projects));

        board.update(&Viewport::new(0.0, 40.0), &layout, 10.0);
        assert!(board.is_visible(RevealKey::Projects));
    }

    #[test]
    fn test_rearming_title_toggles_while_teaser_latches() {
        let layout = layout();
        let mut board = RevealBoard::new(&MotionConfig::default());
        board.attach(&layout);

        board.update(&viewport_at(&layout, Block::Products), &layout, 0.0);
        assert!(board.is_visible(RevealKey::ProductsTitle));
        assert!(board.is_visible(RevealKey::ProductsTeaser));

        board.update(&Viewport::new(0.0, 40.0), &layout, 10.0);
        assert!(!board.is_visible(RevealKey::ProductsTitle));
        assert!(board.is_visible(RevealKey::ProductsTeaser));

        board.update(&viewport_at(&layout, Block::Products), &layout, 20.0);
        assert!(board.is_visible(RevealKey::ProductsTitle));
    }

    #[test]
    fn test_project_cards_stagger() {
        let layout = layout();
        let mut board = RevealBoard::new(&MotionConfig::default());
        board.attach(&layout);
        board.update(&viewport_at(&layout, Block::Projects), &layout, 0.0);

        assert_eq!(board.style(RevealKey::Projects, 0).unwrap().delay_ms, 400);
        assert_eq!(board.style(RevealKey::Projects, 2).unwrap().delay_ms, 600);
        assert!(board.is_settling(500.0));
        assert!(!board.is_settling(60_000.0));
    }

    #[test]
    fn test_detached_board_ignores_scrolling() {
        let layout = layout();
        let mut board = RevealBoard::new(&MotionConfig::default());
        board.attach(&layout);
        board.detach();
        assert!(!board.update(&viewport_at(&layout, Block::About), &layout, 0.0));
        assert!(!board.is_visible(RevealKey::About));
    }
}
