//! Intersection geometry
//!
//! Stands in for the page's intersection-observation service: given element
//! rectangles and the current viewport it emits entries only when an
//! element's "intersecting at threshold" state changes.

use std::collections::HashMap;

use super::visibility::{meets_threshold, ElementId, VisibilityTracker};

/// Vertical extent of an element in document coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f64,
    pub height: f64,
}

impl ElementRect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height: height.max(0.0) }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Visible window of the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Global scroll position
    pub top: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height: height.max(0.0) }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Fraction of `rect` inside this viewport, in [0, 1]
    pub fn intersection_ratio(&self, rect: &ElementRect) -> f64 {
        if rect.height == 0.0 {
            return if rect.top >= self.top && rect.top <= self.bottom() { 1.0 } else { 0.0 };
        }
        let overlap = rect.bottom().min(self.bottom()) - rect.top.max(self.top);
        (overlap / rect.height).clamp(0.0, 1.0)
    }
}

/// Source of element measurements
pub trait ElementLayout {
    fn rect(&self, element: &ElementId) -> Option<ElementRect>;
}

impl ElementLayout for HashMap<ElementId, ElementRect> {
    fn rect(&self, element: &ElementId) -> Option<ElementRect> {
        self.get(element).copied()
    }
}

/// One intersection change for one element
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub element: ElementId,
    pub ratio: f64,
    /// Whether at least `threshold` of the element is on screen
    pub is_intersecting: bool,
}

#[derive(Debug, Clone)]
struct Target {
    element: ElementId,
    /// Last reported state; `None` until the first measurement
    last: Option<bool>,
}

/// Observer with a single threshold watching any number of elements
#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    threshold: f64,
    targets: Vec<Target>,
}

impl IntersectionObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            targets: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Register an element; an unset reference is a no-op
    pub fn observe(&mut self, element: Option<&ElementId>) -> bool {
        let Some(element) = element else {
            return false;
        };
        if !self.is_observing(element) {
            self.targets.push(Target {
                element: element.clone(),
                last: None,
            });
        }
        true
    }

    /// Attach `tracker` to `element` and register it here in one step
    ///
    /// Entries are only emitted when this observer's threshold is crossed, so
    /// a tracker with a different threshold is refused.
    pub fn observe_with(&mut self, tracker: &mut VisibilityTracker, element: Option<&ElementId>) -> bool {
        if (tracker.threshold() - self.threshold).abs() > f64::EPSILON {
            tracing::warn!(
                observer = self.threshold,
                tracker = tracker.threshold(),
                "Tracker threshold does not match observer"
            );
            return false;
        }
        tracker.attach(element) && self.observe(element)
    }

    pub fn unobserve(&mut self, element: &ElementId) {
        self.targets.retain(|t| &t.element != element);
    }

    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    pub fn is_observing(&self, element: &ElementId) -> bool {
        self.targets.iter().any(|t| &t.element == element)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Measure every target against `viewport` and return the crossings
    ///
    /// The first measurement after `observe` always reports. Targets missing
    /// from the layout are skipped.
    pub fn update(&mut self, viewport: &Viewport, layout: &dyn ElementLayout) -> Vec<IntersectionEntry> {
        let mut entries = Vec::new();
        let threshold = self.threshold;
        for index in 0..self.targets.len() {
            let element = &self.targets[index].element;
            let Some(rect) = layout.rect(element) else {
                tracing::warn!(element = %element, "Observed element not found in layout");
                continue;
            };
            let ratio = viewport.intersection_ratio(&rect);
            let is_intersecting = meets_threshold(ratio, threshold);
            let target = &mut self.targets[index];
            if target.last != Some(is_intersecting) {
                target.last = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    element: target.element.clone(),
                    ratio,
                    is_intersecting,
                });
            }
        }
        tracing::trace!(threshold, count = entries.len(), "Intersection entries");
        entries
    }

    /// Deliver entries to a tracker, unobserving its element once it detaches
    pub fn dispatch(&mut self, entries: &[IntersectionEntry], tracker: &mut VisibilityTracker) -> Option<bool> {
        let changed = tracker.handle_all(entries);
        if !tracker.is_armed() {
            if let Some(element) = tracker.element() {
                let element = element.clone();
                self.unobserve(&element);
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> HashMap<ElementId, ElementRect> {
        let mut map = HashMap::new();
        map.insert("about".into(), ElementRect::new(100.0, 100.0));
        map.insert("projects".into(), ElementRect::new(300.0, 200.0));
        map
    }

    #[test]
    fn test_intersection_ratio() {
        let vp = Viewport::new(0.0, 150.0);
        assert!((vp.intersection_ratio(&ElementRect::new(100.0, 100.0)) - 0.5).abs() < 1e-9);
        assert_eq!(vp.intersection_ratio(&ElementRect::new(200.0, 100.0)), 0.0);
        assert_eq!(vp.intersection_ratio(&ElementRect::new(10.0, 20.0)), 1.0);
        assert_eq!(vp.intersection_ratio(&ElementRect::new(50.0, 0.0)), 1.0);
    }

    #[test]
    fn test_entries_only_on_crossing() {
        let layout = layout();
        let mut observer = IntersectionObserver::new(0.1);
        observer.observe(Some(&"about".into()));

        // First measurement always reports
        let entries = observer.update(&Viewport::new(0.0, 50.0), &layout);
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);

        // No crossing, no entry
        assert!(observer.update(&Viewport::new(5.0, 50.0), &layout).is_empty());

        // Crossing into view
        let entries = observer.update(&Viewport::new(70.0, 50.0), &layout);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);

        // Still in view, deeper
        assert!(observer.update(&Viewport::new(100.0, 50.0), &layout).is_empty());

        // Leaving
        let entries = observer.update(&Viewport::new(400.0, 50.0), &layout);
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);
    }

    #[test]
    fn test_zero_threshold_means_any_overlap() {
        let layout = layout();
        let mut observer = IntersectionObserver::new(0.0);
        observer.observe(Some(&"about".into()));
        let entries = observer.update(&Viewport::new(0.0, 100.0), &layout);
        assert!(!entries[0].is_intersecting);
        let entries = observer.update(&Viewport::new(0.0, 101.0), &layout);
        assert!(entries[0].is_intersecting);
    }

    #[test]
    fn test_missing_element_is_skipped() {
        let layout = layout();
        let mut observer = IntersectionObserver::new(0.1);
        observer.observe(Some(&"contact".into()));
        observer.observe(None);
        assert_eq!(observer.len(), 1);
        assert!(observer.update(&Viewport::new(0.0, 1000.0), &layout).is_empty());
    }

    #[test]
    fn test_one_shot_dispatch_unobserves() {
        let layout = layout();
        let mut observer = IntersectionObserver::new(0.1);
        let mut tracker = VisibilityTracker::one_shot(0.1);
        assert!(observer.observe_with(&mut tracker, Some(&"projects".into())));

        let entries = observer.update(&Viewport::new(250.0, 100.0), &layout);
        assert_eq!(observer.dispatch(&entries, &mut tracker), Some(true));
        assert!(!observer.is_observing(&"projects".into()));

        // Nothing left to report once the element scrolls away
        assert!(observer.update(&Viewport::new(0.0, 10.0), &layout).is_empty());
        assert!(tracker.is_visible());
    }

    #[test]
    fn test_rearming_dispatch_keeps_registration() {
        let layout = layout();
        let mut observer = IntersectionObserver::new(0.5);
        let mut tracker = VisibilityTracker::rearming(0.5);
        observer.observe_with(&mut tracker, Some(&"about".into()));

        let entries = observer.update(&Viewport::new(100.0, 100.0), &layout);
        assert_eq!(observer.dispatch(&entries, &mut tracker), Some(true));
        let entries = observer.update(&Viewport::new(500.0, 100.0), &layout);
        assert_eq!(observer.dispatch(&entries, &mut tracker), Some(false));
        let entries = observer.update(&Viewport::new(120.0, 100.0), &layout);
        assert_eq!(observer.dispatch(&entries, &mut tracker), Some(true));
        assert!(observer.is_observing(&"about".into()));
    }

    #[test]
    fn test_mismatched_tracker_is_refused() {
        let layout = layout();
        let mut observer = IntersectionObserver::new(0.1);
        let mut tracker = VisibilityTracker::one_shot(0.9);
        assert!(!observer.observe_with(&mut tracker, Some(&"about".into())));
        assert!(!tracker.is_armed());
        assert!(observer.is_empty());

        // Even when fed this observer's entries directly, 15% is not 90%
        let mut plain = IntersectionObserver::new(0.1);
        plain.observe(Some(&"about".into()));
        tracker.attach(Some(&"about".into()));
        let entries = plain.update(&Viewport::new(0.0, 115.0), &layout);
        assert!(entries[0].is_intersecting);
        assert_eq!(plain.dispatch(&entries, &mut tracker), None);
        assert!(!tracker.is_visible());
    }

    #[test]
    fn test_registration_order_does_not_change_entries() {
        let layout = layout();
        let mut a = IntersectionObserver::new(0.1);
        let mut b = IntersectionObserver::new(0.1);
        a.observe(Some(&"about".into()));
        a.observe(Some(&"projects".into()));
        b.observe(Some(&"projects".into()));
        b.observe(Some(&"about".into()));

        let vp = Viewport::new(150.0, 300.0);
        let mut ea = a.update(&vp, &layout);
        let mut eb = b.update(&vp, &layout);
        ea.sort_by(|x, y| x.element.cmp(&y.element));
        eb.sort_by(|x, y| x.element.cmp(&y.element));
        assert_eq!(ea, eb);
    }
}
