//! Viewport visibility tracking
//!
//! A tracker turns intersection entries for one element into a single
//! "has this entered the viewport" boolean. One-shot trackers latch on the
//! first trigger and detach themselves; re-arming trackers follow every
//! enter/exit crossing.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::observer::IntersectionEntry;

/// Handle naming a measurable element (a section anchor, a card, a title)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `ratio` of an element on screen satisfies `threshold`
///
/// A threshold of 0 means any overlap at all.
pub fn meets_threshold(ratio: f64, threshold: f64) -> bool {
    if threshold <= 0.0 {
        ratio > 0.0
    } else {
        ratio >= threshold
    }
}

/// How a tracker reacts after its first trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Latch true forever, then detach
    OneShot,
    /// Recompute on every crossing, including reverting to false
    Rearming,
}

/// Observable state of a tracker
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityState {
    /// Element being tracked; unset until a successful attach
    pub element: Option<ElementId>,
    pub is_visible: bool,
    /// Whether the tracker still reacts to entries
    pub armed: bool,
    /// Fraction of the element that must be on screen, in [0, 1]
    pub threshold: f64,
}

/// Per-instance visibility tracker with an explicit attach/detach lifecycle
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    state: VisibilityState,
    policy: TriggerPolicy,
    /// Set once a one-shot tracker has fired
    fired: bool,
}

impl VisibilityTracker {
    pub fn new(threshold: f64, policy: TriggerPolicy) -> Self {
        Self {
            state: VisibilityState {
                element: None,
                is_visible: false,
                armed: false,
                threshold: threshold.clamp(0.0, 1.0),
            },
            policy,
            fired: false,
        }
    }

    pub fn one_shot(threshold: f64) -> Self {
        Self::new(threshold, TriggerPolicy::OneShot)
    }

    pub fn rearming(threshold: f64) -> Self {
        Self::new(threshold, TriggerPolicy::Rearming)
    }

    /// Start tracking `element`
    ///
    /// An unset element reference is a no-op so the owner can retry on its
    /// next mount. A one-shot tracker that already fired stays detached.
    /// Returns whether the tracker is armed afterwards.
    pub fn attach(&mut self, element: Option<&ElementId>) -> bool {
        let Some(element) = element else {
            tracing::debug!("Visibility tracker attach skipped: element not mounted");
            return false;
        };

        if self.fired {
            return false;
        }

        tracing::debug!(element = %element, policy = ?self.policy, "Visibility tracker attached");
        self.state.element = Some(element.clone());
        self.state.armed = true;
        true
    }

    /// Stop reacting to entries
    pub fn detach(&mut self) {
        if self.state.armed {
            tracing::debug!(element = ?self.state.element, "Visibility tracker detached");
        }
        self.state.armed = false;
    }

    /// Feed one intersection entry
    ///
    /// Entries for other elements, or delivered while detached, are ignored.
    /// Returns the new visibility only when it changed.
    pub fn handle(&mut self, entry: &IntersectionEntry) -> Option<bool> {
        if !self.state.armed || self.state.element.as_ref() != Some(&entry.element) {
            return None;
        }

        // Judged against this tracker's own threshold, not the deliverer's
        let visible = meets_threshold(entry.ratio, self.state.threshold);
        match self.policy {
            TriggerPolicy::OneShot => {
                if visible {
                    self.state.is_visible = true;
                    self.fired = true;
                    self.detach();
                    Some(true)
                } else {
                    None
                }
            }
            TriggerPolicy::Rearming => {
                if visible == self.state.is_visible {
                    None
                } else {
                    self.state.is_visible = visible;
                    Some(visible)
                }
            }
        }
    }

    /// Feed a batch of entries in delivery order; returns the last change, if any
    pub fn handle_all<'a>(
        &mut self,
        entries: impl IntoIterator<Item = &'a IntersectionEntry>,
    ) -> Option<bool> {
        entries
            .into_iter()
            .fold(None, |changed, entry| self.handle(entry).or(changed))
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.state.is_visible
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.state.armed
    }

    pub fn threshold(&self) -> f64 {
        self.state.threshold
    }

    pub fn policy(&self) -> TriggerPolicy {
        self.policy
    }

    pub fn element(&self) -> Option<&ElementId> {
        self.state.element.as_ref()
    }

    pub fn state(&self) -> &VisibilityState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry {
            element: ElementId::from(id),
            ratio: if is_intersecting { 1.0 } else { 0.0 },
            is_intersecting,
        }
    }

    #[test]
    fn test_attach_without_element_is_noop() {
        let mut tracker = VisibilityTracker::one_shot(0.1);
        assert!(!tracker.attach(None));
        assert!(!tracker.is_armed());
        assert_eq!(tracker.handle(&entry("about", true)), None);

        // Retry on next mount succeeds
        assert!(tracker.attach(Some(&ElementId::from("about"))));
        assert_eq!(tracker.handle(&entry("about", true)), Some(true));
    }

    #[test]
    fn test_one_shot_never_reverts() {
        let mut tracker = VisibilityTracker::one_shot(0.3);
        tracker.attach(Some(&"contact".into()));

        assert_eq!(tracker.handle(&entry("contact", true)), Some(true));
        assert!(!tracker.is_armed());

        assert_eq!(tracker.handle(&entry("contact", false)), None);
        assert!(tracker.is_visible());

        // Re-attaching after firing keeps it latched and detached
        assert!(!tracker.attach(Some(&"contact".into())));
        assert_eq!(tracker.handle(&entry("contact", false)), None);
        assert!(tracker.is_visible());
    }

    #[test]
    fn test_one_shot_ignores_leave_before_enter() {
        let mut tracker = VisibilityTracker::one_shot(0.1);
        tracker.attach(Some(&"skills".into()));
        assert_eq!(tracker.handle(&entry("skills", false)), None);
        assert!(tracker.is_armed());
        assert!(!tracker.is_visible());
    }

    #[test]
    fn test_rearming_toggles() {
        let mut tracker = VisibilityTracker::rearming(0.5);
        tracker.attach(Some(&"products-title".into()));

        assert_eq!(tracker.handle(&entry("products-title", true)), Some(true));
        assert_eq!(tracker.handle(&entry("products-title", true)), None);
        assert_eq!(tracker.handle(&entry("products-title", false)), Some(false));
        assert!(!tracker.is_visible());
        assert_eq!(tracker.handle(&entry("products-title", true)), Some(true));
        assert!(tracker.is_armed());
    }

    #[test]
    fn test_foreign_entries_ignored() {
        let mut tracker = VisibilityTracker::rearming(0.1);
        tracker.attach(Some(&"services".into()));
        assert_eq!(tracker.handle(&entry("about", true)), None);
        assert!(!tracker.is_visible());
    }

    #[test]
    fn test_detached_tracker_ignores_entries() {
        let mut tracker = VisibilityTracker::rearming(0.1);
        tracker.attach(Some(&"services".into()));
        tracker.detach();
        assert_eq!(tracker.handle(&entry("services", true)), None);
    }

    #[test]
    fn test_delivery_order_independent_of_registration() {
        let mut about = VisibilityTracker::one_shot(0.1);
        let mut projects = VisibilityTracker::one_shot(0.1);
        about.attach(Some(&"about".into()));
        projects.attach(Some(&"projects".into()));

        let batch = [entry("projects", true), entry("about", true)];
        let reversed = [entry("about", true), entry("projects", true)];

        let mut about_b = about.clone();
        let mut projects_b = projects.clone();

        about.handle_all(&batch);
        projects.handle_all(&batch);
        about_b.handle_all(&reversed);
        projects_b.handle_all(&reversed);

        assert_eq!(about.state(), about_b.state());
        assert_eq!(projects.state(), projects_b.state());
        assert!(about.is_visible() && projects.is_visible());
    }

    fn partial(id: &str, ratio: f64) -> IntersectionEntry {
        IntersectionEntry {
            element: ElementId::from(id),
            ratio,
            is_intersecting: true,
        }
    }

    #[test]
    fn test_one_shot_waits_for_its_threshold() {
        let mut tracker = VisibilityTracker::one_shot(0.5);
        tracker.attach(Some(&"products-teaser".into()));

        assert_eq!(tracker.handle(&partial("products-teaser", 0.2)), None);
        assert!(!tracker.is_visible());
        assert!(tracker.is_armed());

        assert_eq!(tracker.handle(&partial("products-teaser", 0.5)), Some(true));
        assert!(tracker.is_visible());
    }

    #[test]
    fn test_rearming_reverts_below_threshold() {
        let mut tracker = VisibilityTracker::rearming(0.5);
        tracker.attach(Some(&"services-title".into()));

        assert_eq!(tracker.handle(&partial("services-title", 0.8)), Some(true));
        assert_eq!(tracker.handle(&partial("services-title", 0.3)), Some(false));
        assert_eq!(tracker.handle(&partial("services-title", 0.1)), None);
    }

    #[test]
    fn test_zero_threshold_needs_some_overlap() {
        assert!(!meets_threshold(0.0, 0.0));
        assert!(meets_threshold(0.01, 0.0));
        assert!(!meets_threshold(0.29, 0.3));
        assert!(meets_threshold(0.3, 0.3));
    }

    #[test]
    fn test_threshold_clamped() {
        assert_eq!(VisibilityTracker::one_shot(1.5).threshold(), 1.0);
        assert_eq!(VisibilityTracker::one_shot(-0.2).threshold(), 0.0);
    }
}
