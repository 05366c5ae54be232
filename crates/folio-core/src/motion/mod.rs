//! Scroll-driven motion engine
//!
//! Everything here is plain state plus pure functions; nothing touches a
//! terminal or a clock directly, so the renderer decides when frames and
//! scroll events happen.
//!
//! ## Atoms
//! - `easing` - transition curves
//! - `timing` - progress and interpolation helpers
//!
//! ## Molecules
//! - `visibility` - one-shot / re-arming viewport trackers
//! - `observer` - intersection geometry that feeds the trackers
//! - `reveal` - visibility to style contract, with stagger
//! - `carousel` - autoscroll vs. drag state machine with wraparound
//! - `parallax` - per-layer scroll offsets

// Atoms
pub mod easing;
pub mod timing;

// Molecules
pub mod carousel;
pub mod observer;
pub mod parallax;
pub mod reveal;
pub mod visibility;

pub use carousel::{CarouselEngine, CarouselPhase};
pub use easing::EasingType;
pub use observer::{ElementLayout, ElementRect, IntersectionEntry, IntersectionObserver, Viewport};
pub use parallax::{ParallaxLayer, ParallaxScene, ScrollProgress};
pub use reveal::{reveal, RevealSpec, RevealStyle};
pub use visibility::{ElementId, TriggerPolicy, VisibilityState, VisibilityTracker};
