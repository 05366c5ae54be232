//! Transition curves mapping progress [0, 1] to eased progress

use serde::{Deserialize, Serialize};

/// Transition timing function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Jump to the end state when the transition completes
    None,
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
    /// Overshoots slightly before settling (letter pop-in)
    BackOut,
}

impl EasingType {
    /// Apply the easing function to a progress value
    ///
    /// `t` is clamped to [0, 1]. Every curve maps 0 to 0 and 1 to 1;
    /// `BackOut` may exceed 1 in between.
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => if t < 1.0 { 0.0 } else { 1.0 },
            EasingType::Linear => t,
            EasingType::EaseIn => t * t * t,
            EasingType::EaseOut => cubic_ease_out(t),
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            EasingType::BackOut => back_ease_out(t),
        }
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Back ease-out: overshoot then settle
#[inline]
fn back_ease_out(t: f64) -> f64 {
    const C1: f64 = 1.70158;
    const C3: f64 = C1 + 1.0;
    let u = t - 1.0;
    1.0 + C3 * u * u * u + C1 * u * u
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 6] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::EaseIn,
        EasingType::EaseOut,
        EasingType::EaseInOut,
        EasingType::BackOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert!((easing.apply(0.0) - 0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in [
            EasingType::Linear,
            EasingType::EaseIn,
            EasingType::EaseOut,
            EasingType::EaseInOut,
        ] {
            let mut prev = 0.0;
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..10)
            .map(|i| EasingType::BackOut.apply(i as f64 / 10.0))
            .fold(0.0_f64, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            easing: EasingType,
        }
        let w: Wrapper = toml::from_str("easing = \"back-out\"").unwrap();
        assert_eq!(w.easing, EasingType::BackOut);
    }
}
