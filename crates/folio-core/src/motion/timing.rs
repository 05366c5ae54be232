//! Progress and interpolation helpers for transitions

/// Transition progress (0.0 to 1.0) after `elapsed_ms`, honouring a start delay
///
/// Returns 0 until the delay has passed, then ramps linearly over `duration_ms`.
#[inline]
pub fn progress(elapsed_ms: f64, delay_ms: f64, duration_ms: f64) -> f64 {
    let active = elapsed_ms - delay_ms;
    if active <= 0.0 {
        return 0.0;
    }
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (active / duration_ms).clamp(0.0, 1.0)
}

/// Check if a delayed transition has finished
#[inline]
pub fn is_complete(elapsed_ms: f64, delay_ms: f64, duration_ms: f64) -> bool {
    elapsed_ms >= delay_ms + duration_ms.max(0.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Map `value` from the input range onto the output range, clamped
#[inline]
pub fn map_range(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let span = input.1 - input.0;
    if span == 0.0 {
        return output.0;
    }
    let t = ((value - input.0) / span).clamp(0.0, 1.0);
    lerp(output.0, output.1, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_with_delay() {
        assert_eq!(progress(100.0, 200.0, 1000.0), 0.0);
        assert!((progress(700.0, 200.0, 1000.0) - 0.5).abs() < 0.001);
        assert_eq!(progress(5000.0, 200.0, 1000.0), 1.0);
        assert!(is_complete(1200.0, 200.0, 1000.0));
        assert!(!is_complete(1199.0, 200.0, 1000.0));
    }

    #[test]
    fn test_progress_zero_duration() {
        assert_eq!(progress(1.0, 0.0, 0.0), 1.0);
        assert_eq!(progress(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_map_range_clamps() {
        assert!((map_range(0.5, (0.0, 1.0), (0.0, 500.0)) - 250.0).abs() < 0.001);
        assert_eq!(map_range(2.0, (0.0, 1.0), (0.0, 500.0)), 500.0);
        assert_eq!(map_range(-1.0, (0.0, 1.0), (0.0, 500.0)), 0.0);
    }
}
