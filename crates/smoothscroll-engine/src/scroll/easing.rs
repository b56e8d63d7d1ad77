//! Easing curve for wheel animations
//!
//! Maps progress in [0, 1] to eased progress in [0, 1].

/// Cubic ease-out: f(t) = 1 - (1-t)³
///
/// Fast start, gentle landing. Input is clamped to [0, 1].
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_boundaries() {
        assert!(ease_out_cubic(0.0).abs() < 0.001);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < 0.001);
        assert!((ease_out_cubic(7.0) - 1.0).abs() < 0.001);
        assert!(ease_out_cubic(-3.0).abs() < 0.001);
    }

    #[test]
    fn test_easing_monotonic() {
        let mut prev = 0.0;
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let v = ease_out_cubic(t);
            assert!(v >= prev, "not monotonic at t={}", t);
            prev = v;
        }
    }

    #[test]
    fn test_cubic_front_loaded() {
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-9);
        assert!(ease_out_cubic(0.25) > 0.25);
    }
}
