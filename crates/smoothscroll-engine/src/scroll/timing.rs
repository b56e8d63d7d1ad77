//! Timing constants and pure arithmetic for scroll animations

use smoothscroll_core::Millis;

/// Delay before a selection change is evaluated
pub const SELECTION_SETTLE_MS: Millis = 10;

/// Delay between centering animation steps
pub const CENTER_STEP_MS: Millis = 5;

/// Delay between wheel animation frames (~60fps)
pub const WHEEL_FRAME_MS: Millis = 16;

/// Wheel animation length per unit of smoothness
pub const WHEEL_MS_PER_SMOOTHNESS: f64 = 100.0;

/// How long the scrollbar stays visible after the last scroll signal
pub const SCROLLBAR_FADE_MS: Millis = 500;

/// Number of centering steps for a smoothness value
///
/// `round(1 + 4 × smoothness)`, never less than one.
#[inline]
pub fn step_count(smoothness: f64) -> u32 {
    let smoothness = if smoothness.is_finite() { smoothness.max(0.0) } else { 0.0 };
    (1.0 + 4.0 * smoothness).round() as u32
}

/// Wheel animation duration for a smoothness value
#[inline]
pub fn wheel_duration(smoothness: f64) -> Millis {
    if !smoothness.is_finite() || smoothness <= 0.0 {
        return 0;
    }
    (smoothness * WHEEL_MS_PER_SMOOTHNESS).round() as Millis
}

/// Animation progress (0.0 to 1.0) at `now`
#[inline]
pub fn progress(start: Millis, now: Millis, duration: Millis) -> f64 {
    if duration == 0 {
        return 1.0;
    }
    let elapsed = now.saturating_sub(start) as f64;
    (elapsed / duration as f64).clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
