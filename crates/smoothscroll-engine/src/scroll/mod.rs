//! Scroll behavior of the plugin
//!
//! # Layers
//!
//! ## Atoms
//! - `easing` - Wheel easing curve
//! - `timing` - Delays, step counts and interpolation
//!
//! ## Molecules
//! - `classifier` - Collapses overlapping host signals into re-center decisions
//! - `center` - Cursor centering animation
//! - `wheel` - Mouse wheel smoothing
//!
//! Both animations schedule their frames on the plugin's
//! [`TimerQueue`](smoothscroll_core::TimerQueue), so nothing here ever waits
//! on a real clock.

// Atoms
pub mod easing;
pub mod timing;

// Molecules
pub mod center;
pub mod classifier;
pub mod wheel;

// Re-exports for convenient access
pub use center::{CenterAnimation, CenterAnimator};
pub use classifier::{Classification, Ignored, InteractionState, Motion, SelectionDecision};
pub use wheel::WheelSmoother;
