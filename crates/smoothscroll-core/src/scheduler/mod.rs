mod timers;

pub use timers::{Millis, TimerId, TimerQueue};
