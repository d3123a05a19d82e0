//! Exam countdown timer: preset exam durations, periodic elapsed-time alerts
//! and an optional audio cue.
//!
//! The library holds the browser-independent logic; the binary renders it
//! with Yew and owns the timers and the audio element.

pub mod alerts;
pub mod countdown;
pub mod error;
pub mod presets;
pub mod session;
pub mod settings;

pub use alerts::{check_alert, Notification};
pub use countdown::{Countdown, Tick, TimerState};
pub use error::TimerError;
pub use presets::Preset;
pub use session::{Command, Effect, ExamTimer};
pub use settings::{AlertInterval, TimerConfig};

/// Format seconds as `MM:SS`. Minutes are not capped at two digits.
pub fn format_clock(seconds: u32) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Elapsed share of the countdown as a percentage in `0.0..=100.0`.
pub fn progress_percent(elapsed_seconds: u32, total_seconds: u32) -> f64 {
    if total_seconds == 0 {
        return 0.0;
    }
    elapsed_seconds.min(total_seconds) as f64 / total_seconds as f64 * 100.0
}
