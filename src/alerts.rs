//! Elapsed-time alerts and the transient notifications they produce.

/// How long a notification stays on screen.
pub const NOTIFICATION_LIFETIME_MS: u32 = 3_000;
/// Number of times the alert sound plays per notification.
pub const ALERT_REPEAT_COUNT: u32 = 2;

pub const FINISHED_MESSAGE: &str = "시험 종료!";

pub fn elapsed_message(elapsed_minutes: u32) -> String {
    format!("{}분 경과 확인!", elapsed_minutes)
}

/// Decide whether the current second lands on an alert boundary.
///
/// Must only be called while the countdown is running. Fires when the elapsed
/// time is a positive multiple of `interval_seconds` strictly inside the
/// countdown, never at the start and never at zero (the terminal
/// notification covers that).
pub fn check_alert(remaining_seconds: u32, total_seconds: u32, interval_seconds: u32) -> Option<String> {
    if interval_seconds == 0 || remaining_seconds == 0 || remaining_seconds >= total_seconds {
        return None;
    }
    let elapsed = total_seconds - remaining_seconds;
    if elapsed % interval_seconds == 0 {
        Some(elapsed_message(elapsed / 60))
    } else {
        None
    }
}

/// A transient banner message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Increases with every notification; used to match expiry to the banner it was scheduled for.
    pub id: u64,
    pub message: String,
    pub created_at_ms: f64,
}

impl Notification {
    pub fn expires_at_ms(&self) -> f64 {
        self.created_at_ms + NOTIFICATION_LIFETIME_MS as f64
    }

    /// Visible on `[created_at, created_at + lifetime)`.
    pub fn is_visible_at(&self, now_ms: f64) -> bool {
        now_ms >= self.created_at_ms && now_ms < self.expires_at_ms()
    }
}
