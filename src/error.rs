use std::fmt;

/// Reasons a timer command is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Duration outside the accepted minute range
    InvalidDuration(u32),
    UnsupportedInterval(u32),
    UnknownPreset(String),
    /// Configuration is frozen while the countdown runs
    LockedWhileRunning,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::InvalidDuration(minutes) => write!(
                f,
                "Invalid exam duration: {} minutes (allowed: {}-{})",
                minutes,
                crate::settings::MIN_TOTAL_MINUTES,
                crate::settings::MAX_TOTAL_MINUTES
            ),
            TimerError::UnsupportedInterval(minutes) => {
                write!(f, "Unsupported alert interval: {} minutes", minutes)
            }
            TimerError::UnknownPreset(name) => write!(f, "Unknown preset '{}'", name),
            TimerError::LockedWhileRunning => {
                write!(f, "Configuration cannot change while the countdown is running")
            }
        }
    }
}

impl std::error::Error for TimerError {}
