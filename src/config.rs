//! Application-level configuration constants.

use log::LevelFilter;

// Scheduling
pub const TICK_MS: u32 = 1_000;

// Assets
pub const ALERT_SOUND_URL: &str = "assets/alert.wav";

// Logging
pub const LOG_LEVEL: LevelFilter = if cfg!(debug_assertions) {
    LevelFilter::Debug
} else {
    LevelFilter::Info
};

// UI text
pub const APP_TITLE: &str = "자격증 평가 타이머";
pub const BELL: &str = "🔔";
