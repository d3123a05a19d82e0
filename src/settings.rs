//! User-editable timer configuration.

use crate::error::TimerError;
use crate::presets::MANUAL_ENTRY;
use std::fmt;

/// Default configuration values
pub mod defaults {
    pub const TOTAL_MINUTES: u32 = 60;
    pub const ALERT_INTERVAL_MINUTES: u32 = 30;
    pub const SOUND_ENABLED: bool = true;
}

pub const MIN_TOTAL_MINUTES: u32 = 1;
pub const MAX_TOTAL_MINUTES: u32 = 24 * 60;

/// The fixed set of alert intervals offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlertInterval {
    Five,
    Ten,
    Fifteen,
    Twenty,
    TwentyFive,
    #[default]
    Thirty,
}

impl AlertInterval {
    pub const ALL: [AlertInterval; 6] = [
        AlertInterval::Five,
        AlertInterval::Ten,
        AlertInterval::Fifteen,
        AlertInterval::Twenty,
        AlertInterval::TwentyFive,
        AlertInterval::Thirty,
    ];

    pub fn minutes(self) -> u32 {
        match self {
            AlertInterval::Five => 5,
            AlertInterval::Ten => 10,
            AlertInterval::Fifteen => 15,
            AlertInterval::Twenty => 20,
            AlertInterval::TwentyFive => 25,
            AlertInterval::Thirty => 30,
        }
    }

    /// Always a whole number of minutes, so elapsed alerts land on minute boundaries.
    pub fn seconds(self) -> u32 {
        self.minutes() * 60
    }
}

impl TryFrom<u32> for AlertInterval {
    type Error = TimerError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        AlertInterval::ALL
            .into_iter()
            .find(|interval| interval.minutes() == minutes)
            .ok_or(TimerError::UnsupportedInterval(minutes))
    }
}

impl fmt::Display for AlertInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

/// Check that a duration can be handed to the countdown engine.
pub fn validate_total_minutes(minutes: u32) -> Result<u32, TimerError> {
    if (MIN_TOTAL_MINUTES..=MAX_TOTAL_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(TimerError::InvalidDuration(minutes))
    }
}

/// Configuration collected by the view. Only mutable while the countdown is stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerConfig {
    pub total_minutes: u32,
    pub alert_interval: AlertInterval,
    pub sound_enabled: bool,
    pub selected_preset: String,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            total_minutes: defaults::TOTAL_MINUTES,
            alert_interval: AlertInterval::default(),
            sound_enabled: defaults::SOUND_ENABLED,
            selected_preset: MANUAL_ENTRY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_parses_only_offered_values() {
        assert_eq!(AlertInterval::try_from(25).unwrap(), AlertInterval::TwentyFive);
        assert!(matches!(
            AlertInterval::try_from(7),
            Err(TimerError::UnsupportedInterval(7))
        ));
        let offered: Vec<u32> = AlertInterval::ALL.iter().map(|i| i.minutes()).collect();
        assert_eq!(offered, vec![5, 10, 15, 20, 25, 30]);
    }

    #[test]
    fn default_config_matches_defaults() {
        let config = TimerConfig::default();
        assert_eq!(config.total_minutes, 60);
        assert_eq!(config.alert_interval.minutes(), defaults::ALERT_INTERVAL_MINUTES);
        assert_eq!(config.selected_preset, MANUAL_ENTRY);
    }

    #[test]
    fn duration_bounds() {
        assert!(validate_total_minutes(0).is_err());
        assert_eq!(validate_total_minutes(1).unwrap(), 1);
        assert_eq!(validate_total_minutes(MAX_TOTAL_MINUTES).unwrap(), MAX_TOTAL_MINUTES);
        assert!(validate_total_minutes(MAX_TOTAL_MINUTES + 1).is_err());
    }
}
