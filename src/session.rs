//! Exam timer controller.
//!
//! [`ExamTimer`] ties the configuration, the countdown engine and the alert
//! logic together. It consumes [`Command`]s and answers with the [`Effect`]s
//! the host must carry out (arming the one-second ticker, playing or stopping
//! the alert sound, scheduling banner expiry). It never touches a clock or a
//! browser API itself: the current time is passed in with every command.
//!
//! A `Tick` always updates the countdown first and only then runs the alert
//! check against the new remaining time.

use crate::alerts::{self, Notification, FINISHED_MESSAGE, NOTIFICATION_LIFETIME_MS};
use crate::countdown::{Countdown, Tick, TimerState};
use crate::error::TimerError;
use crate::presets::{self, MANUAL_ENTRY};
use crate::settings::{validate_total_minutes, AlertInterval, TimerConfig};
use log::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Pause,
    /// Start if stopped, pause if running.
    Toggle,
    Reset,
    /// One second has elapsed.
    Tick,
    SetTotalMinutes(u32),
    SetAlertInterval(AlertInterval),
    SetSound(bool),
    SelectPreset(String),
    /// The lifetime of notification `id` is over.
    ExpireNotification(u64),
}

/// Side effects requested from the host, in the order they must run.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Create the one-second ticker, replacing any existing one.
    ArmTicker,
    DisarmTicker,
    /// Play the alert sound sequence, stopping any sequence in flight first.
    PlayAlert,
    /// Stop playback immediately and drop any pending repeat.
    StopAlert,
    ScheduleExpiry { id: u64, after_ms: u32 },
    CancelExpiry,
}

#[derive(Debug, Clone)]
pub struct ExamTimer {
    config: TimerConfig,
    countdown: Countdown,
    notification: Option<Notification>,
    next_notification_id: u64,
}

impl Default for ExamTimer {
    fn default() -> Self {
        Self::with_checked_config(TimerConfig::default())
    }
}

impl ExamTimer {
    /// Build a timer from a configuration, rejecting durations outside the
    /// accepted range and presets missing from the catalog.
    pub fn new(config: TimerConfig) -> Result<Self, TimerError> {
        validate_total_minutes(config.total_minutes)?;
        if presets::find(&config.selected_preset).is_none() {
            return Err(TimerError::UnknownPreset(config.selected_preset));
        }
        Ok(Self::with_checked_config(config))
    }

    fn with_checked_config(config: TimerConfig) -> Self {
        let countdown = Countdown::new(config.total_minutes);
        Self {
            config,
            countdown,
            notification: None,
            next_notification_id: 1,
        }
    }

    pub fn handle(&mut self, command: Command, now_ms: f64) -> Result<Vec<Effect>, TimerError> {
        match command {
            Command::Start => Ok(self.start()),
            Command::Pause => Ok(self.pause()),
            Command::Toggle => {
                if self.countdown.is_running() {
                    Ok(self.pause())
                } else {
                    Ok(self.start())
                }
            }
            Command::Reset => Ok(self.reset()),
            Command::Tick => Ok(self.tick(now_ms)),
            Command::SetTotalMinutes(minutes) => {
                self.ensure_stopped()?;
                let minutes = validate_total_minutes(minutes)?;
                let preset_matches = presets::find(&self.config.selected_preset)
                    .is_some_and(|p| p.duration_minutes == minutes);
                if !preset_matches {
                    self.config.selected_preset = MANUAL_ENTRY.to_string();
                }
                self.apply_total_minutes(minutes);
                Ok(Vec::new())
            }
            Command::SetAlertInterval(interval) => {
                self.ensure_stopped()?;
                self.config.alert_interval = interval;
                debug!("Alert interval set to {} minutes", interval);
                Ok(Vec::new())
            }
            Command::SetSound(enabled) => {
                // A sequence already playing is left to finish.
                self.config.sound_enabled = enabled;
                debug!("Alert sound {}", if enabled { "enabled" } else { "disabled" });
                Ok(Vec::new())
            }
            Command::SelectPreset(name) => {
                self.ensure_stopped()?;
                let preset = presets::find(&name).ok_or(TimerError::UnknownPreset(name))?;
                let minutes = validate_total_minutes(preset.duration_minutes)?;
                self.config.selected_preset = preset.name.clone();
                self.apply_total_minutes(minutes);
                info!("Preset '{}' selected ({} minutes)", preset.name, minutes);
                Ok(Vec::new())
            }
            Command::ExpireNotification(id) => {
                if self.notification.as_ref().is_some_and(|n| n.id == id) {
                    self.notification = None;
                }
                Ok(Vec::new())
            }
        }
    }

    fn ensure_stopped(&self) -> Result<(), TimerError> {
        if self.countdown.is_running() {
            Err(TimerError::LockedWhileRunning)
        } else {
            Ok(())
        }
    }

    fn apply_total_minutes(&mut self, minutes: u32) {
        self.config.total_minutes = minutes;
        self.countdown.set_total_minutes(minutes);
    }

    fn start(&mut self) -> Vec<Effect> {
        if self.countdown.start() {
            vec![Effect::ArmTicker]
        } else {
            Vec::new()
        }
    }

    fn pause(&mut self) -> Vec<Effect> {
        self.countdown.pause();
        vec![Effect::DisarmTicker]
    }

    fn reset(&mut self) -> Vec<Effect> {
        self.countdown.reset(self.config.total_minutes);
        self.notification = None;
        vec![Effect::DisarmTicker, Effect::StopAlert, Effect::CancelExpiry]
    }

    fn tick(&mut self, now_ms: f64) -> Vec<Effect> {
        match self.countdown.tick() {
            Tick::Idle => Vec::new(),
            Tick::Finished => {
                let mut effects = vec![Effect::DisarmTicker];
                effects.extend(self.notify(FINISHED_MESSAGE.to_string(), now_ms));
                effects
            }
            Tick::Counted { remaining_seconds } => alerts::check_alert(
                remaining_seconds,
                self.countdown.total_seconds(),
                self.config.alert_interval.seconds(),
            )
            .map(|message| self.notify(message, now_ms))
            .unwrap_or_default(),
        }
    }

    fn notify(&mut self, message: String, now_ms: f64) -> Vec<Effect> {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        info!("Notification #{}: {}", id, message);
        self.notification = Some(Notification {
            id,
            message,
            created_at_ms: now_ms,
        });

        let mut effects = vec![Effect::ScheduleExpiry {
            id,
            after_ms: NOTIFICATION_LIFETIME_MS,
        }];
        if self.config.sound_enabled {
            effects.push(Effect::PlayAlert);
        }
        effects
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn state(&self) -> TimerState {
        self.countdown.state()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.countdown.remaining_seconds()
    }

    pub fn total_seconds(&self) -> u32 {
        self.countdown.total_seconds()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.countdown.elapsed_seconds()
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    /// The latest notification, whether or not its display window has passed.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// The notification to show at `now_ms`: present and inside its display window.
    pub fn visible_notification(&self, now_ms: f64) -> Option<&Notification> {
        self.notification
            .as_ref()
            .filter(|note| note.is_visible_at(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: f64 = 1_000_000.0;

    /// Drive `ticks` seconds, collecting every notification raised along the way.
    fn run(timer: &mut ExamTimer, ticks: u32) -> Vec<(u32, String, Vec<Effect>)> {
        let mut raised = Vec::new();
        for i in 0..ticks {
            let before = timer.notification().map(|n| n.id);
            let effects = timer.handle(Command::Tick, T0 + f64::from(i + 1) * 1000.0).unwrap();
            if let Some(note) = timer.notification() {
                if Some(note.id) != before {
                    raised.push((timer.elapsed_seconds(), note.message.clone(), effects));
                }
            }
        }
        raised
    }

    #[test]
    fn scenario_half_time_and_finish() {
        let mut timer = ExamTimer::default();
        timer.handle(Command::SetTotalMinutes(60), T0).unwrap();
        timer
            .handle(Command::SetAlertInterval(AlertInterval::Thirty), T0)
            .unwrap();
        assert_eq!(timer.handle(Command::Start, T0).unwrap(), vec![Effect::ArmTicker]);

        let raised = run(&mut timer, 3600);
        let summary: Vec<(u32, &str)> = raised.iter().map(|(e, m, _)| (*e, m.as_str())).collect();
        assert_eq!(summary, vec![(1800, "30분 경과 확인!"), (3600, "시험 종료!")]);

        let terminal = &raised[1].2;
        assert_eq!(terminal[0], Effect::DisarmTicker);
        assert!(terminal.contains(&Effect::PlayAlert));
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 0);

        // Inert until reset.
        assert!(timer.handle(Command::Tick, T0).unwrap().is_empty());
        assert!(timer.handle(Command::Start, T0).unwrap().is_empty());
    }

    #[test]
    fn scenario_preset_selection() {
        let mut timer = ExamTimer::default();
        timer.handle(Command::SelectPreset("SQLD".into()), T0).unwrap();
        assert_eq!(timer.config().total_minutes, 90);
        assert_eq!(timer.config().selected_preset, "SQLD");
        assert_eq!(timer.remaining_seconds(), 5400);
        assert!(!timer.is_running());
    }

    #[test]
    fn scenario_pause_then_reset() {
        let mut timer = ExamTimer::default();
        timer.handle(Command::Start, T0).unwrap();
        run(&mut timer, 100);
        assert_eq!(timer.handle(Command::Pause, T0).unwrap(), vec![Effect::DisarmTicker]);
        assert_eq!(timer.remaining_seconds(), 3500);

        let effects = timer.handle(Command::Reset, T0).unwrap();
        assert_eq!(
            effects,
            vec![Effect::DisarmTicker, Effect::StopAlert, Effect::CancelExpiry]
        );
        assert_eq!(timer.remaining_seconds(), 3600);
        assert!(timer.notification().is_none());
        assert!(!timer.is_running());
    }

    #[test]
    fn scenario_sound_disabled_still_shows_banner() {
        let mut timer = ExamTimer::default();
        timer.handle(Command::SetTotalMinutes(10), T0).unwrap();
        timer.handle(Command::SetAlertInterval(AlertInterval::Five), T0).unwrap();
        timer.handle(Command::SetSound(false), T0).unwrap();
        timer.handle(Command::Start, T0).unwrap();

        let raised = run(&mut timer, 600);
        assert_eq!(raised.len(), 2);
        for (_, _, effects) in &raised {
            assert!(!effects.contains(&Effect::PlayAlert));
            assert!(effects
                .iter()
                .any(|e| matches!(e, Effect::ScheduleExpiry { after_ms: 3000, .. })));
        }
    }

    #[test]
    fn toggling_sound_while_running_is_allowed() {
        let mut timer = ExamTimer::default();
        timer.handle(Command::Start, T0).unwrap();
        assert!(timer.handle(Command::SetSound(false), T0).unwrap().is_empty());
        assert!(!timer.config().sound_enabled);
    }

    #[test]
    fn configuration_is_locked_while_running() {
        let mut timer = ExamTimer::default();
        timer.handle(Command::Toggle, T0).unwrap();
        assert!(timer.is_running());
        assert_eq!(
            timer.handle(Command::SetTotalMinutes(30), T0),
            Err(TimerError::LockedWhileRunning)
        );
        assert_eq!(
            timer.handle(Command::SetAlertInterval(AlertInterval::Ten), T0),
            Err(TimerError::LockedWhileRunning)
        );
        assert_eq!(
            timer.handle(Command::SelectPreset("SQLP".into()), T0),
            Err(TimerError::LockedWhileRunning)
        );
        assert_eq!(timer.config().total_minutes, 60);
        assert_eq!(timer.handle(Command::Toggle, T0).unwrap(), vec![Effect::DisarmTicker]);
        assert!(!timer.is_running());
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let mut timer = ExamTimer::default();
        assert_eq!(
            timer.handle(Command::SetTotalMinutes(0), T0),
            Err(TimerError::InvalidDuration(0))
        );
        assert_eq!(
            timer.handle(Command::SelectPreset("nope".into()), T0),
            Err(TimerError::UnknownPreset("nope".into()))
        );
        assert_eq!(timer.config().total_minutes, 60);
    }

    #[test]
    fn editing_duration_discards_paused_progress() {
        let mut timer = ExamTimer::default();
        timer.handle(Command::Start, T0).unwrap();
        run(&mut timer, 42);
        timer.handle(Command::Pause, T0).unwrap();
        timer.handle(Command::SetTotalMinutes(45), T0).unwrap();
        assert_eq!(timer.remaining_seconds(), 45 * 60);
    }

    #[test]
    fn manual_duration_moves_selection_to_manual_entry() {
        let mut timer = ExamTimer::default();
        timer.handle(Command::SelectPreset("SQLD".into()), T0).unwrap();
        timer.handle(Command::SetTotalMinutes(90), T0).unwrap();
        assert_eq!(timer.config().selected_preset, "SQLD");
        timer.handle(Command::SetTotalMinutes(95), T0).unwrap();
        assert_eq!(timer.config().selected_preset, MANUAL_ENTRY);
    }

    #[test]
    fn newer_notification_replaces_older_and_ignores_stale_expiry() {
        let mut timer = ExamTimer::default();
        timer.handle(Command::SetTotalMinutes(15), T0).unwrap();
        timer.handle(Command::SetAlertInterval(AlertInterval::Five), T0).unwrap();
        timer.handle(Command::Start, T0).unwrap();

        run(&mut timer, 300);
        let first = timer.notification().cloned().unwrap();
        assert_eq!(first.message, "5분 경과 확인!");
        assert_eq!(
            timer.visible_notification(first.created_at_ms + 2_999.0),
            Some(&first)
        );
        assert!(timer.visible_notification(first.expires_at_ms()).is_none());

        run(&mut timer, 300);
        let second = timer.notification().cloned().unwrap();
        assert!(second.id > first.id);

        timer.handle(Command::ExpireNotification(first.id), T0).unwrap();
        assert_eq!(timer.notification(), Some(&second));
        timer.handle(Command::ExpireNotification(second.id), T0).unwrap();
        assert!(timer.notification().is_none());
    }

    #[test]
    fn constructor_validates_configuration() {
        let zero = TimerConfig {
            total_minutes: 0,
            ..TimerConfig::default()
        };
        assert!(matches!(
            ExamTimer::new(zero),
            Err(TimerError::InvalidDuration(0))
        ));

        let huge = TimerConfig {
            total_minutes: 71_582_789,
            ..TimerConfig::default()
        };
        assert!(matches!(
            ExamTimer::new(huge),
            Err(TimerError::InvalidDuration(71_582_789))
        ));

        let unknown = TimerConfig {
            selected_preset: "SQLX".into(),
            ..TimerConfig::default()
        };
        assert!(matches!(
            ExamTimer::new(unknown),
            Err(TimerError::UnknownPreset(name)) if name == "SQLX"
        ));

        let sqld = TimerConfig {
            total_minutes: 90,
            selected_preset: "SQLD".into(),
            ..TimerConfig::default()
        };
        let timer = ExamTimer::new(sqld).unwrap();
        assert_eq!(timer.remaining_seconds(), 5400);
        assert!(!timer.is_running());
    }

    #[test]
    fn banner_shows_for_three_seconds_then_expires() {
        let mut timer = ExamTimer::default();
        timer.handle(Command::SetTotalMinutes(5), T0).unwrap();
        timer.handle(Command::SetAlertInterval(AlertInterval::Five), T0).unwrap();
        timer.handle(Command::Start, T0).unwrap();

        for _ in 0..299 {
            timer.handle(Command::Tick, T0).unwrap();
        }
        let finished_at = T0 + 300_000.0;
        let effects = timer.handle(Command::Tick, finished_at).unwrap();
        let id = timer.notification().map(|n| n.id).unwrap();
        assert!(effects.contains(&Effect::ScheduleExpiry { id, after_ms: 3000 }));

        assert!(timer.visible_notification(finished_at - 1.0).is_none());
        assert_eq!(
            timer.visible_notification(finished_at).map(|n| n.message.as_str()),
            Some("시험 종료!")
        );
        assert!(timer.visible_notification(finished_at + 2_999.0).is_some());
        assert!(timer.visible_notification(finished_at + 3_000.0).is_none());

        timer.handle(Command::ExpireNotification(id), finished_at + 3_000.0).unwrap();
        assert!(timer.notification().is_none());
        assert!(timer.visible_notification(finished_at + 1_000.0).is_none());
    }

    #[test]
    fn start_while_running_does_not_rearm() {
        let mut timer = ExamTimer::default();
        assert_eq!(timer.handle(Command::Start, T0).unwrap(), vec![Effect::ArmTicker]);
        assert!(timer.handle(Command::Start, T0).unwrap().is_empty());
    }

    #[test]
    fn elapsed_never_decreases_while_running() {
        let mut timer = ExamTimer::default();
        timer.handle(Command::SetTotalMinutes(3), T0).unwrap();
        timer.handle(Command::Start, T0).unwrap();
        let mut last_elapsed = 0;
        while timer.is_running() {
            timer.handle(Command::Tick, T0).unwrap();
            let elapsed = timer.elapsed_seconds();
            assert_eq!(elapsed, last_elapsed + 1);
            assert_eq!(timer.state().remaining_seconds, 180 - elapsed);
            last_elapsed = elapsed;
        }
        assert_eq!(last_elapsed, 180);
    }
}
