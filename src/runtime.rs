//! Executes the effects requested by the exam timer.
//!
//! Owns every browser resource with a lifetime: the one-second ticker, the
//! notification expiry timeout and the alert player. Each lives in an
//! `Option`; replacing or taking the value drops the old gloo handle, which
//! cancels it synchronously. No stale tick or expiry can fire after that.

use crate::audio::AlertPlayer;
use crate::config::{ALERT_SOUND_URL, TICK_MS};
use exam_timer::{Command, Effect};
use gloo_timers::callback::{Interval, Timeout};
use log::debug;
use yew::Callback;

pub struct Runtime {
    ticker: Option<Interval>,
    expiry: Option<Timeout>,
    player: AlertPlayer,
}

impl Default for Runtime {
    fn default() -> Self {
        Self {
            ticker: None,
            expiry: None,
            player: AlertPlayer::new(ALERT_SOUND_URL),
        }
    }
}

impl Runtime {
    /// Run one effect. `dispatch` feeds timer callbacks back into the controller.
    pub fn apply(&mut self, effect: Effect, dispatch: &Callback<Command>) {
        match effect {
            Effect::ArmTicker => {
                // Cancel first so two tickers never overlap.
                self.ticker = None;
                let dispatch = dispatch.clone();
                self.ticker = Some(Interval::new(TICK_MS, move || {
                    dispatch.emit(Command::Tick);
                }));
                debug!("Ticker armed");
            }
            Effect::DisarmTicker => {
                if self.ticker.take().is_some() {
                    debug!("Ticker disarmed");
                }
            }
            Effect::PlayAlert => self.player.play_sequence(),
            Effect::StopAlert => self.player.stop(),
            Effect::ScheduleExpiry { id, after_ms } => {
                self.expiry = None;
                let dispatch = dispatch.clone();
                self.expiry = Some(Timeout::new(after_ms, move || {
                    dispatch.emit(Command::ExpireNotification(id));
                }));
            }
            Effect::CancelExpiry => self.expiry = None,
        }
    }

    /// Release everything; called when the timer component unmounts.
    pub fn shutdown(&mut self) {
        self.ticker = None;
        self.expiry = None;
        self.player.stop();
        debug!("Runtime shut down");
    }
}
