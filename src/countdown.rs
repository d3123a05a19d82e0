//! Countdown engine: owns the remaining time and advances it one second per tick.
//!
//! The engine never schedules anything itself. Whoever drives it owns the
//! periodic timer and calls [`Countdown::tick`] once per elapsed second.

use log::{debug, info};

/// Snapshot of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub running: bool,
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not running (paused, finished, or never started); nothing changed.
    Idle,
    /// One second elapsed and time remains.
    Counted { remaining_seconds: u32 },
    /// This tick brought the countdown to zero.
    Finished,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    total_seconds: u32,
    remaining_seconds: u32,
    running: bool,
}

/// Minutes to seconds, clamped at `u32::MAX`.
fn minutes_to_seconds(minutes: u32) -> u32 {
    minutes.saturating_mul(60)
}

impl Countdown {
    pub fn new(total_minutes: u32) -> Self {
        let total_seconds = minutes_to_seconds(total_minutes);
        Self {
            total_seconds,
            remaining_seconds: total_seconds,
            running: false,
        }
    }

    /// Returns `true` if the countdown transitioned to running.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining_seconds == 0 {
            return false;
        }
        self.running = true;
        debug!("Countdown started at {}s remaining", self.remaining_seconds);
        true
    }

    pub fn pause(&mut self) {
        if self.running {
            debug!("Countdown paused at {}s remaining", self.remaining_seconds);
        }
        self.running = false;
    }

    pub fn reset(&mut self, total_minutes: u32) {
        self.running = false;
        self.total_seconds = minutes_to_seconds(total_minutes);
        self.remaining_seconds = self.total_seconds;
        debug!("Countdown reset to {}s", self.total_seconds);
    }

    /// Recompute the remaining time from a new duration, discarding any partial progress.
    ///
    /// Permissive in every state; callers decide whether a running countdown may be changed.
    pub fn set_total_minutes(&mut self, total_minutes: u32) {
        self.total_seconds = minutes_to_seconds(total_minutes);
        self.remaining_seconds = self.total_seconds;
    }

    pub fn tick(&mut self) -> Tick {
        if !self.running || self.remaining_seconds == 0 {
            return Tick::Idle;
        }
        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.running = false;
            info!("Countdown finished after {}s", self.total_seconds);
            Tick::Finished
        } else {
            Tick::Counted {
                remaining_seconds: self.remaining_seconds,
            }
        }
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            remaining_seconds: self.remaining_seconds,
            running: self.running,
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.total_seconds - self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
