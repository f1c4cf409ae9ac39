//! Shared countdown timer
//!
//! A timer is stored as a *checkpoint*: `remaining_time` is the number of
//! seconds left at the moment `start_time` was set (or right now, when the
//! timer is not running). The live value of a running timer is derived on
//! demand from the checkpoint and the anchor:
//!
//! ```text
//! remaining(now) = max(0, remaining_time - floor((now - start_time) / 1000))
//! ```
//!
//! Only `set`, `pause`, `reset` and the end-of-countdown transition rewrite the
//! checkpoint. Ticks recompute the live value without persisting it.

use crate::domain::{
    error::TimerError,
    value_object::{RoomId, Timestamp},
};

/// Longest duration accepted by [`Timer::set`] (24 hours)
pub const MAX_TIMER_SECONDS: u64 = 24 * 60 * 60;

/// Actor recorded for transitions made by the background tick
pub const SYSTEM_ACTOR: &str = "system";

/// Timer lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerStatus {
    Paused,
    Running,
    Ended,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Paused => "paused",
            TimerStatus::Running => "running",
            TimerStatus::Ended => "ended",
        }
    }
}

/// Action recorded in the timer log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerAction {
    Set,
    Start,
    Pause,
    Resume,
    Reset,
    Ended,
}

impl TimerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerAction::Set => "set",
            TimerAction::Start => "start",
            TimerAction::Pause => "pause",
            TimerAction::Resume => "resume",
            TimerAction::Reset => "reset",
            TimerAction::Ended => "timer ended",
        }
    }
}

/// One entry of the append-only timer log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerLogEntry {
    pub action: TimerAction,
    pub actor: String,
    pub timestamp: Timestamp,
}

/// Participant-issued timer command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Set { total_seconds: u64 },
    Start,
    Pause,
    Resume,
    Reset,
}

impl TimerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            TimerCommand::Set { .. } => "set",
            TimerCommand::Start => "start",
            TimerCommand::Pause => "pause",
            TimerCommand::Resume => "resume",
            TimerCommand::Reset => "reset",
        }
    }
}

/// Result of recomputing a timer during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer is paused or ended; nothing to do
    Idle,
    /// Still counting down; carries the live remaining seconds
    Running { remaining: u64 },
    /// The countdown reached zero and the timer moved to `Ended`
    Ended,
}

/// Per-room shared timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    pub room_id: RoomId,
    pub status: TimerStatus,
    /// Checkpoint in seconds (see module docs)
    pub remaining_time: u64,
    /// Anchor of the running countdown; `Some` iff `status == Running`
    pub start_time: Option<Timestamp>,
    pub last_update_by: String,
    pub log: Vec<TimerLogEntry>,
    /// Store revision, bumped by the repository on every save
    pub version: u64,
}

impl Timer {
    /// Create the initial timer of a room: paused with nothing on the clock.
    pub fn new(room_id: RoomId, created_by: impl Into<String>) -> Self {
        Self {
            room_id,
            status: TimerStatus::Paused,
            remaining_time: 0,
            start_time: None,
            last_update_by: created_by.into(),
            log: Vec::new(),
            version: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Live remaining seconds at `now`.
    pub fn remaining_at(&self, now: Timestamp) -> u64 {
        match (self.status, self.start_time) {
            (TimerStatus::Running, Some(start)) => self
                .remaining_time
                .saturating_sub(now.whole_seconds_since(start)),
            _ => self.remaining_time,
        }
    }

    /// Copy of this timer with the checkpoint replaced by the live value at `now`.
    ///
    /// Used for tick broadcasts; the copy is never written back.
    pub fn snapshot_at(&self, now: Timestamp) -> Timer {
        Timer {
            remaining_time: self.remaining_at(now),
            ..self.clone()
        }
    }

    /// Apply a participant command.
    ///
    /// Returns `Ok(true)` when the timer changed (and a log entry was appended),
    /// `Ok(false)` for a no-op such as pausing a timer that is not running.
    pub fn apply(
        &mut self,
        command: TimerCommand,
        actor: &str,
        now: Timestamp,
    ) -> Result<bool, TimerError> {
        match command {
            TimerCommand::Set { total_seconds } => self.set(total_seconds, actor, now),
            TimerCommand::Start => self.start(actor, now),
            TimerCommand::Pause => Ok(self.pause(actor, now)),
            TimerCommand::Resume => self.resume(actor, now),
            TimerCommand::Reset => Ok(self.reset(actor, now)),
        }
    }

    /// Put `total_seconds` on the clock and pause. Valid from any state.
    pub fn set(
        &mut self,
        total_seconds: u64,
        actor: &str,
        now: Timestamp,
    ) -> Result<bool, TimerError> {
        if total_seconds == 0 || total_seconds > MAX_TIMER_SECONDS {
            return Err(TimerError::InvalidDuration {
                got: total_seconds,
                max: MAX_TIMER_SECONDS,
            });
        }
        self.status = TimerStatus::Paused;
        self.remaining_time = total_seconds;
        self.start_time = None;
        self.record(TimerAction::Set, actor, now);
        Ok(true)
    }

    /// Start counting down from the checkpoint.
    ///
    /// Starting a running timer is a no-op: moving the anchor without
    /// rewriting the checkpoint would hand the room extra time.
    pub fn start(&mut self, actor: &str, now: Timestamp) -> Result<bool, TimerError> {
        self.run(TimerAction::Start, actor, now)
    }

    /// Same transition as [`Timer::start`], logged as `resume`.
    pub fn resume(&mut self, actor: &str, now: Timestamp) -> Result<bool, TimerError> {
        self.run(TimerAction::Resume, actor, now)
    }

    fn run(
        &mut self,
        action: TimerAction,
        actor: &str,
        now: Timestamp,
    ) -> Result<bool, TimerError> {
        if self.is_running() {
            return Ok(false);
        }
        if self.remaining_time == 0 {
            return Err(TimerError::NoTimeRemaining);
        }
        self.status = TimerStatus::Running;
        self.start_time = Some(now);
        self.record(action, actor, now);
        Ok(true)
    }

    /// Checkpoint the live value and stop. No-op unless running.
    pub fn pause(&mut self, actor: &str, now: Timestamp) -> bool {
        if !self.is_running() {
            return false;
        }
        self.remaining_time = self.remaining_at(now);
        self.status = TimerStatus::Paused;
        self.start_time = None;
        self.record(TimerAction::Pause, actor, now);
        true
    }

    /// Clear the clock. Valid from any state.
    pub fn reset(&mut self, actor: &str, now: Timestamp) -> bool {
        self.status = TimerStatus::Paused;
        self.remaining_time = 0;
        self.start_time = None;
        self.record(TimerAction::Reset, actor, now);
        true
    }

    /// Recompute a running timer, ending it when the countdown hits zero.
    pub fn tick(&mut self, now: Timestamp) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }
        let remaining = self.remaining_at(now);
        if remaining > 0 {
            return TickOutcome::Running { remaining };
        }
        self.status = TimerStatus::Ended;
        self.remaining_time = 0;
        self.start_time = None;
        self.record(TimerAction::Ended, SYSTEM_ACTOR, now);
        TickOutcome::Ended
    }

    fn record(&mut self, action: TimerAction, actor: &str, now: Timestamp) {
        self.last_update_by = actor.to_string();
        self.log.push(TimerLogEntry {
            action,
            actor: actor.to_string(),
            timestamp: now,
        });
    }
}
