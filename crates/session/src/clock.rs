//! Per-side countdown clocks.

use std::fmt;
use std::time::{Duration, Instant};

use game_core::Color;

/// Time control settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSettings {
    /// Starting time per side
    pub initial: Duration,
    /// Added to the mover's clock after each move
    pub increment: Duration,
}

impl TimeSettings {
    pub fn new(initial_secs: u64, increment_secs: u64) -> Self {
        Self {
            initial: Duration::from_secs(initial_secs),
            increment: Duration::from_secs(increment_secs),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(0, 0)
    }

    pub fn is_unlimited(&self) -> bool {
        self.initial.is_zero()
    }
}

impl fmt::Display for TimeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            write!(f, "Unlimited")
        } else {
            let mins = self.initial.as_secs() / 60;
            write!(f, "{}+{}", mins, self.increment.as_secs())
        }
    }
}

/// Two countdown clocks, at most one running.
///
/// Elapsed time is charged to the running side whenever the clock changes
/// hands, pauses, or is read.
#[derive(Debug, Clone)]
pub struct ChessClock {
    settings: TimeSettings,
    remaining: [Duration; 2],
    /// When the running side's clock last (re)started; None while paused
    started_at: Option<Instant>,
    running_for: Option<Color>,
    enabled: bool,
}

impl Default for ChessClock {
    fn default() -> Self {
        Self::new(TimeSettings::unlimited())
    }
}

impl ChessClock {
    pub fn new(settings: TimeSettings) -> Self {
        Self {
            settings,
            remaining: [settings.initial; 2],
            started_at: None,
            running_for: None,
            enabled: !settings.is_unlimited(),
        }
    }

    pub fn settings(&self) -> TimeSettings {
        self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn running_for(&self) -> Option<Color> {
        self.running_for
    }

    pub fn is_paused(&self) -> bool {
        self.running_for.is_some() && self.started_at.is_none()
    }

    fn settle(&mut self) {
        if let (Some(started), Some(color)) = (self.started_at.take(), self.running_for) {
            let left = &mut self.remaining[color.idx()];
            *left = left.saturating_sub(started.elapsed());
        }
    }

    /// Start `color`'s clock, stopping the other one without increment.
    pub fn start(&mut self, color: Color) {
        if !self.enabled {
            return;
        }
        self.settle();
        self.running_for = Some(color);
        self.started_at = Some(Instant::now());
    }

    /// Stop the clock after a move and credit the mover's increment.
    pub fn stop_and_increment(&mut self) {
        if !self.enabled {
            return;
        }
        self.settle();
        if let Some(color) = self.running_for.take() {
            self.remaining[color.idx()] += self.settings.increment;
        }
    }

    /// Stop without increment (game over).
    pub fn stop(&mut self) {
        self.settle();
        self.running_for = None;
    }

    pub fn pause(&mut self) {
        self.settle();
    }

    pub fn resume(&mut self) {
        if self.enabled && self.running_for.is_some() && self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    /// Remaining time for a side, counting the running period.
    pub fn remaining_time(&self, color: Color) -> Duration {
        let base = self.remaining[color.idx()];
        let elapsed = match (self.running_for, self.started_at) {
            (Some(running), Some(started)) if running == color => started.elapsed(),
            _ => Duration::ZERO,
        };
        base.saturating_sub(elapsed)
    }

    pub fn is_timeout(&self, color: Color) -> bool {
        self.enabled && self.remaining_time(color).is_zero()
    }

    /// The side whose time ran out, if any. Only a running clock can flag.
    pub fn flagged(&self) -> Option<Color> {
        self.running_for.filter(|&c| self.is_timeout(c))
    }

    /// `m:ss`, with tenths of a second once under ten seconds.
    pub fn format_time(duration: Duration) -> String {
        let millis = duration.as_millis();
        let (mins, secs) = (millis / 60_000, millis / 1000 % 60);
        if millis < 10_000 {
            format!("{mins}:{secs:02}.{}", millis / 100 % 10)
        } else {
            format!("{mins}:{secs:02}")
        }
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod clock_tests;
