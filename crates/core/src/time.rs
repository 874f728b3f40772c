use std::time::Duration;

use chrono::{DateTime, Utc};

/// Default countdown for a quiz run (five minutes).
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 300;

/// Delay between picking an answer and moving to the next question.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(500);

/// Countdown resolution.
pub const TIMER_INTERVAL: Duration = Duration::from_secs(1);

/// Below this many seconds the timer is rendered as a warning.
pub const TIMER_WARNING_THRESHOLD_SECS: u32 = 60;

/// A simple clock abstraction for deterministic timestamps in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// Formats a countdown as `m:ss`.
///
/// ```
/// assert_eq!(quiz_core::time::format_time(305), "5:05");
/// ```
#[must_use]
pub fn format_time(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}

/// Formats an elapsed duration as `{m}m {s}s`.
#[must_use]
pub fn format_time_spent(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}m {remainder}s")
}

/// True when the remaining time should be highlighted.
#[must_use]
pub fn is_time_warning(seconds_left: u32) -> bool {
    seconds_left < TIMER_WARNING_THRESHOLD_SECS
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
