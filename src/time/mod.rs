use std::fmt;
use std::time::Duration;

/// Formats a duration as `HH:MM:SS`, the hours are not wrapped at 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PrettyDuration(Duration);

impl fmt::Display for PrettyDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0.hours(),
            self.0.minutes() % 60,
            self.0.seconds() % 60
        )
    }
}

impl From<Duration> for PrettyDuration {
    fn from(value: Duration) -> Self {
        Self(value)
    }
}

pub trait DurationExt {
    #[must_use]
    fn from_hours(hours: u64) -> Duration {
        Self::from_mins(hours * 60)
    }

    #[must_use]
    fn from_mins(mins: u64) -> Duration;

    #[must_use]
    fn seconds(&self) -> u64;

    #[must_use]
    fn minutes(&self) -> u64 {
        self.seconds() / 60
    }

    #[must_use]
    fn hours(&self) -> u64 {
        self.minutes() / 60
    }
}

impl DurationExt for Duration {
    fn from_mins(mins: u64) -> Duration {
        Duration::from_secs(mins * 60)
    }

    fn seconds(&self) -> u64 {
        self.as_secs()
    }
}

mod time_stamp;
pub use time_stamp::*;
mod time_span;
pub use time_span::*;
