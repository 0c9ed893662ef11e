use std::time::Duration;

use derive_more::Display;
use thiserror::Error;

use crate::time::TimeStamp;

/// A same-day interval, the end is never before the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("{start} - {end}")]
pub struct TimeSpan {
    start: TimeStamp,
    end: TimeStamp,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("time span ends before it starts: {start} - {end}")]
pub struct ReversedTimeSpan {
    pub start: TimeStamp,
    pub end: TimeStamp,
}

impl TimeSpan {
    pub fn new(start: TimeStamp, end: TimeStamp) -> Result<Self, ReversedTimeSpan> {
        if end < start {
            return Err(ReversedTimeSpan { start, end });
        }

        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> TimeStamp {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> TimeStamp {
        self.end
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        // the constructor guarantees that end >= start
        self.start.until(&self.end).unwrap_or_default()
    }
}
