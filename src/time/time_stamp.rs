use std::str::FromStr;
use std::time::Duration;

use derive_more::Display;
use serde::{de, Deserialize};
use thiserror::Error;

use crate::time::DurationExt;

/// A wall-clock time of day without a date, as written in the time log.
#[derive(Debug, Copy, Clone, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{hour:02}:{minute:02}")]
pub struct TimeStamp {
    hour: u8,
    minute: u8,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("time is not valid, expected `HH:MM`: \"{0}\"")]
pub struct InvalidTimeStamp(String);

impl TimeStamp {
    pub fn new(hour: u8, minute: u8) -> Result<Self, InvalidTimeStamp> {
        if hour > 23 || minute > 59 {
            return Err(InvalidTimeStamp(format!("{hour:02}:{minute:02}")));
        }

        Ok(Self { hour, minute })
    }

    #[must_use]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    #[must_use]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    // the maximum TimeStamp is 23:59, which would be 23 * 60 + 59 = 1439
    #[must_use]
    fn as_minutes(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Returns the time from `self` until `later`, or `None` if `later` is
    /// before `self`.
    #[must_use]
    pub fn until(&self, later: &Self) -> Option<Duration> {
        later
            .as_minutes()
            .checked_sub(self.as_minutes())
            .map(|minutes| Duration::from_mins(minutes as u64))
    }
}

impl FromStr for TimeStamp {
    type Err = InvalidTimeStamp;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTimeStamp(string.to_string());

        let (hour, minute) = string.trim().split_once(':').ok_or_else(invalid)?;

        // `u8::from_str` would accept a leading `+`
        let is_number = |part: &str| {
            (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
        };

        if !is_number(hour) || minute.len() != 2 || !is_number(minute) {
            return Err(invalid());
        }

        let hour = hour.parse().map_err(|_| invalid())?;
        let minute = minute.parse().map_err(|_| invalid())?;

        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl<'de> Deserialize<'de> for TimeStamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}
