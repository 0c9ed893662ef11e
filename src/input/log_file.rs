use std::io;
use std::io::BufRead;
use std::path::Path;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use thiserror::Error;

use crate::time::{InvalidTimeStamp, TimeSpan, TimeStamp};
use crate::utils;

// columns of the log are aligned with two or more whitespace characters
static COLUMN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("hardcoded regex should be valid"));

/// A single line of the time log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    time_span: TimeSpan,
    description: String,
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error("corrupt entry in line {line_number}: \"{line}\"")]
    CorruptEntry { line_number: usize, line: String },
    #[error("invalid time in line {line_number}")]
    InvalidTime {
        line_number: usize,
        #[source]
        source: InvalidTimeStamp,
    },
    #[error("entry in line {line_number} ends before it starts: {start} - {end}")]
    ReversedSpan {
        line_number: usize,
        start: TimeStamp,
        end: TimeStamp,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl TimeEntry {
    #[must_use]
    pub fn new(time_span: TimeSpan, description: impl Into<String>) -> Self {
        Self {
            time_span,
            description: description.into(),
        }
    }

    /// Parses `<start>  <end>  <description>`, where `line_number` is only
    /// used for diagnostics.
    pub fn parse_line(line: &str, line_number: usize) -> Result<Self, LogError> {
        let mut columns = COLUMN_SEPARATOR.splitn(line.trim_end(), 3);

        let (Some(start), Some(end), Some(description)) =
            (columns.next(), columns.next(), columns.next())
        else {
            return Err(LogError::CorruptEntry {
                line_number,
                line: line.to_string(),
            });
        };

        let parse_time = |string: &str| {
            string
                .parse::<TimeStamp>()
                .map_err(|source| LogError::InvalidTime {
                    line_number,
                    source,
                })
        };

        let start = parse_time(start)?;
        let end = parse_time(end)?;

        let time_span = TimeSpan::new(start, end).map_err(|error| LogError::ReversedSpan {
            line_number,
            start: error.start,
            end: error.end,
        })?;

        Ok(Self::new(time_span, description.trim()))
    }

    #[must_use]
    pub fn time_span(&self) -> TimeSpan {
        self.time_span
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Reads all entries of a time log, blank lines are skipped.
pub fn parse_log(reader: impl BufRead) -> Result<Vec<TimeEntry>, LogError> {
    let mut entries = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;

        if line.trim().is_empty() {
            continue;
        }

        entries.push(TimeEntry::parse_line(&line, index + 1)?);
    }

    debug!("read {} time entries", entries.len());

    Ok(entries)
}

pub fn parse_log_file(path: impl AsRef<Path>) -> Result<Vec<TimeEntry>, LogError> {
    let data = utils::read_to_string(path)?;

    parse_log(data.as_bytes())
}
