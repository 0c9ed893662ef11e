use std::time::Duration;

use derive_more::Display;

use crate::input::{Description, IssueCatalog, TimeEntry};
use crate::time::{TimeSpan, TimeStamp};

/// A tracked time interval with the project metadata of its issue.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{time_span} {description}")]
pub struct Taeti {
    time_span: TimeSpan,
    project: Option<String>,
    task: Option<String>,
    issue_id: Option<String>,
    issue_description: Option<String>,
    description: String,
}

impl Taeti {
    #[must_use]
    pub fn new(time_span: TimeSpan, description: impl Into<String>) -> Self {
        Self {
            time_span,
            project: None,
            task: None,
            issue_id: None,
            issue_description: None,
            description: description.into(),
        }
    }

    /// Resolves the issue referenced in the description of the `entry`.
    #[must_use]
    pub fn from_entry(entry: &TimeEntry, catalog: &IssueCatalog) -> Self {
        let description = Description::resolve(entry.description());
        let mut taeti = Self::new(entry.time_span(), description.text());

        if let Some(id) = description.issue_id() {
            let issue = catalog.lookup(id);

            taeti.project = Some(issue.project().to_string());
            taeti.task = Some(issue.task().to_string());
            taeti.issue_id = Some(id.to_string());
            taeti.issue_description = issue.description().map(String::from);
        }

        taeti
    }

    #[must_use]
    pub fn time_span(&self) -> TimeSpan {
        self.time_span
    }

    #[must_use]
    pub fn start(&self) -> TimeStamp {
        self.time_span.start()
    }

    #[must_use]
    pub fn end(&self) -> TimeStamp {
        self.time_span.end()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.time_span.duration()
    }

    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    #[must_use]
    pub fn task(&self) -> Option<&str> {
        self.task.as_deref()
    }

    #[must_use]
    pub fn issue_id(&self) -> Option<&str> {
        self.issue_id.as_deref()
    }

    #[must_use]
    pub fn issue_description(&self) -> Option<&str> {
        self.issue_description.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn assign(&mut self, project: impl Into<String>, task: impl Into<String>) {
        self.project = Some(project.into());
        self.task = Some(task.into());
    }
}

/// Builds a record for every entry, keeping the order of the log.
#[must_use]
pub fn build_taetis(entries: &[TimeEntry], catalog: &IssueCatalog) -> Vec<Taeti> {
    entries
        .iter()
        .map(|entry| Taeti::from_entry(entry, catalog))
        .collect()
}
