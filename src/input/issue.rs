use std::borrow::Cow;
use std::collections::HashMap;
use std::io;
use std::io::Read;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::utils;

/// Project metadata of a tracked issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    id: Option<String>,
    project: String,
    task: String,
    description: Option<String>,
}

impl Issue {
    #[must_use]
    pub fn new(
        id: Option<String>,
        project: impl Into<String>,
        task: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id,
            project: project.into(),
            task: task.into(),
            description,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid issue in row {row}, expected `id,project[,task[,description]]`: {record:?}")]
    InvalidRecord { row: usize, record: Vec<String> },
    #[error("failed to read issue table")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Maps issue ids to their metadata, unknown ids resolve to a default issue.
#[derive(Debug, Clone)]
pub struct IssueCatalog {
    issues: HashMap<String, Issue>,
    default_project: String,
    default_task: String,
}

impl IssueCatalog {
    #[must_use]
    pub fn new(default_project: impl Into<String>, default_task: impl Into<String>) -> Self {
        Self {
            issues: HashMap::new(),
            default_project: default_project.into(),
            default_task: default_task.into(),
        }
    }

    /// Reads the rows `id,project[,task[,description]]` of a header-less
    /// comma separated table.
    pub fn from_reader(
        reader: impl Read,
        default_project: impl Into<String>,
        default_task: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(default_project, default_task);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        for (index, record) in reader.records().enumerate() {
            let record = record?;

            let (Some(id), Some(project)) = (record.get(0), record.get(1)) else {
                return Err(CatalogError::InvalidRecord {
                    row: record
                        .position()
                        .map_or(index + 1, |position| position.line() as usize),
                    record: record.iter().map(String::from).collect(),
                });
            };

            let issue = Issue::new(
                Some(id.to_string()),
                project,
                record.get(2).unwrap_or_default(),
                Some(record.get(3).unwrap_or_default().to_string()),
            );

            catalog.insert(issue);
        }

        debug!("read {} issues", catalog.len());

        Ok(catalog)
    }

    pub fn from_file(
        path: impl AsRef<Path>,
        default_project: impl Into<String>,
        default_task: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let data = utils::read_to_string(path)?;

        Self::from_reader(data.as_bytes(), default_project, default_task)
    }

    /// Adds the issue, replacing an earlier one with the same id.
    ///
    /// Issues without an id can never be looked up and are ignored.
    pub fn insert(&mut self, issue: Issue) {
        if let Some(id) = issue.id.clone() {
            self.issues.insert(id, issue);
        }
    }

    /// Returns the issue with the `id` or a fresh default issue carrying
    /// the requested `id` and no description.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Cow<'_, Issue> {
        match self.issues.get(id) {
            Some(issue) => Cow::Borrowed(issue),
            None => Cow::Owned(Issue::new(
                Some(id.to_string()),
                self.default_project.as_str(),
                self.default_task.as_str(),
                None,
            )),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
