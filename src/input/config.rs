use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

use crate::overrides::{Condition, OverrideRule};
use crate::report::Style;
use crate::utils;

/// The contents of the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    issues: PathBuf,
    log: PathBuf,
    default_project: String,
    #[serde(default)]
    default_task: String,
    #[serde(default)]
    print_order: Vec<String>,
    #[serde(default = "default_color")]
    color: bool,
    #[serde(default, rename = "override")]
    overrides: Vec<Override>,
}

fn default_color() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Override {
    project: String,
    #[serde(default)]
    task: String,
    when: Condition,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("override {index} for project \"{project}\" has no conditions and would match everything")]
    EmptyCondition { index: usize, project: String },
    #[error("project \"{0}\" is listed more than once in the print order")]
    DuplicatePrintOrder(String),
}

#[derive(Debug)]
pub struct Config {
    issues: PathBuf,
    log: PathBuf,
    default_project: String,
    default_task: String,
    print_order: Vec<String>,
    style: Style,
    overrides: Vec<OverrideRule>,
}

pub struct ConfigBuilder {
    workspace: Option<PathBuf>,
    file: ConfigFile,
    issues: Option<PathBuf>,
    log: Option<PathBuf>,
    color: Option<bool>,
}

impl ConfigBuilder {
    fn new(file: ConfigFile) -> Self {
        Self {
            workspace: None,
            file,
            issues: None,
            log: None,
            color: None,
        }
    }

    /// Replaces the issue table of the config file.
    pub fn issues(&mut self, issues: impl Into<PathBuf>) -> &mut Self {
        self.issues = Some(issues.into());
        self
    }

    /// Replaces the time log of the config file.
    pub fn log(&mut self, log: impl Into<PathBuf>) -> &mut Self {
        self.log = Some(log.into());
        self
    }

    pub fn color(&mut self, color: bool) -> &mut Self {
        self.color = Some(color);
        self
    }

    /// Paths in the config file are relative to the `workspace`.
    pub fn workspace(&mut self, workspace: impl Into<PathBuf>) -> &mut Self {
        self.workspace = Some(workspace.into());
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let file = self.file;

        let mut print_order: Vec<String> = Vec::with_capacity(file.print_order.len());
        for project in file.print_order {
            if print_order.contains(&project) {
                return Err(ConfigError::DuplicatePrintOrder(project));
            }
            print_order.push(project);
        }

        let overrides = file
            .overrides
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                if entry.when.is_empty() {
                    return Err(ConfigError::EmptyCondition {
                        index,
                        project: entry.project,
                    });
                }

                Ok(entry.when.into_rule(entry.project, entry.task))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let resolve = |path: PathBuf| match &self.workspace {
            Some(workspace) => workspace.join(path),
            None => path,
        };

        // paths passed on the command line are not relative to the config file
        let issues = self.issues.unwrap_or_else(|| resolve(file.issues));
        let log = self.log.unwrap_or_else(|| resolve(file.log));

        Ok(Config {
            issues,
            log,
            default_project: file.default_project,
            default_task: file.default_task,
            print_order,
            style: Style::new(self.color.unwrap_or(file.color)),
            overrides,
        })
    }
}

impl Config {
    pub fn from_toml(file: ConfigFile) -> ConfigBuilder {
        ConfigBuilder::new(file)
    }

    /// Reads the config file, its directory becomes the workspace.
    pub fn try_from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<ConfigBuilder> {
        let path = path.as_ref();

        let file: ConfigFile = utils::toml_from_reader(
            File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?,
        )
        .with_context(|| format!("failed to parse `{}`", path.display()))?;

        let workspace = dunce::canonicalize(path)?
            .parent()
            .ok_or_else(|| anyhow::anyhow!("config should have a parent directory"))?
            .to_path_buf();

        let mut builder = Self::from_toml(file);
        builder.workspace(workspace);

        Ok(builder)
    }

    #[must_use]
    pub fn issues(&self) -> &Path {
        &self.issues
    }

    #[must_use]
    pub fn log(&self) -> &Path {
        &self.log
    }

    #[must_use]
    pub fn default_project(&self) -> &str {
        &self.default_project
    }

    #[must_use]
    pub fn default_task(&self) -> &str {
        &self.default_task
    }

    #[must_use]
    pub fn print_order(&self) -> &[String] {
        &self.print_order
    }

    #[must_use]
    pub fn style(&self) -> Style {
        self.style
    }

    #[must_use]
    pub fn overrides(&self) -> &[OverrideRule] {
        &self.overrides
    }
}
