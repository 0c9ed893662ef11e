use core::fmt;

use log::trace;
use serde::Deserialize;

use crate::taeti::Taeti;
use crate::time::TimeStamp;

type Predicate = dyn Fn(&Taeti) -> bool;

/// Assigns `project` and `task` to every record matching the predicate.
pub struct OverrideRule {
    predicate: Box<Predicate>,
    project: String,
    task: String,
}

impl OverrideRule {
    #[must_use]
    pub fn new(
        predicate: impl Fn(&Taeti) -> bool + 'static,
        project: impl Into<String>,
        task: impl Into<String>,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            project: project.into(),
            task: task.into(),
        }
    }

    #[must_use]
    pub fn matches(&self, taeti: &Taeti) -> bool {
        (self.predicate)(taeti)
    }

    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }
}

impl fmt::Debug for OverrideRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideRule")
            .field("project", &self.project)
            .field("task", &self.task)
            .finish_non_exhaustive()
    }
}

/// Applies the rules in order, so the last matching rule wins.
pub fn apply_overrides(taetis: &mut [Taeti], rules: &[OverrideRule]) {
    for rule in rules {
        for taeti in taetis.iter_mut().filter(|taeti| rule.matches(taeti)) {
            trace!(
                "assigning \"{}\" to {} / {}",
                taeti,
                rule.project(),
                rule.task()
            );
            taeti.assign(rule.project(), rule.task());
        }
    }
}

/// Conditions of an override rule in the config file, all present
/// conditions have to hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    starts_before: Option<TimeStamp>,
    starts_at_or_after: Option<TimeStamp>,
    ends_before: Option<TimeStamp>,
    ends_after: Option<TimeStamp>,
    description_contains: Option<String>,
    description_is: Option<String>,
    issue_id: Option<String>,
    project: Option<String>,
}

impl Condition {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    #[must_use]
    pub fn matches(&self, taeti: &Taeti) -> bool {
        self.starts_before.map_or(true, |time| taeti.start() < time)
            && self
                .starts_at_or_after
                .map_or(true, |time| taeti.start() >= time)
            && self.ends_before.map_or(true, |time| taeti.end() < time)
            && self.ends_after.map_or(true, |time| taeti.end() > time)
            && self
                .description_contains
                .as_deref()
                .map_or(true, |text| taeti.description().contains(text))
            && self
                .description_is
                .as_deref()
                .map_or(true, |text| taeti.description() == text)
            && self
                .issue_id
                .as_deref()
                .map_or(true, |id| taeti.issue_id() == Some(id))
            && self
                .project
                .as_deref()
                .map_or(true, |project| taeti.project() == Some(project))
    }

    #[must_use]
    pub fn starts_before(mut self, time: TimeStamp) -> Self {
        self.starts_before = Some(time);
        self
    }

    #[must_use]
    pub fn starts_at_or_after(mut self, time: TimeStamp) -> Self {
        self.starts_at_or_after = Some(time);
        self
    }

    #[must_use]
    pub fn ends_before(mut self, time: TimeStamp) -> Self {
        self.ends_before = Some(time);
        self
    }

    #[must_use]
    pub fn ends_after(mut self, time: TimeStamp) -> Self {
        self.ends_after = Some(time);
        self
    }

    #[must_use]
    pub fn description_contains(mut self, text: impl Into<String>) -> Self {
        self.description_contains = Some(text.into());
        self
    }

    #[must_use]
    pub fn description_is(mut self, text: impl Into<String>) -> Self {
        self.description_is = Some(text.into());
        self
    }

    #[must_use]
    pub fn issue_id(mut self, id: impl Into<String>) -> Self {
        self.issue_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    #[must_use]
    pub fn into_rule(self, project: impl Into<String>, task: impl Into<String>) -> OverrideRule {
        OverrideRule::new(move |taeti| self.matches(taeti), project, task)
    }
}
