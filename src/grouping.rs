use std::time::Duration;

use indexmap::IndexMap;

use crate::taeti::Taeti;

/// An attribute of a [`Taeti`] that records can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupBy {
    Project,
    Task,
    IssueDescription,
    IssueId,
}

impl GroupBy {
    /// The levels of the report, from the outermost to the innermost.
    pub const LEVELS: [Self; 4] = [
        Self::Project,
        Self::Task,
        Self::IssueDescription,
        Self::IssueId,
    ];

    #[must_use]
    pub fn key<'a>(&self, taeti: &'a Taeti) -> Option<&'a str> {
        match self {
            Self::Project => taeti.project(),
            Self::Task => taeti.task(),
            Self::IssueDescription => taeti.issue_description(),
            Self::IssueId => taeti.issue_id(),
        }
    }
}

/// Groups are keyed by the attribute value, `None` if it is absent.
pub type Groups<'a> = IndexMap<Option<&'a str>, Group<'a>>;

/// All records sharing the same attribute values down to this level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group<'a> {
    taetis: Vec<&'a Taeti>,
    groups: Groups<'a>,
    duration: Duration,
}

impl<'a> Group<'a> {
    /// Partitions the `taetis` by the first attribute, then each partition by
    /// the remaining ones. Groups are kept in the order they were first seen.
    #[must_use]
    pub fn new(taetis: impl IntoIterator<Item = &'a Taeti>, attributes: &[GroupBy]) -> Self {
        let mut root = Self::default();

        for taeti in taetis {
            root.push(taeti);
        }

        root.groups = group_by(&root.taetis, attributes);
        root
    }

    fn push(&mut self, taeti: &'a Taeti) {
        self.duration += taeti.duration();
        self.taetis.push(taeti);
    }

    /// Every record below this group, in the order of the log.
    #[must_use]
    pub fn taetis(&self) -> &[&'a Taeti] {
        &self.taetis
    }

    #[must_use]
    pub fn groups(&self) -> &Groups<'a> {
        &self.groups
    }

    #[must_use]
    pub fn get(&self, key: Option<&str>) -> Option<&Group<'a>> {
        self.groups
            .iter()
            .find_map(|(group_key, group)| (*group_key == key).then_some(group))
    }

    /// The summed duration of all records below this group.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.groups.is_empty()
    }
}

fn group_by<'a>(taetis: &[&'a Taeti], attributes: &[GroupBy]) -> Groups<'a> {
    let Some((attribute, rest)) = attributes.split_first() else {
        return Groups::new();
    };

    let mut groups = Groups::new();
    for &taeti in taetis {
        groups.entry(attribute.key(taeti)).or_default().push(taeti);
    }

    for group in groups.values_mut() {
        group.groups = group_by(&group.taetis, rest);
    }

    groups
}

/// Groups the records by project, task, issue description and issue id.
#[must_use]
pub fn group_taetis(taetis: &[Taeti]) -> Group<'_> {
    Group::new(taetis, &GroupBy::LEVELS)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::input::{IssueCatalog, TimeEntry};
    use crate::taeti::build_taetis;
    use crate::time::{DurationExt, TimeSpan, TimeStamp};
    use crate::time_stamp;

    fn taetis(entries: &[(TimeStamp, TimeStamp, &str)]) -> Vec<Taeti> {
        let catalog = IssueCatalog::from_reader(
            concat!(
                "1,Alpha,Design,Widget\n",
                "2,Alpha,Design,Gadget\n",
                "3,Alpha,Review\n",
                "4,Beta,,Widget\n",
            )
            .as_bytes(),
            "Misc",
            "",
        )
        .unwrap();

        let entries = entries
            .iter()
            .map(|(start, end, description)| {
                TimeEntry::new(TimeSpan::new(*start, *end).unwrap(), *description)
            })
            .collect::<Vec<_>>();

        build_taetis(&entries, &catalog)
    }

    fn keys<'a>(group: &'a Group<'_>) -> Vec<Option<&'a str>> {
        group.groups().keys().copied().collect()
    }

    fn assert_conserved(group: &Group<'_>) {
        if group.is_leaf() {
            assert_eq!(
                group.duration(),
                group.taetis().iter().map(|taeti| taeti.duration()).sum::<Duration>()
            );
            return;
        }

        assert_eq!(
            group.duration(),
            group.groups().values().map(Group::duration).sum::<Duration>()
        );
        assert_eq!(
            group.taetis().len(),
            group
                .groups()
                .values()
                .map(|child| child.taetis().len())
                .sum::<usize>()
        );

        for child in group.groups().values() {
            assert_conserved(child);
        }
    }

    #[test]
    fn test_nested_groups() {
        let taetis = taetis(&[
            (time_stamp!(08:00), time_stamp!(08:30), "#3 review"),
            (time_stamp!(08:30), time_stamp!(09:00), "#1 a"),
            (time_stamp!(09:00), time_stamp!(10:00), "#2 b"),
            (time_stamp!(10:00), time_stamp!(10:15), "#1 c"),
            (time_stamp!(10:15), time_stamp!(11:00), "#4 d"),
        ]);

        let root = group_taetis(&taetis);

        assert_eq!(root.duration(), Duration::from_mins(3 * 60));
        assert_eq!(keys(&root), vec![Some("Alpha"), Some("Beta")]);

        let alpha = root.get(Some("Alpha")).unwrap();
        assert_eq!(alpha.duration(), Duration::from_mins(2 * 60 + 15));
        assert_eq!(keys(alpha), vec![Some("Review"), Some("Design")]);

        let design = alpha.get(Some("Design")).unwrap();
        assert_eq!(keys(design), vec![Some("Widget"), Some("Gadget")]);

        let widget = design.get(Some("Widget")).unwrap();
        assert_eq!(widget.duration(), Duration::from_mins(45));
        assert_eq!(keys(widget), vec![Some("1")]);

        let issue = widget.get(Some("1")).unwrap();
        assert!(issue.is_leaf());
        assert_eq!(
            issue
                .taetis()
                .iter()
                .map(|taeti| taeti.description())
                .collect::<Vec<_>>(),
            vec!["a", "c"]
        );

        assert_conserved(&root);
    }

    #[test]
    fn test_absent_and_empty_keys() {
        let taetis = taetis(&[
            (time_stamp!(08:00), time_stamp!(08:30), "no issue"),
            (time_stamp!(08:30), time_stamp!(09:00), "#99 unknown"),
            (time_stamp!(09:00), time_stamp!(09:45), "#4 empty task"),
            (time_stamp!(09:45), time_stamp!(10:00), "another one"),
        ]);

        let root = group_taetis(&taetis);

        assert_eq!(root.duration(), Duration::from_mins(2 * 60));
        assert_eq!(keys(&root), vec![None, Some("Misc"), Some("Beta")]);

        let without_project = root.get(None).unwrap();
        assert_eq!(without_project.duration(), Duration::from_mins(45));
        assert_eq!(without_project.taetis().len(), 2);

        // catalog rows store an empty description, the fallback none
        let misc = root.get(Some("Misc")).unwrap().get(Some("")).unwrap();
        assert_eq!(keys(misc), vec![None]);

        let beta = root.get(Some("Beta")).unwrap();
        assert_eq!(keys(beta), vec![Some("")]);

        assert_conserved(&root);
    }

    #[test]
    fn test_empty() {
        let root = group_taetis(&[]);

        assert_eq!(root.duration(), Duration::ZERO);
        assert!(root.is_leaf());
        assert!(root.taetis().is_empty());
    }

    #[test]
    fn test_custom_levels() {
        let taetis = taetis(&[
            (time_stamp!(08:00), time_stamp!(08:30), "#1 a"),
            (time_stamp!(08:30), time_stamp!(09:00), "#4 b"),
        ]);

        let root = Group::new(&taetis, &[GroupBy::IssueDescription]);

        assert_eq!(keys(&root), vec![Some("Widget")]);
        assert_eq!(root.get(Some("Widget")).unwrap().taetis().len(), 2);
        assert!(root.get(Some("Widget")).unwrap().is_leaf());
    }
}
