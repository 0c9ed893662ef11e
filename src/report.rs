use std::io;
use std::io::Write;

use thiserror::Error;

use crate::grouping::Group;
use crate::time::PrettyDuration;

/// Terminal decoration around project headers and records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    project: &'static str,
    taeti: &'static str,
    end: &'static str,
}

impl Style {
    pub const PLAIN: Self = Self {
        project: "",
        taeti: "",
        end: "",
    };

    pub const ANSI: Self = Self {
        project: "\x1b[1;94m",
        taeti: "\x1b[90m",
        end: "\x1b[0m",
    };

    #[must_use]
    pub fn new(color: bool) -> Self {
        if color {
            Self::ANSI
        } else {
            Self::PLAIN
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::PLAIN
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("project \"{0}\" from the print order does not exist in the log")]
    MissingProject(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Writes the grouped records, the projects in `print_order` come first.
pub struct Report<'a, 'b> {
    root: &'b Group<'a>,
    print_order: &'b [String],
    style: Style,
}

impl<'a, 'b> Report<'a, 'b> {
    #[must_use]
    pub fn new(root: &'b Group<'a>, print_order: &'b [String]) -> Self {
        Self {
            root,
            print_order,
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Fails before writing anything if a project of the print order has no
    /// records.
    pub fn write_to(&self, mut writer: impl Write) -> Result<(), RenderError> {
        let mut remaining = self.root.groups().iter().collect::<Vec<_>>();
        let mut ordered = Vec::with_capacity(remaining.len());

        for project in self.print_order {
            let index = remaining
                .iter()
                .position(|(key, _)| **key == Some(project.as_str()))
                .ok_or_else(|| RenderError::MissingProject(project.clone()))?;

            ordered.push(remaining.remove(index));
        }

        for (project, group) in ordered.into_iter().chain(remaining) {
            self.write_project(&mut writer, *project, group)?;
        }

        Ok(())
    }

    fn write_project(
        &self,
        writer: &mut impl Write,
        project: Option<&str>,
        group: &Group<'_>,
    ) -> io::Result<()> {
        let style = self.style;
        let label = project.filter(|project| !project.is_empty());

        match label {
            Some(label) => writeln!(
                writer,
                "{}{} {}{}",
                style.project,
                PrettyDuration::from(group.duration()),
                label,
                style.end
            )?,
            None => writeln!(
                writer,
                "{}{}{}",
                style.project,
                PrettyDuration::from(group.duration()),
                style.end
            )?,
        }

        self.write_children(writer, group, 1)
    }

    // depth 1 are tasks, 2 issue descriptions and 3 issue ids
    fn write_children(
        &self,
        writer: &mut impl Write,
        group: &Group<'_>,
        depth: usize,
    ) -> io::Result<()> {
        if group.is_leaf() {
            for taeti in group.taetis() {
                writeln!(
                    writer,
                    "{}{}{}{}",
                    "\t".repeat(depth),
                    self.style.taeti,
                    taeti,
                    self.style.end
                )?;
            }

            return Ok(());
        }

        for (key, child) in group.groups() {
            if let Some(key) = key.filter(|key| !key.is_empty()) {
                let prefix = if depth == 3 { "#" } else { "" };

                writeln!(
                    writer,
                    "{}{} {}{}",
                    "\t".repeat(depth),
                    PrettyDuration::from(child.duration()),
                    prefix,
                    key
                )?;
            }

            self.write_children(writer, child, depth + 1)?;
        }

        Ok(())
    }
}

/// Renders the report into a string, see [`Report::write_to`].
pub fn render(
    root: &Group<'_>,
    print_order: &[String],
    style: Style,
) -> Result<String, RenderError> {
    let mut output = Vec::new();
    Report::new(root, print_order)
        .style(style)
        .write_to(&mut output)?;

    Ok(String::from_utf8_lossy(&output).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::grouping::group_taetis;
    use crate::input::{parse_log, IssueCatalog};
    use crate::taeti::{build_taetis, Taeti};

    fn taetis(log: &str) -> Vec<Taeti> {
        let catalog = IssueCatalog::from_reader(
            concat!(
                "1,Alpha,Design,Widget\n",
                "2,Alpha,Design,Widget\n",
                "3,Beta,Review\n",
            )
            .as_bytes(),
            "Misc",
            "",
        )
        .unwrap();

        build_taetis(&parse_log(log.as_bytes()).unwrap(), &catalog)
    }

    fn order(projects: &[&str]) -> Vec<String> {
        projects.iter().map(|project| project.to_string()).collect()
    }

    #[test]
    fn test_render_nested() {
        let taetis = taetis(concat!(
            "08:00  08:30  #1 sketch\n",
            "08:30  09:00  #2 draw\n",
            "09:00  10:00  #1 refine\n",
        ));

        assert_eq!(
            render(&group_taetis(&taetis), &[], Style::PLAIN).unwrap(),
            concat!(
                "02:00:00 Alpha\n",
                "\t02:00:00 Design\n",
                "\t\t02:00:00 Widget\n",
                "\t\t\t01:30:00 #1\n",
                "\t\t\t\t08:00 - 08:30 sketch\n",
                "\t\t\t\t09:00 - 10:00 refine\n",
                "\t\t\t00:30:00 #2\n",
                "\t\t\t\t08:30 - 09:00 draw\n",
            )
        );
    }

    #[test]
    fn test_empty_keys_are_not_labeled() {
        let taetis = taetis(concat!(
            "08:00  08:30  #3 pull request\n",
            "08:30  09:00  mails\n",
        ));

        assert_eq!(
            render(&group_taetis(&taetis), &[], Style::PLAIN).unwrap(),
            concat!(
                "00:30:00 Beta\n",
                "\t00:30:00 Review\n",
                "\t\t\t00:30:00 #3\n",
                "\t\t\t\t08:00 - 08:30 pull request\n",
                "00:30:00\n",
                "\t\t\t\t08:30 - 09:00 mails\n",
            )
        );
    }

    #[test]
    fn test_print_order_comes_first() {
        let taetis = taetis(concat!(
            "08:00  08:30  #1 a\n",
            "08:30  09:00  #3 b\n",
            "09:00  09:15  #99 c\n",
        ));
        let root = group_taetis(&taetis);

        let projects = render(&root, &order(&["Misc", "Beta"]), Style::PLAIN)
            .unwrap()
            .lines()
            .filter(|line| !line.starts_with('\t'))
            .map(String::from)
            .collect::<Vec<_>>();

        assert_eq!(
            projects,
            vec!["00:15:00 Misc", "00:30:00 Beta", "00:30:00 Alpha"]
        );
    }

    #[test]
    fn test_unknown_project_in_print_order() {
        let taetis = taetis("08:00  08:30  #1 a\n");
        let root = group_taetis(&taetis);

        let mut output = Vec::new();
        let result = Report::new(&root, &order(&["Alpha", "Lunch"])).write_to(&mut output);

        assert!(matches!(
            result,
            Err(RenderError::MissingProject(project)) if project == "Lunch"
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn test_ansi_style() {
        let taetis = taetis("08:00  08:30  #3 a\n");

        assert_eq!(
            render(&group_taetis(&taetis), &[], Style::ANSI).unwrap(),
            concat!(
                "\x1b[1;94m00:30:00 Beta\x1b[0m\n",
                "\t00:30:00 Review\n",
                "\t\t\t00:30:00 #3\n",
                "\t\t\t\t\x1b[90m08:00 - 08:30 a\x1b[0m\n",
            )
        );
    }
}
