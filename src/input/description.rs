use std::sync::LazyLock;

use regex::Regex;

// an issue reference is `#` followed by up to four digits at the very start
static ISSUE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#(\d{1,4})\s?)?(.*)$").expect("hardcoded regex should be valid")
});

/// A log description split into the referenced issue and the free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Description<'a> {
    issue_id: Option<&'a str>,
    text: &'a str,
}

impl<'a> Description<'a> {
    /// Splits an optional leading `#1234` issue reference off the trimmed
    /// description.
    #[must_use]
    pub fn resolve(raw: &'a str) -> Self {
        let raw = raw.trim();

        match ISSUE_REFERENCE.captures(raw) {
            Some(captures) => Self {
                issue_id: captures.get(1).map(|id| id.as_str()),
                text: captures.get(2).map_or("", |text| text.as_str()),
            },
            // `.` does not match line breaks
            None => Self {
                issue_id: None,
                text: raw,
            },
        }
    }

    #[must_use]
    pub fn issue_id(&self) -> Option<&'a str> {
        self.issue_id
    }

    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }
}
