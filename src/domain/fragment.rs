//! Rendering of the release notes text from the embedded templates.

use chrono::{Datelike, NaiveDate};

use crate::domain::change::Change;
use crate::domain::template::{Template, Values};
use crate::error::Result;

/// Skeleton of a brand-new notes file
pub const BASE_TEMPLATE: Template = Template::new(include_str!("../../templates/release-notes.md"));

/// Link and heading placed above every release fragment
pub const VERSION_TEMPLATE: Template = Template::new(include_str!("../../templates/version.md"));

/// Body of a release fragment
pub const LOG_TEMPLATE: Template = Template::new(include_str!("../../templates/log.md"));

/// Placeholder that must be removed from edited notes before they are accepted
pub const TODO_MARKER: &str = "- TODO : ";

/// Everything the templates can refer to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentContext {
    pub date: NaiveDate,
    /// Tag of the release being written (e.g., "v1.3.0")
    pub version: String,
    pub first: String,
    pub last: String,
    pub tip: String,
    /// `owner/repo` of the hosting remote, when known
    pub origin: Option<String>,
    /// Date of the commit the range starts from
    pub since: Option<NaiveDate>,
    pub changes: Vec<Change>,
}

impl FragmentContext {
    fn values(&self) -> Values {
        let mut values = Values::new();
        values.insert("date", format_release_date(self.date));
        values.insert("version", self.version.clone());
        values.insert("first", self.first.clone());
        values.insert("last", self.last.clone());
        values.insert("tip", self.tip.clone());
        values.insert("origin", self.origin.clone().unwrap_or_default());
        values.insert(
            "since",
            self.since.map(format_release_date).unwrap_or_default(),
        );
        values.insert("changes", format_changes(&self.changes));
        values
    }

    /// Draft text for the release: the formatted changes since `first`.
    pub fn render_log(&self) -> Result<String> {
        LOG_TEMPLATE.render(&self.values())
    }

    /// Comparison link and version heading that precede the drafted text.
    pub fn render_version_header(&self) -> Result<String> {
        VERSION_TEMPLATE.render(&self.values())
    }

    /// Seed content for a notes file that does not exist yet.
    pub fn render_base(&self) -> Result<String> {
        BASE_TEMPLATE.render(&self.values())
    }
}

/// Long-form date used in headings, e.g. "October 17th, 2026"
pub fn format_release_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("{} {}{}, {}", date.format("%B"), day, suffix, date.year())
}

/// One list line per change; a placeholder line when there are none.
pub fn format_changes(changes: &[Change]) -> String {
    if changes.is_empty() {
        return format!("{}Describe changes\n", TODO_MARKER);
    }
    changes
        .iter()
        .map(|change| format!("{}\n", change.to_line()))
        .collect()
}
