use crate::domain::notes::NotesDocument;
use crate::error::{ReleaseNotesError, Result};
use regex::Regex;

/// Revision range whose log entries become the release changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRange {
    /// Exclusive start of the range
    pub first: String,
    /// Inclusive end; `None` means the current branch tip
    pub last: Option<String>,
}

impl ChangeRange {
    pub fn to_tip(first: impl Into<String>) -> Self {
        ChangeRange {
            first: first.into(),
            last: None,
        }
    }

    /// End of the range as it appears in comparison links
    pub fn last_or<'a>(&'a self, tip: &'a str) -> &'a str {
        self.last.as_deref().unwrap_or(tip)
    }
}

/// Find the tag released before `prior_tag` from the notes' comparison links.
///
/// Looks for `/<tag>...<prior_tag>` or `/<tag>...<tip>` and returns `<tag>`.
pub fn preceding_tag(notes: &str, prior_tag: &str, tip: &str) -> Option<String> {
    let pattern = format!(
        r"/([^/]*)\.\.\.(?:{}|{})",
        regex::escape(prior_tag),
        regex::escape(tip)
    );
    let matcher = Regex::new(&pattern).ok()?;

    matcher
        .captures(notes)
        .and_then(|captures| captures.get(1))
        .map(|tag| tag.as_str().to_string())
        .filter(|tag| !tag.is_empty())
}

/// Compute the range for regenerating the notes of the already tagged
/// `prior_tag`: from the tag preceding it up to `prior_tag` itself.
pub fn check_rebuild(document: &NotesDocument, prior_tag: &str, tip: &str) -> Result<ChangeRange> {
    let notes = document.existing.as_deref().ok_or_else(|| {
        ReleaseNotesError::not_found("Rebuild specified but no existing release notes found")
    })?;

    let first = preceding_tag(notes, prior_tag, tip).ok_or_else(|| {
        ReleaseNotesError::not_found(format!(
            "Unable to find previous version \"{}\" in release notes",
            prior_tag
        ))
    })?;

    Ok(ChangeRange {
        first,
        last: Some(prior_tag.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(text: &str) -> NotesDocument {
        NotesDocument {
            filename: "RELEASE.md".to_string(),
            existing: Some(text.to_string()),
        }
    }

    #[test]
    fn test_preceding_tag_from_released_link() {
        let notes = "[Commits](https://github.com/o/r/compare/v1.1.0...v1.2.0)\n";
        assert_eq!(
            preceding_tag(notes, "v1.2.0", "master"),
            Some("v1.1.0".to_string())
        );
    }

    #[test]
    fn test_preceding_tag_from_tip_link() {
        let notes = "[Commits](https://github.com/o/r/compare/v1.1.0...master)\n";
        assert_eq!(
            preceding_tag(notes, "v1.2.0", "master"),
            Some("v1.1.0".to_string())
        );
    }

    #[test]
    fn test_preceding_tag_escapes_dots() {
        // "v1x2x0" would match an unescaped "v1.2.0"
        let notes = "compare/v1.1.0...v1x2x0\n";
        assert_eq!(preceding_tag(notes, "v1.2.0", "master"), None);
    }

    #[test]
    fn test_check_rebuild_range() {
        let doc = document("## Development\n\n[Commits](x/compare/v1.1.0...v1.2.0)\n");
        let range = check_rebuild(&doc, "v1.2.0", "master").unwrap();
        assert_eq!(range.first, "v1.1.0");
        assert_eq!(range.last.as_deref(), Some("v1.2.0"));
        assert_eq!(range.last_or("master"), "v1.2.0");
    }

    #[test]
    fn test_check_rebuild_without_document() {
        let doc = NotesDocument {
            filename: "CHANGELOG.md".to_string(),
            existing: None,
        };
        let err = check_rebuild(&doc, "v1.2.0", "master").unwrap_err();
        assert!(matches!(err, ReleaseNotesError::NotFound(_)));
    }

    #[test]
    fn test_check_rebuild_without_link() {
        let doc = document("## Development\n\nnothing to see\n");
        let err = check_rebuild(&doc, "v1.2.0", "master").unwrap_err();
        assert!(err.to_string().contains("Unable to find previous version"));
    }

    #[test]
    fn test_range_to_tip() {
        let range = ChangeRange::to_tip("v1.2.0");
        assert_eq!(range.last_or("master"), "master");
    }
}
