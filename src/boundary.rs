use std::fmt;

/// Conditions worth telling the operator about that do not stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The change range holds no commits
    NoChanges { first: String, last: String },
    /// The sidecar file holds a note from a previous, unfinished run
    UnfinishedNotes { state_file: String },
    /// `$EDITOR` is not set, so the draft is written without review
    NoEditor,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoChanges { first, last } => {
                let short = if first.chars().all(|c| c.is_ascii_hexdigit()) {
                    first.get(..7).unwrap_or(first)
                } else {
                    first.as_str()
                };
                write!(f, "No changes found between '{}' and '{}'", short, last)
            }
            BoundaryWarning::UnfinishedNotes { state_file } => {
                write!(f, "Unfinished notes found in '{}'", state_file)
            }
            BoundaryWarning::NoEditor => {
                write!(f, "$EDITOR is not set; drafted notes will be written unedited")
            }
        }
    }
}
