use crate::error::{ReleaseNotesError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Heading under which each new release fragment is inserted
pub const DEVELOPMENT_MARKER: &str = "## Development\n";

/// The release notes file adopted for this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesDocument {
    /// File name relative to the project root
    pub filename: String,
    /// Current content, `None` when the file does not exist yet
    pub existing: Option<String>,
}

impl NotesDocument {
    /// Probe `candidates` in order; the first existing file wins.
    ///
    /// When none exist, the last candidate is chosen as the write target and
    /// no content is loaded.
    pub fn locate(root: &Path, candidates: &[String]) -> Result<Self> {
        for candidate in candidates {
            let path = root.join(candidate);
            if path.is_file() {
                log::debug!("Adopting {} as release notes", path.display());
                return Ok(NotesDocument {
                    filename: candidate.clone(),
                    existing: Some(fs::read_to_string(&path)?),
                });
            }
        }

        let filename = candidates.last().cloned().ok_or_else(|| {
            ReleaseNotesError::configuration("No release notes file names configured")
        })?;
        log::debug!("No release notes found, will create {}", filename);

        Ok(NotesDocument {
            filename,
            existing: None,
        })
    }

    pub fn path(&self, root: &Path) -> PathBuf {
        root.join(&self.filename)
    }

    pub fn exists(&self) -> bool {
        self.existing.is_some()
    }
}

/// Merge a rendered fragment into the notes text.
///
/// `base` seeds the document when nothing exists yet. Two single-shot
/// substitutions follow: the first `...<tip>` link end becomes
/// `...<next_tag>`, then `fragment` is inserted right after the first
/// `## Development` heading. Everything else is kept byte for byte.
pub fn merge(
    existing: Option<&str>,
    base: &str,
    fragment: &str,
    next_tag: &str,
    tip: &str,
) -> Result<String> {
    let notes = existing.unwrap_or(base);

    if !notes.contains(DEVELOPMENT_MARKER) {
        return Err(ReleaseNotesError::format(format!(
            "Release notes have no \"{}\" heading to insert under",
            DEVELOPMENT_MARKER.trim_end()
        )));
    }

    let notes = replace_tip_link(notes, next_tag, tip);
    Ok(notes.replacen(
        DEVELOPMENT_MARKER,
        &format!("{}{}", DEVELOPMENT_MARKER, fragment),
        1,
    ))
}

/// Point the first `...<tip>` comparison link at `next_tag`.
pub fn replace_tip_link(notes: &str, next_tag: &str, tip: &str) -> String {
    notes.replacen(&format!("...{}", tip), &format!("...{}", next_tag), 1)
}
