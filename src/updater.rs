//! The notes updater: version resolution, notes lookup, rendering, merging
//! and persistence for one run.

use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::fragment::TODO_MARKER;
use crate::domain::{
    notes, rebuild, Change, ChangeRange, FragmentContext, IncrementKind, NotesDocument,
    ProjectVersion, ReleaseState,
};
use crate::error::{ReleaseNotesError, Result};
use crate::manifest;

/// Reads and writes the project files involved in a notes run.
///
/// All paths are resolved against `root`; nothing is written before
/// [`NotesUpdater::persist`] except the edited-note checkpoint.
#[derive(Debug, Clone)]
pub struct NotesUpdater {
    root: PathBuf,
    config: Config,
    date: NaiveDate,
}

impl NotesUpdater {
    /// `date` is the release date shown in headings.
    pub fn new(root: impl Into<PathBuf>, config: Config, date: NaiveDate) -> Self {
        NotesUpdater {
            root: root.into(),
            config,
            date,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state_path(&self) -> PathBuf {
        self.root.join(&self.config.files.state_file)
    }

    /// Sidecar state from a previous run, empty when there is none.
    pub fn load_state(&self) -> Result<ReleaseState> {
        Ok(ReleaseState::load(&self.state_path())?.unwrap_or_default())
    }

    pub fn save_state(&self, state: &ReleaseState) -> Result<()> {
        state.save(&self.state_path())
    }

    /// Prior version from the first usable version descriptor.
    pub fn resolve_prior_version(&self) -> Result<ProjectVersion> {
        let (_source, version) =
            manifest::resolve_prior_version(&self.root, &self.config.files.version_sources)?;
        Ok(version)
    }

    /// Next version for `kind`; `Custom` requires `custom` input.
    pub fn next_version(
        prior: &ProjectVersion,
        kind: IncrementKind,
        custom: Option<&str>,
    ) -> Result<ProjectVersion> {
        match (kind, custom) {
            (IncrementKind::Custom, Some(input)) => prior.parse_custom(input),
            (IncrementKind::Custom, None) => Err(ReleaseNotesError::validation(
                "custom increment requires an explicit version",
            )),
            (kind, _) => prior.increment(kind),
        }
    }

    pub fn locate_notes_document(&self) -> Result<NotesDocument> {
        NotesDocument::locate(&self.root, &self.config.files.notes_candidates)
    }

    /// Range for regenerating the notes of the already released `prior`.
    pub fn check_rebuild(
        &self,
        document: &NotesDocument,
        prior: &ProjectVersion,
    ) -> Result<ChangeRange> {
        rebuild::check_rebuild(document, &prior.tag(), &self.config.git.tip)
    }

    fn context(
        &self,
        version: &ProjectVersion,
        range: &ChangeRange,
        origin: Option<&str>,
        since: Option<NaiveDate>,
        changes: &[Change],
    ) -> FragmentContext {
        let tip = self.config.git.tip.clone();
        FragmentContext {
            date: self.date,
            version: version.tag(),
            first: range.first.clone(),
            last: range.last_or(&tip).to_string(),
            tip,
            origin: origin.map(str::to_string),
            since,
            changes: changes.to_vec(),
        }
    }

    /// Draft the notes text for the changes in `range`.
    pub fn render_fragment(
        &self,
        prior: &ProjectVersion,
        range: &ChangeRange,
        changes: &[Change],
        since: Option<NaiveDate>,
    ) -> Result<String> {
        self.context(prior, range, None, since, changes).render_log()
    }

    /// Insert `fragment`, headed by the `next` version, into the document.
    ///
    /// A missing document is seeded from the base skeleton.
    pub fn merge_into_document(
        &self,
        document: &NotesDocument,
        fragment: &str,
        next: &ProjectVersion,
        range: &ChangeRange,
        origin: Option<&str>,
    ) -> Result<String> {
        let context = self.context(next, range, origin, None, &[]);
        let header = context.render_version_header()?;
        let base = context.render_base()?;

        notes::merge(
            document.existing.as_deref(),
            &base,
            &format!("{}{}", header, fragment),
            &next.tag(),
            &self.config.git.tip,
        )
    }

    /// Accept text returned from the editor.
    ///
    /// Empty text is rejected outright. Otherwise the note is checkpointed to
    /// the sidecar before the placeholder check, so a rejected note can be
    /// resumed on the next run.
    pub fn validate_edited(&self, state: &mut ReleaseState, edited: String) -> Result<String> {
        if edited.trim().is_empty() {
            return Err(ReleaseNotesError::validation("No content entered for notes"));
        }

        state.note = Some(edited.clone());
        self.save_state(&ReleaseState {
            note: Some(edited.clone()),
            ..ReleaseState::default()
        })?;

        if edited.contains(TODO_MARKER) {
            return Err(ReleaseNotesError::validation(
                "TODO left in notes. Please remove and try again.",
            ));
        }

        Ok(edited)
    }

    /// Write the result of the run.
    ///
    /// In dry-run mode `content` goes to `out` and no file is touched.
    /// Otherwise `content` replaces the notes file, then `state` is saved.
    pub fn persist(
        &self,
        document: &NotesDocument,
        content: &str,
        state: &ReleaseState,
        dry_run: bool,
        out: &mut dyn Write,
    ) -> Result<()> {
        if dry_run {
            out.write_all(content.as_bytes())?;
            out.flush()?;
            return Ok(());
        }

        let path = document.path(&self.root);
        fs::write(&path, content)?;
        log::debug!("Wrote {}", path.display());

        self.save_state(state)
    }
}
