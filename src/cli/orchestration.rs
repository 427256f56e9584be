//! Main workflow orchestration logic
//!
//! Runs one release-notes pass against injected collaborators so that the
//! binary and the tests drive exactly the same code.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use std::io::Write;

use crate::boundary::BoundaryWarning;
use crate::domain::{ChangeRange, IncrementKind, NotesDocument, ProjectVersion};
use crate::editor;
use crate::error::{ReleaseNotesError, Result};
use crate::git::{self, Repository};
use crate::ui::{self, Prompter};
use crate::updater::NotesUpdater;

/// Commit message used when edited notes are committed
pub const COMMIT_MESSAGE: &str = "Update release notes";

/// Arguments for the notes workflow
///
/// Mirrors the CLI Args but without depending on clap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotesWorkflowArgs {
    /// Increment to apply; `None` asks the operator
    pub increment: Option<IncrementKind>,

    /// Compute and print the drafted notes without writing anything
    pub dry_run: bool,

    /// Regenerate the notes of the already released version
    pub rebuild: bool,
}

/// Result of a successful notes workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Notes file that was (or would be) updated
    pub notes_file: String,

    /// Version tag the notes were written for
    pub version: String,

    /// Whether the notes file and sidecar were written
    pub written: bool,

    /// Whether the notes file was committed
    pub committed: bool,
}

/// Main notes workflow
///
/// 1. Require a clean, up-to-date working tree
/// 2. Load unfinished state and resolve the prior version
/// 3. Locate the notes document and work out the change range
/// 4. Collect changes and offer to reuse an unfinished note
/// 5. Draft the fragment and let the operator edit it
/// 6. Choose the next version
/// 7. Merge, persist and commit when the notes were edited
pub fn run_notes_workflow<R, P>(
    args: &NotesWorkflowArgs,
    updater: &NotesUpdater,
    repo: &R,
    prompter: &P,
    editor_command: Option<&str>,
    out: &mut dyn Write,
) -> Result<WorkflowResult>
where
    R: Repository + ?Sized,
    P: Prompter + ?Sized,
{
    git::ensure_clean(repo)?;
    git::ensure_fetched(repo)?;

    let mut state = updater.load_state()?;
    let prior = updater.resolve_prior_version()?;
    let document = updater.locate_notes_document()?;
    log::debug!("Prior version {}, notes file {}", prior, document.filename);

    let tip = updater.config().git.tip.clone();
    let range = if args.rebuild {
        updater.check_rebuild(&document, &prior)?
    } else {
        ChangeRange::to_tip(range_start(repo, &prior)?)
    };

    let origin = git::origin_name(repo, &updater.config().git.remote)?;
    let since = calendar_date(repo.commit_time(&range.first)?, &Local);
    let changes = repo.changes_between(&range.first, range.last.as_deref())?;

    if changes.is_empty() {
        ui::display_boundary_warning(&BoundaryWarning::NoChanges {
            first: range.first.clone(),
            last: range.last_or(&tip).to_string(),
        });
    } else {
        ui::display_changes(&changes, &range.first, range.last_or(&tip));
    }

    if state.has_unfinished_note() {
        ui::display_boundary_warning(&BoundaryWarning::UnfinishedNotes {
            state_file: updater.config().files.state_file.clone(),
        });
        if !prompter.confirm("Unfinished notes found. Reuse?")? {
            state.note = None;
        }
    }

    let mut fragment = match state.note.clone() {
        Some(note) if !note.is_empty() => note,
        _ => updater.render_fragment(&prior, &range, &changes, Some(since))?,
    };

    let mut edited = false;
    if !args.dry_run {
        match editor_command {
            Some(command) => {
                ui::display_status(&format!("Opening notes in {}", command));
                let text = editor::edit(command, &fragment)?;
                fragment = updater.validate_edited(&mut state, text)?;
                edited = true;
            }
            None => ui::display_boundary_warning(&BoundaryWarning::NoEditor),
        }
    }

    let next = if args.rebuild {
        state.increment = None;
        prior.clone()
    } else {
        let (kind, next) = choose_version(args.increment, &prior, prompter)?;
        state.increment = Some(kind);
        next
    };
    state.version = Some(next.tag());
    ui::display_version_change(&prior.tag(), &next.tag());

    if args.dry_run {
        updater.persist(&document, &fragment, &state, true, out)?;
        return Ok(WorkflowResult {
            notes_file: document.filename,
            version: next.tag(),
            written: false,
            committed: false,
        });
    }

    let content =
        updater.merge_into_document(&document, &fragment, &next, &range, origin.as_deref())?;
    updater.persist(&document, &content, &state, false, out)?;

    let committed = commit_if_edited(updater, repo, &document, edited)?;

    Ok(WorkflowResult {
        notes_file: document.filename,
        version: next.tag(),
        written: true,
        committed,
    })
}

/// Prior version tag when it exists, otherwise the first commit.
fn range_start<R: Repository + ?Sized>(repo: &R, prior: &ProjectVersion) -> Result<String> {
    let tag = prior.tag();
    if repo.resolve(&tag)?.is_some() {
        return Ok(tag);
    }

    log::warn!("Tag {} not found, collecting changes from the first commit", tag);
    repo.root_commit()
}

/// Calendar date of `time` as seen in `zone`.
fn calendar_date<Tz: TimeZone>(time: DateTime<Utc>, zone: &Tz) -> NaiveDate {
    time.with_timezone(zone).date_naive()
}

fn choose_version<P: Prompter + ?Sized>(
    requested: Option<IncrementKind>,
    prior: &ProjectVersion,
    prompter: &P,
) -> Result<(IncrementKind, ProjectVersion)> {
    let kind = match requested {
        Some(kind) => kind,
        None => {
            let items: Vec<&str> = IncrementKind::ALL.iter().map(|kind| kind.as_str()).collect();
            let index = prompter.select("Version increment", &items)?;
            IncrementKind::ALL
                .get(index)
                .copied()
                .ok_or_else(|| ReleaseNotesError::prompt(format!("No increment at index {}", index)))?
        }
    };

    let custom = match kind {
        IncrementKind::Custom => Some(prompter.input("Please enter new version", &prior.tag())?),
        _ => None,
    };

    let next = NotesUpdater::next_version(prior, kind, custom.as_deref())?;
    Ok((kind, next))
}

fn commit_if_edited<R: Repository + ?Sized>(
    updater: &NotesUpdater,
    repo: &R,
    document: &NotesDocument,
    edited: bool,
) -> Result<bool> {
    if !edited {
        ui::display_review_instruction(&document.filename);
        return Ok(false);
    }

    repo.commit_file(&document.path(updater.root()), COMMIT_MESSAGE)?;
    ui::display_success(&format!("Committed {}", document.filename));
    Ok(true)
}
