//! Git operations abstraction layer
//!
//! The notes workflow only needs a handful of read queries plus one commit,
//! so they sit behind the [Repository] trait:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use release_notes::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> release_notes::Result<()> {
//! let changes = repo.changes_between("v1.2.0", None)?;
//! for change in changes {
//!     println!("{}", change.to_line());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use chrono::{DateTime, Utc};
use regex::Regex;
use std::path::Path;

use crate::domain::Change;
use crate::error::{ReleaseNotesError, Result};

/// Version-control queries used by the notes workflow
///
/// Revisions are anything `git rev-parse` understands: tags, branch names,
/// commit hashes.
pub trait Repository {
    /// Whether tracked files have no uncommitted changes
    fn is_clean(&self) -> Result<bool>;

    /// Whether the current branch contains everything its upstream has
    ///
    /// A branch without an upstream counts as up to date.
    fn is_up_to_date(&self) -> Result<bool>;

    /// URL of the named remote, `None` when it is not configured
    fn remote_url(&self, remote: &str) -> Result<Option<String>>;

    /// Commit hash a revision points at, `None` when it does not resolve
    fn resolve(&self, revision: &str) -> Result<Option<String>>;

    /// Hash of the oldest commit reachable from HEAD
    fn root_commit(&self) -> Result<String>;

    /// Commit time of a revision
    fn commit_time(&self, revision: &str) -> Result<DateTime<Utc>>;

    /// Non-merge commits after `first` up to `last` (HEAD when `None`), oldest first
    fn changes_between(&self, first: &str, last: Option<&str>) -> Result<Vec<Change>>;

    /// Stage `path` (absolute, or relative to the work tree) and commit it on HEAD
    fn commit_file(&self, path: &Path, message: &str) -> Result<()>;
}

/// Fail unless the working tree is clean.
pub fn ensure_clean<R: Repository + ?Sized>(repo: &R) -> Result<()> {
    if !repo.is_clean()? {
        return Err(ReleaseNotesError::repository_state(
            "Working tree has uncommitted changes. Please commit or stash them first.",
        ));
    }
    Ok(())
}

/// Fail when the current branch is behind its upstream.
pub fn ensure_fetched<R: Repository + ?Sized>(repo: &R) -> Result<()> {
    if !repo.is_up_to_date()? {
        return Err(ReleaseNotesError::repository_state(
            "Current branch is behind its upstream. Please pull first.",
        ));
    }
    Ok(())
}

/// `owner/repo` of the named remote, when its URL has that shape.
pub fn origin_name<R: Repository + ?Sized>(repo: &R, remote: &str) -> Result<Option<String>> {
    Ok(repo
        .remote_url(remote)?
        .and_then(|url| parse_origin_name(&url)))
}

/// Extract `owner/repo` from an HTTPS or SSH remote URL.
pub fn parse_origin_name(url: &str) -> Option<String> {
    let matcher = Regex::new(r"[:/]([^/:]+/[^/]+?)(?:\.git)?/?$").ok()?;
    matcher
        .captures(url.trim())
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
}
