use chrono::{DateTime, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::Change;
use crate::error::{ReleaseNotesError, Result};
use crate::git::Repository;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    clean: bool,
    up_to_date: bool,
    remotes: HashMap<String, String>,
    tags: HashMap<String, String>,
    root: String,
    commit_time: DateTime<Utc>,
    changes: Vec<Change>,
    requested_ranges: RefCell<Vec<(String, Option<String>)>>,
    commits: RefCell<Vec<(PathBuf, String)>>,
}

impl MockRepository {
    /// Create a clean, up-to-date mock repository with no tags or changes
    pub fn new() -> Self {
        MockRepository {
            clean: true,
            up_to_date: true,
            remotes: HashMap::new(),
            tags: HashMap::new(),
            root: "0000000000000000000000000000000000000000".to_string(),
            commit_time: Utc.timestamp_opt(0, 0).single().unwrap_or_else(Utc::now),
            changes: Vec::new(),
            requested_ranges: RefCell::new(Vec::new()),
            commits: RefCell::new(Vec::new()),
        }
    }

    pub fn set_clean(&mut self, clean: bool) {
        self.clean = clean;
    }

    pub fn set_up_to_date(&mut self, up_to_date: bool) {
        self.up_to_date = up_to_date;
    }

    pub fn set_remote(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.remotes.insert(name.into(), url.into());
    }

    /// Add a tag pointing to a commit hash
    pub fn add_tag(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        self.tags.insert(name.into(), hash.into());
    }

    pub fn set_root(&mut self, hash: impl Into<String>) {
        self.root = hash.into();
    }

    pub fn set_commit_time(&mut self, time: DateTime<Utc>) {
        self.commit_time = time;
    }

    /// Changes returned for any requested range
    pub fn add_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    /// Ranges passed to `changes_between`, in call order
    pub fn requested_ranges(&self) -> Vec<(String, Option<String>)> {
        self.requested_ranges.borrow().clone()
    }

    /// Files committed through `commit_file`, with their messages
    pub fn commits(&self) -> Vec<(PathBuf, String)> {
        self.commits.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn is_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }

    fn is_up_to_date(&self) -> Result<bool> {
        Ok(self.up_to_date)
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        Ok(self.remotes.get(remote).cloned())
    }

    fn resolve(&self, revision: &str) -> Result<Option<String>> {
        if revision == self.root {
            return Ok(Some(self.root.clone()));
        }
        Ok(self.tags.get(revision).cloned())
    }

    fn root_commit(&self) -> Result<String> {
        Ok(self.root.clone())
    }

    fn commit_time(&self, revision: &str) -> Result<DateTime<Utc>> {
        self.resolve(revision)?
            .map(|_| self.commit_time)
            .ok_or_else(|| ReleaseNotesError::not_found(format!("Revision '{}' not found", revision)))
    }

    fn changes_between(&self, first: &str, last: Option<&str>) -> Result<Vec<Change>> {
        self.requested_ranges
            .borrow_mut()
            .push((first.to_string(), last.map(str::to_string)));
        Ok(self.changes.clone())
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<()> {
        self.commits
            .borrow_mut()
            .push((path.to_path_buf(), message.to_string()));
        Ok(())
    }
}
