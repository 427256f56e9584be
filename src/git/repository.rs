use chrono::{DateTime, TimeZone, Utc};
use git2::{Branch, ErrorCode, Oid, Repository as Git2Repo, Sort, StatusOptions};
use std::path::{Path, PathBuf};

use crate::domain::Change;
use crate::error::{ReleaseNotesError, Result};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn peel_commit(&self, revision: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(revision).map_err(|e| {
            if is_missing(&e) {
                ReleaseNotesError::not_found(format!("Revision '{}' not found", revision))
            } else {
                e.into()
            }
        })?;
        Ok(object.peel_to_commit()?.id())
    }

    /// `path` relative to the work tree; absolute paths may go through symlinks.
    fn work_tree_relative(&self, path: &Path) -> Result<PathBuf> {
        let workdir = match self.repo.workdir() {
            Some(workdir) if path.is_absolute() => workdir,
            _ => return Ok(path.to_path_buf()),
        };

        if let Ok(relative) = path.strip_prefix(workdir) {
            return Ok(relative.to_path_buf());
        }

        path.canonicalize()?
            .strip_prefix(workdir.canonicalize()?)
            .map(Path::to_path_buf)
            .map_err(|_| {
                ReleaseNotesError::repository_state(format!(
                    "'{}' is outside the work tree",
                    path.display()
                ))
            })
    }
}

fn is_missing(err: &git2::Error) -> bool {
    matches!(err.code(), ErrorCode::NotFound | ErrorCode::InvalidSpec)
}

impl super::Repository for Git2Repository {
    fn is_clean(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses.is_empty())
    }

    fn is_up_to_date(&self) -> Result<bool> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Ok(true),
            Err(e) => return Err(e.into()),
        };
        if !head.is_branch() {
            return Ok(true);
        }

        let branch = Branch::wrap(head);
        let upstream = match branch.upstream() {
            Ok(upstream) => upstream,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(true),
            Err(e) => return Err(e.into()),
        };

        let (Some(local), Some(remote)) = (branch.get().target(), upstream.get().target()) else {
            return Ok(true);
        };

        let (_ahead, behind) = self.repo.graph_ahead_behind(local, remote)?;
        log::debug!("Branch is {} commit(s) behind upstream", behind);
        Ok(behind == 0)
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        match self.repo.find_remote(remote) {
            Ok(remote) => Ok(remote.url().map(str::to_string)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn resolve(&self, revision: &str) -> Result<Option<String>> {
        match self.repo.revparse_single(revision) {
            Ok(object) => Ok(Some(object.peel_to_commit()?.id().to_string())),
            Err(e) if is_missing(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn root_commit(&self) -> Result<String> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push_head()?;

        let root = revwalk
            .next()
            .ok_or_else(|| ReleaseNotesError::not_found("Repository has no commits"))??;
        Ok(root.to_string())
    }

    fn commit_time(&self, revision: &str) -> Result<DateTime<Utc>> {
        let oid = self.peel_commit(revision)?;
        let seconds = self.repo.find_commit(oid)?.time().seconds();

        Utc.timestamp_opt(seconds, 0).single().ok_or_else(|| {
            ReleaseNotesError::repository_state(format!(
                "Commit time of '{}' is out of range",
                revision
            ))
        })
    }

    fn changes_between(&self, first: &str, last: Option<&str>) -> Result<Vec<Change>> {
        let first_oid = self.peel_commit(first)?;
        let last_oid = match last {
            Some(last) => self.peel_commit(last)?,
            None => self.repo.head()?.peel_to_commit()?.id(),
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(last_oid)?;
        revwalk.hide(first_oid)?;

        let mut changes = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            if commit.parent_count() > 1 {
                continue;
            }

            let summary = commit.summary().unwrap_or("(empty message)").to_string();
            let author = commit.author().name().unwrap_or("unknown").to_string();

            changes.push(Change::new(oid.to_string(), summary, author));
        }

        log::debug!(
            "Found {} change(s) between {} and {}",
            changes.len(),
            first,
            last.unwrap_or("HEAD")
        );
        Ok(changes)
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<()> {
        let relative = self.work_tree_relative(path)?;

        let mut index = self.repo.index()?;
        index.add_path(&relative)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use std::fs;
    use tempfile::TempDir;

    fn commit_all(repo: &Git2Repo, message: &str) -> Oid {
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = repo.signature().unwrap();
        let parents: Vec<git2::Commit> = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn setup() -> (TempDir, Git2Repo) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        fs::write(dir.path().join("README.md"), "hello\n").unwrap();
        commit_all(&repo, "Initial commit");
        (dir, repo)
    }

    #[test]
    fn test_changes_between_tag_and_head() {
        let (dir, repo) = setup();
        {
            let head = repo.head().unwrap().peel_to_commit().unwrap();
            repo.tag_lightweight("v1.0.0", head.as_object(), false)
                .unwrap();
        }

        fs::write(dir.path().join("a.txt"), "a").unwrap();
        commit_all(&repo, "Add a\n\nLonger body");
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        commit_all(&repo, "Add b");

        let git = Git2Repository::from_git2(repo);
        let changes = git.changes_between("v1.0.0", None).unwrap();
        let summaries: Vec<&str> = changes.iter().map(|c| c.summary.as_str()).collect();
        assert_eq!(summaries, vec!["Add a", "Add b"]);
        assert_eq!(changes[0].author, "Test User");
    }

    #[test]
    fn test_resolve_and_root() {
        let (_dir, repo) = setup();
        let head = repo.head().unwrap().peel_to_commit().unwrap().id();
        let git = Git2Repository::from_git2(repo);

        assert_eq!(git.root_commit().unwrap(), head.to_string());
        assert_eq!(git.resolve("HEAD").unwrap(), Some(head.to_string()));
        assert_eq!(git.resolve("v9.9.9").unwrap(), None);
    }

    #[test]
    fn test_missing_revision_is_not_found() {
        let (_dir, repo) = setup();
        let git = Git2Repository::from_git2(repo);
        assert!(matches!(
            git.changes_between("v9.9.9", None),
            Err(ReleaseNotesError::NotFound(_))
        ));
    }

    #[test]
    fn test_clean_tracks_modifications() {
        let (dir, repo) = setup();
        let git = Git2Repository::from_git2(repo);
        assert!(git.is_clean().unwrap());

        fs::write(dir.path().join("untracked.txt"), "x").unwrap();
        assert!(git.is_clean().unwrap());

        fs::write(dir.path().join("README.md"), "changed\n").unwrap();
        assert!(!git.is_clean().unwrap());
    }

    #[test]
    fn test_no_upstream_is_up_to_date() {
        let (_dir, repo) = setup();
        let git = Git2Repository::from_git2(repo);
        assert!(git.is_up_to_date().unwrap());
        assert_eq!(git.remote_url("origin").unwrap(), None);
    }

    #[test]
    fn test_commit_file() {
        let (dir, repo) = setup();
        fs::write(dir.path().join("CHANGELOG.md"), "notes\n").unwrap();
        let git = Git2Repository::from_git2(repo);

        git.commit_file(Path::new("CHANGELOG.md"), "Update release notes")
            .unwrap();

        assert!(git.is_clean().unwrap());
        let changes = git.changes_between(&git.root_commit().unwrap(), None).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].summary, "Update release notes");
    }

    #[test]
    fn test_commit_file_with_absolute_path() {
        let (dir, repo) = setup();
        let path = dir.path().join("README.md");
        fs::write(&path, "changed\n").unwrap();
        let git = Git2Repository::from_git2(repo);

        git.commit_file(&path, "Update readme").unwrap();

        assert!(git.is_clean().unwrap());
        assert!(git
            .commit_file(Path::new("/elsewhere/notes.md"), "Outside")
            .is_err());
    }
}
