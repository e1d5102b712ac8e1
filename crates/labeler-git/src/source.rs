//! Repository query interface and its git2-backed implementation.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, TimeZone, Utc};
use git2::{Commit, DescribeFormatOptions, DescribeOptions, DiffOptions, Repository, StatusOptions};

use crate::{Error, Result};

/// The questions version labeling asks of a repository.
///
/// Kept as a trait so resolution logic can be exercised against a mock
/// without building a real repository.
pub trait RevisionSource {
    /// Most recent annotated or lightweight tag reachable from HEAD.
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Number of commits strictly after `tag` up to HEAD. With no tag,
    /// the full commit count.
    fn commits_since(&self, tag: Option<&str>) -> Result<u32>;

    /// Current branch shorthand, or `HEAD` when detached.
    fn current_branch(&self) -> Result<String>;

    /// Committer-local date of the last commit, optionally restricted to
    /// commits touching `scope`. `None` when no commit touches the scope.
    fn last_commit_date(&self, scope: Option<&Path>) -> Result<Option<NaiveDate>>;

    /// Whether the work tree has uncommitted changes, optionally
    /// restricted to `scope`. Untracked files count, ignored files don't.
    fn is_dirty(&self, scope: Option<&Path>) -> Result<bool>;
}

/// [`RevisionSource`] over a discovered git repository.
pub struct GitSource {
    repo: Repository,
}

impl std::fmt::Debug for GitSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitSource").finish_non_exhaustive()
    }
}

impl GitSource {
    /// Discover the repository containing `dir`, searching upward.
    pub fn discover(dir: &Path) -> Result<Self> {
        let repo = Repository::discover(dir).map_err(|_| Error::NotARepository {
            path: dir.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    fn head_commit(&self) -> Result<Commit<'_>> {
        let head = self.repo.head().map_err(|_| Error::EmptyRepository)?;
        Ok(head.peel_to_commit()?)
    }

    /// Express `path` relative to the work tree root, for pathspecs.
    fn workdir_relative(&self, path: &Path) -> Result<PathBuf> {
        let workdir = self.repo.workdir().ok_or_else(|| Error::BareRepository {
            path: self.repo.path().to_path_buf(),
        })?;
        let workdir = workdir
            .canonicalize()
            .map_err(|e| Error::io(workdir, e))?;
        let path = path.canonicalize().map_err(|e| Error::io(path, e))?;
        path.strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| Error::OutsideWorkTree { path })
    }
}

impl RevisionSource for GitSource {
    fn latest_tag(&self) -> Result<Option<String>> {
        let mut opts = DescribeOptions::new();
        opts.describe_tags();
        let Ok(describe) = self.repo.describe(&opts) else {
            // No tags reachable from HEAD (or no HEAD at all).
            return Ok(None);
        };
        let mut fmt = DescribeFormatOptions::new();
        fmt.abbreviated_size(0);
        Ok(Some(describe.format(Some(&fmt))?))
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<u32> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head().map_err(|_| Error::EmptyRepository)?;
        if let Some(tag) = tag {
            let tagged = self
                .repo
                .revparse_single(tag)?
                .peel(git2::ObjectType::Commit)?;
            revwalk.hide(tagged.id())?;
        }
        let mut count = 0u32;
        for oid in revwalk {
            oid?;
            count += 1;
        }
        Ok(count)
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head().map_err(|_| Error::EmptyRepository)?;
        if head.is_branch() {
            Ok(head.shorthand().unwrap_or("HEAD").to_string())
        } else {
            Ok("HEAD".to_string())
        }
    }

    fn last_commit_date(&self, scope: Option<&Path>) -> Result<Option<NaiveDate>> {
        let Some(scope) = scope else {
            return Ok(Some(commit_date(&self.head_commit()?)));
        };

        let rel = self.workdir_relative(scope)?;
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head().map_err(|_| Error::EmptyRepository)?;
        revwalk.set_sorting(git2::Sort::TIME)?;
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            if commit_touches(&self.repo, &commit, &rel)? {
                return Ok(Some(commit_date(&commit)));
            }
        }
        Ok(None)
    }

    fn is_dirty(&self, scope: Option<&Path>) -> Result<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        if let Some(scope) = scope {
            let rel = self.workdir_relative(scope)?;
            opts.pathspec(rel.to_string_lossy().as_ref());
        }
        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }
}

/// Committer-local calendar date of a commit.
fn commit_date(commit: &Commit<'_>) -> NaiveDate {
    let time = commit.time();
    let local_secs = time.seconds() + i64::from(time.offset_minutes()) * 60;
    Utc.timestamp_opt(local_secs, 0)
        .single()
        .unwrap_or_default()
        .date_naive()
}

/// Whether `commit` changed `rel` relative to any of its parents.
fn commit_touches(repo: &Repository, commit: &Commit<'_>, rel: &Path) -> Result<bool> {
    let tree = commit.tree()?;
    let mut opts = DiffOptions::new();
    opts.pathspec(rel.to_string_lossy().as_ref());

    if commit.parent_count() == 0 {
        let diff = repo.diff_tree_to_tree(None, Some(&tree), Some(&mut opts))?;
        return Ok(diff.deltas().len() > 0);
    }
    for parent in commit.parents() {
        let parent_tree = parent.tree()?;
        let diff = repo.diff_tree_to_tree(Some(&parent_tree), Some(&tree), Some(&mut opts))?;
        if diff.deltas().len() > 0 {
            return Ok(true);
        }
    }
    Ok(false)
}
