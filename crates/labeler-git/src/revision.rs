//! Revision metadata and its derived version strings.

use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::Result;
use crate::source::RevisionSource;

/// Baseline used when the repository has no tags at all.
pub const BASELINE_TAG: &str = "v0.0.0";

/// Branches that do not get a suffix in schematic revision labels.
const DEFAULT_BRANCHES: &[&str] = &["main", "master"];

/// A snapshot of repository state, resolved fresh on every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionInfo {
    /// Most recent tag reachable from HEAD, or [`BASELINE_TAG`].
    pub tag: String,

    /// Commits strictly after the tag up to HEAD. With no tag this is the
    /// full commit count.
    pub commits_since_tag: u32,

    /// Current branch shorthand, or `HEAD` when detached.
    pub branch: String,

    /// Whether the work tree has uncommitted changes.
    pub is_dirty: bool,

    /// Committer-local date of the last relevant commit.
    pub commit_date: NaiveDate,

    /// The date this snapshot was taken. Dirty labels use this instead of
    /// the commit date.
    pub resolved_on: NaiveDate,
}

impl RevisionInfo {
    /// The plain version string: the tag alone when HEAD sits exactly on
    /// it, otherwise `tag.count`.
    pub fn version(&self) -> String {
        if self.commits_since_tag == 0 {
            self.tag.clone()
        } else {
            format!("{}.{}", self.tag, self.commits_since_tag)
        }
    }

    /// Work-tree status as stored in the project's `STATUS` variable.
    pub fn status(&self) -> &'static str {
        if self.is_dirty { "dirty" } else { "clean" }
    }

    /// Build date as stored in the project's `BUILD_DATE` variable.
    pub fn build_date(&self) -> String {
        self.commit_date.format("%Y-%m-%d").to_string()
    }

    /// The schematic revision label: the version string, a `-branch`
    /// suffix off the default branches, and a `-dirty` suffix for an
    /// unclean work tree.
    pub fn label(&self) -> String {
        let mut label = self.version();
        if !DEFAULT_BRANCHES.contains(&self.branch.as_str()) {
            label.push('-');
            label.push_str(&self.branch);
        }
        if self.is_dirty {
            label.push_str("-dirty");
        }
        label
    }

    /// The date paired with [`label`](Self::label): today while dirty,
    /// the commit date once everything is committed.
    pub fn label_date(&self) -> String {
        let date = if self.is_dirty {
            self.resolved_on
        } else {
            self.commit_date
        };
        date.format("%Y-%m-%d").to_string()
    }
}

/// Resolve repository state into a [`RevisionInfo`].
///
/// `scope` restricts the commit-date and dirty queries to a single path;
/// project files use `None` (repository-wide), schematic sheets pass their
/// own path. Any failed query aborts the resolution; no partial results.
pub fn resolve(source: &dyn RevisionSource, scope: Option<&Path>) -> Result<RevisionInfo> {
    resolve_at(source, scope, Local::now().date_naive())
}

/// [`resolve`] with an explicit "today", so tests control the clock.
pub fn resolve_at(
    source: &dyn RevisionSource,
    scope: Option<&Path>,
    today: NaiveDate,
) -> Result<RevisionInfo> {
    let tag = source.latest_tag()?;
    let commits_since_tag = source.commits_since(tag.as_deref())?;
    let branch = source.current_branch()?;
    let commit_date = source.last_commit_date(scope)?.unwrap_or(today);
    let is_dirty = source.is_dirty(scope)?;

    let info = RevisionInfo {
        tag: tag.unwrap_or_else(|| BASELINE_TAG.to_string()),
        commits_since_tag,
        branch,
        is_dirty,
        commit_date,
        resolved_on: today,
    };

    tracing::debug!(
        tag = %info.tag,
        commits = info.commits_since_tag,
        branch = %info.branch,
        dirty = info.is_dirty,
        date = %info.commit_date,
        "resolved repository state"
    );

    Ok(info)
}
