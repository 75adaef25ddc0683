//! Diff collection rendered as unified patch text.

use git2::{Diff, DiffFormat, Repository};
use tracing::warn;

use crate::error::DiffError;

use super::repo::GitRepository;

/// Maximum characters of patch text before truncation, so prompts stay
/// within model context.
pub const MAX_DIFF_LENGTH: usize = 30_000;

const TRUNCATION_MARKER: &str = "\n[diff truncated]\n";

/// Source of diff text for the commands.
///
/// Narrow seam over the repository so orchestration can be exercised with
/// fakes.
pub trait DiffSource {
    /// Index vs. working tree (what plain `git diff` prints).
    fn working_diff(&self) -> Result<String, DiffError>;

    /// HEAD tree vs. index (what `git diff --cached` prints).
    fn staged_diff(&self) -> Result<String, DiffError>;

    /// Diff for a revision or range spec (`rev`, `a..b`, `a...b`).
    fn revision_diff(&self, spec: &str) -> Result<String, DiffError>;
}

impl DiffSource for GitRepository {
    fn working_diff(&self) -> Result<String, DiffError> {
        let diff = self
            .inner()
            .diff_index_to_workdir(None, None)
            .map_err(DiffError::DiffFailed)?;
        render_patch(&diff)
    }

    fn staged_diff(&self) -> Result<String, DiffError> {
        let head_tree = self.head_tree()?;
        let diff = self
            .inner()
            .diff_tree_to_index(head_tree.as_ref(), None, None)
            .map_err(DiffError::DiffFailed)?;
        render_patch(&diff)
    }

    fn revision_diff(&self, spec: &str) -> Result<String, DiffError> {
        let repo = self.inner();

        let diff = if let Some((from, to)) = split_range(spec) {
            let from_commit = resolve_commit(repo, from)?;
            let to_commit = resolve_commit(repo, to)?;

            // `a...b` diffs from the merge base, like git does.
            let base_id = if spec.contains("...") {
                repo.merge_base(from_commit.id(), to_commit.id())
                    .map_err(|source| DiffError::RevisionNotFound {
                        revision: spec.to_string(),
                        source,
                    })?
            } else {
                from_commit.id()
            };

            let base_tree = repo
                .find_commit(base_id)
                .and_then(|c| c.tree())
                .map_err(DiffError::DiffFailed)?;
            let to_tree = to_commit.tree().map_err(DiffError::DiffFailed)?;

            repo.diff_tree_to_tree(Some(&base_tree), Some(&to_tree), None)
                .map_err(DiffError::DiffFailed)?
        } else {
            let commit = resolve_commit(repo, spec)?;
            let tree = commit.tree().map_err(DiffError::DiffFailed)?;
            repo.diff_tree_to_workdir_with_index(Some(&tree), None)
                .map_err(DiffError::DiffFailed)?
        };

        render_patch(&diff)
    }
}

/// Split `a..b` / `a...b` specs into endpoints.
fn split_range(spec: &str) -> Option<(&str, &str)> {
    if let Some((from, to)) = spec.split_once("...") {
        Some((from, to))
    } else {
        spec.split_once("..")
    }
}

/// Resolve a revision (branch, tag, or commit hash) to a commit.
fn resolve_commit<'r>(repo: &'r Repository, spec: &str) -> Result<git2::Commit<'r>, DiffError> {
    let not_found = |source: git2::Error| DiffError::RevisionNotFound {
        revision: spec.to_string(),
        source,
    };

    let object = repo.revparse_single(spec).map_err(not_found)?;
    object.peel_to_commit().map_err(not_found)
}

/// Render a diff as unified patch text, respecting the length budget.
fn render_patch(diff: &Diff<'_>) -> Result<String, DiffError> {
    let mut text = String::new();
    let mut truncated = false;

    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if truncated {
            return true;
        }

        let content = std::str::from_utf8(line.content()).unwrap_or("");

        if text.len() + content.len() + 2 > MAX_DIFF_LENGTH {
            truncated = true;
            return true;
        }

        // Include the origin character for context
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(content);

        true
    })
    .map_err(DiffError::DiffFailed)?;

    if truncated {
        warn!("diff exceeded {MAX_DIFF_LENGTH} characters, truncating");
        text.push_str(TRUNCATION_MARKER);
    }

    Ok(text)
}
