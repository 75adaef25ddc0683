//! Repository access using git2.

use std::path::Path;

use git2::{ErrorCode, Oid, Repository, Tree};

use crate::error::{CommitError, DiffError};

/// Handle on the repository the command operates in.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    pub fn open(path: &Path) -> Result<Self, DiffError> {
        Repository::open(path)
            .map(|repo| Self { repo })
            .map_err(DiffError::OpenRepository)
    }

    /// Open the repository at the working directory.
    pub fn open_current() -> Result<Self, DiffError> {
        Self::open(Path::new("."))
    }

    pub(crate) fn inner(&self) -> &Repository {
        &self.repo
    }

    /// Resolve the HEAD tree, distinguishing unborn branches from real
    /// failures.
    ///
    /// Returns `Ok(None)` for repositories with no commits yet, so callers
    /// can diff the index against an empty tree instead of erroring.
    pub(crate) fn head_tree(&self) -> Result<Option<Tree<'_>>, DiffError> {
        let head_ref = match self.repo.head() {
            Ok(r) => r,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Ok(None);
            }
            Err(e) => return Err(DiffError::DiffFailed(e)),
        };

        let tree = head_ref.peel_to_tree().map_err(DiffError::DiffFailed)?;
        Ok(Some(tree))
    }

    /// Create a commit from the current index on HEAD.
    ///
    /// Stages nothing itself: only what the user already staged is
    /// committed. Handles the initial commit (no parent) as well.
    pub fn commit(&self, message: &str) -> Result<Oid, CommitError> {
        let mut index = self.repo.index().map_err(CommitError::CommitFailed)?;
        let tree_id = index.write_tree().map_err(CommitError::CommitFailed)?;
        let tree = self
            .repo
            .find_tree(tree_id)
            .map_err(CommitError::CommitFailed)?;

        let sig = self.repo.signature().map_err(CommitError::SignatureMissing)?;

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .map_err(CommitError::CommitFailed)
    }
}
