//! Error taxonomy for smartlog-core.
//!
//! Two tiers of failure:
//!
//! - **Fatal**: backend resolution failures ([`Error::NotFound`],
//!   [`Error::RepositoryNotFound`], [`Error::Git`], [`Error::Io`]) and
//!   node-construction violations ([`Error::UnsupportedMergeCommit`])
//!   abort the whole run.
//! - **Per-commit**: [`Error::NoUniqueMergeBase`] and
//!   [`Error::BrokenAncestry`] abandon one seed's addition; callers log
//!   them and continue with the tree state untouched.

use std::path::PathBuf;

use crate::commit::CommitId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A commit has more than one parent. Merge commits are unsupported.
    #[error("commit {0} has more than one parent; merge commits are not supported")]
    UnsupportedMergeCommit(CommitId),

    /// The backend reported zero or several merge bases with the main
    /// reference, so there is no usable insertion point for this commit.
    #[error("no unique merge base between {commit} and main reference '{main_ref}'")]
    NoUniqueMergeBase { commit: CommitId, main_ref: String },

    /// The upward ancestor walk ran out of parents before reaching the
    /// merge base. The backend answered inconsistently.
    #[error("commit {0} has no parent but is not the merge base; inconsistent history")]
    BrokenAncestry(CommitId),

    /// A reference or revision could not be resolved.
    #[error("reference not found: {0}")]
    NotFound(String),

    /// The working directory is not inside a git repository.
    #[error("not a git repository: {}", .0.display())]
    RepositoryNotFound(PathBuf),

    /// A git subprocess exited with a failure status.
    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },

    /// Spawning or reading a git subprocess failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this failure abandons a single commit's addition rather
    /// than the whole run.
    #[must_use]
    pub const fn is_per_commit(&self) -> bool {
        matches!(
            self,
            Self::NoUniqueMergeBase { .. } | Self::BrokenAncestry(_)
        )
    }
}
