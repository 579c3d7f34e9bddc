//! Backend query surface over a repository's commit graph.
//!
//! The commit history is externally owned and append-only; the tree
//! builder only needs a narrow read-only interface: resolve a revision,
//! compute merge bases, list local branches, and report where the
//! checkout currently sits. Two implementations exist:
//!
//! - [`git::GitRepo`]: blocking subprocess adapter over the `git` binary.
//! - [`mem::MemRepo`]: deterministic in-memory fake for tests.

pub mod git;
pub mod mem;

use crate::commit::Commit;
use crate::error::Error;

/// Where the checkout currently points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD follows a named local branch.
    Attached { branch: String, commit: Commit },
    /// HEAD points directly at a commit.
    Detached { commit: Commit },
}

impl Head {
    /// The checked-out commit, regardless of attachment.
    #[must_use]
    pub const fn commit(&self) -> &Commit {
        match self {
            Self::Attached { commit, .. } | Self::Detached { commit } => commit,
        }
    }

    /// The attached branch name, if any.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        match self {
            Self::Attached { branch, .. } => Some(branch),
            Self::Detached { .. } => None,
        }
    }
}

/// Read-only queries against the commit graph.
///
/// All calls are blocking and single-attempt; a slow backend blocks the
/// entire tree build.
pub trait CommitGraph {
    /// Resolve a reference name or revision to a commit.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the revision does not resolve.
    fn resolve(&self, rev: &str) -> Result<Commit, Error>;

    /// All merge bases of two commits. Zero entries means disjoint
    /// histories; more than one means an ambiguous (criss-cross) base.
    ///
    /// # Errors
    ///
    /// Backend failures surface as [`Error::Git`] / [`Error::Io`].
    fn merge_base(&self, a: &Commit, b: &Commit) -> Result<Vec<Commit>, Error>;

    /// Every local branch as a `(name, tip commit)` pair.
    ///
    /// # Errors
    ///
    /// Backend failures surface as [`Error::Git`] / [`Error::Io`].
    fn local_branches(&self) -> Result<Vec<(String, Commit)>, Error>;

    /// The current checkout position.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if HEAD does not resolve (e.g. an unborn
    /// branch in a fresh repository).
    fn head(&self) -> Result<Head, Error>;
}
