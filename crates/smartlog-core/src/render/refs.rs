//! Commit-to-ref-label mapping.
//!
//! Built once per run from the checkout position, every local branch,
//! and any caller-supplied extra refs (typically the main reference).
//! Lookup is O(1) by commit identity.

use std::collections::HashMap;

use crate::commit::{Commit, CommitId};
use crate::error::Error;
use crate::repo::{CommitGraph, Head};

/// Label recorded against the checked-out commit when HEAD is detached.
const DETACHED_LABEL: &str = "HEAD";

/// Precomputed map from commit identity to human-readable ref labels.
#[derive(Debug, Default)]
pub struct RefList {
    labels: HashMap<CommitId, Vec<String>>,
}

impl RefList {
    /// Build the map from HEAD, all local branches, and `extra_refs`.
    ///
    /// The branch HEAD is attached to renders as `HEAD -> name`; a
    /// detached HEAD records a literal `HEAD` label on its commit.
    ///
    /// # Errors
    ///
    /// Propagates backend failures from listing branches or resolving
    /// HEAD.
    pub fn new<G: CommitGraph>(
        repo: &G,
        extra_refs: &[(String, Commit)],
    ) -> Result<Self, Error> {
        let head = repo.head()?;
        let mut list = Self::default();

        if let Head::Detached { commit } = &head {
            list.push(&commit.id, DETACHED_LABEL.to_string());
        }
        for (name, commit) in repo.local_branches()? {
            list.add(&head, &name, &commit);
        }
        for (name, commit) in extra_refs {
            list.add(&head, name, commit);
        }
        Ok(list)
    }

    fn add(&mut self, head: &Head, name: &str, commit: &Commit) {
        let label = if head.branch() == Some(name) {
            format!("{DETACHED_LABEL} -> {name}")
        } else {
            name.to_string()
        };
        self.push(&commit.id, label);
    }

    fn push(&mut self, id: &CommitId, label: String) {
        self.labels.entry(id.clone()).or_default().push(label);
    }

    /// The labels pointing at `id`, possibly empty.
    #[must_use]
    pub fn get(&self, id: &CommitId) -> &[String] {
        self.labels.get(id).map_or(&[], Vec::as_slice)
    }
}
