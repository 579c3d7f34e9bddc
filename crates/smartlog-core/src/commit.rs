//! Commit identity and metadata value types.
//!
//! A [`Commit`] is an immutable snapshot of one commit's metadata as read
//! from the backend. Identity is the full content-addressed hash; two
//! `Commit` values compare equal iff their ids are equal, regardless of
//! the rest of the metadata.

use std::fmt;

/// Number of leading hash characters shown in human output.
const SHORT_ID_LEN: usize = 8;

/// A commit's content-addressed identity (the full hex hash).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// The full hash string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for display.
    #[must_use]
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(SHORT_ID_LEN)
            .map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Immutable commit metadata.
///
/// `parents` carries whatever the backend reported; the tree layer rejects
/// commits with more than one parent when it turns them into nodes.
#[derive(Debug, Clone)]
pub struct Commit {
    pub id: CommitId,
    /// Parent commit ids in backend order.
    pub parents: Vec<CommitId>,
    /// Author identity string, e.g. `jdoe@example.com`.
    pub author: String,
    /// Commit timestamp, seconds since the Unix epoch.
    pub timestamp: i64,
    /// Full commit message.
    pub message: String,
}

impl Commit {
    /// The sole parent id, if the commit has exactly one parent.
    #[must_use]
    pub fn sole_parent(&self) -> Option<&CommitId> {
        match self.parents.as_slice() {
            [parent] => Some(parent),
            _ => None,
        }
    }

    /// First line of the commit message.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    /// The portion of the author string before any `@` domain separator.
    #[must_use]
    pub fn author_local(&self) -> &str {
        self.author.split('@').next().unwrap_or(&self.author)
    }
}

impl PartialEq for Commit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Commit {}
