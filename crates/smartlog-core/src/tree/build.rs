//! Incremental sparse-tree construction.
//!
//! [`Smartlog`] grows a tree whose nodes are seed commits (branch tips,
//! the checkout), merge points between seeds and the main line, and
//! main-line ancestors. Construction only needs single-commit merge-base
//! queries against the backend; newly discovered ancestors are spliced
//! into the already-built tree so ancestor ordering stays correct.
//!
//! # Failure isolation
//!
//! Per-commit failures ([`Error::NoUniqueMergeBase`],
//! [`Error::BrokenAncestry`]) abandon one seed and leave prior structure
//! untouched: links are written only after the whole insertion point is
//! resolved, never mid-walk.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, trace};

use crate::commit::Commit;
use crate::error::Error;
use crate::repo::CommitGraph;
use crate::tree::node::{NodeId, NodeStore};

/// Builder for the sparse commit tree.
#[derive(Debug)]
pub struct Smartlog<'r, G: CommitGraph> {
    repo: &'r G,
    main_ref: String,
    main_commit: Commit,
    store: NodeStore,
    main: NodeId,
    /// Seeds with a timestamp before this are silently skipped.
    date_limit: Option<i64>,
}

impl<'r, G: CommitGraph> Smartlog<'r, G> {
    /// Build the initial tree: a synthetic root with the main reference's
    /// commit as its sole child.
    ///
    /// `max_age` is an optional seed-age bound in seconds, measured from
    /// now; `None` disables age filtering.
    ///
    /// # Errors
    ///
    /// Fails if `main_ref` does not resolve or its commit has more than
    /// one parent.
    pub fn new(repo: &'r G, main_ref: &str, max_age: Option<u64>) -> Result<Self, Error> {
        let limit = max_age.map(|age| unix_now() - i64::try_from(age).unwrap_or(i64::MAX));
        Self::with_date_limit(repo, main_ref, limit)
    }

    /// Like [`Smartlog::new`], but with an absolute cutoff timestamp
    /// (seconds since the epoch) instead of a relative age.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Smartlog::new`].
    pub fn with_date_limit(
        repo: &'r G,
        main_ref: &str,
        date_limit: Option<i64>,
    ) -> Result<Self, Error> {
        let main_commit = repo.resolve(main_ref)?;
        let mut store = NodeStore::new();
        let main = store.get(&main_commit)?;
        store.node_mut(main).is_main = true;
        let root = store.root();
        store.link(main, root);
        debug!(main_ref, main = %main_commit.id, "seeded main line");
        Ok(Self {
            repo,
            main_ref: main_ref.to_string(),
            main_commit,
            store,
            main,
            date_limit,
        })
    }

    /// The finished (or in-progress) tree.
    #[must_use]
    pub const fn store(&self) -> &NodeStore {
        &self.store
    }

    /// The synthetic root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.store.root()
    }

    /// The main reference name this tree was built against.
    #[must_use]
    pub fn main_ref(&self) -> &str {
        &self.main_ref
    }

    /// The main reference's commit.
    #[must_use]
    pub const fn main_commit(&self) -> &Commit {
        &self.main_commit
    }

    /// Add a seed commit and every ancestor up to its merge point with
    /// the main line.
    ///
    /// Re-adding an already-connected commit is a cheap no-op, as is a
    /// seed older than the configured age cutoff.
    ///
    /// # Errors
    ///
    /// [`Error::NoUniqueMergeBase`] or [`Error::BrokenAncestry`] abandon
    /// this seed only (the tree is unchanged); other errors are fatal.
    pub fn add_commit(&mut self, commit: &Commit) -> Result<(), Error> {
        if let Some(limit) = self.date_limit {
            if commit.timestamp < limit {
                trace!(commit = %commit.id, "seed older than age cutoff; skipped");
                return Ok(());
            }
        }

        let node = self.store.get(commit)?;

        // One merge-base query locates this seed's junction with the
        // main line.
        let bases = self.repo.merge_base(commit, &self.main_commit)?;
        let [lca_commit] = bases.as_slice() else {
            return Err(Error::NoUniqueMergeBase {
                commit: commit.id.clone(),
                main_ref: self.main_ref.clone(),
            });
        };
        let lca = self.store.get(lca_commit)?;
        self.store.node_mut(lca).is_main = true;
        if !self.store.is_connected(lca) {
            self.insert_lca(lca, lca_commit)?;
        }

        // Walk single-parent ancestry from the seed toward the merge
        // point, stopping early at anything already connected. Links are
        // collected first and written in one pass so a backend failure
        // mid-walk cannot leave a partial chain.
        let mut links: Vec<(NodeId, NodeId)> = Vec::new();
        let mut current = node;
        while current != lca && !self.store.is_connected(current) {
            let parent_id = self
                .store
                .node(current)
                .commit
                .as_ref()
                .and_then(Commit::sole_parent)
                .cloned()
                .ok_or_else(|| Error::BrokenAncestry(commit.id.clone()))?;
            let parent = match self.store.lookup(&parent_id) {
                Some(existing) => existing,
                None => {
                    let parent_commit = self.repo.resolve(parent_id.as_str())?;
                    self.store.get(&parent_commit)?
                }
            };
            links.push((current, parent));
            current = parent;
        }
        for (child, parent) in links {
            self.store.link(child, parent);
        }
        trace!(commit = %commit.id, "seed added");
        Ok(())
    }

    /// Splice a newly discovered merge point into the main line so the
    /// tree keeps the sparse ancestor ordering of the underlying history.
    ///
    /// Walks upward from the current main-line node; at each candidate,
    /// `lca` belongs directly above it iff the merge base of `lca` and
    /// the candidate's parent is exactly that parent. Reaching a child
    /// of the root means `lca` predates everything visible.
    fn insert_lca(&mut self, lca: NodeId, lca_commit: &Commit) -> Result<(), Error> {
        if lca == self.main {
            return Ok(());
        }

        let root = self.store.root();
        let mut candidate = self.main;
        loop {
            let Some(parent) = self.store.node(candidate).parent else {
                // Main-line nodes are connected by construction; an
                // orphan here means the walk left the tree.
                return Err(Error::BrokenAncestry(lca_commit.id.clone()));
            };
            if parent == root {
                self.store.splice(lca, candidate, root);
                debug!(lca = %lca_commit.id, "merge point predates visible history");
                return Ok(());
            }
            let parent_commit = self
                .store
                .node(parent)
                .commit
                .clone()
                .ok_or_else(|| Error::BrokenAncestry(lca_commit.id.clone()))?;
            let bases = self.repo.merge_base(lca_commit, &parent_commit)?;
            if let [base] = bases.as_slice() {
                if base.id == parent_commit.id {
                    self.store.splice(lca, candidate, parent);
                    debug!(lca = %lca_commit.id, above = %parent_commit.id, "merge point spliced");
                    return Ok(());
                }
            }
            candidate = parent;
        }
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
