//! Deterministic in-memory backend for tests.
//!
//! Stores commits in a hash-keyed map and answers the same queries as the
//! real adapter. Merge bases are computed generically over the stored
//! parent links (which may include multi-parent commits), so tests can
//! exercise the zero-base and many-base degradations that the tree
//! builder must survive.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::commit::{Commit, CommitId};
use crate::error::Error;
use crate::repo::{CommitGraph, Head};

/// In-memory commit graph with named refs and a movable HEAD.
#[derive(Debug, Default)]
pub struct MemRepo {
    commits: HashMap<CommitId, Commit>,
    /// Resolvable names (local branches, remote refs) to commit ids.
    refs: HashMap<String, CommitId>,
    /// Local branch names in creation order.
    branches: Vec<String>,
    head: Option<HeadSpec>,
}

#[derive(Debug)]
enum HeadSpec {
    Attached(String),
    Detached(CommitId),
}

impl MemRepo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit with the given parents and timestamp.
    pub fn commit(&mut self, id: &str, parents: &[&str], timestamp: i64, message: &str) -> CommitId {
        self.commit_by(id, parents, timestamp, message, "test@example.com")
    }

    /// Add a commit with an explicit author.
    pub fn commit_by(
        &mut self,
        id: &str,
        parents: &[&str],
        timestamp: i64,
        message: &str,
        author: &str,
    ) -> CommitId {
        let id = CommitId::new(id);
        let commit = Commit {
            id: id.clone(),
            parents: parents.iter().map(|p| CommitId::from(*p)).collect(),
            author: author.into(),
            timestamp,
            message: message.into(),
        };
        self.commits.insert(id.clone(), commit);
        id
    }

    /// Create or move a local branch.
    pub fn branch(&mut self, name: &str, target: &str) {
        if !self.branches.iter().any(|b| b == name) {
            self.branches.push(name.to_string());
        }
        self.refs.insert(name.to_string(), CommitId::new(target));
    }

    /// Create or move a non-branch ref (e.g. `origin/master`).
    pub fn remote_ref(&mut self, name: &str, target: &str) {
        self.refs.insert(name.to_string(), CommitId::new(target));
    }

    /// Attach HEAD to a local branch.
    pub fn checkout_branch(&mut self, name: &str) {
        self.head = Some(HeadSpec::Attached(name.to_string()));
    }

    /// Detach HEAD onto a commit.
    pub fn checkout_detached(&mut self, target: &str) {
        self.head = Some(HeadSpec::Detached(CommitId::new(target)));
    }

    fn get(&self, id: &CommitId) -> Result<Commit, Error> {
        self.commits
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// All ancestors of `start`, including `start` itself.
    fn ancestor_set(&self, start: &CommitId) -> HashSet<CommitId> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(start.clone());
        queue.push_back(start.clone());
        while let Some(id) = queue.pop_front() {
            if let Some(commit) = self.commits.get(&id) {
                for parent in &commit.parents {
                    if seen.insert(parent.clone()) {
                        queue.push_back(parent.clone());
                    }
                }
            }
        }
        seen
    }
}

impl CommitGraph for MemRepo {
    fn resolve(&self, rev: &str) -> Result<Commit, Error> {
        if let Some(id) = self.refs.get(rev) {
            return self.get(id);
        }
        let id = CommitId::new(rev);
        if self.commits.contains_key(&id) {
            return self.get(&id);
        }
        Err(Error::NotFound(rev.to_string()))
    }

    fn merge_base(&self, a: &Commit, b: &Commit) -> Result<Vec<Commit>, Error> {
        let ancestors_a = self.ancestor_set(&a.id);
        let ancestors_b = self.ancestor_set(&b.id);
        let common: HashSet<&CommitId> = ancestors_a.intersection(&ancestors_b).collect();

        // A common ancestor is a merge base iff none of its descendants is
        // also a common ancestor: no commit strictly between it and the
        // tips is shared.
        let mut bases: Vec<Commit> = common
            .iter()
            .filter(|&&candidate| {
                !common
                    .iter()
                    .any(|&other| other != candidate && self.ancestor_set(other).contains(candidate))
            })
            .map(|&id| self.get(id))
            .collect::<Result<_, _>>()?;
        bases.sort_by(|x, y| x.id.cmp(&y.id));
        Ok(bases)
    }

    fn local_branches(&self) -> Result<Vec<(String, Commit)>, Error> {
        self.branches
            .iter()
            .map(|name| {
                let id = self
                    .refs
                    .get(name)
                    .ok_or_else(|| Error::NotFound(name.clone()))?;
                Ok((name.clone(), self.get(id)?))
            })
            .collect()
    }

    fn head(&self) -> Result<Head, Error> {
        match &self.head {
            Some(HeadSpec::Attached(branch)) => Ok(Head::Attached {
                branch: branch.clone(),
                commit: self.resolve(branch)?,
            }),
            Some(HeadSpec::Detached(id)) => Ok(Head::Detached {
                commit: self.get(id)?,
            }),
            None => Err(Error::NotFound("HEAD".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// main:  m0 ── m1 ── m2
    /// side:   └─ b0 ── b1
    fn forked_repo() -> MemRepo {
        let mut repo = MemRepo::new();
        repo.commit("m0", &[], 100, "base");
        repo.commit("m1", &["m0"], 200, "main one");
        repo.commit("m2", &["m1"], 300, "main two");
        repo.commit("b0", &["m0"], 150, "branch zero");
        repo.commit("b1", &["b0"], 250, "branch one");
        repo.remote_ref("origin/master", "m2");
        repo.branch("feature", "b1");
        repo.checkout_branch("feature");
        repo
    }

    #[test]
    fn resolve_by_ref_and_by_id() {
        let repo = forked_repo();
        assert_eq!(repo.resolve("origin/master").expect("ref").id.as_str(), "m2");
        assert_eq!(repo.resolve("b0").expect("id").id.as_str(), "b0");
        assert!(matches!(repo.resolve("nope"), Err(Error::NotFound(_))));
    }

    #[test]
    fn merge_base_of_fork_is_fork_point() {
        let repo = forked_repo();
        let b1 = repo.resolve("b1").expect("b1");
        let m2 = repo.resolve("m2").expect("m2");
        let bases = repo.merge_base(&b1, &m2).expect("bases");
        assert_eq!(bases.len(), 1);
        assert_eq!(bases[0].id.as_str(), "m0");
    }

    #[test]
    fn merge_base_when_one_is_ancestor() {
        let repo = forked_repo();
        let m1 = repo.resolve("m1").expect("m1");
        let m2 = repo.resolve("m2").expect("m2");
        let bases = repo.merge_base(&m1, &m2).expect("bases");
        assert_eq!(bases.len(), 1);
        assert_eq!(bases[0].id.as_str(), "m1");
    }

    #[test]
    fn merge_base_disjoint_roots_is_empty() {
        let mut repo = MemRepo::new();
        repo.commit("a", &[], 100, "a");
        repo.commit("b", &[], 100, "b");
        let a = repo.resolve("a").expect("a");
        let b = repo.resolve("b").expect("b");
        assert!(repo.merge_base(&a, &b).expect("bases").is_empty());
    }

    #[test]
    fn merge_base_criss_cross_has_two_bases() {
        // root ─ a1 ┬ ma ─ a2
        //       ╳ (both merges take a1 and b1)
        // root ─ b1 ┴ mb ─ b2
        let mut repo = MemRepo::new();
        repo.commit("root", &[], 100, "root");
        repo.commit("a1", &["root"], 200, "a1");
        repo.commit("b1", &["root"], 210, "b1");
        repo.commit("ma", &["a1", "b1"], 300, "merge a");
        repo.commit("mb", &["a1", "b1"], 310, "merge b");
        repo.commit("a2", &["ma"], 400, "a2");
        repo.commit("b2", &["mb"], 410, "b2");

        let a2 = repo.resolve("a2").expect("a2");
        let b2 = repo.resolve("b2").expect("b2");
        let bases = repo.merge_base(&a2, &b2).expect("bases");
        let ids: Vec<&str> = bases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b1"]);
    }

    #[test]
    fn head_attached_and_detached() {
        let mut repo = forked_repo();
        match repo.head().expect("head") {
            Head::Attached { branch, commit } => {
                assert_eq!(branch, "feature");
                assert_eq!(commit.id.as_str(), "b1");
            }
            Head::Detached { .. } => panic!("expected attached head"),
        }

        repo.checkout_detached("m1");
        match repo.head().expect("head") {
            Head::Detached { commit } => assert_eq!(commit.id.as_str(), "m1"),
            Head::Attached { .. } => panic!("expected detached head"),
        }
    }

    #[test]
    fn local_branches_keep_creation_order() {
        let mut repo = forked_repo();
        repo.branch("zed", "m1");
        repo.branch("alpha", "m2");
        let names: Vec<String> = repo
            .local_branches()
            .expect("branches")
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["feature", "zed", "alpha"]);
    }
}
