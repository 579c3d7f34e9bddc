//! Structural invariants of sparse-tree construction over randomly
//! generated single-parent histories.

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use smartlog_core::commit::CommitId;
use smartlog_core::render::{NodePrinter, RefList, TreePrinter};
use smartlog_core::repo::CommitGraph;
use smartlog_core::repo::mem::MemRepo;
use smartlog_core::tree::node::{NodeId, NodeStore};
use smartlog_core::tree::Smartlog;

/// A generated branch: fork point on the main line and branch length.
#[derive(Debug, Clone)]
struct BranchSpec {
    fork: usize,
    len: usize,
}

#[derive(Debug, Clone)]
struct HistorySpec {
    main_len: usize,
    branches: Vec<BranchSpec>,
}

fn arb_history() -> impl Strategy<Value = HistorySpec> {
    (1_usize..8).prop_flat_map(|main_len| {
        let branch = (0..main_len, 1_usize..5).prop_map(|(fork, len)| BranchSpec { fork, len });
        proptest::collection::vec(branch, 0..4)
            .prop_map(move |branches| HistorySpec { main_len, branches })
    })
}

/// Materialize a spec as an in-memory repository.
///
/// Main commits are `m0..mN` with ascending timestamps; branch `j` forks
/// at `m{fork}` with commits `b{j}x{k}`. Branch 0 (when present) is the
/// checkout; otherwise HEAD sits detached on the main tip.
fn build_repo(spec: &HistorySpec) -> MemRepo {
    let mut repo = MemRepo::new();
    for i in 0..spec.main_len {
        let id = format!("m{i}");
        let ts = 100 * (i as i64 + 1);
        if i == 0 {
            repo.commit(&id, &[], ts, "main commit");
        } else {
            let parent = format!("m{}", i - 1);
            repo.commit(&id, &[parent.as_str()], ts, "main commit");
        }
    }
    let tip = format!("m{}", spec.main_len - 1);
    repo.remote_ref("origin/master", &tip);

    for (j, branch) in spec.branches.iter().enumerate() {
        let mut parent = format!("m{}", branch.fork);
        for k in 0..branch.len {
            let id = format!("b{j}x{k}");
            let ts = 100 * (branch.fork as i64 + 1) + 10 * (k as i64 + 1) + j as i64;
            repo.commit(&id, &[parent.as_str()], ts, "branch commit");
            parent = id;
        }
        repo.branch(&format!("br{j}"), &parent);
    }

    if spec.branches.is_empty() {
        repo.checkout_detached(&tip);
    } else {
        repo.checkout_branch("br0");
    }
    repo
}

fn build_tree<'r>(repo: &'r MemRepo) -> Smartlog<'r, MemRepo> {
    let mut log = Smartlog::with_date_limit(repo, "origin/master", None).expect("seed main");
    for (_, commit) in repo.local_branches().expect("branches") {
        log.add_commit(&commit).expect("add branch tip");
    }
    let head = repo.head().expect("head");
    log.add_commit(head.commit()).expect("add head");
    log
}

/// Flatten connected structure into a comparable map:
/// commit id → (parent commit id, child commit ids in order).
fn shape(store: &NodeStore, root: NodeId) -> BTreeMap<String, (String, Vec<String>)> {
    fn name(store: &NodeStore, id: NodeId) -> String {
        store
            .node(id)
            .commit
            .as_ref()
            .map_or_else(|| "<root>".to_string(), |c| c.id.to_string())
    }

    let mut out = BTreeMap::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let node = store.node(id);
        let parent = node.parent.map_or_else(String::new, |p| name(store, p));
        let children: Vec<String> = node.children.iter().map(|&c| name(store, c)).collect();
        out.insert(name(store, id), (parent, children));
        stack.extend(&node.children);
    }
    out
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    /// Every connected non-root node appears exactly once in its
    /// parent's children, nothing appears under two parents, and the
    /// walk terminates (no cycles).
    #[test]
    fn tree_is_consistent(spec in arb_history()) {
        let repo = build_repo(&spec);
        let log = build_tree(&repo);
        let store = log.store();

        let mut seen: HashSet<String> = HashSet::new();
        let mut stack = vec![log.root()];
        let mut visited = 0_usize;
        while let Some(id) = stack.pop() {
            visited += 1;
            prop_assert!(visited < 10_000, "cycle suspected");
            for &child in &store.node(id).children {
                prop_assert_eq!(store.node(child).parent, Some(id));
                let occurrences = store
                    .node(id)
                    .children
                    .iter()
                    .filter(|&&c| c == child)
                    .count();
                prop_assert_eq!(occurrences, 1);
                let child_name = store.node(child).commit.as_ref().expect("non-root").id.to_string();
                prop_assert!(seen.insert(child_name), "node under two parents");
                stack.push(child);
            }
        }
    }

    /// Re-adding every seed leaves the structure identical.
    #[test]
    fn construction_is_idempotent(spec in arb_history()) {
        let repo = build_repo(&spec);
        let once = build_tree(&repo);

        let mut twice = Smartlog::with_date_limit(&repo, "origin/master", None).expect("seed");
        for _ in 0..2 {
            for (_, commit) in repo.local_branches().expect("branches") {
                twice.add_commit(&commit).expect("add");
            }
            let head = repo.head().expect("head");
            twice.add_commit(head.commit()).expect("add head");
        }

        prop_assert_eq!(
            shape(once.store(), once.root()),
            shape(twice.store(), twice.root())
        );
    }

    /// Every fork point a branch hangs off is marked as main line, and
    /// the main tip stays connected to the root.
    #[test]
    fn fork_points_are_main(spec in arb_history()) {
        let repo = build_repo(&spec);
        let log = build_tree(&repo);
        let store = log.store();

        for branch in &spec.branches {
            let fork = CommitId::new(format!("m{}", branch.fork));
            let id = store.lookup(&fork).expect("fork point present");
            prop_assert!(store.node(id).is_main);
            prop_assert!(store.is_connected(id));
        }
        let tip = CommitId::new(format!("m{}", spec.main_len - 1));
        let tip_node = store.lookup(&tip).expect("main tip present");
        prop_assert!(store.node(tip_node).is_main);
    }

    /// Display ordering: a main child sorts first; the rest are
    /// non-decreasing by commit timestamp.
    #[test]
    fn sibling_order_is_main_first_then_oldest(spec in arb_history()) {
        let repo = build_repo(&spec);
        let log = build_tree(&repo);
        let store = log.store();
        let head = repo.head().expect("head").commit().id.clone();
        let refs = RefList::new(&repo, &[]).expect("refs");
        let printer = NodePrinter::new(&refs, head.clone(), 1_000_000, false);
        let tree = TreePrinter::new(store, &printer, head);

        let mut stack = vec![log.root()];
        while let Some(id) = stack.pop() {
            let ordered = tree.sorted_children(id);
            for (i, &child) in ordered.iter().enumerate() {
                if store.node(child).is_main {
                    prop_assert_eq!(i, 0, "main child must sort first");
                }
            }
            let timestamps: Vec<i64> = ordered
                .iter()
                .skip(usize::from(ordered.first().is_some_and(|&c| store.node(c).is_main)))
                .filter_map(|&c| store.node(c).commit.as_ref().map(|commit| commit.timestamp))
                .collect();
            prop_assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
            stack.extend(&store.node(id).children);
        }
    }
}
