//! Recursive ASCII-graph rendering of the sparse tree.
//!
//! Children render depth-first with descendants above their ancestor, so
//! the newest work sits at the top and the main line runs down the left
//! edge. Edge glyphs distinguish history: `|` joins commits that are
//! immediate parent/child, `:` marks an edge that skips elided commits,
//! and `/` marks the point where a side branch rejoins the line below.
//! The checked-out commit gets a `*` bullet; everything else `o`.

use std::fmt::Write as _;

use crate::commit::CommitId;
use crate::render::summary::NodePrinter;
use crate::tree::node::{NodeId, NodeStore};

/// Every rendered node occupies at least this many summary lines.
const MIN_SUMMARY_LINES: usize = 2;

/// Renders the whole tree as left-aligned multi-line text.
pub struct TreePrinter<'a> {
    store: &'a NodeStore,
    printer: &'a NodePrinter<'a>,
    head: CommitId,
}

impl<'a> TreePrinter<'a> {
    #[must_use]
    pub const fn new(store: &'a NodeStore, printer: &'a NodePrinter<'a>, head: CommitId) -> Self {
        Self {
            store,
            printer,
            head,
        }
    }

    /// Render the full structure starting at the root.
    #[must_use]
    pub fn print_tree(&self) -> String {
        let mut out = String::new();
        self.print_node(&mut out, self.store.root(), "");
        out
    }

    /// Children of `node` in display order: the `is_main` child first,
    /// the rest by ascending commit timestamp.
    #[must_use]
    pub fn sorted_children(&self, node: NodeId) -> Vec<NodeId> {
        let mut children = self.store.node(node).children.clone();
        children.sort_by_key(|&child| {
            let node = self.store.node(child);
            if node.is_main {
                (0, 0)
            } else {
                (1, node.commit.as_ref().map_or(0, |c| c.timestamp))
            }
        });
        children
    }

    fn print_node(&self, out: &mut String, node: NodeId, prefix: &str) {
        let children = self.sorted_children(node);
        // The first sibling's edge becomes the shared vertical rule that
        // threads past the remaining siblings at this level.
        let mut rule = "";
        for (i, &child) in children.iter().enumerate() {
            let child_prefix = format!("{prefix}{rule}{}", if i > 0 { " " } else { "" });
            self.print_node(out, child, &child_prefix);

            let child_node = self.store.node(child);
            let is_head = child_node
                .commit
                .as_ref()
                .is_some_and(|commit| commit.id == self.head);
            let mut summary = self.printer.node_summary(child_node);
            while summary.len() < MIN_SUMMARY_LINES {
                summary.push(String::new());
            }

            // Bullet line.
            let bullet = if is_head { "*" } else { "o" };
            if i == 0 {
                emit(out, prefix, &format!("{rule}{bullet}"), &summary[0]);
            } else {
                emit(out, prefix, &format!("{rule} {bullet}"), &summary[0]);
            }

            // Direct edges draw solid; edges skipping elided commits draw
            // dashed.
            let edge = if self.store.is_direct_child(child) {
                "|"
            } else {
                ":"
            };
            if i == 0 {
                rule = edge;
            }

            // Second line; non-first siblings rejoin the rule diagonally.
            if i == 0 {
                emit(out, prefix, rule, &summary[1]);
            } else {
                emit(out, prefix, &format!("{rule}/ "), &summary[1]);
            }
            if i > 0 {
                rule = edge;
            }

            // Remaining summary lines keep the same indentation.
            let graph = if i == 0 {
                rule.to_string()
            } else {
                format!("{edge}  ")
            };
            for line in &summary[MIN_SUMMARY_LINES..] {
                emit(out, prefix, &graph, line);
            }

            // Spacer row separating this node from the next sibling.
            let spacer = if i + 1 < children.len() { rule } else { edge };
            let _ = writeln!(out, "{}", format!("{prefix}{spacer}").trim_end());
        }
    }
}

fn emit(out: &mut String, prefix: &str, graph: &str, text: &str) {
    let _ = writeln!(out, "{}", format!("{prefix}{graph}  {text}").trim_end());
}
