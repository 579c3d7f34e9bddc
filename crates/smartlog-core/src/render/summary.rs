//! Per-node display text.
//!
//! [`NodePrinter::node_summary`] produces the lines shown next to each
//! bullet in the graph: a metadata line (short id, author, review id,
//! ref labels, relative age) and the commit message summary. The root
//! node produces no lines; callers pad short results to the two-line
//! minimum before layout.

use chrono::DateTime;

use crate::commit::CommitId;
use crate::render::refs::RefList;
use crate::render::style;
use crate::tree::node::Node;

/// Trailer label recognized for external review identifiers.
const REVIEW_TRAILER: &str = "Differential Revision:";

/// Formats the display text for a single node.
pub struct NodePrinter<'a> {
    refs: &'a RefList,
    head: CommitId,
    /// Reference instant for relative ages, seconds since the epoch.
    now: i64,
    color: bool,
}

impl<'a> NodePrinter<'a> {
    #[must_use]
    pub const fn new(refs: &'a RefList, head: CommitId, now: i64, color: bool) -> Self {
        Self {
            refs,
            head,
            now,
            color,
        }
    }

    /// Display lines for a node: metadata line then message summary.
    /// Empty for the commit-less root.
    #[must_use]
    pub fn node_summary(&self, node: &Node) -> Vec<String> {
        let Some(commit) = &node.commit else {
            return Vec::new();
        };

        let mut fields = Vec::new();
        let is_head = commit.id == self.head;
        fields.push(style::commit_id(commit.id.short(), is_head, self.color));
        fields.push(commit.author_local().to_string());
        if let Some(review) = review_id(&commit.message) {
            fields.push(style::review_id(review, self.color));
        }
        let labels = self.refs.get(&commit.id);
        if !labels.is_empty() {
            let joined = format!("({})", labels.join(", "));
            fields.push(style::ref_labels(&joined, self.color));
        }
        fields.push(relative_age(commit.timestamp, self.now));

        vec![fields.join("  "), commit.summary().to_string()]
    }
}

/// Scan a commit message for the review trailer and return the final
/// path segment of its value.
fn review_id(message: &str) -> Option<&str> {
    message.lines().find_map(|line| {
        let value = line.strip_prefix(REVIEW_TRAILER)?.trim();
        value.rsplit('/').next().filter(|tail| !tail.is_empty())
    })
}

/// Bucketed relative age of `timestamp` against `now`.
///
/// Future-dated commits yield an explicit invalid marker rather than a
/// bucketed value; ages beyond a month fall back to the calendar date.
#[must_use]
pub fn relative_age(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;
    if diff < 0 {
        return "<Invalid time>".to_string();
    }

    let days = diff / 86_400;
    if days == 0 {
        return if diff < 10 {
            "just now".to_string()
        } else if diff < 60 {
            format!("{diff} seconds ago")
        } else if diff < 120 {
            "a minute ago".to_string()
        } else if diff < 3_600 {
            format!("{} minutes ago", diff / 60)
        } else if diff < 7_200 {
            "an hour ago".to_string()
        } else {
            format!("{} hours ago", diff / 3_600)
        };
    }
    if days == 1 {
        return "Yesterday".to_string();
    }
    if days < 7 {
        return format!("{days} days ago");
    }
    if days < 31 {
        return format!("{} weeks ago", days / 7);
    }

    DateTime::from_timestamp(timestamp, 0)
        .map_or_else(|| "<Invalid time>".to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}
