//! Terminal styling as pure functions.
//!
//! Rendering decisions ("this is the checked-out commit") map to styled
//! text here and nowhere else; the tree algorithm and summary assembly
//! stay color-free. Every function takes an explicit enable flag so
//! piped output stays plain.

use crossterm::style::Stylize;

/// Commit id: yellow, or magenta for the checked-out commit.
#[must_use]
pub fn commit_id(text: &str, is_head: bool, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    if is_head {
        text.magenta().to_string()
    } else {
        text.yellow().to_string()
    }
}

/// External review identifier: blue.
#[must_use]
pub fn review_id(text: &str, color: bool) -> String {
    if color {
        text.blue().to_string()
    } else {
        text.to_string()
    }
}

/// Parenthesized ref labels: green.
#[must_use]
pub fn ref_labels(text: &str, color: bool) -> String {
    if color {
        text.green().to_string()
    } else {
        text.to_string()
    }
}
