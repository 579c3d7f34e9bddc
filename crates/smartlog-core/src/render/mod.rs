//! Rendering the sparse tree for a terminal.
//!
//! - [`refs`]: commit → ref-label lookup ([`refs::RefList`]).
//! - [`summary`]: per-node display lines ([`summary::NodePrinter`]).
//! - [`tree`]: the recursive ASCII layout ([`tree::TreePrinter`]).
//! - [`style`]: pure color functions, kept out of the layout logic.

pub mod refs;
pub mod style;
pub mod summary;
pub mod tree;

pub use refs::RefList;
pub use summary::NodePrinter;
pub use tree::TreePrinter;
