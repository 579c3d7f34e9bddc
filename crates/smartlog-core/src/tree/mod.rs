//! The sparse commit tree.
//!
//! - [`node`]: arena-backed nodes and the memoizing [`node::NodeStore`].
//! - [`build`]: incremental construction via [`build::Smartlog`].

pub mod build;
pub mod node;

pub use build::Smartlog;
pub use node::{Node, NodeId, NodeStore};
