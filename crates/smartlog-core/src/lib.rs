//! smartlog-core library.
//!
//! Builds a sparse tree of "interesting" commits — branch tips, the
//! checked-out commit, and their merge points with a designated main
//! reference — and renders it as an ASCII commit graph. Long stretches of
//! uninteresting history collapse into single edges.
//!
//! # Modules
//!
//! - [`commit`]: commit identity and metadata value types.
//! - [`error`]: the library error taxonomy.
//! - [`repo`]: the [`repo::CommitGraph`] backend trait with a subprocess
//!   git adapter ([`repo::git::GitRepo`]) and a deterministic in-memory
//!   fake ([`repo::mem::MemRepo`]).
//! - [`tree`]: the node arena and the incremental [`tree::Smartlog`]
//!   builder.
//! - [`render`]: ref labels, per-node summaries, terminal styling, and
//!   the recursive tree printer.
//!
//! # Conventions
//!
//! - **Errors**: fallible operations return [`error::Error`] via `?`.
//! - **Logging**: `tracing` macros (`warn!`, `debug!`, `trace!`).

pub mod commit;
pub mod error;
pub mod render;
pub mod repo;
pub mod tree;

pub use commit::{Commit, CommitId};
pub use error::Error;
pub use repo::CommitGraph;
pub use tree::Smartlog;
