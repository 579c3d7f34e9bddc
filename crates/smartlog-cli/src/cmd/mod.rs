//! Command handlers.

pub mod log;
