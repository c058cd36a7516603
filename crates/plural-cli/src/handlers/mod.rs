//! Command handlers
//!
//! Each handler writes its human-readable output to the given writer;
//! diagnostics go through `tracing` to stderr.

pub mod diary;
pub mod export;
pub mod import;
pub mod members;
pub mod messages;
pub mod themes;
