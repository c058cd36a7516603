//! Integration test utilities for the plural tracker
//!
//! This crate provides a mock of the PluralKit and Simply Plural APIs and a
//! helper for wiring an importer against a real SQLite store.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
