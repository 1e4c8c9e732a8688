//! Integration test suite.
//!
//! 1. Query pipeline and print layout properties
//! 2. Persistence across sessions with the file-backed store

pub mod helpers;
pub mod persistence_tests;
pub mod pipeline_tests;
