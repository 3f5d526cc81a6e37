//! End-to-end tests
//!
//! - Full pipeline runs for both output kinds
//! - Failure handling and output atomicity

pub mod pipeline_tests;
