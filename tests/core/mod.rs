//! Core module tests for non-parser functionality
//!
//! Tests for:
//! - Attribute names
//! - Raw value corrections
//! - Aggregation and run summary
//! - Settings persistence and run configuration

pub mod catalog_tests;
pub mod correction_tests;
