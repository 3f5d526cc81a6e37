//! smartplot - plot S.M.A.R.T. attribute logs written by smartd
//!
//! This library parses the attribute log smartd writes with `--attributelog`
//! and renders every attribute as a time series chart.
//!
//! ## Module Structure
//!
//! - [`parsers`] - attribute log parser and parsed data types
//! - [`catalog`] - attribute ids and their canonical names
//! - [`correction`] - raw value masking and vendor interpretation rules
//! - [`aggregate`] - naming, selection, event check and run summary
//! - [`export`] - PDF and PNG renderers with atomic output files
//! - [`config`] - command line surface and resolved run configuration
//! - [`settings`] - user settings persistence
//! - [`pipeline`] - a full run from input file to output files
//! - [`error`] - error type

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod correction;
pub mod error;
pub mod export;
pub mod parsers;
pub mod pipeline;
pub mod settings;

pub use error::{Result, SmartPlotError};
