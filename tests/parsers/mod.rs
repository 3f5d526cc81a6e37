//! Parser integration tests
//!
//! - Line and field decoding
//! - Raw value corrections applied while parsing
//! - Trailing window filtering
//! - Error reporting
