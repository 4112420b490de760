//! Utility functions for token generation and URL processing.
//!
//! - [`code_generator`] - Short token generation
//! - [`url_normalizer`] - URL normalization and input sanitation

pub mod code_generator;
pub mod url_normalizer;
