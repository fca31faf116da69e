//! Utility functions for code generation, URL processing and error mapping.
//!
//! - [`code_generator`] - Base62 short code generation and code shape checks
//! - [`url_normalizer`] - URL trimming, scheme qualification and sanity checks
//! - [`db_error`] - SQLx error classification

pub mod code_generator;
pub mod db_error;
pub mod url_normalizer;
