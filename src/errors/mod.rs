//! Error types and error handling for the front end.
//!
//! This module defines the diagnostics produced while parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for expectation, prefix and literal failures
//! - Helpful tips attached to each variant

pub mod errors;
