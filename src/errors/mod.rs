//! Error types and error handling for the syntax compiler.
//!
//! This module defines the error types used throughout compilation:
//!
//! - Fatal errors with the offending identifier, syntax string and offset
//! - Recoverable warnings that widen a type instead of failing
//! - Helpful error messages and suggestions

pub mod errors;
