//! Centralized error handling for Tagcode.
//!
//! This module provides a robust error handling system that strictly avoids panics,
//! ensuring that all failure conditions are properly propagated through the `Result` type.
//!
//! ## Design Philosophy
//!
//! Tagcode's error handling is designed with the following principles:
//!
//! 1. **No Panics:** All error conditions are represented as `Result` values. The library
//!    enforces this through `#![deny(clippy::unwrap_used)]` and `#![deny(clippy::panic)]`.
//!
//! 2. **Terminal Failures:** Every error is terminal for the operation that raised it.
//!    The library performs no internal retry, no partial fallback and no silent
//!    defaulting; callers decide whether to retry or abort.
//!
//! 3. **Contextual Information:** Parse failures carry the offset and a snippet of the
//!    input that failed to match; lookup failures name both the requested tag and the
//!    abstract type it was resolved against.
//!
//! 4. **Cloneable Errors:** The [`TagcodeError`] type is `Clone`, allowing errors to be
//!    shared across threads or stored for later analysis.
//!
//! ## Error Categories
//!
//! Errors are categorized by their domain:
//!
//! - **Configuration** ([`TagcodeError::Configuration`]): registration protocol misuse
//! - **Parse** ([`TagcodeError::Parse`]): input not matching the wire grammar
//! - **Lookup** ([`TagcodeError::Lookup`]): unknown tag under an abstract type
//! - **Internal** ([`TagcodeError::Internal`]): logic errors (should not occur in production)
//!
//! ## Usage Patterns
//!
//! ```rust
//! use tagcode::{Tagcode, TagcodeError, IntCodec};
//!
//! match Tagcode::decode(&IntCodec, "not a number") {
//!     Ok(n) => println!("decoded {n}"),
//!     Err(TagcodeError::Parse(msg)) => eprintln!("bad input: {msg}"),
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! ```

use std::fmt;

/// A specialized `Result` type for Tagcode operations.
///
/// This type alias is used throughout the library to simplify error handling.
/// It is equivalent to `std::result::Result<T, TagcodeError>`.
///
/// ## Examples
///
/// ```rust
/// use tagcode::Result;
///
/// fn my_function() -> Result<i32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, TagcodeError>;

/// The master error enum covering all failure domains in Tagcode.
///
/// Each variant corresponds to a specific failure domain and contains a
/// descriptive message about the error.
///
/// ## Variants
///
/// - **Configuration:** A registration's identity or components were read before being
///   set, or set twice to conflicting values. Always an initialization-time defect of
///   the program itself — never recoverable at the call site.
/// - **Parse:** `read` encountered input that does not match the expected grammar token
///   (missing tag name, missing delimiter, malformed field). No partial value is produced.
/// - **Lookup:** `Registry::resolve` found no registration matching the requested tag
///   under the given abstract type. Indicates a typo in the tag, a never-registered
///   subtype, or data produced by an unknown type variant.
/// - **Internal:** Logic errors in the library or its callers (poisoned locks, values
///   handed to a registration of a different type). Please report reproducible cases.
#[derive(Debug, Clone)]
pub enum TagcodeError {
    /// The registration protocol was violated (read-before-set or conflicting re-set).
    Configuration(String),

    /// The input text does not match the wire grammar at the reported offset.
    Parse(String),

    /// No registered subtype matches the requested tag under the abstract type.
    Lookup(String),

    /// Logic error that should not occur in production.
    Internal(String),
}

impl fmt::Display for TagcodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(s) => write!(f, "Configuration Error: {s}"),
            Self::Parse(s) => write!(f, "Parse Error: {s}"),
            Self::Lookup(s) => write!(f, "Lookup Error: {s}"),
            Self::Internal(s) => write!(f, "Internal Logic Error: {s}"),
        }
    }
}

impl std::error::Error for TagcodeError {}
