//! Error types for Sequin operations.
//!
//! This module provides the main error type [`DiagramError`] which covers
//! failures while building scenes, solving layout, and applying
//! configuration.

use thiserror::Error;

/// The main error type for Sequin operations.
#[derive(Debug, Error)]
pub enum DiagramError {
    /// A caller supplied an unusable value, such as an empty participant
    /// list for a spanning note or an unparsable color string.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An internal bookkeeping rule was broken, e.g. the number of measured
    /// contents no longer matches the number of registered contents.
    /// These indicate a bug in the layout engine rather than bad input.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}
