//! Driver error types.

use thiserror::Error;

/// Fixed message raised when the crate was built without the embedded engine.
pub const KUZU_UNAVAILABLE_MSG: &str =
    "Kùzu support is not compiled in. Rebuild with `--features kuzu` to enable the embedded engine";

/// Errors surfaced by the adapter and its supporting layers.
///
/// Engine errors are wrapped as-is and never translated into a different
/// taxonomy; a query either fully succeeds or the whole call fails.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The embedded engine is not available in this build. Fatal at
    /// construction time, before any database file is touched.
    #[error("{KUZU_UNAVAILABLE_MSG}")]
    KuzuUnavailable,

    /// An error raised by the underlying engine during open or connection
    /// setup, propagated unchanged. Execution failures carry the query
    /// text via [`DriverError::Query`] instead.
    #[cfg(feature = "kuzu")]
    #[error("Kùzu error: {0}")]
    Engine(#[from] kuzu::Error),

    /// Query execution failed; carries the offending query text.
    #[error("query failed: {message}")]
    Query { message: String, query: String },

    /// The adapter was closed; no further queries can be issued through it.
    #[error("connection is closed")]
    ConnectionClosed,

    /// A parameter value could not be represented in the engine's type system.
    #[error("unsupported parameter value: {0}")]
    Parameter(String),

    /// Runtime plumbing failure (blocking task join, poisoned lock recovery).
    #[error("internal error: {0}")]
    Internal(String),
}
