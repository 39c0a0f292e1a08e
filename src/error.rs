//! Error types.

use thiserror::Error;

/// Errors surfaced by the table core.
///
/// Deliberately small: malformed cell values coerce to sentinels, missing
/// comparator kinds fall back to the engine default, and persistence
/// problems degrade to "no saved state", so none of those are errors here.
/// What remains is contract violations and engine failures.
#[derive(Debug, Error)]
pub enum TableError {
    /// Reconciliation was requested against a table that has never been
    /// rendered. A programmer error, not a data problem.
    #[error("table is not live: render it before updating")]
    NotLive,

    /// The render engine failed to create the table.
    #[error("render engine error: {0}")]
    Engine(String),
}
