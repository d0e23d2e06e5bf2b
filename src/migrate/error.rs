//! Failure taxonomy for a migration pass.

use thiserror::Error;

/// Conditions that abort a whole pass.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The code-generation call failed or produced no usable text. Nothing
    /// is written for the pass.
    #[error("generation service failed: {0}")]
    Gateway(String),
    /// The pass settings cannot be used.
    #[error("invalid pass configuration: {0}")]
    Config(String),
}

/// Why a single unit could not be written. Never aborts the pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitFailure {
    /// The response had fewer segments than there were units.
    #[error("no response segment for this file")]
    MissingSegment,
    /// The segment held no fenced code block; nothing was written.
    #[error("no fenced code block in response segment")]
    EmptyExtraction,
    /// The destination file could not be written.
    #[error("write failed: {0}")]
    Write(String),
}
