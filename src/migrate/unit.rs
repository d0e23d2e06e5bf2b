//! Per-file state carried through a migration pass.

use std::path::PathBuf;

use super::error::UnitFailure;

/// Outcome of a single unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    /// Not yet processed by the output stage.
    Pending,
    /// Generated code was written to `dest_path`.
    Written,
    /// Nothing was written; see the reason.
    Failed(UnitFailure),
}

/// One source file and what became of it.
#[derive(Debug, Clone)]
pub struct MigrationUnit {
    /// Position in discovery order; pairs the unit with a response segment.
    pub index: usize,
    /// File the unit was discovered at.
    pub source_path: PathBuf,
    /// Empty when the read failed.
    pub source_content: String,
    /// Set when the source could not be read.
    pub read_error: Option<String>,
    /// Where the generated file goes.
    pub dest_path: PathBuf,
    /// Code taken from the matching response segment, if any.
    pub extracted_code: String,
    /// Outcome of the unit; `Pending` until the output step runs.
    pub status: UnitStatus,
}

impl MigrationUnit {
    /// A pending unit for the file at `index` in discovery order.
    #[must_use]
    pub fn new(index: usize, source_path: PathBuf, dest_path: PathBuf) -> Self {
        Self {
            index,
            source_path,
            source_content: String::new(),
            read_error: None,
            dest_path,
            extracted_code: String::new(),
            status: UnitStatus::Pending,
        }
    }

    /// Returns `true` once the generated file is on disk.
    #[must_use]
    pub fn is_written(&self) -> bool {
        self.status == UnitStatus::Written
    }
}
