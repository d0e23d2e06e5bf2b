//! End-of-pass summary.

use std::fmt;

use super::error::UnitFailure;
use super::unit::{MigrationUnit, UnitStatus};
use crate::config::PassKind;

/// Outcome of one pass, unit by unit.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    /// Identifier tying log lines of one pass together.
    pub run_id: String,
    /// Which pass produced this report.
    pub pass: PassKind,
    /// Number of response segments after trailing blanks were dropped.
    pub segment_count: usize,
    /// Units in discovery order.
    pub units: Vec<MigrationUnit>,
}

impl MigrationReport {
    /// Files written to disk.
    #[must_use]
    pub fn written(&self) -> usize {
        self.units.iter().filter(|u| u.is_written()).count()
    }

    /// Units that ended in the given failure kind.
    #[must_use]
    pub fn count_failed(&self, predicate: impl Fn(&UnitFailure) -> bool) -> usize {
        self.units
            .iter()
            .filter(|u| matches!(&u.status, UnitStatus::Failed(reason) if predicate(reason)))
            .count()
    }

    /// Units that were not written, for any reason.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count_failed(|_| true)
    }

    /// Whether the response segment count matched the number of files.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.segment_count == self.units.len()
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} pass: {} written, {} failed of {} files ({} response segments)",
            self.pass,
            self.written(),
            self.failed(),
            self.units.len(),
            self.segment_count,
        )?;
        if self.failed() > 0 {
            writeln!(
                f,
                "  failures: {} empty, {} missing, {} write errors",
                self.count_failed(|r| *r == UnitFailure::EmptyExtraction),
                self.count_failed(|r| *r == UnitFailure::MissingSegment),
                self.count_failed(|r| matches!(r, UnitFailure::Write(_))),
            )?;
        }
        for unit in &self.units {
            let source = unit.source_path.display();
            match &unit.status {
                UnitStatus::Written => writeln!(f, "  ok      {source} -> {}", unit.dest_path.display())?,
                UnitStatus::Failed(UnitFailure::EmptyExtraction) => {
                    writeln!(f, "  empty   {source}: {}", UnitFailure::EmptyExtraction)?;
                }
                UnitStatus::Failed(UnitFailure::MissingSegment) => {
                    writeln!(f, "  missing {source}: {}", UnitFailure::MissingSegment)?;
                }
                UnitStatus::Failed(reason @ UnitFailure::Write(_)) => {
                    writeln!(f, "  error   {source}: {reason}")?;
                }
                UnitStatus::Pending => writeln!(f, "  pending {source}")?,
            }
            if let Some(err) = &unit.read_error {
                writeln!(f, "          (source unreadable, sent empty: {err})")?;
            }
        }
        if !self.is_aligned() && !self.units.is_empty() {
            writeln!(
                f,
                "warning: {} files but {} response segments; files are paired by position",
                self.units.len(),
                self.segment_count
            )?;
        }
        Ok(())
    }
}
