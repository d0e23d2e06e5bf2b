//! Destination mapping and per-unit writes.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::error::UnitFailure;
use super::extract::CodeBlockExtractor;
use super::unit::{MigrationUnit, UnitStatus};
use crate::ports::FileSystem;

/// Destination of `source` inside `dest_folder`.
///
/// The first occurrence of `source_ext` in the file name is replaced by
/// `target_ext`; a name without it gets `target_ext` appended.
#[must_use]
pub fn dest_path(source: &Path, dest_folder: &Path, source_ext: &str, target_ext: &str) -> PathBuf {
    let name = source.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let mapped = if name.contains(source_ext) && !source_ext.is_empty() {
        name.replacen(source_ext, target_ext, 1)
    } else {
        format!("{name}{target_ext}")
    };
    dest_folder.join(mapped)
}

/// Writes the code extracted from `segments[i]` to `units[i].dest_path`.
///
/// Each unit gets its own outcome; a failed unit never stops the next one.
/// Units past the end of `segments` fail with [`UnitFailure::MissingSegment`].
pub fn write_all(
    fs: &dyn FileSystem,
    units: &mut [MigrationUnit],
    segments: &[String],
    extractor: &CodeBlockExtractor,
) {
    for unit in units.iter_mut() {
        unit.status = write_one(fs, unit, segments.get(unit.index), extractor);
        match &unit.status {
            UnitStatus::Written => info!(
                source = %unit.source_path.display(),
                dest = %unit.dest_path.display(),
                "migrated"
            ),
            UnitStatus::Failed(reason) => warn!(
                source = %unit.source_path.display(),
                %reason,
                "not migrated"
            ),
            UnitStatus::Pending => {}
        }
    }
}

fn write_one(
    fs: &dyn FileSystem,
    unit: &mut MigrationUnit,
    segment: Option<&String>,
    extractor: &CodeBlockExtractor,
) -> UnitStatus {
    let Some(segment) = segment else {
        return UnitStatus::Failed(UnitFailure::MissingSegment);
    };
    let code = extractor.extract(segment);
    if code.is_empty() {
        return UnitStatus::Failed(UnitFailure::EmptyExtraction);
    }
    unit.extracted_code = code.to_string();
    match fs.write(&unit.dest_path, &unit.extracted_code) {
        Ok(()) => UnitStatus::Written,
        Err(e) => UnitStatus::Failed(UnitFailure::Write(e.to_string())),
    }
}
