//! Request payload construction.
//!
//! Every source is read, in unit order, before the payload is serialized.
//! A file that cannot be read is sent with empty content so the batch keeps
//! one block per unit and positions still line up with the response.

use std::fmt::Write as _;

use tracing::warn;

use super::unit::MigrationUnit;
use crate::ports::FileSystem;

/// Fills `source_content` for every unit, recording read failures in place.
pub fn load_contents(fs: &dyn FileSystem, units: &mut [MigrationUnit]) {
    for unit in units.iter_mut() {
        match fs.read_to_string(&unit.source_path) {
            Ok(content) => unit.source_content = content,
            Err(e) => {
                warn!(file = %unit.source_path.display(), error = %e, "cannot read source, sending empty content");
                unit.source_content.clear();
                unit.read_error = Some(e.to_string());
            }
        }
    }
}

/// Serializes units as `Path:`/`Content:` blocks, each followed by `delimiter`.
///
/// `header` is a single introductory line placed before the first block.
#[must_use]
pub fn build_payload(units: &[MigrationUnit], delimiter: &str, header: &str) -> String {
    let mut payload = String::new();
    if !header.is_empty() {
        let _ = writeln!(payload, "{header}");
    }
    for unit in units {
        let _ = write!(
            payload,
            "Path: {}\nContent:\n{}\n{delimiter}\n",
            unit.source_path.display(),
            unit.source_content
        );
    }
    payload
}

/// Appends auxiliary context after the primary payload.
///
/// Context only ever follows the file blocks, so it cannot shift the
/// positional pairing of files and response segments.
pub fn append_context(payload: &mut String, blocks: &[String]) {
    for block in blocks.iter().filter(|b| !b.trim().is_empty()) {
        let _ = write!(payload, "\n{}\n", block.trim_end());
    }
}
