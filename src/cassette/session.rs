//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::warn;

use super::recorder::CassetteRecorder;

/// Shared handle to a recorder, held by a recording adapter and the session.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Owns one recorder per port for the duration of a recorded run.
///
/// Cassettes land in `<base>/<timestamp>/<port>.cassette.yaml`.
pub struct RecordingSession {
    /// Recorder for code-generation interactions.
    pub llm: SharedRecorder,
    /// Recorder for filesystem interactions.
    pub fs: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Creates a session whose cassettes go to a fresh timestamped directory
    /// under `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(base: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let commit = commit_hash();
        let make_recorder = |port: &str| -> SharedRecorder {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            Arc::new(Mutex::new(CassetteRecorder::new(path, format!("{timestamp}-{port}"), &commit)))
        };

        Ok(Self { llm: make_recorder("llm"), fs: make_recorder("fs"), output_dir })
    }

    /// Writes every port's cassette and returns the session directory.
    ///
    /// All recording adapters must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still shared or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(shared: SharedRecorder, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(shared)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.llm, "llm")?;
        finish_one(self.fs, "fs")?;
        Ok(self.output_dir)
    }
}

/// HEAD of the git repository in the working directory, or `"unknown"`.
fn commit_hash() -> String {
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string());

    hash.unwrap_or_else(|| {
        warn!("could not read git commit hash, recording 'unknown'");
        "unknown".to_string()
    })
}
