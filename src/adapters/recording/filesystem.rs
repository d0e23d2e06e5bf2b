//! Recording adapter for the `FileSystem` port.

use std::path::Path;

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::session::SharedRecorder;
use crate::ports::FileSystem;

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: SharedRecorder,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput {
    path: String,
}

impl PathInput {
    fn new(path: &Path) -> Self {
        Self { path: path.display().to_string() }
    }
}

/// Writes record the byte length, not the contents; generated files are
/// reproduced from the llm cassette on replay.
#[derive(Serialize)]
struct WriteInput {
    path: String,
    bytes: usize,
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.read_to_string(path);
        record_result(&self.recorder, "fs", "read_to_string", &PathInput::new(path), &result);
        result
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.write(path, contents);
        let input = WriteInput { path: path.display().to_string(), bytes: contents.len() };
        record_result(&self.recorder, "fs", "write", &input, &result);
        result
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.create_dir_all(path);
        record_result(&self.recorder, "fs", "create_dir_all", &PathInput::new(path), &result);
        result
    }

    fn is_dir(&self, path: &Path) -> bool {
        let result = self.inner.is_dir(path);
        record_interaction(&self.recorder, "fs", "is_dir", &PathInput::new(path), &result);
        result
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.list_dir(path);
        record_result(&self.recorder, "fs", "list_dir", &PathInput::new(path), &result);
        result
    }
}
