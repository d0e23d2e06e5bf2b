//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use tracing::warn;

use super::{next_output, replay_next};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations; nothing touches the disk.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn flag(&self, method: &str) -> bool {
        match next_output(&self.replayer, "fs", method) {
            Ok(output) => output.as_bool().unwrap_or(false),
            Err(e) => {
                warn!(error = %e, "replayed filesystem diverged from recording");
                false
            }
        }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        replay_next(&self.replayer, "fs", "read_to_string")
    }

    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        replay_next(&self.replayer, "fs", "write")
    }

    fn create_dir_all(&self, _path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        replay_next(&self.replayer, "fs", "create_dir_all")
    }

    fn is_dir(&self, _path: &Path) -> bool {
        self.flag("is_dir")
    }

    fn list_dir(
        &self,
        _path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        replay_next(&self.replayer, "fs", "list_dir")
    }
}
