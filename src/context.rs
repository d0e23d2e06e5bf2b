//! Service context bundling the port trait objects.

use std::path::Path;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::recording::{RecordingFileSystem, RecordingLlmClient};
use crate::adapters::replaying::ReplayingLlmClient;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

/// The external boundaries a migration touches.
///
/// The code-generation client is always handed in; nothing in the pipeline
/// builds one from ambient credentials.
pub struct ServiceContext {
    /// Filesystem for scanning, reading sources and writing output.
    pub fs: Box<dyn FileSystem>,
    /// Client for the code-generation service.
    pub llm: Box<dyn LlmClient>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, llm: Box<dyn LlmClient>) -> Self {
        Self { fs, llm }
    }

    /// Real disk with the given generation client.
    #[must_use]
    pub fn with_llm(llm: Box<dyn LlmClient>) -> Self {
        Self::new(Box::new(LiveFileSystem), llm)
    }

    /// Real disk and client, both recorded into a new session under `base`.
    ///
    /// The session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(
        base: &Path,
        llm: Box<dyn LlmClient>,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(base)?;
        let ctx = Self::new(
            Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), session.fs.clone())),
            Box::new(RecordingLlmClient::new(llm, session.llm.clone())),
        );
        Ok((ctx, session))
    }
}

/// Generation client answering from a recorded cassette, in recording order.
///
/// Re-running a recorded migration with it rewrites the same files without
/// calling the service.
///
/// # Errors
///
/// Returns an error if the cassette file cannot be read or parsed.
pub fn replayed_llm(path: &Path) -> Result<Box<dyn LlmClient>, String> {
    let cassette = Cassette::load(path)?;
    Ok(Box::new(ReplayingLlmClient::new(CassetteReplayer::new(&cassette))))
}

/// Stand-in client for commands that never call the generation service.
///
/// Any call fails instead of reaching a provider, so no credentials are
/// needed to build it.
pub struct NoGeneration;

impl LlmClient for NoGeneration {
    fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
        let err: Box<dyn std::error::Error + Send + Sync> =
            "this command does not use the generation service".into();
        Box::pin(async move { Err::<CompletionResponse, _>(err) })
    }
}
