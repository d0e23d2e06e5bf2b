//! Replaying adapter for the `LlmClient` port.

use std::sync::Mutex;

use super::replay_next;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

/// Serves recorded completions from a cassette, in recorded order.
pub struct ReplayingLlmClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingLlmClient {
    /// Create a replaying LLM client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl LlmClient for ReplayingLlmClient {
    fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
        let result = replay_next::<CompletionResponse>(&self.replayer, "llm", "complete");
        Box::pin(async move { result })
    }
}
