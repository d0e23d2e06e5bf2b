//! Recording adapter for the `LlmClient` port.

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{CompletionFuture, CompletionRequest, LlmClient};

/// Records completions while delegating to an inner client.
pub struct RecordingLlmClient {
    inner: Box<dyn LlmClient>,
    recorder: SharedRecorder,
}

impl RecordingLlmClient {
    /// Creates a new recording LLM client wrapping the given implementation.
    pub fn new(inner: Box<dyn LlmClient>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl LlmClient for RecordingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let result = self.inner.complete(&request).await;
            record_result(&self.recorder, "llm", "complete", &request, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::cassette::format::Cassette;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::ports::CompletionResponse;

    struct CannedClient;

    impl LlmClient for CannedClient {
        fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
            Box::pin(async {
                Ok(CompletionResponse {
                    text: "```typescript\nexport {}\n```".into(),
                    prompt_tokens: 12,
                    completion_tokens: 5,
                })
            })
        }
    }

    #[tokio::test]
    async fn records_request_and_response() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llm.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "llm", "abc")));

        let request = CompletionRequest {
            model: "gpt-4o-mini".into(),
            system: "convert".into(),
            prompt: "Path: A.java".into(),
            max_tokens: 100,
            temperature: 0.0,
            top_p: 1.0,
        };
        {
            let client = RecordingLlmClient::new(Box::new(CannedClient), Arc::clone(&recorder));
            let response = client.complete(&request).await.unwrap();
            assert_eq!(response.completion_tokens, 5);
        }

        Arc::try_unwrap(recorder).unwrap().into_inner().unwrap().finish().unwrap();
        let cassette = Cassette::load(&path).unwrap();
        let interaction = &cassette.interactions[0];
        assert_eq!(interaction.input["prompt"], "Path: A.java");
        assert_eq!(interaction.output["Ok"]["text"], "```typescript\nexport {}\n```");
    }
}
