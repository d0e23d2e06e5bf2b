//! Boundary to the code-generation service.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::MigrationError;
use crate::ports::{CompletionRequest, LlmClient};

/// Sampling and sizing parameters for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Model identifier passed to the provider.
    pub model: String,
    /// Output size cap.
    pub max_tokens: u32,
    /// Sampling temperature; `0.0` is the most deterministic.
    pub temperature: f32,
    /// Nucleus sampling cutoff.
    pub top_p: f32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self { model: "gpt-4o-mini".into(), max_tokens: 2000, temperature: 0.0, top_p: 1.0 }
    }
}

/// Sends the instruction and payload, returning the raw response text.
///
/// # Errors
///
/// Returns [`MigrationError::Gateway`] when the call fails or the service
/// answers with nothing but whitespace.
pub async fn generate(
    llm: &dyn LlmClient,
    system: &str,
    payload: &str,
    params: &ModelParams,
) -> Result<String, MigrationError> {
    let request = CompletionRequest {
        model: params.model.clone(),
        system: system.to_string(),
        prompt: payload.to_string(),
        max_tokens: params.max_tokens,
        temperature: params.temperature,
        top_p: params.top_p,
    };

    debug!(model = %request.model, bytes = payload.len(), "sending generation request");
    let response =
        llm.complete(&request).await.map_err(|e| MigrationError::Gateway(e.to_string()))?;

    if response.text.trim().is_empty() {
        return Err(MigrationError::Gateway("response contained no text".into()));
    }
    info!(
        prompt_tokens = response.prompt_tokens,
        completion_tokens = response.completion_tokens,
        "generation complete"
    );
    Ok(response.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{CompletionFuture, CompletionResponse};

    struct Fixed(Result<&'static str, &'static str>);

    impl LlmClient for Fixed {
        fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
            let result = self.0;
            Box::pin(async move {
                result
                    .map(|text| CompletionResponse {
                        text: text.into(),
                        prompt_tokens: 1,
                        completion_tokens: 1,
                    })
                    .map_err(Into::into)
            })
        }
    }

    #[tokio::test]
    async fn returns_text_verbatim() {
        let text = generate(&Fixed(Ok(" a ---*--- b ")), "sys", "payload", &ModelParams::default())
            .await
            .unwrap();
        assert_eq!(text, " a ---*--- b ");
    }

    #[tokio::test]
    async fn blank_response_is_a_gateway_failure() {
        let err = generate(&Fixed(Ok("  \n")), "sys", "payload", &ModelParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MigrationError::Gateway(_)));
    }

    #[tokio::test]
    async fn service_error_is_a_gateway_failure() {
        let err = generate(&Fixed(Err("403 forbidden")), "sys", "payload", &ModelParams::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "generation service failed: 403 forbidden");
    }
}
