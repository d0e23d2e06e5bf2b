//! Replaying adapters that serve recorded interactions from a cassette.

pub mod filesystem;
pub mod llm;

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;

pub use filesystem::ReplayingFileSystem;
pub use llm::ReplayingLlmClient;

/// Takes the recorded output of the next `port`/`method` call.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<Value, String> {
    let mut guard = replayer.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    guard.next_interaction(port, method).map(|interaction| interaction.output)
}

/// Decodes the next recorded result of a fallible `port`/`method` call.
///
/// An exhausted cassette comes back as the call's error.
pub(crate) fn replay_next<T: DeserializeOwned>(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    let output = next_output(replayer, port, method)?;
    replay_result(output, &format!("{port}::{method}"))
}

/// Decodes a recorded `{"Ok": v}` / `{"Err": message}` output.
///
/// A bare value without either key is treated as `Ok`, which keeps
/// hand-written cassettes short.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("Err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string().into());
    }
    let value = match output {
        Value::Object(mut map) if map.contains_key("Ok") => map.remove("Ok").unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_wrapper_and_bare_value_decode_alike() {
        let wrapped: String = replay_result(json!({"Ok": "text"}), "t").unwrap();
        let bare: String = replay_result(json!("text"), "t").unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn err_wrapper_becomes_error() {
        let result: Result<String, _> = replay_result(json!({"Err": "permission denied"}), "t");
        assert_eq!(result.unwrap_err().to_string(), "permission denied");
    }

    #[test]
    fn unit_result_decodes_from_null() {
        let result: Result<(), _> = replay_result(json!({"Ok": null}), "fs::write");
        assert!(result.is_ok());
    }
}
