//! Recording adapters that delegate to a live port and capture each call.

pub mod filesystem;
pub mod llm;

use serde::Serialize;
use serde_json::Value;

use crate::cassette::session::SharedRecorder;

pub use filesystem::RecordingFileSystem;
pub use llm::RecordingLlmClient;

/// Records an infallible call.
///
/// Mirror of `replaying::next_output`.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input = serde_json::to_value(input).unwrap_or(Value::Null);
    let output = serde_json::to_value(output).unwrap_or(Value::Null);
    push(recorder, port, method, input, output);
}

/// Records a fallible call as `{"Ok": v}` or `{"Err": message}`.
///
/// Mirror of `replaying::replay_result`.
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input = serde_json::to_value(input).unwrap_or(Value::Null);
    let output = match result {
        Ok(v) => serde_json::json!({ "Ok": serde_json::to_value(v).unwrap_or(Value::Null) }),
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };
    push(recorder, port, method, input, output);
}

fn push(recorder: &SharedRecorder, port: &str, method: &str, input: Value, output: Value) {
    let mut guard = recorder.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    guard.record(port, method, input, output);
}
