//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Serves a cassette's interactions in recorded order, with an independent
/// queue per `(port, method)` pair.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Takes the next interaction recorded for `port`/`method`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette has no (more) interactions for the
    /// pair, meaning the replayed run asked for more than was recorded.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, String> {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            return Err(format!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            ));
        };

        queue.pop_front().ok_or_else(|| {
            format!(
                "Cassette exhausted: all interactions for port={port:?} method={method:?} \
                 have been consumed"
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), commit: "abc".into(), interactions }
    }

    #[test]
    fn interleaved_ports_replay_in_their_own_order() {
        let cassette = make_cassette(vec![
            interaction(0, "fs", "read_to_string", json!({"Ok": "a"})),
            interaction(1, "llm", "complete", json!({"Ok": {"text": "pages"}})),
            interaction(2, "fs", "read_to_string", json!({"Ok": "b"})),
            interaction(3, "llm", "complete", json!({"Ok": {"text": "tests"}})),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("llm", "complete").unwrap().seq, 1);
        assert_eq!(replayer.next_interaction("fs", "read_to_string").unwrap().seq, 0);
        assert_eq!(replayer.next_interaction("llm", "complete").unwrap().seq, 3);
        assert_eq!(replayer.next_interaction("fs", "read_to_string").unwrap().seq, 2);
    }

    #[test]
    fn exhausted_pair_is_an_error() {
        let cassette = make_cassette(vec![interaction(0, "llm", "complete", json!({}))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        assert!(replayer.next_interaction("llm", "complete").is_ok());
        let err = replayer.next_interaction("llm", "complete").unwrap_err();
        assert!(err.contains("have been consumed"));
    }

    #[test]
    fn unknown_pair_is_an_error() {
        let mut replayer = CassetteReplayer::new(&make_cassette(vec![]));
        let err = replayer.next_interaction("fs", "write").unwrap_err();
        assert!(err.contains("no interactions recorded"));
    }
}
