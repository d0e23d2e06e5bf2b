//! Cassettes: YAML recordings of port interactions.
//!
//! A recorded migration can be replayed later without calling the
//! code-generation service, which makes runs reproducible.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
