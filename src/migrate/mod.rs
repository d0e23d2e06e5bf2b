//! The correlation-and-splitting pipeline.
//!
//! One pass discovers source files, batches them into a single request,
//! splits the single response back into per-file segments, and writes each
//! segment's code to the destination derived from the file at the same
//! position. Correlation is positional only.

pub mod batch;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod scan;
pub mod split;
pub mod unit;

pub use error::{MigrationError, UnitFailure};
pub use report::MigrationReport;
pub use unit::{MigrationUnit, UnitStatus};
