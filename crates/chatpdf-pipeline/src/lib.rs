//! Ingest and Answer: the two operations the user-facing surface calls

mod pipeline;
mod report;

pub use pipeline::Pipeline;
pub use report::{IndexStatus, IngestReport};
