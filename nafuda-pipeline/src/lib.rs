//! # nafuda-pipeline
//!
//! Badge sheet orchestration and output.
//!
//! Call [`pipeline::run`] to resolve a channel, render it and write the
//! document through a [`DocumentSink`]; [`FileSink`] writes atomically.

pub mod error;
pub mod pipeline;
pub mod writer;

pub use error::{PipelineError, SinkError};
pub use pipeline::{render_records, run, RunOutcome};
pub use writer::{atomic_write, write_json, DocumentSink, FileSink, WriteResult};
