//! Resolve → render → write, the single entrypoint used by the CLI.
//!
//! The resolver finishes before rendering starts, and the sink only sees a
//! fully rendered document. Any fatal error leaves the destination untouched.

use nafuda_core::layout::LayoutSpec;
use nafuda_core::types::{ChannelId, MemberRecord, RunReport};
use nafuda_renderer::Renderer;
use nafuda_roster::{resolve, RosterSource};

use crate::error::PipelineError;
use crate::writer::{DocumentSink, WriteResult};

/// Outcome of a successful pipeline run.
#[derive(Debug)]
pub struct RunOutcome {
    pub records: Vec<MemberRecord>,
    pub report: RunReport,
    pub badge_count: usize,
    pub write: WriteResult,
}

/// Run the full pipeline for `channel`.
pub fn run<S, K>(
    channel: &ChannelId,
    source: &S,
    renderer: &Renderer,
    layout: &LayoutSpec,
    sink: &mut K,
) -> Result<RunOutcome, PipelineError>
where
    S: RosterSource + ?Sized,
    K: DocumentSink + ?Sized,
{
    let (records, report) = resolve(channel, source)?;
    let (badge_count, write) = render_records(&records, renderer, layout, sink)?;
    Ok(RunOutcome {
        records,
        report,
        badge_count,
        write,
    })
}

/// Render already-resolved records and hand the document to `sink`.
pub fn render_records<K: DocumentSink + ?Sized>(
    records: &[MemberRecord],
    renderer: &Renderer,
    layout: &LayoutSpec,
    sink: &mut K,
) -> Result<(usize, WriteResult), PipelineError> {
    let doc = renderer.render(records, layout)?;
    tracing::info!(
        "rendered {} badge(s) with layout '{}'",
        records.len(),
        layout.name
    );
    let write = sink.write_document(&doc)?;
    Ok((records.len(), write))
}
