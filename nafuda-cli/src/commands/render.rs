//! `nafuda render <channel>` — resolve a channel roster and write its badge sheet.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use nafuda_core::RunConfig;
use nafuda_pipeline::{pipeline, write_json};
use nafuda_roster::{slack::DEFAULT_API_BASE, SlackClient};

use super::sheet::{print_skips, print_write, SheetArgs};

/// Arguments for `nafuda render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Channel id (e.g. C024BE91L), not the #name.
    pub channel: Option<String>,

    /// API token with permission to read channel members and user profiles.
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Per-request timeout in seconds.
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Web API base URL.
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Also write the run report (listed / skipped members) as JSON.
    #[arg(long, value_name = "FILE")]
    pub report_json: Option<PathBuf>,

    /// Also write the resolved records as JSON, for `nafuda render-file`.
    #[arg(long, value_name = "FILE")]
    pub records_out: Option<PathBuf>,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        // Everything that can fail locally is checked before the first request.
        let config = RunConfig::new(self.token.as_deref(), self.channel.as_deref())?;
        let layout = self.sheet.layout_spec()?;
        let renderer = self.sheet.renderer()?;

        let client = SlackClient::with_options(
            config.token.clone(),
            self.api_base.clone(),
            Duration::from_secs(self.timeout),
        );
        let mut sink = self.sheet.sink();

        let outcome = pipeline::run(&config.channel, &client, &renderer, &layout, &mut sink)
            .with_context(|| format!("failed to build badges for channel {}", config.channel))?;

        if !self.sheet.dry_run {
            if let Some(path) = &self.report_json {
                write_json(path, &outcome.report)
                    .with_context(|| format!("failed to write report '{}'", path.display()))?;
            }
            if let Some(path) = &self.records_out {
                write_json(path, &outcome.records)
                    .with_context(|| format!("failed to write records '{}'", path.display()))?;
            }
        }

        print_skips(&outcome.report);
        print_write(&outcome.write, outcome.badge_count);
        let elapsed = outcome.report.finished_at - outcome.report.started_at;
        tracing::info!(
            "resolved {}/{} member(s) in {} ms",
            outcome.report.resolved,
            outcome.report.listed,
            elapsed.num_milliseconds()
        );
        Ok(())
    }
}
