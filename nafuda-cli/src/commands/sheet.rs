//! Output options shared by `nafuda render` and `nafuda render-file`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use nafuda_core::{config, layout, LayoutSpec, RunReport};
use nafuda_pipeline::{FileSink, WriteResult};
use nafuda_renderer::Renderer;

use crate::LayoutArg;

pub const DEFAULT_OUTPUT: &str = "name_badges.html";

/// Layout, template and destination flags.
#[derive(Args, Debug)]
pub struct SheetArgs {
    /// Built-in layout: simple | nafuda | a4.
    #[arg(long, short = 'l', value_name = "LAYOUT", default_value = "simple")]
    pub layout: LayoutArg,

    /// YAML layout definition; overrides --layout.
    #[arg(long, value_name = "FILE", conflicts_with = "layout")]
    pub layout_file: Option<PathBuf>,

    /// Directory of `.tera` templates overriding the embedded ones.
    /// Defaults to ~/.nafuda/templates when that directory exists.
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Where to write the HTML sheet.
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Render everything but write no files.
    #[arg(long)]
    pub dry_run: bool,
}

impl SheetArgs {
    /// Resolve the layout spec: file if given, otherwise the preset.
    pub fn layout_spec(&self) -> Result<LayoutSpec> {
        match &self.layout_file {
            Some(path) => layout::load_layout(path)
                .with_context(|| format!("invalid layout file '{}'", path.display())),
            None => Ok(self.layout.0.spec()),
        }
    }

    /// Build the renderer, picking up user templates when present.
    pub fn renderer(&self) -> Result<Renderer> {
        let dir = match &self.templates {
            Some(dir) => Some(dir.clone()),
            None => config::template_dir().ok().filter(|d| d.is_dir()),
        };
        match dir {
            Some(dir) => Renderer::with_templates(&dir)
                .with_context(|| format!("failed to load templates from '{}'", dir.display())),
            None => Renderer::new().context("failed to load embedded templates"),
        }
    }

    pub fn sink(&self) -> FileSink {
        FileSink::new(&self.output).dry_run(self.dry_run)
    }
}

pub fn print_write(write: &WriteResult, badge_count: usize) {
    match write {
        WriteResult::Written { path, .. } => println!(
            "{} {badge_count} badge(s) written to {}",
            "✓".green().bold(),
            path.display()
        ),
        WriteResult::WouldWrite { path, bytes } => println!(
            "[dry-run] ~ {badge_count} badge(s), {bytes} bytes would be written to {}",
            path.display()
        ),
    }
}

pub fn print_skips(report: &RunReport) {
    if !report.has_skips() {
        return;
    }
    println!(
        "{} {} of {} member(s) skipped:",
        "!".yellow().bold(),
        report.skipped.len(),
        report.listed
    );
    for skip in &report.skipped {
        println!("  ·  {} — {}", skip.member_id, skip.reason);
    }
}
