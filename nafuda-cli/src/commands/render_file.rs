//! `nafuda render-file <records>` — render a saved record list without network access.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use nafuda_core::MemberRecord;
use nafuda_pipeline::pipeline;

use super::sheet::{print_write, SheetArgs};

/// Arguments for `nafuda render-file`.
#[derive(Args, Debug)]
pub struct RenderFileArgs {
    /// JSON or YAML list of records (`full_name`, `display_name`, `title`, `image_ref`).
    pub records: PathBuf,

    #[command(flatten)]
    pub sheet: SheetArgs,
}

impl RenderFileArgs {
    pub fn run(self) -> Result<()> {
        let records = load_records(&self.records)?;
        let layout = self.sheet.layout_spec()?;
        let renderer = self.sheet.renderer()?;
        let mut sink = self.sheet.sink();

        let (badge_count, write) =
            pipeline::render_records(&records, &renderer, &layout, &mut sink)
                .context("failed to render badge sheet")?;
        print_write(&write, badge_count);
        Ok(())
    }
}

fn load_records(path: &Path) -> Result<Vec<MemberRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read records file '{}'", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let records = if is_yaml {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML records '{}'", path.display()))?
    } else {
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON records '{}'", path.display()))?
    };
    Ok(records)
}
