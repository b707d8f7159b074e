//! `nafuda layouts` — show the built-in layouts.

use anyhow::Result;
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use nafuda_core::{LayoutKind, LayoutSpec};

/// Arguments for `nafuda layouts`.
#[derive(Args, Debug)]
pub struct LayoutsArgs {
    /// Print one layout as YAML, ready to edit and pass to --layout-file.
    #[arg(long, value_name = "LAYOUT")]
    pub yaml: Option<crate::LayoutArg>,
}

#[derive(Tabled)]
struct LayoutRow {
    #[tabled(rename = "layout")]
    name: String,
    #[tabled(rename = "grid")]
    grid: String,
    #[tabled(rename = "badge")]
    badge: String,
    #[tabled(rename = "paper")]
    paper: String,
    #[tabled(rename = "display name")]
    display_name: &'static str,
    #[tabled(rename = "template")]
    template: String,
}

impl From<&LayoutSpec> for LayoutRow {
    fn from(spec: &LayoutSpec) -> Self {
        let grid = match spec.grid.rows_per_page {
            Some(rows) => format!("{} × {} / page", spec.grid.columns, rows),
            None => format!("{} columns, flowing", spec.grid.columns),
        };
        let badge = match (spec.grid.badge_width_mm, spec.grid.badge_height_mm) {
            (Some(w), Some(h)) => format!("{w} × {h} mm"),
            (Some(w), None) => format!("{w} mm wide"),
            _ => "fluid".to_string(),
        };
        LayoutRow {
            name: spec.name.clone(),
            grid,
            badge,
            paper: spec.paper.to_string(),
            display_name: if spec.fields.display_name { "shown" } else { "hidden" },
            template: spec.template.clone(),
        }
    }
}

impl LayoutsArgs {
    pub fn run(self) -> Result<()> {
        if let Some(kind) = self.yaml {
            print!("{}", serde_yaml::to_string(&kind.0.spec())?);
            return Ok(());
        }
        let rows: Vec<LayoutRow> = LayoutKind::all()
            .iter()
            .map(|k| LayoutRow::from(&k.spec()))
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
