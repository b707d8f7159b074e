//! Template context — serializable rendering payload built from records + layout.
//!
//! Nothing time- or environment-dependent goes in here: the same inputs must
//! always serialise to the same context.

use serde::{Deserialize, Serialize};

use nafuda_core::layout::LayoutSpec;
use nafuda_core::types::MemberRecord;

use crate::error::RenderError;

/// Rendering payload for one badge sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetContext {
    pub layout: LayoutCtx,
    /// Badges chunked into printed pages, in reading order.
    pub pages: Vec<PageCtx>,
    pub badge_count: usize,
    pub meta: MetaCtx,
}

/// Layout values the templates consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutCtx {
    pub name: String,
    pub show_image: bool,
    pub show_display_name: bool,
    pub show_title: bool,
    pub columns: u32,
    /// `91mm`, or `1fr` when the badge width is fluid.
    pub column_track: String,
    /// `55mm`, or `auto` when the badge height is fluid.
    pub row_track: String,
    pub gap_mm: u32,
    pub margin_mm: u32,
    /// CSS `@page` size keyword.
    pub paper_css: String,
}

/// One printed page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCtx {
    /// 1-based page number.
    pub number: usize,
    pub badges: Vec<BadgeCtx>,
}

/// The four addressable slots of a badge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeCtx {
    /// 1-based position in the whole sheet.
    pub index: usize,
    pub full_name: String,
    pub display_name: String,
    pub title: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaCtx {
    pub nafuda_version: String,
}

impl LayoutCtx {
    fn from_spec(layout: &LayoutSpec) -> Self {
        let track = |mm: Option<u32>, fluid: &str| {
            mm.map(|v| format!("{v}mm")).unwrap_or_else(|| fluid.to_string())
        };
        LayoutCtx {
            name: layout.name.clone(),
            show_image: layout.fields.image,
            show_display_name: layout.fields.display_name,
            show_title: layout.fields.title,
            columns: layout.grid.columns,
            column_track: track(layout.grid.badge_width_mm, "1fr"),
            row_track: track(layout.grid.badge_height_mm, "auto"),
            gap_mm: layout.grid.gap_mm,
            margin_mm: layout.grid.margin_mm,
            paper_css: layout.paper.css().to_string(),
        }
    }
}

impl From<(usize, &MemberRecord)> for BadgeCtx {
    fn from((index, record): (usize, &MemberRecord)) -> Self {
        BadgeCtx {
            index,
            full_name: record.full_name().to_string(),
            display_name: record.display_name().to_string(),
            title: record.title().to_string(),
            image_url: record.image_ref().to_string(),
        }
    }
}

impl SheetContext {
    /// Build a [`SheetContext`]. Record N becomes badge N; nothing is dropped.
    pub fn new(records: &[MemberRecord], layout: &LayoutSpec) -> Self {
        let badges: Vec<BadgeCtx> = records
            .iter()
            .enumerate()
            .map(|(i, r)| BadgeCtx::from((i + 1, r)))
            .collect();

        let per_page = layout.grid.per_page().unwrap_or(badges.len()).max(1);
        let pages: Vec<PageCtx> = badges
            .chunks(per_page)
            .enumerate()
            .map(|(i, chunk)| PageCtx {
                number: i + 1,
                badges: chunk.to_vec(),
            })
            .collect();

        SheetContext {
            layout: LayoutCtx::from_spec(layout),
            badge_count: records.len(),
            pages,
            meta: MetaCtx {
                nafuda_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
