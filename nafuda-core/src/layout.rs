//! Badge sheet layouts.
//!
//! A [`LayoutSpec`] decides which optional slots are rendered and the grid
//! geometry of the printed sheet. Three presets replace what used to be three
//! separate programs:
//!
//! | Preset   | Columns | Rows/page | Badge (mm) | Display name |
//! |----------|---------|-----------|------------|--------------|
//! | `simple` | 2       | flowing   | fluid      | hidden       |
//! | `nafuda` | 2       | 5         | 91 × 55    | shown        |
//! | `a4`     | 2       | 4         | 90 × 65    | shown        |
//!
//! Custom layouts are read from YAML; omitted keys fall back to `simple`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

// ---------------------------------------------------------------------------
// Paper
// ---------------------------------------------------------------------------

/// Print page size, emitted as the CSS `@page { size }` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
}

impl PaperSize {
    pub fn css(&self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::Letter => "letter",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperSize::A4 => write!(f, "a4"),
            PaperSize::Letter => write!(f, "letter"),
        }
    }
}

// ---------------------------------------------------------------------------
// LayoutSpec
// ---------------------------------------------------------------------------

/// Which optional slots appear on each badge. The full name is always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSet {
    pub image: bool,
    pub display_name: bool,
    pub title: bool,
}

impl Default for FieldSet {
    fn default() -> Self {
        Self {
            image: true,
            display_name: false,
            title: true,
        }
    }
}

/// Grid geometry. Dimensions are millimetres; `None` means fluid/flowing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid {
    pub columns: u32,
    pub rows_per_page: Option<u32>,
    pub badge_width_mm: Option<u32>,
    pub badge_height_mm: Option<u32>,
    pub gap_mm: u32,
    pub margin_mm: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            columns: 2,
            rows_per_page: None,
            badge_width_mm: None,
            badge_height_mm: None,
            gap_mm: 4,
            margin_mm: 10,
        }
    }
}

impl Grid {
    /// Badges per printed page, if the layout paginates.
    pub fn per_page(&self) -> Option<usize> {
        self.rows_per_page
            .map(|rows| rows as usize * self.columns as usize)
    }
}

/// Complete description of a badge sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSpec {
    pub name: String,
    /// Template name inside the renderer (embedded or user override).
    pub template: String,
    pub fields: FieldSet,
    pub grid: Grid,
    pub paper: PaperSize,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        LayoutKind::Simple.spec()
    }
}

impl LayoutSpec {
    /// Reject geometries that cannot be laid out.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let invalid = |reason: &str| LayoutError::Invalid {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.template.trim().is_empty() {
            return Err(invalid("template must not be empty"));
        }
        if self.grid.columns == 0 {
            return Err(invalid("grid.columns must be at least 1"));
        }
        if self.grid.rows_per_page == Some(0) {
            return Err(invalid("grid.rows_per_page must be at least 1 when set"));
        }
        if self.grid.badge_width_mm == Some(0) || self.grid.badge_height_mm == Some(0) {
            return Err(invalid("badge dimensions must be positive"));
        }
        Ok(())
    }
}

/// Load and validate a layout from a YAML file.
///
/// Returns `LayoutError::Io` if the file cannot be read and
/// `LayoutError::Parse` (with path + line context) if malformed YAML.
pub fn load_layout(path: &Path) -> Result<LayoutSpec, LayoutError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let layout: LayoutSpec = serde_yaml::from_str(&contents).map_err(|source| {
        LayoutError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    layout.validate()?;
    Ok(layout)
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Built-in layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutKind {
    /// Two-column fluid badges without the display name.
    #[default]
    Simple,
    /// Business-card sized name tags, 2 × 5 per page.
    Nafuda,
    /// A4 print badges, 2 × 4 per page.
    A4,
}

impl LayoutKind {
    pub fn all() -> &'static [LayoutKind] {
        &[LayoutKind::Simple, LayoutKind::Nafuda, LayoutKind::A4]
    }

    pub fn spec(&self) -> LayoutSpec {
        match self {
            LayoutKind::Simple => LayoutSpec {
                name: self.to_string(),
                template: "simple.html.tera".to_string(),
                fields: FieldSet::default(),
                grid: Grid::default(),
                paper: PaperSize::A4,
            },
            LayoutKind::Nafuda => LayoutSpec {
                name: self.to_string(),
                template: "nafuda.html.tera".to_string(),
                fields: FieldSet {
                    image: true,
                    display_name: true,
                    title: true,
                },
                grid: Grid {
                    columns: 2,
                    rows_per_page: Some(5),
                    badge_width_mm: Some(91),
                    badge_height_mm: Some(55),
                    gap_mm: 0,
                    margin_mm: 11,
                },
                paper: PaperSize::A4,
            },
            LayoutKind::A4 => LayoutSpec {
                name: self.to_string(),
                template: "a4.html.tera".to_string(),
                fields: FieldSet {
                    image: true,
                    display_name: true,
                    title: true,
                },
                grid: Grid {
                    columns: 2,
                    rows_per_page: Some(4),
                    badge_width_mm: Some(90),
                    badge_height_mm: Some(65),
                    gap_mm: 5,
                    margin_mm: 12,
                },
                paper: PaperSize::A4,
            },
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Simple => write!(f, "simple"),
            LayoutKind::Nafuda => write!(f, "nafuda"),
            LayoutKind::A4 => write!(f, "a4"),
        }
    }
}

impl FromStr for LayoutKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(LayoutKind::Simple),
            "nafuda" | "tag" => Ok(LayoutKind::Nafuda),
            "a4" => Ok(LayoutKind::A4),
            other => Err(LayoutError::UnknownPreset(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
