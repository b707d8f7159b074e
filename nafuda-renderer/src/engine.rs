//! Tera rendering engine — [`TemplateEngine`] and [`Renderer`].
//!
//! # Embedded templates
//!
//! | Template            | Used by preset | Notes                                   |
//! |---------------------|----------------|-----------------------------------------|
//! | `base.html.tera`    | all            | document skeleton, grid, badge markup   |
//! | `simple.html.tera`  | `simple`       | bordered two-column badges              |
//! | `nafuda.html.tera`  | `nafuda`       | business-card name tags                 |
//! | `a4.html.tera`      | `a4`           | centred print badges                    |
//!
//! Every template is autoescaped, including user templates that do not end in
//! `.html.tera`, so member names and titles can never inject markup.

use std::collections::BTreeMap;
use std::path::Path;

use tera::Tera;

use nafuda_core::layout::LayoutSpec;
use nafuda_core::types::MemberRecord;

use crate::context::SheetContext;
use crate::document::Document;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates — baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("base.html.tera", include_str!("templates/base.html.tera")),
    ("simple.html.tera", include_str!("templates/simple.html.tera")),
    ("nafuda.html.tera", include_str!("templates/nafuda.html.tera")),
    ("a4.html.tera", include_str!("templates/a4.html.tera")),
];

/// Tera escapes a template when its name ends with one of the registered
/// suffixes; the empty suffix matches every name.
const ESCAPE_EVERY_TEMPLATE: &str = "";

// ---------------------------------------------------------------------------
// TemplateSet
// ---------------------------------------------------------------------------

/// Lookup key for a template: forward slashes, lowercase.
fn template_key(name: &Path) -> String {
    name.to_string_lossy().replace('\\', "/").to_lowercase()
}

fn read_err(path: &Path, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Template sources keyed by [`template_key`]; a later insert replaces an
/// earlier one with the same key.
#[derive(Default)]
struct TemplateSet {
    sources: BTreeMap<String, String>,
}

impl TemplateSet {
    fn embedded() -> Self {
        let mut set = Self::default();
        for (name, body) in TPLS {
            set.insert(Path::new(name), (*body).to_string());
        }
        set
    }

    fn insert(&mut self, name: &Path, body: String) {
        self.sources.insert(template_key(name), body);
    }

    /// Add every `*.tera` file below `root`, keyed by its path relative to `root`.
    fn overlay_dir(&mut self, root: &Path) -> Result<(), RenderError> {
        if !root.is_dir() {
            return Err(RenderError::TemplateDir {
                path: root.to_path_buf(),
            });
        }
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            let mut entries = std::fs::read_dir(&dir)
                .and_then(|rd| rd.map(|e| e.map(|e| e.path())).collect::<Result<Vec<_>, _>>())
                .map_err(|e| read_err(&dir, e))?;
            entries.sort();
            for path in entries {
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "tera") {
                    let body = std::fs::read_to_string(&path).map_err(|e| read_err(&path, e))?;
                    let rel = path.strip_prefix(root).unwrap_or(path.as_path());
                    self.insert(rel, body);
                }
            }
        }
        Ok(())
    }

    fn compile(self) -> Result<Tera, RenderError> {
        let mut tera = Tera::default();
        // Output is escaped whatever a user template is named.
        tera.autoescape_on(vec![ESCAPE_EVERY_TEMPLATE]);
        tera.add_raw_templates(self.sources)?;
        Ok(tera)
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering templates with optional user overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded defaults
/// or add new templates. Template names are lowercase relative paths.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`], loading embedded templates plus any
    /// overrides found in `user_template_dir`, which must be a directory.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let mut set = TemplateSet::embedded();
        if let Some(dir) = user_template_dir {
            set.overlay_dir(dir)?;
        }
        Ok(TemplateEngine {
            tera: set.compile()?,
        })
    }

    pub fn has_template(&self, name: &str) -> bool {
        let name = template_key(Path::new(name));
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render `template` with the supplied context.
    pub fn render(&self, ctx: &SheetContext, template: &str) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        let name = template_key(Path::new(template));
        let content = self.tera.render(&name, &tera_ctx)?;
        Ok(content.replace("\r\n", "\n"))
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Turns an ordered record list into a printable badge sheet.
///
/// Create once with [`Renderer::new`] (embedded templates) or
/// [`Renderer::with_templates`] and reuse.
pub struct Renderer {
    engine: TemplateEngine,
}

impl Renderer {
    /// Construct a new [`Renderer`] with embedded templates.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer {
            engine: TemplateEngine::new(None)?,
        })
    }

    /// Construct a [`Renderer`] whose templates may be overridden from `dir`.
    pub fn with_templates(dir: &Path) -> Result<Self, RenderError> {
        Ok(Renderer {
            engine: TemplateEngine::new(Some(dir))?,
        })
    }

    /// Render `records` into one HTML document using `layout`.
    ///
    /// Pure: the same records and layout always produce the same bytes.
    pub fn render(
        &self,
        records: &[MemberRecord],
        layout: &LayoutSpec,
    ) -> Result<Document, RenderError> {
        layout.validate()?;
        if !self.engine.has_template(&layout.template) {
            return Err(RenderError::UnknownTemplate {
                layout: layout.name.clone(),
                template: layout.template.clone(),
            });
        }
        let ctx = SheetContext::new(records, layout);
        self.render_with_context(&ctx, &layout.template)
    }

    /// Render a caller-provided [`SheetContext`].
    pub fn render_with_context(
        &self,
        ctx: &SheetContext,
        template: &str,
    ) -> Result<Document, RenderError> {
        let content = self.engine.render(ctx, template)?;
        Ok(Document::html(content))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
