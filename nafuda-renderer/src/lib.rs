//! # nafuda-renderer
//!
//! Tera-based renderer that turns an ordered list of member records into a
//! printable HTML badge sheet.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nafuda_core::{LayoutKind, MemberRecord};
//! use nafuda_renderer::Renderer;
//!
//! fn sheet(records: &[MemberRecord]) {
//!     if let Ok(renderer) = Renderer::new() {
//!         if let Ok(doc) = renderer.render(records, &LayoutKind::Nafuda.spec()) {
//!             println!("{} badges, {} bytes", doc.badge_count(), doc.content.len());
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod document;
pub mod engine;
pub mod error;

pub use context::SheetContext;
pub use document::{Document, HTML_CONTENT_TYPE};
pub use engine::{Renderer, TemplateEngine};
pub use error::RenderError;
