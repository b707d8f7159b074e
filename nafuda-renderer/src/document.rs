//! The rendered artifact handed to a sink.

/// MIME type of every document the renderer produces.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A complete rendered document. The renderer never decides where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    pub content_type: &'static str,
}

impl Document {
    pub fn html(content: String) -> Self {
        Self {
            content,
            content_type: HTML_CONTENT_TYPE,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// Number of badge blocks in the document.
    pub fn badge_count(&self) -> usize {
        self.content.matches(r#"class="badge""#).count()
    }
}
