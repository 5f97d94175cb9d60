use crate::html;
use serde::Serialize;

/// What an import produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// Converted document content
    Html,
    /// The file extension is not one we import
    Unknown,
    /// A reader or converter failed
    Error,
}

/// Normalized outcome of importing one file.
///
/// `content` is always an HTML fragment, including for `Unknown` and `Error`
/// where it carries a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    #[serde(rename = "type")]
    pub kind: ImportKind,
    pub content: String,
}

impl ImportResult {
    pub fn html(content: impl Into<String>) -> Self {
        Self {
            kind: ImportKind::Html,
            content: content.into(),
        }
    }

    pub fn unsupported(extension: &str) -> Self {
        Self {
            kind: ImportKind::Unknown,
            content: format!(
                "<p>Unsupported file type: .{}</p>",
                html::escape_text(extension)
            ),
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            kind: ImportKind::Error,
            content: format!(
                "<p class=\"text-red-500\">Error parsing file: {}</p>",
                html::escape_text(message)
            ),
        }
    }

    pub fn is_html(&self) -> bool {
        self.kind == ImportKind::Html
    }
}
