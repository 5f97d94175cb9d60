//! Paginated PDF text extraction.
//!
//! Pages are read one after another in page order. A failure on any page
//! aborts the whole extraction; no partial output is produced.

use crate::html;
use anyhow::{Context, Result};
use async_trait::async_trait;
use lopdf::{Document, ObjectId};
use std::collections::BTreeMap;

/// Opens a binary buffer as a multi-page document
#[async_trait]
pub trait PdfBackend: Send + Sync {
    async fn open(&self, data: Vec<u8>) -> Result<Box<dyn PagedDocument>>;
}

/// An opened multi-page document
#[async_trait]
pub trait PagedDocument: Send + Sync {
    fn page_count(&self) -> u32;
    /// Text fragments of a 1-indexed page, in the order the document reports them
    async fn text_fragments(&self, page: u32) -> Result<Vec<String>>;
}

/// PDF backend built on `lopdf`
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfBackend;

#[async_trait]
impl PdfBackend for LopdfBackend {
    async fn open(&self, data: Vec<u8>) -> Result<Box<dyn PagedDocument>> {
        let document = Document::load_mem(&data).context("Failed to open PDF document")?;
        let pages = document.get_pages();
        tracing::debug!("Opened PDF with {} pages", pages.len());
        Ok(Box::new(LopdfDocument { document, pages }))
    }
}

struct LopdfDocument {
    document: Document,
    pages: BTreeMap<u32, ObjectId>,
}

#[async_trait]
impl PagedDocument for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn text_fragments(&self, page: u32) -> Result<Vec<String>> {
        if !self.pages.contains_key(&page) {
            anyhow::bail!("Page {} does not exist", page);
        }

        let text = self
            .document
            .extract_text(&[page])
            .with_context(|| format!("Failed to extract text from page {}", page))?;

        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Extract every page's text into one HTML block, with a heading per page
pub async fn extract_pages(backend: &dyn PdfBackend, data: Vec<u8>) -> Result<String> {
    let document = backend.open(data).await?;
    let mut full_text = String::new();

    for i in 1..=document.page_count() {
        let fragments = document.text_fragments(i).await?;
        let page_text = html::escape_text(&fragments.join(" "));
        full_text.push_str(&format!("<h3>Page {}</h3><p>{}</p>", i, page_text));
    }

    Ok(format!("<div class=\"pdf-content\">{}</div>", full_text))
}
