use crate::docx_html;
use anyhow::{Context, Result};
use async_trait::async_trait;
use docx_rust::DocxFile;
use std::io::Cursor;

/// Turns a word-processor document into an HTML fragment
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn convert_to_html(&self, data: Vec<u8>) -> Result<String>;
}

/// `.docx` conversion backed by `docx-rust`.
///
/// The archive signature is not checked up front; a non-DOCX payload
/// (including legacy binary `.doc`) fails while opening the archive.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxConverter;

#[async_trait]
impl DocumentConverter for DocxConverter {
    async fn convert_to_html(&self, data: Vec<u8>) -> Result<String> {
        convert_docx(data)
    }
}

fn convert_docx(data: Vec<u8>) -> Result<String> {
    let file = DocxFile::from_reader(Cursor::new(data))
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to open DOCX archive")?;
    let docx = file
        .parse()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to parse DOCX content")?;

    let html = docx_html::docx_to_html(&docx);
    tracing::debug!("Converted DOCX to {} bytes of HTML", html.len());
    Ok(html)
}
