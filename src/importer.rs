use crate::docx::{DocumentConverter, DocxConverter};
use crate::pdf::{self, LopdfBackend, PdfBackend};
use crate::result::ImportResult;
use crate::source::{extension_of, FileHandle};
use crate::text;
use anyhow::Result;
use std::sync::Arc;

/// Which reader handles a file, decided from its extension alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Document,
    Pdf,
    Text,
    Unsupported(String),
}

impl Route {
    pub fn for_name(name: &str) -> Self {
        let extension = extension_of(name);
        match extension.as_str() {
            "docx" | "doc" => Route::Document,
            "pdf" => Route::Pdf,
            "txt" | "md" | "json" => Route::Text,
            _ => Route::Unsupported(extension),
        }
    }
}

/// Routes files to the matching reader and normalizes every outcome
/// into an [`ImportResult`]. This is the only place reader errors are caught.
#[derive(Clone)]
pub struct Importer {
    converter: Arc<dyn DocumentConverter>,
    pdf: Arc<dyn PdfBackend>,
}

impl Default for Importer {
    fn default() -> Self {
        Self::new(Arc::new(DocxConverter), Arc::new(LopdfBackend))
    }
}

impl Importer {
    pub fn new(converter: Arc<dyn DocumentConverter>, pdf: Arc<dyn PdfBackend>) -> Self {
        Self { converter, pdf }
    }

    /// Import a single file. Never fails; failures come back as `Error` results.
    pub async fn import(&self, file: &dyn FileHandle) -> ImportResult {
        let route = Route::for_name(file.name());

        if let Route::Unsupported(extension) = &route {
            tracing::info!("Skipping {}: unsupported extension", file.name());
            return ImportResult::unsupported(extension);
        }

        match self.parse(&route, file).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("File parsing error for {}: {:#}", file.name(), e);
                ImportResult::failed(&format!("{:#}", e))
            }
        }
    }

    /// Import files one after another, preserving input order
    pub async fn import_all<F: FileHandle>(&self, files: &[F]) -> Vec<ImportResult> {
        let mut results = Vec::with_capacity(files.len());
        for file in files {
            results.push(self.import(file).await);
        }
        results
    }

    async fn parse(&self, route: &Route, file: &dyn FileHandle) -> Result<ImportResult> {
        match route {
            Route::Document => {
                let data = file.read_bytes().await?;
                let html = self.converter.convert_to_html(data).await?;
                Ok(ImportResult::html(html))
            }
            Route::Pdf => {
                let data = file.read_bytes().await?;
                let html = pdf::extract_pages(self.pdf.as_ref(), data).await?;
                Ok(ImportResult::html(html))
            }
            Route::Text => text::decode_text(file).await,
            Route::Unsupported(extension) => Ok(ImportResult::unsupported(extension)),
        }
    }
}
