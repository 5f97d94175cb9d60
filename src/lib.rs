//! Import DOCX, PDF and text-like files as display-ready HTML fragments.
//!
//! [`Importer`] picks a reader from the file extension and always hands back
//! an [`ImportResult`]; reader failures become `error` results rather than
//! propagating to the caller.

pub mod docx;
mod docx_html;
pub mod html;
pub mod importer;
pub mod markdown;
pub mod pdf;
pub mod result;
pub mod source;
pub mod text;

pub use docx::{DocumentConverter, DocxConverter};
pub use importer::{Importer, Route};
pub use pdf::{LopdfBackend, PagedDocument, PdfBackend};
pub use result::{ImportKind, ImportResult};
pub use source::{FileHandle, LocalFile, MemoryFile};
