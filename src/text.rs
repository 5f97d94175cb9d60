use crate::html;
use crate::result::ImportResult;
use crate::source::FileHandle;
use anyhow::Result;

const UTF8_BOM: char = '\u{feff}';

/// Read a text-like file and present it as a monospace block.
///
/// Every `\n` becomes `<br>`; nothing else about the text is reflowed.
pub async fn decode_text(file: &dyn FileHandle) -> Result<ImportResult> {
    let bytes = match file.read_bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Failed to read text file {}: {:#}", file.name(), e);
            return Err(e);
        }
    };

    Ok(ImportResult::html(text_to_html(&bytes)))
}

fn text_to_html(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let text = decoded.strip_prefix(UTF8_BOM).unwrap_or(&decoded);
    let body = html::escape_text(text).replace('\n', "<br>");
    format!("<div class=\"text-content font-mono text-sm\">{}</div>", body)
}
