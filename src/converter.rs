use crate::cli::{Command, OutputFormat};
use anyhow::{Context, Result};
use file2html::{markdown, ImportResult, Importer, LocalFile};
use std::path::{Path, PathBuf};

/// Run a parsed command. Returns whether every input imported cleanly.
pub async fn run(command: &Command) -> Result<bool> {
    match command {
        Command::Import {
            inputs,
            format,
            output,
        } => import_files(inputs, *format, output.as_deref()).await,
        Command::Render { input, output } => {
            render_file(input, output.as_deref()).await?;
            Ok(true)
        }
    }
}

async fn import_files(
    inputs: &[PathBuf],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<bool> {
    let importer = Importer::default();
    let files: Vec<LocalFile> = inputs.iter().map(LocalFile::new).collect();
    let results = importer.import_all(&files).await;

    let mut content = String::new();
    for result in &results {
        content.push_str(&format_result(result, format)?);
        if !content.ends_with('\n') {
            content.push('\n');
        }
    }

    write_output(output, &content).await?;

    let failed = results.iter().filter(|r| !r.is_html()).count();
    eprintln!(
        "Imported {} of {} files{}",
        results.len() - failed,
        results.len(),
        if failed > 0 {
            format!(" ({} failed or unsupported)", failed)
        } else {
            String::new()
        }
    );

    Ok(failed == 0)
}

fn format_result(result: &ImportResult, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Html => result.content.clone(),
        OutputFormat::Markdown => markdown::html_to_markdown(&result.content),
        OutputFormat::Json => {
            serde_json::to_string(result).context("Failed to serialize import result")?
        }
    })
}

async fn render_file(input: &Path, output: Option<&Path>) -> Result<()> {
    let text = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read Markdown file: {}", input.display()))?;
    write_output(output, &markdown::render_markdown(&text)).await
}

async fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    let Some(path) = output else {
        print!("{}", content);
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_format_uses_type_field() {
        let result = ImportResult::unsupported("xyz");
        let json = format_result(&result, OutputFormat::Json).unwrap();
        assert_eq!(
            json,
            r#"{"type":"unknown","content":"<p>Unsupported file type: .xyz</p>"}"#
        );
    }

    #[test]
    fn html_format_is_content_verbatim() {
        let result = ImportResult::html("<p>x</p>");
        assert_eq!(format_result(&result, OutputFormat::Html).unwrap(), "<p>x</p>");
    }

    #[tokio::test]
    async fn import_writes_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, "a\nb").unwrap();
        let out = dir.path().join("nested").join("out.html");

        let ok = import_files(&[input], OutputFormat::Html, Some(out.as_path()))
            .await
            .unwrap();

        assert!(ok);
        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            written,
            "<div class=\"text-content font-mono text-sm\">a<br>b</div>\n"
        );
    }

    #[tokio::test]
    async fn unsupported_input_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sheet.xlsx");
        let out = dir.path().join("out.json");

        let ok = import_files(&[input], OutputFormat::Json, Some(out.as_path()))
            .await
            .unwrap();

        assert!(!ok);
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.starts_with(r#"{"type":"unknown""#));
    }

    #[tokio::test]
    async fn render_converts_markdown_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        std::fs::write(&input, "# Title\n").unwrap();
        let out = dir.path().join("doc.html");

        render_file(&input, Some(out.as_path())).await.unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "<h1>Title</h1>\n");
    }
}
