use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Import DOCX, PDF and text files as HTML fragments
#[derive(Parser, Debug)]
#[command(name = "file2html", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import one or more files (.docx, .doc, .pdf, .txt, .md, .json)
    Import {
        /// Files to import, processed in the order given
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a Markdown file to HTML
    Render {
        /// Path to the Markdown file
        input: PathBuf,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw HTML fragment content
    Html,
    /// Content converted to Markdown
    Markdown,
    /// One JSON object per file: {"type": ..., "content": ...}
    Json,
}
