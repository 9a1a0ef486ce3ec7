// Terminal output for both binaries: banners, the search result listing, the
// upload report, and a spinner shown while a webhook call is blocking.
// Printing functions take any `Write` so tests can capture the output.

use crate::config::Config;
use crate::models::{SearchResult, UploadResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

/// Characters of chunk text shown per result unless verbose.
pub const PREVIEW_CHARS: usize = 200;

fn rule() -> String {
    "=".repeat(80)
}

/// Run `f` with a spinner on stderr. The spinner hides itself when stderr is
/// not a terminal.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    out
}

pub fn print_search_banner(
    out: &mut impl Write,
    query: &str,
    namespace: &str,
    top_k: usize,
    min_score: f64,
) -> io::Result<()> {
    writeln!(out, "🔍 Search: {query}")?;
    writeln!(out, "📁 Namespace: {namespace}")?;
    writeln!(out, "🎯 Top-K: {top_k}")?;
    writeln!(out, "⭐ Min Score: {min_score}")?;
    writeln!(out, "{}", rule())
}

/// Print each result: position, score, source, chunk index, id and text.
/// Text is cut to `PREVIEW_CHARS` characters unless `verbose` is set.
pub fn print_results(out: &mut impl Write, results: &[SearchResult], verbose: bool) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "No results found.");
    }

    writeln!(out, "\nResults found: {}\n", results.len())?;
    writeln!(out, "{}", rule())?;

    for (i, result) in results.iter().enumerate() {
        writeln!(out, "\nResult #{}:", i + 1)?;
        writeln!(out, "  Score: {:.4}", result.score)?;
        writeln!(out, "  Source: {}", result.source_or_unknown())?;
        writeln!(out, "  Chunk Index: {}", result.chunk_index_or_default())?;
        writeln!(out, "  ID: {}", result.id_display())?;
        if verbose {
            writeln!(out, "  Text: {}", result.text)?;
        } else {
            writeln!(out, "  Text: {}", preview(&result.text))?;
        }
        writeln!(out, "{}", "-".repeat(80))?;
    }
    Ok(())
}

/// First `PREVIEW_CHARS` characters followed by an ellipsis.
pub fn preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

pub fn print_no_results_hint(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n❌ No results found")?;
    writeln!(out, "Try:")?;
    writeln!(out, "- Using different keywords")?;
    writeln!(out, "- Checking the spelling")?;
    writeln!(out, "- Using more general wording")
}

pub fn print_upload_banner(
    out: &mut impl Write,
    data_dir: &Path,
    url: &str,
    namespace: &str,
) -> io::Result<()> {
    writeln!(out, "{}", rule())?;
    writeln!(out, "📁 Uploading files from a directory to Pinecone")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "Directory: {}", data_dir.display())?;
    writeln!(out, "Webhook URL: {url}")?;
    writeln!(out, "Namespace: {namespace}")?;
    writeln!(out, "{}", rule())
}

pub fn print_upload_start(
    out: &mut impl Write,
    file_count: usize,
    url: &str,
    namespace: &str,
    config: &Config,
) -> io::Result<()> {
    writeln!(out, "\n📤 Sending {file_count} files to Pinecone...")?;
    writeln!(out, "   Webhook URL: {url}")?;
    writeln!(out, "   Namespace: {namespace}")?;
    if config.verbose_logging {
        writeln!(out, "   Chunk size: {}", config.chunk_size)?;
        writeln!(out, "   Chunk overlap: {}", config.chunk_overlap)?;
        writeln!(out, "   Max file size: {}MB", config.max_file_size_mb())?;
    }
    Ok(())
}

pub fn print_upload_result(out: &mut impl Write, result: &UploadResult) -> io::Result<()> {
    writeln!(out, "\n✅ Upload succeeded!")?;
    writeln!(out, "   Files processed: {}", result.total_files)?;
    writeln!(out, "   Vectors upserted: {}", result.total_upserted)?;

    if !result.file_results.is_empty() {
        writeln!(out, "\n📊 Per-file statistics:")?;
        for file in &result.file_results {
            writeln!(out, "   File #{}: {} vectors", file.file_index, file.upserted)?;
        }
    }
    writeln!(out, "\n✅ All files processed successfully!")
}
