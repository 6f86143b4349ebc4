use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use obsidianize_core::error::{ConvertError, Result};
use obsidianize_core::walker::{convert_export, ConversionStats};

use crate::cli::{Cli, OutputFormat};

/// Resolve the export root, run the conversion, and print the summary.
pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let root = match &cli.path {
        Some(path) => path.clone(),
        None => prompt_for_path()?,
    };

    tracing::debug!(root = %root.display(), "convert_export");
    let stats = convert_export(&root)?;
    let elapsed = start.elapsed().as_millis() as u64;

    match cli.format {
        OutputFormat::Json => print_json_summary(&stats, elapsed)?,
        OutputFormat::Human => {
            if !cli.quiet {
                print_summary(&stats, elapsed);
            }
        }
    }

    Ok(())
}

/// Interactive mode: ask for the export root on stdout, read one line from
/// stdin.
fn prompt_for_path() -> Result<PathBuf> {
    println!("Notion export path:");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ConvertError::UsageError("no export path given".to_string()));
    }
    Ok(PathBuf::from(trimmed))
}

fn print_summary(stats: &ConversionStats, elapsed: u64) {
    println!("Fixed in {}ms", elapsed);
    println!("{}", "-".repeat(8));
    println!("Directories: {}", stats.directories.len());
    println!("Files: {}", stats.files.len());
    println!("Images: {}", stats.images.len());
    println!("Markdown Links: {}", stats.markdown_links);
    println!("CSV Links: {}", stats.csv_links);
}

fn print_json_summary(stats: &ConversionStats, elapsed: u64) -> Result<()> {
    let summary = serde_json::json!({
        "elapsed_ms": elapsed,
        "directories": stats.directories.len(),
        "files": stats.files.len(),
        "images": stats.images.len(),
        "markdown_links": stats.markdown_links,
        "csv_links": stats.csv_links,
    });
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
