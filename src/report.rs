//! Deployment summary

use crate::config::{LIBRARY_SUFFIX, Layout};
use crate::error::Result;
use crate::extract::ExtractionStats;
use crate::platform::PlatformTarget;
use colored::Colorize;
use std::path::Path;

/// Regular-file count and total size of a directory tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub files: usize,
    pub bytes: u64,
}

pub fn tree_stats(path: &Path) -> Result<TreeStats> {
    let mut stats = TreeStats::default();

    if !path.exists() {
        return Ok(stats);
    }

    for entry in walkdir::WalkDir::new(path).follow_links(false).max_open(64) {
        let entry = entry.map_err(|e| anyhow::anyhow!("Failed to read directory: {}", e))?;
        if entry.file_type().is_file() {
            stats.files += 1;
            stats.bytes += entry
                .metadata()
                .map_err(|e| anyhow::anyhow!("Failed to read metadata: {}", e))?
                .len();
        }
    }

    Ok(stats)
}

/// Sorted `.so` file names directly inside a library directory
pub fn library_files(library_dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    if !library_dir.is_dir() {
        return Ok(names);
    }

    for entry in std::fs::read_dir(library_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_file() && name.ends_with(LIBRARY_SUFFIX) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// One line per extracted archive
pub fn print_extraction(stats: &ExtractionStats) {
    println!(
        "    resource: {} files, so: {} files, skipped: {}",
        stats.resources.to_string().bold(),
        stats.libraries.to_string().bold(),
        stats.skipped
    );
}

/// Final summary: library names per platform, then resource totals
pub fn print_summary(layout: &Layout, targets: &[PlatformTarget]) -> Result<()> {
    println!();
    println!("{}", "==> Deployment complete".bold().green());

    for target in targets {
        let library_dir = layout.library_dir(target.abi);
        if !library_dir.is_dir() {
            continue;
        }
        let names = library_files(&library_dir)?;
        println!("  {}/: {}", target.abi.cyan(), names.join(", "));
    }

    let resource_dir = layout.resource_dir();
    if resource_dir.exists() {
        let stats = tree_stats(&resource_dir)?;
        println!(
            "  {}: {} files, {}",
            "resource".cyan(),
            stats.files,
            format_size(stats.bytes)
        );
    }

    Ok(())
}
