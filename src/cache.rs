//! Local archive cache (`.maa-cache/` under the project root).
//!
//! Archives are stored under their upstream asset names. An entry is reused
//! when its byte size equals the size the release declares; there is no
//! content hash to check against.

use crate::config::ARCHIVE_SUFFIX;
use crate::error::Result;
use crate::platform::{ABI_MAP, AbiSelection, PlatformTarget};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Check whether a cached archive can be reused without downloading
pub fn is_cached(path: &Path, expected_size: u64) -> bool {
    match std::fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.len() == expected_size,
        Err(_) => false,
    }
}

/// All cached archives, sorted by file name
pub fn cached_archives(cache_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archives = Vec::new();

    if !cache_dir.is_dir() {
        return Ok(archives);
    }

    for entry in std::fs::read_dir(cache_dir)? {
        let entry = entry?;
        let path = entry.path();

        let is_archive = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(ARCHIVE_SUFFIX));
        if is_archive && path.is_file() {
            archives.push(path);
        }
    }

    archives.sort();
    Ok(archives)
}

/// The newest cached archive for each requested platform, in ABI order.
///
/// Several releases may have left archives for the same platform in the
/// cache; the most recently written one wins, ties going to the later name.
pub fn deployable_archives(
    cache_dir: &Path,
    selection: AbiSelection,
) -> Result<Vec<(PathBuf, PlatformTarget)>> {
    let mut deployable = Vec::new();
    let archives = cached_archives(cache_dir)?;

    for target in ABI_MAP.iter().filter(|t| selection.includes(t)) {
        let mut newest: Option<(SystemTime, &PathBuf)> = None;

        for archive in &archives {
            let name = archive
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !target.matches(&name) {
                continue;
            }
            let modified = std::fs::metadata(archive)?
                .modified()
                .unwrap_or(SystemTime::UNIX_EPOCH);
            if newest.is_none_or(|(time, _)| modified >= time) {
                newest = Some((modified, archive));
            }
        }

        if let Some((_, archive)) = newest {
            tracing::debug!("{} deploys from {}", target.abi, archive.display());
            deployable.push((archive.clone(), *target));
        }
    }

    Ok(deployable)
}
