//! Archive extraction and routing into the app tree.
//!
//! A platform archive is a gzip-compressed tar holding the Core build output:
//! ```text
//! MAA-v6.3.0-android-arm64.tar.gz
//!   include/AsstCaller.h          -> skipped (header)
//!   resource/tasks.json           -> assets/MaaSync/MaaResource/tasks.json
//!   resource/template/a.png       -> assets/MaaSync/MaaResource/template/a.png
//!   libMaaCore.so                 -> jniLibs/arm64-v8a/libMaaCore.so
//!   libc++_shared.so              -> skipped (excluded runtime)
//!   README.md                     -> skipped
//! ```
//!
//! Every regular file lands in exactly one bucket. The rules are checked in
//! order and the first match wins, see [`classify`]. Contiguous entries count
//! as regular files; directories, links and other entry types are ignored.

use crate::config::{
    EXCLUDE_SO, IGNORE_EXTENSIONS, LIBRARY_SUFFIX, Layout, RESOURCE_COMPONENT,
};
use crate::platform::PlatformTarget;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tar::{Archive, EntryType};

/// Where a regular file entry goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Relative path below the resource tree
    Resource(PathBuf),
    /// File name inside the platform's library directory
    Library(String),
    /// The `resource` component itself with nothing after it
    ResourceRoot,
    Skip,
}

/// Per-archive counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub resources: usize,
    pub libraries: usize,
    pub skipped: usize,
    /// Library file names written, in archive order
    pub library_files: Vec<String>,
}

/// Classify an archive entry path.
pub fn classify(path: &Path) -> Route {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return Route::Skip,
    };

    let ignored = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IGNORE_EXTENSIONS.contains(&ext));
    if ignored {
        return Route::Skip;
    }

    let components: Vec<Component> = path.components().collect();
    if let Some(idx) = components
        .iter()
        .position(|c| matches!(c, Component::Normal(n) if *n == RESOURCE_COMPONENT))
    {
        let rest = &components[idx + 1..];
        if rest.is_empty() {
            return Route::ResourceRoot;
        }
        // Only plain names below `resource`; anything else could escape the tree
        if !rest.iter().all(|c| matches!(c, Component::Normal(_))) {
            return Route::Skip;
        }
        return Route::Resource(rest.iter().collect());
    }

    if name.ends_with(LIBRARY_SUFFIX) {
        if EXCLUDE_SO.iter().any(|excluded| *excluded == name) {
            return Route::Skip;
        }
        return Route::Library(name.into_owned());
    }

    Route::Skip
}

/// Extract one cached archive for `target`.
///
/// Resource files are written below [`Layout::resource_dir`] only when
/// `deploy_resources` is set; otherwise they count as skipped. Library files
/// go flat into the target's own library directory.
pub fn extract_archive(
    archive_path: &Path,
    target: &PlatformTarget,
    layout: &Layout,
    deploy_resources: bool,
) -> Result<ExtractionStats> {
    let resource_dir = layout.resource_dir();
    let library_dir = layout.library_dir(target.abi);

    fs::create_dir_all(&library_dir).with_context(|| {
        format!(
            "Failed to create library directory: {}",
            library_dir.display()
        )
    })?;

    let file = fs::File::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path.display()))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    let mut stats = ExtractionStats::default();

    let entries = archive
        .entries()
        .with_context(|| format!("Failed to read archive: {}", archive_path.display()))?;

    for entry in entries {
        let mut entry = entry
            .with_context(|| format!("Failed to read entry in {}", archive_path.display()))?;
        if !is_file_entry(entry.header().entry_type()) {
            continue;
        }

        let path = entry
            .path()
            .context("Failed to read entry path")?
            .into_owned();

        match classify(&path) {
            Route::Resource(_) if !deploy_resources => stats.skipped += 1,
            Route::Resource(rel) => {
                let dest = resource_dir.join(&rel);
                write_entry(&mut entry, &dest)?;
                stats.resources += 1;
            }
            Route::Library(name) => {
                let dest = library_dir.join(&name);
                write_entry(&mut entry, &dest)?;
                stats.libraries += 1;
                stats.library_files.push(name);
            }
            Route::ResourceRoot => {}
            Route::Skip => {
                tracing::trace!("skip {}", path.display());
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

/// Regular and contiguous entries both carry plain file data
fn is_file_entry(kind: EntryType) -> bool {
    matches!(kind, EntryType::Regular | EntryType::Continuous)
}

fn write_entry(reader: &mut impl std::io::Read, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let mut out = fs::File::create(dest)
        .with_context(|| format!("Failed to create file: {}", dest.display()))?;
    std::io::copy(reader, &mut out)
        .with_context(|| format!("Failed to write file: {}", dest.display()))?;
    Ok(())
}
