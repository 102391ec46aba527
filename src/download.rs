//! Archive download into the local cache, one file at a time with progress

use crate::api::{auth_headers, user_agent};
use crate::assets::SelectedAsset;
use crate::cache;
use crate::config::DOWNLOAD_TIMEOUT;
use crate::error::Result;
use crate::platform::{AbiSelection, PlatformTarget};
use crate::progress;
use anyhow::Context;
use colored::Colorize;
use reqwest::header::ACCEPT;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// What happened to one archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Cache entry already had the declared size
    Cached,
    /// Fetched from the network, with the number of bytes written
    Downloaded(u64),
}

/// HTTP client for archive downloads
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    pub fn new(token: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .user_agent(user_agent())
            .default_headers(auth_headers(token)?)
            .build()?;

        Ok(Self { client })
    }

    /// Make sure `asset` is present in `cache_dir`, downloading it unless the
    /// cached copy already has the declared size.
    pub async fn ensure_cached(
        &self,
        asset: &SelectedAsset,
        cache_dir: &Path,
    ) -> Result<(PathBuf, DownloadOutcome)> {
        let dest = cache_dir.join(&asset.name);

        if cache::is_cached(&dest, asset.size) {
            println!(
                "  {} {} already cached, skipping download",
                "[CACHE]".green(),
                asset.name
            );
            return Ok((dest, DownloadOutcome::Cached));
        }

        println!("  {} {}", "[DOWNLOAD]".cyan(), asset.name);
        let written = self.fetch_to(&asset.url, &dest, &asset.name).await?;
        Ok((dest, DownloadOutcome::Downloaded(written)))
    }

    /// Stream `url` into `dest`, overwriting any existing file
    pub async fn fetch_to(&self, url: &str, dest: &Path, label: &str) -> Result<u64> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        tracing::debug!("GET {}", url);
        let mut response = self
            .client
            .get(url)
            .header(ACCEPT, "application/octet-stream")
            .send()
            .await?
            .error_for_status()?;

        let total = response.content_length();
        let pb = progress::download_bar(label, total);

        let mut file = fs::File::create(dest)
            .await
            .with_context(|| format!("Failed to create output file: {}", dest.display()))?;
        let mut downloaded: u64 = 0;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            pb.set_position(downloaded);
        }

        file.flush().await?;
        pb.finish_and_clear();

        match total {
            Some(total) => println!(
                "    {} {}/{} bytes ({}%)",
                "[DONE]".green(),
                downloaded,
                total,
                progress::percent(downloaded, total)
            ),
            None => println!("    {} {} bytes", "[DONE]".green(), downloaded),
        }
        tracing::debug!("{} written to {}", label, dest.display());

        Ok(downloaded)
    }
}

/// An archive of the resolved release, present in the cache
#[derive(Debug, Clone)]
pub struct CachedArchive {
    pub path: PathBuf,
    pub target: PlatformTarget,
    pub outcome: DownloadOutcome,
}

/// Download the selected archives for the requested platforms, in ABI order
pub async fn download_selected(
    downloader: &Downloader,
    selected: &BTreeMap<&'static str, SelectedAsset>,
    selection: AbiSelection,
    cache_dir: &Path,
) -> Result<Vec<CachedArchive>> {
    let mut results = Vec::new();

    for target in selection.targets() {
        let Some(asset) = selected.get(target.abi) else {
            continue;
        };
        let (path, outcome) = downloader.ensure_cached(asset, cache_dir).await?;
        results.push(CachedArchive {
            path,
            target,
            outcome,
        });
    }

    Ok(results)
}
