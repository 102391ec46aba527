use crate::api::ReleaseApi;
use crate::assets;
use crate::cache;
use crate::clean;
use crate::config::Layout;
use crate::download::{self, Downloader};
use crate::error::{Result, SetupError};
use crate::extract::{self, ExtractionStats};
use crate::manifest::AssetManifest;
use crate::platform::{self, AbiSelection, PlatformTarget};
use crate::report;
use colored::Colorize;
use std::path::PathBuf;

/// Options for one setup run
#[derive(Debug, Clone)]
pub struct SetupOptions {
    pub tag: Option<String>,
    pub clean: bool,
    pub skip_download: bool,
    pub abi: AbiSelection,
    pub repo: String,
    pub api_base: String,
    pub token: Option<String>,
    pub write_manifest: bool,
}

/// What a run deployed
#[derive(Debug, Default)]
pub struct SetupReport {
    /// Resolved release tag, `None` when the download phase was skipped
    pub tag: Option<String>,
    pub deployed: Vec<(PlatformTarget, ExtractionStats)>,
    pub removed_libraries: Vec<(PlatformTarget, Vec<String>)>,
}

/// Fetch, cache and deploy the Core archives into the project at `layout`
pub async fn setup(layout: &Layout, opts: &SetupOptions) -> Result<SetupReport> {
    let mut report = SetupReport::default();
    let cache_dir = layout.cache_dir();
    let targets = opts.abi.targets();

    println!("{}", "==> MAA Core setup".bold().green());

    let archives: Vec<(PathBuf, PlatformTarget)> = if opts.skip_download {
        println!("{} Skipping download, using cache", "[SKIP]".yellow());
        cache::deployable_archives(&cache_dir, opts.abi)?
    } else {
        let (tag, archives) = fetch_release_archives(layout, opts).await?;
        report.tag = Some(tag);
        archives
    };

    // Nothing is touched on disk until there is something to deploy
    if archives.is_empty() {
        return Err(SetupError::EmptyCache(cache_dir.display().to_string()));
    }

    if opts.clean {
        let resource_dir = layout.resource_dir();
        if clean::clean_resource_tree(&resource_dir)? {
            println!(
                "{} Removed resource directory: {}",
                "[DELETE]".red(),
                resource_dir.display()
            );
        }
        // Only the ABIs about to be redeployed lose their libraries
        for (_, target) in &archives {
            let removed = clean::clean_library_dir(&layout.library_dir(target.abi))?;
            for name in &removed {
                println!("    {} {}/{}", "[DELETE]".red(), target.abi, name);
            }
            report.removed_libraries.push((*target, removed));
        }
    }

    println!("\n{} Deploying archives...", "[DEPLOY]".cyan());
    let mut resources_deployed = false;
    for (archive, target) in &archives {
        let name = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("  {} {} -> {}", "[EXTRACT]".cyan(), name, target.abi);

        let stats = extract::extract_archive(archive, target, layout, !resources_deployed)?;
        report::print_extraction(&stats);

        if stats.resources > 0 {
            resources_deployed = true;
        }
        report.deployed.push((*target, stats));
    }

    if opts.write_manifest {
        let manifest = AssetManifest::scan(&layout.resource_dir())?;
        manifest.write(&layout.manifest_path())?;
        tracing::info!(
            "wrote {} ({} files)",
            layout.manifest_path().display(),
            manifest.files.len()
        );
    }

    report::print_summary(layout, &targets)?;

    Ok(report)
}

/// Resolve the release, select its platform archives and make sure the
/// requested ones are in the cache
async fn fetch_release_archives(
    layout: &Layout,
    opts: &SetupOptions,
) -> Result<(String, Vec<(PathBuf, PlatformTarget)>)> {
    let api = ReleaseApi::new(&opts.api_base, &opts.repo, opts.token.as_deref())?;
    println!(
        "{} Fetching release info: {}",
        "[FETCH]".cyan(),
        api.release_url(opts.tag.as_deref())
    );

    let release = api.fetch_release(opts.tag.as_deref()).await?;
    println!("  Tag: {}", release.tag_name.bold());

    let selected = assets::select_platform_assets(&release.assets);
    if selected.is_empty() {
        return Err(SetupError::NoMatchingAssets {
            tag: release.tag_name,
            keywords: platform::keyword_list(),
        });
    }

    println!("\n{} Found {} Android archives:", "[INFO]".cyan(), selected.len());
    for (abi, asset) in &selected {
        println!(
            "  {}: {} ({})",
            abi,
            asset.name,
            report::format_size(asset.size)
        );
    }

    let (available, missing): (Vec<PlatformTarget>, Vec<PlatformTarget>) = opts
        .abi
        .targets()
        .into_iter()
        .partition(|t| selected.contains_key(t.abi));
    if available.is_empty() {
        let abis: Vec<&str> = missing.iter().map(|t| t.abi).collect();
        return Err(SetupError::MissingPlatformAssets {
            tag: release.tag_name,
            abis: abis.join(", "),
        });
    }
    for target in &missing {
        tracing::warn!("release {} has no archive for {}", release.tag_name, target.abi);
    }

    let cache_dir = layout.cache_dir();
    println!(
        "\n{} Downloading to cache: {}",
        "[DOWNLOAD]".cyan(),
        cache_dir.display()
    );
    let downloader = Downloader::new(opts.token.as_deref())?;
    let cached =
        download::download_selected(&downloader, &selected, opts.abi, &cache_dir).await?;

    let fetched = cached
        .iter()
        .filter(|c| matches!(c.outcome, download::DownloadOutcome::Downloaded(_)))
        .count();
    tracing::debug!("{} downloaded, {} from cache", fetched, cached.len() - fetched);

    let archives = cached.into_iter().map(|c| (c.path, c.target)).collect();
    Ok((release.tag_name, archives))
}
