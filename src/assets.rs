//! Select the per-platform archives from a release's asset list.

use crate::api::Asset;
use crate::config::ARCHIVE_SUFFIX;
use crate::platform::{ABI_MAP, PlatformTarget};
use std::collections::BTreeMap;

/// An archive chosen for one platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedAsset {
    pub target: PlatformTarget,
    pub name: String,
    pub url: String,
    pub size: u64,
}

/// Map each platform ABI to the release archive built for it.
///
/// Only `.tar.gz` assets whose name contains a platform keyword are selected.
/// When several assets match the same keyword the later one replaces the
/// earlier one.
pub fn select_platform_assets(assets: &[Asset]) -> BTreeMap<&'static str, SelectedAsset> {
    let mut selected = BTreeMap::new();

    for asset in assets {
        if !asset.name.ends_with(ARCHIVE_SUFFIX) {
            continue;
        }
        for target in ABI_MAP.iter().filter(|t| t.matches(&asset.name)) {
            let entry = SelectedAsset {
                target: *target,
                name: asset.name.clone(),
                url: asset.browser_download_url.clone(),
                size: asset.size,
            };
            if let Some(previous) = selected.insert(target.abi, entry) {
                tracing::debug!(
                    "{} replaces {} for {}",
                    asset.name,
                    previous.name,
                    target.abi
                );
            }
        }
    }

    selected
}
