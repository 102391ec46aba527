//! Fixed configuration: release source, file-name rules and the project layout.
//!
//! Everything here is a constant table except [`Layout`], which resolves the
//! fixed relative destinations against a project root chosen at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Repository whose releases carry the prebuilt MAA Core archives
pub const DEFAULT_REPO: &str = "Aliothmoon/MaaAssistantArknights";

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Overrides [`DEFAULT_API_BASE`] (mirrors, local test servers)
pub const API_BASE_ENV: &str = "MAA_SETUP_API_BASE";

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

pub const METADATA_TIMEOUT: Duration = Duration::from_secs(30);
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);

pub const ARCHIVE_SUFFIX: &str = ".tar.gz";
pub const LIBRARY_SUFFIX: &str = ".so";

/// Archive directory whose contents go to the resource tree
pub const RESOURCE_COMPONENT: &str = "resource";

/// Header files ship in the archive but are never deployed
pub const IGNORE_EXTENSIONS: &[&str] = &["h"];

/// Shared runtime provided to the app by other means
pub const EXCLUDE_SO: &[&str] = &["libc++_shared.so"];

/// Libraries in jniLibs owned by other tooling; clean mode leaves them alone
pub const PRESERVE_SO: &[&str] = &["libjnidispatch.so"];

pub const CACHE_DIR: &str = ".maa-cache";
pub const ASSETS_RESOURCE_DIR: &str = "app/src/main/assets/MaaSync/MaaResource";
pub const ASSET_MANIFEST: &str = "app/src/main/assets/MaaSync/asset_manifest.json";
pub const JNILIBS_DIR: &str = "app/src/main/jniLibs";

/// Prefix of manifest entries, relative to the assets root
pub const MANIFEST_PREFIX: &str = "MaaSync/MaaResource";

/// Resolved destination paths for one project root
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR)
    }

    pub fn resource_dir(&self) -> PathBuf {
        self.root.join(ASSETS_RESOURCE_DIR)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(ASSET_MANIFEST)
    }

    pub fn jnilibs_dir(&self) -> PathBuf {
        self.root.join(JNILIBS_DIR)
    }

    /// Library directory for one ABI, e.g. `app/src/main/jniLibs/arm64-v8a`
    pub fn library_dir(&self, abi: &str) -> PathBuf {
        self.jnilibs_dir().join(abi)
    }
}

/// API base URL, honouring [`API_BASE_ENV`]
pub fn api_base() -> String {
    std::env::var(API_BASE_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Access token from the environment, read once at startup
pub fn access_token() -> Option<String> {
    std::env::var(TOKEN_ENV)
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
