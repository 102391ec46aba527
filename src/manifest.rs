//! Asset manifest listing every deployed resource file.
//!
//! The app reads `MaaSync/asset_manifest.json` to know which bundled assets
//! to sync on first start, so it has to be regenerated after each deploy:
//!
//! ```json
//! {"files":["MaaSync/MaaResource/tasks.json","MaaSync/MaaResource/template/a.png"]}
//! ```

use crate::config::MANIFEST_PREFIX;
use crate::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub files: Vec<String>,
}

impl AssetManifest {
    /// Collect every regular file below `resource_dir`, sorted.
    ///
    /// A missing directory yields an empty manifest.
    pub fn scan(resource_dir: &Path) -> Result<Self> {
        let mut files = Vec::new();

        if resource_dir.is_dir() {
            for entry in walkdir::WalkDir::new(resource_dir)
                .follow_links(false)
                .max_open(64)
            {
                let entry =
                    entry.map_err(|e| anyhow::anyhow!("Failed to read directory: {}", e))?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let rel = entry
                    .path()
                    .strip_prefix(resource_dir)
                    .map_err(|e| anyhow::anyhow!("Unexpected path outside resources: {}", e))?;
                let rel = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                files.push(format!("{}/{}", MANIFEST_PREFIX, rel));
            }
        }

        files.sort();
        Ok(Self { files })
    }

    /// Write the manifest as compact JSON, creating the parent directory
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
        Ok(())
    }
}
