//! GitHub Releases client.
//!
//! Resolves a release, either by tag or the latest one, and returns its asset
//! list. The client sends a stable `User-Agent` (the API rejects requests
//! without one) and, when an access token is available, an `Authorization`
//! header to lift the unauthenticated rate limit.
//!
//! # Examples
//!
//! ```no_run
//! use maa_setup::api::ReleaseApi;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let api = ReleaseApi::new(
//!         "https://api.github.com",
//!         "Aliothmoon/MaaAssistantArknights",
//!         None,
//!     )?;
//!     let release = api.fetch_release(None).await?;
//!     println!("{} has {} assets", release.tag_name, release.assets.len());
//!     Ok(())
//! }
//! ```

use crate::config::METADATA_TIMEOUT;
use crate::error::{Result, SetupError};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

/// Release metadata from the API
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    #[serde(default = "unknown_tag")]
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

fn unknown_tag() -> String {
    "unknown".to_string()
}

/// A file attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

/// `User-Agent` sent with every request
pub fn user_agent() -> String {
    format!("maa-setup/{}", env!("CARGO_PKG_VERSION"))
}

/// Default headers shared by metadata and download clients
pub fn auth_headers(token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("token {}", token))
            .map_err(|e| anyhow::anyhow!("Invalid access token: {}", e))?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Release metadata client for one repository
#[derive(Clone)]
pub struct ReleaseApi {
    client: reqwest::Client,
    base: String,
    repo: String,
}

impl ReleaseApi {
    pub fn new(base: &str, repo: &str, token: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(METADATA_TIMEOUT)
            .user_agent(user_agent())
            .default_headers(auth_headers(token)?)
            .build()?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            repo: repo.to_string(),
        })
    }

    /// Endpoint for a tagged release, or the latest one
    pub fn release_url(&self, tag: Option<&str>) -> String {
        match tag {
            Some(tag) => format!("{}/repos/{}/releases/tags/{}", self.base, self.repo, tag),
            None => format!("{}/repos/{}/releases/latest", self.base, self.repo),
        }
    }

    /// Fetch release metadata.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::ApiStatus`] for any non-2xx response, and
    /// [`SetupError::Http`] for connection failures and timeouts. Nothing is
    /// retried.
    pub async fn fetch_release(&self, tag: Option<&str>) -> Result<Release> {
        let url = self.release_url(tag);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SetupError::ApiStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url,
            });
        }

        let release: Release = response.json().await?;
        tracing::debug!(
            "release {} lists {} assets",
            release.tag_name,
            release.assets.len()
        );

        Ok(release)
    }
}
