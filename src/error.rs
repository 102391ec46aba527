use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Release request failed: {status} {reason} ({url})")]
    ApiStatus {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "No Android archives found in release {tag}; expected .tar.gz assets for {keywords}"
    )]
    NoMatchingAssets { tag: String, keywords: String },

    #[error("Release {tag} has no archive for {abis}")]
    MissingPlatformAssets { tag: String, abis: String },

    #[error("No cached archives in {0}; run again without --skip-download first")]
    EmptyCache(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SetupError>;
