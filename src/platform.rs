//! Target platforms for the prebuilt archives.
//!
//! Each release publishes one archive per Android ABI. The archive name carries
//! a keyword identifying the platform, and every platform deploys into its own
//! `jniLibs` subdirectory:
//!
//! ```text
//! MAA-v6.3.0-android-arm64.tar.gz  ->  jniLibs/arm64-v8a/
//! MAA-v6.3.0-android-x64.tar.gz    ->  jniLibs/x86_64/
//! ```

use clap::ValueEnum;

/// Release asset keyword mapped to its jniLibs directory name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTarget {
    pub keyword: &'static str,
    pub abi: &'static str,
}

pub const ARM64: PlatformTarget = PlatformTarget {
    keyword: "android-arm64",
    abi: "arm64-v8a",
};

pub const X86_64: PlatformTarget = PlatformTarget {
    keyword: "android-x64",
    abi: "x86_64",
};

/// Every supported platform, in deployment order
pub const ABI_MAP: &[PlatformTarget] = &[ARM64, X86_64];

impl PlatformTarget {
    /// Whether a release asset or cached archive name belongs to this platform
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.contains(self.keyword)
    }
}

/// Comma-separated keywords, for error messages
pub fn keyword_list() -> String {
    ABI_MAP
        .iter()
        .map(|p| p.keyword)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Platforms requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AbiSelection {
    #[value(name = "arm64-v8a")]
    Arm64,
    #[value(name = "x64", alias = "x86_64")]
    X64,
    #[default]
    All,
}

impl AbiSelection {
    pub fn targets(self) -> Vec<PlatformTarget> {
        match self {
            AbiSelection::Arm64 => vec![ARM64],
            AbiSelection::X64 => vec![X86_64],
            AbiSelection::All => ABI_MAP.to_vec(),
        }
    }

    pub fn includes(self, target: &PlatformTarget) -> bool {
        self.targets().contains(target)
    }
}
