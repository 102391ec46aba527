use clap::Parser;
use colored::Colorize;
use maa_setup::platform::AbiSelection;
use maa_setup::{Layout, SetupOptions, colors, config};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "maa-setup")]
#[command(
    author,
    version,
    about = "Download prebuilt MAA Core archives and deploy them into the app tree",
    long_about = None
)]
struct Cli {
    /// Release tag to use (default: latest)
    #[arg(short, long)]
    tag: Option<String>,

    /// Clean destination directories before deploying
    #[arg(short, long)]
    clean: bool,

    /// Skip the download and deploy from the cache only
    #[arg(short, long)]
    skip_download: bool,

    /// Only deploy this ABI
    #[arg(long, value_enum, default_value_t = AbiSelection::All)]
    abi: AbiSelection,

    /// Project root the destination paths are relative to
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Repository publishing the releases (owner/name)
    #[arg(long, default_value = config::DEFAULT_REPO)]
    repo: String,

    /// Do not regenerate the asset manifest
    #[arg(long)]
    no_manifest: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    colors::init_colors();

    let layout = Layout::new(cli.project_root);
    let opts = SetupOptions {
        tag: cli.tag,
        clean: cli.clean,
        skip_download: cli.skip_download,
        abi: cli.abi,
        repo: cli.repo,
        api_base: config::api_base(),
        token: config::access_token(),
        write_manifest: !cli.no_manifest,
    };
    tracing::debug!("project root: {}", layout.root().display());

    match maa_setup::setup(&layout, &opts).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
