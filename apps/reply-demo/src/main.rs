use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use reply::{ReplierConfig, load_manifest};
use reply_demo::{AppState, DemoError, base_manifest, router};
use tracing_subscriber::EnvFilter;

/// Example API serving standardized JSON responses
#[derive(Parser)]
#[command(name = "reply-demo")]
#[command(about = "Example API serving standardized JSON responses")]
#[command(version)]
struct Cli {
    /// Path to replier configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8081)]
    port: u16,

    /// Extra error manifest (YAML); its entries override the built-in ones
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // defaults -> YAML (if provided) -> env (REPLY_*)
    let config = ReplierConfig::load(cli.config.as_deref())
        .context("failed to load replier configuration")?;

    let mut manifests = base_manifest();
    if let Some(path) = &cli.manifest {
        let extra = load_manifest::<DemoError>(path)
            .with_context(|| format!("failed to load manifest {}", path.display()))?;
        tracing::info!(entries = extra.len(), "loaded extra error manifest");
        manifests.push(extra);
    }

    let app = router(AppState::new(&manifests, &config));

    let addr = SocketAddr::from(([127, 0, 0, 1], cli.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!(%addr, "reply-demo listening");

    axum::serve(listener, app).await.context("serve")
}
