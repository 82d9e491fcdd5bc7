use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

mod run;

#[derive(Debug, Parser)]
#[command(name = "revdir")]
#[command(about = "Scrapes SaaS review directories into CSV")]
pub(crate) struct Cli {
    /// Category listing URL to start from.
    #[arg(long)]
    pub(crate) url: String,

    /// Built-in selector profile to use; `auto` picks by the URL's host.
    #[arg(long, value_enum, default_value_t = Site::Auto)]
    pub(crate) site: Site,

    /// YAML selector profile file, overriding the built-ins.
    #[arg(long)]
    pub(crate) profile_file: Option<PathBuf>,

    /// 1-based page to start from.
    #[arg(long, default_value_t = 1)]
    pub(crate) start_page: u32,

    /// Stop after collecting this many unique listings (0 = unlimited).
    #[arg(long, default_value_t = 0)]
    pub(crate) max_items: usize,

    /// Stop after visiting this many listing pages (0 = unlimited).
    #[arg(long, default_value_t = 0)]
    pub(crate) max_pages: usize,

    /// Output CSV path; defaults to `REVDIR_OUTPUT_PATH`.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,

    /// DevTools WebSocket URL of a remote browser; launches a local
    /// headless Chrome when unset.
    #[arg(long, env = "REVDIR_BROWSER_WS", hide_env_values = true)]
    pub(crate) browser_ws: Option<String>,

    /// Seconds to wait for listing containers on each page; defaults to
    /// `REVDIR_LISTING_WAIT_TIMEOUT_SECS`.
    #[arg(long)]
    pub(crate) listing_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Site {
    Auto,
    G2,
    Capterra,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = revdir_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    run::run(&cli, &config)
}
