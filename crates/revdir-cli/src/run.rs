//! Wires one scrape run together: profile selection, browser session,
//! pagination, CSV output.
//!
//! Partial results survive failures: whatever the driver accumulated is
//! written to disk before the error is propagated, so an access-denied on
//! page 40 does not throw away pages 1–39.

use std::path::Path;
use std::time::Duration;

use revdir_core::{csv_out, AppConfig};
use revdir_scraper::{ChromeSession, PaginationDriver, ScrapeOutcome, ScrapeSession, SiteProfile};

use crate::{Cli, Site};

pub(crate) fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let profile = resolve_profile(cli)?;
    tracing::info!(profile = %profile.name, url = %cli.url, "starting scrape run");

    let page_load = Duration::from_secs(config.page_load_timeout_secs);
    let ws_url = cli.browser_ws.as_deref().or(config.browser_ws_url.as_deref());
    let mut browser = match ws_url {
        Some(ws_url) => {
            tracing::info!("attaching to remote browser session");
            ChromeSession::connect(ws_url, page_load)?
        }
        None => {
            tracing::info!("no browser endpoint configured — launching local headless Chrome");
            ChromeSession::launch(page_load)?
        }
    };

    let listing_wait = cli
        .listing_timeout_secs
        .unwrap_or(config.listing_wait_timeout_secs);
    let driver = PaginationDriver::new(
        profile,
        Duration::from_secs(listing_wait),
        Duration::from_millis(config.inter_page_delay_ms),
    );
    let session = ScrapeSession::new(cli.url.clone(), cli.start_page, cli.max_pages, cli.max_items);
    let outcome = driver.run(&mut browser, session);

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| config.output_path.clone());
    finish(outcome, &output)
}

/// Persists accumulated records and reports the run's outcome.
///
/// Records are written even when the run failed. When the write itself also
/// fails, the scrape failure stays attached to the returned error so neither
/// fault is lost.
fn finish(outcome: ScrapeOutcome, output: &Path) -> anyhow::Result<()> {
    if outcome.records.is_empty() {
        tracing::warn!(path = %output.display(), "no records collected — nothing written");
    } else if let Err(write_error) = csv_out::write_records_to_path(&outcome.records, output) {
        let mut error = anyhow::Error::new(write_error)
            .context(format!("writing {}", output.display()));
        if let Some(failure) = outcome.failure {
            error = error.context(format!(
                "scrape run aborted ({failure}); writing its partial results also failed"
            ));
        }
        return Err(error);
    } else {
        tracing::info!(
            records = outcome.records.len(),
            path = %output.display(),
            "wrote CSV output"
        );
    }

    println!(
        "collected {} listings across {} pages (stop: {})",
        outcome.records.len(),
        outcome.pages_visited,
        outcome.stop.as_str()
    );

    match outcome.failure {
        Some(failure) => Err(anyhow::Error::new(failure).context("scrape run aborted")),
        None => Ok(()),
    }
}

/// Picks the selector profile: an explicit file wins, then an explicit
/// `--site`, then host-based detection from the start URL.
fn resolve_profile(cli: &Cli) -> anyhow::Result<SiteProfile> {
    if let Some(path) = &cli.profile_file {
        return Ok(SiteProfile::from_yaml_file(path)?);
    }
    match cli.site {
        Site::G2 => Ok(SiteProfile::g2()),
        Site::Capterra => Ok(SiteProfile::capterra()),
        Site::Auto => SiteProfile::for_url(&cli.url).ok_or_else(|| {
            anyhow::anyhow!(
                "no built-in profile matches {}; pass --site or --profile-file",
                cli.url
            )
        }),
    }
}
