use std::path::PathBuf;

/// Runtime configuration shared by the scraper and the CLI.
///
/// All values come from `REVDIR_*` environment variables with sensible
/// defaults; nothing is required. See [`crate::config::load_app_config`].
#[derive(Clone)]
pub struct AppConfig {
    /// CDP websocket endpoint of a remote scraping-browser service.
    /// `None` means launch a local headless Chrome instead. The URL embeds
    /// account credentials, so it is redacted from `Debug` output.
    pub browser_ws_url: Option<String>,
    pub log_level: String,
    /// Default path for the output CSV when the CLI gives none.
    pub output_path: PathBuf,
    /// Navigation timeout for a single page load.
    pub page_load_timeout_secs: u64,
    /// Bounded wait for listing containers to appear after a load.
    pub listing_wait_timeout_secs: u64,
    /// Pause between page fetches, to stay polite with the target site.
    pub inter_page_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "browser_ws_url",
                &self.browser_ws_url.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("output_path", &self.output_path)
            .field("page_load_timeout_secs", &self.page_load_timeout_secs)
            .field(
                "listing_wait_timeout_secs",
                &self.listing_wait_timeout_secs,
            )
            .field("inter_page_delay_ms", &self.inter_page_delay_ms)
            .finish()
    }
}
