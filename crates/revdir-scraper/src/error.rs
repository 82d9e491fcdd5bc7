use thiserror::Error;

/// Fatal scrape-run failures.
///
/// Expected absences never appear here: a selector that matches nothing is an
/// absent field, and a listing-wait timeout past the first page is the natural
/// end of pagination. Only conditions that abort the whole run are errors,
/// and the driver still hands back whatever was accumulated before one.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("access denied at {url}: page matched block marker \"{marker}\"")]
    AccessDenied { url: String, marker: String },

    #[error("browser transport failure during {context}: {message}")]
    Transport { context: String, message: String },

    #[error("no listing containers appeared on the first page {url} within the wait timeout")]
    EmptyFirstPage { url: String },

    #[error("invalid start URL \"{url}\": {reason}")]
    InvalidStartUrl { url: String, reason: String },

    #[error("failed to load site profile from {path}: {reason}")]
    Profile { path: String, reason: String },
}
